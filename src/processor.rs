use crate::language::detect_language;
use crate::models::language::Syntax;
use crate::models::options::ProcessOptions;
use crate::output::generator::{Output, OutputGenerator, OutputStatistics};
use crate::rules::preservation::RuleSet;
use crate::scanner::{ScanWarning, Scanner};
use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Binds the scanner, the preservation rules and the output generator for
/// one set of options. Holds no per-file state, so a single instance can be
/// shared across threads.
#[derive(Debug, Clone)]
pub struct Processor {
    options: ProcessOptions,
    rules: RuleSet,
    force: bool,
}

impl Processor {
    pub fn new(options: ProcessOptions) -> Result<Self> {
        let rules = RuleSet::from_options(&options)?;
        Ok(Self {
            options,
            rules,
            force: false,
        })
    }

    /// Process files whose extension is not a known C-family language
    #[must_use]
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn options(&self) -> &ProcessOptions {
        &self.options
    }

    /// Process one in-memory buffer with the plain C-family syntax
    pub fn process_content(&self, content: &str) -> ProcessOutcome {
        self.process_content_with(content, Syntax::C_FAMILY)
    }

    pub fn process_content_with(&self, content: &str, syntax: Syntax) -> ProcessOutcome {
        let mut scanner = Scanner::with_syntax(content, syntax);
        let generator = OutputGenerator::new(&self.options, &self.rules);
        let (output, stats) = generator.generate(scanner.by_ref());

        ProcessOutcome {
            output,
            warnings: scanner.into_warnings(),
            stats,
        }
    }

    /// Process a single file
    pub fn process_file(&self, path: &Path) -> Result<ProcessedFile> {
        let detected = detect_language(path);
        if detected.is_none() && !self.force {
            bail!("Unsupported file type: {}", path.display());
        }
        let language = detected.map(|language| language.name);
        let syntax = detected.map(|language| language.syntax).unwrap_or_default();

        let bytes =
            std::fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
        let content = String::from_utf8(bytes)
            .with_context(|| format!("File is not valid UTF-8: {}", path.display()))?;

        debug!(path = %path.display(), language = language.unwrap_or("unknown"), "processing");

        let outcome = self.process_content_with(&content, syntax);
        for warning in &outcome.warnings {
            warn!(path = %path.display(), line = warning.line(), "{warning}");
        }

        Ok(ProcessedFile {
            path: path.to_path_buf(),
            language,
            original_content: content,
            output: outcome.output,
            warnings: outcome.warnings,
            stats: outcome.stats,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessOutcome {
    pub output: Output,
    pub warnings: Vec<ScanWarning>,
    pub stats: OutputStatistics,
}

#[derive(Debug)]
pub struct ProcessedFile {
    pub path: PathBuf,
    pub language: Option<&'static str>,
    pub original_content: String,
    pub output: Output,
    pub warnings: Vec<ScanWarning>,
    pub stats: OutputStatistics,
}

impl ProcessedFile {
    /// The stripped source, if this file was processed in strip mode
    pub fn processed_content(&self) -> Option<&str> {
        self.output.as_stripped()
    }

    /// Whether stripping changed the file. Extraction never modifies files.
    pub fn modified(&self) -> bool {
        self.processed_content()
            .is_some_and(|processed| processed != self.original_content)
    }
}
