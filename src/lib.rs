// decomment - strip or extract comments from C-family source files
// Re-export public modules and types

pub mod cli;
pub mod config;
pub mod language;
pub mod logging;
pub mod models;
pub mod output;
pub mod processor;
pub mod rules;
pub mod scanner;
pub mod utils;

// Re-export main types for convenience
pub use config::{Config, GlobalConfig, ResolvedConfig};
pub use language::detect_language;
pub use models::language::{Apostrophe, Backtick, SupportedLanguage, Syntax};
pub use models::options::{Mode, ProcessOptions};
pub use models::segment::{Segment, SegmentKind};
pub use output::generator::{CommentRecord, Output, OutputGenerator, OutputStatistics, process};
pub use processor::{ProcessOutcome, ProcessedFile, Processor};
pub use rules::preservation::{PreservationRule, RuleSet};
pub use scanner::{ScanResult, ScanState, ScanWarning, Scanner, scan, scan_all, scan_with};
pub use utils::path::expand_paths;

/// Strip comments from `source` with the given options, ignoring `options.mode`.
///
/// The returned warnings describe unterminated comments and literals that
/// were recovered while scanning.
pub fn strip(source: &str, options: &ProcessOptions) -> anyhow::Result<(String, Vec<ScanWarning>)> {
    strip_with(source, Syntax::C_FAMILY, options)
}

/// [`strip`] with the literal and comment rules of a specific language
pub fn strip_with(
    source: &str,
    syntax: Syntax,
    options: &ProcessOptions,
) -> anyhow::Result<(String, Vec<ScanWarning>)> {
    let rules = RuleSet::from_options(options)?;
    let mut scanner = Scanner::with_syntax(source, syntax);
    let (text, _) = OutputGenerator::new(options, &rules).strip(scanner.by_ref());
    Ok((text, scanner.into_warnings()))
}

/// Extract comment records from `source`, ignoring `options.mode`
pub fn extract(source: &str, options: &ProcessOptions) -> anyhow::Result<Vec<CommentRecord>> {
    extract_with(source, Syntax::C_FAMILY, options)
}

/// [`extract`] with the literal and comment rules of a specific language
pub fn extract_with(
    source: &str,
    syntax: Syntax,
    options: &ProcessOptions,
) -> anyhow::Result<Vec<CommentRecord>> {
    let rules = RuleSet::from_options(options)?;
    let (records, _) = OutputGenerator::new(options, &rules).extract(scan_with(source, syntax));
    Ok(records)
}
