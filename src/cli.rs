use crate::config::GlobalConfig;
use crate::models::options::Mode;
use clap::Parser;
use std::path::PathBuf;

/// Command-line interface for the decomment tool
#[derive(Parser, Debug)]
#[command(
    name = "decomment",
    version,
    about = "Strip or extract comments from C-family source files."
)]
pub struct Cli {
    /// Files, directories or glob patterns to process
    #[arg(default_value = ".")]
    pub paths: Vec<String>,

    /// Print comments instead of removing them
    #[arg(short = 'x', long, default_value_t = false)]
    pub extract: bool,

    /// Remove comments entirely instead of leaving their line breaks behind
    #[arg(long = "no-line-numbers", default_value_t = false)]
    pub no_line_numbers: bool,

    /// Leave /** */ documentation comments alone
    #[arg(short = 'd', long, default_value_t = false)]
    pub keep_docs: bool,

    /// Keep TODO and FIXME comments
    #[arg(short = 't', long, default_value_t = false)]
    pub preserve_todo: bool,

    /// Keep comments matching this regular expression (repeatable)
    #[arg(short = 'p', long = "preserve-pattern")]
    pub preserve_patterns: Vec<String>,

    /// Write <file>.bak before modifying a file
    #[arg(short, long, default_value_t = false)]
    pub backup: bool,

    /// Process files with unknown extensions
    #[arg(long, default_value_t = false)]
    pub force: bool,

    /// Perform a dry run (don't modify files)
    #[arg(short = 'n', long, default_value_t = false)]
    pub dry_run: bool,

    /// Print extracted comments as JSON lines
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Disable .gitignore file processing
    #[arg(long = "no-gitignore", default_value_t = false)]
    pub no_gitignore: bool,

    /// Worker threads (0 = one per CPU)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// Use this config file instead of discovering one
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write a template .decomment.toml to the current directory and exit
    #[arg(long, default_value_t = false)]
    pub init: bool,

    /// Show per-file details
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Cli {
    /// Overlay command-line flags on settings loaded from config files.
    /// Flags only ever switch behaviour on; an absent flag keeps the config value.
    pub fn apply_to(&self, global: &mut GlobalConfig) {
        if self.extract {
            global.mode = Mode::Extract;
        }
        if self.no_line_numbers {
            global.preserve_line_numbers = false;
        }
        if self.keep_docs {
            global.include_doc_comments = false;
        }
        if self.preserve_todo {
            global.preserve_todo = true;
        }
        global
            .preserve_patterns
            .extend(self.preserve_patterns.iter().cloned());
        if self.backup {
            global.backup = true;
        }
        if self.force {
            global.force = true;
        }
        if self.no_gitignore {
            global.respect_gitignore = false;
        }
        if let Some(threads) = self.threads {
            global.threads = threads;
        }
    }
}

/// Parse CLI arguments
pub fn parse_args() -> Cli {
    Cli::parse()
}
