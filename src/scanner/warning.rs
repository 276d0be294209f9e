use serde::Serialize;
use thiserror::Error;

/// Recoverable conditions found while scanning. None of these abort a scan.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScanWarning {
    /// Treated as extending to the end of the input
    #[error("unterminated block comment starting on line {line}")]
    UnterminatedBlockComment { line: usize },

    /// Treated as ending at the end of its line
    #[error("unterminated string literal on line {line}")]
    UnterminatedStringLiteral { line: usize },

    /// Treated as ending at the end of its line
    #[error("unterminated character literal on line {line}")]
    UnterminatedCharLiteral { line: usize },

    /// Triple-quoted string, treated as extending to the end of the input
    #[error("unterminated text block starting on line {line}")]
    UnterminatedTextBlock { line: usize },

    /// Backtick literal, treated as extending to the end of the input
    #[error("unterminated template or raw string literal starting on line {line}")]
    UnterminatedTemplateLiteral { line: usize },
}

impl ScanWarning {
    pub const fn line(&self) -> usize {
        match self {
            ScanWarning::UnterminatedBlockComment { line }
            | ScanWarning::UnterminatedStringLiteral { line }
            | ScanWarning::UnterminatedCharLiteral { line }
            | ScanWarning::UnterminatedTextBlock { line }
            | ScanWarning::UnterminatedTemplateLiteral { line } => *line,
        }
    }
}
