use serde::{Deserialize, Serialize};

/// What to do with the comments found in a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Remove comments and emit the remaining source
    #[default]
    Strip,
    /// Emit the comments only, one record per comment
    Extract,
}

/// Options for processing a single buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOptions {
    /// Strip or extract
    pub mode: Mode,
    /// Replace stripped comments with as many newlines as they spanned
    pub preserve_line_numbers: bool,
    /// Whether `/** */` comments are stripped/extracted like any other comment.
    /// When false they are left in the code and never reported.
    pub include_doc_comments: bool,
    /// Keep comments mentioning TODO or FIXME when stripping
    pub preserve_todo: bool,
    /// Regular expressions; a comment matching any of them is kept when stripping
    pub preserve_patterns: Vec<String>,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            mode: Mode::Strip,
            preserve_line_numbers: true,
            include_doc_comments: true,
            preserve_todo: false,
            preserve_patterns: Vec::new(),
        }
    }
}

impl ProcessOptions {
    #[must_use]
    pub fn strip() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn extract() -> Self {
        Self {
            mode: Mode::Extract,
            ..Self::default()
        }
    }
}
