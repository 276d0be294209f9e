use std::hash::{Hash, Hasher};

/// What a backtick opens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backtick {
    /// Nothing; the backtick is ordinary code
    Code,
    /// Template literal with `\` escapes and `${...}` substitutions, may span lines
    Template,
    /// Raw string without escapes, may span lines
    Raw,
}

/// What a single quote opens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Apostrophe {
    /// A literal closed by the next unescaped `'`
    Literal,
    /// A char literal only when it holds one character or one escape.
    /// Anything else (`'static`, `'label`, `'sym`) is code.
    CharOnly,
}

/// The lexical rules of one language that decide where comments and
/// literals start and end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Syntax {
    /// `//` opens a line comment
    pub line_comments: bool,
    /// `#` opens a line comment, except in front of `[`
    pub hash_comments: bool,
    /// Quote bytes that, tripled, open a multi-line string closed by the same triple
    pub triple_quotes: &'static [u8],
    pub backtick: Backtick,
    pub apostrophe: Apostrophe,
}

impl Syntax {
    /// `//` and `/* */` comments, `"` strings and `'` char literals
    pub const C_FAMILY: Syntax = Syntax {
        line_comments: true,
        hash_comments: false,
        triple_quotes: &[],
        backtick: Backtick::Code,
        apostrophe: Apostrophe::Literal,
    };

    pub const fn without_line_comments(self) -> Self {
        Self {
            line_comments: false,
            ..self
        }
    }

    pub const fn with_hash_comments(self) -> Self {
        Self {
            hash_comments: true,
            ..self
        }
    }

    pub const fn with_triple_quotes(self, quotes: &'static [u8]) -> Self {
        Self {
            triple_quotes: quotes,
            ..self
        }
    }

    pub const fn with_backtick(self, backtick: Backtick) -> Self {
        Self { backtick, ..self }
    }

    pub const fn with_apostrophe(self, apostrophe: Apostrophe) -> Self {
        Self { apostrophe, ..self }
    }

    /// Whether `byte` tripled opens a text block
    pub fn triples(&self, byte: u8) -> bool {
        self.triple_quotes.contains(&byte)
    }
}

impl Default for Syntax {
    fn default() -> Self {
        Self::C_FAMILY
    }
}

/// A source language whose files share the C-family comment syntax
#[derive(Debug, Clone)]
pub struct SupportedLanguage {
    pub name: &'static str,
    pub extensions: &'static [&'static str],
    pub syntax: Syntax,
}

impl SupportedLanguage {
    pub const fn new(name: &'static str, extensions: &'static [&'static str]) -> Self {
        Self {
            name,
            extensions,
            syntax: Syntax::C_FAMILY,
        }
    }

    pub const fn with_syntax(self, syntax: Syntax) -> Self {
        Self { syntax, ..self }
    }

    #[must_use]
    pub fn handles_extension(&self, extension: &str) -> bool {
        self.extensions
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(extension))
    }
}

impl PartialEq for SupportedLanguage {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for SupportedLanguage {}

impl Hash for SupportedLanguage {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}
