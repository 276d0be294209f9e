//! Crate docs are line comments here.

/// Returns the first word.
pub fn first<'a>(s: &'a str) -> &'a str {
    s.split(' ').next().unwrap_or("") // split on ' '
}

pub fn label() -> &'static str {
    'outer: loop {
        break 'outer; /* labelled */
    }
    "done // not a comment"
}

pub const SLASH: char = '/';
pub const QUOTE: char = '\'';
pub const BYTE: u8 = b'"';
