use crate::models::language::{Apostrophe, Backtick, SupportedLanguage, Syntax};

const C_FAMILY: Syntax = Syntax::C_FAMILY;

/// Languages whose comments and literals follow the C-family grammar the scanner implements
pub static SUPPORTED_LANGUAGES: &[SupportedLanguage] = &[
    SupportedLanguage::new("java", &["java"]).with_syntax(C_FAMILY.with_triple_quotes(b"\"")),
    SupportedLanguage::new("c", &["c", "h"]),
    SupportedLanguage::new("cpp", &["cpp", "cc", "cxx", "c++", "hpp", "hh", "hxx"]),
    SupportedLanguage::new("csharp", &["cs"]).with_syntax(C_FAMILY.with_triple_quotes(b"\"")),
    SupportedLanguage::new("javascript", &["js", "mjs", "cjs", "jsx"])
        .with_syntax(C_FAMILY.with_backtick(Backtick::Template)),
    SupportedLanguage::new("typescript", &["ts", "tsx", "mts", "cts"])
        .with_syntax(C_FAMILY.with_backtick(Backtick::Template)),
    SupportedLanguage::new("go", &["go"]).with_syntax(C_FAMILY.with_backtick(Backtick::Raw)),
    SupportedLanguage::new("rust", &["rs"])
        .with_syntax(C_FAMILY.with_apostrophe(Apostrophe::CharOnly)),
    SupportedLanguage::new("swift", &["swift"]).with_syntax(C_FAMILY.with_triple_quotes(b"\"")),
    SupportedLanguage::new("kotlin", &["kt", "kts"])
        .with_syntax(C_FAMILY.with_triple_quotes(b"\"")),
    SupportedLanguage::new("dart", &["dart"]).with_syntax(C_FAMILY.with_triple_quotes(b"\"'")),
    SupportedLanguage::new("php", &["php"]).with_syntax(C_FAMILY.with_hash_comments()),
    SupportedLanguage::new("css", &["css"]).with_syntax(C_FAMILY.without_line_comments()),
    SupportedLanguage::new("scala", &["scala", "sc"]).with_syntax(
        C_FAMILY
            .with_triple_quotes(b"\"")
            .with_apostrophe(Apostrophe::CharOnly),
    ),
    SupportedLanguage::new("groovy", &["groovy", "gradle"])
        .with_syntax(C_FAMILY.with_triple_quotes(b"\"'")),
];

/// Returns all supported languages
pub fn get_supported_languages() -> &'static [SupportedLanguage] {
    SUPPORTED_LANGUAGES
}
