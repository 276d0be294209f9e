use crate::language::definitions::get_supported_languages;
use crate::models::language::SupportedLanguage;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::Path;

static EXTENSION_MAP: Lazy<HashMap<String, &'static SupportedLanguage>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for language in get_supported_languages() {
        for extension in language.extensions {
            map.insert(extension.to_ascii_lowercase(), language);
        }
    }
    map
});

/// Detect the programming language of a file based on its extension
pub fn detect_language(file_path: &Path) -> Option<&'static SupportedLanguage> {
    let extension = file_path.extension()?.to_str()?;
    EXTENSION_MAP.get(&extension.to_ascii_lowercase()).copied()
}

/// Whether the file can be scanned with the C-family grammar
pub fn is_supported(file_path: &Path) -> bool {
    detect_language(file_path).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_detect_language() {
        let java_path = PathBuf::from("User.java");
        let java_lang = detect_language(&java_path).unwrap();
        assert_eq!(java_lang.name, "java");

        let c_path = PathBuf::from("test.c");
        assert_eq!(detect_language(&c_path).unwrap().name, "c");

        let h_path = PathBuf::from("test.h");
        assert_eq!(detect_language(&h_path).unwrap().name, "c");

        let hpp_path = PathBuf::from("test.hpp");
        assert_eq!(detect_language(&hpp_path).unwrap().name, "cpp");

        let jsx_path = PathBuf::from("component.jsx");
        assert_eq!(detect_language(&jsx_path).unwrap().name, "javascript");

        // Declaration files resolve on the last extension
        let dts_path = PathBuf::from("types.d.ts");
        assert_eq!(detect_language(&dts_path).unwrap().name, "typescript");

        let rust_path = PathBuf::from("lib.rs");
        assert_eq!(detect_language(&rust_path).unwrap().name, "rust");

        let kts_path = PathBuf::from("build.gradle.kts");
        assert_eq!(detect_language(&kts_path).unwrap().name, "kotlin");
    }

    #[test]
    fn test_detect_language_is_case_insensitive() {
        let upper = PathBuf::from("LEGACY.JAVA");
        assert_eq!(detect_language(&upper).unwrap().name, "java");

        let mixed = PathBuf::from("Main.Cpp");
        assert_eq!(detect_language(&mixed).unwrap().name, "cpp");
    }

    #[test]
    fn test_unsupported_files() {
        assert!(detect_language(&PathBuf::from("script.py")).is_none());
        assert!(detect_language(&PathBuf::from("Makefile")).is_none());
        assert!(detect_language(&PathBuf::from("notes.txt")).is_none());
        assert!(!is_supported(&PathBuf::from(".gitignore")));
    }
}
