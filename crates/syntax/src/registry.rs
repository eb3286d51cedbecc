// Chunk: docs/chunks/language_registry - Language keys, grammars, and file extensions

//! Language registry mapping language keys to tree-sitter grammars.
//!
//! A *language key* is the short name that selects a grammar and the query
//! directory under the query root (`python` → `queries/python/*.scm`). File
//! extensions map onto keys; some keys (e.g. `java`) are recognised but have
//! no grammar compiled in, which renders as plain text.

use std::collections::HashMap;
use std::path::Path;

use tree_sitter::Language;

/// Registry mapping language keys to tree-sitter grammars.
///
/// Supports 15 grammars: bash, c, cpp, css, go, html, javascript, json,
/// markdown, python, rust, toml, typescript, tsx and yaml.
pub struct LanguageRegistry {
    /// Map from language key to grammar
    grammars: HashMap<&'static str, Language>,
}

impl LanguageRegistry {
    /// Creates an empty registry. Every language renders unstyled.
    pub fn empty() -> Self {
        Self {
            grammars: HashMap::new(),
        }
    }

    /// Creates a registry with all bundled grammars.
    pub fn new() -> Self {
        let mut grammars: HashMap<&'static str, Language> = HashMap::new();

        grammars.insert("bash", tree_sitter_bash::LANGUAGE.into());
        grammars.insert("c", tree_sitter_c::LANGUAGE.into());
        grammars.insert("cpp", tree_sitter_cpp::LANGUAGE.into());
        grammars.insert("css", tree_sitter_css::LANGUAGE.into());
        grammars.insert("go", tree_sitter_go::LANGUAGE.into());
        grammars.insert("html", tree_sitter_html::LANGUAGE.into());
        grammars.insert("javascript", tree_sitter_javascript::LANGUAGE.into());
        grammars.insert("json", tree_sitter_json::LANGUAGE.into());
        // Block grammar only; inline markdown is left unparsed.
        grammars.insert("markdown", tree_sitter_md::LANGUAGE.into());
        grammars.insert("python", tree_sitter_python::LANGUAGE.into());
        grammars.insert("rust", tree_sitter_rust::LANGUAGE.into());
        grammars.insert("toml", tree_sitter_toml_ng::LANGUAGE.into());
        grammars.insert(
            "typescript",
            tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
        );
        grammars.insert("tsx", tree_sitter_typescript::LANGUAGE_TSX.into());
        grammars.insert("yaml", tree_sitter_yaml::LANGUAGE.into());

        Self { grammars }
    }

    /// Returns the grammar for a language key, if one is compiled in.
    pub fn grammar(&self, language: &str) -> Option<&Language> {
        self.grammars.get(language)
    }

    /// Iterates over every language key that has a grammar.
    pub fn languages(&self) -> impl Iterator<Item = (&'static str, &Language)> {
        self.grammars.iter().map(|(key, language)| (*key, language))
    }

    /// Returns true if a grammar is registered for the key.
    pub fn supports(&self, language: &str) -> bool {
        self.grammars.contains_key(language)
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Maps a file extension (with or without leading dot) to a language key.
///
/// Keys without a compiled grammar (`java`, `sql`, `xml`) are still
/// returned so the caller can tell "unknown file" from "known but plain".
pub fn language_for_extension(ext: &str) -> Option<&'static str> {
    let ext = ext.strip_prefix('.').unwrap_or(ext);
    let language = match ext.to_ascii_lowercase().as_str() {
        "sh" | "bash" => "bash",
        "c" | "h" => "c",
        "cc" | "cpp" | "cxx" | "hpp" => "cpp",
        "css" | "tcss" => "css",
        "go" => "go",
        "html" | "htm" => "html",
        "java" => "java",
        "js" | "mjs" | "jsx" => "javascript",
        "json" => "json",
        "md" | "markdown" => "markdown",
        "py" => "python",
        "rs" => "rust",
        "sql" => "sql",
        "toml" => "toml",
        "ts" => "typescript",
        "tsx" => "tsx",
        "xml" => "xml",
        "yaml" | "yml" => "yaml",
        _ => return None,
    };
    Some(language)
}

/// Maps a path to a language key by its extension.
pub fn language_for_path(path: &Path) -> Option<&'static str> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(language_for_extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_all_extension_targets_resolve_or_are_known_plain() {
        let registry = LanguageRegistry::new();
        for ext in [
            "sh", "bash", "c", "h", "cpp", "css", "tcss", "go", "html", "js", "json", "md", "py",
            "rs", "toml", "ts", "tsx", "yaml", "yml",
        ] {
            let language = language_for_extension(ext).unwrap();
            assert!(
                registry.supports(language),
                "Extension '{}' maps to '{}' which should have a grammar",
                ext,
                language
            );
        }
    }

    #[test]
    fn test_plain_languages_have_no_grammar() {
        let registry = LanguageRegistry::new();
        for ext in ["java", "sql", "xml"] {
            let language = language_for_extension(ext).unwrap();
            assert!(!registry.supports(language));
        }
    }

    #[test]
    fn test_extension_with_and_without_dot() {
        assert_eq!(language_for_extension(".rs"), Some("rust"));
        assert_eq!(language_for_extension("rs"), Some("rust"));
        assert_eq!(language_for_extension("RS"), Some("rust"));
    }

    #[test]
    fn test_unknown_extension() {
        assert_eq!(language_for_extension("xyz"), None);
        assert_eq!(language_for_extension(""), None);
    }

    #[test]
    fn test_language_for_path() {
        assert_eq!(
            language_for_path(&PathBuf::from("src/main.py")),
            Some("python")
        );
        assert_eq!(language_for_path(&PathBuf::from("Makefile")), None);
        assert_eq!(language_for_path(&PathBuf::from("a/b.tar.toml")), Some("toml"));
    }

    #[test]
    fn test_empty_registry_supports_nothing() {
        let registry = LanguageRegistry::empty();
        assert!(registry.grammar("python").is_none());
        assert_eq!(registry.languages().count(), 0);
    }

    #[test]
    fn test_grammar_count() {
        let registry = LanguageRegistry::new();
        assert_eq!(registry.languages().count(), 15);
    }
}
