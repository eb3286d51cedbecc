// Chunk: docs/chunks/style_resolver - Capture key to style lookup with prefix fallback

//! Syntax theme mapping capture keys to styles.
//!
//! Capture keys are dotted (`constant.character.escape`). Lookup tries the
//! full key, then each shorter dot-prefix (`constant.character`,
//! `constant`), and finally falls back to the default style. The table is
//! static for the life of the theme; resolution is a pure function of it.

use std::collections::HashMap;

use glance_text::Style;

/// Key for the line-number gutter.
pub const LINE_NUMBER_KEY: &str = "ui.linenr";
/// Key for indent guides.
pub const INDENT_GUIDE_KEY: &str = "ui.virtual.indent-guide";

/// Catppuccin Macchiato color palette constants.
mod macchiato {
    use glance_text::Color;

    pub const ROSEWATER: Color = Color::hex(0xf4dbd6);
    pub const FLAMINGO: Color = Color::hex(0xf0c6c6);
    pub const PINK: Color = Color::hex(0xf5bde6);
    pub const MAUVE: Color = Color::hex(0xc6a0f6);
    pub const RED: Color = Color::hex(0xed8796);
    pub const MAROON: Color = Color::hex(0xee99a0);
    pub const PEACH: Color = Color::hex(0xf5a97f);
    pub const YELLOW: Color = Color::hex(0xeed49f);
    pub const GREEN: Color = Color::hex(0xa6da95);
    pub const TEAL: Color = Color::hex(0x8bd5ca);
    pub const SKY: Color = Color::hex(0x91d7e3);
    pub const SAPPHIRE: Color = Color::hex(0x7dc4e4);
    pub const BLUE: Color = Color::hex(0x8aadf4);
    pub const LAVENDER: Color = Color::hex(0xb7bdf8);
    pub const TEXT: Color = Color::hex(0xcad3f5);
    pub const OVERLAY2: Color = Color::hex(0x939ab7);
    pub const SURFACE2: Color = Color::hex(0x5b6078);
    pub const SURFACE1: Color = Color::hex(0x494d64);
    pub const SURFACE0: Color = Color::hex(0x363a4f);
}

/// A mapping from capture keys to visual styles.
#[derive(Debug, Clone)]
pub struct SyntaxTheme {
    /// Map from capture key to style
    styles: HashMap<&'static str, Style>,
}

impl SyntaxTheme {
    /// Creates a theme from an explicit table.
    pub fn from_table(styles: impl IntoIterator<Item = (&'static str, Style)>) -> Self {
        Self {
            styles: styles.into_iter().collect(),
        }
    }

    /// A theme with no entries: everything resolves to the default style.
    pub fn plain() -> Self {
        Self {
            styles: HashMap::new(),
        }
    }

    /// Creates the Catppuccin Macchiato syntax theme.
    pub fn catppuccin_macchiato() -> Self {
        use macchiato::*;

        Self::from_table([
            ("attribute", Style::fg(YELLOW)),
            ("type", Style::fg(YELLOW)),
            ("type.builtin", Style::fg(YELLOW).italic()),
            ("type.enum.variant", Style::fg(TEAL)),
            ("constructor", Style::fg(SAPPHIRE)),
            ("constant", Style::fg(PEACH)),
            ("constant.character", Style::fg(TEAL)),
            ("constant.character.escape", Style::fg(PINK)),
            ("string", Style::fg(GREEN)),
            ("string.regexp", Style::fg(PINK)),
            ("string.special", Style::fg(BLUE)),
            ("string.special.symbol", Style::fg(RED)),
            ("comment", Style::fg(OVERLAY2).italic()),
            ("variable", Style::fg(TEXT)),
            ("variable.parameter", Style::fg(MAROON).italic()),
            ("variable.builtin", Style::fg(RED)),
            ("variable.other.member", Style::fg(BLUE)),
            ("variable.other.local", Style::fg(LAVENDER)),
            ("label", Style::fg(SAPPHIRE)),
            ("punctuation", Style::fg(OVERLAY2)),
            ("punctuation.special", Style::fg(SKY)),
            ("keyword", Style::fg(MAUVE)),
            ("keyword.control.conditional", Style::fg(MAUVE).italic()),
            ("operator", Style::fg(SKY)),
            ("function", Style::fg(BLUE)),
            ("function.macro", Style::fg(MAUVE)),
            ("tag", Style::fg(BLUE)),
            ("namespace", Style::fg(YELLOW).italic()),
            ("special", Style::fg(BLUE)),
            ("markup.heading.marker", Style::fg(PEACH).bold()),
            ("markup.heading.1", Style::fg(LAVENDER)),
            ("markup.heading.2", Style::fg(MAUVE)),
            ("markup.heading.3", Style::fg(GREEN)),
            ("markup.heading.4", Style::fg(YELLOW)),
            ("markup.heading.5", Style::fg(PINK)),
            ("markup.heading.6", Style::fg(TEAL)),
            ("markup.list", Style::fg(MAUVE)),
            ("markup.list.unchecked", Style::fg(OVERLAY2)),
            ("markup.list.checked", Style::fg(GREEN)),
            ("markup.bold", Style::default().bold()),
            ("markup.italic", Style::default().italic()),
            ("markup.link.url", Style::fg(BLUE).italic().underlined()),
            ("markup.link.text", Style::fg(BLUE)),
            ("markup.raw", Style::fg(FLAMINGO)),
            ("markup.quote", Style::fg(ROSEWATER)),
            ("diff.minus", Style::fg(RED)),
            ("diff.plus", Style::fg(GREEN)),
            ("ui.text.inactive", Style::fg(SURFACE2)),
            (LINE_NUMBER_KEY, Style::fg(SURFACE1)),
            (INDENT_GUIDE_KEY, Style::fg(SURFACE0)),
        ])
    }

    /// Returns the style for a capture key, if defined.
    ///
    /// First tries an exact match, then tries prefix matching
    /// (e.g., "function.method.call" would match "function.method" then "function").
    pub fn style_for_capture(&self, name: &str) -> Option<&Style> {
        capture_key_prefixes(name).find_map(|key| self.styles.get(key))
    }

    /// Resolves a list of candidate keys, in priority order, to one style.
    ///
    /// The first key with any matching prefix wins; if none match, the
    /// default style is returned.
    pub fn resolve<'a, I>(&self, keys: I) -> Style
    where
        I: IntoIterator<Item = &'a str>,
    {
        keys.into_iter()
            .find_map(|key| self.style_for_capture(key))
            .copied()
            .unwrap_or_default()
    }

    /// Style for the line-number gutter.
    pub fn line_number(&self) -> Style {
        self.resolve([LINE_NUMBER_KEY])
    }

    /// Style for indent guides.
    pub fn indent_guide(&self) -> Style {
        self.resolve([INDENT_GUIDE_KEY])
    }
}

impl Default for SyntaxTheme {
    fn default() -> Self {
        Self::catppuccin_macchiato()
    }
}

/// Yields `key` followed by each shorter dot-prefix, most specific first.
///
/// `"a.b.c"` yields `"a.b.c"`, `"a.b"`, `"a"`.
pub fn capture_key_prefixes(key: &str) -> impl Iterator<Item = &str> {
    std::iter::successors(Some(key), |prefix| {
        let prefix: &str = *prefix;
        prefix.rfind('.').map(|dot_pos| &prefix[..dot_pos])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use glance_text::Color;

    #[test]
    fn test_prefixes_most_specific_first() {
        let keys: Vec<_> = capture_key_prefixes("constant.character.escape").collect();
        assert_eq!(
            keys,
            vec!["constant.character.escape", "constant.character", "constant"]
        );
        let keys: Vec<_> = capture_key_prefixes("keyword").collect();
        assert_eq!(keys, vec!["keyword"]);
    }

    #[test]
    fn test_exact_match_beats_prefix() {
        let theme = SyntaxTheme::catppuccin_macchiato();
        let escape = theme.style_for_capture("constant.character.escape").unwrap();
        assert_eq!(escape.fg, Color::hex(0xf5bde6));
        let character = theme.style_for_capture("constant.character").unwrap();
        assert_eq!(character.fg, Color::hex(0x8bd5ca));
    }

    #[test]
    fn test_prefix_matching() {
        let theme = SyntaxTheme::catppuccin_macchiato();

        // "function.method.call" falls back to "function"
        let style = theme.style_for_capture("function.method.call").unwrap();
        assert_eq!(style.fg, Color::hex(0x8aadf4));

        // "constant.numeric.integer" falls back to "constant"
        let style = theme.style_for_capture("constant.numeric.integer").unwrap();
        assert_eq!(style.fg, Color::hex(0xf5a97f));
    }

    #[test]
    fn test_unknown_capture() {
        let theme = SyntaxTheme::catppuccin_macchiato();
        assert!(theme.style_for_capture("unknown.capture").is_none());
        assert!(theme.resolve(["unknown.capture"]).is_default());
    }

    #[test]
    fn test_resolve_uses_first_matching_candidate() {
        let theme = SyntaxTheme::catppuccin_macchiato();
        let style = theme.resolve(["nothing.here", "comment.line", "keyword"]);
        assert_eq!(style.fg, Color::hex(0x939ab7));
        assert!(style.italic);
    }

    #[test]
    fn test_resolve_empty_is_default() {
        let theme = SyntaxTheme::catppuccin_macchiato();
        assert!(theme.resolve(std::iter::empty()).is_default());
    }

    #[test]
    fn test_plain_theme_resolves_everything_to_default() {
        let theme = SyntaxTheme::plain();
        assert!(theme.resolve(["keyword", "string"]).is_default());
        assert!(theme.line_number().is_default());
    }

    #[test]
    fn test_ui_styles() {
        let theme = SyntaxTheme::catppuccin_macchiato();
        assert_eq!(theme.line_number().fg, Color::hex(0x494d64));
        assert_eq!(theme.indent_guide().fg, Color::hex(0x363a4f));
    }

    #[test]
    fn test_italic_captures() {
        let theme = SyntaxTheme::catppuccin_macchiato();
        for name in ["comment", "variable.parameter", "namespace", "markup.italic"] {
            assert!(
                theme.style_for_capture(name).unwrap().italic,
                "Capture '{}' should be italic",
                name
            );
        }
        for name in ["keyword", "function", "string", "variable"] {
            assert!(
                !theme.style_for_capture(name).unwrap().italic,
                "Capture '{}' should not be italic",
                name
            );
        }
    }

    #[test]
    fn test_bound_names_differ_from_variable() {
        let theme = SyntaxTheme::catppuccin_macchiato();
        let variable = theme.resolve(["variable"]);
        assert_ne!(theme.resolve(["variable.parameter"]), variable);
        assert_ne!(theme.resolve(["variable.other.local"]), variable);
        assert_ne!(
            theme.resolve(["variable.other.local"]),
            theme.resolve(["variable.parameter"])
        );
    }
}
