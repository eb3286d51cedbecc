// Chunk: docs/chunks/indent_normalizer - Indent unit inference, blank-line repair, indent guides

//! Indentation pre-pass for previews.
//!
//! Blank lines in source files carry arbitrary (often no) whitespace, which
//! breaks indent guides: a guide column would stop at every empty line
//! inside a block. Before rendering we
//!
//! 1. split the content into lines and drop trailing empty lines,
//! 2. infer the indent unit from the first indented line,
//! 3. rewrite every run of blank lines to the depth of the next non-blank
//!    line (a trailing run becomes empty).
//!
//! The sweep later replaces each leading unit with an indent-guide run.

/// Indent unit assumed when no line is indented.
pub const DEFAULT_INDENT: &str = "    ";
/// Glyph drawn at the start of each indent unit.
pub const GUIDE_GLYPH: char = '│';
/// Widest tab an indent guide will expand to.
pub const MAX_TAB_WIDTH: usize = 16;

/// Lines ready for the sweep, plus the indent unit they were repaired with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    pub lines: Vec<String>,
    pub unit: String,
}

impl NormalizedText {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Runs the whole pre-pass over raw content.
pub fn normalize(content: &str, default_indent: &str) -> NormalizedText {
    let mut lines = split_lines(content);
    let unit = detect_indent_unit(&lines)
        .unwrap_or(default_indent)
        .to_string();
    repair_blank_lines(&mut lines, &unit);
    NormalizedText { lines, unit }
}

/// Splits on `\n`, drops a trailing `\r` per line, and removes trailing
/// empty lines.
pub fn split_lines(content: &str) -> Vec<String> {
    let mut lines: Vec<String> = content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect();
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines
}

/// Leading whitespace of the first line that starts with whitespace and
/// has some non-whitespace after it.
pub fn detect_indent_unit<S: AsRef<str>>(lines: &[S]) -> Option<&str> {
    lines.iter().find_map(|line| {
        let line: &str = line.as_ref();
        if !line.starts_with(char::is_whitespace) {
            return None;
        }
        let (end, _) = line.char_indices().find(|(_, c)| !c.is_whitespace())?;
        Some(&line[..end])
    })
}

/// Number of whole leading repetitions of `unit` in `line`.
pub fn indent_depth(line: &str, unit: &str) -> usize {
    if unit.is_empty() {
        return 0;
    }
    let mut depth = 0;
    let mut rest = line;
    while let Some(stripped) = rest.strip_prefix(unit) {
        depth += 1;
        rest = stripped;
    }
    depth
}

/// True for empty and whitespace-only lines.
pub fn is_blank(line: &str) -> bool {
    line.chars().all(char::is_whitespace)
}

/// Rewrites each run of blank lines to `unit` repeated to the depth of the
/// following non-blank line. A run with no following non-blank line is
/// emptied.
pub fn repair_blank_lines(lines: &mut [String], unit: &str) {
    let mut run_start = 0;

    for index in 0..lines.len() {
        if is_blank(&lines[index]) {
            continue;
        }
        let depth = indent_depth(&lines[index], unit);
        for blank in &mut lines[run_start..index] {
            *blank = unit.repeat(depth);
        }
        run_start = index + 1;
    }

    for blank in &mut lines[run_start..] {
        blank.clear();
    }
}

/// Display text for one indent unit: the guide glyph padded with spaces to
/// the unit's width, tabs counting as `tab_width` columns.
///
/// `tab_width` is capped at [`MAX_TAB_WIDTH`].
pub fn guide_text(unit: &str, glyph: char, tab_width: usize) -> String {
    let expanded = unit.replace('\t', &" ".repeat(tab_width.min(MAX_TAB_WIDTH)));
    std::iter::once(glyph)
        .chain(expanded.chars().skip(1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &[&str]) -> Vec<String> {
        text.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_split_strips_trailing_empty_lines() {
        assert_eq!(split_lines("a\nb\n\n\n"), lines(&["a", "b"]));
        assert_eq!(split_lines("a\n  \n"), lines(&["a", "  "]));
        assert!(split_lines("").is_empty());
        assert!(split_lines("\n\n").is_empty());
    }

    #[test]
    fn test_split_drops_carriage_returns() {
        assert_eq!(split_lines("a\r\n  b\r\n"), lines(&["a", "  b"]));
    }

    #[test]
    fn test_detect_first_indented_line() {
        let text = lines(&["def f():", "", "   ", "\tx = 1", "    y = 2"]);
        assert_eq!(detect_indent_unit(&text), Some("\t"));
    }

    #[test]
    fn test_detect_skips_whitespace_only_lines() {
        let text = lines(&["a", "      ", "  b"]);
        assert_eq!(detect_indent_unit(&text), Some("  "));
    }

    #[test]
    fn test_detect_none_without_indentation() {
        let text = lines(&["a", "b", ""]);
        assert_eq!(detect_indent_unit(&text), None);
    }

    #[test]
    fn test_normalize_defaults_to_four_spaces() {
        let normalized = normalize("a\nb\n", DEFAULT_INDENT);
        assert_eq!(normalized.unit, "    ");
    }

    #[test]
    fn test_indent_depth_counts_whole_units() {
        assert_eq!(indent_depth("        x", "    "), 2);
        assert_eq!(indent_depth("      x", "    "), 1);
        assert_eq!(indent_depth("x", "    "), 0);
        assert_eq!(indent_depth("\t\tx", "\t"), 2);
        assert_eq!(indent_depth("    x", ""), 0);
    }

    #[test]
    fn test_blank_between_depth_two_lines_becomes_depth_two() {
        let normalized = normalize(
            "class A:\n    def f(self):\n        a = 1\n\n        return a\n",
            DEFAULT_INDENT,
        );
        assert_eq!(normalized.lines[3], "        ");
    }

    #[test]
    fn test_blank_takes_depth_of_following_line() {
        let normalized = normalize("if x:\n        a\n  \nb\n", DEFAULT_INDENT);
        // Unit is inferred as eight spaces from line 2.
        assert_eq!(normalized.unit, "        ");
        assert_eq!(normalized.lines[2], "");
    }

    #[test]
    fn test_trailing_blank_after_depth_three_becomes_empty() {
        let normalized = normalize(
            "a:\n    b:\n        c:\n            d\n      \n",
            DEFAULT_INDENT,
        );
        assert_eq!(normalized.lines.len(), 5);
        assert_eq!(normalized.lines[4], "");
    }

    #[test]
    fn test_leading_blank_run_uses_first_content_depth() {
        let normalized = normalize("\n\n    x\n", DEFAULT_INDENT);
        assert_eq!(normalized.lines, lines(&["    ", "    ", "    x"]));
    }

    #[test]
    fn test_non_blank_lines_untouched() {
        let normalized = normalize("a\n   odd\n\tmixed\n", DEFAULT_INDENT);
        assert_eq!(normalized.lines, lines(&["a", "   odd", "\tmixed"]));
    }

    #[test]
    fn test_guide_text_pads_to_unit_width() {
        assert_eq!(guide_text("    ", GUIDE_GLYPH, 4), "│   ");
        assert_eq!(guide_text("  ", GUIDE_GLYPH, 4), "│ ");
        assert_eq!(guide_text("\t", GUIDE_GLYPH, 4), "│   ");
        assert_eq!(guide_text("\t", GUIDE_GLYPH, 8), "│       ");
        assert_eq!(guide_text(" ", '|', 4), "|");
    }

    #[test]
    fn test_guide_text_caps_tab_width() {
        let guide = guide_text("\t", GUIDE_GLYPH, usize::MAX);
        assert_eq!(guide.chars().count(), MAX_TAB_WIDTH);
        assert_eq!(guide_text("\t\t", '|', 100).len(), 2 * MAX_TAB_WIDTH);
    }
}
