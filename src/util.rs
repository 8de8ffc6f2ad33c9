//! Small text helpers shared by the display code.

use unicode_width::UnicodeWidthStr;

/// Returns the display width of `s` in columns.
///
/// Wide characters (CJK, most emoji) count as two columns, so a record
/// holding such values switches to the multi-line form at the same visual
/// length as an ASCII one.
pub(crate) fn display_width(s: &str) -> usize {
    s.width()
}

/// Joins `key=value` pairs either on one line or one per line.
///
/// The one-line form `Name(a=1, b=2)` is used while it stays under `limit`
/// columns. Otherwise every pair goes on its own indented line with a
/// trailing comma.
pub(crate) fn format_pairs<'a, I>(name: &str, pairs: I, limit: usize) -> String
where
    I: IntoIterator<Item = (&'a str, String)>,
{
    let pairs: Vec<(&str, String)> = pairs.into_iter().collect();

    let short = pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join(", ");
    let one_line = format!("{}({})", name, short);
    if display_width(&one_line) < limit {
        return one_line;
    }

    let long = pairs
        .iter()
        .map(|(k, v)| format!("    {}={},", k, v))
        .collect::<Vec<_>>()
        .join("\n");
    format!("{}(\n{}\n)", name, long)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_width_ascii() {
        assert_eq!(display_width("hello"), 5);
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn test_display_width_wide_chars() {
        assert_eq!(display_width("日本"), 4);
    }

    #[test]
    fn test_format_pairs_one_line() {
        let out = format_pairs("State", vec![("a", "1".to_string())], 50);
        assert_eq!(out, "State(a=1)");
    }

    #[test]
    fn test_format_pairs_empty() {
        let out = format_pairs("Empty", Vec::new(), 50);
        assert_eq!(out, "Empty()");
    }

    #[test]
    fn test_format_pairs_multi_line() {
        let out = format_pairs(
            "State",
            vec![("a", "1".to_string()), ("b", "2".to_string())],
            10,
        );
        assert_eq!(out, "State(\n    a=1,\n    b=2,\n)");
    }

    #[test]
    fn test_format_pairs_threshold_is_exclusive() {
        // "S(a=1)" is six columns wide.
        assert_eq!(format_pairs("S", vec![("a", "1".to_string())], 7), "S(a=1)");
        assert_eq!(
            format_pairs("S", vec![("a", "1".to_string())], 6),
            "S(\n    a=1,\n)"
        );
    }
}
