//! Plain and table rendering for history and favorite rows.
//!
//! Callers check for empty input and print their own notice instead of an
//! empty table.

use unicode_width::UnicodeWidthStr;

use crate::history::HistoryEntry;

/// Marker shown in the `IS FAVORITED` column.
pub const FAVORITE_MARK: &str = "○";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const HEADERS: [&str; 7] = [
    "ID",
    "PHRASE",
    "PREFIX",
    "SUFFIX",
    "IS FAVORITED",
    "CREATED AT",
    "UPDATED AT",
];
const COLUMN_GAP: &str = "  ";

/// Output style for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// One phrase per line.
    Plain,
    /// Seven-column table with a total line.
    Table,
}

impl RenderMode {
    pub fn from_plain_flag(plain: bool) -> Self {
        if plain {
            Self::Plain
        } else {
            Self::Table
        }
    }
}

/// Render `rows` in `mode`.
pub fn render<T: AsRef<HistoryEntry>>(rows: &[T], mode: RenderMode) -> String {
    match mode {
        RenderMode::Plain => render_plain(rows),
        RenderMode::Table => render_table(rows),
    }
}

/// One phrase per line, no header or total.
pub fn render_plain<T: AsRef<HistoryEntry>>(rows: &[T]) -> String {
    let mut out = String::new();
    for row in rows {
        out.push_str(&row.as_ref().phrase);
        out.push('\n');
    }
    out
}

/// Phrases as plain lines, for generated phrases that were not saved.
pub fn render_phrases<S: AsRef<str>>(phrases: &[S]) -> String {
    let mut out = String::new();
    for phrase in phrases {
        out.push_str(phrase.as_ref());
        out.push('\n');
    }
    out
}

/// Fixed seven-column table followed by a blank line and `TOTAL : <count>`.
pub fn render_table<T: AsRef<HistoryEntry>>(rows: &[T]) -> String {
    let cells: Vec<[String; 7]> = rows.iter().map(|r| table_cells(r.as_ref())).collect();

    let mut widths = HEADERS.map(display_width);
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(display_width(cell));
        }
    }

    let mut out = String::new();
    push_line(&mut out, &HEADERS.map(String::from), &widths);
    for row in &cells {
        push_line(&mut out, row, &widths);
    }
    out.push('\n');
    out.push_str(&format!("TOTAL : {}\n", rows.len()));
    out
}

fn table_cells(row: &HistoryEntry) -> [String; 7] {
    [
        row.id.to_string(),
        row.phrase.clone(),
        row.prefix.clone().unwrap_or_default(),
        row.suffix.clone().unwrap_or_default(),
        if row.is_favorited {
            FAVORITE_MARK.to_string()
        } else {
            String::new()
        },
        row.created_at.format(TIMESTAMP_FORMAT).to_string(),
        row.updated_at.format(TIMESTAMP_FORMAT).to_string(),
    ]
}

fn push_line(out: &mut String, cells: &[String; 7], widths: &[usize; 7]) {
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths.iter()).enumerate() {
        if i > 0 {
            line.push_str(COLUMN_GAP);
        }
        line.push_str(cell);
        let pad = width.saturating_sub(display_width(cell));
        line.extend(std::iter::repeat(' ').take(pad));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Terminal column width of `s`.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn entry(id: i64, phrase: &str, favorited: bool) -> HistoryEntry {
        let ts = Utc.with_ymd_and_hms(9999, 12, 31, 0, 0, 0).unwrap();
        HistoryEntry {
            id,
            phrase: phrase.to_string(),
            prefix: Some(String::new()),
            suffix: None,
            is_favorited: favorited,
            created_at: ts,
            updated_at: ts,
        }
    }

    #[test]
    fn plain_is_one_phrase_per_line() {
        let rows = vec![entry(1, "test1", false), entry(2, "test2", true)];
        assert_eq!(render(&rows, RenderMode::Plain), "test1\ntest2\n");
    }

    #[test]
    fn table_has_header_rows_and_total() {
        let rows = vec![entry(1, "test", false), entry(2, "あかいねこ", true)];
        let out = render_table(&rows);
        let lines: Vec<&str> = out.lines().collect();

        assert!(lines[0].starts_with("ID"));
        for header in HEADERS {
            assert!(lines[0].contains(header), "missing header {header}");
        }
        assert!(lines[1].starts_with("1 "));
        assert!(lines[1].contains("9999-12-31 00:00:00"));
        assert!(!lines[1].contains(FAVORITE_MARK));
        assert!(lines[2].contains(FAVORITE_MARK));
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "TOTAL : 2");
    }

    #[test]
    fn table_columns_align_with_wide_text() {
        let rows = vec![entry(1, "ab", false), entry(2, "あかいねこ", false)];
        let out = render_table(&rows);
        let lines: Vec<&str> = out.lines().collect();

        // CREATED AT starts at the same display column on every line
        let col = |line: &str, needle: &str| display_width(&line[..line.find(needle).unwrap()]);
        let header_col = col(lines[0], "CREATED AT");
        assert_eq!(col(lines[1], "9999"), header_col);
        assert_eq!(col(lines[2], "9999"), header_col);
    }

    #[test]
    fn display_width_counts_wide_chars_twice() {
        assert_eq!(display_width("abc"), 3);
        assert_eq!(display_width("ねこ"), 4);
        assert_eq!(display_width("漢字a"), 5);
        assert_eq!(display_width(FAVORITE_MARK), 1);
    }

    #[test]
    fn display_width_handles_emoji_and_combining_marks() {
        assert_eq!(display_width("🚀"), 2);
        // か + combining dakuten occupies one wide cell
        assert_eq!(display_width("か\u{3099}"), 2);
    }

    #[test]
    fn table_columns_align_with_emoji() {
        let rows = vec![entry(1, "🚀ねこ", false), entry(2, "ab", false)];
        let out = render_table(&rows);
        let lines: Vec<&str> = out.lines().collect();

        let col = |line: &str, needle: &str| display_width(&line[..line.find(needle).unwrap()]);
        let header_col = col(lines[0], "CREATED AT");
        assert_eq!(col(lines[1], "9999"), header_col);
        assert_eq!(col(lines[2], "9999"), header_col);
    }

    #[test]
    fn render_phrases_plain_lines() {
        assert_eq!(render_phrases(&["a", "b"]), "a\nb\n");
    }
}
