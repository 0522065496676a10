use unicode_width::UnicodeWidthStr;

/// Width of `text` in terminal/monospace cells. Full-width characters count as 2.
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Pad `text` with spaces on the right up to `width` display cells.
pub fn pad_to(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(text));
    let mut padded = String::with_capacity(text.len() + fill);
    padded.push_str(text);
    padded.extend(std::iter::repeat_n(' ', fill));
    padded
}

/// Display width of the widest cell in each column.
pub fn column_widths<S: AsRef<str>>(rows: &[Vec<S>]) -> Vec<usize> {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    (0..columns)
        .map(|i| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| display_width(cell.as_ref()))
                .max()
                .unwrap_or(0)
        })
        .collect()
}
