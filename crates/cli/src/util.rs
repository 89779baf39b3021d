use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of a string; CJK characters take two columns.
pub(crate) fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate to fit within `width` display columns, ending in ".." when cut.
pub(crate) fn truncate_display(s: &str, width: usize) -> String {
    if display_width(s) <= width {
        return s.to_string();
    }
    if width < 3 {
        return s
            .chars()
            .find(|ch| ch.width().unwrap_or(0) <= width)
            .map(String::from)
            .unwrap_or_default();
    }

    let budget = width - 2;
    let mut used = 0;
    let mut end_byte = 0;
    for (i, ch) in s.char_indices() {
        let cw = ch.width().unwrap_or(0);
        if used + cw > budget {
            break;
        }
        used += cw;
        end_byte = i + ch.len_utf8();
    }

    format!("{}..", &s[..end_byte])
}

/// Pad (left-aligned) or truncate to exactly `width` display columns.
pub(crate) fn pad_right(s: &str, width: usize) -> String {
    let s = truncate_display(s, width);
    let sw = display_width(&s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(sw)))
}

/// Right-align within `width` display columns. Never truncates.
pub(crate) fn pad_left(s: &str, width: usize) -> String {
    let sw = display_width(s);
    format!("{}{}", " ".repeat(width.saturating_sub(sw)), s)
}

/// Money as shown on the console: yuan sign, two decimals.
pub(crate) fn money(n: f64) -> String {
    format!("¥{:.2}", n)
}
