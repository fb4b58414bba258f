use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncates to `max_width` display columns, ending with "..." when cut.
pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let budget = max_width.saturating_sub(3);
    let mut out = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > budget {
            break;
        }
        out.push(ch);
        width += w;
    }
    out.push_str("...");
    out
}

pub fn format_score(score: f64) -> String {
    format!("{:.2}", score)
}

pub fn format_time_limit(seconds: u32) -> String {
    match seconds {
        60 => "1 minute".to_string(),
        1 => "1 second".to_string(),
        s => format!("{} seconds", s),
    }
}
