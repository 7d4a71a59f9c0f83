const MAX_VISIBLE_CHARS: usize = 100;

const SECRET_MARKERS: [&str; 5] = ["Bearer ", "api_key=", "password=", "secret=", "token="];

/// Shortens prompt or chunk text for logging and masks anything that looks like a
/// credential. Truncation counts characters, so accented text never splits a
/// code point.
pub fn sanitize_prompt(prompt: &str) -> String {
    let trimmed = prompt.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let total_chars = trimmed.chars().count();
    let visible = if total_chars > MAX_VISIBLE_CHARS {
        let cut: String = trimmed.chars().take(MAX_VISIBLE_CHARS).collect();
        format!("{cut}... ({total_chars} chars total)")
    } else {
        trimmed.to_string()
    };

    SECRET_MARKERS
        .iter()
        .fold(visible, |text, marker| redact_after(&text, marker))
}

fn redact_after(text: &str, marker: &str) -> String {
    let Some(idx) = text.find(marker) else {
        return text.to_string();
    };

    let value_start = idx + marker.len();
    let value_end = text[value_start..]
        .find(|c: char| c.is_whitespace() || matches!(c, '&' | '"' | '\''))
        .map(|i| value_start + i)
        .unwrap_or(text.len());

    format!("{}{}[REDACTED]{}", &text[..idx], marker, &text[value_end..])
}
