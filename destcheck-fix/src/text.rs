use destcheck_types::vocab::DEFAULT_HINDI_TEXT;

/// Connectives kept lower case unless they open the phrase.
const MINOR_WORDS: &[&str] = &[
    "a", "an", "and", "at", "by", "da", "de", "for", "in", "ka", "ke", "ki", "of", "on", "the",
    "to",
];

/// Title-case a name or place: first letter of every word upper case, the rest of the
/// word untouched, connectives lower case after the first word.
///
/// Spacing is preserved exactly; only letter case changes.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut words_seen = 0usize;

    for (i, segment) in s.split(' ').enumerate() {
        if i > 0 {
            out.push(' ');
        }
        if segment.is_empty() {
            continue;
        }

        if words_seen > 0 && MINOR_WORDS.iter().any(|m| m.eq_ignore_ascii_case(segment)) {
            out.push_str(&segment.to_lowercase());
        } else {
            let mut chars = segment.chars();
            if let Some(first) = chars.next() {
                out.extend(first.to_uppercase());
                out.push_str(chars.as_str());
            }
        }
        words_seen += 1;
    }

    out
}

/// Collapse runs of whitespace (including newlines and tabs) to one space and trim.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Keep non-blank Hindi text, otherwise substitute the default placeholder.
pub fn hindi_or_default(raw: Option<&str>) -> String {
    match raw {
        Some(text) if !text.trim().is_empty() => text.to_string(),
        _ => DEFAULT_HINDI_TEXT.to_string(),
    }
}
