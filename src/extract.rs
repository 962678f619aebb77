//! Parameter extraction - fixed substring rules for pulling structured
//! fields (query, city, expression) out of free-form commands

/// Lowercase and trim a command for matching
pub fn normalize(command: &str) -> String {
    command.trim().to_lowercase()
}

/// True if any keyword occurs as a substring of `text`
pub fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

/// Strip trailing sentence punctuation a transcriber or typist tends to add
pub fn trim_punctuation(text: &str) -> &str {
    text.trim()
        .trim_end_matches(['.', ',', '!', '?', ';', ':'])
        .trim()
}

/// Remove the first trigger phrase found in `text` (every occurrence of it)
/// and return what is left
pub fn strip_trigger(text: &str, triggers: &[&str]) -> String {
    let mut rest = text.to_string();
    if let Some(trigger) = triggers.iter().find(|t| text.contains(*t)) {
        rest = rest.replace(trigger, "");
    }
    trim_punctuation(&rest).to_string()
}

/// City named after the last "weather in" / "weather for", if any
pub fn extract_city(text: &str) -> Option<String> {
    let city = ["weather in", "weather for"]
        .iter()
        .find_map(|marker| text.rsplit_once(marker).map(|(_, after)| after))?;
    let city = trim_punctuation(city);
    if city.is_empty() {
        None
    } else {
        Some(city.to_string())
    }
}

/// Spoken operator phrases and the symbol each stands for, longest first
const SPOKEN_OPERATORS: &[(&str, &str)] = &[
    ("multiplied by", "*"),
    ("divided by", "/"),
    ("plus", "+"),
    ("minus", "-"),
    ("times", "*"),
    ("over", "/"),
];

/// Rewrite "15 plus 27" as "15 + 27". Only whole words are replaced; the
/// result still has to get past the arithmetic evaluator.
pub fn spoken_to_expression(text: &str) -> String {
    let text = trim_punctuation(&text.to_lowercase()).to_string();
    let words: Vec<&str> = text.split_whitespace().collect();
    let mut out: Vec<&str> = Vec::with_capacity(words.len());
    let mut i = 0;

    'words: while i < words.len() {
        for (phrase, symbol) in SPOKEN_OPERATORS {
            let parts: Vec<&str> = phrase.split(' ').collect();
            if words.len() - i >= parts.len() && words[i..i + parts.len()] == parts[..] {
                out.push(*symbol);
                i += parts.len();
                continue 'words;
            }
        }
        out.push(words[i]);
        i += 1;
    }

    out.join(" ")
}

/// Encode a query for a search URL: words percent-encoded, spaces as `+`
pub fn form_encode(query: &str) -> String {
    query
        .split_whitespace()
        .map(|w| urlencoding::encode(w).into_owned())
        .collect::<Vec<_>>()
        .join("+")
}
