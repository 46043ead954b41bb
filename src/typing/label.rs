//! Human-readable labels from machine column names

const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u', 'A', 'E', 'I', 'O', 'U'];

/// `jumlah_sd_negeri` becomes `Jumlah SD Negeri`.
///
/// Tokens of at most three letters, or without vowels, are treated as abbreviations and
/// upper-cased; every other token is title-cased.
pub fn humanize(column: &str) -> String {
    column
        .split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            if is_abbreviation(token) {
                token.to_uppercase()
            } else {
                title_case(token)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_abbreviation(token: &str) -> bool {
    token.chars().count() <= 3 || !token.contains(VOWELS)
}

fn title_case(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
