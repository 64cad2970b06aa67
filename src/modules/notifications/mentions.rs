/// Emails mentioned in `text`, in order of appearance.
///
/// A mention is a whitespace-delimited token starting with `@`; the rest of
/// the token is taken as-is, so `@a@x.com,` yields `a@x.com,`. Tokens with an
/// `@` anywhere else are not mentions.
pub fn extract_mentions(text: &str) -> Vec<String> {
    text.split_whitespace()
        .filter_map(|token| token.strip_prefix('@'))
        .map(str::to_string)
        .collect()
}
