use serde::{
    Deserialize,
    Deserializer,
};
use wana_kana::utils::is_char_kanji;

/// Collects the distinct CJK ideographs of a surface form, in order of first
/// appearance. Kana, punctuation, and anything outside the ideograph range is
/// skipped.
pub fn extract_kanji(surface: &str) -> Vec<char> {
    let mut kanji = Vec::new();
    for c in surface.chars() {
        if is_char_kanji(c) && !kanji.contains(&c) {
            kanji.push(c);
        }
    }
    kanji
}

/// Some kanjidic fields (radical values, dictionary references) show up as
/// JSON numbers in one export and strings in another. Accept both.
pub fn deserialize_number_or_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(i64),
        Text(String),
    }

    Ok(match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => n.to_string(),
        NumberOrString::Text(text) => text,
    })
}
