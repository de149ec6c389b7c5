use std::{ collections::HashMap, path::Path, time::Instant };

use rayon::prelude::*;
use serde::{ Deserialize, Serialize };

use super::{
    cache::{ cache_path_for, load_cache, save_cache, source_fingerprint },
    read_source_json,
    JsonExample,
    JsonJmdict,
    JsonSense,
    JsonWord,
};
use crate::core::{
    errors::FudagenError,
    models::{ ExamplePair, FormType, Sense, VocabEntry },
    utils::extract_kanji,
};

/// Normalized vocabulary content plus the fingerprint it was parsed from.
/// Word frequency ranks are derived per run, so they are never cached.
#[derive(Serialize, Deserialize)]
pub struct VocabSource {
    pub fingerprint: String,
    pub entries: Vec<VocabEntry>,
    pub skipped: u32,
}

pub fn load_vocab(path: &Path, use_cache: bool) -> Result<VocabSource, FudagenError> {
    let fingerprint = source_fingerprint(path)?;
    let cache_path = cache_path_for(path);

    if use_cache {
        if let Ok(cached) = load_cache::<VocabSource>(&cache_path) {
            if cached.fingerprint == fingerprint {
                println!("Loaded {} vocabulary entries from cache", cached.entries.len());
                return Ok(cached);
            }
            println!("Vocabulary cache is stale, re-parsing {}", path.display());
        }
    }

    let start = Instant::now();
    let contents = read_source_json(path)?;
    let parsed: JsonJmdict = serde_json::from_str(&contents)?;
    let total = parsed.words.len();
    println!("Total entries: {}", total);

    let tags = parsed.tags;
    let normalized: Vec<Option<VocabEntry>> = parsed.words
        .into_par_iter()
        .map(|word| normalize_word(word, &tags))
        .collect();

    let mut entries = Vec::with_capacity(total);
    let mut skipped = 0u32;
    for entry in normalized {
        match entry {
            Some(entry) => entries.push(entry),
            None => skipped += 1,
        }
    }

    println!(
        "Normalized {} vocabulary entries in {:.1}s ({} skipped)",
        entries.len(),
        start.elapsed().as_secs_f32(),
        skipped
    );

    let source = VocabSource { fingerprint, entries, skipped };
    if use_cache {
        if let Err(e) = save_cache(&source, &cache_path) {
            eprintln!("Failed to write vocabulary cache: {}", e);
        }
    }

    Ok(source)
}

fn normalize_word(word: JsonWord, tags: &HashMap<String, String>) -> Option<VocabEntry> {
    if word.sense.is_empty() {
        return None;
    }

    let (surface_form, form_type) = primary_form(&word)?;

    let readings: Vec<String> =
        word.kana.iter().filter_map(|spelling| spelling.text.clone()).collect();
    let is_common = word.kanji.iter().chain(word.kana.iter()).any(|spelling| spelling.common);
    let constituent_kanji = extract_kanji(&surface_form);

    let mut senses = Vec::with_capacity(word.sense.len());
    let mut examples = Vec::new();
    for sense in word.sense {
        examples.extend(example_pairs(&sense.examples));
        senses.push(normalize_sense(sense, tags));
    }

    Some(VocabEntry {
        surface_form,
        form_type,
        readings,
        senses,
        is_common,
        examples,
        constituent_kanji,
        frequency_rank: None,
    })
}

/// The displayed spelling: a common kanji form wins, then the first kanji
/// form, then the first kana form. A winning form without text drops the
/// whole record rather than falling through to the next candidate.
fn primary_form(word: &JsonWord) -> Option<(String, FormType)> {
    if let Some(spelling) = word.kanji.iter().find(|spelling| spelling.common) {
        return spelling.text.clone().map(|text| (text, FormType::Kanji));
    }
    if let Some(spelling) = word.kanji.first() {
        return spelling.text.clone().map(|text| (text, FormType::Kanji));
    }
    word.kana
        .first()
        .and_then(|spelling| spelling.text.clone().map(|text| (text, FormType::Kana)))
}

fn normalize_sense(sense: JsonSense, tags: &HashMap<String, String>) -> Sense {
    let part_of_speech = sense.part_of_speech.iter().map(|tag| expand_tag(tag, tags)).collect();

    let glosses = sense.gloss
        .into_iter()
        .filter(|gloss| gloss.lang.as_deref() == Some("eng"))
        .filter_map(|gloss| gloss.text)
        .collect();

    let mut notes: Vec<String> = sense.misc.iter().map(|tag| expand_tag(tag, tags)).collect();
    notes.extend(sense.info);

    Sense { part_of_speech, glosses, notes }
}

fn expand_tag(tag: &str, tags: &HashMap<String, String>) -> String {
    tags.get(tag).cloned().unwrap_or_else(|| tag.to_string())
}

/// A usable pair needs both the Japanese sentence and its English
/// translation; anything else is dropped.
fn example_pairs(examples: &[JsonExample]) -> Vec<ExamplePair> {
    examples
        .iter()
        .filter_map(|example| {
            let japanese = sentence_text(example, "jpn")?;
            let english = sentence_text(example, "eng")?;
            Some(ExamplePair { japanese, english })
        })
        .collect()
}

fn sentence_text(example: &JsonExample, lang: &str) -> Option<String> {
    example.sentences
        .iter()
        .find(|sentence| sentence.lang.as_deref() == Some(lang))
        .and_then(|sentence| sentence.text.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_word(json: &str) -> JsonWord {
        serde_json::from_str(json).unwrap()
    }

    fn tag_map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(key, name)| (key.to_string(), name.to_string()))
            .collect()
    }

    #[test]
    fn test_basic_word() {
        let word = parse_word(
            r#"{
                "kanji": [{"text": "学生", "common": true}],
                "kana": [{"text": "がくせい", "common": true}],
                "sense": [
                    {
                        "partOfSpeech": ["n"],
                        "gloss": [{"lang": "eng", "text": "student"}]
                    }
                ]
            }"#,
        );

        let entry = normalize_word(word, &tag_map(&[("n", "noun")])).unwrap();
        assert_eq!(entry.surface_form, "学生");
        assert_eq!(entry.form_type, FormType::Kanji);
        assert_eq!(entry.readings, vec!["がくせい"]);
        assert!(entry.is_common);
        assert_eq!(entry.senses.len(), 1);
        assert_eq!(entry.senses[0].part_of_speech, vec!["noun"]);
        assert_eq!(entry.senses[0].glosses, vec!["student"]);
        assert_eq!(entry.constituent_kanji, vec!['学', '生']);
        assert_eq!(entry.frequency_rank, None);
    }

    #[test]
    fn test_kana_only_word() {
        let word = parse_word(
            r#"{
                "kana": [{"text": "です", "common": true}],
                "sense": [
                    {
                        "partOfSpeech": ["aux-v"],
                        "gloss": [{"lang": "eng", "text": "to be"}]
                    }
                ]
            }"#,
        );

        let entry = normalize_word(word, &tag_map(&[("aux-v", "auxiliary verb")])).unwrap();
        assert_eq!(entry.surface_form, "です");
        assert_eq!(entry.form_type, FormType::Kana);
        assert!(entry.constituent_kanji.is_empty());
        assert!(entry.is_kana_only());
    }

    #[test]
    fn test_prefers_common_kanji_form() {
        let word = parse_word(
            r#"{
                "kanji": [
                    {"text": "非常用", "common": false},
                    {"text": "常用", "common": true}
                ],
                "kana": [{"text": "じょうよう"}],
                "sense": [{"gloss": [{"lang": "eng", "text": "everyday use"}]}]
            }"#,
        );

        let entry = normalize_word(word, &HashMap::new()).unwrap();
        assert_eq!(entry.surface_form, "常用");
        assert_eq!(entry.form_type, FormType::Kanji);
    }

    #[test]
    fn test_falls_back_to_first_kanji_form() {
        let word = parse_word(
            r#"{
                "kanji": [{"text": "学生"}, {"text": "学"}],
                "kana": [{"text": "がくせい"}],
                "sense": [{"gloss": [{"lang": "eng", "text": "student"}]}]
            }"#,
        );

        let entry = normalize_word(word, &HashMap::new()).unwrap();
        assert_eq!(entry.surface_form, "学生");
        assert!(!entry.is_common);
    }

    #[test]
    fn test_common_form_without_text_is_dropped() {
        let word = parse_word(
            r#"{
                "kanji": [{"common": true}],
                "kana": [{"text": "がくせい"}],
                "sense": [{"gloss": [{"lang": "eng", "text": "student"}]}]
            }"#,
        );

        assert!(normalize_word(word, &HashMap::new()).is_none());
    }

    #[test]
    fn test_no_senses_returns_none() {
        let word = parse_word(
            r#"{
                "kanji": [{"text": "学生"}],
                "kana": [{"text": "がくせい"}],
                "sense": []
            }"#,
        );

        assert!(normalize_word(word, &HashMap::new()).is_none());
    }

    #[test]
    fn test_no_form_returns_none() {
        let word = parse_word(r#"{"sense": [{"gloss": [{"lang": "eng", "text": "x"}]}]}"#);
        assert!(normalize_word(word, &HashMap::new()).is_none());
    }

    #[test]
    fn test_non_english_glosses_filtered() {
        let word = parse_word(
            r#"{
                "kana": [{"text": "がっこう"}],
                "sense": [
                    {
                        "partOfSpeech": ["n"],
                        "gloss": [
                            {"lang": "ger", "text": "Schule"},
                            {"lang": "eng", "text": "school"},
                            {"lang": "eng", "text": "academy"}
                        ]
                    }
                ]
            }"#,
        );

        let entry = normalize_word(word, &tag_map(&[("n", "noun")])).unwrap();
        assert_eq!(entry.senses[0].glosses, vec!["school", "academy"]);
    }

    #[test]
    fn test_unknown_tag_kept_raw() {
        let word = parse_word(
            r#"{
                "kana": [{"text": "テスト"}],
                "sense": [
                    {
                        "partOfSpeech": ["unknown_tag"],
                        "gloss": [{"lang": "eng", "text": "test"}]
                    }
                ]
            }"#,
        );

        let entry = normalize_word(word, &HashMap::new()).unwrap();
        assert_eq!(entry.senses[0].part_of_speech, vec!["unknown_tag"]);
    }

    #[test]
    fn test_misc_and_info_become_notes() {
        let word = parse_word(
            r#"{
                "kana": [{"text": "うまい"}],
                "sense": [
                    {
                        "partOfSpeech": ["adj-i"],
                        "misc": ["uk", "col"],
                        "info": ["transitive verb"],
                        "gloss": [{"lang": "eng", "text": "delicious"}]
                    }
                ]
            }"#,
        );

        let tags = tag_map(&[
            ("adj-i", "i-adjective"),
            ("uk", "usually kana"),
            ("col", "colloquial"),
        ]);
        let entry = normalize_word(word, &tags).unwrap();
        assert_eq!(entry.senses[0].notes, vec!["usually kana", "colloquial", "transitive verb"]);
    }

    #[test]
    fn test_example_needs_both_languages() {
        let word = parse_word(
            r#"{
                "kanji": [{"text": "学生"}],
                "kana": [{"text": "がくせい"}],
                "sense": [
                    {
                        "gloss": [{"lang": "eng", "text": "student"}],
                        "examples": [
                            {"sentences": [{"lang": "jpn", "text": "学生です。"}]},
                            {"sentences": [{"lang": "eng", "text": "I am a student."}]},
                            {
                                "sentences": [
                                    {"lang": "jpn", "text": "私は学生です。"},
                                    {"lang": "ger", "text": "Ich bin Student."},
                                    {"lang": "eng", "text": "I am a student."}
                                ]
                            }
                        ]
                    }
                ]
            }"#,
        );

        let entry = normalize_word(word, &HashMap::new()).unwrap();
        assert_eq!(entry.examples.len(), 1);
        assert_eq!(entry.examples[0].japanese, "私は学生です。");
        assert_eq!(entry.examples[0].english, "I am a student.");
    }

    #[test]
    fn test_examples_collected_across_senses() {
        let word = parse_word(
            r#"{
                "kanji": [{"text": "上"}],
                "kana": [{"text": "うえ"}],
                "sense": [
                    {
                        "gloss": [{"lang": "eng", "text": "above"}],
                        "examples": [
                            {
                                "sentences": [
                                    {"lang": "jpn", "text": "上を見て。"},
                                    {"lang": "eng", "text": "Look up."}
                                ]
                            }
                        ]
                    },
                    {
                        "gloss": [{"lang": "eng", "text": "top"}],
                        "examples": [
                            {
                                "sentences": [
                                    {"lang": "jpn", "text": "山の上。"},
                                    {"lang": "eng", "text": "The top of the mountain."}
                                ]
                            }
                        ]
                    }
                ]
            }"#,
        );

        let entry = normalize_word(word, &HashMap::new()).unwrap();
        assert_eq!(entry.examples.len(), 2);
        assert_eq!(entry.examples[0].japanese, "上を見て。");
        assert_eq!(entry.examples[1].japanese, "山の上。");
    }

    #[test]
    fn test_sentence_land_key_accepted() {
        let word = parse_word(
            r#"{
                "kana": [{"text": "はい"}],
                "sense": [
                    {
                        "gloss": [{"lang": "eng", "text": "yes"}],
                        "examples": [
                            {
                                "sentences": [
                                    {"land": "jpn", "text": "はい、そうです。"},
                                    {"land": "eng", "text": "Yes, that is so."}
                                ]
                            }
                        ]
                    }
                ]
            }"#,
        );

        let entry = normalize_word(word, &HashMap::new()).unwrap();
        assert_eq!(entry.examples.len(), 1);
    }

    #[test]
    fn test_is_common_from_kana_form() {
        let word = parse_word(
            r#"{
                "kanji": [{"text": "学生", "common": false}],
                "kana": [{"text": "がくせい", "common": true}],
                "sense": [{"gloss": [{"lang": "eng", "text": "student"}]}]
            }"#,
        );

        let entry = normalize_word(word, &HashMap::new()).unwrap();
        assert!(entry.is_common);
    }
}
