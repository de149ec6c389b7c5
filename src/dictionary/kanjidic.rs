use std::{ collections::HashMap, path::Path, time::Instant };

use serde::{ Deserialize, Serialize };

use super::{
    cache::{ cache_path_for, load_cache, save_cache, source_fingerprint },
    read_source_json,
    JsonCharacter,
    JsonKanjidic,
};
use crate::core::{ errors::FudagenError, models::KanjiEntry };

/// Normalized kanjidic content plus the fingerprint it was parsed from.
#[derive(Serialize, Deserialize)]
pub struct KanjiSource {
    pub fingerprint: String,
    pub entries: Vec<KanjiEntry>,
    pub skipped: u32,
}

impl KanjiSource {
    /// Frequency rank per ranked kanji, used to derive word ranks.
    pub fn rank_map(&self) -> HashMap<char, u32> {
        self.entries
            .iter()
            .filter_map(|entry| entry.frequency_rank.map(|rank| (entry.character, rank)))
            .collect()
    }
}

pub fn load_kanji(path: &Path, use_cache: bool) -> Result<KanjiSource, FudagenError> {
    let fingerprint = source_fingerprint(path)?;
    let cache_path = cache_path_for(path);

    if use_cache {
        if let Ok(cached) = load_cache::<KanjiSource>(&cache_path) {
            if cached.fingerprint == fingerprint {
                println!("Loaded {} kanji entries from cache", cached.entries.len());
                return Ok(cached);
            }
            println!("Kanji cache is stale, re-parsing {}", path.display());
        }
    }

    let start = Instant::now();
    let contents = read_source_json(path)?;
    let parsed: JsonKanjidic = serde_json::from_str(&contents)?;

    let mut entries = Vec::new();
    let mut skipped = 0u32;
    for character in parsed.characters {
        match normalize_character(character) {
            Some(entry) => entries.push(entry),
            None => skipped += 1,
        }
    }

    println!(
        "Parsed {} kanji entries in {:.1}s ({} skipped)",
        entries.len(),
        start.elapsed().as_secs_f32(),
        skipped
    );

    let source = KanjiSource { fingerprint, entries, skipped };
    if use_cache {
        if let Err(e) = save_cache(&source, &cache_path) {
            eprintln!("Failed to write kanji cache: {}", e);
        }
    }

    Ok(source)
}

/// Entries without a JLPT level are kept so the classifier can tell
/// "seen but unclassified" apart from "never seen". A record is dropped
/// only when its literal or stroke count is missing.
fn normalize_character(raw: JsonCharacter) -> Option<KanjiEntry> {
    let literal = raw.literal?;
    let mut chars = literal.chars();
    let character = chars.next()?;
    if chars.next().is_some() {
        return None;
    }

    let stroke_count = raw.misc.stroke_counts.first().copied()?;

    let mut on_readings = Vec::new();
    let mut kun_readings = Vec::new();
    let mut meanings = Vec::new();
    let mut name_readings = Vec::new();

    if let Some(reading_meaning) = raw.reading_meaning {
        for group in reading_meaning.groups {
            for reading in group.readings {
                match reading.reading_type.as_str() {
                    "ja_on" => on_readings.push(reading.value),
                    "ja_kun" => kun_readings.push(reading.value),
                    _ => {}
                }
            }
            for meaning in group.meanings {
                if meaning.lang.as_deref().unwrap_or("en") == "en" {
                    if let Some(value) = meaning.value {
                        meanings.push(value);
                    }
                }
            }
        }
        name_readings = reading_meaning.nanori;
    }

    let radical = raw.radicals.into_iter().next().map(|radical| radical.value);

    let mut heisig = None;
    let mut heisig6 = None;
    for reference in raw.dictionary_references {
        match reference.reference_type.as_str() {
            "heisig" => heisig = Some(reference.value),
            "heisig6" => heisig6 = Some(reference.value),
            _ => {}
        }
    }

    Some(KanjiEntry {
        character,
        old_jlpt_level: raw.misc.jlpt_level,
        grade: raw.misc.grade,
        on_readings,
        kun_readings,
        name_readings,
        meanings,
        stroke_count,
        frequency_rank: raw.misc.frequency,
        radical,
        heisig,
        heisig6,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_character(json: &str) -> JsonCharacter {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_normalize_full_character() {
        let raw = parse_character(
            r#"{
                "literal": "学",
                "misc": {
                    "grade": 1,
                    "strokeCounts": [8],
                    "frequency": 63,
                    "jlptLevel": 2
                },
                "readingMeaning": {
                    "groups": [
                        {
                            "readings": [
                                {"type": "ja_on", "value": "ガク"},
                                {"type": "ja_kun", "value": "まな.ぶ"},
                                {"type": "pinyin", "value": "xue2"}
                            ],
                            "meanings": [
                                {"lang": "en", "value": "study"},
                                {"lang": "fr", "value": "étude"},
                                {"value": "learning"}
                            ]
                        }
                    ],
                    "nanori": ["たか"]
                },
                "radicals": [{"type": "classical", "value": 39}],
                "dictionaryReferences": [
                    {"type": "heisig", "value": 324},
                    {"type": "heisig6", "value": "346"}
                ]
            }"#,
        );

        let entry = normalize_character(raw).unwrap();
        assert_eq!(entry.character, '学');
        assert_eq!(entry.old_jlpt_level, Some(2));
        assert_eq!(entry.grade, Some(1));
        assert_eq!(entry.stroke_count, 8);
        assert_eq!(entry.frequency_rank, Some(63));
        assert_eq!(entry.on_readings, vec!["ガク"]);
        assert_eq!(entry.kun_readings, vec!["まな.ぶ"]);
        // Missing lang counts as English
        assert_eq!(entry.meanings, vec!["study", "learning"]);
        assert_eq!(entry.name_readings, vec!["たか"]);
        assert_eq!(entry.radical.as_deref(), Some("39"));
        assert_eq!(entry.heisig.as_deref(), Some("324"));
        assert_eq!(entry.heisig6.as_deref(), Some("346"));
    }

    #[test]
    fn test_missing_literal_is_dropped() {
        let raw = parse_character(r#"{"misc": {"jlptLevel": 4, "strokeCounts": [1]}}"#);
        assert!(normalize_character(raw).is_none());
    }

    #[test]
    fn test_missing_stroke_count_is_dropped() {
        let raw = parse_character(r#"{"literal": "一", "misc": {"jlptLevel": 4}}"#);
        assert!(normalize_character(raw).is_none());
    }

    #[test]
    fn test_unclassified_character_is_kept() {
        let raw = parse_character(r#"{"literal": "未", "misc": {"grade": 5, "strokeCounts": [5]}}"#);

        let entry = normalize_character(raw).unwrap();
        assert_eq!(entry.character, '未');
        assert_eq!(entry.old_jlpt_level, None);
        assert_eq!(entry.grade, Some(5));
    }

    #[test]
    fn test_no_reading_meaning_section() {
        let raw = parse_character(r#"{"literal": "々", "misc": {"strokeCounts": [3]}}"#);

        let entry = normalize_character(raw).unwrap();
        assert!(entry.on_readings.is_empty());
        assert!(entry.kun_readings.is_empty());
        assert!(entry.meanings.is_empty());
        assert!(entry.name_readings.is_empty());
    }

    #[test]
    fn test_rank_map_skips_unranked() {
        let characters = r#"{
            "characters": [
                {"literal": "一", "misc": {"strokeCounts": [1], "frequency": 2}},
                {"literal": "二", "misc": {"strokeCounts": [2]}},
                {"literal": "三", "misc": {"strokeCounts": [3], "frequency": 14}}
            ]
        }"#;
        let parsed: JsonKanjidic = serde_json::from_str(characters).unwrap();
        let entries: Vec<KanjiEntry> =
            parsed.characters.into_iter().filter_map(normalize_character).collect();
        let source = KanjiSource {
            fingerprint: String::new(),
            entries,
            skipped: 0,
        };

        let ranks = source.rank_map();
        assert_eq!(ranks.len(), 2);
        assert_eq!(ranks.get(&'一'), Some(&2));
        assert_eq!(ranks.get(&'二'), None);
        assert_eq!(ranks.get(&'三'), Some(&14));
    }
}
