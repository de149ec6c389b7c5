//! CSV files in Anki's import shape (front, back, tags) plus a run
//! manifest describing what was generated.

use std::{ collections::HashMap, fs, io, path::Path };

use serde::Serialize;

use crate::{
    core::{
        errors::FudagenError,
        models::{ KanjiEntry, VocabEntry },
    },
    deck::cards,
    tiering::TierStrategy,
};

/// Example words per kanji, looked up when writing kanji backs.
pub type ExampleWordMap<'a> = HashMap<char, Vec<&'a VocabEntry>>;

pub fn write_kanji_csv(
    path: &Path,
    entries: &[(KanjiEntry, u8)],
    level: &str,
    level_tag: bool,
    example_words: Option<&ExampleWordMap<'_>>,
) -> Result<(), FudagenError> {
    let mut writer = csv::Writer::from_path(path)?;
    write_kanji_records(&mut writer, entries, level, level_tag, example_words)?;
    writer.flush()?;
    Ok(())
}

fn write_kanji_records<W: io::Write>(
    writer: &mut csv::Writer<W>,
    entries: &[(KanjiEntry, u8)],
    level: &str,
    level_tag: bool,
    example_words: Option<&ExampleWordMap<'_>>,
) -> Result<(), FudagenError> {
    writer.write_record(["kanji", "back", "tags"])?;

    let no_words = Vec::new();
    for (entry, tier) in entries {
        let front = cards::kanji_front(entry.character, level);
        let words = example_words
            .and_then(|map| map.get(&entry.character))
            .unwrap_or(&no_words);
        let back = cards::kanji_back(entry, level, Some(*tier), words);
        let tags = kanji_tags(entry, *tier, level, level_tag);
        writer.write_record([&front, &back, &tags])?;
    }

    Ok(())
}

pub fn write_vocab_csv(
    path: &Path,
    entries: &[(VocabEntry, Option<u8>)],
    level: &str,
    level_tag: bool,
    include_examples: bool,
) -> Result<(), FudagenError> {
    let mut writer = csv::Writer::from_path(path)?;
    write_vocab_records(&mut writer, entries, level, level_tag, include_examples)?;
    writer.flush()?;
    Ok(())
}

fn write_vocab_records<W: io::Write>(
    writer: &mut csv::Writer<W>,
    entries: &[(VocabEntry, Option<u8>)],
    level: &str,
    level_tag: bool,
    include_examples: bool,
) -> Result<(), FudagenError> {
    writer.write_record(["word", "back", "tags"])?;

    for (word, tier) in entries {
        let front = cards::vocab_front(word, level);
        let back = cards::vocab_back(word, level, *tier, include_examples);
        let tags = vocab_tags(word, *tier, level, level_tag);
        writer.write_record([&front, &back, &tags])?;
    }

    Ok(())
}

/// Anki tags are space-separated. Flat decks lead with the level tag;
/// tiered decks drop it because the directory already names the level.
fn kanji_tags(entry: &KanjiEntry, tier: u8, level: &str, with_level: bool) -> String {
    let mut tags = Vec::new();
    if with_level {
        tags.push(level.to_string());
    }
    if let Some(grade) = entry.grade {
        tags.push(format!("grade{grade}"));
    }
    tags.push(format!("freq_tier{tier}"));
    tags.join(" ")
}

fn vocab_tags(word: &VocabEntry, tier: Option<u8>, level: &str, with_level: bool) -> String {
    let mut tags = Vec::new();
    if with_level {
        tags.push(level.to_string());
    }
    if word.is_common {
        tags.push("common".to_string());
    }
    tags.push(word.form_type.label().to_string());
    if let Some(tier) = tier {
        tags.push(format!("freq_tier{tier}"));
    }
    tags.join(" ")
}

#[derive(Serialize)]
pub struct DeckManifest {
    pub generator: &'static str,
    pub version: &'static str,
    pub generated: String,
    pub tier_strategy: &'static str,
    pub common_only: bool,
    pub include_examples: bool,
    /// Records dropped before deck assembly (parse failures, unclassified kanji).
    pub skipped: u32,
    pub decks: Vec<DeckCount>,
}

#[derive(Serialize)]
pub struct DeckCount {
    pub name: String,
    pub cards: usize,
}

impl DeckManifest {
    pub fn new(strategy: TierStrategy, common_only: bool, include_examples: bool) -> Self {
        DeckManifest {
            generator: "fudagen",
            version: env!("CARGO_PKG_VERSION"),
            generated: chrono::Utc::now().format("%Y-%m-%d").to_string(),
            tier_strategy: strategy.as_str(),
            common_only,
            include_examples,
            skipped: 0,
            decks: Vec::new(),
        }
    }

    pub fn record(&mut self, name: impl Into<String>, cards: usize) {
        self.decks.push(DeckCount { name: name.into(), cards });
    }
}

pub fn write_manifest(output_dir: &Path, manifest: &DeckManifest) -> Result<(), FudagenError> {
    let json = serde_json::to_string_pretty(manifest)?;
    fs::write(output_dir.join("manifest.json"), json)?;
    Ok(())
}
