use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KanjiEntry {
    pub character: char,             // The kanji itself
    pub old_jlpt_level: Option<u8>,  // Legacy JLPT level (1..4) from kanjidic
    pub grade: Option<u8>,           // School curriculum grade, disambiguates old level 2
    pub on_readings: Vec<String>,
    pub kun_readings: Vec<String>,
    pub name_readings: Vec<String>,  // Nanori readings
    pub meanings: Vec<String>,       // English meanings only
    pub stroke_count: u8,
    pub frequency_rank: Option<u32>, // Lower = more common; None if unranked
    pub radical: Option<String>,     // First classical radical
    pub heisig: Option<String>,      // Heisig RTK index
    pub heisig6: Option<String>,     // RTK 6th edition index
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormType {
    Kanji,
    Kana,
}

impl FormType {
    pub fn label(&self) -> &'static str {
        match self {
            FormType::Kanji => "kanji",
            FormType::Kana => "kana",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sense {
    pub part_of_speech: Vec<String>, // Expanded tag names, e.g. "noun (common) (futsuumeishi)"
    pub glosses: Vec<String>,        // English definition texts
    pub notes: Vec<String>,          // Expanded misc/info annotations
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamplePair {
    pub japanese: String,
    pub english: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabEntry {
    pub surface_form: String,        // Primary written form (kanji spelling if one exists)
    pub form_type: FormType,         // Whether surface_form is a kanji or kana spelling
    pub readings: Vec<String>,       // All kana spellings
    pub senses: Vec<Sense>,
    pub is_common: bool,             // Any kanji or kana form flagged common
    pub examples: Vec<ExamplePair>,
    pub constituent_kanji: Vec<char>, // Deduped, in order of first appearance
    pub frequency_rank: Option<u32>,
}

impl VocabEntry {
    pub fn is_kana_only(&self) -> bool {
        self.constituent_kanji.is_empty()
    }
}
