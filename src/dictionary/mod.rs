pub mod cache;
pub mod jmdict;
pub mod kanjidic;

use std::{ fs::File, io::{ BufReader, Read }, path::Path };

use regex::Regex;
use serde::Deserialize;
use zip::ZipArchive;

use crate::core::{ errors::FudagenError, utils::deserialize_number_or_string };

// Raw shapes of the jmdict-simplified JSON exports. Only the fields the
// normalizers read are modeled; serde skips the rest.

#[derive(Deserialize, Debug)]
pub struct JsonKanjidic {
    pub characters: Vec<JsonCharacter>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct JsonCharacter {
    pub literal: Option<String>,
    #[serde(default)]
    pub misc: JsonKanjiMisc,
    pub reading_meaning: Option<JsonReadingMeaning>,
    #[serde(default)]
    pub radicals: Vec<JsonRadical>,
    #[serde(default)]
    pub dictionary_references: Vec<JsonDictionaryReference>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct JsonKanjiMisc {
    pub jlpt_level: Option<u8>,
    pub grade: Option<u8>,
    #[serde(default)]
    pub stroke_counts: Vec<u8>,
    pub frequency: Option<u32>,
}

#[derive(Deserialize, Debug)]
pub struct JsonRadical {
    #[serde(deserialize_with = "deserialize_number_or_string")]
    pub value: String,
}

#[derive(Deserialize, Debug)]
pub struct JsonDictionaryReference {
    #[serde(rename = "type")]
    pub reference_type: String,
    #[serde(deserialize_with = "deserialize_number_or_string")]
    pub value: String,
}

#[derive(Deserialize, Debug)]
pub struct JsonReadingMeaning {
    #[serde(default)]
    pub groups: Vec<JsonReadingGroup>,
    #[serde(default)]
    pub nanori: Vec<String>,
}

#[derive(Deserialize, Debug)]
pub struct JsonReadingGroup {
    #[serde(default)]
    pub readings: Vec<JsonReading>,
    #[serde(default)]
    pub meanings: Vec<JsonMeaning>,
}

#[derive(Deserialize, Debug)]
pub struct JsonReading {
    #[serde(rename = "type")]
    pub reading_type: String,
    pub value: String,
}

#[derive(Deserialize, Debug)]
pub struct JsonMeaning {
    pub lang: Option<String>, // Absent means English
    pub value: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct JsonJmdict {
    #[serde(default)]
    pub tags: std::collections::HashMap<String, String>,
    pub words: Vec<JsonWord>,
}

#[derive(Deserialize, Debug)]
pub struct JsonWord {
    #[serde(default)]
    pub kanji: Vec<JsonSpelling>,
    #[serde(default)]
    pub kana: Vec<JsonSpelling>,
    #[serde(default)]
    pub sense: Vec<JsonSense>,
}

#[derive(Deserialize, Debug)]
pub struct JsonSpelling {
    pub text: Option<String>,
    #[serde(default)]
    pub common: bool,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct JsonSense {
    #[serde(default)]
    pub part_of_speech: Vec<String>,
    #[serde(default)]
    pub misc: Vec<String>,
    #[serde(default)]
    pub info: Vec<String>,
    #[serde(default)]
    pub gloss: Vec<JsonGloss>,
    #[serde(default)]
    pub examples: Vec<JsonExample>,
}

#[derive(Deserialize, Debug)]
pub struct JsonGloss {
    pub lang: Option<String>,
    pub text: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct JsonExample {
    #[serde(default)]
    pub sentences: Vec<JsonSentence>,
}

#[derive(Deserialize, Debug)]
pub struct JsonSentence {
    // jmdict-simplified ships this key as "land"; older exports used "lang"
    #[serde(alias = "land")]
    pub lang: Option<String>,
    pub text: Option<String>,
}

/// Reads a source file into a JSON string. Plain `.json` files are read
/// directly; `.zip` archives are searched for their first `.json` member.
pub fn read_source_json(path: &Path) -> Result<String, FudagenError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => {
            let file = File::open(path)?;
            let mut contents = String::new();
            BufReader::new(file).read_to_string(&mut contents)?;
            Ok(contents)
        }
        Some("zip") => {
            let file = File::open(path)?;
            let mut archive = ZipArchive::new(file)?;

            let json_member = Regex::new(r"\.json$")?;
            let member = archive
                .file_names()
                .find(|name| json_member.is_match(name))
                .map(String::from)
                .ok_or_else(|| FudagenError::EmptyArchive(path.display().to_string()))?;

            let mut contents = String::new();
            archive.by_name(&member)?.read_to_string(&mut contents)?;
            Ok(contents)
        }
        _ => Err(FudagenError::UnsupportedFileType(path.display().to_string())),
    }
}
