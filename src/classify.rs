//! Kanji level table and vocabulary classification.
//!
//! Classification runs in two phases: the full kanji collection is folded
//! into a `LevelTable` first, and only then are words classified against
//! that table. Classifying against a half-built table could call a word
//! non-JLPT just because its kanji had not been tabled yet.

use std::collections::HashMap;

use crate::core::{
    levels::{
        JlptLevel,
        WordLevel,
    },
    models::{
        KanjiEntry,
        VocabEntry,
    },
};

/// Immutable snapshot of kanji -> level, covering every kanji seen during
/// table construction. Characters whose legacy level does not map carry an
/// explicit `None`, which keeps "tabled but unclassified" apart from "never
/// tabled".
pub struct LevelTable {
    levels: HashMap<char, Option<JlptLevel>>,
}

impl LevelTable {
    pub fn build(entries: &[KanjiEntry]) -> Self {
        let mut levels = HashMap::with_capacity(entries.len());
        for entry in entries {
            let level =
                entry.old_jlpt_level.and_then(|old| JlptLevel::from_legacy(old, entry.grade));
            levels.insert(entry.character, level);
        }
        LevelTable { levels }
    }

    /// Outer `None` means the character was never tabled, inner `None` means
    /// it was tabled without a level.
    pub fn get(&self, character: char) -> Option<Option<JlptLevel>> {
        self.levels.get(&character).copied()
    }

    pub fn level_of(&self, character: char) -> Option<JlptLevel> {
        self.levels.get(&character).copied().flatten()
    }

    pub fn contains(&self, character: char) -> bool {
        self.levels.contains_key(&character)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Characters that mapped to an actual level, for run summaries.
    pub fn classified_count(&self) -> usize {
        self.levels.values().filter(|level| level.is_some()).count()
    }
}

/// Derives the level of a kanji entry from its legacy metadata.
pub fn classify_kanji(entry: &KanjiEntry) -> Option<JlptLevel> {
    entry.old_jlpt_level.and_then(|old| JlptLevel::from_legacy(old, entry.grade))
}

/// A word is only as easy as its hardest kanji: the constituent with the
/// highest difficulty decides the level. Words with no kanji at all are
/// kana-only, and a single constituent without a level (whether tabled as
/// unclassified or missing from the table entirely) makes the whole word
/// non-JLPT.
pub fn classify_word(word: &VocabEntry, table: &LevelTable) -> WordLevel {
    if word.constituent_kanji.is_empty() {
        return WordLevel::KanaOnly;
    }

    let mut hardest = JlptLevel::N5;
    for &character in &word.constituent_kanji {
        match table.level_of(character) {
            Some(level) => hardest = hardest.max(level),
            None => return WordLevel::NonJlpt,
        }
    }

    WordLevel::Jlpt(hardest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::FormType;

    fn kanji(character: char, old_level: Option<u8>, grade: Option<u8>) -> KanjiEntry {
        KanjiEntry {
            character,
            old_jlpt_level: old_level,
            grade,
            on_readings: Vec::new(),
            kun_readings: Vec::new(),
            name_readings: Vec::new(),
            meanings: Vec::new(),
            stroke_count: 1,
            frequency_rank: None,
            radical: None,
            heisig: None,
            heisig6: None,
        }
    }

    fn word(surface: &str, constituents: &[char]) -> VocabEntry {
        VocabEntry {
            surface_form: surface.to_string(),
            form_type: if constituents.is_empty() { FormType::Kana } else { FormType::Kanji },
            readings: Vec::new(),
            senses: Vec::new(),
            is_common: false,
            examples: Vec::new(),
            constituent_kanji: constituents.to_vec(),
            frequency_rank: None,
        }
    }

    #[test]
    fn test_table_keeps_unclassified_entries() {
        let entries = vec![kanji('一', Some(4), Some(1)), kanji('未', None, Some(5))];
        let table = LevelTable::build(&entries);

        assert_eq!(table.len(), 2);
        assert_eq!(table.classified_count(), 1);
        assert_eq!(table.get('一'), Some(Some(JlptLevel::N5)));
        // Tabled with no level is not the same as absent
        assert_eq!(table.get('未'), Some(None));
        assert_eq!(table.get('鬱'), None);
    }

    #[test]
    fn test_kana_only_word() {
        let table = LevelTable::build(&[kanji('一', Some(4), None)]);
        assert_eq!(classify_word(&word("ひらがな", &[]), &table), WordLevel::KanaOnly);
    }

    #[test]
    fn test_single_kanji_word() {
        let table = LevelTable::build(&[kanji('一', Some(4), Some(1))]);
        assert_eq!(
            classify_word(&word("一", &['一']), &table),
            WordLevel::Jlpt(JlptLevel::N5)
        );
    }

    #[test]
    fn test_hardest_kanji_wins() {
        let table = LevelTable::build(&[
            kanji('学', Some(2), Some(1)),
            kanji('生', Some(4), Some(1)),
            kanji('鬱', Some(1), None),
            kanji('病', Some(2), Some(3)),
        ]);

        // N3 beats N5
        assert_eq!(
            classify_word(&word("学生", &['学', '生']), &table),
            WordLevel::Jlpt(JlptLevel::N3)
        );
        // N1 beats N3
        assert_eq!(
            classify_word(&word("鬱病", &['鬱', '病']), &table),
            WordLevel::Jlpt(JlptLevel::N1)
        );
    }

    #[test]
    fn test_unclassified_constituent_forces_non_jlpt() {
        let table = LevelTable::build(&[kanji('一', Some(4), Some(1)), kanji('未', None, None)]);

        // One unclassified kanji outweighs any classified ones
        assert_eq!(
            classify_word(&word("一未", &['一', '未']), &table),
            WordLevel::NonJlpt
        );
    }

    #[test]
    fn test_untabled_constituent_treated_as_unclassified() {
        let table = LevelTable::build(&[kanji('一', Some(4), Some(1))]);
        assert_eq!(
            classify_word(&word("一鬱", &['一', '鬱']), &table),
            WordLevel::NonJlpt
        );
    }

    #[test]
    fn test_all_constituents_unknown() {
        let table = LevelTable::build(&[]);
        assert_eq!(
            classify_word(&word("野家", &['野', '家']), &table),
            WordLevel::NonJlpt
        );
    }

    #[test]
    fn test_classification_is_idempotent() {
        let entries = vec![
            kanji('食', Some(3), Some(2)),
            kanji('堂', Some(2), Some(5)),
            kanji('雑', Some(2), Some(7)),
        ];
        let table = LevelTable::build(&entries);
        let words = vec![
            word("食堂", &['食', '堂']),
            word("雑", &['雑']),
            word("どこ", &[]),
        ];

        let first: Vec<WordLevel> = words.iter().map(|w| classify_word(w, &table)).collect();
        let second: Vec<WordLevel> = words.iter().map(|w| classify_word(w, &table)).collect();
        assert_eq!(first, second);

        let rebuilt = LevelTable::build(&entries);
        let third: Vec<WordLevel> = words.iter().map(|w| classify_word(w, &rebuilt)).collect();
        assert_eq!(first, third);
    }
}
