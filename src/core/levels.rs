use std::fmt;

use serde::{
    Deserialize,
    Serialize,
};

/// The five modern JLPT levels. Variants are declared easiest first so the
/// derived ordering follows difficulty: N5 < N4 < N3 < N2 < N1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum JlptLevel {
    N5,
    N4,
    N3,
    N2,
    N1,
}

impl JlptLevel {
    pub const ALL: [JlptLevel; 5] =
        [JlptLevel::N5, JlptLevel::N4, JlptLevel::N3, JlptLevel::N2, JlptLevel::N1];

    /// Maps a legacy kanjidic JLPT level (1..4) onto the modern scale. Old
    /// level 2 straddles N3 and N2: characters taught in elementary school
    /// (grade 1..6) go to N3, the rest to N2. Anything outside 1..4 has no
    /// modern equivalent.
    pub fn from_legacy(old_level: u8, grade: Option<u8>) -> Option<JlptLevel> {
        match old_level {
            4 => Some(JlptLevel::N5),
            3 => Some(JlptLevel::N4),
            2 => match grade {
                Some(g) if (1..=6).contains(&g) => Some(JlptLevel::N3),
                _ => Some(JlptLevel::N2),
            },
            1 => Some(JlptLevel::N1),
            _ => None,
        }
    }

    /// 1 = easiest (N5) up to 5 = hardest (N1).
    pub fn difficulty(&self) -> u8 {
        match self {
            JlptLevel::N5 => 1,
            JlptLevel::N4 => 2,
            JlptLevel::N3 => 3,
            JlptLevel::N2 => 4,
            JlptLevel::N1 => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JlptLevel::N5 => "N5",
            JlptLevel::N4 => "N4",
            JlptLevel::N3 => "N3",
            JlptLevel::N2 => "N2",
            JlptLevel::N1 => "N1",
        }
    }
}

impl fmt::Display for JlptLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Level assigned to a vocabulary entry. Words without any kanji and words
/// containing unclassified kanji sit outside the N5..N1 ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WordLevel {
    Jlpt(JlptLevel),
    KanaOnly,
    NonJlpt,
}

impl WordLevel {
    pub const ALL: [WordLevel; 7] = [
        WordLevel::Jlpt(JlptLevel::N5),
        WordLevel::Jlpt(JlptLevel::N4),
        WordLevel::Jlpt(JlptLevel::N3),
        WordLevel::Jlpt(JlptLevel::N2),
        WordLevel::Jlpt(JlptLevel::N1),
        WordLevel::KanaOnly,
        WordLevel::NonJlpt,
    ];

    /// Identifier used in output file names.
    pub fn file_slug(&self) -> &'static str {
        match self {
            WordLevel::Jlpt(level) => level.as_str(),
            WordLevel::KanaOnly => "kana_only",
            WordLevel::NonJlpt => "non_jlpt",
        }
    }

    /// Label shown on cards and in Anki tags. Kana-only words are tagged
    /// plain "kana", unlike their file slug.
    pub fn label(&self) -> &'static str {
        match self {
            WordLevel::Jlpt(level) => level.as_str(),
            WordLevel::KanaOnly => "kana",
            WordLevel::NonJlpt => "non_jlpt",
        }
    }
}

impl fmt::Display for WordLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
