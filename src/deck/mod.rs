//! Deck assembly: groups classified entries by level and assigns each
//! level's frequency tiers.

pub mod cards;
pub mod writer;

use crate::{
    classify::{ classify_kanji, classify_word, LevelTable },
    core::{
        levels::{ JlptLevel, WordLevel },
        models::{ KanjiEntry, VocabEntry },
    },
    tiering::{ partition_tiers, TierStrategy },
};

/// One level's kanji cards, rank order, each with its tier (1 to 4).
pub struct KanjiBucket {
    pub level: JlptLevel,
    pub cards: Vec<(KanjiEntry, u8)>,
}

impl KanjiBucket {
    /// One tier's cards. Cards are stored tier 1 first, so a tier is a
    /// contiguous slice.
    pub fn tier_slice(&self, tier: u8) -> &[(KanjiEntry, u8)] {
        let start = self.cards.partition_point(|(_, t)| *t < tier);
        let end = self.cards.partition_point(|(_, t)| *t <= tier);
        &self.cards[start..end]
    }
}

/// One level's vocabulary cards. Kana-only words carry no tier because
/// their ranks derive from kanji they do not have.
pub struct VocabBucket {
    pub level: WordLevel,
    pub cards: Vec<(VocabEntry, Option<u8>)>,
}

impl VocabBucket {
    /// One tier's cards; empty for untiered buckets.
    pub fn tier_slice(&self, tier: u8) -> &[(VocabEntry, Option<u8>)] {
        let start = self.cards.partition_point(|(_, t)| t.is_some_and(|t| t < tier));
        let end = self.cards.partition_point(|(_, t)| t.is_some_and(|t| t <= tier));
        &self.cards[start..end]
    }
}

/// Groups kanji into the five JLPT levels and tiers each level by
/// frequency. Returns one bucket per level, N5 first, plus the count of
/// kanji that carried no JLPT level at all.
pub fn bucket_kanji(entries: Vec<KanjiEntry>, strategy: TierStrategy) -> (Vec<KanjiBucket>, u32) {
    let mut groups: [Vec<KanjiEntry>; 5] = std::array::from_fn(|_| Vec::new());
    let mut unclassified = 0u32;

    for entry in entries {
        match classify_kanji(&entry) {
            Some(level) => groups[(level.difficulty() - 1) as usize].push(entry),
            None => unclassified += 1,
        }
    }

    let buckets = JlptLevel::ALL
        .into_iter()
        .zip(groups)
        .map(|(level, group)| {
            let cards = partition_tiers(group, |entry| entry.frequency_rank, strategy)
                .into_iter()
                .enumerate()
                .flat_map(|(index, tier)| {
                    tier.into_iter().map(move |entry| (entry, index as u8 + 1))
                })
                .collect();
            KanjiBucket { level, cards }
        })
        .collect();

    (buckets, unclassified)
}

/// Groups words into the seven word levels and tiers each level by the
/// ranks `assign_word_ranks` derived. Buckets come back in fixed order:
/// N5 through N1, then kana-only, then non-JLPT.
pub fn bucket_vocab(
    words: Vec<VocabEntry>,
    table: &LevelTable,
    strategy: TierStrategy,
) -> Vec<VocabBucket> {
    let mut groups: [Vec<VocabEntry>; 7] = std::array::from_fn(|_| Vec::new());

    for word in words {
        let level = classify_word(&word, table);
        groups[word_level_index(level)].push(word);
    }

    WordLevel::ALL
        .into_iter()
        .zip(groups)
        .map(|(level, group)| {
            let cards = if level == WordLevel::KanaOnly {
                group.into_iter().map(|word| (word, None)).collect()
            } else {
                partition_tiers(group, |word| word.frequency_rank, strategy)
                    .into_iter()
                    .enumerate()
                    .flat_map(|(index, tier)| {
                        tier.into_iter().map(move |word| (word, Some(index as u8 + 1)))
                    })
                    .collect()
            };
            VocabBucket { level, cards }
        })
        .collect()
}

fn word_level_index(level: WordLevel) -> usize {
    match level {
        WordLevel::Jlpt(level) => (level.difficulty() - 1) as usize,
        WordLevel::KanaOnly => 5,
        WordLevel::NonJlpt => 6,
    }
}

/// First words whose primary spelling uses the given kanji, scan order.
pub fn find_example_words<'a>(
    character: char,
    words: &'a [VocabEntry],
    max: usize,
) -> Vec<&'a VocabEntry> {
    words
        .iter()
        .filter(|word| word.constituent_kanji.contains(&character))
        .take(max)
        .collect()
}
