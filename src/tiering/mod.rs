//! Frequency tier partitioning.
//!
//! One level's entries are cut into four tiers, tier 1 holding the most
//! common quarter and tier 4 the least common. The cut placement is
//! strategy-dependent; every strategy yields tiers that partition the input
//! exactly.

use std::collections::HashMap;

use clap::ValueEnum;

use crate::core::models::VocabEntry;


pub const TIER_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TierStrategy {
    /// Tiers 1-3 each get exactly floor(N/4), tier 4 absorbs the remainder.
    #[default]
    Conservative,
    /// Even split, with earlier tiers taking one extra entry each until the
    /// remainder runs out.
    Average,
    /// Same cuts as `average`, but rank ties never straddle a boundary: the
    /// whole tie run stays in the earlier tier, even past its quota.
    First,
}

impl TierStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            TierStrategy::Conservative => "conservative",
            TierStrategy::Average => "average",
            TierStrategy::First => "first",
        }
    }
}

/// Splits one level's entries into four frequency tiers, most common first.
///
/// Entries are ordered by rank ascending before cutting. Entries without a
/// rank sort after every ranked entry and keep their insertion order among
/// themselves.
pub fn partition_tiers<T, F>(
    entries: Vec<T>,
    rank: F,
    strategy: TierStrategy,
) -> [Vec<T>; TIER_COUNT]
where
    F: Fn(&T) -> Option<u32>,
{
    let mut entries = entries;
    entries.sort_by_key(|entry| match rank(entry) {
        Some(r) => (0u8, r),
        None => (1u8, 0),
    });

    let cuts = cut_points(&entries, &rank, strategy);

    let mut tiers: [Vec<T>; TIER_COUNT] = [Vec::new(), Vec::new(), Vec::new(), Vec::new()];
    for (index, entry) in entries.into_iter().enumerate() {
        let tier = cuts.iter().take_while(|&&cut| index >= cut).count();
        tiers[tier].push(entry);
    }

    tiers
}

/// Indices of the first entry of tiers 2, 3 and 4, ascending.
fn cut_points<T, F>(entries: &[T], rank: &F, strategy: TierStrategy) -> [usize; TIER_COUNT - 1]
where
    F: Fn(&T) -> Option<u32>,
{
    let n = entries.len();
    let sizes = match strategy {
        TierStrategy::Conservative => conservative_sizes(n),
        TierStrategy::Average | TierStrategy::First => average_sizes(n),
    };

    let mut cuts = [0usize; TIER_COUNT - 1];
    let mut total = 0;
    for i in 0..TIER_COUNT - 1 {
        total += sizes[i];
        cuts[i] = total;
    }

    if strategy == TierStrategy::First {
        // Walk each cut forward past any run of equal ranks. Unranked
        // entries never count as tied, so the unranked tail stays put.
        let mut floor = 0;
        for cut in cuts.iter_mut() {
            let mut c = (*cut).max(floor);
            while c > 0 && c < n {
                match (rank(&entries[c - 1]), rank(&entries[c])) {
                    (Some(previous), Some(next)) if previous == next => c += 1,
                    _ => break,
                }
            }
            *cut = c;
            floor = c;
        }
    }

    cuts
}

fn conservative_sizes(n: usize) -> [usize; TIER_COUNT] {
    let quarter = n / 4;
    [quarter, quarter, quarter, n - 3 * quarter]
}

fn average_sizes(n: usize) -> [usize; TIER_COUNT] {
    let base = n / 4;
    let remainder = n % 4;
    let mut sizes = [base; TIER_COUNT];
    for size in sizes.iter_mut().take(remainder) {
        *size += 1;
    }
    sizes
}

/// Derives each word's frequency rank from its constituent kanji. A word is
/// ranked only when every constituent kanji is ranked, and the worst rank
/// wins: a word is only as frequent as its rarest kanji.
pub fn assign_word_ranks(words: &mut [VocabEntry], kanji_ranks: &HashMap<char, u32>) {
    for word in words.iter_mut() {
        word.frequency_rank = word.constituent_kanji
            .iter()
            .map(|kanji| kanji_ranks.get(kanji).copied())
            .collect::<Option<Vec<u32>>>()
            .and_then(|ranks| ranks.into_iter().max());
    }
}
