//! The three deck generation workflows: flat kanji decks, flat vocabulary
//! decks, and the per-level tier directory tree. Each one loads the
//! dictionary sources, classifies and tiers the entries, writes the CSV
//! files and prints a run summary.

use std::{
    fs,
    path::{ Path, PathBuf },
    time::Instant,
};

use crate::{
    classify::LevelTable,
    core::errors::FudagenError,
    deck::{
        bucket_kanji,
        bucket_vocab,
        find_example_words,
        writer::{ self, DeckManifest, ExampleWordMap },
    },
    dictionary::{ jmdict, kanjidic },
    tiering::{ assign_word_ranks, TierStrategy, TIER_COUNT },
};

pub struct KanjiDeckOptions {
    pub kanjidic: PathBuf,
    pub jmdict: Option<PathBuf>,
    pub max_examples: usize,
    pub output_dir: PathBuf,
    pub tier_strategy: TierStrategy,
    pub use_cache: bool,
}

pub struct VocabDeckOptions {
    pub jmdict: PathBuf,
    pub jmdict_examples: PathBuf,
    pub kanjidic: PathBuf,
    /// Defaults to `anki_vocab_jlpt` or `anki_vocab_jlpt_examples`.
    pub output_dir: Option<PathBuf>,
    pub include_examples: bool,
    pub common_only: bool,
    pub tier_strategy: TierStrategy,
    pub use_cache: bool,
}

pub struct TieredDeckOptions {
    pub jmdict: PathBuf,
    pub jmdict_examples: PathBuf,
    pub kanjidic: PathBuf,
    pub output_dir: PathBuf,
    pub include_examples: bool,
    pub common_only: bool,
    pub tier_strategy: TierStrategy,
    pub use_cache: bool,
}

/// Per-level kanji decks, one CSV per JLPT level.
pub fn run_kanji_decks(options: &KanjiDeckOptions) -> Result<(), FudagenError> {
    require_source(&options.kanjidic)?;
    let start = Instant::now();

    println!("Loading kanjidic2 data...");
    let kanji = kanjidic::load_kanji(&options.kanjidic, options.use_cache)?;
    let parse_skipped = kanji.skipped;

    println!("Processing characters...");
    let (buckets, unclassified) = bucket_kanji(kanji.entries, options.tier_strategy);
    let total: usize = buckets.iter().map(|bucket| bucket.cards.len()).sum();
    println!("Processed {} kanji with JLPT levels", total);
    let skipped = unclassified + parse_skipped;
    if skipped > 0 {
        println!("Skipped {} entries (no JLPT level or invalid data)", skipped);
    }

    let vocab = match &options.jmdict {
        Some(path) if path.exists() => {
            println!(
                "\nLoading JMdict for word examples (up to {} per kanji)...",
                options.max_examples
            );
            Some(jmdict::load_vocab(path, options.use_cache)?)
        }
        Some(path) => {
            eprintln!("Warning: JMdict file not found: {}", path.display());
            eprintln!("Continuing without word examples...");
            None
        }
        None => None,
    };

    let example_words = vocab.as_ref().map(|source| {
        println!("Finding example words for each kanji...");
        let mut map = ExampleWordMap::new();
        for bucket in &buckets {
            for (entry, _) in &bucket.cards {
                let words =
                    find_example_words(entry.character, &source.entries, options.max_examples);
                map.insert(entry.character, words);
            }
        }
        println!("Found examples for {} kanji", map.len());
        map
    });

    fs::create_dir_all(&options.output_dir)?;
    println!("\nGenerating CSV files in {}...", options.output_dir.display());

    let mut manifest = DeckManifest::new(options.tier_strategy, false, example_words.is_some());
    manifest.skipped = skipped;
    for bucket in &buckets {
        if bucket.cards.is_empty() {
            continue;
        }
        let name = format!("jlpt_{}_kanji.csv", bucket.level.as_str());
        let path = options.output_dir.join(&name);
        writer::write_kanji_csv(
            &path,
            &bucket.cards,
            bucket.level.as_str(),
            true,
            example_words.as_ref(),
        )?;
        println!("Created: {} ({} cards)", path.display(), bucket.cards.len());
        manifest.record(name, bucket.cards.len());
    }
    writer::write_manifest(&options.output_dir, &manifest)?;

    let line = "=".repeat(60);
    println!("\n{}", line);
    println!("DECK SUMMARY");
    println!("{}", line);
    for bucket in &buckets {
        println!("  {}: {} kanji", bucket.level.as_str(), bucket.cards.len());
    }
    println!("\nTotal: {} kanji", total);
    println!("\nFiles saved to: {}", absolute(&options.output_dir).display());

    print_kanji_import_instructions();
    println!("\nDeck generation completed ({:.1}s)", start.elapsed().as_secs_f32());
    Ok(())
}

/// Per-level vocabulary decks, one CSV per word level including the
/// kana-only and non-JLPT buckets.
pub fn run_vocab_decks(options: &VocabDeckOptions) -> Result<(), FudagenError> {
    let source = vocab_source(options.include_examples, &options.jmdict, &options.jmdict_examples);
    require_source(source)?;
    require_source(&options.kanjidic)?;
    let start = Instant::now();

    let output_dir = options.output_dir.clone().unwrap_or_else(|| {
        if options.include_examples {
            PathBuf::from("anki_vocab_jlpt_examples")
        } else {
            PathBuf::from("anki_vocab_jlpt")
        }
    });

    println!("Loading Kanjidic2 (kanji JLPT and frequency data)...");
    let kanji = kanjidic::load_kanji(&options.kanjidic, options.use_cache)?;
    let table = LevelTable::build(&kanji.entries);
    println!("Loaded {} kanji with JLPT levels", table.classified_count());
    let kanji_ranks = kanji.rank_map();

    println!(
        "\nLoading JMdict ({})...",
        if options.include_examples { "with examples" } else { "without examples" }
    );
    let vocab = jmdict::load_vocab(source, options.use_cache)?;
    let parse_skipped = vocab.skipped;
    let mut words = vocab.entries;
    if options.common_only {
        let before = words.len();
        words.retain(|word| word.is_common);
        println!("Skipped (not common): {} words", before - words.len());
    }

    println!("\nCategorizing words by JLPT level...");
    assign_word_ranks(&mut words, &kanji_ranks);
    let buckets = bucket_vocab(words, &table, options.tier_strategy);
    let processed: usize = buckets.iter().map(|bucket| bucket.cards.len()).sum();
    println!("Processed: {} words", processed);

    fs::create_dir_all(&output_dir)?;
    println!("\nGenerating CSV files in {}...", output_dir.display());

    let suffix = if options.include_examples { "_examples" } else { "" };
    let mut manifest =
        DeckManifest::new(options.tier_strategy, options.common_only, options.include_examples);
    manifest.skipped = parse_skipped;
    for bucket in &buckets {
        if bucket.cards.is_empty() {
            continue;
        }
        let name = format!("jlpt_{}_vocab{}.csv", bucket.level.file_slug(), suffix);
        let path = output_dir.join(&name);
        writer::write_vocab_csv(
            &path,
            &bucket.cards,
            bucket.level.label(),
            true,
            options.include_examples,
        )?;
        println!("Created: {} ({} cards)", path.display(), bucket.cards.len());
        manifest.record(name, bucket.cards.len());
    }
    writer::write_manifest(&output_dir, &manifest)?;

    let line = "=".repeat(60);
    println!("\n{}", line);
    println!("VOCABULARY DECKS BY JLPT LEVEL");
    println!("{}", line);
    for bucket in &buckets[..5] {
        println!("  {}: {} words", bucket.level.label(), bucket.cards.len());
    }
    println!("\n  Kana-only: {} words", buckets[5].cards.len());
    println!("  Non-JLPT kanji: {} words", buckets[6].cards.len());
    let jlpt_total: usize = buckets[..5].iter().map(|bucket| bucket.cards.len()).sum();
    println!("\nTotal JLPT words: {}", jlpt_total);
    println!("Files saved to: {}", absolute(&output_dir).display());

    print_tier_information(options.tier_strategy);
    print_vocab_import_instructions();
    if options.include_examples {
        println!("\nExamples are from Tatoeba corpus (Japanese/English pairs)");
    }
    println!("\nDeck generation completed ({:.1}s)", start.elapsed().as_secs_f32());
    Ok(())
}

/// The `level/Tier_N/` directory tree with kanji and vocabulary CSVs per
/// tier, plus untiered kana-only and non-JLPT decks.
pub fn run_tiered_decks(options: &TieredDeckOptions) -> Result<(), FudagenError> {
    let source = vocab_source(options.include_examples, &options.jmdict, &options.jmdict_examples);
    require_source(source)?;
    require_source(&options.kanjidic)?;
    let start = Instant::now();

    println!("Loading Kanjidic2 (kanji JLPT and frequency data)...");
    let kanji = kanjidic::load_kanji(&options.kanjidic, options.use_cache)?;
    let table = LevelTable::build(&kanji.entries);
    println!("Loaded {} kanji with JLPT levels", table.classified_count());
    let kanji_ranks = kanji.rank_map();

    let kanji_parse_skipped = kanji.skipped;
    println!("\nProcessing kanji...");
    let (kanji_buckets, unclassified) = bucket_kanji(kanji.entries, options.tier_strategy);
    let kanji_total: usize = kanji_buckets.iter().map(|bucket| bucket.cards.len()).sum();
    println!("Processed {} kanji with JLPT levels and frequency data", kanji_total);

    println!(
        "\nLoading JMdict ({})...",
        if options.include_examples { "with examples" } else { "without examples" }
    );
    let vocab = jmdict::load_vocab(source, options.use_cache)?;
    let vocab_parse_skipped = vocab.skipped;
    let mut words = vocab.entries;
    if options.common_only {
        let before = words.len();
        words.retain(|word| word.is_common);
        println!("Skipped (not common): {} words", before - words.len());
    }

    println!("\nProcessing vocabulary...");
    assign_word_ranks(&mut words, &kanji_ranks);
    let vocab_buckets = bucket_vocab(words, &table, options.tier_strategy);
    let vocab_total: usize = vocab_buckets.iter().map(|bucket| bucket.cards.len()).sum();
    println!("Processed {} words", vocab_total);

    println!("\nCreating tiered deck structure in {}...", options.output_dir.display());
    fs::create_dir_all(&options.output_dir)?;

    let mut manifest =
        DeckManifest::new(options.tier_strategy, options.common_only, options.include_examples);
    manifest.skipped = kanji_parse_skipped + unclassified + vocab_parse_skipped;

    for (kanji_bucket, vocab_bucket) in kanji_buckets.iter().zip(&vocab_buckets[..5]) {
        let level = kanji_bucket.level.as_str();
        let level_dir = options.output_dir.join(level);
        fs::create_dir_all(&level_dir)?;
        println!("\n{}:", level);

        for tier in 1..=TIER_COUNT as u8 {
            let tier_dir = level_dir.join(format!("Tier_{}", tier));
            fs::create_dir_all(&tier_dir)?;

            let tier_kanji = kanji_bucket.tier_slice(tier);
            let tier_vocab = vocab_bucket.tier_slice(tier);
            println!("  Tier {}: {} kanji, {} words", tier, tier_kanji.len(), tier_vocab.len());

            if !tier_kanji.is_empty() {
                let path = tier_dir.join("kanji.csv");
                writer::write_kanji_csv(&path, tier_kanji, level, false, None)?;
                println!("    Created: {} ({} kanji)", path.display(), tier_kanji.len());
                manifest.record(format!("{}/Tier_{}/kanji.csv", level, tier), tier_kanji.len());
            }
            if !tier_vocab.is_empty() {
                let path = tier_dir.join("vocab.csv");
                writer::write_vocab_csv(&path, tier_vocab, level, false, options.include_examples)?;
                println!("    Created: {} ({} words)", path.display(), tier_vocab.len());
                manifest.record(format!("{}/Tier_{}/vocab.csv", level, tier), tier_vocab.len());
            }
        }
    }

    // Words without a tierable level go into flat per-bucket decks.
    for bucket in &vocab_buckets[5..] {
        if bucket.cards.is_empty() {
            continue;
        }
        let slug = bucket.level.file_slug();
        let bucket_dir = options.output_dir.join(slug);
        fs::create_dir_all(&bucket_dir)?;
        println!("\n{}:", slug);

        let path = bucket_dir.join("vocab.csv");
        writer::write_vocab_csv(
            &path,
            &bucket.cards,
            bucket.level.label(),
            false,
            options.include_examples,
        )?;
        println!("    Created: {} ({} words)", path.display(), bucket.cards.len());
        manifest.record(format!("{}/vocab.csv", slug), bucket.cards.len());
    }

    writer::write_manifest(&options.output_dir, &manifest)?;

    let line = "=".repeat(60);
    println!("\n{}", line);
    println!("TIERED DECKS SUMMARY");
    println!("{}", line);
    println!("Total kanji: {}", kanji_total);
    println!("Total vocabulary: {}", vocab_total);
    println!("\nDirectory structure:");
    println!("  {}/", options.output_dir.display());
    for (kanji_bucket, vocab_bucket) in kanji_buckets.iter().zip(&vocab_buckets[..5]) {
        println!("    {}/", kanji_bucket.level.as_str());
        for tier in 1..=TIER_COUNT as u8 {
            let kanji_count = kanji_bucket.tier_slice(tier).len();
            let vocab_count = vocab_bucket.tier_slice(tier).len();
            if kanji_count > 0 || vocab_count > 0 {
                println!("      Tier_{}/ ({} kanji, {} words)", tier, kanji_count, vocab_count);
            }
        }
    }
    println!("\nFiles saved to: {}", absolute(&options.output_dir).display());

    print_tier_information(options.tier_strategy);
    print_tiered_import_instructions();
    if options.include_examples {
        println!("\nExamples are from Tatoeba corpus (Japanese/English pairs)");
    }
    println!("\nDeck generation completed ({:.1}s)", start.elapsed().as_secs_f32());
    Ok(())
}

fn vocab_source<'a>(
    include_examples: bool,
    jmdict: &'a Path,
    jmdict_examples: &'a Path,
) -> &'a Path {
    if include_examples { jmdict_examples } else { jmdict }
}

fn require_source(path: &Path) -> Result<(), FudagenError> {
    if path.exists() {
        Ok(())
    } else {
        Err(FudagenError::MissingSource(path.display().to_string()))
    }
}

fn absolute(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

fn print_tier_information(strategy: TierStrategy) {
    let line = "=".repeat(60);
    println!("\n{}", line);
    println!("FREQUENCY TIER INFORMATION");
    println!("{}", line);
    println!("Tier strategy: {}", strategy.as_str());
    println!("Tier 1: Top 25% most frequent kanji");
    println!("Tier 2: 25-50%");
    println!("Tier 3: 50-75%");
    println!("Tier 4: Bottom 25% least frequent");
    println!("\nWords are tagged with 'freq_tierN' where N is 1-4");
}

fn print_kanji_import_instructions() {
    let line = "=".repeat(60);
    println!("\n{}", line);
    println!("IMPORT INSTRUCTIONS");
    println!("{}", line);
    println!("1. Open Anki");
    println!("2. File → Import");
    println!("3. Select CSV file");
    println!("4. Set card type to 'Basic'");
    println!("5. Field mapping:");
    println!("   - Column 1 (kanji) → Front");
    println!("   - Column 2 (back) → Back");
    println!("   - Column 3 (tags) → Tags");
    println!("6. Allow HTML in fields (checked)");
}

fn print_vocab_import_instructions() {
    let line = "=".repeat(60);
    println!("\n{}", line);
    println!("IMPORT INSTRUCTIONS");
    println!("{}", line);
    println!("1. Open Anki → File → Import");
    println!("2. Select CSV file (e.g., jlpt_N5_vocab.csv)");
    println!("3. Type: Basic");
    println!("4. Field mapping:");
    println!("   - Column 1 (word) → Front");
    println!("   - Column 2 (back) → Back");
    println!("   - Column 3 (tags) → Tags");
    println!("5. Allow HTML in fields");
    println!("\nNote: A word is assigned to the HIGHEST (most difficult)");
    println!("JLPT level of any kanji it contains.");
}

fn print_tiered_import_instructions() {
    let line = "=".repeat(60);
    println!("\n{}", line);
    println!("IMPORT INSTRUCTIONS");
    println!("{}", line);
    println!("1. Open Anki → File → Import");
    println!("2. Navigate to the desired Tier folder");
    println!("3. Select kanji.csv or vocab.csv");
    println!("4. Type: Basic");
    println!("5. Field mapping:");
    println!("   - Column 1 (kanji/word) → Front");
    println!("   - Column 2 (back) → Back");
    println!("   - Column 3 (tags) → Tags");
    println!("6. Allow HTML in fields");
}
