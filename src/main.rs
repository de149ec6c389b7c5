use std::path::PathBuf;

use clap::{ Parser, Subcommand };

use fudagen::{
    core::pipeline::{
        run_kanji_decks,
        run_tiered_decks,
        run_vocab_decks,
        KanjiDeckOptions,
        TieredDeckOptions,
        VocabDeckOptions,
    },
    tiering::TierStrategy,
};

#[derive(Parser)]
#[command(
    name = "fudagen",
    version,
    about = "Generate JLPT-leveled Anki decks from kanjidic2 and JMdict exports"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// One kanji deck per JLPT level, with optional example words
    Kanji(KanjiArgs),
    /// One vocabulary deck per JLPT level, plus kana-only and non-JLPT decks
    Vocab(VocabArgs),
    /// A level/tier directory tree holding kanji and vocabulary decks
    Tiered(TieredArgs),
}

#[derive(Parser)]
struct KanjiArgs {
    /// Path to the kanjidic2 JSON export (plain or zipped)
    #[arg(short = 'i', long = "input", default_value = "kanjidic2-en-3.6.2.json")]
    kanjidic: PathBuf,

    /// JMdict JSON export used to attach example words to each kanji
    #[arg(long)]
    jmdict: Option<PathBuf>,

    /// Example words per kanji
    #[arg(long, default_value_t = 3)]
    max_examples: usize,

    /// Output directory
    #[arg(short = 'o', long = "output-dir", default_value = "anki_decks")]
    output_dir: PathBuf,

    /// How tier cuts are placed within each level
    #[arg(long, value_enum, default_value_t = TierStrategy::Conservative)]
    tier_strategy: TierStrategy,

    /// Re-parse the source JSON even when a cache file exists
    #[arg(long)]
    no_cache: bool,
}

#[derive(Parser)]
struct VocabArgs {
    /// Include Tatoeba example sentences (reads the examples JMdict export)
    #[arg(short = 'e', long)]
    examples: bool,

    /// JMdict JSON export without examples
    #[arg(long, default_value = "jmdict-eng-3.6.2.json")]
    jmdict: PathBuf,

    /// JMdict JSON export with examples
    #[arg(long, default_value = "jmdict-examples-eng-3.6.2.json")]
    jmdict_examples: PathBuf,

    /// Path to the kanjidic2 JSON export
    #[arg(long, default_value = "kanjidic2-en-3.6.2.json")]
    kanjidic: PathBuf,

    /// Output directory (default: anki_vocab_jlpt/ or anki_vocab_jlpt_examples/)
    #[arg(short = 'o', long = "output-dir")]
    output_dir: Option<PathBuf>,

    /// Keep only words flagged common in JMdict
    #[arg(long)]
    common_only: bool,

    /// How tier cuts are placed within each level
    #[arg(long, value_enum, default_value_t = TierStrategy::Conservative)]
    tier_strategy: TierStrategy,

    /// Re-parse the source JSON even when a cache file exists
    #[arg(long)]
    no_cache: bool,
}

#[derive(Parser)]
struct TieredArgs {
    /// Skip example sentences (reads the plain JMdict export instead)
    #[arg(long)]
    no_examples: bool,

    /// JMdict JSON export without examples
    #[arg(long, default_value = "jmdict-eng-3.6.2.json")]
    jmdict: PathBuf,

    /// JMdict JSON export with examples
    #[arg(long, default_value = "jmdict-examples-eng-3.6.2.json")]
    jmdict_examples: PathBuf,

    /// Path to the kanjidic2 JSON export
    #[arg(long, default_value = "kanjidic2-en-3.6.2.json")]
    kanjidic: PathBuf,

    /// Output directory
    #[arg(short = 'o', long = "output-dir", default_value = "tiered_decks")]
    output_dir: PathBuf,

    /// Keep only words flagged common in JMdict
    #[arg(long)]
    common_only: bool,

    /// How tier cuts are placed within each level
    #[arg(long, value_enum, default_value_t = TierStrategy::Conservative)]
    tier_strategy: TierStrategy,

    /// Re-parse the source JSON even when a cache file exists
    #[arg(long)]
    no_cache: bool,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Kanji(args) => run_kanji_decks(&KanjiDeckOptions {
            kanjidic: args.kanjidic,
            jmdict: args.jmdict,
            max_examples: args.max_examples,
            output_dir: args.output_dir,
            tier_strategy: args.tier_strategy,
            use_cache: !args.no_cache,
        }),
        Commands::Vocab(args) => run_vocab_decks(&VocabDeckOptions {
            jmdict: args.jmdict,
            jmdict_examples: args.jmdict_examples,
            kanjidic: args.kanjidic,
            output_dir: args.output_dir,
            include_examples: args.examples,
            common_only: args.common_only,
            tier_strategy: args.tier_strategy,
            use_cache: !args.no_cache,
        }),
        Commands::Tiered(args) => run_tiered_decks(&TieredDeckOptions {
            jmdict: args.jmdict,
            jmdict_examples: args.jmdict_examples,
            kanjidic: args.kanjidic,
            output_dir: args.output_dir,
            include_examples: !args.no_examples,
            common_only: args.common_only,
            tier_strategy: args.tier_strategy,
            use_cache: !args.no_cache,
        }),
    };

    if let Err(error) = result {
        eprintln!("Error: {}", error);
        std::process::exit(1);
    }
}
