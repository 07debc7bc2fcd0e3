use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use classical_cryptanalysis::{
    extract_inserted, text::clean_text, vigenere, AnalysisConfig, CryptanalysisError,
    KeyLengthMethod, Result, ShiftMethod, TextSource, VigenereKey,
};

/// Command-line arguments for the Vigenère cracker program.
#[derive(Parser, Debug)]
#[command(about = "Recovers the key and plaintext of a Vigenère ciphertext")]
struct Cli {
    /// Path to the input file containing encrypted text
    #[arg(
        short,
        long,
        help = "Path to the input file containing encrypted text",
        conflicts_with = "text",
        required_unless_present = "text"
    )]
    file: Option<PathBuf>,

    /// Encrypted text given directly
    #[arg(short, long, help = "Encrypted text given on the command line")]
    text: Option<String>,

    /// Path to the output file where decrypted text will be saved
    #[arg(short, long, help = "Path to the output file for decrypted text")]
    output: Option<PathBuf>,

    /// Reference plaintext for locating an inserted string
    #[arg(short, long, help = "Reference plaintext used to extract the inserted string")]
    reference: Option<PathBuf>,

    /// Known key; skips key recovery
    #[arg(short, long, help = "Decrypt with this key instead of recovering one")]
    key: Option<String>,

    /// Key length estimation strategy
    #[arg(short, long, help = "Key length estimation strategy")]
    strategy: Option<Strategy>,

    /// Per-column shift recovery method
    #[arg(long, help = "Per-column shift recovery method")]
    shift_method: Option<ShiftMode>,

    /// Forces a key length instead of estimating it
    #[arg(short = 'l', long, help = "Use this key length instead of estimating it")]
    key_length: Option<usize>,

    /// Prints every scored key length candidate
    #[arg(long, help = "Print all scored key length candidates")]
    candidates: bool,

    /// Path to a TOML analysis configuration
    #[arg(short, long, help = "Path to a TOML analysis configuration")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Key length estimation strategies selectable on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Strategy {
    /// Highest average index of coincidence
    Ic,
    /// Autocorrelation by shift
    Kasiski,
    /// Average index of coincidence closest to English
    EnglishIc,
}

impl From<Strategy> for KeyLengthMethod {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Ic => KeyLengthMethod::Ic,
            Strategy::Kasiski => KeyLengthMethod::Kasiski,
            Strategy::EnglishIc => KeyLengthMethod::EnglishIc,
        }
    }
}

/// Shift recovery methods selectable on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum ShiftMode {
    /// Minimal chi-squared against English frequencies
    ChiSquared,
    /// Most frequent letter taken for 'E'
    MostFrequent,
}

impl From<ShiftMode> for ShiftMethod {
    fn from(mode: ShiftMode) -> Self {
        match mode {
            ShiftMode::ChiSquared => ShiftMethod::ChiSquared,
            ShiftMode::MostFrequent => ShiftMethod::MostFrequent,
        }
    }
}

fn main() {
    let cli: Cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(error) = run(&cli) {
        tracing::error!("{}", error);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn source(cli: &Cli) -> TextSource {
    match (&cli.file, &cli.text) {
        (Some(path), _) => TextSource::File(path.clone()),
        (None, Some(text)) => TextSource::Literal(text.clone()),
        (None, None) => TextSource::Literal(String::new()),
    }
}

/// Applies command-line overrides on top of the configuration file.
fn load_config(cli: &Cli) -> Result<AnalysisConfig> {
    let mut config = match &cli.config {
        Some(path) => AnalysisConfig::load(path)?,
        None => AnalysisConfig::default(),
    };

    if let Some(strategy) = cli.strategy {
        config.vigenere.key_length_strategy = strategy.into();
    }
    if let Some(mode) = cli.shift_method {
        config.vigenere.shift_method = mode.into();
    }

    Ok(config)
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let input = source(cli).read_text()?;

    let letters = clean_text(&input).len();
    if letters < 50 {
        tracing::warn!("Text has only {} letters; analysis may be unreliable", letters);
    }

    let key = match &cli.key {
        Some(key) => VigenereKey::parse(key)?,
        None => recover(cli, &config, &input)?,
    };

    // Step 3: Decrypt the original text
    let decrypted = vigenere::decrypt(&input, &key);

    println!("Key: {}", key);

    match &cli.output {
        Some(path) => {
            std::fs::write(path, &decrypted).map_err(|source| {
                CryptanalysisError::OutputUnavailable {
                    target: path.display().to_string(),
                    source,
                }
            })?;
            tracing::info!("Decrypted text written to {}", path.display());
        }
        None => println!("{}", decrypted),
    }

    if let Some(reference) = &cli.reference {
        let reference = TextSource::File(reference.clone()).read_text()?;
        println!("Random string: {}", extract_inserted(&decrypted, &reference));
    }

    Ok(())
}

/// Rejects a forced key length that no column split of `input` can use.
fn check_key_length(key_length: usize, input: &str) -> Result<usize> {
    let letters = clean_text(input).len();
    if key_length == 0 || key_length > letters {
        return Err(CryptanalysisError::InvalidConfig(format!(
            "key length must lie in 1..={} for this text, got {}",
            letters, key_length
        )));
    }
    Ok(key_length)
}

fn recover(cli: &Cli, config: &AnalysisConfig, input: &str) -> Result<VigenereKey> {
    let estimator = config.key_length_estimator();

    if cli.candidates {
        for candidate in estimator.ranked(input) {
            println!("{:>3} : {:.4}", candidate.length, candidate.score);
        }
    }

    // Step 1: Find key length
    let key_length = match cli.key_length {
        Some(forced) => check_key_length(forced, input)?,
        None => estimator.estimate(input),
    };
    println!("Found key length: {}", key_length);
    tracing::info!(strategy = estimator.name(), key_length, "key length chosen");

    // Step 2: Reconstruct the key column by column
    let solver = config.shift_solver();
    Ok(vigenere::recover_key(input, key_length, solver.as_ref()))
}
