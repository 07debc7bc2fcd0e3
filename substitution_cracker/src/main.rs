use std::collections::BTreeSet;
use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use classical_cryptanalysis::{
    extract_inserted, refine_mapping, substitution, AnalysisConfig, CasePolicy,
    CryptanalysisError, Result, SubstitutionMapping, TextSource,
};

/// Command-line arguments for the substitution cracker program.
#[derive(Parser, Debug)]
#[command(about = "Recovers plaintext from a monoalphabetic substitution cipher")]
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

    /// Known plaintext aligned against the ciphertext to fill in the mapping
    #[arg(short, long, help = "Known plaintext used to refine the frequency mapping")]
    known_plaintext: Option<PathBuf>,

    /// Letter case handling
    #[arg(long, help = "Treat upper and lower case as one symbol or two")]
    case: Option<CaseMode>,

    /// Prints the letter frequency table
    #[arg(long, help = "Print the observed letter frequencies")]
    frequencies: bool,

    /// Path to a TOML analysis configuration
    #[arg(short, long, help = "Path to a TOML analysis configuration")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Enum representing the letter case policy.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum CaseMode {
    /// Fold case before counting
    Normalized,
    /// Count upper and lower case separately
    Sensitive,
}

impl From<CaseMode> for CasePolicy {
    fn from(mode: CaseMode) -> Self {
        match mode {
            CaseMode::Normalized => CasePolicy::Normalized,
            CaseMode::Sensitive => CasePolicy::Sensitive,
        }
    }
}

/// Main entry point for the substitution cracker.
fn main() {
    // Parse command-line arguments
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

/// Applies command-line overrides on top of the configuration file.
fn load_config(cli: &Cli) -> Result<AnalysisConfig> {
    let mut config = match &cli.config {
        Some(path) => AnalysisConfig::load(path)?,
        None => AnalysisConfig::default(),
    };

    if let Some(mode) = cli.case {
        config.substitution.case_policy = mode.into();
    }

    Ok(config)
}

fn source(cli: &Cli) -> TextSource {
    match (&cli.file, &cli.text) {
        (Some(path), _) => TextSource::File(path.clone()),
        (None, Some(text)) => TextSource::Literal(text.clone()),
        (None, None) => TextSource::Literal(String::new()),
    }
}

/// Derives the mapping for the ciphertext.
///
/// # Returns
///
/// The frequency mapping, extended from the known plaintext when one is given.
fn derive_mapping(
    cli: &Cli,
    config: &AnalysisConfig,
    ciphertext: &str,
) -> Result<SubstitutionMapping> {
    let analyzer = config.frequency_analyzer();

    if cli.frequencies {
        let table = analyzer.frequencies(ciphertext);
        for symbol in table.rank() {
            println!("{} : {}", symbol, table.count(symbol));
        }
    }

    // Frequency analysis only binds letters seen in the ciphertext
    let mapping = analyzer.analyze(ciphertext);
    if mapping.is_empty() {
        tracing::warn!("Ciphertext contains no letters; nothing to map");
    }

    match &cli.known_plaintext {
        Some(path) => {
            let known = TextSource::File(path.clone()).read_text()?;
            // known pairs take precedence over rank guesses
            let seed = SubstitutionMapping::new(mapping.policy());
            let aligned = refine_mapping(&seed, &known, ciphertext);
            let mut pairs: Vec<(char, char)> = aligned.iter().collect();
            let taken: BTreeSet<char> = pairs.iter().map(|&(_, plain)| plain).collect();
            // a guess whose plaintext letter is already claimed would merge two letters
            pairs.extend(
                mapping
                    .iter()
                    .filter(|&(c, p)| aligned.get(c).is_none() && !taken.contains(&p)),
            );
            SubstitutionMapping::from_pairs(mapping.policy(), pairs)
        }
        None => Ok(mapping),
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let content = source(cli).read_text()?;

    let mapping = derive_mapping(cli, &config, &content)?;
    println!("{}", mapping);
    tracing::info!(letters = mapping.len(), bijective = mapping.is_bijective(), "mapping derived");

    // Decrypt the content using the derived mapping
    let decrypted = substitution::decrypt(&content, &mapping);

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
