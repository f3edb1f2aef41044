// CLI module - command-line argument parsing and handlers
//
// Without a subcommand the dashboard starts. Each widget is also reachable
// headless:
// - totp / hash / encode / decode: one call to the computation service
// - qr / barcode: render locally, print the preview, optionally save SVG
// - count: word and character counts
// - links: search the scripmaster directory and resource library
// - config --show / --path / --reset

use crate::config::{Config, VERSION};
use crate::controller::{self, ActionSlot};
use crate::remote::{
    DecodeBase64, EncodeBase64, GenerateHash, GenerateTotp, HashAlgorithm, RemoteAction,
    ServiceClient,
};
use crate::render::{self, QrErrorCorrection, Symbol, Symbology};
use crate::tools::{search_brokers, ResourceLibrary, TextStats, ALL_CATEGORIES};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Trader utility toolkit
#[derive(Parser)]
#[command(name = "tradekit")]
#[command(version = VERSION)]
#[command(
    about = "Trader utility toolkit: one-time codes, hashing, Base64, QR codes and barcodes",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a one-time code from a shared secret
    Totp { secret: String },

    /// Hash text with the selected algorithm
    Hash {
        text: String,

        /// md5, sha1, sha256, sha512, sha3_256, sha3_512
        #[arg(short, long, default_value = "md5")]
        algorithm: HashAlgorithm,
    },

    /// Base64-encode text
    Encode { text: String },

    /// Base64-decode text
    Decode { text: String },

    /// Render a QR code
    Qr {
        content: String,

        /// Error correction level: L, M, Q, H
        #[arg(long)]
        ecc: Option<QrErrorCorrection>,

        /// SVG edge length in pixels
        #[arg(long)]
        size: Option<u32>,

        /// Save the SVG to this path
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Render a barcode
    Barcode {
        content: String,

        /// code128, ean13, ean8, upca
        #[arg(short, long)]
        symbology: Option<Symbology>,

        /// Save the SVG to this path
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Count words and characters (`-` reads stdin)
    Count { text: String },

    /// Search broker scripmaster links and resources
    Links {
        query: Option<String>,

        /// Only resources in this category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

impl Commands {
    /// Commands that must work even when the config file is broken
    pub fn skips_config(&self) -> bool {
        matches!(self, Commands::Config { reset: true, .. } | Commands::Config { path: true, .. })
    }
}

/// Run a subcommand to completion
pub async fn run(command: Commands, config: Config) -> Result<ExitCode> {
    match command {
        Commands::Totp { secret } => remote(&config, &GenerateTotp, &secret).await,
        Commands::Hash { text, algorithm } => {
            remote(&config, &GenerateHash::new(algorithm), &text).await
        }
        Commands::Encode { text } => remote(&config, &EncodeBase64, &text).await,
        Commands::Decode { text } => remote(&config, &DecodeBase64, &text).await,
        Commands::Qr {
            content,
            ecc,
            size,
            out,
        } => {
            let ecc = ecc.unwrap_or(config.qr.error_correction);
            let size = size.unwrap_or(config.qr.size);
            symbol(render::encode_qr(&content, ecc, size), out)
        }
        Commands::Barcode {
            content,
            symbology,
            out,
        } => {
            let symbology = symbology.unwrap_or(config.barcode.default_symbology);
            symbol(
                render::encode_barcode(&content, symbology, config.barcode.height),
                out,
            )
        }
        Commands::Count { text } => count(&text),
        Commands::Links { query, category } => {
            links(&config, query.as_deref().unwrap_or(""), category.as_deref());
            Ok(ExitCode::SUCCESS)
        }
        Commands::Config { show, reset, path } => {
            if path {
                handle_config_path()
            } else if reset {
                handle_config_reset()
            } else if show {
                handle_config_show(&config);
                Ok(ExitCode::SUCCESS)
            } else {
                println!("Usage: tradekit config [--show|--reset|--path]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --reset   Reset config file to defaults");
                println!("  --path    Show config file path");
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

/// Run `config --path` / `config --reset` without loading the config file
pub fn run_without_config(command: &Commands) -> Result<ExitCode> {
    match command {
        Commands::Config { path: true, .. } => handle_config_path(),
        Commands::Config { reset: true, .. } => handle_config_reset(),
        _ => Ok(ExitCode::SUCCESS),
    }
}

/// Result value, or the user-visible error
async fn remote_outcome<A: RemoteAction>(
    config: &Config,
    action: &A,
    input: &str,
) -> Result<Result<String, String>> {
    let client = ServiceClient::new(&config.service).context("Failed to build HTTP client")?;
    let mut slot = ActionSlot::new();
    controller::run_once(&client, &mut slot, action, input).await;

    Ok(match slot.result() {
        Some(value) => Ok(value.to_string()),
        None => Err(slot.error().unwrap_or(action.fallback_error()).to_string()),
    })
}

async fn remote<A: RemoteAction>(config: &Config, action: &A, input: &str) -> Result<ExitCode> {
    match remote_outcome(config, action, input).await? {
        Ok(value) => {
            println!("{}", value);
            Ok(ExitCode::SUCCESS)
        }
        Err(message) => {
            eprintln!("Error: {}", message);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn symbol(rendered: Result<Symbol, render::RenderError>, out: Option<PathBuf>) -> Result<ExitCode> {
    let symbol = match rendered {
        Ok(symbol) => symbol,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    let mut stdout = std::io::stdout().lock();
    for line in &symbol.lines {
        writeln!(stdout, "{}", line)?;
    }
    writeln!(stdout, "{}", symbol.caption)?;

    if let Some(path) = out {
        symbol.save_svg(&path)?;
        writeln!(stdout, "Saved {}", path.display())?;
    }
    Ok(ExitCode::SUCCESS)
}

fn count(text: &str) -> Result<ExitCode> {
    let text = if text == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        buf
    } else {
        text.to_string()
    };

    let stats = TextStats::of(&text);
    println!("Words: {}", stats.words);
    println!("Characters: {}", stats.characters);
    Ok(ExitCode::SUCCESS)
}

fn links(config: &Config, query: &str, category: Option<&str>) {
    let brokers = search_brokers(query);
    println!("# Scripmaster links");
    if brokers.is_empty() {
        println!("  (no brokers match)");
    }
    for broker in brokers {
        println!();
        println!("{} ({})", broker.name, broker.category);
        for link in broker.links {
            println!(
                "  {:<24} {:<4} updated {}  {}",
                link.title, link.format, link.last_updated, link.url
            );
        }
    }

    let library = ResourceLibrary::load_or_empty(config.resources.path.as_deref());
    if library.is_empty() {
        return;
    }

    println!();
    println!("# Resources");
    let resources = library.filter(query, category.unwrap_or(ALL_CATEGORIES));
    if resources.is_empty() {
        println!("  (no resources match)");
    }
    for resource in resources {
        println!();
        println!("{}  [{}]", resource.title, resource.categories.join(", "));
        if !resource.description.is_empty() {
            println!("  {}", resource.description);
        }
        println!("  {}  {}", resource.display_date(), resource.url);
    }
}

fn handle_config_path() -> Result<ExitCode> {
    match Config::config_path() {
        Some(path) => {
            println!("{}", path.display());
            Ok(ExitCode::SUCCESS)
        }
        None => {
            eprintln!("Error: Could not determine config path");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn handle_config_show(config: &Config) {
    println!("# Effective configuration (env > file > defaults)");
    println!();
    println!("{}", config.to_toml());

    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
}

fn handle_config_reset() -> Result<ExitCode> {
    let Some(path) = Config::config_path() else {
        eprintln!("Error: Could not determine config path");
        return Ok(ExitCode::FAILURE);
    };

    // Confirm if file exists
    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        std::io::stderr().flush()?;

        let mut input = String::new();
        std::io::stdin()
            .read_line(&mut input)
            .context("Failed to read confirmation")?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(ExitCode::SUCCESS);
        }
    }

    Config::default()
        .save_to(&path)
        .with_context(|| format!("Error writing config {}", path.display()))?;

    println!("Config reset to defaults: {}", path.display());
    Ok(ExitCode::SUCCESS)
}
