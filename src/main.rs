use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use std::io::Read;
use std::path::PathBuf;
use tracing::debug;

use exa_facts::config::CollectorConfig;
use exa_facts::parsers;
use exa_facts::sources::{
    DatabaseMachineSource, DmidecodeSource, ImageInfoSource, ImgHwSource,
};
use exa_facts::FactCollector;

/// CLI for gathering Oracle Exadata hardware and firmware facts
#[derive(Parser)]
#[command(author, version, about = "Exadata fact collection CLI", long_about = None)]
struct Cli {
    /// Path to a TOML file overriding the default source paths
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Gather all facts and print the record as JSON
    Gather {
        /// Output format: json or pretty
        #[arg(short, long, default_value = "pretty")]
        format: String,
    },

    /// Report which fact sources are present on this host
    Detect {
        /// Output format: json or pretty
        #[arg(short, long, default_value = "pretty")]
        format: String,
    },

    /// Run one parser over a captured file (or stdin) and show the result
    Parse {
        /// Which parser to run
        #[arg(short, long, value_enum)]
        parser: ParserKind,

        /// Input file; reads stdin when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

/// Parser selectable from the `parse` subcommand.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ParserKind {
    /// Colon-delimited imageinfo output
    Imageinfo,
    /// Single-line exadata.img.hw output
    ImgHw,
    /// dmidecode system information section
    Dmidecode,
    /// databasemachine.xml document
    Xml,
}

/// Load the collector configuration, from file when requested.
fn load_config(path: Option<&PathBuf>) -> Result<CollectorConfig> {
    match path {
        Some(path) => {
            debug!("Loading collector config from {}", path.display());
            CollectorConfig::from_toml_file(path)
        }
        None => Ok(CollectorConfig::default()),
    }
}

/// The appliance tooling only exists on Linux; refuse to gather elsewhere.
fn ensure_linux() -> Result<()> {
    if std::env::consts::OS != "linux" {
        bail!("Fact gathering is not supported on this platform");
    }
    Ok(())
}

async fn cmd_gather(config: Option<PathBuf>, format: String) -> Result<()> {
    ensure_linux()?;

    let config = load_config(config.as_ref())?;
    let collector = FactCollector::new(config);
    let facts = collector.gather().await?;

    let output = match format.as_str() {
        "json" => serde_json::to_string(&facts)?,
        _ => serde_json::to_string_pretty(&facts)?,
    };
    println!("{}", output);

    Ok(())
}

async fn cmd_detect(config: Option<PathBuf>, format: String) -> Result<()> {
    let config = load_config(config.as_ref())?;

    let detected = [
        (
            "imageinfo",
            ImageInfoSource::new(&config).is_available(),
            config.imageinfo_path.display().to_string(),
        ),
        (
            "exadata.img.hw",
            ImgHwSource::new(&config).is_available(),
            config.img_hw_path.display().to_string(),
        ),
        (
            "dmidecode",
            DmidecodeSource::new(&config).is_available(),
            config.dmidecode_path.display().to_string(),
        ),
        (
            "databasemachine.xml",
            DatabaseMachineSource::new(&config).is_available(),
            config.databasemachine_xml.display().to_string(),
        ),
    ];

    if format == "json" {
        let entries: Vec<serde_json::Value> = detected
            .iter()
            .map(|(name, available, path)| {
                json!({"source": name, "available": available, "path": path})
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        println!("Fact sources:");
        for (name, available, path) in &detected {
            let status = if *available { "present" } else { "missing" };
            println!("  {:<22} {:<8} ({})", name, status, path);
        }
    }

    Ok(())
}

async fn cmd_parse(parser: ParserKind, input: Option<PathBuf>) -> Result<()> {
    let raw = match input {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };

    let value = match parser {
        ParserKind::Imageinfo => serde_json::to_value(parsers::parse_image_info(&raw))?,
        ParserKind::ImgHw => serde_json::to_value(parsers::parse_hw_model(&raw))?,
        ParserKind::Dmidecode => {
            serde_json::to_value(parsers::parse_system_information(&raw))?
        }
        ParserKind::Xml => serde_json::to_value(parsers::xml_to_mapping(&raw)?)?,
    };
    println!("{}", serde_json::to_string_pretty(&value)?);

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.debug {
        "exa_facts=debug,info"
    } else {
        "exa_facts=info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();

    match cli.command {
        Commands::Gather { format } => cmd_gather(cli.config, format).await,
        Commands::Detect { format } => cmd_detect(cli.config, format).await,
        Commands::Parse { parser, input } => cmd_parse(parser, input).await,
    }
}
