//! Sheetload CLI - Load Google Sheets CSV exports as JSON
//!
//! # Main Commands
//!
//! ```bash
//! sheetload load <url>              # Fetch a sheet and print JSON
//! sheetload convert input.csv      # Convert a local CSV export
//! sheetload sheet list             # Manage registered sheet URLs
//! ```
//!
//! # Debug Commands (for development)
//!
//! ```bash
//! sheetload fetch <url>            # Just download the raw CSV export
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use sheetload::{
    convert_csv, load_sheet, JsonMode, SheetFetcher, SheetOptions, SheetRegistry,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "sheetload")]
#[command(about = "Load Google Sheets CSV exports as JSON", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Output shape on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    /// Normalized CSV text, no JSON conversion
    None,
    /// JSON array of objects
    Array,
    /// JSON object keyed by the first column
    Dict,
}

impl From<ModeArg> for JsonMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::None => JsonMode::None,
            ModeArg::Array => JsonMode::Array,
            ModeArg::Dict => JsonMode::Dictionary,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a sheet's raw CSV export
    Fetch {
        /// Spreadsheet document URL
        url: String,

        /// Accept invalid TLS certificates
        #[arg(long)]
        insecure: bool,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Convert a local CSV export file to JSON
    Convert {
        /// Input CSV file
        input: PathBuf,

        /// Output shape
        #[arg(short, long, value_enum, default_value = "array")]
        mode: ModeArg,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Fetch a sheet and convert it to JSON
    Load {
        /// Spreadsheet document URL
        url: String,

        /// Output shape
        #[arg(short, long, value_enum, default_value = "array")]
        mode: ModeArg,

        /// Accept invalid TLS certificates
        #[arg(long)]
        insecure: bool,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Manage registered sheet URLs
    Sheet {
        #[command(subcommand)]
        action: SheetAction,
    },
}

#[derive(Subcommand)]
enum SheetAction {
    /// List all registered sheets
    List,

    /// Register a sheet URL under an id
    Add {
        /// Short identifier
        id: String,
        /// Spreadsheet document URL
        url: String,
    },

    /// Show details of a registered sheet
    Show {
        /// Sheet id
        id: String,
    },

    /// Remove a registered sheet
    Remove {
        /// Sheet id
        id: String,
    },

    /// Load a registered sheet and print JSON
    Use {
        /// Sheet id
        id: String,
        /// Output shape
        #[arg(short, long, value_enum, default_value = "array")]
        mode: ModeArg,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Fetch {
            url,
            insecure,
            output,
        } => cmd_fetch(&url, insecure, output.as_deref()).await,

        Commands::Convert {
            input,
            mode,
            output,
        } => cmd_convert(&input, mode, output.as_deref()),

        Commands::Load {
            url,
            mode,
            insecure,
            output,
        } => cmd_load(&url, mode, insecure, output.as_deref()).await,

        Commands::Sheet { action } => cmd_sheet(action).await,
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn cmd_fetch(
    url: &str,
    insecure: bool,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Fetching: {}", url);

    let fetcher = SheetFetcher::with_invalid_certs(insecure)?;
    let csv = fetcher.fetch_csv(url).await?;
    eprintln!("✅ Fetched {} bytes", csv.len());

    write_output(&csv, output)
}

fn cmd_convert(
    input: &Path,
    mode: ModeArg,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Converting: {}", input.display());

    let csv = fs::read_to_string(input)?;
    let json = convert_csv(&csv, mode.into())?;
    eprintln!("✅ Rendered {} bytes", json.len());

    write_output(&json, output)
}

async fn cmd_load(
    url: &str,
    mode: ModeArg,
    insecure: bool,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = SheetOptions {
        mode: mode.into(),
        accept_invalid_certs: insecure,
    };

    let json = load_sheet(url, &options).await?;
    write_output(&json, output)
}

async fn cmd_sheet(action: SheetAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut registry = SheetRegistry::new();

    match action {
        SheetAction::List => {
            let sheets = registry.list();
            if sheets.is_empty() {
                eprintln!("📋 No sheets registered yet.");
                eprintln!("   Use 'sheetload sheet add <id> <url>' to add one.");
                return Ok(());
            }

            eprintln!("📋 Registered sheets ({}):\n", sheets.len());
            for s in sheets {
                println!("  📄 {}", s.id);
                println!("     URL: {}", s.url);
                println!("     Uses: {}", s.use_count);
                if let Some(ref last) = s.last_used {
                    println!("     Last used: {}", last);
                }
                println!();
            }
        }

        SheetAction::Add { id, url } => {
            registry.add(&id, &url)?;
            eprintln!("✅ Sheet registered: {}", id);
        }

        SheetAction::Show { id } => match registry.get(&id) {
            Some(s) => {
                println!("📄 Sheet: {}\n", s.id);
                println!("URL: {}", s.url);
                println!("Created: {}", s.created_at);
                println!("Uses: {}", s.use_count);
                if let Some(ref last) = s.last_used {
                    println!("Last used: {}", last);
                }
            }
            None => {
                return Err(format!("Sheet not found: {}", id).into());
            }
        },

        SheetAction::Remove { id } => {
            registry.remove(&id)?;
            eprintln!("🗑️  Sheet removed: {}", id);
        }

        SheetAction::Use { id, mode, output } => {
            let url = registry.url_for(&id)?;
            eprintln!("📄 Loading sheet: {} ({})", id, url);

            let options = SheetOptions {
                mode: mode.into(),
                ..SheetOptions::default()
            };
            let json = load_sheet(&url, &options).await?;
            registry.touch(&id);

            write_output(&json, output.as_deref())?;
        }
    }

    Ok(())
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
