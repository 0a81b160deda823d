//! Check-in CLI
//!
//! # Commands
//!
//! ```bash
//! checkin serve                          # Start HTTP server (port 8000)
//! checkin extract front.jpg back.jpg     # Read identity details from two images
//! checkin records                        # List stored check-in records
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use checkin::config::DEFAULT_PORT;
use checkin::logs::{log_info, log_success, log_warning};
use checkin::{
    AppState, Extractor, GeminiClient, RecordStore, Settings, UnconfiguredExtractor, UploadedImage,
};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "checkin")]
#[command(about = "Read identity documents and issue check-in IDs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,

        /// Directory with the built frontend to serve
        #[arg(long)]
        static_dir: Option<PathBuf>,

        /// Record store file (default: CHECKIN_STORE or .checkin/records.json)
        #[arg(long)]
        store: Option<PathBuf>,
    },

    /// Extract identity details from a front and a back image
    Extract {
        /// Front side image
        front: PathBuf,

        /// Back side image
        back: PathBuf,

        /// Save the result to this record store
        #[arg(long)]
        store: Option<PathBuf>,
    },

    /// List stored check-in records
    Records {
        /// Record store file (default: CHECKIN_STORE or .checkin/records.json)
        #[arg(long)]
        store: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    let settings = Settings::from_env();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve {
            port,
            static_dir,
            store,
        } => cmd_serve(&settings, port, static_dir, store).await,

        Commands::Extract { front, back, store } => {
            cmd_extract(&settings, front, back, store).await
        }

        Commands::Records { store } => cmd_records(&settings, store),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn cmd_serve(
    settings: &Settings,
    port: u16,
    static_dir: Option<PathBuf>,
    store: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let store_path = store.unwrap_or_else(|| settings.store_path.clone());
    let store = RecordStore::open(&store_path)?;
    log_info(format!(
        "🗄️  Record store: {} ({} records)",
        store_path.display(),
        store.len()
    ));

    let extractor: Arc<dyn Extractor> = match GeminiClient::from_settings(settings) {
        Ok(client) => {
            log_info(format!("🤖 Gemini model: {}", client.model()));
            Arc::new(client)
        }
        Err(e) => {
            log_warning(format!("{}: uploads will be rejected", e));
            Arc::new(UnconfiguredExtractor)
        }
    };

    checkin::server::start_server(port, AppState::new(extractor, store), static_dir).await?;
    Ok(())
}

async fn cmd_extract(
    settings: &Settings,
    front: PathBuf,
    back: PathBuf,
    store: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = GeminiClient::from_settings(settings)?;

    eprintln!("📄 Loading images: {} and {}", front.display(), back.display());
    let images = vec![
        UploadedImage::from_path(&front)?,
        UploadedImage::from_path(&back)?,
    ];

    let details = client.extract(&images).await?;
    println!("{}", serde_json::to_string_pretty(&details)?);

    if let Some(path) = store {
        let mut store = RecordStore::open(&path)?;
        let filenames = images.into_iter().map(|i| i.filename).collect();
        let record = store.insert(&details, filenames).await?;
        log_success(format!(
            "Saved record #{} to {}",
            record.id,
            path.display()
        ));
    }

    Ok(())
}

fn cmd_records(settings: &Settings, store: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let path = store.unwrap_or_else(|| settings.store_path.clone());
    let store = RecordStore::open(&path)?;

    if store.is_empty() {
        eprintln!("📋 No records stored yet in {}", path.display());
        return Ok(());
    }

    eprintln!("📋 Stored records ({}):\n", store.len());
    for record in store.list() {
        println!(
            "  🪪 #{} {}",
            record.id,
            record.full_name.as_deref().unwrap_or("(no name)")
        );
        if let Some(number) = &record.document_number {
            println!("     Document: {}", number);
        }
        if let Some(dob) = record.date_of_birth {
            println!("     Born: {}", dob);
        }
        println!("     Files: {}", record.filenames.join(", "));
        println!("     Created: {}", record.created_at);
        println!();
    }

    Ok(())
}
