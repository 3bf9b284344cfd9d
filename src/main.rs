use clap::Parser;
use miette::{IntoDiagnostic, Result};
use photo_kiosk::application::command::CommandOutcome;
use photo_kiosk::application::kiosk::Kiosk;
use photo_kiosk::domain::config::{KioskConfig, PhotoIdStrategy};
use photo_kiosk::domain::ports::{PhotoIdSourceBox, TransactionLogBox};
use photo_kiosk::infrastructure::devices::StillImageCamera;
use photo_kiosk::infrastructure::in_memory::InMemoryTransactionLog;
use photo_kiosk::infrastructure::json_file::JsonFileTransactionLog;
use photo_kiosk::infrastructure::notifier::LogNotifier;
use photo_kiosk::infrastructure::system::{RandomPhotoIds, SequentialPhotoIds, standard_ports};
use photo_kiosk::interfaces::csv::command_reader::CommandReader;
use photo_kiosk::interfaces::csv::record_writer::RecordWriter;
use photo_kiosk::interfaces::text::receipt_view::render_receipt;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Command script to replay (CSV with `action,value` columns)
    script: PathBuf,

    /// Event configuration (JSON)
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    /// Transaction log kept as a JSON array. Without it, transactions live in memory.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Path to a persistent RocksDB transaction log (requires the `storage-rocksdb` feature).
    #[arg(long, conflicts_with = "log_file")]
    db_path: Option<PathBuf>,

    /// Still image used as the selfie camera feed. Without it, the camera is unavailable.
    #[arg(long)]
    camera_image: Option<PathBuf>,

    /// Write the full transaction log as CSV after the run.
    #[arg(long)]
    export: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set.
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn init_tracing(fallback_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .try_init();
}

#[cfg(feature = "storage-rocksdb")]
fn open_rocksdb(cli: &Cli) -> Result<Option<TransactionLogBox>> {
    use photo_kiosk::infrastructure::rocksdb::RocksDBTransactionLog;

    match &cli.db_path {
        Some(db_path) => {
            let log = RocksDBTransactionLog::open(db_path).into_diagnostic()?;
            Ok(Some(Box::new(log)))
        }
        None => Ok(None),
    }
}

#[cfg(not(feature = "storage-rocksdb"))]
fn open_rocksdb(cli: &Cli) -> Result<Option<TransactionLogBox>> {
    if cli.db_path.is_some() {
        eprintln!(
            "WARNING: Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
        );
    }
    Ok(None)
}

fn open_log(cli: &Cli) -> Result<TransactionLogBox> {
    if let Some(log) = open_rocksdb(cli)? {
        return Ok(log);
    }

    Ok(match &cli.log_file {
        Some(path) => Box::new(JsonFileTransactionLog::new(path)),
        None => Box::new(InMemoryTransactionLog::new()),
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    // Nothing is shown without a valid configuration
    let config = KioskConfig::load(&cli.config).into_diagnostic()?;
    let log = open_log(&cli)?;

    let photo_ids: PhotoIdSourceBox = match config.photo_ids {
        PhotoIdStrategy::Random => Box::new(RandomPhotoIds),
        PhotoIdStrategy::Sequential => Box::new(SequentialPhotoIds::resume_after(
            &log.load_all().await.into_diagnostic()?,
        )),
    };

    let mut ports = standard_ports(log, Box::new(LogNotifier));
    ports.photo_ids = photo_ids;
    if let Some(image) = &cli.camera_image {
        ports.camera = Box::new(StillImageCamera::new(image));
    }
    let mut kiosk = Kiosk::new(config, ports);

    let banner = kiosk.banner();
    info!(event = %banner.event_name, price = %banner.header_price, "kiosk ready");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let script = File::open(&cli.script).into_diagnostic()?;
    for command in CommandReader::new(script).commands() {
        match command {
            Ok(command) => match kiosk.execute(command).await {
                Ok(CommandOutcome::Finalized(receipt)) => {
                    writeln!(out, "{}", render_receipt(&receipt)).into_diagnostic()?;
                }
                Ok(_) => {}
                Err(e) => {
                    eprintln!("Rejected on {} screen: {}", kiosk.current_screen(), e);
                }
            },
            Err(e) => {
                eprintln!("Error reading command: {}", e);
            }
        }
    }

    if let Some(path) = &cli.export {
        let records = kiosk.transactions().await.into_diagnostic()?;
        let file = File::create(path).into_diagnostic()?;
        RecordWriter::new(file)
            .write_records(&records)
            .into_diagnostic()?;
    }

    Ok(())
}
