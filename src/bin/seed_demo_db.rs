use mimalloc::MiMalloc;
use std::path::PathBuf;
use tracing::info;
use triptych::browser::demo;
use triptych::config::CONFIG;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const DEFAULT_DB: &str = "db.sqlite";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    triptych::logging::init(&CONFIG.loglevel);

    let path = PathBuf::from(DEFAULT_DB);
    let summary = demo::seed(&path).await?;
    info!(
        path = %path.display(),
        inserted = summary.inserted,
        "seed finished"
    );
    println!(
        "Database '{}' created and filled with sample data ({} rows).",
        path.display(),
        summary.inserted
    );
    Ok(())
}
