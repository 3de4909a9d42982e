use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use tunematch::prelude::*;

/// Content-based song recommendation engine
#[derive(Parser, Debug)]
#[command(name = "tunematch")]
#[command(about = "Compute per-song top-k neighbors from a song catalog", long_about = None)]
struct Args {
    /// Path to the catalog file (JSON array of song rows)
    #[arg(short, long)]
    catalog: PathBuf,

    /// Directory the output artifacts are written to
    #[arg(short, long, default_value = "./out")]
    out_dir: PathBuf,

    /// Number of neighbors kept per song
    #[arg(short = 'k', long, default_value_t = DEFAULT_TOP_K)]
    top_k: usize,

    /// Dimensionality of the text embeddings
    #[arg(long, default_value_t = DEFAULT_TEXT_DIM)]
    text_dim: usize,

    /// Run the pairwise comparison on worker threads
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting tunematch v{}", env!("CARGO_PKG_VERSION"));
    info!("Catalog: {:?}", args.catalog);
    info!("Output directory: {:?}", args.out_dir);
    info!("Top-k: {}", args.top_k);

    let load = load_catalog(&args.catalog)?;
    info!(
        "Loaded {} catalog rows ({} dropped while loading)",
        load.rows.len(),
        load.dropped
    );

    let embedder = Arc::new(HashTextEmbedder::new(args.text_dim));
    let builder = FeatureVectorBuilder::new(embedder);
    let (songs, dropped) = builder.build_all(&load.rows);
    info!(
        "Built {} feature vectors of dimension {} ({} rows dropped)",
        songs.len(),
        builder.vector_dim(),
        dropped
    );

    let raw = SimilarityEngine::new().parallel(args.parallel).compute(&songs)?;
    info!(
        "Computed {} similarity edges across {} songs",
        raw.edge_count(),
        raw.len()
    );

    let ranked = RankingAggregator::new(args.top_k)?.rank(&raw)?;

    let paths = ResultExporter::new(&args.out_dir).export(&ranked, &raw)?;
    info!("Full similarity record: {:?}", paths.full);
    info!("UI record: {:?}", paths.ui);
    info!(
        "Done: {} songs ranked, {} total rows dropped",
        ranked.len(),
        load.dropped + dropped
    );

    Ok(())
}
