use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};

use pack_attention::analysis_pipeline::{
    AnalysisOrchestrator, ImageInput, ImageSource, OrchestratorConfig, ScoringConfig,
    VisionScoringClient, save_results, write_heatmaps,
};
use pack_attention::logger;

#[derive(Parser, Debug)]
#[command(author, version, about = "Attention heatmaps and design scores for packaging images")]
struct Args {
    /// Image files or http(s) URLs (PNG or JPEG)
    #[arg(required = true)]
    images: Vec<String>,

    /// Directory for heatmaps and results.json
    #[arg(short, long, default_value = "out")]
    out: PathBuf,

    /// Skip the remote scorer and synthesize scores
    #[arg(long)]
    offline: bool,

    /// Seed for fallback heatmaps and synthesized scores
    #[arg(long)]
    seed: Option<u64>,

    /// Per-track time limit in seconds for loading and scoring
    #[arg(long)]
    timeout_secs: Option<u64>,
}

fn to_input(arg: &str) -> ImageInput {
    let source = if arg.starts_with("http://") || arg.starts_with("https://") || arg.starts_with("data:") {
        ImageSource::Url(arg.to_string())
    } else {
        ImageSource::Path(PathBuf::from(arg))
    };
    ImageInput::new(source)
}

async fn ctrl_c() {
    if tokio::signal::ctrl_c().await.is_err() {
        warn!("Could not listen for Ctrl-C, batch cannot be interrupted");
        std::future::pending::<()>().await;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    logger::init();
    let args = Args::parse();

    let scoring = if args.offline {
        ScoringConfig::offline()
    } else {
        ScoringConfig::from_env()
    };
    if !scoring.is_configured() {
        warn!("No API key configured, scores will be synthesized");
    }
    let scorer = VisionScoringClient::new(scoring).context("failed to set up scoring client")?;

    let config = OrchestratorConfig::builder()
        .rng_seed(args.seed)
        .track_timeout(args.timeout_secs.map(Duration::from_secs))
        .build();
    let orchestrator = AnalysisOrchestrator::new(config, scorer);

    let inputs: Vec<ImageInput> = args.images.iter().map(String::as_str).map(to_input).collect();
    info!("Analyzing {} images", inputs.len());

    let results = match orchestrator.analyze_batch_until(&inputs, ctrl_c()).await {
        Ok(results) => results,
        Err(e) => {
            error!("Analysis interrupted: {}", e);
            return Err(e.into());
        }
    };

    let heatmaps = write_heatmaps(&args.out, &results)
        .with_context(|| format!("failed to write heatmaps to {}", args.out.display()))?;
    let results_path = args.out.join("results.json");
    save_results(&results_path, &results)
        .with_context(|| format!("failed to write {}", results_path.display()))?;

    for result in &results {
        info!(
            "{}: overall {:.1} (heatmap {:?}, scores {:?})",
            result.image_id, result.overall_score, result.heatmap_origin, result.score_origin
        );
    }
    info!(
        "Wrote {} heatmaps and {}",
        heatmaps.len(),
        results_path.display()
    );
    Ok(())
}
