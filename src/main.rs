mod cli;

use anyhow::{anyhow, Result};
use clap::Parser;
use cli::Args;
use fusion_sim_rs::annotation;
use fusion_sim_rs::output::{BedpeWriter, GtfWriter};
use fusion_sim_rs::pipeline::{self, PipelineConfig};
use fusion_sim_rs::plan;
use fusion_sim_rs::SeededRandom;
use mimalloc::MiMalloc;
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing subscriber
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
            if args.quiet {
                EnvFilter::new("warn")
            } else {
                EnvFilter::new("info")
            }
        });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();

    let transcripts = annotation::load_transcripts(&args.guide_gff, args.biotype.as_deref())?;
    tracing::info!(transcripts = transcripts.len(), "annotation loaded");
    let requests = plan::load_plan(&args.fusions)?;

    let mut rng = match args.seed {
        Some(seed) => SeededRandom::new(seed),
        None => SeededRandom::from_entropy(),
    };
    tracing::info!(seed = rng.seed(), "random source seeded");

    let config = PipelineConfig {
        default_mode: args.mode,
        strict: args.strict,
        ..PipelineConfig::default()
    };
    let gtf_path = args.gtf_path();
    let bedpe_path = args.bedpe_path();
    let mut gtf = GtfWriter::create(&gtf_path, &config.source)
        .map_err(|e| anyhow!("failed to create {}: {}", gtf_path.display(), e))?;
    let mut bedpe = BedpeWriter::create(&bedpe_path)
        .map_err(|e| anyhow!("failed to create {}: {}", bedpe_path.display(), e))?;
    let stats = pipeline::run(&config, &transcripts, &requests, &mut rng, &mut gtf, &mut bedpe)?;
    tracing::info!(
        requested = stats.requested,
        created = stats.created,
        skipped = stats.skipped,
        exon_boundary = stats.exon_boundary,
        mid_exon = stats.mid_exon,
        "fusion-sim-rs: processing complete"
    );
    Ok(())
}
