use crate::annotation::Transcript;
use crate::fusion::{create_fusion_event, BreakMode, FusionEvent};
use crate::output::{BedpeWriter, GtfWriter};
use crate::plan::FusionRequest;
use crate::random::RandomSource;
use crate::types::{HashMap, HashMapExt};
use anyhow::{anyhow, Result};
use std::io::Write;
use tracing::{debug, warn};

/// Value of the GTF source column.
pub const DEFAULT_SOURCE: &str = "fusion-sim";

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Mode for plan rows that do not name one.
    pub default_mode: BreakMode,
    /// Fail on the first request that cannot be built.
    pub strict: bool,
    pub source: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            default_mode: BreakMode::ExonBoundary,
            strict: false,
            source: DEFAULT_SOURCE.to_string(),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Stats {
    pub requested: u64,
    pub created: u64,
    pub skipped: u64,
    pub exon_boundary: u64,
    pub mid_exon: u64,
}

/// Build every requested fusion in plan order.
///
/// Requests naming unknown transcripts or failing in the breakpoint code are
/// skipped with a warning, or abort the run when `config.strict` is set.
pub fn build_events<R>(
    config: &PipelineConfig,
    transcripts: &[Transcript],
    plan: &[FusionRequest],
    rng: &mut R,
) -> Result<(Vec<FusionEvent>, Stats)>
where
    R: RandomSource + ?Sized,
{
    let by_id: HashMap<&str, &Transcript> = {
        let mut map = HashMap::with_capacity(transcripts.len());
        for tx in transcripts {
            map.insert(tx.id.as_str(), tx);
        }
        map
    };

    let mut stats = Stats::default();
    let mut events = Vec::with_capacity(plan.len());

    for (n, request) in plan.iter().enumerate() {
        stats.requested += 1;
        match build_event(config, &by_id, n + 1, request, rng) {
            Ok(event) => {
                debug!(
                    event = %event.id,
                    mode = %event.mode,
                    donor_junction = event.donor.breakpoint.position,
                    acceptor_junction = event.acceptor.breakpoint.position,
                    "created fusion"
                );
                match event.mode {
                    BreakMode::ExonBoundary => stats.exon_boundary += 1,
                    BreakMode::MidExon => stats.mid_exon += 1,
                }
                stats.created += 1;
                events.push(event);
            }
            Err(e) if config.strict => return Err(e),
            Err(e) => {
                warn!(
                    request = n + 1,
                    donor = %request.donor_transcript,
                    acceptor = %request.acceptor_transcript,
                    error = %e,
                    "skipping fusion"
                );
                stats.skipped += 1;
            }
        }
    }

    Ok((events, stats))
}

/// Build the plan and write every created event to both outputs.
pub fn run<R, G, B>(
    config: &PipelineConfig,
    transcripts: &[Transcript],
    plan: &[FusionRequest],
    rng: &mut R,
    gtf: &mut GtfWriter<G>,
    bedpe: &mut BedpeWriter<B>,
) -> Result<Stats>
where
    R: RandomSource + ?Sized,
    G: Write,
    B: Write,
{
    let (events, stats) = build_events(config, transcripts, plan, rng)?;
    for event in &events {
        gtf.write_event(event)?;
        bedpe.write_event(event)?;
    }
    gtf.flush()?;
    bedpe.flush()?;
    Ok(stats)
}

fn build_event<R>(
    config: &PipelineConfig,
    by_id: &HashMap<&str, &Transcript>,
    number: usize,
    request: &FusionRequest,
    rng: &mut R,
) -> Result<FusionEvent>
where
    R: RandomSource + ?Sized,
{
    let donor = lookup(by_id, &request.donor_transcript)?;
    let acceptor = lookup(by_id, &request.acceptor_transcript)?;
    let mode = request.mode.unwrap_or(config.default_mode);
    let id = format!("F{:04}_{}--{}", number, gene_label(donor), gene_label(acceptor));
    let event = create_fusion_event(
        id,
        donor,
        request.donor_exon,
        acceptor,
        request.acceptor_exon,
        mode,
        rng,
    )?;
    Ok(event)
}

fn lookup<'a>(by_id: &HashMap<&str, &'a Transcript>, id: &str) -> Result<&'a Transcript> {
    by_id
        .get(id)
        .copied()
        .ok_or_else(|| anyhow!("transcript {} not found in annotation", id))
}

fn gene_label(tx: &Transcript) -> &str {
    if tx.gene_id.is_empty() {
        &tx.id
    } else {
        &tx.gene_id
    }
}
