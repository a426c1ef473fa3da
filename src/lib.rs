//! fusion-sim-rs: place breakpoints for simulated gene fusions.
//!
//! # Library usage
//!
//! ```no_run
//! use fusion_sim_rs::{break_mid_exon, resolve_direction, Role, SeededRandom};
//! use fusion_sim_rs::annotation::load_transcripts;
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let transcripts = load_transcripts(Path::new("genes.gtf"), None)?;
//! let donor = &transcripts[0];
//!
//! let direction = resolve_direction(Role::Donor, donor.strand)?;
//! let mut rng = SeededRandom::new(7);
//! let bp = break_mid_exon(&donor.exons, 1, direction, &mut rng)?;
//! println!("cut at {}, keeping {} exons", bp.position, bp.exons.len());
//! # Ok(())
//! # }
//! ```

// Internal modules: not part of the public API.
pub(crate) mod types;

// Public modules: stable API surface.
pub mod annotation;
pub mod breakpoint;
pub mod error;
pub mod fusion;
pub mod output;
pub mod pipeline;
pub mod plan;
pub mod random;

// Flat re-exports for the most commonly used public types.
pub use annotation::{Exon, GenomicInterval, Strand, Transcript};
pub use breakpoint::{
    break_at_exon_boundary, break_mid_exon, resolve_direction, slice_exons, truncate_exon,
    Breakpoint, Direction, Edge, Role, MIN_MID_EXON_WIDTH,
};
pub use error::Error;
pub use fusion::{break_partner, create_fusion_event, BreakMode, FusionEvent, FusionPartner};
pub use pipeline::{PipelineConfig, Stats};
pub use random::{RandomSource, SeededRandom};
pub use types::ExonIndex;
