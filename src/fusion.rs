//! Assemble a fusion event from a donor and an acceptor transcript.
//!
//! # Example
//!
//! ```no_run
//! use fusion_sim_rs::{create_fusion_event, BreakMode, SeededRandom};
//! use fusion_sim_rs::annotation::load_transcripts;
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let transcripts = load_transcripts(Path::new("genes.gtf"), Some("protein_coding"))?;
//! let mut rng = SeededRandom::new(1);
//! let event = create_fusion_event(
//!     "F0001",
//!     &transcripts[0], 2,
//!     &transcripts[1], 0,
//!     BreakMode::MidExon,
//!     &mut rng,
//! )?;
//! println!("{} spans {} bases", event.id, event.transcript_length());
//! # Ok(())
//! # }
//! ```

use crate::annotation::{Exon, Strand, Transcript};
use crate::breakpoint::{
    break_at_exon_boundary, break_mid_exon, resolve_direction, Breakpoint, Direction, Role,
};
use crate::error::Error;
use crate::random::RandomSource;
use crate::types::ExonIndex;
use std::fmt;
use std::str::FromStr;

/// How the fusion exon is cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BreakMode {
    /// Cut on an existing exon edge.
    #[default]
    ExonBoundary,
    /// Cut at a random base inside the exon.
    MidExon,
}

impl fmt::Display for BreakMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BreakMode::ExonBoundary => write!(f, "exon"),
            BreakMode::MidExon => write!(f, "mid"),
        }
    }
}

impl FromStr for BreakMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exon" => Ok(BreakMode::ExonBoundary),
            "mid" => Ok(BreakMode::MidExon),
            _ => Err(Error::invalid_argument("break mode", s)),
        }
    }
}

/// One side of a fusion after the cut.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FusionPartner {
    pub role: Role,
    pub gene_id: String,
    pub transcript_id: String,
    pub seqname: String,
    pub strand: Strand,
    pub exon_index: ExonIndex,
    pub direction: Direction,
    pub breakpoint: Breakpoint,
}

impl FusionPartner {
    /// Retained exons in the order they are transcribed.
    pub fn transcription_order(&self) -> Box<dyn Iterator<Item = &Exon> + '_> {
        if self.strand == Strand::Reverse {
            Box::new(self.breakpoint.exons.iter().rev())
        } else {
            Box::new(self.breakpoint.exons.iter())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FusionEvent {
    pub id: String,
    pub mode: BreakMode,
    pub donor: FusionPartner,
    pub acceptor: FusionPartner,
}

impl FusionEvent {
    /// Exons of the chimeric transcript in transcription order, each paired
    /// with the partner it came from.
    pub fn exons(&self) -> Vec<(&FusionPartner, &Exon)> {
        self.donor
            .transcription_order()
            .map(|e| (&self.donor, e))
            .chain(self.acceptor.transcription_order().map(|e| (&self.acceptor, e)))
            .collect()
    }

    pub fn transcript_length(&self) -> u64 {
        self.donor
            .breakpoint
            .exons
            .iter()
            .chain(self.acceptor.breakpoint.exons.iter())
            .map(Exon::len)
            .sum()
    }
}

/// Cut one transcript for its role in a fusion.
pub fn break_partner<R>(
    transcript: &Transcript,
    role: Role,
    exon_index: ExonIndex,
    mode: BreakMode,
    rng: &mut R,
) -> Result<FusionPartner, Error>
where
    R: RandomSource + ?Sized,
{
    let direction = resolve_direction(role, transcript.strand)?;
    let breakpoint = match mode {
        BreakMode::ExonBoundary => {
            break_at_exon_boundary(&transcript.exons, exon_index, direction)?
        }
        BreakMode::MidExon => break_mid_exon(&transcript.exons, exon_index, direction, rng)?,
    };
    Ok(FusionPartner {
        role,
        gene_id: transcript.gene_id.clone(),
        transcript_id: transcript.id.clone(),
        seqname: transcript.seqname.clone(),
        strand: transcript.strand,
        exon_index,
        direction,
        breakpoint,
    })
}

/// Cut donor then acceptor and combine them into one event.
///
/// The donor is always broken first, so a shared `rng` yields the same event
/// for the same seed and call sequence.
pub fn create_fusion_event<R>(
    id: impl Into<String>,
    donor: &Transcript,
    donor_exon: ExonIndex,
    acceptor: &Transcript,
    acceptor_exon: ExonIndex,
    mode: BreakMode,
    rng: &mut R,
) -> Result<FusionEvent, Error>
where
    R: RandomSource + ?Sized,
{
    let donor = break_partner(donor, Role::Donor, donor_exon, mode, rng)?;
    let acceptor = break_partner(acceptor, Role::Acceptor, acceptor_exon, mode, rng)?;
    Ok(FusionEvent {
        id: id.into(),
        mode,
        donor,
        acceptor,
    })
}
