//! Breakpoint placement for chimeric transcripts.
//!
//! A fusion cuts each partner transcript at one exon. The cut either lands on
//! an existing exon edge ([`break_at_exon_boundary`]) or at a random base
//! strictly inside the exon ([`break_mid_exon`]), in which case that exon is
//! shortened. Which side of the cut is kept depends only on [`Direction`],
//! which [`resolve_direction`] derives from the partner's role and strand.
//!
//! Exon lists are always in ascending genomic order, also for minus-strand
//! transcripts. Inputs are never modified; results are fresh vectors.

use crate::annotation::{Exon, GenomicInterval, Strand};
use crate::error::Error;
use crate::random::RandomSource;
use std::fmt;
use std::str::FromStr;

/// Narrowest exon (`end - start`) that [`break_mid_exon`] will cut.
pub const MIN_MID_EXON_WIDTH: u64 = 3;

/// Which half of a fusion a transcript contributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Donor,
    Acceptor,
}

/// Orientation of a cut in genomic coordinates.
///
/// `Forward` keeps the low-coordinate side and cuts the high side of the
/// fusion exon; `Reverse` keeps the high-coordinate side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Reverse,
}

/// Exon boundary replaced by [`truncate_exon`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Start,
    End,
}

/// Cut coordinate plus the exons retained on that side of the fusion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breakpoint {
    pub position: u64,
    pub exons: Vec<Exon>,
}

impl Breakpoint {
    /// The single retained base adjacent to the cut, as `[p - 1, p)` for a
    /// forward cut and `[p, p + 1)` for a reverse cut.
    pub fn junction_base(&self, direction: Direction) -> Result<GenomicInterval, Error> {
        match direction {
            Direction::Forward => {
                GenomicInterval::new(self.position.saturating_sub(1), self.position)
            }
            Direction::Reverse => GenomicInterval::new(self.position, self.position + 1),
        }
    }
}

/// Map a partner's role and strand to the direction its exons are cut in.
///
/// | role     | strand | direction |
/// |----------|--------|-----------|
/// | donor    | +      | forward   |
/// | donor    | -      | reverse   |
/// | acceptor | +      | reverse   |
/// | acceptor | -      | forward   |
pub fn resolve_direction(role: Role, strand: Strand) -> Result<Direction, Error> {
    match (role, strand) {
        (Role::Donor, Strand::Forward) | (Role::Acceptor, Strand::Reverse) => {
            Ok(Direction::Forward)
        }
        (Role::Donor, Strand::Reverse) | (Role::Acceptor, Strand::Forward) => {
            Ok(Direction::Reverse)
        }
        (_, Strand::Unknown) => Err(Error::invalid_argument("strand", strand.to_string())),
    }
}

/// Copy `exon` with one boundary moved to `coordinate`.
pub fn truncate_exon(exon: &Exon, edge: Edge, coordinate: u64) -> Result<Exon, Error> {
    let (start, end) = match edge {
        Edge::Start => (coordinate, exon.end()),
        Edge::End => (exon.start(), coordinate),
    };
    let interval = GenomicInterval::new(start, end).map_err(|_| Error::InvalidBreakpoint {
        operation: "truncate_exon",
        exon_id: exon.id.clone(),
        edge,
        start: exon.start(),
        end: exon.end(),
        coordinate,
    })?;
    Ok(Exon {
        interval,
        ..exon.clone()
    })
}

/// Cut on the edge of `exons[index]`.
///
/// Forward cuts at the exon end and keeps `exons[..=index]`; reverse cuts at
/// the exon start and keeps `exons[index..]`.
pub fn break_at_exon_boundary(
    exons: &[Exon],
    index: usize,
    direction: Direction,
) -> Result<Breakpoint, Error> {
    let fusion_exon = check_index(exons, index, "break_at_exon_boundary")?;
    let bp = match direction {
        Direction::Forward => Breakpoint {
            position: fusion_exon.end(),
            exons: exons[..=index].to_vec(),
        },
        Direction::Reverse => Breakpoint {
            position: fusion_exon.start(),
            exons: exons[index..].to_vec(),
        },
    };
    Ok(bp)
}

/// The exon list of [`break_at_exon_boundary`], without the position.
pub fn slice_exons(
    exons: &[Exon],
    index: usize,
    direction: Direction,
) -> Result<Vec<Exon>, Error> {
    break_at_exon_boundary(exons, index, direction).map(|bp| bp.exons)
}

/// Cut at a random base strictly inside `exons[index]`.
///
/// The position is drawn from `[start + 1, end - 1]` with exactly one call to
/// `rng`; rejected inputs consume no draw. Forward keeps the exons before
/// `index` plus the fusion exon truncated to end at the position; reverse keeps
/// the fusion exon truncated to start at the position plus everything after it.
pub fn break_mid_exon<R>(
    exons: &[Exon],
    index: usize,
    direction: Direction,
    rng: &mut R,
) -> Result<Breakpoint, Error>
where
    R: RandomSource + ?Sized,
{
    let fusion_exon = check_index(exons, index, "break_mid_exon")?;
    let (start, end) = (fusion_exon.start(), fusion_exon.end());
    if end - start < MIN_MID_EXON_WIDTH {
        return Err(Error::ExonTooShortForMidBreakpoint {
            exon_id: fusion_exon.id.clone(),
            index,
            start,
            end,
            min_width: MIN_MID_EXON_WIDTH,
        });
    }

    let position = rng.uniform_int(start + 1, end - 1);
    let edge = match direction {
        Direction::Forward => Edge::End,
        Direction::Reverse => Edge::Start,
    };
    // A misbehaving source must not yield an endpoint or an outside coordinate.
    if position <= start || position >= end {
        return Err(Error::InvalidBreakpoint {
            operation: "break_mid_exon",
            exon_id: fusion_exon.id.clone(),
            edge,
            start,
            end,
            coordinate: position,
        });
    }
    let truncated = truncate_exon(fusion_exon, edge, position)?;

    let kept = match direction {
        Direction::Forward => {
            let mut kept = Vec::with_capacity(index + 1);
            kept.extend_from_slice(&exons[..index]);
            kept.push(truncated);
            kept
        }
        Direction::Reverse => {
            let mut kept = Vec::with_capacity(exons.len() - index);
            kept.push(truncated);
            kept.extend_from_slice(&exons[index + 1..]);
            kept
        }
    };

    Ok(Breakpoint {
        position,
        exons: kept,
    })
}

fn check_index<'a>(
    exons: &'a [Exon],
    index: usize,
    operation: &'static str,
) -> Result<&'a Exon, Error> {
    exons.get(index).ok_or(Error::IndexOutOfRange {
        operation,
        index,
        len: exons.len(),
    })
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Donor => write!(f, "donor"),
            Role::Acceptor => write!(f, "acceptor"),
        }
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "donor" => Ok(Role::Donor),
            "acceptor" => Ok(Role::Acceptor),
            _ => Err(Error::invalid_argument("role", s)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Forward => write!(f, "forward"),
            Direction::Reverse => write!(f, "reverse"),
        }
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "forward" => Ok(Direction::Forward),
            "reverse" => Ok(Direction::Reverse),
            _ => Err(Error::invalid_argument("direction", s)),
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edge::Start => write!(f, "start"),
            Edge::End => write!(f, "end"),
        }
    }
}

impl FromStr for Edge {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Edge::Start),
            "end" => Ok(Edge::End),
            _ => Err(Error::invalid_argument("edge", s)),
        }
    }
}
