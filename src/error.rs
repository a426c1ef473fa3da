use crate::breakpoint::Edge;

/// Errors raised by the breakpoint core.
///
/// Every variant names the operation that detected it and carries the index
/// or interval bounds involved, so callers can report the failure without
/// re-deriving any state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid {name}: {value:?}")]
    InvalidArgument { name: &'static str, value: String },

    #[error("{operation}: fusion exon index {index} out of range for {len} exons")]
    IndexOutOfRange {
        operation: &'static str,
        index: usize,
        len: usize,
    },

    #[error(
        "{operation}: moving {edge} of exon {exon_id} [{start}, {end}) to {coordinate} \
         does not leave a non-empty interval"
    )]
    InvalidBreakpoint {
        operation: &'static str,
        exon_id: String,
        edge: Edge,
        start: u64,
        end: u64,
        coordinate: u64,
    },

    #[error(
        "break_mid_exon: exon {exon_id} at index {index} spans [{start}, {end}), \
         at least {min_width} bases are needed for an interior breakpoint"
    )]
    ExonTooShortForMidBreakpoint {
        exon_id: String,
        index: usize,
        start: u64,
        end: u64,
        min_width: u64,
    },

    #[error("invalid interval [{start}, {end}): start must be less than end")]
    InvalidInterval { start: u64, end: u64 },
}

impl Error {
    pub(crate) fn invalid_argument(name: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            value: value.into(),
        }
    }
}
