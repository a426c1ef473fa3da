//! Fusion plan parsing
//!
//! Tab-separated, one fusion per line:
//! 1. donor transcript id
//! 2. donor fusion exon index (0-based, genomic order)
//! 3. acceptor transcript id
//! 4. acceptor fusion exon index (0-based, genomic order)
//! 5. break mode, `exon` or `mid` (optional)
//!
//! Blank lines and lines starting with `#` are ignored.
use crate::fusion::BreakMode;
use crate::types::ExonIndex;
use anyhow::{anyhow, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FusionRequest {
    pub donor_transcript: String,
    pub donor_exon: ExonIndex,
    pub acceptor_transcript: String,
    pub acceptor_exon: ExonIndex,
    /// `None` falls back to the run's default mode.
    pub mode: Option<BreakMode>,
}

pub fn load_plan(path: &Path) -> Result<Vec<FusionRequest>> {
    let file = File::open(path)
        .map_err(|e| anyhow!("failed to open fusion plan {}: {}", path.display(), e))?;
    read_plan(BufReader::new(file))
}

pub fn read_plan<R: BufRead>(reader: R) -> Result<Vec<FusionRequest>> {
    let mut requests = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line_num = idx + 1;
        let line = line.map_err(|e| anyhow!("failed to read plan line {}: {}", line_num, e))?;

        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let request =
            parse_plan_line(line).map_err(|e| anyhow!("fusion plan line {}: {}", line_num, e))?;
        requests.push(request);
    }

    Ok(requests)
}

fn parse_plan_line(line: &str) -> Result<FusionRequest> {
    let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
    if fields.len() != 4 && fields.len() != 5 {
        return Err(anyhow!("expected 4 or 5 tab-separated fields, found {}", fields.len()));
    }

    let donor_exon = fields[1]
        .parse::<ExonIndex>()
        .map_err(|e| anyhow!("invalid donor exon index {:?}: {}", fields[1], e))?;
    let acceptor_exon = fields[3]
        .parse::<ExonIndex>()
        .map_err(|e| anyhow!("invalid acceptor exon index {:?}: {}", fields[3], e))?;
    let mode = match fields.get(4) {
        Some(s) if !s.is_empty() => Some(s.parse::<BreakMode>()?),
        _ => None,
    };

    Ok(FusionRequest {
        donor_transcript: fields[0].to_string(),
        donor_exon,
        acceptor_transcript: fields[2].to_string(),
        acceptor_exon,
        mode,
    })
}
