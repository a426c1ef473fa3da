use crate::error::Error;
use crate::types::{HashMap, HashMapExt};
use anyhow::{anyhow, Result};
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Gtf,
    Gff3,
}

/// Strand of a transcript or exon on the reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strand {
    Forward,
    Reverse,
    Unknown,
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strand::Forward => write!(f, "+"),
            Strand::Reverse => write!(f, "-"),
            Strand::Unknown => write!(f, "."),
        }
    }
}

impl FromStr for Strand {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Strand::Forward),
            "-" => Ok(Strand::Reverse),
            "." => Ok(Strand::Unknown),
            _ => Err(Error::invalid_argument("strand", s)),
        }
    }
}

/// A 0-based, half-open interval `[start, end)` with `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GenomicInterval {
    start: u64,
    end: u64,
}

impl GenomicInterval {
    pub fn new(start: u64, end: u64) -> Result<Self, Error> {
        if start >= end {
            return Err(Error::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    /// Never true for a constructed interval.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn overlaps(&self, other: &GenomicInterval) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for GenomicInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// An exon feature. Values are never edited in place; truncation builds a
/// new `Exon` (see [`crate::breakpoint::truncate_exon`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exon {
    pub id: String,
    pub seqname: String,
    pub interval: GenomicInterval,
    pub strand: Strand,
}

impl Exon {
    pub fn new(
        id: impl Into<String>,
        seqname: impl Into<String>,
        start: u64,
        end: u64,
        strand: Strand,
    ) -> Result<Self, Error> {
        Ok(Self {
            id: id.into(),
            seqname: seqname.into(),
            interval: GenomicInterval::new(start, end)?,
            strand,
        })
    }

    pub fn feature_type(&self) -> &'static str {
        "exon"
    }

    pub fn start(&self) -> u64 {
        self.interval.start()
    }

    pub fn end(&self) -> u64 {
        self.interval.end()
    }

    pub fn len(&self) -> u64 {
        self.interval.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interval.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Transcript {
    pub id: String,
    pub gene_id: String,
    pub gene_biotype: Option<String>,
    pub seqname: String,
    pub strand: Strand,
    /// Exons in ascending genomic order, whatever the strand.
    pub exons: Vec<Exon>,
}

impl Transcript {
    pub fn length(&self) -> u64 {
        self.exons.iter().map(Exon::len).sum()
    }
}

pub fn detect_format(path: &Path) -> Result<InputFormat> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "gtf" => Ok(InputFormat::Gtf),
        "gff" | "gff3" => Ok(InputFormat::Gff3),
        _ => Err(anyhow!(
            "unable to detect annotation format from extension: .{}",
            ext
        )),
    }
}

/// Load transcripts and their exons from GTF/GFF.
///
/// Coordinate conventions:
/// - GTF/GFF are 1-based inclusive.
/// - Exons are stored 0-based, half-open: `start - 1`, `end` unchanged.
///
/// When `biotype` is given, only transcripts whose gene biotype equals it are
/// kept. The returned list is ordered by transcript id and every transcript's
/// exons are sorted by start.
pub fn load_transcripts(path: &Path, biotype: Option<&str>) -> Result<Vec<Transcript>> {
    let transcripts = match detect_format(path)? {
        InputFormat::Gtf => load_gtf(path)?,
        InputFormat::Gff3 => load_gff3(path)?,
    };
    Ok(finalize(transcripts, biotype))
}

fn load_gtf(path: &Path) -> Result<HashMap<String, Transcript>> {
    // record_bufs yields gff::feature::RecordBuf, which provides a uniform API.
    let reader = File::open(path)
        .map_err(|e| anyhow!("failed to open annotation {}: {}", path.display(), e))?;
    let mut reader = noodles::gtf::io::Reader::new(BufReader::new(reader));

    let mut transcripts: HashMap<String, Transcript> = HashMap::new();

    for result in reader.record_bufs() {
        let record = result?;

        let feature_type: &[u8] = record.ty().as_ref();
        if feature_type != b"transcript" && feature_type != b"exon" {
            continue;
        }

        let seqname = record.reference_sequence_name().to_string();
        let strand = convert_strand(record.strand());
        let (start, end) = zero_based(record.start().get(), record.end().get(), "GTF")?;

        let attrs = record.attributes();
        let transcript_id = get_record_buf_attribute(attrs, b"transcript_id")
            .ok_or_else(|| anyhow!("missing transcript_id in GTF attributes"))?;
        let gene_id = get_record_buf_attribute(attrs, b"gene_id").unwrap_or_default();
        let biotype = get_record_buf_attribute(attrs, b"gene_biotype")
            .or_else(|| get_record_buf_attribute(attrs, b"gene_type"));

        let entry = transcripts
            .entry(transcript_id.clone())
            .or_insert_with(|| Transcript {
                id: transcript_id.clone(),
                gene_id: gene_id.clone(),
                gene_biotype: None,
                seqname: seqname.clone(),
                strand,
                exons: Vec::new(),
            });
        if entry.gene_biotype.is_none() {
            entry.gene_biotype = biotype;
        }

        if feature_type == b"exon" {
            let exon_id = get_record_buf_attribute(attrs, b"exon_id")
                .unwrap_or_else(|| format!("{}.exon{}", transcript_id, entry.exons.len() + 1));
            entry.exons.push(Exon::new(exon_id, seqname, start, end, strand)?);
        }
    }

    Ok(transcripts)
}

fn load_gff3(path: &Path) -> Result<HashMap<String, Transcript>> {
    let reader = File::open(path)
        .map_err(|e| anyhow!("failed to open annotation {}: {}", path.display(), e))?;
    let mut reader = noodles::gff::io::Reader::new(BufReader::new(reader));

    let mut transcripts: HashMap<String, Transcript> = HashMap::new();

    for result in reader.record_bufs() {
        let record = result?;

        let feature_type: &[u8] = record.ty().as_ref();
        let is_transcript = feature_type == b"transcript" || feature_type == b"mRNA";
        if !is_transcript && feature_type != b"exon" {
            continue;
        }

        let seqname = record.reference_sequence_name().to_string();
        let strand = convert_strand(record.strand());
        let (start, end) = zero_based(record.start().get(), record.end().get(), "GFF3")?;

        let attrs = record.attributes();
        // Exons may be shared by several transcripts (`Parent=T1,T2`).
        let transcript_ids = if is_transcript {
            get_record_buf_attribute_values(attrs, b"ID")
        } else {
            get_record_buf_attribute_values(attrs, b"Parent")
        };
        if transcript_ids.is_empty() {
            return Err(anyhow!("missing transcript id in GFF3 attributes"));
        }

        for transcript_id in transcript_ids {
            let entry = transcripts
                .entry(transcript_id.clone())
                .or_insert_with(|| Transcript {
                    id: transcript_id.clone(),
                    gene_id: String::new(),
                    gene_biotype: None,
                    seqname: seqname.clone(),
                    strand,
                    exons: Vec::new(),
                });

            if is_transcript {
                if let Some(gene_id) = get_record_buf_attribute(attrs, b"Parent") {
                    entry.gene_id = gene_id;
                }
                entry.gene_biotype = get_record_buf_attribute(attrs, b"biotype")
                    .or_else(|| get_record_buf_attribute(attrs, b"gene_biotype"))
                    .or_else(|| get_record_buf_attribute(attrs, b"gene_type"));
            } else {
                let exon_id = get_record_buf_attribute(attrs, b"ID").unwrap_or_else(|| {
                    format!("{}.exon{}", transcript_id, entry.exons.len() + 1)
                });
                entry
                    .exons
                    .push(Exon::new(exon_id, seqname.clone(), start, end, strand)?);
            }
        }
    }

    Ok(transcripts)
}

fn finalize(transcripts: HashMap<String, Transcript>, biotype: Option<&str>) -> Vec<Transcript> {
    let mut out: Vec<Transcript> = Vec::with_capacity(transcripts.len());
    for (_, mut tx) in transcripts {
        if tx.exons.is_empty() {
            debug!(transcript = %tx.id, "dropping transcript without exons");
            continue;
        }
        if let Some(wanted) = biotype {
            if tx.gene_biotype.as_deref() != Some(wanted) {
                continue;
            }
        }
        tx.exons.sort_by_key(|e| (e.start(), e.end()));
        if tx
            .exons
            .windows(2)
            .any(|w| w[0].interval.overlaps(&w[1].interval))
        {
            warn!(transcript = %tx.id, "transcript has overlapping exons");
        }
        out.push(tx);
    }
    out.sort_by(|a, b| a.id.cmp(&b.id));
    out
}

fn zero_based(start_1: usize, end_1: usize, format: &str) -> Result<(u64, u64)> {
    let start = u64::try_from(start_1)
        .map_err(|_| anyhow!("{} start out of range", format))?
        .saturating_sub(1);
    let end = u64::try_from(end_1).map_err(|_| anyhow!("{} end out of range", format))?;
    Ok((start, end))
}

fn get_record_buf_attribute(
    attrs: &noodles::gff::feature::record_buf::Attributes,
    key: &[u8],
) -> Option<String> {
    let value = attrs.get(key)?;
    value.iter().next().map(|v| v.to_string())
}

fn get_record_buf_attribute_values(
    attrs: &noodles::gff::feature::record_buf::Attributes,
    key: &[u8],
) -> Vec<String> {
    attrs
        .get(key)
        .map(|value| value.iter().map(|v| v.to_string()).collect())
        .unwrap_or_default()
}

fn convert_strand(strand: noodles::gff::feature::record::Strand) -> Strand {
    use noodles::gff::feature::record::Strand as GffStrand;
    match strand {
        GffStrand::Forward => Strand::Forward,
        GffStrand::Reverse => Strand::Reverse,
        GffStrand::None | GffStrand::Unknown => Strand::Unknown,
    }
}
