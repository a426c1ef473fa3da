// GTF and BEDPE writers for fusion events

use crate::fusion::FusionEvent;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Writes the exons of each fused transcript as GTF `exon` rows.
pub struct GtfWriter<W: Write> {
    writer: W,
    source: String,
}

impl GtfWriter<BufWriter<File>> {
    pub fn create(path: &Path, source: &str) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file), source))
    }
}

impl<W: Write> GtfWriter<W> {
    pub fn new(writer: W, source: &str) -> Self {
        Self {
            writer,
            source: source.to_string(),
        }
    }

    /// One row per exon in transcription order, 1-based inclusive.
    ///
    /// Attributes: gene_id and transcript_id (both the event id), exon_number,
    /// fusion_role, source_transcript_id, source_exon_id.
    pub fn write_event(&mut self, event: &FusionEvent) -> io::Result<()> {
        for (number, (partner, exon)) in event.exons().into_iter().enumerate() {
            writeln!(
                self.writer,
                "{}\t{}\t{}\t{}\t{}\t.\t{}\t.\tgene_id \"{}\"; transcript_id \"{}\"; exon_number \"{}\"; fusion_role \"{}\"; source_transcript_id \"{}\"; source_exon_id \"{}\";",
                exon.seqname,
                self.source,
                exon.feature_type(),
                exon.start() + 1,
                exon.end(),
                exon.strand,
                event.id,
                event.id,
                number + 1,
                partner.role,
                partner.transcript_id,
                exon.id,
            )?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Writes one BEDPE row per event joining the donor and acceptor junction bases.
pub struct BedpeWriter<W: Write> {
    writer: W,
}

impl BedpeWriter<BufWriter<File>> {
    pub fn create(path: &Path) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> BedpeWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Format: 10 tab-separated columns, 0-based half-open
    /// 1-3. donor chrom, start, end
    /// 4-6. acceptor chrom, start, end
    /// 7. event id
    /// 8. score (always `.`)
    /// 9. donor strand
    /// 10. acceptor strand
    pub fn write_event(&mut self, event: &FusionEvent) -> io::Result<()> {
        let donor = junction_base(event, true)?;
        let acceptor = junction_base(event, false)?;
        writeln!(
            self.writer,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t.\t{}\t{}",
            event.donor.seqname,
            donor.0,
            donor.1,
            event.acceptor.seqname,
            acceptor.0,
            acceptor.1,
            event.id,
            event.donor.strand,
            event.acceptor.strand,
        )
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn junction_base(event: &FusionEvent, donor: bool) -> io::Result<(u64, u64)> {
    let partner = if donor { &event.donor } else { &event.acceptor };
    let base = partner
        .breakpoint
        .junction_base(partner.direction)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok((base.start(), base.end()))
}
