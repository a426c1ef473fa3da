use fusion_sim_rs::BreakMode;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "fusion-sim-rs",
    about = "Cut annotated transcripts into simulated gene fusions",
    version
)]
pub struct Args {
    /// Reference annotation providing transcripts and exons (GTF/GFF)
    #[arg(short = 'G', long = "guide", value_name = "GTF/GFF")]
    pub guide_gff: PathBuf,

    /// Fusion plan: donor transcript, donor exon, acceptor transcript, acceptor exon[, mode]
    #[arg(short = 'f', long = "fusions", value_name = "TSV")]
    pub fusions: PathBuf,

    /// Output prefix; writes <PREFIX>.gtf and <PREFIX>.bedpe
    #[arg(short = 'o', long = "out", value_name = "PREFIX")]
    pub out_prefix: PathBuf,

    /// Seed for mid-exon breakpoints (random when omitted; the seed is logged)
    #[arg(short = 's', long)]
    pub seed: Option<u64>,

    /// Break mode for plan rows that do not name one (exon or mid)
    #[arg(short = 'm', long, default_value = "exon", value_parser = parse_mode)]
    pub mode: BreakMode,

    /// Keep only transcripts of this gene biotype (e.g. protein_coding)
    #[arg(long, value_name = "NAME")]
    pub biotype: Option<String>,

    /// Stop at the first fusion that cannot be built instead of skipping it
    #[arg(long)]
    pub strict: bool,

    /// Set logging level to WARN
    #[arg(short = 'q', long)]
    pub quiet: bool,
}

impl Args {
    pub fn gtf_path(&self) -> PathBuf {
        self.output_path("gtf")
    }

    pub fn bedpe_path(&self) -> PathBuf {
        self.output_path("bedpe")
    }

    fn output_path(&self, ext: &str) -> PathBuf {
        let mut path = self.out_prefix.clone().into_os_string();
        path.push(".");
        path.push(ext);
        PathBuf::from(path)
    }
}

fn parse_mode(s: &str) -> Result<BreakMode, String> {
    s.parse::<BreakMode>().map_err(|e| e.to_string())
}
