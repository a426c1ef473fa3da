/// End-to-end tests running the fusion-sim-rs binary on a small annotation.
///
/// Each test writes its inputs into a scratch directory and checks the GTF and
/// BEDPE files produced under the output prefix.
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

// ── helpers ──────────────────────────────────────────────────────────────────

const GTF: &str = "\
chr1\ttest\texon\t101\t500\t.\t+\t.\tgene_id \"GA\"; transcript_id \"TA\"; gene_biotype \"protein_coding\";
chr1\ttest\texon\t801\t1000\t.\t+\t.\tgene_id \"GA\"; transcript_id \"TA\"; gene_biotype \"protein_coding\";
chr1\ttest\texon\t1501\t2000\t.\t+\t.\tgene_id \"GA\"; transcript_id \"TA\"; gene_biotype \"protein_coding\";
chr5\ttest\texon\t5001\t5300\t.\t-\t.\tgene_id \"GB\"; transcript_id \"TB\"; gene_biotype \"protein_coding\";
chr5\ttest\texon\t6001\t6400\t.\t-\t.\tgene_id \"GB\"; transcript_id \"TB\"; gene_biotype \"protein_coding\";
";

const PLAN: &str = "\
# donor\tdonor_exon\tacceptor\tacceptor_exon\tmode
TA\t1\tTB\t0
TA\t0\tTB\t1\tmid
TB\t1\tTX_UNKNOWN\t0
";

fn fusion_sim_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_fusion-sim-rs"))
}

fn setup() -> TempDir {
    let dir = tempfile::tempdir().expect("create temp dir");
    fs::write(dir.path().join("genes.gtf"), GTF).expect("write gtf");
    fs::write(dir.path().join("plan.tsv"), PLAN).expect("write plan");
    dir
}

/// Run the binary, return whether it exited successfully.
fn run_binary(dir: &Path, prefix: &str, extra: &[&str]) -> bool {
    Command::new(fusion_sim_bin())
        .arg("-G")
        .arg(dir.join("genes.gtf"))
        .arg("-f")
        .arg(dir.join("plan.tsv"))
        .arg("-o")
        .arg(dir.join(prefix))
        .arg("-q")
        .args(extra)
        .status()
        .expect("failed to spawn fusion-sim-rs")
        .success()
}

fn read(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(name)).unwrap_or_else(|e| panic!("read {name}: {e}"))
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[test]
fn writes_gtf_and_bedpe() {
    let dir = setup();
    assert!(run_binary(dir.path(), "run", &["--seed", "1"]));

    let bedpe = read(dir.path(), "run.bedpe");
    let rows: Vec<Vec<&str>> = bedpe.lines().map(|l| l.split('\t').collect()).collect();
    assert_eq!(rows.len(), 2, "unknown transcript should be skipped:\n{bedpe}");

    // TA exon 1 boundary: donor (+) cut at 1000; TB exon 0 acceptor (-) cut at 5300.
    assert_eq!(
        rows[0],
        vec!["chr1", "999", "1000", "chr5", "5299", "5300", "F0001_GA--GB", ".", "+", "-"]
    );

    // Mid-exon junctions fall strictly inside their exons.
    let donor_end: u64 = rows[1][2].parse().unwrap();
    let acceptor_end: u64 = rows[1][5].parse().unwrap();
    assert!(100 < donor_end && donor_end < 500);
    assert!(6000 < acceptor_end && acceptor_end < 6400);

    let gtf = read(dir.path(), "run.gtf");
    let first_event: Vec<&str> = gtf.lines().filter(|l| l.contains("\"F0001_GA--GB\"")).collect();
    assert_eq!(first_event.len(), 3);
    assert!(first_event[0].starts_with("chr1\tfusion-sim\texon\t101\t500\t.\t+"));
    assert!(first_event[2].starts_with("chr5\tfusion-sim\texon\t5001\t5300\t.\t-"));
}

#[test]
fn same_seed_same_output() {
    let dir = setup();
    assert!(run_binary(dir.path(), "a", &["--seed", "17", "--mode", "mid"]));
    assert!(run_binary(dir.path(), "b", &["--seed", "17", "--mode", "mid"]));
    assert_eq!(read(dir.path(), "a.gtf"), read(dir.path(), "b.gtf"));
    assert_eq!(read(dir.path(), "a.bedpe"), read(dir.path(), "b.bedpe"));
}

#[test]
fn strict_mode_fails_on_unknown_transcript() {
    let dir = setup();
    assert!(!run_binary(dir.path(), "strict", &["--seed", "1", "--strict"]));
}

#[test]
fn rejects_unknown_mode() {
    let dir = setup();
    assert!(!run_binary(dir.path(), "bad", &["--mode", "splice"]));
}
