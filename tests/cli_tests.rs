//! End-to-end tests of the `contig-dedup` binary.
//!
//! `rmdup` tests use shell scripts in place of minimap2 (or nucmer and
//! show-coords) that report contig B as contained in contig A and nothing
//! else.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn seq(len: usize, unit: &str) -> String {
    unit.repeat(len / unit.len() + 1)[..len].to_string()
}

fn write_input(dir: &Path) -> PathBuf {
    let path = dir.join("assembly.fasta");
    let a = seq(1000, "ACGTTGCA");
    let b = a[100..700].to_string();
    let c = seq(50, "GGC");
    fs::write(&path, format!(">A\n{a}\n>B\n{b}\n>C\n{c}\n")).unwrap();
    path
}

#[cfg(unix)]
fn fake_minimap2(dir: &Path) -> PathBuf {
    // Arguments: -t N -x PRESET -N5 reference.fasta query.fasta
    let script = r#"#!/bin/sh
shift 6
if head -n1 "$1" | grep -q '^>B$'; then
  printf 'B\t600\t0\t600\t+\tA\t1000\t100\t700\t600\t600\t60\n'
fi
"#;
    let path = dir.join("minimap2");
    executable(&path, script);
    path
}

#[cfg(unix)]
fn executable(path: &Path, script: &str) {
    use std::os::unix::fs::PermissionsExt;

    fs::write(path, script).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

/// Fake nucmer and show-coords. nucmer stashes the query header next to the
/// delta so show-coords knows which contig it is reporting on.
#[cfg(unix)]
fn fake_mummer(dir: &Path) -> (PathBuf, PathBuf) {
    // nucmer arguments: -p PREFIX query.fasta reference.fasta
    let nucmer = dir.join("nucmer");
    executable(
        &nucmer,
        r#"#!/bin/sh
touch "$2.delta"
head -n1 "$3" > "$2.query"
"#,
    );

    // show-coords arguments: -r -c -l -T -o -I 75 PREFIX.delta
    let show_coords = dir.join("show-coords");
    executable(
        &show_coords,
        r#"#!/bin/sh
printf '/q /r
NUCMER

[S1]	[E1]	[S2]	[E2]	[LEN 1]	[LEN 2]	[%% IDY]	[LEN R]	[LEN Q]	[COV R]	[COV Q]	[TAGS]
'
if grep -q '^>B$' "${8%.delta}.query"; then
  printf '1	600	101	700	600	600	100.00	600	1000	100.00	60.00	B	A	[CONTAINED]
'
fi
"#,
    );

    (nucmer, show_coords)
}

fn bin() -> Command {
    Command::cargo_bin("contig-dedup").unwrap()
}

#[test]
fn test_stats_text() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path());

    bin()
        .args(["stats"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Contigs: 3"))
        .stdout(predicate::str::contains("Total length: 1650 bp"))
        .stdout(predicate::str::contains("N50: 1000 bp"));
}

#[test]
fn test_stats_json() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path());

    let output = bin()
        .args(["--format", "json", "stats"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["stats"]["num_contigs"], 3);
    assert_eq!(json["stats"]["longest"], 1000);
}

#[test]
fn test_stats_rejects_empty_input() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("empty.fasta");
    fs::write(&input, "").unwrap();

    bin()
        .arg("stats")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No sequences found"));
}

#[test]
fn test_rmdup_missing_aligner() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path());
    let out = dir.path().join("cleaned.fasta");

    bin()
        .arg("rmdup")
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&out)
        .args(["--minimap2", "no-such-minimap2-binary"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing dependency"));

    assert!(!out.exists());
}

#[test]
fn test_rmdup_missing_nucmer() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path());
    let out = dir.path().join("cleaned.fasta");

    bin()
        .arg("rmdup")
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&out)
        .args(["--method", "mummer", "--nucmer", "no-such-nucmer-binary"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no-such-nucmer-binary"));

    assert!(!out.exists());
}

#[test]
fn test_rmdup_rejects_bad_threshold() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path());

    bin()
        .arg("rmdup")
        .arg("-i")
        .arg(&input)
        .args(["-o", "unused.fasta", "--percent-id", "101"])
        .assert()
        .failure();
}

#[cfg(unix)]
#[test]
fn test_rmdup_removes_duplicate_and_short_contigs() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path());
    let out = dir.path().join("cleaned.fasta");
    let work = dir.path().join("scratch");

    bin()
        .arg("rmdup")
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&out)
        .arg("--minimap2")
        .arg(fake_minimap2(dir.path()))
        .arg("--workdir")
        .arg(&work)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "3 input contigs; 2 larger than 500 bp; 1 duplicated; 1 written to file",
        ));

    let cleaned = fs::read_to_string(&out).unwrap();
    assert!(cleaned.starts_with(">A\n"));
    assert!(!cleaned.contains(">B"));
    assert!(!cleaned.contains(">C"));
    assert!(cleaned.lines().skip(1).all(|line| line.len() <= 80));

    // Scratch files are removed after each alignment
    assert_eq!(fs::read_dir(&work).unwrap().count(), 0);
}

#[cfg(unix)]
#[test]
fn test_rmdup_json_summary() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path());
    let out = dir.path().join("cleaned.fasta");

    let output = bin()
        .args(["-f", "json", "rmdup"])
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&out)
        .arg("--minimap2")
        .arg(fake_minimap2(dir.path()))
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let summary = &json["summary"];
    assert_eq!(summary["duplicated"], 1);
    assert_eq!(summary["too_short"], 1);
    assert_eq!(summary["written"], 1);
    assert_eq!(summary["duplicates"][0]["name"], "B");
    assert_eq!(summary["duplicates"][0]["target"], "A");
}

#[cfg(unix)]
#[test]
fn test_rmdup_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path());
    let aligner = fake_minimap2(dir.path());

    let mut outputs = Vec::new();
    for name in ["first.fasta", "second.fasta"] {
        let out = dir.path().join(name);
        bin()
            .arg("rmdup")
            .arg("-i")
            .arg(&input)
            .arg("-o")
            .arg(&out)
            .arg("--minimap2")
            .arg(&aligner)
            .args(["--line-width", "60"])
            .assert()
            .success();
        outputs.push(fs::read(&out).unwrap());
    }

    assert_eq!(outputs[0], outputs[1]);
}

#[cfg(unix)]
#[test]
fn test_rmdup_with_mummer() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path());
    let out = dir.path().join("cleaned.fasta");
    let work = dir.path().join("scratch");
    let (nucmer, show_coords) = fake_mummer(dir.path());

    bin()
        .arg("rmdup")
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&out)
        .args(["--method", "mummer"])
        .arg("--nucmer")
        .arg(&nucmer)
        .arg("--show-coords")
        .arg(&show_coords)
        .arg("--workdir")
        .arg(&work)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "3 input contigs; 2 larger than 500 bp; 1 duplicated; 1 written to file",
        ));

    let cleaned = fs::read_to_string(&out).unwrap();
    assert!(cleaned.starts_with(">A\n"));
    assert!(!cleaned.contains(">B"));
    assert_eq!(fs::read_dir(&work).unwrap().count(), 0);
}

#[cfg(unix)]
#[test]
fn test_rmdup_aligner_failure_leaves_no_output() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path());
    let out = dir.path().join("cleaned.fasta");
    let broken = dir.path().join("broken-minimap2");
    executable(&broken, "#!/bin/sh\necho 'index failed' >&2\nexit 1\n");

    bin()
        .arg("rmdup")
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&out)
        .arg("--minimap2")
        .arg(&broken)
        .assert()
        .failure()
        .stderr(predicate::str::contains("index failed"));

    assert!(!out.exists());
    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .filter(|name| name.to_string_lossy().starts_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}
