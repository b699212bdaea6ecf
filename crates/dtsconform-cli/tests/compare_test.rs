//! End-to-end tests for the compare and batch handlers

use dtsconform::{
    run_batch, run_compare, BatchOptions, CompareOptions, OutputFormat, ReferenceSource,
};
use dtsconform_core::{
    IdentityOracle, MatchPolicy, OracleError, RoleLabels, TableOracle, TypeOracle, TypeRepr,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use std::process::Command;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Identity answers, except that any `bigint` type is beyond the oracle.
struct NoBigint;

impl TypeOracle for NoBigint {
    fn assignable(&self, source: &TypeRepr, target: &TypeRepr) -> Result<bool, OracleError> {
        for ty in [source, target] {
            if ty.text.contains("bigint") {
                return Err(OracleError::Unsupported(ty.text.clone()));
            }
        }
        IdentityOracle.assignable(source, target)
    }
}

fn compare_options(output: Option<PathBuf>, format: OutputFormat) -> CompareOptions {
    CompareOptions {
        candidate: fixture("candidate.d.ts"),
        reference: fixture("reference.d.ts"),
        policy: MatchPolicy::First,
        labels: RoleLabels::predicted_expected(),
        format,
        output,
    }
}

#[test]
fn test_compare_writes_canonical_report() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let output = dir.path().join("reports").join("pad.json");

    let report = run_compare(&compare_options(Some(output.clone()), OutputFormat::Json), &IdentityOracle)?;
    assert!(!report.soundness);
    assert!(!report.completeness);
    assert!(!report.equivalence);

    let written: Value = serde_json::from_str(&fs::read_to_string(&output)?)?;
    assert_eq!(written["policy"], json!("first"));
    assert_eq!(written["candidate"]["label"], json!("predicted"));
    assert_eq!(written["reference"]["exports"], json!(3));
    assert_eq!(
        written["completenessRelation"]["witnesses"],
        json!({ "pad": "pad", "trim": null, "PadOptions": "PadOptions" })
    );
    assert_eq!(
        written["soundnessRelation"]["witnesses"],
        json!({ "pad": "pad", "PadOptions": "PadOptions", "VERSION": null })
    );
    assert_eq!(written["completenessRelation"]["matchedCount"], json!(2));
    assert!(written["candidate"]["fingerprint"]
        .as_str()
        .map_or(false, |f| f.starts_with("sha256:")));
    Ok(())
}

#[test]
fn test_compare_coarse_report_with_all_policy() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let output = dir.path().join("coarse.json");
    let options = CompareOptions {
        policy: MatchPolicy::All,
        labels: RoleLabels::generated_manual(),
        ..compare_options(Some(output.clone()), OutputFormat::Coarse)
    };

    run_compare(&options, &IdentityOracle)?;

    let written: Value = serde_json::from_str(&fs::read_to_string(&output)?)?;
    assert_eq!(
        written,
        json!({
            "generated -> manual": {
                "matched": "2/3",
                "candidates": { "pad": ["pad"], "trim": [], "PadOptions": ["PadOptions"] }
            },
            "manual -> generated": {
                "matched": "2/3",
                "candidates": { "pad": ["pad"], "PadOptions": ["PadOptions"], "VERSION": [] }
            }
        })
    );
    Ok(())
}

#[test]
fn test_missing_input_writes_no_report() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("report.json");
    let options = CompareOptions {
        candidate: dir.path().join("missing.d.ts"),
        ..compare_options(Some(output.clone()), OutputFormat::Json)
    };

    let err = run_compare(&options, &IdentityOracle).unwrap_err();
    assert!(format!("{:#}", err).contains("not found"));
    assert!(!output.exists());
}

#[test]
fn test_batch_skips_failing_candidates() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let candidates = dir.path().join("declarations");
    fs::create_dir_all(candidates.join("usage"))?;
    fs::create_dir_all(candidates.join("docs"))?;
    fs::copy(fixture("reference.d.ts"), candidates.join("usage").join("exact.d.ts"))?;
    fs::copy(fixture("candidate.d.ts"), candidates.join("docs").join("partial.d.ts"))?;
    fs::write(
        candidates.join("docs").join("script.d.ts"),
        "declare function global(): void;\n",
    )?;

    let output = dir.path().join("comparisons");
    let options = BatchOptions {
        candidates,
        reference: ReferenceSource::File(fixture("reference.d.ts")),
        output: output.clone(),
        policy: MatchPolicy::First,
        labels: RoleLabels::predicted_expected(),
        format: OutputFormat::Json,
    };

    let summary = run_batch(&options, &IdentityOracle)?;
    assert_eq!(summary.compared.len(), 2);
    assert_eq!(summary.failed.len(), 1);
    assert!(summary.failed[0].candidate.ends_with("docs/script.d.ts"));
    assert!(summary.failed[0].error.contains("No module symbol"));

    let exact: Value = serde_json::from_str(&fs::read_to_string(output.join("usage").join("exact.json"))?)?;
    assert_eq!(exact["equivalence"], json!(true));
    assert!(output.join("docs").join("partial.json").is_file());
    assert!(!output.join("docs").join("script.json").exists());
    Ok(())
}

#[test]
fn test_batch_with_missing_reference_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let options = BatchOptions {
        candidates: dir.path().to_path_buf(),
        reference: ReferenceSource::Package {
            types_root: dir.path().join("types"),
            package: "@scope/missing".to_string(),
        },
        output: dir.path().join("out"),
        policy: MatchPolicy::First,
        labels: RoleLabels::default(),
        format: OutputFormat::Json,
    };

    let err = run_batch(&options, &IdentityOracle).unwrap_err();
    assert!(format!("{:#}", err).contains("scope__missing"));
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_binary_prints_summary_and_exit_codes() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let output = dir.path().join("report.md");

    let ok = Command::new(env!("CARGO_BIN_EXE_dtsconform"))
        .current_dir(dir.path())
        .arg("compare")
        .arg(fixture("candidate.d.ts"))
        .arg(fixture("reference.d.ts"))
        .args(["--format", "markdown", "--output"])
        .arg(&output)
        .output()?;
    assert!(ok.status.success());
    let stdout = String::from_utf8(ok.stdout)?;
    assert_eq!(
        stdout.lines().collect::<Vec<_>>(),
        vec!["Soundness: 67%", "Completeness: 67%", "Equivalence: 44%"]
    );
    assert!(fs::read_to_string(&output)?.starts_with("# Conformance Report"));

    let failed_output = dir.path().join("never.json");
    let failed = Command::new(env!("CARGO_BIN_EXE_dtsconform"))
        .current_dir(dir.path())
        .arg("compare")
        .arg(dir.path().join("missing.d.ts"))
        .arg(fixture("reference.d.ts"))
        .arg("--output")
        .arg(&failed_output)
        .output()?;
    assert_eq!(failed.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&failed.stderr).contains("not found"));
    assert!(!failed_output.exists());
    Ok(())
}

#[test]
fn test_oracle_failure_writes_no_report() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("report.json");
    let strict = TableOracle::new().strict();

    let err = run_compare(&compare_options(Some(output.clone()), OutputFormat::Json), &strict).unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("Type oracle failed"));
    assert!(message.contains("Unsupported type representation"));
    assert!(!output.exists());
}

#[test]
fn test_batch_skips_candidate_the_oracle_cannot_answer() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let candidates = dir.path().join("declarations").join("usage");
    fs::create_dir_all(&candidates)?;
    fs::copy(fixture("reference.d.ts"), candidates.join("exact.d.ts"))?;
    fs::write(
        candidates.join("wide.d.ts"),
        "export declare function pad(input: string, length: number): string;\nexport declare const big: bigint;\n",
    )?;

    let output = dir.path().join("comparisons");
    let options = BatchOptions {
        candidates: dir.path().join("declarations"),
        reference: ReferenceSource::File(fixture("reference.d.ts")),
        output: output.clone(),
        policy: MatchPolicy::All,
        labels: RoleLabels::generated_manual(),
        format: OutputFormat::Json,
    };

    let summary = run_batch(&options, &NoBigint)?;
    assert_eq!(summary.compared.len(), 1);
    assert!(summary.compared[0].candidate.ends_with("usage/exact.d.ts"));
    assert_eq!(summary.failed.len(), 1);
    assert!(summary.failed[0].candidate.ends_with("usage/wide.d.ts"));
    assert!(summary.failed[0].error.contains("bigint"));

    assert!(output.join("usage").join("exact.json").is_file());
    assert!(!output.join("usage").join("wide.json").exists());
    Ok(())
}

#[test]
fn test_binary_stdout_is_the_report_alone() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;

    let run = Command::new(env!("CARGO_BIN_EXE_dtsconform"))
        .current_dir(dir.path())
        .arg("compare")
        .arg(fixture("candidate.d.ts"))
        .arg(fixture("reference.d.ts"))
        .output()?;
    assert!(run.status.success());

    let report: Value = serde_json::from_slice(&run.stdout)?;
    assert_eq!(report["completenessRelation"]["matchedCount"], json!(2));
    assert_eq!(report["soundnessRelation"]["total"], json!(3));

    let stderr = String::from_utf8(run.stderr)?;
    assert!(stderr.contains("Soundness: 67%"));
    assert!(stderr.contains("Equivalence: 44%"));
    Ok(())
}

#[test]
fn test_binary_oracle_failure_exits_with_error() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("table.json"), r#"{ "pairs": [] }"#)?;
    fs::write(
        dir.path().join("dtsconform.toml"),
        "[oracle]\nkind = \"table\"\ntable = \"table.json\"\nstrict = true\n",
    )?;
    let output = dir.path().join("report.json");

    let run = Command::new(env!("CARGO_BIN_EXE_dtsconform"))
        .current_dir(dir.path())
        .arg("compare")
        .arg(fixture("candidate.d.ts"))
        .arg(fixture("reference.d.ts"))
        .arg("--output")
        .arg(&output)
        .output()?;
    assert_eq!(run.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&run.stderr).contains("Unsupported type representation"));
    assert!(run.stdout.is_empty());
    assert!(!output.exists());
    Ok(())
}
