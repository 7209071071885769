/*!
 * Command line tests running the vttmerge binary
 */

use std::fs;
use std::process::{Command, Output};
use anyhow::Result;

use crate::common::{create_temp_dir, create_test_file, SEGMENT_A, SEGMENT_B};

fn vttmerge() -> Command {
    Command::new(env!("CARGO_BIN_EXE_vttmerge"))
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_cli_withSingleArgument_shouldExitWithUsageError() -> Result<()> {
    let temp_dir = create_temp_dir()?;

    let output = vttmerge().arg(temp_dir.path()).output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Usage error"), "stderr: {}", stderr(&output));
    Ok(())
}

#[test]
fn test_cli_withoutArguments_shouldExitWithUsageError() -> Result<()> {
    let output = vttmerge().output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Usage error"));
    Ok(())
}

#[test]
fn test_cli_withThreeArguments_shouldExitWithUsageError() -> Result<()> {
    let temp_dir = create_temp_dir()?;
    let output_file = temp_dir.path().join("merged.vtt");

    let output = vttmerge()
        .arg(temp_dir.path())
        .arg(&output_file)
        .arg("extra")
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Usage error"));
    assert!(!output_file.exists());
    Ok(())
}

#[test]
fn test_cli_withValidSegments_shouldWriteMergedFile() -> Result<()> {
    let temp_dir = create_temp_dir()?;
    let input_dir = temp_dir.path().join("segments");
    fs::create_dir(&input_dir)?;
    create_test_file(&input_dir, "seg1.vtt", SEGMENT_A)?;
    create_test_file(&input_dir, "seg2.vtt", SEGMENT_B)?;
    let output_file = temp_dir.path().join("merged.vtt");

    let output = vttmerge().arg(&input_dir).arg(&output_file).output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let merged = fs::read_to_string(&output_file)?;
    assert!(merged.starts_with("WEBVTT\n\n00:00:01.000 --> 00:00:01.900 align:start\nFirst line"));
    assert!(merged.contains("Second line"));
    assert!(merged.contains("Third line"));
    Ok(())
}

#[test]
fn test_cli_withMalformedSegment_shouldExitWithFailure() -> Result<()> {
    let temp_dir = create_temp_dir()?;
    let input_dir = temp_dir.path().join("segments");
    fs::create_dir(&input_dir)?;
    create_test_file(&input_dir, "seg1.vtt", "NOT A VTT\n")?;
    let output_file = temp_dir.path().join("merged.vtt");

    let output = vttmerge().arg(&input_dir).arg(&output_file).output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(!output_file.exists());
    Ok(())
}

#[test]
fn test_cli_withDirectoryNamedMerge_shouldMergeWhenWrittenAsPath() -> Result<()> {
    let temp_dir = create_temp_dir()?;
    let input_dir = temp_dir.path().join("merge");
    fs::create_dir(&input_dir)?;
    create_test_file(&input_dir, "seg1.vtt", SEGMENT_B)?;

    let output = vttmerge()
        .current_dir(temp_dir.path())
        .args(["./merge", "merged.vtt"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let merged = fs::read_to_string(temp_dir.path().join("merged.vtt"))?;
    assert!(merged.contains("Second line"));
    Ok(())
}

#[test]
fn test_cli_mergeSubcommand_shouldAcceptPositionals() -> Result<()> {
    let temp_dir = create_temp_dir()?;
    let input_dir = temp_dir.path().join("merge");
    fs::create_dir(&input_dir)?;
    create_test_file(&input_dir, "seg1.vtt", SEGMENT_B)?;
    let output_file = temp_dir.path().join("merged.vtt");

    let output = vttmerge().arg("merge").arg(&input_dir).arg(&output_file).output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(output_file.exists());
    Ok(())
}
