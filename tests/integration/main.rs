//! Integration tests for the seongraph CLI
//!
//! The analysis pipeline itself is exercised in the library crates; these
//! tests cover the binary surface: argument handling, archive inputs, and the
//! empty-result document.

use std::process::Command;

fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_seongraph"))
        .args(args)
        .output()
        .expect("failed to execute seongraph")
}

#[test]
fn help_describes_the_tool() {
    let output = run_cli(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("seongraph"));
    assert!(stdout.contains("ontology"));
}

#[test]
fn missing_arguments_exit_nonzero() {
    let output = run_cli(&[]);
    assert!(!output.status.success());
}

#[test]
fn missing_input_path_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let output_file = dir.path().join("out.rdf");
    let output = run_cli(&[
        "/definitely/not/a/real/path",
        output_file.to_str().unwrap(),
    ]);
    assert!(!output.status.success());
}

#[test]
fn empty_directory_produces_minimal_rdf() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("src");
    std::fs::create_dir(&input).unwrap();
    let output_file = dir.path().join("out.rdf");

    // No supported files anywhere: the language servers are never started,
    // and the output is a well-formed empty document.
    let output = run_cli(&[input.to_str().unwrap(), output_file.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let rdf = std::fs::read_to_string(&output_file).unwrap();
    assert!(rdf.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
    assert!(rdf.contains("xmlns:rdf=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#\""));
    assert!(rdf.contains("xmlns:SEON_code="));
    assert!(rdf.contains("xmlns:ns1=\"http://definitions.moonshot.sep/_#\""));
    assert!(!rdf.contains("rdf:Description"));
}

#[test]
fn zip_input_without_supported_files_produces_minimal_rdf() {
    use std::io::Write;

    let dir = tempfile::tempdir().unwrap();
    let archive_path = dir.path().join("input.zip");
    let file = std::fs::File::create(&archive_path).unwrap();
    let mut archive = zip::ZipWriter::new(file);
    archive
        .start_file("README.md", zip::write::FileOptions::default())
        .unwrap();
    archive.write_all(b"no source code here\n").unwrap();
    archive.finish().unwrap();

    let output_file = dir.path().join("out.rdf");
    let output = run_cli(&[archive_path.to_str().unwrap(), output_file.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let rdf = std::fs::read_to_string(&output_file).unwrap();
    assert!(rdf.contains("<rdf:RDF"));
    assert!(!rdf.contains("rdf:Description"));
}
