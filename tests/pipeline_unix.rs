#![cfg(unix)]

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use i2p::cli::extension_filters;
use i2p::config::{LaunchConfig, DEFAULT_EXTENSIONS};
use i2p::engine::run_pipeline;
use i2p::errors::I2pError;
use i2p::exec::{conversion_command, listing_command, CommandSpec};
use tempfile::{tempdir, TempDir};

type TestResult = Result<(), Box<dyn Error>>;

/// Stand-in converter: copies the list file to the output path.
const COPY_LIST: &str = r#"cp "$2" "$4""#;

/// Stand-in converter: records its arguments, one per line, in `$0`.
const RECORD_ARGS: &str = r#"printf '%s\n' "$@" > "$0""#;

fn strings(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

/// Run `spec` with `dir` as its working directory.
fn in_dir(dir: &Path, spec: &CommandSpec) -> CommandSpec {
    CommandSpec::new("sh")
        .args(["-c", r#"cd "$0" && exec "$@""#])
        .arg(dir.to_string_lossy())
        .arg(spec.program())
        .args(spec.arguments().iter().cloned())
}

struct Scratch {
    images: TempDir,
    work: TempDir,
}

impl Scratch {
    fn new(files: &[&str]) -> Result<Self, Box<dyn Error>> {
        let images = tempdir()?;
        for name in files {
            fs::write(images.path().join(name), b"")?;
        }
        Ok(Self {
            images,
            work: tempdir()?,
        })
    }

    fn list_file(&self) -> PathBuf {
        self.work.path().join(".i2p0000beef")
    }

    fn output_file(&self) -> PathBuf {
        self.work.path().join("out.pdf")
    }

    fn launch(
        &self,
        extensions: &[&str],
        converter: &[&str],
        passthrough: &[&str],
        chunk_size: usize,
    ) -> Result<LaunchConfig, Box<dyn Error>> {
        let defaults = strings(DEFAULT_EXTENSIONS);
        let (filters, _) = extension_filters(&strings(extensions), &defaults);

        Ok(LaunchConfig {
            listing: in_dir(self.images.path(), &listing_command(&filters)),
            conversion: conversion_command(
                &strings(converter),
                &self.list_file(),
                &self.output_file(),
                &strings(passthrough),
            )?,
            list_file: self.list_file(),
            output_file: self.output_file(),
            chunk_size,
        })
    }
}

#[tokio::test]
async fn matching_files_are_listed_sorted_and_converted() -> TestResult {
    let scratch = Scratch::new(&["b.png", "a.jpg", "notes.txt", ".hidden.jpg"])?;
    fs::create_dir(scratch.images.path().join("dir.jpg"))?;

    let launch = scratch.launch(&["jpg", "png"], &["sh", "-c", COPY_LIST, "sh"], &[], 512)?;
    let report = run_pipeline(&launch).await?;

    assert_eq!(report.list.records, 2);
    assert!(report.conversion_status.success());
    assert_eq!(fs::read(scratch.output_file())?, b"a.jpg\0b.png\0");
    assert!(!scratch.list_file().exists());
    Ok(())
}

#[tokio::test]
async fn symlinked_images_are_listed() -> TestResult {
    let scratch = Scratch::new(&["a.jpg"])?;
    let elsewhere = tempdir()?;
    let target = elsewhere.path().join("real.jpg");
    fs::write(&target, b"")?;
    std::os::unix::fs::symlink(&target, scratch.images.path().join("b.jpg"))?;
    std::os::unix::fs::symlink(elsewhere.path(), scratch.images.path().join("c.jpg"))?;

    let launch = scratch.launch(&["jpg"], &["sh", "-c", COPY_LIST, "sh"], &[], 512)?;
    run_pipeline(&launch).await?;

    assert_eq!(fs::read(scratch.output_file())?, b"a.jpg\0b.jpg\0");
    Ok(())
}

#[tokio::test]
async fn extensions_match_case_insensitively() -> TestResult {
    let scratch = Scratch::new(&["SCAN.JPG", "cover.Png"])?;

    let launch = scratch.launch(&["jpg", "png"], &["sh", "-c", COPY_LIST, "sh"], &[], 512)?;
    run_pipeline(&launch).await?;

    assert_eq!(fs::read(scratch.output_file())?, b"SCAN.JPG\0cover.Png\0");
    Ok(())
}

#[tokio::test]
async fn long_listing_survives_tiny_chunks() -> TestResult {
    let names: Vec<String> = (0..50).map(|i| format!("page-{i:03}.jpg")).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let scratch = Scratch::new(&refs)?;

    let launch = scratch.launch(&["jpg"], &["sh", "-c", COPY_LIST, "sh"], &[], 7)?;
    let report = run_pipeline(&launch).await?;

    let expected: Vec<u8> = names
        .iter()
        .flat_map(|n| n.bytes().chain(std::iter::once(0)))
        .collect();
    assert_eq!(report.list.records, 50);
    assert_eq!(fs::read(scratch.output_file())?, expected);
    Ok(())
}

#[tokio::test]
async fn no_matches_is_no_input_without_conversion() -> TestResult {
    let scratch = Scratch::new(&["readme.txt"])?;
    let marker = scratch.work.path().join("converter-ran");
    let marker_arg = marker.to_string_lossy().into_owned();

    let launch = scratch.launch(&["jpg"], &["sh", "-c", RECORD_ARGS, marker_arg.as_str()], &[], 512)?;

    for _ in 0..2 {
        let result = run_pipeline(&launch).await;
        assert!(matches!(result, Err(I2pError::NoInput)));
        assert!(!scratch.list_file().exists());
        assert!(!marker.exists());
    }
    Ok(())
}

#[tokio::test]
async fn error_output_before_listing_is_no_input() -> TestResult {
    let scratch = Scratch::new(&[])?;
    let mut launch = scratch.launch(&["jpg"], &["sh", "-c", COPY_LIST, "sh"], &[], 512)?;
    launch.listing = CommandSpec::new("sh").args(["-c", "echo 'File Not Found' >&2; exit 1"]);

    let result = run_pipeline(&launch).await;

    assert!(matches!(result, Err(I2pError::NoInput)));
    assert!(!scratch.list_file().exists());
    assert!(!scratch.output_file().exists());
    Ok(())
}

#[tokio::test]
async fn passthrough_flags_reach_the_converter() -> TestResult {
    let scratch = Scratch::new(&["a.gif"])?;
    let marker = scratch.work.path().join("args");
    let marker_arg = marker.to_string_lossy().into_owned();

    let launch = scratch.launch(
        &["*"],
        &["sh", "-c", RECORD_ARGS, marker_arg.as_str()],
        &["-D", "--pagesize", "A4"],
        512,
    )?;
    run_pipeline(&launch).await?;

    let recorded = fs::read_to_string(&marker)?;
    let lines: Vec<&str> = recorded.lines().collect();
    let list = scratch.list_file().to_string_lossy().into_owned();
    let out = scratch.output_file().to_string_lossy().into_owned();
    assert_eq!(
        lines,
        ["--from-file", list.as_str(), "-o", out.as_str(), "-D", "--pagesize", "A4"]
    );
    Ok(())
}

#[tokio::test]
async fn failing_converter_still_removes_list_file() -> TestResult {
    let scratch = Scratch::new(&["a.jpg"])?;

    let launch = scratch.launch(&["jpg"], &["sh", "-c", "exit 3", "sh"], &[], 512)?;
    let report = run_pipeline(&launch).await?;

    assert_eq!(report.conversion_status.code(), Some(3));
    assert!(!scratch.list_file().exists());
    Ok(())
}

#[tokio::test]
async fn converter_launch_failure_leaves_list_file() -> TestResult {
    let scratch = Scratch::new(&["a.jpg"])?;

    let launch = scratch.launch(&["jpg"], &["/nonexistent/img2pdf"], &[], 512)?;
    let result = run_pipeline(&launch).await;

    match result {
        Err(I2pError::Platform { operation, .. }) => {
            assert_eq!(operation, "conversion CreateProcess")
        }
        other => panic!("expected Platform error, got {other:?}"),
    }
    assert_eq!(fs::read(scratch.list_file())?, b"a.jpg\0");
    Ok(())
}

#[tokio::test]
async fn missing_listing_tool_is_platform_error() -> TestResult {
    let scratch = Scratch::new(&[])?;
    let mut launch = scratch.launch(&["jpg"], &["sh", "-c", COPY_LIST, "sh"], &[], 512)?;
    launch.listing = CommandSpec::new("/nonexistent/lister");

    match run_pipeline(&launch).await {
        Err(I2pError::Platform { operation, .. }) => assert_eq!(operation, "listing CreateProcess"),
        other => panic!("expected Platform error, got {other:?}"),
    }
    Ok(())
}
