use std::error::Error;
use std::fs;
use std::process::{Command, Output};
use tempfile::tempdir;

fn pgm_interlace_command() -> Command {
    Command::new(env!("CARGO_BIN_EXE_pgm-interlace"))
}

fn run(args: &[&str]) -> Result<Output, Box<dyn Error>> {
    Ok(pgm_interlace_command().args(args).output()?)
}

#[test]
fn combine_writes_image_to_stdout() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let first = dir.path().join("0.pgm");
    let second = dir.path().join("1.pgm");
    fs::write(&first, b"P5\n4\n2\n255\nAAAACCCC")?;
    fs::write(&second, b"P5\n# odd rows\n4 2\n255\nBBBBDDDD")?;

    let combine = run(&["combine", first.to_str().unwrap(), second.to_str().unwrap()])?;
    assert!(
        combine.status.success(),
        "combine failed: {}",
        String::from_utf8_lossy(&combine.stderr)
    );
    assert_eq!(combine.stdout, b"P5\n4\n4\n255\nAAAABBBBCCCCDDDD");
    assert!(
        String::from_utf8(combine.stderr)?.contains("Full image size will be 4x4, using 2 slices"),
        "size notice should be on stderr by default"
    );

    Ok(())
}

#[test]
fn split_combine_end_to_end_flow() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let image = dir.path().join("image.pgm");
    let prefix = dir.path().join("part");
    let rebuilt = dir.path().join("rebuilt.pgm");

    let mut bytes = b"P5\n6\n6\n255\n".to_vec();
    bytes.extend((0u8..36).map(|v| v * 7));
    fs::write(&image, &bytes)?;

    let split = run(&[
        "split",
        image.to_str().unwrap(),
        "-n",
        "3",
        "--orientation",
        "columns",
        "-o",
        prefix.to_str().unwrap(),
    ])?;
    assert!(
        split.status.success(),
        "split failed: {}",
        String::from_utf8_lossy(&split.stderr)
    );
    let listed = String::from_utf8(split.stdout)?;
    let parts: Vec<&str> = listed.lines().collect();
    assert_eq!(parts.len(), 3, "split should list every slice: {}", listed);

    let info = run(&["info", parts[0], parts[1], parts[2]])?;
    let info_stdout = String::from_utf8(info.stdout)?;
    assert!(info_stdout.contains("Interlace: columns"));
    assert!(info_stdout.contains("Size: 6x6"));

    let mut args = vec!["combine", "-o", rebuilt.to_str().unwrap()];
    args.extend(parts.iter().copied());
    let combine = run(&args)?;
    assert!(
        combine.status.success(),
        "combine failed: {}",
        String::from_utf8_lossy(&combine.stderr)
    );
    assert!(String::from_utf8(combine.stdout)?.contains("Wrote 6x6 image"));
    assert_eq!(fs::read(&rebuilt)?, bytes);

    Ok(())
}

#[test]
fn mismatched_slice_fails_with_diagnostic() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let first = dir.path().join("0.pgm");
    let second = dir.path().join("1.pgm");
    let output = dir.path().join("out.pgm");
    fs::write(&first, b"P5 4 2 255\nAAAACCCC")?;
    fs::write(&second, b"P5 4 2 100\nBBBBDDDD")?;

    let combine = run(&[
        "combine",
        "-o",
        output.to_str().unwrap(),
        first.to_str().unwrap(),
        second.to_str().unwrap(),
    ])?;
    assert!(!combine.status.success());
    assert!(combine.stdout.is_empty());
    let stderr = String::from_utf8(combine.stderr)?;
    assert!(
        stderr.contains("slice 1"),
        "diagnostic should name the slice: {}",
        stderr
    );
    assert!(!output.exists());

    Ok(())
}

#[test]
fn missing_slice_file_fails() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let first = dir.path().join("0.pgm");
    let missing = dir.path().join("missing.pgm");
    fs::write(&first, b"P5 2 1 255\nab")?;

    let combine = run(&["combine", first.to_str().unwrap(), missing.to_str().unwrap()])?;
    assert!(!combine.status.success());
    assert!(combine.stdout.is_empty());
    assert!(String::from_utf8(combine.stderr)?.contains("missing.pgm"));

    Ok(())
}

#[test]
fn version_flag_prints_build_information() -> Result<(), Box<dyn Error>> {
    let output = run(&["--version"])?;
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert!(
        stdout.starts_with("pgm-interlace "),
        "unexpected version line: {}",
        stdout
    );
    Ok(())
}
