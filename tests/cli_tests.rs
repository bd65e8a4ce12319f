use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn reframe() -> Command {
    let mut cmd = Command::cargo_bin("reframe").unwrap();
    for var in [
        "REFRAME_WORKERS",
        "REFRAME_METHOD",
        "REFRAME_QUALITY",
        "REFRAME_FFMPEG",
        "REFRAME_FFPROBE",
        "REFRAME_TIMEOUT_SECS",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_help_lists_options() {
    reframe()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--method"))
        .stdout(predicate::str::contains("--workers"))
        .stdout(predicate::str::contains("--skip-info"));
}

#[test]
fn test_invalid_worker_count_rejected() {
    reframe()
        .args(["videos", "-w", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("workers"));
}

#[test]
fn test_invalid_method_rejected() {
    reframe()
        .args(["videos", "-m", "stretch"])
        .assert()
        .failure();
}

#[test]
fn test_missing_input_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    reframe()
        .current_dir(dir.path())
        .arg(dir.path().join("does-not-exist"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Input path does not exist"));
}

#[test]
fn test_directory_without_videos_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("notes.txt"), b"not a video").unwrap();
    reframe()
        .current_dir(dir.path())
        .arg(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No video files found"));
}

#[test]
fn test_unknown_config_key_rejected() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("reframe.toml"), "[reframe]\nthreads = 4\n").unwrap();
    reframe()
        .current_dir(dir.path())
        .arg(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid configuration"));
}
