#![allow(dead_code)]

use std::process::{Command as ProcCommand, Output};
use tempfile::TempDir;

pub fn base_cmd(data_dir: &TempDir) -> ProcCommand {
    let mut command = ProcCommand::new(env!("CARGO_BIN_EXE_revisit"));
    command
        .env("DOTENV_PATH", data_dir.path().join("no.env"))
        .env("RUST_LOG", "warn")
        .arg("--data-dir")
        .arg(data_dir.path())
        .arg("--latency-ms")
        .arg("0");
    command
}

/// Run `args` against `data_dir` and return stdout, failing loudly otherwise.
pub fn run_ok(data_dir: &TempDir, args: &[&str]) -> String {
    let output = base_cmd(data_dir)
        .args(args)
        .output()
        .expect("spawn revisit");
    assert!(
        output.status.success(),
        "revisit {:?} failed\nstdout:\n{}\nstderr:\n{}",
        args,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn run(data_dir: &TempDir, args: &[&str]) -> Output {
    base_cmd(data_dir)
        .args(args)
        .output()
        .expect("spawn revisit")
}
