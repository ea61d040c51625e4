use tempfile::TempDir;

mod common;

#[test]
fn login_persists_until_logout() {
    let data_dir = TempDir::new().expect("temp dir");

    let stdout = common::run_ok(&data_dir, &["session", "show"]);
    assert!(stdout.contains("Not logged in"));

    let stdout = common::run_ok(
        &data_dir,
        &["session", "login", "--email", "a@b.com", "--password", "x"],
    );
    assert!(stdout.contains("Logged in as a <a@b.com>"), "stdout:\n{stdout}");

    let stdout = common::run_ok(&data_dir, &["session", "show"]);
    assert!(stdout.contains("Hello, a <a@b.com>"), "stdout:\n{stdout}");

    common::run_ok(&data_dir, &["session", "logout"]);
    let stdout = common::run_ok(&data_dir, &["session", "show"]);
    assert!(stdout.contains("Not logged in"));
}

#[test]
fn signup_rejects_short_password() {
    let data_dir = TempDir::new().expect("temp dir");
    let output = common::run(
        &data_dir,
        &[
            "session",
            "signup",
            "--name",
            "Ann",
            "--email",
            "ann@shop.example",
            "--password",
            "12345",
        ],
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Password must be at least 6 characters"),
        "stderr:\n{stderr}"
    );

    let stdout = common::run_ok(&data_dir, &["session", "show"]);
    assert!(stdout.contains("Not logged in"));
}

#[test]
fn ephemeral_mode_leaves_no_database() {
    let data_dir = TempDir::new().expect("temp dir");
    let output = common::base_cmd(&data_dir)
        .arg("--ephemeral")
        .args(["session", "login", "--email", "a@b.com", "--password", "x"])
        .output()
        .expect("spawn revisit");
    assert!(output.status.success());
    assert!(!data_dir.path().join("revisit.sqlite").exists());

    let stdout = common::run_ok(&data_dir, &["session", "show"]);
    assert!(stdout.contains("Not logged in"));
}
