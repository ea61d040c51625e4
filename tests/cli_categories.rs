use tempfile::TempDir;

mod common;

#[test]
fn fresh_data_dir_lists_the_six_defaults() {
    let data_dir = TempDir::new().expect("temp dir");
    let stdout = common::run_ok(&data_dir, &["category", "list"]);

    let positions: Vec<_> = [
        "Summer Clothes",
        "Winter Collection",
        "Formal Wear",
        "Casual Outfits",
        "Activewear",
        "Accessories",
    ]
    .into_iter()
    .map(|name| stdout.find(name).unwrap_or_else(|| panic!("{name} missing:\n{stdout}")))
    .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "defaults out of order:\n{stdout}");
    assert!(data_dir.path().join("revisit.sqlite").exists());
}

#[test]
fn added_category_survives_restart() {
    let data_dir = TempDir::new().expect("temp dir");
    common::run_ok(
        &data_dir,
        &[
            "category",
            "add",
            "--name",
            "Shoes",
            "--item-count",
            "8",
            "--image-url",
            "https://img.example/shoes.jpg",
        ],
    );

    let stdout = common::run_ok(&data_dir, &["category", "list", "--search", "sho"]);
    assert!(stdout.contains("Shoes"), "stdout:\n{stdout}");
    assert!(stdout.contains("https://img.example/shoes.jpg"));
    assert_eq!(stdout.lines().count(), 1);
}

#[test]
fn invalid_form_is_rejected_without_writing() {
    let data_dir = TempDir::new().expect("temp dir");
    let output = common::run(
        &data_dir,
        &[
            "category",
            "add",
            "--name",
            "Broken",
            "--item-count",
            "-4",
            "--image-url",
            "https://img.example/x.jpg",
        ],
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Item count must be a positive number"),
        "stderr:\n{stderr}"
    );

    let stdout = common::run_ok(&data_dir, &["category", "list", "--search", "broken"]);
    assert!(stdout.contains("No categories found"));
}

#[test]
fn update_changes_only_the_given_field() {
    let data_dir = TempDir::new().expect("temp dir");
    common::run_ok(&data_dir, &["category", "update", "3", "--item-count", "5"]);

    let stdout = common::run_ok(&data_dir, &["category", "get", "3"]);
    let category: serde_json::Value = serde_json::from_str(&stdout).expect("category json");
    assert_eq!(category["itemCount"], 5);
    assert_eq!(category["name"], "Formal Wear");
}

#[test]
fn delete_twice_is_harmless() {
    let data_dir = TempDir::new().expect("temp dir");
    let first = common::run_ok(&data_dir, &["category", "delete", "2"]);
    let second = common::run_ok(&data_dir, &["category", "delete", "2"]);
    assert!(first.contains("Deleted"));
    assert!(second.contains("nothing deleted"));

    let stdout = common::run_ok(&data_dir, &["category", "list"]);
    assert!(!stdout.contains("Winter Collection"));
}

#[test]
fn reset_restores_defaults() {
    let data_dir = TempDir::new().expect("temp dir");
    common::run_ok(&data_dir, &["category", "delete", "1"]);
    let stdout = common::run_ok(&data_dir, &["--reset", "category", "list"]);
    assert!(stdout.contains("Summer Clothes"));
}
