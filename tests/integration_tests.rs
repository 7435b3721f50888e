//! Integration tests for the inv CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get an inv command isolated from the user's config and env
fn inv() -> Command {
    let mut cmd = Command::cargo_bin("inv").unwrap();
    cmd.env_remove("INV_FORMAT")
        .env_remove("INV_EMPTY")
        .env_remove("INV_LOG")
        .env("XDG_CONFIG_HOME", "/nonexistent/inv-test-config");
    cmd
}

/// Helper to run a scripted shell session and return (stdout, stderr)
///
/// `global` goes before the `shell` subcommand and `shell_args` after it.
fn run_shell(global: &[&str], shell_args: &[&str], script: &str) -> (String, String) {
    let output = inv()
        .args(global)
        .arg("shell")
        .args(shell_args)
        .write_stdin(script)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "shell exited with {}: {}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
    )
}

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    inv()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("part"))
        .stdout(predicate::str::contains("product"))
        .stdout(predicate::str::contains("shell"));
}

#[test]
fn test_version_displays() {
    inv()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("inv"));
}

#[test]
fn test_unknown_command_fails() {
    inv().arg("frobnicate").assert().failure();
}

#[test]
fn test_completions_bash() {
    inv()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("inv"));
}

// ============================================================================
// Part Command Tests
// ============================================================================

#[test]
fn test_part_list_seed_csv() {
    inv()
        .args(["part", "list", "-f", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "id,name,stock,price,min,max,source,detail\n",
        ))
        .stdout(predicate::str::contains(
            "1,Frame,20,25.00,1,100,outsourced,Bike Frame Superstore",
        ))
        .stdout(predicate::str::contains("2,Large Tires,56,12.99,1,999,in-house,1223"))
        .stdout(predicate::str::contains("3,Small Tires,33,4.99,1,270,in-house,1224"));
}

#[test]
fn test_part_list_tsv_summary() {
    inv()
        .args(["part", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("NAME"))
        .stdout(predicate::str::contains("3 part(s) found."));
}

#[test]
fn test_part_list_search_is_case_insensitive() {
    inv()
        .args(["part", "list", "--search", "TIRE", "-f", "id"])
        .assert()
        .success()
        .stdout("2\n3\n");
}

#[test]
fn test_part_list_search_falls_back_to_id() {
    inv()
        .args(["part", "list", "-s", "3", "-f", "id"])
        .assert()
        .success()
        .stdout("3\n");
}

#[test]
fn test_part_list_search_not_found() {
    inv()
        .args(["part", "list", "-s", "sprocket"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Part not found"));
}

#[test]
fn test_part_list_count_and_limit() {
    inv()
        .args(["part", "list", "--count"])
        .assert()
        .success()
        .stdout("3\n");

    inv()
        .args(["part", "list", "--limit", "1", "-f", "id"])
        .assert()
        .success()
        .stdout("1\n");
}

#[test]
fn test_part_show_pretty() {
    inv()
        .args(["part", "show", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Large Tires"))
        .stdout(predicate::str::contains("Machine ID: 1223"));
}

#[test]
fn test_part_show_json() {
    let output = inv()
        .args(["part", "show", "1", "-f", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["id"], 1);
    assert_eq!(value["name"], "Frame");
    assert_eq!(value["source"], "outsourced");
    assert_eq!(value["company_name"], "Bike Frame Superstore");
}

#[test]
fn test_part_show_missing() {
    inv()
        .args(["part", "show", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No part found with id 99"));
}

#[test]
fn test_part_show_rejects_non_numeric_id() {
    inv().args(["part", "show", "abc"]).assert().failure();
}

#[test]
fn test_part_check_valid() {
    inv()
        .args([
            "part", "check", "--name", "Bolt", "--stock", "5", "--price", "0.25", "--min",
            "1", "--max", "10", "--machine-id", "7", "-f", "yaml",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("passes validation"))
        .stdout(predicate::str::contains("id: 4"))
        .stdout(predicate::str::contains("machine_id: 7"));
}

#[test]
fn test_part_check_name_starting_with_digit() {
    inv()
        .args([
            "part", "check", "--name", "5Volt", "--stock", "5", "--price", "1.00", "--min",
            "1", "--max", "10", "--machine-id", "3",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Name must not begin with a number."))
        .stderr(predicate::str::contains("Inventory must be between").not());
}

#[test]
fn test_part_check_reports_every_violation() {
    inv()
        .args([
            "part", "check", "--stock", "x", "--price", "abc", "--min", "1", "--max", "10",
            "--company-name", "",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Must enter a part name into the Name field.",
        ))
        .stderr(predicate::str::contains(
            "Must enter an integer into the Inventory field.",
        ))
        .stderr(predicate::str::contains(
            "Must enter a double into the Price/Cost field.",
        ))
        .stderr(predicate::str::contains(
            "Must enter a name into the Company Name field.",
        ));
}

#[test]
fn test_part_check_fraction_is_not_a_leading_digit() {
    inv()
        .args([
            "part", "check", "--name", "½ inch washer", "--stock", "5", "--price", "0.10",
            "--min", "1", "--max", "10", "--company-name", "Acme", "-f", "id",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("passes validation"));
}

#[test]
fn test_part_check_from_existing_keeps_id_and_values() {
    inv()
        .args(["part", "check", "--from", "2", "--stock", "5", "-f", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("id: 2"))
        .stdout(predicate::str::contains("name: Large Tires"))
        .stdout(predicate::str::contains("stock: 5"))
        .stdout(predicate::str::contains("machine_id: 1223"));
}

#[test]
fn test_part_check_from_existing_still_validates() {
    inv()
        .args(["part", "check", "--from", "1", "--stock", "500"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Inventory must be between the Min and Max values.",
        ));
}

#[test]
fn test_part_check_from_unknown_id() {
    inv()
        .args(["part", "check", "--from", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No part found with id 99"));
}

#[test]
fn test_part_check_machine_and_company_conflict() {
    inv()
        .args(["part", "check", "--machine-id", "1", "--company-name", "Acme"])
        .assert()
        .failure();
}

// ============================================================================
// Product Command Tests
// ============================================================================

#[test]
fn test_product_list_ids() {
    inv()
        .args(["product", "list", "-f", "id"])
        .assert()
        .success()
        .stdout("1\n2\n");
}

#[test]
fn test_product_show_lists_associated_parts() {
    inv()
        .args(["product", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Adult Bike"))
        .stdout(predicate::str::contains("Associated Parts"))
        .stdout(predicate::str::contains("Large Tires"))
        .stdout(predicate::str::contains("Frame"));

    inv()
        .args(["product", "show", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No associated parts"));
}

#[test]
fn test_product_list_json_keeps_association_order() {
    let output = inv()
        .args(["product", "list", "-f", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let products = value.as_array().unwrap();
    assert_eq!(products.len(), 2);
    let parts = products[0]["associated_parts"].as_array().unwrap();
    assert_eq!(parts[0]["name"], "Large Tires");
    assert_eq!(parts[1]["name"], "Frame");
    assert!(products[1].get("associated_parts").is_none());
}

#[test]
fn test_product_check_stock_out_of_range() {
    inv()
        .args([
            "product", "check", "--name", "Trike", "--stock", "50", "--price", "99", "--min",
            "1", "--max", "10",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Inventory must be between the Min and Max values.",
        ));
}

#[test]
fn test_product_check_max_below_min() {
    inv()
        .args([
            "product", "check", "--name", "Trike", "--stock", "5", "--price", "99", "--min",
            "10", "--max", "1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Max must be greater than the Min."))
        .stderr(predicate::str::contains("Inventory must be between").not());
}

// ============================================================================
// Global Option and Config Tests
// ============================================================================

#[test]
fn test_empty_catalog_flag() {
    inv()
        .args(["--empty", "part", "list", "-f", "id"])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn test_empty_catalog_from_env() {
    inv()
        .env("INV_EMPTY", "1")
        .args(["product", "list", "--count"])
        .assert()
        .success()
        .stdout("0\n");
}

#[test]
fn test_format_from_env() {
    inv()
        .env("INV_FORMAT", "id")
        .args(["product", "list"])
        .assert()
        .success()
        .stdout("1\n2\n");
}

#[cfg(target_os = "linux")]
#[test]
fn test_format_from_config_file() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("inventory");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.yaml"), "default_format: csv\n").unwrap();

    inv()
        .env("XDG_CONFIG_HOME", tmp.path())
        .args(["part", "list"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("id,name"));

    // Flags beat the config file
    inv()
        .env("XDG_CONFIG_HOME", tmp.path())
        .args(["part", "list", "-f", "id"])
        .assert()
        .success()
        .stdout("1\n2\n3\n");
}

#[test]
fn test_product_check_from_existing_keeps_associated_parts() {
    let output = inv()
        .args(["product", "check", "--from", "1", "--price", "350", "-f", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let json_start = stdout.find('{').unwrap();
    let value: serde_json::Value = serde_json::from_str(&stdout[json_start..]).unwrap();
    assert_eq!(value["id"], 1);
    assert_eq!(value["name"], "Adult Bike");
    assert_eq!(value["price"], 350.0);
    assert_eq!(value["associated_parts"].as_array().unwrap().len(), 2);
}

// ============================================================================
// Shell Session Tests
// ============================================================================

#[test]
fn test_shell_help() {
    let (stdout, _) = run_shell(&[], &[], "help\n");
    assert!(stdout.contains("select-part"));
    assert!(stdout.contains("delete-product"));
}

#[test]
fn test_shell_add_part_takes_next_id() {
    let (stdout, _) = run_shell(
        &["-f", "id"],
        &["--yes"],
        "add-part --name 'Hex Bolt' --stock 5 --price 0.25 --min 1 --max 10 --machine-id 7\n\
         parts bolt\n",
    );
    assert!(stdout.contains("Added part 4"));
    assert!(stdout.ends_with("4\n"));
}

#[test]
fn test_shell_invalid_add_keeps_sequence() {
    let (stdout, stderr) = run_shell(
        &["-f", "id"],
        &["--yes"],
        "add-part --name 5Volt --stock 5 --price 1 --min 1 --max 10 --machine-id 3\n\
         add-part --name Volt --stock 5 --price 1 --min 1 --max 10 --machine-id 3\n",
    );
    assert!(stderr.contains("1 problem(s) found:"));
    assert!(stderr.contains("Name must not begin with a number."));
    assert!(stdout.contains("Added part 4"));
}

#[test]
fn test_shell_modify_part_keeps_id_and_switches_source() {
    let (stdout, _) = run_shell(
        &[],
        &["--yes"],
        "select-part 1\nmodify-part --machine-id 42 --stock 30\nshow\n",
    );
    assert!(stdout.contains("Updated part 1 Frame"));
    assert!(stdout.contains("Machine ID: 42"));
    assert!(stdout.contains("Inventory: 30"));
    assert!(!stdout.contains("Bike Frame Superstore"));
}

#[test]
fn test_shell_modify_without_selection() {
    let (_, stderr) = run_shell(&[], &["--yes"], "modify-part --stock 3\ndelete-product\n");
    assert!(stderr.contains("No part selected"));
    assert!(stderr.contains("No product selected"));
}

#[test]
fn test_shell_delete_product_blocked_then_allowed() {
    let (stdout, stderr) = run_shell(
        &["-f", "id"],
        &["--yes"],
        "select-product 1\n\
         delete-product\n\
         modify-product --remove-part 2 --remove-part 1\n\
         delete-product\n\
         products\n",
    );
    assert!(stderr.contains("Adult Bike has 2 associated part(s)"));
    assert!(stdout.contains("Updated product 1"));
    assert!(stdout.contains("Deleted product 1"));
    assert!(stdout.ends_with("2\n"));
}

#[test]
fn test_shell_delete_confirmation_declined() {
    let (stdout, _) = run_shell(
        &["-f", "id"],
        &[],
        "select-product 2\ndelete-product\nn\nproducts\n",
    );
    assert!(stdout.contains("Delete product Kids Bike? [y/N]"));
    assert!(stdout.contains("Aborted."));
    assert!(stdout.ends_with("1\n2\n"));
}

#[test]
fn test_shell_add_product_removal_declined() {
    let (stdout, _) = run_shell(
        &["-f", "id"],
        &[],
        "add-product --name Trike --stock 2 --price 150 --min 1 --max 5 --add-part 3 --remove-part 3\n\
         n\n\
         products\n",
    );
    assert!(stdout.contains("Remove 1 associated part(s) from Trike? [y/N]"));
    assert!(stdout.contains("Aborted."));
    assert!(stdout.ends_with("1\n2\n"));
}

#[test]
fn test_shell_delete_part_leaves_product_snapshot() {
    let (stdout, _) = run_shell(
        &[],
        &["--yes"],
        "select-part 2\ndelete-part\nparts tires\nselect-product 1\nshow\n",
    );
    assert!(stdout.contains("Deleted part 2"));
    assert!(stdout.contains("1 part(s) found."));
    // The product keeps its own copy of the deleted part
    assert!(stdout.contains("Large Tires"));
    assert!(stdout.contains("2 associated part(s) found."));
}

#[test]
fn test_shell_add_product_with_parts() {
    let (stdout, _) = run_shell(
        &["-f", "json"],
        &["--yes"],
        "add-product --name Trike --stock 2 --price 150 --min 1 --max 5 --add-part 3 --add-part 3\n\
         products trike\n",
    );
    assert!(stdout.contains("Added product 3"));
    let json_start = stdout.find('[').unwrap();
    let value: serde_json::Value = serde_json::from_str(&stdout[json_start..]).unwrap();
    let parts = value[0]["associated_parts"].as_array().unwrap();
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0]["name"], "Small Tires");
}

#[test]
fn test_shell_unknown_command_continues() {
    let (stdout, stderr) = run_shell(&["-f", "id"], &[], "frobnicate\nproducts\n");
    assert!(stderr.contains("frobnicate"));
    assert!(stdout.ends_with("1\n2\n"));
}

#[test]
fn test_shell_exit_requires_confirmation() {
    let (stdout, _) = run_shell(&["-f", "id"], &[], "exit\nn\nproducts\nexit\ny\nparts\n");
    assert_eq!(stdout.matches("Exit the inventory shell? [y/N]").count(), 2);
    // parts after a confirmed exit never runs
    assert!(stdout.contains("1\n2\n"));
    assert!(!stdout.contains("3\n"));
}
