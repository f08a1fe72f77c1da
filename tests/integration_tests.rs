//! Integration tests for the stockroom CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper to get a stockroom command isolated from the user's environment
fn stockroom(tmp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("stockroom").unwrap();
    cmd.current_dir(tmp.path())
        .env("XDG_CONFIG_HOME", tmp.path().join("xdg"))
        .env_remove("STOCKROOM_DB")
        .env_remove("STOCKROOM_LOG");
    cmd
}

/// Helper to create an initialized workspace in a temp directory
fn setup_workspace() -> TempDir {
    let tmp = TempDir::new().unwrap();
    stockroom(&tmp).arg("init").assert().success();
    tmp
}

/// Helper to add an item
fn add_item(tmp: &TempDir, name: &str, quantity: &str, price: &str) {
    stockroom(tmp)
        .args(["item", "add", "--name", name, "--quantity", quantity, "--price", price])
        .assert()
        .success();
}

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    let tmp = TempDir::new().unwrap();
    stockroom(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("inventory"));
}

#[test]
fn test_version_displays() {
    let tmp = TempDir::new().unwrap();
    stockroom(&tmp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("stockroom"));
}

#[test]
fn test_unknown_command_fails() {
    let tmp = TempDir::new().unwrap();
    stockroom(&tmp)
        .arg("unknown-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

// ============================================================================
// Init Command Tests
// ============================================================================

#[test]
fn test_init_creates_workspace_and_database() {
    let tmp = TempDir::new().unwrap();

    stockroom(&tmp)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized stockroom workspace"));

    assert!(tmp.path().join(".stockroom/config.yaml").is_file());
    assert!(tmp.path().join(".stockroom/inventory.db").is_file());
}

#[test]
fn test_init_twice_keeps_data() {
    let tmp = setup_workspace();
    add_item(&tmp, "Widget", "3", "1.50");

    stockroom(&tmp)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    stockroom(&tmp)
        .args(["item", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Widget"));
}

#[test]
fn test_commands_outside_workspace_fail() {
    let tmp = TempDir::new().unwrap();

    stockroom(&tmp)
        .args(["item", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a stockroom workspace"));
}

#[test]
fn test_db_flag_works_without_workspace() {
    let tmp = TempDir::new().unwrap();
    let db = tmp.path().join("elsewhere/stock.db");
    let db = db.to_str().unwrap();

    stockroom(&tmp)
        .args(["--db", db, "item", "add", "--name", "Bolt", "--quantity", "7", "--price", "0.10"])
        .assert()
        .success();

    stockroom(&tmp)
        .args(["--db", db, "item", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bolt"));
}

// ============================================================================
// Item Command Tests
// ============================================================================

#[test]
fn test_item_add_reports_new_id() {
    let tmp = setup_workspace();

    stockroom(&tmp)
        .args(["item", "add", "--name", "Widget", "--quantity", "12", "--price", "4.99"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added item 1 Widget"));
}

#[test]
fn test_item_list_shows_added_items() {
    let tmp = setup_workspace();
    add_item(&tmp, "Widget", "12", "4.99");
    add_item(&tmp, "Gadget", "2", "10");

    stockroom(&tmp)
        .args(["item", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Widget"))
        .stdout(predicate::str::contains("Gadget"))
        .stdout(predicate::str::contains("2 item(s) found"));
}

#[test]
fn test_item_list_search_is_case_insensitive() {
    let tmp = setup_workspace();
    add_item(&tmp, "Hex Bolt", "12", "0.20");
    add_item(&tmp, "Washer", "100", "0.05");

    stockroom(&tmp)
        .args(["item", "list", "--search", "bolt", "-f", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hex Bolt"))
        .stdout(predicate::str::contains("Washer").not());
}

#[test]
fn test_item_list_count_and_low_stock() {
    let tmp = setup_workspace();
    add_item(&tmp, "A", "5", "2.00");
    add_item(&tmp, "B", "20", "1.50");

    stockroom(&tmp)
        .args(["item", "list", "--count"])
        .assert()
        .success()
        .stdout("2\n");

    stockroom(&tmp)
        .args(["item", "list", "--low-stock", "-f", "id"])
        .assert()
        .success()
        .stdout("1\n");
}

#[test]
fn test_item_add_rejects_blank_name() {
    let tmp = setup_workspace();

    stockroom(&tmp)
        .args(["item", "add", "--name", "   ", "--quantity", "1", "--price", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("name cannot be empty"));
}

#[test]
fn test_item_add_rejects_bad_numbers() {
    let tmp = setup_workspace();

    stockroom(&tmp)
        .args(["item", "add", "--name", "Widget", "--quantity", "lots", "--price", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("quantity must be a valid whole number"));

    stockroom(&tmp)
        .args(["item", "add", "--name", "Widget", "--quantity", "-3", "--price", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("quantity cannot be negative"));

    stockroom(&tmp)
        .args(["item", "list", "--count"])
        .assert()
        .success()
        .stdout("0\n");
}

#[test]
fn test_huge_quantities_keep_dashboard_working() {
    let tmp = setup_workspace();

    stockroom(&tmp)
        .args(["item", "add", "--name", "Huge", "--quantity", "9223372036854775807", "--price", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("quantity must be a valid whole number"));

    add_item(&tmp, "Bulk A", "2147483647", "1");
    add_item(&tmp, "Bulk B", "2147483647", "1");

    stockroom(&tmp)
        .args(["dashboard", "-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total_stock_quantity\": 4294967294"))
        .stdout(predicate::str::contains("\"total_inventory_value_display\": \"$4,294,967,294.00\""));
}

#[test]
fn test_item_list_reverse_and_limit() {
    let tmp = setup_workspace();
    add_item(&tmp, "A", "1", "1");
    add_item(&tmp, "B", "1", "1");
    add_item(&tmp, "C", "1", "1");

    stockroom(&tmp)
        .args(["item", "list", "-r", "-n", "2", "-f", "id"])
        .assert()
        .success()
        .stdout("3\n2\n");
}

#[test]
fn test_item_update_keeps_unspecified_fields() {
    let tmp = setup_workspace();
    add_item(&tmp, "Widget", "12", "4.99");

    stockroom(&tmp)
        .args(["item", "update", "1", "--quantity", "50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated item 1"));

    stockroom(&tmp)
        .args(["item", "show", "1", "-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"quantity\": 50"))
        .stdout(predicate::str::contains("\"name\": \"Widget\""));
}

#[test]
fn test_item_update_unknown_id_fails() {
    let tmp = setup_workspace();

    stockroom(&tmp)
        .args(["item", "update", "99", "--name", "Ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No item with id 99"));
}

#[test]
fn test_item_delete_removes_row() {
    let tmp = setup_workspace();
    add_item(&tmp, "Keep", "1", "1");
    add_item(&tmp, "Drop", "1", "1");

    stockroom(&tmp)
        .args(["item", "delete", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted item 2 Drop"));

    stockroom(&tmp)
        .args(["item", "list", "-f", "id"])
        .assert()
        .success()
        .stdout("1\n");
}

// ============================================================================
// Supplier Command Tests
// ============================================================================

#[test]
fn test_supplier_lifecycle() {
    let tmp = setup_workspace();

    stockroom(&tmp)
        .args([
            "sup", "add", "--name", "Acme", "--contact", "Wile E.", "--email", "wile@acme.test",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added supplier 1 Acme"));

    stockroom(&tmp)
        .args(["sup", "list", "-f", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1,Acme,Wile E.,wile@acme.test,"));

    stockroom(&tmp)
        .args(["sup", "update", "1", "--phone", "555-0100", "--email", ""])
        .assert()
        .success();

    stockroom(&tmp)
        .args(["sup", "show", "1", "-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"phone\": \"555-0100\""))
        .stdout(predicate::str::contains("\"email\": null"));

    stockroom(&tmp)
        .args(["sup", "delete", "1"])
        .assert()
        .success();

    stockroom(&tmp)
        .args(["sup", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No suppliers found."));
}

#[test]
fn test_supplier_requires_name() {
    let tmp = setup_workspace();

    stockroom(&tmp)
        .args(["sup", "add", "--email", "nobody@example.test"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("supplier name cannot be empty"));
}

// ============================================================================
// Dashboard Command Tests
// ============================================================================

#[test]
fn test_dashboard_totals() {
    let tmp = setup_workspace();
    add_item(&tmp, "A", "5", "2.00");
    add_item(&tmp, "B", "20", "1.50");

    stockroom(&tmp)
        .args(["dashboard", "-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total_unique_items\": 2"))
        .stdout(predicate::str::contains("\"total_stock_quantity\": 25"))
        .stdout(predicate::str::contains("\"total_inventory_value_display\": \"$40.00\""))
        .stdout(predicate::str::contains("A (Qty: 5)"))
        .stdout(predicate::str::contains("B (Qty: 20)").not());
}

#[test]
fn test_dashboard_human_output() {
    let tmp = setup_workspace();
    add_item(&tmp, "Widget", "3", "10");

    stockroom(&tmp)
        .arg("dashboard")
        .assert()
        .success()
        .stdout(predicate::str::contains("Inventory Dashboard"))
        .stdout(predicate::str::contains("$30.00"))
        .stdout(predicate::str::contains("Widget (Qty: 3)"));
}

#[test]
fn test_dashboard_empty_inventory() {
    let tmp = setup_workspace();

    stockroom(&tmp)
        .arg("dashboard")
        .assert()
        .success()
        .stdout(predicate::str::contains("$0.00"))
        .stdout(predicate::str::contains("All items are sufficiently stocked"));
}

#[test]
fn test_completions_generate() {
    let tmp = TempDir::new().unwrap();
    stockroom(&tmp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stockroom"));
}
