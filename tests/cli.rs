use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn kasboek(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("kasboek").unwrap();
    cmd.env("KASBOEK_DATA_DIR", data_dir);
    cmd
}

fn init(data_dir: &Path) {
    kasboek(data_dir).arg("init").assert().success();
}

const HEADER: &str = "Reference;Account Number;Transaction Date;Value Date;Booking Date;\
Currency;Debit Credit;Amount;Counterparty Account;Counterparty Holder;Payment Method;\
Description;Payment Type;Mandate Number;Creditor ID;Address";

fn write_statement(dir: &Path, name: &str, rows: &[(&str, &str, &str, &str)]) -> std::path::PathBuf {
    let path = dir.join(name);
    let mut content = format!("{HEADER}\n");
    for (reference, date, amount, holder) in rows {
        content.push_str(&format!(
            "{reference};NL01BANK0123456789;{date};{date};{date};EUR;D;{amount};;{holder};iDEAL;test payment;;;;\n"
        ));
    }
    std::fs::write(&path, &content).unwrap();
    path
}

fn sample_statement(dir: &Path) -> std::path::PathBuf {
    write_statement(
        dir,
        "statement.csv",
        &[
            ("R1", "15-01-2025", "100,00", "Albert Heijn"),
            ("R2", "16-01-2025", "60,00", "Shell"),
            ("R3", "17-01-2025", "9,99", "Netflix"),
        ],
    )
}

#[test]
fn import_and_reimport_are_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    init(dir.path());
    let stmt = sample_statement(dir.path());

    kasboek(dir.path())
        .args(["import", stmt.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 imported, 0 rules applied, 0 skipped"));

    kasboek(dir.path())
        .args(["import", stmt.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 imported, 0 rules applied, 3 skipped"))
        .stdout(predicate::str::contains("Already present: R1, R2, R3"));
}

#[test]
fn rule_is_applied_during_import() {
    let dir = tempfile::tempdir().unwrap();
    init(dir.path());
    kasboek(dir.path())
        .args(["rules", "add", "Shell", "--category", "Transport"])
        .assert()
        .success();

    let stmt = sample_statement(dir.path());
    kasboek(dir.path())
        .args(["import", stmt.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 imported, 1 rules applied, 0 skipped"));
}

#[test]
fn apply_rules_reclassifies_existing_transactions() {
    let dir = tempfile::tempdir().unwrap();
    init(dir.path());
    let stmt = sample_statement(dir.path());
    kasboek(dir.path())
        .args(["import", stmt.to_str().unwrap()])
        .assert()
        .success();

    kasboek(dir.path())
        .args(["rules", "add", "Netflix", "--category", "Subscriptions"])
        .assert()
        .success();
    kasboek(dir.path())
        .arg("apply-rules")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rules applied to 1 transactions"));
}

#[test]
fn split_replaces_transaction() {
    let dir = tempfile::tempdir().unwrap();
    init(dir.path());
    let stmt = sample_statement(dir.path());
    kasboek(dir.path())
        .args(["import", stmt.to_str().unwrap()])
        .assert()
        .success();

    // R1 imported first, so it holds id 1.
    kasboek(dir.path())
        .args(["split", "1", "--part", "40,00:Groceries", "--part", "40,00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted transaction 1"))
        .stdout(predicate::str::contains("1.1 R1.1 40.00"))
        .stdout(predicate::str::contains("1.2 R1.2 40.00"));
}

#[test]
fn split_part_spec_allows_empty_segments() {
    let dir = tempfile::tempdir().unwrap();
    init(dir.path());
    let stmt = sample_statement(dir.path());
    kasboek(dir.path())
        .args(["import", stmt.to_str().unwrap()])
        .assert()
        .success();
    kasboek(dir.path())
        .args(["labels", "add", "household"])
        .assert()
        .success();

    // Empty category segment, label and person still land on the child.
    kasboek(dir.path())
        .args([
            "split",
            "1",
            "--part",
            "30,00::household:Anna",
            "--part",
            "30,00:Groceries",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("1.1 R1.1 30.00"))
        .stdout(predicate::str::contains("1.2 R1.2 30.00"));
}

#[test]
fn split_rejects_over_allocation() {
    let dir = tempfile::tempdir().unwrap();
    init(dir.path());
    let stmt = sample_statement(dir.path());
    kasboek(dir.path())
        .args(["import", stmt.to_str().unwrap()])
        .assert()
        .success();

    kasboek(dir.path())
        .args(["split", "2", "--part", "45,00", "--part", "45,00"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid split"));

    kasboek(dir.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Transactions:   3"));
}

#[test]
fn import_with_delete_after_removes_file() {
    let dir = tempfile::tempdir().unwrap();
    init(dir.path());
    let stmt = sample_statement(dir.path());

    kasboek(dir.path())
        .args(["import", stmt.to_str().unwrap(), "--delete-after"])
        .assert()
        .success();
    assert!(!stmt.exists());
}

#[test]
fn classify_updates_one_transaction() {
    let dir = tempfile::tempdir().unwrap();
    init(dir.path());
    let stmt = sample_statement(dir.path());
    kasboek(dir.path())
        .args(["import", stmt.to_str().unwrap()])
        .assert()
        .success();

    kasboek(dir.path())
        .args(["labels", "add", "household"])
        .assert()
        .success();
    kasboek(dir.path())
        .args([
            "transactions",
            "classify",
            "1",
            "--category",
            "Groceries",
            "--label",
            "household",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated transaction 1"));

    kasboek(dir.path())
        .args(["transactions", "classify", "999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Transaction not found"));
}

#[test]
fn unknown_category_is_a_client_error() {
    let dir = tempfile::tempdir().unwrap();
    init(dir.path());
    kasboek(dir.path())
        .args(["rules", "add", "Shell", "--category", "Nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown category: Nope"));
}
