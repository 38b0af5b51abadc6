use std::collections::HashSet;
use std::io::BufReader;
use std::path::Path;

use rusqlite::Connection;

use crate::db::PARAM_CHUNK;
use crate::error::Result;
use crate::models::{ImportSummary, Transaction};
use crate::normalizer::{normalize_row, Columns};
use crate::rules::prefetch_rules;

// ---------------------------------------------------------------------------
// Duplicate filter
// ---------------------------------------------------------------------------

/// Set-membership lookup for the whole batch: one query per chunk of
/// references, so the round-trip count stays bounded and the placeholder
/// list stays under SQLite's host-parameter limit.
fn existing_references(conn: &Connection, refs: &[String]) -> Result<HashSet<String>> {
    let mut existing = HashSet::new();
    for chunk in refs.chunks(PARAM_CHUNK) {
        let placeholders = vec!["?"; chunk.len()].join(", ");
        let sql =
            format!("SELECT reference FROM transactions WHERE reference IN ({placeholders})");
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(chunk.iter()), |row| {
            row.get::<_, String>(0)
        })?;
        for row in rows {
            existing.insert(row?);
        }
    }
    Ok(existing)
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

/// Surrogate ids are integers rendered as text; split children carry a
/// `<parentId>.<n>` suffix, which CAST truncates back to the parent value.
fn next_id_base(conn: &Connection) -> Result<i64> {
    let max: i64 = conn.query_row(
        "SELECT COALESCE(MAX(CAST(id AS INTEGER)), 0) FROM transactions",
        [],
        |row| row.get(0),
    )?;
    Ok(max)
}

pub fn insert_transaction(
    conn: &Connection,
    id: &str,
    txn: &Transaction,
) -> rusqlite::Result<usize> {
    conn.execute(
        "INSERT INTO transactions (
            id, reference, account_number, transaction_date, value_date, booking_date,
            currency, debit_credit, amount, counterparty_account, counterparty_holder,
            payment_method, description, payment_type, mandate_number, creditor_id,
            address, category_id, label_id, person, imported
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, 1)",
        rusqlite::params![
            id,
            txn.reference,
            txn.account_number,
            txn.transaction_date,
            txn.value_date,
            txn.booking_date,
            txn.currency,
            txn.debit_credit,
            txn.amount,
            txn.counterparty_account,
            txn.counterparty_holder,
            txn.payment_method,
            txn.description,
            txn.payment_type,
            txn.mandate_number,
            txn.creditor_id,
            txn.address,
            txn.classification.category_id,
            txn.classification.label_id,
            txn.classification.person,
        ],
    )
}

// ---------------------------------------------------------------------------
// Import orchestrator
// ---------------------------------------------------------------------------

/// Import one semicolon-delimited statement export.
///
/// Normalizes every row, filters references already in the store (one
/// query), prefetches rules for the surviving holder names (one query),
/// then inserts each survivor on its own: a failing row is counted as
/// skipped and never aborts its siblings. Within-batch duplicates are not
/// pre-filtered; the second occurrence trips the unique reference index at
/// insert time and lands in the skipped count.
pub fn import_file(conn: &Connection, path: &Path) -> Result<ImportSummary> {
    let file = std::fs::File::open(path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .from_reader(BufReader::new(file));
    let cols = Columns::resolve(rdr.headers()?)?;

    let mut summary = ImportSummary::default();
    let mut candidates: Vec<Transaction> = Vec::new();
    for result in rdr.records() {
        let Ok(record) = result else {
            summary.skipped_rows += 1;
            continue;
        };
        match normalize_row(&record, &cols) {
            Some(candidate) => candidates.push(candidate),
            None => summary.skipped_rows += 1,
        }
    }

    let refs: Vec<String> = candidates.iter().map(|c| c.reference.clone()).collect();
    let existing = existing_references(conn, &refs)?;

    let mut holders: Vec<String> = candidates
        .iter()
        .filter(|c| !existing.contains(&c.reference))
        .filter_map(|c| c.counterparty_holder.clone())
        .collect();
    holders.sort();
    holders.dedup();
    let rules_map = prefetch_rules(conn, &holders)?;

    let mut next_id = next_id_base(conn)?;
    for mut txn in candidates {
        if existing.contains(&txn.reference) {
            summary.skipped_rows += 1;
            summary.duplicate_references.push(txn.reference);
            continue;
        }
        let matched = txn
            .counterparty_holder
            .as_ref()
            .and_then(|holder| rules_map.get(holder))
            .cloned();
        if let Some(classification) = matched {
            txn.classification = classification;
            summary.rules_applied += 1;
        }
        next_id += 1;
        match insert_transaction(conn, &next_id.to_string(), &txn) {
            Ok(_) => summary.transactions_imported += 1,
            Err(_) => summary.skipped_rows += 1,
        }
    }

    Ok(summary)
}

/// Import an uploaded statement and release the file afterwards, on both
/// the success and the failure path.
pub fn import_upload(conn: &Connection, path: &Path) -> Result<ImportSummary> {
    let result = import_file(conn, path);
    let _ = std::fs::remove_file(path);
    result
}
