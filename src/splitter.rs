use rusqlite::Connection;

use crate::error::{KasboekError, Result};
use crate::importer::insert_transaction;
use crate::models::{Classification, SplitOutcome, SplitPart, Transaction};

/// Slack for float representation when checking conservation; a split may
/// under-allocate the original amount but never exceed it.
const AMOUNT_EPSILON: f64 = 1e-9;

pub fn fetch_transaction(conn: &Connection, id: &str) -> Result<Option<Transaction>> {
    let mut stmt = conn.prepare(
        "SELECT id, reference, account_number, transaction_date, value_date, booking_date, \
                currency, debit_credit, amount, counterparty_account, counterparty_holder, \
                payment_method, description, payment_type, mandate_number, creditor_id, \
                address, category_id, label_id, person \
         FROM transactions WHERE id = ?1",
    )?;
    let mut rows = stmt.query_map([id], |row| {
        Ok(Transaction {
            id: row.get(0)?,
            reference: row.get(1)?,
            account_number: row.get(2)?,
            transaction_date: row.get(3)?,
            value_date: row.get(4)?,
            booking_date: row.get(5)?,
            currency: row.get(6)?,
            debit_credit: row.get(7)?,
            amount: row.get(8)?,
            counterparty_account: row.get(9)?,
            counterparty_holder: row.get(10)?,
            payment_method: row.get(11)?,
            description: row.get(12)?,
            payment_type: row.get(13)?,
            mandate_number: row.get(14)?,
            creditor_id: row.get(15)?,
            address: row.get(16)?,
            classification: Classification {
                category_id: row.get(17)?,
                label_id: row.get(18)?,
                person: row.get(19)?,
            },
        })
    })?;
    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

/// Replace one transaction with two or more children whose amounts must
/// not exceed the original. Validation happens before any mutation; the
/// delete and every child insert run inside one database transaction, so a
/// failing child rolls the original back into place.
pub fn split_transaction(
    conn: &mut Connection,
    original_id: &str,
    parts: &[SplitPart],
) -> Result<SplitOutcome> {
    if parts.len() < 2 {
        return Err(KasboekError::InvalidSplit(
            "a split needs at least two parts".to_string(),
        ));
    }
    if let Some(bad) = parts.iter().find(|p| !p.amount.is_finite() || p.amount < 0.0) {
        return Err(KasboekError::InvalidSplit(format!(
            "part amount {} is not a non-negative number",
            bad.amount
        )));
    }

    let original = fetch_transaction(conn, original_id)?
        .ok_or_else(|| KasboekError::TransactionNotFound(original_id.to_string()))?;

    let total: f64 = parts.iter().map(|p| p.amount).sum();
    if total > original.amount + AMOUNT_EPSILON {
        return Err(KasboekError::InvalidSplit(format!(
            "part amounts sum to {total:.2}, exceeding the original {:.2}",
            original.amount
        )));
    }

    let tx = conn.transaction()?;
    tx.execute("DELETE FROM transactions WHERE id = ?1", [original_id])?;

    let mut new_transactions = Vec::with_capacity(parts.len());
    for (index, part) in parts.iter().enumerate() {
        let child_id = format!("{original_id}.{}", index + 1);
        let child = Transaction {
            id: Some(child_id.clone()),
            reference: format!("{}.{}", original.reference, index + 1),
            amount: part.amount,
            classification: part.classification.clone(),
            ..original.clone()
        };
        insert_transaction(&tx, &child_id, &child)?;
        new_transactions.push(child);
    }
    tx.commit()?;

    Ok(SplitOutcome {
        deleted_id: original_id.to_string(),
        new_transactions,
    })
}
