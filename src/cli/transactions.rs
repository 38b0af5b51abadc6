use comfy_table::{Cell, Table};

use crate::db::get_connection;
use crate::error::{KasboekError, Result};
use crate::settings::db_path;

pub fn uncategorized() -> Result<()> {
    let conn = get_connection(&db_path())?;
    let mut stmt = conn.prepare(
        "SELECT id, transaction_date, COALESCE(counterparty_holder, ''), amount, \
                COALESCE(description, '') \
         FROM transactions WHERE category_id IS NULL \
         ORDER BY transaction_date DESC",
    )?;
    let rows: Vec<(String, String, String, f64, String)> = stmt
        .query_map([], |row| {
            Ok((
                row.get(0)?,
                row.get(1)?,
                row.get(2)?,
                row.get(3)?,
                row.get(4)?,
            ))
        })?
        .filter_map(|r| r.ok())
        .collect();

    let mut table = Table::new();
    table.set_header(vec!["ID", "Date", "Counterparty", "Amount", "Description"]);
    for (id, date, holder, amount, description) in rows {
        table.add_row(vec![
            Cell::new(id),
            Cell::new(date),
            Cell::new(holder),
            Cell::new(format!("{amount:.2}")),
            Cell::new(description),
        ]);
    }
    println!("Uncategorized transactions\n{table}");
    Ok(())
}

/// Update only the classification fields that were provided, leaving the
/// rest untouched.
pub fn classify(
    id: &str,
    category: Option<&str>,
    label: Option<&str>,
    person: Option<&str>,
) -> Result<()> {
    let conn = get_connection(&db_path())?;

    let category_id: Option<i64> = match category {
        Some(name) => Some(
            conn.query_row("SELECT id FROM categories WHERE name = ?1", [name], |row| row.get(0))
                .map_err(|_| KasboekError::UnknownCategory(name.to_string()))?,
        ),
        None => None,
    };
    let label_id: Option<i64> = match label {
        Some(name) => Some(
            conn.query_row("SELECT id FROM labels WHERE name = ?1", [name], |row| row.get(0))
                .map_err(|_| KasboekError::UnknownLabel(name.to_string()))?,
        ),
        None => None,
    };

    let updated = conn.execute(
        "UPDATE transactions SET \
            category_id = COALESCE(?1, category_id), \
            label_id = COALESCE(?2, label_id), \
            person = COALESCE(?3, person) \
         WHERE id = ?4",
        rusqlite::params![category_id, label_id, person, id],
    )?;
    if updated == 0 {
        return Err(KasboekError::TransactionNotFound(id.to_string()));
    }
    println!("Updated transaction {id}");
    Ok(())
}
