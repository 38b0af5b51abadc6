use comfy_table::{Cell, Table};

use crate::db::get_connection;
use crate::error::{KasboekError, Result};
use crate::rules::apply_rules;
use crate::settings::db_path;

pub fn add(
    holder: &str,
    category: &str,
    account: Option<&str>,
    label: Option<&str>,
    person: Option<&str>,
) -> Result<()> {
    let conn = get_connection(&db_path())?;

    let category_id: i64 = conn
        .query_row("SELECT id FROM categories WHERE name = ?1", [category], |row| {
            row.get(0)
        })
        .map_err(|_| KasboekError::UnknownCategory(category.to_string()))?;
    let label_id: Option<i64> = match label {
        Some(name) => Some(
            conn.query_row("SELECT id FROM labels WHERE name = ?1", [name], |row| row.get(0))
                .map_err(|_| KasboekError::UnknownLabel(name.to_string()))?,
        ),
        None => None,
    };

    conn.execute(
        "INSERT INTO rules (counterparty_account, counterparty_holder, category_id, label_id, person) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
        rusqlite::params![account, holder, category_id, label_id, person],
    )?;
    println!("Added rule: '{holder}' \u{2192} {category}");
    Ok(())
}

pub fn list() -> Result<()> {
    let conn = get_connection(&db_path())?;
    let mut stmt = conn.prepare(
        "SELECT r.id, r.counterparty_holder, r.counterparty_account, c.name, \
                COALESCE(l.name, ''), COALESCE(r.person, '') \
         FROM rules r \
         JOIN categories c ON r.category_id = c.id \
         LEFT JOIN labels l ON r.label_id = l.id \
         ORDER BY r.id",
    )?;
    let rows: Vec<(i64, String, Option<String>, String, String, String)> = stmt
        .query_map([], |row| {
            Ok((
                row.get(0)?,
                row.get(1)?,
                row.get(2)?,
                row.get(3)?,
                row.get(4)?,
                row.get(5)?,
            ))
        })?
        .filter_map(|r| r.ok())
        .collect();

    let mut table = Table::new();
    table.set_header(vec!["ID", "Holder", "Account", "Category", "Label", "Person"]);
    for (id, holder, account, category, label, person) in rows {
        table.add_row(vec![
            Cell::new(id),
            Cell::new(holder),
            Cell::new(account.unwrap_or_default()),
            Cell::new(category),
            Cell::new(label),
            Cell::new(person),
        ]);
    }
    println!("Rules\n{table}");
    Ok(())
}

pub fn delete(id: i64) -> Result<()> {
    let conn = get_connection(&db_path())?;
    let deleted = conn.execute("DELETE FROM rules WHERE id = ?1", [id])?;
    if deleted == 0 {
        return Err(KasboekError::Other(format!("No rule with ID {id}")));
    }
    println!("Deleted rule {id}");
    Ok(())
}

pub fn apply() -> Result<()> {
    let conn = get_connection(&db_path())?;
    let updated = apply_rules(&conn)?;
    println!("Rules applied to {updated} transactions");
    Ok(())
}
