use comfy_table::{Cell, Table};

use crate::db::get_connection;
use crate::error::{KasboekError, Result};
use crate::settings::db_path;

pub fn add(name: &str, icon: Option<&str>, kind: &str) -> Result<()> {
    if kind != "income" && kind != "expense" {
        return Err(KasboekError::Other(format!(
            "Category kind must be 'income' or 'expense', got '{kind}'"
        )));
    }
    let conn = get_connection(&db_path())?;
    conn.execute(
        "INSERT INTO categories (name, icon, kind) VALUES (?1, ?2, ?3)",
        rusqlite::params![name, icon, kind],
    )?;
    println!("Added category: {name}");
    Ok(())
}

pub fn list() -> Result<()> {
    let conn = get_connection(&db_path())?;
    let mut stmt =
        conn.prepare("SELECT id, name, COALESCE(icon, ''), kind FROM categories ORDER BY name")?;
    let rows: Vec<(i64, String, String, String)> = stmt
        .query_map([], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
        })?
        .filter_map(|r| r.ok())
        .collect();

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Icon", "Kind"]);
    for (id, name, icon, kind) in rows {
        table.add_row(vec![Cell::new(id), Cell::new(name), Cell::new(icon), Cell::new(kind)]);
    }
    println!("Categories\n{table}");
    Ok(())
}

/// Deleting a category detaches it from transactions first, so the rows
/// survive with a NULL category.
pub fn delete(id: i64) -> Result<()> {
    let conn = get_connection(&db_path())?;
    conn.execute(
        "UPDATE transactions SET category_id = NULL WHERE category_id = ?1",
        [id],
    )?;
    let deleted = conn.execute("DELETE FROM categories WHERE id = ?1", [id])?;
    if deleted == 0 {
        return Err(KasboekError::Other(format!("No category with ID {id}")));
    }
    println!("Deleted category {id}");
    Ok(())
}
