use comfy_table::{Cell, Table};

use crate::db::get_connection;
use crate::error::Result;
use crate::settings::db_path;

pub fn add(name: &str) -> Result<()> {
    let conn = get_connection(&db_path())?;
    conn.execute("INSERT INTO labels (name) VALUES (?1)", [name])?;
    println!("Added label: {name}");
    Ok(())
}

pub fn list() -> Result<()> {
    let conn = get_connection(&db_path())?;
    let mut stmt = conn.prepare("SELECT id, name FROM labels ORDER BY name")?;
    let rows: Vec<(i64, String)> = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
        .filter_map(|r| r.ok())
        .collect();

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name"]);
    for (id, name) in rows {
        table.add_row(vec![Cell::new(id), Cell::new(name)]);
    }
    println!("Labels\n{table}");
    Ok(())
}
