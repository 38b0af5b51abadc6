use crate::db::get_connection;
use crate::error::Result;
use crate::settings::{db_path, get_data_dir};

pub fn run() -> Result<()> {
    let data_dir = get_data_dir();
    let db = db_path();

    println!("Data dir:   {}", data_dir.display());
    println!("Database:   {}", db.display());

    if db.exists() {
        let conn = get_connection(&db)?;

        let transactions: i64 =
            conn.query_row("SELECT count(*) FROM transactions", [], |r| r.get(0))?;
        let uncategorized: i64 = conn.query_row(
            "SELECT count(*) FROM transactions WHERE category_id IS NULL",
            [],
            |r| r.get(0),
        )?;
        let rules: i64 = conn.query_row("SELECT count(*) FROM rules", [], |r| r.get(0))?;
        let categories: i64 = conn.query_row("SELECT count(*) FROM categories", [], |r| r.get(0))?;
        let labels: i64 = conn.query_row("SELECT count(*) FROM labels", [], |r| r.get(0))?;

        println!();
        println!("Transactions:   {transactions}");
        println!("Uncategorized:  {uncategorized}");
        println!("Rules:          {rules}");
        println!("Categories:     {categories}");
        println!("Labels:         {labels}");
    } else {
        println!();
        println!("Database not found. Run `kasboek init` to set up.");
    }

    Ok(())
}
