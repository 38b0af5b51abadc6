use std::path::PathBuf;

use crate::db::get_connection;
use crate::error::Result;
use crate::importer::{import_file, import_upload};
use crate::settings::db_path;

pub fn run(file: &str, delete_after: bool) -> Result<()> {
    let file_path = PathBuf::from(file);
    let conn = get_connection(&db_path())?;

    let summary = if delete_after {
        import_upload(&conn, &file_path)?
    } else {
        import_file(&conn, &file_path)?
    };

    println!(
        "{} imported, {} rules applied, {} skipped",
        summary.transactions_imported, summary.rules_applied, summary.skipped_rows
    );
    if !summary.duplicate_references.is_empty() {
        println!(
            "Already present: {}",
            summary.duplicate_references.join(", ")
        );
    }
    Ok(())
}
