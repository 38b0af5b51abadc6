use rusqlite::Connection;

use crate::db::get_connection;
use crate::error::{KasboekError, Result};
use crate::models::{Classification, SplitPart};
use crate::normalizer::parse_amount;
use crate::settings::db_path;
use crate::splitter::split_transaction;

/// Part spec: `AMOUNT[:CATEGORY[:LABEL[:PERSON]]]`, empty segments allowed.
fn parse_part(conn: &Connection, spec: &str) -> Result<SplitPart> {
    let mut segments = spec.splitn(4, ':');
    let raw_amount = segments.next().unwrap_or_default();
    let amount = parse_amount(raw_amount).ok_or_else(|| {
        KasboekError::InvalidSplit(format!("'{raw_amount}' is not a valid part amount"))
    })?;

    fn segment(s: Option<&str>) -> Option<&str> {
        s.map(str::trim).filter(|s| !s.is_empty())
    }
    let category = segment(segments.next());
    let label = segment(segments.next());
    let person = segment(segments.next());

    let category_id = match category {
        Some(name) => Some(
            conn.query_row("SELECT id FROM categories WHERE name = ?1", [name], |row| row.get(0))
                .map_err(|_| KasboekError::UnknownCategory(name.to_string()))?,
        ),
        None => None,
    };
    let label_id = match label {
        Some(name) => Some(
            conn.query_row("SELECT id FROM labels WHERE name = ?1", [name], |row| row.get(0))
                .map_err(|_| KasboekError::UnknownLabel(name.to_string()))?,
        ),
        None => None,
    };

    Ok(SplitPart {
        amount,
        classification: Classification {
            category_id,
            label_id,
            person: person.map(str::to_string),
        },
    })
}

pub fn run(id: &str, specs: &[String]) -> Result<()> {
    let mut conn = get_connection(&db_path())?;

    let parts = specs
        .iter()
        .map(|spec| parse_part(&conn, spec))
        .collect::<Result<Vec<_>>>()?;

    let outcome = split_transaction(&mut conn, id, &parts)?;
    println!("Deleted transaction {}", outcome.deleted_id);
    for child in &outcome.new_transactions {
        println!(
            "  {} {} {:.2}",
            child.id.as_deref().unwrap_or("?"),
            child.reference,
            child.amount
        );
    }
    Ok(())
}
