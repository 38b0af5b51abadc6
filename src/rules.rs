use std::collections::HashMap;

use rusqlite::Connection;

use crate::db::PARAM_CHUNK;
use crate::error::Result;
use crate::models::{Classification, Rule};

/// Fetch the applicable rule for every distinct counterparty holder, one
/// query per chunk of holder names to stay under the host-parameter limit.
/// When several rules share a holder name the lowest rule id wins, so
/// repeated imports classify identically.
pub fn prefetch_rules(
    conn: &Connection,
    holders: &[String],
) -> Result<HashMap<String, Classification>> {
    let mut map = HashMap::new();
    for chunk in holders.chunks(PARAM_CHUNK) {
        let placeholders = vec!["?"; chunk.len()].join(", ");
        let sql = format!(
            "SELECT counterparty_holder, category_id, label_id, person FROM rules \
             WHERE counterparty_holder IN ({placeholders}) ORDER BY id"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(chunk.iter()), |row| {
            Ok((
                row.get::<_, String>(0)?,
                Classification {
                    category_id: row.get(1)?,
                    label_id: row.get(2)?,
                    person: row.get(3)?,
                },
            ))
        })?;
        for row in rows {
            let (holder, classification) = row?;
            map.entry(holder).or_insert(classification);
        }
    }
    Ok(map)
}

/// Apply every stored rule to the already-persisted transactions. Broader
/// than the import-time match: a transaction is updated when its holder
/// name OR its counterparty account number matches the rule. Returns the
/// number of rows actually updated.
pub fn apply_rules(conn: &Connection) -> Result<usize> {
    let mut stmt = conn.prepare(
        "SELECT id, counterparty_account, counterparty_holder, category_id, label_id, person \
         FROM rules ORDER BY id",
    )?;
    let rules: Vec<Rule> = stmt
        .query_map([], |row| {
            Ok(Rule {
                id: row.get(0)?,
                counterparty_account: row.get(1)?,
                counterparty_holder: row.get(2)?,
                category_id: row.get(3)?,
                label_id: row.get(4)?,
                person: row.get(5)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut updated = 0usize;
    for rule in &rules {
        // A NULL rule account never matches, so rules without an account
        // number fall back to holder-only matching.
        updated += conn.execute(
            "UPDATE transactions SET category_id = ?1, label_id = ?2, person = ?3 \
             WHERE counterparty_holder = ?4 OR counterparty_account = ?5",
            rusqlite::params![
                rule.category_id,
                rule.label_id,
                rule.person,
                rule.counterparty_holder,
                rule.counterparty_account
            ],
        )?;
    }
    Ok(updated)
}
