use std::path::Path;

use rusqlite::Connection;

use crate::error::Result;

/// Upper bound per IN-list query, safely below SQLite's host-parameter
/// limit so arbitrarily large statement files never fail the batch lookup.
pub const PARAM_CHUNK: usize = 900;

pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    icon TEXT,
    kind TEXT NOT NULL DEFAULT 'expense',
    created_at TEXT DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS labels (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    created_at TEXT DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS rules (
    id INTEGER PRIMARY KEY,
    counterparty_account TEXT,
    counterparty_holder TEXT NOT NULL,
    category_id INTEGER NOT NULL,
    label_id INTEGER,
    person TEXT,
    created_at TEXT DEFAULT (datetime('now')),
    FOREIGN KEY (category_id) REFERENCES categories(id),
    FOREIGN KEY (label_id) REFERENCES labels(id)
);

CREATE TABLE IF NOT EXISTS transactions (
    id TEXT PRIMARY KEY,
    reference TEXT NOT NULL UNIQUE,
    account_number TEXT,
    transaction_date TEXT NOT NULL,
    value_date TEXT,
    booking_date TEXT,
    currency TEXT,
    debit_credit TEXT,
    amount REAL NOT NULL CHECK (amount >= 0),
    counterparty_account TEXT,
    counterparty_holder TEXT,
    payment_method TEXT,
    description TEXT,
    payment_type TEXT,
    mandate_number TEXT,
    creditor_id TEXT,
    address TEXT,
    category_id INTEGER,
    label_id INTEGER,
    person TEXT,
    imported INTEGER DEFAULT 0,
    created_at TEXT DEFAULT (datetime('now')),
    FOREIGN KEY (category_id) REFERENCES categories(id),
    FOREIGN KEY (label_id) REFERENCES labels(id)
);
";

// (name, icon, kind)
const DEFAULT_CATEGORIES: &[(&str, &str, &str)] = &[
    ("Salary", "\u{1F4B0}", "income"),
    ("Refunds", "\u{21A9}", "income"),
    ("Other Income", "\u{1F4E5}", "income"),
    ("Groceries", "\u{1F6D2}", "expense"),
    ("Housing", "\u{1F3E0}", "expense"),
    ("Utilities", "\u{1F4A1}", "expense"),
    ("Insurance", "\u{1F6E1}", "expense"),
    ("Transport", "\u{1F697}", "expense"),
    ("Dining Out", "\u{1F37D}", "expense"),
    ("Subscriptions", "\u{1F4FA}", "expense"),
    ("Healthcare", "\u{2695}", "expense"),
    ("Savings & Transfers", "\u{1F3E6}", "expense"),
    ("Other", "\u{2753}", "expense"),
];

pub fn get_connection(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;

    let count: i64 = conn.query_row("SELECT count(*) FROM categories", [], |row| row.get(0))?;
    if count == 0 {
        for (name, icon, kind) in DEFAULT_CATEGORIES {
            conn.execute(
                "INSERT INTO categories (name, icon, kind) VALUES (?1, ?2, ?3)",
                rusqlite::params![name, icon, kind],
            )?;
        }
    }
    Ok(())
}
