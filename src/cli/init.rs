use std::path::PathBuf;

use crate::db::{get_connection, init_db};
use crate::error::Result;
use crate::settings::{get_data_dir, save_settings, Settings};

pub fn run(data_dir: Option<String>) -> Result<()> {
    let dir = match data_dir {
        Some(d) => PathBuf::from(d),
        None => get_data_dir(),
    };
    std::fs::create_dir_all(&dir)?;

    // An environment override is authoritative; only persist the choice
    // when the directory comes from the flag or the default.
    if std::env::var("KASBOEK_DATA_DIR").is_err() {
        save_settings(&Settings {
            data_dir: dir.to_string_lossy().to_string(),
        })?;
    }

    let conn = get_connection(&dir.join("kasboek.db"))?;
    init_db(&conn)?;

    println!("Initialized kasboek database in {}", dir.display());
    Ok(())
}
