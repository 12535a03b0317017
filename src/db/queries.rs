use super::DbConn;
use rusqlite::params;
use std::collections::HashMap;

// ── Settings ──

pub fn load_settings(conn: &DbConn) -> rusqlite::Result<HashMap<String, String>> {
    let db = conn.lock().unwrap();
    let mut stmt = db.prepare("SELECT key, value FROM settings ORDER BY key")?;
    let settings = stmt
        .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?
        .collect::<rusqlite::Result<HashMap<_, _>>>()?;
    Ok(settings)
}

pub fn set_setting(conn: &DbConn, key: &str, value: &str) -> rusqlite::Result<()> {
    update_settings(conn, &[(key, value)])
}

/// Upsert several settings in one transaction.
pub fn update_settings(conn: &DbConn, settings: &[(&str, &str)]) -> rusqlite::Result<()> {
    let mut db = conn.lock().unwrap();
    let tx = db.transaction()?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO settings (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = ?2",
        )?;
        for (key, value) in settings {
            stmt.execute(params![key, value])?;
        }
    }
    tx.commit()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory;

    #[test]
    fn test_update_settings_upserts() {
        let conn = open_in_memory().unwrap();
        update_settings(&conn, &[("toast_max_visible", "2"), ("custom", "x")]).unwrap();

        let settings = load_settings(&conn).unwrap();
        assert_eq!(settings.get("toast_max_visible").map(String::as_str), Some("2"));
        assert_eq!(settings.get("custom").map(String::as_str), Some("x"));
    }

    #[test]
    fn test_set_setting_overwrites() {
        let conn = open_in_memory().unwrap();
        set_setting(&conn, "notifications_disabled", "true").unwrap();
        set_setting(&conn, "notifications_disabled", "false").unwrap();

        let settings = load_settings(&conn).unwrap();
        assert_eq!(
            settings.get("notifications_disabled").map(String::as_str),
            Some("false")
        );
    }
}
