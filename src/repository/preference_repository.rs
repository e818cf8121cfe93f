use anyhow::Result;
use rusqlite::{OptionalExtension, params};

pub struct PreferenceRepository<'a> {
    conn: &'a rusqlite::Connection,
}

impl<'a> PreferenceRepository<'a> {
    const PREVIOUSLY_CONNECTED: &'static str = "previously_connected";

    const SET_PREFERENCE: &'static str =
        "INSERT INTO preferences (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value";

    const GET_PREFERENCE: &'static str = "SELECT value FROM preferences WHERE key = ?1";

    const DELETE_PREFERENCE: &'static str = "DELETE FROM preferences WHERE key = ?1";

    pub fn new(conn: &'a rusqlite::Connection) -> Self {
        Self { conn }
    }

    /// Records whether the user has opted to connect before. The stored
    /// value is "true" or absent, nothing else.
    pub fn set_previously_connected(&self, connected: bool) -> Result<()> {
        if connected {
            self.conn.execute(
                Self::SET_PREFERENCE,
                params![Self::PREVIOUSLY_CONNECTED, "true"],
            )?;
        } else {
            self.conn.execute(
                Self::DELETE_PREFERENCE,
                params![Self::PREVIOUSLY_CONNECTED],
            )?;
        }
        Ok(())
    }

    pub fn previously_connected(&self) -> Result<bool> {
        let value: Option<String> = self
            .conn
            .query_row(
                Self::GET_PREFERENCE,
                params![Self::PREVIOUSLY_CONNECTED],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value.as_deref() == Some("true"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::Database;

    #[test]
    fn flag_defaults_to_absent() {
        let db = Database::new(":memory:").unwrap();
        let prefs = PreferenceRepository::new(&db.conn);
        assert!(!prefs.previously_connected().unwrap());
    }

    #[test]
    fn flag_round_trips() {
        let db = Database::new(":memory:").unwrap();
        let prefs = PreferenceRepository::new(&db.conn);

        prefs.set_previously_connected(true).unwrap();
        assert!(prefs.previously_connected().unwrap());

        // Setting twice stays a single row.
        prefs.set_previously_connected(true).unwrap();
        assert!(prefs.previously_connected().unwrap());

        prefs.set_previously_connected(false).unwrap();
        assert!(!prefs.previously_connected().unwrap());
    }
}
