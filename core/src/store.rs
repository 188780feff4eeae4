//! SQLite persistence layer.
//!
//! RULE: Only store.rs talks to the database.
//! The session calls store methods and never executes SQL directly.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use crate::{
    error::SimResult,
    event::EventLogEntry,
    types::Day,
};

pub struct SaveStore {
    conn: Connection,
}

/// Listing row for a save slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveSlot {
    pub slot:       String,
    pub session_id: String,
    pub day:        Day,
    pub saved_at:   DateTime<Utc>,
}

impl SaveStore {
    /// Open (or create) the save database at `path`.
    pub fn open(path: &str) -> SimResult<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> SimResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> SimResult<()> {
        self.conn.execute_batch(include_str!("../../migrations/001_foundation.sql"))?;
        Ok(())
    }

    // ── Save slots ─────────────────────────────────────────────

    /// Write `snapshot_json` into `slot`, replacing whatever was there.
    pub fn save_snapshot(
        &self,
        slot: &str,
        session_id: &str,
        day: Day,
        snapshot_json: &str,
    ) -> SimResult<()> {
        let saved_at = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO save_slot (slot, session_id, day, snapshot_json, saved_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(slot) DO UPDATE SET
                 session_id    = excluded.session_id,
                 day           = excluded.day,
                 snapshot_json = excluded.snapshot_json,
                 saved_at      = excluded.saved_at",
            params![slot, session_id, day as i64, snapshot_json, saved_at],
        )?;
        Ok(())
    }

    pub fn load_snapshot(&self, slot: &str) -> SimResult<Option<String>> {
        let json = self
            .conn
            .query_row(
                "SELECT snapshot_json FROM save_slot WHERE slot = ?1",
                params![slot],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(json)
    }

    /// Most recently saved first.
    pub fn list_slots(&self) -> SimResult<Vec<SaveSlot>> {
        let mut stmt = self.conn.prepare(
            "SELECT slot, session_id, day, saved_at FROM save_slot
             ORDER BY saved_at DESC, slot ASC",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, i64>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut slots = Vec::with_capacity(rows.len());
        for (slot, session_id, day, saved_at) in rows {
            let saved_at = DateTime::parse_from_rfc3339(&saved_at)
                .map_err(|e| anyhow::anyhow!("Bad timestamp on slot {slot}: {e}"))?
                .with_timezone(&Utc);
            slots.push(SaveSlot { slot, session_id, day: day as u64, saved_at });
        }
        Ok(slots)
    }

    // ── Event log ──────────────────────────────────────────────

    pub fn append_event(&self, entry: &EventLogEntry) -> SimResult<()> {
        self.conn.execute(
            "INSERT INTO event_log (session_id, day, event_type, payload)
             VALUES (?1, ?2, ?3, ?4)",
            params![entry.session_id, entry.day as i64, entry.event_type, entry.payload],
        )?;
        Ok(())
    }

    pub fn events_for_day(&self, session_id: &str, day: Day) -> SimResult<Vec<EventLogEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, session_id, day, event_type, payload
             FROM event_log WHERE session_id = ?1 AND day = ?2
             ORDER BY id ASC",
        )?;
        let entries = stmt
            .query_map(params![session_id, day as i64], |row| {
                Ok(EventLogEntry {
                    id:         Some(row.get(0)?),
                    session_id: row.get(1)?,
                    day:        row.get::<_, i64>(2)? as u64,
                    event_type: row.get(3)?,
                    payload:    row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    pub fn event_count(&self, session_id: &str) -> SimResult<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM event_log WHERE session_id = ?1",
            params![session_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
