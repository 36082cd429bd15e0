//! Whole-document snapshots. The card is stored as one JSON blob under a fixed
//! key, read once at startup and rewritten after every change.

use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::CardDocument;

/// Key the card snapshot lives under.
pub const SNAPSHOT_KEY: &str = "muradtap_card_data";

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("no stored card snapshot")]
    Missing,
    #[error("stored card snapshot is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("card store query failed: {0}")]
    Storage(#[from] rusqlite::Error),
}

/// Read and decode the stored snapshot.
pub fn read_snapshot(conn: &Connection) -> Result<CardDocument, SnapshotError> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT value FROM card_store WHERE key = ?1",
            params![SNAPSHOT_KEY],
            |row| row.get(0),
        )
        .optional()?;

    let raw = raw.ok_or(SnapshotError::Missing)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Encode and store the whole document, replacing any previous snapshot.
pub fn write_snapshot(conn: &Connection, doc: &CardDocument) -> Result<(), SnapshotError> {
    let raw = serde_json::to_string(doc)?;
    conn.execute(
        "INSERT INTO card_store (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![SNAPSHOT_KEY, raw],
    )?;
    Ok(())
}

/// Startup load: any failure falls back to the built-in sample card.
pub fn load_or_default(conn: &Connection) -> CardDocument {
    match read_snapshot(conn) {
        Ok(doc) => doc,
        Err(SnapshotError::Missing) => {
            debug!("no stored card, starting from the default document");
            CardDocument::default()
        }
        Err(err) => {
            warn!(error = %err, "failed to load card data from storage");
            CardDocument::default()
        }
    }
}

/// Save after an edit. Failures are logged and otherwise ignored so editing
/// can continue.
pub fn persist(conn: &Connection, doc: &CardDocument) -> bool {
    match write_snapshot(conn, doc) {
        Ok(()) => true,
        Err(err) => {
            warn!(error = %err, "failed to save card data to storage");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_store_in_memory;
    use crate::models::{ContactList, IconStyle, ImageSlot, TextField};

    #[test]
    fn empty_store_reports_missing_and_loads_default() {
        let conn = open_store_in_memory().expect("store");
        assert!(matches!(read_snapshot(&conn), Err(SnapshotError::Missing)));
        assert_eq!(load_or_default(&conn), CardDocument::default());
    }

    #[test]
    fn edited_document_round_trips() {
        let conn = open_store_in_memory().expect("store");
        let mut doc = CardDocument::default();
        let phone = doc.add_phone();
        doc.update_contact(ContactList::Phones, &phone, Some("+44 20 7946 0958".into()), None);
        let award = doc.add_accreditation();
        doc.update_accreditation(&award, Some("PMP".into()), Some("https://pmi.org".into()));
        doc.set_text(TextField::Telegram, "@alex");
        doc.clear_text(TextField::Instagram);
        doc.set_icon_style(IconStyle::Custom);
        doc.set_image(ImageSlot::Background, Some("data:image/png;base64,AAAA".into()));
        doc.set_image(ImageSlot::Logo, None);

        assert!(persist(&conn, &doc));
        assert_eq!(read_snapshot(&conn).expect("read"), doc);

        doc.remove_contact(ContactList::Phones, &phone);
        assert!(persist(&conn, &doc));
        assert_eq!(load_or_default(&conn), doc);
    }

    #[test]
    fn corrupt_snapshot_falls_back_to_default() {
        let conn = open_store_in_memory().expect("store");
        conn.execute(
            "INSERT INTO card_store (key, value) VALUES (?1, ?2)",
            params![SNAPSHOT_KEY, "{not json"],
        )
        .expect("insert");

        assert!(matches!(read_snapshot(&conn), Err(SnapshotError::Corrupt(_))));
        assert_eq!(load_or_default(&conn), CardDocument::default());
    }

    #[test]
    fn persist_reports_failure_without_panicking() {
        let conn = open_store_in_memory().expect("store");
        conn.execute("DROP TABLE card_store", []).expect("drop");
        assert!(!persist(&conn, &CardDocument::default()));
    }
}
