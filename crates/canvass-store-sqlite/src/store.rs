//! [`SqliteStore`] — the SQLite implementation of the store traits.

use std::path::Path;

use canvass_core::{
  item::{Item, ItemUpdate, Status},
  participant::Participant,
  store::{ItemStore, ParticipantRegistry},
};
use chrono::Utc;
use rusqlite::OptionalExtension as _;

use crate::{
  Error, Result,
  encode::{RawItem, RawParticipant, encode_dt},
  schema::SCHEMA,
};

const ITEM_COLUMNS: &str = "id, text, label, status, language, classified_by";

fn item_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawItem> {
  Ok(RawItem {
    id:            row.get(0)?,
    text:          row.get(1)?,
    label:         row.get(2)?,
    status:        row.get(3)?,
    language:      row.get(4)?,
    classified_by: row.get(5)?,
  })
}

fn participant_from_row(
  row: &rusqlite::Row<'_>,
) -> rusqlite::Result<RawParticipant> {
  Ok(RawParticipant {
    identity:   row.get(0)?,
    is_active:  row.get(1)?,
    created_at: row.get(2)?,
  })
}

/// `true` when the backend rejected an INSERT on a unique key.
fn is_unique_violation(e: &tokio_rusqlite::Error) -> bool {
  matches!(
    e,
    tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(err, _))
      if err.code == rusqlite::ErrorCode::ConstraintViolation
  )
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Canvass store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. All access
/// funnels through one connection thread, so the conditional UPDATE behind
/// [`ItemStore::transition_if_status`] is atomic without further locking.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// The lowest-id item currently in `status`.
  async fn find_lowest_with_status(&self, status: Status) -> Result<Option<Item>> {
    let status_str = status.as_str();

    let raw: Option<RawItem> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {ITEM_COLUMNS} FROM items
                 WHERE status = ?1 ORDER BY id LIMIT 1"
              ),
              rusqlite::params![status_str],
              item_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawItem::into_item).transpose()
  }
}

// ─── ItemStore impl ──────────────────────────────────────────────────────────

impl ItemStore for SqliteStore {
  type Error = Error;

  async fn create(&self, id: i64, text: &str) -> Result<Item> {
    if text.is_empty() {
      return Err(Error::Core(canvass_core::Error::EmptyText));
    }

    let item = Item::new(id, text.to_owned());
    let text_owned = item.text.clone();
    let label = item.label.as_str();
    let status = item.status.as_str();
    let language = item.language.clone();

    let inserted = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO items (id, text, label, status, language)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id, text_owned, label, status, language],
        )?;
        Ok(())
      })
      .await;

    match inserted {
      Ok(()) => Ok(item),
      Err(ref e) if is_unique_violation(e) => {
        Err(Error::Core(canvass_core::Error::DuplicateItem(id)))
      }
      Err(e) => Err(Error::Database(e)),
    }
  }

  async fn find_unclassified(&self) -> Result<Option<Item>> {
    self.find_lowest_with_status(Status::Unclassified).await
  }

  async fn find_pending_review(&self) -> Result<Option<Item>> {
    self.find_lowest_with_status(Status::PendingReview).await
  }

  async fn get(&self, id: i64) -> Result<Option<Item>> {
    let raw: Option<RawItem> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {ITEM_COLUMNS} FROM items WHERE id = ?1"),
              rusqlite::params![id],
              item_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawItem::into_item).transpose()
  }

  async fn transition_if_status(
    &self,
    id: i64,
    expected: Status,
    update: ItemUpdate,
  ) -> Result<bool> {
    let expected_str = expected.as_str();
    let label = update.label.as_str();
    let status = update.status.as_str();
    let language = update.language;
    let classified_by = update.classified_by;

    // The WHERE clause re-checks the status inside the same statement, so a
    // lost race leaves the row untouched and reports 0 changes.
    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE items
           SET label = ?1, status = ?2, language = ?3,
               classified_by = COALESCE(?4, classified_by)
           WHERE id = ?5 AND status = ?6",
          rusqlite::params![
            label,
            status,
            language,
            classified_by,
            id,
            expected_str,
          ],
        )?)
      })
      .await?;

    Ok(changed == 1)
  }

  async fn list_all(&self) -> Result<Vec<Item>> {
    let raws: Vec<RawItem> = self
      .conn
      .call(|conn| {
        let mut stmt = conn
          .prepare(&format!("SELECT {ITEM_COLUMNS} FROM items ORDER BY id"))?;
        let rows = stmt
          .query_map([], item_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawItem::into_item).collect()
  }
}

// ─── ParticipantRegistry impl ────────────────────────────────────────────────

impl ParticipantRegistry for SqliteStore {
  type Error = Error;

  async fn get_or_create(&self, identity: &str) -> Result<Participant> {
    let identity_owned = identity.to_owned();
    let created_at = encode_dt(Utc::now());

    let raw: RawParticipant = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO participants (identity, is_active, created_at)
           VALUES (?1, 1, ?2)
           ON CONFLICT(identity) DO NOTHING",
          rusqlite::params![identity_owned, created_at],
        )?;
        Ok(conn.query_row(
          "SELECT identity, is_active, created_at FROM participants
           WHERE identity = ?1",
          rusqlite::params![identity_owned],
          participant_from_row,
        )?)
      })
      .await?;

    raw.into_participant()
  }

  async fn set_active(&self, identity: &str, active: bool) -> Result<()> {
    let identity_owned = identity.to_owned();
    let created_at = encode_dt(Utc::now());

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO participants (identity, is_active, created_at)
           VALUES (?1, ?2, ?3)
           ON CONFLICT(identity) DO UPDATE SET is_active = excluded.is_active",
          rusqlite::params![identity_owned, active, created_at],
        )?;
        Ok(())
      })
      .await?;

    Ok(())
  }

  async fn is_active(&self, identity: &str) -> Result<bool> {
    let identity_owned = identity.to_owned();

    let active: Option<bool> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT is_active FROM participants WHERE identity = ?1",
              rusqlite::params![identity_owned],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await?;

    Ok(active.unwrap_or(false))
  }
}
