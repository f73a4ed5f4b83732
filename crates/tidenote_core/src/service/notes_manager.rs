//! Notes manager use-case service.
//!
//! # Responsibility
//! - Own the ordered in-memory note collection for one session.
//! - Mirror the collection to the snapshot store on every change.
//! - Expose filtered, non-mutating views for presentation.
//!
//! # Invariants
//! - The collection is newest-first by insertion and holds no duplicate ids.
//! - Loading fails closed: absent, unreadable or corrupt snapshots yield an
//!   empty collection instead of an error.
//! - Persistence failures are swallowed after logging; in-memory state stays
//!   authoritative for the session.
//! - Bulk clear is two-phase: a request must be confirmed by a second call
//!   before the collection is emptied.

use crate::model::note::{mint_note_id, FieldErrors, Note, NoteDraft};
use crate::repo::snapshot_repo::SnapshotRepository;
use crate::search::filter::filter_notes;
use crate::snapshot::{decode_snapshot, encode_snapshot, SNAPSHOT_KEY};
use chrono::Utc;
use log::{info, warn};

/// In-memory notes collection mirrored to a key-value snapshot store.
pub struct NotesManager<R: SnapshotRepository> {
    repo: R,
    notes: Vec<Note>,
    pending_clear: bool,
}

impl<R: SnapshotRepository> NotesManager<R> {
    /// Loads the persisted snapshot into a new manager.
    ///
    /// # Contract
    /// - Never returns an error: an absent, unreadable or corrupt snapshot
    ///   degrades to an empty collection, with the reason logged.
    pub fn load(repo: R) -> Self {
        let notes = match repo.read_snapshot(SNAPSHOT_KEY) {
            Ok(Some(raw)) => match decode_snapshot(&raw) {
                Ok(notes) => {
                    info!(
                        "event=snapshot_load module=service status=ok count={}",
                        notes.len()
                    );
                    notes
                }
                Err(err) => {
                    warn!("event=snapshot_load module=service status=corrupt error={err}");
                    Vec::new()
                }
            },
            Ok(None) => {
                info!("event=snapshot_load module=service status=absent");
                Vec::new()
            }
            Err(err) => {
                warn!("event=snapshot_load module=service status=error error={err}");
                Vec::new()
            }
        };

        Self {
            repo,
            notes,
            pending_clear: false,
        }
    }

    /// Validates and adds a new note at the front of the collection.
    ///
    /// # Contract
    /// - On success the created note is returned and the snapshot persisted.
    /// - On validation failure the per-field error map is returned and
    ///   neither the collection nor the store is touched.
    pub fn add(&mut self, title: &str, content: &str) -> Result<Note, FieldErrors> {
        let valid = NoteDraft::new(title, content).validate()?;

        let note = Note {
            id: mint_note_id(Utc::now().timestamp_millis(), &self.notes),
            title: valid.title,
            content: valid.content,
            created_at: Utc::now(),
        };
        self.notes.insert(0, note.clone());
        info!(
            "event=notes_add module=service status=ok id={} count={}",
            note.id,
            self.notes.len()
        );
        self.persist("notes_add");

        Ok(note)
    }

    /// Removes the note with `id` if present and persists.
    ///
    /// Returns whether a note was removed. An absent id is a successful
    /// no-op; nothing is written for it.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.notes.len();
        self.notes.retain(|note| note.id != id);
        let removed = self.notes.len() != before;

        if removed {
            info!(
                "event=notes_remove module=service status=ok id={id} count={}",
                self.notes.len()
            );
            self.persist("notes_remove");
        } else {
            info!("event=notes_remove module=service status=absent id={id}");
        }

        removed
    }

    /// Arms a bulk clear. Returns whether a request is now pending.
    ///
    /// Requesting on an empty collection is a no-op, mirroring a disabled
    /// clear control.
    pub fn request_clear_all(&mut self) -> bool {
        if self.notes.is_empty() {
            return false;
        }
        self.pending_clear = true;
        true
    }

    /// Confirms a pending bulk clear, emptying the collection and persisting.
    ///
    /// Returns `false` and leaves notes intact when no request is pending.
    pub fn confirm_clear_all(&mut self) -> bool {
        if !self.pending_clear {
            return false;
        }
        self.pending_clear = false;
        self.notes.clear();
        info!("event=notes_clear module=service status=ok");
        self.persist("notes_clear");
        true
    }

    /// Drops a pending bulk clear request without touching the collection.
    pub fn cancel_clear_all(&mut self) {
        self.pending_clear = false;
    }

    /// Whether a bulk clear request is awaiting confirmation.
    pub fn clear_pending(&self) -> bool {
        self.pending_clear
    }

    /// Filtered view: notes whose title or content contains `query`
    /// case-insensitively, in stored order. An empty query returns all notes.
    pub fn search(&self, query: &str) -> Vec<&Note> {
        filter_notes(&self.notes, query)
    }

    /// Full collection, newest first.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Overwrites the persisted snapshot with the current collection.
    ///
    /// Failures are swallowed: the write is retried on the next mutation and
    /// the in-memory collection stays authoritative for this session.
    fn persist(&mut self, event: &'static str) {
        let raw = match encode_snapshot(&self.notes) {
            Ok(raw) => raw,
            Err(err) => {
                warn!("event=snapshot_write module=service status=encode_error source={event} error={err}");
                return;
            }
        };

        if let Err(err) = self.repo.write_snapshot(SNAPSHOT_KEY, &raw) {
            warn!("event=snapshot_write module=service status=error source={event} swallowed=true error={err}");
        }
    }
}
