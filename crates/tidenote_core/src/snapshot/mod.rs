//! Snapshot codec for the persisted note collection.
//!
//! # Responsibility
//! - Serialize the full note collection to the stored text form.
//! - Decode stored snapshots back into notes, rejecting corrupt data.
//!
//! # Invariants
//! - The snapshot is a JSON array of notes, newest first, stored wholesale
//!   under one key.
//! - Decoding fails closed: a snapshot with malformed JSON, duplicate ids, or
//!   a rule-violating note is rejected as a whole.

use crate::model::note::{Note, NoteId};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed storage key the snapshot lives under.
pub const SNAPSHOT_KEY: &str = "notes_v1";

pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Codec error for snapshot encode/decode.
#[derive(Debug)]
pub enum SnapshotError {
    /// Collection could not be serialized.
    Encode(serde_json::Error),
    /// Stored text is not a JSON array of notes.
    Malformed(serde_json::Error),
    /// Two stored notes share one id.
    DuplicateId(NoteId),
    /// A stored note violates field rules.
    InvalidNote { id: NoteId, reason: &'static str },
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(err) => write!(f, "snapshot encode failed: {err}"),
            Self::Malformed(err) => write!(f, "malformed snapshot: {err}"),
            Self::DuplicateId(id) => write!(f, "duplicate note id in snapshot: {id}"),
            Self::InvalidNote { id, reason } => {
                write!(f, "invalid note `{id}` in snapshot: {reason}")
            }
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) | Self::Malformed(err) => Some(err),
            Self::DuplicateId(_) | Self::InvalidNote { .. } => None,
        }
    }
}

/// Serializes the collection to its stored text form.
pub fn encode_snapshot(notes: &[Note]) -> SnapshotResult<String> {
    serde_json::to_string(notes).map_err(SnapshotError::Encode)
}

/// Decodes a stored snapshot, enforcing collection invariants.
///
/// # Errors
/// - `Malformed` when the text is not a JSON note array.
/// - `DuplicateId` when two notes share an id.
/// - `InvalidNote` when a note has blank or oversized fields.
pub fn decode_snapshot(raw: &str) -> SnapshotResult<Vec<Note>> {
    let notes: Vec<Note> = serde_json::from_str(raw).map_err(SnapshotError::Malformed)?;

    let mut seen = BTreeSet::new();
    for note in &notes {
        if !seen.insert(note.id.as_str()) {
            return Err(SnapshotError::DuplicateId(note.id.clone()));
        }
        if let Some(reason) = note.stored_violation() {
            return Err(SnapshotError::InvalidNote {
                id: note.id.clone(),
                reason,
            });
        }
    }

    Ok(notes)
}
