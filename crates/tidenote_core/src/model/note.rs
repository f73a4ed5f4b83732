//! Note domain model and draft validation.
//!
//! # Responsibility
//! - Define the canonical note record persisted in snapshots.
//! - Validate user drafts into trimmed, bounded fields.
//! - Mint unique timestamp-derived ids.
//!
//! # Invariants
//! - `id` is unique within a collection and never reused.
//! - `title` is 1..=100 characters after trimming.
//! - `content` is 1..=2000 characters after trimming.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// Maximum title length in characters, counted after trimming.
pub const TITLE_MAX_CHARS: usize = 100;
/// Maximum content length in characters, counted after trimming.
pub const CONTENT_MAX_CHARS: usize = 2000;

/// Stable identifier for a note.
///
/// Derived from the creation epoch-millisecond timestamp rendered in decimal,
/// bumped past any colliding id. Kept as a type alias to make semantic intent
/// explicit in signatures.
pub type NoteId = String;

/// Canonical note record.
///
/// Notes are never mutated in place: they are created once and removed as a
/// whole, so the record carries no update timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Unique timestamp-derived id.
    pub id: NoteId,
    /// Trimmed title, 1..=100 characters.
    pub title: String,
    /// Trimmed body text, 1..=2000 characters.
    pub content: String,
    /// Creation instant. Serialized as `createdAt` in ISO 8601 text to match
    /// the persisted snapshot schema.
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Note {
    /// Returns the reason a persisted note violates stored-field rules, or
    /// `None` when the note is acceptable.
    ///
    /// Used by snapshot decoding to fail closed on corrupt data. Checks
    /// non-blank trimmed fields within length bounds.
    pub fn stored_violation(&self) -> Option<&'static str> {
        if self.title.trim().is_empty() {
            return Some("title is blank");
        }
        if self.title.trim().chars().count() > TITLE_MAX_CHARS {
            return Some("title exceeds length bound");
        }
        if self.content.trim().is_empty() {
            return Some("content is blank");
        }
        if self.content.trim().chars().count() > CONTENT_MAX_CHARS {
            return Some("content exceeds length bound");
        }
        None
    }
}

/// Field handle for per-field validation reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum NoteField {
    Title,
    Content,
}

impl NoteField {
    /// Stable lowercase field name for rendering and logging.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Content => "content",
        }
    }
}

impl Display for NoteField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-field validation error map.
///
/// Reported as a value, never as a panic or a propagated error: validation
/// failures are user-correctable input, not faults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<NoteField, String>,
}

impl FieldErrors {
    /// Records one message for a field, replacing any earlier message.
    pub fn insert(&mut self, field: NoteField, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    /// Message recorded for `field`, if any.
    pub fn get(&self, field: NoteField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterates fields in stable (`Title`, `Content`) order.
    pub fn iter(&self) -> btree_map::Iter<'_, NoteField, String> {
        self.errors.iter()
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in &self.errors {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Raw user input for a new note, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
}

/// Draft that passed validation. Fields are trimmed and bounded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidDraft {
    pub title: String,
    pub content: String,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Validates the draft into trimmed fields or a per-field error map.
    ///
    /// # Contract
    /// - Blank-after-trim fields are rejected as required.
    /// - Length bounds are checked on trimmed character counts.
    /// - Both fields are always checked so one submission reports every
    ///   problem at once.
    pub fn validate(&self) -> Result<ValidDraft, FieldErrors> {
        let mut errors = FieldErrors::default();

        let title = self.title.trim();
        if title.is_empty() {
            errors.insert(NoteField::Title, "Title is required");
        } else if title.chars().count() > TITLE_MAX_CHARS {
            errors.insert(
                NoteField::Title,
                format!("Title may not exceed {TITLE_MAX_CHARS} characters"),
            );
        }

        let content = self.content.trim();
        if content.is_empty() {
            errors.insert(NoteField::Content, "Content is required");
        } else if content.chars().count() > CONTENT_MAX_CHARS {
            errors.insert(
                NoteField::Content,
                format!("Content may not exceed {CONTENT_MAX_CHARS} characters"),
            );
        }

        if errors.is_empty() {
            Ok(ValidDraft {
                title: title.to_string(),
                content: content.to_string(),
            })
        } else {
            Err(errors)
        }
    }
}

/// Mints a unique timestamp-derived id against the existing collection.
///
/// # Contract
/// - The candidate starts at `now_ms` rendered in decimal.
/// - On collision the candidate is bumped by one millisecond until free, so
///   same-millisecond inserts still produce distinct ids.
pub fn mint_note_id(now_ms: i64, existing: &[Note]) -> NoteId {
    let mut candidate = now_ms;
    loop {
        let id = candidate.to_string();
        if !existing.iter().any(|note| note.id == id) {
            return id;
        }
        candidate += 1;
    }
}
