//! Observable snapshot state for the edit screen.

use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use shared::domain::{CatchRecord, RecordId};

/// The screen's current, possibly-unsaved view of one record.
///
/// `Default` is the New-record state: every field empty and no identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorState {
    pub id: Option<RecordId>,
    pub name: String,
    pub kind: String,
    pub sprite: String,
    pub date: String,
    pub place: String,
    pub game: String,
    pub notes: String,
    pub caught: bool,
    pub dex_no: String,
}

impl EditorState {
    pub fn from_record(record: &CatchRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            kind: record.kind.clone(),
            sprite: record.sprite.clone(),
            date: record.date.clone(),
            place: record.place.clone(),
            game: record.game.clone(),
            notes: record.notes.clone(),
            caught: record.caught,
            dex_no: record.dex_no.clone(),
        }
    }

    pub fn to_record(&self) -> CatchRecord {
        CatchRecord {
            id: self.id,
            name: self.name.clone(),
            kind: self.kind.clone(),
            sprite: self.sprite.clone(),
            date: self.date.clone(),
            place: self.place.clone(),
            game: self.game.clone(),
            notes: self.notes.clone(),
            caught: self.caught,
            dex_no: self.dex_no.clone(),
        }
    }
}

/// Single-writer container for a continuously observable value.
///
/// `read` returns the latest value synchronously. `observe` is a hot stream:
/// each new observer sees the current value at attach time and every value
/// applied afterwards, in order, but nothing older. `update` atomically
/// replaces the value with a transformation of the value at its own
/// application point, so overlapping updates never act on stale reads.
pub struct StateCell<T> {
    tx: watch::Sender<T>,
}

impl<T: Clone + Send + Sync + 'static> StateCell<T> {
    pub fn new(initial: T) -> Self {
        let (tx, _) = watch::channel(initial);
        Self { tx }
    }

    pub fn read(&self) -> T {
        self.tx.borrow().clone()
    }

    pub fn update(&self, transform: impl FnOnce(&T) -> T) {
        self.tx.send_modify(|current| {
            let next = transform(current);
            *current = next;
        });
    }

    pub fn observe(&self) -> WatchStream<T> {
        WatchStream::new(self.tx.subscribe())
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
