//! Edit-screen controller for a single tracked record.
//!
//! [`RecordEditor`] reconciles synchronous field edits, a one-shot initial
//! load, asynchronous save/delete calls against a [`RecordGateway`], and
//! one-shot navigation directives, all over a single observable snapshot.

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::task::JoinHandle;
use tokio_stream::wrappers::{ReceiverStream, WatchStream};
use tracing::{debug, error, info, warn};

use shared::domain::RecordId;

mod command;
mod directive;
mod gateway;
mod state;

pub use command::EditorCommand;
pub use directive::{DirectiveBus, UiDirective};
pub use gateway::{MissingRecordGateway, RecordGateway};
pub use state::{EditorState, StateCell};

/// Controller for one edit-screen instance.
///
/// Created at screen entry, dropped at screen exit; dropping aborts every
/// task it spawned, so no load, save or delete outlives the screen.
pub struct RecordEditor {
    state: Arc<StateCell<EditorState>>,
    directives: Arc<DirectiveBus>,
    gateway: Arc<dyn RecordGateway>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl RecordEditor {
    /// Builds the controller from the screen's launch parameters.
    ///
    /// `launch_id` is the optional string-encoded identity of the record to
    /// edit. A parseable integer triggers the one-shot initial load; `None`
    /// or a non-numeric value means New-record mode.
    pub fn new(gateway: Arc<dyn RecordGateway>, launch_id: Option<&str>) -> Self {
        let editor = Self {
            state: Arc::new(StateCell::new(EditorState::default())),
            directives: Arc::new(DirectiveBus::new()),
            gateway,
            tasks: Mutex::new(Vec::new()),
        };
        if let Some(raw) = launch_id {
            match raw.parse::<i64>() {
                Ok(id) => editor.spawn_initial_load(RecordId(id)),
                Err(_) => {
                    warn!(launch_id = raw, "non-numeric launch id; starting in new-record mode");
                }
            }
        }
        editor
    }

    /// Latest snapshot, read synchronously.
    pub fn state(&self) -> EditorState {
        self.state.read()
    }

    /// Hot snapshot stream: the current value at attach time, then every
    /// subsequent update in order.
    pub fn observe(&self) -> WatchStream<EditorState> {
        self.state.observe()
    }

    /// Claims the unicast directive stream; `None` once taken.
    pub fn directives(&self) -> Option<ReceiverStream<UiDirective>> {
        self.directives.subscribe()
    }

    /// Applies one command. Field edits take effect synchronously before
    /// this returns; save, delete and navigation run as spawned tasks.
    pub fn dispatch(&self, command: EditorCommand) {
        debug!(command = command.name(), "dispatching editor command");
        match command {
            EditorCommand::NameChanged(value) => self.state.update(|s| EditorState {
                name: value,
                ..s.clone()
            }),
            EditorCommand::KindChanged(value) => self.state.update(|s| EditorState {
                kind: value,
                ..s.clone()
            }),
            EditorCommand::SpriteChanged(value) => self.state.update(|s| EditorState {
                sprite: value,
                ..s.clone()
            }),
            EditorCommand::DateChanged(value) => self.state.update(|s| EditorState {
                date: value,
                ..s.clone()
            }),
            EditorCommand::PlaceChanged(value) => self.state.update(|s| EditorState {
                place: value,
                ..s.clone()
            }),
            EditorCommand::GameChanged(value) => self.state.update(|s| EditorState {
                game: value,
                ..s.clone()
            }),
            EditorCommand::NotesChanged(value) => self.state.update(|s| EditorState {
                notes: value,
                ..s.clone()
            }),
            EditorCommand::CaughtChanged(value) => self.state.update(|s| EditorState {
                caught: value,
                ..s.clone()
            }),
            EditorCommand::DexNoChanged(value) => self.state.update(|s| EditorState {
                dex_no: value,
                ..s.clone()
            }),
            EditorCommand::Save => self.spawn_save(),
            EditorCommand::Delete => self.spawn_delete(),
            EditorCommand::NavigateBack => {
                let directives = Arc::clone(&self.directives);
                self.spawn(async move { directives.emit(UiDirective::NavigateBack).await });
            }
        }
    }

    fn spawn_initial_load(&self, id: RecordId) {
        let state = Arc::clone(&self.state);
        let gateway = Arc::clone(&self.gateway);
        self.spawn(async move {
            match gateway.lookup(id).await {
                // Wholesale overwrite: a field edit racing the load loses.
                Ok(Some(record)) => state.update(|_| EditorState::from_record(&record)),
                Ok(None) => info!(id = id.0, "no stored record for launch id"),
                Err(err) => error!(id = id.0, "initial load failed: {err:#}"),
            }
        });
    }

    fn spawn_save(&self) {
        let state = Arc::clone(&self.state);
        let gateway = Arc::clone(&self.gateway);
        let directives = Arc::clone(&self.directives);
        self.spawn(async move {
            let record = state.read().to_record();
            let result = match record.id {
                None => gateway.create(record).await,
                Some(_) => gateway.update(record).await,
            };
            match result {
                Ok(()) => directives.emit(UiDirective::NavigateBack).await,
                Err(err) => error!("save failed: {err:#}"),
            }
        });
    }

    fn spawn_delete(&self) {
        let state = Arc::clone(&self.state);
        let gateway = Arc::clone(&self.gateway);
        let directives = Arc::clone(&self.directives);
        self.spawn(async move {
            let id = state.read().id;
            match gateway.delete(id).await {
                Ok(()) => {
                    info!(id = ?id.map(|id| id.0), "record deleted");
                    directives.emit(UiDirective::NavigateBack).await;
                }
                Err(err) => error!(id = ?id.map(|id| id.0), "delete failed: {err:#}"),
            }
        });
    }

    fn spawn(&self, work: impl Future<Output = ()> + Send + 'static) {
        let handle = tokio::spawn(work);
        let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
        tasks.retain(|task| !task.is_finished());
        tasks.push(handle);
    }
}

impl Drop for RecordEditor {
    fn drop(&mut self) {
        let tasks = self.tasks.get_mut().unwrap_or_else(PoisonError::into_inner);
        for task in tasks.drain(..) {
            task.abort();
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
