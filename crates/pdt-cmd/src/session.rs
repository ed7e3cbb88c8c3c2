//! Shared session
//!
//! Bundles the document, settings and executor behind one lock so commands
//! submitted from several threads run one at a time, each from parse to
//! final edit.

use parking_lot::Mutex;
use pdt_mesh::GeometryDocument;
use pdt_settings::{SceneSettings, SettingError};

use crate::error::CmdResult;
use crate::executor::CommandExecutor;
use crate::outcome::Outcome;

struct SessionState<D> {
    document: D,
    settings: SceneSettings,
    executor: CommandExecutor,
}

/// A document with its settings, safe to share between threads
pub struct Session<D> {
    state: Mutex<SessionState<D>>,
}

impl<D: GeometryDocument> Session<D> {
    pub fn new(document: D, settings: SceneSettings) -> Self {
        Self::with_executor(document, settings, CommandExecutor::new())
    }

    pub fn with_executor(document: D, settings: SceneSettings, executor: CommandExecutor) -> Self {
        Self {
            state: Mutex::new(SessionState {
                document,
                settings,
                executor,
            }),
        }
    }

    /// Run one command while holding the session lock
    pub fn submit(&self, input: &str) -> CmdResult<Outcome> {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        state
            .executor
            .execute(&mut state.document, &mut state.settings, input)
    }

    /// Change a setting by name
    pub fn set(&self, name: &str, value: &str) -> Result<(), SettingError> {
        self.state.lock().settings.set_by_name(name, value)
    }

    /// Read a setting by name
    pub fn get(&self, name: &str) -> Result<String, SettingError> {
        self.state.lock().settings.get_by_name(name)
    }

    /// Message of the last rejected command, empty after a success
    pub fn last_error(&self) -> String {
        self.state.lock().settings.last_error.clone()
    }

    /// Run `f` with the document
    pub fn with_document<R>(&self, f: impl FnOnce(&D) -> R) -> R {
        f(&self.state.lock().document)
    }

    /// Run `f` with mutable access to the document, e.g. to change the selection
    pub fn with_document_mut<R>(&self, f: impl FnOnce(&mut D) -> R) -> R {
        f(&mut self.state.lock().document)
    }

    /// Copy of the current settings
    pub fn settings(&self) -> SceneSettings {
        self.state.lock().settings.clone()
    }

    pub fn into_inner(self) -> (D, SceneSettings) {
        let state = self.state.into_inner();
        (state.document, state.settings)
    }
}
