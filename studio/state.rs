use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use cnn_geometry::ArchitectureSpec;

// ---------------------------------------------------------------------------
// Flash messages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum FlashKind { Success, Error }

#[derive(Debug, Clone)]
pub struct FlashMessage {
    pub kind: FlashKind,
    pub text: String,
}

impl FlashMessage {
    pub fn success(text: impl Into<String>) -> Self {
        FlashMessage { kind: FlashKind::Success, text: text.into() }
    }
    pub fn error(text: impl Into<String>) -> Self {
        FlashMessage { kind: FlashKind::Error, text: text.into() }
    }
}

// ---------------------------------------------------------------------------
// Main state struct
// ---------------------------------------------------------------------------

/// Everything the studio remembers between requests.
///
/// `spec` is only ever replaced wholesale with a new snapshot produced by the
/// `ArchitectureSpec` editing methods; handlers never mutate the layer list
/// in place.
pub struct StudioState {
    /// Current input shape and layer list.
    pub spec:  ArchitectureSpec,
    /// One-shot flash message for the next page render.
    pub flash: Option<FlashMessage>,
}

impl StudioState {
    pub fn new() -> Self {
        StudioState { spec: ArchitectureSpec::default(), flash: None }
    }

    /// Installs a new snapshot, optionally queueing a flash message.
    pub fn replace_spec(&mut self, spec: ArchitectureSpec, flash: Option<FlashMessage>) {
        self.spec = spec;
        if flash.is_some() {
            self.flash = flash;
        }
    }

    /// Applies an imported `{input, layers}` document. On success the new
    /// snapshot replaces `spec`; on failure `spec` is untouched and an
    /// "Invalid JSON" flash is queued.
    pub fn apply_import(&mut self, document: &str) -> cnn_geometry::Result<()> {
        match self.spec.with_import(document) {
            Ok(next) => {
                let msg = format!("Imported {} layer(s).", next.layers.len());
                self.replace_spec(next, Some(FlashMessage::success(msg)));
                Ok(())
            }
            Err(e) => {
                self.flash = Some(FlashMessage::error(format!("Invalid JSON: {}", e)));
                Err(e)
            }
        }
    }

    /// Takes and returns the current flash message, clearing it.
    pub fn take_flash(&mut self) -> Option<FlashMessage> {
        self.flash.take()
    }
}

/// Shared state handed to every handler.
pub type SharedState = Arc<Mutex<StudioState>>;

/// Locks the state, ignoring poisoning: the spec is only ever swapped whole.
pub fn lock(state: &SharedState) -> MutexGuard<'_, StudioState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
