//! File selection capability.
//!
//! The library does not own a UI; it consumes a [`FilePicker`] capability
//! (the stand-in for the browser's hidden file input) injected into the
//! [`Client`](crate::client::Client). `FileSelector` owns exactly one
//! picker per client: created lazily on first use, cached for the client
//! lifetime, and reconfigured through [`PickerPrompt`] on every call
//! instead of being recreated.
//!
//! Prompts are a serialization point: at most one file-choice interaction
//! is in flight at a time; a concurrent call waits on the first instead of
//! clobbering the shared picker's configuration.

mod native;

pub use native::PathPicker;

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{Mutex, OnceCell};

/// One chosen file: display name, MIME type, and contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub mime: String,
    pub data: Vec<u8>,
}

/// Per-call picker configuration.
#[derive(Debug, Clone)]
pub struct PickerPrompt {
    /// MIME pattern list, HTML-`accept` style: `"*/*"`, `"image/*"`,
    /// `"application/pdf, text/*"`.
    pub accept: String,
    pub multiple: bool,
}

/// File selection failure.
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("no file picker capability is configured on this client")]
    NoPicker,
    #[error("reading selected file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("file picker: {0}")]
    Picker(String),
}

/// The native file-choice prompt, driven by the platform.
///
/// `pick` blocks until the user makes a selection and resolves with the
/// chosen files in the order the platform reports them. If the user
/// dismisses the prompt without choosing, an implementation may never
/// return — an accepted limitation of native file prompts; callers
/// wanting a bound must race the call externally.
pub trait FilePicker: Send + Sync {
    fn pick(&self, prompt: &PickerPrompt) -> Result<Vec<SelectedFile>, SelectionError>;
}

/// Factory producing the picker on first use.
pub type PickerFactory = Box<dyn Fn() -> Arc<dyn FilePicker> + Send + Sync>;

/// Owns the client's single cached picker and serializes prompts.
pub struct FileSelector {
    factory: Option<PickerFactory>,
    picker: OnceCell<Arc<dyn FilePicker>>,
    gate: Mutex<()>,
}

impl FileSelector {
    /// Selector with no capability; every selection fails with `NoPicker`.
    pub fn disabled() -> Self {
        Self {
            factory: None,
            picker: OnceCell::new(),
            gate: Mutex::new(()),
        }
    }

    pub fn new(factory: PickerFactory) -> Self {
        Self {
            factory: Some(factory),
            picker: OnceCell::new(),
            gate: Mutex::new(()),
        }
    }

    /// Runs one file-choice interaction. Concurrent calls are queued on an
    /// internal mutex so the cached picker sees one prompt at a time.
    pub async fn select(&self, prompt: PickerPrompt) -> Result<Vec<SelectedFile>, SelectionError> {
        let _one_at_a_time = self.gate.lock().await;
        let factory = self.factory.as_ref().ok_or(SelectionError::NoPicker)?;
        let picker = self
            .picker
            .get_or_init(|| async { factory() })
            .await;
        let picker = Arc::clone(picker);
        tokio::task::spawn_blocking(move || picker.pick(&prompt))
            .await
            .map_err(|join| SelectionError::Picker(join.to_string()))?
    }
}

impl Default for FileSelector {
    fn default() -> Self {
        FileSelector::disabled()
    }
}

impl std::fmt::Debug for FileSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSelector")
            .field("configured", &self.factory.is_some())
            .field("initialized", &self.picker.initialized())
            .finish()
    }
}
