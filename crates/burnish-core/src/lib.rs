//! Host-agnostic core of a note-editor extension: rewrites block-reference
//! wikilinks into a dashed, aliased form, guards implicit note creation
//! behind a confirmation prompt, and auto-folds a leading properties block
//! when a note is opened. Hosts supply buffers, prompts, and notification
//! sinks through the traits in [`host`]; everything here is synchronous and
//! free of I/O apart from the settings store.

pub mod create;
pub mod editor;
pub mod extension;
pub mod fold;
pub mod host;
pub mod rewrite;
pub mod schedule;
pub mod settings;

pub use create::{CreateGuard, CreateOutcome};
pub use editor::{Cursor, EditorBuffer, LineBuffer};
pub use extension::{DocumentOutcome, Extension, PendingTask};
pub use fold::{has_properties_block, FoldSession};
pub use host::{ConfirmPrompt, ExtensionPoint, HostHooks, NoteVault, Notifier, Workspace};
pub use rewrite::{rewrite_document, rewrite_line, Rewrite};
pub use schedule::TaskQueue;
pub use settings::{Feature, FeatureSettings, SettingsError, SettingsStore};
