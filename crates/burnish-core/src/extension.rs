use crate::create::{CreateGuard, CreateOutcome};
use crate::editor::{Cursor, EditorBuffer};
use crate::fold::{has_properties_block, FoldSession};
use crate::host::{ConfirmPrompt, ExtensionPoint, HostHooks, NoteVault, Notifier, Workspace};
use crate::rewrite::{rewrite_document, rewrite_line, BLOCK_MARKER};
use crate::schedule::TaskQueue;
use crate::settings::FeatureSettings;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashSet;
use std::io;

/// Delay between a note becoming active and the fold attempt, giving the
/// host time to finish rendering the view.
const FOLD_DELAY_MS: i64 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingTask {
    FoldProperties { doc_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentOutcome {
    FeatureDisabled,
    EmptyDocument,
    NoBlockReferences,
    NothingToAlias,
    Rewritten { count: usize },
}

impl DocumentOutcome {
    pub fn message(&self) -> String {
        match self {
            Self::FeatureDisabled => "Block reference alias feature is disabled".to_string(),
            Self::EmptyDocument => "Document is empty".to_string(),
            Self::NoBlockReferences => "No block reference wikilinks found".to_string(),
            Self::NothingToAlias => "No block references needed aliases".to_string(),
            Self::Rewritten { count } => format!(
                "Added dashes and aliases to {count} block reference{}",
                if *count == 1 { "" } else { "s" }
            ),
        }
    }
}

/// Extension lifecycle and event wiring. Owns the feature settings, the
/// creation guard, the fold session, and the deferred-task queue; the host
/// forwards its events here and applies whatever text the extension hands
/// back.
pub struct Extension {
    settings: FeatureSettings,
    guard: CreateGuard,
    folds: FoldSession,
    tasks: TaskQueue<PendingTask>,
    registered: HashSet<ExtensionPoint>,
}

impl Extension {
    pub fn new(settings: FeatureSettings) -> Self {
        Self {
            settings,
            guard: CreateGuard::new(),
            folds: FoldSession::new(),
            tasks: TaskQueue::new(),
            registered: HashSet::new(),
        }
    }

    pub fn settings(&self) -> &FeatureSettings {
        &self.settings
    }

    /// Brings the host registrations in line with the current settings.
    /// Idempotent, so hosts may call it after every settings change.
    pub fn sync_hooks(&mut self, hooks: &mut dyn HostHooks) {
        let space = self.settings.block_reference_alias;
        let guard = self.settings.confirms_creation();
        let open = self.settings.auto_hide_properties;
        self.sync_point(hooks, ExtensionPoint::SpaceTrigger, space);
        self.sync_point(hooks, ExtensionPoint::CreationGuard, guard);
        self.sync_point(hooks, ExtensionPoint::OpenListener, open);
    }

    fn sync_point(&mut self, hooks: &mut dyn HostHooks, point: ExtensionPoint, wanted: bool) {
        let registered = self.registered.contains(&point);
        if wanted && !registered {
            hooks.register(point);
            self.registered.insert(point);
            tracing::debug!(?point, "registered extension point");
        } else if !wanted && registered {
            hooks.unregister(point);
            self.registered.remove(&point);
            tracing::debug!(?point, "unregistered extension point");
        }
    }

    pub fn update_settings(&mut self, settings: FeatureSettings, hooks: &mut dyn HostHooks) {
        if settings.auto_hide_properties != self.settings.auto_hide_properties {
            self.folds.clear();
            self.tasks.clear();
        }
        self.settings = settings;
        self.sync_hooks(hooks);
    }

    /// Unregisters every hook and drops session state. The extension can be
    /// re-attached later with `sync_hooks`.
    pub fn detach(&mut self, hooks: &mut dyn HostHooks) {
        for point in [
            ExtensionPoint::SpaceTrigger,
            ExtensionPoint::CreationGuard,
            ExtensionPoint::OpenListener,
        ] {
            if self.registered.remove(&point) {
                hooks.unregister(point);
                tracing::debug!(?point, "unregistered extension point");
            }
        }
        self.folds.clear();
        self.tasks.clear();
        self.guard.clear();
    }

    /// Space-trigger entry point. The host calls this after inserting a
    /// space; when the text immediately before that space ends with `]]` and
    /// the line holds a block-reference marker, the current line is
    /// rewritten in place and the cursor moves to the end of it. Returns the
    /// substitution count when anything changed.
    pub fn on_space_inserted(&self, editor: &mut dyn EditorBuffer) -> Option<usize> {
        if !self.settings.block_reference_alias {
            return None;
        }
        let cursor = editor.cursor();
        let line = editor.line(cursor.line)?.to_string();
        let before_space = line.get(..cursor.ch)?.strip_suffix(' ')?;
        if !before_space.ends_with("]]") || !before_space.contains(BLOCK_MARKER) {
            return None;
        }

        let rewritten = rewrite_line(&line);
        if rewritten.count == 0 {
            return None;
        }
        let end = rewritten.text.len();
        editor.set_line(cursor.line, rewritten.text);
        editor.set_cursor(Cursor {
            line: cursor.line,
            ch: end,
        });
        Some(rewritten.count)
    }

    /// Manual command: rewrite every qualifying block reference in the
    /// buffer at once.
    pub fn process_document(&self, editor: &mut dyn EditorBuffer) -> DocumentOutcome {
        if !self.settings.block_reference_alias {
            return DocumentOutcome::FeatureDisabled;
        }
        let content = editor.value();
        if content.trim().is_empty() {
            return DocumentOutcome::EmptyDocument;
        }
        if !content.contains(BLOCK_MARKER) {
            return DocumentOutcome::NoBlockReferences;
        }
        let rewritten = rewrite_document(&content);
        if rewritten.count == 0 {
            return DocumentOutcome::NothingToAlias;
        }
        editor.set_value(&rewritten.text);
        DocumentOutcome::Rewritten {
            count: rewritten.count,
        }
    }

    /// `process_document` plus the user-facing notice for its outcome.
    pub fn run_alias_command(
        &self,
        editor: &mut dyn EditorBuffer,
        notifier: &mut dyn Notifier,
    ) -> DocumentOutcome {
        let outcome = self.process_document(editor);
        notifier.notify(&outcome.message());
        outcome
    }

    /// Records a click on a link whose target note does not exist yet.
    pub fn on_phantom_link_click(&mut self, now: DateTime<Utc>) {
        self.guard.note_phantom_click(now);
    }

    /// Creation-guard entry point; the host routes its note-creation calls
    /// through here while the `CreationGuard` hook is registered.
    pub fn intercept_create(
        &mut self,
        vault: &mut dyn NoteVault,
        prompt: &mut dyn ConfirmPrompt,
        path: &str,
        data: &str,
        now: DateTime<Utc>,
    ) -> Result<CreateOutcome, io::Error> {
        let outcome = self
            .guard
            .create(vault, prompt, &self.settings, path, data, now)?;
        tracing::debug!(path, ?outcome, "creation guard decision");
        Ok(outcome)
    }

    /// Active-document change. Schedules one deferred fold per document per
    /// session.
    pub fn on_note_open(&mut self, doc_id: &str, now: DateTime<Utc>) {
        if !self.settings.auto_hide_properties {
            return;
        }
        if !self.folds.mark_opened(doc_id) {
            return;
        }
        self.tasks.schedule(
            now + Duration::milliseconds(FOLD_DELAY_MS),
            PendingTask::FoldProperties {
                doc_id: doc_id.to_string(),
            },
        );
    }

    /// Runs every due deferred task. Folds only fire when the scheduled
    /// document is still the active one and actually has a properties block.
    pub fn poll(&mut self, now: DateTime<Utc>, workspace: &mut dyn Workspace) {
        for task in self.tasks.take_due(now) {
            match task {
                PendingTask::FoldProperties { doc_id } => {
                    if workspace.active_doc_id().as_deref() != Some(doc_id.as_str()) {
                        continue;
                    }
                    let Some(content) = workspace.active_content() else {
                        continue;
                    };
                    if has_properties_block(&content) {
                        workspace.fold_properties();
                    }
                }
            }
        }
    }
}
