use crate::host::{ConfirmPrompt, NoteVault};
use crate::settings::FeatureSettings;
use chrono::{DateTime, Duration, Utc};
use std::io;

/// How long after a phantom-link click a creation call is still attributed
/// to that click.
const PHANTOM_WINDOW_MS: i64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    Created { file_name: String },
    Declined { file_name: String },
    PassedThrough,
}

/// Middleware in front of the host's note store. Decides, from the current
/// settings and recent phantom-link navigation, whether a creation call
/// needs user confirmation before it reaches the vault.
#[derive(Debug, Default)]
pub struct CreateGuard {
    phantom_until: Option<DateTime<Utc>>,
}

impl CreateGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that the user just followed a link to a note that does not
    /// exist yet. The next creation call within the window is treated as
    /// phantom-initiated.
    pub fn note_phantom_click(&mut self, now: DateTime<Utc>) {
        self.phantom_until = Some(now + Duration::milliseconds(PHANTOM_WINDOW_MS));
    }

    pub fn phantom_pending(&self, now: DateTime<Utc>) -> bool {
        self.phantom_until.is_some_and(|until| now <= until)
    }

    pub fn clear(&mut self) {
        self.phantom_until = None;
    }

    pub fn create(
        &mut self,
        vault: &mut dyn NoteVault,
        prompt: &mut dyn ConfirmPrompt,
        settings: &FeatureSettings,
        path: &str,
        data: &str,
        now: DateTime<Utc>,
    ) -> Result<CreateOutcome, io::Error> {
        if !path.ends_with(".md") || vault.exists(path) {
            vault.create(path, data)?;
            return Ok(CreateOutcome::PassedThrough);
        }

        let needs_confirmation = settings.confirm_all_new_notes
            || (settings.confirm_phantom_notes_only && self.phantom_pending(now));
        if !needs_confirmation {
            vault.create(path, data)?;
            return Ok(CreateOutcome::PassedThrough);
        }

        let file_name = note_file_name(path);
        if prompt.confirm_create(&file_name) {
            vault.create(path, data)?;
            Ok(CreateOutcome::Created { file_name })
        } else {
            Ok(CreateOutcome::Declined { file_name })
        }
    }
}

/// Display name for a note path: final segment with the `.md` suffix
/// stripped.
pub fn note_file_name(path: &str) -> String {
    let stem = path.strip_suffix(".md").unwrap_or(path);
    stem.rsplit('/').next().unwrap_or(stem).to_string()
}

#[cfg(test)]
mod tests {
    use super::{note_file_name, CreateGuard, CreateOutcome, PHANTOM_WINDOW_MS};
    use crate::host::{ConfirmPrompt, NoteVault};
    use crate::settings::FeatureSettings;
    use chrono::{DateTime, Duration, Utc};
    use std::io;

    struct FakeVault {
        existing: Vec<String>,
        created: Vec<(String, String)>,
    }

    impl FakeVault {
        fn new() -> Self {
            Self {
                existing: Vec::new(),
                created: Vec::new(),
            }
        }
    }

    impl NoteVault for FakeVault {
        fn exists(&self, path: &str) -> bool {
            self.existing.iter().any(|existing| existing == path)
        }

        fn create(&mut self, path: &str, data: &str) -> Result<(), io::Error> {
            self.created.push((path.to_string(), data.to_string()));
            Ok(())
        }
    }

    struct FakePrompt {
        answer: bool,
        asked: Vec<String>,
    }

    impl FakePrompt {
        fn answering(answer: bool) -> Self {
            Self {
                answer,
                asked: Vec::new(),
            }
        }
    }

    impl ConfirmPrompt for FakePrompt {
        fn confirm_create(&mut self, file_name: &str) -> bool {
            self.asked.push(file_name.to_string());
            self.answer
        }
    }

    fn at(seconds: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(seconds, 0).expect("timestamp")
    }

    #[test]
    fn non_markdown_path_passes_through() {
        let mut guard = CreateGuard::new();
        let mut vault = FakeVault::new();
        let mut prompt = FakePrompt::answering(false);
        let mut settings = FeatureSettings::default();
        settings.confirm_all_new_notes = true;

        let outcome = guard
            .create(&mut vault, &mut prompt, &settings, "canvas.json", "{}", at(0))
            .expect("create");
        assert_eq!(outcome, CreateOutcome::PassedThrough);
        assert_eq!(vault.created.len(), 1);
        assert!(prompt.asked.is_empty());
    }

    #[test]
    fn existing_note_passes_through() {
        let mut guard = CreateGuard::new();
        let mut vault = FakeVault::new();
        vault.existing.push("daily/today.md".to_string());
        let mut prompt = FakePrompt::answering(false);
        let mut settings = FeatureSettings::default();
        settings.confirm_all_new_notes = true;

        let outcome = guard
            .create(&mut vault, &mut prompt, &settings, "daily/today.md", "", at(0))
            .expect("create");
        assert_eq!(outcome, CreateOutcome::PassedThrough);
        assert!(prompt.asked.is_empty());
    }

    #[test]
    fn confirm_all_prompts_for_every_new_note() {
        let mut guard = CreateGuard::new();
        let mut vault = FakeVault::new();
        let mut prompt = FakePrompt::answering(true);
        let mut settings = FeatureSettings::default();
        settings.confirm_all_new_notes = true;

        let outcome = guard
            .create(&mut vault, &mut prompt, &settings, "ideas/new.md", "", at(0))
            .expect("create");
        assert_eq!(
            outcome,
            CreateOutcome::Created {
                file_name: "new".to_string()
            }
        );
        assert_eq!(prompt.asked, vec!["new".to_string()]);
        assert_eq!(vault.created.len(), 1);
    }

    #[test]
    fn declined_confirmation_creates_nothing() {
        let mut guard = CreateGuard::new();
        let mut vault = FakeVault::new();
        let mut prompt = FakePrompt::answering(false);
        let mut settings = FeatureSettings::default();
        settings.confirm_all_new_notes = true;

        let outcome = guard
            .create(&mut vault, &mut prompt, &settings, "new.md", "", at(0))
            .expect("create");
        assert_eq!(
            outcome,
            CreateOutcome::Declined {
                file_name: "new".to_string()
            }
        );
        assert!(vault.created.is_empty());
    }

    #[test]
    fn phantom_only_prompts_inside_window() {
        let mut guard = CreateGuard::new();
        let mut vault = FakeVault::new();
        let mut prompt = FakePrompt::answering(true);
        let settings = FeatureSettings::default();

        let clicked = at(100);
        guard.note_phantom_click(clicked);

        let within = clicked + Duration::milliseconds(PHANTOM_WINDOW_MS / 2);
        let outcome = guard
            .create(&mut vault, &mut prompt, &settings, "phantom.md", "", within)
            .expect("create");
        assert_eq!(
            outcome,
            CreateOutcome::Created {
                file_name: "phantom".to_string()
            }
        );
    }

    #[test]
    fn phantom_only_passes_through_after_window() {
        let mut guard = CreateGuard::new();
        let mut vault = FakeVault::new();
        let mut prompt = FakePrompt::answering(true);
        let settings = FeatureSettings::default();

        let clicked = at(100);
        guard.note_phantom_click(clicked);

        let late = clicked + Duration::milliseconds(PHANTOM_WINDOW_MS + 1);
        let outcome = guard
            .create(&mut vault, &mut prompt, &settings, "typed.md", "", late)
            .expect("create");
        assert_eq!(outcome, CreateOutcome::PassedThrough);
        assert!(prompt.asked.is_empty());
        assert_eq!(vault.created.len(), 1);
    }

    #[test]
    fn phantom_only_passes_through_without_click() {
        let mut guard = CreateGuard::new();
        let mut vault = FakeVault::new();
        let mut prompt = FakePrompt::answering(true);
        let settings = FeatureSettings::default();

        let outcome = guard
            .create(&mut vault, &mut prompt, &settings, "typed.md", "", at(0))
            .expect("create");
        assert_eq!(outcome, CreateOutcome::PassedThrough);
    }

    #[test]
    fn file_name_strips_directories_and_extension() {
        assert_eq!(note_file_name("a/b/Note.md"), "Note");
        assert_eq!(note_file_name("Note.md"), "Note");
        assert_eq!(note_file_name("weird.md.md"), "weird.md");
    }
}
