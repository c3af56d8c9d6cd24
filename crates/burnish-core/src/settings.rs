use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Serde(serde_json::Error),
    ProjectDir,
}

impl From<std::io::Error> for SettingsError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feature {
    BlockReferenceAlias,
    ConfirmAllNewNotes,
    ConfirmPhantomNotesOnly,
    AutoHideProperties,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct FeatureSettings {
    pub block_reference_alias: bool,
    pub confirm_all_new_notes: bool,
    pub confirm_phantom_notes_only: bool,
    pub auto_hide_properties: bool,
}

impl Default for FeatureSettings {
    fn default() -> Self {
        Self {
            block_reference_alias: true,
            confirm_all_new_notes: false,
            confirm_phantom_notes_only: true,
            auto_hide_properties: false,
        }
    }
}

impl FeatureSettings {
    pub fn is_enabled(&self, feature: Feature) -> bool {
        match feature {
            Feature::BlockReferenceAlias => self.block_reference_alias,
            Feature::ConfirmAllNewNotes => self.confirm_all_new_notes,
            Feature::ConfirmPhantomNotesOnly => self.confirm_phantom_notes_only,
            Feature::AutoHideProperties => self.auto_hide_properties,
        }
    }

    pub fn set_enabled(&mut self, feature: Feature, enabled: bool) {
        match feature {
            Feature::BlockReferenceAlias => self.block_reference_alias = enabled,
            Feature::ConfirmAllNewNotes => self.confirm_all_new_notes = enabled,
            Feature::ConfirmPhantomNotesOnly => self.confirm_phantom_notes_only = enabled,
            Feature::AutoHideProperties => self.auto_hide_properties = enabled,
        }
    }

    pub fn confirms_creation(&self) -> bool {
        self.confirm_all_new_notes || self.confirm_phantom_notes_only
    }
}

pub struct SettingsStore {
    settings_path: PathBuf,
}

impl SettingsStore {
    pub fn new(settings_path: PathBuf) -> Self {
        Self { settings_path }
    }

    pub fn default_store() -> Result<Self, SettingsError> {
        let project_dirs =
            ProjectDirs::from("app", "burnish", "Burnish").ok_or(SettingsError::ProjectDir)?;
        let config_dir = project_dirs.config_dir();
        Ok(Self::new(config_dir.join("settings.json")))
    }

    pub fn load(&self) -> Result<FeatureSettings, SettingsError> {
        if !self.settings_path.exists() {
            return Ok(FeatureSettings::default());
        }
        let raw = fs::read_to_string(&self.settings_path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn save(&self, settings: &FeatureSettings) -> Result<(), SettingsError> {
        if let Some(parent) = self.settings_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(settings)?;
        fs::write(&self.settings_path, data)?;
        Ok(())
    }

    pub fn set_enabled(
        &self,
        feature: Feature,
        enabled: bool,
    ) -> Result<FeatureSettings, SettingsError> {
        let mut settings = self.load()?;
        settings.set_enabled(feature, enabled);
        self.save(&settings)?;
        Ok(settings)
    }
}
