use super::Preferences;
use crate::{Error, Exporter, Result};
use std::fmt;
use std::path::{Path, PathBuf};

/// Identifies the preference touched by a [`PreferenceStore::update`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceKey {
    MercurialPath,
    ChmCompilerPath,
    DefaultExporter,
    RecentRepositories,
    RecentTargets,
    EditorFont,
    SpellChecking,
    PreviewMode,
    PreviewSplitterPos,
    FloatingPreview,
    MainWindow,
}

pub type PreferenceListener = Box<dyn FnMut(PreferenceKey, &Preferences)>;

/// Owns the loaded preferences and writes every change back to disk.
///
/// A store without a path keeps everything in memory.
pub struct PreferenceStore {
    path: Option<PathBuf>,
    prefs: Preferences,
    listeners: Vec<PreferenceListener>,
}

impl fmt::Debug for PreferenceStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreferenceStore")
            .field("path", &self.path)
            .field("prefs", &self.prefs)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl PreferenceStore {
    pub fn in_memory(prefs: Preferences) -> Self {
        Self {
            path: None,
            prefs,
            listeners: Vec::new(),
        }
    }

    /// Loads the preference file at `path`. A missing file yields the defaults.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let prefs = match std::fs::read_to_string(&path) {
            Ok(text) => {
                let mut prefs: Preferences =
                    serde_json::from_str(&text).map_err(|source| Error::InvalidPreferences {
                        path: path.clone(),
                        source,
                    })?;
                prefs.normalize();
                prefs
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no preference file, using defaults");
                Preferences::default()
            }
            Err(source) => return Err(Error::ReadPreferences { path, source }),
        };

        Ok(Self {
            path: Some(path),
            prefs,
            listeners: Vec::new(),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get(&self) -> &Preferences {
        &self.prefs
    }

    pub fn subscribe(&mut self, listener: impl FnMut(PreferenceKey, &Preferences) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Applies `change`, flushes the store and notifies listeners.
    ///
    /// Listeners are notified even when the flush fails; the flush error is returned afterwards.
    pub fn update(
        &mut self,
        key: PreferenceKey,
        change: impl FnOnce(&mut Preferences),
    ) -> Result<()> {
        change(&mut self.prefs);
        self.prefs.normalize();

        let flushed = self.flush();
        if let Err(err) = &flushed {
            tracing::warn!(?key, error = %err, "failed to flush preferences");
        }

        for listener in &mut self.listeners {
            listener(key, &self.prefs);
        }
        flushed
    }

    pub fn toggle_spell_checking(&mut self) -> Result<()> {
        self.update(PreferenceKey::SpellChecking, |p| {
            p.spell_checking = !p.spell_checking
        })
    }

    pub fn set_default_exporter(&mut self, exporter: &dyn Exporter) -> Result<()> {
        let name = exporter.target_name().to_string();
        self.update(PreferenceKey::DefaultExporter, |p| {
            p.default_exporter = Some(name)
        })
    }

    pub fn flush(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let write_err = |source: std::io::Error| Error::WritePreferences {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        let text = serde_json::to_string_pretty(&self.prefs).map_err(|err| {
            write_err(std::io::Error::new(std::io::ErrorKind::InvalidData, err))
        })?;
        std::fs::write(path, text).map_err(write_err)
    }
}
