use crate::{Conditions, Error, Result};
use indexmap::IndexMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Converts a documentation tree into a set of files in some target format (HTML, CHM, ...).
pub trait Exporter: Send + Sync {
    /// Short name of the target format. Used as the registry key and in UI messages.
    fn target_name(&self) -> &str;

    fn export(&self, root: &Path, target: &Path, conditions: &Conditions) -> Result<()>;
}

/// Name-to-exporter map built once when the application is composed.
///
/// Iteration follows registration order.
#[derive(Clone, Default)]
pub struct ExporterRegistry {
    exporters: IndexMap<String, Arc<dyn Exporter>>,
}

impl fmt::Debug for ExporterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExporterRegistry")
            .field("targets", &self.exporters.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ExporterRegistry {
    pub fn builder() -> ExporterRegistryBuilder {
        ExporterRegistryBuilder::default()
    }

    pub fn get(&self, target_name: &str) -> Result<&Arc<dyn Exporter>> {
        self.exporters
            .get(target_name)
            .ok_or_else(|| Error::ExporterNotFound {
                name: target_name.to_string(),
            })
    }

    /// Resolves the exporter selected in the preferences.
    ///
    /// With no preference the first registered exporter is used.
    pub fn default_exporter(&self, preferred: Option<&str>) -> Result<&Arc<dyn Exporter>> {
        match preferred {
            Some(name) => self.get(name),
            None => self
                .exporters
                .values()
                .next()
                .ok_or(Error::NoExporters),
        }
    }

    pub fn all(&self) -> impl Iterator<Item = &Arc<dyn Exporter>> {
        self.exporters.values()
    }

    pub fn target_names(&self) -> impl Iterator<Item = &str> {
        self.exporters.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.exporters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exporters.is_empty()
    }
}

#[derive(Default)]
pub struct ExporterRegistryBuilder {
    exporters: IndexMap<String, Arc<dyn Exporter>>,
    duplicate: Option<String>,
}

impl ExporterRegistryBuilder {
    pub fn register(mut self, exporter: Arc<dyn Exporter>) -> Self {
        let name = exporter.target_name().to_string();
        if self.exporters.contains_key(&name) {
            self.duplicate.get_or_insert(name);
            return self;
        }
        self.exporters.insert(name, exporter);
        self
    }

    pub fn build(self) -> Result<ExporterRegistry> {
        if let Some(name) = self.duplicate {
            return Err(Error::DuplicateExporter { name });
        }
        Ok(ExporterRegistry {
            exporters: self.exporters,
        })
    }
}
