mod launch;

use crate::{Conditions, Error, Exporter, Result};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing_subscriber::layer::{Context, SubscriberExt};

pub(crate) struct NamedExporter(pub &'static str);

impl Exporter for NamedExporter {
    fn target_name(&self) -> &str {
        self.0
    }

    fn export(&self, _root: &Path, _target: &Path, _conditions: &Conditions) -> Result<()> {
        Ok(())
    }
}

pub(crate) fn exporter(name: &'static str) -> Arc<dyn Exporter> {
    Arc::new(NamedExporter(name))
}

/// Writes nothing, but refuses roots that are not directories.
pub(crate) struct CheckedExporter(pub &'static str);

impl Exporter for CheckedExporter {
    fn target_name(&self) -> &str {
        self.0
    }

    fn export(&self, root: &Path, _target: &Path, _conditions: &Conditions) -> Result<()> {
        if !root.is_dir() {
            return Err(Error::Export {
                target_name: self.0.to_string(),
                message: format!("{} is not a documentation root", root.display()),
            });
        }
        Ok(())
    }
}

#[derive(Clone, Default)]
struct WarningCounter(Arc<AtomicUsize>);

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for WarningCounter {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == tracing::Level::WARN {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Runs `f` with a scoped subscriber and returns how many warnings it logged.
pub(crate) fn count_warnings<R>(f: impl FnOnce() -> R) -> (R, usize) {
    let counter = WarningCounter::default();
    let subscriber = tracing_subscriber::registry().with(counter.clone());
    let out = tracing::subscriber::with_default(subscriber, f);
    (out, counter.0.load(Ordering::SeqCst))
}
