//! Injection driver and completion signaling.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tokio::sync::watch;
use tokio::task::JoinSet;

use super::error::LoadError;
use super::loader::FragmentLoader;
use super::types::{ComposeOutcome, FragmentSpec, SlotFault, SlotStatus};
use crate::dom::Surface;
use crate::{debug, log};

/// Owns the fixed placeholder-to-resource mapping, drives one independent
/// load per slot, and performs the single injection side effect.
///
/// The composer is the sole writer of the "fragment installed" fact: each
/// slot's terminal status is published on a watch channel, so consumers
/// await readiness instead of guessing at load timing.
pub struct Composer {
    surface: Arc<dyn Surface>,
    specs: Vec<FragmentSpec>,
    slots: FxHashMap<String, Arc<watch::Sender<SlotStatus>>>,
}

impl Composer {
    /// Create a composer over the given slots. A placeholder mapped more
    /// than once keeps its first mapping; later ones are dropped with a
    /// warning (a duplicate would break the at-most-once injection
    /// guarantee).
    pub fn new(surface: Arc<dyn Surface>, specs: Vec<FragmentSpec>) -> Self {
        let mut slots = FxHashMap::default();
        let mut kept = Vec::with_capacity(specs.len());
        for spec in specs {
            if slots.contains_key(&spec.placeholder) {
                log!("compose"; "duplicate mapping for `{}` ignored ({})", spec.placeholder, spec.locator);
                continue;
            }
            let (tx, _) = watch::channel(SlotStatus::Pending);
            slots.insert(spec.placeholder.clone(), Arc::new(tx));
            kept.push(spec);
        }
        Self {
            surface,
            specs: kept,
            slots,
        }
    }

    /// Completion handle for one slot, or `None` for an unmapped
    /// placeholder.
    pub fn handle(&self, placeholder: &str) -> Option<SlotHandle> {
        self.slots
            .get(placeholder)
            .map(|tx| SlotHandle { rx: tx.subscribe() })
    }

    /// Drive every slot: one independent load each, injected as it
    /// resolves, in whatever order the loads complete.
    ///
    /// Meant to run once; slots already resolved by an earlier run are
    /// skipped, never re-injected.
    pub async fn run<L>(&self, loader: L) -> ComposeOutcome
    where
        L: FragmentLoader + 'static,
    {
        let loader = Arc::new(loader);
        let mut tasks = JoinSet::new();
        for spec in self.specs.clone() {
            let loader = Arc::clone(&loader);
            let surface = Arc::clone(&self.surface);
            let slot = Arc::clone(&self.slots[&spec.placeholder]);
            tasks.spawn(async move {
                let loaded = loader.load(&spec.locator).await;
                let status = install(surface.as_ref(), &spec, loaded, &slot);
                (spec.placeholder, status)
            });
        }

        let mut outcome = ComposeOutcome::default();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((placeholder, status)) => outcome.record(placeholder, status),
                Err(e) => log!("error"; "fragment task failed: {e}"),
            }
        }
        outcome
    }
}

/// Resolve one load result into the slot: inject on success, absorb on
/// failure, publish the terminal status either way.
fn install(
    surface: &dyn Surface,
    spec: &FragmentSpec,
    loaded: Result<String, LoadError>,
    slot: &watch::Sender<SlotStatus>,
) -> SlotStatus {
    let current = slot.borrow().clone();
    if current != SlotStatus::Pending {
        debug!("compose"; "slot `{}` already resolved, skipping", spec.placeholder);
        return current;
    }

    let status = match loaded {
        Ok(content) => match surface.find(&spec.placeholder) {
            Some(node) => {
                surface.replace_content(node, &content);
                debug!("compose"; "installed `{}` at `{}`", spec.locator, spec.placeholder);
                SlotStatus::Installed
            }
            None => {
                // Configuration mismatch, not a transient condition: no retry.
                log!("compose"; "placeholder `{}` not found, dropping `{}`", spec.placeholder, spec.locator);
                SlotStatus::Failed(SlotFault::MissingPlaceholder)
            }
        },
        Err(err) => {
            log!("compose"; "loading `{}` failed: {err}", spec.locator);
            SlotStatus::Failed(SlotFault::Fetch)
        }
    };

    slot.send_replace(status.clone());
    status
}

/// Clonable completion handle for one slot.
///
/// Adapted from the watch-channel wait pattern: the handle resolves as soon
/// as the slot leaves `Pending`, however early or late that happens.
#[derive(Debug, Clone)]
pub struct SlotHandle {
    rx: watch::Receiver<SlotStatus>,
}

impl SlotHandle {
    #[cfg(test)]
    pub(crate) fn from_receiver(rx: watch::Receiver<SlotStatus>) -> Self {
        Self { rx }
    }

    /// Current status, non-blocking.
    pub fn status(&self) -> SlotStatus {
        self.rx.borrow().clone()
    }

    /// Resolve once the slot reaches a terminal status.
    ///
    /// If the composer is dropped without driving the slot, this returns
    /// the last observed status (normally `Pending`); callers treat
    /// anything but `Installed` as "not available".
    pub async fn wait(&mut self) -> SlotStatus {
        loop {
            let status = self.rx.borrow().clone();
            if status != SlotStatus::Pending {
                return status;
            }
            if self.rx.changed().await.is_err() {
                return self.rx.borrow().clone();
            }
        }
    }
}
