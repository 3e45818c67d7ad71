//! Slot specs, statuses, and per-run outcomes.

use serde::{Deserialize, Serialize};

/// One placeholder-to-resource mapping, fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FragmentSpec {
    /// Resource locator, relative to the page.
    pub locator: String,
    /// HTML id of the placeholder slot.
    pub placeholder: String,
}

impl FragmentSpec {
    pub fn new(locator: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            locator: locator.into(),
            placeholder: placeholder.into(),
        }
    }
}

/// Published lifecycle of one slot. Leaves `Pending` at most once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotStatus {
    /// Load not yet resolved.
    Pending,
    /// Content injected at the placeholder.
    Installed,
    /// Load or injection failed; the placeholder's prior content stands.
    Failed(SlotFault),
}

/// Why a slot failed. Details go to the log, not the status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotFault {
    /// The resource could not be fetched (transport or non-success status).
    Fetch,
    /// The configured placeholder is absent from the page - a configuration
    /// mismatch, not a transient condition.
    MissingPlaceholder,
}

/// Summary of one composition run.
#[derive(Debug, Default)]
pub struct ComposeOutcome {
    /// Placeholders that received content.
    pub installed: Vec<String>,
    /// Placeholders left untouched, with the fault class.
    pub failed: Vec<(String, SlotFault)>,
}

impl ComposeOutcome {
    pub(crate) fn record(&mut self, placeholder: String, status: SlotStatus) {
        match status {
            SlotStatus::Installed => self.installed.push(placeholder),
            SlotStatus::Failed(fault) => self.failed.push((placeholder, fault)),
            SlotStatus::Pending => {}
        }
    }

    /// Whether every slot received its content.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}
