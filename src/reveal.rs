//! One-shot entrance reveal.
//!
//! Elements carrying the marker class at initial render are observed for
//! viewport intersection; the first report at or above the trigger
//! threshold reveals the element and drops it from observation. Content
//! injected later is NOT retroactively covered - the reveal set is fixed at
//! startup.

use std::sync::Arc;

use rustc_hash::FxHashSet;
use tokio::sync::mpsc;

use crate::config::RevealOptions;
use crate::debug;
use crate::dom::{NodeRef, Surface};
use crate::signal::IntersectEvent;

/// Reveals marked elements as they cross into the viewport, once each.
pub struct RevealAnimator {
    surface: Arc<dyn Surface>,
    options: RevealOptions,
    /// Elements still awaiting their first qualifying intersection.
    pending: FxHashSet<NodeRef>,
}

impl RevealAnimator {
    /// Capture the fixed reveal set from the elements present at startup.
    pub fn discover(surface: Arc<dyn Surface>, options: RevealOptions) -> Self {
        let pending: FxHashSet<NodeRef> =
            surface.marked(&options.marker_class).into_iter().collect();
        debug!("reveal"; "observing {} element(s)", pending.len());
        Self {
            surface,
            options,
            pending,
        }
    }

    /// Number of elements still under observation.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Consume intersection reports until every observed element has
    /// revealed or the stream closes. Returns the reveal count.
    pub async fn run(mut self, mut rx: mpsc::Receiver<IntersectEvent>) -> usize {
        let mut revealed = 0;
        while !self.pending.is_empty() {
            let Some(event) = rx.recv().await else { break };
            if self.apply(event) {
                revealed += 1;
            }
        }
        revealed
    }

    /// Process one report. Returns `true` when it reveals a pending
    /// element; reports for unobserved or already-revealed elements and
    /// reports below the threshold are no-ops.
    pub fn apply(&mut self, event: IntersectEvent) -> bool {
        if event.ratio < self.options.threshold {
            return false;
        }
        if !self.pending.remove(&event.node) {
            return false;
        }
        self.surface
            .add_class(event.node, &self.options.visible_class);
        true
    }
}
