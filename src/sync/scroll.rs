//! Scroll-dependent header styling.

use std::sync::Arc;

use tokio::sync::mpsc;

use super::readiness::{Readiness, RetryPolicy, await_ready};
use crate::config::ScrollOptions;
use crate::dom::{NodeRef, Surface};
use crate::fragment::{SlotHandle, SlotStatus};
use crate::log;

/// Mirrors "the page is scrolled past the threshold" onto a style class of
/// the header element.
///
/// The header element lives inside the injected header fragment and is
/// addressed by its own id, not the placeholder's, so the controller first
/// awaits the slot and then resolves the element.
pub struct ScrollController {
    surface: Arc<dyn Surface>,
    options: ScrollOptions,
}

impl ScrollController {
    pub fn new(surface: Arc<dyn Surface>, options: ScrollOptions) -> Self {
        Self { surface, options }
    }

    /// Wait for the header element, then consume scroll notifications in
    /// arrival order until the stream closes.
    pub async fn run(self, handle: Option<SlotHandle>, mut scroll_rx: mpsc::Receiver<u32>) {
        if let Some(mut slot) = handle {
            match slot.wait().await {
                SlotStatus::Installed => {}
                status => {
                    log!("scroll"; "header fragment unavailable ({status:?}), scroll styling disabled");
                    return;
                }
            }
        }

        // Injection indexes synchronously, so after an installed slot the
        // first probe normally succeeds; the poll only matters for the
        // handle-less path and for fragments missing the expected element.
        let probe_surface = Arc::clone(&self.surface);
        let header_id = self.options.header_id.clone();
        let ready = await_ready(
            move || probe_surface.find(&header_id).is_some(),
            RetryPolicy::default(),
        )
        .await;
        if ready == Readiness::GaveUp {
            log!("scroll"; "header `#{}` never appeared, scroll styling disabled", self.options.header_id);
            return;
        }
        let Some(header) = self.surface.find(&self.options.header_id) else {
            return;
        };

        while let Some(y) = scroll_rx.recv().await {
            self.apply(header, y);
        }
    }

    /// Recompute the scrolled state from one notification and mirror it
    /// onto the class. Toggles both directions; never latches.
    pub fn apply(&self, header: NodeRef, y: u32) {
        if y > self.options.threshold_px {
            self.surface.add_class(header, &self.options.scrolled_class);
        } else {
            self.surface
                .remove_class(header, &self.options.scrolled_class);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;
    use crate::fragment::SlotFault;
    use tokio::sync::watch;

    const PAGE: &str = r#"<header id="main-header"><nav></nav></header>"#;

    fn controller(doc: &Arc<Document>) -> ScrollController {
        ScrollController::new(doc.clone(), ScrollOptions::default())
    }

    #[test]
    fn test_threshold_sequence_toggles_both_ways() {
        let doc = Arc::new(Document::parse(PAGE));
        let ctrl = controller(&doc);
        let header = doc.find("main-header").unwrap();

        let mut observed = Vec::new();
        for y in [0, 60, 40, 100] {
            ctrl.apply(header, y);
            observed.push(doc.has_class(header, "scrolled"));
        }
        assert_eq!(observed, vec![false, true, false, true]);
    }

    #[test]
    fn test_threshold_is_strictly_greater() {
        let doc = Arc::new(Document::parse(PAGE));
        let ctrl = controller(&doc);
        let header = doc.find("main-header").unwrap();

        ctrl.apply(header, 50);
        assert!(!doc.has_class(header, "scrolled"));
        ctrl.apply(header, 51);
        assert!(doc.has_class(header, "scrolled"));
    }

    #[tokio::test]
    async fn test_run_consumes_stream_until_close() {
        let doc = Arc::new(Document::parse(PAGE));
        let (tx, rx) = mpsc::channel(8);

        for y in [0u32, 60, 40, 100] {
            tx.send(y).await.unwrap();
        }
        drop(tx);

        controller(&doc).run(None, rx).await;
        let header = doc.find("main-header").unwrap();
        assert!(doc.has_class(header, "scrolled"));
    }

    #[tokio::test]
    async fn test_failed_slot_disables_styling() {
        let doc = Arc::new(Document::parse(PAGE));
        let (slot_tx, slot_rx) = watch::channel(SlotStatus::Failed(SlotFault::Fetch));
        let (tx, rx) = mpsc::channel(8);

        controller(&doc)
            .run(Some(SlotHandle::from_receiver(slot_rx)), rx)
            .await;
        drop(slot_tx);

        // The controller returned without subscribing; its receiver is gone.
        assert!(tx.send(60).await.is_err());
        let header = doc.find("main-header").unwrap();
        assert!(!doc.has_class(header, "scrolled"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_header_gives_up_quietly() {
        let doc = Arc::new(Document::parse(r#"<div id="header-placeholder"></div>"#));
        let (tx, rx) = mpsc::channel(8);
        controller(&doc).run(None, rx).await;
        assert!(tx.send(60).await.is_err());
    }
}
