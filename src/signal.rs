//! Environment signal ingress.
//!
//! Defines the JSON message format for notifications crossing the host
//! boundary (scroll offset changes, viewport-intersection reports) and the
//! hub that routes parsed signals to their single consumer each:
//!
//! ```text
//! host --[json]--> SignalHub --[scroll]-----> ScrollController
//!                           --[intersect]--> RevealAnimator
//! ```
//!
//! Delivery is in arrival order; each notification is fully processed
//! before the next because every stream has exactly one consumer.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::dom::NodeRef;

const CHANNEL_BUFFER: usize = 32;

/// One notification from the embedding environment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EnvSignal {
    /// Vertical scroll offset changed.
    Scroll { y: u32 },

    /// An observed element's visible fraction changed.
    Intersect {
        /// Element identity at the host boundary (see [`NodeRef::index`]).
        node: u32,
        /// Fraction of the element currently visible.
        ratio: f32,
    },
}

impl EnvSignal {
    /// Serialize to JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| r#"{"type":"scroll","y":0}"#.to_string())
    }

    /// Parse from JSON string.
    pub fn from_json(s: &str) -> Option<Self> {
        serde_json::from_str(s).ok()
    }
}

/// Intersection notification, resolved to a tree handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectEvent {
    pub node: NodeRef,
    pub ratio: f32,
}

/// Sending side of the page's notification streams.
///
/// Dropping the hub closes both streams, which is how consumers learn the
/// page is shutting down.
pub struct SignalHub {
    scroll_tx: mpsc::Sender<u32>,
    intersect_tx: mpsc::Sender<IntersectEvent>,
}

/// Receiving side, consumed by the runtime wiring.
pub struct SignalStreams {
    pub scroll: mpsc::Receiver<u32>,
    pub intersect: mpsc::Receiver<IntersectEvent>,
}

impl SignalHub {
    /// Create a hub and its paired streams.
    pub fn channel() -> (Self, SignalStreams) {
        let (scroll_tx, scroll_rx) = mpsc::channel(CHANNEL_BUFFER);
        let (intersect_tx, intersect_rx) = mpsc::channel(CHANNEL_BUFFER);
        (
            Self {
                scroll_tx,
                intersect_tx,
            },
            SignalStreams {
                scroll: scroll_rx,
                intersect: intersect_rx,
            },
        )
    }

    /// Publish a scroll offset. A closed stream means the consumer is gone;
    /// the signal is dropped.
    pub async fn scroll(&self, y: u32) {
        self.scroll_tx.send(y).await.ok();
    }

    /// Publish an intersection report.
    pub async fn intersect(&self, node: NodeRef, ratio: f32) {
        self.intersect_tx
            .send(IntersectEvent { node, ratio })
            .await
            .ok();
    }

    /// Route one parsed signal.
    pub async fn dispatch(&self, signal: EnvSignal) {
        match signal {
            EnvSignal::Scroll { y } => self.scroll(y).await,
            EnvSignal::Intersect { node, ratio } => {
                self.intersect(NodeRef::from_index(node), ratio).await;
            }
        }
    }

    /// Parse and route one raw message. Returns `false` for unparseable
    /// input, which is logged and otherwise ignored.
    pub async fn dispatch_json(&self, raw: &str) -> bool {
        match EnvSignal::from_json(raw) {
            Some(signal) => {
                self.dispatch(signal).await;
                true
            }
            None => {
                crate::debug!("signal"; "unparseable message dropped: {raw}");
                false
            }
        }
    }
}
