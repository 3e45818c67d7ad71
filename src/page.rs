//! Page runtime - wires up the composition system.
//!
//! The page is a thin orchestrator that:
//! - Parses the page HTML into the shared document
//! - Creates communication channels
//! - Spawns the composer and the dependent consumers
//!
//! ```text
//! Composer --[slot watch]--> NavHighlighter
//!                            ScrollController
//! SignalHub --[scroll]-----> ScrollController
//!           --[intersect]--> RevealAnimator
//! ```

use std::sync::Arc;

use anyhow::Result;
use tokio::task::JoinHandle;

use crate::config::PageConfig;
use crate::dom::{Document, Surface};
use crate::fragment::{ComposeOutcome, Composer, FragmentLoader};
use crate::log;
use crate::path::PagePath;
use crate::reveal::RevealAnimator;
use crate::signal::SignalHub;
use crate::sync::{NavHighlighter, ScrollController};

/// A parsed page, ready to compose.
pub struct Page {
    config: PageConfig,
    document: Arc<Document>,
    current: PagePath,
}

impl Page {
    /// Parse the page and validate the slot mapping.
    pub fn open(html: &str, current: PagePath, config: PageConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            document: Arc::new(Document::parse(html)),
            current,
        })
    }

    /// The shared render tree.
    pub fn document(&self) -> Arc<Document> {
        Arc::clone(&self.document)
    }

    /// Spawn the composer and every consumer. No ordering is imposed
    /// between them; each becomes ready independently.
    pub fn start<L>(self, loader: L) -> PageDriver
    where
        L: FragmentLoader + 'static,
    {
        let surface: Arc<dyn Surface> = self.document.clone();
        let (hub, streams) = SignalHub::channel();

        let composer = Arc::new(Composer::new(
            Arc::clone(&surface),
            self.config.fragments.clone(),
        ));
        let nav_slot = self
            .config
            .nav
            .await_placeholder
            .as_deref()
            .and_then(|placeholder| composer.handle(placeholder));
        let scroll_slot = self
            .config
            .scroll
            .await_placeholder
            .as_deref()
            .and_then(|placeholder| composer.handle(placeholder));

        let compose = tokio::spawn({
            let composer = Arc::clone(&composer);
            async move { composer.run(loader).await }
        });
        let nav = tokio::spawn(
            NavHighlighter::new(
                Arc::clone(&surface),
                self.config.nav.clone(),
                self.current.clone(),
            )
            .run(nav_slot),
        );
        let scroll = tokio::spawn(
            ScrollController::new(Arc::clone(&surface), self.config.scroll.clone())
                .run(scroll_slot, streams.scroll),
        );
        let reveal = tokio::spawn(
            RevealAnimator::discover(Arc::clone(&surface), self.config.reveal.clone())
                .run(streams.intersect),
        );

        PageDriver {
            document: self.document,
            hub,
            compose,
            nav,
            scroll,
            reveal,
        }
    }
}

/// Handle to a running page: signal ingress plus final collection.
pub struct PageDriver {
    document: Arc<Document>,
    hub: SignalHub,
    compose: JoinHandle<ComposeOutcome>,
    nav: JoinHandle<usize>,
    scroll: JoinHandle<()>,
    reveal: JoinHandle<usize>,
}

impl PageDriver {
    /// Signal ingress for the embedding environment.
    pub fn signals(&self) -> &SignalHub {
        &self.hub
    }

    /// The shared render tree.
    pub fn document(&self) -> Arc<Document> {
        Arc::clone(&self.document)
    }

    /// Close the signal streams and collect everything.
    pub async fn shutdown(self) -> PageReport {
        // Dropping the hub closes both streams; the consumers drain what is
        // buffered and stop.
        drop(self.hub);

        let compose = self.compose.await.unwrap_or_else(|e| {
            log!("error"; "composer task failed: {e}");
            ComposeOutcome::default()
        });
        let nav_marked = self.nav.await.unwrap_or(0);
        self.scroll.await.ok();
        let revealed = self.reveal.await.unwrap_or(0);

        PageReport {
            compose,
            nav_marked,
            revealed,
        }
    }
}

/// What one page run did.
#[derive(Debug)]
pub struct PageReport {
    pub compose: ComposeOutcome,
    pub nav_marked: usize,
    pub revealed: usize,
}
