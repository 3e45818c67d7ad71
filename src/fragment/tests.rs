use std::sync::Arc;
use std::time::Duration;

use rustc_hash::FxHashMap;

use super::loader::FragmentLoader;
use super::types::{FragmentSpec, SlotFault, SlotStatus};
use super::{Composer, LoadError};
use crate::dom::{Document, Surface};

const PAGE: &str = r#"
    <body>
        <div id="header-placeholder"></div>
        <main><p>static content</p></main>
        <div id="footer-placeholder"></div>
    </body>
"#;

const HEADER: &str =
    r#"<header id="main-header"><nav class="nav-links"><a href="index.html">Home</a></nav></header>"#;
const FOOTER: &str = r#"<footer id="site-footer"><p>fine print</p></footer>"#;

/// In-memory loader; locators absent from the map resolve to a 404.
#[derive(Clone, Default)]
struct MapLoader {
    fragments: FxHashMap<String, String>,
    /// Per-locator artificial latency.
    delays: FxHashMap<String, Duration>,
}

impl MapLoader {
    fn with(mut self, locator: &str, content: &str) -> Self {
        self.fragments.insert(locator.into(), content.into());
        self
    }

    fn delayed(mut self, locator: &str, delay: Duration) -> Self {
        self.delays.insert(locator.into(), delay);
        self
    }
}

impl FragmentLoader for MapLoader {
    async fn load(&self, locator: &str) -> Result<String, LoadError> {
        if let Some(delay) = self.delays.get(locator) {
            tokio::time::sleep(*delay).await;
        }
        match self.fragments.get(locator) {
            Some(content) => Ok(content.clone()),
            None => Err(LoadError::Status {
                locator: locator.to_string(),
                status: 404,
            }),
        }
    }
}

fn specs() -> Vec<FragmentSpec> {
    vec![
        FragmentSpec::new("_header.html", "header-placeholder"),
        FragmentSpec::new("_footer.html", "footer-placeholder"),
    ]
}

#[tokio::test]
async fn test_success_installs_at_the_right_slot() {
    let doc = Arc::new(Document::parse(PAGE));
    let composer = Composer::new(doc.clone(), specs());
    let loader = MapLoader::default()
        .with("_header.html", HEADER)
        .with("_footer.html", FOOTER);

    let outcome = composer.run(loader).await;

    assert!(outcome.is_complete());
    assert_eq!(outcome.installed.len(), 2);
    // Header content under the header slot, footer content under the footer
    // slot, never crossed.
    let header = doc.find("main-header").unwrap();
    let slot = doc.find("header-placeholder").unwrap();
    assert!(doc.anchors_under(slot).iter().any(|(_, href)| href == "index.html"));
    assert!(doc.anchors_under(doc.find("footer-placeholder").unwrap()).is_empty());
    assert_ne!(header, slot);
    assert!(doc.find("site-footer").is_some());
}

#[tokio::test]
async fn test_failure_leaves_slot_untouched_and_sibling_unaffected() {
    let doc = Arc::new(Document::parse(PAGE));
    let composer = Composer::new(doc.clone(), specs());
    // Header missing from the loader: forced 404.
    let loader = MapLoader::default().with("_footer.html", FOOTER);

    let outcome = composer.run(loader).await;

    assert_eq!(outcome.installed, vec!["footer-placeholder".to_string()]);
    assert_eq!(
        outcome.failed,
        vec![("header-placeholder".to_string(), SlotFault::Fetch)]
    );
    assert!(doc.find("main-header").is_none());
    assert!(doc.find("site-footer").is_some());
}

#[tokio::test(start_paused = true)]
async fn test_slow_failing_load_does_not_delay_sibling() {
    let doc = Arc::new(Document::parse(PAGE));
    let composer = Arc::new(Composer::new(doc.clone(), specs()));
    // Header hangs for a second and then 404s; footer resolves immediately.
    let loader = MapLoader::default()
        .with("_footer.html", FOOTER)
        .delayed("_header.html", Duration::from_secs(1));

    let mut footer = composer.handle("footer-placeholder").unwrap();
    let mut header = composer.handle("header-placeholder").unwrap();

    let driver = {
        let composer = Arc::clone(&composer);
        tokio::spawn(async move { composer.run(loader).await })
    };

    // The footer completes while the header load is still in flight.
    assert_eq!(footer.wait().await, SlotStatus::Installed);
    assert_eq!(header.status(), SlotStatus::Pending);

    assert_eq!(header.wait().await, SlotStatus::Failed(SlotFault::Fetch));
    let outcome = driver.await.unwrap();
    assert_eq!(outcome.installed, vec!["footer-placeholder".to_string()]);
}

#[tokio::test]
async fn test_missing_placeholder_is_absorbed() {
    let doc = Arc::new(Document::parse(PAGE));
    let composer = Composer::new(
        doc.clone(),
        vec![
            FragmentSpec::new("_header.html", "no-such-slot"),
            FragmentSpec::new("_footer.html", "footer-placeholder"),
        ],
    );
    let loader = MapLoader::default()
        .with("_header.html", HEADER)
        .with("_footer.html", FOOTER);

    let outcome = composer.run(loader).await;

    assert_eq!(
        outcome.failed,
        vec![("no-such-slot".to_string(), SlotFault::MissingPlaceholder)]
    );
    // Content never landed anywhere else.
    assert!(doc.find("main-header").is_none());
    assert!(doc.find("site-footer").is_some());
}

#[tokio::test]
async fn test_second_run_never_reinjects() {
    let doc = Arc::new(Document::parse(PAGE));
    let composer = Composer::new(doc.clone(), specs());

    let first = MapLoader::default()
        .with("_header.html", HEADER)
        .with("_footer.html", FOOTER);
    composer.run(first).await;

    // A second resolution of the same slots must not re-fire the injection.
    let second = MapLoader::default()
        .with("_header.html", r#"<header id="other-header"></header>"#)
        .with("_footer.html", FOOTER);
    composer.run(second).await;

    assert!(doc.find("main-header").is_some());
    assert!(doc.find("other-header").is_none());
}

#[tokio::test]
async fn test_duplicate_mapping_keeps_first() {
    let doc = Arc::new(Document::parse(PAGE));
    let composer = Composer::new(
        doc.clone(),
        vec![
            FragmentSpec::new("_header.html", "header-placeholder"),
            FragmentSpec::new("_other.html", "header-placeholder"),
        ],
    );
    let loader = MapLoader::default()
        .with("_header.html", HEADER)
        .with("_other.html", r#"<header id="other-header"></header>"#);

    let outcome = composer.run(loader).await;

    assert_eq!(outcome.installed, vec!["header-placeholder".to_string()]);
    assert!(doc.find("main-header").is_some());
    assert!(doc.find("other-header").is_none());
}

#[tokio::test]
async fn test_handle_resolves_terminally() {
    let doc = Arc::new(Document::parse(PAGE));
    let composer = Composer::new(doc.clone(), specs());
    let loader = MapLoader::default()
        .with("_header.html", HEADER)
        .with("_footer.html", FOOTER);

    let mut handle = composer.handle("header-placeholder").unwrap();
    assert_eq!(handle.status(), SlotStatus::Pending);
    assert!(composer.handle("unknown").is_none());

    composer.run(loader).await;
    assert_eq!(handle.wait().await, SlotStatus::Installed);
    // Terminal: a later wait resolves immediately to the same status.
    assert_eq!(handle.wait().await, SlotStatus::Installed);
}
