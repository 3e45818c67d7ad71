//! Active-navigation highlighting.

use std::sync::Arc;

use super::readiness::{Readiness, RetryPolicy, await_ready};
use crate::config::NavOptions;
use crate::dom::Surface;
use crate::fragment::{SlotHandle, SlotStatus};
use crate::path::PagePath;
use crate::{debug, log};

/// Marks the nav link(s) pointing at the current page.
///
/// The links arrive with the header fragment, so the highlighter first
/// awaits that slot's completion (or bounded-polls for the container when
/// no slot handle exists), then runs its scan exactly once.
pub struct NavHighlighter {
    surface: Arc<dyn Surface>,
    options: NavOptions,
    current: PagePath,
}

impl NavHighlighter {
    pub fn new(surface: Arc<dyn Surface>, options: NavOptions, current: PagePath) -> Self {
        Self {
            surface,
            options,
            current,
        }
    }

    /// Wait for the nav links to exist, then highlight. Returns the number
    /// of links marked (zero when the dependency never became available).
    pub async fn run(self, handle: Option<SlotHandle>) -> usize {
        match handle {
            Some(mut slot) => match slot.wait().await {
                SlotStatus::Installed => {}
                status => {
                    log!("nav"; "header fragment unavailable ({status:?}), highlight skipped");
                    return 0;
                }
            },
            None => {
                let surface = Arc::clone(&self.surface);
                let container = self.options.container_class.clone();
                let ready =
                    await_ready(move || !surface.marked(&container).is_empty(), RetryPolicy::default())
                        .await;
                if ready == Readiness::GaveUp {
                    log!("nav"; "nav container `.{}` never appeared, highlight skipped", self.options.container_class);
                    return 0;
                }
            }
        }
        self.apply()
    }

    /// Scan the nav containers and mark every anchor whose target matches
    /// the current page. Multiple links declaring the same target are all
    /// marked.
    pub fn apply(&self) -> usize {
        let current = self.current.file_name();
        let mut marked = 0;
        for container in self.surface.marked(&self.options.container_class) {
            for (anchor, href) in self.surface.anchors_under(container) {
                if target_matches(&href, current, &self.options.home_target) {
                    self.surface.add_class(anchor, &self.options.active_class);
                    marked += 1;
                }
            }
        }
        debug!("nav"; "{marked} active link(s) for `/{current}`");
        marked
    }
}

/// A link is active when its declared target equals the current page's file
/// name; the empty root name counts as the home target.
fn target_matches(href: &str, current_file: &str, home_target: &str) -> bool {
    href == current_file || (current_file.is_empty() && href == home_target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;
    use crate::fragment::SlotFault;
    use tokio::sync::watch;

    const HEADER_PAGE: &str = r#"
        <body>
            <div id="header-placeholder">
                <nav class="nav-links">
                    <a href="a.html">A</a>
                    <a href="b.html">B</a>
                    <a href="index.html">Home</a>
                </nav>
            </div>
        </body>
    "#;

    fn highlighter(doc: &Arc<Document>, current: &str) -> NavHighlighter {
        NavHighlighter::new(
            doc.clone(),
            NavOptions::default(),
            PagePath::from_browser(current),
        )
    }

    fn active_targets(doc: &Document) -> Vec<String> {
        let nav = doc.marked("nav-links");
        doc.anchors_under(nav[0])
            .into_iter()
            .filter(|(anchor, _)| doc.has_class(*anchor, "active"))
            .map(|(_, href)| href)
            .collect()
    }

    #[test]
    fn test_matching_rules() {
        assert!(target_matches("b.html", "b.html", "index.html"));
        assert!(!target_matches("a.html", "b.html", "index.html"));
        // Root page normalizes to the home target.
        assert!(target_matches("index.html", "", "index.html"));
        assert!(!target_matches("a.html", "", "index.html"));
    }

    #[test]
    fn test_exactly_the_current_page_is_marked() {
        let doc = Arc::new(Document::parse(HEADER_PAGE));
        let marked = highlighter(&doc, "/b.html").apply();
        assert_eq!(marked, 1);
        assert_eq!(active_targets(&doc), vec!["b.html"]);
    }

    #[test]
    fn test_root_marks_the_home_link() {
        let doc = Arc::new(Document::parse(HEADER_PAGE));
        let marked = highlighter(&doc, "/").apply();
        assert_eq!(marked, 1);
        assert_eq!(active_targets(&doc), vec!["index.html"]);
    }

    #[test]
    fn test_duplicate_targets_all_marked() {
        let doc = Arc::new(Document::parse(
            r#"<nav class="nav-links">
                <a href="b.html">B</a>
                <a href="b.html">B again</a>
            </nav>"#,
        ));
        let marked = highlighter(&doc, "/b.html").apply();
        assert_eq!(marked, 2);
    }

    #[tokio::test]
    async fn test_run_awaits_slot_completion() {
        let doc = Arc::new(Document::parse(HEADER_PAGE));
        let (tx, rx) = watch::channel(SlotStatus::Pending);
        let task = tokio::spawn(
            highlighter(&doc, "/a.html").run(Some(SlotHandle::from_receiver(rx))),
        );

        tx.send_replace(SlotStatus::Installed);
        assert_eq!(task.await.unwrap(), 1);
        assert_eq!(active_targets(&doc), vec!["a.html"]);
    }

    #[tokio::test]
    async fn test_failed_slot_skips_highlight() {
        let doc = Arc::new(Document::parse(HEADER_PAGE));
        let (tx, rx) = watch::channel(SlotStatus::Pending);
        tx.send_replace(SlotStatus::Failed(SlotFault::Fetch));

        let marked = highlighter(&doc, "/a.html")
            .run(Some(SlotHandle::from_receiver(rx)))
            .await;
        assert_eq!(marked, 0);
        assert!(active_targets(&doc).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_without_handle_polls_until_container_exists() {
        let doc = Arc::new(Document::parse(r#"<div id="header-placeholder"></div>"#));
        let task = tokio::spawn(highlighter(&doc, "/b.html").run(None));

        // Container appears a few poll cycles later, as if a fragment landed.
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        let slot = doc.find("header-placeholder").unwrap();
        doc.replace_content(slot, r#"<nav class="nav-links"><a href="b.html">B</a></nav>"#);

        assert_eq!(task.await.unwrap(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_without_handle_gives_up_quietly() {
        let doc = Arc::new(Document::parse(r#"<div id="header-placeholder"></div>"#));
        let marked = highlighter(&doc, "/b.html").run(None).await;
        assert_eq!(marked, 0);
    }
}
