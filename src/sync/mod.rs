//! Consumers whose correctness depends on injected content.
//!
//! Both consumers need a render-tree node the composer may not yet have
//! installed. Where a slot handle exists they await its completion signal;
//! where none does, they fall back to bounded readiness polling. Either
//! way, a permanently missing dependency ends in a diagnostic, never in a
//! dangling recheck loop.
//!
//! # Module Structure
//!
//! - `readiness` - Bounded predicate polling
//! - `nav` - Active-navigation highlighting
//! - `scroll` - Scroll-dependent header styling

mod nav;
mod readiness;
mod scroll;

pub use nav::NavHighlighter;
pub use readiness::{Readiness, RetryPolicy, await_ready};
pub use scroll::ScrollController;
