//! Seam - client-side composition runtime for static sites.
//!
//! Fetches shared HTML fragments (header, footer) and injects them into
//! placeholder slots of an already-rendered page, while keeping dependent UI
//! state correct against content that arrives at unknown times:
//!
//! ```text
//! FragmentLoader --> Composer --[slot watch]--> NavHighlighter
//!    (fetch)        (inject)                    ScrollController
//!
//! SignalHub --[scroll]-----> ScrollController --> Document
//!           --[intersect]--> RevealAnimator  --> Document
//! ```
//!
//! Composition is best-effort: a failed fragment leaves its slot empty and
//! never blocks sibling slots. Consumers await per-slot completion signals
//! instead of guessing at load timing.

pub mod config;
pub mod dom;
pub mod fragment;
pub mod logger;
pub mod page;
pub mod path;
pub mod reveal;
pub mod signal;
pub mod sync;

pub use config::PageConfig;
pub use dom::{Document, NodeRef, Surface};
pub use fragment::{
    ComposeOutcome, Composer, FragmentLoader, FragmentSpec, HttpLoader, LoadError, SlotFault,
    SlotHandle, SlotStatus,
};
pub use page::{Page, PageDriver, PageReport};
pub use path::PagePath;
pub use signal::{EnvSignal, SignalHub};
