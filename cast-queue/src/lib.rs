//! Remote queue reconciliation
//!
//! The external SDK never delivers "the queue" atomically. Membership
//! and ordering arrive as id-level deltas (insert, remove, wholesale
//! replace), and item content arrives later through asynchronous
//! fetches that may complete out of order relative to the deltas. The
//! reconciler maintains a correctly ordered local mirror without ever
//! holding a complete snapshot at once, and never exposes an
//! inconsistent view: ids whose content has not arrived are simply
//! skipped until the fetch closes the gap.
//!
//! # Architecture
//!
//! ```text
//! QueueReconciler
//! ├── order: Vec<ItemId>            (authoritative ordering)
//! └── items: HashMap<ItemId, QueueItem>  (content cache)
//!
//! id-level deltas ──▶ order          fetch completions ──▶ items
//!                      └──── ordered_snapshot() ────┘
//! ```
//!
//! The reconciler is pure and synchronous: operations that need
//! content return the ids to fetch, and the caller dispatches the
//! fetch without blocking inside the event handler.

mod reconciler;

pub use reconciler::QueueReconciler;
