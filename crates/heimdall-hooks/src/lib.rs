//! Lifecycle handlers: one per host event.
//!
//! Each handler is a one-shot transition over external session state — it
//! reads (and, for tracking, writes) through the [`ActivityTracker`] trait
//! and produces a single terminal outcome. Nothing is persisted here.

pub mod post_tool;
pub mod pre_tool;
pub mod session_start;
pub mod stop;

pub use pre_tool::Policy;
