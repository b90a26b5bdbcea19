//! Domain Policies
//!
//! Business rules that govern behavior.
//! These are pure functions that operate on domain entities.

mod packaging_conflict;

pub use packaging_conflict::{PackagingConflictPolicy, ResourceSlots, SlotOutcome};
