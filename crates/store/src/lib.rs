//! Carbon context store.
//!
//! The single source of truth for the demo project's carbon dataset:
//! geometry aggregates, material factors, the category baseline, benchmarks,
//! precomputed scenarios, the reduction-strategy playbook, data-quality
//! coverage, operational-carbon assumptions and the IFC write-back mapping.
//!
//! The store is loaded and validated once at process start and frozen; every
//! consumer receives an explicit reference (usually `Arc<CarbonContext>`) —
//! there is no process-global instance. Concurrent reads need no locking.

pub mod error;
pub mod model;
pub mod quick_ref;
pub mod scenario;
pub mod units;

mod load;

pub use error::{Result, StoreError};
pub use model::*;
pub use quick_ref::QuickRef;
pub use scenario::{resolve_scenarios, ResolvedScenarios};
