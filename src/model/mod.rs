//! Data model for scraped deputies
//!
//! - [`Record`]: one deputy's public data, immutable once built
//! - [`Field`]: a projectable record column
//! - [`DeputyTarget`]: one profile page queued for scraping
//! - [`TargetOutcome`]: terminal result of resolving a target

mod outcome;
mod record;
mod target;

pub use outcome::{FailureKind, TargetFailure, TargetOutcome};
pub use record::{Field, Record};
pub use target::DeputyTarget;
