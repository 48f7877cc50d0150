//! Holidays Core Library
//!
//! This crate provides the core functionality for the holidays service, including:
//! - Holiday data model (holidays, per-country counts)
//! - Upstream holiday source contract and its HTTP adapter
//! - Clock capability for "today" lookups
//! - Aggregation (recent holidays, non-weekend counts, common holidays)
//! - Configuration

pub mod aggregator;
pub mod clock;
pub mod config;
pub mod error;
pub mod model;
pub mod source;

pub use error::{Error, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::aggregator::HolidayAggregator;
    pub use crate::clock::{Clock, FixedClock, SystemClock};
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::model::{CountryHolidayCount, Holiday};
    pub use crate::source::{HolidaySource, HttpHolidaySource};
}
