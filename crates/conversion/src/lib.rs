//! Conversion tables for quote normalization.
//!
//! This crate handles:
//! - Currency cross rates via a USD pivot
//! - Unit-of-measure price conversion with dimension checking
//! - Incoterm freight adjustment through an Ex-Works baseline

pub mod incoterms;
pub mod rates;
pub mod units;

pub use incoterms::{IncotermTable, DEFAULT_INCOTERM};
pub use rates::RateTable;
pub use units::{BaseDimension, UnitTable, UomConversion};
