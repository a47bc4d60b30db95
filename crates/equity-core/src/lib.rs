//! Shared types for the equity calculator.
//!
//! Holds the grant-log and ownership-table models, the error type, contributor
//! name normalisation, presentation formatting and CLI settings.

pub mod error;
pub mod formatting;
pub mod models;
pub mod names;
pub mod settings;

pub use error::{EquityError, Result};
