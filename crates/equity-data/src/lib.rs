//! Calculation layer for the equity calculator.
//!
//! Responsible for loading the grant log, tokenizing allocation strings,
//! distributing grants into the contributor ledger, applying transfers,
//! aggregating the ownership table and persisting it.

pub mod aggregator;
pub mod allocation;
pub mod analysis;
pub mod distributor;
pub mod ledger;
pub mod reader;
pub mod transfers;
pub mod writer;

pub use equity_core as core;
