//! ORACLES — variant-selectable auction and holding-account models.
//!
//! Each model ships one correct behavior and several defective ones, so
//! a contract test suite can be checked against every defect.
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod account;
pub mod auction;
pub mod config;
pub mod text;
pub mod types;
pub mod variant;

pub use account::{AccountBehavior, HoldingAccount};
pub use auction::{Auction, AuctionBehavior, BidInput};
pub use types::{Check, CheckId, ErrorKind, Funds, Money, OracleError};
pub use variant::Variant;
