//! Contract tests for the auction and holding-account models.
//!
//! Every test drives the public API only. Each contract check must hold
//! for the correct behavior, and every defect behavior must break at
//! least one of them.

mod auction;
