//! Variant selection.
//!
//! Each engine takes its behavior as a constructor argument. The
//! behavior is usually picked from an integer selector read once from the
//! `TESTCASE` environment variable; `0` means the correct behavior.

use crate::types::OracleError;

/// Environment variable holding the variant selector.
pub const VARIANT_ENV: &str = "TESTCASE";

/// Selector used when none is configured.
pub const DEFAULT_SELECTOR: i64 = 0;

/// Parse a raw selector value. Absent or blank values yield `default`.
pub fn parse_selector(raw: Option<&str>, default: i64) -> Result<i64, OracleError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some(s) => s
            .parse::<i64>()
            .map_err(|_| OracleError::Config(format!("Invalid variant selector: {s:?}"))),
    }
}

/// Read a selector from the environment variable `key`.
pub fn selector_from_env(key: &str, default: i64) -> Result<i64, OracleError> {
    let raw = std::env::var(key).ok();
    parse_selector(raw.as_deref(), default)
}

/// A closed set of behaviors for one engine, keyed by integer selector.
pub trait Variant: Sized + Copy + std::fmt::Debug {
    /// Map a selector to a behavior. Selectors with no defect assigned
    /// map to the correct behavior.
    fn from_selector(selector: i64) -> Self;

    /// The canonical selector for this behavior.
    fn selector(self) -> i64;

    fn is_correct(self) -> bool;

    /// Behavior chosen by the `TESTCASE` environment variable.
    fn from_env() -> Result<Self, OracleError> {
        let selector = selector_from_env(VARIANT_ENV, DEFAULT_SELECTOR)?;
        Ok(Self::from_selector(selector))
    }
}
