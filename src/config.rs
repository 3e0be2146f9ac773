//! Configuration loading from TOML with environment variable fallback.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs. A
//! section without an explicit `variant` takes its selector from the
//! `TESTCASE` environment variable.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs;

use crate::account::{AccountBehavior, HoldingAccount};
use crate::auction::{Auction, AuctionBehavior};
use crate::variant::{selector_from_env, Variant, DEFAULT_SELECTOR, VARIANT_ENV};

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub auction: AuctionConfig,
    pub account: AccountConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuctionConfig {
    pub item_name: String,
    #[serde(default = "default_increment")]
    pub min_increment: Decimal,
    /// Overrides the `TESTCASE` selector when set.
    #[serde(default)]
    pub variant: Option<i64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AccountConfig {
    pub name: String,
    #[serde(default)]
    pub min_balance: Decimal,
    #[serde(default)]
    pub variant: Option<i64>,
}

fn default_increment() -> Decimal {
    Decimal::ONE
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        Self::parse(&contents).with_context(|| format!("Failed to parse config file: {path}"))
    }

    /// Parse configuration from TOML text.
    pub fn parse(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        Ok(config)
    }
}

impl AuctionConfig {
    pub fn behavior(&self) -> Result<AuctionBehavior> {
        Ok(AuctionBehavior::from_selector(resolve_selector(self.variant)?))
    }

    /// Build the configured auction (inactive).
    pub fn build(&self) -> Result<Auction> {
        let auction = Auction::new(self.item_name.clone(), self.min_increment, self.behavior()?)?;
        Ok(auction)
    }
}

impl AccountConfig {
    pub fn behavior(&self) -> Result<AccountBehavior> {
        Ok(AccountBehavior::from_selector(resolve_selector(self.variant)?))
    }

    pub fn build(&self) -> Result<HoldingAccount> {
        anyhow::ensure!(
            self.min_balance >= Decimal::ZERO,
            "account.min_balance must not be negative"
        );
        Ok(HoldingAccount::new(self.name.clone(), self.min_balance, self.behavior()?))
    }
}

fn resolve_selector(explicit: Option<i64>) -> Result<i64> {
    match explicit {
        Some(selector) => Ok(selector),
        None => selector_from_env(VARIANT_ENV, DEFAULT_SELECTOR)
            .with_context(|| format!("Failed to read {VARIANT_ENV}")),
    }
}
