//! Sealed-bid auction for a single item.
//!
//! Rules for the correct behavior:
//! 1. A bid must be positive (`InvalidArgument` otherwise) and at least
//!    the best bid so far plus the minimum increment (`NotPermitted`
//!    "Bid is too low" otherwise).
//! 2. Bids are allowed only while the auction is active. `start()` and
//!    `stop()` can be called any number of times.
//! 3. Bidder names are normalized ("  harry   haCkeR " → "Harry Hacker")
//!    and must not be blank.
//! 4. `best_bid()` and `winner()` can be queried at any time.

pub mod behavior;

use indexmap::IndexMap;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{debug, warn};

use crate::text::normalize;
use crate::types::OracleError;
use crate::variant::Variant;

pub use behavior::AuctionBehavior;

/// Ledger key for the zero-value placeholder entry.
pub const NO_BIDS: &str = "no bids";

// ---------------------------------------------------------------------------
// Loosely typed input
// ---------------------------------------------------------------------------

/// A bid argument whose type is only known at runtime, e.g. one read from
/// a JSON script.
#[derive(Debug, Clone, PartialEq)]
pub struct BidInput(Value);

impl BidInput {
    fn as_name(&self) -> Option<&str> {
        self.0.as_str()
    }

    fn as_amount(&self) -> Option<Decimal> {
        let Value::Number(n) = &self.0 else {
            return None;
        };
        if let Some(i) = n.as_i64() {
            Some(Decimal::from(i))
        } else if let Some(u) = n.as_u64() {
            Some(Decimal::from(u))
        } else {
            n.as_f64().and_then(Decimal::from_f64)
        }
    }
}

impl From<Value> for BidInput {
    fn from(value: Value) -> Self {
        BidInput(value)
    }
}

impl From<&str> for BidInput {
    fn from(s: &str) -> Self {
        BidInput(Value::from(s))
    }
}

impl From<i64> for BidInput {
    fn from(n: i64) -> Self {
        BidInput(Value::from(n))
    }
}

impl From<f64> for BidInput {
    fn from(n: f64) -> Self {
        BidInput(Value::from(n))
    }
}

// ---------------------------------------------------------------------------
// Auction
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Auction {
    name: String,
    increment: Decimal,
    active: bool,
    bids: IndexMap<String, Decimal>,
    last_bidder: String,
    behavior: AuctionBehavior,
}

impl Auction {
    /// Create an inactive auction. `min_increment` must be positive.
    pub fn new(
        name: impl Into<String>,
        min_increment: Decimal,
        behavior: AuctionBehavior,
    ) -> Result<Self, OracleError> {
        if min_increment <= Decimal::ZERO {
            return Err(OracleError::invalid("bidding increment must be positive"));
        }
        Ok(Self::build(name.into(), min_increment, behavior))
    }

    /// Create an auction with a minimum increment of 1.
    pub fn with_default_increment(name: impl Into<String>, behavior: AuctionBehavior) -> Self {
        Self::build(name.into(), Decimal::ONE, behavior)
    }

    fn build(name: String, increment: Decimal, behavior: AuctionBehavior) -> Self {
        let mut bids = IndexMap::new();
        bids.insert(NO_BIDS.to_string(), Decimal::ZERO);
        debug!(
            item = %name,
            increment = %increment,
            behavior = ?behavior,
            selector = behavior.selector(),
            "Auction created"
        );
        Self {
            name,
            increment,
            active: false,
            bids,
            last_bidder: NO_BIDS.to_string(),
            behavior,
        }
    }

    /// Create an auction whose behavior comes from the `TESTCASE` variable.
    pub fn from_env(name: impl Into<String>, min_increment: Decimal) -> Result<Self, OracleError> {
        Self::new(name, min_increment, AuctionBehavior::from_env()?)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn increment(&self) -> Decimal {
        self.increment
    }

    pub fn behavior(&self) -> AuctionBehavior {
        self.behavior
    }

    /// Normalized name from the most recent bid that reached the
    /// acceptance check, whether or not it was accepted.
    pub fn last_bidder(&self) -> &str {
        &self.last_bidder
    }

    /// Enable bidding.
    pub fn start(&mut self) {
        self.active = true;
    }

    /// Disable bidding.
    pub fn stop(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active || self.behavior == AuctionBehavior::AlwaysActive
    }

    /// Submit a bid.
    ///
    /// The name is normalized before it is recorded. On success the
    /// bidder's ledger entry is overwritten with `amount`.
    pub fn bid(&mut self, bidder: &str, amount: Decimal) -> Result<(), OracleError> {
        if bidder.is_empty() {
            return Err(OracleError::invalid("Missing bidder name"));
        }
        let bidder = normalize(bidder);
        if bidder.is_empty() && self.behavior != AuctionBehavior::BlankNameAccepted {
            return Err(OracleError::invalid("Bidder name may not be blank"));
        }
        if !self.accept_bid(&bidder, amount)? {
            return Ok(());
        }
        debug!(item = %self.name, bidder = %bidder, amount = %amount, "Bid accepted");
        self.bids.insert(bidder, amount);
        Ok(())
    }

    /// Submit a bid whose arguments are typed only at runtime.
    ///
    /// The bidder must be a string and the amount a number; otherwise a
    /// `WrongType` error is returned before any other check.
    pub fn bid_input(&mut self, bidder: &BidInput, amount: &BidInput) -> Result<(), OracleError> {
        let name = bidder.as_name().ok_or_else(|| {
            OracleError::WrongType("Bidder name must be a non-empty string".to_string())
        })?;
        let amount = amount
            .as_amount()
            .ok_or_else(|| OracleError::WrongType("Amount must be a number".to_string()))?;
        self.bid(name, amount)
    }

    /// Highest amount in the ledger; zero when nobody has bid.
    pub fn best_bid(&self) -> Decimal {
        self.bids.values().copied().max().unwrap_or(Decimal::ZERO)
    }

    /// Name of the highest bidder. Ties go to whoever entered the ledger
    /// first. Returns [`NO_BIDS`] when nobody has bid.
    pub fn winner(&self) -> String {
        if self.behavior == AuctionBehavior::LastBidderWins {
            return self.last_bidder.clone();
        }
        let best = self.best_bid();
        self.bids
            .iter()
            .find(|(_, amount)| **amount == best)
            .map(|(bidder, _)| bidder.clone())
            .unwrap_or_else(|| NO_BIDS.to_string())
    }

    /// Ledger entries in insertion order, placeholder included.
    pub fn bids(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.bids.iter().map(|(name, &amount)| (name.as_str(), amount))
    }

    /// Apply the acceptance rule for this auction's behavior.
    ///
    /// `Ok(true)` accepts the bid, `Ok(false)` drops it silently.
    fn accept_bid(&mut self, bidder: &str, amount: Decimal) -> Result<bool, OracleError> {
        self.last_bidder = bidder.to_string();
        let best = self.best_bid();
        // `None` when best bid plus increment is past the largest amount,
        // in which case no bid can reach it.
        let floor = best.checked_add(self.increment);

        match self.behavior {
            AuctionBehavior::RejectAtIncrement => {
                self.require_active()?;
                require_positive(amount)?;
                if floor.map_or(true, |floor| amount <= floor) {
                    return Err(too_low());
                }
            }
            AuctionBehavior::IgnoreIncrement => {
                self.require_active()?;
                require_non_negative(amount)?;
                if amount <= best {
                    return Err(too_low());
                }
            }
            AuctionBehavior::BidWhileStopped => {
                require_non_negative(amount)?;
                if below(amount, floor) {
                    return Err(too_low());
                }
            }
            AuctionBehavior::SilentReject => {
                self.require_active()?;
                if amount < Decimal::ZERO || below(amount, floor) {
                    warn!(item = %self.name, bidder, amount = %amount, "Bid dropped");
                    return Ok(false);
                }
            }
            AuctionBehavior::Correct
            | AuctionBehavior::AlwaysActive
            | AuctionBehavior::LastBidderWins
            | AuctionBehavior::BlankNameAccepted => {
                self.require_active()?;
                require_positive(amount)?;
                if below(amount, floor) {
                    return Err(too_low());
                }
            }
        }
        Ok(true)
    }

    fn require_active(&self) -> Result<(), OracleError> {
        if self.active {
            Ok(())
        } else {
            Err(OracleError::not_permitted("Bidding not allowed now"))
        }
    }
}

fn require_positive(amount: Decimal) -> Result<(), OracleError> {
    if amount <= Decimal::ZERO {
        return Err(OracleError::invalid("Amount is invalid"));
    }
    Ok(())
}

fn require_non_negative(amount: Decimal) -> Result<(), OracleError> {
    if amount < Decimal::ZERO {
        return Err(OracleError::invalid("Amount is invalid"));
    }
    Ok(())
}

fn below(amount: Decimal, floor: Option<Decimal>) -> bool {
    floor.map_or(true, |floor| amount < floor)
}

fn too_low() -> OracleError {
    OracleError::not_permitted("Bid is too low")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
