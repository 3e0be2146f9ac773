//! Auction behaviors.
//!
//! `Correct` follows the auction rules. Every other member differs from it
//! in exactly one check.

use serde::{Deserialize, Serialize};

use crate::variant::Variant;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuctionBehavior {
    #[default]
    Correct,
    /// Rejects a bid equal to best bid plus increment.
    RejectAtIncrement,
    /// Accepts any bid above the best bid, ignoring the increment.
    /// A zero bid is reported as too low rather than invalid.
    IgnoreIncrement,
    /// Accepts bids while the auction is stopped.
    BidWhileStopped,
    /// Drops negative or too-low bids without raising.
    SilentReject,
    /// `is_active()` reports true even when stopped.
    AlwaysActive,
    /// `winner()` returns the most recent bidder, not the highest.
    LastBidderWins,
    /// A name that is blank after normalization is accepted.
    BlankNameAccepted,
}

impl AuctionBehavior {
    pub const ALL: &'static [AuctionBehavior] = &[
        AuctionBehavior::Correct,
        AuctionBehavior::RejectAtIncrement,
        AuctionBehavior::IgnoreIncrement,
        AuctionBehavior::BidWhileStopped,
        AuctionBehavior::SilentReject,
        AuctionBehavior::AlwaysActive,
        AuctionBehavior::LastBidderWins,
        AuctionBehavior::BlankNameAccepted,
    ];

    /// Defect behaviors only.
    pub fn defects() -> impl Iterator<Item = AuctionBehavior> {
        Self::ALL.iter().copied().filter(|b| !b.is_correct())
    }
}

impl Variant for AuctionBehavior {
    fn from_selector(selector: i64) -> Self {
        match selector {
            2 => AuctionBehavior::RejectAtIncrement,
            3 => AuctionBehavior::IgnoreIncrement,
            4 => AuctionBehavior::BidWhileStopped,
            5 => AuctionBehavior::SilentReject,
            6 => AuctionBehavior::AlwaysActive,
            7 => AuctionBehavior::LastBidderWins,
            8 => AuctionBehavior::BlankNameAccepted,
            _ => AuctionBehavior::Correct,
        }
    }

    fn selector(self) -> i64 {
        match self {
            AuctionBehavior::Correct => 1,
            AuctionBehavior::RejectAtIncrement => 2,
            AuctionBehavior::IgnoreIncrement => 3,
            AuctionBehavior::BidWhileStopped => 4,
            AuctionBehavior::SilentReject => 5,
            AuctionBehavior::AlwaysActive => 6,
            AuctionBehavior::LastBidderWins => 7,
            AuctionBehavior::BlankNameAccepted => 8,
        }
    }

    fn is_correct(self) -> bool {
        self == AuctionBehavior::Correct
    }
}
