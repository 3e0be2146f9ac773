//! Auction contract.

use oracles::auction::NO_BIDS;
use oracles::{Auction, AuctionBehavior, BidInput, ErrorKind};
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

type Contract = fn(AuctionBehavior) -> bool;

fn running(behavior: AuctionBehavior) -> Auction {
    let mut auction = Auction::with_default_increment("Widget", behavior);
    auction.start();
    auction
}

fn kind_of(result: Result<(), oracles::OracleError>) -> Option<ErrorKind> {
    result.err().map(|e| e.kind())
}

// ---------------------------------------------------------------------------
// Contract checks
// ---------------------------------------------------------------------------

fn bid_at_increment_is_accepted(behavior: AuctionBehavior) -> bool {
    let mut auction = running(behavior);
    auction.bid("ann", dec!(10)).is_ok()
        && auction.bid("bob", dec!(11)).is_ok()
        && auction.best_bid() == dec!(11)
}

fn bid_below_increment_is_too_low(behavior: AuctionBehavior) -> bool {
    let mut auction = running(behavior);
    auction.bid("ann", dec!(10)).is_ok()
        && kind_of(auction.bid("bob", dec!(10.5))) == Some(ErrorKind::NotPermitted)
        && auction.best_bid() == dec!(10)
}

fn zero_bid_is_invalid(behavior: AuctionBehavior) -> bool {
    let mut auction = running(behavior);
    kind_of(auction.bid("ann", Decimal::ZERO)) == Some(ErrorKind::InvalidArgument)
}

fn negative_bid_is_invalid(behavior: AuctionBehavior) -> bool {
    let mut auction = running(behavior);
    kind_of(auction.bid("ann", dec!(-1))) == Some(ErrorKind::InvalidArgument)
}

fn stopped_auction_refuses_bids(behavior: AuctionBehavior) -> bool {
    let mut auction = running(behavior);
    auction.stop();
    kind_of(auction.bid("ann", dec!(100))) == Some(ErrorKind::NotPermitted)
        && auction.best_bid() == Decimal::ZERO
}

fn never_started_auction_refuses_bids(behavior: AuctionBehavior) -> bool {
    let mut auction = Auction::with_default_increment("Widget", behavior);
    kind_of(auction.bid("ann", dec!(100))) == Some(ErrorKind::NotPermitted)
}

fn is_active_tracks_start_and_stop(behavior: AuctionBehavior) -> bool {
    let mut auction = Auction::with_default_increment("Widget", behavior);
    let before = auction.is_active();
    auction.start();
    let started = auction.is_active();
    auction.stop();
    !before && started && !auction.is_active()
}

fn winner_is_highest_bidder(behavior: AuctionBehavior) -> bool {
    let mut auction = running(behavior);
    let _ = auction.bid("ann", dec!(100));
    let _ = auction.bid("bob", dec!(50));
    auction.winner() == "Ann"
}

fn blank_name_is_invalid(behavior: AuctionBehavior) -> bool {
    let mut auction = running(behavior);
    kind_of(auction.bid("   ", dec!(10))) == Some(ErrorKind::InvalidArgument)
        && auction.best_bid() == Decimal::ZERO
}

const CONTRACT: &[(&str, Contract)] = &[
    ("bid_at_increment_is_accepted", bid_at_increment_is_accepted),
    ("bid_below_increment_is_too_low", bid_below_increment_is_too_low),
    ("zero_bid_is_invalid", zero_bid_is_invalid),
    ("negative_bid_is_invalid", negative_bid_is_invalid),
    ("stopped_auction_refuses_bids", stopped_auction_refuses_bids),
    ("never_started_auction_refuses_bids", never_started_auction_refuses_bids),
    ("is_active_tracks_start_and_stop", is_active_tracks_start_and_stop),
    ("winner_is_highest_bidder", winner_is_highest_bidder),
    ("blank_name_is_invalid", blank_name_is_invalid),
];

fn broken_contracts(behavior: AuctionBehavior) -> Vec<&'static str> {
    CONTRACT
        .iter()
        .filter(|(_, check)| !check(behavior))
        .map(|(name, _)| *name)
        .collect()
}

#[test]
fn correct_auction_meets_contract() {
    assert!(broken_contracts(AuctionBehavior::Correct).is_empty());
}

#[rstest]
#[case(AuctionBehavior::RejectAtIncrement, "bid_at_increment_is_accepted")]
#[case(AuctionBehavior::IgnoreIncrement, "bid_below_increment_is_too_low")]
#[case(AuctionBehavior::BidWhileStopped, "stopped_auction_refuses_bids")]
#[case(AuctionBehavior::SilentReject, "bid_below_increment_is_too_low")]
#[case(AuctionBehavior::AlwaysActive, "is_active_tracks_start_and_stop")]
#[case(AuctionBehavior::LastBidderWins, "winner_is_highest_bidder")]
#[case(AuctionBehavior::BlankNameAccepted, "blank_name_is_invalid")]
fn contract_catches_defect(#[case] behavior: AuctionBehavior, #[case] expected: &str) {
    let broken = broken_contracts(behavior);
    assert!(
        broken.contains(&expected),
        "{behavior:?} broke {broken:?}, expected {expected}"
    );
}

#[test]
fn every_defect_is_caught() {
    for behavior in AuctionBehavior::defects() {
        assert!(
            !broken_contracts(behavior).is_empty(),
            "{behavior:?} passed the whole contract"
        );
    }
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn widget_session() {
    let mut auction = running(AuctionBehavior::Correct);
    auction.bid("jim", dec!(250)).unwrap();
    auction.bid("harry", dec!(300)).unwrap();
    auction.bid(" biRd ", dec!(400)).unwrap();
    assert_eq!(auction.best_bid(), dec!(400));
    assert_eq!(auction.winner(), "Bird");

    assert_eq!(kind_of(auction.bid("jim", dec!(400.1))), Some(ErrorKind::NotPermitted));
    assert_eq!(kind_of(auction.bid("", dec!(1000))), Some(ErrorKind::InvalidArgument));
    assert_eq!(auction.winner(), "Bird");
}

#[test]
fn stopped_widget_refuses_bid() {
    let mut auction = Auction::with_default_increment("Widget", AuctionBehavior::Correct);
    auction.start();
    auction.stop();
    assert_eq!(kind_of(auction.bid("jim", dec!(1000))), Some(ErrorKind::NotPermitted));
}

#[test]
fn best_bid_tracks_maximum_accepted() {
    let mut auction = Auction::new("Lamp", dec!(0.25), AuctionBehavior::Correct).unwrap();
    auction.start();
    let mut highest = Decimal::ZERO;
    let mut leader = NO_BIDS.to_string();
    for (i, amount) in [dec!(1), dec!(0.5), dec!(1.25), dec!(3), dec!(3.1), dec!(10)]
        .into_iter()
        .enumerate()
    {
        let name = format!("bidder {i}");
        if auction.bid(&name, amount).is_ok() {
            highest = amount;
            leader = oracles::text::normalize(&name);
        }
        assert_eq!(auction.best_bid(), highest);
        assert_eq!(auction.winner(), leader);
    }
    assert_eq!(highest, dec!(10));
}

#[test]
fn rebid_keeps_ledger_position() {
    let mut auction = running(AuctionBehavior::Correct);
    auction.bid("ann", dec!(10)).unwrap();
    auction.bid("bob", dec!(20)).unwrap();
    auction.bid("ann", dec!(21)).unwrap();
    auction.bid("bob", dec!(22)).unwrap();
    assert_eq!(auction.winner(), "Bob");
    let names: Vec<_> = auction.bids().map(|(n, _)| n.to_string()).collect();
    assert_eq!(names, vec![NO_BIDS, "Ann", "Bob"]);
}

#[test]
fn no_bids_winner_is_placeholder() {
    let auction = running(AuctionBehavior::Correct);
    assert_eq!(auction.best_bid(), Decimal::ZERO);
    assert_eq!(auction.winner(), NO_BIDS);
}

#[test]
fn independent_instances_keep_their_behavior() {
    let mut good = running(AuctionBehavior::Correct);
    let mut bad = running(AuctionBehavior::IgnoreIncrement);
    good.bid("ann", dec!(10)).unwrap();
    bad.bid("ann", dec!(10)).unwrap();
    assert!(good.bid("bob", dec!(10.5)).is_err());
    assert!(bad.bid("bob", dec!(10.5)).is_ok());
}

#[test]
fn loosely_typed_bids() {
    let mut auction = running(AuctionBehavior::Correct);
    let json: serde_json::Value = serde_json::json!({"bidder": "  harry   haCkeR ", "amount": 12.5});
    auction
        .bid_input(
            &BidInput::from(json["bidder"].clone()),
            &BidInput::from(json["amount"].clone()),
        )
        .unwrap();
    assert_eq!(auction.winner(), "Harry Hacker");

    let err = auction
        .bid_input(&BidInput::from(json["amount"].clone()), &BidInput::from(50i64))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::WrongType);
}

#[test]
fn maximum_bid_cannot_be_topped() {
    let mut auction = running(AuctionBehavior::Correct);
    auction.bid("ann", Decimal::MAX).unwrap();
    assert_eq!(kind_of(auction.bid("bob", dec!(1))), Some(ErrorKind::NotPermitted));
    assert_eq!(auction.best_bid(), Decimal::MAX);
    assert_eq!(auction.winner(), "Ann");
}
