//! ORACLES — demo runner.
//!
//! Loads configuration, initialises structured logging, then walks the
//! configured auction and account through a short illustrative session,
//! logging the outcome of every step.

use anyhow::Result;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{info, warn};

use oracles::config::AppConfig;
use oracles::types::{Check, Money, OracleError};
use oracles::{Auction, HoldingAccount, Variant};

fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    init_logging();

    let path = std::env::var("ORACLES_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    let cfg = AppConfig::load(&path)?;

    let mut auction = cfg.auction.build()?;
    info!(
        item = %auction.name(),
        increment = %auction.increment(),
        behavior = ?auction.behavior(),
        selector = auction.behavior().selector(),
        "Auction ready"
    );
    run_auction(&mut auction);

    let mut account = cfg.account.build()?;
    info!(
        account = %account.name(),
        min_balance = %account.min_balance(),
        behavior = ?account.behavior(),
        selector = account.behavior().selector(),
        "Account ready"
    );
    run_account(&mut account)?;

    Ok(())
}

fn run_auction(auction: &mut Auction) {
    auction.start();
    let bids = [
        ("Jim", dec!(250)),
        ("Harry", dec!(300)),
        (" biRd ", dec!(400)),
        ("Jim", dec!(400.1)),
        ("", dec!(1000)),
    ];
    for (bidder, amount) in bids {
        report("bid", auction.bid(bidder, amount));
    }
    info!(best = %auction.best_bid(), winner = %auction.winner(), "Standings");

    auction.stop();
    info!(active = auction.is_active(), "Auction stopped");
    report("bid while stopped", auction.bid("Jim", dec!(1000)));

    auction.start();
    report("bid", auction.bid("mai", dec!(402.50)));
    info!(best = %auction.best_bid(), winner = %auction.winner(), "Final standings");
}

fn run_account(account: &mut HoldingAccount) -> Result<()> {
    report("deposit cash", account.deposit(Money::new(dec!(10000))?));
    log_balances(account);

    let check = Check::new(dec!(40000))?;
    report("deposit check", account.deposit(&check));
    log_balances(account);

    report("withdraw 30000", account.withdraw(dec!(30000)).map(|_| ()));
    report("clear check", account.clear_check(&check));
    log_balances(account);

    match account.withdraw(dec!(30000)) {
        Ok(Some(money)) => info!(value = %money.value(), "withdraw 30000 ok"),
        Ok(None) => warn!("withdraw 30000 returned nothing"),
        Err(e) => warn!(error = %e, "withdraw 30000 failed"),
    }
    log_balances(account);
    Ok(())
}

fn report(step: &str, outcome: Result<(), OracleError>) {
    match outcome {
        Ok(()) => info!(step, "ok"),
        Err(e) => warn!(step, kind = ?e.kind(), error = %e, "rejected"),
    }
}

fn log_balances(account: &HoldingAccount) {
    let holds: Decimal = account.pending_checks().iter().map(Check::value).sum();
    info!(
        balance = %account.balance(),
        available = %account.available(),
        holds = %holds,
        "Balances"
    );
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("oracles=info"));

    let json_logging = std::env::var("ORACLES_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    }
}
