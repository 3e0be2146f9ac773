//! Holding account — cash and check deposits with check holds.
//!
//! The balance is always total deposits minus withdrawals. The value of a
//! check is held back from the available balance until the check is
//! cleared, and the minimum balance is never available for withdrawal:
//!
//! `available = max(0, balance - max(min_balance, sum of uncleared checks))`

pub mod behavior;

use rust_decimal::Decimal;
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::types::{Check, CheckId, Funds, Money, OracleError};
use crate::variant::Variant;

pub use behavior::AccountBehavior;

#[derive(Debug, Clone)]
pub struct HoldingAccount {
    name: String,
    min_balance: Decimal,
    balance: Decimal,
    /// Checks waiting to clear, in deposit order.
    pending: Vec<Check>,
    /// Every check ever deposited.
    deposited: HashSet<CheckId>,
    behavior: AccountBehavior,
}

impl HoldingAccount {
    /// Open an account with a zero balance.
    ///
    /// # Panics
    ///
    /// Panics if `min_balance` is negative.
    pub fn new(name: impl Into<String>, min_balance: Decimal, behavior: AccountBehavior) -> Self {
        assert!(
            min_balance >= Decimal::ZERO,
            "min balance parameter must not be negative"
        );
        let name = name.into();
        debug!(
            account = %name,
            min_balance = %min_balance,
            behavior = ?behavior,
            selector = behavior.selector(),
            "Account opened"
        );
        Self {
            name,
            min_balance,
            balance: Decimal::ZERO,
            pending: Vec::new(),
            deposited: HashSet::new(),
            behavior,
        }
    }

    /// Open an account whose behavior comes from the `TESTCASE` variable.
    pub fn from_env(name: impl Into<String>, min_balance: Decimal) -> Result<Self, OracleError> {
        Ok(Self::new(name, min_balance, AccountBehavior::from_env()?))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn min_balance(&self) -> Decimal {
        self.min_balance
    }

    pub fn behavior(&self) -> AccountBehavior {
        self.behavior
    }

    /// Checks deposited but not yet cleared.
    pub fn pending_checks(&self) -> &[Check] {
        &self.pending
    }

    /// Sum of all deposits minus all withdrawals.
    pub fn balance(&self) -> Decimal {
        match self.behavior {
            AccountBehavior::BalanceExcludesHolds => self.balance - self.holds(),
            _ => self.balance,
        }
    }

    /// The most that can be withdrawn right now.
    pub fn available(&self) -> Decimal {
        let holds = self.holds();
        let avail = match self.behavior {
            AccountBehavior::AvailableSubtractsBoth => self.balance - self.min_balance - holds,
            AccountBehavior::MinimumIgnored => self.balance - holds,
            _ => self.balance - self.min_balance.max(holds),
        };
        avail.max(Decimal::ZERO)
    }

    /// Deposit cash or a check. The value must be positive, and a check
    /// may only be deposited once.
    pub fn deposit(&mut self, funds: impl Into<Funds>) -> Result<(), OracleError> {
        let funds = funds.into();
        let value = funds.value();
        if value < Decimal::ZERO {
            return Err(OracleError::invalid("Value to deposit must be positive."));
        }
        if value == Decimal::ZERO {
            if self.behavior != AccountBehavior::DepositZero {
                return Err(OracleError::invalid("Value to deposit must be positive."));
            }
            warn!(account = %self.name, "Accepting deposit of zero");
        }
        if let Funds::Check(check) = &funds {
            if self.deposited.contains(&check.id())
                && self.behavior != AccountBehavior::DuplicateCheck
            {
                return Err(OracleError::invalid("Check already deposited"));
            }
        }
        // Holds never exceed the balance, so this also bounds their sum.
        let balance = self
            .balance
            .checked_add(value)
            .ok_or_else(|| OracleError::invalid("Deposit would overflow the balance"))?;
        if let Funds::Check(check) = funds {
            self.deposited.insert(check.id());
            self.pending.push(check);
        }
        self.balance = balance;
        debug!(account = %self.name, value = %value, balance = %self.balance, "Deposit");
        Ok(())
    }

    /// Release the hold on a pending check.
    pub fn clear_check(&mut self, check: &Check) -> Result<(), OracleError> {
        match self.pending.iter().position(|c| c == check) {
            Some(idx) => {
                self.pending.remove(idx);
                debug!(account = %self.name, check = %check.id(), "Check cleared");
                Ok(())
            }
            None if self.behavior == AccountBehavior::ClearAnyCheck => {
                warn!(account = %self.name, check = %check.id(), "Ignoring clear of unknown check");
                Ok(())
            }
            None => Err(OracleError::InvalidArgument(format!(
                "Check {} is not an uncleared check",
                check.id()
            ))),
        }
    }

    /// Withdraw at most the available balance.
    ///
    /// Returns the withdrawn money. `Ok(None)` means nothing was withdrawn
    /// and no error was reported.
    pub fn withdraw(&mut self, amount: Decimal) -> Result<Option<Money>, OracleError> {
        if amount <= Decimal::ZERO {
            return Err(OracleError::invalid("Amount to withdraw must be positive"));
        }
        let available = self.available();
        if amount > available {
            if self.behavior == AccountBehavior::WithdrawFailsSilently {
                warn!(account = %self.name, amount = %amount, available = %available, "Overdraw ignored");
                return Ok(None);
            }
            return Err(exceeds_available());
        }
        if amount == available && self.behavior == AccountBehavior::CantWithdrawAvailable {
            return Err(exceeds_available());
        }
        // Build the money first so a failure leaves the balance untouched.
        let money = Money::new(amount)?;
        self.balance -= amount;
        debug!(account = %self.name, amount = %amount, balance = %self.balance, "Withdrawal");
        Ok(Some(money))
    }

    fn holds(&self) -> Decimal {
        self.pending
            .iter()
            .map(Check::value)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }
}

fn exceeds_available() -> OracleError {
    OracleError::invalid("Amount exceeds available balance")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
