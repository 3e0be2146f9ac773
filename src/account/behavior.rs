//! Holding account behaviors.

use serde::{Deserialize, Serialize};

use crate::variant::Variant;

/// Which account rule (if any) is broken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountBehavior {
    #[default]
    Correct,
    /// Available subtracts both the minimum balance and the holds.
    AvailableSubtractsBoth,
    /// Withdrawing exactly the available balance is refused.
    CantWithdrawAvailable,
    /// Clearing a check that is not pending is a silent no-op.
    ClearAnyCheck,
    /// Deposits of value zero are accepted.
    DepositZero,
    /// A check can be deposited more than once.
    DuplicateCheck,
    /// Overdrawing returns no money instead of an error.
    WithdrawFailsSilently,
    /// Reported balance leaves out uncleared checks.
    BalanceExcludesHolds,
    /// Minimum balance is not withheld from available.
    MinimumIgnored,
}

impl AccountBehavior {
    pub const ALL: &'static [AccountBehavior] = &[
        AccountBehavior::Correct,
        AccountBehavior::AvailableSubtractsBoth,
        AccountBehavior::CantWithdrawAvailable,
        AccountBehavior::ClearAnyCheck,
        AccountBehavior::DepositZero,
        AccountBehavior::DuplicateCheck,
        AccountBehavior::WithdrawFailsSilently,
        AccountBehavior::BalanceExcludesHolds,
        AccountBehavior::MinimumIgnored,
    ];

    pub fn defects() -> impl Iterator<Item = AccountBehavior> {
        Self::ALL.iter().copied().filter(|b| !b.is_correct())
    }
}

impl Variant for AccountBehavior {
    fn from_selector(selector: i64) -> Self {
        match selector {
            1 => AccountBehavior::AvailableSubtractsBoth,
            2 => AccountBehavior::CantWithdrawAvailable,
            3 => AccountBehavior::ClearAnyCheck,
            4 => AccountBehavior::DepositZero,
            5 => AccountBehavior::DuplicateCheck,
            6 => AccountBehavior::WithdrawFailsSilently,
            7 => AccountBehavior::BalanceExcludesHolds,
            9 => AccountBehavior::MinimumIgnored,
            _ => AccountBehavior::Correct,
        }
    }

    fn selector(self) -> i64 {
        match self {
            AccountBehavior::Correct => 0,
            AccountBehavior::AvailableSubtractsBoth => 1,
            AccountBehavior::CantWithdrawAvailable => 2,
            AccountBehavior::ClearAnyCheck => 3,
            AccountBehavior::DepositZero => 4,
            AccountBehavior::DuplicateCheck => 5,
            AccountBehavior::WithdrawFailsSilently => 6,
            AccountBehavior::BalanceExcludesHolds => 7,
            AccountBehavior::MinimumIgnored => 9,
        }
    }

    fn is_correct(self) -> bool {
        self == AccountBehavior::Correct
    }
}
