//! Core data models for spendlink
//!
//! These mirror the records exchanged with the server: spending items,
//! links, bank accounts, funding schedules, transactions and balances.

pub mod balance;
pub mod bank_account;
pub mod funding_schedule;
pub mod ids;
pub mod link;
pub mod money;
pub mod recurrence;
pub mod spending;
pub mod transaction;
pub mod user;

pub use balance::Balance;
pub use bank_account::BankAccount;
pub use funding_schedule::FundingSchedule;
pub use ids::{
    AccountId, BankAccountId, FundingScheduleId, LinkId, SpendingId, TransactionId, UserId,
};
pub use link::{Link, LinkStatus, LinkType};
pub use money::{Money, MoneyParseError};
pub use recurrence::{Frequency, RecurrenceParseError, RecurrenceRule};
pub use spending::{NewSpending, Spending, SpendingType};
pub use transaction::Transaction;
pub use user::User;
