//! Strongly-typed ID wrappers for server-assigned identifiers
//!
//! The server hands out numeric ids for every record. Wrapping them keeps a
//! `LinkId` from ever being passed where a `BankAccountId` is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            /// Get the raw numeric id, as used in request paths
            pub const fn get(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().parse()?))
            }
        }
    };
}

define_id!(AccountId);
define_id!(UserId);
define_id!(LinkId);
define_id!(BankAccountId);
define_id!(FundingScheduleId);
define_id!(SpendingId);
define_id!(TransactionId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display_is_raw_number() {
        assert_eq!(LinkId::new(42).to_string(), "42");
    }

    #[test]
    fn test_id_serialization() {
        let id = BankAccountId::new(7);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "7");

        let deserialized: BankAccountId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_id_parse() {
        assert_eq!(" 12 ".parse::<FundingScheduleId>().unwrap().get(), 12);
        assert!("abc".parse::<FundingScheduleId>().is_err());
    }
}
