//! Link model
//!
//! A link is a connection to a bank data provider for one institution, or a
//! manual link whose accounts are maintained by hand.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::LinkId;

/// How the link's data is maintained, sent as an integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum LinkType {
    Plaid,
    Manual,
}

impl From<LinkType> for u8 {
    fn from(value: LinkType) -> Self {
        match value {
            LinkType::Plaid => 1,
            LinkType::Manual => 2,
        }
    }
}

impl TryFrom<u8> for LinkType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Plaid),
            2 => Ok(Self::Manual),
            other => Err(format!("unknown link type {}", other)),
        }
    }
}

/// Setup state of a link, sent as an integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum LinkStatus {
    Pending,
    Setup,
    Error,
}

impl From<LinkStatus> for u8 {
    fn from(value: LinkStatus) -> Self {
        match value {
            LinkStatus::Pending => 1,
            LinkStatus::Setup => 2,
            LinkStatus::Error => 3,
        }
    }
}

impl TryFrom<u8> for LinkStatus {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, <Self as TryFrom<u8>>::Error> {
        match value {
            1 => Ok(LinkStatus::Pending),
            2 => Ok(LinkStatus::Setup),
            3 => Ok(LinkStatus::Error),
            other => Err(format!("unknown link status {}", other)),
        }
    }
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkStatus::Pending => write!(f, "Pending"),
            LinkStatus::Setup => write!(f, "Ready"),
            LinkStatus::Error => write!(f, "Error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub link_id: LinkId,
    pub link_type: LinkType,
    pub link_status: LinkStatus,
    #[serde(default)]
    pub institution_name: String,
}

impl Link {
    pub fn is_manual(&self) -> bool {
        self.link_type == LinkType::Manual
    }
}
