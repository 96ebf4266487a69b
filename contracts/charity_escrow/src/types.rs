//! # Types
//!
//! Shared data structures used across all modules of the charity escrow.
//!
//! ## Design decisions
//!
//! ### Config / State split
//!
//! A `Campaign` is internally stored as two separate ledger entries:
//!
//! - [`CampaignConfig`] — written once at creation; never mutated.
//! - [`CampaignState`] — written on every donation, withdrawal and on the
//!   terminal transition.
//!
//! The public API exposes the reconstructed [`Campaign`] struct for convenience.
//!
//! ### Status as a Finite-State Machine
//!
//! [`CampaignStatus`] replaces the `is_executed` / `is_removed` flag pair so
//! that "executed and removed" cannot be represented:
//!
//! ```text
//! Active ──► Executed
//!    └─────► Removed
//! ```
//!
//! Both terminal states reject every later transition.

use soroban_sdk::{contracttype, Address};

use crate::Error;

/// Strkey of the all-zero ed25519 account, treated as the null identity.
pub const NULL_ACCOUNT: &str = "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF";

/// Lifecycle status of a campaign.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CampaignStatus {
    /// Accepting donations and withdrawals.
    Active,
    /// Escrow released to the recipient.
    Executed,
    /// Cancelled by the creator; donors may still withdraw.
    Removed,
}

impl CampaignStatus {
    /// Reject any transition out of a terminal state.
    pub fn ensure_active(self) -> Result<(), Error> {
        match self {
            CampaignStatus::Active => Ok(()),
            CampaignStatus::Executed => Err(Error::AlreadyExecuted),
            CampaignStatus::Removed => Err(Error::AlreadyRemoved),
        }
    }

    /// Withdrawals stay open until the escrow has been released.
    pub fn ensure_not_executed(self) -> Result<(), Error> {
        match self {
            CampaignStatus::Executed => Err(Error::AlreadyExecuted),
            CampaignStatus::Active | CampaignStatus::Removed => Ok(()),
        }
    }
}

/// Immutable campaign configuration, written once at creation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignConfig {
    pub id: u64,
    pub creator: Address,
    pub recipient: Address,
    pub target_amount: i128,
    pub created_at: u64,
}

/// Mutable campaign state, updated on donations, withdrawals and the
/// terminal transition.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignState {
    pub total_amount: i128,
    pub status: CampaignStatus,
}

/// Full on-chain representation of a fundraising campaign.
///
/// Used as the public API return type; reconstructed internally from
/// the split `CampaignConfig` + `CampaignState` storage entries.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Campaign {
    /// Unique identifier, assigned sequentially from 1.
    pub id: u64,
    /// Address that created the campaign; the only one allowed to cancel or execute.
    pub creator: Address,
    /// Address that receives the escrow on execution.
    pub recipient: Address,
    /// Fundraising goal. Informational only; donations may exceed it.
    pub target_amount: i128,
    /// Sum of all contributions currently held for this campaign. After
    /// execution this is the amount that was released.
    pub total_amount: i128,
    /// Current lifecycle status.
    pub status: CampaignStatus,
    /// Ledger timestamp at creation.
    pub created_at: u64,
}

impl Campaign {
    pub fn is_executed(&self) -> bool {
        self.status == CampaignStatus::Executed
    }

    pub fn is_removed(&self) -> bool {
        self.status == CampaignStatus::Removed
    }
}
