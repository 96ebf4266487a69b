//! # Charity Escrow Contract
//!
//! A single Soroban contract, `CharityEscrow`, that holds donations for
//! fundraising campaigns until the campaign creator either releases them to
//! the recipient or cancels the campaign.
//!
//! | Phase        | Entry Point(s)                                        |
//! |--------------|-------------------------------------------------------|
//! | Bootstrap    | [`CharityEscrow::initialize`]                         |
//! | Registration | [`CharityEscrow::create_campaign`]                    |
//! | Funding      | [`CharityEscrow::donate`], [`CharityEscrow::un_donate`] |
//! | Termination  | [`CharityEscrow::cancel_campaign`], [`CharityEscrow::execute_campaign`] |
//! | Queries      | `get_campaign`, `contribution_of`, `campaign_count`, `total_escrowed`, `token`, `admin` |
//!
//! ## Architecture
//!
//! Storage access is fully delegated to [`storage`], lifecycle checks to
//! [`types::CampaignStatus`] and event payloads to [`events`]. This file
//! contains only the public entry points.
//!
//! Each entry point runs as one Soroban invocation: if any check fails or a
//! token transfer fails, the host discards every storage write made by the
//! call, so balances and status never diverge from the tokens actually held.
//!
//! ## Cancellation
//!
//! Cancelling does not refund anyone. Donors of a removed campaign get their
//! funds back by calling [`CharityEscrow::un_donate`] themselves.

#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, log, token, Address, Env, String,
};

pub mod events;
mod storage;
mod types;

#[cfg(test)]
mod test_auth;

use events::{CampaignCanceled, CampaignCreated, CampaignExecuted, Donated, UnDonated};
pub use types::{Campaign, CampaignStatus, NULL_ACCOUNT};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    NotFound           = 1,
    InvalidAmount      = 2,
    InvalidRecipient   = 3,
    Unauthorized       = 4,
    AlreadyExecuted    = 5,
    AlreadyRemoved     = 6,
    NoContribution     = 7,
    AlreadyInitialized = 8,
    NotInitialized     = 9,
    Overflow           = 10,
}

#[contract]
pub struct CharityEscrow;

#[contractimpl]
impl CharityEscrow {
    // ─────────────────────────────────────────────────────────
    // Initialisation
    // ─────────────────────────────────────────────────────────

    /// Configure the token every campaign is denominated in.
    ///
    /// Must be called exactly once after deployment. `admin` is recorded as
    /// the deployer of the registry and must sign the transaction.
    pub fn initialize(env: Env, admin: Address, token: Address) -> Result<(), Error> {
        admin.require_auth();
        if storage::is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }
        storage::set_admin(&env, &admin);
        storage::set_token(&env, &token);
        log!(&env, "escrow initialized", admin, token);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // State transitions
    // ─────────────────────────────────────────────────────────

    /// Register a new campaign and return its id.
    ///
    /// Ids are assigned sequentially starting at 1.
    pub fn create_campaign(
        env: Env,
        creator: Address,
        target_amount: i128,
        recipient: Address,
    ) -> Result<u64, Error> {
        creator.require_auth();
        storage::get_token(&env)?;

        if target_amount <= 0 {
            return Err(Error::InvalidAmount);
        }
        if is_null_recipient(&env, &recipient) {
            return Err(Error::InvalidRecipient);
        }

        let id = storage::next_campaign_id(&env)?;
        let campaign = Campaign {
            id,
            creator,
            recipient,
            target_amount,
            total_amount: 0,
            status: CampaignStatus::Active,
            created_at: env.ledger().timestamp(),
        };
        storage::save_campaign(&env, &campaign);

        log!(&env, "campaign created", id, target_amount);
        events::emit_campaign_created(
            &env,
            CampaignCreated {
                campaign_id: id,
                creator: campaign.creator,
                target_amount,
                recipient: campaign.recipient,
                is_executed: false,
                is_removed: false,
                created_at: campaign.created_at,
            },
        );
        Ok(id)
    }

    /// Mark a campaign as removed. Only the creator may cancel, and only
    /// while the campaign is active.
    ///
    /// Escrowed contributions stay in place; donors withdraw them with
    /// [`CharityEscrow::un_donate`].
    pub fn cancel_campaign(env: Env, campaign_id: u64, caller: Address) -> Result<(), Error> {
        caller.require_auth();
        storage::get_token(&env)?;

        let config = storage::load_campaign_config(&env, campaign_id)?;
        let mut state = storage::load_campaign_state(&env, campaign_id)?;
        if caller != config.creator {
            return Err(Error::Unauthorized);
        }
        state.status.ensure_active()?;

        state.status = CampaignStatus::Removed;
        storage::save_campaign_state(&env, campaign_id, &state);

        log!(&env, "campaign canceled", campaign_id, state.total_amount);
        events::emit_campaign_canceled(&env, CampaignCanceled { campaign_id });
        Ok(())
    }

    /// Move `amount` from `donor` into escrow for `campaign_id`.
    ///
    /// Repeated donations accumulate.
    pub fn donate(env: Env, campaign_id: u64, donor: Address, amount: i128) -> Result<(), Error> {
        donor.require_auth();
        let token = storage::get_token(&env)?;

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let mut state = storage::load_campaign_state(&env, campaign_id)?;
        state.status.ensure_active()?;

        let held = storage::load_contribution(&env, campaign_id, &donor)
            .checked_add(amount)
            .ok_or(Error::Overflow)?;
        state.total_amount = state
            .total_amount
            .checked_add(amount)
            .ok_or(Error::Overflow)?;

        storage::save_contribution(&env, campaign_id, &donor, held);
        storage::save_campaign_state(&env, campaign_id, &state);
        storage::adjust_total_escrowed(&env, amount)?;

        token::Client::new(&env, &token).transfer(
            &donor,
            &env.current_contract_address(),
            &amount,
        );

        log!(&env, "donated", campaign_id, amount);
        events::emit_donated(
            &env,
            Donated {
                campaign_id,
                donor,
                amount,
            },
        );
        Ok(())
    }

    /// Withdraw the caller's entire held balance for `campaign_id`.
    ///
    /// Allowed while the campaign is active or removed; rejected once the
    /// escrow has been released. Returns the withdrawn amount.
    pub fn un_donate(env: Env, campaign_id: u64, donor: Address) -> Result<i128, Error> {
        donor.require_auth();
        let token = storage::get_token(&env)?;

        let mut state = storage::load_campaign_state(&env, campaign_id)?;
        state.status.ensure_not_executed()?;

        let held = storage::load_contribution(&env, campaign_id, &donor);
        if held <= 0 {
            return Err(Error::NoContribution);
        }

        state.total_amount = state
            .total_amount
            .checked_sub(held)
            .ok_or(Error::Overflow)?;

        storage::save_contribution(&env, campaign_id, &donor, 0);
        storage::save_campaign_state(&env, campaign_id, &state);
        storage::adjust_total_escrowed(&env, -held)?;

        token::Client::new(&env, &token).transfer(
            &env.current_contract_address(),
            &donor,
            &held,
        );

        log!(&env, "undonated", campaign_id, held);
        events::emit_un_donated(
            &env,
            UnDonated {
                campaign_id,
                donor,
                amount: held,
            },
        );
        Ok(held)
    }

    /// Release the campaign's whole escrow to its recipient.
    ///
    /// Only the creator may execute, and only while the campaign is active.
    /// Per-donor contributions are kept as a historical record. Returns the
    /// released amount.
    pub fn execute_campaign(env: Env, campaign_id: u64, caller: Address) -> Result<i128, Error> {
        caller.require_auth();
        let token = storage::get_token(&env)?;

        let config = storage::load_campaign_config(&env, campaign_id)?;
        let mut state = storage::load_campaign_state(&env, campaign_id)?;
        if caller != config.creator {
            return Err(Error::Unauthorized);
        }
        state.status.ensure_active()?;

        let released = state.total_amount;
        state.status = CampaignStatus::Executed;
        storage::save_campaign_state(&env, campaign_id, &state);
        storage::adjust_total_escrowed(&env, -released)?;

        if released > 0 {
            token::Client::new(&env, &token).transfer(
                &env.current_contract_address(),
                &config.recipient,
                &released,
            );
        }

        log!(&env, "campaign executed", campaign_id, released);
        events::emit_campaign_executed(
            &env,
            CampaignExecuted {
                campaign_id,
                total_amount: released,
            },
        );
        Ok(released)
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    /// Retrieve a campaign by its id.
    pub fn get_campaign(env: Env, campaign_id: u64) -> Result<Campaign, Error> {
        storage::load_campaign(&env, campaign_id)
    }

    /// Balance `donor` currently holds in `campaign_id`; zero if none.
    pub fn contribution_of(env: Env, campaign_id: u64, donor: Address) -> Result<i128, Error> {
        storage::load_campaign_config(&env, campaign_id)?;
        Ok(storage::load_contribution(&env, campaign_id, &donor))
    }

    /// Number of campaigns created so far, which is also the latest id.
    pub fn campaign_count(env: Env) -> u64 {
        storage::campaign_count(&env)
    }

    /// Total held across all campaigns that have not been executed.
    pub fn total_escrowed(env: Env) -> i128 {
        storage::total_escrowed(&env)
    }

    /// Token every campaign is denominated in.
    pub fn token(env: Env) -> Result<Address, Error> {
        storage::get_token(&env)
    }

    /// Address that initialised the registry.
    pub fn admin(env: Env) -> Result<Address, Error> {
        storage::get_admin(&env)
    }
}

/// The all-zero account and the escrow itself are both refused as recipients.
fn is_null_recipient(env: &Env, recipient: &Address) -> bool {
    let null = Address::from_string(&String::from_str(env, NULL_ACCOUNT));
    *recipient == null || *recipient == env.current_contract_address()
}
