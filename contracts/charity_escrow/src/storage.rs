//! # Storage
//!
//! Provides typed helpers over Soroban's two storage tiers used by the escrow:
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key              | Type      | Description                                  |
//! |------------------|-----------|----------------------------------------------|
//! | `Admin`          | `Address` | Signer of `initialize`                       |
//! | `Token`          | `Address` | Value-unit token, set once by `initialize`   |
//! | `CampaignCount`  | `u64`     | Number of campaigns created (== last id)     |
//! | `TotalEscrowed`  | `i128`    | Sum of totals held for unexecuted campaigns  |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                     | Type             | Description                     |
//! |-------------------------|------------------|---------------------------------|
//! | `CampConfig(id)`        | `CampaignConfig` | Immutable campaign fields       |
//! | `CampState(id)`         | `CampaignState`  | Running total and status        |
//! | `Contribution(id, who)` | `i128`           | Donor's currently held balance  |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.
//! A contribution entry is removed when the donor withdraws, so an absent key
//! reads as zero. Reading an existing contribution extends its TTL like the
//! campaign entries, so idle donors keep their balance alive.

use soroban_sdk::{contracttype, Address, Env};

use crate::types::{Campaign, CampaignConfig, CampaignState};
use crate::Error;

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Registry administrator (Instance).
    Admin,
    /// Value-unit token address (Instance).
    Token,
    /// Campaign id counter (Instance).
    CampaignCount,
    /// Aggregate escrow held across unexecuted campaigns (Instance).
    TotalEscrowed,
    /// Immutable campaign configuration keyed by id (Persistent).
    CampConfig(u64),
    /// Mutable campaign state keyed by id (Persistent).
    CampState(u64),
    /// Held contribution keyed by (campaign id, donor) (Persistent).
    Contribution(u64, Address),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Token)
}

pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&DataKey::Admin, admin);
    bump_instance(env);
}

pub fn get_admin(env: &Env) -> Result<Address, Error> {
    let admin = env
        .storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(Error::NotInitialized)?;
    bump_instance(env);
    Ok(admin)
}

pub fn set_token(env: &Env, token: &Address) {
    env.storage().instance().set(&DataKey::Token, token);
    bump_instance(env);
}

/// Retrieve the configured token, failing if the registry was never initialised.
pub fn get_token(env: &Env) -> Result<Address, Error> {
    let token = env
        .storage()
        .instance()
        .get(&DataKey::Token)
        .ok_or(Error::NotInitialized)?;
    bump_instance(env);
    Ok(token)
}

pub fn campaign_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::CampaignCount)
        .unwrap_or(0)
}

/// Reads, increments and stores the campaign counter.
/// Returns the id for the new campaign (post-increment value, so ids start at 1).
pub fn next_campaign_id(env: &Env) -> Result<u64, Error> {
    let next = campaign_count(env)
        .checked_add(1)
        .ok_or(Error::Overflow)?;
    env.storage().instance().set(&DataKey::CampaignCount, &next);
    bump_instance(env);
    Ok(next)
}

pub fn total_escrowed(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalEscrowed)
        .unwrap_or(0)
}

/// Apply a signed change to the aggregate escrow counter.
pub fn adjust_total_escrowed(env: &Env, delta: i128) -> Result<i128, Error> {
    let updated = total_escrowed(env)
        .checked_add(delta)
        .ok_or(Error::Overflow)?;
    env.storage()
        .instance()
        .set(&DataKey::TotalEscrowed, &updated);
    bump_instance(env);
    Ok(updated)
}

// ── Persistent Storage Helpers ───────────────────────────────────────

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

/// Save both the immutable config and initial mutable state for a new campaign.
pub fn save_campaign(env: &Env, campaign: &Campaign) {
    let config_key = DataKey::CampConfig(campaign.id);
    let state_key = DataKey::CampState(campaign.id);

    let config = CampaignConfig {
        id: campaign.id,
        creator: campaign.creator.clone(),
        recipient: campaign.recipient.clone(),
        target_amount: campaign.target_amount,
        created_at: campaign.created_at,
    };

    let state = CampaignState {
        total_amount: campaign.total_amount,
        status: campaign.status,
    };

    env.storage().persistent().set(&config_key, &config);
    env.storage().persistent().set(&state_key, &state);
    bump_persistent(env, &config_key);
    bump_persistent(env, &state_key);
}

/// Load the full `Campaign` by combining config and state.
pub fn load_campaign(env: &Env, id: u64) -> Result<Campaign, Error> {
    let config = load_campaign_config(env, id)?;
    let state = load_campaign_state(env, id)?;
    Ok(Campaign {
        id: config.id,
        creator: config.creator,
        recipient: config.recipient,
        target_amount: config.target_amount,
        total_amount: state.total_amount,
        status: state.status,
        created_at: config.created_at,
    })
}

pub fn load_campaign_config(env: &Env, id: u64) -> Result<CampaignConfig, Error> {
    let key = DataKey::CampConfig(id);
    let config: CampaignConfig = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(Error::NotFound)?;
    bump_persistent(env, &key);
    Ok(config)
}

pub fn load_campaign_state(env: &Env, id: u64) -> Result<CampaignState, Error> {
    let key = DataKey::CampState(id);
    let state: CampaignState = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(Error::NotFound)?;
    bump_persistent(env, &key);
    Ok(state)
}

/// Save only the mutable campaign state.
pub fn save_campaign_state(env: &Env, id: u64, state: &CampaignState) {
    let key = DataKey::CampState(id);
    env.storage().persistent().set(&key, state);
    bump_persistent(env, &key);
}

pub fn load_contribution(env: &Env, id: u64, donor: &Address) -> i128 {
    let key = DataKey::Contribution(id, donor.clone());
    match env.storage().persistent().get::<_, i128>(&key) {
        Some(amount) => {
            bump_persistent(env, &key);
            amount
        }
        None => 0,
    }
}

/// Store a donor's held balance. Zero removes the entry.
pub fn save_contribution(env: &Env, id: u64, donor: &Address, amount: i128) {
    let key = DataKey::Contribution(id, donor.clone());
    if amount == 0 {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, &amount);
        bump_persistent(env, &key);
    }
}
