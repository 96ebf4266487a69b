//! # Events
//!
//! Every accepted state transition publishes exactly one event. Topics are
//! `(symbol, campaign_id)` so indexers can filter per campaign; the payload
//! is one of the structs below.
//!
//! | Topic       | Payload              |
//! |-------------|----------------------|
//! | `created`   | [`CampaignCreated`]  |
//! | `donated`   | [`Donated`]          |
//! | `undonated` | [`UnDonated`]        |
//! | `canceled`  | [`CampaignCanceled`] |
//! | `executed`  | [`CampaignExecuted`] |

use soroban_sdk::{contracttype, symbol_short, Address, Env};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignCreated {
    pub campaign_id: u64,
    pub creator: Address,
    pub target_amount: i128,
    pub recipient: Address,
    pub is_executed: bool,
    pub is_removed: bool,
    pub created_at: u64,
}

/// Carries the amount of this donation, not the donor's running total.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Donated {
    pub campaign_id: u64,
    pub donor: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnDonated {
    pub campaign_id: u64,
    pub donor: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignCanceled {
    pub campaign_id: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignExecuted {
    pub campaign_id: u64,
    pub total_amount: i128,
}

pub fn emit_campaign_created(env: &Env, event: CampaignCreated) {
    env.events()
        .publish((symbol_short!("created"), event.campaign_id), event);
}

pub fn emit_donated(env: &Env, event: Donated) {
    env.events()
        .publish((symbol_short!("donated"), event.campaign_id), event);
}

pub fn emit_un_donated(env: &Env, event: UnDonated) {
    env.events()
        .publish((symbol_short!("undonated"), event.campaign_id), event);
}

pub fn emit_campaign_canceled(env: &Env, event: CampaignCanceled) {
    env.events()
        .publish((symbol_short!("canceled"), event.campaign_id), event);
}

pub fn emit_campaign_executed(env: &Env, event: CampaignExecuted) {
    env.events()
        .publish((symbol_short!("executed"), event.campaign_id), event);
}
