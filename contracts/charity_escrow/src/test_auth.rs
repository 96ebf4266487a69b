extern crate std;

use soroban_sdk::{
    testutils::{Address as _, AuthorizedFunction, MockAuth, MockAuthInvoke},
    token, Address, Env, IntoVal, Symbol, Val, Vec,
};

use crate::{CampaignStatus, CharityEscrow, CharityEscrowClient, Error};

fn create_token<'a>(env: &Env) -> token::Client<'a> {
    let addr = env.register_stellar_asset_contract_v2(Address::generate(env));
    token::Client::new(env, &addr.address())
}

/// Registry with campaign 1 (target 100) and a donor holding 40 in it.
fn setup() -> (Env, CharityEscrowClient<'static>, Address, Address) {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(CharityEscrow, ());
    let client = CharityEscrowClient::new(&env, &contract_id);

    let token = create_token(&env);
    client.initialize(&Address::generate(&env), &token.address);

    let creator = Address::generate(&env);
    let donor = Address::generate(&env);
    token::StellarAssetClient::new(&env, &token.address).mint(&donor, &1_000);
    client.create_campaign(&creator, &100, &Address::generate(&env));
    client.donate(&1, &donor, &40);
    (env, client, creator, donor)
}

/// Assert `signer` authorized exactly `function(args)` on the escrow as the
/// root of its authorization tree in the last invocation.
fn assert_authorized(
    env: &Env,
    client: &CharityEscrowClient,
    signer: &Address,
    function: &str,
    args: Vec<Val>,
) {
    let auths = env.auths();
    let (_, invocation) = auths
        .iter()
        .find(|(address, _)| address == signer)
        .expect("signer did not authorize the call");
    assert_eq!(
        invocation.function,
        AuthorizedFunction::Contract((client.address.clone(), Symbol::new(env, function), args))
    );
}

/// Only `signer` authorizes `function(args)`; every other address is unsigned.
fn sign_only_as(
    env: &Env,
    client: &CharityEscrowClient,
    signer: &Address,
    function: &str,
    args: Vec<Val>,
) {
    env.mock_auths(&[MockAuth {
        address: signer,
        invoke: &MockAuthInvoke {
            contract: &client.address,
            fn_name: function,
            args,
            sub_invokes: &[],
        },
    }]);
}

// ── initialize ───────────────────────────────────────────────────────

#[test]
fn test_initialize_requires_admin_signature() {
    let env = Env::default();
    let contract_id = env.register(CharityEscrow, ());
    let client = CharityEscrowClient::new(&env, &contract_id);
    let admin = Address::generate(&env);
    let token = create_token(&env);

    let result = client.try_initialize(&admin, &token.address);
    assert!(result.is_err());
    assert_eq!(client.try_token(), Err(Ok(Error::NotInitialized)));
}

#[test]
fn test_initialize_records_admin() {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(CharityEscrow, ());
    let client = CharityEscrowClient::new(&env, &contract_id);
    let admin = Address::generate(&env);
    let token = create_token(&env);

    client.initialize(&admin, &token.address);

    assert_authorized(
        &env,
        &client,
        &admin,
        "initialize",
        (admin.clone(), token.address.clone()).into_val(&env),
    );
    assert_eq!(client.admin(), admin);
}

// ── signatures on state transitions ──────────────────────────────────

#[test]
fn test_create_signed_by_creator() {
    let (env, client, _, _) = setup();
    let creator = Address::generate(&env);
    let recipient = Address::generate(&env);

    client.create_campaign(&creator, &250, &recipient);

    assert_authorized(
        &env,
        &client,
        &creator,
        "create_campaign",
        (creator.clone(), 250i128, recipient.clone()).into_val(&env),
    );
}

#[test]
fn test_donate_signed_by_donor() {
    let (env, client, _, donor) = setup();

    client.donate(&1, &donor, &15);

    assert_authorized(
        &env,
        &client,
        &donor,
        "donate",
        (1u64, donor.clone(), 15i128).into_val(&env),
    );
}

#[test]
fn test_un_donate_signed_by_donor() {
    let (env, client, _, donor) = setup();

    client.un_donate(&1, &donor);

    assert_authorized(
        &env,
        &client,
        &donor,
        "un_donate",
        (1u64, donor.clone()).into_val(&env),
    );
}

#[test]
fn test_cancel_signed_by_creator() {
    let (env, client, creator, _) = setup();

    client.cancel_campaign(&1, &creator);

    assert_authorized(
        &env,
        &client,
        &creator,
        "cancel_campaign",
        (1u64, creator.clone()).into_val(&env),
    );
}

#[test]
fn test_execute_signed_by_creator() {
    let (env, client, creator, _) = setup();

    client.execute_campaign(&1, &creator);

    assert_authorized(
        &env,
        &client,
        &creator,
        "execute_campaign",
        (1u64, creator.clone()).into_val(&env),
    );
}

// ── impersonation ────────────────────────────────────────────────────

#[test]
fn test_cancel_in_creators_name_rejected() {
    let (env, client, creator, _) = setup();
    let attacker = Address::generate(&env);

    sign_only_as(
        &env,
        &client,
        &attacker,
        "cancel_campaign",
        (1u64, creator.clone()).into_val(&env),
    );
    assert!(client.try_cancel_campaign(&1, &creator).is_err());
    assert_eq!(client.get_campaign(&1).status, CampaignStatus::Active);
}

#[test]
fn test_execute_in_creators_name_rejected() {
    let (env, client, creator, _) = setup();
    let attacker = Address::generate(&env);

    sign_only_as(
        &env,
        &client,
        &attacker,
        "execute_campaign",
        (1u64, creator.clone()).into_val(&env),
    );
    assert!(client.try_execute_campaign(&1, &creator).is_err());

    let campaign = client.get_campaign(&1);
    assert_eq!(campaign.status, CampaignStatus::Active);
    assert_eq!(client.total_escrowed(), 40);
}

#[test]
fn test_un_donate_in_donors_name_rejected() {
    let (env, client, _, donor) = setup();
    let attacker = Address::generate(&env);

    sign_only_as(
        &env,
        &client,
        &attacker,
        "un_donate",
        (1u64, donor.clone()).into_val(&env),
    );
    assert!(client.try_un_donate(&1, &donor).is_err());
    assert_eq!(client.contribution_of(&1, &donor), 40);
}

#[test]
fn test_creator_signature_accepted_when_enforced() {
    let (env, client, creator, _) = setup();

    sign_only_as(
        &env,
        &client,
        &creator,
        "cancel_campaign",
        (1u64, creator.clone()).into_val(&env),
    );
    client.cancel_campaign(&1, &creator);

    assert_eq!(client.get_campaign(&1).status, CampaignStatus::Removed);
}
