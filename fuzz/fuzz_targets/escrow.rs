#![no_main]

use arbitrary::Arbitrary;
use escrow::{EscrowContract, EscrowContractClient};
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::Address as _,
    token::{Client as TokenClient, StellarAssetClient},
    vec, Address, Env,
};

const USERS: usize = 4;
const FUNDING: i128 = 1_000_000_000;

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Deposit { user: u8, amount: i64 },
    Withdraw { user: u8, amount: i64 },
    Drain { first: u8, second: u8 },
    WithdrawToOwner { user: u8, amount: i64 },
    Lock,
    Unstake,
    Activate,
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let token_client = TokenClient::new(&env, &token);

    let contract_id = env.register(EscrowContract, ());
    let client = EscrowContractClient::new(&env, &contract_id);

    let owner = Address::generate(&env);
    client.initialize(&owner, &token);

    let expiration = env.ledger().sequence() + 100_000;
    let mut users = Vec::new();
    for _ in 0..USERS {
        let user = Address::generate(&env);
        StellarAssetClient::new(&env, &token).mint(&user, &FUNDING);
        token_client.approve(&user, &contract_id, &FUNDING, &expiration);
        users.push(user);
    }

    for action in actions {
        match action {
            FuzzAction::Deposit { user, amount } => {
                let _ = client.try_deposit(&users[user as usize % USERS], &(amount as i128));
            }
            FuzzAction::Withdraw { user, amount } => {
                let _ = client.try_withdraw(&users[user as usize % USERS], &(amount as i128));
            }
            FuzzAction::Drain { first, second } => {
                let list = vec![
                    &env,
                    users[first as usize % USERS].clone(),
                    users[second as usize % USERS].clone(),
                ];
                let _ = client.try_drain_to_owner(&owner, &list);
            }
            FuzzAction::WithdrawToOwner { user, amount } => {
                let _ = client.try_withdraw_to_owner(
                    &owner,
                    &vec![&env, users[user as usize % USERS].clone()],
                    &vec![&env, amount as i128],
                );
            }
            FuzzAction::Lock => {
                let _ = client.try_lock(&owner);
            }
            FuzzAction::Unstake => {
                let _ = client.try_unstake(&owner);
            }
            FuzzAction::Activate => {
                let _ = client.try_activate(&owner);
            }
        }

        let mut sum = 0i128;
        for user in &users {
            let entry = client.deposits_of(user);
            assert!(entry >= 0, "negative ledger entry");
            sum += entry;
        }
        assert_eq!(sum, client.total_deposits());
        assert_eq!(sum, client.custodied_balance());

        let held: i128 = users.iter().map(|u| token_client.balance(u)).sum();
        assert_eq!(
            held + sum + token_client.balance(&owner),
            FUNDING * USERS as i128
        );
    }
});
