//! Token gateway: the only place the escrow talks to the custodied token.
//!
//! Any token implementing the standard `balance` / `transfer` /
//! `transfer_from` functions can sit behind the stored token address. Token
//! failures (missing allowance, short balance) trap inside the nested call and
//! abort the whole escrow invocation, which rolls back every ledger write
//! made before the call.

use soroban_sdk::{symbol_short, token, Address, Env, Symbol};

use crate::ContractError;

const TOKEN: Symbol = symbol_short!("TOKEN");

pub fn set_token(env: &Env, token: &Address) {
    env.storage().instance().set(&TOKEN, token);
}

pub fn get_token(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&TOKEN)
        .ok_or(ContractError::NotInitialized)
}

pub struct TokenGateway<'a> {
    env: &'a Env,
    client: token::Client<'a>,
}

impl<'a> TokenGateway<'a> {
    pub fn load(env: &'a Env) -> Result<Self, ContractError> {
        let token = get_token(env)?;
        Ok(Self {
            env,
            client: token::Client::new(env, &token),
        })
    }

    /// Pull `amount` from `from` into custody using the allowance `from`
    /// granted to the escrow.
    pub fn pull(&self, from: &Address, amount: i128) {
        let escrow = self.env.current_contract_address();
        self.client.transfer_from(&escrow, from, &escrow, &amount);
    }

    /// Push `amount` out of custody to `to`.
    pub fn push(&self, to: &Address, amount: i128) {
        self.client
            .transfer(&self.env.current_contract_address(), to, &amount);
    }

    /// Tokens currently held by the escrow.
    pub fn custodied(&self) -> i128 {
        self.client.balance(&self.env.current_contract_address())
    }
}
