//! Opaque alias registry.
//!
//! A student hands out a short alias instead of an address. Each alias is
//! unique system-wide and binds exactly once; there is no rebind or update.
//! The reverse index lets a principal enumerate its own aliases.

use soroban_sdk::{contracttype, Address, Env, String, Vec};

use crate::errors::Error;

/// Storage keys for the alias registry.
#[contracttype]
#[derive(Clone)]
pub enum AliasKey {
    /// alias -> bound principal.
    Owner(String),
    /// principal -> aliases bound to it.
    Aliases(Address),
}

/// Bind `alias` to `owner`. Fails if the alias is empty or already taken.
pub fn bind(env: &Env, alias: &String, owner: &Address) -> Result<(), Error> {
    if alias.len() == 0 {
        return Err(Error::AliasEmpty);
    }
    let key = AliasKey::Owner(alias.clone());
    if env.storage().instance().has(&key) {
        return Err(Error::AliasAlreadyBound);
    }
    env.storage().instance().set(&key, owner);

    let mut aliases = aliases_of(env, owner);
    aliases.push_back(alias.clone());
    env.storage()
        .instance()
        .set(&AliasKey::Aliases(owner.clone()), &aliases);
    Ok(())
}

/// The principal bound to `alias`, if any.
pub fn resolve(env: &Env, alias: &String) -> Option<Address> {
    env.storage().instance().get(&AliasKey::Owner(alias.clone()))
}

/// All aliases bound to `owner` (in binding order).
pub fn aliases_of(env: &Env, owner: &Address) -> Vec<String> {
    env.storage()
        .instance()
        .get(&AliasKey::Aliases(owner.clone()))
        .unwrap_or_else(|| Vec::new(env))
}
