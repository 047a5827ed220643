//! # Role-Based Access Control
//!
//! Role membership for the registry. Two roles exist, with a fixed
//! administering relation:
//!
//! | Role     | May do                                              | Administered by |
//! |----------|-----------------------------------------------------|-----------------|
//! | ADMIN    | Manage roles, bind aliases, verify documents, issue certificates | ADMIN |
//! | VERIFIER | Upload, retrieve, and delete its own documents      | ADMIN           |
//!
//! Roles are stored per-address as a bitmap, with a holders list for
//! enumeration. The bootstrap admin is set once at initialization and the
//! system always retains at least one admin afterwards (the entry points
//! refuse to revoke the last one).

use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::errors::Error;

/// Registry roles as a tagged enum. The bitmap representation stays an
/// internal storage detail.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Role {
    /// Protocol operator.
    Admin,
    /// Issuing authority.
    Verifier,
}

impl Role {
    /// Bit flag used in the per-address role bitmap.
    pub fn bit(self) -> u32 {
        match self {
            Role::Admin => 1 << 0,
            Role::Verifier => 1 << 1,
        }
    }

    /// The role allowed to grant and revoke `self`. Admin administers
    /// Verifier and Admin alike.
    pub fn administered_by(self) -> Role {
        Role::Admin
    }
}

/// Storage keys for access control.
#[contracttype]
#[derive(Clone)]
pub enum AccessControlKey {
    /// Bootstrap admin address. Presence doubles as the initialized flag.
    Admin,
    /// Role bitmap for an address.
    Roles(Address),
    /// Addresses currently holding at least one role.
    RoleHolders,
}

// ════════════════════════════════════════════════════════════════════
//  Initialization state
// ════════════════════════════════════════════════════════════════════

/// True once `initialize` has run.
pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&AccessControlKey::Admin)
}

/// Record the bootstrap admin address.
pub fn set_bootstrap_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&AccessControlKey::Admin, admin);
}

/// The bootstrap admin address, if initialized.
pub fn bootstrap_admin(env: &Env) -> Option<Address> {
    env.storage().instance().get(&AccessControlKey::Admin)
}

// ════════════════════════════════════════════════════════════════════
//  Role management
// ════════════════════════════════════════════════════════════════════

/// Get the role bitmap for an address. Returns 0 if no roles assigned.
pub fn get_roles(env: &Env, account: &Address) -> u32 {
    env.storage()
        .instance()
        .get(&AccessControlKey::Roles(account.clone()))
        .unwrap_or(0)
}

/// Set the role bitmap for an address, keeping the holders list in sync.
fn set_roles(env: &Env, account: &Address, roles: u32) {
    env.storage()
        .instance()
        .set(&AccessControlKey::Roles(account.clone()), &roles);

    let mut holders: Vec<Address> = env
        .storage()
        .instance()
        .get(&AccessControlKey::RoleHolders)
        .unwrap_or_else(|| Vec::new(env));

    if roles == 0 {
        if let Some(i) = holders.first_index_of(account) {
            let _ = holders.remove(i);
            env.storage()
                .instance()
                .set(&AccessControlKey::RoleHolders, &holders);
        }
    } else if !holders.contains(account) {
        holders.push_back(account.clone());
        env.storage()
            .instance()
            .set(&AccessControlKey::RoleHolders, &holders);
    }
}

/// Check if an address holds a specific role.
pub fn has_role(env: &Env, account: &Address, role: Role) -> bool {
    (get_roles(env, account) & role.bit()) != 0
}

/// Grant a role to an address (additive, idempotent).
pub fn grant(env: &Env, account: &Address, role: Role) {
    let current = get_roles(env, account);
    set_roles(env, account, current | role.bit());
}

/// Revoke a role from an address. Revoking a role not held changes nothing.
pub fn revoke(env: &Env, account: &Address, role: Role) {
    let current = get_roles(env, account);
    set_roles(env, account, current & !role.bit());
}

/// Addresses that hold any role.
pub fn role_holders(env: &Env) -> Vec<Address> {
    env.storage()
        .instance()
        .get(&AccessControlKey::RoleHolders)
        .unwrap_or_else(|| Vec::new(env))
}

/// Number of addresses currently holding the Admin role.
pub fn admin_count(env: &Env) -> u32 {
    let holders = role_holders(env);
    let mut count = 0u32;
    for holder in holders.iter() {
        if has_role(env, &holder, Role::Admin) {
            count += 1;
        }
    }
    count
}

// ════════════════════════════════════════════════════════════════════
//  Authorization helpers
// ════════════════════════════════════════════════════════════════════

/// Require that `caller` authorized the call and holds `role`.
pub fn require_role(env: &Env, caller: &Address, role: Role) -> Result<(), Error> {
    caller.require_auth();
    if has_role(env, caller, role) {
        Ok(())
    } else {
        Err(Error::Unauthorized)
    }
}
