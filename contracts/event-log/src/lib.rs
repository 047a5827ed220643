//! # Transition Log Contract
//!
//! Append-only, sequence-numbered log of committed registry transitions.
//! Off-chain caches replay this log to rebuild their derived views and
//! treat it as the source of truth on conflict.
//!
//! ## Record schema
//!
//! Each entry stores: the acting principal, an action name (e.g.
//! "upload_document", "grant_access"), a free-form subject reference,
//! and the ledger sequence and timestamp at append time. Entries are
//! ordered by a monotonic sequence number and never updated or deleted.
//! Lookups by actor or by action are served from append-only indexes.

#![no_std]
use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, Address, Env, String, Vec,
};


/// Failure conditions for the transition log.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    /// The log was already initialized.
    AlreadyInitialized = 1,
    /// The log has no admin yet; `initialize` must run first.
    NotInitialized = 2,
}

/// Storage keys for the transition log.
#[contracttype]
#[derive(Clone, Debug)]
pub enum DataKey {
    /// Recording operator. Presence doubles as the initialized flag.
    Admin,
    /// Next sequence number (monotonic).
    NextSeq,
    /// Log entry by sequence number.
    Entry(u64),
    /// Index: actor -> sequence numbers (append-only).
    ActorIndex(Address),
    /// Index: action name -> sequence numbers (append-only).
    ActionIndex(String),
}

/// One committed state transition, as reported by the recording operator.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransitionRecord {
    /// Sequence number (monotonic, gap-free).
    pub seq: u64,
    /// Principal that performed the transition.
    pub actor: Address,
    /// Operation name, e.g. "upload_document".
    pub action: String,
    /// Subject reference, e.g. a document id rendered as text. Empty if none.
    pub subject: String,
    /// Ledger sequence at append time.
    pub ledger_seq: u32,
    /// Ledger timestamp at append time.
    pub timestamp: u64,
}

#[contract]
pub struct EventLogContract;

#[contractimpl]
impl EventLogContract {
    /// Initialize with the recording operator. Only it may append.
    pub fn initialize(env: Env, admin: Address) -> Result<(), Error> {
        admin.require_auth();
        if env.storage().instance().has(&DataKey::Admin) {
            return Err(Error::AlreadyInitialized);
        }
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::NextSeq, &0u64);
        Ok(())
    }

    /// Append one transition record; returns its sequence number.
    ///
    /// The log does not verify that the transition happened. It only
    /// guarantees ordering and immutability of what the operator records.
    pub fn record(
        env: Env,
        actor: Address,
        action: String,
        subject: String,
    ) -> Result<u64, Error> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)?;
        admin.require_auth();

        let seq: u64 = env.storage().instance().get(&DataKey::NextSeq).unwrap_or(0);
        let record = TransitionRecord {
            seq,
            actor: actor.clone(),
            action: action.clone(),
            subject,
            ledger_seq: env.ledger().sequence(),
            timestamp: env.ledger().timestamp(),
        };
        env.storage().instance().set(&DataKey::Entry(seq), &record);
        env.storage().instance().set(&DataKey::NextSeq, &(seq + 1));

        let mut actor_seqs: Vec<u64> = env
            .storage()
            .instance()
            .get(&DataKey::ActorIndex(actor.clone()))
            .unwrap_or_else(|| Vec::new(&env));
        actor_seqs.push_back(seq);
        env.storage()
            .instance()
            .set(&DataKey::ActorIndex(actor), &actor_seqs);

        let mut action_seqs: Vec<u64> = env
            .storage()
            .instance()
            .get(&DataKey::ActionIndex(action.clone()))
            .unwrap_or_else(|| Vec::new(&env));
        action_seqs.push_back(seq);
        env.storage()
            .instance()
            .set(&DataKey::ActionIndex(action), &action_seqs);

        Ok(seq)
    }

    /// Total number of log entries.
    pub fn entry_count(env: Env) -> u64 {
        env.storage().instance().get(&DataKey::NextSeq).unwrap_or(0)
    }

    /// A single record by sequence number.
    pub fn get_entry(env: Env, seq: u64) -> Option<TransitionRecord> {
        env.storage().instance().get(&DataKey::Entry(seq))
    }

    /// Up to `limit` records starting at `from` (ordered by sequence).
    pub fn get_entries(env: Env, from: u64, limit: u32) -> Vec<TransitionRecord> {
        let count: u64 = env.storage().instance().get(&DataKey::NextSeq).unwrap_or(0);
        let mut entries = Vec::new(&env);
        let mut seq = from;
        while seq < count && entries.len() < limit {
            if let Some(record) = env.storage().instance().get(&DataKey::Entry(seq)) {
                entries.push_back(record);
            }
            seq += 1;
        }
        entries
    }

    /// Sequence numbers recorded for an actor (ordered).
    pub fn seqs_by_actor(env: Env, actor: Address) -> Vec<u64> {
        env.storage()
            .instance()
            .get(&DataKey::ActorIndex(actor))
            .unwrap_or_else(|| Vec::new(&env))
    }

    /// Sequence numbers recorded for an action name (ordered).
    pub fn seqs_by_action(env: Env, action: String) -> Vec<u64> {
        env.storage()
            .instance()
            .get(&DataKey::ActionIndex(action))
            .unwrap_or_else(|| Vec::new(&env))
    }

    /// The recording operator, if initialized.
    pub fn get_admin(env: Env) -> Option<Address> {
        env.storage().instance().get(&DataKey::Admin)
    }
}
