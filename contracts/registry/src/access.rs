//! Access-grant state machine.
//!
//! One record per (owner, document, requester) key:
//!
//! ```text
//! absent ──request──> Pending ──grant──> Approved ──revoke──> absent
//!                        │
//!                        └───reject────> Rejected ──request──> Pending
//! ```
//!
//! Rejected records are kept as queryable terminal state; a revoked record
//! is deleted outright, so the key returns to absent and a fresh request is
//! possible. The pending index answers "who is waiting" for a document
//! without scanning; the requesters index tracks every live record so that
//! deleting a document can purge all of its access state.

use soroban_sdk::{contracttype, Address, Env, Vec};

/// Status of one access request.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AccessStatus {
    /// Awaiting the owner's decision.
    Pending,
    /// Owner granted inspection rights.
    Approved,
    /// Owner rejected the request. Terminal, but a fresh request may follow.
    Rejected,
}

/// One access request record.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessRequest {
    pub requester: Address,
    pub status: AccessStatus,
    /// Ledger time the request entered (or re-entered) Pending.
    pub requested_at: u64,
    /// Ledger time of approval. Set only while Approved.
    pub granted_at: Option<u64>,
}

/// Storage keys for the access-grant protocol.
#[contracttype]
#[derive(Clone)]
pub enum AccessKey {
    /// (owner, document id, requester) -> request record.
    Request(Address, u64, Address),
    /// (owner, document id) -> requesters currently pending.
    Pending(Address, u64),
    /// (owner, document id) -> every requester with a live record.
    Requesters(Address, u64),
}

// ════════════════════════════════════════════════════════════════════
//  Records
// ════════════════════════════════════════════════════════════════════

/// The request record for the key, if any.
pub fn get_request(
    env: &Env,
    owner: &Address,
    document_id: u64,
    requester: &Address,
) -> Option<AccessRequest> {
    env.storage()
        .instance()
        .get(&AccessKey::Request(owner.clone(), document_id, requester.clone()))
}

/// Store the request record for the key.
pub fn save_request(env: &Env, owner: &Address, document_id: u64, request: &AccessRequest) {
    env.storage().instance().set(
        &AccessKey::Request(owner.clone(), document_id, request.requester.clone()),
        request,
    );
}

/// Delete the request record for the key, returning it to absent.
pub fn delete_request(env: &Env, owner: &Address, document_id: u64, requester: &Address) {
    env.storage()
        .instance()
        .remove(&AccessKey::Request(owner.clone(), document_id, requester.clone()));
}

/// True iff an Approved record exists for the key.
pub fn check(env: &Env, owner: &Address, document_id: u64, requester: &Address) -> bool {
    match get_request(env, owner, document_id, requester) {
        Some(request) => request.status == AccessStatus::Approved,
        None => false,
    }
}

// ════════════════════════════════════════════════════════════════════
//  Pending index
// ════════════════════════════════════════════════════════════════════

/// Requesters currently pending for the document.
pub fn pending(env: &Env, owner: &Address, document_id: u64) -> Vec<Address> {
    env.storage()
        .instance()
        .get(&AccessKey::Pending(owner.clone(), document_id))
        .unwrap_or_else(|| Vec::new(env))
}

/// Add `requester` to the document's pending index.
pub fn add_pending(env: &Env, owner: &Address, document_id: u64, requester: &Address) {
    let mut requesters = pending(env, owner, document_id);
    requesters.push_back(requester.clone());
    env.storage()
        .instance()
        .set(&AccessKey::Pending(owner.clone(), document_id), &requesters);
}

/// Drop `requester` from the document's pending index.
pub fn remove_pending(env: &Env, owner: &Address, document_id: u64, requester: &Address) {
    let mut requesters = pending(env, owner, document_id);
    if let Some(i) = requesters.first_index_of(requester) {
        let _ = requesters.remove(i);
        env.storage()
            .instance()
            .set(&AccessKey::Pending(owner.clone(), document_id), &requesters);
    }
}

// ════════════════════════════════════════════════════════════════════
//  Requesters index
// ════════════════════════════════════════════════════════════════════

/// Every requester with a live record for the document.
pub fn requesters(env: &Env, owner: &Address, document_id: u64) -> Vec<Address> {
    env.storage()
        .instance()
        .get(&AccessKey::Requesters(owner.clone(), document_id))
        .unwrap_or_else(|| Vec::new(env))
}

/// Record `requester` in the document's requesters index, once.
pub fn add_requester(env: &Env, owner: &Address, document_id: u64, requester: &Address) {
    let mut all = requesters(env, owner, document_id);
    if !all.contains(requester) {
        all.push_back(requester.clone());
        env.storage()
            .instance()
            .set(&AccessKey::Requesters(owner.clone(), document_id), &all);
    }
}

/// Drop `requester` from the document's requesters index.
pub fn remove_requester(env: &Env, owner: &Address, document_id: u64, requester: &Address) {
    let mut all = requesters(env, owner, document_id);
    if let Some(i) = all.first_index_of(requester) {
        let _ = all.remove(i);
        env.storage()
            .instance()
            .set(&AccessKey::Requesters(owner.clone(), document_id), &all);
    }
}

// ════════════════════════════════════════════════════════════════════
//  Document teardown
// ════════════════════════════════════════════════════════════════════

/// Delete every access record and both indexes for the document. Called
/// when the document itself is deleted so that a re-upload under the same
/// id carries no memory of earlier grants.
pub fn purge_document(env: &Env, owner: &Address, document_id: u64) {
    for requester in requesters(env, owner, document_id).iter() {
        delete_request(env, owner, document_id, &requester);
    }
    env.storage()
        .instance()
        .remove(&AccessKey::Requesters(owner.clone(), document_id));
    env.storage()
        .instance()
        .remove(&AccessKey::Pending(owner.clone(), document_id));
}
