//! # Structured Event Emissions
//!
//! Every accepted transition publishes one structured event in the same
//! transaction as its state delta, so the ordered event stream is the
//! ground truth off-chain indexers rebuild derived views from.
//!
//! ## Event Types
//!
//! | Event             | Emitted when                                   |
//! |-------------------|------------------------------------------------|
//! | RoleGranted       | A role is granted (including re-grants)        |
//! | RoleRevoked       | A role is revoked (including no-op revokes)    |
//! | AliasBound        | An alias is bound to a principal               |
//! | DocumentUploaded  | A document is registered                       |
//! | DocumentDeleted   | A document is removed by its uploader          |
//! | DocumentVerified  | An admin marks a document verified             |
//! | CertificateIssued | An admin issues a document's certificate       |
//! | AccessRequested   | A request enters Pending                       |
//! | AccessGranted     | The owner approves a pending request           |
//! | AccessRejected    | The owner rejects a pending request            |
//! | AccessRevoked     | The owner revokes an approved grant            |
//!
//! Topics carry the primary address as a second element so indexers can
//! filter per-account without decoding payloads.

use soroban_sdk::{contracttype, symbol_short, Address, Env, String, Symbol};

use crate::access_control::Role;
use crate::documents::Document;

// ════════════════════════════════════════════════════════════════════
//  Event topics
// ════════════════════════════════════════════════════════════════════

/// Topic for role granted events.
pub const TOPIC_ROLE_GRANTED: Symbol = symbol_short!("role_gr");
/// Topic for role revoked events.
pub const TOPIC_ROLE_REVOKED: Symbol = symbol_short!("role_rv");
/// Topic for alias binding events.
pub const TOPIC_ALIAS_BOUND: Symbol = symbol_short!("alias_b");
/// Topic for document upload events.
pub const TOPIC_DOCUMENT_UPLOADED: Symbol = symbol_short!("doc_up");
/// Topic for document deletion events.
pub const TOPIC_DOCUMENT_DELETED: Symbol = symbol_short!("doc_del");
/// Topic for document verification events.
pub const TOPIC_DOCUMENT_VERIFIED: Symbol = symbol_short!("doc_ver");
/// Topic for certificate issuance events.
pub const TOPIC_CERTIFICATE_ISSUED: Symbol = symbol_short!("cert_iss");
/// Topic for access request events.
pub const TOPIC_ACCESS_REQUESTED: Symbol = symbol_short!("acc_req");
/// Topic for access grant events.
pub const TOPIC_ACCESS_GRANTED: Symbol = symbol_short!("acc_gr");
/// Topic for access rejection events.
pub const TOPIC_ACCESS_REJECTED: Symbol = symbol_short!("acc_rej");
/// Topic for access revocation events.
pub const TOPIC_ACCESS_REVOKED: Symbol = symbol_short!("acc_rev");

// ════════════════════════════════════════════════════════════════════
//  Event data structures
// ════════════════════════════════════════════════════════════════════

/// Event data for role grants and revocations.
#[contracttype]
#[derive(Clone, Debug)]
pub struct RoleChangedEvent {
    /// Address whose membership changed.
    pub account: Address,
    /// Role granted or revoked.
    pub role: Role,
    /// Address that made the change.
    pub changed_by: Address,
}

/// Event data for alias bindings.
#[contracttype]
#[derive(Clone, Debug)]
pub struct AliasBoundEvent {
    pub alias: String,
    /// Principal the alias now resolves to.
    pub owner: Address,
    /// Admin that performed the binding.
    pub bound_by: Address,
}

/// Event data for document registration.
#[contracttype]
#[derive(Clone, Debug)]
pub struct DocumentUploadedEvent {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub doc_type: String,
    pub uploader: Address,
    pub owner: Address,
}

/// Event data for document deletion.
#[contracttype]
#[derive(Clone, Debug)]
pub struct DocumentDeletedEvent {
    pub id: u64,
    pub uploader: Address,
}

/// Event data for admin document actions (verification, certificates).
#[contracttype]
#[derive(Clone, Debug)]
pub struct DocumentActionEvent {
    pub id: u64,
    /// Admin that performed the action.
    pub actor: Address,
}

/// Event data for access requests, rejections, and revocations.
#[contracttype]
#[derive(Clone, Debug)]
pub struct AccessChangedEvent {
    pub owner: Address,
    pub document_id: u64,
    pub requester: Address,
}

/// Event data for access grants.
#[contracttype]
#[derive(Clone, Debug)]
pub struct AccessGrantedEvent {
    pub owner: Address,
    pub document_id: u64,
    pub requester: Address,
    pub granted_at: u64,
}

// ════════════════════════════════════════════════════════════════════
//  Event emission functions
// ════════════════════════════════════════════════════════════════════

/// Emit a role granted event.
pub fn emit_role_granted(env: &Env, account: &Address, role: Role, changed_by: &Address) {
    let event = RoleChangedEvent {
        account: account.clone(),
        role,
        changed_by: changed_by.clone(),
    };
    env.events()
        .publish((TOPIC_ROLE_GRANTED, account.clone()), event);
}

/// Emit a role revoked event.
pub fn emit_role_revoked(env: &Env, account: &Address, role: Role, changed_by: &Address) {
    let event = RoleChangedEvent {
        account: account.clone(),
        role,
        changed_by: changed_by.clone(),
    };
    env.events()
        .publish((TOPIC_ROLE_REVOKED, account.clone()), event);
}

/// Emit an alias bound event.
pub fn emit_alias_bound(env: &Env, alias: &String, owner: &Address, bound_by: &Address) {
    let event = AliasBoundEvent {
        alias: alias.clone(),
        owner: owner.clone(),
        bound_by: bound_by.clone(),
    };
    env.events()
        .publish((TOPIC_ALIAS_BOUND, owner.clone()), event);
}

/// Emit a document uploaded event.
pub fn emit_document_uploaded(env: &Env, document: &Document) {
    let event = DocumentUploadedEvent {
        id: document.id,
        title: document.title.clone(),
        description: document.description.clone(),
        doc_type: document.doc_type.clone(),
        uploader: document.uploader.clone(),
        owner: document.owner.clone(),
    };
    env.events()
        .publish((TOPIC_DOCUMENT_UPLOADED, document.uploader.clone()), event);
}

/// Emit a document deleted event.
pub fn emit_document_deleted(env: &Env, id: u64, uploader: &Address) {
    let event = DocumentDeletedEvent {
        id,
        uploader: uploader.clone(),
    };
    env.events()
        .publish((TOPIC_DOCUMENT_DELETED, uploader.clone()), event);
}

/// Emit a document verified event.
pub fn emit_document_verified(env: &Env, id: u64, verified_by: &Address) {
    let event = DocumentActionEvent {
        id,
        actor: verified_by.clone(),
    };
    env.events()
        .publish((TOPIC_DOCUMENT_VERIFIED, verified_by.clone()), event);
}

/// Emit a certificate issued event.
pub fn emit_certificate_issued(env: &Env, id: u64, issued_by: &Address) {
    let event = DocumentActionEvent {
        id,
        actor: issued_by.clone(),
    };
    env.events()
        .publish((TOPIC_CERTIFICATE_ISSUED, issued_by.clone()), event);
}

/// Emit an access requested event.
pub fn emit_access_requested(env: &Env, owner: &Address, document_id: u64, requester: &Address) {
    let event = AccessChangedEvent {
        owner: owner.clone(),
        document_id,
        requester: requester.clone(),
    };
    env.events()
        .publish((TOPIC_ACCESS_REQUESTED, owner.clone()), event);
}

/// Emit an access granted event.
pub fn emit_access_granted(
    env: &Env,
    owner: &Address,
    document_id: u64,
    requester: &Address,
    granted_at: u64,
) {
    let event = AccessGrantedEvent {
        owner: owner.clone(),
        document_id,
        requester: requester.clone(),
        granted_at,
    };
    env.events()
        .publish((TOPIC_ACCESS_GRANTED, owner.clone()), event);
}

/// Emit an access rejected event.
pub fn emit_access_rejected(env: &Env, owner: &Address, document_id: u64, requester: &Address) {
    let event = AccessChangedEvent {
        owner: owner.clone(),
        document_id,
        requester: requester.clone(),
    };
    env.events()
        .publish((TOPIC_ACCESS_REJECTED, owner.clone()), event);
}

/// Emit an access revoked event.
pub fn emit_access_revoked(env: &Env, owner: &Address, document_id: u64, requester: &Address) {
    let event = AccessChangedEvent {
        owner: owner.clone(),
        document_id,
        requester: requester.clone(),
    };
    env.events()
        .publish((TOPIC_ACCESS_REVOKED, owner.clone()), event);
}
