#![no_std]
//! # Credentia Document Registry Contract
//!
//! Permissioned registry for attested documents with owner-controlled,
//! revocable third-party access grants. Admins manage roles and bind
//! opaque aliases for students; verifiers register documents on behalf of
//! student owners; third parties request inspection rights that the owner
//! grants, rejects, or revokes. Every accepted transition emits one
//! structured event in the same transaction.

use soroban_sdk::{contract, contractimpl, Address, Env, String, Vec};

// ─── Feature modules: add new `pub mod <name>;` here (one per feature) ───
pub mod access;
pub mod access_control;
pub mod alias;
pub mod documents;
pub mod errors;
pub mod events;
// ─── End feature modules ───

// ─── Re-exports: add new `pub use <module>::...` here if needed ───
pub use access::{AccessRequest, AccessStatus};
pub use access_control::Role;
pub use documents::{Certificate, Document};
pub use errors::Error;
pub use events::{
    AccessChangedEvent, AccessGrantedEvent, AliasBoundEvent, DocumentDeletedEvent,
    DocumentUploadedEvent, RoleChangedEvent,
};
// ─── End re-exports ───

#[cfg(test)]
mod access_test;
// ─── End test modules ───

#[contract]
pub struct DocumentRegistryContract;

#[contractimpl]
#[allow(clippy::too_many_arguments)]
impl DocumentRegistryContract {
    // ── Initialization ──────────────────────────────────────────────

    /// One-time contract initialization. Sets the bootstrap admin and
    /// grants it the Admin role.
    ///
    /// Must be called before any gated method. The caller must authorize
    /// as `admin`.
    pub fn initialize(env: Env, admin: Address) -> Result<(), Error> {
        if access_control::is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }
        admin.require_auth();
        access_control::set_bootstrap_admin(&env, &admin);
        access_control::grant(&env, &admin, Role::Admin);
        Ok(())
    }

    // ── Role-Based Access Control ───────────────────────────────────

    /// Grant a role to an address.
    ///
    /// The caller must hold the role's administering role. Granting a role
    /// already held succeeds without change; the event is still recorded.
    pub fn grant_role(env: Env, caller: Address, account: Address, role: Role) -> Result<(), Error> {
        access_control::require_role(&env, &caller, role.administered_by())?;
        access_control::grant(&env, &account, role);
        events::emit_role_granted(&env, &account, role, &caller);
        Ok(())
    }

    /// Revoke a role from an address.
    ///
    /// The caller must hold the role's administering role. Revoking a role
    /// not held is a no-op success. Revoking the last remaining admin fails
    /// with `LastAdmin`.
    pub fn revoke_role(env: Env, caller: Address, account: Address, role: Role) -> Result<(), Error> {
        access_control::require_role(&env, &caller, role.administered_by())?;
        if role == Role::Admin
            && access_control::has_role(&env, &account, Role::Admin)
            && access_control::admin_count(&env) == 1
        {
            return Err(Error::LastAdmin);
        }
        access_control::revoke(&env, &account, role);
        events::emit_role_revoked(&env, &account, role, &caller);
        Ok(())
    }

    /// Check if an address holds a specific role.
    pub fn has_role(env: Env, account: Address, role: Role) -> bool {
        access_control::has_role(&env, &account, role)
    }

    /// Get all roles for an address as a bitmap.
    pub fn get_roles(env: Env, account: Address) -> u32 {
        access_control::get_roles(&env, &account)
    }

    /// Get all addresses with any role.
    pub fn get_role_holders(env: Env) -> Vec<Address> {
        access_control::role_holders(&env)
    }

    /// The bootstrap admin address, or None before initialization.
    pub fn get_admin(env: Env) -> Option<Address> {
        access_control::bootstrap_admin(&env)
    }

    // ── Alias registry ──────────────────────────────────────────────

    /// Bind a never-before-used alias to a principal. Admin only.
    ///
    /// An alias binds exactly once; there is no rebind or update.
    pub fn bind_alias(env: Env, caller: Address, alias: String, owner: Address) -> Result<(), Error> {
        access_control::require_role(&env, &caller, Role::Admin)?;
        alias::bind(&env, &alias, &owner)?;
        events::emit_alias_bound(&env, &alias, &owner, &caller);
        Ok(())
    }

    /// The principal bound to `alias`, if any.
    pub fn resolve_alias(env: Env, alias: String) -> Option<Address> {
        alias::resolve(&env, &alias)
    }

    /// All aliases bound to `owner`.
    pub fn aliases_of(env: Env, owner: Address) -> Vec<String> {
        alias::aliases_of(&env, &owner)
    }

    // ── Document registry ───────────────────────────────────────────

    /// Register a document under a caller-supplied id. Verifier only.
    ///
    /// The caller becomes the record's uploader; `owner` is the student
    /// the document belongs to and controls its access grants.
    pub fn upload_document(
        env: Env,
        caller: Address,
        id: u64,
        title: String,
        description: String,
        doc_type: String,
        content_ref: String,
        owner: Address,
    ) -> Result<(), Error> {
        access_control::require_role(&env, &caller, Role::Verifier)?;
        documents::validate_fields(&title, &description, &doc_type, &content_ref)?;
        if documents::exists(&env, id) {
            return Err(Error::DocumentAlreadyExists);
        }
        let document = Document {
            id,
            title,
            description,
            doc_type,
            content_ref,
            uploader: caller.clone(),
            owner,
            uploaded_at: env.ledger().timestamp(),
        };
        documents::save(&env, &document);
        documents::add_to_uploader_index(&env, &caller, id);
        events::emit_document_uploaded(&env, &document);
        Ok(())
    }

    /// Retrieve a document record. Verifier only.
    pub fn get_document(env: Env, caller: Address, id: u64) -> Result<Document, Error> {
        access_control::require_role(&env, &caller, Role::Verifier)?;
        documents::get(&env, id).ok_or(Error::DocumentNotFound)
    }

    /// Delete a document. Only its uploader may delete it.
    ///
    /// All access-request state for the document is purged with it, so a
    /// later upload under the same id starts with no access history.
    pub fn delete_document(env: Env, caller: Address, id: u64) -> Result<(), Error> {
        caller.require_auth();
        let document = documents::get(&env, id).ok_or(Error::DocumentNotFound)?;
        if document.uploader != caller {
            return Err(Error::Unauthorized);
        }
        access::purge_document(&env, &document.owner, id);
        documents::delete(&env, id);
        documents::remove_from_uploader_index(&env, &caller, id);
        events::emit_document_deleted(&env, id, &caller);
        Ok(())
    }

    /// True if a document occupies `id`.
    pub fn document_exists(env: Env, id: u64) -> bool {
        documents::exists(&env, id)
    }

    /// Ids of documents registered by `uploader`.
    pub fn documents_of(env: Env, uploader: Address) -> Vec<u64> {
        documents::documents_of(&env, &uploader)
    }

    /// Mark a document as verified. Admin only. Idempotent.
    pub fn verify_document(env: Env, caller: Address, id: u64) -> Result<(), Error> {
        access_control::require_role(&env, &caller, Role::Admin)?;
        if !documents::exists(&env, id) {
            return Err(Error::DocumentNotFound);
        }
        documents::set_verified(&env, id);
        events::emit_document_verified(&env, id, &caller);
        Ok(())
    }

    /// True if an admin has verified the document.
    pub fn is_verified(env: Env, id: u64) -> bool {
        documents::is_verified(&env, id)
    }

    /// Issue the document's certificate. Admin only, at most once per document.
    pub fn issue_certificate(env: Env, caller: Address, id: u64) -> Result<(), Error> {
        access_control::require_role(&env, &caller, Role::Admin)?;
        if !documents::exists(&env, id) {
            return Err(Error::DocumentNotFound);
        }
        if documents::certificate(&env, id).is_some() {
            return Err(Error::CertificateAlreadyIssued);
        }
        let certificate = Certificate {
            document_id: id,
            issued_by: caller.clone(),
            issued_at: env.ledger().timestamp(),
        };
        documents::save_certificate(&env, &certificate);
        events::emit_certificate_issued(&env, id, &caller);
        Ok(())
    }

    /// The certificate issued for `id`, if any.
    pub fn get_certificate(env: Env, id: u64) -> Option<Certificate> {
        documents::certificate(&env, id)
    }

    // ── Access grants ───────────────────────────────────────────────

    /// Request inspection rights on a document. Any principal except the
    /// document's owner.
    ///
    /// Allowed from the absent state and from a rejected record (which
    /// re-enters Pending). A live pending or approved record blocks
    /// re-request.
    pub fn request_access(env: Env, requester: Address, document_id: u64) -> Result<(), Error> {
        requester.require_auth();
        let document = documents::get(&env, document_id).ok_or(Error::DocumentNotFound)?;
        if requester == document.owner {
            return Err(Error::SelfAccessRequest);
        }
        if let Some(existing) = access::get_request(&env, &document.owner, document_id, &requester) {
            if existing.status != AccessStatus::Rejected {
                return Err(Error::AccessAlreadyRequested);
            }
        }
        let request = AccessRequest {
            requester: requester.clone(),
            status: AccessStatus::Pending,
            requested_at: env.ledger().timestamp(),
            granted_at: None,
        };
        access::save_request(&env, &document.owner, document_id, &request);
        access::add_pending(&env, &document.owner, document_id, &requester);
        access::add_requester(&env, &document.owner, document_id, &requester);
        events::emit_access_requested(&env, &document.owner, document_id, &requester);
        Ok(())
    }

    /// Approve a pending request. Document owner only.
    pub fn grant_access(
        env: Env,
        caller: Address,
        document_id: u64,
        requester: Address,
    ) -> Result<(), Error> {
        caller.require_auth();
        let document = documents::get(&env, document_id).ok_or(Error::DocumentNotFound)?;
        if caller != document.owner {
            return Err(Error::NotDocumentOwner);
        }
        let mut request = access::get_request(&env, &document.owner, document_id, &requester)
            .filter(|r| r.status == AccessStatus::Pending)
            .ok_or(Error::NoAccessRequestFound)?;
        let granted_at = env.ledger().timestamp();
        request.status = AccessStatus::Approved;
        request.granted_at = Some(granted_at);
        access::save_request(&env, &document.owner, document_id, &request);
        access::remove_pending(&env, &document.owner, document_id, &requester);
        events::emit_access_granted(&env, &document.owner, document_id, &requester, granted_at);
        Ok(())
    }

    /// Reject a pending request. Document owner only.
    ///
    /// The record stays queryable as Rejected; the requester may request
    /// again later.
    pub fn reject_access(
        env: Env,
        caller: Address,
        document_id: u64,
        requester: Address,
    ) -> Result<(), Error> {
        caller.require_auth();
        let document = documents::get(&env, document_id).ok_or(Error::DocumentNotFound)?;
        if caller != document.owner {
            return Err(Error::NotDocumentOwner);
        }
        let mut request = access::get_request(&env, &document.owner, document_id, &requester)
            .filter(|r| r.status == AccessStatus::Pending)
            .ok_or(Error::NoAccessRequestFound)?;
        request.status = AccessStatus::Rejected;
        request.granted_at = None;
        access::save_request(&env, &document.owner, document_id, &request);
        access::remove_pending(&env, &document.owner, document_id, &requester);
        events::emit_access_rejected(&env, &document.owner, document_id, &requester);
        Ok(())
    }

    /// Revoke an approved grant. Document owner only.
    ///
    /// Deletes the record outright, so the requester may request afresh.
    pub fn revoke_access(
        env: Env,
        caller: Address,
        document_id: u64,
        requester: Address,
    ) -> Result<(), Error> {
        caller.require_auth();
        let document = documents::get(&env, document_id).ok_or(Error::DocumentNotFound)?;
        if caller != document.owner {
            return Err(Error::NotDocumentOwner);
        }
        let request = access::get_request(&env, &document.owner, document_id, &requester)
            .ok_or(Error::NoGrantedAccessToRevoke)?;
        if request.status != AccessStatus::Approved {
            return Err(Error::NoGrantedAccessToRevoke);
        }
        access::delete_request(&env, &document.owner, document_id, &requester);
        access::remove_requester(&env, &document.owner, document_id, &requester);
        events::emit_access_revoked(&env, &document.owner, document_id, &requester);
        Ok(())
    }

    /// True iff `requester` currently holds an approved grant on the document.
    pub fn check_access(env: Env, document_id: u64, requester: Address) -> bool {
        match documents::get(&env, document_id) {
            Some(document) => access::check(&env, &document.owner, document_id, &requester),
            None => false,
        }
    }

    /// The access request record for the (document, requester) pair, if any.
    pub fn get_access_request(
        env: Env,
        document_id: u64,
        requester: Address,
    ) -> Option<AccessRequest> {
        let document = documents::get(&env, document_id)?;
        access::get_request(&env, &document.owner, document_id, &requester)
    }

    /// Requesters currently awaiting the owner's decision on the document.
    pub fn get_pending_requests(env: Env, document_id: u64) -> Vec<Address> {
        match documents::get(&env, document_id) {
            Some(document) => access::pending(&env, &document.owner, document_id),
            None => Vec::new(&env),
        }
    }

    // ─── New feature methods: add new sections below (e.g. `// ── MyFeature ───` then methods). Do not edit sections above. ───
}
