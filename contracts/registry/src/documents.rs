//! Document records and their lifecycle storage.
//!
//! Documents are keyed by a caller-supplied numeric id. A verifier uploads
//! on behalf of a student owner, so each record carries both the
//! `uploader` (who may delete it) and the `owner` (who decides access
//! grants). A per-uploader index answers "which documents did this
//! verifier register" without scanning.

use soroban_sdk::{contracttype, Address, Env, String, Vec};

use crate::errors::Error;

/// A registered document.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Document {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub doc_type: String,
    /// Off-chain content pointer (e.g. an IPFS CID).
    pub content_ref: String,
    /// Verifier that registered the document. Only it may delete.
    pub uploader: Address,
    /// Student the document belongs to. Owner-gated operations key off this.
    pub owner: Address,
    pub uploaded_at: u64,
}

/// Certificate issued against a document. At most one per document.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Certificate {
    pub document_id: u64,
    pub issued_by: Address,
    pub issued_at: u64,
}

/// Storage keys for the document registry.
#[contracttype]
#[derive(Clone)]
pub enum DocumentKey {
    /// id -> document record.
    Document(u64),
    /// uploader -> ids of documents they registered.
    UploaderIndex(Address),
    /// id -> admin verification mark.
    Verified(u64),
    /// id -> issued certificate.
    Certificate(u64),
}

// ════════════════════════════════════════════════════════════════════
//  Records
// ════════════════════════════════════════════════════════════════════

/// Validate the required string fields of an upload.
pub fn validate_fields(
    title: &String,
    description: &String,
    doc_type: &String,
    content_ref: &String,
) -> Result<(), Error> {
    if title.len() == 0 || description.len() == 0 || doc_type.len() == 0 {
        return Err(Error::EmptyField);
    }
    if content_ref.len() == 0 {
        return Err(Error::EmptyContentPointer);
    }
    Ok(())
}

/// The document under `id`, if any.
pub fn get(env: &Env, id: u64) -> Option<Document> {
    env.storage().instance().get(&DocumentKey::Document(id))
}

/// Store a document record.
pub fn save(env: &Env, document: &Document) {
    env.storage()
        .instance()
        .set(&DocumentKey::Document(document.id), document);
}

/// Remove the record under `id`, along with its verification mark and
/// certificate. A later upload under the same id starts from a clean slate.
pub fn delete(env: &Env, id: u64) {
    env.storage().instance().remove(&DocumentKey::Document(id));
    env.storage().instance().remove(&DocumentKey::Verified(id));
    env.storage().instance().remove(&DocumentKey::Certificate(id));
}

/// True if a document occupies `id`.
pub fn exists(env: &Env, id: u64) -> bool {
    env.storage().instance().has(&DocumentKey::Document(id))
}

// ════════════════════════════════════════════════════════════════════
//  Uploader index
// ════════════════════════════════════════════════════════════════════

/// Ids of documents registered by `uploader` (in upload order).
pub fn documents_of(env: &Env, uploader: &Address) -> Vec<u64> {
    env.storage()
        .instance()
        .get(&DocumentKey::UploaderIndex(uploader.clone()))
        .unwrap_or_else(|| Vec::new(env))
}

/// Record `id` in the uploader's index.
pub fn add_to_uploader_index(env: &Env, uploader: &Address, id: u64) {
    let mut ids = documents_of(env, uploader);
    ids.push_back(id);
    env.storage()
        .instance()
        .set(&DocumentKey::UploaderIndex(uploader.clone()), &ids);
}

/// Drop `id` from the uploader's index.
pub fn remove_from_uploader_index(env: &Env, uploader: &Address, id: u64) {
    let mut ids = documents_of(env, uploader);
    if let Some(i) = ids.first_index_of(id) {
        let _ = ids.remove(i);
        env.storage()
            .instance()
            .set(&DocumentKey::UploaderIndex(uploader.clone()), &ids);
    }
}

// ════════════════════════════════════════════════════════════════════
//  Verification mark and certificates
// ════════════════════════════════════════════════════════════════════

/// Mark the document as verified by an admin. Idempotent.
pub fn set_verified(env: &Env, id: u64) {
    env.storage().instance().set(&DocumentKey::Verified(id), &true);
}

/// True if an admin has verified the document.
pub fn is_verified(env: &Env, id: u64) -> bool {
    env.storage()
        .instance()
        .get(&DocumentKey::Verified(id))
        .unwrap_or(false)
}

/// The certificate issued for `id`, if any.
pub fn certificate(env: &Env, id: u64) -> Option<Certificate> {
    env.storage().instance().get(&DocumentKey::Certificate(id))
}

/// Store an issued certificate.
pub fn save_certificate(env: &Env, certificate: &Certificate) {
    env.storage()
        .instance()
        .set(&DocumentKey::Certificate(certificate.document_id), certificate);
}
