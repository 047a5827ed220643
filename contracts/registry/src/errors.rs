//! Typed failure conditions for the registry contract.
//!
//! Every fallible entry point returns `Result<_, Error>` so callers and
//! tests can branch on the exact kind. A returned error aborts the
//! invocation and rolls back any storage writes, so all failures leave
//! state unchanged.

use soroban_sdk::contracterror;

/// Failure conditions, grouped by kind.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // ── Authorization ──
    /// Caller lacks the required role, or is not the document's uploader.
    Unauthorized = 1,
    /// Caller is not the owner of the document whose requests it tried to transition.
    NotDocumentOwner = 2,

    // ── Not found ──
    /// No document is registered under the given id.
    DocumentNotFound = 3,
    /// No pending access request exists for the (document, requester) pair.
    NoAccessRequestFound = 4,

    // ── Conflict ──
    /// A document already occupies the given id.
    DocumentAlreadyExists = 5,
    /// The alias is already bound to a principal. Aliases never rebind.
    AliasAlreadyBound = 6,
    /// No approved access exists for the (document, requester) pair.
    NoGrantedAccessToRevoke = 7,
    /// A pending or approved request already exists for the (document, requester) pair.
    AccessAlreadyRequested = 8,
    /// A certificate was already issued for the document.
    CertificateAlreadyIssued = 9,
    /// The contract was already initialized.
    AlreadyInitialized = 10,
    /// Revoking this role would leave the system without any admin.
    LastAdmin = 11,

    // ── Validation ──
    /// A required string field (title, description, document type) is empty.
    EmptyField = 12,
    /// The alias is zero-length.
    AliasEmpty = 13,
    /// A document's owner tried to request access to its own document.
    SelfAccessRequest = 14,
    /// The off-chain content pointer is empty.
    EmptyContentPointer = 15,
}
