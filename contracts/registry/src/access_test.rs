//! Access-grant state machine tests.
//!
//! Covers every transition of the per-(owner, document, requester)
//! lifecycle, the owner-only gating, the pending-index bookkeeping, and
//! the purge performed by document deletion.

use super::*;
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::{Address, Env, String};

struct Fixture {
    env: Env,
    client: DocumentRegistryContractClient<'static>,
    admin: Address,
    verifier: Address,
    owner: Address,
}

const DOC: u64 = 42;

/// Helper: registry with one verifier and one document owned by `owner`.
fn setup() -> Fixture {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(DocumentRegistryContract, ());
    let client = DocumentRegistryContractClient::new(&env, &contract_id);
    let admin = Address::generate(&env);
    client.initialize(&admin);
    let verifier = Address::generate(&env);
    client.grant_role(&admin, &verifier, &Role::Verifier);
    let owner = Address::generate(&env);
    client.upload_document(
        &verifier,
        &DOC,
        &String::from_str(&env, "Transcript"),
        &String::from_str(&env, "Final-year transcript"),
        &String::from_str(&env, "PDF"),
        &String::from_str(&env, "QmTranscriptCid"),
        &owner,
    );
    Fixture {
        env,
        client,
        admin,
        verifier,
        owner,
    }
}

// ════════════════════════════════════════════════════════════════════
//  Requesting
// ════════════════════════════════════════════════════════════════════

#[test]
fn test_request_enters_pending() {
    let f = setup();
    let employer = Address::generate(&f.env);

    f.client.request_access(&employer, &DOC);

    let request = f.client.get_access_request(&DOC, &employer).unwrap();
    assert_eq!(request.status, AccessStatus::Pending);
    assert_eq!(request.granted_at, None);

    let pending = f.client.get_pending_requests(&DOC);
    assert_eq!(pending.len(), 1);
    assert_eq!(pending.get(0).unwrap(), employer);

    assert!(!f.client.check_access(&DOC, &employer));
}

#[test]
fn test_request_missing_document() {
    let f = setup();
    let employer = Address::generate(&f.env);

    assert_eq!(
        f.client.try_request_access(&employer, &99),
        Err(Ok(Error::DocumentNotFound))
    );
}

#[test]
fn test_owner_cannot_request_own_document() {
    let f = setup();
    assert_eq!(
        f.client.try_request_access(&f.owner, &DOC),
        Err(Ok(Error::SelfAccessRequest))
    );
}

#[test]
fn test_pending_request_blocks_rerequest() {
    let f = setup();
    let employer = Address::generate(&f.env);

    f.client.request_access(&employer, &DOC);
    assert_eq!(
        f.client.try_request_access(&employer, &DOC),
        Err(Ok(Error::AccessAlreadyRequested))
    );

    // The pending index holds a single entry.
    assert_eq!(f.client.get_pending_requests(&DOC).len(), 1);
}

#[test]
fn test_approved_grant_blocks_rerequest() {
    let f = setup();
    let employer = Address::generate(&f.env);

    f.client.request_access(&employer, &DOC);
    f.client.grant_access(&f.owner, &DOC, &employer);

    assert_eq!(
        f.client.try_request_access(&employer, &DOC),
        Err(Ok(Error::AccessAlreadyRequested))
    );
}

// ════════════════════════════════════════════════════════════════════
//  Granting
// ════════════════════════════════════════════════════════════════════

#[test]
fn test_grant_approves_and_timestamps() {
    let f = setup();
    let employer = Address::generate(&f.env);

    f.env.ledger().with_mut(|li| li.timestamp = 1_700_000_000);

    f.client.request_access(&employer, &DOC);
    f.client.grant_access(&f.owner, &DOC, &employer);

    assert!(f.client.check_access(&DOC, &employer));
    let request = f.client.get_access_request(&DOC, &employer).unwrap();
    assert_eq!(request.status, AccessStatus::Approved);
    assert_eq!(request.granted_at, Some(1_700_000_000));

    // Granting clears the pending index.
    assert_eq!(f.client.get_pending_requests(&DOC).len(), 0);
}

#[test]
fn test_only_owner_can_grant() {
    let f = setup();
    let employer = Address::generate(&f.env);
    let outsider = Address::generate(&f.env);

    f.client.request_access(&employer, &DOC);

    assert_eq!(
        f.client.try_grant_access(&outsider, &DOC, &employer),
        Err(Ok(Error::NotDocumentOwner))
    );
    assert!(!f.client.check_access(&DOC, &employer));
}

#[test]
fn test_uploader_is_not_the_owner() {
    let f = setup();
    let employer = Address::generate(&f.env);

    f.client.request_access(&employer, &DOC);

    // The verifier registered the document but the student owns it.
    assert_eq!(
        f.client.try_grant_access(&f.verifier, &DOC, &employer),
        Err(Ok(Error::NotDocumentOwner))
    );
}

#[test]
fn test_grant_without_request() {
    let f = setup();
    let employer = Address::generate(&f.env);

    assert_eq!(
        f.client.try_grant_access(&f.owner, &DOC, &employer),
        Err(Ok(Error::NoAccessRequestFound))
    );
}

// ════════════════════════════════════════════════════════════════════
//  Rejecting
// ════════════════════════════════════════════════════════════════════

#[test]
fn test_reject_keeps_terminal_record() {
    let f = setup();
    let employer = Address::generate(&f.env);

    f.client.request_access(&employer, &DOC);
    f.client.reject_access(&f.owner, &DOC, &employer);

    let request = f.client.get_access_request(&DOC, &employer).unwrap();
    assert_eq!(request.status, AccessStatus::Rejected);
    assert!(!f.client.check_access(&DOC, &employer));
    assert_eq!(f.client.get_pending_requests(&DOC).len(), 0);
}

#[test]
fn test_grant_after_reject_fails() {
    let f = setup();
    let employer = Address::generate(&f.env);

    f.client.request_access(&employer, &DOC);
    f.client.reject_access(&f.owner, &DOC, &employer);

    // Only pending records are grantable; the rejected one is not.
    assert_eq!(
        f.client.try_grant_access(&f.owner, &DOC, &employer),
        Err(Ok(Error::NoAccessRequestFound))
    );
}

#[test]
fn test_only_owner_can_reject() {
    let f = setup();
    let employer = Address::generate(&f.env);
    let outsider = Address::generate(&f.env);

    f.client.request_access(&employer, &DOC);
    assert_eq!(
        f.client.try_reject_access(&outsider, &DOC, &employer),
        Err(Ok(Error::NotDocumentOwner))
    );
}

#[test]
fn test_reject_without_request() {
    let f = setup();
    let employer = Address::generate(&f.env);

    assert_eq!(
        f.client.try_reject_access(&f.owner, &DOC, &employer),
        Err(Ok(Error::NoAccessRequestFound))
    );
}

#[test]
fn test_rerequest_after_reject_reenters_pending() {
    let f = setup();
    let employer = Address::generate(&f.env);

    f.client.request_access(&employer, &DOC);
    f.client.reject_access(&f.owner, &DOC, &employer);
    f.client.request_access(&employer, &DOC);

    let request = f.client.get_access_request(&DOC, &employer).unwrap();
    assert_eq!(request.status, AccessStatus::Pending);
    assert_eq!(f.client.get_pending_requests(&DOC).len(), 1);

    // The revived request is grantable as usual.
    f.client.grant_access(&f.owner, &DOC, &employer);
    assert!(f.client.check_access(&DOC, &employer));
}

// ════════════════════════════════════════════════════════════════════
//  Revoking
// ════════════════════════════════════════════════════════════════════

#[test]
fn test_revoke_deletes_record() {
    let f = setup();
    let employer = Address::generate(&f.env);

    f.client.request_access(&employer, &DOC);
    f.client.grant_access(&f.owner, &DOC, &employer);
    assert!(f.client.check_access(&DOC, &employer));

    f.client.revoke_access(&f.owner, &DOC, &employer);

    assert!(!f.client.check_access(&DOC, &employer));
    assert_eq!(f.client.get_access_request(&DOC, &employer), None);
}

#[test]
fn test_revoke_requires_approved_record() {
    let f = setup();
    let employer = Address::generate(&f.env);

    // Absent record.
    assert_eq!(
        f.client.try_revoke_access(&f.owner, &DOC, &employer),
        Err(Ok(Error::NoGrantedAccessToRevoke))
    );

    // Pending record is not revocable either.
    f.client.request_access(&employer, &DOC);
    assert_eq!(
        f.client.try_revoke_access(&f.owner, &DOC, &employer),
        Err(Ok(Error::NoGrantedAccessToRevoke))
    );
    assert_eq!(f.client.get_pending_requests(&DOC).len(), 1);
}

#[test]
fn test_only_owner_can_revoke() {
    let f = setup();
    let employer = Address::generate(&f.env);
    let outsider = Address::generate(&f.env);

    f.client.request_access(&employer, &DOC);
    f.client.grant_access(&f.owner, &DOC, &employer);

    assert_eq!(
        f.client.try_revoke_access(&outsider, &DOC, &employer),
        Err(Ok(Error::NotDocumentOwner))
    );
    assert!(f.client.check_access(&DOC, &employer));
}

#[test]
fn test_rerequest_after_revoke() {
    let f = setup();
    let employer = Address::generate(&f.env);

    f.client.request_access(&employer, &DOC);
    f.client.grant_access(&f.owner, &DOC, &employer);
    f.client.revoke_access(&f.owner, &DOC, &employer);

    // The key returned to absent; a fresh request starts over.
    f.client.request_access(&employer, &DOC);
    let request = f.client.get_access_request(&DOC, &employer).unwrap();
    assert_eq!(request.status, AccessStatus::Pending);
    assert_eq!(request.granted_at, None);
}

// ════════════════════════════════════════════════════════════════════
//  Bookkeeping across requesters
// ════════════════════════════════════════════════════════════════════

#[test]
fn test_pending_index_tracks_multiple_requesters() {
    let f = setup();
    let first = Address::generate(&f.env);
    let second = Address::generate(&f.env);
    let third = Address::generate(&f.env);

    f.client.request_access(&first, &DOC);
    f.client.request_access(&second, &DOC);
    f.client.request_access(&third, &DOC);
    assert_eq!(f.client.get_pending_requests(&DOC).len(), 3);

    f.client.grant_access(&f.owner, &DOC, &first);
    f.client.reject_access(&f.owner, &DOC, &second);

    let pending = f.client.get_pending_requests(&DOC);
    assert_eq!(pending.len(), 1);
    assert_eq!(pending.get(0).unwrap(), third);

    // Decisions for one requester leave the others untouched.
    assert!(f.client.check_access(&DOC, &first));
    assert!(!f.client.check_access(&DOC, &second));
    assert!(!f.client.check_access(&DOC, &third));
}

#[test]
fn test_requests_scoped_per_document() {
    let f = setup();
    let employer = Address::generate(&f.env);
    let other_owner = Address::generate(&f.env);

    f.client.upload_document(
        &f.verifier,
        &7,
        &String::from_str(&f.env, "Diploma"),
        &String::from_str(&f.env, "Graduate diploma"),
        &String::from_str(&f.env, "PDF"),
        &String::from_str(&f.env, "QmDiplomaCid"),
        &other_owner,
    );

    f.client.request_access(&employer, &DOC);
    f.client.request_access(&employer, &7);
    f.client.grant_access(&f.owner, &DOC, &employer);

    assert!(f.client.check_access(&DOC, &employer));
    assert!(!f.client.check_access(&7, &employer));
    assert_eq!(f.client.get_pending_requests(&7).len(), 1);
}

// ════════════════════════════════════════════════════════════════════
//  Document deletion purge
// ════════════════════════════════════════════════════════════════════

#[test]
fn test_delete_purges_access_state() {
    let f = setup();
    let granted = Address::generate(&f.env);
    let pending = Address::generate(&f.env);
    let rejected = Address::generate(&f.env);

    f.client.request_access(&granted, &DOC);
    f.client.request_access(&pending, &DOC);
    f.client.request_access(&rejected, &DOC);
    f.client.grant_access(&f.owner, &DOC, &granted);
    f.client.reject_access(&f.owner, &DOC, &rejected);

    f.client.delete_document(&f.verifier, &DOC);

    // Re-upload under the same id and owner: no memory of earlier state.
    f.client.upload_document(
        &f.verifier,
        &DOC,
        &String::from_str(&f.env, "Transcript"),
        &String::from_str(&f.env, "Reissued transcript"),
        &String::from_str(&f.env, "PDF"),
        &String::from_str(&f.env, "QmReissuedCid"),
        &f.owner,
    );

    assert!(!f.client.check_access(&DOC, &granted));
    assert_eq!(f.client.get_access_request(&DOC, &granted), None);
    assert_eq!(f.client.get_access_request(&DOC, &pending), None);
    assert_eq!(f.client.get_access_request(&DOC, &rejected), None);
    assert_eq!(f.client.get_pending_requests(&DOC).len(), 0);

    // Fresh requests work normally on the reissued document.
    f.client.request_access(&granted, &DOC);
    assert_eq!(f.client.get_pending_requests(&DOC).len(), 1);
}

// ════════════════════════════════════════════════════════════════════
//  Queries on unknown keys
// ════════════════════════════════════════════════════════════════════

#[test]
fn test_queries_on_unknown_document() {
    let f = setup();
    let employer = Address::generate(&f.env);

    assert!(!f.client.check_access(&99, &employer));
    assert_eq!(f.client.get_access_request(&99, &employer), None);
    assert_eq!(f.client.get_pending_requests(&99).len(), 0);
}

#[test]
fn test_admin_role_grants_no_access_shortcut() {
    let f = setup();

    // Admins hold no implicit inspection rights.
    assert!(!f.client.check_access(&DOC, &f.admin));
}
