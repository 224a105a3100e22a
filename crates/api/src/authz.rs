//! API-side guards for blog mutations.
//!
//! Thin wrappers that feed the request principal into the pure predicates of
//! `bloglist-auth`, so handlers call them before touching storage.

use bloglist_auth::{AuthzError, OwnedResource, Principal, authorize_owner, require_principal};

use crate::context::RequestPrincipal;

/// Creating a post or updating likes: any authenticated caller.
pub fn require_author(request: &RequestPrincipal) -> Result<&Principal, AuthzError> {
    require_principal(request.principal())
}

/// Deleting a post: only its owner.
pub fn authorize_delete<'r, R: OwnedResource + ?Sized>(
    request: &'r RequestPrincipal,
    resource: &R,
) -> Result<&'r Principal, AuthzError> {
    authorize_owner(request.principal(), resource)
}
