use thiserror::Error;

use bloglist_core::{BlogPost, UserId};

use crate::Principal;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    /// No principal could be resolved for the request.
    #[error("token missing or invalid")]
    Unauthenticated,

    /// The principal is authenticated but does not own the resource.
    #[error("only the creator can delete a blog")]
    NotOwner,
}

/// Anything stored with a reference to the user that created it.
pub trait OwnedResource {
    fn owner_id(&self) -> UserId;
}

impl OwnedResource for BlogPost {
    fn owner_id(&self) -> UserId {
        self.owner()
    }
}

/// Ownership predicate: does `principal` own `resource`?
///
/// Compares identifiers only, independent of how the owner is stored.
pub fn is_owner<R: OwnedResource + ?Sized>(principal: &Principal, resource: &R) -> bool {
    principal.user_id == resource.owner_id()
}

/// Guard for mutations that only need an authenticated caller
/// (creating a post, updating likes).
pub fn require_principal(principal: Option<&Principal>) -> Result<&Principal, AuthzError> {
    principal.ok_or(AuthzError::Unauthenticated)
}

/// Guard for mutations restricted to the owner (deleting a post).
pub fn authorize_owner<'p, R: OwnedResource + ?Sized>(
    principal: Option<&'p Principal>,
    resource: &R,
) -> Result<&'p Principal, AuthzError> {
    let principal = require_principal(principal)?;
    if is_owner(principal, resource) {
        Ok(principal)
    } else {
        Err(AuthzError::NotOwner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blog_owned_by(owner: UserId) -> BlogPost {
        BlogPost::new("Test Blog", Some("Test Author".into()), "http://testurl.com", Some(0), owner)
    }

    #[test]
    fn missing_principal_is_unauthenticated() {
        assert_eq!(require_principal(None), Err(AuthzError::Unauthenticated));

        let blog = blog_owned_by(UserId::new());
        assert_eq!(authorize_owner(None, &blog), Err(AuthzError::Unauthenticated));
    }

    #[test]
    fn owner_may_delete() {
        let principal = Principal::new(UserId::new(), "root");
        let blog = blog_owned_by(principal.user_id);

        assert!(is_owner(&principal, &blog));
        assert_eq!(authorize_owner(Some(&principal), &blog), Ok(&principal));
    }

    #[test]
    fn other_principal_is_not_owner() {
        let principal = Principal::new(UserId::new(), "mallory");
        let blog = blog_owned_by(UserId::new());

        assert!(!is_owner(&principal, &blog));
        assert_eq!(authorize_owner(Some(&principal), &blog), Err(AuthzError::NotOwner));
    }

    #[test]
    fn any_principal_passes_the_plain_guard() {
        let principal = Principal::new(UserId::new(), "someone");
        assert_eq!(require_principal(Some(&principal)), Ok(&principal));
    }
}
