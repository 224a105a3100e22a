//! `bloglist-auth` — authentication/authorization boundary.
//!
//! Token issuance and verification, password hashing, and the ownership
//! predicate used to guard blog mutations. This crate is decoupled from HTTP
//! and storage.

pub mod authorize;
pub mod claims;
pub mod password;
pub mod principal;
pub mod token;

pub use authorize::{AuthzError, OwnedResource, authorize_owner, is_owner, require_principal};
pub use claims::{JwtClaims, TokenValidationError, validate_claims};
pub use password::{PasswordError, PasswordHasher};
pub use principal::Principal;
pub use token::{Hs256TokenService, JwtValidator, TokenError, TokenIssuer};
