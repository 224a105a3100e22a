use bloglist_auth::Principal;
use bloglist_core::UserId;

/// Principal context for a request (authenticated identity).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    principal: Principal,
}

impl PrincipalContext {
    pub fn new(principal: Principal) -> Self {
        Self { principal }
    }

    pub fn user_id(&self) -> UserId {
        self.principal.user_id
    }

    pub fn username(&self) -> &str {
        &self.principal.username
    }

    pub fn principal(&self) -> &Principal {
        &self.principal
    }
}

/// Outcome of principal resolution, inserted into every `/api` request.
///
/// `None` means the request carried no token, or one that did not verify.
/// Routes decide for themselves whether that is acceptable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestPrincipal(pub Option<PrincipalContext>);

impl RequestPrincipal {
    pub fn anonymous() -> Self {
        Self(None)
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.0.as_ref().map(PrincipalContext::principal)
    }
}
