use serde::{Deserialize, Serialize};

use crate::{BlogId, Document, DomainError, DomainResult, UserId};

/// Minimum length of both username and plain-text password.
pub const MIN_CREDENTIAL_LEN: usize = 3;

const CREDENTIALS_REQUIRED: &str = "username and password are required";
const CREDENTIALS_TOO_SHORT: &str = "username and password must be at least 3 characters long";

/// A registered account. Only the password hash is ever stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    pub password_hash: String,
    /// Posts created by this user, in creation order.
    #[serde(default)]
    pub blogs: Vec<BlogId>,
}

impl User {
    pub fn new(username: impl Into<String>, name: Option<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            username: username.into(),
            name,
            password_hash: password_hash.into(),
            blogs: Vec::new(),
        }
    }

    pub fn add_blog(&mut self, blog: BlogId) {
        if !self.blogs.contains(&blog) {
            self.blogs.push(blog);
        }
    }

    /// Returns `true` when the reference was present.
    pub fn remove_blog(&mut self, blog: BlogId) -> bool {
        let before = self.blogs.len();
        self.blogs.retain(|b| *b != blog);
        self.blogs.len() != before
    }
}

/// Check sign-up credentials before the password is hashed.
///
/// Both fields are required and must be at least [`MIN_CREDENTIAL_LEN`]
/// characters long.
pub fn validate_credentials<'a>(
    username: Option<&'a str>,
    password: Option<&'a str>,
) -> DomainResult<(&'a str, &'a str)> {
    let (Some(username), Some(password)) = (username, password) else {
        return Err(DomainError::validation(CREDENTIALS_REQUIRED));
    };
    if username.is_empty() || password.is_empty() {
        return Err(DomainError::validation(CREDENTIALS_REQUIRED));
    }
    if username.chars().count() < MIN_CREDENTIAL_LEN || password.chars().count() < MIN_CREDENTIAL_LEN {
        return Err(DomainError::validation(CREDENTIALS_TOO_SHORT));
    }
    Ok((username, password))
}

impl Document for User {
    type Id = UserId;

    const COLLECTION: &'static str = "users";

    fn id(&self) -> UserId {
        self.id
    }

    fn validate(&self) -> DomainResult<()> {
        if self.username.is_empty() {
            return Err(DomainError::validation(CREDENTIALS_REQUIRED));
        }
        if self.username.chars().count() < MIN_CREDENTIAL_LEN {
            return Err(DomainError::validation(CREDENTIALS_TOO_SHORT));
        }
        if self.password_hash.is_empty() {
            return Err(DomainError::validation("password hash missing"));
        }
        Ok(())
    }

    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        vec![("username", self.username.clone())]
    }
}
