use serde::{Deserialize, Serialize};

use crate::{BlogId, Document, DomainError, DomainResult, UserId};

/// A blog post owned by the user who created it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: BlogId,
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    pub url: String,
    #[serde(default)]
    pub likes: u64,
    /// Owning user.
    pub user: UserId,
}

impl BlogPost {
    /// Build a new post for `owner`. Missing likes default to 0.
    pub fn new(
        title: impl Into<String>,
        author: Option<String>,
        url: impl Into<String>,
        likes: Option<u64>,
        owner: UserId,
    ) -> Self {
        Self {
            id: BlogId::new(),
            title: title.into(),
            author,
            url: url.into(),
            likes: likes.unwrap_or(0),
            user: owner,
        }
    }

    pub fn owner(&self) -> UserId {
        self.user
    }
}

impl Document for BlogPost {
    type Id = BlogId;

    const COLLECTION: &'static str = "blogs";

    fn id(&self) -> BlogId {
        self.id
    }

    fn validate(&self) -> DomainResult<()> {
        if self.title.trim().is_empty() {
            return Err(DomainError::validation("Path `title` is required."));
        }
        if self.url.trim().is_empty() {
            return Err(DomainError::validation("Path `url` is required."));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn likes_default_to_zero() {
        let post = BlogPost::new("No Likes", None, "https://books.com/no-likes", None, UserId::new());
        assert_eq!(post.likes, 0);
    }

    #[test]
    fn title_and_url_are_required() {
        let owner = UserId::new();

        let untitled = BlogPost::new("", Some("Arthur Jacobs".into()), "https://books.com", Some(1), owner);
        assert_eq!(
            untitled.validate(),
            Err(DomainError::validation("Path `title` is required."))
        );

        let no_url = BlogPost::new("Backend Testing", None, " ", None, owner);
        assert_eq!(
            no_url.validate(),
            Err(DomainError::validation("Path `url` is required."))
        );
    }

    #[test]
    fn stored_form_without_likes_deserializes_to_zero() {
        let owner = UserId::new();
        let raw = serde_json::json!({
            "id": BlogId::new(),
            "title": "React Backend",
            "url": "https://books.com/react-backend",
            "user": owner,
        });
        let post: BlogPost = serde_json::from_value(raw).unwrap();
        assert_eq!(post.likes, 0);
        assert_eq!(post.author, None);
        assert_eq!(post.owner(), owner);
    }
}
