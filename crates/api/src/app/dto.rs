use std::collections::HashMap;

use serde::Deserialize;
use serde_json::json;

use bloglist_core::{AuthorCount, BlogId, BlogPost, Contact, User, UserId};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateContactRequest {
    pub name: Option<String>,
    pub number: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateContactRequest {
    pub name: Option<String>,
    pub number: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateBlogRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<u64>,
}

/// `likes` must be a non-negative integer; anything else fails extraction.
#[derive(Debug, Deserialize)]
pub struct UpdateLikesRequest {
    pub likes: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn contact_to_json(contact: &Contact) -> serde_json::Value {
    json!({
        "id": contact.id.to_string(),
        "name": contact.name,
        "number": contact.number,
    })
}

/// Blog with its owner as a bare id.
pub fn blog_to_json(blog: &BlogPost) -> serde_json::Value {
    json!({
        "id": blog.id.to_string(),
        "title": blog.title,
        "author": blog.author,
        "url": blog.url,
        "likes": blog.likes,
        "user": blog.user.to_string(),
    })
}

/// Blog with its owner expanded to `{id, username, name}` (null if the owner is gone).
pub fn blog_with_owner_to_json(blog: &BlogPost, owners: &HashMap<UserId, &User>) -> serde_json::Value {
    let owner = owners.get(&blog.user).map(|user| {
        json!({
            "id": user.id.to_string(),
            "username": user.username,
            "name": user.name,
        })
    });

    json!({
        "id": blog.id.to_string(),
        "title": blog.title,
        "author": blog.author,
        "url": blog.url,
        "likes": blog.likes,
        "user": owner,
    })
}

/// User without the password hash, blog references as bare ids.
pub fn user_to_json(user: &User) -> serde_json::Value {
    json!({
        "id": user.id.to_string(),
        "username": user.username,
        "name": user.name,
        "blogs": user.blogs.iter().map(ToString::to_string).collect::<Vec<_>>(),
    })
}

/// User with referenced blogs expanded to `{id, title, author, url, likes}`.
///
/// References to blogs that no longer exist are skipped.
pub fn user_with_blogs_to_json(user: &User, blogs: &HashMap<BlogId, &BlogPost>) -> serde_json::Value {
    let blogs: Vec<serde_json::Value> = user
        .blogs
        .iter()
        .filter_map(|id| blogs.get(id))
        .map(|blog| {
            json!({
                "id": blog.id.to_string(),
                "title": blog.title,
                "author": blog.author,
                "url": blog.url,
                "likes": blog.likes,
            })
        })
        .collect();

    json!({
        "id": user.id.to_string(),
        "username": user.username,
        "name": user.name,
        "blogs": blogs,
    })
}

pub fn stats_to_json(total_likes: u64, favorite: Option<&BlogPost>, most_blogs: Option<AuthorCount>) -> serde_json::Value {
    json!({
        "total_likes": total_likes,
        "favorite": favorite.map(blog_to_json),
        "most_blogs": most_blogs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_json_never_contains_the_password_hash() {
        let user = User::new("root", Some("Superuser".into()), "$2b$04$secret");
        let value = user_to_json(&user);

        assert_eq!(value["username"], "root");
        assert!(value.get("password_hash").is_none());
        assert!(value.get("passwordHash").is_none());
    }

    #[test]
    fn blog_owner_is_expanded_when_known() {
        let user = User::new("root", None, "hash");
        let blog = BlogPost::new("Title", None, "http://example.com", None, user.id);

        let owners = HashMap::from([(user.id, &user)]);
        let value = blog_with_owner_to_json(&blog, &owners);
        assert_eq!(value["user"]["username"], "root");
        assert_eq!(value["likes"], 0);

        let value = blog_with_owner_to_json(&blog, &HashMap::new());
        assert!(value["user"].is_null());
    }

    #[test]
    fn user_blogs_skip_dangling_references() {
        let mut user = User::new("root", None, "hash");
        let blog = BlogPost::new("Title", Some("Author".into()), "http://example.com", Some(3), user.id);
        user.add_blog(blog.id);
        user.add_blog(BlogId::new());

        let blogs = HashMap::from([(blog.id, &blog)]);
        let value = user_with_blogs_to_json(&user, &blogs);
        let listed = value["blogs"].as_array().unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0]["title"], "Title");
        assert!(listed[0].get("user").is_none());
    }

    #[test]
    fn likes_must_be_a_non_negative_integer() {
        assert!(serde_json::from_value::<UpdateLikesRequest>(json!({ "likes": 7 })).is_ok());
        assert!(serde_json::from_value::<UpdateLikesRequest>(json!({ "likes": "invalid likes" })).is_err());
        assert!(serde_json::from_value::<UpdateLikesRequest>(json!({ "likes": -1 })).is_err());
        assert!(serde_json::from_value::<UpdateLikesRequest>(json!({ "likes": 1.5 })).is_err());
    }
}
