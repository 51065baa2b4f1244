//! Wire types for the blog API.
//!
//! Field names follow the API's camelCase JSON. Unknown fields are ignored so
//! the client keeps working when the server adds data.

use std::fmt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Post identifier.
///
/// The API may send ids as numbers or strings; both are kept verbatim as
/// text and written back in request paths unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PostId(String);

impl PostId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PostId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<u64> for PostId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for PostId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Int(i64),
            Float(f64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Int(n) => PostId(n.to_string()),
            RawId::Float(n) => PostId(n.to_string()),
            RawId::Text(s) => PostId(s),
        })
    }
}

impl Serialize for PostId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0.parse::<i64>() {
            Ok(n) => serializer.serialize_i64(n),
            Err(_) => serializer.serialize_str(&self.0),
        }
    }
}

/// Post author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl Author {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Comment attached to a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: PostId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_id: Option<PostId>,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Blog post as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Post {
    /// "By First Last", or empty when the author is unknown.
    pub fn byline(&self) -> String {
        self.author
            .as_ref()
            .map(|author| format!("By {}", author.full_name()))
            .unwrap_or_default()
    }

    /// Label shown next to the publish switch.
    pub fn status_label(&self) -> &'static str {
        if self.is_published {
            "Published"
        } else {
            "Unpublished"
        }
    }

    /// Image URL if one is set and non-blank.
    pub fn image(&self) -> Option<&str> {
        self.image_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Formatted post date, empty when absent.
    pub fn display_date(&self) -> String {
        self.date.as_deref().map(format_post_date).unwrap_or_default()
    }
}

/// Formats an RFC 3339 timestamp as `d.M.yyyy., HH:mm` in local time.
///
/// Unparseable input is returned unchanged.
pub fn format_post_date(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(date) => date
            .with_timezone(&Local)
            .format("%-d.%-m.%Y., %H:%M")
            .to_string(),
        Err(_) => raw.to_string(),
    }
}

/// `{ "posts": [...] }`
#[derive(Debug, Clone, Deserialize)]
pub struct PostsEnvelope {
    #[serde(default)]
    pub posts: Vec<Post>,
}

/// `{ "post": {...} }`
#[derive(Debug, Clone, Deserialize)]
pub struct PostEnvelope {
    pub post: Post,
}

/// Body for `POST /posts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
}

/// Body for `PUT /posts/{id}` when toggling publication.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedUpdate {
    pub is_published: bool,
}

/// Credentials sent to the login endpoint.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Login endpoint response.
///
/// Accepts either a nested `user` with first/last name or a flat
/// `fullName`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub user: Option<Author>,
    #[serde(default)]
    pub full_name: Option<String>,
}

impl LoginResponse {
    /// Display name for the session; falls back to "Admin" when the server
    /// sends none, since an empty name means logged out.
    pub fn display_name(&self) -> String {
        let name = self
            .full_name
            .clone()
            .or_else(|| self.user.as_ref().map(Author::full_name))
            .unwrap_or_default();
        if name.trim().is_empty() {
            "Admin".to_string()
        } else {
            name.trim().to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_post_id_accepts_number_and_string() {
        let numeric: PostId = serde_json::from_value(json!(1)).unwrap();
        let text: PostId = serde_json::from_value(json!("a1b2")).unwrap();
        assert_eq!(numeric.as_str(), "1");
        assert_eq!(text.as_str(), "a1b2");
        assert_eq!(serde_json::to_value(&numeric).unwrap(), json!(1));
        assert_eq!(serde_json::to_value(&text).unwrap(), json!("a1b2"));
    }

    #[test]
    fn test_minimal_post_deserializes_with_defaults() {
        let envelope: PostsEnvelope = serde_json::from_value(json!({
            "posts": [{"id": 1, "title": "Hello World!", "isPublished": false}]
        }))
        .unwrap();

        let post = &envelope.posts[0];
        assert_eq!(post.title, "Hello World!");
        assert!(!post.is_published);
        assert!(post.author.is_none());
        assert!(post.comments.is_empty());
        assert_eq!(post.status_label(), "Unpublished");
        assert_eq!(post.byline(), "");
    }

    #[test]
    fn test_post_with_author_and_comments() {
        let envelope: PostEnvelope = serde_json::from_value(json!({
            "post": {
                "id": "7",
                "title": "Title",
                "content": "Body",
                "imageUrl": "  ",
                "isPublished": true,
                "author": {"firstName": "Ada", "lastName": "Lovelace"},
                "comments": [{"id": 3, "postId": 7, "content": "Nice"}],
                "extra": "ignored"
            }
        }))
        .unwrap();

        let post = envelope.post;
        assert_eq!(post.byline(), "By Ada Lovelace");
        assert_eq!(post.status_label(), "Published");
        assert_eq!(post.image(), None);
        assert_eq!(post.comments.len(), 1);
        assert_eq!(post.comments[0].post_id, Some(PostId::from(7)));
    }

    #[test]
    fn test_format_post_date_falls_back_to_raw() {
        assert_eq!(format_post_date("yesterday"), "yesterday");
        let formatted = format_post_date("2024-03-05T09:07:00Z");
        assert!(formatted.contains(".2024., "), "got {formatted}");
    }

    #[test]
    fn test_create_request_omits_absent_publish_flag() {
        let request = CreatePostRequest {
            title: "Title".to_string(),
            content: "Content".to_string(),
            image_url: String::new(),
            is_published: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({"title": "Title", "content": "Content", "imageUrl": ""})
        );
    }

    #[test]
    fn test_login_response_display_name() {
        let nested: LoginResponse = serde_json::from_value(json!({
            "token": "t",
            "user": {"firstName": "Ada", "lastName": "Lovelace"}
        }))
        .unwrap();
        assert_eq!(nested.display_name(), "Ada Lovelace");

        let flat: LoginResponse =
            serde_json::from_value(json!({"token": "t", "fullName": "Grace Hopper"})).unwrap();
        assert_eq!(flat.display_name(), "Grace Hopper");

        let bare: LoginResponse = serde_json::from_value(json!({"token": "t"})).unwrap();
        assert_eq!(bare.display_name(), "Admin");
    }
}
