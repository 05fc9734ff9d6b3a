//! Post record and page decoding
//!
//! The endpoint returns a JSON array of loosely-shaped objects. Entries are
//! accepted only when both `title` and `body` are strings; anything else is
//! counted as rejected and left out of the page.

use super::client::FetchError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single post as shown in the feed
///
/// `id` and `user_id` are carried when the source provides them but are not
/// used for identity. The feed keeps duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    #[serde(default, rename = "userId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,

    pub title: String,

    pub body: String,
}

impl Post {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: None,
            user_id: None,
            title: title.into(),
            body: body.into(),
        }
    }

    /// Same post with an id attached (demo corpus and tests)
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    /// Build a post from one array entry, or None if it is malformed
    fn from_entry(entry: &Value) -> Option<Self> {
        let object = entry.as_object()?;
        let title = object.get("title")?.as_str()?;
        let body = object.get("body")?.as_str()?;

        Some(Self {
            id: object.get("id").and_then(Value::as_u64),
            user_id: object.get("userId").and_then(Value::as_u64),
            title: title.to_string(),
            body: body.to_string(),
        })
    }
}

/// Posts extracted from one response body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedPage {
    /// Well-formed posts in response order
    pub posts: Vec<Post>,
    /// Entries dropped for lacking a text `title` or `body`
    pub rejected: usize,
}

/// Split a response body into typed posts
///
/// A body that is not an array is a decode failure; malformed entries inside
/// an array are not.
pub fn decode_page(value: Value) -> Result<DecodedPage, FetchError> {
    let Value::Array(entries) = value else {
        return Err(FetchError::Decode(format!(
            "expected a JSON array of posts, got {}",
            json_kind(&value)
        )));
    };

    let mut page = DecodedPage::default();
    for entry in &entries {
        match Post::from_entry(entry) {
            Some(post) => page.posts.push(post),
            None => page.rejected += 1,
        }
    }

    Ok(page)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
