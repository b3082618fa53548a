//! Nested-write payloads and inclusion directives.

use serde::{Deserialize, Serialize};

use crate::models::Role;

/// Payload for creating a user together with the posts they wrote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreate {
    pub name: String,
    pub email: String,
    pub age: i32,
    #[serde(default)]
    pub role: Role,
    /// Created in order, in the same transaction as the user.
    #[serde(default)]
    pub written_posts: Vec<PostCreate>,
}

/// A post nested inside a [`UserCreate`]. The author is the enclosing user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostCreate {
    pub title: String,
    pub average_rating: f64,
}

impl PostCreate {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            average_rating: 0.0,
        }
    }
}

/// Which relations to return alongside a user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInclude {
    #[serde(default)]
    pub written_posts: bool,
}

impl UserInclude {
    /// Include nothing beyond the user row.
    pub const NONE: Self = Self {
        written_posts: false,
    };

    /// Include the posts the user wrote.
    pub const WRITTEN_POSTS: Self = Self {
        written_posts: true,
    };
}
