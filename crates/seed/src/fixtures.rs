//! The literal record written by the seed script.

use blog::models::Role;
use blog::types::{PostCreate, UserCreate, UserInclude};

pub const SEED_EMAIL: &str = "jhon2@gmail.com";

/// Titles of the posts created for the seed user, in creation order.
pub const SEED_POST_TITLES: [&str; 3] = ["Learn Python", "Learn Typescript", "Learn Java"];

/// The seed user and the three posts they wrote.
pub fn seed_user() -> UserCreate {
    UserCreate {
        name: "Jhon".to_string(),
        email: SEED_EMAIL.to_string(),
        age: 25,
        role: Role::Basic,
        written_posts: SEED_POST_TITLES.into_iter().map(PostCreate::new).collect(),
    }
}

/// The seed run asks for the created posts back.
pub fn seed_include() -> UserInclude {
    UserInclude::WRITTEN_POSTS
}
