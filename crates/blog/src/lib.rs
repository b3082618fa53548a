//! Blog schema and database client.
//!
//! Owns the `users`/`posts` migrations, the row models, and [`Database`],
//! which performs nested creates: a user and the posts they wrote, inserted
//! in one transaction.
//!
//! ```rust,ignore
//! use blog::prelude::*;
//!
//! let db = Database::connect(&database_url, 1).await?;
//! let payload = UserCreate {
//!     name: "Ada".into(),
//!     email: "ada@example.com".into(),
//!     age: 36,
//!     role: Role::Basic,
//!     written_posts: vec![PostCreate::new("Notes on the Engine")],
//! };
//! let user = db.create_user(&payload, UserInclude::WRITTEN_POSTS).await?;
//! db.disconnect().await;
//! ```

pub mod database;
pub mod errors;
pub mod models;
pub mod types;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::database::{Database, UserStore};
    pub use crate::errors::AppError;
    pub use crate::models::{Post, Role, User, UserWithPosts};
    pub use crate::types::{PostCreate, UserCreate, UserInclude};
}
