//! Seed script for the blog database.
//!
//! Writes one user and the three posts they wrote in a single nested create,
//! prints the created user, and disconnects.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use seed::prelude::*;
//!
//! let config = SeedConfig::from_env()?;
//! let db = Database::connect(&config.database_url, config.max_connections).await?;
//! let user = Seeder::new(db).run(&mut std::io::stdout()).await?;
//! ```

pub mod config;
pub mod db;
pub mod fixtures;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::config::SeedConfig;
    pub use crate::db::{SeedError, Seeder};
    pub use crate::fixtures::{seed_include, seed_user};
    pub use blog::prelude::*;
}
