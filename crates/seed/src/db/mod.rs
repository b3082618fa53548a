//! Database integration for the seed run.
//!
//! The [`Seeder`] submits the seed payload to a [`blog::database::UserStore`],
//! prints what was created, and releases the store on every exit path.

mod seeder;

pub use seeder::{SeedError, Seeder};
