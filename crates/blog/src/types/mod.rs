//! Write and read-shaping types accepted by the database client.

mod requests;

pub use requests::*;
