//! Service configuration.
//!
//! Settings come from the process environment (optionally seeded from a `.env`
//! file, see [`crate::env::load_dotenv`]). The CLI layers its flags on top.

mod loader;
mod schema;

pub use schema::*;
