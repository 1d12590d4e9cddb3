//! Session domain module.
//!
//! A session is the last query together with the leads it produced. It is
//! written after every successful search and read back once at startup.

mod model;
mod repository;

pub use model::Session;
pub use repository::SessionRepository;
