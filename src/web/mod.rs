//! Local web front end
//!
//! A single upload page: POST an image, get back the five closest company
//! logos by color. Display only; all computation lives in [`crate::recommend`].

pub mod handlers;
pub mod server;

pub use server::serve;
