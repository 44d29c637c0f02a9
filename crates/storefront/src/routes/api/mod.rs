//! JSON API routes.

pub mod catalog;
