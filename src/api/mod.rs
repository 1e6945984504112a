//! API handlers for Bookworm REST endpoints

pub mod books;
pub mod collections;
pub mod health;
pub mod openapi;
pub mod people;
