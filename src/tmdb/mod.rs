// src/tmdb/mod.rs
//! TMDB API surface: the async HTTP client and the wire types it decodes.

pub mod client;
pub mod types;

pub use client::{TmdbClient, TMDB_BASE_URL};
