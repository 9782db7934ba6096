//! API client library for reelscout.
//!
//! Provides the TMDB v3 client used by the search pipeline.

/// TMDB API client.
pub mod tmdb;
