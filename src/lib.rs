//! Movie lookup core: OMDb metadata plus Watchmode streaming availability,
//! reported to a desktop presentation layer through a local HTTP bridge.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
