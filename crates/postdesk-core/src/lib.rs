//! Core postdesk library (config, session, API client, feed, validation).

pub mod api;
pub mod auth;
pub mod config;
pub mod feed;
pub mod logging;
pub mod models;
pub mod session;
pub mod validation;
