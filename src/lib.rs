//! Portfolio site behavior: the scroll-driven section animator and the
//! contact-form mail relay.

pub mod animator;
pub mod api;
pub mod client;
pub mod config;
pub mod mail;
pub mod models;
