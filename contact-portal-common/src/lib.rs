#![warn(clippy::missing_docs_in_private_items)]
#![warn(clippy::missing_const_for_fn)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

//! Data model and control flow of the contact portal. Nothing in this crate touches the DOM or
//! the network directly; the browser client supplies a backend and a scheduler.

pub mod app;
pub mod data;
pub mod service;
pub mod validation;
pub mod wire;
