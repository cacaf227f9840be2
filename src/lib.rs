// Pedantic: suppress noise for internal crate code.
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]

pub mod catalog;
pub mod color;
pub mod components;
pub mod config;
pub mod error;
pub mod filter;
pub mod host;
pub mod picker;
pub mod registry;
pub mod selector;
pub mod theme;
