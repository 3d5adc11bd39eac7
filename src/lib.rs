#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::unnecessary_literal_bound,
    clippy::module_name_repetitions,
    clippy::struct_field_names,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::return_self_not_must_use
)]

pub mod backend;
pub mod config;
pub mod detect;
pub mod error;
pub mod host;
#[doc(hidden)]
pub mod observability;
pub mod pipeline;
pub mod state;
pub mod ui;

pub use config::Config;
pub use error::{BuddyError, Result};
