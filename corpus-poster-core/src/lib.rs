#![doc = "corpus-poster-core: core logic library for corpus-poster."]

//! This crate holds everything that decides *what* gets posted and *when the
//! cursor moves*: segmenting, shout merging, publishing and the run driver.
//! Transport details (HTTP posting API, cloud object storage) live in the CLI
//! crate behind the traits in [`contract`].
//!
//! # Usage
//! Build a [`contract::Context`] once, hand it to [`run::Bot::new`] and call
//! [`run::Bot::run_once`].

pub mod advance;
pub mod config;
pub mod contract;
pub mod error;
pub mod publish;
pub mod retry;
pub mod run;
pub mod segment;
pub mod store;

pub use error::PostError;
