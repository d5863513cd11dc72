//! Content Studio Library
//!
//! Session controller and preview harness for the content creator screen.

pub mod config;
pub mod controller;
pub mod error;
pub mod fixtures;
pub mod model;
pub mod notify;
pub mod repl;
pub mod studio;
