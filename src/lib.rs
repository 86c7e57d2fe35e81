#![doc = "The `tasktrack` library crate."]
#![doc = ""]
#![doc = "This crate contains the domain models, authentication mechanisms, store and"]
#![doc = "service layers, routing configuration, and error handling for the TaskTrack"]
#![doc = "application. It is used by the main binary (`main.rs`) to construct and run"]
#![doc = "the server."]

pub mod auth;
pub mod config;
pub mod error;
pub mod mail;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
