#![doc = "The `projectforge` library crate."]
#![doc = ""]
#![doc = "This crate contains the core business logic of the ProjectForge server:"]
#![doc = "the account lifecycle and token services, the project-scoped authorization"]
#![doc = "engine, the resource services for projects, tasks and notes, the store"]
#![doc = "abstractions, routing configuration and error handling. It is used by the"]
#![doc = "main binary (`main.rs`) to construct and run the application."]

pub mod auth;
pub mod authz;
pub mod config;
pub mod email;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
