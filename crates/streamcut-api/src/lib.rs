// crates/streamcut-api/src/lib.rs
//
// Everything that talks to the hosting service. No egui dependency —
// results reach streamcut-ui via channels only.
//
// To add a new service capability:
//   1. Add the endpoint call to client.rs
//   2. Add a result variant to streamcut-core::messages::ApiResult
//   3. Add a spawn method to worker.rs

pub mod client;
pub mod error;
pub mod poster;
pub mod upload;
pub mod worker;

pub use client::{ServiceClient, ServiceConfig};
pub use error::ApiError;
pub use worker::ApiWorker;
