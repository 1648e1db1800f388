//! Vote-state reconciliation for a community Q&A client.
//!
//! - [`apply_intent`] - pure vote state machine (no I/O)
//! - [`VoteController`] - single-flight sync of one vote control with the remote service
//! - [`VoteService`] / [`HttpVoteService`] - remote boundary and its REST adapter
//! - [`Session`] - explicitly injected authentication context
//! - [`VoteRegistry`] - optional shared store so every view of a target agrees
mod config;
mod controller;
mod errors;
pub mod metrics;
mod notify;
mod registry;
mod remote;
mod session;
pub(crate) mod utils;
mod vote;

pub use config::*;
pub use controller::*;
pub use errors::*;
pub use notify::*;
pub use registry::*;
pub use remote::*;
pub use session::*;
pub use vote::*;

//-----------------------------------------------------------
// Test utils

#[cfg(test)]
pub(crate) mod test_utils;
