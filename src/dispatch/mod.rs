//! Greedy dispatch: vehicle selection, routing, and the scheduling loop.
//!
//! - [`CandidateSelector`] — nearest vehicle with spare capacity, else any that can lift it
//! - [`Router`] — step-by-step movement with opportunistic pickups and drop-offs
//! - [`Dispatcher`] — FIFO scheduling loop producing an [`Itinerary`](crate::models::Itinerary)
//! - [`DispatchConfig`] — navigation, pickup policy and safety limits

mod config;
mod router;
mod scheduler;
mod selector;

pub use config::{DispatchConfig, PickupPolicy};
pub use router::Router;
pub use scheduler::{dispatch, Dispatcher};
pub use selector::CandidateSelector;
