//! Mutable run state: fleet, delivery registry, and their bundle.

mod dispatch_state;
mod fleet;
mod registry;

pub use dispatch_state::DispatchState;
pub use fleet::FleetState;
pub use registry::DeliveryRegistry;
