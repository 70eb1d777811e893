//! Dispatch configuration.

use serde::{Deserialize, Serialize};

use crate::network::Navigation;

/// How many waiting packages a vehicle may load at one station per step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupPolicy {
    /// At most one package: the first that fits, in declaration order.
    FirstFit,
    /// Every package that fits, in declaration order.
    #[default]
    AllFitting,
}

/// Tunables for a dispatch run.
///
/// The two safety limits default to values derived from the problem size
/// (see [`route_step_limit_for`](Self::route_step_limit_for) and
/// [`iteration_limit_for`](Self::iteration_limit_for)); setting them
/// explicitly lets tests drive the failure path.
///
/// # Examples
///
/// ```
/// use u_dispatch::dispatch::{DispatchConfig, PickupPolicy};
/// use u_dispatch::network::Navigation;
///
/// let config = DispatchConfig::default()
///     .with_navigation(Navigation::Ordinal)
///     .with_pickup_policy(PickupPolicy::FirstFit)
///     .with_route_step_limit(8);
/// assert_eq!(config.route_step_limit_for(3), 8);
/// assert_eq!(config.iteration_limit_for(3, 4), 12);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Next-hop and selector distance strategy.
    pub navigation: Navigation,
    /// Opportunistic pickup behaviour.
    pub pickup_policy: PickupPolicy,
    /// Maximum steps of a single routing leg.
    pub route_step_limit: Option<usize>,
    /// Maximum scheduler iterations.
    pub iteration_limit: Option<usize>,
}

impl DispatchConfig {
    /// Sets the navigation strategy.
    pub fn with_navigation(mut self, navigation: Navigation) -> Self {
        self.navigation = navigation;
        self
    }

    /// Sets the pickup policy.
    pub fn with_pickup_policy(mut self, policy: PickupPolicy) -> Self {
        self.pickup_policy = policy;
        self
    }

    /// Overrides the per-leg step limit.
    pub fn with_route_step_limit(mut self, limit: usize) -> Self {
        self.route_step_limit = Some(limit);
        self
    }

    /// Overrides the scheduler iteration limit.
    pub fn with_iteration_limit(mut self, limit: usize) -> Self {
        self.iteration_limit = Some(limit);
        self
    }

    /// Effective step limit for a graph with `edges` edges.
    ///
    /// Defaults to the edge count: a simple path never has more hops.
    pub fn route_step_limit_for(&self, edges: usize) -> usize {
        self.route_step_limit.unwrap_or(edges.max(1))
    }

    /// Effective iteration limit.
    ///
    /// Defaults to `edges × deliveries` (each at least one). Every iteration
    /// delivers at least one package, so a correct run needs at most
    /// `deliveries` iterations.
    pub fn iteration_limit_for(&self, edges: usize, deliveries: usize) -> usize {
        self.iteration_limit
            .unwrap_or(edges.max(1).saturating_mul(deliveries.max(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = DispatchConfig::default();
        assert_eq!(c.navigation, Navigation::ShortestPath);
        assert_eq!(c.pickup_policy, PickupPolicy::AllFitting);
        assert_eq!(c.route_step_limit_for(5), 5);
        assert_eq!(c.route_step_limit_for(0), 1);
        assert_eq!(c.iteration_limit_for(5, 3), 15);
        assert_eq!(c.iteration_limit_for(0, 0), 1);
    }

    #[test]
    fn test_overrides() {
        let c = DispatchConfig::default()
            .with_route_step_limit(2)
            .with_iteration_limit(1);
        assert_eq!(c.route_step_limit_for(100), 2);
        assert_eq!(c.iteration_limit_for(100, 100), 1);
    }
}
