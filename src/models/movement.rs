//! Move records: one edge traversal by one vehicle.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single traversal of an edge by a vehicle.
///
/// `time` is the vehicle's own clock at departure. `picked_up` lists the
/// packages loaded since the vehicle's previous move, `dropped_off` the
/// packages unloaded on arrival at `to`, and `load` the onboard packages
/// after those drop-offs.
///
/// `Display` renders the compact log line:
///
/// ```
/// use u_dispatch::models::Move;
///
/// let m = Move {
///     time: 30,
///     vehicle: "Q1".into(),
///     from: "A".into(),
///     to: "B".into(),
///     picked_up: vec!["K1".into()],
///     dropped_off: vec![],
///     load: vec!["K1".into()],
/// };
/// assert_eq!(m.to_string(), "W=30, T=Q1, N1=A, P1=[K1], N2=B, P2=[]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    /// Departure time on the vehicle's clock.
    pub time: u64,
    /// Vehicle identifier.
    pub vehicle: String,
    /// Station departed from.
    pub from: String,
    /// Station arrived at.
    pub to: String,
    /// Packages picked up before departing.
    pub picked_up: Vec<String>,
    /// Packages dropped off at `to`.
    pub dropped_off: Vec<String>,
    /// Onboard packages after the drop-offs.
    pub load: Vec<String>,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "W={}, T={}, N1={}, P1=[{}], N2={}, P2=[{}]",
            self.time,
            self.vehicle,
            self.from,
            self.picked_up.join(","),
            self.to,
            self.dropped_off.join(",")
        )
    }
}
