//! Typed input records and their comma-separated text form.

use serde::{Deserialize, Serialize};

use crate::error::{DispatchError, RecordKind};

/// Longest accepted edge, so path sums and clocks stay far from `u64::MAX`.
pub const MAX_EDGE_DISTANCE: u64 = u32::MAX as u64;

/// An undirected edge between two stations.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::EdgeRecord;
///
/// let e = EdgeRecord::parse("E1,A,B,30").unwrap();
/// assert_eq!(e.id, "E1");
/// assert_eq!((e.a.as_str(), e.b.as_str()), ("A", "B"));
/// assert_eq!(e.distance, 30);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    /// Edge identifier.
    pub id: String,
    /// First endpoint.
    pub a: String,
    /// Second endpoint.
    pub b: String,
    /// Travel distance (and time) along the edge.
    pub distance: u64,
}

/// A package to carry from `origin` to `destination`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryRecord {
    /// Package identifier.
    pub id: String,
    /// Package weight.
    pub weight: u32,
    /// Pickup station.
    pub origin: String,
    /// Drop-off station.
    pub destination: String,
}

/// A train with its capacity and starting station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainRecord {
    /// Vehicle identifier.
    pub id: String,
    /// Maximum total weight carried at once.
    pub capacity: u32,
    /// Station the train starts at.
    pub station: String,
}

impl EdgeRecord {
    /// Creates an edge record.
    pub fn new(id: &str, a: &str, b: &str, distance: u64) -> Self {
        Self {
            id: id.to_string(),
            a: a.to_string(),
            b: b.to_string(),
            distance,
        }
    }

    /// Parses an `id,stationA,stationB,distance` record.
    ///
    /// A distance that is zero, negative, above [`MAX_EDGE_DISTANCE`] or
    /// not an integer is reported as [`DispatchError::MalformedEdge`], as
    /// is an edge joining a station to itself.
    pub fn parse(record: &str) -> Result<Self, DispatchError> {
        let [id, a, b, distance] = fields::<4>(RecordKind::Edge, record)?;
        let distance = match distance.parse::<i64>() {
            Ok(d) if d > 0 => d as u64,
            Ok(_) => {
                return Err(DispatchError::MalformedEdge {
                    edge: id.to_string(),
                    reason: "distance must be positive",
                })
            }
            Err(_) => {
                return Err(malformed(
                    RecordKind::Edge,
                    record,
                    format!("distance {distance:?} is not an integer"),
                ))
            }
        };
        let edge = Self::new(id, a, b, distance);
        edge.validate()?;
        Ok(edge)
    }

    /// Checks the distance and endpoint invariants.
    pub fn validate(&self) -> Result<(), DispatchError> {
        if self.distance == 0 {
            return Err(DispatchError::MalformedEdge {
                edge: self.id.clone(),
                reason: "distance must be positive",
            });
        }
        if self.distance > MAX_EDGE_DISTANCE {
            return Err(DispatchError::MalformedEdge {
                edge: self.id.clone(),
                reason: "distance exceeds the supported maximum",
            });
        }
        if self.a.is_empty() || self.b.is_empty() || self.a == self.b {
            return Err(DispatchError::MalformedEdge {
                edge: self.id.clone(),
                reason: "an edge must join two distinct stations",
            });
        }
        Ok(())
    }
}

impl DeliveryRecord {
    /// Creates a delivery record.
    pub fn new(id: &str, weight: u32, origin: &str, destination: &str) -> Self {
        Self {
            id: id.to_string(),
            weight,
            origin: origin.to_string(),
            destination: destination.to_string(),
        }
    }

    /// Parses an `id,weight,origin,destination` record.
    pub fn parse(record: &str) -> Result<Self, DispatchError> {
        let [id, weight, origin, destination] = fields::<4>(RecordKind::Delivery, record)?;
        let weight = positive(RecordKind::Delivery, record, "weight", weight)?;
        let delivery = Self::new(id, weight, origin, destination);
        delivery.validate(record)?;
        Ok(delivery)
    }

    /// Checks weight and origin/destination invariants.
    ///
    /// `record` is only used to label the error.
    pub fn validate(&self, record: &str) -> Result<(), DispatchError> {
        if self.weight == 0 {
            return Err(malformed(
                RecordKind::Delivery,
                record,
                "weight must be positive".to_string(),
            ));
        }
        if self.origin == self.destination {
            return Err(malformed(
                RecordKind::Delivery,
                record,
                "origin and destination are the same station".to_string(),
            ));
        }
        Ok(())
    }
}

impl TrainRecord {
    /// Creates a train record.
    pub fn new(id: &str, capacity: u32, station: &str) -> Self {
        Self {
            id: id.to_string(),
            capacity,
            station: station.to_string(),
        }
    }

    /// Parses an `id,capacity,station` record.
    pub fn parse(record: &str) -> Result<Self, DispatchError> {
        let [id, capacity, station] = fields::<3>(RecordKind::Train, record)?;
        let capacity = positive(RecordKind::Train, record, "capacity", capacity)?;
        Ok(Self::new(id, capacity, station))
    }
}

fn malformed(kind: RecordKind, record: &str, reason: String) -> DispatchError {
    DispatchError::MalformedRecord {
        kind,
        record: record.to_string(),
        reason,
    }
}

/// Splits a record into exactly `N` trimmed, non-empty fields.
fn fields<const N: usize>(kind: RecordKind, record: &str) -> Result<[&str; N], DispatchError> {
    let parts: Vec<&str> = record.split(',').map(str::trim).collect();
    if parts.len() != N {
        return Err(malformed(
            kind,
            record,
            format!("expected {N} fields, found {}", parts.len()),
        ));
    }
    if parts.iter().any(|p| p.is_empty()) {
        return Err(malformed(kind, record, "empty field".to_string()));
    }
    let mut out = [""; N];
    out.copy_from_slice(&parts);
    Ok(out)
}

fn positive(kind: RecordKind, record: &str, field: &str, raw: &str) -> Result<u32, DispatchError> {
    match raw.parse::<u32>() {
        Ok(0) => Err(malformed(kind, record, format!("{field} must be positive"))),
        Ok(v) => Ok(v),
        Err(_) => Err(malformed(
            kind,
            record,
            format!("{field} {raw:?} is not a positive integer"),
        )),
    }
}
