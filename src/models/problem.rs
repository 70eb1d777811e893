//! Dispatch problem input: the raw document and its validated form.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{DeliveryRecord, EdgeRecord, TrainRecord};
use crate::error::{DispatchError, RecordKind};

/// The raw input document: four lists of strings.
///
/// This mirrors the JSON shape produced by the instance generator and
/// consumed by surrounding tooling:
///
/// ```
/// use u_dispatch::models::ProblemDocument;
///
/// let doc = ProblemDocument {
///     stations: vec!["A".into(), "B".into(), "C".into(), "D".into()],
///     edges: vec!["E1,A,B,30".into(), "E2,B,C,10".into(), "E3,C,D,40".into()],
///     deliveries: vec!["K1,5,A,C".into()],
///     trains: vec!["Q1,6,B".into()],
/// };
/// let problem = doc.parse().unwrap();
/// assert_eq!(problem.stations().len(), 4);
/// assert_eq!(problem.deliveries()[0].weight, 5);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemDocument {
    /// Ordered station identifiers; list order is the ordinal coordinate.
    pub stations: Vec<String>,
    /// `id,stationA,stationB,distance` records.
    pub edges: Vec<String>,
    /// `id,weight,origin,destination` records.
    pub deliveries: Vec<String>,
    /// `id,capacity,station` records.
    pub trains: Vec<String>,
}

impl ProblemDocument {
    /// Parses every record and validates cross-references.
    pub fn parse(&self) -> Result<Problem, DispatchError> {
        let edges = self
            .edges
            .iter()
            .map(|r| EdgeRecord::parse(r))
            .collect::<Result<Vec<_>, _>>()?;
        let deliveries = self
            .deliveries
            .iter()
            .map(|r| DeliveryRecord::parse(r))
            .collect::<Result<Vec<_>, _>>()?;
        let trains = self
            .trains
            .iter()
            .map(|r| TrainRecord::parse(r))
            .collect::<Result<Vec<_>, _>>()?;
        Problem::new(self.stations.clone(), edges, deliveries, trains)
    }
}

/// A validated dispatch problem.
///
/// Station, edge, package and train identifiers are unique, every
/// referenced station is declared, and every record satisfies its own
/// invariants. Reachability is checked later, when the graph is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    stations: Vec<String>,
    edges: Vec<EdgeRecord>,
    deliveries: Vec<DeliveryRecord>,
    trains: Vec<TrainRecord>,
}

impl Problem {
    /// Creates a problem from typed records.
    pub fn new(
        stations: Vec<String>,
        edges: Vec<EdgeRecord>,
        deliveries: Vec<DeliveryRecord>,
        trains: Vec<TrainRecord>,
    ) -> Result<Self, DispatchError> {
        let mut known = HashSet::new();
        for s in &stations {
            if s.is_empty() {
                return Err(DispatchError::MalformedRecord {
                    kind: RecordKind::Station,
                    record: s.clone(),
                    reason: "empty station id".to_string(),
                });
            }
            if !known.insert(s.as_str()) {
                return Err(duplicate(RecordKind::Station, s));
            }
        }
        let check = |station: &str, by: &str| {
            if known.contains(station) {
                Ok(())
            } else {
                Err(DispatchError::UnknownStation {
                    station: station.to_string(),
                    referenced_by: by.to_string(),
                })
            }
        };

        let mut ids = HashSet::new();
        for e in &edges {
            e.validate()?;
            if !ids.insert(e.id.as_str()) {
                return Err(duplicate(RecordKind::Edge, &e.id));
            }
            check(&e.a, &e.id)?;
            check(&e.b, &e.id)?;
        }

        let mut ids = HashSet::new();
        for d in &deliveries {
            d.validate(&d.id)?;
            if !ids.insert(d.id.as_str()) {
                return Err(duplicate(RecordKind::Delivery, &d.id));
            }
            check(&d.origin, &d.id)?;
            check(&d.destination, &d.id)?;
        }

        let mut ids = HashSet::new();
        for t in &trains {
            if t.capacity == 0 {
                return Err(DispatchError::MalformedRecord {
                    kind: RecordKind::Train,
                    record: t.id.clone(),
                    reason: "capacity must be positive".to_string(),
                });
            }
            if !ids.insert(t.id.as_str()) {
                return Err(duplicate(RecordKind::Train, &t.id));
            }
            check(&t.station, &t.id)?;
        }

        if trains.is_empty() && !deliveries.is_empty() {
            return Err(DispatchError::EmptyFleet {
                deliveries: deliveries.len(),
            });
        }

        Ok(Self {
            stations,
            edges,
            deliveries,
            trains,
        })
    }

    /// Ordered station identifiers.
    pub fn stations(&self) -> &[String] {
        &self.stations
    }

    /// Edge records in declaration order.
    pub fn edges(&self) -> &[EdgeRecord] {
        &self.edges
    }

    /// Delivery records in declaration order.
    pub fn deliveries(&self) -> &[DeliveryRecord] {
        &self.deliveries
    }

    /// Train records in declaration order.
    pub fn trains(&self) -> &[TrainRecord] {
        &self.trains
    }

    /// Weight of the named package, if declared.
    pub fn weight_of(&self, package: &str) -> Option<u32> {
        self.deliveries
            .iter()
            .find(|d| d.id == package)
            .map(|d| d.weight)
    }

    /// Capacity of the named train, if declared.
    pub fn capacity_of(&self, train: &str) -> Option<u32> {
        self.trains
            .iter()
            .find(|t| t.id == train)
            .map(|t| t.capacity)
    }
}

fn duplicate(kind: RecordKind, id: &str) -> DispatchError {
    DispatchError::DuplicateId {
        kind,
        id: id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic() -> ProblemDocument {
        ProblemDocument {
            stations: ["A", "B", "C", "D"].map(String::from).to_vec(),
            edges: ["E1,A,B,30", "E2,B,C,10", "E3,C,D,40"]
                .map(String::from)
                .to_vec(),
            deliveries: vec!["K1,5,A,C".into()],
            trains: vec!["Q1,6,B".into()],
        }
    }

    #[test]
    fn test_parse_basic() {
        let p = basic().parse().expect("valid");
        assert_eq!(p.edges().len(), 3);
        assert_eq!(p.weight_of("K1"), Some(5));
        assert_eq!(p.capacity_of("Q1"), Some(6));
        assert_eq!(p.weight_of("K9"), None);
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "stations": ["A", "B", "C", "D"],
            "edges": ["E1,A,B,30", "E2,B,C,10", "E3,C,D,40"],
            "deliveries": ["K1,5,A,C"],
            "trains": ["Q1,6,B"]
        }"#;
        let doc: ProblemDocument = serde_json::from_str(json).expect("valid json");
        assert_eq!(doc, basic());
    }

    #[test]
    fn test_unknown_station() {
        let mut doc = basic();
        doc.trains = vec!["Q1,6,Z".into()];
        let err = doc.parse().unwrap_err();
        assert_eq!(
            err,
            DispatchError::UnknownStation {
                station: "Z".into(),
                referenced_by: "Q1".into(),
            }
        );
    }

    #[test]
    fn test_unknown_edge_station() {
        let mut doc = basic();
        doc.edges.push("E4,D,X,5".into());
        assert!(matches!(
            doc.parse(),
            Err(DispatchError::UnknownStation { .. })
        ));
    }

    #[test]
    fn test_duplicate_ids() {
        let mut doc = basic();
        doc.deliveries.push("K1,2,B,D".into());
        assert!(matches!(
            doc.parse(),
            Err(DispatchError::DuplicateId {
                kind: RecordKind::Delivery,
                ..
            })
        ));

        let mut doc = basic();
        doc.stations.push("A".into());
        assert!(matches!(
            doc.parse(),
            Err(DispatchError::DuplicateId {
                kind: RecordKind::Station,
                ..
            })
        ));
    }

    #[test]
    fn test_empty_fleet() {
        let mut doc = basic();
        doc.trains.clear();
        assert_eq!(
            doc.parse().unwrap_err(),
            DispatchError::EmptyFleet { deliveries: 1 }
        );
    }

    #[test]
    fn test_no_deliveries_no_trains() {
        let mut doc = basic();
        doc.trains.clear();
        doc.deliveries.clear();
        assert!(doc.parse().is_ok());
    }
}
