//! Random problem instances.
//!
//! Generates path-topology instances: stations `A, B, C, ...` joined in
//! list order, so both navigation strategies apply. Distances, capacities
//! and weights are multiples of a configurable step, and every package
//! fits the largest generated train, so every instance is solvable.
//!
//! # Examples
//!
//! ```
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use u_dispatch::dispatch::dispatch;
//! use u_dispatch::generator::{generate, GeneratorConfig};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let doc = generate(&GeneratorConfig::default().with_multiplier(5), &mut rng).unwrap();
//! let itinerary = dispatch(&doc.parse().unwrap()).unwrap();
//! assert!(itinerary.solution_time() > 0);
//! ```

use rand::Rng;
use thiserror::Error;

use crate::models::{ProblemDocument, MAX_EDGE_DISTANCE};

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Exclusive upper bound of the value multiplier.
pub const MAX_MULTIPLIER: u32 = 40;

/// Errors from an unusable [`GeneratorConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneratorError {
    /// Station names are single letters.
    #[error("at most {limit} stations are supported, got {max}")]
    TooManyStations {
        /// Requested maximum.
        max: usize,
        /// Alphabet size.
        limit: usize,
    },
    /// Instances need room for distinct origins and destinations.
    #[error("at least 3 stations are required, got {min}")]
    TooFewStations {
        /// Requested minimum.
        min: usize,
    },
    /// The multiplier must be in `1..MAX_MULTIPLIER`.
    #[error("multiplier must be between 1 and {}, got {multiplier}", MAX_MULTIPLIER - 1)]
    InvalidMultiplier {
        /// Requested multiplier.
        multiplier: u32,
    },
    /// A min/max pair admits no value.
    #[error("{field} range {min}..={max} is empty")]
    EmptyRange {
        /// Name of the range.
        field: &'static str,
        /// Lower bound.
        min: u64,
        /// Upper bound.
        max: u64,
    },
}

/// Size and value ranges for generated instances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Fewest stations.
    pub min_stations: usize,
    /// Most stations (at most 26).
    pub max_stations: usize,
    /// Longest edge, clamped to [`MAX_EDGE_DISTANCE`].
    pub max_distance: u64,
    /// Fewest packages.
    pub min_deliveries: usize,
    /// Most packages.
    pub max_deliveries: usize,
    /// Fewest trains.
    pub min_trains: usize,
    /// Most trains.
    pub max_trains: usize,
    /// Smallest train capacity.
    pub min_capacity: u32,
    /// Largest train capacity.
    pub max_capacity: u32,
    /// Step for distances, capacities and weights.
    pub multiplier: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_stations: 3,
            max_stations: 10,
            max_distance: 100,
            min_deliveries: 2,
            max_deliveries: 10,
            min_trains: 2,
            max_trains: 8,
            min_capacity: 20,
            max_capacity: 100,
            multiplier: 1,
        }
    }
}

impl GeneratorConfig {
    /// Sets the value step.
    pub fn with_multiplier(mut self, multiplier: u32) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Sets the station count range.
    pub fn with_stations(mut self, min: usize, max: usize) -> Self {
        self.min_stations = min;
        self.max_stations = max;
        self
    }

    /// Sets the package count range.
    pub fn with_deliveries(mut self, min: usize, max: usize) -> Self {
        self.min_deliveries = min;
        self.max_deliveries = max;
        self
    }

    /// Sets the train count range.
    pub fn with_trains(mut self, min: usize, max: usize) -> Self {
        self.min_trains = min;
        self.max_trains = max;
        self
    }

    /// Checks that every range can produce a value.
    pub fn validate(&self) -> Result<(), GeneratorError> {
        if self.max_stations > ALPHABET.len() {
            return Err(GeneratorError::TooManyStations {
                max: self.max_stations,
                limit: ALPHABET.len(),
            });
        }
        if self.min_stations < 3 {
            return Err(GeneratorError::TooFewStations {
                min: self.min_stations,
            });
        }
        if self.multiplier == 0 || self.multiplier >= MAX_MULTIPLIER {
            return Err(GeneratorError::InvalidMultiplier {
                multiplier: self.multiplier,
            });
        }
        let m = u64::from(self.multiplier);
        let min_capacity = u64::from(self.min_capacity.max(1)).div_ceil(m) * m;
        let ranges = [
            ("stations", self.min_stations as u64, self.max_stations as u64),
            ("distance", m, self.max_distance),
            ("deliveries", self.min_deliveries as u64, self.max_deliveries as u64),
            ("trains", self.min_trains.max(1) as u64, self.max_trains as u64),
            ("capacity", min_capacity, u64::from(self.max_capacity)),
        ];
        for (field, min, max) in ranges {
            if min > max {
                return Err(GeneratorError::EmptyRange { field, min, max });
            }
        }
        Ok(())
    }
}

/// Generates a random path-topology instance.
pub fn generate<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<ProblemDocument, GeneratorError> {
    config.validate()?;
    let m = config.multiplier;

    let n = rng.random_range(config.min_stations..=config.max_stations);
    let stations: Vec<String> = ALPHABET[..n]
        .iter()
        .map(|&c| char::from(c).to_string())
        .collect();

    let max_distance = config.max_distance.min(MAX_EDGE_DISTANCE);
    let edges = stations
        .windows(2)
        .enumerate()
        .map(|(i, pair)| {
            let distance = multiple_in(rng, u64::from(m), max_distance, u64::from(m));
            format!("E{},{},{},{distance}", i + 1, pair[0], pair[1])
        })
        .collect();

    let train_count = rng.random_range(config.min_trains.max(1)..=config.max_trains);
    let min_capacity = config.min_capacity.max(1).div_ceil(m) * m;
    let mut highest = 0;
    let trains = (1..=train_count)
        .map(|i| {
            let capacity = multiple_in(
                rng,
                u64::from(min_capacity),
                u64::from(config.max_capacity),
                u64::from(m),
            );
            highest = highest.max(capacity);
            let station = &stations[rng.random_range(0..n)];
            format!("Q{i},{capacity},{station}")
        })
        .collect();

    let delivery_count = rng.random_range(config.min_deliveries..=config.max_deliveries);
    let deliveries = (1..=delivery_count)
        .map(|i| {
            let weight = multiple_in(rng, u64::from(m), highest, u64::from(m));
            let origin = rng.random_range(0..n);
            let mut destination = rng.random_range(0..n - 1);
            if destination >= origin {
                destination += 1;
            }
            format!("K{i},{weight},{},{}", stations[origin], stations[destination])
        })
        .collect();

    Ok(ProblemDocument {
        stations,
        edges,
        deliveries,
        trains,
    })
}

/// A uniformly chosen multiple of `step` in `[min, max]`.
fn multiple_in<R: Rng + ?Sized>(rng: &mut R, min: u64, max: u64, step: u64) -> u64 {
    let lo = min.div_ceil(step);
    let hi = (max / step).max(lo);
    rng.random_range(lo..=hi) * step
}
