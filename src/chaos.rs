// In: src/chaos.rs

//! Chaotic maps: pure recurrences driving the cipher's sequence generation.
//!
//! Each map is a deterministic function from one state to the next. The set is
//! closed: a tagged enum with one `apply` as the single source of truth for
//! every variant's behavior, rather than open-ended dynamic dispatch.

use serde::{Deserialize, Serialize};

//==================================================================================
// 1. Map State
//==================================================================================

/// State carried between iterations of a chaotic map: one or two scalars,
/// conceptually in the unit interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MapState {
    Scalar(f64),
    Pair(f64, f64),
}

impl MapState {
    /// Number of scalar components this state carries.
    pub fn arity(&self) -> usize {
        match self {
            MapState::Scalar(_) => 1,
            MapState::Pair(_, _) => 2,
        }
    }

    /// The leading component. Multi-component maps contribute only this value
    /// to the generated sequence.
    pub fn lead(&self) -> f64 {
        match self {
            MapState::Scalar(x) => *x,
            MapState::Pair(x, _) => *x,
        }
    }
}

//==================================================================================
// 2. Chaotic Maps
//==================================================================================

/// The closed set of chaotic maps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "map", rename_all = "snake_case")]
pub enum ChaosMap {
    /// `x' = mu * x * (1 - x)`
    Logistic { mu: f64 },
    /// Piecewise-linear tent map with breakpoint `p` in (0, 1).
    Tent { p: f64 },
    /// 2-D cat map `(x, y) -> (x + a*y, b*x + (a*b + 1)*y)`, each component
    /// reduced to its fractional part.
    Arnold { a: f64, b: f64 },
}

impl ChaosMap {
    /// How many state components this map requires.
    pub fn arity(&self) -> usize {
        match self {
            ChaosMap::Logistic { .. } | ChaosMap::Tent { .. } => 1,
            ChaosMap::Arnold { .. } => 2,
        }
    }

    /// Advances the state one step.
    ///
    /// State arity is validated wherever a (map, state) pair enters the system
    /// (`ChaosSystem::add_mapping`), so a mismatch here cannot occur.
    pub fn apply(&self, state: &MapState) -> MapState {
        match (self, state) {
            (ChaosMap::Logistic { mu }, MapState::Scalar(x)) => {
                MapState::Scalar(mu * x * (1.0 - x))
            }
            (ChaosMap::Tent { p }, MapState::Scalar(x)) => {
                let next = if (0.0..*p).contains(x) {
                    x / p
                } else {
                    (1.0 - x) / (1.0 - p)
                };
                MapState::Scalar(next)
            }
            (ChaosMap::Arnold { a, b }, MapState::Pair(x, y)) => {
                let nx = x + a * y;
                let ny = b * x + (a * b + 1.0) * y;
                MapState::Pair(nx.fract(), ny.fract())
            }
            (map, state) => unreachable!(
                "arity mismatch between {:?} and {:?}; rejected at attach time",
                map, state
            ),
        }
    }
}

//==================================================================================
// 3. Unit Tests
//==================================================================================
