// In: src/config.rs

//! The single source of truth for cipher configuration.
//!
//! Components are wired from plain data: closed, serde-tagged enums describe
//! the generator and the operation pipeline, and `CipherConfig::build` turns
//! a description into a ready [`Encryptor`]. This keeps the build-by-name
//! ergonomics of configuration files (JSON round-trips cleanly) without any
//! open-ended runtime dispatch, and concentrates all fail-fast validation in
//! one place.

use serde::{Deserialize, Serialize};

use crate::chaos::{ChaosMap, MapState};
use crate::encryptor::Encryptor;
use crate::error::KaosError;
use crate::ops::CipherOp;
use crate::sequence::{ChaosSystem, RandomSystem, SequenceGenerator};

//==================================================================================
// I. Component Specs
//==================================================================================

/// A chaotic map together with its initial state.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "map", rename_all = "snake_case")]
pub enum MapSpec {
    Logistic {
        #[serde(default = "default_mu")]
        mu: f64,
        initial: f64,
    },
    Tent {
        #[serde(default = "default_breakpoint")]
        p: f64,
        initial: f64,
    },
    Arnold {
        #[serde(default = "default_coeff")]
        a: f64,
        #[serde(default = "default_coeff")]
        b: f64,
        initial: [f64; 2],
    },
}

impl MapSpec {
    /// Splits the variant into the map and its initial state, validating the
    /// parameter domain. Each variant carries an initial state of the right
    /// arity by construction; what remains to check is the Tent breakpoint,
    /// which must stay inside (0, 1) for both branches to be well-defined.
    fn build(&self) -> Result<(ChaosMap, MapState), KaosError> {
        match *self {
            MapSpec::Logistic { mu, initial } => {
                Ok((ChaosMap::Logistic { mu }, MapState::Scalar(initial)))
            }
            MapSpec::Tent { p, initial } => {
                if !(p > 0.0 && p < 1.0) {
                    return Err(KaosError::InvalidConfig(format!(
                        "tent breakpoint must lie in (0, 1), got {}",
                        p
                    )));
                }
                Ok((ChaosMap::Tent { p }, MapState::Scalar(initial)))
            }
            MapSpec::Arnold { a, b, initial } => Ok((
                ChaosMap::Arnold { a, b },
                MapState::Pair(initial[0], initial[1]),
            )),
        }
    }
}

/// The sequence generator kind.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "generator", rename_all = "snake_case")]
pub enum GeneratorSpec {
    Chaos { maps: Vec<MapSpec> },
    Random { seed: u64 },
}

impl GeneratorSpec {
    fn build(&self) -> Result<SequenceGenerator, KaosError> {
        match self {
            GeneratorSpec::Chaos { maps } => {
                let mut sys = ChaosSystem::new();
                for spec in maps {
                    let (map, initial) = spec.build()?;
                    sys.add_mapping(map, initial)?;
                }
                Ok(SequenceGenerator::Chaos(sys))
            }
            GeneratorSpec::Random { seed } => {
                Ok(SequenceGenerator::Random(RandomSystem::new(*seed)))
            }
        }
    }
}

/// One operation in the pipeline. Mirrors [`CipherOp`] minus the transform
/// plugin, which is code rather than data and is attached programmatically.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum OpSpec {
    RowShuffle {
        #[serde(default = "default_times")]
        times: usize,
    },
    ColumnShuffle {
        #[serde(default = "default_times")]
        times: usize,
    },
    Diffusion {
        #[serde(default = "default_times")]
        times: usize,
    },
    Compositional {
        ops: Vec<OpSpec>,
        #[serde(default = "default_times")]
        times: usize,
    },
}

impl OpSpec {
    fn build(&self) -> CipherOp {
        match self {
            OpSpec::RowShuffle { times } => CipherOp::RowShuffle { times: *times },
            OpSpec::ColumnShuffle { times } => CipherOp::ColumnShuffle { times: *times },
            OpSpec::Diffusion { times } => CipherOp::Diffusion { times: *times },
            OpSpec::Compositional { ops, times } => CipherOp::Compositional {
                ops: ops.iter().map(OpSpec::build).collect(),
                times: *times,
            },
        }
    }
}

//==================================================================================
// II. The Unified CipherConfig
//==================================================================================

/// A complete cipher description: one generator, one ordered operation list.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CipherConfig {
    pub generator: GeneratorSpec,
    pub ops: Vec<OpSpec>,
}

impl CipherConfig {
    /// Parses a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, KaosError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the configuration to JSON.
    pub fn to_json(&self) -> Result<String, KaosError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validates the description and assembles a ready encryptor.
    pub fn build(&self) -> Result<Encryptor, KaosError> {
        let mut encryptor = Encryptor::new(self.generator.build()?);
        for spec in &self.ops {
            encryptor.add_operation(spec.build());
        }
        Ok(encryptor)
    }

    /// The classic wiring: an Arnold + Tent chaos generator driving one
    /// compositional pass of row shuffle, column shuffle and diffusion.
    pub fn classic(
        row_shuffle_times: usize,
        column_shuffle_times: usize,
        diffusion_times: usize,
        tent_initial: f64,
    ) -> Self {
        Self {
            generator: GeneratorSpec::Chaos {
                maps: vec![
                    MapSpec::Arnold {
                        a: 1.0,
                        b: 1.0,
                        initial: [1.2, 2.5],
                    },
                    MapSpec::Tent {
                        p: 0.5,
                        initial: tent_initial,
                    },
                ],
            },
            ops: vec![OpSpec::Compositional {
                ops: vec![
                    OpSpec::RowShuffle {
                        times: row_shuffle_times,
                    },
                    OpSpec::ColumnShuffle {
                        times: column_shuffle_times,
                    },
                    OpSpec::Diffusion {
                        times: diffusion_times,
                    },
                ],
                times: 1,
            }],
        }
    }
}

//==================================================================================
// III. Serde Defaults
//==================================================================================

fn default_mu() -> f64 {
    0.5
}

fn default_breakpoint() -> f64 {
    0.5
}

fn default_coeff() -> f64 {
    1.0
}

fn default_times() -> usize {
    1
}

//==================================================================================
// IV. Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_roundtrip() {
        let config = CipherConfig::classic(5, 3, 3, 0.8);
        let json = config.to_json().unwrap();
        let parsed = CipherConfig::from_json(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_tagged_format_is_stable() {
        let json = r#"{
            "generator": { "generator": "chaos", "maps": [
                { "map": "logistic", "mu": 3.9, "initial": 0.4 },
                { "map": "arnold", "initial": [1.2, 2.5] }
            ]},
            "ops": [
                { "op": "row_shuffle", "times": 2 },
                { "op": "diffusion" }
            ]
        }"#;
        let config = CipherConfig::from_json(json).unwrap();
        assert_eq!(
            config.generator,
            GeneratorSpec::Chaos {
                maps: vec![
                    MapSpec::Logistic {
                        mu: 3.9,
                        initial: 0.4
                    },
                    MapSpec::Arnold {
                        a: 1.0,
                        b: 1.0,
                        initial: [1.2, 2.5]
                    },
                ]
            }
        );
        // Omitted `times` falls back to 1.
        assert_eq!(config.ops[1], OpSpec::Diffusion { times: 1 });
    }

    #[test]
    fn test_invalid_tent_breakpoint_rejected() {
        let config = CipherConfig {
            generator: GeneratorSpec::Chaos {
                maps: vec![MapSpec::Tent {
                    p: 1.0,
                    initial: 0.4,
                }],
            },
            ops: vec![],
        };
        assert!(matches!(
            config.build(),
            Err(KaosError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_build_assembles_working_encryptor() {
        let mut encryptor = CipherConfig::classic(2, 2, 1, 0.8).build().unwrap();
        let image = crate::Image::from_shape_fn((6, 6, 3), |(i, j, k)| (i * 36 + j * 6 + k) as u8);
        let cipher = encryptor.encrypt(&image).unwrap();
        let restored = encryptor.decrypt(&cipher).unwrap();
        assert_eq!(restored, image);
    }

    #[test]
    fn test_random_generator_spec_builds() {
        let config = CipherConfig {
            generator: GeneratorSpec::Random { seed: 99 },
            ops: vec![OpSpec::RowShuffle { times: 4 }],
        };
        let mut encryptor = config.build().unwrap();
        let image = crate::Image::from_shape_fn((5, 4, 1), |(i, j, _)| (i * 4 + j) as u8);
        let cipher = encryptor.encrypt(&image).unwrap();
        let restored = encryptor.decrypt(&cipher).unwrap();
        assert_eq!(restored, image);
    }
}
