//! Policy evaluation for neuroevolved snakes
//!
//! Provides:
//! - The 11-element observation encoder
//! - The `Policy` contract and action selection
//! - Per-agent fitness shaping
//! - The population evaluator and the single-agent replay driver
//! - A reference network, optimizer and JSON persistence for the binary

pub mod config;
pub mod error;
pub mod evaluator;
pub mod evolution;
pub mod fitness;
pub mod network;
pub mod observation;
pub mod persistence;
pub mod policy;
pub mod replay;

pub use config::{EvaluatorConfig, EvolutionConfig, FitnessConfig};
pub use error::EvaluationError;
pub use evaluator::{AgentReport, GenerationReport, PopulationEvaluator};
pub use evolution::{Evolution, Optimizer};
pub use fitness::FitnessTracker;
pub use network::FeedForwardNetwork;
pub use observation::{create_observation, Observation, OBSERVATION_SIZE};
pub use persistence::{load_policy, save_policy, ModelMetadata};
pub use policy::{select_action, FnPolicy, Policy, NUM_ACTIONS};
pub use replay::{ReplayDriver, TickRate};
