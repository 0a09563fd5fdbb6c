//! Saving and loading trained policies
//!
//! A policy is stored as one JSON document holding the network weights and
//! the metadata needed to replay it.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::network::FeedForwardNetwork;

/// Metadata saved with the policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Generation in which the policy was found
    pub generation: usize,

    /// Fitness it scored in that generation
    pub fitness: f64,

    /// Grid width in cells
    pub grid_width: usize,

    /// Grid height in cells
    pub grid_height: usize,

    /// Version identifier for compatibility checking
    pub version: String,
}

impl ModelMetadata {
    /// Create new metadata
    pub fn new(generation: usize, fitness: f64, grid_width: usize, grid_height: usize) -> Self {
        Self {
            generation,
            fitness,
            grid_width,
            grid_height,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct SavedPolicy {
    metadata: ModelMetadata,
    network: FeedForwardNetwork,
}

/// Save a policy to `path`, creating parent directories if needed
pub fn save_policy(
    network: &FeedForwardNetwork,
    metadata: &ModelMetadata,
    path: &Path,
) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }

    let saved = SavedPolicy {
        metadata: metadata.clone(),
        network: network.clone(),
    };
    let json = serde_json::to_string_pretty(&saved).context("Failed to serialize policy")?;
    std::fs::write(path, json).with_context(|| format!("Failed to write policy to {:?}", path))?;

    Ok(())
}

/// Load a policy saved by [`save_policy`]
pub fn load_policy(path: &Path) -> Result<(FeedForwardNetwork, ModelMetadata)> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read policy from {:?}", path))?;
    let saved: SavedPolicy =
        serde_json::from_str(&json).with_context(|| format!("Failed to parse policy {:?}", path))?;

    if !saved.network.is_well_formed() {
        bail!(
            "Policy {:?} has {} weights, expected {} for hidden size {}",
            path,
            saved.network.weights().len(),
            FeedForwardNetwork::weight_count(saved.network.hidden_size()),
            saved.network.hidden_size()
        );
    }

    Ok((saved.network, saved.metadata))
}
