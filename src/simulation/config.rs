//! Simulation configuration
//!
//! All tunable parameters for a run. Geometry fields are validated when the
//! road network is built; the engine never silently produces a degenerate
//! network from a bad configuration.

use anyhow::{bail, Result};

/// Configuration for a simulation run
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Side length of the square city
    pub city_size: f32,
    /// Side length of a city block (road spacing is `block_size + road_width`)
    pub block_size: f32,
    /// Width of every road
    pub road_width: f32,
    /// Width of every sidewalk
    pub sidewalk_width: f32,
    /// Seconds a signal axis stays green
    pub green_duration: f32,
    /// Seconds a signal axis stays yellow
    pub yellow_duration: f32,
    /// Vehicle population cap before the density multiplier
    pub max_vehicles: usize,
    /// Pedestrian population cap
    pub max_pedestrians: usize,
    /// Base pedestrian walk speed, units per second
    pub walk_speed: f32,
    /// Multiplier on the vehicle cap and spawn probability
    pub traffic_density: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            city_size: 300.0,
            block_size: 40.0,
            road_width: 12.0,
            sidewalk_width: 2.0,
            green_duration: 8.0,
            yellow_duration: 2.0,
            max_vehicles: 50,
            max_pedestrians: 40,
            walk_speed: 2.0,
            traffic_density: 1.0,
        }
    }
}

impl SimConfig {
    /// Check that the configuration describes a buildable city
    pub fn validate(&self) -> Result<()> {
        if self.city_size <= 0.0 {
            bail!("city_size must be positive, got {}", self.city_size);
        }
        if self.block_size <= 0.0 {
            bail!("block_size must be positive, got {}", self.block_size);
        }
        if self.road_width <= 0.0 {
            bail!("road_width must be positive, got {}", self.road_width);
        }
        if self.sidewalk_width <= 0.0 {
            bail!("sidewalk_width must be positive, got {}", self.sidewalk_width);
        }
        if self.green_duration <= 0.0 || self.yellow_duration <= 0.0 {
            bail!(
                "signal durations must be positive, got green={} yellow={}",
                self.green_duration,
                self.yellow_duration
            );
        }
        Ok(())
    }
}
