//! Vehicle population management
//!
//! Spawning, despawning, and the per-tick update loop for vehicle agents.
//! The leader scan is a plain O(n²) pass over the population; at the target
//! scale of a few dozen agents that is cheaper than maintaining a per-lane
//! index, though bucketing by lane would be the next step for larger runs.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use super::config::SimConfig;
use super::road_network::RoadNetwork;
use super::traffic_light::TrafficSignalController;
use super::types::{
    LaneId, VehicleId, VehicleKind, VEHICLE_MAX_SPEED, VEHICLE_SPAWN_OFFSET_MAX,
    VEHICLE_SPAWN_PROBABILITY, VEHICLE_SPAWN_SPEED_MAX, VEHICLE_SPAWN_SPEED_MIN,
};
use super::vehicle::VehicleAgent;

/// Owns every vehicle agent in the simulation
pub struct VehicleSimulation {
    agents: Vec<VehicleAgent>,
    next_id: usize,
    max_vehicles: usize,
    traffic_density: f32,
    /// Optional seeded RNG for reproducible simulations
    rng: Option<StdRng>,
}

impl VehicleSimulation {
    pub fn new(config: &SimConfig) -> Self {
        Self::new_internal(config, None)
    }

    /// Create a simulation with a seeded RNG for reproducible runs
    pub fn new_with_seed(config: &SimConfig, seed: u64) -> Self {
        Self::new_internal(config, Some(StdRng::seed_from_u64(seed)))
    }

    fn new_internal(config: &SimConfig, rng: Option<StdRng>) -> Self {
        Self {
            agents: Vec::new(),
            next_id: 0,
            max_vehicles: config.max_vehicles,
            traffic_density: config.traffic_density,
            rng,
        }
    }

    /// Get a random value in the given range, using the seeded RNG if available
    fn random_range(&mut self, range: std::ops::Range<f32>) -> f32 {
        match &mut self.rng {
            Some(rng) => rng.random_range(range),
            None => rand::rng().random_range(range),
        }
    }

    fn random_bool(&mut self, probability: f64) -> bool {
        match &mut self.rng {
            Some(rng) => rng.random_bool(probability),
            None => rand::rng().random_bool(probability),
        }
    }

    fn random_kind(&mut self) -> VehicleKind {
        let picked = match &mut self.rng {
            Some(rng) => VehicleKind::ALL.choose(rng),
            None => VehicleKind::ALL.choose(&mut rand::rng()),
        };
        picked.copied().unwrap_or(VehicleKind::Car)
    }

    /// Effective population cap after the density multiplier
    fn effective_cap(&self) -> usize {
        (self.max_vehicles as f32 * self.traffic_density) as usize
    }

    /// Spawn one vehicle of the given kind on a random lane
    ///
    /// Rejected when the population is at the density-scaled cap or the
    /// network has no lanes. Returns the new agent's id when spawned.
    pub fn spawn(&mut self, kind: VehicleKind, network: &RoadNetwork) -> Option<VehicleId> {
        if self.agents.len() >= self.effective_cap() {
            return None;
        }

        let lane_id = match &mut self.rng {
            Some(rng) => network.random_lane(rng).map(|lane| lane.id),
            None => network.random_lane(&mut rand::rng()).map(|lane| lane.id),
        }?;

        let id = VehicleId(self.next_id);
        self.next_id += 1;

        let agent = VehicleAgent {
            id,
            lane: lane_id,
            kind,
            progress: self.random_range(0.0..VEHICLE_SPAWN_OFFSET_MAX),
            speed: self.random_range(VEHICLE_SPAWN_SPEED_MIN..VEHICLE_SPAWN_SPEED_MAX),
            max_speed: VEHICLE_MAX_SPEED,
            stopped_at_light: false,
        };

        debug!("spawned vehicle {:?} ({:?}) on lane {:?}", id, kind, lane_id);
        self.agents.push(agent);
        Some(id)
    }

    /// Spawn the initial population of random kinds
    pub fn spawn_initial(&mut self, count: usize, network: &RoadNetwork) {
        let mut spawned = 0;
        for _ in 0..count {
            let kind = self.random_kind();
            if self.spawn(kind, network).is_some() {
                spawned += 1;
            }
        }
        info!("spawned {} initial vehicles", spawned);
    }

    /// Advance every vehicle by one tick
    ///
    /// Signals must already have advanced for this tick; vehicles read the
    /// current-tick color, never a stale one.
    pub fn tick(&mut self, dt: f32, network: &RoadNetwork, signals: &TrafficSignalController) {
        // Probabilistic respawn while under the cap
        if self.random_bool((VEHICLE_SPAWN_PROBABILITY * self.traffic_density as f64).min(1.0)) {
            let kind = self.random_kind();
            self.spawn(kind, network);
        }

        // Snapshot lane occupancy before mutating so the leader scan sees a
        // consistent view of the whole population
        let occupancy: Vec<(LaneId, f32)> = self
            .agents
            .iter()
            .map(|agent| (agent.lane, agent.progress))
            .collect();

        for (index, agent) in self.agents.iter_mut().enumerate() {
            let gap = leader_gap(&occupancy, index);
            agent.update(dt, gap, network, signals);
        }

        // Removal happens after the mutation pass so despawns are safe under
        // iteration
        self.agents.retain(|agent| !agent.past_despawn_bound(network));
    }

    /// Scale the population cap and spawn probability
    ///
    /// Takes effect on the next tick; an existing population above the new
    /// cap is not culled.
    pub fn set_density(&mut self, density: f32) {
        self.traffic_density = density.max(0.0);
    }

    pub fn traffic_density(&self) -> f32 {
        self.traffic_density
    }

    /// Read-only snapshot of the current population
    pub fn agents(&self) -> &[VehicleAgent] {
        &self.agents
    }

    pub fn count(&self) -> usize {
        self.agents.len()
    }

    /// Force an agent's progress, for scenario setup in tests
    pub fn set_progress(&mut self, id: VehicleId, progress: f32) {
        if let Some(agent) = self.agents.iter_mut().find(|a| a.id == id) {
            agent.progress = progress;
        }
    }

    /// Force an agent's speed, for scenario setup in tests
    pub fn set_speed(&mut self, id: VehicleId, speed: f32) {
        if let Some(agent) = self.agents.iter_mut().find(|a| a.id == id) {
            agent.speed = speed;
        }
    }

    /// Move an agent to a specific lane and progress, for scenario setup
    pub fn place(&mut self, id: VehicleId, lane: LaneId, progress: f32) {
        if let Some(agent) = self.agents.iter_mut().find(|a| a.id == id) {
            agent.lane = lane;
            agent.progress = progress;
        }
    }
}

/// Minimum positive progress gap to any agent ahead on the same lane
///
/// `f32::INFINITY` when no agent is ahead. Agents at exactly equal progress
/// do not count as leaders.
fn leader_gap(occupancy: &[(LaneId, f32)], index: usize) -> f32 {
    let (lane, progress) = occupancy[index];
    let mut min_gap = f32::INFINITY;

    for (other_index, &(other_lane, other_progress)) in occupancy.iter().enumerate() {
        if other_index == index || other_lane != lane {
            continue;
        }
        if other_progress <= progress {
            continue;
        }
        min_gap = min_gap.min(other_progress - progress);
    }

    min_gap
}
