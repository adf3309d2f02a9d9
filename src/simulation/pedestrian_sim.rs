//! Pedestrian population management
//!
//! Spawning, the walking/waiting/crossing state machine, and despawning at
//! the city bound. Crossing is gated only by the curb wait timer; it does
//! not consult the signal color for the crosswalk. That mirrors the observed
//! behavior and is kept as-is rather than quietly made signal-aware.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::SimConfig;
use super::pedestrian::{PedestrianAgent, PedestrianState};
use super::road_network::RoadNetwork;
use super::types::{
    Orientation, PedestrianId, Point2, CROSSING_ARRIVE_DISTANCE, CROSSING_TARGET_JITTER,
    CROSSWALK_SEARCH_RADIUS, CROSS_TRIGGER_PROBABILITY, CROSS_WAIT_DURATION,
    PEDESTRIAN_SPAWN_PROBABILITY, SIDEWALK_SPAWN_JITTER, WALK_SPEED_FACTOR_MIN,
    WALK_SPEED_FACTOR_SPREAD,
};

/// Owns every pedestrian agent in the simulation
pub struct PedestrianSimulation {
    agents: Vec<PedestrianAgent>,
    next_id: usize,
    max_pedestrians: usize,
    walk_speed: f32,
    /// Optional seeded RNG for reproducible simulations
    rng: Option<StdRng>,
}

impl PedestrianSimulation {
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
            max_pedestrians: config.max_pedestrians,
            walk_speed: config.walk_speed,
            rng,
        }
    }

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

    /// Spawn one pedestrian on a random sidewalk
    ///
    /// Rejected at the population cap or when the network has no sidewalks.
    pub fn spawn(&mut self, network: &RoadNetwork) -> Option<PedestrianId> {
        if self.agents.len() >= self.max_pedestrians {
            return None;
        }

        let (sidewalk_id, center, width, depth, orientation) = {
            let sidewalk = match &mut self.rng {
                Some(rng) => network.random_sidewalk(rng),
                None => network.random_sidewalk(&mut rand::rng()),
            }?;
            (
                sidewalk.id,
                sidewalk.center,
                sidewalk.width,
                sidewalk.depth,
                sidewalk.orientation,
            )
        };

        // Random offset along the long axis, small jitter across it
        let lateral = (self.random_range(0.0..1.0) - 0.5) * SIDEWALK_SPAWN_JITTER;
        let position = match orientation {
            Orientation::Horizontal => Point2::new(
                center.x - width / 2.0 + self.random_range(0.0..1.0) * width,
                center.z + lateral,
            ),
            Orientation::Vertical => Point2::new(
                center.x + lateral,
                center.z - depth / 2.0 + self.random_range(0.0..1.0) * depth,
            ),
        };

        let direction = if self.random_bool(0.5) { 1.0 } else { -1.0 };
        let speed = self.walk_speed
            * (WALK_SPEED_FACTOR_MIN + self.random_range(0.0..1.0) * WALK_SPEED_FACTOR_SPREAD);
        let anim_phase = self.random_range(0.0..std::f32::consts::TAU);

        let id = PedestrianId(self.next_id);
        self.next_id += 1;

        self.agents.push(PedestrianAgent {
            id,
            sidewalk: sidewalk_id,
            position,
            direction,
            speed,
            rotation: PedestrianAgent::walking_rotation(orientation, direction),
            state: PedestrianState::Walking,
            wait_timer: 0.0,
            crossing_target: None,
            anim_phase,
        });

        debug!("spawned pedestrian {:?} on sidewalk {:?}", id, sidewalk_id);
        Some(id)
    }

    /// Spawn the initial population
    pub fn spawn_initial(&mut self, count: usize, network: &RoadNetwork) {
        let mut spawned = 0;
        for _ in 0..count {
            if self.spawn(network).is_some() {
                spawned += 1;
            }
        }
        info!("spawned {} initial pedestrians", spawned);
    }

    /// Advance every pedestrian by one tick
    pub fn tick(&mut self, dt: f32, network: &RoadNetwork) {
        // Continuous respawn while under the cap
        if self.random_bool(PEDESTRIAN_SPAWN_PROBABILITY) && self.agents.len() < self.max_pedestrians
        {
            self.spawn(network);
        }

        for index in 0..self.agents.len() {
            // Walk-cycle phase accumulates while moving; waiting resets it
            self.agents[index].anim_phase += dt * self.agents[index].speed;

            match self.agents[index].state {
                PedestrianState::Walking => self.update_walking(index, dt, network),
                PedestrianState::Waiting => self.update_waiting(index, dt, network),
                PedestrianState::Crossing => self.update_crossing(index, dt, network),
            }
        }

        // The despawn bound is the full city size, not the sidewalk extents,
        // so a crossing that drifts outward can run well past the curb before
        // the agent is removed
        let bound = network.city_size();
        self.agents
            .retain(|agent| agent.position.x.abs() <= bound && agent.position.z.abs() <= bound);
    }

    fn update_walking(&mut self, index: usize, dt: f32, network: &RoadNetwork) {
        let (sidewalk_center, sidewalk_extent, orientation) = {
            let sidewalk = network.sidewalk(self.agents[index].sidewalk);
            (sidewalk.center, sidewalk.long_extent(), sidewalk.orientation)
        };

        let agent = &mut self.agents[index];
        let movement = agent.speed * agent.direction * dt;
        agent.rotation = PedestrianAgent::walking_rotation(orientation, agent.direction);

        // Move along the long axis and reverse at either end
        match orientation {
            Orientation::Horizontal => {
                agent.position.x += movement;
                let end = sidewalk_center.x + sidewalk_extent / 2.0;
                let start = sidewalk_center.x - sidewalk_extent / 2.0;
                if agent.direction > 0.0 && agent.position.x > end {
                    agent.direction = -1.0;
                } else if agent.direction < 0.0 && agent.position.x < start {
                    agent.direction = 1.0;
                }
            }
            Orientation::Vertical => {
                agent.position.z += movement;
                let end = sidewalk_center.z + sidewalk_extent / 2.0;
                let start = sidewalk_center.z - sidewalk_extent / 2.0;
                if agent.direction > 0.0 && agent.position.z > end {
                    agent.direction = -1.0;
                } else if agent.direction < 0.0 && agent.position.z < start {
                    agent.direction = 1.0;
                }
            }
        }

        // Occasionally decide to cross, if a crosswalk is in reach
        if self.random_bool(CROSS_TRIGGER_PROBABILITY) {
            let position = self.agents[index].position;
            if network
                .nearest_crosswalk(position, CROSSWALK_SEARCH_RADIUS)
                .is_some()
            {
                let agent = &mut self.agents[index];
                agent.state = PedestrianState::Waiting;
                agent.wait_timer = 0.0;
            }
        }
    }

    fn update_waiting(&mut self, index: usize, dt: f32, network: &RoadNetwork) {
        self.agents[index].wait_timer += dt;
        self.agents[index].anim_phase = 0.0;

        if self.agents[index].wait_timer <= CROSS_WAIT_DURATION {
            return;
        }

        // Pick the crossing target now: nearest crosswalk in reach, jittered
        // so pedestrians fan out over the crossing. Crossing begins
        // regardless of the signal color for this crosswalk.
        let position = self.agents[index].position;
        let anchor = network
            .nearest_crosswalk(position, CROSSWALK_SEARCH_RADIUS)
            .map(|crosswalk| crosswalk.position);
        let jitter_x = (self.random_range(0.0..1.0) - 0.5) * 2.0 * CROSSING_TARGET_JITTER;
        let jitter_z = (self.random_range(0.0..1.0) - 0.5) * 2.0 * CROSSING_TARGET_JITTER;

        let agent = &mut self.agents[index];
        agent.wait_timer = 0.0;
        match anchor {
            Some(anchor) => {
                agent.crossing_target =
                    Some(Point2::new(anchor.x + jitter_x, anchor.z + jitter_z));
                agent.state = PedestrianState::Crossing;
            }
            None => {
                // No crosswalk in reach anymore; give up and keep walking
                agent.state = PedestrianState::Walking;
            }
        }
    }

    fn update_crossing(&mut self, index: usize, dt: f32, network: &RoadNetwork) {
        let agent = &mut self.agents[index];
        let target = match agent.crossing_target {
            Some(target) => target,
            None => {
                agent.state = PedestrianState::Walking;
                return;
            }
        };

        let dx = target.x - agent.position.x;
        let dz = target.z - agent.position.z;
        let distance = (dx * dx + dz * dz).sqrt();

        if distance < CROSSING_ARRIVE_DISTANCE {
            // Reached the far side: rebind to the nearest sidewalk
            agent.state = PedestrianState::Walking;
            agent.crossing_target = None;
            let position = agent.position;
            if let Some(sidewalk) = network.nearest_sidewalk(position) {
                self.agents[index].sidewalk = sidewalk.id;
            }
        } else {
            let step = agent.speed * dt;
            agent.position.x += dx / distance * step;
            agent.position.z += dz / distance * step;
            agent.rotation = dx.atan2(dz);
        }
    }

    /// Read-only snapshot of the current population
    pub fn agents(&self) -> &[PedestrianAgent] {
        &self.agents
    }

    pub fn count(&self) -> usize {
        self.agents.len()
    }

    /// Force an agent's state and timers, for scenario setup in tests
    pub fn force_state(&mut self, id: PedestrianId, state: PedestrianState, wait_timer: f32) {
        if let Some(agent) = self.agents.iter_mut().find(|a| a.id == id) {
            agent.state = state;
            agent.wait_timer = wait_timer;
        }
    }

    /// Force an agent's position, for scenario setup in tests
    pub fn set_position(&mut self, id: PedestrianId, position: Point2) {
        if let Some(agent) = self.agents.iter_mut().find(|a| a.id == id) {
            agent.position = position;
        }
    }

    /// Force an agent's crossing target, for scenario setup in tests
    pub fn set_crossing_target(&mut self, id: PedestrianId, target: Point2) {
        if let Some(agent) = self.agents.iter_mut().find(|a| a.id == id) {
            agent.crossing_target = Some(target);
        }
    }
}
