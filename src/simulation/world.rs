//! Main simulation world that ties everything together
//!
//! The orchestrator owns the network, the signal controller, and both agent
//! simulations, and advances them in a fixed order each tick: signals first,
//! then vehicles (which read the current-tick colors), then pedestrians.

use anyhow::Result;

use super::config::SimConfig;
use super::pedestrian::PedestrianState;
use super::pedestrian_sim::PedestrianSimulation;
use super::road_network::RoadNetwork;
use super::traffic_light::TrafficSignalController;
use super::types::Orientation;
use super::vehicle_sim::VehicleSimulation;

/// Fraction of the vehicle cap spawned up front
const INITIAL_VEHICLE_FRACTION: f32 = 0.5;

/// Fraction of the pedestrian cap spawned up front
const INITIAL_PEDESTRIAN_FRACTION: f32 = 0.6;

/// The complete simulation: static topology plus all dynamic state
pub struct SimWorld {
    pub config: SimConfig,
    pub network: RoadNetwork,
    pub signals: TrafficSignalController,
    pub vehicles: VehicleSimulation,
    pub pedestrians: PedestrianSimulation,
    /// Accumulated simulated time, seconds
    pub time: f32,
}

impl SimWorld {
    /// Build a world from a configuration
    ///
    /// Fails when the configuration cannot produce a valid network.
    pub fn new(config: SimConfig) -> Result<Self> {
        let network = RoadNetwork::build(&config)?;
        let signals = TrafficSignalController::new(&network, &config);
        let vehicles = VehicleSimulation::new(&config);
        let pedestrians = PedestrianSimulation::new(&config);
        Ok(Self {
            config,
            network,
            signals,
            vehicles,
            pedestrians,
            time: 0.0,
        })
    }

    /// Build a world with seeded RNGs for reproducible simulations
    pub fn new_with_seed(config: SimConfig, seed: u64) -> Result<Self> {
        let network = RoadNetwork::build(&config)?;
        let signals = TrafficSignalController::new(&network, &config);
        let vehicles = VehicleSimulation::new_with_seed(&config, seed);
        let pedestrians = PedestrianSimulation::new_with_seed(&config, seed.wrapping_add(1));
        Ok(Self {
            config,
            network,
            signals,
            vehicles,
            pedestrians,
            time: 0.0,
        })
    }

    /// Populate both agent populations at their initial fractions
    pub fn spawn_initial(&mut self) {
        let vehicle_count =
            (self.config.max_vehicles as f32 * INITIAL_VEHICLE_FRACTION) as usize;
        let pedestrian_count =
            (self.config.max_pedestrians as f32 * INITIAL_PEDESTRIAN_FRACTION) as usize;
        self.vehicles.spawn_initial(vehicle_count, &self.network);
        self.pedestrians
            .spawn_initial(pedestrian_count, &self.network);
    }

    /// Main simulation tick
    ///
    /// Ordering is significant: signals advance before vehicles query their
    /// color within the same tick.
    pub fn tick(&mut self, dt: f32) {
        self.time += dt;
        self.signals.advance(dt);
        self.vehicles.tick(dt, &self.network, &self.signals);
        self.pedestrians.tick(dt, &self.network);
    }

    /// Scale vehicle density; takes effect on the next tick
    pub fn set_traffic_density(&mut self, density: f32) {
        self.vehicles.set_density(density);
    }

    /// Print a summary of the world state
    pub fn print_summary(&self) {
        println!("=== City Simulation Summary ===");
        println!("Time: {:.2}s", self.time);
        println!(
            "Roads: {}, Lanes: {}, Intersections: {}",
            self.network.roads().len(),
            self.network.lanes().len(),
            self.network.intersections().len()
        );
        println!(
            "Vehicles: {} (density {:.2}), Pedestrians: {}",
            self.vehicles.count(),
            self.vehicles.traffic_density(),
            self.pedestrians.count()
        );

        let stopped = self
            .vehicles
            .agents()
            .iter()
            .filter(|v| v.stopped_at_light)
            .count();
        let crossing = self
            .pedestrians
            .agents()
            .iter()
            .filter(|p| p.state == PedestrianState::Crossing)
            .count();
        let waiting = self
            .pedestrians
            .agents()
            .iter()
            .filter(|p| p.state == PedestrianState::Waiting)
            .count();
        println!(
            "Stopped at lights: {}, Pedestrians waiting: {}, crossing: {}",
            stopped, waiting, crossing
        );

        if let Some(signal) = self.signals.signals().first() {
            println!(
                "Signal phase (sample): {:?}, timer {:.2}s",
                signal.phase, signal.timer
            );
        }
    }

    /// Draw a character map of the world in the terminal
    ///
    /// Roads are dots, intersections crosses, vehicles V, pedestrians p.
    pub fn draw_map(&self) {
        const MAP_COLUMNS: usize = 72;

        let half = self.config.city_size / 2.0;
        let min = -half - 2.0;
        let max = half + 2.0;
        let scale = MAP_COLUMNS as f32 / (max - min);
        let width = MAP_COLUMNS;
        let height = ((max - min) * scale * 0.5) as usize + 1;

        let mut grid = vec![vec![' '; width]; height];

        // Terminal cells are taller than wide, so the z axis is compressed
        let to_grid = |x: f32, z: f32| -> (usize, usize) {
            let col = ((x - min) * scale) as usize;
            let row = ((z - min) * scale * 0.5) as usize;
            (row.min(height - 1), col.min(width - 1))
        };

        for road in self.network.roads() {
            let steps = (road.width.max(road.depth) * scale) as usize + 1;
            for step in 0..steps {
                let t = step as f32 / steps as f32;
                let (x, z) = match road.orientation {
                    Orientation::Horizontal => (road.origin.x + t * road.width, road.origin.z),
                    Orientation::Vertical => (road.origin.x, road.origin.z + t * road.depth),
                };
                let (row, col) = to_grid(x, z);
                if grid[row][col] == ' ' {
                    grid[row][col] = '.';
                }
            }
        }

        for intersection in self.network.intersections() {
            let (row, col) = to_grid(intersection.position.x, intersection.position.z);
            grid[row][col] = '+';
        }

        for vehicle in self.vehicles.agents() {
            let position = vehicle.position(&self.network);
            let (row, col) = to_grid(position.x, position.z);
            grid[row][col] = 'V';
        }

        for pedestrian in self.pedestrians.agents() {
            let (row, col) = to_grid(pedestrian.position.x, pedestrian.position.z);
            if grid[row][col] != 'V' {
                grid[row][col] = 'p';
            }
        }

        println!("=== City Map ===");
        println!("Legend: +=Intersection, V=Vehicle, p=Pedestrian, .=Road");
        for row in &grid {
            let line: String = row.iter().collect();
            println!("{}", line);
        }
        println!();
    }
}
