//! Urban micro-simulation engine
//!
//! The road/lane/sidewalk model, the traffic-signal state machines, and the
//! vehicle and pedestrian agent simulations. Everything is in-memory and
//! single-threaded; the host drives the whole engine through
//! [`SimWorld::tick`] once per frame.

mod config;
pub mod palette;
mod pedestrian;
mod pedestrian_sim;
mod road_network;
mod traffic_light;
mod types;
mod vehicle;
mod vehicle_sim;
mod world;

pub use config::SimConfig;
pub use pedestrian::{PedestrianAgent, PedestrianState};
pub use pedestrian_sim::PedestrianSimulation;
pub use road_network::{Crosswalk, Intersection, Lane, Road, RoadNetwork, Sidewalk};
pub use traffic_light::{
    SignalState, TrafficPhase, TrafficSignalController, SIGNAL_MATCH_TOLERANCE,
};
pub use types::{
    Approach, IntersectionId, LaneId, LightColor, Orientation, PedestrianId, Point2, RoadId,
    SidewalkId, VehicleId, VehicleKind, CROSSING_ARRIVE_DISTANCE, CROSSING_TARGET_JITTER,
    CROSSWALK_SEARCH_RADIUS, CROSS_TRIGGER_PROBABILITY, CROSS_WAIT_DURATION, FOLLOW_FAR_FACTOR,
    FOLLOW_FAR_GAP, FOLLOW_NEAR_FACTOR, FOLLOW_NEAR_GAP, PEDESTRIAN_SPAWN_PROBABILITY,
    RED_STOP_DISTANCE, RED_STOP_MIN_GAP, SIGNAL_LOOKAHEAD_DISTANCE, VEHICLE_ACCELERATION,
    VEHICLE_BRAKING, VEHICLE_DESPAWN_MARGIN, VEHICLE_MAX_SPEED, VEHICLE_SPAWN_OFFSET_MAX,
    VEHICLE_SPAWN_PROBABILITY, VEHICLE_SPAWN_SPEED_MAX, VEHICLE_SPAWN_SPEED_MIN,
    YELLOW_SLOW_DISTANCE, YELLOW_SLOW_FACTOR,
};
pub use vehicle::VehicleAgent;
pub use vehicle_sim::VehicleSimulation;
pub use world::SimWorld;
