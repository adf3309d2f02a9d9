//! Core types for the city simulation
//!
//! Shared geometry, identifiers, and tuning constants used across the
//! road network, signal controller, and agent simulations.

/// Index of a road in the network's road table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoadId(pub usize);

/// Index of a lane in the network's lane table
///
/// Lanes are created once at build time and never move or disappear, so a
/// `LaneId` stays valid for the lifetime of the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LaneId(pub usize);

/// Index of an intersection in the network's intersection table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntersectionId(pub usize);

/// Index of a sidewalk in the network's sidewalk table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SidewalkId(pub usize);

/// A unique identifier for a vehicle agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VehicleId(pub usize);

/// A unique identifier for a pedestrian agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PedestrianId(pub usize);

/// A point on the ground plane
///
/// The simulation is flat; `x` runs east-west and `z` runs north-south.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2 {
    pub x: f32,
    pub z: f32,
}

impl Point2 {
    pub fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    pub fn distance(&self, other: &Point2) -> f32 {
        let dx = self.x - other.x;
        let dz = self.z - other.z;
        (dx * dx + dz * dz).sqrt()
    }
}

/// Axis a road or sidewalk runs along
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// The compass direction from which traffic reaches an intersection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Approach {
    North,
    South,
    East,
    West,
}

impl Approach {
    /// Whether this approach is on the north-south axis
    pub fn is_north_south(&self) -> bool {
        matches!(self, Approach::North | Approach::South)
    }
}

/// Color shown to one approach of an intersection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightColor {
    Red,
    Yellow,
    Green,
}

/// Type of vehicle in the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleKind {
    Car,
    Taxi,
    Truck,
    Bus,
}

impl VehicleKind {
    /// All spawnable kinds, used for random selection at spawn time
    pub const ALL: [VehicleKind; 4] = [
        VehicleKind::Car,
        VehicleKind::Taxi,
        VehicleKind::Truck,
        VehicleKind::Bus,
    ];
}

/// Top speed for every vehicle, world units per second
pub const VEHICLE_MAX_SPEED: f32 = 25.0;

/// Spawn speed range for vehicles
pub const VEHICLE_SPAWN_SPEED_MIN: f32 = 15.0;
pub const VEHICLE_SPAWN_SPEED_MAX: f32 = 25.0;

/// Vehicles spawn with a random head start of up to this distance along the lane
pub const VEHICLE_SPAWN_OFFSET_MAX: f32 = 50.0;

/// Vehicles are removed once progress exceeds lane length plus this margin
pub const VEHICLE_DESPAWN_MARGIN: f32 = 50.0;

/// Per-tick vehicle spawn probability at density 1.0
pub const VEHICLE_SPAWN_PROBABILITY: f64 = 0.02;

/// Intersections farther ahead than this are ignored when checking signals
pub const SIGNAL_LOOKAHEAD_DISTANCE: f32 = 15.0;

/// A red light forces a stop when the intersection is closer than this
pub const RED_STOP_DISTANCE: f32 = 10.0;

/// A red light only forces a stop when the leader gap exceeds this,
/// so queued vehicles brake for the queue rather than the light
pub const RED_STOP_MIN_GAP: f32 = 5.0;

/// A yellow light slows the vehicle when the intersection is closer than this
pub const YELLOW_SLOW_DISTANCE: f32 = 5.0;

/// Speed factor applied when approaching a yellow light
pub const YELLOW_SLOW_FACTOR: f32 = 0.5;

/// Leader gaps below these thresholds clamp the target speed
pub const FOLLOW_NEAR_GAP: f32 = 8.0;
pub const FOLLOW_FAR_GAP: f32 = 15.0;
pub const FOLLOW_NEAR_FACTOR: f32 = 0.3;
pub const FOLLOW_FAR_FACTOR: f32 = 0.7;

/// Acceleration and braking rates, units per second squared.
/// Braking is stronger than acceleration so queues compress safely.
pub const VEHICLE_ACCELERATION: f32 = 10.0;
pub const VEHICLE_BRAKING: f32 = 15.0;

/// Per-tick pedestrian spawn probability
pub const PEDESTRIAN_SPAWN_PROBABILITY: f64 = 0.01;

/// Per-tick probability that a walking pedestrian decides to cross
pub const CROSS_TRIGGER_PROBABILITY: f64 = 0.01;

/// Seconds a pedestrian waits at the curb before crossing
pub const CROSS_WAIT_DURATION: f32 = 2.0;

/// Crosswalks farther than this are out of reach for a crossing pedestrian
pub const CROSSWALK_SEARCH_RADIUS: f32 = 20.0;

/// Crossing targets are jittered by up to this much on both axes
pub const CROSSING_TARGET_JITTER: f32 = 4.0;

/// A crossing pedestrian has arrived once within this distance of its target
pub const CROSSING_ARRIVE_DISTANCE: f32 = 0.5;

/// Lateral spread of a pedestrian's spawn position across a sidewalk
pub const SIDEWALK_SPAWN_JITTER: f32 = 1.5;

/// Pedestrian spawn speed factor range applied to the base walk speed
pub const WALK_SPEED_FACTOR_MIN: f32 = 0.7;
pub const WALK_SPEED_FACTOR_SPREAD: f32 = 0.6;
