//! Traffic signal controller
//!
//! One four-phase timer state machine per intersection. North/South always
//! share a color and East/West share the complementary color, so cross
//! traffic is never green at the same time.

use log::info;

use super::config::SimConfig;
use super::road_network::RoadNetwork;
use super::types::{Approach, IntersectionId, LightColor, Point2};

/// Positional signal lookups match an intersection within this per-axis tolerance
pub const SIGNAL_MATCH_TOLERANCE: f32 = 10.0;

/// The four timed phases of a signal cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrafficPhase {
    NsGreen,
    NsYellow,
    EwGreen,
    EwYellow,
}

impl TrafficPhase {
    /// Colors shown to the (north-south, east-west) axes during this phase
    fn axis_colors(&self) -> (LightColor, LightColor) {
        match self {
            TrafficPhase::NsGreen => (LightColor::Green, LightColor::Red),
            TrafficPhase::NsYellow => (LightColor::Yellow, LightColor::Red),
            TrafficPhase::EwGreen => (LightColor::Red, LightColor::Green),
            TrafficPhase::EwYellow => (LightColor::Red, LightColor::Yellow),
        }
    }

    fn next(&self) -> TrafficPhase {
        match self {
            TrafficPhase::NsGreen => TrafficPhase::NsYellow,
            TrafficPhase::NsYellow => TrafficPhase::EwGreen,
            TrafficPhase::EwGreen => TrafficPhase::EwYellow,
            TrafficPhase::EwYellow => TrafficPhase::NsGreen,
        }
    }
}

/// Per-intersection signal state
#[derive(Debug, Clone)]
pub struct SignalState {
    pub intersection: IntersectionId,
    pub position: Point2,
    pub phase: TrafficPhase,
    /// Seconds elapsed in the current phase
    pub timer: f32,
}

/// Owns the signal state machines for every intersection in a network
#[derive(Debug)]
pub struct TrafficSignalController {
    signals: Vec<SignalState>,
    green_duration: f32,
    yellow_duration: f32,
}

impl TrafficSignalController {
    /// Create one signal per intersection, all starting at `NsGreen`
    pub fn new(network: &RoadNetwork, config: &SimConfig) -> Self {
        let signals: Vec<SignalState> = network
            .intersections()
            .iter()
            .map(|intersection| SignalState {
                intersection: intersection.id,
                position: intersection.position,
                phase: TrafficPhase::NsGreen,
                timer: 0.0,
            })
            .collect();

        info!("created {} traffic signal sets", signals.len());

        Self {
            signals,
            green_duration: config.green_duration,
            yellow_duration: config.yellow_duration,
        }
    }

    /// Advance every signal by `dt` seconds
    ///
    /// When a phase threshold is reached the phase changes and the timer
    /// resets to zero; any excess beyond the threshold is discarded rather
    /// than carried into the next phase.
    pub fn advance(&mut self, dt: f32) {
        for signal in &mut self.signals {
            signal.timer += dt;
            let threshold = match signal.phase {
                TrafficPhase::NsGreen | TrafficPhase::EwGreen => self.green_duration,
                TrafficPhase::NsYellow | TrafficPhase::EwYellow => self.yellow_duration,
            };
            if signal.timer >= threshold {
                signal.phase = signal.phase.next();
                signal.timer = 0.0;
            }
        }
    }

    /// Color shown to an approach at an intersection
    ///
    /// An unknown intersection id yields the permissive default `Green`.
    /// That default is a known looseness of the contract, kept deliberately.
    pub fn color_for(&self, intersection: IntersectionId, approach: Approach) -> LightColor {
        match self.signals.iter().find(|s| s.intersection == intersection) {
            Some(signal) => Self::approach_color(signal.phase, approach),
            None => LightColor::Green,
        }
    }

    /// Color shown to an approach near a world position
    ///
    /// Matches the signal whose intersection lies within
    /// [`SIGNAL_MATCH_TOLERANCE`] on both axes; no match defaults to `Green`.
    pub fn color_near(&self, position: Point2, approach: Approach) -> LightColor {
        let signal = self.signals.iter().find(|s| {
            (s.position.x - position.x).abs() < SIGNAL_MATCH_TOLERANCE
                && (s.position.z - position.z).abs() < SIGNAL_MATCH_TOLERANCE
        });
        match signal {
            Some(signal) => Self::approach_color(signal.phase, approach),
            None => LightColor::Green,
        }
    }

    fn approach_color(phase: TrafficPhase, approach: Approach) -> LightColor {
        let (ns, ew) = phase.axis_colors();
        if approach.is_north_south() {
            ns
        } else {
            ew
        }
    }

    /// Current phase of an intersection's signal, if one exists
    pub fn phase_of(&self, intersection: IntersectionId) -> Option<TrafficPhase> {
        self.signals
            .iter()
            .find(|s| s.intersection == intersection)
            .map(|s| s.phase)
    }

    pub fn signals(&self) -> &[SignalState] {
        &self.signals
    }
}
