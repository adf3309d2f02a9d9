//! Pedestrian agent state
//!
//! A pedestrian is bound to a sidewalk while walking, pauses at the curb
//! before crossing, then walks straight to a jittered crosswalk target and
//! rebinds to the nearest sidewalk on the far side.

use super::types::{Orientation, PedestrianId, Point2, SidewalkId};

/// Behavioral state of a pedestrian
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PedestrianState {
    /// Moving along the bound sidewalk's long axis
    Walking,
    /// Paused at the curb, accumulating wait time before crossing
    Waiting,
    /// Moving straight toward the crossing target
    Crossing,
}

/// A pedestrian in the simulation
#[derive(Debug, Clone)]
pub struct PedestrianAgent {
    pub id: PedestrianId,
    /// The sidewalk the agent is bound to; rebinds after a crossing
    pub sidewalk: SidewalkId,
    pub position: Point2,
    /// Travel sense along the sidewalk's long axis, +1 or -1
    pub direction: f32,
    pub speed: f32,
    /// Facing angle, radians about the vertical axis
    pub rotation: f32,
    pub state: PedestrianState,
    pub wait_timer: f32,
    pub crossing_target: Option<Point2>,
    /// Walk-cycle phase used by consumers for animation
    pub anim_phase: f32,
}

impl PedestrianAgent {
    /// Facing angle while walking a sidewalk of the given orientation
    pub fn walking_rotation(orientation: Orientation, direction: f32) -> f32 {
        match orientation {
            Orientation::Horizontal => {
                if direction > 0.0 {
                    std::f32::consts::FRAC_PI_2
                } else {
                    -std::f32::consts::FRAC_PI_2
                }
            }
            Orientation::Vertical => {
                if direction > 0.0 {
                    std::f32::consts::PI
                } else {
                    0.0
                }
            }
        }
    }
}
