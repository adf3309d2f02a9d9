//! Vehicle agent movement logic
//!
//! Each agent travels along one lane for its whole lifetime. Per tick it
//! picks a target speed from the signal ahead and the gap to its leader,
//! smooths its actual speed toward that target, then integrates position.

use super::road_network::RoadNetwork;
use super::traffic_light::TrafficSignalController;
use super::types::{
    LaneId, LightColor, Point2, VehicleId, VehicleKind, FOLLOW_FAR_FACTOR, FOLLOW_FAR_GAP,
    FOLLOW_NEAR_FACTOR, FOLLOW_NEAR_GAP, RED_STOP_DISTANCE, RED_STOP_MIN_GAP,
    SIGNAL_LOOKAHEAD_DISTANCE, VEHICLE_ACCELERATION, VEHICLE_BRAKING, VEHICLE_DESPAWN_MARGIN,
    YELLOW_SLOW_DISTANCE, YELLOW_SLOW_FACTOR,
};

/// A vehicle traveling along a lane
#[derive(Debug, Clone)]
pub struct VehicleAgent {
    pub id: VehicleId,
    pub lane: LaneId,
    pub kind: VehicleKind,
    /// Distance traveled from the lane start; never decreases during the
    /// agent's lifetime
    pub progress: f32,
    pub speed: f32,
    pub max_speed: f32,
    pub stopped_at_light: bool,
}

impl VehicleAgent {
    /// Current world position along the lane
    pub fn position(&self, network: &RoadNetwork) -> Point2 {
        network.lane(self.lane).position_at(self.progress)
    }

    /// Advance this agent by one tick
    ///
    /// `leader_gap` is the longitudinal distance to the nearest vehicle ahead
    /// on the same lane, `f32::INFINITY` when the lane ahead is clear.
    ///
    /// The order is fixed: target selection, speed smoothing, then position
    /// integration with the post-smoothing speed. Speed updates before the
    /// position integrates; that ordering is part of the contract and is
    /// pinned by tests.
    pub fn update(
        &mut self,
        dt: f32,
        leader_gap: f32,
        network: &RoadNetwork,
        signals: &TrafficSignalController,
    ) {
        let lane = network.lane(self.lane);
        let position = lane.position_at(self.progress);

        // Signal ahead, if any within look-ahead range
        let intersection_ahead = network
            .nearest_intersection_ahead(position, lane.direction)
            .filter(|&(_, distance)| distance < SIGNAL_LOOKAHEAD_DISTANCE);
        let light = match intersection_ahead {
            Some((id, _)) => signals.color_for(id, lane.approach()),
            None => LightColor::Green,
        };

        let mut target_speed = self.max_speed;

        // Signal compliance. A red only forces a stop when the leader gap is
        // open; a queued vehicle brakes for the queue instead. The stopped
        // flag is only cleared on the green/no-signal path.
        match light {
            LightColor::Red if leader_gap > RED_STOP_MIN_GAP => {
                if let Some((_, distance)) = intersection_ahead {
                    if distance > 0.0 && distance < RED_STOP_DISTANCE {
                        target_speed = 0.0;
                        self.stopped_at_light = true;
                    }
                }
            }
            LightColor::Yellow => {
                if let Some((_, distance)) = intersection_ahead {
                    if distance > 0.0 && distance < YELLOW_SLOW_DISTANCE {
                        target_speed = self.max_speed * YELLOW_SLOW_FACTOR;
                    }
                }
            }
            _ => {
                self.stopped_at_light = false;
            }
        }

        // Following-distance clamp
        if leader_gap < FOLLOW_NEAR_GAP {
            target_speed = target_speed.min(self.max_speed * FOLLOW_NEAR_FACTOR);
        } else if leader_gap < FOLLOW_FAR_GAP {
            target_speed = target_speed.min(self.max_speed * FOLLOW_FAR_FACTOR);
        }

        // Smooth toward the target; braking is stronger than acceleration
        if self.speed < target_speed {
            self.speed += VEHICLE_ACCELERATION * dt;
        } else if self.speed > target_speed {
            self.speed -= VEHICLE_BRAKING * dt;
        }
        self.speed = self.speed.clamp(0.0, self.max_speed);

        self.progress += self.speed * dt;
    }

    /// Whether this agent has run past the end of its lane and should be removed
    pub fn past_despawn_bound(&self, network: &RoadNetwork) -> bool {
        self.progress > network.lane(self.lane).length + VEHICLE_DESPAWN_MARGIN
    }
}
