//! Static road, lane, sidewalk, and crosswalk topology
//!
//! The network is built once from a validated configuration and is read-only
//! afterwards. Everything here is pure data plus geometry queries; no
//! time-dependent state lives in this module.

use anyhow::Result;
use log::info;
use ordered_float::OrderedFloat;
use rand::seq::IndexedRandom;
use rand::Rng;

use super::config::SimConfig;
use super::types::{
    Approach, IntersectionId, LaneId, Orientation, Point2, RoadId, SidewalkId,
};

/// A directed line segment vehicles travel along
#[derive(Debug, Clone)]
pub struct Lane {
    pub id: LaneId,
    pub road: RoadId,
    pub start: Point2,
    pub end: Point2,
    /// Unit vector from start toward end
    pub direction: Point2,
    pub length: f32,
}

impl Lane {
    /// World position at a given progress distance from the lane start
    pub fn position_at(&self, progress: f32) -> Point2 {
        Point2::new(
            self.start.x + self.direction.x * progress,
            self.start.z + self.direction.z * progress,
        )
    }

    /// The compass approach for traffic on this lane, from its dominant axis
    pub fn approach(&self) -> Approach {
        if self.direction.x.abs() > self.direction.z.abs() {
            if self.direction.x > 0.0 {
                Approach::East
            } else {
                Approach::West
            }
        } else if self.direction.z > 0.0 {
            Approach::South
        } else {
            Approach::North
        }
    }
}

/// A road strip holding two opposing lanes
#[derive(Debug, Clone)]
pub struct Road {
    pub id: RoadId,
    /// Corner the strip is laid out from (minimum x/z corner)
    pub origin: Point2,
    pub width: f32,
    pub depth: f32,
    pub orientation: Orientation,
    pub lanes: [LaneId; 2],
}

/// A grid vertex where two roads cross
#[derive(Debug, Clone)]
pub struct Intersection {
    pub id: IntersectionId,
    pub position: Point2,
}

/// A walkable strip running parallel to a road
#[derive(Debug, Clone)]
pub struct Sidewalk {
    pub id: SidewalkId,
    pub center: Point2,
    pub width: f32,
    pub depth: f32,
    pub orientation: Orientation,
}

impl Sidewalk {
    /// Extent of the sidewalk along its long axis
    pub fn long_extent(&self) -> f32 {
        match self.orientation {
            Orientation::Horizontal => self.width,
            Orientation::Vertical => self.depth,
        }
    }
}

/// A pedestrian crossing anchor on one edge of an intersection
#[derive(Debug, Clone)]
pub struct Crosswalk {
    pub position: Point2,
    pub edge: Approach,
}

/// The static city topology
#[derive(Debug, Default)]
pub struct RoadNetwork {
    city_size: f32,
    roads: Vec<Road>,
    lanes: Vec<Lane>,
    intersections: Vec<Intersection>,
    sidewalks: Vec<Sidewalk>,
    crosswalks: Vec<Crosswalk>,
}

impl RoadNetwork {
    /// Build the grid network for the given configuration
    ///
    /// Roads are laid out at `block_size + road_width` spacing across a square
    /// city spanning `[-city_size/2, +city_size/2]` on both axes, with an
    /// intersection at every grid vertex. Fails fast on a non-positive
    /// geometry rather than producing a degenerate network.
    pub fn build(config: &SimConfig) -> Result<RoadNetwork> {
        config.validate()?;

        let mut network = RoadNetwork {
            city_size: config.city_size,
            ..Default::default()
        };

        let half = config.city_size / 2.0;
        let spacing = config.block_size + config.road_width;

        // Grid line coordinates, identical on both axes
        let mut grid_lines = Vec::new();
        let mut coord = -half;
        while coord <= half {
            grid_lines.push(coord);
            coord += spacing;
        }

        for &z in &grid_lines {
            network.add_road(
                Point2::new(-half, z),
                config.city_size,
                config.road_width,
                Orientation::Horizontal,
                config,
            );
        }

        for &x in &grid_lines {
            network.add_road(
                Point2::new(x, -half),
                config.road_width,
                config.city_size,
                Orientation::Vertical,
                config,
            );
        }

        for &x in &grid_lines {
            for &z in &grid_lines {
                network.add_intersection(Point2::new(x, z), config.road_width);
            }
        }

        info!(
            "built road network: {} roads, {} lanes, {} intersections, {} sidewalks, {} crosswalks",
            network.roads.len(),
            network.lanes.len(),
            network.intersections.len(),
            network.sidewalks.len(),
            network.crosswalks.len()
        );

        Ok(network)
    }

    fn add_road(
        &mut self,
        origin: Point2,
        width: f32,
        depth: f32,
        orientation: Orientation,
        config: &SimConfig,
    ) {
        let road_id = RoadId(self.roads.len());
        let lane_offset = config.road_width / 4.0;

        // Two lanes per road, offset from the centerline, opposite directions
        let (forward, backward) = match orientation {
            Orientation::Horizontal => (
                (
                    Point2::new(origin.x, origin.z - lane_offset),
                    Point2::new(origin.x + width, origin.z - lane_offset),
                    Point2::new(1.0, 0.0),
                ),
                (
                    Point2::new(origin.x + width, origin.z + lane_offset),
                    Point2::new(origin.x, origin.z + lane_offset),
                    Point2::new(-1.0, 0.0),
                ),
            ),
            Orientation::Vertical => (
                (
                    Point2::new(origin.x - lane_offset, origin.z),
                    Point2::new(origin.x - lane_offset, origin.z + depth),
                    Point2::new(0.0, 1.0),
                ),
                (
                    Point2::new(origin.x + lane_offset, origin.z + depth),
                    Point2::new(origin.x + lane_offset, origin.z),
                    Point2::new(0.0, -1.0),
                ),
            ),
        };

        let mut lane_ids = [LaneId(0); 2];
        for (slot, (start, end, direction)) in [forward, backward].into_iter().enumerate() {
            let id = LaneId(self.lanes.len());
            lane_ids[slot] = id;
            self.lanes.push(Lane {
                id,
                road: road_id,
                start,
                end,
                direction,
                length: start.distance(&end),
            });
        }

        // Two sidewalks flanking the road, offset outward past the road edge
        let sidewalk_offset = config.road_width / 2.0 + config.sidewalk_width / 2.0;
        let road_center = match orientation {
            Orientation::Horizontal => Point2::new(origin.x + width / 2.0, origin.z),
            Orientation::Vertical => Point2::new(origin.x, origin.z + depth / 2.0),
        };
        for side in [-1.0, 1.0] {
            let id = SidewalkId(self.sidewalks.len());
            let (center, sw_width, sw_depth) = match orientation {
                Orientation::Horizontal => (
                    Point2::new(road_center.x, road_center.z + side * sidewalk_offset),
                    width,
                    config.sidewalk_width,
                ),
                Orientation::Vertical => (
                    Point2::new(road_center.x + side * sidewalk_offset, road_center.z),
                    config.sidewalk_width,
                    depth,
                ),
            };
            self.sidewalks.push(Sidewalk {
                id,
                center,
                width: sw_width,
                depth: sw_depth,
                orientation,
            });
        }

        self.roads.push(Road {
            id: road_id,
            origin,
            width,
            depth,
            orientation,
            lanes: lane_ids,
        });
    }

    fn add_intersection(&mut self, position: Point2, road_width: f32) {
        let id = IntersectionId(self.intersections.len());
        self.intersections.push(Intersection { id, position });

        // Four crosswalk anchors, one per intersection edge
        let half_width = road_width / 2.0;
        self.crosswalks.extend([
            Crosswalk {
                position: Point2::new(position.x, position.z + half_width),
                edge: Approach::North,
            },
            Crosswalk {
                position: Point2::new(position.x, position.z - half_width),
                edge: Approach::South,
            },
            Crosswalk {
                position: Point2::new(position.x + half_width, position.z),
                edge: Approach::East,
            },
            Crosswalk {
                position: Point2::new(position.x - half_width, position.z),
                edge: Approach::West,
            },
        ]);
    }

    /// Side length of the city this network was built for
    pub fn city_size(&self) -> f32 {
        self.city_size
    }

    pub fn roads(&self) -> &[Road] {
        &self.roads
    }

    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    /// Look up a lane by id
    ///
    /// Lane ids handed out by this network are valid for its lifetime.
    pub fn lane(&self, id: LaneId) -> &Lane {
        &self.lanes[id.0]
    }

    pub fn intersections(&self) -> &[Intersection] {
        &self.intersections
    }

    pub fn sidewalks(&self) -> &[Sidewalk] {
        &self.sidewalks
    }

    pub fn sidewalk(&self, id: SidewalkId) -> &Sidewalk {
        &self.sidewalks[id.0]
    }

    pub fn crosswalks(&self) -> &[Crosswalk] {
        &self.crosswalks
    }

    /// Pick a uniformly random lane, or `None` for an empty network
    pub fn random_lane<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Lane> {
        let road = self.roads.choose(rng)?;
        let lane_id = *road.lanes.as_slice().choose(rng)?;
        Some(self.lane(lane_id))
    }

    /// Pick a uniformly random sidewalk, or `None` for an empty network
    pub fn random_sidewalk<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Sidewalk> {
        self.sidewalks.choose(rng)
    }

    /// Nearest intersection in front of a traveler at `position` heading
    /// along `direction`, with its straight-line distance
    ///
    /// "In front" means the displacement has a positive dot product with the
    /// travel direction.
    pub fn nearest_intersection_ahead(
        &self,
        position: Point2,
        direction: Point2,
    ) -> Option<(IntersectionId, f32)> {
        self.intersections
            .iter()
            .filter_map(|intersection| {
                let dx = intersection.position.x - position.x;
                let dz = intersection.position.z - position.z;
                let dot = dx * direction.x + dz * direction.z;
                if dot > 0.0 {
                    Some((intersection.id, (dx * dx + dz * dz).sqrt()))
                } else {
                    None
                }
            })
            .min_by_key(|&(_, distance)| OrderedFloat(distance))
    }

    /// Nearest crosswalk within `max_distance` of a position
    pub fn nearest_crosswalk(&self, position: Point2, max_distance: f32) -> Option<&Crosswalk> {
        self.crosswalks
            .iter()
            .map(|crosswalk| (crosswalk, crosswalk.position.distance(&position)))
            .filter(|&(_, distance)| distance < max_distance)
            .min_by_key(|&(_, distance)| OrderedFloat(distance))
            .map(|(crosswalk, _)| crosswalk)
    }

    /// Globally nearest sidewalk to a position by Euclidean distance to its center
    pub fn nearest_sidewalk(&self, position: Point2) -> Option<&Sidewalk> {
        self.sidewalks
            .iter()
            .min_by_key(|sidewalk| OrderedFloat(sidewalk.center.distance(&position)))
    }
}
