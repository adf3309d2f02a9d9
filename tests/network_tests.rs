//! Road network construction and geometry query tests

use city_sim::simulation::{Approach, Orientation, Point2, RoadNetwork, SimConfig};

fn test_config() -> SimConfig {
    SimConfig {
        city_size: 300.0,
        block_size: 40.0,
        road_width: 12.0,
        ..SimConfig::default()
    }
}

#[test]
fn build_rejects_degenerate_configs() {
    for (city_size, block_size, road_width) in [
        (0.0, 40.0, 12.0),
        (-10.0, 40.0, 12.0),
        (300.0, 0.0, 12.0),
        (300.0, -1.0, 12.0),
        (300.0, 40.0, 0.0),
    ] {
        let config = SimConfig {
            city_size,
            block_size,
            road_width,
            ..SimConfig::default()
        };
        assert!(
            RoadNetwork::build(&config).is_err(),
            "config ({}, {}, {}) should be rejected",
            city_size,
            block_size,
            road_width
        );
    }
}

#[test]
fn grid_counts_match_spacing() {
    // Spacing 52 over [-150, 150] gives 6 grid lines per axis
    let network = RoadNetwork::build(&test_config()).unwrap();

    assert_eq!(network.roads().len(), 12);
    assert_eq!(network.lanes().len(), 24);
    assert_eq!(network.intersections().len(), 36);
    assert_eq!(network.sidewalks().len(), 24);
    // Four crosswalk anchors per intersection
    assert_eq!(network.crosswalks().len(), 36 * 4);
}

#[test]
fn roads_carry_two_opposing_lanes() {
    let network = RoadNetwork::build(&test_config()).unwrap();

    for road in network.roads() {
        let a = network.lane(road.lanes[0]);
        let b = network.lane(road.lanes[1]);

        // Opposite unit directions
        assert!((a.direction.x + b.direction.x).abs() < 1e-6);
        assert!((a.direction.z + b.direction.z).abs() < 1e-6);
        let len = (a.direction.x.powi(2) + a.direction.z.powi(2)).sqrt();
        assert!((len - 1.0).abs() < 1e-6);

        // Lane length spans the whole road
        assert!((a.length - 300.0).abs() < 1e-3);
        assert!((b.length - 300.0).abs() < 1e-3);
    }
}

#[test]
fn lanes_offset_quarter_road_width_from_centerline() {
    let network = RoadNetwork::build(&test_config()).unwrap();

    for road in network.roads() {
        for lane_id in road.lanes {
            let lane = network.lane(lane_id);
            let offset = match road.orientation {
                Orientation::Horizontal => (lane.start.z - road.origin.z).abs(),
                Orientation::Vertical => (lane.start.x - road.origin.x).abs(),
            };
            assert!((offset - 3.0).abs() < 1e-3, "offset was {}", offset);
        }
    }
}

#[test]
fn sidewalks_offset_outward_past_road_edge() {
    let config = test_config();
    let network = RoadNetwork::build(&config).unwrap();
    let expected = config.road_width / 2.0 + config.sidewalk_width / 2.0;

    for sidewalk in network.sidewalks() {
        // Each sidewalk center must sit exactly one offset away from some
        // road centerline of the same orientation
        let matched = network
            .roads()
            .iter()
            .filter(|road| road.orientation == sidewalk.orientation)
            .any(|road| {
                let lateral = match road.orientation {
                    Orientation::Horizontal => (sidewalk.center.z - road.origin.z).abs(),
                    Orientation::Vertical => (sidewalk.center.x - road.origin.x).abs(),
                };
                (lateral - expected).abs() < 1e-3
            });
        assert!(matched, "sidewalk at {:?} has no parent road", sidewalk.center);
    }
}

#[test]
fn crosswalk_anchors_surround_each_intersection() {
    let config = test_config();
    let network = RoadNetwork::build(&config).unwrap();
    let half_width = config.road_width / 2.0;

    let intersection = &network.intersections()[0];
    let nearby: Vec<_> = network
        .crosswalks()
        .iter()
        .filter(|c| c.position.distance(&intersection.position) <= half_width + 1e-3)
        .collect();

    assert_eq!(nearby.len(), 4);
    for edge in [Approach::North, Approach::South, Approach::East, Approach::West] {
        assert!(
            nearby.iter().any(|c| c.edge == edge),
            "missing {:?} crosswalk",
            edge
        );
    }
}

#[test]
fn random_lane_on_empty_network_is_none() {
    let network = RoadNetwork::default();
    let mut rng = rand::rng();
    assert!(network.random_lane(&mut rng).is_none());
    assert!(network.random_sidewalk(&mut rng).is_none());
}

#[test]
fn random_lane_returns_valid_lane() {
    let network = RoadNetwork::build(&test_config()).unwrap();
    let mut rng = rand::rng();
    for _ in 0..20 {
        let lane = network.random_lane(&mut rng).unwrap();
        assert!(lane.id.0 < network.lanes().len());
    }
}

#[test]
fn nearest_intersection_ahead_respects_heading() {
    let network = RoadNetwork::build(&test_config()).unwrap();

    // Heading south (+z) from (6, 0): the nearest grid vertex ahead is (6, 6)
    let ahead = network
        .nearest_intersection_ahead(Point2::new(6.0, 0.0), Point2::new(0.0, 1.0))
        .unwrap();
    let position = network.intersections()[ahead.0 .0].position;
    assert!((position.x - 6.0).abs() < 1e-3);
    assert!((position.z - 6.0).abs() < 1e-3);
    assert!((ahead.1 - 6.0).abs() < 1e-3);

    // Nothing ahead when facing away from the whole grid
    let outside = network
        .nearest_intersection_ahead(Point2::new(200.0, 0.0), Point2::new(1.0, 0.0));
    assert!(outside.is_none());
}

#[test]
fn nearest_crosswalk_honors_search_radius() {
    let network = RoadNetwork::build(&test_config()).unwrap();

    // (6, 6) is an intersection; its south anchor sits at (6, 0)
    let found = network
        .nearest_crosswalk(Point2::new(6.0, 1.0), 20.0)
        .unwrap();
    assert!(found.position.distance(&Point2::new(6.0, 1.0)) < 20.0);

    // A tiny radius finds nothing mid-block
    assert!(network
        .nearest_crosswalk(Point2::new(32.0, 32.0), 1.0)
        .is_none());
}

#[test]
fn nearest_sidewalk_is_global_minimum() {
    let network = RoadNetwork::build(&test_config()).unwrap();
    let probe = Point2::new(25.0, 13.5);

    let nearest = network.nearest_sidewalk(probe).unwrap();
    let best = network
        .sidewalks()
        .iter()
        .map(|s| s.center.distance(&probe))
        .fold(f32::INFINITY, f32::min);
    assert!((nearest.center.distance(&probe) - best).abs() < 1e-6);
}

#[test]
fn lane_ids_are_stable_lookups() {
    let network = RoadNetwork::build(&test_config()).unwrap();
    for lane in network.lanes() {
        assert_eq!(network.lane(lane.id).id, lane.id);
    }
}
