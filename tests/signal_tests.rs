//! Traffic signal state machine tests

use city_sim::simulation::{
    Approach, IntersectionId, LightColor, Point2, RoadNetwork, SimConfig, TrafficPhase,
    TrafficSignalController,
};

fn controller() -> (RoadNetwork, TrafficSignalController, SimConfig) {
    let config = SimConfig::default();
    let network = RoadNetwork::build(&config).unwrap();
    let signals = TrafficSignalController::new(&network, &config);
    (network, signals, config)
}

#[test]
fn starts_north_south_green() {
    let (network, signals, _) = controller();
    let id = network.intersections()[0].id;

    assert_eq!(signals.phase_of(id), Some(TrafficPhase::NsGreen));
    assert_eq!(signals.color_for(id, Approach::North), LightColor::Green);
    assert_eq!(signals.color_for(id, Approach::South), LightColor::Green);
    assert_eq!(signals.color_for(id, Approach::East), LightColor::Red);
    assert_eq!(signals.color_for(id, Approach::West), LightColor::Red);
}

#[test]
fn phase_cycle_is_deterministic() {
    let (network, mut signals, config) = controller();
    let id = network.intersections()[0].id;

    signals.advance(config.green_duration);
    assert_eq!(signals.phase_of(id), Some(TrafficPhase::NsYellow));
    assert_eq!(signals.signals()[0].timer, 0.0);

    signals.advance(config.yellow_duration);
    assert_eq!(signals.phase_of(id), Some(TrafficPhase::EwGreen));

    signals.advance(config.green_duration);
    assert_eq!(signals.phase_of(id), Some(TrafficPhase::EwYellow));

    signals.advance(config.yellow_duration);
    assert_eq!(signals.phase_of(id), Some(TrafficPhase::NsGreen));
}

#[test]
fn excess_time_past_threshold_is_discarded() {
    let (network, mut signals, config) = controller();
    let id = network.intersections()[0].id;

    // One oversized step still lands exactly at the start of the next phase
    signals.advance(config.green_duration + 5.0);
    assert_eq!(signals.phase_of(id), Some(TrafficPhase::NsYellow));
    assert_eq!(signals.signals()[0].timer, 0.0);
}

#[test]
fn axes_are_mutually_exclusive_across_a_full_cycle() {
    let (network, mut signals, config) = controller();
    let cycle = 2.0 * (config.green_duration + config.yellow_duration);
    let dt = 0.05;
    let steps = (cycle / dt) as usize + 10;

    for _ in 0..steps {
        signals.advance(dt);
        for intersection in network.intersections() {
            let north = signals.color_for(intersection.id, Approach::North);
            let south = signals.color_for(intersection.id, Approach::South);
            let east = signals.color_for(intersection.id, Approach::East);
            let west = signals.color_for(intersection.id, Approach::West);

            assert_eq!(north, south);
            assert_eq!(east, west);

            // At most one axis may be green or yellow
            let ns_active = north != LightColor::Red;
            let ew_active = east != LightColor::Red;
            assert!(
                !(ns_active && ew_active),
                "both axes active: ns={:?} ew={:?}",
                north,
                east
            );
        }
    }
}

#[test]
fn yellow_phases_show_yellow_on_active_axis_only() {
    let (network, mut signals, config) = controller();
    let id = network.intersections()[0].id;

    signals.advance(config.green_duration);
    assert_eq!(signals.phase_of(id), Some(TrafficPhase::NsYellow));
    assert_eq!(signals.color_for(id, Approach::North), LightColor::Yellow);
    assert_eq!(signals.color_for(id, Approach::East), LightColor::Red);
}

#[test]
fn unknown_intersection_defaults_to_permissive_green() {
    let (_, signals, _) = controller();
    assert_eq!(
        signals.color_for(IntersectionId(999_999), Approach::North),
        LightColor::Green
    );
}

#[test]
fn positional_lookup_matches_id_lookup_within_tolerance() {
    let (network, signals, _) = controller();
    let intersection = &network.intersections()[0];

    let near = Point2::new(intersection.position.x + 4.0, intersection.position.z - 4.0);
    assert_eq!(
        signals.color_near(near, Approach::East),
        signals.color_for(intersection.id, Approach::East)
    );

    // Far away from every intersection the lookup is permissive green
    let far = Point2::new(10_000.0, 10_000.0);
    assert_eq!(signals.color_near(far, Approach::East), LightColor::Green);
}
