use crate::fixtures::{grid, horizontal, sample, STEP};
use crate::graph::{
    Distance, EdgeId, Graph, GraphError, Heading, Node, NodeId, Road, RoadId, RoadPoint,
    TimePriority,
};
use crate::matcher::costing::{angular_difference, azimuth, emission, transition};
use crate::matcher::generator::persists;
use crate::matcher::*;
use crate::transition::Observation;

use approx::assert_relative_eq;
use geo::point;
use std::f64::consts::PI;

const WIDTH: u64 = 4;
const FAST: f64 = 250.0; // km/h

fn fixture() -> Result<Graph, GraphError> {
    grid(WIDTH, WIDTH, FAST)
}

fn on(candidates: &[(MatchCandidate, f64)], id: EdgeId) -> (MatchCandidate, f64) {
    *candidates
        .iter()
        .find(|(candidate, _)| candidate.point.id() == id)
        .expect("candidate on edge must exist")
}

#[test]
fn emission_peaks_at_zero_distance() {
    let sigma = 5.0;
    let peak = 1.0 / (2.0 * PI * sigma * sigma).sqrt();

    assert_relative_eq!(emission(0.0, sigma), peak);

    let mut previous = peak;
    for distance in [0.5, 1.0, 5.0, 10.0, 25.0] {
        let value = emission(distance, sigma);
        assert!(value > 0.0 && value < previous);
        previous = value;
    }
}

#[test]
fn azimuth_wraps_and_floors() {
    assert_relative_eq!(angular_difference(350.0, 10.0), 20.0);
    assert_relative_eq!(angular_difference(10.0, 350.0), 20.0);
    assert_relative_eq!(angular_difference(90.0, 270.0), 180.0);
    assert_relative_eq!(angular_difference(0.0, 360.0), 0.0);

    let aligned = azimuth(359.0, 359.0, 100.0);
    assert_relative_eq!(aligned, 1.0 / (200.0 * PI).sqrt());
    assert!(azimuth(359.0, 1.0, 100.0) < aligned);
    assert_relative_eq!(azimuth(0.0, 180.0, 1.0), 0.01);
}

#[test]
fn transition_is_flat_below_base() {
    let beta = 2.0;

    assert_relative_eq!(transition(0.0, 5.0, beta), 0.5);
    assert_relative_eq!(transition(5.0, 5.0, beta), 0.5);
    assert!(transition(6.0, 5.0, beta) < 0.5);
    assert!(transition(9.0, 5.0, beta) < transition(6.0, 5.0, beta));
}

#[test]
fn rate_and_bound() {
    assert_relative_eq!(Rate::Adaptive.beta(1_000), 2.0);
    assert_relative_eq!(Rate::Adaptive.beta(0), 0.002);
    assert_relative_eq!(Rate::Fixed(0.25).beta(1_000), 4.0);

    let config = MatcherConfig::default();
    assert_relative_eq!(config.bound(1_000), 1_000.0);
    assert_relative_eq!(config.bound(60_000), 6_000.0);
    assert_relative_eq!(config.bound(3_600_000), 15_000.0);
}

#[test]
fn config_from_lookup() {
    let defaults = MatcherConfig::from_lookup(|_| None);
    assert_eq!(defaults, Ok(MatcherConfig::default()));

    let config = MatcherConfig::from_lookup(|key| match key {
        "TRACKMATCH_SIGMA" => Some("10".to_string()),
        "TRACKMATCH_LAMBDA" => Some("0.5".to_string()),
        "TRACKMATCH_MAX_FAILURE" => Some("3".to_string()),
        _ => None,
    });

    let expected = MatcherConfig::default()
        .with_sigma(10.0)
        .with_rate(Rate::Fixed(0.5))
        .map(|config| config.with_max_failure(3));
    assert_eq!(config, expected);

    let adaptive = MatcherConfig::from_lookup(|key| {
        (key == "TRACKMATCH_LAMBDA").then(|| "0".to_string())
    });
    assert_eq!(adaptive.map(|c| c.lambda), Ok(Rate::Adaptive));

    let invalid = MatcherConfig::from_lookup(|key| {
        (key == "TRACKMATCH_MAX_RADIUS").then(|| "wide".to_string())
    });
    assert!(matches!(invalid, Err(ConfigError::InvalidValue { .. })));

    let negative = MatcherConfig::from_lookup(|key| {
        (key == "TRACKMATCH_SIGMA").then(|| "-1".to_string())
    });
    assert!(matches!(negative, Err(ConfigError::NonPositive { .. })));
}

#[test]
fn fixed_rate_must_be_positive() {
    assert_eq!(Rate::Fixed(0.5).validate(), Ok(Rate::Fixed(0.5)));
    assert_eq!(Rate::Adaptive.validate(), Ok(Rate::Adaptive));

    for lambda in [0.0, -0.5, f64::NAN, f64::INFINITY] {
        assert!(matches!(
            Rate::Fixed(lambda).validate(),
            Err(ConfigError::NonPositive { .. })
        ));
        assert!(MatcherConfig::default()
            .with_rate(Rate::Fixed(lambda))
            .is_err());
    }

    let negative = MatcherConfig::from_lookup(|key| {
        (key == "TRACKMATCH_LAMBDA").then(|| "-2".to_string())
    });
    assert!(matches!(negative, Err(ConfigError::NonPositive { .. })));
}

#[test]
fn undefined_azimuth_is_ignored() {
    let base = sample(0, 0.0, 0.0);

    assert_eq!(base.with_azimuth(f64::NAN).azimuth, None);
    assert_eq!(base.with_azimuth(-90.0).azimuth, Some(270.0));
}

#[test_log::test]
fn matches_along_a_single_edge() -> Result<(), GraphError> {
    let graph = fixture()?;
    let matcher = Matcher::new(&graph, MatcherConfig::default());

    let trace = [
        sample(0, 0.3, 0.0),
        sample(1_000, 0.4, 0.0),
        sample(2_000, 0.5, 0.0),
    ];

    let state = matcher
        .mmatch(&trace, 0.0, 0)
        .expect("trace must not be aborted");

    let edge = EdgeId::forward(horizontal(WIDTH, 0, 0));
    let matched = state.matched();
    assert_eq!(matched.len(), 3);

    for (point, sample) in matched.iter().zip(&trace) {
        assert_eq!(point.id(), edge);
        assert_relative_eq!(point.position.x(), sample.position.x(), epsilon = 1e-9);
        assert_relative_eq!(point.position.y(), 0.0, epsilon = 1e-9);
    }

    assert!(matched.windows(2).all(|w| w[0].fraction < w[1].fraction));
    assert_eq!(state.edges(), vec![edge]);

    // Each step routes a tenth of the edge, quicker than the base cost.
    let sequence = state.sequence();
    assert!(sequence[0].transition.is_none());

    for (previous, matched) in sequence.iter().zip(sequence.iter().skip(1)) {
        let route = matched.transition.as_ref().expect("route must exist");
        assert_relative_eq!(route.length(), 0.1 * route.source.edge.length, epsilon = 1e-6);

        let base = previous.sample.distance(&matched.sample) / 60.0;
        let beta = Rate::Adaptive.beta(matched.sample.elapsed(&previous.sample));
        assert!(route.cost(&TimePriority) <= base);
        assert_relative_eq!(transition(route.cost(&TimePriority), base, beta), 0.5);
    }

    Ok(())
}

#[test_log::test]
fn unmatched_sample_is_skipped() -> Result<(), GraphError> {
    let graph = fixture()?;
    let matcher = Matcher::new(&graph, MatcherConfig::default());

    let trace = [
        sample(0, 0.3, 0.0),
        sample(1_000, 50.0, 50.0),
        sample(2_000, 0.5, 0.0),
    ];

    let state = matcher
        .mmatch(&trace, 0.0, 0)
        .expect("trace must not be aborted");

    assert_eq!(state.accepted(), 3);
    assert_eq!(state.failures(), 0);
    assert_eq!(state.matched().len(), 2);
    assert_eq!(
        state.sample().map(|sample| sample.time),
        Some(trace[2].time)
    );

    Ok(())
}

#[test]
fn online_matching_reports_failures() -> Result<(), GraphError> {
    let graph = fixture()?;
    let matcher = Matcher::new(&graph, MatcherConfig::default());
    let mut state = MatcherState::new();

    assert_eq!(matcher.execute(&mut state, sample(0, 0.3, 0.0)), Ok(()));
    assert_eq!(
        matcher.execute(&mut state, sample(1_000, 50.0, 50.0)),
        Err(crate::transition::Unmatched::NoCandidate)
    );
    assert_eq!(state.failures(), 1);

    assert_eq!(matcher.execute(&mut state, sample(2_000, 0.4, 0.0)), Ok(()));
    assert_eq!(state.failures(), 0);
    assert!(state.estimate().is_some());

    Ok(())
}

#[test]
fn driver_thresholds() -> Result<(), GraphError> {
    let graph = fixture()?;
    let matcher = Matcher::new(&graph, MatcherConfig::default());

    // Roughly 11m and 1s apart, given in reverse order.
    let trace = [sample(1_000, 0.4, 0.0), sample(0, 0.3, 0.0)];

    let both = matcher.mmatch(&trace, 5.0, 500).expect("must not abort");
    assert_eq!(both.accepted(), 2);

    let matched = both.matched();
    assert_eq!(matched.len(), 2);
    assert!(matched[0].position.x() < matched[1].position.x());

    let near = matcher.mmatch(&trace, 20.0, 500).expect("must not abort");
    assert_eq!(near.accepted(), 1);
    assert_eq!(near.matched().len(), 1);
    assert_relative_eq!(
        near.matched()[0].position.x(),
        0.3 * STEP,
        epsilon = 1e-9
    );

    let soon = matcher.mmatch(&trace, 5.0, 2_000).expect("must not abort");
    assert_eq!(soon.accepted(), 1);

    let negative = matcher.mmatch(&trace, -1.0, -1).expect("must not abort");
    assert_eq!(negative.accepted(), 2);

    Ok(())
}

#[test]
fn aborts_after_consecutive_failures() -> Result<(), GraphError> {
    let graph = fixture()?;
    let trace = [
        sample(0, 0.3, 0.0),
        sample(1_000, 50.0, 50.0),
        sample(2_000, 60.0, 60.0),
        sample(3_000, 0.5, 0.0),
    ];

    let strict = Matcher::new(&graph, MatcherConfig::default().with_max_failure(1));
    match strict.mmatch(&trace, 0.0, 0) {
        Err(MatchError::Aborted { failures, state }) => {
            assert_eq!(failures, 2);
            assert_eq!(state.accepted(), 3);
            assert_eq!(state.matched().len(), 1);
        }
        Ok(_) => panic!("matching must abort"),
    }

    let tolerant = Matcher::new(&graph, MatcherConfig::default().with_max_failure(2));
    let state = tolerant.mmatch(&trace, 0.0, 0).expect("must not abort");
    assert_eq!(state.matched().len(), 2);

    Ok(())
}

#[test]
fn anchors_persist_when_moving_backwards() -> Result<(), GraphError> {
    let graph = fixture()?;
    let matcher = Matcher::new(&graph, MatcherConfig::default());

    let forward = EdgeId::forward(horizontal(WIDTH, 0, 0));
    let backward = EdgeId::backward(horizontal(WIDTH, 0, 0));

    let first = matcher.generate(&[], &sample(0, 0.3, 0.0));
    let predecessors = first.iter().map(|(c, _)| *c).collect::<Vec<_>>();

    // Roughly a meter behind, in the forward direction.
    let second = matcher.generate(&predecessors, &sample(1_000, 0.29, 0.0));

    let (anchor, _) = on(&first, forward);
    let (persisted, _) = on(&second, forward);
    assert_eq!(persisted.point, anchor.point);
    assert_ne!(persisted.id, anchor.id);

    // Ahead in the backward direction, so not anchored.
    let (anchor, _) = on(&first, backward);
    let (fresh, _) = on(&second, backward);
    assert_ne!(fresh.point.position, anchor.point.position);

    Ok(())
}

#[test]
fn anchors_require_proximity() {
    let edge = crate::graph::Edge {
        id: EdgeId::forward(RoadId(1)),
        source: NodeId(1),
        target: NodeId(2),
        length: 100.0,
        speed: 50.0,
        priority: 1.0,
        bearing: 90.0,
    };

    let anchor = RoadPoint::new(edge, 0.5, point! { x: 0.0005, y: 0.0 });
    let close = RoadPoint::new(edge, 0.49, point! { x: 0.00049, y: 0.0 });
    let distant = RoadPoint::new(edge, 0.3, point! { x: 0.0003, y: 0.0 });
    let ahead = RoadPoint::new(edge, 0.51, point! { x: 0.00051, y: 0.0 });

    assert!(persists(&anchor, &close, 5.0));
    assert!(!persists(&anchor, &distant, 5.0));
    assert!(!persists(&anchor, &ahead, 5.0));

    let reversed = crate::graph::Edge {
        id: EdgeId::backward(RoadId(1)),
        ..edge
    };
    let anchor = RoadPoint::new(reversed, 0.5, anchor.position);
    let behind = RoadPoint::new(reversed, 0.51, ahead.position);
    assert_eq!(behind.heading(), Heading::Backward);
    assert!(persists(&anchor, &behind, 5.0));
}

#[test]
fn azimuth_favours_aligned_edges() -> Result<(), GraphError> {
    let graph = fixture()?;
    let matcher = Matcher::new(&graph, MatcherConfig::default());

    let candidates = matcher.generate(&[], &sample(0, 0.3, 0.0).with_azimuth(90.0));

    let (_, eastbound) = on(&candidates, EdgeId::forward(horizontal(WIDTH, 0, 0)));
    let (_, westbound) = on(&candidates, EdgeId::backward(horizontal(WIDTH, 0, 0)));
    assert!(eastbound > westbound);

    let undirected = matcher.generate(&[], &sample(0, 0.3, 0.0));
    let (_, east) = on(&undirected, EdgeId::forward(horizontal(WIDTH, 0, 0)));
    let (_, west) = on(&undirected, EdgeId::backward(horizontal(WIDTH, 0, 0)));
    assert_relative_eq!(east, west);

    Ok(())
}

#[test]
fn unreachable_pairs_are_absent() -> Result<(), GraphError> {
    // Two parallel one-way roads, around 22m apart, which never connect.
    let nodes = [
        Node::new(point! { x: 0.0, y: 0.0 }, NodeId(1)),
        Node::new(point! { x: 0.001, y: 0.0 }, NodeId(2)),
        Node::new(point! { x: 0.0, y: 0.0002 }, NodeId(3)),
        Node::new(point! { x: 0.001, y: 0.0002 }, NodeId(4)),
    ];
    let roads = [
        Road::new(RoadId(1), NodeId(1), NodeId(2)).one_way(),
        Road::new(RoadId(2), NodeId(3), NodeId(4)).one_way(),
    ];
    let graph = Graph::new(nodes, roads)?;
    let matcher = Matcher::new(&graph, MatcherConfig::default());

    let first = sample(0, 0.3, 0.0);
    let second = sample(1_000, 0.4, 0.1);

    let predecessors = matcher
        .generate(&[], &first)
        .into_iter()
        .map(|(c, _)| c)
        .filter(|c| c.point.edge.road() == RoadId(1))
        .collect::<Vec<_>>();

    let candidates = matcher
        .generate(&predecessors, &second)
        .into_iter()
        .map(|(c, _)| c)
        .collect::<Vec<_>>();
    assert_eq!(candidates.len(), 2);

    let transitions = matcher.connect(
        Observation::new(&first, &predecessors),
        Observation::new(&second, &candidates),
    );

    for (index, candidate) in candidates.iter().enumerate() {
        let reachable = transitions.get(0, index).is_some();
        assert_eq!(reachable, candidate.point.edge.road() == RoadId(1));
    }

    assert_eq!(transitions.len(), 1);
    Ok(())
}

#[test]
fn custom_cost_functions() -> Result<(), GraphError> {
    let graph = fixture()?;
    let matcher = Matcher::new(&graph, MatcherConfig::default()).with_cost(Distance);

    let trace = [sample(0, 0.3, 0.0), sample(1_000, 0.4, 0.0)];
    let state = matcher.mmatch(&trace, 0.0, 0).expect("must not abort");

    assert_eq!(state.matched().len(), 2);
    Ok(())
}

#[test]
fn transitions_are_weighted_by_time_priority() -> Result<(), GraphError> {
    let graph = fixture()?;
    let matcher = Matcher::new(&graph, MatcherConfig::default()).with_cost(Distance);

    let first = sample(0, 0.3, 0.0);
    let second = sample(1_000, 0.4, 0.0);
    let edge = EdgeId::forward(horizontal(WIDTH, 0, 0));

    let predecessors = [on(&matcher.generate(&[], &first), edge).0];
    let candidates = matcher
        .generate(&predecessors, &second)
        .into_iter()
        .map(|(c, _)| c)
        .collect::<Vec<_>>();

    let transitions = matcher.connect(
        Observation::new(&first, &predecessors),
        Observation::new(&second, &candidates),
    );

    let departing = transitions.departing(0).expect("partition must exist");
    let index = candidates
        .iter()
        .position(|c| c.point.id() == edge)
        .expect("candidate on edge must exist");
    let (route, probability) = &departing[&index];

    // Routed by distance, but weighted by travel time, which is below the base.
    let base = first.distance(&second) / 60.0;
    let beta = Rate::Adaptive.beta(second.elapsed(&first));
    assert!(route.cost(&Distance) > base);
    assert!(route.cost(&TimePriority) < base);

    assert_relative_eq!(*probability, transition(route.cost(&TimePriority), base, beta));
    assert_relative_eq!(*probability, 1.0 / beta);

    Ok(())
}
