use crate::fixtures::{grid, horizontal, position};
use crate::graph::{EdgeId, GraphError, SpatialIndex};

use approx::assert_relative_eq;
use geo::{wkt, Distance, Haversine, Point};

#[test]
fn projected_distance_check() -> Result<(), GraphError> {
    const DISTANCE: f64 = 100.0; // 100m search radius
    let graph = grid(4, 4, 50.0)?;

    let points = wkt! {
        LINESTRING (0.0003 0.0001, 0.0011 0.0017, 0.0025 0.0024, 0.0029 0.0005)
    };

    for point in &points {
        let point = Point(*point);
        let nodes = graph.radius(&point, DISTANCE);

        assert!(
            !nodes.is_empty(),
            "Expected nodes to be non-empty at {DISTANCE}m. Could not find candidate for {point:?}"
        );

        for node in &nodes {
            assert!(Haversine.distance(node.position, point) <= DISTANCE);
        }
    }

    Ok(())
}

#[test]
fn results_are_sorted_and_deterministic() -> Result<(), GraphError> {
    let graph = grid(3, 3, 50.0)?;
    let origin = position(0.3, 0.1);

    let first = graph.radius(&origin, 200.0);
    let second = graph.radius(&origin, 200.0);
    assert_eq!(first, second);

    let distances = first
        .iter()
        .map(|point| Haversine.distance(point.position, origin))
        .collect::<Vec<_>>();
    assert!(distances.windows(2).all(|pair| pair[0] <= pair[1]));

    // The closest road is the southern row, reported for both headings.
    let ids = first.iter().take(2).map(|point| point.id()).collect::<Vec<_>>();
    let road = horizontal(3, 0, 0);
    assert_eq!(ids, vec![EdgeId::forward(road), EdgeId::backward(road)]);

    assert_relative_eq!(first[0].fraction, 0.3, epsilon = 1e-9);
    assert_relative_eq!(first[0].position.y(), 0.0, epsilon = 1e-9);
    Ok(())
}

#[test]
fn nothing_beyond_radius() -> Result<(), GraphError> {
    let graph = grid(2, 2, 50.0)?;
    let far = position(10.0, 10.0);

    assert!(graph.radius(&far, 200.0).is_empty());
    Ok(())
}
