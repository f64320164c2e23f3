//! Property-based tests for graph construction and path search.
//!
//! These tests use proptest to generate random node sets and obstacle
//! layouts and verify invariants of rebuild and query.
//!
//! Run with: cargo test -p waypoint-graph -- proptest

#![allow(clippy::unwrap_used)]

use nalgebra::{Point3, Vector3};
use proptest::prelude::*;
use waypoint_graph::WaypointGraph;
use waypoint_spatial::{Aabb, Collider, ColliderWorld};
use waypoint_types::{ConnectionKind, WaypointConfig};

// =============================================================================
// Strategies
// =============================================================================

/// Random node position in a bounded box.
fn arb_position() -> impl Strategy<Value = [f64; 3]> {
    prop::array::uniform3(-20.0..20.0f64)
}

/// Random obstacle: a box with centre and half extents, optionally tagged.
fn arb_obstacle() -> impl Strategy<Value = Collider> {
    (arb_position(), prop::array::uniform3(0.1..3.0f64), any::<bool>()).prop_map(
        |(c, h, tagged)| {
            let collider = Collider::aabb(Aabb::from_center(
                Point3::new(c[0], c[1], c[2]),
                Vector3::new(h[0], h[1], h[2]),
            ));
            if tagged { collider.with_tag("Door") } else { collider }
        },
    )
}

fn arb_world() -> impl Strategy<Value = ColliderWorld> {
    prop::collection::vec(arb_obstacle(), 0..6).prop_map(|obstacles| {
        let mut world = ColliderWorld::new();
        for collider in obstacles {
            world.insert(collider).unwrap();
        }
        world
    })
}

fn arb_max_distance() -> impl Strategy<Value = f64> {
    1.0..15.0f64
}

fn build_graph(points: &[[f64; 3]], max_distance: f64, world: &ColliderWorld) -> WaypointGraph {
    let config = WaypointConfig::default()
        .with_max_connection_distance(max_distance)
        .with_vertical_offset(0.0)
        .with_moving_obstacle_tag("Door");
    let mut graph = WaypointGraph::new(config);
    for p in points {
        graph.add_node(Point3::new(p[0], p[1], p[2])).unwrap();
    }
    graph.rebuild(world).unwrap();
    graph
}

// =============================================================================
// Property Tests: Rebuild
// =============================================================================

proptest! {
    /// Rebuilding twice over unchanged geometry gives identical connections.
    #[test]
    fn rebuild_is_idempotent(
        points in prop::collection::vec(arb_position(), 0..25),
        max_distance in arb_max_distance(),
        world in arb_world(),
    ) {
        let mut graph = build_graph(&points, max_distance, &world);
        let first = graph.nodes().to_vec();
        graph.rebuild(&world).unwrap();
        prop_assert_eq!(first, graph.nodes().to_vec());
    }

    /// No node ever connects to itself.
    #[test]
    fn rebuild_has_no_self_loops(
        points in prop::collection::vec(arb_position(), 0..25),
        max_distance in arb_max_distance(),
        world in arb_world(),
    ) {
        let graph = build_graph(&points, max_distance, &world);
        for (i, node) in graph.nodes().iter().enumerate() {
            for c in &node.connections {
                prop_assert_eq!(c.start_index, i);
                prop_assert_ne!(c.end_index, i);
            }
        }
    }

    /// Every stored connection is shorter than the limit, costs exactly its
    /// length and is traversable.
    #[test]
    fn rebuild_costs_are_distances_within_limit(
        points in prop::collection::vec(arb_position(), 0..25),
        max_distance in arb_max_distance(),
        world in arb_world(),
    ) {
        let graph = build_graph(&points, max_distance, &world);
        let nodes = graph.nodes();
        for node in nodes {
            for c in &node.connections {
                let expected = nalgebra::distance(&node.position, &nodes[c.end_index].position);
                prop_assert!(c.cost < max_distance);
                prop_assert!((c.cost - expected).abs() < 1e-12);
                prop_assert_ne!(c.kind, ConnectionKind::Blocked);
            }
        }
    }

    /// Without obstacles, connectivity depends on distance alone and is symmetric.
    #[test]
    fn open_world_is_symmetric(
        points in prop::collection::vec(arb_position(), 0..25),
        max_distance in arb_max_distance(),
    ) {
        let graph = build_graph(&points, max_distance, &ColliderWorld::new());
        let nodes = graph.nodes();
        for (i, node) in nodes.iter().enumerate() {
            for (j, other) in nodes.iter().enumerate() {
                if i == j {
                    continue;
                }
                let within = node.distance_to(&other.position) < max_distance;
                prop_assert_eq!(node.connection_to(j).is_some(), within);
            }
        }
    }
}

// =============================================================================
// Property Tests: Path Search
// =============================================================================

proptest! {
    /// Paths are contiguous, never revisit a node and end at the goal's node.
    #[test]
    fn path_visits_each_node_once(
        points in prop::collection::vec(arb_position(), 1..25),
        max_distance in arb_max_distance(),
        world in arb_world(),
        start in arb_position(),
        end in arb_position(),
    ) {
        let graph = build_graph(&points, max_distance, &world);
        let start = Point3::new(start[0], start[1], start[2]);
        let end = Point3::new(end[0], end[1], end[2]);

        let path = graph.query_path(&world, &start, &end).unwrap();
        if path.is_empty() {
            return Ok(());
        }

        let goal = graph.resolve(&world, &end).unwrap().unwrap();
        prop_assert_eq!(path.last().unwrap().end_index, goal);

        let mut seen = vec![false; graph.len()];
        seen[path[0].start_index] = true;
        for c in &path {
            if c.start_index != c.end_index {
                prop_assert!(!seen[c.end_index], "node {} visited twice", c.end_index);
            }
            seen[c.end_index] = true;
        }
        for pair in path.windows(2) {
            prop_assert_eq!(pair[0].end_index, pair[1].start_index);
        }
    }

    /// A path is found whenever both endpoints resolve and the goal is
    /// reachable in the connection graph.
    #[test]
    fn path_found_when_reachable(
        points in prop::collection::vec(arb_position(), 1..20),
        max_distance in arb_max_distance(),
    ) {
        let world = ColliderWorld::new();
        let graph = build_graph(&points, max_distance, &world);
        let nodes = graph.nodes();

        // Reachability from node 0 over stored connections
        let mut reachable = vec![false; nodes.len()];
        let mut frontier = vec![0];
        reachable[0] = true;
        while let Some(i) = frontier.pop() {
            for c in &nodes[i].connections {
                if !reachable[c.end_index] {
                    reachable[c.end_index] = true;
                    frontier.push(c.end_index);
                }
            }
        }

        let start = nodes[0].position;
        for (goal, node) in nodes.iter().enumerate() {
            // Query from exactly the node positions; with no obstacles they
            // resolve to themselves unless an earlier node sits on top.
            if graph.resolve(&world, &node.position).unwrap() != Some(goal)
                || graph.resolve(&world, &start).unwrap() != Some(0)
            {
                continue;
            }
            let path = graph.query_path(&world, &start, &node.position).unwrap();
            prop_assert_eq!(!path.is_empty(), reachable[goal]);
        }
    }
}
