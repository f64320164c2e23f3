//! End-to-end scenarios for building and querying waypoint graphs.
//!
//! Set `RUST_LOG=waypoint_graph=debug` to see rebuild and query events:
//! ```bash
//! RUST_LOG=waypoint_graph=debug cargo test -p waypoint-graph --test scenarios -- --nocapture
//! ```

#![allow(clippy::unwrap_used, clippy::float_cmp)]

use approx::assert_relative_eq;
use nalgebra::{Point3, Vector3};
use tracing_subscriber::EnvFilter;
use waypoint_graph::{EditSession, WaypointGraph};
use waypoint_spatial::{Aabb, Collider, ColliderWorld, Sphere};
use waypoint_types::{Connection, ConnectionKind, GraphLayout, WaypointConfig, WaypointError};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn flat_config(max_distance: f64) -> WaypointConfig {
    WaypointConfig::default()
        .with_max_connection_distance(max_distance)
        .with_vertical_offset(0.0)
        .with_moving_obstacle_tag("MovingObstacle")
}

fn graph_at(config: WaypointConfig, points: &[[f64; 3]]) -> WaypointGraph {
    let mut graph = WaypointGraph::new(config);
    for p in points {
        graph.add_node(Point3::new(p[0], p[1], p[2])).unwrap();
    }
    graph
}

/// Thin wall spanning y and z, centred on `x`.
fn wall(x: f64) -> Collider {
    Collider::aabb(Aabb::from_center(
        Point3::new(x, 0.0, 0.0),
        Vector3::new(0.1, 3.0, 3.0),
    ))
}

// =============================================================================
// Connectivity
// =============================================================================

#[test]
fn straight_line_connects_neighbours_only() {
    init_tracing();
    let world = ColliderWorld::new();
    let mut graph = graph_at(
        flat_config(6.0),
        &[[0.0, 0.0, 0.0], [5.0, 0.0, 0.0], [10.0, 0.0, 0.0]],
    );
    graph.rebuild(&world).unwrap();

    let a = graph.node(0).unwrap();
    let b = graph.node(1).unwrap();
    let c = graph.node(2).unwrap();

    for (node, target) in [(a, 1), (b, 0), (b, 2), (c, 1)] {
        let connection = node.connection_to(target).unwrap();
        assert_eq!(connection.kind, ConnectionKind::Open);
        assert_relative_eq!(connection.cost, 5.0);
    }
    assert!(a.connection_to(2).is_none());
    assert!(c.connection_to(0).is_none());

    let path = graph
        .query_path(&world, &Point3::new(0.0, 0.0, 0.0), &Point3::new(10.0, 0.0, 0.0))
        .unwrap();
    assert_eq!(
        path,
        vec![
            Connection::new(0, 1, 5.0, ConnectionKind::Open),
            Connection::new(1, 2, 5.0, ConnectionKind::Open),
        ]
    );
}

#[test]
fn static_obstruction_removes_connection() {
    init_tracing();
    let mut world = ColliderWorld::new();
    world.insert(wall(1.5)).unwrap();

    let mut graph = graph_at(flat_config(5.0), &[[0.0, 0.0, 0.0], [3.0, 0.0, 0.0]]);
    let stats = graph.rebuild(&world).unwrap();

    assert_eq!(stats.blocked, 2);
    assert!(graph.node(0).unwrap().connections.is_empty());
    assert!(graph.node(1).unwrap().connections.is_empty());

    // Each side resolves to its own node, which cannot reach the other
    let path = graph
        .query_path(&world, &Point3::new(-1.0, 0.0, 0.0), &Point3::new(4.0, 0.0, 0.0))
        .unwrap();
    assert!(path.is_empty());
}

#[test]
fn moving_obstacle_yields_conditional_connection() {
    init_tracing();
    let mut world = ColliderWorld::new();
    world.insert(wall(1.5).with_tag("MovingObstacle")).unwrap();

    let mut graph = graph_at(flat_config(5.0), &[[0.0, 0.0, 0.0], [3.0, 0.0, 0.0]]);
    graph.rebuild(&world).unwrap();

    let connection = graph.node(0).unwrap().connection_to(1).unwrap();
    assert_eq!(connection.kind, ConnectionKind::Conditional);
    assert!(connection.is_conditional());
    assert_relative_eq!(connection.cost, 3.0);
}

#[test]
fn overlapped_node_keeps_incoming_connections() {
    init_tracing();
    let mut world = ColliderWorld::new();
    // Low ledge under node 1, clear of the straight line between nodes
    world
        .insert(Collider::sphere(Sphere::new(Point3::new(3.0, 0.0, -0.4), 0.2)))
        .unwrap();

    let mut graph = graph_at(flat_config(5.0), &[[0.0, 0.0, 0.0], [3.0, 0.0, 0.0]]);
    let stats = graph.rebuild(&world).unwrap();

    assert_eq!(stats.overlapped, 1);
    assert!(graph.node(1).unwrap().connections.is_empty());
    assert!(graph.node(0).unwrap().connection_to(1).is_some());
}

// =============================================================================
// Staleness
// =============================================================================

#[test]
fn removal_requires_rebuild_before_query() {
    init_tracing();
    let world = ColliderWorld::new();
    let mut graph = graph_at(
        flat_config(6.0),
        &[[0.0, 0.0, 0.0], [5.0, 0.0, 0.0], [10.0, 0.0, 0.0]],
    );
    graph.rebuild(&world).unwrap();

    graph.remove_node(1).unwrap();
    // Node 0 still holds a connection to index 1, which is now the old node 2
    assert_eq!(graph.node(0).unwrap().connections[0].end_index, 1);

    let result = graph.query_path(&world, &Point3::origin(), &Point3::new(10.0, 0.0, 0.0));
    assert!(matches!(result, Err(WaypointError::GraphDirty)));

    graph.rebuild(&world).unwrap();
    assert!(graph.node(0).unwrap().connections.is_empty());
    assert!(
        graph
            .query_path(&world, &Point3::origin(), &Point3::new(10.0, 0.0, 0.0))
            .unwrap()
            .is_empty()
    );
}

#[test]
fn auto_rebuild_keeps_graph_queryable() {
    init_tracing();
    let world = ColliderWorld::new();
    let mut graph = WaypointGraph::new(flat_config(6.0).with_auto_rebuild(true));

    let mut session = EditSession::new(&mut graph, &world);
    for x in [0.0, 5.0, 10.0] {
        session.add_node(Point3::new(x, 0.0, 0.0)).unwrap();
    }
    session.remove_nodes_within_brush(&Point3::new(10.0, 0.0, 0.0)).unwrap();

    assert!(!graph.is_dirty());
    assert_eq!(graph.len(), 2);
    assert!(graph.node(0).unwrap().connection_to(1).is_some());
}

// =============================================================================
// Endpoint resolution
// =============================================================================

#[test]
fn resolver_skips_occluded_nearest_node() {
    init_tracing();
    let mut world = ColliderWorld::new();
    world.insert(wall(0.5)).unwrap();

    let mut graph = graph_at(flat_config(3.0), &[[1.0, 0.0, 0.0], [-5.0, 0.0, 0.0]]);
    graph.rebuild(&world).unwrap();

    assert_eq!(graph.resolve(&world, &Point3::origin()).unwrap(), Some(1));
}

#[test]
fn fully_occluded_endpoint_yields_empty_path() {
    init_tracing();
    let mut world = ColliderWorld::new();
    // Sealed box around the query start
    world
        .insert(Collider::aabb(Aabb::from_center(
            Point3::new(20.0, 0.0, 0.0),
            Vector3::repeat(1.0),
        )))
        .unwrap();

    let mut graph = graph_at(flat_config(6.0), &[[0.0, 0.0, 0.0], [5.0, 0.0, 0.0]]);
    graph.rebuild(&world).unwrap();

    let path = graph
        .query_path(&world, &Point3::new(20.0, 0.0, 0.0), &Point3::origin())
        .unwrap();
    assert!(path.is_empty());
}

// =============================================================================
// Empty inputs
// =============================================================================

#[test]
fn empty_graph_is_not_an_error() {
    init_tracing();
    let world = ColliderWorld::new();
    let mut graph = WaypointGraph::new(flat_config(3.0));

    let stats = graph.rebuild(&world).unwrap();
    assert_eq!(stats.nodes, 0);
    assert!(graph.query_path(&world, &Point3::origin(), &Point3::origin()).unwrap().is_empty());
    assert_eq!(graph.remove_nodes_within_brush(&Point3::origin()).unwrap(), 0);
    assert!(graph.remove_node(0).is_err());
}

#[test]
fn unbound_graph_reports_no_graph() {
    let world = ColliderWorld::new();
    let graph = WaypointGraph::unbound(flat_config(3.0));
    let err = graph
        .query_path(&world, &Point3::origin(), &Point3::origin())
        .unwrap_err();
    assert!(err.is_no_graph_bound());
}

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn layout_survives_json() {
    let world = ColliderWorld::new();
    let mut graph = graph_at(
        flat_config(6.0),
        &[[0.0, 0.0, 0.0], [5.0, 0.0, 0.0], [10.0, 0.0, 0.0]],
    );
    graph.rebuild(&world).unwrap();

    let json = serde_json::to_string(&graph.to_layout().unwrap()).unwrap();
    let layout: GraphLayout = serde_json::from_str(&json).unwrap();
    let restored = WaypointGraph::from_layout(flat_config(6.0), layout).unwrap();

    assert!(!restored.is_dirty());
    assert_eq!(restored.nodes(), graph.nodes());
}

#[test]
fn layout_with_dangling_index_is_rejected() {
    let json = r#"{"nodes":[{"position":[0.0,0.0,0.0],"connections":[{"end_index":4,"cost":1.0,"kind":"Open"}]}]}"#;
    let layout: GraphLayout = serde_json::from_str(json).unwrap();

    let err = WaypointGraph::from_layout(flat_config(6.0), layout).unwrap_err();
    assert!(matches!(err, WaypointError::InvalidLayout(_)));
}
