use crate::graph::{Edge, EdgeId, GraphError, Node, NodeId, Road, RoadId, Segment};

use geo::{Bearing, Distance, Haversine, Line, Point};
use log::{debug, info};
use petgraph::prelude::DiGraphMap;
use petgraph::Direction;
use rstar::RTree;
use rustc_hash::{FxHashMap, FxHasher};

use std::fmt::{Debug, Formatter};
use std::hash::BuildHasherDefault;
use std::time::Instant;

pub type GraphStructure = DiGraphMap<NodeId, EdgeId, BuildHasherDefault<FxHasher>>;

/// In-memory road network.
///
/// Holds the node positions, the directed [`Edge`]s derived from each [`Road`],
/// the adjacency between them, and an [`RTree`] of road geometry which backs
/// the [`SpatialIndex`](crate::graph::SpatialIndex) implementation.
///
/// The graph is immutable once built, and may be shared between any number of
/// concurrent matching runs.
pub struct Graph {
    pub(crate) graph: GraphStructure,
    pub(crate) hash: FxHashMap<NodeId, Node>,
    pub(crate) edges: FxHashMap<EdgeId, Edge>,

    pub(crate) index: RTree<Segment>,
}

impl Debug for Graph {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Graph with Nodes: {}, Edges: {}",
            self.hash.len(),
            self.edges.len()
        )
    }
}

impl Graph {
    /// Creates a graph from its nodes and roads.
    ///
    /// Every road yields a [forward](crate::graph::Heading::Forward) edge and,
    /// unless it is one-way, a [backward](crate::graph::Heading::Backward) edge.
    pub fn new(
        nodes: impl IntoIterator<Item = Node>,
        roads: impl IntoIterator<Item = Road>,
    ) -> Result<Graph, GraphError> {
        let start_time = Instant::now();

        let hash = nodes
            .into_iter()
            .map(|node| (node.id, node))
            .collect::<FxHashMap<_, _>>();

        let mut graph = GraphStructure::default();
        let mut edges = FxHashMap::default();
        let mut segments = Vec::new();

        for road in roads {
            let position = |node: NodeId| {
                hash.get(&node)
                    .map(|node| node.position)
                    .ok_or(GraphError::MissingNode {
                        road: road.id,
                        node,
                    })
            };

            let source = position(road.source)?;
            let target = position(road.target)?;

            if road.source == road.target {
                return Err(GraphError::Degenerate(road.id));
            }

            if edges.contains_key(&EdgeId::forward(road.id)) {
                return Err(GraphError::DuplicateRoad(road.id));
            }

            let length = Haversine.distance(source, target);
            let forward = Edge {
                id: EdgeId::forward(road.id),
                source: road.source,
                target: road.target,
                length,
                speed: road.speed,
                priority: road.priority,
                bearing: Haversine.bearing(source, target).rem_euclid(360.0),
            };

            Self::insert(&mut graph, &mut edges, forward)?;

            if !road.oneway {
                let backward = Edge {
                    id: EdgeId::backward(road.id),
                    source: road.target,
                    target: road.source,
                    bearing: Haversine.bearing(target, source).rem_euclid(360.0),
                    ..forward
                };

                Self::insert(&mut graph, &mut edges, backward)?;
            }

            segments.push(Segment {
                road: road.id,
                line: Line::new(source, target),
            });
        }

        debug!("Edge ingestion took: {:?}", start_time.elapsed());
        let index = RTree::bulk_load(segments);

        info!(
            "Finished. Ingested {} nodes and {} edges in {}ms",
            hash.len(),
            edges.len(),
            start_time.elapsed().as_millis()
        );

        Ok(Graph {
            graph,
            hash,
            edges,
            index,
        })
    }

    fn insert(
        graph: &mut GraphStructure,
        edges: &mut FxHashMap<EdgeId, Edge>,
        edge: Edge,
    ) -> Result<(), GraphError> {
        if graph.contains_edge(edge.source, edge.target) {
            return Err(GraphError::ParallelEdge {
                road: edge.road(),
                from: edge.source,
                target: edge.target,
            });
        }

        graph.add_edge(edge.source, edge.target, edge.id);
        edges.insert(edge.id, edge);
        Ok(())
    }

    pub fn index(&self) -> &RTree<Segment> {
        &self.index
    }

    /// The number of nodes within the graph.
    pub fn size(&self) -> usize {
        self.hash.len()
    }

    #[inline]
    pub fn get_position(&self, node: &NodeId) -> Option<Point> {
        self.hash.get(node).map(|node| node.position)
    }

    #[inline]
    pub fn edge(&self, id: &EdgeId) -> Option<&Edge> {
        self.edges.get(id)
    }

    /// Both directed edges of a road, should they exist.
    pub fn road_edges(&self, road: RoadId) -> impl Iterator<Item = &Edge> {
        [EdgeId::forward(road), EdgeId::backward(road)]
            .into_iter()
            .filter_map(|id| self.edges.get(&id))
    }

    /// All edges departing from the node the given edge arrives at,
    /// including the edge turning back along the same road, if it exists.
    #[inline]
    pub fn successors<'a>(&'a self, edge: &Edge) -> impl Iterator<Item = &'a Edge> + 'a {
        self.graph
            .edges_directed(edge.target, Direction::Outgoing)
            .filter_map(|(_, _, id)| self.edges.get(id))
    }
}
