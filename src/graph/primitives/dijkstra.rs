use crate::graph::{Cost, Edge, EdgeId, Graph, RoadPoint};

use log::trace;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// An edge entered during the search, and the label it was entered from.
#[derive(Debug, Clone, Copy)]
struct Label {
    edge: Edge,
    parent: Option<usize>,
}

#[derive(Debug, Clone, Copy)]
enum Step {
    /// Leaving the edge of the label, at its target node.
    Exit(usize),
    /// Arriving at the target (by index), on the edge of the label.
    Target(usize, usize),
}

#[derive(Debug)]
struct SmallestHolder {
    cost: f64,
    bound: f64,
    order: usize,
    step: Step,
}

impl PartialEq for SmallestHolder {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SmallestHolder {}

impl PartialOrd for SmallestHolder {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SmallestHolder {
    // Reversed, such that the max-heap pops the cheapest entry first.
    // Equal costs resolve in insertion order.
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.order.cmp(&self.order))
    }
}

/// An edge-based, bounded, one-to-many Dijkstra search.
///
/// Searches outward from a single [`RoadPoint`], minimising the `cost`
/// function, until every target is reached or the frontier is exhausted.
/// Any partial path whose `bound_cost` exceeds `bound` is abandoned.
pub struct Dijkstra<'a, C, B> {
    graph: &'a Graph,
    cost: &'a C,
    bound_cost: &'a B,
    bound: f64,

    labels: Vec<Label>,
    heap: BinaryHeap<SmallestHolder>,
    order: usize,
}

impl<'a, C, B> Dijkstra<'a, C, B>
where
    C: Cost,
    B: Cost,
{
    pub fn new(graph: &'a Graph, cost: &'a C, bound_cost: &'a B, bound: f64) -> Self {
        Self {
            graph,
            cost,
            bound_cost,
            bound,
            labels: Vec::with_capacity(64),
            heap: BinaryHeap::with_capacity(256),
            order: 0,
        }
    }

    fn push(&mut self, cost: f64, bound: f64, step: Step) {
        if bound > self.bound {
            return;
        }

        self.order += 1;
        self.heap.push(SmallestHolder {
            cost,
            bound,
            order: self.order,
            step,
        });
    }

    fn label(&mut self, edge: Edge, parent: Option<usize>) -> usize {
        self.labels.push(Label { edge, parent });
        self.labels.len() - 1
    }

    /// Walks the label chain back to the origin, returning edges in order of travel.
    fn path(&self, label: usize) -> Vec<Edge> {
        let mut edges = Vec::new();
        let mut cursor = Some(label);

        while let Some(index) = cursor {
            let label = &self.labels[index];
            edges.push(label.edge);
            cursor = label.parent;
        }

        edges.reverse();
        edges
    }

    /// Runs the search from the `origin` to every point within `targets`.
    ///
    /// Returns the edge sequence of each reached target, keyed by its index
    /// within `targets`. Targets which are unreachable within the bound are absent.
    pub fn run(mut self, origin: &RoadPoint, targets: &[RoadPoint]) -> FxHashMap<usize, Vec<Edge>> {
        let mut by_edge: FxHashMap<EdgeId, SmallVec<[usize; 4]>> = FxHashMap::default();
        for (index, target) in targets.iter().enumerate() {
            by_edge.entry(target.id()).or_default().push(index);
        }

        let graph = self.graph;
        let mut reached = FxHashMap::default();
        let mut exited = FxHashSet::default();

        let start = origin.travelled();
        let root = self.label(origin.edge, None);

        // Targets ahead of the origin on its own edge need not leave it.
        for &index in by_edge.get(&origin.id()).into_iter().flatten() {
            let ahead = targets[index].travelled() - start;
            if ahead >= 0.0 {
                self.push(
                    self.cost.partial(&origin.edge, ahead),
                    self.bound_cost.partial(&origin.edge, ahead),
                    Step::Target(index, root),
                );
            }
        }

        self.push(
            self.cost.partial(&origin.edge, 1.0 - start),
            self.bound_cost.partial(&origin.edge, 1.0 - start),
            Step::Exit(root),
        );

        while let Some(SmallestHolder {
            cost, bound, step, ..
        }) = self.heap.pop()
        {
            match step {
                Step::Target(index, label) => {
                    if reached.contains_key(&index) {
                        continue;
                    }

                    reached.insert(index, self.path(label));
                    if reached.len() == targets.len() {
                        break;
                    }
                }
                Step::Exit(label) => {
                    let edge = self.labels[label].edge;
                    if !exited.insert(edge.id) {
                        continue;
                    }

                    for successor in graph.successors(&edge) {
                        let next = self.label(*successor, Some(label));

                        for &index in by_edge.get(&successor.id).into_iter().flatten() {
                            if reached.contains_key(&index) {
                                continue;
                            }

                            let travelled = targets[index].travelled();
                            self.push(
                                cost + self.cost.partial(successor, travelled),
                                bound + self.bound_cost.partial(successor, travelled),
                                Step::Target(index, next),
                            );
                        }

                        if !exited.contains(&successor.id) {
                            self.push(
                                cost + self.cost.cost(successor),
                                bound + self.bound_cost.cost(successor),
                                Step::Exit(next),
                            );
                        }
                    }
                }
            }
        }

        trace!(
            "Reached {} of {} targets from {} in {} labels",
            reached.len(),
            targets.len(),
            origin.edge.id,
            self.labels.len()
        );

        reached
    }
}
