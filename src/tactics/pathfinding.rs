//! Dijkstra searches over an abstract weighted graph
//!
//! Nothing here knows about grids or units. Callers supply a
//! [`WeightedGraph`] and talk in vertex ids; edge costs must be
//! non-negative.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;

use crate::tactics::vertex::VertexId;

/// Cost reported by [`shortest_path`] when no target can be reached
pub const UNREACHABLE: f64 = f64::INFINITY;

/// Directed graph with non-negative edge costs
pub trait WeightedGraph {
    /// Number of vertices; valid ids are `0..num_vertices()`
    fn num_vertices(&self) -> usize;

    /// Push `(neighbor, cost of entering neighbor)` for every outgoing edge
    /// of `vertex` onto `out`. Impassable neighbors are simply omitted.
    fn adjacent(&self, vertex: VertexId, out: &mut Vec<(VertexId, f64)>);
}

/// Node in the Dijkstra frontier, ordered as a min-heap on cost
type Frontier = BinaryHeap<Reverse<(OrderedFloat<f64>, VertexId)>>;

/// Result of a shortest-path query
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPath {
    /// Total cost from the chosen source, or [`UNREACHABLE`]
    pub cost: f64,
    /// Vertices from source to target inclusive; empty when unreachable
    pub path: Vec<VertexId>,
}

impl ShortestPath {
    pub fn unreachable() -> Self {
        Self {
            cost: UNREACHABLE,
            path: Vec::new(),
        }
    }

    pub fn is_reachable(&self) -> bool {
        !self.path.is_empty()
    }
}

/// Per-search bookkeeping, dense over the vertex range
struct Search {
    dist: Vec<f64>,
    parent: Vec<Option<VertexId>>,
    done: Vec<bool>,
    frontier: Frontier,
}

impl Search {
    fn new<G: WeightedGraph + ?Sized>(graph: &G, sources: &[VertexId]) -> Self {
        let n = graph.num_vertices();
        let mut search = Search {
            dist: vec![UNREACHABLE; n],
            parent: vec![None; n],
            done: vec![false; n],
            frontier: BinaryHeap::new(),
        };
        for &source in sources {
            if source < n && search.dist[source] > 0.0 {
                search.dist[source] = 0.0;
                search.frontier.push(Reverse((OrderedFloat(0.0), source)));
            }
        }
        search
    }

    /// Finalize the next vertex, or `None` once the frontier is exhausted.
    /// `limit` bounds which relaxed vertices are worth queueing.
    fn next<G: WeightedGraph + ?Sized>(
        &mut self,
        graph: &G,
        limit: f64,
        scratch: &mut Vec<(VertexId, f64)>,
    ) -> Option<(VertexId, f64)> {
        while let Some(Reverse((OrderedFloat(cost), vertex))) = self.frontier.pop() {
            if self.done[vertex] || cost > self.dist[vertex] {
                continue; // stale entry
            }
            self.done[vertex] = true;

            scratch.clear();
            graph.adjacent(vertex, scratch);
            for &(neighbor, edge) in scratch.iter() {
                if neighbor >= self.dist.len() || self.done[neighbor] {
                    continue;
                }
                // Negative or NaN costs would break finalization order
                if !(edge >= 0.0) {
                    continue;
                }
                let tentative = cost + edge;
                if tentative < self.dist[neighbor] && tentative <= limit {
                    self.dist[neighbor] = tentative;
                    self.parent[neighbor] = Some(vertex);
                    self.frontier.push(Reverse((OrderedFloat(tentative), neighbor)));
                }
            }

            return Some((vertex, cost));
        }
        None
    }

    fn reconstruct(&self, mut current: VertexId) -> Vec<VertexId> {
        let mut path = vec![current];
        while let Some(prev) = self.parent[current] {
            path.push(prev);
            current = prev;
        }
        path.reverse();
        path
    }
}

/// Every vertex whose minimum cost from any source is within `limit`
///
/// Sources themselves are included (cost 0). Returned in the order they
/// were finalized, i.e. by non-decreasing cost. Out-of-range sources are
/// ignored; an empty source set yields an empty result.
pub fn reachable_within_limit<G: WeightedGraph + ?Sized>(
    graph: &G,
    sources: &[VertexId],
    limit: f64,
) -> Vec<VertexId> {
    if limit < 0.0 || limit.is_nan() {
        return Vec::new();
    }
    let mut search = Search::new(graph, sources);
    let mut scratch = Vec::with_capacity(8);
    let mut reachable = Vec::new();
    while let Some((vertex, _)) = search.next(graph, limit, &mut scratch) {
        reachable.push(vertex);
    }
    reachable
}

/// Minimum-cost path from any source to any target
///
/// Stops as soon as the first target is finalized. When no target is
/// reachable the result is [`ShortestPath::unreachable`].
pub fn shortest_path<G: WeightedGraph + ?Sized>(
    graph: &G,
    sources: &[VertexId],
    targets: &[VertexId],
) -> ShortestPath {
    let n = graph.num_vertices();
    let mut is_target = vec![false; n];
    let mut any_target = false;
    for &target in targets {
        if target < n {
            is_target[target] = true;
            any_target = true;
        }
    }
    if !any_target {
        return ShortestPath::unreachable();
    }

    let mut search = Search::new(graph, sources);
    let mut scratch = Vec::with_capacity(8);
    while let Some((vertex, cost)) = search.next(graph, UNREACHABLE, &mut scratch) {
        if is_target[vertex] {
            return ShortestPath {
                cost,
                path: search.reconstruct(vertex),
            };
        }
    }
    ShortestPath::unreachable()
}
