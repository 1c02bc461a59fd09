/*
 * Copyright (c) 2022 Frank Fischer <frank-fischer@shadow-soft.de>
 *
 * This program is free software: you can redistribute it and/or
 * modify it under the terms of the GNU General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
 * General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see  <http://www.gnu.org/licenses/>
 */

//! A vector based flow network with paired residual edges.
//!
//! Each edge added to the network is stored together with its residual
//! (reverse) edge. The forward edge has the even id `2*i`, its residual
//! edge the odd id `2*i+1`, so the mirror of an edge is found by flipping
//! the lowest bit. Both edges always have the same capacity and their flows
//! sum up to that capacity.
//!
//! # Example
//!
//! ```
//! use rs_circulation::network::Network;
//!
//! let mut n = Network::<i32>::new();
//! let u = n.add_vertex();
//! let v = n.add_vertex();
//! let e = n.add_edge(u, v, 5, 0);
//!
//! n.set_flow(e, 3);
//! assert_eq!(n.flow(e), 3);
//! assert_eq!(n.flow(e.reverse()), 2);
//! assert_eq!(n.residual(e), 2);
//! assert_eq!(n.residual(e.reverse()), 3);
//! assert!(e.reverse().is_residual());
//! ```

use crate::traits::{FlowValue, ResidualNetwork};

use std::cmp::{max, min};
use std::fmt;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// Vertex of a flow network.
///
/// This is basically a newtype of the vertex index.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct VertexId(usize);

impl VertexId {
    /// Return the index of this vertex.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", self.0)
    }
}

/// Edge of a flow network.
///
/// This is basically a newtype of the edge index. Forward edges have even
/// ids, residual edges odd ids.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct EdgeId(usize);

impl EdgeId {
    /// Return the raw id of this edge.
    ///
    /// Forward and residual edge have distinct ids.
    pub fn id(self) -> usize {
        self.0
    }

    /// Return the index of the underlying edge pair.
    pub fn index(self) -> usize {
        self.0 >> 1
    }

    /// Return the mirrored edge.
    pub fn reverse(self) -> EdgeId {
        EdgeId(self.0 ^ 1)
    }

    /// Return `true` if this is the residual edge of a pair.
    pub fn is_residual(self) -> bool {
        (self.0 & 1) == 1
    }

    /// Return the forward edge of the pair.
    pub fn forward(self) -> EdgeId {
        EdgeId(self.0 & !1)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}{}", if self.is_residual() { "-" } else { "+" }, self.0 >> 1)
    }
}

/// Data for an edge.
#[derive(Clone, Debug)]
struct EdgeData<F> {
    src: VertexId,
    snk: VertexId,
    capacity: F,
    flow: F,
    lower: F,
}

/// A vector based flow network.
///
/// The network owns all vertices and edges. Vertices and edges are
/// referenced by [`VertexId`] and [`EdgeId`] handles.
#[derive(Clone, Debug)]
pub struct Network<F> {
    // The adjacency list of each vertex: the outgoing forward edges and
    // the residual edges of the incoming edges, in insertion order.
    adj: Vec<Vec<EdgeId>>,
    edges: Vec<EdgeData<F>>,
}

impl<F> Default for Network<F> {
    fn default() -> Self {
        Network {
            adj: vec![],
            edges: vec![],
        }
    }
}

impl<F> Network<F>
where
    F: FlowValue,
{
    /// Create a new, empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new, empty network with reserved memory.
    pub fn with_capacities(nvertices: usize, nedges: usize) -> Self {
        Network {
            adj: Vec::with_capacity(nvertices),
            edges: Vec::with_capacity(2 * nedges),
        }
    }

    /// Return the number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.adj.len()
    }

    /// Return the number of edges, residual edges included.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Add a new vertex.
    pub fn add_vertex(&mut self) -> VertexId {
        self.adj.push(vec![]);
        VertexId(self.adj.len() - 1)
    }

    /// Add `n` new vertices.
    pub fn add_vertices(&mut self, n: usize) -> Vec<VertexId> {
        (0..n).map(|_| self.add_vertex()).collect()
    }

    /// Return the vertex with index `i`.
    pub fn id2vertex(&self, i: usize) -> VertexId {
        assert!(i < self.num_vertices(), "Invalid vertex index {}", i);
        VertexId(i)
    }

    /// Add a new edge `u -> v` together with its residual edge `v -> u`.
    ///
    /// The forward edge starts with flow 0, the residual edge with flow
    /// `capacity`. Returns the forward edge.
    pub fn add_edge(&mut self, u: VertexId, v: VertexId, capacity: F, lower: F) -> EdgeId {
        assert!(!capacity.is_negative(), "Capacity must be non-negative");
        assert!(
            !lower.is_negative() && lower <= capacity,
            "Lower bound must be in [0, capacity]"
        );
        let e = EdgeId(self.edges.len());
        self.edges.push(EdgeData {
            src: u,
            snk: v,
            capacity,
            flow: F::zero(),
            lower,
        });
        self.edges.push(EdgeData {
            src: v,
            snk: u,
            capacity,
            flow: capacity,
            lower,
        });
        self.adj[u.0].push(e);
        self.adj[v.0].push(e.reverse());
        e
    }

    /// Iterate over all forward edges.
    pub fn edges(&self) -> impl Iterator<Item = EdgeId> {
        (0..self.edges.len()).step_by(2).map(EdgeId)
    }

    /// Iterate over all vertices.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> {
        (0..self.adj.len()).map(VertexId)
    }

    /// Return the adjacent edges of `u`.
    ///
    /// These are the outgoing forward edges and the residual edges of the
    /// incoming edges.
    pub fn adjacent(&self, u: VertexId) -> &[EdgeId] {
        &self.adj[u.0]
    }

    /// Return the source vertex of an edge.
    pub fn src(&self, e: EdgeId) -> VertexId {
        self.edges[e.0].src
    }

    /// Return the sink vertex of an edge.
    pub fn snk(&self, e: EdgeId) -> VertexId {
        self.edges[e.0].snk
    }

    /// Return the capacity of an edge, which equals that of its mirror.
    pub fn capacity(&self, e: EdgeId) -> F {
        self.edges[e.0].capacity
    }

    /// Return the flow on an edge.
    ///
    /// The flow on a residual edge is `capacity` minus the flow on its
    /// forward edge.
    pub fn flow(&self, e: EdgeId) -> F {
        self.edges[e.0].flow
    }

    /// Return the lower bound of an edge.
    ///
    /// Residual edges report the lower bound of their forward edge, but it
    /// has no meaning for them.
    pub fn lower(&self, e: EdgeId) -> F {
        self.edges[e.0].lower
    }

    /// Return the remaining capacity `capacity - flow` of an edge.
    pub fn residual(&self, e: EdgeId) -> F {
        let data = &self.edges[e.0];
        data.capacity - data.flow
    }

    /// Return `true` if the edge carries its full capacity.
    pub fn is_saturated(&self, e: EdgeId) -> bool {
        let data = &self.edges[e.0];
        data.flow == data.capacity
    }

    /// Set the flow on `e` and update its mirror accordingly.
    pub fn set_flow(&mut self, e: EdgeId, flow: F) {
        let capacity = self.edges[e.0].capacity;
        assert!(
            !flow.is_negative() && flow <= capacity,
            "Flow on edge {} out of bounds",
            e
        );
        self.edges[e.0].flow = flow;
        self.edges[e.reverse().0].flow = capacity - flow;
    }

    /// Push `df` additional units along `e`.
    ///
    /// Pushing along a residual edge reduces the flow of its forward edge.
    pub fn add_flow(&mut self, e: EdgeId, df: F) {
        let flow = self.edges[e.0].flow + df;
        self.set_flow(e, flow);
    }

    /// Set the capacity of `e` and its mirror.
    ///
    /// The flow on `e` is clamped into `[0, capacity]`.
    pub fn set_capacity(&mut self, e: EdgeId, capacity: F) {
        let flow = min(self.edges[e.0].flow, capacity);
        self.update(e, capacity, flow);
    }

    /// Set capacity and flow of `e` at once.
    ///
    /// The flow is clamped into `[0, capacity]`.
    pub fn update(&mut self, e: EdgeId, capacity: F, flow: F) {
        assert!(!capacity.is_negative(), "Capacity must be non-negative");
        self.edges[e.0].capacity = capacity;
        self.edges[e.reverse().0].capacity = capacity;
        self.set_flow(e, max(F::zero(), min(flow, capacity)));
    }

    /// Return the net flow into `u`, i.e. inflow minus outflow over all
    /// forward edges.
    pub fn excess(&self, u: VertexId) -> F {
        let mut excess = F::zero();
        for &e in &self.adj[u.0] {
            if e.is_residual() {
                excess += self.flow(e.forward());
            } else {
                excess -= self.flow(e);
            }
        }
        excess
    }

    /// Return `true` if all structural invariants hold.
    ///
    /// Every edge must satisfy `0 <= flow <= capacity`, both edges of a pair
    /// must have the same capacity and their flows must add up to it.
    pub fn is_consistent(&self) -> bool {
        self.edges().all(|e| {
            let fwd = &self.edges[e.0];
            let rev = &self.edges[e.reverse().0];
            !fwd.flow.is_negative()
                && fwd.flow <= fwd.capacity
                && fwd.capacity == rev.capacity
                && fwd.flow + rev.flow == fwd.capacity
        })
    }
}

impl<F> ResidualNetwork for Network<F>
where
    F: FlowValue,
{
    type Flow = F;

    fn num_vertices(&self) -> usize {
        Network::num_vertices(self)
    }

    fn adjacent(&self, u: VertexId) -> &[EdgeId] {
        Network::adjacent(self, u)
    }

    fn snk(&self, e: EdgeId) -> VertexId {
        Network::snk(self, e)
    }

    fn residual(&self, e: EdgeId) -> F {
        Network::residual(self, e)
    }

    fn augment(&mut self, e: EdgeId, df: F) {
        self.add_flow(e, df)
    }
}

#[cfg(test)]
mod tests {
    use super::Network;

    #[test]
    fn test_pairing() {
        let mut n = Network::<i32>::new();
        let vs = n.add_vertices(3);
        let e1 = n.add_edge(vs[0], vs[1], 4, 1);
        let e2 = n.add_edge(vs[1], vs[2], 3, 0);

        assert_eq!(n.num_vertices(), 3);
        assert_eq!(n.num_edges(), 4);
        assert_eq!(n.edges().collect::<Vec<_>>(), vec![e1, e2]);
        assert_eq!(n.adjacent(vs[1]), &[e1.reverse(), e2][..]);
        assert_eq!((n.src(e1.reverse()), n.snk(e1.reverse())), (vs[1], vs[0]));
        assert_eq!(n.lower(e1), 1);
        assert_eq!(n.flow(e1.reverse()), 4);
        assert_eq!(format!("{} {}", e2, e2.reverse()), "+1 -1");

        n.add_flow(e1, 3);
        n.add_flow(e1.reverse(), 1);
        assert_eq!(n.flow(e1), 2);
        assert_eq!(n.flow(e1.reverse()), 2);
        assert!(n.is_consistent());
    }

    #[test]
    fn test_capacity_clamps_flow() {
        let mut n = Network::<i64>::new();
        let vs = n.add_vertices(2);
        let e = n.add_edge(vs[0], vs[1], 5, 0);
        n.set_flow(e, 5);
        assert!(n.is_saturated(e));

        n.set_capacity(e, 2);
        assert_eq!(n.flow(e), 2);
        assert_eq!(n.capacity(e.reverse()), 2);
        assert_eq!(n.flow(e.reverse()), 0);

        n.update(e, 7, 9);
        assert_eq!(n.flow(e), 7);
        n.update(e, 7, -3);
        assert_eq!(n.flow(e), 0);
        assert_eq!(n.residual(e), 7);
        assert!(n.is_consistent());
    }

    #[test]
    fn test_excess() {
        let mut n = Network::<i32>::new();
        let vs = n.add_vertices(3);
        let a = n.add_edge(vs[0], vs[1], 3, 0);
        let b = n.add_edge(vs[1], vs[2], 3, 0);
        n.set_flow(a, 3);
        n.set_flow(b, 1);
        assert_eq!(n.excess(vs[0]), -3);
        assert_eq!(n.excess(vs[1]), 2);
        assert_eq!(n.excess(vs[2]), 1);
    }

    #[test]
    #[should_panic]
    fn test_flow_above_capacity() {
        let mut n = Network::<i32>::new();
        let vs = n.add_vertices(2);
        let e = n.add_edge(vs[0], vs[1], 1, 0);
        n.set_flow(e, 2);
    }

    #[test]
    #[should_panic]
    fn test_lower_above_capacity() {
        let mut n = Network::<i32>::new();
        let vs = n.add_vertices(2);
        n.add_edge(vs[0], vs[1], 1, 2);
    }
}
