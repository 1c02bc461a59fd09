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

//! Circulations with vertex demands and edge lower bounds.
//!
//! A [`CirculationGraph`] is a flow network in which every vertex has a
//! *demand* `d(v)`, the required difference between inflow and outflow,
//! and every edge `e` has a lower bound `l(e)` and a capacity `u(e)`. A
//! feasible circulation is a flow with `l(e) <= x(e) <= u(e)` for all edges
//! and `inflow(v) - outflow(v) = d(v)` for all vertices.
//!
//! The demands are encoded by two synthetic edges per vertex, one from a
//! global super-source and one into a global super-sink. Lower bounds are
//! eliminated by shifting them into the demands of the endpoints, so that a
//! maximum flow from the super-source to the super-sink decides
//! feasibility.
//!
//! # Example
//!
//! ```
//! use rs_circulation::CirculationGraph;
//!
//! let mut g = CirculationGraph::<i32>::new(3);
//! let (a, b, c) = (g.vertex(0), g.vertex(1), g.vertex(2));
//! g.set_demand(a, -3);
//! g.set_demand(c, 3);
//! let ab = g.add_bounded_edge(a, b, 2, 5);
//! g.add_edge(b, c, 4);
//! g.add_edge(a, c, 1);
//!
//! g.solve();
//!
//! assert!(g.is_feasible());
//! assert!(g.flow(ab) >= 2);
//! assert!(g.is_conserved());
//! ```

use crate::maxflow::EdmondsKarp;
use crate::network::{EdgeId, Network, VertexId};
use crate::traits::FlowValue;

use std::cmp::max;

use tracing::debug;

/// A flow network with vertex demands and edge lower bounds.
///
/// The graph owns `n` ordinary vertices with indices `0..n` plus the
/// super-source and the super-sink. Each ordinary vertex is connected to
/// both by an edge of initial capacity zero.
#[derive(Clone, Debug)]
pub struct CirculationGraph<F> {
    net: Network<F>,
    src: VertexId,
    snk: VertexId,
    /// The edge from the super-source, for each ordinary vertex.
    source_edges: Vec<EdgeId>,
    /// The edge into the super-sink, for each ordinary vertex.
    sink_edges: Vec<EdgeId>,
    /// Whether the lower bounds are currently shifted into the demands.
    reduced: bool,
    /// Whether all supply edges were saturated when the lower bounds were
    /// last restored. Cleared by every change of edges or demands.
    feasible: bool,
}

impl<F> CirculationGraph<F>
where
    F: FlowValue,
{
    /// Create a new graph with `n` ordinary vertices and no edges.
    pub fn new(n: usize) -> Self {
        let mut net = Network::with_capacities(n + 2, 2 * n);
        let vertices = net.add_vertices(n);
        let src = net.add_vertex();
        let snk = net.add_vertex();
        let mut source_edges = Vec::with_capacity(n);
        let mut sink_edges = Vec::with_capacity(n);
        for &u in &vertices {
            source_edges.push(net.add_edge(src, u, F::zero(), F::zero()));
            sink_edges.push(net.add_edge(u, snk, F::zero(), F::zero()));
        }
        CirculationGraph {
            net,
            src,
            snk,
            source_edges,
            sink_edges,
            reduced: false,
            feasible: false,
        }
    }

    /// Return the number of ordinary vertices.
    pub fn num_vertices(&self) -> usize {
        self.source_edges.len()
    }

    /// Return the ordinary vertex with index `i`.
    pub fn vertex(&self, i: usize) -> VertexId {
        assert!(i < self.num_vertices(), "Invalid vertex index {}", i);
        self.net.id2vertex(i)
    }

    /// Iterate over all ordinary vertices.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        (0..self.num_vertices()).map(move |i| self.net.id2vertex(i))
    }

    /// Return the super-source.
    pub fn source(&self) -> VertexId {
        self.src
    }

    /// Return the super-sink.
    pub fn sink(&self) -> VertexId {
        self.snk
    }

    /// Return the underlying network.
    pub fn as_network(&self) -> &Network<F> {
        &self.net
    }

    /// Add an edge `u -> v` without lower bound.
    pub fn add_edge(&mut self, u: VertexId, v: VertexId, capacity: F) -> EdgeId {
        self.add_bounded_edge(u, v, F::zero(), capacity)
    }

    /// Add an edge `u -> v` whose flow must lie in `[lower, capacity]`.
    pub fn add_bounded_edge(&mut self, u: VertexId, v: VertexId, lower: F, capacity: F) -> EdgeId {
        assert!(!self.reduced, "Edges cannot be added while lower bounds are reduced");
        self.ordinary(u);
        self.ordinary(v);
        self.feasible = false;
        self.net.add_edge(u, v, capacity, lower)
    }

    /// Return the flow on `e`.
    pub fn flow(&self, e: EdgeId) -> F {
        self.net.flow(e)
    }

    /// Return the capacity of `e`.
    ///
    /// While the lower bounds are reduced this is the reduced capacity.
    pub fn capacity(&self, e: EdgeId) -> F {
        self.net.capacity(e)
    }

    /// Return the lower bound of `e`.
    pub fn lower(&self, e: EdgeId) -> F {
        self.net.lower(e)
    }

    /// Return `true` if `e` carries its full capacity.
    pub fn is_saturated(&self, e: EdgeId) -> bool {
        self.net.is_saturated(e)
    }

    /// Return the edge from the super-source into `u`.
    pub fn source_edge(&self, u: VertexId) -> EdgeId {
        self.source_edges[self.ordinary(u)]
    }

    /// Return the edge from `u` into the super-sink.
    pub fn sink_edge(&self, u: VertexId) -> EdgeId {
        self.sink_edges[self.ordinary(u)]
    }

    /// Return the demand of `u`.
    ///
    /// A positive demand means that `u` absorbs more flow than it emits, a
    /// negative demand that it emits more than it absorbs.
    pub fn demand(&self, u: VertexId) -> F {
        self.net.capacity(self.sink_edge(u)) - self.net.capacity(self.source_edge(u))
    }

    /// Set the demand of `u`.
    ///
    /// The flow on the synthetic edges of `u` is clamped to their new
    /// capacities.
    pub fn set_demand(&mut self, u: VertexId, demand: F) {
        let delta = demand - self.demand(u);
        self.feasible = false;
        self.shift_demand(u, delta, F::zero());
    }

    /// Change the demand of `u` by `delta`.
    ///
    /// If `adjust_flow` is `true` the flow on the synthetic edges follows
    /// the change: the flow from the super-source drops by `delta` and the
    /// flow into the super-sink grows by `delta`, each clamped into the
    /// new capacity. Otherwise the flows are only clamped.
    pub fn change_demand(&mut self, u: VertexId, delta: F, adjust_flow: bool) {
        let shift = if adjust_flow { delta } else { F::zero() };
        self.feasible = false;
        self.shift_demand(u, delta, shift);
    }

    fn shift_demand(&mut self, u: VertexId, delta: F, shift: F) {
        let se = self.source_edge(u);
        let ke = self.sink_edge(u);
        let demand = self.demand(u) + delta;
        let source_cap = max(F::zero(), -demand);
        let sink_cap = max(F::zero(), demand);
        let source_flow = self.net.flow(se) - shift;
        let sink_flow = self.net.flow(ke) + shift;
        self.net.update(se, source_cap, source_flow);
        self.net.update(ke, sink_cap, sink_flow);
    }

    /// Return `true` if the lower bounds are currently shifted into the
    /// demands.
    pub fn is_reduced(&self) -> bool {
        self.reduced
    }

    fn bounded_edges(&self) -> Vec<EdgeId> {
        self.net.edges().filter(|&e| !self.net.lower(e).is_zero()).collect()
    }

    /// Eliminate all lower bounds.
    ///
    /// An edge `u -> v` with lower bound `l > 0` loses `l` units of
    /// capacity, `u` gains demand `l` and `v` loses demand `l`. Whatever flow
    /// is removed from the edge is moved to the synthetic edges of its
    /// endpoints, so a conserved flow stays conserved.
    pub fn reduce_lower_bounds(&mut self) {
        assert!(!self.reduced, "Lower bounds are already reduced");
        for e in self.bounded_edges() {
            let lower = self.net.lower(e);
            let flow = self.net.flow(e);
            let capacity = self.net.capacity(e);
            let reduced_flow = max(flow - lower, F::zero());
            let removed = flow - reduced_flow;
            self.net.update(e, capacity - lower, reduced_flow);
            let (u, v) = (self.net.src(e), self.net.snk(e));
            self.shift_demand(u, lower, removed);
            self.shift_demand(v, -lower, -removed);
        }
        self.reduced = true;
    }

    /// Undo [`reduce_lower_bounds`](Self::reduce_lower_bounds).
    ///
    /// Each bounded edge gets back its capacity and its lower bound is added
    /// to its flow. The demands of its endpoints are restored and the flow
    /// on their synthetic edges is adjusted to the new edge flow.
    ///
    /// Whether the reduced flow saturates all supply edges is recorded
    /// before, see [`is_feasible`](Self::is_feasible).
    pub fn restore_lower_bounds(&mut self) {
        assert!(self.reduced, "Lower bounds are not reduced");
        let feasible = self.supply_saturated();
        for e in self.bounded_edges() {
            let lower = self.net.lower(e);
            let flow = self.net.flow(e);
            let capacity = self.net.capacity(e);
            self.net.update(e, capacity + lower, max(flow + lower, F::zero()));
            let (u, v) = (self.net.src(e), self.net.snk(e));
            self.shift_demand(u, -lower, -lower);
            self.shift_demand(v, lower, lower);
        }
        self.reduced = false;
        self.feasible = feasible;
    }

    /// Compute a circulation.
    ///
    /// The lower bounds are reduced, the flow is augmented from the
    /// super-source to the super-sink until no augmenting path remains, and
    /// the lower bounds are restored. Returns the total augmented amount.
    ///
    /// Use [`is_feasible`](Self::is_feasible) to check whether the computed
    /// flow satisfies all demands.
    pub fn solve(&mut self) -> F {
        self.reduce_lower_bounds();
        let (src, snk) = (self.src, self.snk);
        let mut ek = EdmondsKarp::new(&mut self.net);
        let value = ek.solve(src, snk);
        let iterations = ek.iterations();
        self.restore_lower_bounds();
        debug_assert!(self.net.is_consistent());
        debug!(
            vertices = self.num_vertices(),
            edges = self.net.num_edges() / 2,
            iterations,
            value = %value,
            "solved circulation"
        );
        value
    }

    /// Return `true` if the current flow satisfies all demands.
    ///
    /// While the lower bounds are reduced this means that every edge out of
    /// the super-source is saturated. Otherwise the answer refers to the
    /// reduced flow seen by the last [`restore_lower_bounds`](Self::restore_lower_bounds):
    /// restoring may shrink a supply edge below an unmet demand, so its
    /// saturation afterwards says nothing. Any change of edges or demands
    /// since then makes the graph infeasible until it is solved again.
    pub fn is_feasible(&self) -> bool {
        if self.reduced {
            self.supply_saturated()
        } else {
            self.feasible
        }
    }

    fn supply_saturated(&self) -> bool {
        self.source_edges.iter().all(|&e| self.net.is_saturated(e))
    }

    /// Return `true` if inflow equals outflow at every ordinary vertex,
    /// synthetic edges included.
    pub fn is_conserved(&self) -> bool {
        self.vertices().all(|u| self.net.excess(u).is_zero())
    }

    /// Return `true` if every edge carries at least its lower bound and at
    /// most its capacity.
    pub fn respects_bounds(&self) -> bool {
        self.net
            .edges()
            .all(|e| self.net.lower(e) <= self.net.flow(e) && self.net.flow(e) <= self.net.capacity(e))
    }

    /// Return the total supply that has to leave the super-source.
    pub fn total_supply(&self) -> F {
        self.source_edges
            .iter()
            .fold(F::zero(), |acc, &e| acc + self.net.capacity(e))
    }

    fn ordinary(&self, u: VertexId) -> usize {
        let i = u.index();
        assert!(i < self.num_vertices(), "Vertex {} is not an ordinary vertex", u);
        i
    }
}
