/*
 * Copyright (c) 2017-2022 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! This module implements the max flow algorithm of Edmonds-Karp on a
//! residual network.
//!
//! In contrast to a plain max flow solver the algorithm works *in place*:
//! it starts from the flow currently stored in the network and augments
//! it along shortest paths until the sink cannot be reached anymore.
//!
//! # Example
//!
//! ```
//! use rs_circulation::maxflow::edmondskarp;
//! use rs_circulation::network::Network;
//!
//! let mut n = Network::<i32>::new();
//! let vs = n.add_vertices(6);
//! let (s, v1, v2, v3, v4, t) = (vs[0], vs[1], vs[2], vs[3], vs[4], vs[5]);
//! for &(u, v, c) in &[
//!     (s, v1, 15), (s, v3, 10), (v1, v2, 6), (v1, v3, 7), (v2, t, 5),
//!     (v2, v4, 2), (v3, v2, 11), (v3, v4, 4), (v4, v2, 4), (v4, t, 20),
//! ] {
//!     n.add_edge(u, v, c, 0);
//! }
//!
//! assert_eq!(edmondskarp(&mut n, s, t), 11);
//! assert!(n.is_consistent());
//! ```

use crate::network::{EdgeId, VertexId};
use crate::num::traits::Zero;
use crate::traits::ResidualNetwork;

use std::cmp::min;
use std::collections::VecDeque;

use tracing::trace;

/// Max-flow algorithm of Edmonds and Karp.
///
/// The search state (predecessor edges and the BFS queue) belongs to the
/// algorithm object and is reset at the start of each search.
pub struct EdmondsKarp<'a, N>
where
    N: ResidualNetwork,
{
    net: &'a mut N,
    pred: Vec<Option<EdgeId>>,
    queue: VecDeque<VertexId>,
    value: N::Flow,
    iterations: usize,
}

impl<'a, N> EdmondsKarp<'a, N>
where
    N: ResidualNetwork,
{
    /// Create a new Edmonds-Karp algorithm instance for a network.
    pub fn new(net: &'a mut N) -> Self {
        let n = net.num_vertices();
        EdmondsKarp {
            net,
            pred: vec![None; n],
            queue: VecDeque::with_capacity(n),
            value: N::Flow::zero(),
            iterations: 0,
        }
    }

    /// Return the underlying network.
    pub fn as_network(&self) -> &N {
        &*self.net
    }

    /// Return the total flow augmented so far.
    pub fn value(&self) -> N::Flow {
        self.value
    }

    /// Return the number of augmentations done so far.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Find one shortest augmenting path from `src` to `snk` and push the
    /// bottleneck amount along it.
    ///
    /// Returns the augmented amount or `None` if the sink cannot be reached.
    pub fn augment(&mut self, src: VertexId, snk: VertexId) -> Option<N::Flow> {
        assert_ne!(src, snk, "Source and sink vertex must not be equal");

        // do bfs from source to sink
        self.pred.clear();
        self.pred.resize(self.net.num_vertices(), None);
        self.queue.clear();
        self.queue.push_back(src);
        let mut found = false;
        'bfs: while let Some(u) = self.queue.pop_front() {
            for &e in self.net.adjacent(u) {
                let v = self.net.snk(e);
                if v != src && self.pred[v.index()].is_none() && self.net.residual(e) > N::Flow::zero() {
                    self.pred[v.index()] = Some(e);
                    self.queue.push_back(v);
                    if v == snk {
                        found = true;
                        break 'bfs;
                    }
                }
            }
        }

        // sink cannot be reached -> stop
        if !found {
            return None;
        }

        // compute augmentation value
        let mut v = snk;
        let mut df = None;
        while let Some(e) = self.pred[v.index()] {
            let r = self.net.residual(e);
            df = Some(df.map_or(r, |df| min(df, r)));
            v = self.net.snk(e.reverse());
        }
        debug_assert_eq!(v, src);
        let df = df?;

        debug_assert!(df > N::Flow::zero());

        // now augment the flow
        let mut v = snk;
        while let Some(e) = self.pred[v.index()] {
            self.net.augment(e, df);
            v = self.net.snk(e.reverse());
        }

        self.value += df;
        self.iterations += 1;
        trace!(iteration = self.iterations, amount = %df, "augmented flow");

        Some(df)
    }

    /// Augment along shortest paths until the sink cannot be reached.
    ///
    /// Returns the total amount augmented by this call.
    pub fn solve(&mut self, src: VertexId, snk: VertexId) -> N::Flow {
        let start = self.value;
        while self.augment(src, snk).is_some() {}
        self.value - start
    }
}

/// Augment the flow in `net` from `src` to `snk` with the algorithm of
/// Edmonds-Karp.
///
/// The function starts from the flow currently stored in the network and
/// returns the amount of flow added.
pub fn edmondskarp<N>(net: &mut N, src: VertexId, snk: VertexId) -> N::Flow
where
    N: ResidualNetwork,
{
    EdmondsKarp::new(net).solve(src, snk)
}

#[cfg(test)]
mod tests {
    use crate::maxflow::{edmondskarp, EdmondsKarp};
    use crate::network::Network;

    #[test]
    fn test_edmondskarp() {
        let mut n = Network::<i32>::new();
        let vs = n.add_vertices(6);
        let (s, a, b, c, d, t) = (vs[0], vs[1], vs[2], vs[3], vs[4], vs[5]);
        n.add_edge(s, a, 5, 0);
        n.add_edge(s, c, 5, 0);
        n.add_edge(a, b, 2, 0);
        n.add_edge(a, c, 1, 0);
        n.add_edge(a, d, 1, 0);
        n.add_edge(c, d, 2, 0);
        n.add_edge(d, b, 2, 0);
        n.add_edge(b, t, 4, 0);
        n.add_edge(d, t, 5, 0);

        assert_eq!(edmondskarp(&mut n, s, t), 5);
        assert!(n.is_consistent());
        assert!(n
            .vertices()
            .filter(|&u| u != s && u != t)
            .all(|u| n.excess(u) == 0));
        assert_eq!(n.excess(t), 5);

        // a second run has nothing left to do
        let mut ek = EdmondsKarp::new(&mut n);
        assert_eq!(ek.augment(s, t), None);
        assert_eq!(ek.iterations(), 0);
    }

    #[test]
    fn test_uses_residual_edges() {
        // The preset flow on s-a-b-t blocks both direct paths, so the only
        // augmenting path cancels the flow on a-b.
        let mut n = Network::<i64>::new();
        let vs = n.add_vertices(4);
        let (s, a, b, t) = (vs[0], vs[1], vs[2], vs[3]);
        let sa = n.add_edge(s, a, 1, 0);
        let ab = n.add_edge(a, b, 1, 0);
        let bt = n.add_edge(b, t, 1, 0);
        let sb = n.add_edge(s, b, 1, 0);
        let at = n.add_edge(a, t, 1, 0);
        n.set_flow(sa, 1);
        n.set_flow(ab, 1);
        n.set_flow(bt, 1);

        let mut ek = EdmondsKarp::new(&mut n);
        assert_eq!(ek.solve(s, t), 1);
        assert_eq!(ek.iterations(), 1);

        assert_eq!(n.flow(ab), 0);
        assert_eq!(n.flow(sb), 1);
        assert_eq!(n.flow(at), 1);
    }

    #[test]
    fn test_no_edges() {
        let mut n = Network::<i32>::new();
        let vs = n.add_vertices(2);
        assert_eq!(edmondskarp(&mut n, vs[0], vs[1]), 0);
    }
}
