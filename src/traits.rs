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

//! Traits shared by the flow algorithms.

use crate::network::{EdgeId, VertexId};
use crate::num::traits::{NumAssign, Signed};

use std::fmt;

/// Numeric type of capacities, flows and demands.
///
/// Demands may be negative, hence the type must be signed.
pub trait FlowValue: NumAssign + Signed + Ord + Copy + fmt::Debug + fmt::Display {}

impl<F> FlowValue for F where F: NumAssign + Signed + Ord + Copy + fmt::Debug + fmt::Display {}

/// A network that exposes residual capacities to augmenting path algorithms.
///
/// Each vertex lists its adjacent edges, which contain the residual edges of
/// its incoming edges. Pushing flow along an edge must keep its residual
/// mirror consistent.
pub trait ResidualNetwork {
    /// The type of capacities and flows.
    type Flow: FlowValue;

    /// Return the number of vertices.
    fn num_vertices(&self) -> usize;

    /// Return the edges leaving `u` in the residual network.
    fn adjacent(&self, u: VertexId) -> &[EdgeId];

    /// Return the sink vertex of an edge.
    fn snk(&self, e: EdgeId) -> VertexId;

    /// Return the remaining capacity of an edge.
    fn residual(&self, e: EdgeId) -> Self::Flow;

    /// Push `df` units of flow along `e`.
    fn augment(&mut self, e: EdgeId, df: Self::Flow);
}
