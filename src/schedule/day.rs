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

//! The sub-graph of a single day.
//!
//! Each day consists of [`VERTICES_PER_DAY`] consecutive vertices: the
//! start vertex, the five housemates, the restaurant, the two meals
//! (breakfast and dinner) and the end vertex. The edges are
//!
//! - start -> agent with capacity 2 for every agent,
//! - agent -> meal with capacity 1 if the agent can prepare the meal,
//! - meal -> end with capacity 1.
//!
//! The start vertex supplies two units per agent, the end vertex consumes
//! exactly two units, one per meal. A housemate is connected to a meal only
//! if it is available for it, the restaurant is always connected.

use super::{AGENTS, CANDIDATES, FALLBACK, MEALS};
use crate::availability::DayAvailability;
use crate::circulation::CirculationGraph;
use crate::network::{EdgeId, VertexId};
use crate::traits::FlowValue;

/// Number of vertices of a single day.
pub const VERTICES_PER_DAY: usize = 1 + CANDIDATES + MEALS + 1;

/// Index based view of the sub-graph of a single day.
#[derive(Clone, Debug)]
pub struct Day {
    start: VertexId,
    agents: [VertexId; CANDIDATES],
    meals: [VertexId; MEALS],
    end: VertexId,
    breakfast: [Option<EdgeId>; CANDIDATES],
    dinner: [Option<EdgeId>; CANDIDATES],
}

impl Day {
    /// Wire the sub-graph of one day.
    ///
    /// The day uses the vertices `first..first + VERTICES_PER_DAY` of `g`.
    pub fn new<F: FlowValue>(g: &mut CirculationGraph<F>, availability: &DayAvailability, first: usize) -> Day {
        let two = F::one() + F::one();
        let mut agents = [g.vertex(first); CANDIDATES];
        for (i, a) in agents.iter_mut().enumerate() {
            *a = g.vertex(first + 1 + i);
        }
        let mut day = Day {
            start: g.vertex(first),
            agents,
            meals: [g.vertex(first + 1 + CANDIDATES), g.vertex(first + 2 + CANDIDATES)],
            end: g.vertex(first + 3 + CANDIDATES),
            breakfast: [None; CANDIDATES],
            dinner: [None; CANDIDATES],
        };

        let supply = (0..CANDIDATES).fold(F::zero(), |s, _| s + two);
        g.set_demand(day.start, -supply);
        g.set_demand(day.end, two);

        for &u in &day.agents {
            g.add_edge(day.start, u, two);
        }
        for (i, a) in availability.iter().enumerate() {
            if a.allows_breakfast() {
                day.breakfast[i] = Some(g.add_edge(day.agents[i], day.meals[0], F::one()));
            }
            if a.allows_dinner() {
                day.dinner[i] = Some(g.add_edge(day.agents[i], day.meals[1], F::one()));
            }
        }
        day.breakfast[FALLBACK] = Some(g.add_edge(day.agents[FALLBACK], day.meals[0], F::one()));
        day.dinner[FALLBACK] = Some(g.add_edge(day.agents[FALLBACK], day.meals[1], F::one()));
        for &m in &day.meals {
            g.add_edge(m, day.end, F::one());
        }

        day
    }

    pub fn start(&self) -> VertexId {
        self.start
    }

    pub fn end(&self) -> VertexId {
        self.end
    }

    /// Return the vertex of agent `i`, where `i == FALLBACK` is the
    /// restaurant.
    pub fn agent(&self, i: usize) -> VertexId {
        self.agents[i]
    }

    /// Return the housemate vertices.
    pub fn housemates(&self) -> &[VertexId] {
        &self.agents[..AGENTS]
    }

    /// Return the agent preparing breakfast.
    pub fn breakfast<F: FlowValue>(&self, g: &CirculationGraph<F>) -> Option<usize> {
        Self::cook(g, &self.breakfast)
    }

    /// Return the agent preparing dinner.
    pub fn dinner<F: FlowValue>(&self, g: &CirculationGraph<F>) -> Option<usize> {
        Self::cook(g, &self.dinner)
    }

    // The first candidate whose edge into the meal is saturated.
    fn cook<F: FlowValue>(g: &CirculationGraph<F>, candidates: &[Option<EdgeId>]) -> Option<usize> {
        candidates
            .iter()
            .position(|e| e.map_or(false, |e| g.is_saturated(e)))
    }
}

#[cfg(test)]
mod tests {
    use super::{Day, VERTICES_PER_DAY};
    use crate::availability::validate;
    use crate::circulation::CirculationGraph;
    use crate::schedule::FALLBACK;

    #[test]
    fn test_single_day() {
        let days = validate(&[[1u8, 0, 2, 0, 0]]).unwrap();
        let mut g = CirculationGraph::<i32>::new(VERTICES_PER_DAY);
        let day = Day::new(&mut g, &days[0], 0);

        assert_eq!(g.demand(day.start()), -12);
        assert_eq!(g.demand(day.end()), 2);

        // housemates 0 and 2 keep one unit, everybody else both units, so
        // the meals are forced
        for &(i, d) in &[(0, 1), (1, 2), (2, 1), (3, 2), (4, 2), (FALLBACK, 2)] {
            g.set_demand(day.agent(i), d);
        }

        g.solve();
        assert!(g.is_feasible());
        assert_eq!(day.breakfast(&g), Some(0));
        assert_eq!(day.dinner(&g), Some(2));
        assert_eq!(day.housemates().len(), 5);
    }

    #[test]
    fn test_restaurant_only() {
        let days = validate(&[[0u8; 5]]).unwrap();
        let mut g = CirculationGraph::<i32>::new(VERTICES_PER_DAY);
        let day = Day::new(&mut g, &days[0], 0);
        for i in 0..FALLBACK {
            g.set_demand(day.agent(i), 2);
        }

        g.solve();
        assert!(g.is_feasible());
        assert_eq!(day.breakfast(&g), Some(FALLBACK));
        assert_eq!(day.dinner(&g), Some(FALLBACK));
    }
}
