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

//! Fair allocation of meals to housemates.
//!
//! Five housemates share the preparation of breakfast and dinner. On each
//! day every housemate can prepare breakfast, dinner, either or none. A
//! schedule assigns one cook to each meal so that
//!
//! 1. a housemate prepares at most one meal per day,
//! 2. over `n` days every housemate prepares between `floor(0.36 n)` and
//!    `ceil(0.44 n)` meals,
//! 3. at most `floor(0.1 n)` meals are ordered from the restaurant.
//!
//! The problem is solved as a circulation problem. Besides the day
//! sub-graphs (see [`day`]) there is one aggregation vertex per agent.
//! Every day each agent passes the supply not used for a meal to its
//! aggregation vertex. The edges from housemates carry at least one unit,
//! so a housemate never cooks twice a day. The aggregation vertices are
//! connected to a common terminal vertex by edges whose bounds translate
//! the fairness band.
//!
//! # Example
//!
//! ```
//! use rs_circulation::schedule::{allocate, FairnessBand};
//!
//! let days = vec![vec![3u8, 3, 3, 3, 3]; 5];
//! let schedule = allocate(&days).unwrap().unwrap();
//!
//! assert_eq!(schedule.len(), 5);
//! assert!(schedule.is_valid(&days, &FairnessBand::default()));
//!
//! // nobody can cook and the restaurant is not allowed on a single day
//! assert_eq!(allocate(&[[0u8; 5]]).unwrap(), None);
//! ```

pub mod band;
pub mod day;

pub use self::band::FairnessBand;
pub use self::day::{Day, VERTICES_PER_DAY};

use crate::availability::{self, DayAvailability};
use crate::circulation::CirculationGraph;
use crate::error::Result;

use tracing::debug;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// Number of housemates.
pub const AGENTS: usize = 5;

/// Index of the restaurant.
pub const FALLBACK: usize = AGENTS;

/// Number of possible cooks per meal, the restaurant included.
pub const CANDIDATES: usize = AGENTS + 1;

/// Number of meals per day.
pub const MEALS: usize = 2;

// Vertex 0 is the terminal vertex, 1..=CANDIDATES the aggregation
// vertices, the days follow.
const TERMINAL: usize = 0;
const FIRST_DAY: usize = 1 + CANDIDATES;

/// The cooks of all meals.
///
/// Each entry is the index of a housemate in `0..AGENTS` or [`FALLBACK`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Schedule {
    pub breakfast: Vec<usize>,
    pub dinner: Vec<usize>,
}

impl Schedule {
    /// Return the number of days.
    pub fn len(&self) -> usize {
        self.breakfast.len()
    }

    pub fn is_empty(&self) -> bool {
        self.breakfast.is_empty()
    }

    /// Return the number of meals prepared by each agent.
    ///
    /// Entries that are not an agent index are not counted.
    pub fn meal_counts(&self) -> [usize; CANDIDATES] {
        let mut counts = [0; CANDIDATES];
        for &a in self.breakfast.iter().chain(self.dinner.iter()) {
            if let Some(c) = counts.get_mut(a) {
                *c += 1;
            }
        }
        counts
    }

    /// Return the breakfast and dinner cooks.
    pub fn into_pair(self) -> (Vec<usize>, Vec<usize>) {
        (self.breakfast, self.dinner)
    }

    /// Return `true` if the schedule satisfies all constraints.
    ///
    /// Each cook must be available for the meal, nobody but the restaurant
    /// cooks twice a day and the meal counts must be within `band`. Invalid
    /// availability codes make the schedule invalid.
    pub fn is_valid<R: AsRef<[u8]>>(&self, days: &[R], band: &FairnessBand) -> bool {
        let days = match availability::validate(days) {
            Ok(days) => days,
            Err(_) => return false,
        };
        let n = days.len();
        if self.breakfast.len() != n || self.dinner.len() != n {
            return false;
        }

        let meals_ok = days.iter().zip(self.breakfast.iter().zip(&self.dinner)).all(|(day, (&b, &d))| {
            let available = |a: usize, breakfast: bool| {
                a == FALLBACK
                    || (a < AGENTS
                        && if breakfast {
                            day[a].allows_breakfast()
                        } else {
                            day[a].allows_dinner()
                        })
            };
            available(b, true) && available(d, false) && (b != d || b == FALLBACK)
        });
        if !meals_ok {
            return false;
        }

        let counts = self.meal_counts();
        counts[..AGENTS]
            .iter()
            .all(|&c| band.min_meals(n) <= c && c <= band.max_meals(n))
            && counts[FALLBACK] <= band.max_fallback(n)
    }
}

/// Meal allocation with a configurable fairness band.
#[derive(Clone, Copy, Debug, Default)]
pub struct Allocator {
    pub band: FairnessBand,
}

impl Allocator {
    pub fn new(band: FairnessBand) -> Self {
        Allocator { band }
    }

    /// Compute a schedule from raw availability codes.
    ///
    /// Each day must contain exactly one code in `0..=3` per housemate
    /// (unavailable, breakfast only, dinner only, either). Returns
    /// `Ok(None)` if no valid schedule exists.
    pub fn allocate<R: AsRef<[u8]>>(&self, days: &[R]) -> Result<Option<Schedule>> {
        let days = availability::validate(days)?;
        self.allocate_days(&days)
    }

    /// Compute a schedule from validated availabilities.
    pub fn allocate_days(&self, days: &[DayAvailability]) -> Result<Option<Schedule>> {
        self.band.validate()?;
        if days.is_empty() {
            return Ok(Some(Schedule::default()));
        }

        let (mut g, views) = self.build(days);
        g.solve();

        if !g.is_feasible() {
            debug!(days = days.len(), "no valid schedule");
            return Ok(None);
        }

        let breakfast = views.iter().map(|d| d.breakfast(&g)).collect::<Option<Vec<_>>>();
        let dinner = views.iter().map(|d| d.dinner(&g)).collect::<Option<Vec<_>>>();
        match (breakfast, dinner) {
            (Some(breakfast), Some(dinner)) => {
                debug!(days = days.len(), "found schedule");
                Ok(Some(Schedule { breakfast, dinner }))
            }
            _ => unreachable!("feasible circulation leaves a meal without cook"),
        }
    }

    /// Build the circulation graph for `days`.
    fn build(&self, days: &[DayAvailability]) -> (CirculationGraph<i64>, Vec<Day>) {
        let n = days.len();
        let mut g = CirculationGraph::new(FIRST_DAY + n * VERTICES_PER_DAY);

        // every day supplies two units per agent, two of them are eaten
        let terminal = g.vertex(TERMINAL);
        let leftover = (2 * CANDIDATES - MEALS) * n;
        g.set_demand(terminal, leftover as i64);

        let views: Vec<Day> = days
            .iter()
            .enumerate()
            .map(|(i, day)| Day::new(&mut g, day, FIRST_DAY + i * VERTICES_PER_DAY))
            .collect();

        let aggregators: Vec<_> = (0..CANDIDATES).map(|i| g.vertex(1 + i)).collect();
        for day in &views {
            for (i, &u) in day.housemates().iter().enumerate() {
                g.add_bounded_edge(u, aggregators[i], 1, 2);
            }
            g.add_edge(day.agent(FALLBACK), aggregators[FALLBACK], 2);
        }

        // the unused supply of an agent is 2n minus its meals
        let total = 2 * n as i64;
        let housemate_lower = total - self.band.max_meals(n) as i64;
        let housemate_upper = total - self.band.min_meals(n) as i64;
        for &a in &aggregators[..AGENTS] {
            g.add_bounded_edge(a, terminal, housemate_lower, housemate_upper);
        }
        let fallback_lower = total - self.band.max_fallback(n) as i64;
        g.add_bounded_edge(aggregators[FALLBACK], terminal, fallback_lower, total);

        debug!(
            days = n,
            vertices = g.num_vertices(),
            min_meals = self.band.min_meals(n),
            max_meals = self.band.max_meals(n),
            max_fallback = self.band.max_fallback(n),
            "built allocation graph"
        );

        (g, views)
    }
}

/// Compute a schedule with the default fairness band.
///
/// This is a convenience wrapper around [`Allocator::allocate`].
pub fn allocate<R: AsRef<[u8]>>(days: &[R]) -> Result<Option<Schedule>> {
    Allocator::default().allocate(days)
}
