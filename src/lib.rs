// Copyright (c) 2015-2022 Frank Fischer <frank-fischer@shadow-soft.de>
//
// This program is free software: you can redistribute it and/or
// modify it under the terms of the GNU General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see  <http://www.gnu.org/licenses/>
//

#![forbid(unsafe_code)]

//! Circulations with demands and lower bounds, and a fair meal allocator
//! built on top of them.
//!
//! The [`circulation`] module solves feasibility of circulations by
//! reducing lower bounds and demands to a max flow problem, which is then
//! solved in place by the algorithm of Edmonds-Karp (see [`maxflow`]).
//! The [`schedule`] module uses a circulation to distribute meals among
//! five housemates and a restaurant.

mod num {
    pub use num_integer as integer;
    pub use num_traits as traits;
}

// # Data structures

pub mod traits;
pub use self::traits::{FlowValue, ResidualNetwork};

pub mod network;
pub use self::network::{EdgeId, Network, VertexId};

pub mod error;
pub use self::error::{Error, Result};

// # Algorithms

pub mod circulation;
pub use self::circulation::CirculationGraph;

pub mod maxflow;

// # Meal allocation

pub mod availability;
pub use self::availability::{Availability, DayAvailability};

pub mod schedule;
pub use self::schedule::{allocate, Allocator, FairnessBand, Schedule};
