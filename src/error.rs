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

//! Errors reported for invalid input.
//!
//! An instance without a valid schedule is *not* an error, the allocator
//! returns `Ok(None)` in this case.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// An availability code outside of `0..=3`.
    #[error("invalid availability {value} for agent {agent} on day {day} (must be in 0..=3)")]
    Availability { day: usize, agent: usize, value: u8 },

    /// A day without an entry for each of the five agents.
    #[error("day {day} has {len} availability entries, expected 5")]
    DayLength { day: usize, len: usize },

    /// Inconsistent fairness percentages.
    #[error("invalid fairness band: {msg}")]
    Band { msg: String },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("Format error on line {line}: {msg}")]
    Format { line: usize, msg: String },

    #[error("Data error on line {line}: {msg}")]
    Data { line: usize, msg: String },
}

pub type Result<T> = std::result::Result<T, Error>;
