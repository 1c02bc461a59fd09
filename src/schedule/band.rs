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

//! The fairness band limiting the number of meals per agent.

use crate::error::{Error, Result};
use crate::num::integer::Integer;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// Bounds on the number of meals prepared by each agent.
///
/// All bounds are percentages of the number of days. Over `n` days each
/// housemate prepares between `floor(min_percent * n / 100)` and
/// `ceil(max_percent * n / 100)` meals, the restaurant at most
/// `floor(fallback_percent * n / 100)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct FairnessBand {
    pub min_percent: usize,
    pub max_percent: usize,
    pub fallback_percent: usize,
}

impl Default for FairnessBand {
    fn default() -> Self {
        FairnessBand {
            min_percent: 36,
            max_percent: 44,
            fallback_percent: 10,
        }
    }
}

impl FairnessBand {
    /// Check that the percentages describe a non-empty band.
    pub fn validate(&self) -> Result<()> {
        if self.min_percent > self.max_percent {
            return Err(Error::Band {
                msg: format!(
                    "minimum {}% exceeds maximum {}%",
                    self.min_percent, self.max_percent
                ),
            });
        }
        if self.max_percent > 100 {
            return Err(Error::Band {
                msg: format!("maximum {}% exceeds 100%", self.max_percent),
            });
        }
        if self.fallback_percent > 100 {
            return Err(Error::Band {
                msg: format!("fallback {}% exceeds 100%", self.fallback_percent),
            });
        }
        Ok(())
    }

    /// Minimal number of meals of each housemate over `days` days.
    pub fn min_meals(&self, days: usize) -> usize {
        Integer::div_floor(&(self.min_percent * days), &100)
    }

    /// Maximal number of meals of each housemate over `days` days.
    pub fn max_meals(&self, days: usize) -> usize {
        Integer::div_ceil(&(self.max_percent * days), &100)
    }

    /// Maximal number of meals from the restaurant over `days` days.
    pub fn max_fallback(&self, days: usize) -> usize {
        Integer::div_floor(&(self.fallback_percent * days), &100)
    }
}

#[cfg(test)]
mod tests {
    use super::FairnessBand;

    #[test]
    fn test_default_bounds() {
        let band = FairnessBand::default();
        assert_eq!(band.min_meals(5), 1);
        assert_eq!(band.max_meals(5), 3);
        assert_eq!(band.max_fallback(5), 0);

        assert_eq!(band.min_meals(1), 0);
        assert_eq!(band.max_meals(1), 1);

        // exact arithmetic: 0.44 * 25 = 11 and 0.36 * 25 = 9
        assert_eq!(band.max_meals(25), 11);
        assert_eq!(band.min_meals(25), 9);
        assert_eq!(band.max_fallback(25), 2);

        assert_eq!(band.max_meals(0), 0);
    }

    #[test]
    fn test_validate() {
        assert!(FairnessBand::default().validate().is_ok());
        let band = FairnessBand {
            min_percent: 50,
            max_percent: 40,
            ..FairnessBand::default()
        };
        assert!(band.validate().is_err());
        let band = FairnessBand {
            fallback_percent: 101,
            ..FairnessBand::default()
        };
        assert!(band.validate().is_err());
    }
}
