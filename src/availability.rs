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

//! Daily availability of the housemates.
//!
//! This module also implements reading and writing availability files. A
//! file must look as follows.
//!
//! 1. empty lines are allowed and ignored
//! 2. a line starting with `c` is a comment line and is ignored
//! 3. the first non-comment line must have the form `p meals <n>`,
//!    where `<n>` is the number of days
//! 4. after the problem line there must follow exactly `n` day lines
//!    `d <a0> <a1> <a2> <a3> <a4>` with one availability code in `0..=3`
//!    for each housemate.

use crate::error::{Error, Result};
use crate::schedule::AGENTS;

use std::convert::TryFrom;
use std::fmt;
use std::fs;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::Path;
use std::str::{FromStr, SplitWhitespace};

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// The meals a housemate can prepare on a single day.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Availability {
    Unavailable = 0,
    BreakfastOnly = 1,
    DinnerOnly = 2,
    Either = 3,
}

impl Availability {
    pub fn allows_breakfast(self) -> bool {
        matches!(self, Availability::BreakfastOnly | Availability::Either)
    }

    pub fn allows_dinner(self) -> bool {
        matches!(self, Availability::DinnerOnly | Availability::Either)
    }

    /// Return the numeric code of this availability.
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Availability {
    type Error = u8;

    fn try_from(code: u8) -> std::result::Result<Self, u8> {
        match code {
            0 => Ok(Availability::Unavailable),
            1 => Ok(Availability::BreakfastOnly),
            2 => Ok(Availability::DinnerOnly),
            3 => Ok(Availability::Either),
            _ => Err(code),
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter) -> std::result::Result<(), fmt::Error> {
        write!(f, "{}", self.code())
    }
}

/// The availability of all housemates on one day.
pub type DayAvailability = [Availability; AGENTS];

/// Convert raw availability codes into [`DayAvailability`]s.
///
/// Every day must contain exactly one code in `0..=3` per housemate.
pub fn validate<R: AsRef<[u8]>>(days: &[R]) -> Result<Vec<DayAvailability>> {
    days.iter()
        .enumerate()
        .map(|(day, codes)| {
            let codes = codes.as_ref();
            if codes.len() != AGENTS {
                return Err(Error::DayLength { day, len: codes.len() });
            }
            let mut result = [Availability::Unavailable; AGENTS];
            for (agent, &value) in codes.iter().enumerate() {
                result[agent] = Availability::try_from(value).map_err(|value| Error::Availability { day, agent, value })?;
            }
            Ok(result)
        })
        .collect()
}

/// Iterates over the tokens in a line.
struct Tokens<'a> {
    it: SplitWhitespace<'a>,
    line: usize,
}

impl<'a> Tokens<'a> {
    fn expect(&mut self, tok: &str) -> Result<()> {
        let nxt = self.str()?;
        if nxt == tok {
            Ok(())
        } else {
            Err(Error::Format {
                line: self.line,
                msg: format!("expected '{}', got '{}'", tok, nxt),
            })
        }
    }

    fn str(&mut self) -> Result<&'a str> {
        self.it.next().ok_or_else(|| Error::Format {
            line: self.line,
            msg: "expected token".to_string(),
        })
    }

    fn number<T>(&mut self) -> Result<T>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let line = self.line;
        self.str()?.parse().map_err(|e| Error::Format {
            line,
            msg: format!("{}", e),
        })
    }

    fn end(&mut self) -> Result<()> {
        if let Some(s) = self.it.next() {
            Err(Error::Format {
                line: self.line,
                msg: format!("unexpected token at end of line: {}", s),
            })
        } else {
            Ok(())
        }
    }
}

struct Reader<R: Read> {
    io: BufReader<R>,
    line: String,
    line_number: usize,
}

impl<R: Read> Reader<R> {
    fn new(reader: R) -> Self {
        Reader {
            io: BufReader::new(reader),
            line: String::new(),
            line_number: 0,
        }
    }

    // Return the tokens of the next non-comment line.
    fn read_line(&mut self) -> Result<Option<Tokens>> {
        loop {
            self.line.clear();
            if self.io.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            self.line_number += 1;
            match self.line.trim_start().chars().next() {
                None | Some('c') => continue,
                Some(_) => {
                    return Ok(Some(Tokens {
                        it: self.line.split_whitespace(),
                        line: self.line_number,
                    }))
                }
            }
        }
    }

    // Expect a line with the given descriptor and return the *remaining*
    // tokens.
    fn expect_line(&mut self, descriptor: &str) -> Result<Tokens> {
        let line_number = self.line_number;
        let mut toks = self.read_line()?.ok_or_else(|| Error::Format {
            line: line_number,
            msg: format!("unexpected end of file, expected '{}' line", descriptor),
        })?;
        let d = toks.str()?;
        if d == descriptor {
            Ok(toks)
        } else {
            Err(Error::Format {
                line: toks.line,
                msg: format!("unexpected line, expected '{}', got '{}'", descriptor, d),
            })
        }
    }
}

/// Read availability data from a reader.
pub fn read<R: Read>(r: R) -> Result<Vec<DayAvailability>> {
    let mut reader = Reader::new(r);

    let mut pline = reader.expect_line("p")?;
    pline.expect("meals")?;
    let ndays: usize = pline.number()?;
    pline.end()?;

    let mut days = Vec::with_capacity(ndays);
    for _ in 0..ndays {
        let mut dline = reader.expect_line("d")?;
        let mut day = [Availability::Unavailable; AGENTS];
        for (agent, a) in day.iter_mut().enumerate() {
            let code: u8 = dline.number()?;
            *a = Availability::try_from(code).map_err(|code| Error::Data {
                line: dline.line,
                msg: format!("invalid availability {} for agent {} (must be in 0..=3)", code, agent),
            })?;
        }
        dline.end()?;
        days.push(day);
    }

    if let Some(toks) = reader.read_line()? {
        return Err(Error::Format {
            line: toks.line,
            msg: format!("unexpected line after {} days", ndays),
        });
    }

    Ok(days)
}

/// Read availability data from a file.
pub fn read_from_file<P: AsRef<Path>>(filename: P) -> Result<Vec<DayAvailability>> {
    read(fs::File::open(filename)?)
}

/// Write availability data.
pub fn write<W: Write>(mut w: W, days: &[DayAvailability]) -> io::Result<()> {
    writeln!(w, "p meals {}", days.len())?;
    for day in days {
        write!(w, "d")?;
        for a in day {
            write!(w, " {}", a)?;
        }
        writeln!(w)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::Availability::*;
    use super::{read, validate, write};
    use crate::error::Error;
    use std::io::Cursor;

    #[test]
    fn test_flags() {
        assert!(!Unavailable.allows_breakfast() && !Unavailable.allows_dinner());
        assert!(BreakfastOnly.allows_breakfast() && !BreakfastOnly.allows_dinner());
        assert!(!DinnerOnly.allows_breakfast() && DinnerOnly.allows_dinner());
        assert!(Either.allows_breakfast() && Either.allows_dinner());
    }

    #[test]
    fn test_validate() {
        let days = validate(&[[0u8, 1, 2, 3, 3], [3, 3, 3, 3, 0]]).unwrap();
        assert_eq!(days[0], [Unavailable, BreakfastOnly, DinnerOnly, Either, Either]);
        assert_eq!(days[1][4], Unavailable);

        match validate(&[vec![0u8, 1, 2, 3, 3], vec![3, 3]]) {
            Err(Error::DayLength { day: 1, len: 2 }) => (),
            r => panic!("unexpected result: {:?}", r),
        }

        match validate(&[[0u8, 1, 2, 4, 3]]) {
            Err(Error::Availability {
                day: 0,
                agent: 3,
                value: 4,
            }) => (),
            r => panic!("unexpected result: {:?}", r),
        }
    }

    #[test]
    fn parse_file_test() {
        let file = "c availability of five housemates

p meals 3
d 3 3 3 0 1
c there might be empty lines

d 2 2 1 1 0
d 0 0 0 0 0
";
        let days = read(Cursor::new(file)).unwrap();
        assert_eq!(days.len(), 3);
        assert_eq!(days[0], [Either, Either, Either, Unavailable, BreakfastOnly]);
        assert_eq!(days[1], [DinnerOnly, DinnerOnly, BreakfastOnly, BreakfastOnly, Unavailable]);
        assert_eq!(days[2], [Unavailable; 5]);

        let mut buf = Cursor::new(Vec::new());
        write(&mut buf, &days).unwrap();
        assert_eq!(
            String::from_utf8(buf.into_inner()).unwrap(),
            "p meals 3
d 3 3 3 0 1
d 2 2 1 1 0
d 0 0 0 0 0
"
        );
    }

    #[test]
    fn parse_errors() {
        match read(Cursor::new("p meals 1\nd 3 3 7 3 3\n")) {
            Err(Error::Data { line: 2, .. }) => (),
            r => panic!("unexpected result: {:?}", r),
        }
        match read(Cursor::new("p meals 2\nd 3 3 3 3 3\n")) {
            Err(Error::Format { line: 2, .. }) => (),
            r => panic!("unexpected result: {:?}", r),
        }
        match read(Cursor::new("p meals 1\nd 3 3 3 3\n")) {
            Err(Error::Format { line: 2, .. }) => (),
            r => panic!("unexpected result: {:?}", r),
        }
        match read(Cursor::new("p max 1\n")) {
            Err(Error::Format { line: 1, .. }) => (),
            r => panic!("unexpected result: {:?}", r),
        }
        match read(Cursor::new("p meals 0\nd 3 3 3 3 3\n")) {
            Err(Error::Format { line: 2, .. }) => (),
            r => panic!("unexpected result: {:?}", r),
        }
    }
}
