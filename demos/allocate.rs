/*
 * Copyright (c) 2015-2022 Frank Fischer <frank-fischer@shadow-soft.de>
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

use time::OffsetDateTime;

use rustop::opts;
use tracing_subscriber::{fmt, EnvFilter};

use rs_circulation::availability;
use rs_circulation::{Allocator, FairnessBand};

use std::process::exit;

const AGENT_NAMES: [&str; 6] = ["A", "B", "C", "D", "E", "R"];

fn main() {
    let (args, _) = opts! {
        synopsis "Allocate meals fairly among five housemates.";
        opt min:usize=36, desc:"Minimal share of meals per housemate in percent.";
        opt max:usize=44, desc:"Maximal share of meals per housemate in percent.";
        opt fallback:usize=10, desc:"Maximal share of restaurant meals in percent.";
        param file:String, desc:"Availability file name";
    }
    .parse_or_exit();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_target(false).init();

    let tstart = OffsetDateTime::now_utc();
    let days = match availability::read_from_file(&args.file) {
        Ok(days) => days,
        Err(e) => {
            eprintln!("{}: {}", args.file, e);
            exit(1);
        }
    };
    println!("  number of days: {}", days.len());

    let allocator = Allocator::new(FairnessBand {
        min_percent: args.min,
        max_percent: args.max,
        fallback_percent: args.fallback,
    });
    let result = allocator.allocate_days(&days);
    let tend = OffsetDateTime::now_utc();
    println!("Time: {}", (tend - tstart).as_seconds_f64());

    match result {
        Ok(Some(schedule)) => {
            for (d, (&b, &m)) in schedule.breakfast.iter().zip(&schedule.dinner).enumerate() {
                println!("day {:4}: breakfast {} dinner {}", d + 1, AGENT_NAMES[b], AGENT_NAMES[m]);
            }
            let counts = schedule.meal_counts();
            for (name, c) in AGENT_NAMES.iter().zip(counts.iter()) {
                println!("  {}: {} meals", name, c);
            }
        }
        Ok(None) => println!("no solution"),
        Err(e) => {
            eprintln!("{}", e);
            exit(1);
        }
    }
}
