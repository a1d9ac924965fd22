/*
 * Copyright © 2025, United States Government, as represented by the Administrator of 
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License"); 
 * you may not use this file except in compliance with the License. You may obtain a copy 
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */
#![allow(unused)]

//! tool to show the sector hierarchy of an airport that is built from a RON sector set, and to check
//! which sector covers a given position

use anyhow::{Result,anyhow};

use atc_common::{define_cli,check_cli,init_tracing,angle::Angle360,geo::GeoPoint3,uom::knots};
use atc_sector::{
    config::{load_handoff_config,HandoffConfig,SectorSet},
    hierarchy::SectorGraph,
    FlightSnapshot,FlightType
};

define_cli! { ARGS [about="show the sector hierarchy of an airport"] =
    airport: Option<String> [help="ICAO id of airport (default is the airport of the sector set)", short, long],
    config: Option<String> [help="pathname of handoff config", short, long],
    position: Option<String> [help="position to resolve as 'lon,lat,alt_ft'", short, long],
    departure: bool [help="resolve position for a departure (delivery sectors only cover departures)", short, long],
    sectors: String [help="pathname of RON sector set"]
}

fn parse_position (spec: &str)->Result<GeoPoint3> {
    let vs: Vec<f64> = spec.split(',').map( |s| s.trim().parse::<f64>()).collect::<std::result::Result<_,_>>()?;
    if vs.len() != 3 { return Err( anyhow!("position has to be 'lon,lat,alt_ft', got '{}'", spec)) }
    Ok( GeoPoint3::from_lon_lat_degrees_alt_feet( vs[0], vs[1], vs[2]) )
}

fn main()->Result<()> {
    check_cli!(ARGS);
    init_tracing();

    let config: HandoffConfig = match &ARGS.config {
        Some(path) => load_handoff_config( path)?,
        None => HandoffConfig::default()
    };
    let sector_set = SectorSet::load( &ARGS.sectors)?;
    let sectors = sector_set.to_sectors()?;
    let airport = ARGS.airport.as_deref().unwrap_or( &sector_set.airport);

    let graph = SectorGraph::build( airport, &sectors, &config, 1);
    println!("{}", graph);

    if let Some(spec) = &ARGS.position {
        let pos = parse_position( spec)?;
        let flight_type = if ARGS.departure { FlightType::Departure } else { FlightType::Unknown };
        let flight = FlightSnapshot::new( "PROBE", pos, Angle360::from_degrees(0.0), knots(0.0), flight_type);

        match graph.find_lowest_sector_from_roots( &flight, &pos, false).and_then( |id| graph.node(id)) {
            Some(node) => println!("{} is in {}", pos, node.sector()),
            None => println!("{} is not covered by any sector of {}", pos, airport)
        }
    }

    Ok(())
}
