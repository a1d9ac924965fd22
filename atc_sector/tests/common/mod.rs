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

//! shared fixtures for atc_sector tests

use atc_common::{angle::Angle360, geo::{GeoPoint,GeoPoint3,GeoPolygon}, uom::{feet,knots}};
use atc_sector::{
    config::HandoffConfig,
    ControllerInfo, FlightSnapshot, FlightType, Sector, SectorBorder, SectorControl
};

/// a rectangular border given by its west,south,east,north bounds in degrees and the altitude band in feet
pub fn box_border (owner: &str, deputies: &[&str], lower_ft: f64, upper_ft: f64, w: f64, s: f64, e: f64, n: f64)->SectorBorder {
    let pts = [
        GeoPoint::from_lon_lat_degrees( w, s),
        GeoPoint::from_lon_lat_degrees( e, s),
        GeoPoint::from_lon_lat_degrees( e, n),
        GeoPoint::from_lon_lat_degrees( w, n),
    ];
    SectorBorder::new( owner, deputies.iter().map(|d| d.to_string()).collect(), feet(lower_ft), feet(upper_ft), GeoPolygon::from_geo_points( &pts))
}

/// sector identifiers are always PREFIX_SUFFIX or PREFIX_MIDFIX_SUFFIX
pub fn sector (prefix: &str, midfix: &str, suffix: &str, frequency: &str, borders: Vec<SectorBorder>)->Sector {
    let id = if midfix.is_empty() { format!("{prefix}_{suffix}") } else { format!("{prefix}_{midfix}_{suffix}") };
    Sector::new( id, prefix, midfix, suffix, frequency, borders).unwrap()
}

/// the same set as configs/sectors_eddb.ron
pub fn eddb_sectors ()->Vec<Sector> {
    vec![
        sector( "EDWW", "", "CTR", "134.125", vec![ box_border( "EDWW_CTR", &[], 0.0, 24500.0, 11.0, 51.0, 15.5, 54.0) ]),
        sector( "EDDB", "", "APP", "119.625", vec![ box_border( "EDDB_APP", &["EDWW_CTR"], 0.0, 9000.0, 12.9, 52.0, 14.1, 52.7) ]),
        sector( "EDDB", "", "TWR", "120.025", vec![ box_border( "EDDB_TWR", &["EDDB_APP"], 0.0, 3000.0, 13.40, 52.32, 13.62, 52.40) ]),
        sector( "EDDB", "", "GND", "121.600", vec![ box_border( "EDDB_GND", &["EDDB_TWR"], 0.0, 500.0, 13.47, 52.35, 13.55, 52.38) ]),
        sector( "EDDB", "", "DEL", "121.125", vec![ box_border( "EDDB_DEL", &["EDDB_GND"], 0.0, 500.0, 13.49, 52.36, 13.53, 52.375) ]),
        sector( "EDDT", "", "TWR", "118.700", vec![ box_border( "EDDT_TWR", &["EDDB_APP"], 0.0, 2500.0, 13.22, 52.53, 13.36, 52.59) ]),
    ]
}

/// a controller logged into the position with the given identifier (PREFIX_SUFFIX)
pub fn controller (identifier: &str, frequency: &str, name: &str)->ControllerInfo {
    let (prefix, suffix) = identifier.split_once('_').unwrap_or( (identifier, ""));
    ControllerInfo::new( identifier, prefix, "", suffix, frequency, name)
}

pub fn flight (callsign: &str, lon: f64, lat: f64, alt_ft: f64, hdg: f64, spd_kn: f64, flight_type: FlightType)->FlightSnapshot {
    FlightSnapshot::new( callsign, GeoPoint3::from_lon_lat_degrees_alt_feet( lon, lat, alt_ft), Angle360::from_degrees(hdg), knots(spd_kn), flight_type)
}

/// a departure inside EDDB_TWR (east of the airfield) that leaves the tower sector eastbound within the next 20s
pub fn leaving_departure (callsign: &str)->FlightSnapshot {
    flight( callsign, 13.60, 52.36, 1500.0, 90.0, 160.0, FlightType::Departure).with_tracked( true)
}

/// an EDDB engine with the own controller at EDDB_TWR
pub fn eddb_tower_control ()->SectorControl {
    let mut sc = SectorControl::new( "EDDB", &eddb_sectors(), HandoffConfig::default());
    sc.set_own_sector( &controller( "EDDB_TWR", "120.025", "Tom Tower"));
    sc
}
