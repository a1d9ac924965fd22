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

use std::{collections::HashSet,path::Path,time::Duration};
use serde::{Serialize,Deserialize};
use uom::si::f64::{Length,Velocity};
use atc_common::{
    config::load_config_path,
    datetime::{deserialize_duration, serialize_duration},
    geo::{GeoPoint,GeoPolygon},
    uom::{knots, de_length_from_feet, ser_length_as_feet, de_velocity_from_knots, ser_velocity_as_knots}
};

use crate::{errors::{op_failed,Result}, sector::{Sector,SectorBorder}};

/// tuning parameters of hierarchy construction and handoff prediction. The defaults are empirical values
#[derive(Debug,Clone,Serialize,Deserialize)]
#[serde(default)]
pub struct HandoffConfig {
    /// max relative difference of the highest upper altitudes of two approach sectors that are merged into one
    /// sibling group. Larger differences denote distinct feeder/pickup positions
    pub sibling_altitude_tolerance: f64,

    /// below this ground speed we use the slow prediction horizon
    #[serde(serialize_with="ser_velocity_as_knots", deserialize_with="de_velocity_from_knots")]
    pub slow_speed_threshold: Velocity,

    #[serde(serialize_with="serialize_duration", deserialize_with="deserialize_duration")]
    pub slow_prediction_horizon: Duration,

    /// the minimum speed we assume for slow (taxiing or holding) flights
    #[serde(serialize_with="ser_velocity_as_knots", deserialize_with="de_velocity_from_knots")]
    pub slow_min_speed: Velocity,

    /// how far ahead we project the flight to detect it is leaving the own sector
    #[serde(serialize_with="serialize_duration", deserialize_with="deserialize_duration")]
    pub prediction_horizon: Duration,

    pub unicom_frequency: String,
}

impl Default for HandoffConfig {
    fn default()->Self {
        HandoffConfig {
            sibling_altitude_tolerance: 0.1,
            slow_speed_threshold: knots(40.0),
            slow_prediction_horizon: Duration::from_secs(10),
            slow_min_speed: knots(20.0),
            prediction_horizon: Duration::from_secs(20),
            unicom_frequency: "122.800".to_string(),
        }
    }
}

/* #region sector set *********************************************************************************************/

/// serialized form of a [`SectorBorder`] as it is produced by sector file parsers
#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct BorderSpec {
    pub owner: String,
    #[serde(default)]
    pub deputies: Vec<String>,
    #[serde(serialize_with="ser_length_as_feet", deserialize_with="de_length_from_feet")]
    pub lower: Length,
    #[serde(serialize_with="ser_length_as_feet", deserialize_with="de_length_from_feet")]
    pub upper: Length,
    pub polygon: Vec<GeoPoint>,
}

/// serialized form of a [`Sector`]
#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct SectorSpec {
    pub identifier: String,
    pub prefix: String,
    #[serde(default)]
    pub midfix: String,
    pub suffix: String,
    pub frequency: String,
    #[serde(default)]
    pub borders: Vec<BorderSpec>,
}

impl TryFrom<&SectorSpec> for Sector {
    type Error = crate::errors::AtcSectorError;

    fn try_from (spec: &SectorSpec)->Result<Sector> {
        let borders: Vec<SectorBorder> = spec.borders.iter().map( |b| {
            SectorBorder::new( &b.owner, b.deputies.clone(), b.lower, b.upper, GeoPolygon::from_geo_points( &b.polygon))
        }).collect();

        Sector::new( &spec.identifier, &spec.prefix, &spec.midfix, &spec.suffix, &spec.frequency, borders)
    }
}

/// the sector definitions of a facility (and its neighbours), plus the airport we build the hierarchy for
#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct SectorSet {
    pub airport: String,
    pub sectors: Vec<SectorSpec>,
}

impl SectorSet {
    pub fn load<P: AsRef<Path>> (path: P)->Result<SectorSet> {
        Ok( load_config_path( path)? )
    }

    /// convert all specs into validated sectors. Invalid specs or duplicated identifiers reject the whole set
    pub fn to_sectors (&self)->Result<Vec<Sector>> {
        let mut ids: HashSet<&str> = HashSet::new();
        if let Some(dup) = self.sectors.iter().find( |s| !ids.insert( s.identifier.as_str())) {
            return Err( op_failed( format!("duplicated sector identifier {}", dup.identifier)))
        }
        self.sectors.iter().map( Sector::try_from).collect()
    }
}

pub fn load_handoff_config<P: AsRef<Path>> (path: P)->Result<HandoffConfig> {
    Ok( load_config_path( path)? )
}

/* #endregion sector set */
