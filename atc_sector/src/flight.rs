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

use std::fmt;
use serde::{Serialize,Deserialize};
use uom::si::{f64::Velocity, velocity::knot};
use atc_common::{angle::Angle360, geo::GeoPoint3};

#[derive(Debug,Clone,Copy,PartialEq,Eq,Default,Serialize,Deserialize)]
pub enum FlightType {
    Departure,
    Arrival,
    #[default]
    Unknown
}

/// the per-tick view of a flight as provided by the position feed and the flight plan model
#[derive(Debug,Clone)]
pub struct FlightSnapshot {
    pub callsign: String,
    pub position: GeoPoint3,
    pub heading: Angle360,     // true heading/track
    pub ground_speed: Velocity,
    pub flight_type: FlightType,
    pub tracked_by_me: bool,   // the own controller currently tracks (owns) the flight
    pub clearance_issued: bool,

    /// identifier of the controller that already initiated a handoff of this flight (if any)
    pub handoff_initiated_by: Option<String>,
}

impl FlightSnapshot {
    pub fn new (callsign: impl ToString, position: GeoPoint3, heading: Angle360, ground_speed: Velocity, flight_type: FlightType)->Self {
        FlightSnapshot {
            callsign: callsign.to_string(),
            position,
            heading,
            ground_speed,
            flight_type,
            tracked_by_me: false,
            clearance_issued: false,
            handoff_initiated_by: None
        }
    }

    pub fn is_departure (&self)->bool { self.flight_type == FlightType::Departure }
    pub fn is_arrival (&self)->bool { self.flight_type == FlightType::Arrival }

    pub fn ground_speed_knots (&self)->f64 { self.ground_speed.get::<knot>() }

    //--- builder style modifiers, mostly used to create feed updates

    pub fn with_position (mut self, position: GeoPoint3)->Self { self.position = position; self }
    pub fn with_tracked (mut self, tracked_by_me: bool)->Self { self.tracked_by_me = tracked_by_me; self }
    pub fn with_clearance (mut self, clearance_issued: bool)->Self { self.clearance_issued = clearance_issued; self }
    pub fn with_handoff_initiated_by (mut self, id: Option<String>)->Self { self.handoff_initiated_by = id; self }
}

impl fmt::Display for FlightSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "Flight( cs: \"{}\", pos: {}, hdg: {:.0}, spd: {:.0}, {:?}", 
                self.callsign, self.position, self.heading.degrees(), self.ground_speed_knots(), self.flight_type)?;
        if self.tracked_by_me { write!( f, ", tracked")?; }
        if self.clearance_issued { write!( f, ", cleared")?; }
        write!( f, ")")
    }
}
