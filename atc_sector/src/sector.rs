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

//! the static description of controller positions and their areas of responsibility.
//! Sectors are created once from configuration and are immutable afterwards

use std::fmt;
use serde::{Serialize,Deserialize};
use uom::si::{f64::Length, length::foot};
use atc_common::geo::{GeoPoint3,GeoPolygon};

use crate::errors::{Result,AtcSectorError,invalid_sector};

pub const UNICOM_ID: &str = "UNICOM";

/// the kind of a controller position. The variant order is the authority (and roughly altitude) rank
/// of positions and is used directly in comparisons
#[derive(Debug,Clone,Copy,PartialEq,Eq,PartialOrd,Ord,Hash,Serialize,Deserialize)]
pub enum SectorType {
    Atis,
    Delivery,
    Ground,
    Tower,
    Departure,
    Approach,
    Center,
    FlightService,
}

impl SectorType {
    /// map a callsign suffix to the sector type
    pub fn from_suffix (suffix: &str)->Option<SectorType> {
        match suffix {
            "ATIS" => Some(SectorType::Atis),
            "DEL" => Some(SectorType::Delivery),
            "GND" => Some(SectorType::Ground),
            "TWR" => Some(SectorType::Tower),
            "DEP" => Some(SectorType::Departure),
            "APP" => Some(SectorType::Approach),
            "CTR" => Some(SectorType::Center),
            "FSS" => Some(SectorType::FlightService),
            _ => None
        }
    }

    pub fn suffix (&self)->&'static str {
        match self {
            SectorType::Atis => "ATIS",
            SectorType::Delivery => "DEL",
            SectorType::Ground => "GND",
            SectorType::Tower => "TWR",
            SectorType::Departure => "DEP",
            SectorType::Approach => "APP",
            SectorType::Center => "CTR",
            SectorType::FlightService => "FSS",
        }
    }

    /// center level positions are never siblings of facility positions, they are attached above the hierarchy root
    #[inline]
    pub fn is_center_level (&self)->bool {
        matches!( self, SectorType::Center | SectorType::FlightService)
    }
}

impl fmt::Display for SectorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!( f, "{}", self.suffix()) }
}

/* #region SectorBorder *******************************************************************************************/

/// one altitude banded area of a sector, together with the ordered list of positions that take over
/// if the owner is not staffed
#[derive(Debug,Clone)]
pub struct SectorBorder {
    owner: String,
    deputies: Vec<String>,
    lower: Length,
    upper: Length,
    polygon: GeoPolygon,
}

impl SectorBorder {
    pub fn new (owner: impl ToString, deputies: Vec<String>, lower: Length, upper: Length, polygon: GeoPolygon)->Self {
        SectorBorder { owner: owner.to_string(), deputies, lower, upper, polygon }
    }

    pub fn owner (&self)->&str { self.owner.as_str() }
    pub fn deputies (&self)->&[String] { self.deputies.as_slice() }
    pub fn lower_altitude (&self)->Length { self.lower }
    pub fn upper_altitude (&self)->Length { self.upper }
    pub fn polygon (&self)->&GeoPolygon { &self.polygon }

    /// altitude bands are inclusive on both ends
    pub fn contains (&self, pos: &GeoPoint3)->bool {
        let alt = pos.altitude();
        alt >= self.lower && alt <= self.upper && self.polygon.contains( pos.geo_point())
    }
}

/* #endregion SectorBorder */

/* #region ControllerInfo *****************************************************************************************/

/// a logged in controller. Controllers are identified by the position identifier they logged in with,
/// their frequency, or (if they reconnect under a different identifier) their display name
#[derive(Debug,Clone,PartialEq,Eq,Default,Serialize,Deserialize)]
pub struct ControllerInfo {
    pub identifier: String,
    pub prefix: String,
    #[serde(default)]
    pub midfix: String,
    pub suffix: String,
    pub frequency: String,
    #[serde(default)]
    pub name: String,
}

impl ControllerInfo {
    pub fn new (identifier: impl ToString, prefix: impl ToString, midfix: impl ToString, suffix: impl ToString,
                frequency: impl ToString, name: impl ToString)->Self {
        ControllerInfo {
            identifier: identifier.to_string(),
            prefix: prefix.to_string(),
            midfix: midfix.to_string(),
            suffix: suffix.to_string(),
            frequency: frequency.to_string(),
            name: name.to_string(),
        }
    }

    /// the radio callsign, e.g. "EDDB_N_TWR" (empty parts are skipped)
    pub fn callsign (&self)->String {
        [self.prefix.as_str(), self.midfix.as_str(), self.suffix.as_str()].iter()
            .filter( |s| !s.is_empty())
            .copied()
            .collect::<Vec<&str>>()
            .join("_")
    }

    pub fn is_unicom (&self)->bool { self.identifier == UNICOM_ID }
}

impl fmt::Display for ControllerInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!( f, "{} ({} {})", self.identifier, self.callsign(), self.frequency)
        } else {
            write!( f, "{} ({} {}, {})", self.identifier, self.callsign(), self.frequency, self.name)
        }
    }
}

/* #endregion ControllerInfo */

/* #region Sector *************************************************************************************************/

#[derive(Debug,Clone)]
pub struct Sector {
    identifier: String,
    sector_type: SectorType,
    prefix: String,
    midfix: String,
    suffix: String,
    frequency: String,
    borders: Vec<SectorBorder>, // sorted ascending by upper altitude
}

impl Sector {
    /// create a new sector. This fails if the callsign suffix does not denote a known [`SectorType`]
    pub fn new (identifier: impl ToString, prefix: impl ToString, midfix: impl ToString, suffix: impl ToString,
                frequency: impl ToString, mut borders: Vec<SectorBorder>)->Result<Self> {
        let identifier = identifier.to_string();
        let suffix = suffix.to_string();

        if identifier.is_empty() || identifier == UNICOM_ID {
            return Err( invalid_sector!("reserved or empty identifier '{}'", identifier))
        }
        let sector_type = SectorType::from_suffix( &suffix)
            .ok_or_else( || invalid_sector!("{}: unknown callsign suffix '{}'", identifier, suffix))?;

        borders.sort_by( |a,b| a.upper.get::<foot>().total_cmp( &b.upper.get::<foot>()));

        Ok( Sector {
            identifier,
            sector_type,
            prefix: prefix.to_string(),
            midfix: midfix.to_string(),
            suffix,
            frequency: frequency.to_string(),
            borders
        })
    }

    /// the synthetic fallback position that is used if nobody else is responsible. It has no borders
    pub(crate) fn unicom (frequency: &str)->Self {
        Sector {
            identifier: UNICOM_ID.to_string(),
            sector_type: SectorType::FlightService,
            prefix: String::new(),
            midfix: String::new(),
            suffix: String::new(),
            frequency: frequency.to_string(),
            borders: Vec::new()
        }
    }

    pub fn identifier (&self)->&str { self.identifier.as_str() }
    pub fn sector_type (&self)->SectorType { self.sector_type }
    pub fn prefix (&self)->&str { self.prefix.as_str() }
    pub fn midfix (&self)->&str { self.midfix.as_str() }
    pub fn suffix (&self)->&str { self.suffix.as_str() }
    pub fn frequency (&self)->&str { self.frequency.as_str() }
    pub fn borders (&self)->&[SectorBorder] { self.borders.as_slice() }

    pub fn is_unicom (&self)->bool { self.identifier == UNICOM_ID }

    /// the highest upper altitude of all borders (zero if there are none)
    pub fn highest_altitude (&self)->Length {
        self.borders.last().map( |b| b.upper).unwrap_or( Length::new::<foot>(0.0))
    }

    pub fn highest_altitude_feet (&self)->f64 { self.highest_altitude().get::<foot>() }

    /// the deputies of the first (lowest) border. This is the fallback chain we use if the sector is not staffed
    pub fn deputies (&self)->&[String] {
        self.borders.first().map( |b| b.deputies()).unwrap_or( &[])
    }

    /// deputies of all borders in border order, without duplicates
    pub fn all_deputies (&self)->Vec<&str> {
        let mut list: Vec<&str> = Vec::new();
        for b in &self.borders {
            for d in b.deputies() {
                if !list.contains( &d.as_str()) { list.push( d.as_str()) }
            }
        }
        list
    }

    pub fn contains (&self, pos: &GeoPoint3)->bool {
        self.borders.iter().any( |b| b.contains( pos))
    }

    /// the ControllerInfo of the position itself (not of a logged in controller)
    pub fn controller_info (&self)->ControllerInfo {
        ControllerInfo::new( &self.identifier, &self.prefix, &self.midfix, &self.suffix, &self.frequency, "")
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "{} [{} {}, {} borders, max {:.0}ft]", self.identifier, self.sector_type, self.frequency,
                self.borders.len(), self.highest_altitude_feet())
    }
}

/* #endregion Sector */
