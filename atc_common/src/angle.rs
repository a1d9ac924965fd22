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

//! angles in degrees that are normalized to the range of their kind (latitude, longitude, heading)

use std::{fmt,marker::PhantomData};
use serde::{Serialize,Deserialize,Serializer,Deserializer};

/// [-90,90] (values beyond the poles are mirrored)
#[inline]
pub fn normalize_90 (d:f64) -> f64 {
    let x = d % 360.0;
    if x < -90.0 { -180.0 - x } else if x > 90.0 { 180.0 - x } else { x }
}

/// [-180,180]
#[inline]
pub fn normalize_180 (d: f64) -> f64 {
    let x = d % 360.0;
    if x < -180.0 { 360.0 + x } else if x > 180.0 { x - 360.0 } else { x }
}

/// [0,360)
#[inline]
pub fn normalize_360 (d: f64) -> f64 {
    let x = d % 360.0;
    if x < 0.0 { 360.0 + x } else { x }
}

pub trait AngleKind {
    const NAME: &'static str;
    fn normalize (deg: f64)->f64;
}

#[derive(Debug,Clone,Copy)]
pub struct LatitudeKind;
impl AngleKind for LatitudeKind {
    const NAME: &'static str = "Latitude";
    fn normalize (deg: f64)->f64 { normalize_90(deg) }
}

#[derive(Debug,Clone,Copy)]
pub struct LongitudeKind;
impl AngleKind for LongitudeKind {
    const NAME: &'static str = "Longitude";
    fn normalize (deg: f64)->f64 { normalize_180(deg) }
}

/// headings and bearings (true north, clockwise)
#[derive(Debug,Clone,Copy)]
pub struct FullCircleKind;
impl AngleKind for FullCircleKind {
    const NAME: &'static str = "Angle360";
    fn normalize (deg: f64)->f64 { normalize_360(deg) }
}

#[derive(Clone,Copy)]
pub struct NormalizedAngle<K: AngleKind> {
    deg: f64,
    _kind: PhantomData<K>,
}

impl<K: AngleKind> NormalizedAngle<K> {
    #[inline]
    pub fn from_degrees (deg: f64)->Self { NormalizedAngle { deg: K::normalize(deg), _kind: PhantomData } }

    #[inline] pub fn degrees (&self)->f64 { self.deg }
    #[inline] pub fn radians (&self)->f64 { self.deg.to_radians() }
}

impl<K: AngleKind> fmt::Debug for NormalizedAngle<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!( f, "{}({})", K::NAME, self.deg) }
}

impl<K: AngleKind> fmt::Display for NormalizedAngle<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!( f, "{}°", self.deg) }
}

// 180 and -180 are the same longitude
impl<K: AngleKind> PartialEq for NormalizedAngle<K> {
    fn eq (&self, other: &Self)->bool { self.deg == other.deg || (self.deg - other.deg).abs() == 360.0 }
}

impl<K: AngleKind> Serialize for NormalizedAngle<K> {
    fn serialize<S: Serializer> (&self, serializer: S)->Result<S::Ok, S::Error> { serializer.serialize_f64( self.deg) }
}

impl<'de,K: AngleKind> Deserialize<'de> for NormalizedAngle<K> {
    fn deserialize<D: Deserializer<'de>> (deserializer: D)->Result<Self, D::Error> {
        Ok( Self::from_degrees( f64::deserialize( deserializer)?) )
    }
}

pub type Latitude = NormalizedAngle<LatitudeKind>;
pub type Longitude = NormalizedAngle<LongitudeKind>;
pub type Angle360 = NormalizedAngle<FullCircleKind>;
