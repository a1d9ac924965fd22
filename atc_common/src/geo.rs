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

//! geodetic primitives used to describe sector borders and aircraft positions.
//! We wrap the [geo](https://docs.rs/geo/latest/geo/index.html) types in new types that add value
//! semantics (degrees, normalized angles) and units of measure via [uom](https://docs.rs/uom/latest/uom/).
//! Great circle computations use the haversine metric space of `geo`, which is precise enough for the
//! short distances we project (seconds of flight time)

use std::fmt;
use serde::{Serialize,Deserialize};
use geo::{BoundingRect, Contains, Coord, Destination, Distance, Haversine, LineString, Point, Polygon, Rect};
use uom::si::{f64::Length, length::{foot,meter}};

use crate::angle::{normalize_180, normalize_90, Angle360, Latitude, Longitude};

pub type GeoCoord = Coord<f64>;

/* #region GeoPoint ***********************************************************************************************/

// the serialized form of a GeoPoint. We accept "lon"|"longitude"|"x" and "lat"|"latitude"|"y" as field names so that
// data serialized by `geo` types can be read directly
#[derive(Debug,Clone,Copy,Serialize,Deserialize)]
struct LonLat {
    #[serde(alias="longitude", alias="x")]
    lon: f64,
    #[serde(alias="latitude", alias="y")]
    lat: f64
}

/// a wrapper for geo::Point that uses geodetic degrees stored as f64
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
#[serde(from="LonLat", into="LonLat")]
pub struct GeoPoint(Point);

impl GeoPoint {
    pub fn from_lon_lat(lon: Longitude, lat: Latitude) -> Self {
        GeoPoint( Point::new( lon.degrees(), lat.degrees()))
    }
    pub fn from_lon_lat_degrees (lon: f64, lat: f64) -> Self {
        GeoPoint( Point::new( normalize_180(lon), normalize_90(lat)))
    }

    pub fn longitude(&self) -> Longitude { Longitude::from_degrees( self.0.x()) }
    pub fn latitude(&self) -> Latitude { Latitude::from_degrees( self.0.y()) }

    #[inline] pub fn longitude_degrees(&self) -> f64 { self.0.x() }
    #[inline] pub fn latitude_degrees(&self) -> f64 { self.0.y() }

    pub fn point (&self) -> &Point { &self.0 }
    pub fn coord (&self)->GeoCoord { self.0.0 }

    /// great circle distance to another point
    pub fn distance_to (&self, other: &GeoPoint) -> Length {
        Length::new::<meter>( Haversine.distance( self.0, other.0))
    }

    /// the point reached when travelling `distance` along the great circle that starts at self with the given
    /// initial (true) bearing
    pub fn destination (&self, bearing: Angle360, distance: Length) -> GeoPoint {
        let d = distance.get::<meter>();
        if d == 0.0 { return *self }

        let p = Haversine.destination( self.0, bearing.degrees(), d);
        GeoPoint::from_lon_lat_degrees( p.x(), p.y())
    }
}

impl From<LonLat> for GeoPoint {
    fn from (ll: LonLat)->Self { GeoPoint::from_lon_lat_degrees( ll.lon, ll.lat) }
}

impl From<GeoPoint> for LonLat {
    fn from (p: GeoPoint)->Self { LonLat { lon: p.0.x(), lat: p.0.y() } }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.0.x(),self.0.y())
    }
}

/* #endregion GeoPoint */

/* #region GeoPoint3 **********************************************************************************************/

/// 3 dimensional point given by longitude, latitude and altitude.
/// We do not interpret the altitude reference (MSL or pressure altitude), it only has to be consistent with the
/// altitude bands it is compared to
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct GeoPoint3 {
    point: GeoPoint,
    alt: Length
}

impl GeoPoint3 {
    pub fn from_geo_point_alt (point: GeoPoint, alt: Length) -> Self {
        GeoPoint3 { point, alt }
    }

    pub fn from_lon_lat_degrees_alt_feet (lon: f64, lat: f64, alt_ft: f64) -> Self {
        GeoPoint3 { point: GeoPoint::from_lon_lat_degrees( lon, lat), alt: Length::new::<foot>(alt_ft) }
    }

    #[inline] pub fn geo_point(&self) -> &GeoPoint { &self.point }
    #[inline] pub fn longitude(&self) -> Longitude { self.point.longitude() }
    #[inline] pub fn latitude(&self) -> Latitude { self.point.latitude() }
    #[inline] pub fn altitude(&self) -> Length { self.alt }

    pub fn altitude_feet(&self) -> f64 { self.alt.get::<foot>() }

    /// project along a great circle, keeping the altitude
    pub fn destination (&self, bearing: Angle360, distance: Length) -> GeoPoint3 {
        GeoPoint3 { point: self.point.destination( bearing, distance), alt: self.alt }
    }
}

impl fmt::Display for GeoPoint3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{},{:.0}ft]", self.point.longitude_degrees(), self.point.latitude_degrees(), self.altitude_feet())
    }
}

/* #endregion GeoPoint3 */

/* #region GeoPolygon *********************************************************************************************/

/// a closed polygon without holes and a precomputed bounding box to speed up containment tests.
/// Polygons with less than 3 edges are kept but never contain anything
#[derive(Debug,Clone)]
pub struct GeoPolygon {
    polygon: Polygon,
    bbox: Option<Rect>,
    n_edges: usize,
}

impl GeoPolygon {
    pub fn from_geo_points (points: &[GeoPoint]) -> Self {
        let coords: Vec<GeoCoord> = points.iter().map(|p| p.coord()).collect();
        let polygon = Polygon::new( LineString::new( coords), Vec::with_capacity(0)); // this closes the exterior
        let bbox = polygon.bounding_rect();
        let n_edges = polygon.exterior().lines().filter(|l| l.start != l.end).count();

        GeoPolygon { polygon, bbox, n_edges }
    }

    /// the (closed) exterior, i.e. the first point is repeated as last point
    pub fn as_geo_points (&self)->Vec<GeoPoint> {
        self.polygon.exterior().points().map( GeoPoint).collect()
    }

    pub fn edge_count (&self)->usize { self.n_edges }

    pub fn is_valid (&self)->bool { self.n_edges >= 3 }

    /// west,south,east,north bounds in degrees
    pub fn bounds (&self)->Option<(f64,f64,f64,f64)> {
        self.bbox.map( |r| (r.min().x, r.min().y, r.max().x, r.max().y))
    }

    pub fn contains (&self, p: &GeoPoint)->bool {
        if !self.is_valid() { return false }

        if let Some(bbox) = &self.bbox {
            let c = p.coord();
            let (min,max) = (bbox.min(), bbox.max());
            if c.x < min.x || c.x > max.x || c.y < min.y || c.y > max.y { return false }
        }

        self.polygon.contains( p.point())
    }
}

impl Serialize for GeoPolygon {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error> where S: serde::Serializer {
        serializer.collect_seq( self.as_geo_points())
    }
}

impl<'de> Deserialize<'de> for GeoPolygon {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error> where D: serde::Deserializer<'de> {
        let points: Vec<GeoPoint> = Vec::deserialize( deserializer)?;
        Ok( GeoPolygon::from_geo_points( &points) )
    }
}

/* #endregion GeoPolygon */
