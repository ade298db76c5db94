/*
 * Copyright © 2026, United States Government, as represented by the Administrator of 
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

//! attribute and geometry predicates over catalog segments

use std::fmt;
use geo::{Geometry, Intersects, MultiPolygon, Point, Polygon};

use crate::catalog::Catalog;
use crate::segment::AcquisitionSegment;
use crate::errors::{OdinS1Error, Result, input_error};

/// the spatial operand of a query. Intersection with segment footprints is boundary inclusive, i.e.
/// a footprint that only touches the shape counts as intersecting
#[derive(Debug,Clone,PartialEq)]
pub enum QueryShape {
    Point(Point<f64>),
    Polygon(Polygon<f64>),
    MultiPolygon(MultiPolygon<f64>),
}

impl QueryShape {
    /// validated geographic point (degrees)
    pub fn from_lon_lat (lon: f64, lat: f64) -> Result<Self> {
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err( input_error!("longitude out of range: {}", lon))
        }
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err( input_error!("latitude out of range: {}", lat))
        }
        Ok( QueryShape::Point( Point::new(lon,lat)))
    }

    pub fn intersects_footprint (&self, footprint: &Polygon<f64>) -> bool {
        match self {
            QueryShape::Point(p) => footprint.intersects(p),
            QueryShape::Polygon(poly) => footprint.intersects(poly),
            QueryShape::MultiPolygon(mp) => footprint.intersects(mp),
        }
    }
}

impl TryFrom<Geometry<f64>> for QueryShape {
    type Error = OdinS1Error;

    fn try_from (geom: Geometry<f64>) -> Result<Self> {
        match geom {
            Geometry::Point(p) => Ok( QueryShape::Point(p)),
            Geometry::Polygon(poly) => Ok( QueryShape::Polygon(poly)),
            Geometry::MultiPolygon(mp) => Ok( QueryShape::MultiPolygon(mp)),
            other => Err( input_error!("unsupported query geometry {:?}", other))
        }
    }
}

impl fmt::Display for QueryShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryShape::Point(p) => write!(f, "point({},{})", p.x(), p.y()),
            QueryShape::Polygon(poly) => write!(f, "polygon({} vertices)", poly.exterior().0.len()),
            QueryShape::MultiPolygon(mp) => write!(f, "multipolygon({} parts)", mp.0.len()),
        }
    }
}

/// conjunction of optional attribute equality tests and an optional spatial test.
/// An empty filter matches every segment
#[derive(Debug,Clone,Default,PartialEq)]
pub struct SegmentFilter {
    pub mode: Option<String>,
    pub orbit_relative: Option<u16>,
    pub intersecting: Option<QueryShape>,
}

impl SegmentFilter {
    pub fn new () -> Self { SegmentFilter::default() }

    pub fn with_mode (mut self, mode: impl ToString) -> Self {
        self.mode = Some( mode.to_string());
        self
    }

    /// set the mode test only if there is a non-empty mode
    pub fn with_optional_mode (mut self, mode: Option<&str>) -> Self {
        self.mode = mode.filter( |m| !m.is_empty()).map( |m| m.to_string());
        self
    }

    pub fn with_orbit_relative (mut self, orbit_relative: u16) -> Self {
        self.orbit_relative = Some(orbit_relative);
        self
    }

    pub fn intersecting (mut self, shape: QueryShape) -> Self {
        self.intersecting = Some(shape);
        self
    }

    /// the same filter without the spatial test (used to compute fallback bounds)
    pub fn attributes_only (&self) -> SegmentFilter {
        SegmentFilter { mode: self.mode.clone(), orbit_relative: self.orbit_relative, intersecting: None }
    }

    pub fn matches_attributes (&self, s: &AcquisitionSegment) -> bool {
        self.mode.as_ref().is_none_or( |m| *m == s.mode)
            && self.orbit_relative.is_none_or( |o| o == s.orbit_relative)
    }

    pub fn matches (&self, s: &AcquisitionSegment) -> bool {
        self.matches_attributes(s) 
            && self.intersecting.as_ref().is_none_or( |shape| shape.intersects_footprint( &s.footprint))
    }

    /// the matching subsequence of `segments`, in input order
    pub fn apply<'a> (&'a self, segments: &'a [AcquisitionSegment]) -> impl Iterator<Item=&'a AcquisitionSegment> + 'a {
        segments.iter().filter( move |s| self.matches(s))
    }
}

/// matching catalog segments in catalog order
pub fn filter<'a> (catalog: &'a Catalog, predicate: &SegmentFilter) -> Vec<&'a AcquisitionSegment> {
    catalog.iter().filter( |s| predicate.matches(s)).collect()
}
