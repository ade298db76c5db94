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

//! the catalog of planned acquisition segments and its GeoJSON representation.
//!
//! A catalog is an immutable snapshot. It is created once by the `CatalogBuilder`, persisted as a
//! GeoJSON FeatureCollection (one feature per segment) and superseded wholesale by the next build

use std::{collections::HashSet, slice};
use chrono::{DateTime,Utc};
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, JsonValue, Value};

use odin_common::datetime::{parse_iso8601_utc, iso8601_millis_string};
use crate::segment::AcquisitionSegment;
use crate::errors::{Result, parse_error};

pub const BEGIN_DATE: &str = "begin_date";
pub const END_DATE: &str = "end_date";
pub const MODE: &str = "mode";
pub const ORBIT_ABSOLUTE: &str = "orbit_absolute";
pub const ORBIT_RELATIVE: &str = "orbit_relative";

/// ordered sequence of AcquisitionSegments.
/// Segments are always sorted by ascending begin_date, segments with the same begin_date by 
/// ascending orbit_absolute
#[derive(Debug,Clone,Default,PartialEq)]
pub struct Catalog {
    segments: Vec<AcquisitionSegment>,
}

impl Catalog {
    pub fn new (mut segments: Vec<AcquisitionSegment>) -> Self {
        sort_segments( &mut segments);
        Catalog { segments }
    }

    /// create a catalog from the aggregated segments of all source documents: drop exact duplicates
    /// and all segments that begin before `build_time`
    pub fn from_sources (segments: Vec<AcquisitionSegment>, build_time: DateTime<Utc>) -> Self {
        let segments: Vec<AcquisitionSegment> = dedup_segments( segments).into_iter()
            .filter( |s| s.begin_date >= build_time)
            .collect();
        Catalog::new( segments)
    }

    pub fn segments (&self) -> &[AcquisitionSegment] { &self.segments }
    pub fn iter (&self) -> slice::Iter<'_,AcquisitionSegment> { self.segments.iter() }
    pub fn len (&self) -> usize { self.segments.len() }
    pub fn is_empty (&self) -> bool { self.segments.is_empty() }

    pub fn first_begin_date (&self) -> Option<DateTime<Utc>> {
        self.segments.first().map( |s| s.begin_date)
    }

    /// the end of the planning horizon - note this is not necessarily the end of the last segment
    pub fn max_end_date (&self) -> Option<DateTime<Utc>> {
        max_end_date( self.segments.iter())
    }

    pub fn to_geojson_string (&self) -> Result<String> {
        segments_to_geojson_string( &self.segments)
    }

    pub fn from_geojson_str (s: &str) -> Result<Self> {
        Ok( Catalog::new( segments_from_geojson_str(s)?) )
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a AcquisitionSegment;
    type IntoIter = slice::Iter<'a,AcquisitionSegment>;

    fn into_iter (self) -> Self::IntoIter { self.segments.iter() }
}

pub fn max_end_date<'a> (segments: impl Iterator<Item=&'a AcquisitionSegment>) -> Option<DateTime<Utc>> {
    segments.map( |s| s.end_date).max()
}

/// stable sort by (begin_date, orbit_absolute)
pub fn sort_segments (segments: &mut [AcquisitionSegment]) {
    segments.sort_by( |a,b| a.begin_date.cmp( &b.begin_date).then( a.orbit_absolute.cmp( &b.orbit_absolute)));
}

/* #region deduplication ********************************************************************************/

/// identity of a segment: all attributes plus the exact footprint coordinates
#[derive(PartialEq,Eq,Hash)]
struct SegmentKey {
    begin_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    mode: String,
    orbit_absolute: u32,
    orbit_relative: u16,
    footprint: Vec<(u64,u64)>,
}

impl From<&AcquisitionSegment> for SegmentKey {
    fn from (s: &AcquisitionSegment) -> Self {
        let footprint = s.footprint.exterior().coords()
            .chain( s.footprint.interiors().iter().flat_map( |r| r.coords()))
            .map( |c| (normalized_bits(c.x), normalized_bits(c.y)))
            .collect();

        SegmentKey { 
            begin_date: s.begin_date, 
            end_date: s.end_date, 
            mode: s.mode.clone(), 
            orbit_absolute: s.orbit_absolute, 
            orbit_relative: s.orbit_relative, 
            footprint 
        }
    }
}

#[inline]
fn normalized_bits (v: f64) -> u64 {
    (v + 0.0).to_bits() // -0.0 + 0.0 == +0.0
}

/// remove segments that are identical in all attributes and geometry, keeping the first occurrence
pub fn dedup_segments (segments: Vec<AcquisitionSegment>) -> Vec<AcquisitionSegment> {
    let mut seen: HashSet<SegmentKey> = HashSet::with_capacity( segments.len());
    segments.into_iter().filter( |s| seen.insert( SegmentKey::from(s))).collect()
}

/* #endregion deduplication */

/* #region GeoJSON codec ********************************************************************************/

pub fn segment_to_feature (s: &AcquisitionSegment) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert( BEGIN_DATE.to_string(), JsonValue::from( iso8601_millis_string( &s.begin_date)));
    properties.insert( END_DATE.to_string(), JsonValue::from( iso8601_millis_string( &s.end_date)));
    properties.insert( MODE.to_string(), JsonValue::from( s.mode.clone()));
    properties.insert( ORBIT_ABSOLUTE.to_string(), JsonValue::from( s.orbit_absolute));
    properties.insert( ORBIT_RELATIVE.to_string(), JsonValue::from( s.orbit_relative));

    Feature {
        bbox: None,
        geometry: Some( Geometry::new( Value::from( &s.footprint))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

pub fn segment_from_feature (f: Feature) -> Result<AcquisitionSegment> {
    let properties = f.properties.as_ref().ok_or( parse_error!("feature without properties"))?;

    let begin_date = date_property( properties, BEGIN_DATE)?;
    let end_date = date_property( properties, END_DATE)?;
    let mode = properties.get(MODE).and_then( |v| v.as_str()).ok_or( parse_error!("feature without {} property", MODE))?;
    let orbit_absolute = u32::try_from( int_property( properties, ORBIT_ABSOLUTE)?)
        .map_err( |_| parse_error!("{} out of range", ORBIT_ABSOLUTE))?;
    let orbit_relative = u16::try_from( int_property( properties, ORBIT_RELATIVE)?)
        .map_err( |_| parse_error!("{} out of range", ORBIT_RELATIVE))?;

    let geometry = f.geometry.ok_or( parse_error!("feature without geometry"))?;
    let footprint = match geo::Geometry::<f64>::try_from( geometry)? {
        geo::Geometry::Polygon(p) => p,
        other => return Err( parse_error!("footprint is not a polygon: {:?}", other))
    };

    AcquisitionSegment::new( begin_date, end_date, mode, orbit_absolute, orbit_relative, footprint)
}

fn date_property (properties: &JsonObject, key: &str) -> Result<DateTime<Utc>> {
    properties.get(key)
        .and_then( |v| v.as_str())
        .and_then( parse_iso8601_utc)
        .ok_or( parse_error!("missing or invalid {} property", key))
}

/// we accept integer numbers, integral floats and numeric strings
fn int_property (properties: &JsonObject, key: &str) -> Result<u64> {
    let v = properties.get(key).ok_or( parse_error!("feature without {} property", key))?;

    let n = match v {
        JsonValue::Number(n) => n.as_u64().or_else( || n.as_f64().filter( |f| f.fract() == 0.0 && *f >= 0.0).map( |f| f as u64)),
        JsonValue::String(s) => s.trim().parse::<u64>().ok(),
        _ => None
    };
    n.ok_or( parse_error!("invalid {} property {}", key, v))
}

pub fn segments_to_feature_collection (segments: &[AcquisitionSegment]) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: segments.iter().map( segment_to_feature).collect(),
        foreign_members: None,
    }
}

pub fn segments_to_geojson_string (segments: &[AcquisitionSegment]) -> Result<String> {
    Ok( serde_json::to_string( &segments_to_feature_collection(segments))? )
}

/// parse a GeoJSON FeatureCollection into segments, in feature order
pub fn segments_from_geojson_str (s: &str) -> Result<Vec<AcquisitionSegment>> {
    match s.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(fc) => {
            fc.features.into_iter().enumerate()
                .map( |(i,f)| segment_from_feature(f).map_err( |e| e.in_context( format!("feature {i}"))))
                .collect()
        }
        _ => Err( parse_error!("not a GeoJSON FeatureCollection"))
    }
}

/* #endregion GeoJSON codec */
