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

//! acquisition segments and the parser that turns mission planning KML documents into them.
//!
//! ESA publishes the Sentinel-1 observation scenario as one KML document per satellite unit. Each
//! `Placemark` describes one planned datatake segment with a `TimeSpan`, an `ExtendedData` block
//! and a `LinearRing` footprint:
//! ```xml
//! <Placemark>
//!   <TimeSpan><begin>2024-03-01T05:12:33.120</begin><end>2024-03-01T05:14:10.450</end></TimeSpan>
//!   <ExtendedData>
//!     <Data name="Mode"><value>IW</value></Data>
//!     <Data name="OrbitAbsolute"><value>52871</value></Data>
//!     <Data name="OrbitRelative"><value>12</value></Data>
//!   </ExtendedData>
//!   <LinearRing><coordinates>-120.1,35.2 -117.3,35.6 -117.8,37.9 -120.6,37.5 -120.1,35.2</coordinates></LinearRing>
//! </Placemark>
//! ```
//! The document is streamed with an XML reader and we only keep the handful of elements we need
//! (tolerating namespace prefixes), i.e. we don't build a full KML model of the document.

use std::{collections::HashMap, fmt};
use chrono::{DateTime,Utc};
use geo::{Coord, LineString, Polygon};
use quick_xml::{Reader, events::{BytesStart, Event}, name::LocalName};
use tracing::debug;

use odin_common::datetime::{parse_iso8601_utc, iso8601_millis_string};
use crate::errors::{Result, parse_error};

pub const MODE: &str = "Mode";
pub const ORBIT_ABSOLUTE: &str = "OrbitAbsolute";
pub const ORBIT_RELATIVE: &str = "OrbitRelative";

/// one planned data acquisition window
#[derive(Debug,Clone,PartialEq)]
pub struct AcquisitionSegment {
    pub begin_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub mode: String,          // e.g. "IW", "EW", "WV", "SM"
    pub orbit_absolute: u32,
    pub orbit_relative: u16,   // repeat cycle track (1..=175 for Sentinel-1)
    pub footprint: Polygon<f64>,
}

impl AcquisitionSegment {
    pub fn new (begin_date: DateTime<Utc>, end_date: DateTime<Utc>, mode: impl ToString, 
                orbit_absolute: u32, orbit_relative: u16, footprint: Polygon<f64>) -> Result<Self> {
        if end_date < begin_date {
            return Err( parse_error!("segment ends before it begins: {} > {}", 
                iso8601_millis_string(&begin_date), iso8601_millis_string(&end_date)))
        }
        Ok( AcquisitionSegment { begin_date, end_date, mode: mode.to_string(), orbit_absolute, orbit_relative, footprint } )
    }
}

impl fmt::Display for AcquisitionSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} - {} orbit {} (relative {})", self.mode, 
            iso8601_millis_string(&self.begin_date), iso8601_millis_string(&self.end_date), 
            self.orbit_absolute, self.orbit_relative)
    }
}

/* #region placemark extraction *************************************************************************/

/// the raw (string) content of a KML placemark that is relevant for acquisition segments
#[derive(Debug,Clone,Default,PartialEq)]
pub struct Placemark {
    pub begin: Option<String>,
    pub end: Option<String>,
    pub data: HashMap<String,String>,
    pub coordinates: Option<String>,
}

impl Placemark {
    /// extract all placemarks from a KML document (or fragment), in document order.
    /// Placemarks inside of comments are not part of the document
    pub fn extract_all (doc: &str) -> Result<Vec<Placemark>> {
        Ok( scan_kml(doc)?.1 )
    }

    fn data_value (&self, name: &str) -> Result<&str> {
        self.data.get(name).map( |v| v.as_str()).ok_or_else( || parse_error!("placemark without {} data", name))
    }
}

/// stream the document, returning the local name of its root element and the raw placemarks.
/// Element names are matched without namespace prefixes. We only look at
/// `TimeSpan/begin`, `TimeSpan/end`, `Data[@name]/value` and the first `LinearRing/coordinates`
fn scan_kml (doc: &str) -> Result<(Option<String>, Vec<Placemark>)> {
    let mut reader = Reader::from_str(doc);
    reader.config_mut().trim_text(true);

    let mut root: Option<String> = None;
    let mut path: Vec<String> = Vec::new(); // open elements
    let mut text = String::new();
    let mut current: Option<Placemark> = None;
    let mut data_name: Option<String> = None;
    let mut placemarks: Vec<Placemark> = Vec::new();

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(e) => return Err( parse_error!("invalid XML at {}: {}", reader.buffer_position(), e))
        };

        match event {
            Event::Start(e) => {
                let name = local_name( e.local_name());
                if root.is_none() { root = Some( name.clone()) }

                if name == "Placemark" {
                    current = Some( Placemark::default());
                } else if name == "Data" && current.is_some() {
                    data_name = name_attribute( &e)?;
                }
                path.push( name);
                text.clear();
            }
            Event::Empty(e) => {
                if root.is_none() { root = Some( local_name( e.local_name())) }
            }
            Event::Text(t) => {
                let t = t.unescape().map_err( |e| parse_error!("invalid text at {}: {}", reader.buffer_position(), e))?;
                text.push_str( &t);
            }
            Event::CData(c) => {
                text.push_str( &String::from_utf8_lossy( &c));
            }
            Event::End(_) => {
                let name = path.pop().unwrap_or_default();
                let parent = path.last().map( |p| p.as_str());

                if name == "Placemark" {
                    if let Some(pm) = current.take() { placemarks.push(pm) }
                } else if let Some(pm) = current.as_mut() {
                    let value = text.trim();
                    match (name.as_str(), parent) {
                        ("begin", Some("TimeSpan")) => set_once( &mut pm.begin, value),
                        ("end", Some("TimeSpan")) => set_once( &mut pm.end, value),
                        ("coordinates", Some("LinearRing")) => set_once( &mut pm.coordinates, value),
                        ("value", Some("Data")) => {
                            if let Some(key) = &data_name {
                                pm.data.entry( key.clone()).or_insert_with( || value.to_string());
                            }
                        }
                        ("Data", _) => data_name = None,
                        _ => {}
                    }
                }
                text.clear();
            }
            Event::Eof => break,
            _ => {} // declarations, comments, processing instructions, doctypes
        }
    }

    Ok( (root, placemarks) )
}

fn local_name (name: LocalName<'_>) -> String {
    String::from_utf8_lossy( name.as_ref()).into_owned()
}

fn name_attribute (e: &BytesStart<'_>) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr.map_err( |e| parse_error!("invalid attribute: {}", e))?;
        if attr.key.local_name().as_ref() == b"name" {
            let value = attr.unescape_value().map_err( |e| parse_error!("invalid attribute value: {}", e))?;
            return Ok( Some( value.trim().to_string()))
        }
    }
    Ok(None)
}

fn set_once (field: &mut Option<String>, value: &str) {
    if field.is_none() { *field = Some( value.to_string()) }
}

/* #endregion placemark extraction */

/* #region segment parser *******************************************************************************/

/// parse a complete KML document into acquisition segments (in document order).
/// Any malformed placemark fails the whole document - we never silently drop segments
pub fn parse_kml (doc: &str) -> Result<Vec<AcquisitionSegment>> {
    let (root, placemarks) = scan_kml(doc)?;
    if root.as_deref() != Some("kml") {
        return Err( parse_error!("not a KML document"))
    }
    debug!("found {} placemarks", placemarks.len());

    placemarks.iter().enumerate()
        .map( |(i,pm)| parse_placemark(pm).map_err( |e| e.in_context( format!("placemark {i}"))))
        .collect()
}

/// turn a single raw placemark into an AcquisitionSegment. This is a pure function
pub fn parse_placemark (pm: &Placemark) -> Result<AcquisitionSegment> {
    let begin_date = parse_timestamp( pm.begin.as_deref(), "begin")?;
    let end_date = parse_timestamp( pm.end.as_deref(), "end")?;

    let mode = pm.data_value(MODE)?;
    if mode.is_empty() {
        return Err( parse_error!("empty {} value", MODE))
    }
    let orbit_absolute: u32 = parse_number( pm.data_value(ORBIT_ABSOLUTE)?, ORBIT_ABSOLUTE)?;
    let orbit_relative: u16 = parse_number( pm.data_value(ORBIT_RELATIVE)?, ORBIT_RELATIVE)?;

    let coords = pm.coordinates.as_deref().ok_or( parse_error!("placemark without LinearRing coordinates"))?;
    let footprint = parse_ring( coords)?;

    AcquisitionSegment::new( begin_date, end_date, mode, orbit_absolute, orbit_relative, footprint)
}

fn parse_timestamp (input: Option<&str>, what: &str) -> Result<DateTime<Utc>> {
    let input = input.ok_or( parse_error!("placemark without {} timestamp", what))?;
    parse_iso8601_utc(input).ok_or( parse_error!("invalid {} timestamp '{}'", what, input))
}

fn parse_number<T: std::str::FromStr> (input: &str, what: &str) -> Result<T> {
    input.trim().parse::<T>().map_err( |_| parse_error!("invalid {} value '{}'", what, input))
}

/// parse a KML coordinate tuple list ("lon,lat[,alt] lon,lat[,alt] ..") of a closed ring into a polygon.
/// The ring needs at least 4 positions and has to end with its start position
pub fn parse_ring (input: &str) -> Result<Polygon<f64>> {
    let mut coords: Vec<Coord<f64>> = Vec::new();

    for tuple in input.split_whitespace() {
        let mut it = tuple.split(',');
        let x = parse_ordinate( it.next(), tuple)?;
        let y = parse_ordinate( it.next(), tuple)?;
        coords.push( Coord{x,y});
    }

    if coords.len() < 4 {
        return Err( parse_error!("ring has {} positions (min 4)", coords.len()))
    }
    if coords.first() != coords.last() {
        return Err( parse_error!("ring is not closed"))
    }

    Ok( Polygon::new( LineString::new(coords), vec![]) )
}

fn parse_ordinate (input: Option<&str>, tuple: &str) -> Result<f64> {
    input.and_then( |s| s.trim().parse::<f64>().ok())
        .filter( |v| v.is_finite())
        .ok_or( parse_error!("invalid coordinate tuple '{}'", tuple))
}

/* #endregion segment parser */
