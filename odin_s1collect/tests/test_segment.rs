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
#![allow(unused)]

use chrono::{DateTime,Utc,TimeZone};
use geo::{Coord, polygon};
use odin_common::fs::filepath_contents_as_string;
use odin_s1collect::{AcquisitionSegment, OdinS1Error, segment::{Placemark, parse_kml, parse_placemark, parse_ring}};

// run with "cargo test --test test_segment -- --nocapture"

fn utc (y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms( y, m, d, h, min, s).unwrap()
}

#[test]
fn test_parse_kml () {
    let doc = filepath_contents_as_string(&"tests/data/s1a_mp_1.kml").unwrap();
    let segments = parse_kml( &doc).unwrap();
    for s in &segments { println!("{s}") }

    assert_eq!( segments.len(), 3);

    // document order is preserved
    let s = &segments[1];
    assert_eq!( s.begin_date, utc(2024,3,5,10,0,0));
    assert_eq!( s.end_date.timestamp_millis(), utc(2024,3,5,10,2,30).timestamp_millis() + 500);
    assert_eq!( s.mode, "IW");
    assert_eq!( s.orbit_absolute, 51750);
    assert_eq!( s.orbit_relative, 12);
    assert_eq!( s.footprint, polygon![ 
        (x: -120.0, y: 35.0), (x: -118.0, y: 35.0), (x: -118.0, y: 37.0), (x: -120.0, y: 37.0), (x: -120.0, y: 35.0) 
    ]);

    assert_eq!( segments[2].mode, "EW");
    assert_eq!( segments[2].orbit_relative, 87);
}

#[test]
fn test_parse_prefixed_kml () {
    let doc = filepath_contents_as_string(&"tests/data/s1a_mp_2.kml").unwrap();
    let segments = parse_kml( &doc).unwrap();
    assert_eq!( segments.len(), 4);
    assert_eq!( segments[1].orbit_absolute, 51925);
    assert_eq!( segments[2].orbit_relative, 37);
    assert_eq!( segments[3].begin_date, utc(2024,2,1,0,0,0));
}

const SEGMENT_BODY: &str = r#"
    <TimeSpan><begin>2024-03-01T05:12:33.120</begin><end>2024-03-01T05:14:10.450</end></TimeSpan>
    <ExtendedData>
      <Data name="Mode"><value>IW</value></Data>
      <Data name="OrbitAbsolute"><value>52871</value></Data>
      <Data name="OrbitRelative"><value>12</value></Data>
    </ExtendedData>
    <LinearRing><coordinates>-120.1,35.2 -117.3,35.6 -117.8,37.9 -120.6,37.5 -120.1,35.2</coordinates></LinearRing>
"#;

fn kml_doc (body: &str) -> String {
    format!( r#"<?xml version="1.0" encoding="UTF-8"?><kml xmlns="http://www.opengis.net/kml/2.2"><Document>{body}</Document></kml>"#)
}

#[test]
fn test_commented_placemark () {
    let doc = kml_doc( &format!("<!-- retracted <Placemark>{SEGMENT_BODY}</Placemark> -->"));
    let segments = parse_kml( &doc).unwrap();
    assert!( segments.is_empty());

    let doc = kml_doc( &format!("<!-- <Placemark>{SEGMENT_BODY}</Placemark> --><Placemark>{SEGMENT_BODY}</Placemark>"));
    assert_eq!( parse_kml( &doc).unwrap().len(), 1);
}

#[test]
fn test_cdata_and_entities () {
    let body = r#"
      <TimeSpan><begin><![CDATA[2024-03-01T05:12:33.120]]></begin><end>2024-03-01T05:14:10.450</end></TimeSpan>
      <ExtendedData>
        <Data name="Mode"><value><![CDATA[IW]]></value></Data>
        <Data name="OrbitAbsolute"><value>&#53;2871</value></Data>
        <Data name="OrbitRelative"><value>12</value></Data>
        <Data name="Note"><value>A &amp; B</value></Data>
      </ExtendedData>
      <LinearRing><coordinates>-120.1,35.2 -117.3,35.6 -117.8,37.9 -120.6,37.5 -120.1,35.2</coordinates></LinearRing>
    "#;
    let doc = kml_doc( &format!("<Placemark>{body}</Placemark>"));

    let pms = Placemark::extract_all( &doc).unwrap();
    assert_eq!( pms.len(), 1);
    assert_eq!( pms[0].data.get("Note").map(|s| s.as_str()), Some("A & B"));

    let segments = parse_kml( &doc).unwrap();
    assert_eq!( segments[0].mode, "IW");
    assert_eq!( segments[0].orbit_absolute, 52871);
    assert_eq!( segments[0].begin_date.timestamp_millis(), utc(2024,3,1,5,12,33).timestamp_millis() + 120);
}

#[test]
fn test_data_name_attribute_position () {
    let body = SEGMENT_BODY
        .replace( r#"<Data name="Mode">"#, r#"<Data id="m1" name="Mode">"#)
        .replace( r#"<Data name="OrbitRelative">"#, r#"<Data id='r1' name='OrbitRelative'>"#);
    let doc = kml_doc( &format!("<Placemark>{body}</Placemark>"));

    let segments = parse_kml( &doc).unwrap();
    assert_eq!( segments.len(), 1);
    assert_eq!( segments[0].mode, "IW");
    assert_eq!( segments[0].orbit_relative, 12);
}

#[test]
fn test_malformed_xml () {
    let doc = kml_doc( &format!("<Placemark>{SEGMENT_BODY}</Placemrk>"));
    assert!( matches!( parse_kml( &doc), Err(OdinS1Error::ParseError(_))));
}

#[test]
fn test_bad_timestamp () {
    let doc = filepath_contents_as_string(&"tests/data/bad_timestamp.kml").unwrap();
    match parse_kml( &doc) {
        Err(OdinS1Error::ParseError(msg)) => {
            println!("got expected error: {msg}");
            assert!( msg.starts_with("placemark 1:"));
            assert!( msg.contains("begin"));
        }
        other => panic!("expected parse error, got {other:?}")
    }
}

#[test]
fn test_not_kml () {
    assert!( matches!( parse_kml("<html><body>not found</body></html>"), Err(OdinS1Error::ParseError(_))));
}

#[test]
fn test_parse_ring () {
    let poly = parse_ring(" 10,45,0 12,45,0\n 12,47,0 10,47,0   10,45,0 ").unwrap();
    assert_eq!( poly.exterior().0.len(), 5);
    assert_eq!( poly.exterior().0[2], Coord{ x: 12.0, y: 47.0 });

    assert!( parse_ring("10,45 12,45 10,45").is_err());                  // too few positions
    assert!( parse_ring("10,45 12,45 12,47 10,47 10,46").is_err());      // not closed
    assert!( parse_ring("10,45 12,north 12,47 10,47 10,45").is_err());   // not a number
    assert!( parse_ring("10,45 12 12,47 10,47 10,45").is_err());         // missing latitude
    assert!( parse_ring("").is_err());
}

#[test]
fn test_parse_placemark () {
    let fragment = r#"<Placemark>
        <TimeSpan><begin>2024-03-01T05:12:33.120</begin><end>2024-03-01T05:14:10.450Z</end></TimeSpan>
        <ExtendedData>
          <Data name="Mode"><value> IW </value></Data>
          <Data name="OrbitAbsolute"><value>52871</value></Data>
          <Data name="OrbitRelative"><value>12</value></Data>
        </ExtendedData>
        <LinearRing><coordinates>-120.1,35.2 -117.3,35.6 -117.8,37.9 -120.6,37.5 -120.1,35.2</coordinates></LinearRing>
    </Placemark>"#;
    let pm = Placemark::extract_all( fragment).unwrap().remove(0);
    println!("{pm:?}");

    let s = parse_placemark( &pm).unwrap();
    assert_eq!( s.mode, "IW");
    assert_eq!( s.orbit_absolute, 52871);
    assert_eq!( s.begin_date.timestamp_millis(), utc(2024,3,1,5,12,33).timestamp_millis() + 120);

    // missing extended data
    let mut pm1 = pm.clone();
    pm1.data.remove("OrbitRelative");
    assert!( parse_placemark( &pm1).is_err());

    // orbit out of range for relative orbit
    let mut pm2 = pm.clone();
    pm2.data.insert( "OrbitRelative".to_string(), "70000".to_string());
    assert!( parse_placemark( &pm2).is_err());

    // ends before it begins
    let mut pm3 = pm.clone();
    pm3.end = Some("2024-03-01T05:00:00.000".to_string());
    assert!( matches!( parse_placemark( &pm3), Err(OdinS1Error::ParseError(_))));
}

#[test]
fn test_segment_invariant () {
    let fp = polygon![ (x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0), (x: 0.0, y: 0.0) ];
    assert!( AcquisitionSegment::new( utc(2024,1,2,0,0,0), utc(2024,1,1,0,0,0), "IW", 1, 1, fp.clone()).is_err());
    assert!( AcquisitionSegment::new( utc(2024,1,1,0,0,0), utc(2024,1,1,0,0,0), "IW", 1, 1, fp).is_ok());
}
