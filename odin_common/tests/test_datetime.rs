/*
 * Copyright © 2024, United States Government, as represented by the Administrator of 
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

use chrono::{Datelike, NaiveDate, TimeZone, Timelike, Utc};
use odin_common::datetime::{iso8601_millis_string, naive_utc_date_to_utc_datetime, parse_iso8601_utc, ymd_string};

// run with "cargo test --test test_datetime -- --nocapture"

#[test]
fn test_parse_iso8601 () {
    let dt = parse_iso8601_utc("2024-03-01T05:12:33.120").unwrap(); // zone-less is UTC
    println!("{dt}");
    assert_eq!( dt.timestamp_millis(), Utc.with_ymd_and_hms( 2024,3,1,5,12,33).unwrap().timestamp_millis() + 120);

    let dt = parse_iso8601_utc("2024-03-01T07:12:33+02:00").unwrap();
    assert_eq!( dt, Utc.with_ymd_and_hms( 2024,3,1,5,12,33).unwrap());

    assert_eq!( parse_iso8601_utc(" 2024-03-01T05:12:33Z "), Some( Utc.with_ymd_and_hms( 2024,3,1,5,12,33).unwrap()));
    assert_eq!( parse_iso8601_utc("2024-03-01 05:12:33"), Some( Utc.with_ymd_and_hms( 2024,3,1,5,12,33).unwrap()));
    assert_eq!( parse_iso8601_utc("2024-03-01T05:12"), Some( Utc.with_ymd_and_hms( 2024,3,1,5,12,0).unwrap()));
    assert_eq!( parse_iso8601_utc("2024-03-01"), Some( Utc.with_ymd_and_hms( 2024,3,1,0,0,0).unwrap()));

    assert!( parse_iso8601_utc("05/03/2024 10:00").is_none());
    assert!( parse_iso8601_utc("2024-02-30T00:00:00").is_none());
    assert!( parse_iso8601_utc("").is_none());
}

#[test]
fn test_formatting () {
    let dt = Utc.with_ymd_and_hms( 2024,3,1,5,12,33).unwrap();
    assert_eq!( iso8601_millis_string( &dt), "2024-03-01T05:12:33.000Z");
    assert_eq!( ymd_string( &dt), "2024-03-01");

    let nd = NaiveDate::from_ymd_opt( 2024, 12, 31).unwrap();
    let dt = naive_utc_date_to_utc_datetime( nd);
    assert_eq!( (dt.year(), dt.month(), dt.day(), dt.hour()), (2024, 12, 31, 0));
}
