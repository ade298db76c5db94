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

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};

/// this should be used wherever we might have to use sim clock instead of wall clock
#[inline]
pub fn utc_now()->DateTime<Utc> {
    Utc::now()
}

/// get a DateTime<Utc> from a NaiveDate that is supposed to be in Utc
pub fn naive_utc_date_to_utc_datetime (nd: NaiveDate) -> DateTime<Utc> {
    let nt = NaiveTime::from_hms_opt(0, 0, 0).unwrap(); // 00:00:00 can't fail
    DateTime::from_naive_utc_and_offset( NaiveDateTime::new(nd,nt), Utc)
}

/// parse RFC 3339 / ISO 8601 datetime strings into DateTime<Utc>.
/// Datetimes without zone designator (e.g. "2024-03-01T05:12:33.120") are interpreted as UTC, and
/// so are plain dates ("2024-03-01" -> midnight)
pub fn parse_iso8601_utc (s: &str)->Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.to_utc())
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some( ndt.and_utc())
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().map( naive_utc_date_to_utc_datetime)
}

/// RFC 3339 with millisecond resolution and 'Z' suffix, e.g. "2024-03-01T05:12:33.120Z"
pub fn iso8601_millis_string (dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts( SecondsFormat::Millis, true)
}

/// the calendar date part (UTC) formatted as YYYY-MM-DD
pub fn ymd_string (dt: &DateTime<Utc>) -> String {
    format!("{}", dt.format("%Y-%m-%d"))
}
