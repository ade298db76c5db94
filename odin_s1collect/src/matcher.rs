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

//! the collect matching engine: next acquisition covering a location, or next acquisition that
//! can be interferometrically paired with a reference scene.
//!
//! Both query kinds apply a [`SegmentFilter`] to a catalog snapshot and select the earliest match.
//! Not finding a match is a normal outcome that comes with a fallback bound - the latest `end_date`
//! of the segments that passed the attribute tests, i.e. "no collect through at least this date"

use std::fmt;
use chrono::{DateTime,Utc};

use odin_common::datetime::ymd_string;
use crate::catalog::{Catalog, max_end_date};
use crate::filter::{QueryShape, SegmentFilter};
use crate::granule::SceneReference;
use crate::segment::AcquisitionSegment;

/// resolved query (scene ids have already been turned into [`SceneReference`]s)
#[derive(Debug,Clone,PartialEq)]
pub enum CollectQuery {
    Location { point: QueryShape, mode: Option<String> },
    Scene( SceneReference ),
}

impl CollectQuery {
    pub fn location (point: QueryShape, mode: Option<&str>) -> Self {
        CollectQuery::Location { point, mode: mode.filter( |m| !m.is_empty()).map( |m| m.to_string()) }
    }

    pub fn predicate (&self) -> SegmentFilter {
        match self {
            CollectQuery::Location { point, mode } => {
                SegmentFilter::new().with_optional_mode( mode.as_deref()).intersecting( point.clone())
            }
            CollectQuery::Scene( sref) => {
                SegmentFilter::new()
                    .with_orbit_relative( sref.orbit_relative)
                    .with_mode( &sref.mode)
                    .intersecting( sref.footprint.clone())
            }
        }
    }

    pub fn evaluate (&self, catalog: &Catalog) -> MatchResult {
        evaluate( catalog, &self.predicate())
    }

    /// the human readable answer for a result of this query
    pub fn message (&self, result: &MatchResult) -> String {
        let subject = match self {
            CollectQuery::Location { mode: Some(mode), .. } => format!(" {mode} "),
            CollectQuery::Location { mode: None, .. } => " ".to_string(),
            CollectQuery::Scene(_) => " interferometrically valid ".to_string(),
        };

        match result {
            MatchResult::Scheduled { date } => format!("Next{}collect is {}", subject, ymd_string(date)),
            MatchResult::NotScheduled { fallback_bound: Some(bound) } => {
                format!("No{}collect is scheduled on or before {}", subject, ymd_string(bound))
            }
            MatchResult::NotScheduled { fallback_bound: None } => format!("No{}collect is scheduled", subject),
        }
    }
}

#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum MatchResult {
    /// begin of the earliest matching segment
    Scheduled { date: DateTime<Utc> },
    /// absent only if the catalog is empty
    NotScheduled { fallback_bound: Option<DateTime<Utc>> },
}

impl MatchResult {
    pub fn is_scheduled (&self) -> bool {
        matches!( self, MatchResult::Scheduled{..})
    }

    pub fn date (&self) -> Option<DateTime<Utc>> {
        match self {
            MatchResult::Scheduled { date } => Some(*date),
            _ => None
        }
    }

    pub fn fallback_bound (&self) -> Option<DateTime<Utc>> {
        match self {
            MatchResult::NotScheduled { fallback_bound } => *fallback_bound,
            _ => None
        }
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchResult::Scheduled { date } => write!(f, "scheduled {}", ymd_string(date)),
            MatchResult::NotScheduled { fallback_bound: Some(bound) } => write!(f, "not scheduled through {}", ymd_string(bound)),
            MatchResult::NotScheduled { fallback_bound: None } => write!(f, "not scheduled"),
        }
    }
}

/// earliest segment by (begin_date, orbit_absolute). This does not assume sorted input
pub fn earliest<'a> (segments: impl Iterator<Item=&'a AcquisitionSegment>) -> Option<&'a AcquisitionSegment> {
    segments.min_by_key( |s| (s.begin_date, s.orbit_absolute))
}

pub fn evaluate (catalog: &Catalog, predicate: &SegmentFilter) -> MatchResult {
    if let Some(s) = earliest( predicate.apply( catalog.segments())) {
        MatchResult::Scheduled { date: s.begin_date }
    } else {
        MatchResult::NotScheduled { fallback_bound: fallback_bound( catalog, predicate) }
    }
}

/// max end_date of the segments passing the attribute tests, or of the whole catalog if none does
fn fallback_bound (catalog: &Catalog, predicate: &SegmentFilter) -> Option<DateTime<Utc>> {
    let attrs = predicate.attributes_only();
    max_end_date( attrs.apply( catalog.segments())).or_else( || catalog.max_end_date())
}

pub fn match_by_location (catalog: &Catalog, point: QueryShape, mode: Option<&str>) -> MatchResult {
    CollectQuery::location( point, mode).evaluate( catalog)
}

pub fn match_by_scene (catalog: &Catalog, sref: &SceneReference) -> MatchResult {
    CollectQuery::Scene( sref.clone()).evaluate( catalog)
}
