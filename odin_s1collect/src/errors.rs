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

use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, OdinS1Error>;
 
#[derive(Error,Debug)]
pub enum OdinS1Error {

    //--- ingestion

    #[error("source listing error {0}")]
    ListingError( String ),

    #[error("parse error {0}")]
    ParseError( String ),

    #[error("http error {0}")]
    HttpError( #[from] reqwest::Error),

    #[error("net error {0}")]
    NetError( #[from] odin_common::net::OdinNetError),

    //--- queries

    #[error("granule not found {0}")]
    GranuleNotFound( String ),

    #[error("granule lookup failed {0}")]
    GranuleError( String ),

    #[error("invalid input {0}")]
    InputError( String ),

    //--- persistence and config

    #[error("snapshot error {0}")]
    SnapshotError( String ),

    #[error("config error {0}")]
    ConfigError( String ),

    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("GeoJSON error {0}")]
    GeoJsonError( #[from] geojson::Error),

    #[error("JSON error {0}")]
    JsonError( #[from] serde_json::Error),

    #[error("operation failed {0}")]
    OpFailedError(String),
}

impl OdinS1Error {
    /// prefix the message of a parse error with where it happened (document, placemark, feature..)
    pub fn in_context (self, ctx: impl fmt::Display) -> Self {
        match self {
            OdinS1Error::ParseError(msg) => OdinS1Error::ParseError( format!("{ctx}: {msg}")),
            other => other
        }
    }
}

macro_rules! parse_error {
    ($fmt:literal $(, $arg:expr )* ) => {
        $crate::errors::OdinS1Error::ParseError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use parse_error;

macro_rules! input_error {
    ($fmt:literal $(, $arg:expr )* ) => {
        $crate::errors::OdinS1Error::InputError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use input_error;

macro_rules! op_failed {
    ($fmt:literal $(, $arg:expr )* ) => {
        $crate::errors::OdinS1Error::OpFailedError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use op_failed;
