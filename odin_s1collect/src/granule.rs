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

//! resolving scene identifiers into the attributes needed for interferometric pairing.
//!
//! The default resolver uses the ASF search API, which returns a GeoJSON FeatureCollection for
//! `granule_list` (scene names) or `product_list` (product ids such as `..-SLC`) queries

use std::str::FromStr;
use async_trait::async_trait;
use geojson::{Feature, GeoJson, JsonObject, JsonValue};
use reqwest::Client;
use tracing::{debug,info};

use odin_common::net::{OdinNetError, get_text_with_query};
use crate::filter::QueryShape;
use crate::errors::{OdinS1Error, Result, input_error};

pub const BEAM_MODE: &str = "beamModeType";
pub const PATH_NUMBER: &str = "pathNumber";

/// the reference scene of an interferometric query
#[derive(Debug,Clone,PartialEq)]
pub struct SceneReference {
    pub scene_id: String,
    pub footprint: QueryShape,
    pub mode: String,
    pub orbit_relative: u16,
}

#[async_trait]
pub trait GranuleResolver: Send + Sync {
    /// fails with `GranuleNotFound` for unknown scenes and `GranuleError` if the lookup itself failed
    async fn resolve (&self, scene_id: &str) -> Result<SceneReference>;
}

pub struct AsfGranuleResolver {
    client: Client,
    search_url: String,
}

impl AsfGranuleResolver {
    pub fn new (client: Client, search_url: impl ToString) -> Self {
        AsfGranuleResolver { client, search_url: search_url.to_string() }
    }
}

#[async_trait]
impl GranuleResolver for AsfGranuleResolver {
    async fn resolve (&self, scene_id: &str) -> Result<SceneReference> {
        let scene_id = scene_id.trim();
        if scene_id.is_empty() {
            return Err( input_error!("empty scene id"))
        }

        let query = [ (search_param(scene_id), scene_id), ("output", "geojson") ];
        debug!("querying {} for {}", self.search_url, scene_id);

        let text = get_text_with_query( &self.client, &self.search_url, &query).await.map_err( |e| match e {
            OdinNetError::NotFoundError(_) => OdinS1Error::GranuleNotFound( scene_id.to_string()),
            other => OdinS1Error::GranuleError( format!("{scene_id}: {other}"))
        })?;

        let sref = scene_reference_from_geojson( scene_id, &text)?;
        info!("resolved {} to mode {} relative orbit {}", scene_id, sref.mode, sref.orbit_relative);
        Ok(sref)
    }
}

/// product ids (e.g. "S1A_IW_SLC__1SDV_20240301T..-SLC") are looked up as products, everything else as granule
pub fn search_param (scene_id: &str) -> &'static str {
    if scene_id.contains('-') { "product_list" } else { "granule_list" }
}

/// extract the reference attributes from the first feature of a search response
pub fn scene_reference_from_geojson (scene_id: &str, text: &str) -> Result<SceneReference> {
    let geojson = GeoJson::from_str(text)
        .map_err( |e| OdinS1Error::GranuleError( format!("invalid search response for {scene_id}: {e}")))?;

    let feature = match geojson {
        GeoJson::FeatureCollection(fc) => fc.features.into_iter().next(),
        GeoJson::Feature(f) => Some(f),
        GeoJson::Geometry(_) => None,
    }.ok_or_else( || OdinS1Error::GranuleNotFound( scene_id.to_string()))?;

    scene_reference_from_feature( scene_id, feature)
}

fn scene_reference_from_feature (scene_id: &str, feature: Feature) -> Result<SceneReference> {
    let granule_error = |msg: String| OdinS1Error::GranuleError( format!("{scene_id}: {msg}"));

    let properties = feature.properties.as_ref().ok_or_else( || granule_error("no properties".to_string()))?;
    let mode = properties.get(BEAM_MODE).and_then( |v| v.as_str())
        .filter( |m| !m.is_empty())
        .ok_or_else( || granule_error( format!("no {BEAM_MODE}")))?
        .to_string();
    let orbit_relative = path_number( properties).ok_or_else( || granule_error( format!("no valid {PATH_NUMBER}")))?;

    let geometry = feature.geometry.ok_or_else( || granule_error("no geometry".to_string()))?;
    let geometry = geo::Geometry::<f64>::try_from( geometry).map_err( |e| granule_error( e.to_string()))?;
    let footprint = QueryShape::try_from( geometry).map_err( |e| granule_error( e.to_string()))?;

    Ok( SceneReference { scene_id: scene_id.to_string(), footprint, mode, orbit_relative } )
}

// ASF reports the path number either as number or as string
fn path_number (properties: &JsonObject) -> Option<u16> {
    match properties.get(PATH_NUMBER)? {
        JsonValue::Number(n) => n.as_u64().and_then( |n| u16::try_from(n).ok()),
        JsonValue::String(s) => s.trim().parse().ok(),
        _ => None
    }
}
