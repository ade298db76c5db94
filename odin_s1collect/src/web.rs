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

//! HTTP entry point: `GET {BASE_PATH}/location?lon=..&lat=..[&mode=..]`, `GET {BASE_PATH}/scene?scene=..`
//! and `POST {BASE_PATH}/reload`. All responses are JSON objects with a single `message` field

use std::{collections::HashMap, sync::Arc};
use axum::{
    extract::{Query, State}, 
    http::{StatusCode, Uri}, 
    response::{IntoResponse, Response}, 
    routing::{get,post}, 
    Json, Router
};
use tokio::net::TcpListener;
use tracing::{info,warn};

use crate::service::{CollectMessage, CollectService};
use crate::errors::{OdinS1Error, Result, input_error};

pub const BASE_PATH: &str = "/s1-collect-info";

pub const LON: &str = "lon";
pub const LAT: &str = "lat";
pub const MODE: &str = "mode";
pub const SCENE: &str = "scene";

type Params = Query<HashMap<String,String>>;

pub fn build_router (service: Arc<CollectService>) -> Router {
    Router::new()
        .route( &format!("{BASE_PATH}/location"), get( location_handler))
        .route( &format!("{BASE_PATH}/scene"), get( scene_handler))
        .route( &format!("{BASE_PATH}/reload"), post( reload_handler))
        .fallback( invalid_path_handler)
        .with_state( service)
}

/// serve until the listener fails
pub async fn serve (service: Arc<CollectService>, listener: TcpListener) -> Result<()> {
    info!("serving collect queries on http://{}{}", listener.local_addr()?, BASE_PATH);
    axum::serve( listener, build_router( service)).await?;
    Ok(())
}

async fn location_handler (State(service): State<Arc<CollectService>>, Query(params): Params) -> Response {
    let answer = location_params( &params)
        .and_then( |(lon,lat,mode)| service.next_collect_at_location( lon, lat, mode));
    match answer {
        Ok(answer) => message_response( StatusCode::OK, CollectMessage::from( &answer)),
        Err(e) => error_response( e)
    }
}

async fn scene_handler (State(service): State<Arc<CollectService>>, Query(params): Params) -> Response {
    let scene_id = match params.get(SCENE).map( |s| s.trim()).filter( |s| !s.is_empty()) {
        Some(scene_id) => scene_id,
        None => return error_response( input_error!("missing {} parameter", SCENE))
    };
    match service.next_interferometric_collect( scene_id).await {
        Ok(answer) => message_response( StatusCode::OK, CollectMessage::from( &answer)),
        Err(e) => error_response( e)
    }
}

async fn reload_handler (State(service): State<Arc<CollectService>>) -> Response {
    match service.reload() {
        Ok(n) => message_response( StatusCode::OK, CollectMessage { message: format!("reloaded catalog with {n} segments") }),
        Err(e) => error_response( e)
    }
}

async fn invalid_path_handler (uri: Uri) -> Response {
    message_response( StatusCode::NOT_FOUND, CollectMessage { message: format!("{} is not a valid path", uri.path()) })
}

fn location_params (params: &HashMap<String,String>) -> Result<(f64,f64,Option<&str>)> {
    let lon = number_param( params, LON)?;
    let lat = number_param( params, LAT)?;
    let mode = params.get(MODE).map( |m| m.trim());
    Ok( (lon, lat, mode) )
}

fn number_param (params: &HashMap<String,String>, key: &str) -> Result<f64> {
    let v = params.get(key).ok_or_else( || input_error!("missing {} parameter", key))?;
    v.trim().parse::<f64>().map_err( |_| input_error!("invalid {} parameter '{}'", key, v))
}

fn message_response (status: StatusCode, msg: CollectMessage) -> Response {
    (status, Json(msg)).into_response()
}

fn error_response (e: OdinS1Error) -> Response {
    let status = match &e {
        OdinS1Error::InputError(_) => StatusCode::BAD_REQUEST,
        OdinS1Error::GranuleNotFound(_) => StatusCode::NOT_FOUND,
        OdinS1Error::GranuleError(_) | OdinS1Error::HttpError(_) | OdinS1Error::NetError(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR
    };
    warn!("query failed with {}: {}", status, e);
    message_response( status, CollectMessage { message: e.to_string() })
}
