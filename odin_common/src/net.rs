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

//! common utility functions for network operations

use std::sync::LazyLock;
use reqwest::{Client, StatusCode, Response};
use regex::Regex;

use crate::define_error;

const PATH: usize = 5;

// [scheme,user,host,port,path,query]
static URL_RE: LazyLock<Regex> = LazyLock::new(|| 
    Regex::new( r"(.+)://(?:(.+)@)?([^:/]+)(?::(\d+))?(?:/([^?#]+))?(?:\?([^#]+))?").unwrap()
);
static FNAME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new( r"(?:.*/)?(.+)").unwrap());

define_error!{ pub OdinNetError = 
    IOError(#[from] std::io::Error) : "IO error: {0}",
    NotFoundError(String) : "not found {0}",
    HttpError(#[from] reqwest::Error) : "http error: {0}",
    OpFailed(String) : "operation failed: {0}"
}

pub type Result<T> = std::result::Result<T, OdinNetError>;

/// retrieve the text body of a HTTP GET request, mapping non-success status codes into errors
pub async fn get_text (client: &Client, url: &str) -> Result<String> {
    let response = client.get(url).send().await?;
    text_of_response( url, response).await
}

/// same as [`get_text`] but with url-encoded query parameters
pub async fn get_text_with_query (client: &Client, url: &str, query: &[(&str,&str)]) -> Result<String> {
    let response = client.get(url).query(query).send().await?;
    text_of_response( url, response).await
}

async fn text_of_response (url: &str, response: Response) -> Result<String> {
    match response.status() {
        StatusCode::OK => {
            Ok( response.text().await? )
        }
        StatusCode::NOT_FOUND => {
            Err( OdinNetError::NotFoundError(format!("{url}")))
        }
        other => {
            Err( OdinNetError::OpFailed(format!("response status {other:?} for {url}")))
        }
    }
}

/// get filename part (last path element) of complete URL
/// NOTE - this does not work for partial (relative) URLs
pub fn url_file_name<'a> (url: &'a str) -> Option<&'a str> {
    URL_RE.captures( url)
    .and_then( |cap| cap.get( PATH))
    .map( |m| m.as_str().trim_end_matches('/'))
    .and_then( |p| FNAME_RE.captures( p))
    .and_then( |cap| cap.get(1))
    .map( |m| m.as_str())
}

/// turn a (possibly relative) link into an absolute URL based on the given site root
pub fn absolute_url (base: &str, href: &str) -> String {
    if URL_RE.is_match(href) {
        href.to_string()
    } else {
        format!("{}/{}", base.trim_end_matches('/'), href.trim_start_matches('/'))
    }
}
