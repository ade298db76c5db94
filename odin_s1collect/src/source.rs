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

//! where acquisition plan documents come from.
//!
//! ESA does not provide an API for the observation scenario - the current KML documents have to
//! be scraped from the links of the acquisition-segments web page. Since this is a brittle contract
//! with the page layout we keep it behind the narrow [`SourceListing`] interface

use std::{path::{Path,PathBuf}, sync::LazyLock, time::Duration};
use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use tracing::{debug,warn};

use odin_common::{fs::{ensure_writable_dir, filepath_contents_as_string, replace_file_contents}, net::{absolute_url, get_text, url_file_name}};
use crate::catalog::{segments_from_geojson_str, segments_to_geojson_string};
use crate::segment::AcquisitionSegment;
use crate::errors::{OdinS1Error, Result, op_failed};

/// provides the URLs of the current mission planning documents
#[async_trait]
pub trait SourceListing: Send + Sync {
    async fn source_urls (&self) -> Result<Vec<String>>;
}

/// retrieves the content of a single mission planning document
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch (&self, url: &str) -> Result<String>;
}

pub fn http_client (timeout: Duration) -> Result<Client> {
    Ok( Client::builder().timeout(timeout).build()? )
}

/* #region ESA listing page *****************************************************************************/

static HREF_RE: LazyLock<Regex> = LazyLock::new(|| 
    Regex::new( r#"<a\b[^>]*?\bhref\s*=\s*["']([^"']+)["']"#).unwrap()
);

static DIV_TAG_RE: LazyLock<Regex> = LazyLock::new(|| 
    Regex::new( r#"(?i)<(/?)div\b[^>]*>"#).unwrap()
);

static UL_RE: LazyLock<Regex> = LazyLock::new(|| 
    Regex::new( r#"(?s)<ul\b[^>]*>(.*?)</ul\s*>"#).unwrap()
);

/// the ESA acquisition-segments page, which has one `<div class="sentinel-1x">` section per satellite
/// unit with a `<ul>` list of links to the KML documents
pub struct EsaListing {
    client: Client,
    listing_url: String,
    base_url: String,
    unit_classes: Vec<String>,
}

impl EsaListing {
    pub fn new (client: Client, listing_url: impl ToString, base_url: impl ToString, unit_classes: Vec<String>) -> Self {
        EsaListing { client, listing_url: listing_url.to_string(), base_url: base_url.to_string(), unit_classes }
    }
}

#[async_trait]
impl SourceListing for EsaListing {
    async fn source_urls (&self) -> Result<Vec<String>> {
        let html = get_text( &self.client, &self.listing_url).await
            .map_err( |e| OdinS1Error::ListingError( format!("failed to retrieve {}: {}", self.listing_url, e)))?;
        listing_urls_from_html( &html, &self.base_url, &self.unit_classes)
    }
}

/// extract the (absolute) document URLs listed in the sections for the given unit classes.
/// Finding no URL at all is an error - we never want to build an empty catalog
pub fn listing_urls_from_html (html: &str, base_url: &str, unit_classes: &[String]) -> Result<Vec<String>> {
    let mut urls: Vec<String> = Vec::new();

    for class in unit_classes {
        let section = unit_section( html, class)?;
        match section.and_then( |sec| UL_RE.captures(sec)).and_then( |cap| cap.get(1)) {
            Some(list) => {
                for cap in HREF_RE.captures_iter( list.as_str()) {
                    if let Some(href) = cap.get(1) {
                        let url = absolute_url( base_url, &href.as_str().replace("&amp;", "&"));
                        if !urls.contains(&url) { urls.push(url) }
                    }
                }
            }
            None => warn!("no document list for {} in listing", class)
        }
    }

    if urls.is_empty() {
        Err( OdinS1Error::ListingError( format!("no source documents found for {:?}", unit_classes)))
    } else {
        debug!("listing has {} source documents", urls.len());
        Ok(urls)
    }
}

/// the content of the first `<div>` that has `class` in its class attribute, up to its matching `</div>`.
/// Nested divs are balanced, an unclosed div extends to the end of the document
fn unit_section<'a> (html: &'a str, class: &str) -> Result<Option<&'a str>> {
    let div_re = unit_div_regex( class)?;
    let Some(open) = div_re.find(html) else { return Ok(None) };

    let rest = &html[open.end()..];
    let mut depth = 1;
    for cap in DIV_TAG_RE.captures_iter( rest) {
        if cap[1].is_empty() {
            depth += 1;
        } else {
            depth -= 1;
            if depth == 0 {
                return Ok( Some( &rest[..cap.get(0).map_or( rest.len(), |m| m.start())]))
            }
        }
    }
    Ok( Some(rest))
}

fn unit_div_regex (class: &str) -> Result<Regex> {
    let pattern = format!(
        r#"<div\b[^>]*?\bclass\s*=\s*["'](?:[^"']*\s)?{}(?:\s[^"']*)?["'][^>]*>"#, 
        regex::escape(class)
    );
    Regex::new( &pattern).map_err( |e| op_failed!("invalid unit class {}: {}", class, e))
}

/* #endregion ESA listing page */

/// plain HTTP GET document retrieval
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new (client: Client) -> Self { HttpFetcher { client } }
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    async fn fetch (&self, url: &str) -> Result<String> {
        Ok( get_text( &self.client, url).await? )
    }
}

/// the name we use to identify a source document (and its cache entry), which is the last path element
/// of its URL
pub fn document_name (url: &str) -> Result<String> {
    url_file_name(url)
        .map( |s| s.to_string())
        .ok_or_else( || OdinS1Error::ListingError( format!("not a document URL: {}", url)))
}

/// per-document cache of parsed segments, stored as `<dir>/<document name>.geojson`.
/// Entries are keyed by document name, i.e. re-published documents need a new name to be re-fetched
#[derive(Debug,Clone)]
pub struct DocumentCache {
    dir: PathBuf,
}

impl DocumentCache {
    pub fn new (dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        ensure_writable_dir( &dir)?;
        Ok( DocumentCache { dir } )
    }

    pub fn dir (&self) -> &Path { &self.dir }

    pub fn entry_path (&self, doc_name: &str) -> PathBuf {
        self.dir.join( format!("{doc_name}.geojson"))
    }

    /// cached segments for `doc_name`, if there is a readable entry. Unreadable entries are reported
    /// and treated as missing so that the document gets fetched again
    pub fn get (&self, doc_name: &str) -> Option<Vec<AcquisitionSegment>> {
        let path = self.entry_path( doc_name);
        if !path.is_file() { return None }

        match filepath_contents_as_string( &path).map_err( OdinS1Error::from).and_then( |s| segments_from_geojson_str(&s)) {
            Ok(segments) => Some(segments),
            Err(e) => {
                warn!("ignoring unreadable cache entry {:?}: {}", path, e);
                None
            }
        }
    }

    pub fn put (&self, doc_name: &str, segments: &[AcquisitionSegment]) -> Result<()> {
        let contents = segments_to_geojson_string( segments)?;
        replace_file_contents( self.entry_path( doc_name), contents.as_bytes())?;
        Ok(())
    }
}
