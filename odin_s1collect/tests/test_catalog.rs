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

use std::{collections::HashMap, sync::{Arc, atomic::{AtomicUsize, Ordering}}};
use async_trait::async_trait;
use chrono::{DateTime,Utc,TimeZone};
use odin_common::fs::filepath_contents_as_string;
use odin_s1collect::{
    Catalog, CatalogBuilder, FileSnapshotStore, OdinS1Error, Result, SnapshotHandle, SnapshotStore,
    catalog::{dedup_segments, segments_from_geojson_str},
    segment::parse_kml,
    source::{DocumentFetcher, SourceListing, document_name, listing_urls_from_html},
};

// run with "cargo test --test test_catalog -- --nocapture"

const BASE_URL: &str = "https://sentinel.esa.int";

fn build_time () -> DateTime<Utc> {
    Utc.with_ymd_and_hms( 2024, 2, 1, 0, 0, 0).unwrap()
}

fn doc_urls (names: &[&str]) -> Vec<String> {
    names.iter().map( |n| format!("{BASE_URL}/documents/d/sentinel/{n}")).collect()
}

struct FixedListing (Vec<String>);

#[async_trait]
impl SourceListing for FixedListing {
    async fn source_urls (&self) -> Result<Vec<String>> { Ok( self.0.clone()) }
}

/// serves documents from tests/data, counting how often we get asked
#[derive(Default)]
struct FixtureFetcher {
    n_fetched: Arc<AtomicUsize>,
}

#[async_trait]
impl DocumentFetcher for FixtureFetcher {
    async fn fetch (&self, url: &str) -> Result<String> {
        self.n_fetched.fetch_add( 1, Ordering::Relaxed);
        let path = format!("tests/data/{}", document_name(url)?);
        Ok( filepath_contents_as_string( &path)? )
    }
}

/// a fetcher that can't reach anything
struct FailingFetcher;

#[async_trait]
impl DocumentFetcher for FailingFetcher {
    async fn fetch (&self, url: &str) -> Result<String> {
        Err( OdinS1Error::OpFailedError( format!("connection refused: {url}")))
    }
}

fn fixture_builder () -> CatalogBuilder<FixedListing,FixtureFetcher> {
    CatalogBuilder::new( FixedListing( doc_urls( &["s1a_mp_1.kml", "s1a_mp_2.kml"])), FixtureFetcher::default())
}

#[tokio::test]
async fn test_build () {
    let catalog = fixture_builder().build_at( build_time()).await.unwrap();
    for s in &catalog { println!("{s}") }

    // 7 parsed segments, one duplicate, one before build time
    assert_eq!( catalog.len(), 5);

    // temporal filter
    assert!( catalog.iter().all( |s| s.begin_date >= build_time()));

    // ordering
    assert!( catalog.segments().windows(2).all( |w| w[0].begin_date <= w[1].begin_date));
    let orbits: Vec<u32> = catalog.iter().map( |s| s.orbit_absolute).collect();
    assert_eq!( orbits, vec![51470, 51600, 51690, 51750, 51925]);

    // a segment that begins exactly at build time is kept
    assert_eq!( catalog.segments()[0].begin_date, build_time());

    // deduplication - the segment is in both documents
    assert_eq!( catalog.iter().filter( |s| s.orbit_absolute == 51750).count(), 1);
}

#[tokio::test]
async fn test_idempotent_rebuild () {
    let tmp = tempfile::tempdir().unwrap();
    let cache_dir = tmp.path().join("cache");
    let store = FileSnapshotStore::new( tmp.path().join("collection.geojson"));

    let builder = fixture_builder().with_cache_dir( &cache_dir).unwrap();
    let c1 = builder.build_at( build_time()).await.unwrap();
    store.store( &c1).unwrap();
    let snapshot1 = filepath_contents_as_string( &store.path()).unwrap();
    assert!( cache_dir.join("s1a_mp_1.kml.geojson").is_file());

    // second run with a fetcher that fails - everything has to come from the cache
    let builder = CatalogBuilder::new( FixedListing( doc_urls( &["s1a_mp_1.kml", "s1a_mp_2.kml"])), FailingFetcher)
        .with_cache_dir( &cache_dir).unwrap();
    let c2 = builder.build_at( build_time()).await.unwrap();
    store.store( &c2).unwrap();
    let snapshot2 = filepath_contents_as_string( &store.path()).unwrap();

    assert_eq!( c1, c2);
    assert_eq!( snapshot1, snapshot2);
}

#[tokio::test]
async fn test_cache_reuse () {
    let tmp = tempfile::tempdir().unwrap();
    let n_fetched = Arc::new( AtomicUsize::new(0));
    let fetcher = FixtureFetcher { n_fetched: n_fetched.clone() };
    let builder = CatalogBuilder::new( FixedListing( doc_urls( &["s1a_mp_1.kml", "s1a_mp_2.kml"])), fetcher)
        .with_cache_dir( tmp.path()).unwrap();

    let c1 = builder.build_at( build_time()).await.unwrap();
    let c2 = builder.build_at( build_time()).await.unwrap();
    assert_eq!( c1, c2);
    assert_eq!( n_fetched.load( Ordering::Relaxed), 2); // each document only fetched once
}

#[tokio::test]
async fn test_failed_build_keeps_snapshot () {
    let tmp = tempfile::tempdir().unwrap();
    let store = Arc::new( FileSnapshotStore::new( tmp.path().join("collection.geojson")));

    let catalog = fixture_builder().build_at( build_time()).await.unwrap();
    store.store( &catalog).unwrap();
    let handle = SnapshotHandle::load( store.clone()).unwrap();
    let before = filepath_contents_as_string( &store.path()).unwrap();

    // a document with a malformed placemark aborts the whole build
    let builder = CatalogBuilder::new( FixedListing( doc_urls( &["s1a_mp_1.kml", "bad_timestamp.kml"])), FixtureFetcher::default());
    match builder.build_and_store( &*store).await {
        Err(OdinS1Error::ParseError(msg)) => {
            println!("build failed as expected: {msg}");
            assert!( msg.starts_with("bad_timestamp.kml"));
        }
        other => panic!("expected parse error, got {other:?}")
    }

    // unreachable documents abort the build too
    let builder = CatalogBuilder::new( FixedListing( doc_urls( &["s1a_mp_1.kml"])), FailingFetcher);
    assert!( builder.build_and_store( &*store).await.is_err());

    let after = filepath_contents_as_string( &store.path()).unwrap();
    assert_eq!( before, after);
    assert_eq!( handle.reload().unwrap(), catalog.len());
    assert_eq!( *handle.current(), catalog);
}

#[tokio::test]
async fn test_empty_listing () {
    let builder = CatalogBuilder::new( FixedListing( vec![]), FixtureFetcher::default());
    assert!( matches!( builder.build_at( build_time()).await, Err(OdinS1Error::ListingError(_))));
}

#[test]
fn test_listing_urls () {
    let html = filepath_contents_as_string(&"tests/data/listing.html").unwrap();

    let urls = listing_urls_from_html( &html, BASE_URL, &["sentinel-1a".to_string()]).unwrap();
    println!("{urls:#?}");
    assert_eq!( urls, doc_urls( &["s1a_mp_1.kml", "s1a_mp_2.kml"]));

    let urls = listing_urls_from_html( &html, BASE_URL, &["sentinel-1a".to_string(), "sentinel-1c".to_string()]).unwrap();
    assert_eq!( urls.len(), 3);
    assert_eq!( urls[2], "https://sentinel.esa.int/documents/d/sentinel/s1c_mp_1.kml?version=2&download=true");
    assert_eq!( document_name( &urls[2]).unwrap(), "s1c_mp_1.kml");

    let res = listing_urls_from_html( &html, BASE_URL, &["sentinel-1b".to_string()]);
    assert!( matches!( res, Err(OdinS1Error::ListingError(_))));
}

#[test]
fn test_listing_unit_without_list () {
    // the list of the next unit does not belong to an empty section
    let html = r#"<html><body>
      <div class="sentinel-1a"><p>no plans published</p></div>
      <div class="sentinel-1c"><ul><li><a href="/documents/s1c_mp.kml">S1C</a></li></ul></div>
    </body></html>"#;

    let res = listing_urls_from_html( html, BASE_URL, &["sentinel-1a".to_string()]);
    assert!( matches!( res, Err(OdinS1Error::ListingError(_))));

    let urls = listing_urls_from_html( html, BASE_URL, &["sentinel-1c".to_string()]).unwrap();
    assert_eq!( urls, vec![ format!("{BASE_URL}/documents/s1c_mp.kml")]);

    // nested divs inside of a unit section are balanced
    let html = r#"<div class="sentinel-1a"><div class="intro">plans</div><ul><li><a href="/documents/s1a_mp.kml">S1A</a></li></ul></div>
      <div class="sentinel-1c"><ul><li><a href="/documents/s1c_mp.kml">S1C</a></li></ul></div>"#;
    let urls = listing_urls_from_html( html, BASE_URL, &["sentinel-1a".to_string()]).unwrap();
    assert_eq!( urls, vec![ format!("{BASE_URL}/documents/s1a_mp.kml")]);
}

#[test]
fn test_dedup () {
    let doc = filepath_contents_as_string(&"tests/data/s1a_mp_1.kml").unwrap();
    let segments = parse_kml( &doc).unwrap();

    let mut all = segments.clone();
    all.extend( segments.iter().cloned());
    let mut shifted = segments[0].clone();
    shifted.orbit_relative += 1; // same footprint, different attribute
    all.push( shifted);

    let deduped = dedup_segments( all);
    assert_eq!( deduped.len(), 4);
    assert_eq!( &deduped[..3], segments.as_slice()); // first occurrences, original order
}

#[test]
fn test_geojson_snapshot () {
    let doc = filepath_contents_as_string(&"tests/data/s1a_mp_2.kml").unwrap();
    let catalog = Catalog::new( parse_kml( &doc).unwrap());

    let s = catalog.to_geojson_string().unwrap();
    println!("{s}");
    assert!( s.contains("\"orbit_relative\""));
    assert!( s.contains("2024-03-05T10:02:30.500Z"));

    let restored = Catalog::from_geojson_str( &s).unwrap();
    assert_eq!( restored, catalog);

    assert!( segments_from_geojson_str( r#"{"type":"Point","coordinates":[1.0,2.0]}"#).is_err());
}

#[test]
fn test_geojson_float_precision () {
    let doc = r#"<kml><Document><Placemark>
      <TimeSpan><begin>2024-03-01T05:12:33.120</begin><end>2024-03-01T05:14:10.450</end></TimeSpan>
      <ExtendedData>
        <Data name="Mode"><value>IW</value></Data>
        <Data name="OrbitAbsolute"><value>52871</value></Data>
        <Data name="OrbitRelative"><value>12</value></Data>
      </ExtendedData>
      <LinearRing><coordinates>
        -119.12345678901234,35.98765432109876 -117.30000000000001,35.6 -117.8,37.91234567890123 -119.12345678901234,35.98765432109876
      </coordinates></LinearRing>
    </Placemark></Document></kml>"#;
    let parsed = parse_kml( doc).unwrap();

    let restored = segments_from_geojson_str( &Catalog::new( parsed.clone()).to_geojson_string().unwrap()).unwrap();
    assert_eq!( restored, parsed);

    // a cached copy has to be recognized as the same segment
    let mut all = parsed.clone();
    all.extend( restored);
    assert_eq!( dedup_segments( all).len(), 1);
}
