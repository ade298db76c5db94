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

use odin_s1collect::{OdinS1Error, S1CollectConfig, config::ESA_LISTING_URL, config_or_default, load_config};

// run with "cargo test --test test_config -- --nocapture"

#[test]
fn test_default_config () {
    let config = S1CollectConfig::default();
    assert_eq!( config.listing_url, "https://sentinel.esa.int/web/sentinel/missions/sentinel-1/observation-scenario/acquisition-segments");
    assert_eq!( config.listing_url, ESA_LISTING_URL);
    assert_eq!( config.unit_classes, vec!["sentinel-1a".to_string()]);

    let config = config_or_default( None::<&str>).unwrap();
    assert_eq!( config, S1CollectConfig::default());
}

#[test]
fn test_sample_config () {
    let config = load_config("configs/s1collect.ron").unwrap();
    println!("{config:#?}");
    assert_eq!( config, S1CollectConfig::default());
}

#[test]
fn test_partial_config () {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("s1collect.ron");
    std::fs::write( &path, r#"S1CollectConfig( request_timeout_secs: 5 )"#).unwrap();

    let config = load_config( &path).unwrap();
    assert_eq!( config.request_timeout_secs, 5);
    assert_eq!( config.listing_url, ESA_LISTING_URL);

    assert!( matches!( load_config( tmp.path().join("missing.ron")), Err(OdinS1Error::ConfigError(_))));
}
