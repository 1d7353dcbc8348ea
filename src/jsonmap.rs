/*
 * SPDX-FileCopyrightText: Copyright (c) 2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
 * SPDX-License-Identifier: MIT
 *
 * Permission is hereby granted, free of charge, to any person obtaining a
 * copy of this software and associated documentation files (the "Software"),
 * to deal in the Software without restriction, including without limitation
 * the rights to use, copy, modify, merge, publish, distribute, sublicense,
 * and/or sell copies of the Software, and to permit persons to whom the
 * Software is furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in
 * all copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL
 * THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
 * FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
 * DEALINGS IN THE SOFTWARE.
 */

// jsonmap.rs
// Helper functions for pulling values and links out of Redfish JSON documents.
// A missing key is returned as an error value, never a panic.

use crate::RedfishError;

// JsonMap abstracts over the map types a JSON object can be read from.
pub trait JsonMap {
    // get_value retrieves a reference to a JSON value by key.
    fn get_value(&self, key: &str) -> Option<&serde_json::Value>;
}

impl JsonMap for serde_json::Map<String, serde_json::Value> {
    fn get_value(&self, key: &str) -> Option<&serde_json::Value> {
        self.get(key)
    }
}

fn missing_key_error(key: &str, url: &str) -> RedfishError {
    RedfishError::MissingKey {
        key: key.to_string(),
        url: url.to_string(),
    }
}

fn invalid_type_error(key: &str, expected_type: &str, url: &str) -> RedfishError {
    RedfishError::InvalidKeyType {
        key: key.to_string(),
        expected_type: expected_type.to_string(),
        url: url.to_string(),
    }
}

// get_value retrieves a JSON value from a map, returning MissingKey
// error if the key is not found.
pub fn get_value<'a, M: JsonMap>(
    map: &'a M,
    key: &str,
    url: &str,
) -> Result<&'a serde_json::Value, RedfishError> {
    map.get_value(key).ok_or_else(|| missing_key_error(key, url))
}

// get_str extracts a string value from a JSON map, returning appropriate
// errors if the key is missing or the value is not a string.
pub fn get_str<'a, M: JsonMap>(map: &'a M, key: &str, url: &str) -> Result<&'a str, RedfishError> {
    get_value(map, key, url)?
        .as_str()
        .ok_or_else(|| invalid_type_error(key, "string", url))
}

// get_object extracts an object (Map) from a JSON map, returning
// appropriate errors if the key is missing or the value is not an object.
pub fn get_object<'a, M: JsonMap>(
    map: &'a M,
    key: &str,
    url: &str,
) -> Result<&'a serde_json::Map<String, serde_json::Value>, RedfishError> {
    get_value(map, key, url)?
        .as_object()
        .ok_or_else(|| invalid_type_error(key, "object", url))
}

// get_array extracts an array from a JSON map.
pub fn get_array<'a, M: JsonMap>(
    map: &'a M,
    key: &str,
    url: &str,
) -> Result<&'a Vec<serde_json::Value>, RedfishError> {
    get_value(map, key, url)?
        .as_array()
        .ok_or_else(|| invalid_type_error(key, "array", url))
}

// as_object views a whole document as a map. Redfish resources are always
// objects, anything else is a shape error.
pub fn as_object<'a>(
    value: &'a serde_json::Value,
    url: &str,
) -> Result<&'a serde_json::Map<String, serde_json::Value>, RedfishError> {
    value
        .as_object()
        .ok_or_else(|| invalid_type_error("<document>", "object", url))
}

// follow walks a sequence of object keys, e.g. ["Oem", "Hpe", "Links", "Boot"].
// The error names the full dotted path up to the failing segment.
pub fn follow<'a>(
    value: &'a serde_json::Value,
    segments: &[String],
    url: &str,
) -> Result<&'a serde_json::Value, RedfishError> {
    let mut current = value;
    for (i, segment) in segments.iter().enumerate() {
        let key = segments[..=i].join(".");
        let map = current
            .as_object()
            .ok_or_else(|| invalid_type_error(&segments[..i].join("."), "object", url))?;
        current = map.get(segment).ok_or_else(|| missing_key_error(&key, url))?;
    }
    Ok(current)
}

// link_at follows `segments` and returns the `@odata.id` of the object found there.
pub fn link_at<'a>(
    value: &'a serde_json::Value,
    segments: &[String],
    url: &str,
) -> Result<&'a str, RedfishError> {
    let target = follow(value, segments, url)?;
    let map = target
        .as_object()
        .ok_or_else(|| invalid_type_error(&segments.join("."), "object", url))?;
    get_str(map, "@odata.id", url)
}

// odata_id returns the `@odata.id` link stored under `key`, e.g. root["Systems"]["@odata.id"].
pub fn odata_id<'a, M: JsonMap>(map: &'a M, key: &str, url: &str) -> Result<&'a str, RedfishError> {
    let link = get_object(map, key, url)?;
    link.get("@odata.id")
        .ok_or_else(|| missing_key_error(&format!("{key}.@odata.id"), url))?
        .as_str()
        .ok_or_else(|| invalid_type_error(&format!("{key}.@odata.id"), "string", url))
}

// action_target returns `Actions.<action>.target`, the URI to POST an action to.
pub fn action_target<'a>(
    value: &'a serde_json::Value,
    action: &str,
    url: &str,
) -> Result<&'a str, RedfishError> {
    let path = ["Actions".to_string(), action.to_string(), "target".to_string()];
    follow(value, &path, url)?
        .as_str()
        .ok_or_else(|| invalid_type_error(&path.join("."), "string", url))
}
