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
use serde::{Deserialize, Serialize};

use crate::model::DirectoryEntry;

/// How an OData type fragment is compared with a directory entry's `@odata.type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Case-insensitive substring. `#Bios.` also matches `#HpeBios.v1.HpeBios`
    /// style names if a controller ever has one.
    #[default]
    Substring,
    /// The type must begin with the fragment, so `#Bios.` only matches the
    /// `#Bios.` namespace.
    Segment,
}

/// Picks directory entries of one type out of the resource directory.
#[derive(Debug, Clone)]
pub struct TypeMatcher {
    fragment: String,
    id_contains: Option<String>,
    mode: MatchMode,
}

impl TypeMatcher {
    pub fn new(fragment: &str, id_contains: Option<&str>, mode: MatchMode) -> Self {
        TypeMatcher {
            fragment: fragment.to_lowercase(),
            id_contains: id_contains.map(str::to_lowercase),
            mode,
        }
    }

    pub fn is_match(&self, entry: &DirectoryEntry) -> bool {
        let Some(odata_type) = entry.odata_type.as_deref() else {
            return false;
        };
        let odata_type = odata_type.to_lowercase();
        let type_ok = match self.mode {
            MatchMode::Substring => odata_type.contains(&self.fragment),
            MatchMode::Segment => odata_type.starts_with(&self.fragment),
        };
        type_ok
            && self
                .id_contains
                .as_ref()
                .is_none_or(|scope| entry.odata_id.to_lowercase().contains(scope))
    }

    /// Matching entries in directory order, minus settings shadows of other entries.
    pub fn select<'a>(&self, entries: &'a [DirectoryEntry]) -> Vec<&'a DirectoryEntry> {
        entries
            .iter()
            .filter(|e| self.is_match(e))
            .filter(|e| !is_settings_shadow(e, entries))
            .collect()
    }
}

fn normalise(id: &str) -> String {
    id.trim_end_matches('/').to_lowercase()
}

// An entry at `<other>/settings` where `<other>` is also in the directory.
fn is_settings_shadow(entry: &DirectoryEntry, entries: &[DirectoryEntry]) -> bool {
    let id = normalise(&entry.odata_id);
    let Some(parent) = id.strip_suffix("/settings") else {
        return false;
    };
    entries.iter().any(|other| normalise(&other.odata_id) == parent)
}
