// Copyright 2025 Crrow
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Log file naming.

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};

/// Produces the name of each newly created log file.
///
/// Must return a collision-free name on every call. Do not rely on a
/// timestamp alone: rotations under high throughput can land on the same
/// second.
pub type FileNameFn = Arc<dyn Fn() -> String + Send + Sync>;

/// Default naming: RFC3339 UTC timestamp at second precision plus a 3-byte
/// random hex suffix, e.g. `2026-08-07T12:00:00Z-a1b2c3.log`.
#[must_use]
pub fn default_file_name() -> String {
    let suffix: [u8; 3] = rand::random();
    format!(
        "{}-{:02x}{:02x}{:02x}.log",
        Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        suffix[0],
        suffix[1],
        suffix[2],
    )
}
