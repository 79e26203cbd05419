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

//! Concurrency-safe rotating file sink for byte records.
//!
//! Producers call [`Writer::write`] from any thread; each record is copied
//! onto a bounded queue and a single background worker appends it to the
//! current log file, rotating to a fresh file when it grows past
//! [`Config::max_file_size`] or older than [`Config::max_file_lifetime`].
//! [`Writer::close`] drains everything accepted and fsyncs before
//! returning.
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use rollsink::{FlushPolicy, WriterBuilder};
//!
//! # fn main() -> rollsink::Result<()> {
//! let writer = WriterBuilder::new("/var/log/myapp")
//!     .max_file_size(64 * 1024 * 1024)
//!     .max_file_lifetime(Duration::from_secs(24 * 60 * 60))
//!     .flush(FlushPolicy::OnRotation)
//!     .build()?;
//!
//! writer.write(b"hello\n")?;
//! writer.close()?;
//! # Ok(())
//! # }
//! ```
//!
//! Records are appended verbatim, with no framing, delimiter, or header;
//! framing, if needed, is the producer's concern. Rotated files are left in
//! place under the names produced by [`Config::file_name`].

pub mod builder;
pub mod config;
pub mod error;
mod file;
pub mod path;
mod worker;
mod writer;

pub use builder::WriterBuilder;
pub use config::{Config, FlushPolicy};
pub use error::{Error, Result};
pub use path::{FileNameFn, default_file_name};
pub use writer::Writer;
