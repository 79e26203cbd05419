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

//! Public writer handle and lifecycle management.

use std::{
    fs,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
    thread::{self, JoinHandle},
};

use bytes::Bytes;
use crossbeam::channel::{Sender, bounded};
use snafu::{ResultExt, ensure};
use tracing::info;

use crate::{
    Result,
    config::Config,
    error::{ClosingSnafu, CreateDirectorySnafu, SpawnWorkerSnafu, WorkerPanickedSnafu},
    worker::Worker,
};

/// A concurrency-safe writer with file rotation.
///
/// Any number of threads may call [`write`](Self::write) on a shared
/// reference; records are copied onto a bounded queue and a single
/// background worker serializes them to disk in arrival order. Once
/// [`close`](Self::close) has begun, new writes are rejected, but every
/// record accepted before that is flushed and synced before `close`
/// returns.
pub struct Writer {
    /// Shared configuration, immutable after construction.
    config: Arc<Config>,
    /// Sending half of the record queue. Revoked by `close` so the channel
    /// disconnects once in-flight writes finish enqueueing.
    tx: Mutex<Option<Sender<Bytes>>>,
    /// One-shot open → closing transition.
    closing: AtomicBool,
    /// Join handle of the worker thread; taken by `close`.
    worker: Mutex<Option<JoinHandle<Result<()>>>>,
}

impl Writer {
    /// Create a writer: validate the configuration, create the target
    /// directory recursively, and start the background worker.
    ///
    /// # Errors
    ///
    /// Invalid configuration, directory creation failure, or a failure to
    /// spawn the worker thread.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        fs::create_dir_all(&config.directory).context(CreateDirectorySnafu {
            path: &config.directory,
        })?;

        let config = Arc::new(config);
        let (tx, rx) = bounded(config.queue_capacity);
        let mut worker = Worker::new(rx, Arc::clone(&config));

        let handle = thread::Builder::new()
            .name("rollsink-worker".into())
            .spawn(move || worker.run())
            .context(SpawnWorkerSnafu)?;

        info!(directory = %config.directory.display(), "log writer started");

        Ok(Self {
            config,
            tx: Mutex::new(Some(tx)),
            closing: AtomicBool::new(false),
            worker: Mutex::new(Some(handle)),
        })
    }

    /// Submit one record and return its length.
    ///
    /// The bytes are copied before enqueueing; the caller's buffer is never
    /// retained. Blocks when the queue is full until the worker drains
    /// space — bounded memory over unbounded buffering.
    ///
    /// # Errors
    ///
    /// [`Error::Closing`](crate::Error::Closing) once [`close`](Self::close)
    /// has begun. Acceptance here does not imply the record survives a
    /// write or rotation failure inside the worker; those are only logged.
    pub fn write(&self, record: &[u8]) -> Result<usize> {
        ensure!(!self.closing.load(Ordering::SeqCst), ClosingSnafu);

        // The clone keeps the channel connected until this call finishes
        // enqueueing; `close` observes that through channel disconnection.
        let tx = self
            .tx
            .lock()
            .expect("sender lock poisoned")
            .as_ref()
            .cloned();
        let Some(tx) = tx else {
            return ClosingSnafu.fail();
        };

        let payload = Bytes::copy_from_slice(record);
        ensure!(tx.send(payload).is_ok(), ClosingSnafu);

        Ok(record.len())
    }

    /// Close the writer: reject new writes, drain everything accepted, and
    /// flush+sync the current file. Blocks until the worker has exited.
    ///
    /// A second call returns `Ok(())` without touching resources.
    ///
    /// # Errors
    ///
    /// Only the final flush+sync failure (or a panicked worker) surfaces;
    /// per-record errors during normal operation are logged by the worker.
    pub fn close(&self) -> Result<()> {
        if self.closing.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        info!("closing log writer");

        // Revoke the sender. The channel disconnects once every in-flight
        // write has finished enqueueing; the worker then drains the
        // remaining queue and exits.
        self.tx.lock().expect("sender lock poisoned").take();

        let handle = self.worker.lock().expect("worker lock poisoned").take();
        match handle {
            Some(handle) => match handle.join() {
                Ok(result) => result,
                Err(_) => WorkerPanickedSnafu.fail(),
            },
            None => Ok(()),
        }
    }

    /// The configuration this writer was built with.
    #[must_use]
    pub fn config(&self) -> &Config { &self.config }
}

impl Drop for Writer {
    fn drop(&mut self) {
        // Best-effort shutdown signal. The worker drains and exits on its
        // own once the sender is gone; nothing waits for it here.
        self.closing.store(true, Ordering::SeqCst);
        self.tx.lock().expect("sender lock poisoned").take();
    }
}
