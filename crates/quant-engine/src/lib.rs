//! Prediction engine service entrypoint.
//!
//! Sets up the service logger, then hands control to the message consumer.

use std::io::{self, BufRead, StdinLock};

use anyhow::Context;
use quant_observe::{LoggerHandle, LoggerRegistry};

pub const SERVICE_LOGGER: &str = "prediction-engine";

/// Message-queue consumption loop, driven once after logging is set up.
pub trait Consume {
    fn consume(&mut self) -> anyhow::Result<()>;
}

/// Stand-in queue reading one message per line until end of input.
pub struct LineQueue<R> {
    reader: R,
    logger: LoggerHandle,
    received: usize,
}

impl LineQueue<StdinLock<'static>> {
    pub fn stdin(logger: LoggerHandle) -> Self {
        Self::new(io::stdin().lock(), logger)
    }
}

impl<R: BufRead> LineQueue<R> {
    pub fn new(reader: R, logger: LoggerHandle) -> Self {
        Self {
            reader,
            logger,
            received: 0,
        }
    }

    /// Number of non-empty messages consumed so far.
    pub fn received(&self) -> usize {
        self.received
    }
}

impl<R: BufRead> Consume for LineQueue<R> {
    fn consume(&mut self) -> anyhow::Result<()> {
        let mut line = String::new();
        loop {
            line.clear();
            let n = self
                .reader
                .read_line(&mut line)
                .context("failed to read from queue")?;
            if n == 0 {
                break;
            }

            let message = line.trim();
            if message.is_empty() {
                continue;
            }
            self.received += 1;
            self.logger.debug(format_args!("received message: {message}"))?;
        }

        self.logger
            .info(format_args!("queue drained after {} messages", self.received))?;
        Ok(())
    }
}

/// Acquire the service logger, announce start-up and run `consumer` to completion.
pub fn run(registry: &LoggerRegistry, mut consumer: impl Consume) -> anyhow::Result<()> {
    let logger = registry.acquire(SERVICE_LOGGER);
    logger.info("Starting Prediction Engine Service...")?;
    tracing::debug!(logger = logger.name(), "handing control to consumer");

    consumer.consume()
}
