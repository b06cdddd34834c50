//! Issues a descriptor over a `Transport` and normalizes what comes back.
//!
//! # Design
//! `Executor` holds only its transport and keeps no state between calls, so
//! overlapping calls are safe even though the intended policy is one
//! submission at a time (see `submit`). The clock starts right before the
//! transport is invoked and stops once the body text is in hand.

use std::time::Instant;

use log::{debug, warn};

use crate::http::RequestDescriptor;
use crate::outcome::{normalize, Exchange, ExchangeOutcome};
use crate::transport::{Transport, UreqTransport};

#[derive(Debug, Clone, Default)]
pub struct Executor<T = UreqTransport> {
    transport: T,
}

impl<T: Transport> Executor<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Perform one exchange. Never fails: transport errors become
    /// `ExchangeOutcome::Failure` and are not retried.
    pub fn execute(&self, request: RequestDescriptor) -> Exchange {
        debug!(
            "sending {} {} body={:?}",
            request.method, request.url, request.body
        );

        let started = Instant::now();
        let result = self.transport.send(&request);
        let elapsed_ms = elapsed_millis(started);

        let outcome = match result {
            Ok(response) => normalize(response),
            Err(err) => {
                warn!("{} {} failed after {elapsed_ms}ms: {err}", request.method, request.url);
                ExchangeOutcome::Failure {
                    message: err.into_message(),
                }
            }
        };

        Exchange {
            outcome,
            elapsed_ms,
        }
    }
}

fn elapsed_millis(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
