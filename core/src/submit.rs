//! Caller-owned serialization of submissions.
//!
//! # Design
//! The builder and executor take no locks. A UI that wants at most one
//! exchange in flight owns a `SubmitSlot` and passes it to
//! `Composer::submit`; while a `SubmitPermit` is alive the slot reports
//! `Sending` and refuses new permits.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use crate::builder::build;
use crate::draft::RequestDraft;
use crate::executor::Executor;
use crate::fields::RawFields;
use crate::http::HttpMethod;
use crate::outcome::{Exchange, ExchangeOutcome};
use crate::transport::{Transport, UreqTransport};

/// Where the current submission stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionState {
    #[default]
    Idle,
    Sending,
    Succeeded,
    Failed,
}

impl SubmissionState {
    /// The form disables its inputs and the send button while this holds.
    pub fn is_busy(self) -> bool {
        self == SubmissionState::Sending
    }
}

/// Single-slot guard allowing at most one outstanding submission.
#[derive(Debug, Default)]
pub struct SubmitSlot {
    state: Mutex<SubmissionState>,
}

impl SubmitSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SubmissionState {
        *self.lock()
    }

    /// Claim the slot. Returns `None` while another submission is sending.
    /// A slot left in a terminal state is claimable again.
    pub fn try_begin(&self) -> Option<SubmitPermit<'_>> {
        let mut state = self.lock();
        if state.is_busy() {
            return None;
        }
        *state = SubmissionState::Sending;
        Some(SubmitPermit {
            slot: self,
            finished: false,
        })
    }

    /// Return a terminal slot to `Idle`. Has no effect while sending.
    pub fn reset(&self) {
        let mut state = self.lock();
        if !state.is_busy() {
            *state = SubmissionState::Idle;
        }
    }

    fn lock(&self) -> MutexGuard<'_, SubmissionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Proof that the holder owns the slot. Dropping it without calling
/// `finish` puts the slot back to `Idle`.
#[derive(Debug)]
pub struct SubmitPermit<'a> {
    slot: &'a SubmitSlot,
    finished: bool,
}

impl SubmitPermit<'_> {
    /// Record the terminal state for `exchange` and release the slot.
    pub fn finish(mut self, exchange: &Exchange) {
        *self.slot.lock() = match exchange.outcome {
            ExchangeOutcome::Success(_) => SubmissionState::Succeeded,
            ExchangeOutcome::Failure { .. } => SubmissionState::Failed,
        };
        self.finished = true;
    }
}

impl Drop for SubmitPermit<'_> {
    fn drop(&mut self) {
        if !self.finished {
            *self.slot.lock() = SubmissionState::Idle;
        }
    }
}

/// Builder and executor composed behind a submission slot.
#[derive(Debug, Clone, Default)]
pub struct Composer<T = UreqTransport> {
    executor: Executor<T>,
}

impl<T: Transport> Composer<T> {
    pub fn new(transport: T) -> Self {
        Self {
            executor: Executor::new(transport),
        }
    }

    pub fn executor(&self) -> &Executor<T> {
        &self.executor
    }

    /// Build and execute one request while holding `slot`.
    ///
    /// Returns `None`, without touching the network, when the slot is
    /// already sending.
    pub fn submit(
        &self,
        slot: &SubmitSlot,
        method: HttpMethod,
        url: &str,
        fields: &RawFields,
    ) -> Option<Exchange> {
        let permit = slot.try_begin()?;
        let exchange = self.executor.execute(build(method, url, fields));
        permit.finish(&exchange);
        Some(exchange)
    }

    /// `submit` for a form draft.
    pub fn submit_draft(&self, slot: &SubmitSlot, draft: &RequestDraft) -> Option<Exchange> {
        self.submit(slot, draft.method, &draft.url, &draft.fields)
    }
}
