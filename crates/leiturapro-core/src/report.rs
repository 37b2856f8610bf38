//! Report slots for asynchronous AI results.
//!
//! A slot holds the latest result of one kind of request. Starting a new
//! request supersedes any in-flight one: results delivered with an older
//! ticket are discarded (last writer wins). Slots are separate from the
//! entity store, so a slow or failed request never touches classroom data.

use serde::Serialize;

/// Handle for one request against a [`ReportSlot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Ticket(u64);

/// Where a slot stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStatus {
    Idle,
    Pending,
    Ready,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportSlot<T> {
    issued: u64,
    pending: Option<Ticket>,
    value: Option<T>,
    error: Option<String>,
}

impl<T> Default for ReportSlot<T> {
    fn default() -> Self {
        Self {
            issued: 0,
            pending: None,
            value: None,
            error: None,
        }
    }
}

impl<T> ReportSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request. Any earlier pending ticket becomes stale.
    pub fn begin(&mut self) -> Ticket {
        self.issued += 1;
        let ticket = Ticket(self.issued);
        self.pending = Some(ticket);
        self.error = None;
        ticket
    }

    /// Deliver a result. Returns `false` (and drops the value) when the
    /// ticket has been superseded.
    pub fn complete(&mut self, ticket: Ticket, value: T) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.pending = None;
        self.value = Some(value);
        self.error = None;
        true
    }

    /// Record a failure. The previous value is kept as is.
    pub fn fail(&mut self, ticket: Ticket, message: impl Into<String>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.pending = None;
        self.error = Some(message.into());
        true
    }

    /// Drop the value, any error, and any pending request.
    pub fn clear(&mut self) {
        self.pending = None;
        self.value = None;
        self.error = None;
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.pending == Some(ticket)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn status(&self) -> SlotStatus {
        if self.pending.is_some() {
            SlotStatus::Pending
        } else if self.error.is_some() {
            SlotStatus::Failed
        } else if self.value.is_some() {
            SlotStatus::Ready
        } else {
            SlotStatus::Idle
        }
    }
}
