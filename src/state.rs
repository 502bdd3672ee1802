//! Application state: the single held invoice record and the clock used to
//! date it.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use parking_lot::RwLock;

use crate::invoice::models::InvoiceRecord;

/// Source of "today" for issue dates.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Local calendar date of the host.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always returns the same date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

pub struct AppState {
    current: RwLock<Option<Arc<InvoiceRecord>>>,
    clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            current: RwLock::new(None),
            clock,
        }
    }

    /// Snapshot of the held record. Callers render from this one `Arc` so
    /// both copies come from the same instance.
    pub fn current(&self) -> Option<Arc<InvoiceRecord>> {
        self.current.read().clone()
    }

    /// Replace the held record wholesale, returning the previous one.
    pub fn replace(&self, record: InvoiceRecord) -> Option<Arc<InvoiceRecord>> {
        self.current.write().replace(Arc::new(record))
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
