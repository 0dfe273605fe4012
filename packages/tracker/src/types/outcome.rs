//! Per-site outcomes and the joined run result.

use chrono::{DateTime, Utc};

use crate::error::SiteError;
use crate::types::quote::Quote;

/// Terminal state of one site's task: a quote or a classified failure.
/// Exactly one outcome exists per configured site per run.
#[derive(Debug, Clone, PartialEq)]
pub enum SiteOutcome {
    Success(Quote),
    Failure { site: String, error: SiteError },
}

impl SiteOutcome {
    /// The site this outcome belongs to.
    pub fn site(&self) -> &str {
        match self {
            SiteOutcome::Success(quote) => &quote.site,
            SiteOutcome::Failure { site, .. } => site,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SiteOutcome::Success(_))
    }
}

/// Classification of a finished run, derived from the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Every site yielded a quote
    Complete,

    /// Some sites failed, some yielded quotes
    Degraded,

    /// No site yielded a quote
    Failed,
}

/// All outcomes of one run, joined in configuration order.
///
/// `quotes.len() + errors.len()` always equals the number of recorded
/// sites: outcomes are only added through [`AggregateResult::record`],
/// which files each one exactly once.
#[derive(Debug, Clone)]
pub struct AggregateResult {
    /// Run start time; also the snapshot timestamp
    pub started_at: DateTime<Utc>,

    /// Product under tracking
    pub product: String,

    /// Successful observations, configuration order
    pub quotes: Vec<Quote>,

    /// Failures with their site identifiers, configuration order
    pub errors: Vec<(String, SiteError)>,

    sites_tracked: usize,
}

impl AggregateResult {
    pub fn new(product: impl Into<String>, started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            product: product.into(),
            quotes: Vec::new(),
            errors: Vec::new(),
            sites_tracked: 0,
        }
    }

    /// File one site's outcome. Call in configuration order: the vectors
    /// preserve insertion order.
    pub fn record(&mut self, outcome: SiteOutcome) {
        self.sites_tracked += 1;
        match outcome {
            SiteOutcome::Success(quote) => self.quotes.push(quote),
            SiteOutcome::Failure { site, error } => self.errors.push((site, error)),
        }
    }

    /// Number of sites that reached a terminal state this run.
    pub fn sites_tracked(&self) -> usize {
        self.sites_tracked
    }

    /// Number of successful quotes.
    pub fn successes(&self) -> usize {
        self.quotes.len()
    }

    pub fn status(&self) -> RunStatus {
        if self.quotes.is_empty() {
            RunStatus::Failed
        } else if self.errors.is_empty() {
            RunStatus::Complete
        } else {
            RunStatus::Degraded
        }
    }
}
