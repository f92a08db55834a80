// ============================================================================
// Quote Observer Interface
// Defines the contract for observing quote computations
// ============================================================================

use crate::domain::{ComponentQuote, QuoteId, QuoteKind, TokenId};
use chrono::{DateTime, Utc};
use num_bigint::BigInt;
use parking_lot::Mutex;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Events emitted by the quoting engine
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum QuoteEvent {
    /// Quote computation started for `amount`
    QuoteStarted {
        quote_id: QuoteId,
        kind: QuoteKind,
        basket: TokenId,
        amount: BigInt,
        timestamp: DateTime<Utc>,
    },

    /// One component was priced against the exchange
    ComponentQuoted {
        quote_id: QuoteId,
        quote: ComponentQuote,
        timestamp: DateTime<Utc>,
    },

    /// Quote computed successfully
    QuoteCompleted {
        quote_id: QuoteId,
        kind: QuoteKind,
        result: BigInt,
        timestamp: DateTime<Utc>,
    },

    /// Quote failed with reason
    QuoteFailed {
        quote_id: QuoteId,
        kind: QuoteKind,
        reason: String,
        timestamp: DateTime<Utc>,
    },
}

impl QuoteEvent {
    pub fn quote_id(&self) -> QuoteId {
        match self {
            QuoteEvent::QuoteStarted { quote_id, .. }
            | QuoteEvent::ComponentQuoted { quote_id, .. }
            | QuoteEvent::QuoteCompleted { quote_id, .. }
            | QuoteEvent::QuoteFailed { quote_id, .. } => *quote_id,
        }
    }
}

/// Observer trait for quote events
/// Implementations can handle logging, metrics, audit trails, etc.
pub trait QuoteObserver: Send + Sync {
    /// Handle a quote event
    fn on_event(&self, event: QuoteEvent);

    /// Batch event handler (optional optimization)
    fn on_events(&self, events: Vec<QuoteEvent>) {
        for event in events {
            self.on_event(event);
        }
    }
}

/// No-op observer for testing
pub struct NoOpQuoteObserver;

impl QuoteObserver for NoOpQuoteObserver {
    fn on_event(&self, _event: QuoteEvent) {}
}

/// Logging observer
pub struct LoggingQuoteObserver;

impl QuoteObserver for LoggingQuoteObserver {
    fn on_event(&self, event: QuoteEvent) {
        match &event {
            QuoteEvent::QuoteFailed { reason, .. } => {
                tracing::warn!(quote_id = %event.quote_id(), %reason, "quote failed");
            },
            _ => tracing::debug!("Quoting engine event: {:?}", event),
        }
    }
}

/// Observer that keeps every event in memory
#[derive(Default)]
pub struct RecordingQuoteObserver {
    events: Mutex<Vec<QuoteEvent>>,
}

impl RecordingQuoteObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all events received so far
    pub fn events(&self) -> Vec<QuoteEvent> {
        self.events.lock().clone()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl QuoteObserver for RecordingQuoteObserver {
    fn on_event(&self, event: QuoteEvent) {
        self.events.lock().push(event);
    }

    fn on_events(&self, events: Vec<QuoteEvent>) {
        self.events.lock().extend(events);
    }
}
