//! Response logger / submitter
//!
//! Debug sessions hand the line straight back for the experimenter to see.
//! Every other session posts it on a detached task: the trial flow never
//! waits for the collector, nothing is retried, and failures are only
//! logged.

pub mod transport;

pub use transport::{HttpTransport, Transport};

use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinSet;

use crate::trial::TrialRecord;

/// Where a record went
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Debug subject: shown locally, never sent
    Surfaced(String),
    /// Handed to the transport in the background
    Dispatched,
    /// No async runtime to send from; the record is lost
    Dropped,
}

pub struct Submitter {
    transport: Arc<dyn Transport>,
    in_flight: JoinSet<()>,
}

impl Submitter {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            in_flight: JoinSet::new(),
        }
    }

    pub fn submit(&mut self, record: &TrialRecord, debug: bool) -> Delivery {
        let line = record.to_line();

        if debug {
            tracing::info!(record = %record, "Debug result");
            return Delivery::Surfaced(line);
        }

        let Ok(handle) = Handle::try_current() else {
            tracing::warn!(record = %record, "No runtime available, result not sent");
            return Delivery::Dropped;
        };

        let transport = Arc::clone(&self.transport);
        let trial = record.trial_number;
        self.in_flight.spawn_on(
            async move {
                match transport.send(line).await {
                    Ok(()) => tracing::debug!(trial, "Result delivered"),
                    Err(e) => tracing::warn!(trial, error = %e, "Result submission failed"),
                }
            },
            &handle,
        );
        Delivery::Dispatched
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Wait up to `timeout` for outstanding posts; returns how many were
    /// abandoned. Used only when the program is about to exit.
    pub async fn drain(&mut self, timeout: Duration) -> usize {
        let wait_all = async {
            while self.in_flight.join_next().await.is_some() {}
        };
        if tokio::time::timeout(timeout, wait_all).await.is_err() {
            let abandoned = self.in_flight.len();
            tracing::warn!(abandoned, "Gave up waiting for result submissions");
            self.in_flight.abort_all();
            return abandoned;
        }
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DisplayPair;
    use crate::core::error::{BookError, Result};
    use crate::core::types::{Condition, Side};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Capture {
        lines: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Transport for Capture {
        async fn send(&self, line: String) -> Result<()> {
            self.lines.lock().unwrap().push(line);
            Ok(())
        }
    }

    struct Failing;

    #[async_trait]
    impl Transport for Failing {
        async fn send(&self, _line: String) -> Result<()> {
            Err(BookError::Transport("down".into()))
        }
    }

    fn record() -> TrialRecord {
        TrialRecord {
            subject_id: "S7".into(),
            trial_number: 1,
            item1: "dog".into(),
            item2: "cat".into(),
            word_type: Condition::Or,
            display_type: DisplayPair::new(Condition::And, Condition::Or),
            side: Side::Left,
            response: Condition::And,
        }
    }

    #[test]
    fn test_debug_never_touches_transport() {
        let capture = Arc::new(Capture::default());
        let mut submitter = Submitter::new(capture.clone());
        let delivery = submitter.submit(&record(), true);
        assert_eq!(delivery, Delivery::Surfaced("S7,1,dog,cat,or,and/or,left,and\n".into()));
        assert!(capture.lines.lock().unwrap().is_empty());
    }

    #[test]
    fn test_without_runtime_record_dropped() {
        let capture = Arc::new(Capture::default());
        let mut submitter = Submitter::new(capture.clone());
        assert_eq!(submitter.submit(&record(), false), Delivery::Dropped);
    }

    #[tokio::test]
    async fn test_dispatch_and_drain() {
        let capture = Arc::new(Capture::default());
        let mut submitter = Submitter::new(capture.clone());
        assert_eq!(submitter.submit(&record(), false), Delivery::Dispatched);
        assert_eq!(submitter.drain(Duration::from_secs(1)).await, 0);
        assert_eq!(
            *capture.lines.lock().unwrap(),
            vec!["S7,1,dog,cat,or,and/or,left,and\n".to_string()]
        );
    }

    #[tokio::test]
    async fn test_failures_are_swallowed() {
        let mut submitter = Submitter::new(Arc::new(Failing));
        assert_eq!(submitter.submit(&record(), false), Delivery::Dispatched);
        assert_eq!(submitter.drain(Duration::from_secs(1)).await, 0);
        assert_eq!(submitter.in_flight(), 0);
    }
}
