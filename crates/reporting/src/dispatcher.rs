//! Fire-and-forget report dispatch

use crate::narration::Narrator;
use crate::payload::ReportPayload;
use crate::sink::ReportSink;
use crate::ReportError;
use ocular::EyeSample;
use risk_classifier::{CognitiveAssessment, TargetTestResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// Dispatcher configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    /// Upper bound on a single sink write
    pub sink_timeout_ms: u64,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            sink_timeout_ms: 2_000,
        }
    }
}

/// Narrates assessments and hands the payload to every sink
///
/// Sink failures never propagate; the frame loop does not wait on them.
#[derive(Clone)]
pub struct ReportDispatcher {
    narrator: Narrator,
    sinks: Vec<Arc<dyn ReportSink>>,
    config: DispatcherConfig,
}

impl ReportDispatcher {
    pub fn new(narrator: Narrator, config: DispatcherConfig) -> Self {
        info!(
            enhancer = narrator.has_enhancer(),
            sink_timeout_ms = config.sink_timeout_ms,
            "Creating report dispatcher"
        );
        Self {
            narrator,
            sinks: Vec::new(),
            config,
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn ReportSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Spawn delivery on the current runtime
    ///
    /// The handle is only for callers that want to wait; dropping it is fine.
    pub fn dispatch(
        &self,
        assessment: CognitiveAssessment,
        latest_sample: Option<EyeSample>,
        target_test: Option<TargetTestResult>,
    ) -> JoinHandle<ReportPayload> {
        let dispatcher = self.clone();
        tokio::spawn(async move {
            dispatcher
                .deliver(assessment, latest_sample, target_test)
                .await
        })
    }

    /// Narrate, stamp and store one assessment, waiting for every sink
    pub async fn deliver(
        &self,
        assessment: CognitiveAssessment,
        latest_sample: Option<EyeSample>,
        target_test: Option<TargetTestResult>,
    ) -> ReportPayload {
        let report = self.narrator.narrate(assessment).await;
        let payload = ReportPayload::new(report, latest_sample, target_test);

        for sink in &self.sinks {
            match self.store(sink.as_ref(), &payload).await {
                Ok(()) => debug!(sink = sink.name(), report_id = %payload.id, "Report stored"),
                Err(e) => error!(sink = sink.name(), report_id = %payload.id, "Report sink failed: {}", e),
            }
        }

        payload
    }

    async fn store(&self, sink: &dyn ReportSink, payload: &ReportPayload) -> Result<(), ReportError> {
        let timeout = Duration::from_millis(self.config.sink_timeout_ms);
        tokio::time::timeout(timeout, sink.store(payload))
            .await
            .map_err(|_| ReportError::Timeout(self.config.sink_timeout_ms))?
    }
}

impl Default for ReportDispatcher {
    fn default() -> Self {
        Self::new(Narrator::algorithmic(), DispatcherConfig::default())
    }
}

impl std::fmt::Debug for ReportDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportDispatcher")
            .field("narrator", &self.narrator)
            .field(
                "sinks",
                &self.sinks.iter().map(|s| s.name().to_string()).collect::<Vec<_>>(),
            )
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::narration::test_support::impaired_assessment;
    use crate::narration::NarrativeSource;
    use crate::sink::InMemorySink;
    use async_trait::async_trait;

    struct BrokenSink;

    #[async_trait]
    impl ReportSink for BrokenSink {
        fn name(&self) -> &str {
            "broken"
        }

        async fn store(&self, _payload: &ReportPayload) -> Result<(), ReportError> {
            Err(ReportError::Sink {
                sink: "broken".into(),
                reason: "disk full".into(),
            })
        }
    }

    struct StuckSink;

    #[async_trait]
    impl ReportSink for StuckSink {
        fn name(&self) -> &str {
            "stuck"
        }

        async fn store(&self, _payload: &ReportPayload) -> Result<(), ReportError> {
            tokio::time::sleep(Duration::from_secs(3_600)).await;
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_dispatch_reaches_every_sink() {
        let first = Arc::new(InMemorySink::new(10));
        let second = Arc::new(InMemorySink::new(10));
        let dispatcher = ReportDispatcher::default()
            .with_sink(first.clone())
            .with_sink(second.clone());

        let payload = dispatcher
            .dispatch(impaired_assessment(), None, None)
            .await
            .unwrap();

        assert_eq!(payload.report.source, NarrativeSource::Algorithmic);
        assert_eq!(first.latest().unwrap().id, payload.id);
        assert_eq!(second.latest().unwrap().id, payload.id);
    }

    #[tokio::test]
    async fn test_sink_failure_is_swallowed() {
        let memory = Arc::new(InMemorySink::new(10));
        let dispatcher = ReportDispatcher::default()
            .with_sink(Arc::new(BrokenSink))
            .with_sink(memory.clone());

        let handle = dispatcher.dispatch(impaired_assessment(), None, None);
        assert!(handle.await.is_ok());
        // Later sinks still receive the report
        assert_eq!(memory.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stuck_sink_times_out() {
        let memory = Arc::new(InMemorySink::new(10));
        let dispatcher = ReportDispatcher::new(
            Narrator::algorithmic(),
            DispatcherConfig { sink_timeout_ms: 50 },
        )
        .with_sink(Arc::new(StuckSink))
        .with_sink(memory.clone());

        dispatcher.deliver(impaired_assessment(), None, None).await;
        assert_eq!(memory.len(), 1);
    }

    #[tokio::test]
    async fn test_payload_carries_target_test() {
        let dispatcher = ReportDispatcher::default();
        let test = TargetTestResult::from_trials(12, vec![300.0; 9]);
        let payload = dispatcher
            .deliver(impaired_assessment(), None, Some(test.clone()))
            .await;
        assert_eq!(payload.target_test, Some(test));
    }
}
