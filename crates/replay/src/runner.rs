//! Session replay loop

use crate::command::ReplayCommand;
use crate::ReplayError;
use feature_engine::{RunningStatistics, StatisticalFeatures};
use ocular::{CalibrationState, CognitiveStatus, EyeSample};
use pipeline::OcularPipeline;
use reporting::{ReportDispatcher, ReportPayload};
use risk_classifier::{CognitiveAssessment, TargetTestResult};
use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, info, warn};

/// One NDJSON output line
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplayEvent {
    Sample(EyeSample),
    Assessment(CognitiveAssessment),
    Calibrated(CalibrationState),
    CalibrationFailed { reason: String },
    TargetTest(TargetTestResult),
    Reset { frames: u64 },
}

/// Counters for a finished replay
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReplaySummary {
    pub lines: u64,
    pub frames: u64,
    pub skipped: u64,
    pub reports: u64,
    /// Instantaneous score over every tracked sample of the session
    pub cognitive_score: StatisticalFeatures,
    /// Band of the session's mean score; absent without tracked samples
    pub cognitive_status: Option<CognitiveStatus>,
}

pub struct ReplayRunner {
    pipeline: OcularPipeline,
    dispatcher: ReportDispatcher,
    report_every: u64,
    assessed_frames: u64,
    pending: Vec<JoinHandle<ReportPayload>>,
    scores: RunningStatistics,
    summary: ReplaySummary,
}

impl ReplayRunner {
    pub fn new(pipeline: OcularPipeline, dispatcher: ReportDispatcher, report_every: u64) -> Self {
        info!(report_every, sinks = dispatcher.sink_count(), "Creating replay runner");
        Self {
            pipeline,
            dispatcher,
            report_every,
            assessed_frames: 0,
            pending: Vec::new(),
            scores: RunningStatistics::new(),
            summary: ReplaySummary::default(),
        }
    }

    pub fn pipeline(&self) -> &OcularPipeline {
        &self.pipeline
    }

    /// Reports dispatched but not yet collected
    pub fn pending_reports(&self) -> usize {
        self.pending.len()
    }

    pub fn reports_delivered(&self) -> u64 {
        self.summary.reports
    }

    /// Apply one command and return the output lines it produces
    ///
    /// Must run inside a tokio runtime; reports are spawned, not awaited.
    pub fn handle(&mut self, command: ReplayCommand) -> Vec<ReplayEvent> {
        if let Some(input) = command.frame_input() {
            self.summary.frames += 1;
            let output = self.pipeline.process_frame(&input);
            if output.sample.is_tracked() {
                self.scores.push(output.sample.cognitive_score);
            }
            let mut events = vec![ReplayEvent::Sample(output.sample)];

            if let Some(assessment) = output.assessment {
                self.assessed_frames += 1;
                if self.report_every > 0 && self.assessed_frames % self.report_every == 0 {
                    self.dispatch(assessment.clone());
                }
                events.push(ReplayEvent::Assessment(assessment));
            }
            return events;
        }

        match command {
            ReplayCommand::Calibrate(true) => match self.pipeline.calibrate() {
                Ok(state) => vec![ReplayEvent::Calibrated(state)],
                Err(e) => {
                    warn!("Calibration rejected: {}", e);
                    vec![ReplayEvent::CalibrationFailed {
                        reason: e.to_string(),
                    }]
                }
            },
            ReplayCommand::TargetTest(input) => {
                let result = input.into_result();
                self.pipeline.set_target_test(result.clone());
                vec![ReplayEvent::TargetTest(result)]
            }
            ReplayCommand::Reset(true) => {
                let frames = self.pipeline.frames_processed();
                self.pipeline.reset();
                self.assessed_frames = 0;
                vec![ReplayEvent::Reset { frames }]
            }
            _ => Vec::new(),
        }
    }

    /// Replay every line of `reader`, writing NDJSON events to `writer`
    ///
    /// Malformed lines are logged and skipped. At end of input the current
    /// assessment is reported and every outstanding report awaited.
    pub async fn run<R, W>(mut self, reader: R, mut writer: W) -> Result<ReplaySummary, ReplayError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            self.summary.lines += 1;
            let command = match ReplayCommand::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    warn!(line = self.summary.lines, "Skipping malformed input: {}", e);
                    self.summary.skipped += 1;
                    continue;
                }
            };

            for event in self.handle(command) {
                write_event(&mut writer, &event).await?;
            }
            self.reap_finished().await;
        }

        if self.pipeline.frames_processed() > 0 {
            let assessment = self.pipeline.assess();
            write_event(&mut writer, &ReplayEvent::Assessment(assessment.clone())).await?;
            self.dispatch(assessment);
        }
        writer.flush().await?;

        for handle in std::mem::take(&mut self.pending) {
            let outcome = handle.await;
            self.record(outcome);
        }

        self.summary.cognitive_score = self.scores.features();
        self.summary.cognitive_status = (self.scores.count() > 0)
            .then(|| CognitiveStatus::from_score(self.summary.cognitive_score.mean));
        info!(
            lines = self.summary.lines,
            frames = self.summary.frames,
            skipped = self.summary.skipped,
            reports = self.summary.reports,
            mean_score = self.summary.cognitive_score.mean,
            status = self.summary.cognitive_status.map(|s| s.label()).unwrap_or("n/a"),
            "Replay finished"
        );
        Ok(self.summary)
    }

    /// Collect report tasks that have already completed
    pub async fn reap_finished(&mut self) {
        let (finished, running): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|handle| handle.is_finished());
        self.pending = running;

        for handle in finished {
            let outcome = handle.await;
            self.record(outcome);
        }
    }

    fn record(&mut self, outcome: Result<ReportPayload, JoinError>) {
        match outcome {
            Ok(payload) => {
                debug!(report_id = %payload.id, "Report delivered");
                self.summary.reports += 1;
            }
            Err(e) => warn!("Report task failed: {}", e),
        }
    }

    fn dispatch(&mut self, assessment: CognitiveAssessment) {
        let handle = self.dispatcher.dispatch(
            assessment,
            self.pipeline.latest_sample().cloned(),
            self.pipeline.target_test().cloned(),
        );
        self.pending.push(handle);
    }
}

async fn write_event<W: AsyncWrite + Unpin>(writer: &mut W, event: &ReplayEvent) -> Result<(), ReplayError> {
    let mut line = serde_json::to_vec(event)?;
    line.push(b'\n');
    writer.write_all(&line).await?;
    Ok(())
}
