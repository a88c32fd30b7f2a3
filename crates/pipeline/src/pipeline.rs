//! Ocular biomarker pipeline

use crate::{PipelineConfig, PipelineError};
use landmarks::{FrameInput, LandmarkFrame, Point2};
use ocular::{
    cognitive_score, CalibrationState, EventDetector, EyeMetricExtractor, EyeSample,
    OcularError, SampleStatus, ScoreInputs, ScreenMapper, TemporalTracker,
};
use ring_buffer::RingBuffer;
use risk_classifier::{CognitiveAssessment, RiskClassifier, TargetTestResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Result of one pipeline tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameOutput {
    pub sample: EyeSample,
    /// Present whenever history was long enough to classify this tick
    pub assessment: Option<CognitiveAssessment>,
}

/// Frame-driven ocular biomarker pipeline
///
/// Owns history, calibration and saccade debounce state for one capture
/// session. Each call to [`process_frame`](Self::process_frame) runs to
/// completion before the next; nothing here blocks or performs I/O.
pub struct OcularPipeline {
    config: PipelineConfig,
    extractor: EyeMetricExtractor,
    tracker: TemporalTracker,
    detector: EventDetector,
    mapper: ScreenMapper,
    classifier: RiskClassifier,
    history: RingBuffer<EyeSample>,
    calibration: Option<CalibrationState>,
    target_test: Option<TargetTestResult>,
    /// Ticks seen since construction or reset
    frame_counter: u64,
    last_sample: Option<EyeSample>,
    last_assessment: Option<CognitiveAssessment>,
}

impl OcularPipeline {
    /// Create a new pipeline with configuration
    pub fn new(config: PipelineConfig) -> Self {
        info!(
            capacity = config.history_capacity,
            min_history = config.classifier.min_history,
            frame_interval_ms = config.ocular.frame_interval_ms,
            "Creating ocular pipeline"
        );
        if !config.can_classify() {
            warn!(
                "History capacity {} is below the classification minimum {}; no assessment will be produced",
                config.history_capacity, config.classifier.min_history
            );
        }

        Self {
            extractor: EyeMetricExtractor::new(&config.ocular),
            tracker: TemporalTracker::new(&config.ocular),
            detector: EventDetector::new(&config.ocular),
            mapper: ScreenMapper::new(&config.ocular),
            classifier: RiskClassifier::new(config.classifier.clone()),
            history: RingBuffer::new(config.history_capacity),
            calibration: None,
            target_test: None,
            frame_counter: 0,
            last_sample: None,
            last_assessment: None,
            config,
        }
    }

    /// Process one detector output
    pub fn process_frame(&mut self, input: &FrameInput) -> FrameOutput {
        match input {
            FrameInput::Landmarks(frame) => self.process_landmarks(frame),
            FrameInput::NoFace => self.process_no_face(),
        }
    }

    /// Process a frame with landmarks
    ///
    /// Extraction failures yield a degraded sample that is not added to
    /// history.
    pub fn process_landmarks(&mut self, frame: &LandmarkFrame) -> FrameOutput {
        let frame_index = self.next_frame_index();

        match self.track(frame, frame_index) {
            Ok(sample) => {
                self.history.push(sample.clone());
                self.last_sample = Some(sample.clone());

                let assessment = if self.history.len() >= self.config.classifier.min_history {
                    let assessment = self.assess();
                    self.last_assessment = Some(assessment.clone());
                    Some(assessment)
                } else {
                    None
                };

                FrameOutput { sample, assessment }
            }
            Err(e) => {
                warn!(frame_index, "Landmark extraction failed: {}", e);
                let sample = EyeSample::carried_over(
                    self.last_sample.as_ref(),
                    frame_index,
                    SampleStatus::Degraded,
                    self.config.ocular.degraded_confidence,
                );
                self.last_sample = Some(sample.clone());
                FrameOutput {
                    sample,
                    assessment: None,
                }
            }
        }
    }

    /// Process a tick where the detector found no face
    pub fn process_no_face(&mut self) -> FrameOutput {
        let frame_index = self.next_frame_index();
        debug!(frame_index, "No face detected");

        let sample = EyeSample::carried_over(
            self.last_sample.as_ref(),
            frame_index,
            SampleStatus::NoFace,
            self.config.ocular.degraded_confidence,
        );
        self.last_sample = Some(sample.clone());
        FrameOutput {
            sample,
            assessment: None,
        }
    }

    fn next_frame_index(&mut self) -> u64 {
        let index = self.frame_counter;
        self.frame_counter += 1;
        index
    }

    fn track(&mut self, frame: &LandmarkFrame, frame_index: u64) -> Result<EyeSample, OcularError> {
        let geometry = self.extractor.extract(frame)?;
        let temporal = self.tracker.compute(&geometry, &self.history);
        let events = self.detector.detect(
            frame_index,
            geometry.average_openness,
            temporal.movement,
            temporal.saccade_velocity,
        );
        let screen_gaze = self
            .mapper
            .project(geometry.gaze_direction, self.calibration.as_ref());

        let score = cognitive_score(
            &ScoreInputs {
                average_openness: geometry.average_openness,
                asymmetry: geometry.asymmetry,
                gaze_stability: temporal.gaze_stability,
                movement: temporal.movement,
                saccade_velocity: temporal.saccade_velocity,
                fixation_duration_ms: temporal.fixation_duration_ms,
            },
            &self.config.ocular.score,
        );

        if events.saccade {
            debug!(frame_index, velocity = temporal.saccade_velocity, "Saccade detected");
        }

        Ok(EyeSample {
            frame_index,
            status: SampleStatus::Tracked,
            face_detected: true,
            confidence: self.config.ocular.tracked_confidence,
            left_openness: geometry.left.openness,
            right_openness: geometry.right.openness,
            average_openness: geometry.average_openness,
            asymmetry: geometry.asymmetry,
            pupil_left: geometry.left.pupil,
            pupil_right: geometry.right.pupil,
            gaze_direction: geometry.gaze_direction,
            screen_gaze,
            movement: temporal.movement,
            saccade_velocity: temporal.saccade_velocity,
            is_blink: events.blink,
            saccade_detected: events.saccade,
            is_fixation: events.fixation,
            gaze_stability: temporal.gaze_stability,
            fixation_duration_ms: temporal.fixation_duration_ms,
            cognitive_score: score,
        })
    }

    /// Classify the current history now
    ///
    /// Returns the fixed insufficient-data assessment on a short history.
    pub fn assess(&self) -> CognitiveAssessment {
        let history = self.history.to_vec();
        self.classifier.classify(&history, self.target_test.as_ref())
    }

    /// Use the latest tracked gaze direction as screen center
    pub fn calibrate(&mut self) -> Result<CalibrationState, PipelineError> {
        let sample = self
            .last_sample
            .as_ref()
            .ok_or(PipelineError::Ocular(OcularError::NoGazeSample))?;

        if !sample.is_tracked() {
            return Err(PipelineError::NotCalibratable(sample.status));
        }

        let center = sample.gaze_direction;
        Ok(self.calibrate_with(center))
    }

    /// Calibrate on an explicit gaze direction
    pub fn calibrate_with(&mut self, center: Point2) -> CalibrationState {
        let state = CalibrationState::new(center, self.config.ocular.calibration_range);
        info!(x = center.x, y = center.y, "Calibrated gaze center");
        self.calibration = Some(state);
        state
    }

    /// Supply a discrete test result for subsequent classifications
    pub fn set_target_test(&mut self, result: TargetTestResult) {
        info!(
            latency_ms = result.average_latency_ms,
            accuracy = result.accuracy_percent,
            "Target test result received"
        );
        self.target_test = Some(result);
    }

    /// Discard history, calibration and event state
    pub fn reset(&mut self) {
        info!(
            frames = self.frame_counter,
            samples = self.history.len(),
            "Resetting ocular pipeline"
        );
        self.history.clear();
        self.calibration = None;
        self.target_test = None;
        self.detector.reset();
        self.frame_counter = 0;
        self.last_sample = None;
        self.last_assessment = None;
    }

    pub fn history(&self) -> &RingBuffer<EyeSample> {
        &self.history
    }

    pub fn calibration(&self) -> Option<&CalibrationState> {
        self.calibration.as_ref()
    }

    pub fn target_test(&self) -> Option<&TargetTestResult> {
        self.target_test.as_ref()
    }

    pub fn latest_sample(&self) -> Option<&EyeSample> {
        self.last_sample.as_ref()
    }

    pub fn latest_assessment(&self) -> Option<&CognitiveAssessment> {
        self.last_assessment.as_ref()
    }

    /// Ticks processed since construction or the last reset
    pub fn frames_processed(&self) -> u64 {
        self.frame_counter
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }
}

impl Default for OcularPipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}
