//! End-to-end scenarios over synthetic landmark streams

mod common;

use common::{frame, symmetric, EyePose};
use landmarks::FrameInput;
use ocular::Quadrant;
use pipeline::{OcularPipeline, PipelineConfig};
use proptest::prelude::*;
use risk_classifier::{RiskCategory, TargetTestResult};

#[test]
fn stable_fixation_stays_low_risk() {
    let mut pipeline = OcularPipeline::default();
    let mut last_fixation = 0.0;
    let mut last_output = None;

    for _ in 0..60 {
        let output = pipeline.process_frame(&FrameInput::Landmarks(symmetric(0.3, (0.02, -0.01))));
        assert!(output.sample.fixation_duration_ms > last_fixation);
        last_fixation = output.sample.fixation_duration_ms;
        assert!(!output.sample.saccade_detected);
        assert!(!output.sample.is_blink);
        last_output = Some(output);
    }

    let output = last_output.unwrap();
    assert!((output.sample.gaze_stability - 1.0).abs() < 1e-9);
    assert!((output.sample.average_openness - 0.3).abs() < 1e-9);
    assert!((0.0..=100.0).contains(&output.sample.cognitive_score));

    let assessment = output.assessment.expect("history reached the minimum");
    assert_eq!(assessment.risk_category, RiskCategory::Low);
    assert!(assessment.confidence >= 0.3 && assessment.confidence <= 0.95);
    assert!(assessment.recommendations.len() <= 6);
}

#[test]
fn erratic_movement_raises_risk() {
    let mut pipeline = OcularPipeline::default();
    let mut saccades = 0;
    let mut last_output = None;

    for i in 0..60usize {
        // Gaze jumps between two far-apart positions every other frame
        let gx = if (i / 2) % 2 == 0 { -0.3 } else { 0.3 };
        // Eyes open and close out of phase between 0.1 and 0.4
        let (lo, ro) = if i % 2 == 0 { (0.1, 0.4) } else { (0.4, 0.1) };
        let input = frame(
            EyePose { openness: lo, gaze: (gx, 0.0) },
            EyePose { openness: ro, gaze: (gx, 0.0) },
        );

        let output = pipeline.process_frame(&FrameInput::Landmarks(input));
        if output.sample.saccade_detected {
            saccades += 1;
        }
        last_output = Some(output);
    }

    let output = last_output.unwrap();
    assert!(saccades >= 2, "saccades = {saccades}");
    assert!(output.sample.gaze_stability < 0.5);

    let assessment = output.assessment.expect("history reached the minimum");
    assert!(assessment.risk_category >= RiskCategory::Medium);
}

#[test]
fn saccade_debounce_across_frames() {
    // Jumps 3 frames (50 ms) apart: only the first is flagged
    let mut pipeline = OcularPipeline::default();
    let gazes = [(0.0, 0.0), (0.3, 0.0), (0.3, 0.0), (0.3, 0.0), (-0.3, 0.0)];
    let flags: Vec<bool> = gazes
        .iter()
        .map(|&g| pipeline.process_frame(&symmetric(0.3, g).into()).sample.saccade_detected)
        .collect();
    assert_eq!(flags, vec![false, true, false, false, false]);

    // Jumps 9 frames (150 ms) apart: both flagged
    let mut pipeline = OcularPipeline::default();
    let mut flags = Vec::new();
    for i in 0..11 {
        let g = match i {
            0 => (0.0, 0.0),
            1..=9 => (0.3, 0.0),
            _ => (-0.3, 0.0),
        };
        flags.push(pipeline.process_frame(&symmetric(0.3, g).into()).sample.saccade_detected);
    }
    assert!(flags[1]);
    assert!(flags[10]);
    assert_eq!(flags.iter().filter(|&&f| f).count(), 2);
}

#[test]
fn calibration_round_trip() {
    let mut pipeline = OcularPipeline::default();
    pipeline.process_frame(&symmetric(0.3, (0.02, -0.01)).into());
    let state = pipeline.calibrate().unwrap();
    assert!((state.center.x - 0.02).abs() < 1e-9);
    assert!((state.center.y + 0.01).abs() < 1e-9);

    let output = pipeline.process_frame(&symmetric(0.3, (0.02, -0.01)).into());
    assert!((output.sample.screen_gaze.x - 0.5).abs() < 1e-9);
    assert!((output.sample.screen_gaze.y - 0.5).abs() < 1e-9);
    assert_eq!(output.sample.screen_gaze.quadrant, Quadrant::Center);
}

#[test]
fn classifier_gating_at_minimum() {
    let mut pipeline = OcularPipeline::default();
    for i in 0..29 {
        let output = pipeline.process_frame(&symmetric(0.3, (0.0, 0.0)).into());
        assert!(output.assessment.is_none(), "frame {i}");
    }

    let early = pipeline.assess();
    assert_eq!(early.risk_category, RiskCategory::Low);
    assert_eq!(early.confidence, 0.3);
    assert_eq!(early.recommendations.len(), 1);

    let output = pipeline.process_frame(&symmetric(0.3, (0.0, 0.0)).into());
    let assessment = output.assessment.expect("30th sample triggers classification");
    assert!(assessment.has_sufficient_data());
    assert_eq!(pipeline.latest_assessment(), Some(&assessment));
}

#[test]
fn no_face_ticks_do_not_enter_history() {
    let mut pipeline = OcularPipeline::default();
    for i in 0..40 {
        let input = if i % 4 == 3 {
            FrameInput::NoFace
        } else {
            symmetric(0.3, (0.0, 0.0)).into()
        };
        let output = pipeline.process_frame(&input);
        if matches!(input, FrameInput::NoFace) {
            assert!(!output.sample.face_detected);
            assert!(output.assessment.is_none());
        }
    }
    assert_eq!(pipeline.history().len(), 30);
    assert_eq!(pipeline.frames_processed(), 40);
    assert!(pipeline.history().iter().all(|s| s.face_detected));
}

#[test]
fn slow_target_test_escalates_stable_session() {
    let mut pipeline = OcularPipeline::default();
    pipeline.set_target_test(TargetTestResult::from_trials(12, vec![400.0; 12]));

    let mut last = None;
    for _ in 0..40 {
        last = pipeline.process_frame(&symmetric(0.3, (0.0, 0.0)).into()).assessment;
    }
    let assessment = last.unwrap();
    assert_eq!(assessment.risk_category, RiskCategory::Medium);
    assert!(assessment.escalated_by_test);
}

#[test]
fn reset_restarts_session() {
    let mut pipeline = OcularPipeline::default();
    for _ in 0..45 {
        pipeline.process_frame(&symmetric(0.3, (0.0, 0.0)).into());
    }
    pipeline.calibrate().unwrap();
    pipeline.reset();

    let output = pipeline.process_frame(&symmetric(0.3, (0.1, 0.0)).into());
    assert_eq!(output.sample.frame_index, 0);
    assert_eq!(output.sample.movement, 0.0);
    assert!(output.assessment.is_none());
    assert!(pipeline.calibration().is_none());
}

#[test]
fn outputs_serialize_to_json() {
    let mut pipeline = OcularPipeline::default();
    let output = pipeline.process_frame(&symmetric(0.3, (0.0, 0.0)).into());
    let json = serde_json::to_value(&output).unwrap();
    assert_eq!(json["sample"]["status"], "tracked");
    assert!(json["assessment"].is_null());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn history_evicts_oldest(capacity in 1usize..40, extra in 0usize..40) {
        let config = PipelineConfig {
            history_capacity: capacity,
            ..Default::default()
        };
        let mut pipeline = OcularPipeline::new(config);
        for _ in 0..capacity + extra {
            pipeline.process_frame(&symmetric(0.3, (0.0, 0.0)).into());
        }

        let indices: Vec<u64> = pipeline.history().iter().map(|s| s.frame_index).collect();
        let expected: Vec<u64> = (extra as u64..(capacity + extra) as u64).collect();
        prop_assert_eq!(pipeline.history().len(), capacity);
        prop_assert_eq!(indices, expected);
    }

    #[test]
    fn openness_and_score_stay_bounded(
        poses in proptest::collection::vec((0.0f64..0.6, -0.5f64..0.5, -0.5f64..0.5), 1..40)
    ) {
        let mut pipeline = OcularPipeline::default();
        for (openness, gx, gy) in poses {
            let output = pipeline.process_frame(&symmetric(openness, (gx, gy)).into());
            prop_assert!(output.sample.average_openness.is_finite());
            prop_assert!((0.0..=1.0).contains(&output.sample.average_openness));
            prop_assert!((0.0..=100.0).contains(&output.sample.cognitive_score));
            prop_assert!((0.0..=1.0).contains(&output.sample.gaze_stability));
            prop_assert!((0.0..=1.0).contains(&output.sample.screen_gaze.x));
        }
    }
}
