use chrono::Utc;
use tokio::time::{sleep, Duration};

use sightline::{
    FrameMeasurement, ScoringConfig, ScriptedSignalSource, SessionController, SignalSource,
};

fn focused_frame() -> FrameMeasurement {
    FrameMeasurement::new(Utc::now(), 0.0, 0.30, false)
}

fn drowsy_frame() -> FrameMeasurement {
    FrameMeasurement::new(Utc::now(), 0.5, 0.10, false).with_classifier("snooze", 0.88)
}

#[tokio::test(start_paused = true)]
async fn full_session_scores_on_both_cadences() {
    let controller = SessionController::new(ScoringConfig::default());
    controller.start().await.unwrap();
    assert!(controller.is_active().await);

    for _ in 0..30 {
        controller.on_frame(focused_frame()).await;
    }

    // Past the first core tick at 30 s.
    sleep(Duration::from_secs(31)).await;
    let view = controller.snapshot().await;
    assert!(view.core_score > 90.0);
    assert!(view.aux_score.is_none());
    assert!(view.is_focused);

    // Past the first aux tick at 60 s.
    sleep(Duration::from_secs(30)).await;
    let view = controller.snapshot().await;
    assert!(view.aux_score.is_some());
    assert!(view.total_score > 50.0);

    let summary = controller.end().await.unwrap();
    assert!(summary.score_history.len() >= 3);
    assert!(!summary.focus_segments.is_empty());
    assert!(summary.average_score > 0.0);

    let metrics = controller.metrics_snapshot().await;
    assert!(metrics.core_cycle_count >= 2);
    assert!(metrics.aux_cycle_count >= 1);
}

#[tokio::test(start_paused = true)]
async fn ending_the_session_stops_the_scoring_loops() {
    let controller = SessionController::new(ScoringConfig::default());
    controller.start().await.unwrap();

    sleep(Duration::from_secs(61)).await;
    let summary = controller.end().await.unwrap();
    let history_len = summary.score_history.len();
    assert!(!controller.is_active().await);

    // No ticker may touch aggregator state after teardown.
    sleep(Duration::from_secs(300)).await;
    let later = controller.summarize().await;
    assert_eq!(later.score_history.len(), history_len);

    assert!(controller.end().await.is_err());
}

#[tokio::test(start_paused = true)]
async fn starting_twice_is_rejected() {
    let controller = SessionController::new(ScoringConfig::default());
    controller.start().await.unwrap();
    assert!(controller.start().await.is_err());
    controller.end().await.unwrap();

    // A fresh session may start after the previous one ended.
    controller.start().await.unwrap();
    controller.end().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn scripted_source_feeds_the_ingest_pump() {
    let controller = SessionController::new(ScoringConfig::default());
    let source = ScriptedSignalSource::new((0..60).map(|_| focused_frame()).collect());
    controller.start_with_source(source).await.unwrap();

    // Frame cadence is 33 ms; two virtual seconds drain the script.
    sleep(Duration::from_secs(2)).await;
    sleep(Duration::from_secs(29)).await;

    let view = controller.snapshot().await;
    assert!(view.core_score > 90.0, "core = {}", view.core_score);
    assert!(view.is_focused);

    let summary = controller.end().await.unwrap();
    assert!(!summary.focus_segments.is_empty());
}

#[tokio::test(start_paused = true)]
async fn drowsy_stream_never_opens_a_focus_segment() {
    let controller = SessionController::new(ScoringConfig::default());
    controller.start().await.unwrap();

    for _ in 0..60 {
        controller.on_frame(drowsy_frame()).await;
    }

    sleep(Duration::from_secs(61)).await;
    let view = controller.snapshot().await;
    assert!(!view.is_focused, "total = {}", view.total_score);
    assert_eq!(view.focus_secs, 0);

    let summary = controller.end().await.unwrap();
    assert!(summary.focus_segments.is_empty());
    assert_eq!(summary.total_focus_secs, 0);

    // The classifier output rides along into the history.
    let last = summary.score_history.last().unwrap();
    assert_eq!(last.classifier_label.as_deref(), Some("snooze"));
}

#[tokio::test(start_paused = true)]
async fn summary_serializes_with_camel_case_keys() {
    let controller = SessionController::new(ScoringConfig::default());
    controller.start().await.unwrap();
    for _ in 0..30 {
        controller.on_frame(focused_frame()).await;
    }
    sleep(Duration::from_secs(31)).await;
    let summary = controller.end().await.unwrap();

    let json = serde_json::to_value(&summary).unwrap();
    assert!(json.get("totalFocusSecs").is_some());
    assert!(json.get("scoreHistory").is_some());
    let first = &json["scoreHistory"][0];
    assert!(first.get("coreScore").is_some());
    assert!(first["breakdown"]["core"].get("eyeClosedRatio").is_some());
}

#[test]
fn signal_source_is_object_safe() {
    // Extractors are often handed around as trait objects.
    let mut boxed: Box<dyn SignalSource> =
        Box::new(ScriptedSignalSource::new(vec![focused_frame()]));
    boxed.reset_blink_counter();
    assert!(boxed.next_measurement().is_some());
    assert!(boxed.next_measurement().is_none());
}
