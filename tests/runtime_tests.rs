use stagecraft::ambiance::{
    AmbianceCommand, AmbianceEngine, AmbianceEvent, AmbianceRuntime, AudienceProfile, SpeechMetricsSample,
    TriggerKind,
};
use tokio::time::{timeout, Duration, Instant};

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

async fn expect_opening(events: &mut tokio::sync::mpsc::Receiver<AmbianceEvent>, base: f32) {
    assert_eq!(events.recv().await, Some(AmbianceEvent::AttentionChanged(base)));
    let opening = events.recv().await.unwrap();
    assert_eq!(opening.as_reaction().unwrap().1, TriggerKind::SessionStart);
}

#[tokio::test(start_paused = true)]
async fn test_decay_ticks_once_per_second() {
    let (handle, mut events) = AmbianceRuntime::spawn(AmbianceEngine::new(AudienceProfile::Neutral));

    handle.start(AudienceProfile::Neutral).await.unwrap();
    expect_opening(&mut events, 0.6).await;

    let before = Instant::now();
    let first = events.recv().await.unwrap();
    assert!(approx(first.as_attention().unwrap(), 0.58));
    assert!(before.elapsed() >= Duration::from_millis(900));

    let second = events.recv().await.unwrap();
    assert!(approx(second.as_attention().unwrap(), 0.56));

    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_stop_plays_closing_reaction_then_halts() {
    let (handle, mut events) = AmbianceRuntime::spawn(AmbianceEngine::new(AudienceProfile::Neutral));

    handle.start(AudienceProfile::Neutral).await.unwrap();
    expect_opening(&mut events, 0.6).await;

    handle.stop().await.unwrap();
    let closing = events.recv().await.unwrap();
    assert_eq!(closing.as_reaction().unwrap().1, TriggerKind::SessionEnd);

    // Grace (500ms) ends before the first decay tick (1s): nothing else arrives.
    assert!(timeout(Duration::from_secs(5), events.recv()).await.is_err());

    // A second stop after the halt is a no-op.
    handle.stop().await.unwrap();
    assert!(timeout(Duration::from_secs(2), events.recv()).await.is_err());

    handle.shutdown().await;
    assert_eq!(events.recv().await, None);
}

#[tokio::test(start_paused = true)]
async fn test_restart_after_stop_resumes_decay() {
    let (handle, mut events) = AmbianceRuntime::spawn(AmbianceEngine::new(AudienceProfile::Neutral));

    handle.start(AudienceProfile::Neutral).await.unwrap();
    expect_opening(&mut events, 0.6).await;
    handle.stop().await.unwrap();
    events.recv().await.unwrap();
    assert!(timeout(Duration::from_secs(2), events.recv()).await.is_err());

    handle.start(AudienceProfile::Hostile).await.unwrap();
    expect_opening(&mut events, 0.4).await;

    let decay = events.recv().await.unwrap();
    assert!(approx(decay.as_attention().unwrap(), 0.34));

    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_commands_reach_engine() {
    let (handle, mut events) = AmbianceRuntime::spawn(AmbianceEngine::new(AudienceProfile::Neutral));

    // Ignored while stopped.
    handle.fire(TriggerKind::StrongPhrase).await.unwrap();

    handle.start(AudienceProfile::Neutral).await.unwrap();
    expect_opening(&mut events, 0.6).await;

    let hesitant = SpeechMetricsSample {
        hesitation_count: 4,
        ..SpeechMetricsSample::default()
    };
    handle.process_metrics(hesitant).await.unwrap();
    let reaction = events.recv().await.unwrap();
    assert_eq!(reaction.as_reaction().unwrap().1, TriggerKind::Hesitations);
    assert!(approx(events.recv().await.unwrap().as_attention().unwrap(), 0.58));

    handle.set_profile(AudienceProfile::Friendly).await.unwrap();
    assert_eq!(events.recv().await, Some(AmbianceEvent::AttentionChanged(0.9)));

    handle.send(AmbianceCommand::Recover(1.0)).await.unwrap();
    assert!(approx(events.recv().await.unwrap().as_attention().unwrap(), 1.0));

    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_dropping_handle_ends_driver() {
    let (handle, mut events) = AmbianceRuntime::spawn(AmbianceEngine::new(AudienceProfile::Distracted));

    handle.start(AudienceProfile::Distracted).await.unwrap();
    expect_opening(&mut events, 0.35).await;

    drop(handle);
    // Buffered notifications drain, then the channel closes.
    while events.recv().await.is_some() {}
}
