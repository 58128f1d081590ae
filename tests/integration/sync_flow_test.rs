//! End-to-end flows between a session and the progress synchronizer

use crate::test_utils::{metadata, paused, playing, RecordingSession};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tunesync::session::{MediaSession, SessionEvent};
use tunesync::sync::ProgressSynchronizer;
use tunesync::ui::SLIDER_MIN_RANGE;

fn recording_session(duration_ms: u64, position_ms: u64) -> Arc<RecordingSession> {
    Arc::new(RecordingSession::new(
        Some(metadata(duration_ms)),
        Some(playing(position_ms, 1.0)),
    ))
}

/// The worked example: a 180s track playing from 30s at speed 1 displays
/// "0:30" immediately on attach and interpolates to the end over 150s.
#[test]
fn attach_initializes_and_interpolates_to_track_end() {
    let session = recording_session(180_000, 30_000);
    let now = Instant::now();

    let mut sync = ProgressSynchronizer::new(1.0);
    sync.attach(Some(session.clone() as Arc<dyn MediaSession>), now)
        .expect("attach with a session returns an event stream");

    assert_eq!(sync.time_label().text(), "0:30");
    assert_eq!(sync.slider().value(), 30_000.0);
    assert_eq!(sync.progress_bar().value(), 30_000);
    assert_eq!(sync.progress_bar().max(), 180_000);

    sync.tick(now + Duration::from_secs(75));
    assert_eq!(sync.slider().value(), 105_000.0);

    sync.tick(now + Duration::from_secs(150));
    assert_eq!(sync.slider().value(), 180_000.0);
    assert_eq!(sync.time_label().text(), "3:00");
    assert!(!sync.is_animating());
}

#[test]
fn at_most_one_registration_across_attach_sequences() {
    let session = recording_session(180_000, 0);
    let mut sync = ProgressSynchronizer::new(1.0);

    for _ in 0..3 {
        sync.attach(Some(session.clone() as Arc<dyn MediaSession>), Instant::now());
        assert_eq!(session.active_callbacks(), 1);
    }
    assert_eq!(session.total_registrations(), 3);

    sync.detach();
    assert_eq!(session.active_callbacks(), 0);

    sync.detach();
    assert_eq!(session.active_callbacks(), 0);
}

#[test]
fn paused_state_displays_static_position() {
    let session = Arc::new(RecordingSession::new(
        Some(metadata(180_000)),
        Some(paused(30_000)),
    ));
    let now = Instant::now();

    let mut sync = ProgressSynchronizer::new(1.0);
    sync.attach(Some(session as Arc<dyn MediaSession>), now);
    assert!(!sync.is_animating());

    sync.tick(now + Duration::from_secs(30));
    assert_eq!(sync.slider().value(), 30_000.0);
    assert_eq!(sync.time_label().text(), "0:30");
}

#[test]
fn drag_suppresses_ticks_until_next_state_event() {
    let session = recording_session(180_000, 30_000);
    let now = Instant::now();

    let mut sync = ProgressSynchronizer::new(1.0);
    sync.attach(Some(session.clone() as Arc<dyn MediaSession>), now);
    assert!(sync.is_animating());

    sync.begin_drag();
    sync.tick(now + Duration::from_secs(10));
    assert!(!sync.is_animating(), "first tick under drag cancels");
    assert_eq!(sync.slider().value(), 30_000.0);

    sync.tick(now + Duration::from_secs(20));
    assert_eq!(sync.slider().value(), 30_000.0);

    // A fresh authoritative state restarts interpolation.
    sync.end_drag();
    sync.handle_event(
        SessionEvent::StateChanged(Some(playing(45_000, 1.0))),
        now + Duration::from_secs(25),
    );
    assert!(sync.is_animating());
    sync.tick(now + Duration::from_secs(30));
    assert!(sync.slider().value() > 45_000.0);
}

#[test]
fn end_drag_sends_exactly_one_seek() {
    let session = recording_session(180_000, 30_000);
    let mut sync = ProgressSynchronizer::new(1.0);
    sync.attach(Some(session.clone() as Arc<dyn MediaSession>), Instant::now());

    sync.begin_drag();
    sync.drag_to(60_000.0);
    sync.drag_to(90_000.0);
    sync.drag_to(120_000.0);
    assert_eq!(session.seeks().len(), 0, "no seek while the drag is live");
    assert_eq!(sync.time_label().text(), "2:00");

    sync.end_drag();
    assert_eq!(session.seeks(), vec![120_000]);
}

#[test]
fn seek_without_session_is_dropped() {
    let mut sync = ProgressSynchronizer::new(1.0);
    sync.handle_event(
        SessionEvent::MetadataChanged(Some(metadata(180_000))),
        Instant::now(),
    );
    sync.begin_drag();
    sync.drag_to(60_000.0);
    sync.end_drag();
    assert!(!sync.is_dragging());
}

#[test]
fn zero_duration_metadata_keeps_slider_range_valid() {
    let session = Arc::new(RecordingSession::new(None, None));
    let mut sync = ProgressSynchronizer::new(1.0);
    let mut events = sync
        .attach(Some(session.clone() as Arc<dyn MediaSession>), Instant::now())
        .expect("attach with a session returns an event stream");
    assert_eq!(sync.slider().value_to(), SLIDER_MIN_RANGE);

    session.push_metadata(Some(tunesync::session::MediaMetadata {
        title: None,
        duration_ms: Some(0),
    }));
    let event = events.try_recv().expect("metadata notification expected");
    sync.handle_event(event, Instant::now());
    assert_eq!(sync.slider().value_to(), SLIDER_MIN_RANGE);
    assert_eq!(sync.progress_bar().max(), 0);
}

#[test]
fn notifications_flow_through_the_attached_channel() {
    let session = recording_session(180_000, 0);
    let now = Instant::now();

    let mut sync = ProgressSynchronizer::new(1.0);
    let mut events = sync
        .attach(Some(session.clone() as Arc<dyn MediaSession>), now)
        .expect("attach with a session returns an event stream");

    session.push_state(Some(paused(42_000)));
    let event = events.try_recv().expect("state notification expected");
    sync.handle_event(event, now);
    assert_eq!(sync.slider().value(), 42_000.0);
    assert_eq!(sync.time_label().text(), "0:42");

    // After detach the registration is gone, so nothing further arrives.
    sync.detach();
    session.push_state(Some(paused(60_000)));
    assert!(events.try_recv().is_err());
    assert_eq!(sync.slider().value(), 42_000.0);
}

#[test]
fn metadata_change_reapplies_current_state() {
    let session = recording_session(180_000, 30_000);
    let now = Instant::now();

    let mut sync = ProgressSynchronizer::new(1.0);
    sync.attach(Some(session.clone() as Arc<dyn MediaSession>), now);

    // A longer duration arrives mid-track; the interpolation target follows.
    session.push_metadata(Some(metadata(240_000)));
    session.push_state(Some(playing(30_000, 1.0)));
    sync.handle_event(
        SessionEvent::MetadataChanged(Some(metadata(240_000))),
        now,
    );
    assert_eq!(sync.progress_bar().max(), 240_000);
    assert!(sync.is_animating());
    sync.tick(now + Duration::from_secs(210));
    assert_eq!(sync.slider().value(), 240_000.0);
}
