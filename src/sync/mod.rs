//! Progress synchronization between a media session and the seek widgets

mod animator;

pub use animator::ProgressAnimator;

use crate::session::{CallbackId, MediaMetadata, MediaSession, PlaybackState, SessionEvent};
use crate::ui::time::make_time_string;
use crate::ui::widgets::{ProgressBarState, SliderState, TimeLabel};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, info, trace};

const LOG_TARGET: &str = "tunesync::sync";

/// The session currently mirrored, together with the callback registration
/// that must be released on detach.
struct AttachedSession {
    session: Arc<dyn MediaSession>,
    callback: CallbackId,
}

/// Mirrors an external media session into a progress bar, a seek slider and a
/// time label.
///
/// Between discrete state notifications the displayed position is advanced by
/// a linear [`ProgressAnimator`] so the indicator moves smoothly; the animator
/// yields to user drag gestures and is replaced on every authoritative update.
/// All methods take the current `Instant` from the caller, which both keeps
/// the component deterministic under test and pins every mutation to the
/// caller's single event-processing task.
pub struct ProgressSynchronizer {
    progress_bar: ProgressBarState,
    slider: SliderState,
    time_label: TimeLabel,
    duration_ms: u64,
    dragging: bool,
    animator: Option<ProgressAnimator>,
    attached: Option<AttachedSession>,
    /// System animation scale; multiplies interpolation run times. At or
    /// below zero interpolation is disabled and the display snaps on each
    /// authoritative update.
    animation_scale: f32,
}

impl ProgressSynchronizer {
    pub fn new(animation_scale: f32) -> Self {
        Self {
            progress_bar: ProgressBarState::default(),
            slider: SliderState::default(),
            time_label: TimeLabel::default(),
            duration_ms: 0,
            dragging: false,
            animator: None,
            attached: None,
            animation_scale,
        }
    }

    /// Attaches to a session: any previous attachment is released first, a
    /// callback channel is registered, and the display is initialized from
    /// the session's current metadata and state without waiting for the next
    /// notification. Returns the event receiver the caller pumps into
    /// [`handle_event`](Self::handle_event).
    ///
    /// `attach(None, ..)` is equivalent to [`detach`](Self::detach).
    pub fn attach(
        &mut self,
        session: Option<Arc<dyn MediaSession>>,
        now: Instant,
    ) -> Option<mpsc::UnboundedReceiver<SessionEvent>> {
        self.detach();
        let session = session?;

        let (tx, rx) = mpsc::unbounded_channel();
        let callback = session.register_callback(tx);
        info!(target: LOG_TARGET, callback, "Attached to media session");

        let metadata = session.metadata();
        let state = session.playback_state();
        self.attached = Some(AttachedSession { session, callback });
        self.apply_metadata(metadata, now);
        self.apply_playback_state(state, now);
        Some(rx)
    }

    /// Releases the current attachment, unregistering the session callback
    /// and cancelling any running interpolation. Idempotent.
    pub fn detach(&mut self) {
        if let Some(attached) = self.attached.take() {
            attached.session.unregister_callback(attached.callback);
            info!(target: LOG_TARGET, callback = attached.callback, "Detached from media session");
        }
        self.animator = None;
    }

    /// Feeds one session notification into the synchronizer.
    pub fn handle_event(&mut self, event: SessionEvent, now: Instant) {
        trace!(target: LOG_TARGET, ?event, "Session event");
        match event {
            SessionEvent::StateChanged(state) => self.apply_playback_state(state, now),
            SessionEvent::MetadataChanged(metadata) => self.apply_metadata(metadata, now),
        }
    }

    /// Interpolation tick, driven by the caller's UI loop. A drag in progress
    /// cancels the interpolation outright; otherwise the widgets follow the
    /// interpolated position.
    pub fn tick(&mut self, now: Instant) {
        let Some(animator) = self.animator.as_ref() else {
            return;
        };
        if self.dragging {
            trace!(target: LOG_TARGET, "Drag in progress, cancelling interpolation");
            self.animator = None;
            return;
        }
        let value = animator.value_at(now);
        let finished = animator.is_finished(now);
        self.show_position(value);
        if finished {
            trace!(target: LOG_TARGET, value, "Interpolation finished");
            self.animator = None;
        }
    }

    /// The user grabbed the slider; authoritative updates keep landing but
    /// interpolation stops fighting the gesture.
    pub fn begin_drag(&mut self) {
        self.dragging = true;
    }

    /// Live slider movement during a drag. Tracks the value on the slider and
    /// the time label only; no seek is sent until the drag ends.
    pub fn drag_to(&mut self, value: f64) {
        self.slider.set_value(value);
        let shown = self.slider.value();
        self.time_label.set_text(make_time_string(shown as u64 / 1000));
    }

    /// The user released the slider: send exactly one seek for the final
    /// value. With no session attached the seek is silently dropped.
    pub fn end_drag(&mut self) {
        match &self.attached {
            Some(attached) => {
                let position_ms = self.slider.value() as u64;
                debug!(target: LOG_TARGET, position_ms, "Drag released, seeking");
                attached.session.seek_to(position_ms);
            }
            None => {
                debug!(target: LOG_TARGET, "Drag released with no session attached; seek dropped");
            }
        }
        self.dragging = false;
    }

    /// Authoritative state update: cancel any interpolation, snap the display
    /// to the reported position, and start a fresh interpolation toward the
    /// end of the track when playback is actually moving.
    fn apply_playback_state(&mut self, state: Option<PlaybackState>, now: Instant) {
        // An absent state preserves the last known display.
        let Some(state) = state else {
            return;
        };
        self.animator = None;

        let position = state.position_ms;
        self.show_position(position as f64);
        if !state.is_playing() {
            return;
        }

        let remaining = self.duration_ms.saturating_sub(position);
        if remaining == 0 || !(state.speed > 0.0) || !(self.animation_scale > 0.0) {
            return;
        }
        let time_to_end_ms = remaining as f64 / state.speed as f64;
        let run_for =
            Duration::from_secs_f64(time_to_end_ms * self.animation_scale as f64 / 1000.0);
        trace!(
            target: LOG_TARGET,
            position,
            target_ms = self.duration_ms,
            ?run_for,
            "Starting interpolation"
        );
        self.animator = Some(ProgressAnimator::new(
            position as f64,
            self.duration_ms as f64,
            run_for,
            now,
        ));
    }

    /// Authoritative metadata update: adopt the new duration, rescale the
    /// widgets and immediately re-apply the session's current state so the
    /// display reflects the new bounds.
    fn apply_metadata(&mut self, metadata: Option<MediaMetadata>, now: Instant) {
        self.duration_ms = metadata.and_then(|m| m.duration_ms).unwrap_or(0);
        debug!(target: LOG_TARGET, duration_ms = self.duration_ms, "Metadata changed");
        self.progress_bar.set_max(self.duration_ms);
        self.slider.set_max(self.duration_ms as f64);

        let state = self
            .attached
            .as_ref()
            .and_then(|attached| attached.session.playback_state());
        self.apply_playback_state(state, now);
    }

    /// Writes one position to all three widgets, clamped to the track bounds.
    fn show_position(&mut self, value: f64) {
        let clamped = value.clamp(0.0, self.duration_ms as f64);
        self.progress_bar.set_value(clamped as u64);
        self.slider.set_value(clamped);
        self.time_label.set_text(make_time_string(clamped as u64 / 1000));
    }

    pub fn progress_bar(&self) -> &ProgressBarState {
        &self.progress_bar
    }

    pub fn slider(&self) -> &SliderState {
        &self.slider
    }

    pub fn time_label(&self) -> &TimeLabel {
        &self.time_label
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_attached(&self) -> bool {
        self.attached.is_some()
    }

    /// Whether an interpolation is currently running.
    pub fn is_animating(&self) -> bool {
        self.animator.is_some()
    }

    #[cfg(test)]
    pub(crate) fn animator(&self) -> Option<&ProgressAnimator> {
        self.animator.as_ref()
    }
}
