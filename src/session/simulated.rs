use super::{
    CallbackId, MediaMetadata, MediaSession, PlaybackState, PlaybackStatus, SessionCallback,
    SessionEvent,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Instant;
use tracing::{debug, trace};

const LOG_TARGET: &str = "tunesync::session::simulated";

/// In-process playback session. Position advances with wall-clock time while
/// playing (scaled by speed); transport commands behave like the platform
/// session: every transition is announced through registered callbacks.
///
/// Used by the demo binary and by integration tests as the concrete session
/// behind the `MediaSession` trait.
pub struct SimulatedSession {
    inner: Mutex<SessionInner>,
    next_callback_id: AtomicU64,
}

struct SessionInner {
    callbacks: HashMap<CallbackId, SessionCallback>,
    metadata: Option<MediaMetadata>,
    status: PlaybackStatus,
    speed: f32,
    /// Position at the moment of `anchor`; the live position is derived from
    /// these two while playing.
    position_ms: u64,
    anchor: Instant,
}

impl SimulatedSession {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(SessionInner {
                callbacks: HashMap::new(),
                metadata: None,
                status: PlaybackStatus::Stopped,
                speed: 1.0,
                position_ms: 0,
                anchor: Instant::now(),
            }),
            next_callback_id: AtomicU64::new(1),
        }
    }

    /// Loads a track and rewinds to the start. Announces the new metadata
    /// first, then the (stopped) state, like a fresh platform session does.
    pub fn load(&self, title: &str, duration_ms: u64) {
        let mut inner = self.lock_inner();
        inner.metadata = Some(MediaMetadata {
            title: Some(title.to_string()),
            duration_ms: Some(duration_ms),
        });
        inner.status = PlaybackStatus::Stopped;
        inner.position_ms = 0;
        inner.anchor = Instant::now();
        debug!(target: LOG_TARGET, title, duration_ms, "Track loaded");
        let metadata = inner.metadata.clone();
        Self::broadcast(&mut inner, SessionEvent::MetadataChanged(metadata));
        let state = Self::state_of(&inner);
        Self::broadcast(&mut inner, SessionEvent::StateChanged(state));
    }

    pub fn play(&self) {
        self.transition(|inner| inner.status = PlaybackStatus::Playing);
    }

    pub fn pause(&self) {
        self.transition(|inner| inner.status = PlaybackStatus::Paused);
    }

    /// Flips between playing and paused; a stopped session starts playing.
    pub fn toggle(&self) {
        self.transition(|inner| {
            inner.status = match inner.status {
                PlaybackStatus::Playing => PlaybackStatus::Paused,
                PlaybackStatus::Paused | PlaybackStatus::Stopped => PlaybackStatus::Playing,
            }
        });
    }

    pub fn set_speed(&self, speed: f32) {
        self.transition(|inner| inner.speed = speed);
    }

    /// Applies a transport mutation: fixes the live position in place, runs
    /// the mutation, re-anchors the clock and announces the resulting state.
    fn transition(&self, mutate: impl FnOnce(&mut SessionInner)) {
        let mut inner = self.lock_inner();
        if inner.metadata.is_none() {
            trace!(target: LOG_TARGET, "Transport command ignored: no track loaded");
            return;
        }
        inner.position_ms = Self::live_position(&inner);
        mutate(&mut inner);
        inner.anchor = Instant::now();
        let state = Self::state_of(&inner);
        trace!(target: LOG_TARGET, ?state, "Transport transition");
        Self::broadcast(&mut inner, SessionEvent::StateChanged(state));
    }

    /// Current position derived from the last anchor; clamped to the track
    /// duration so a finished track reports its end rather than running past.
    fn live_position(inner: &SessionInner) -> u64 {
        let duration_ms = inner
            .metadata
            .as_ref()
            .and_then(|m| m.duration_ms)
            .unwrap_or(0);
        let position = if inner.status == PlaybackStatus::Playing {
            let elapsed_ms = inner.anchor.elapsed().as_secs_f64() * 1000.0 * inner.speed as f64;
            inner.position_ms.saturating_add(elapsed_ms as u64)
        } else {
            inner.position_ms
        };
        position.min(duration_ms)
    }

    fn state_of(inner: &SessionInner) -> Option<PlaybackState> {
        inner.metadata.as_ref()?;
        Some(PlaybackState::new(
            Self::live_position(inner),
            inner.status,
            inner.speed,
        ))
    }

    /// Pushes an event to every registered callback, dropping channels whose
    /// receiver has gone away.
    fn broadcast(inner: &mut SessionInner, event: SessionEvent) {
        inner
            .callbacks
            .retain(|id, callback| match callback.send(event.clone()) {
                Ok(()) => true,
                Err(_) => {
                    debug!(target: LOG_TARGET, id = *id, "Dropping callback with closed receiver");
                    false
                }
            });
    }

    fn lock_inner(&self) -> MutexGuard<'_, SessionInner> {
        self.inner.lock().expect("session state lock poisoned")
    }

    #[cfg(test)]
    pub(crate) fn callback_count(&self) -> usize {
        self.lock_inner().callbacks.len()
    }
}

impl Default for SimulatedSession {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaSession for SimulatedSession {
    fn register_callback(&self, callback: SessionCallback) -> CallbackId {
        let id = self.next_callback_id.fetch_add(1, Ordering::Relaxed);
        self.lock_inner().callbacks.insert(id, callback);
        debug!(target: LOG_TARGET, id, "Callback registered");
        id
    }

    fn unregister_callback(&self, id: CallbackId) {
        if self.lock_inner().callbacks.remove(&id).is_some() {
            debug!(target: LOG_TARGET, id, "Callback unregistered");
        } else {
            trace!(target: LOG_TARGET, id, "Unregister for unknown callback id");
        }
    }

    fn playback_state(&self) -> Option<PlaybackState> {
        let inner = self.lock_inner();
        Self::state_of(&inner)
    }

    fn metadata(&self) -> Option<MediaMetadata> {
        self.lock_inner().metadata.clone()
    }

    fn seek_to(&self, position_ms: u64) {
        self.transition(|inner| {
            let duration_ms = inner
                .metadata
                .as_ref()
                .and_then(|m| m.duration_ms)
                .unwrap_or(0);
            inner.position_ms = position_ms.min(duration_ms);
        });
    }
}
