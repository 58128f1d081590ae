//! Media session model: subscription surface, event types and the simulated backend

mod simulated;
mod types;

pub use simulated::SimulatedSession;
pub use types::{MediaMetadata, PlaybackState, PlaybackStatus, SessionEvent};

use tokio::sync::mpsc;

/// Identifies a single callback registration on a session.
pub type CallbackId = u64;

/// Callback transport: a session pushes its notifications into this channel.
pub type SessionCallback = mpsc::UnboundedSender<SessionEvent>;

/// Subscription surface of a playback session, modelled after the platform
/// media-controller interface. The session owns playback; consumers observe it
/// through registered callbacks and synchronous getters, and command it only
/// via the fire-and-forget transport methods.
pub trait MediaSession: Send + Sync {
    /// Registers a callback channel for push notifications. Returns an id the
    /// caller must hand back to `unregister_callback` exactly once.
    fn register_callback(&self, callback: SessionCallback) -> CallbackId;

    /// Removes a previously registered callback. Unknown ids are ignored.
    fn unregister_callback(&self, id: CallbackId);

    /// Current playback state, if the session has one.
    fn playback_state(&self) -> Option<PlaybackState>;

    /// Current track metadata, if a track is loaded.
    fn metadata(&self) -> Option<MediaMetadata>;

    /// Requests a jump to the given position. No acknowledgment; the session
    /// answers with a state-changed notification like any other transition.
    fn seek_to(&self, position_ms: u64);
}
