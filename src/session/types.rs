/// Transport status of a playback session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStatus {
    Playing,
    Paused,
    Stopped,
}

/// Snapshot of a session's playback state at the moment of a notification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackState {
    /// Playback position in milliseconds.
    pub position_ms: u64,
    pub status: PlaybackStatus,
    /// Playback speed multiplier (1.0 = normal).
    pub speed: f32,
}

impl PlaybackState {
    pub fn new(position_ms: u64, status: PlaybackStatus, speed: f32) -> Self {
        Self {
            position_ms,
            status,
            speed,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.status == PlaybackStatus::Playing
    }
}

/// Metadata of the currently loaded track.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaMetadata {
    pub title: Option<String>,
    /// Track duration in milliseconds. Absent when the session does not know
    /// it yet (e.g. a live stream header still loading).
    pub duration_ms: Option<u64>,
}

/// Push notifications delivered to registered session callbacks. Payloads are
/// optional: the platform interface allows delivering "changed to nothing".
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    StateChanged(Option<PlaybackState>),
    MetadataChanged(Option<MediaMetadata>),
}
