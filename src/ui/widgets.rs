//! Plain widget state mutated by the progress synchronizer and read by the
//! renderer. These stand in for the platform's progress bar, seek slider and
//! time label.

/// Smallest slider range used when the track duration is unknown or zero;
/// keeps the slider from ending up with a degenerate `[0, 0]` range.
pub const SLIDER_MIN_RANGE: f64 = 0.1;

/// Determinate progress indicator with an integer millisecond scale.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProgressBarState {
    value: u64,
    max: u64,
}

impl ProgressBarState {
    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn max(&self) -> u64 {
        self.max
    }

    pub fn set_value(&mut self, value: u64) {
        self.value = value.min(self.max);
    }

    pub fn set_max(&mut self, max: u64) {
        self.max = max;
        self.value = self.value.min(max);
    }
}

/// Seek slider state. The upper bound never collapses to zero; see
/// [`SLIDER_MIN_RANGE`].
#[derive(Debug, Clone, PartialEq)]
pub struct SliderState {
    value: f64,
    value_to: f64,
}

impl Default for SliderState {
    fn default() -> Self {
        Self {
            value: 0.0,
            value_to: SLIDER_MIN_RANGE,
        }
    }
}

impl SliderState {
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn value_to(&self) -> f64 {
        self.value_to
    }

    pub fn set_value(&mut self, value: f64) {
        self.value = value.clamp(0.0, self.value_to);
    }

    pub fn set_max(&mut self, value_to: f64) {
        self.value_to = if value_to > 0.0 {
            value_to
        } else {
            SLIDER_MIN_RANGE
        };
        self.value = self.value.clamp(0.0, self.value_to);
    }
}

/// Textual time display next to the slider.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TimeLabel {
    text: String,
}

impl TimeLabel {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: String) {
        self.text = text;
    }
}
