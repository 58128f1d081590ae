//! User-facing surfaces: command-line arguments, widget state and formatting

pub mod cli;
pub mod time;
pub mod widgets;

pub use cli::Args;
pub use time::make_time_string;
pub use widgets::{ProgressBarState, SliderState, TimeLabel, SLIDER_MIN_RANGE};
