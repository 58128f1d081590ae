//! Command-line interface definition

use clap::Parser;

/// Command-line arguments for tunesync
#[derive(Parser, Debug)]
#[command(author, version, about = "Playback progress synchronizer demo", long_about = None)]
pub struct Args {
    /// Config file path
    #[arg(short, long, env = "TUNESYNC_CONFIG")]
    pub config: Option<String>,

    /// Animation duration scale factor (0 disables interpolation)
    #[arg(long, env = "TUNESYNC_ANIMATION_SCALE")]
    pub animation_scale: Option<f32>,

    /// UI tick interval in milliseconds
    #[arg(long, env = "TUNESYNC_TICK_INTERVAL_MS")]
    pub tick_interval: Option<u64>,

    /// Duration of the demo track in seconds
    #[arg(long, default_value_t = 180)]
    pub duration: u64,

    /// Initial playback speed
    #[arg(long, default_value_t = 1.0)]
    pub speed: f32,
}
