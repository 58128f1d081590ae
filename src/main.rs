use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use indicatif::{ProgressBar, ProgressStyle};
use std::error::Error;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::{info, warn};
use tunesync::config::Settings;
use tunesync::init_app_dirs;
use tunesync::session::{MediaSession, SimulatedSession};
use tunesync::sync::ProgressSynchronizer;
use tunesync::ui::{make_time_string, Args};

const LOG_TARGET: &str = "tunesync::main";

/// Keyboard seek step, in slider units (milliseconds).
const SEEK_STEP_MS: f64 = 5_000.0;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    init_app_dirs()?;

    let config_path = match &args.config {
        Some(path) => Path::new(path).to_path_buf(),
        None => Settings::default_path(),
    };
    let mut settings = Settings::load(&config_path)?;

    // Command-line arguments override the config file.
    if let Some(scale) = args.animation_scale {
        settings.animation_scale = scale;
    }
    if let Some(tick) = args.tick_interval {
        settings.tick_interval_ms = tick;
    }
    settings.validate()?;
    info!(target: LOG_TARGET, ?settings, "Starting demo session");

    let session = Arc::new(SimulatedSession::new());
    session.load("Demo Track", args.duration * 1000);
    session.set_speed(args.speed);

    let mut synchronizer = ProgressSynchronizer::new(settings.animation_scale);
    let mut events = synchronizer
        .attach(Some(session.clone() as Arc<dyn MediaSession>), Instant::now())
        .ok_or("failed to attach to the demo session")?;
    session.play();

    let bar = ProgressBar::new((args.duration * 1000).max(1));
    bar.set_style(ProgressStyle::with_template("{msg:>16} {wide_bar} {percent:>3}%")?);

    crossterm::terminal::enable_raw_mode()?;
    let mut keys = spawn_key_reader();
    let mut ticker = interval(Duration::from_millis(settings.tick_interval_ms));
    let mut speed = args.speed;

    loop {
        tokio::select! {
            Some(event) = events.recv() => {
                synchronizer.handle_event(event, Instant::now());
                redraw(&bar, &synchronizer);
            }
            _ = ticker.tick() => {
                synchronizer.tick(Instant::now());
                redraw(&bar, &synchronizer);
            }
            Some(key) = keys.recv() => {
                if handle_key(key, &session, &mut synchronizer, &mut speed) {
                    break;
                }
                redraw(&bar, &synchronizer);
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    synchronizer.detach();
    crossterm::terminal::disable_raw_mode()?;
    bar.finish_and_clear();
    info!(target: LOG_TARGET, "Demo session finished");
    Ok(())
}

/// Key bindings: space toggles play/pause, `[`/`]` change speed, arrow keys
/// seek through a simulated drag gesture, `q`/Esc/Ctrl-C quit.
fn handle_key(
    key: KeyEvent,
    session: &Arc<SimulatedSession>,
    synchronizer: &mut ProgressSynchronizer,
    speed: &mut f32,
) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Char(' ') => session.toggle(),
        KeyCode::Char(']') => {
            *speed = (*speed + 0.25).min(4.0);
            session.set_speed(*speed);
        }
        KeyCode::Char('[') => {
            *speed = (*speed - 0.25).max(0.25);
            session.set_speed(*speed);
        }
        KeyCode::Right => nudge(synchronizer, SEEK_STEP_MS),
        KeyCode::Left => nudge(synchronizer, -SEEK_STEP_MS),
        _ => {}
    }
    false
}

/// Runs a full drag gesture for a keyboard seek.
fn nudge(synchronizer: &mut ProgressSynchronizer, delta_ms: f64) {
    let target = (synchronizer.slider().value() + delta_ms).max(0.0);
    synchronizer.begin_drag();
    synchronizer.drag_to(target);
    synchronizer.end_drag();
}

fn redraw(bar: &ProgressBar, synchronizer: &ProgressSynchronizer) {
    bar.set_length(synchronizer.progress_bar().max().max(1));
    bar.set_position(synchronizer.progress_bar().value());
    bar.set_message(format!(
        "{} / {}",
        synchronizer.time_label().text(),
        make_time_string(synchronizer.duration_ms() / 1000)
    ));
}

/// Forwards key presses from a blocking crossterm reader thread into the
/// async run loop. The thread exits once the receiver is dropped.
fn spawn_key_reader() -> mpsc::UnboundedReceiver<KeyEvent> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || loop {
        match event::poll(Duration::from_millis(100)) {
            Ok(true) => {
                if let Ok(Event::Key(key)) = event::read() {
                    if key.kind == KeyEventKind::Press && tx.send(key).is_err() {
                        break;
                    }
                }
            }
            Ok(false) => {
                if tx.is_closed() {
                    break;
                }
            }
            Err(e) => {
                warn!(target: LOG_TARGET, "Key reader stopped: {}", e);
                break;
            }
        }
    });
    rx
}
