//! Face command handler.
//!
//! Wires configuration, feeds and the refresh orchestrator to one of the
//! front ends: full-screen face, coloured text frames, or JSON lines.

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use clap::ArgMatches;
use tokio::runtime::Runtime;

use crate::core::config::ActivitySource;
use crate::core::display::DisplaySnapshot;
use crate::core::feeds::{Coordinate, Feeds};
use crate::core::refresh::{Access, FeedSource};
use crate::core::{Config, RefreshOrchestrator};
use crate::ui::face_tui::{run_face_app, FaceApp};
use crate::ui::{colored_frame, json_frame, FaceOptions, Theme};

/// Granularity of Ctrl-C checks while waiting for a frame
const WAIT_SLICE: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Face,
    Plain,
    Json,
}

/// Execute the face command
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let config = load_config(matches)?;

    let mode = if matches.get_flag("json") {
        OutputMode::Json
    } else if matches.get_flag("plain") {
        OutputMode::Plain
    } else {
        OutputMode::Face
    };
    let once = matches.get_flag("once");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .thread_name("termface-refresh")
        .build()
        .context("Failed to build Tokio runtime")?;

    let feeds = Feeds::from_config(&config).context("Failed to set up feeds")?;
    let mut orchestrator = RefreshOrchestrator::new(&config, feeds);

    let should_quit = Arc::new(AtomicBool::new(false));
    let quit_flag = Arc::clone(&should_quit);
    ctrlc::set_handler(move || quit_flag.store(true, Ordering::Relaxed))
        .map_err(|e| anyhow!("Failed to set Ctrl+C handler: {}", e))?;

    {
        let _guard = runtime.enter();
        orchestrator
            .start()
            .context("Failed to start refresh loop")?;
    }

    let options = FaceOptions {
        shell_prefix: config.shell_prefix.clone(),
        battery_bar_width: config.battery_bar_width,
    };
    let theme = Theme::default();

    let outcome = match mode {
        OutputMode::Face if !once => run_face_app(
            FaceApp::new(options, theme, Arc::clone(&should_quit)),
            orchestrator.subscribe(),
        ),
        // A single frame has no screen to live on; print it instead.
        OutputMode::Face => stream_frames(
            &runtime,
            &orchestrator,
            OutputMode::Plain,
            true,
            config.request_timeout(),
            &options,
            &theme,
            &should_quit,
        ),
        mode => stream_frames(
            &runtime,
            &orchestrator,
            mode,
            once,
            config.request_timeout(),
            &options,
            &theme,
            &should_quit,
        ),
    };

    orchestrator.stop();
    outcome
}

/// Config file (or defaults) with command-line overrides applied
pub fn load_config(matches: &ArgMatches) -> Result<Config> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if let Some(fast) = matches.get_one::<u64>("fast-ms") {
        config.fast_interval_ms = *fast;
    }
    if let Some(slow) = matches.get_one::<u64>("slow-secs") {
        config.slow_interval_secs = *slow;
    }
    if let Some(width) = matches.get_one::<usize>("bar-width") {
        config.battery_bar_width = *width;
    }
    if let Some(timeout) = matches.get_one::<u64>("timeout-secs") {
        config.request_timeout_secs = *timeout;
    }
    if let (Some(latitude), Some(longitude)) = (
        matches.get_one::<f64>("lat").copied(),
        matches.get_one::<f64>("lon").copied(),
    ) {
        config.location = Some(Coordinate {
            latitude,
            longitude,
        });
    }
    if matches.get_flag("no-activity") {
        config.activity = ActivitySource::Disabled;
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

#[allow(clippy::too_many_arguments)]
fn stream_frames(
    runtime: &Runtime,
    orchestrator: &RefreshOrchestrator,
    mode: OutputMode,
    once: bool,
    settle: Duration,
    options: &FaceOptions,
    theme: &Theme,
    should_quit: &AtomicBool,
) -> Result<()> {
    let mut snapshots = orchestrator.subscribe();
    let started = Instant::now();
    let mut stdout = io::stdout().lock();

    while !should_quit.load(Ordering::Relaxed) {
        let changed =
            runtime.block_on(async { tokio::time::timeout(WAIT_SLICE, snapshots.changed()).await });

        match changed {
            Err(_) => continue,
            Ok(Err(_)) => break,
            Ok(Ok(())) => {}
        }

        let snapshot = snapshots.borrow_and_update().clone();

        if once
            && awaiting_weather(&snapshot, orchestrator.access(FeedSource::Weather))
            && started.elapsed() < settle
        {
            continue;
        }

        write_frame(&mut stdout, mode, &snapshot, options, theme)?;

        if once {
            break;
        }
    }

    Ok(())
}

/// A single frame waits for the weather unless access to it was refused.
fn awaiting_weather(snapshot: &DisplaySnapshot, weather: Access) -> bool {
    !snapshot.temperature.is_available() && weather != Access::Denied
}

fn write_frame(
    out: &mut impl Write,
    mode: OutputMode,
    snapshot: &DisplaySnapshot,
    options: &FaceOptions,
    theme: &Theme,
) -> Result<()> {
    match mode {
        OutputMode::Json => writeln!(out, "{}", json_frame(snapshot)?)?,
        OutputMode::Plain | OutputMode::Face => {
            writeln!(out, "{}\n", colored_frame(snapshot, options, theme))?
        }
    }
    out.flush()?;
    Ok(())
}
