use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::watch;

use super::render::render_face;
use crate::core::display::DisplaySnapshot;
use crate::ui::layout::FaceOptions;
use crate::ui::theme::Theme;

/// How often the loop looks for a new snapshot or a quit request
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Face application state
pub struct FaceApp {
    pub snapshot: Arc<DisplaySnapshot>,
    pub options: FaceOptions,
    pub theme: Theme,
    pub should_quit: Arc<AtomicBool>,
}

impl FaceApp {
    pub fn new(options: FaceOptions, theme: Theme, should_quit: Arc<AtomicBool>) -> Self {
        Self {
            snapshot: Arc::new(DisplaySnapshot::default()),
            options,
            theme,
            should_quit,
        }
    }

    /// Take the newest snapshot if one arrived. `None` once the producer is gone.
    pub fn update_snapshot(
        &mut self,
        snapshots: &mut watch::Receiver<Arc<DisplaySnapshot>>,
    ) -> Option<bool> {
        match snapshots.has_changed() {
            Ok(true) => {
                self.snapshot = snapshots.borrow_and_update().clone();
                Some(true)
            }
            Ok(false) => Some(false),
            Err(_) => None,
        }
    }
}

/// Run the full-screen face until Ctrl-C or the refresh loop goes away
pub fn run_face_app(
    mut app: FaceApp,
    mut snapshots: watch::Receiver<Arc<DisplaySnapshot>>,
) -> Result<()> {
    // Setup terminal; no raw mode so Ctrl-C still arrives as a signal
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    app.snapshot = snapshots.borrow_and_update().clone();
    let mut needs_draw = true;

    let outcome = loop {
        if app.should_quit.load(Ordering::Relaxed) {
            break Ok(());
        }

        if needs_draw {
            if let Err(e) = terminal.draw(|frame| {
                render_face(frame, &app.snapshot, &app.options, &app.theme)
            }) {
                break Err(e).context("Failed to draw face");
            }
        }

        std::thread::sleep(POLL_INTERVAL);

        needs_draw = match app.update_snapshot(&mut snapshots) {
            Some(changed) => changed,
            None => {
                log::info!("Snapshot stream closed");
                break Ok(());
            }
        };
    };

    // Restore terminal
    execute!(terminal.backend_mut(), LeaveAlternateScreen, Show)
        .context("Failed to leave alternate screen")?;

    outcome
}
