use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::terminal;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use drumkit::shared::InputEvent;
use drumkit::tui;
use drumkit::{ChannelId, ChannelOutput, Middle, config, logging};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let kit_dir: PathBuf = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());

    logging::init(&kit_dir)?;
    let config = config::load_config(&kit_dir)?;
    if let Err(e) = config::write_template_if_missing(&kit_dir, &config) {
        tracing::warn!("could not write kit config template: {e:#}"); // read-only kit dir is fine
    }
    let audio = drumkit::start_audio()?;

    let sinks = ChannelId::ALL.map(|id| ChannelOutput::new(id, audio.sender(), &kit_dir, audio.sample_rate()));
    let mut middle = Middle::new(config, sinks);
    tracing::info!(kit_dir = %kit_dir.display(), "drumkit ready");

    terminal::enable_raw_mode()?;
    let _guard = RawModeGuard; // restores the terminal on every exit path
    crossterm::execute!(std::io::stdout(), terminal::EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(std::io::stdout());
    let mut term = Terminal::new(backend)?;
    term.clear()?;

    let frame_rate = Duration::from_millis(16); // ~60fps, also the timer's resolution
    let mut last_tick = Instant::now();
    let mut tui_state = tui::mode::TuiState::default();

    loop {
        let ds = middle.display_state(Instant::now());

        term.draw(|frame| {
            tui::view::render(frame, frame.area(), &ds);
        })?;

        for event in tui::input::poll_input(frame_rate, &mut tui_state)? {
            if event == InputEvent::Quit {
                tracing::info!("quit");
                return Ok(());
            }
            middle.handle_input(event);
        }

        let now = Instant::now();
        middle.tick(now - last_tick);
        last_tick = now;
    }
}

struct RawModeGuard;
impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = crossterm::execute!(std::io::stdout(), terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
