//! Keys Check - terminal keyboard tester

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::Style,
    symbols::border,
    widgets::{Block, Borders},
    Terminal,
};
use std::io::stdout;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};

use keys_check::{
    config::Config,
    keyboard::{KeyEvent, KeySource},
    logging,
    ui::{
        AccessPanel, App, AppState, DeviceChooserPopup, Header, KeyboardVisual, StatusBar,
        ToastStack, BOARD_HEIGHT,
    },
};

/// Restore the terminal to its normal state
fn restore_terminal() -> std::io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)
}

fn main() -> Result<()> {
    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    match logging::init(&config.logging) {
        Ok(path) => log::info!("keys-check starting, logging to {}", path.display()),
        Err(e) => eprintln!("Logging disabled: {}", e),
    }
    if let Some(e) = config_error {
        log::warn!("config not loaded, using defaults: {}", e);
    }

    // Ctrl+C arrives as a key in raw mode; the handler covers the moments
    // before raw mode is on and signals sent from outside
    let interrupted = Arc::new(AtomicBool::new(false));
    {
        let interrupted = Arc::clone(&interrupted);
        ctrlc::set_handler(move || interrupted.store(true, Ordering::SeqCst))?;
    }

    // Attach the key listener before touching the terminal, so a listener
    // failure never leaves it in raw mode
    let (event_tx, event_rx) = mpsc::channel::<KeyEvent>();
    let source = KeySource::attach(event_tx);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, config, source, event_rx, &interrupted);

    restore_terminal()?;
    terminal.show_cursor()?;

    let app = result?;
    println!("\nKeys Check session complete.");
    println!("Key presses counted: {}", app.press_count());
    if !app.keyboard_name().is_empty() {
        println!("Keyboard: {}", app.keyboard_name());
    }
    println!("Session duration: {}", app.elapsed_formatted());

    Ok(())
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    config: Config,
    mut source: KeySource,
    event_rx: mpsc::Receiver<KeyEvent>,
    interrupted: &AtomicBool,
) -> Result<App> {
    let mut app = App::new(config.clone());
    app.listener_name = source.name();

    let tick_rate = config.refresh_interval();

    loop {
        source.poll();

        while let Ok(mut key_event) = event_rx.try_recv() {
            app.process_event(&mut key_event);
        }

        app.tick();

        terminal.draw(|frame| {
            let size = frame.area();
            let colors = app.colors();

            frame.render_widget(Block::default().style(Style::default().bg(colors.bg)), size);

            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(1),                // Header
                    Constraint::Length(3),                // Access panel
                    Constraint::Length(BOARD_HEIGHT + 2), // Keyboard
                    Constraint::Min(0),
                    Constraint::Length(1),                // Status bar
                ])
                .split(size);

            frame.render_widget(Header::new(app.is_dark(), colors), chunks[0]);
            frame.render_widget(
                AccessPanel::new(app.press_count(), app.keyboard_name(), app.request_phase(), colors),
                chunks[1],
            );

            let kb_block = Block::default()
                .title(" \u{2328} Keyboard ")
                .borders(Borders::ALL)
                .border_set(border::ROUNDED)
                .border_style(Style::default().fg(colors.dim));
            let kb_inner = kb_block.inner(chunks[2]);
            frame.render_widget(kb_block, chunks[2]);
            frame.render_widget(KeyboardVisual::new(app.board(), colors), kb_inner);

            let elapsed = app.elapsed_formatted();
            frame.render_widget(
                StatusBar::new(
                    &app.listener_name,
                    &elapsed,
                    app.board().tested_count(),
                    app.board().elements().len(),
                    colors,
                ),
                chunks[4],
            );

            if let Some(chooser) = app.chooser() {
                frame.render_widget(DeviceChooserPopup::new(chooser, colors), size);
            }
            frame.render_widget(ToastStack::new(&app.notifications, colors), size);
        })?;

        // Terminal events drive the control bindings only; key testing
        // comes from the listeners above
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let disposition = app.handle_terminal_key(key);
                    log::trace!("terminal key {:?}: {:?}", key.code, disposition);
                }
            }
        }

        if interrupted.load(Ordering::SeqCst) {
            app.quit();
        }

        if app.state == AppState::Quitting {
            break;
        }
    }

    log::info!("session ended after {} key presses", app.press_count());
    Ok(app)
}
