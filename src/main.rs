use anyhow::Result;
use confab::api::ChatClient;
use confab::config::{get_config, initialize_config};
use confab::key_handlers::{handle_chat_input, handle_quit_confirm_input};
use confab::{ui, App, AppState};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use flexi_logger::{FileSpec, Logger};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::{mpsc, Mutex};

enum Event {
    Input(CEvent),
    Tick,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    initialize_config()?;
    let config = get_config();

    // stderr belongs to the TUI; diagnostics go to a log file.
    let _logger = Logger::try_with_env_or_str(&config.log_level)?
        .log_to_file(FileSpec::default().basename("confab").suppress_timestamp())
        .start()?;

    let client = ChatClient::new(config.endpoint.clone());
    let app = Arc::new(Mutex::new(App::new(&config)));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app, client, config.tick_rate_ms).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        log::error!("fatal: {err}");
        eprintln!("{err:?}");
    }
    res
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: Arc<Mutex<App>>,
    client: ChatClient,
    tick_rate_ms: u64,
) -> Result<()> {
    let (tx, mut rx) = mpsc::channel::<Event>(100);

    // Input reader: forwards terminal events and a periodic tick that
    // drives redraws (spinner animation, replies landing from tasks).
    let tick_rate = Duration::from_millis(tick_rate_ms);
    tokio::spawn(async move {
        let mut last_tick = Instant::now();
        loop {
            let timeout = tick_rate
                .checked_sub(last_tick.elapsed())
                .unwrap_or_else(|| Duration::from_millis(0));
            if event::poll(timeout).unwrap_or(false) {
                if let Ok(event) = event::read() {
                    if tx.send(Event::Input(event)).await.is_err() {
                        return;
                    }
                }
            }
            if last_tick.elapsed() >= tick_rate {
                if tx.send(Event::Tick).await.is_err() {
                    return;
                }
                last_tick = Instant::now();
            }
        }
    });

    loop {
        {
            let mut guard = app.lock().await;
            terminal.draw(|f| ui::draw(f, &mut guard))?;
            if guard.state == AppState::Quit {
                break;
            }
        }

        match rx.recv().await {
            Some(Event::Input(CEvent::Key(key))) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let mut guard = app.lock().await;
                match guard.state {
                    AppState::Chat => {
                        handle_chat_input(key, &mut guard, app.clone(), &client);
                    }
                    AppState::QuitConfirm => handle_quit_confirm_input(key, &mut guard),
                    AppState::Quit => break,
                }
            }
            Some(Event::Input(_)) | Some(Event::Tick) => {}
            None => break,
        }
    }

    Ok(())
}
