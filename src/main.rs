use crossterm::{
    event::{Event, EventStream},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use flag_master::{
    App, AppState, Config, CountryRecord, DatasetError, DatasetSource, Scheduler, apply_dataset,
    handle_key, handle_timer_event, load_dataset, logger, ui,
};
use futures::StreamExt;
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use std::io;
use tokio::sync::mpsc::{self, UnboundedSender};

type LoadResult = Result<Vec<CountryRecord>, DatasetError>;

#[tokio::main]
async fn main() -> io::Result<()> {
    let config = Config::from_env();
    logger::init(&config.log_path);
    logger::log(&format!("Flag Master starting, dataset {}", config.dataset));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &config).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        logger::log(&format!("Exited with error: {}", e));
    }
    result
}

fn spawn_dataset_load(source: DatasetSource, tx: UnboundedSender<LoadResult>) {
    tokio::spawn(async move {
        let result = load_dataset(&source).await;
        let _ = tx.send(result);
    });
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, config: &Config) -> io::Result<()> {
    let mut app = App::new(config.dataset.to_string());
    let (timer_tx, mut timer_rx) = mpsc::unbounded_channel();
    let mut scheduler = Scheduler::new(timer_tx);
    let (load_tx, mut load_rx) = mpsc::unbounded_channel::<LoadResult>();
    let mut load_in_flight = false;
    let mut events = EventStream::new();

    loop {
        if app.state == AppState::Loading && !load_in_flight {
            load_in_flight = true;
            spawn_dataset_load(config.dataset.clone(), load_tx.clone());
        }

        terminal.draw(|f| ui::draw(f, &app))?;

        tokio::select! {
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) => {
                    let effects = handle_key(&mut app, key);
                    scheduler.apply(&effects);
                }
                // Resize and the rest only need a redraw.
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e),
                None => break,
            },
            Some(event) = timer_rx.recv() => {
                let effects = handle_timer_event(&mut app, event);
                scheduler.apply(&effects);
            }
            Some(result) = load_rx.recv() => {
                load_in_flight = false;
                apply_dataset(&mut app, result);
            }
        }

        if app.should_quit {
            break;
        }
    }

    scheduler.cancel_all();
    logger::log("Flag Master exiting");
    Ok(())
}
