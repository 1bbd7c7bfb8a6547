use std::io::{self, BufRead, Write};
use std::sync::{mpsc, Arc};
use std::thread;

use anyhow::Context;
use storefront_core::{update, Msg, StorefrontState};
use storefront_engine::{EngineHandle, GraphqlClient};
use storefront_logging::{store_info, store_warn};

use super::config::{load_config, AppConfig, CONFIG_FILENAME};
use super::effects::EffectRunner;
use super::logging;
use super::persistence;
use super::ui::commands::{category_list, parse_command, Command, HELP};
use super::ui::render::render;

/// Everything the main loop reacts to, in arrival order.
pub enum Input {
    Msg(Msg),
    Line(String),
    Eof,
}

pub fn run_app() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("cannot determine working directory")?;
    let (config, config_error) = match load_config(&cwd) {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };
    logging::initialize(config.log_destination, config.level(), &config.state_dir);
    if let Some(err) = config_error {
        store_warn!("Using default settings: {}", err);
    }

    let client = Arc::new(
        GraphqlClient::new(config.client_settings())
            .with_context(|| format!("invalid endpoint in {CONFIG_FILENAME}"))?,
    );
    store_info!("Storefront started against {}", config.endpoint);

    let (input_tx, input_rx) = mpsc::channel::<Input>();
    let engine = EngineHandle::new(client.clone(), client, config.engine_settings())
        .context("cannot start the request engine")?;
    let runner = EffectRunner::new(engine, config.state_dir.clone(), input_tx.clone());
    spawn_stdin_reader(input_tx);

    let mut app = App {
        state: StorefrontState::with_criteria(config.initial_criteria()),
        runner,
    };
    let saved = persistence::load_cart(&config.state_dir);
    if !saved.is_empty() {
        app.dispatch(Msg::RestoreCart(saved));
    }
    app.dispatch(Msg::ViewOpened(config.initial_criteria()));
    println!("{HELP}");
    app.render_if_dirty()?;

    while let Ok(input) = input_rx.recv() {
        match input {
            Input::Msg(msg) => app.dispatch(msg),
            Input::Line(line) => match parse_command(&line) {
                Ok(Some(Command::Dispatch(msgs))) => {
                    for msg in msgs {
                        app.dispatch(msg);
                    }
                }
                Ok(Some(Command::Open)) => {
                    let criteria = app.state.criteria().clone();
                    app.dispatch(Msg::ViewOpened(criteria));
                }
                Ok(Some(Command::Help)) => println!("{HELP}"),
                Ok(Some(Command::Categories)) => println!("{}", category_list()),
                Ok(Some(Command::Quit)) => break,
                Ok(None) => {}
                Err(err) => println!("{err}"),
            },
            Input::Eof => break,
        }
        app.render_if_dirty()?;
    }

    app.dispatch(Msg::ViewClosed);
    app.runner.shutdown();
    store_info!("Storefront stopped");
    Ok(())
}

struct App {
    state: StorefrontState,
    runner: EffectRunner,
}

impl App {
    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.enqueue(effects);
    }

    fn render_if_dirty(&mut self) -> anyhow::Result<()> {
        if !self.state.consume_dirty() {
            return Ok(());
        }
        let mut stdout = io::stdout().lock();
        write!(stdout, "\n{}\n> ", render(&self.state.view())).context("stdout closed")?;
        stdout.flush().context("stdout closed")?;
        Ok(())
    }
}

fn spawn_stdin_reader(input_tx: mpsc::Sender<Input>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if input_tx.send(Input::Line(line)).is_err() {
                return;
            }
        }
        let _ = input_tx.send(Input::Eof);
    });
}
