use std::io::{self, BufRead};
use std::path::Path;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use catalog_core::Msg;
use catalog_engine::{CatalogClient, ClientSettings, EngineHandle, FavoritesStore, RequestSigner};
use catalog_logging::{catalog_info, catalog_warn};
use log::LevelFilter;

use super::config::{self, CONFIG_FILENAME};
use super::driver::SessionDriver;
use super::effects::EffectRunner;
use super::input::{parse_command, Command};
use super::ui::constants::{HELP, PROMPT};

const ENGINE_POLL_INTERVAL: Duration = Duration::from_millis(20);

enum Input {
    Line(String),
    Closed,
}

pub fn run_app() -> anyhow::Result<()> {
    let config = config::load_from_environment(Path::new(CONFIG_FILENAME))?;
    catalog_logging::initialize(config.log_destination, LevelFilter::Info, &config.log_path);
    catalog_info!(
        "Starting catalog browser base_url={} data_dir={:?}",
        config.base_url,
        config.data_dir
    );

    let client = CatalogClient::with_settings(ClientSettings {
        request_timeout: config.request_timeout,
        ..ClientSettings::default()
    })?;
    let engine = EngineHandle::new(Arc::new(client)).context("failed to start fetch engine")?;
    let signer = RequestSigner::new(config.base_url.clone(), config.credentials.clone());
    let favorites = Arc::new(FavoritesStore::new(config.data_dir.clone()));
    let runner = EffectRunner::new(engine, signer, favorites.clone());
    let mut driver = SessionDriver::new(runner, favorites, io::stdout());

    let (input_tx, input_rx) = mpsc::channel::<Input>();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if input_tx.send(Input::Line(line)).is_err() {
                return;
            }
        }
        let _ = input_tx.send(Input::Closed);
    });

    driver.write_text(HELP)?;
    driver.dispatch(Msg::Started)?;
    driver.write_text(PROMPT)?;

    loop {
        match input_rx.recv_timeout(ENGINE_POLL_INTERVAL) {
            Ok(Input::Line(line)) => {
                match parse_command(&line) {
                    Ok(Command::Quit) => break,
                    Ok(Command::Help) => driver.write_text(HELP)?,
                    Ok(Command::Msg(msg)) => driver.dispatch(msg)?,
                    Err(message) => {
                        catalog_warn!("Rejected input {:?}: {}", line, message);
                        driver.write_text(&format!("{message}\n"))?;
                    }
                }
                driver.write_text(PROMPT)?;
            }
            Ok(Input::Closed) | Err(mpsc::RecvTimeoutError::Disconnected) => break,
            Err(mpsc::RecvTimeoutError::Timeout) => {}
        }
        if driver.pump_engine()? > 0 {
            driver.write_text(PROMPT)?;
        }
    }

    catalog_info!("Catalog browser exiting");
    Ok(())
}
