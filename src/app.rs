// Copyright (c) The Starcoin Core Contributors
// SPDX-License-Identifier: Apache-2.0

use crate::{
    config::Config,
    data_source::{FetchError, TransactionSource},
    input_panel::{Command, InputPanel, HELP_TEXT},
    pagination::{FetchOutcome, FetchRequest, Paginator, SessionState, ValidationError},
    presentation::{render_list, RenderedList, SENTINEL_HEIGHT},
    types::Transaction,
    visibility::{SensorOptions, Sentinel, Viewport, VisibilitySensor},
};
use anyhow::{anyhow, bail, Result};
use std::{io::Write, sync::Arc};
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt},
    sync::mpsc,
    task::JoinHandle,
};
use tracing::{debug, info, warn};

#[derive(Debug)]
struct FetchCompletion {
    generation: u64,
    result: Result<Vec<Transaction>, FetchError>,
}

/// Ties the prompt, the list, the sensor, and the paginator together on one task.
pub struct App<S: TransactionSource + 'static> {
    source: Arc<S>,
    paginator: Paginator,
    panel: InputPanel,
    sensor: VisibilitySensor,
    viewport: Viewport,
    list: RenderedList,
    sentinel_mount: u64,
    sentinel_mounted: bool,
    in_flight: Option<JoinHandle<()>>,
    completions_tx: mpsc::UnboundedSender<FetchCompletion>,
    completions_rx: mpsc::UnboundedReceiver<FetchCompletion>,
}

impl<S: TransactionSource + 'static> App<S> {
    pub fn new(source: Arc<S>, config: &Config) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        let sensor = VisibilitySensor::new(SensorOptions {
            root_margin: config.root_margin,
            ..SensorOptions::default()
        });

        Self {
            source,
            paginator: Paginator::new(),
            panel: InputPanel::new(),
            sensor,
            viewport: Viewport::new(config.viewport_rows),
            list: RenderedList::default(),
            sentinel_mount: 0,
            sentinel_mounted: false,
            in_flight: None,
            completions_tx,
            completions_rx,
        }
    }

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    pub fn list(&self) -> &RenderedList {
        &self.list
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Submit `endpoint` as if typed into the panel.
    pub fn apply(&mut self, endpoint: &str) -> Result<(), ValidationError> {
        let result = self.panel.apply(&mut self.paginator, endpoint);
        if result.is_ok() {
            self.abort_in_flight();
            self.viewport.to_top();
            // The old list is gone, so the sentinel is a fresh mount.
            self.sentinel_mounted = false;
        }
        self.refresh();
        result
    }

    /// Returns `false` when the user asked to quit.
    pub fn handle_command(&mut self, command: Command) -> bool {
        debug!("App::handle_command | {:?}", command);
        match command {
            Command::Apply(endpoint) => {
                if let Err(e) = self.apply(&endpoint) {
                    warn!("App::handle_command | rejected endpoint: {}", e);
                }
                return true;
            }
            Command::ScrollDown => self.viewport.scroll_down(self.viewport.height, self.list.len()),
            Command::ScrollUp => self.viewport.scroll_up(self.viewport.height),
            Command::Top => self.viewport.to_top(),
            Command::Bottom => self.viewport.to_bottom(self.list.len()),
            Command::Help => self.panel.set_notice(HELP_TEXT),
            Command::Quit => {
                self.abort_in_flight();
                return false;
            }
            Command::Unknown(input) => self.panel.set_notice(format!("unknown command: {}", input)),
        }
        self.refresh();
        true
    }

    /// Wait for the outstanding fetch, if any, and apply its result.
    /// Answers left over from replaced sessions are skipped on the way.
    pub async fn settle(&mut self) -> Result<()> {
        while self.in_flight.is_some() {
            let completion = self
                .completions_rx
                .recv()
                .await
                .ok_or_else(|| anyhow!("fetch completion channel closed"))?;
            if self.on_completion(completion) != FetchOutcome::Stale {
                break;
            }
        }
        Ok(())
    }

    fn on_completion(&mut self, completion: FetchCompletion) -> FetchOutcome {
        let outcome = self
            .paginator
            .on_fetch_complete(completion.generation, completion.result);
        debug!("App::on_completion | {:?}", outcome);
        if outcome != FetchOutcome::Stale {
            self.in_flight = None;
        }
        self.refresh();
        outcome
    }

    fn abort_in_flight(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            debug!("App::abort_in_flight | aborting outstanding fetch");
            handle.abort();
        }
    }

    fn spawn_fetch(&mut self, request: FetchRequest) {
        info!(
            "App::spawn_fetch | page {} of {}",
            request.page, request.endpoint
        );
        let source = self.source.clone();
        let tx = self.completions_tx.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let result = source.fetch_page(&request.endpoint, request.page).await;
            let _ = tx.send(FetchCompletion {
                generation: request.generation,
                result,
            });
        }));
    }

    /// Re-render the list and let the sensor look at the new layout.
    fn refresh(&mut self) {
        self.list = render_list(self.paginator.records(), self.paginator.has_more());
        self.viewport.clamp(self.list.len());
        self.sync_sensor();
    }

    fn sync_sensor(&mut self) {
        let row = match self.list.sentinel_row {
            Some(row) => row,
            None => {
                self.sentinel_mounted = false;
                self.sensor.unbind();
                return;
            }
        };

        if !self.sentinel_mounted {
            self.sentinel_mount += 1;
            self.sentinel_mounted = true;
        }
        self.sensor.bind(self.sentinel_mount);

        let sentinel = Sentinel {
            mount: self.sentinel_mount,
            row,
            height: SENTINEL_HEIGHT,
        };
        if self.sensor.observe(self.viewport, sentinel).is_some() {
            if let Some(request) = self.paginator.on_sentinel_visible() {
                self.spawn_fetch(request);
            }
        }
    }

    pub fn render_screen(&self) -> String {
        let session = self.paginator.session();
        let status = match session.state {
            SessionState::Idle => "enter an endpoint",
            SessionState::AwaitingMore => "more available",
            SessionState::Fetching => "loading...",
            SessionState::Error => "stopped",
            SessionState::Exhausted => "end of history",
        };

        let mut screen = String::new();
        screen.push_str(&self.panel.render(&self.paginator));
        screen.push('\n');
        for line in self.list.window(self.viewport) {
            screen.push_str(line);
            screen.push('\n');
        }
        screen.push_str(&format!(
            "-- {} transactions | page {} | {} --\n",
            session.records.len(),
            session.page,
            status
        ));
        screen
    }

    fn draw<W: Write>(&self, out: &mut W) -> Result<()> {
        out.write_all(self.render_screen().as_bytes())?;
        out.flush()?;
        Ok(())
    }

    /// Interactive loop: one command per input line, redrawing after every event.
    pub async fn run<R, W>(&mut self, input: R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut lines = input.lines();
        self.draw(out)?;

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    match line? {
                        Some(line) => {
                            if !self.handle_command(Command::parse(&line)) {
                                break;
                            }
                        }
                        None => break,
                    }
                }
                Some(completion) = self.completions_rx.recv() => {
                    self.on_completion(completion);
                }
            }
            self.draw(out)?;
        }

        self.abort_in_flight();
        info!("App::run | exited");
        Ok(())
    }

    /// Headless mode: keep the list scrolled to the bottom and write every
    /// loaded transaction as one JSON line until no further page is requested.
    pub async fn dump<W: Write>(&mut self, endpoint: &str, out: &mut W) -> Result<usize> {
        self.apply(endpoint)?;

        let mut written = 0;
        while self.is_fetching() {
            self.settle().await?;

            for txn in &self.paginator.records()[written..] {
                serde_json::to_writer(&mut *out, txn)?;
                writeln!(out)?;
            }
            written = self.paginator.records().len();

            if self.paginator.state() == SessionState::Error {
                bail!("{}", self.paginator.error());
            }

            self.viewport.to_bottom(self.list.len());
            self.sync_sensor();
        }

        out.flush()?;
        info!("App::dump | wrote {} transactions", written);
        Ok(written)
    }
}
