//! # Application Controller
//!
//! Owns the model and runs the event loop: terminal events and request
//! completions go through the state machine, effects are carried out, and
//! the frame is redrawn. The model is only ever touched from here.

use crate::tui::{
    events::{AppEvent, Completion},
    io::{EventStream, RenderStream, TerminalEventStream, TerminalRenderStream},
    models::Model,
    services::http::HttpService,
    update::{Effect, StateMachine},
    views::{TerminalRenderer, ViewRenderer},
};
use anyhow::Result;
use std::io;
use std::time::Duration;

/// How long one tick waits for terminal input
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Drives the interactive form
pub struct AppController<ES: EventStream, RS: RenderStream> {
    machine: StateMachine,
    model: Model,
    view_renderer: TerminalRenderer<RS>,
    event_stream: ES,
    http: HttpService,
    should_quit: bool,
}

impl AppController<TerminalEventStream, TerminalRenderStream<io::Stdout>> {
    /// Controller bound to the real terminal
    pub fn new() -> Result<Self> {
        Self::with_io_streams(TerminalEventStream::new(), TerminalRenderStream::new())
    }
}

impl<ES: EventStream, RS: RenderStream> AppController<ES, RS> {
    /// Create a controller with injected I/O streams
    pub fn with_io_streams(event_stream: ES, render_stream: RS) -> Result<Self> {
        Self::with_http_service(event_stream, render_stream, HttpService::new()?)
    }

    pub fn with_http_service(
        event_stream: ES,
        render_stream: RS,
        http: HttpService,
    ) -> Result<Self> {
        let view_renderer = TerminalRenderer::with_render_stream(render_stream)?;
        let (width, height) = view_renderer.terminal_size();

        Ok(Self {
            machine: StateMachine::new(),
            model: Model::with_viewport(width, height),
            view_renderer,
            event_stream,
            http,
            should_quit: false,
        })
    }

    /// Run until the user quits. The terminal is restored on every exit path.
    pub async fn run(&mut self) -> Result<()> {
        self.view_renderer.initialize()?;
        tracing::info!("Interactive session started");

        let result = self.event_loop().await;
        let cleanup = self.view_renderer.cleanup();

        tracing::info!("Interactive session ended");
        result.and(cleanup)
    }

    async fn event_loop(&mut self) -> Result<()> {
        self.render()?;
        while !self.should_quit {
            self.tick().await?;
        }
        Ok(())
    }

    /// One pass of the loop: apply finished requests, then at most one
    /// terminal event, then redraw if anything happened
    pub async fn tick(&mut self) -> Result<()> {
        // Let dispatch tasks make progress on single-threaded runtimes
        tokio::task::yield_now().await;

        let mut dirty = false;
        while let Some(completion) = self.http.poll_response() {
            self.apply(AppEvent::Completion(completion));
            dirty = true;
        }

        let mut resized = false;
        if self.event_stream.poll(POLL_INTERVAL)? {
            let raw = self.event_stream.read()?;
            tracing::debug!("Received terminal event: {:?}", raw);

            if let Some(event) = AppEvent::from_terminal(raw) {
                if let AppEvent::Resize { width, height } = event {
                    self.view_renderer.update_size(width, height);
                    resized = true;
                }
                self.apply(event);
                dirty = true;
            }
        }

        if self.should_quit {
            return Ok(());
        }
        if resized {
            self.view_renderer.redraw(&self.model)?;
        } else if dirty {
            self.view_renderer.render_full(&self.model)?;
        }
        Ok(())
    }

    /// Wait up to `timeout` for the in-flight request and apply its result.
    /// Returns the completion, or `None` on timeout.
    pub async fn wait_for_completion(&mut self, timeout: Duration) -> Result<Option<Completion>> {
        match tokio::time::timeout(timeout, self.http.next_response()).await {
            Ok(Some(completion)) => {
                self.apply(AppEvent::Completion(completion.clone()));
                self.view_renderer.render_full(&self.model)?;
                Ok(Some(completion))
            }
            Ok(None) => Err(anyhow::anyhow!("completion channel closed")),
            Err(_) => Ok(None),
        }
    }

    /// Draw the current model
    pub fn render(&mut self) -> Result<()> {
        self.view_renderer.render_full(&self.model)
    }

    fn apply(&mut self, event: AppEvent) {
        let model = std::mem::take(&mut self.model);
        let (model, effect) = self.machine.update(model, event);
        self.model = model;

        match effect {
            Effect::None => {}
            Effect::Quit => {
                tracing::debug!("Quit requested");
                self.should_quit = true;
            }
            Effect::Dispatch(request) => self.http.execute_async(request),
        }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn view_renderer(&self) -> &TerminalRenderer<RS> {
        &self.view_renderer
    }

    pub fn event_stream_mut(&mut self) -> &mut ES {
        &mut self.event_stream
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}
