use anyhow::{anyhow, Result};
use apiterm::io::{MockEventStream, MockRenderStream};
use apiterm::views::ansi_escape_codes::strip_styles;
use apiterm::{AppController, Completion};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use cucumber::World;
use std::time::Duration;
use wiremock::MockServer;

pub type TestController = AppController<MockEventStream, MockRenderStream>;

/// How long a scenario waits for a request to finish
const RESPONSE_TIMEOUT: Duration = Duration::from_secs(5);

/// Drives a real controller through mock terminal streams
#[derive(World)]
#[world(init = Self::new)]
pub struct ApitermWorld {
    /// Controller under test, created by "the form is open"
    pub controller: Option<TestController>,

    /// Mock HTTP server for testing requests
    pub mock_server: Option<MockServer>,

    /// Last completion received while waiting for a response
    pub last_completion: Option<Completion>,
}

impl std::fmt::Debug for ApitermWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApitermWorld")
            .field("open", &self.controller.is_some())
            .field("mock_server", &self.mock_server.as_ref().map(|s| s.uri()))
            .field("last_completion", &self.last_completion)
            .finish()
    }
}

impl ApitermWorld {
    pub fn new() -> Self {
        Self {
            controller: None,
            mock_server: None,
            last_completion: None,
        }
    }

    pub fn open_form(&mut self) -> Result<()> {
        let mut controller =
            AppController::with_io_streams(MockEventStream::empty(), MockRenderStream::new())?;
        controller.render()?;
        self.controller = Some(controller);
        Ok(())
    }

    pub fn controller(&self) -> Result<&TestController> {
        self.controller
            .as_ref()
            .ok_or_else(|| anyhow!("the form has not been opened"))
    }

    fn controller_mut(&mut self) -> Result<&mut TestController> {
        self.controller
            .as_mut()
            .ok_or_else(|| anyhow!("the form has not been opened"))
    }

    /// Queue one terminal event and let the controller consume it
    pub async fn send_event(&mut self, event: Event) -> Result<()> {
        let controller = self.controller_mut()?;
        controller.event_stream_mut().push_event(event);
        while controller.event_stream_mut().remaining() > 0 && !controller.should_quit() {
            controller.tick().await?;
        }
        Ok(())
    }

    pub async fn press_key(&mut self, key: &str) -> Result<()> {
        let event = Event::Key(parse_key(key)?);
        self.send_event(event).await
    }

    pub async fn type_text(&mut self, text: &str) -> Result<()> {
        for ch in text.chars() {
            let event = Event::Key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE));
            self.send_event(event).await?;
        }
        Ok(())
    }

    pub async fn paste(&mut self, text: &str) -> Result<()> {
        self.send_event(Event::Paste(text.to_string())).await
    }

    pub async fn resize(&mut self, width: u16, height: u16) -> Result<()> {
        self.send_event(Event::Resize(width, height)).await
    }

    pub async fn wait_for_response(&mut self) -> Result<()> {
        let completion = self
            .controller_mut()?
            .wait_for_completion(RESPONSE_TIMEOUT)
            .await?
            .ok_or_else(|| anyhow!("no response within {RESPONSE_TIMEOUT:?}"))?;
        self.last_completion = Some(completion);
        Ok(())
    }

    /// Current screen with styles removed
    pub fn screen(&self) -> Result<String> {
        let frame = self.controller()?.view_renderer().render_stream().current_frame();
        Ok(strip_styles(&frame))
    }

    /// Mock server for the scenario, started on first use
    pub async fn mock_server(&mut self) -> &MockServer {
        let server = match self.mock_server.take() {
            Some(server) => server,
            None => MockServer::start().await,
        };
        self.mock_server.insert(server)
    }

    pub fn mock_server_url(&self, path: &str) -> String {
        let base = self
            .mock_server
            .as_ref()
            .map(|server| server.uri())
            .unwrap_or_else(|| "http://127.0.0.1:1".to_string());
        format!("{base}{path}")
    }
}

/// Translate a key name used in feature files
pub fn parse_key(key: &str) -> Result<KeyEvent> {
    let plain = |code| KeyEvent::new(code, KeyModifiers::NONE);
    let event = match key {
        "Enter" => plain(KeyCode::Enter),
        "Tab" => plain(KeyCode::Tab),
        "Shift+Tab" | "BackTab" => KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT),
        "Backspace" => plain(KeyCode::Backspace),
        "Delete" => plain(KeyCode::Delete),
        "Up" => plain(KeyCode::Up),
        "Down" => plain(KeyCode::Down),
        "Left" => plain(KeyCode::Left),
        "Right" => plain(KeyCode::Right),
        "Home" => plain(KeyCode::Home),
        "End" => plain(KeyCode::End),
        s if s.starts_with("Ctrl+") && s.len() == 6 => {
            let ch = s
                .chars()
                .last()
                .map(|c| c.to_ascii_lowercase())
                .ok_or_else(|| anyhow!("Unknown key: {key}"))?;
            KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
        }
        s if s.chars().count() == 1 => match s.chars().next() {
            Some(ch) => plain(KeyCode::Char(ch)),
            None => return Err(anyhow!("Unknown key: {key}")),
        },
        _ => return Err(anyhow!("Unknown key: {key}")),
    };
    Ok(event)
}
