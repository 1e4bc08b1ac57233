use anyhow::{anyhow, Result};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use cucumber::World;
use serde_json::Value;
use std::time::{Duration, Instant};
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// Import real application components
use hourline::config::LookupSettings;
use hourline::repl::io::{MockEventStream, MockRenderStream};
use hourline::{AppController, MemorySessionStore, ScreenModel, UiState};

/// Upper bound for a lookup to settle during a scenario
const LOOKUP_DEADLINE: Duration = Duration::from_secs(5);

type TestApp = AppController<MockEventStream, MockRenderStream>;

/// Scenario state: a mock hours API and the real application controller
/// running on mock terminal streams
#[derive(World)]
#[world(init = Self::new)]
pub struct HourlineWorld {
    /// Mock hours API
    pub mock_server: Option<MockServer>,

    /// Application under test, created on first interaction
    pub app: Option<TestApp>,

    /// Identifier remembered from a previous session
    pub remembered_identifier: Option<String>,
}

impl std::fmt::Debug for HourlineWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HourlineWorld")
            .field("mock_server", &self.mock_server.as_ref().map(MockServer::uri))
            .field("app_started", &self.app.is_some())
            .field("remembered_identifier", &self.remembered_identifier)
            .finish()
    }
}

impl HourlineWorld {
    pub fn new() -> Self {
        Self {
            mock_server: None,
            app: None,
            remembered_identifier: None,
        }
    }

    /// Start the mock hours API if it is not running yet
    pub async fn mock_server(&mut self) -> &MockServer {
        if self.mock_server.is_none() {
            self.mock_server = Some(MockServer::start().await);
        }
        match &self.mock_server {
            Some(server) => server,
            None => unreachable!("mock server was just started"),
        }
    }

    /// Answer lookups for `matricula` with `body` after `delay`
    pub async fn mount_response(
        &mut self,
        matricula: &str,
        status: u16,
        body: Option<Value>,
        delay: Duration,
    ) {
        let mut template = ResponseTemplate::new(status).set_delay(delay);
        if let Some(body) = body {
            template = template.set_body_json(body);
        }

        Mock::given(method("GET"))
            .and(query_param("matricula", matricula))
            .respond_with(template)
            .mount(self.mock_server().await)
            .await;
    }

    /// The application controller, created against the mock API on first use
    pub async fn app(&mut self) -> Result<&mut TestApp> {
        if self.app.is_none() {
            let api_url = self.mock_server().await.uri();
            let settings = LookupSettings {
                api_url,
                ..LookupSettings::default()
            };
            let session = match &self.remembered_identifier {
                Some(identifier) => MemorySessionStore::with_last_identifier(identifier.clone()),
                None => MemorySessionStore::new(),
            };

            let app = AppController::with_io_streams(
                &settings,
                Box::new(session),
                None,
                MockEventStream::empty(),
                MockRenderStream::new(),
            )?;
            self.app = Some(app);
        }
        self.app
            .as_mut()
            .ok_or_else(|| anyhow!("application was not created"))
    }

    pub async fn send_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Result<()> {
        let app = self.app().await?;
        app.handle_event(Event::Key(KeyEvent::new(code, modifiers)));
        Ok(())
    }

    pub async fn type_text(&mut self, text: &str) -> Result<()> {
        for ch in text.chars() {
            self.send_key(KeyCode::Char(ch), KeyModifiers::NONE).await?;
        }
        Ok(())
    }

    pub async fn paste(&mut self, text: &str) -> Result<()> {
        let app = self.app().await?;
        app.handle_event(Event::Paste(text.to_string()));
        Ok(())
    }

    /// Replace the input and trigger a search, letting the debounce elapse
    pub async fn start_search(&mut self, matricula: &str) -> Result<()> {
        self.send_key(KeyCode::Char('u'), KeyModifiers::CONTROL)
            .await?;
        self.type_text(matricula).await?;
        self.send_key(KeyCode::Enter, KeyModifiers::NONE).await?;

        let app = self.app().await?;
        app.tick(Instant::now() + Duration::from_secs(1));
        Ok(())
    }

    /// Wait until the current lookup has been applied to the screen
    pub async fn wait_for_lookup(&mut self) -> Result<()> {
        let app = self.app().await?;
        let deadline = tokio::time::Instant::now() + LOOKUP_DEADLINE;

        while app.lookup().is_loading() {
            match tokio::time::timeout_at(deadline, app.lookup_mut().next_completion()).await {
                Ok(Some(_)) => {}
                Ok(None) => return Err(anyhow!("completion channel closed")),
                Err(_) => return Err(anyhow!("lookup did not finish in time")),
            }
        }
        Ok(())
    }

    /// Let wall-clock time pass, then service the controller's timers
    pub async fn wait(&mut self, duration: Duration) -> Result<()> {
        tokio::time::sleep(duration).await;
        let app = self.app().await?;
        app.tick(Instant::now());
        Ok(())
    }

    pub async fn screen(&mut self) -> Result<&ScreenModel> {
        Ok(self.app().await?.lookup().surface())
    }

    pub async fn screen_text(&mut self) -> Result<String> {
        Ok(self.screen().await?.to_plain_text())
    }

    pub async fn state(&mut self) -> Result<UiState> {
        Ok(self.app().await?.lookup().state())
    }
}

impl Default for HourlineWorld {
    fn default() -> Self {
        Self::new()
    }
}
