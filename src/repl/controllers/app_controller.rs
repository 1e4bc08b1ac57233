//! # Application Controller
//!
//! Owns the terminal event loop. Keystrokes edit the input line, Enter and
//! F5 arm a debounced search, and finished requests are folded into the
//! screen between events.

use crate::config::LookupSettings;
use crate::repl::{
    controllers::{debounce::Debouncer, lookup_controller::LookupController},
    io::{EventStream, RenderStream},
    models::sanitize_paste,
    services::SessionStore,
    views::{ScreenModel, TerminalRenderer, ViewRenderer},
};
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};

/// How long to wait for a terminal event before servicing timers
const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub struct AppController<ES: EventStream, RS: RenderStream> {
    lookup: LookupController<ScreenModel>,
    view_renderer: TerminalRenderer<RS>,
    event_stream: ES,
    debouncer: Debouncer,
    input: String,
    should_quit: bool,
}

impl<ES: EventStream, RS: RenderStream> AppController<ES, RS> {
    /// Create the controller with injected I/O streams
    ///
    /// `prefill` wins over the identifier remembered from the last session.
    pub fn with_io_streams(
        settings: &LookupSettings,
        session: Box<dyn SessionStore>,
        prefill: Option<String>,
        event_stream: ES,
        render_stream: RS,
    ) -> Result<Self> {
        let view_renderer = TerminalRenderer::with_render_stream(render_stream)?;
        let mut lookup = LookupController::new(settings, ScreenModel::new(), session)?;

        let input = match prefill {
            Some(text) => {
                lookup.input_edited(&text);
                text
            }
            None => lookup.restore_last_identifier().unwrap_or_default(),
        };

        Ok(Self {
            lookup,
            view_renderer,
            event_stream,
            debouncer: Debouncer::new(settings.debounce),
            input,
            should_quit: false,
        })
    }

    /// Run the main application loop
    pub async fn run(&mut self) -> Result<()> {
        self.view_renderer.initialize()?;
        tracing::info!("hourline started");

        let result = self.event_loop().await;

        // Always hand the terminal back, even when the loop failed
        self.lookup.cancel_in_flight();
        self.view_renderer.cleanup()?;
        tracing::info!("hourline stopped");
        result
    }

    async fn event_loop(&mut self) -> Result<()> {
        self.lookup.surface_mut().take_dirty();
        self.view_renderer.render_full(self.lookup.surface())?;

        while !self.should_quit {
            if self.event_stream.poll(POLL_INTERVAL)? {
                let event = self.event_stream.read()?;
                self.handle_event(event);
            }
            self.tick(Instant::now());
            self.render_if_dirty()?;

            // Let spawned lookups make progress on a current-thread runtime
            tokio::task::yield_now().await;
        }
        Ok(())
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Paste(text) => {
                tracing::debug!("Paste of {} bytes", text.len());
                self.input = sanitize_paste(&text);
                self.input_changed();
            }
            Event::Resize(width, height) => {
                self.view_renderer.update_size(width, height);
                self.lookup.surface_mut().mark_dirty();
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let control = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if control => self.should_quit = true,
            KeyCode::Char('u') if control => {
                self.input.clear();
                self.input_changed();
            }
            KeyCode::Char('l') if control => {
                self.lookup.clear_cache();
                self.lookup.surface_mut().mark_dirty();
            }
            KeyCode::Char(ch) if !control => {
                self.input.push(ch);
                self.input_changed();
            }
            KeyCode::Backspace => {
                if self.input.pop().is_some() {
                    self.input_changed();
                }
            }
            // F5 is the search button; it does nothing while the button is disabled
            KeyCode::F(5) if !self.lookup.surface().layout().search_enabled => {
                tracing::debug!("Search control disabled, ignoring F5");
            }
            KeyCode::Enter | KeyCode::F(5) => {
                tracing::debug!("Search requested for {:?}", self.input);
                self.debouncer.trigger(Instant::now());
            }
            _ => {}
        }
    }

    fn input_changed(&mut self) {
        self.lookup.input_edited(&self.input);
    }

    /// Service timers: the search debounce, finished requests and the
    /// error auto-hide
    pub fn tick(&mut self, now: Instant) {
        if self.debouncer.fire(now) {
            let raw = self.input.clone();
            self.lookup.search(&raw);
        }
        self.lookup.poll_completions();
        self.lookup.tick(now);
    }

    fn render_if_dirty(&mut self) -> Result<()> {
        if self.lookup.surface_mut().take_dirty() {
            self.view_renderer.render_full(self.lookup.surface())?;
        }
        Ok(())
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn lookup(&self) -> &LookupController<ScreenModel> {
        &self.lookup
    }

    pub fn lookup_mut(&mut self) -> &mut LookupController<ScreenModel> {
        &mut self.lookup
    }

    pub fn view_renderer(&self) -> &TerminalRenderer<RS> {
        &self.view_renderer
    }

    /// Check if the application should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}
