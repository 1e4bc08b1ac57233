//! # Lookup Controller
//!
//! Orchestrates one search: validate the raw input, serve from the cache
//! when possible, otherwise start a request and render its completion.
//!
//! Only the most recent search may touch the display. Every search cancels
//! the request in flight, and completions are matched against the sequence
//! number of the current search so a late reply from a superseded request is
//! dropped even if it was not cancelled in time.

use crate::config::LookupSettings;
use crate::repl::models::{
    Identifier, IdentifierValidator, LookupCache, ResultRecord, UiState, UiStateMachine,
};
use crate::repl::services::{classify, FetchCompletion, LookupError, LookupService, SessionStore};
use crate::repl::views::{DisplaySurface, Focus, ResultRenderer};
use anyhow::Result;
use std::time::Instant;

/// What a call to [`LookupController::search`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Input failed validation; the error is on screen
    Rejected,
    /// Served from the cache; the results are on screen
    CacheHit,
    /// A request is in flight under this sequence number
    Started { seq: u64 },
}

#[derive(Debug)]
struct PendingLookup {
    seq: u64,
    identifier: Identifier,
}

pub struct LookupController<S: DisplaySurface> {
    validator: IdentifierValidator,
    cache: LookupCache,
    service: LookupService,
    renderer: ResultRenderer,
    ui: UiStateMachine,
    surface: S,
    session: Box<dyn SessionStore>,
    current: Option<PendingLookup>,
    next_seq: u64,
}

impl<S: DisplaySurface> LookupController<S> {
    pub fn new(
        settings: &LookupSettings,
        mut surface: S,
        session: Box<dyn SessionStore>,
    ) -> Result<Self> {
        let service = LookupService::new(settings.api_url.clone(), settings.timeout)?;
        let ui = UiStateMachine::new(settings.error_autohide);
        surface.apply_layout(&ui.layout());

        Ok(Self {
            validator: IdentifierValidator::new(settings.min_digits, settings.max_digits),
            cache: LookupCache::with_ttl(settings.cache_ttl),
            service,
            renderer: ResultRenderer::new(settings.goal_hours),
            ui,
            surface,
            session,
            current: None,
            next_seq: 1,
        })
    }

    /// Prefill the input with the identifier remembered from the last session
    pub fn restore_last_identifier(&mut self) -> Option<String> {
        let identifier = self.session.load_last_identifier()?;
        tracing::debug!("Restoring last identifier {}", identifier);
        self.surface.set_input(&identifier);
        Some(identifier)
    }

    pub fn search(&mut self, raw: &str) -> SearchOutcome {
        self.cancel_in_flight();

        let identifier = match self.validator.validate(raw) {
            Ok(identifier) => identifier,
            Err(error) => {
                self.show_failure(&LookupError::from(error));
                return SearchOutcome::Rejected;
            }
        };

        self.session.save_last_identifier(identifier.as_str());

        if let Some(record) = self.cache.get(&identifier).cloned() {
            tracing::debug!("Cache hit for {}", identifier);
            self.show_record(&identifier, &record);
            return SearchOutcome::CacheHit;
        }
        tracing::debug!("Cache miss for {}", identifier);

        let seq = self.next_seq;
        self.next_seq += 1;
        self.current = Some(PendingLookup {
            seq,
            identifier: identifier.clone(),
        });

        let layout = self.ui.begin_loading();
        self.surface.apply_layout(&layout);
        self.service.start(seq, identifier);

        SearchOutcome::Started { seq }
    }

    /// Apply every completion that has already arrived; returns how many
    /// changed the display
    pub fn poll_completions(&mut self) -> usize {
        let mut applied = 0;
        while let Some(completion) = self.service.poll_completion() {
            if self.apply_completion(completion) {
                applied += 1;
            }
        }
        applied
    }

    /// Wait for the next completion. `Some(true)` if it changed the display,
    /// `Some(false)` if it was stale.
    pub async fn next_completion(&mut self) -> Option<bool> {
        let completion = self.service.next_completion().await?;
        Some(self.apply_completion(completion))
    }

    /// Run a search to the end, waiting for the network if needed
    pub async fn search_and_wait(&mut self, raw: &str) -> SearchOutcome {
        let outcome = self.search(raw);
        if let SearchOutcome::Started { .. } = outcome {
            while self.is_loading() {
                if self.next_completion().await.is_none() {
                    break;
                }
            }
        }
        outcome
    }

    pub fn input_edited(&mut self, text: &str) {
        self.surface.set_input(text);
        if let Some(layout) = self.ui.input_edited() {
            self.surface.apply_layout(&layout);
        }
    }

    pub fn tick(&mut self, now: Instant) {
        if let Some(layout) = self.ui.tick(now) {
            tracing::debug!("Error panel auto-hidden");
            self.surface.apply_layout(&layout);
        }
    }

    pub fn clear_cache(&mut self) {
        tracing::info!("Clearing {} cached lookups", self.cache.len());
        self.cache.clear();
    }

    /// Abort the request in flight, if any, without touching the display
    pub fn cancel_in_flight(&mut self) {
        if let Some(pending) = self.current.take() {
            tracing::debug!("Superseding lookup #{} for {}", pending.seq, pending.identifier);
            self.service.cancel();
        }
    }

    /// Return to idle, dropping any request in flight
    pub fn reset(&mut self) {
        self.cancel_in_flight();
        let layout = self.ui.reset();
        self.surface.apply_layout(&layout);
    }

    pub fn is_loading(&self) -> bool {
        self.current.is_some()
    }

    pub fn state(&self) -> UiState {
        self.ui.state()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn cache(&self) -> &LookupCache {
        &self.cache
    }

    pub fn session_store(&self) -> &dyn SessionStore {
        self.session.as_ref()
    }

    fn apply_completion(&mut self, completion: FetchCompletion) -> bool {
        let is_current = matches!(&self.current, Some(pending) if pending.seq == completion.seq);
        if !is_current {
            tracing::debug!(
                "Dropping stale completion #{} for {}",
                completion.seq,
                completion.identifier
            );
            return false;
        }
        self.current = None;

        match completion.result {
            Ok(record) => {
                self.cache.put(completion.identifier.clone(), record.clone());
                self.show_record(&completion.identifier, &record);
            }
            Err(error) => self.show_failure(&error),
        }
        true
    }

    fn show_record(&mut self, identifier: &Identifier, record: &ResultRecord) {
        self.surface
            .set_identifier(identifier.as_str(), record.student_name.as_deref());
        self.renderer.render(record, &mut self.surface);

        let layout = self.ui.succeed();
        self.surface.apply_layout(&layout);
        self.surface.focus(Focus::Results);
    }

    fn show_failure(&mut self, error: &LookupError) {
        let Some(message) = classify(error) else {
            tracing::debug!("Suppressing silent failure: {}", error);
            return;
        };

        match error {
            LookupError::Validation(_) => tracing::debug!("Rejected input: {}", error),
            _ => tracing::error!("Lookup failed: {}", error),
        }

        self.surface.set_error(&format!("❌ {message}"));
        let layout = self.ui.fail(Instant::now());
        self.surface.apply_layout(&layout);
        self.surface.focus(Focus::Input);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repl::services::MemorySessionStore;
    use crate::repl::views::ScreenModel;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings(api_url: &str) -> LookupSettings {
        LookupSettings {
            api_url: api_url.to_string(),
            ..LookupSettings::default()
        }
    }

    fn controller(api_url: &str) -> LookupController<ScreenModel> {
        LookupController::new(
            &settings(api_url),
            ScreenModel::new(),
            Box::new(MemorySessionStore::new()),
        )
        .unwrap()
    }

    fn hours_body(total: f64) -> serde_json::Value {
        json!({
            "totalGeral": total,
            "status": "Regular",
            "categorias": [{ "nome": "Monitoria", "horas": total }]
        })
    }

    async fn mount_hours(server: &MockServer, matricula: &str, total: f64, delay: Duration) {
        Mock::given(method("GET"))
            .and(query_param("matricula", matricula))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(hours_body(total))
                    .set_delay(delay),
            )
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn search_should_render_fetched_record() {
        let server = MockServer::start().await;
        mount_hours(&server, "12345", 56.0, Duration::ZERO).await;
        let mut controller = controller(&server.uri());

        let outcome = controller.search_and_wait("12345").await;

        assert_eq!(outcome, SearchOutcome::Started { seq: 1 });
        assert_eq!(controller.state(), UiState::Success);
        let screen = controller.surface();
        assert_eq!(screen.identifier(), "12345");
        assert_eq!(screen.total_text(), "56 horas");
        assert_eq!(screen.focus_target(), Focus::Results);
        assert!(screen.layout().results_visible);
    }

    #[tokio::test]
    async fn invalid_input_should_fail_locally() {
        let mut controller = controller("http://127.0.0.1:9");

        let outcome = controller.search("12");

        assert_eq!(outcome, SearchOutcome::Rejected);
        assert_eq!(controller.state(), UiState::Error);
        assert!(!controller.is_loading());
        let screen = controller.surface();
        assert!(screen.error_text().starts_with("❌ "));
        assert!(screen.error_text().contains("muito curta"));
        assert_eq!(screen.focus_target(), Focus::Input);
    }

    #[tokio::test]
    async fn not_found_should_show_error_and_hide_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        let mut controller = controller(&server.uri());

        controller.search_and_wait("99999").await;

        assert_eq!(controller.state(), UiState::Error);
        let screen = controller.surface();
        assert!(screen.error_text().contains("não encontrada"));
        assert!(screen.layout().error_visible);
        assert!(!screen.layout().results_visible);
    }

    #[tokio::test]
    async fn superseded_search_should_never_reach_the_display() {
        let server = MockServer::start().await;
        mount_hours(&server, "11111", 10.0, Duration::from_millis(300)).await;
        mount_hours(&server, "22222", 20.0, Duration::ZERO).await;
        let mut controller = controller(&server.uri());

        assert_eq!(controller.search("11111"), SearchOutcome::Started { seq: 1 });
        assert_eq!(controller.search("22222"), SearchOutcome::Started { seq: 2 });

        while controller.is_loading() {
            controller.next_completion().await.unwrap();
        }
        assert_eq!(controller.surface().identifier(), "22222");
        assert_eq!(controller.surface().total_text(), "20 horas");

        // Give the first request time to finish had it not been cancelled
        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(controller.poll_completions(), 0);
        assert_eq!(controller.surface().identifier(), "22222");
        assert_eq!(controller.surface().total_text(), "20 horas");
    }

    #[tokio::test]
    async fn stale_completion_should_be_ignored() {
        let mut controller = controller("http://127.0.0.1:9");
        let identifier = IdentifierValidator::default().validate("12345").unwrap();

        let applied = controller.apply_completion(FetchCompletion {
            seq: 42,
            identifier,
            result: Ok(ResultRecord::default()),
        });

        assert!(!applied);
        assert_eq!(controller.state(), UiState::Idle);
        assert!(controller.cache().is_empty());
    }

    #[tokio::test]
    async fn repeated_search_should_be_served_from_cache() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("matricula", "12345"))
            .respond_with(ResponseTemplate::new(200).set_body_json(hours_body(30.0)))
            .expect(1)
            .mount(&server)
            .await;
        let mut controller = controller(&server.uri());

        controller.search_and_wait("12345").await;
        let outcome = controller.search("123-45");

        assert_eq!(outcome, SearchOutcome::CacheHit);
        assert_eq!(controller.state(), UiState::Success);
        assert_eq!(controller.surface().total_text(), "30 horas");
    }

    #[tokio::test]
    async fn clear_cache_should_force_a_new_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(hours_body(30.0)))
            .expect(2)
            .mount(&server)
            .await;
        let mut controller = controller(&server.uri());

        controller.search_and_wait("12345").await;
        controller.clear_cache();
        let outcome = controller.search_and_wait("12345").await;

        assert_eq!(outcome, SearchOutcome::Started { seq: 2 });
    }

    #[tokio::test]
    async fn valid_search_should_remember_identifier() {
        let mut controller = controller("http://127.0.0.1:9");

        controller.search("  1234-5678 ");
        controller.reset();

        assert_eq!(
            controller.session_store().load_last_identifier().as_deref(),
            Some("12345678")
        );
    }

    #[tokio::test]
    async fn restore_should_prefill_input() {
        let mut controller = LookupController::new(
            &settings("http://127.0.0.1:9"),
            ScreenModel::new(),
            Box::new(MemorySessionStore::with_last_identifier("20231234")),
        )
        .unwrap();

        assert_eq!(controller.restore_last_identifier().as_deref(), Some("20231234"));
        assert_eq!(controller.surface().input(), "20231234");
    }

    #[tokio::test]
    async fn editing_input_should_dismiss_error() {
        let mut controller = controller("http://127.0.0.1:9");
        controller.search("");
        assert_eq!(controller.state(), UiState::Error);

        controller.input_edited("1");

        assert_eq!(controller.state(), UiState::Idle);
        assert!(!controller.surface().layout().error_visible);
    }

    #[tokio::test]
    async fn error_should_auto_hide_after_delay() {
        let mut controller = controller("http://127.0.0.1:9");
        controller.search("");

        controller.tick(Instant::now() + Duration::from_secs(6));

        assert_eq!(controller.state(), UiState::Idle);
    }
}
