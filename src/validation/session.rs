//! Asynchronous validation session
//!
//! The debounce/cancellation state machine the editor host drives on
//! every content change: `Idle → Scheduled → Running → {Idle |
//! Superseded → Scheduled}`. A monotonic sequence counter makes
//! staleness detection a pure comparison: results are applied in
//! request-issue order, never completion order. Cancelling a scheduled
//! timer is real; cancelling an in-flight compute is logical only — the
//! compute runs to completion and its result is discarded if superseded.
//!
//! One session per open document; sessions share nothing.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::validation::engine::{validate, LanguageId};
use crate::validation::marker::{ValidationOptions, ValidationResult};

/// Quiet window between the last content change and validation.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Scheduled,
    Running,
    Superseded,
}

/// The routing function a session drives; the engine dispatcher in
/// production, an instrumented stand-in under test.
pub type DispatchFn =
    Arc<dyn Fn(&str, LanguageId, &ValidationOptions) -> ValidationResult + Send + Sync>;
/// Observer for applied results.
pub type ResultHandler = Arc<dyn Fn(&ValidationResult) + Send + Sync>;

struct Inner {
    language: LanguageId,
    options: ValidationOptions,
    sequence: u64,
    state: SessionState,
    code: String,
    last_result: Option<ValidationResult>,
    timer: Option<JoinHandle<()>>,
}

pub struct ValidationSession {
    inner: Arc<Mutex<Inner>>,
    debounce: Duration,
    dispatch: DispatchFn,
    handler: Option<ResultHandler>,
}

impl ValidationSession {
    pub fn new(language: LanguageId, options: ValidationOptions, debounce: Duration) -> Self {
        Self::with_dispatcher(
            language,
            options,
            debounce,
            Arc::new(|code, language, options| validate(code, language, Some(options))),
        )
    }

    /// Build a session around a custom dispatcher. The engine dispatcher
    /// is the production choice; tests substitute instrumented ones.
    pub fn with_dispatcher(
        language: LanguageId,
        options: ValidationOptions,
        debounce: Duration,
        dispatch: DispatchFn,
    ) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                language,
                options,
                sequence: 0,
                state: SessionState::Idle,
                code: String::new(),
                last_result: None,
                timer: None,
            })),
            debounce,
            dispatch,
            handler: None,
        }
    }

    /// Observe every result the session applies (stale results are
    /// discarded before the handler ever sees them).
    pub fn with_result_handler(mut self, handler: ResultHandler) -> Self {
        self.handler = Some(handler);
        self
    }

    /// The host reports a content change. Trailing-debounce semantics:
    /// only the most recent change within the quiet window survives.
    pub async fn on_content_changed(&self, code: &str) {
        let mut inner = self.inner.lock().await;
        inner.sequence += 1;
        let seq = inner.sequence;
        inner.code = code.to_string();
        if let Some(timer) = inner.timer.take() {
            timer.abort();
        }
        if inner.state == SessionState::Running {
            inner.state = SessionState::Superseded;
        }
        inner.timer = Some(self.spawn_timer(seq, self.debounce));
        inner.state = SessionState::Scheduled;
    }

    /// Language or options changed: re-validate immediately, bypassing
    /// the quiet window.
    pub async fn on_language_or_options_changed(
        &self,
        language: LanguageId,
        options: ValidationOptions,
    ) {
        let mut inner = self.inner.lock().await;
        inner.language = language;
        inner.options = options;
        inner.sequence += 1;
        let seq = inner.sequence;
        if let Some(timer) = inner.timer.take() {
            timer.abort();
        }
        if inner.state == SessionState::Running {
            inner.state = SessionState::Superseded;
        }
        inner.timer = Some(self.spawn_timer(seq, Duration::ZERO));
        inner.state = SessionState::Scheduled;
    }

    /// Cancel any scheduled validation and invalidate in-flight work.
    pub async fn cancel(&self) {
        let mut inner = self.inner.lock().await;
        inner.sequence += 1;
        if let Some(timer) = inner.timer.take() {
            timer.abort();
        }
        inner.state = SessionState::Idle;
    }

    pub async fn current_result(&self) -> Option<ValidationResult> {
        self.inner.lock().await.last_result.clone()
    }

    pub async fn state(&self) -> SessionState {
        self.inner.lock().await.state
    }

    pub async fn sequence(&self) -> u64 {
        self.inner.lock().await.sequence
    }

    fn spawn_timer(&self, seq: u64, delay: Duration) -> JoinHandle<()> {
        let inner = Arc::clone(&self.inner);
        let dispatch = Arc::clone(&self.dispatch);
        let handler = self.handler.clone();
        tokio::spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            Self::run_validation(inner, dispatch, handler, seq).await;
        })
    }

    async fn run_validation(
        inner: Arc<Mutex<Inner>>,
        dispatch: DispatchFn,
        handler: Option<ResultHandler>,
        seq: u64,
    ) {
        let (code, language, options) = {
            let mut guard = inner.lock().await;
            if guard.sequence != seq {
                return; // superseded before the timer fired
            }
            guard.state = SessionState::Running;
            // The timer has fired; dropping the handle here means a later
            // change can no longer hard-abort the compute, only discard
            // its result.
            guard.timer = None;
            // Always validate the latest snapshot at fire time.
            (guard.code.clone(), guard.language, guard.options.clone())
        };

        let result = dispatch(&code, language, &options);

        let applied = {
            let mut guard = inner.lock().await;
            if guard.sequence == seq {
                guard.last_result = Some(result.clone());
                guard.state = SessionState::Idle;
                true
            } else {
                // Stale: a newer request owns the session state now.
                false
            }
        };
        if applied {
            if let Some(handler) = handler {
                handler(&result);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::marker::{Severity, ValidationMarker};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex as StdMutex;

    fn counting_dispatcher(
        calls: Arc<AtomicUsize>,
        seen: Arc<StdMutex<Vec<String>>>,
    ) -> DispatchFn {
        Arc::new(move |code, _language, _options| {
            calls.fetch_add(1, Ordering::SeqCst);
            seen.lock().unwrap().push(code.to_string());
            ValidationResult::from_markers(
                vec![ValidationMarker::new(
                    Severity::Info,
                    1,
                    1,
                    1,
                    2,
                    code.to_string(),
                    "test",
                )],
                Duration::ZERO,
            )
        })
    }

    #[tokio::test]
    async fn debounce_coalesces_rapid_changes_into_one_dispatch() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(StdMutex::new(Vec::new()));
        let session = ValidationSession::with_dispatcher(
            LanguageId::Sql,
            ValidationOptions::default(),
            Duration::from_millis(50),
            counting_dispatcher(calls.clone(), seen.clone()),
        );

        for i in 0..5 {
            session.on_content_changed(&format!("SELECT {i}")).await;
        }
        tokio::time::sleep(Duration::from_millis(400)).await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(seen.lock().unwrap().as_slice(), ["SELECT 4"]);
        assert_eq!(session.state().await, SessionState::Idle);
        let result = session.current_result().await.expect("result applied");
        assert_eq!(result.markers[0].message, "SELECT 4");
    }

    #[tokio::test]
    async fn options_change_validates_immediately() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(StdMutex::new(Vec::new()));
        let session = ValidationSession::with_dispatcher(
            LanguageId::Sql,
            ValidationOptions::default(),
            Duration::from_secs(60),
            counting_dispatcher(calls.clone(), seen.clone()),
        );

        session.on_content_changed("SELECT 1").await;
        session
            .on_language_or_options_changed(LanguageId::Json, ValidationOptions::default())
            .await;
        tokio::time::sleep(Duration::from_millis(200)).await;

        // The debounced request was superseded; the immediate one ran.
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(session.state().await, SessionState::Idle);
    }

    #[tokio::test]
    async fn cancel_prevents_any_dispatch() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(StdMutex::new(Vec::new()));
        let session = ValidationSession::with_dispatcher(
            LanguageId::Sql,
            ValidationOptions::default(),
            Duration::from_millis(50),
            counting_dispatcher(calls.clone(), seen.clone()),
        );

        session.on_content_changed("SELECT 1").await;
        session.cancel().await;
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(session.state().await, SessionState::Idle);
        assert!(session.current_result().await.is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn stale_results_never_overwrite_newer_ones() {
        let session = ValidationSession::with_dispatcher(
            LanguageId::Sql,
            ValidationOptions::default(),
            Duration::from_millis(10),
            Arc::new(|code, _language, _options| {
                if code == "slow" {
                    // An in-flight compute is not preemptible; it finishes
                    // long after the newer request.
                    std::thread::sleep(Duration::from_millis(400));
                }
                ValidationResult::from_markers(
                    vec![ValidationMarker::new(
                        Severity::Info,
                        1,
                        1,
                        1,
                        2,
                        code.to_string(),
                        "test",
                    )],
                    Duration::ZERO,
                )
            }),
        );

        session.on_content_changed("slow").await;
        tokio::time::sleep(Duration::from_millis(100)).await;
        session.on_content_changed("fast").await;
        tokio::time::sleep(Duration::from_millis(700)).await;

        let result = session.current_result().await.expect("result applied");
        assert_eq!(result.markers[0].message, "fast");
        assert_eq!(session.state().await, SessionState::Idle);
    }

    #[tokio::test]
    async fn handler_sees_only_applied_results() {
        let observed: Arc<StdMutex<Vec<String>>> = Arc::new(StdMutex::new(Vec::new()));
        let observed_clone = observed.clone();
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(StdMutex::new(Vec::new()));
        let session = ValidationSession::with_dispatcher(
            LanguageId::Sql,
            ValidationOptions::default(),
            Duration::from_millis(20),
            counting_dispatcher(calls, seen),
        )
        .with_result_handler(Arc::new(move |result| {
            observed_clone
                .lock()
                .unwrap()
                .push(result.markers[0].message.clone());
        }));

        session.on_content_changed("SELECT 1").await;
        session.on_content_changed("SELECT 2").await;
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(observed.lock().unwrap().as_slice(), ["SELECT 2"]);
    }

    #[tokio::test]
    async fn sequence_is_monotonic_across_all_inputs() {
        let session = ValidationSession::new(
            LanguageId::Sql,
            ValidationOptions::default(),
            DEFAULT_DEBOUNCE,
        );
        session.on_content_changed("a").await;
        session.on_content_changed("b").await;
        session.cancel().await;
        session
            .on_language_or_options_changed(LanguageId::Json, ValidationOptions::default())
            .await;
        assert_eq!(session.sequence().await, 4);
    }
}
