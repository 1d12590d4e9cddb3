use async_trait::async_trait;
use inbound_application::{Dispatch, LeadUseCase, Operation, StatusTicker};
use inbound_core::backend::LeadBackend;
use inbound_core::prompt::PromptPair;
use inbound_core::session::{Session, SessionRepository};
use inbound_core::{AppState, InboundError, Result, SearchQuery};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

const TWO_LEADS: &str = r#"```json
[
  {"companyName": "Acme Foods", "leadScore": 64, "contacts": []},
  {"companyName": "Initech Snacks", "leadScore": 88,
   "contacts": [{"contactName": "Jane", "designation": "CMO", "contactLinkedIn": "Not found"}]}
]
```"#;

/// Replies with a fixed text, recording every prompt it receives.
struct ScriptedBackend {
    reply: Result<String>,
    prompts: Mutex<Vec<PromptPair>>,
}

impl ScriptedBackend {
    fn ok(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn failing(error: InboundError) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(error),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    fn last_task(&self) -> String {
        self.prompts.lock().unwrap().last().unwrap().task_instruction.clone()
    }
}

#[async_trait]
impl LeadBackend for ScriptedBackend {
    async fn generate(&self, prompt: &PromptPair) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.clone());
        self.reply.clone()
    }
}

/// Blocks every call until released.
struct GatedBackend {
    started: Notify,
    release: Notify,
    calls: AtomicUsize,
}

#[async_trait]
impl LeadBackend for GatedBackend {
    async fn generate(&self, _prompt: &PromptPair) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.started.notify_one();
        self.release.notified().await;
        Ok(TWO_LEADS.to_string())
    }
}

#[derive(Default)]
struct MemorySessions {
    slot: Mutex<Option<Session>>,
    saves: AtomicUsize,
}

#[async_trait]
impl SessionRepository for MemorySessions {
    async fn load(&self) -> Result<Option<Session>> {
        Ok(self.slot.lock().unwrap().clone())
    }

    async fn save(&self, session: &Session) -> Result<()> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        *self.slot.lock().unwrap() = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.slot.lock().unwrap() = None;
        Ok(())
    }
}

fn query() -> SearchQuery {
    SearchQuery {
        client_name: "Acme Foods".into(),
        region: "USA".into(),
        ..SearchQuery::default()
    }
}

fn names(state: &AppState) -> Vec<&str> {
    state.leads.iter().map(|l| l.company_name.as_str()).collect()
}

#[tokio::test]
async fn invalid_query_never_reaches_backend() {
    let backend = ScriptedBackend::ok(TWO_LEADS);
    let sessions = Arc::new(MemorySessions::default());
    let usecase = LeadUseCase::new(backend.clone(), sessions.clone());

    let empty = SearchQuery {
        client_name: "  ".into(),
        category: String::new(),
        ..SearchQuery::default()
    };
    let no_platforms = SearchQuery {
        search_platforms: Default::default(),
        ..query()
    };

    for bad in [empty, no_platforms] {
        let state = usecase
            .generate(&AppState::default(), bad)
            .await
            .completed()
            .unwrap();
        assert_eq!(
            state.error.as_deref(),
            Some("Please provide a client name or category, and select at least one search platform.")
        );
    }
    assert_eq!(backend.calls(), 0);
    assert_eq!(sessions.saves.load(Ordering::SeqCst), 0);
    assert!(usecase.in_flight().is_none());
}

#[tokio::test]
async fn generate_stores_leads_in_backend_order_and_saves() {
    let backend = ScriptedBackend::ok(TWO_LEADS);
    let sessions = Arc::new(MemorySessions::default());
    let usecase = LeadUseCase::new(backend.clone(), sessions.clone());

    let state = usecase
        .generate(&AppState::default(), query())
        .await
        .completed()
        .unwrap();

    assert_eq!(names(&state), vec!["Acme Foods", "Initech Snacks"]);
    assert!(state.error.is_none());
    assert!(backend.last_task().contains("\"Acme Foods\""));

    let saved = sessions.load().await.unwrap().unwrap();
    assert_eq!(saved.leads, state.leads);
    assert_eq!(saved.query, query());
}

#[tokio::test]
async fn exclusions_are_filtered_locally() {
    let backend = ScriptedBackend::ok(TWO_LEADS);
    let sessions = Arc::new(MemorySessions::default());
    let query = SearchQuery {
        exclusion_list: "initech".into(),
        ..query()
    };

    let usecase = LeadUseCase::new(backend.clone(), sessions.clone());
    let state = usecase.generate(&AppState::default(), query.clone()).await.completed().unwrap();
    assert_eq!(names(&state), vec!["Acme Foods"]);

    let unfiltered = LeadUseCase::new(backend, sessions).with_exclusion_filter(false);
    let state = unfiltered.generate(&AppState::default(), query).await.completed().unwrap();
    assert_eq!(state.leads.len(), 2);
}

#[tokio::test]
async fn backend_failure_is_recorded_without_results() {
    let backend = ScriptedBackend::failing(InboundError::backend(Some(429), "RESOURCE_EXHAUSTED: quota"));
    let sessions = Arc::new(MemorySessions::default());
    let usecase = LeadUseCase::new(backend, sessions.clone());

    let previous = AppState::default();
    let state = usecase.generate(&previous, query()).await.completed().unwrap();

    assert_eq!(state.error.as_deref(), Some("RESOURCE_EXHAUSTED: quota"));
    assert!(state.leads.is_empty());
    assert_eq!(sessions.saves.load(Ordering::SeqCst), 0);
    assert!(usecase.in_flight().is_none());
}

#[tokio::test]
async fn malformed_reply_commits_nothing() {
    let backend = ScriptedBackend::ok("Sorry, I could not find anything.");
    let sessions = Arc::new(MemorySessions::default());
    let usecase = LeadUseCase::new(backend, sessions.clone());

    let state = usecase.generate(&AppState::default(), query()).await.completed().unwrap();
    assert!(state.leads.is_empty());
    assert!(state
        .error
        .as_deref()
        .unwrap()
        .starts_with("Could not parse results from the AI response"));
    assert!(sessions.load().await.unwrap().is_none());
}

#[tokio::test]
async fn lookalikes_append_and_skip_the_seed() {
    let backend = ScriptedBackend::ok(
        r#"[{"companyName": "Acme Foods", "leadScore": 99, "contacts": []},
            {"companyName": "Umbrella Bakery", "leadScore": 71, "contacts": []}]"#,
    );
    let sessions = Arc::new(MemorySessions::default());
    let usecase = LeadUseCase::new(backend.clone(), sessions.clone());

    let seeded = LeadUseCase::new(ScriptedBackend::ok(TWO_LEADS), sessions.clone())
        .generate(&AppState::default(), query())
        .await
        .completed()
        .unwrap();

    let state = usecase.find_lookalikes(&seeded, 0).await.completed().unwrap();
    assert_eq!(names(&state), vec!["Acme Foods", "Initech Snacks", "Umbrella Bakery"]);
    assert!(backend.last_task().contains("similar to \"Acme Foods\""));
    assert_eq!(sessions.load().await.unwrap().unwrap().leads.len(), 3);
}

#[tokio::test]
async fn lookalike_failure_keeps_existing_leads() {
    let sessions = Arc::new(MemorySessions::default());
    let seeded = LeadUseCase::new(ScriptedBackend::ok(TWO_LEADS), sessions.clone())
        .generate(&AppState::default(), query())
        .await
        .completed()
        .unwrap();

    let failing = LeadUseCase::new(ScriptedBackend::failing(InboundError::backend(None, "offline")), sessions);
    let state = failing.find_lookalikes(&seeded, 1).await.completed().unwrap();
    assert_eq!(state.leads, seeded.leads);
    assert_eq!(state.error.as_deref(), Some("offline"));

    let state = failing.find_lookalikes(&seeded, 7).await.completed().unwrap();
    assert!(state.error.unwrap().contains("position 8"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn second_dispatch_while_pending_is_ignored() {
    let backend = Arc::new(GatedBackend {
        started: Notify::new(),
        release: Notify::new(),
        calls: AtomicUsize::new(0),
    });
    let sessions = Arc::new(MemorySessions::default());
    let usecase = Arc::new(LeadUseCase::new(backend.clone(), sessions));

    let first = {
        let usecase = Arc::clone(&usecase);
        tokio::spawn(async move { usecase.generate(&AppState::default(), query()).await })
    };
    backend.started.notified().await;
    assert_eq!(usecase.in_flight(), Some(Operation::Generate));

    let seeded = AppState::default().leads_generated(vec![]);
    assert_eq!(usecase.generate(&seeded, query()).await, Dispatch::Ignored);
    assert_eq!(usecase.find_lookalikes(&seeded, 0).await, Dispatch::Ignored);

    backend.release.notify_one();
    let state = first.await.unwrap().completed().unwrap();
    assert_eq!(state.leads.len(), 2);
    assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    assert!(usecase.in_flight().is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn status_ticker_runs_only_while_pending() {
    const MESSAGES: [&str; 2] = ["working", "still working"];
    let backend = Arc::new(GatedBackend {
        started: Notify::new(),
        release: Notify::new(),
        calls: AtomicUsize::new(0),
    });
    let usecase = Arc::new(
        LeadUseCase::new(backend.clone(), Arc::new(MemorySessions::default()))
            .with_ticker(StatusTicker::new(&MESSAGES, Duration::from_millis(20))),
    );
    let status = usecase.status();
    assert_eq!(*status.borrow(), None);

    let pending = {
        let usecase = Arc::clone(&usecase);
        tokio::spawn(async move { usecase.generate(&AppState::default(), query()).await })
    };
    backend.started.notified().await;
    assert!(status.borrow().is_some());

    backend.release.notify_one();
    pending.await.unwrap();
    assert_eq!(*status.borrow(), None);
}

#[tokio::test]
async fn restore_and_clear_session() {
    let sessions = Arc::new(MemorySessions::default());
    let usecase = LeadUseCase::new(ScriptedBackend::ok(TWO_LEADS), sessions.clone());

    assert_eq!(usecase.load_session().await, AppState::default());

    let generated = usecase.generate(&AppState::default(), query()).await.completed().unwrap();
    let restored = usecase.load_session().await;
    assert_eq!(restored.query, generated.query);
    assert_eq!(restored.leads, generated.leads);

    let cleared = usecase.clear_session().await.unwrap();
    assert_eq!(cleared, AppState::default());
    assert_eq!(usecase.load_session().await, AppState::default());
}
