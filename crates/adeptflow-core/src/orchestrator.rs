//! Readiness orchestration
//!
//! Owns the credential lifecycle and decides when inspections run. Results
//! are published through a `watch` channel so front-ends can follow the
//! current state without polling.
//!
//! ```text
//! Idle ──▶ Checking ──▶ Ready | NotReady | Error
//!   │          ▲                 │
//!   ▼          └─── refresh ─────┘
//! CredentialsRequired
//! ```

use crate::credentials::{AppCredentials, AwsCredentials, CredentialStore};
use crate::error::Result;
use crate::inspector::{InfrastructureInspector, InfrastructureReport};
use crate::notify::{AppError, ErrorBus, ErrorKind};
use adeptflow_cloud::{CloudProvider, InfrastructureRequirement};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use tokio::sync::{RwLock, watch};
use tracing::{debug, info, warn};

/// Issue shown while no AWS credentials are configured
pub const CREDENTIALS_REQUIRED_ISSUE: &str = "AWS credentials not configured";

/// Builds a provider client from stored credentials
#[async_trait]
pub trait ProviderFactory: Send + Sync {
    async fn connect(&self, credentials: &AwsCredentials) -> Result<Arc<dyn CloudProvider>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessPhase {
    Idle,
    CredentialsRequired,
    Checking,
    Ready,
    NotReady,
    Error,
}

impl std::fmt::Display for ReadinessPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ReadinessPhase::Idle => "idle",
            ReadinessPhase::CredentialsRequired => "credentials required",
            ReadinessPhase::Checking => "checking",
            ReadinessPhase::Ready => "ready",
            ReadinessPhase::NotReady => "not ready",
            ReadinessPhase::Error => "error",
        };
        f.write_str(label)
    }
}

/// State published to subscribers
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessSnapshot {
    pub phase: ReadinessPhase,
    pub backend_ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<InfrastructureReport>,
    pub issues: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_checked: Option<DateTime<Utc>>,
    /// Id of the request that produced this state
    pub request_id: u64,
}

impl ReadinessSnapshot {
    fn idle() -> Self {
        Self {
            phase: ReadinessPhase::Idle,
            backend_ready: false,
            report: None,
            issues: Vec::new(),
            last_checked: None,
            request_id: 0,
        }
    }

    fn credentials_required(request_id: u64) -> Self {
        Self {
            phase: ReadinessPhase::CredentialsRequired,
            issues: vec![CREDENTIALS_REQUIRED_ISSUE.to_string()],
            request_id,
            ..Self::idle()
        }
    }
}

/// How a refresh ended
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    /// The check finished and its result is now the current state
    Completed(ReadinessSnapshot),
    /// No AWS credentials, nothing was checked
    CredentialsRequired,
    /// A newer request started meanwhile, the result was discarded
    Superseded,
    /// Another check was running, nothing was started
    AlreadyRunning,
}

/// Decrements the in-flight counter on drop
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }

    fn try_enter(counter: &'a AtomicUsize) -> Option<Self> {
        counter
            .compare_exchange(0, 1, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Self(counter))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Readiness coordinator
pub struct ReadinessOrchestrator {
    store: CredentialStore,
    factory: Arc<dyn ProviderFactory>,
    catalog: Vec<InfrastructureRequirement>,
    bus: ErrorBus,
    credentials: RwLock<Option<AppCredentials>>,
    state: watch::Sender<ReadinessSnapshot>,
    latest_request: AtomicU64,
    in_flight: AtomicUsize,
}

impl ReadinessOrchestrator {
    pub fn new(
        store: CredentialStore,
        factory: Arc<dyn ProviderFactory>,
        catalog: Vec<InfrastructureRequirement>,
        bus: ErrorBus,
    ) -> Self {
        let (state, _) = watch::channel(ReadinessSnapshot::idle());
        Self {
            store,
            factory,
            catalog,
            bus,
            credentials: RwLock::new(None),
            state,
            latest_request: AtomicU64::new(0),
            in_flight: AtomicUsize::new(0),
        }
    }

    pub fn bus(&self) -> &ErrorBus {
        &self.bus
    }

    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    /// Current state
    pub fn snapshot(&self) -> ReadinessSnapshot {
        self.state.borrow().clone()
    }

    /// Follow every applied state
    pub fn subscribe(&self) -> watch::Receiver<ReadinessSnapshot> {
        self.state.subscribe()
    }

    /// Whether a check is running
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// In-memory credentials
    pub async fn credentials(&self) -> Option<AppCredentials> {
        self.credentials.read().await.clone()
    }

    /// Load stored credentials and check readiness when present
    pub async fn initialize(&self) -> RefreshOutcome {
        let stored = self.store.load();
        debug!(found = stored.is_some(), "Loaded stored credentials");
        *self.credentials.write().await = stored;
        self.refresh().await
    }

    /// Store new credentials and re-check
    pub async fn set_credentials(&self, credentials: AppCredentials) -> RefreshOutcome {
        self.store.store(&credentials);
        *self.credentials.write().await = Some(credentials);
        info!("Credentials updated");
        self.refresh().await
    }

    /// Forget credentials and invalidate any running check
    pub async fn clear_credentials(&self) {
        self.store.clear();
        *self.credentials.write().await = None;

        let id = self.next_request_id();
        self.apply(id, ReadinessSnapshot::credentials_required(id));
        info!("Credentials cleared");
    }

    /// Run a check now
    ///
    /// A check started while another is running supersedes it.
    pub async fn refresh(&self) -> RefreshOutcome {
        let _guard = InFlight::enter(&self.in_flight);
        self.run_check().await
    }

    /// Run a check unless one is already running
    pub async fn try_refresh(&self) -> RefreshOutcome {
        let Some(_guard) = InFlight::try_enter(&self.in_flight) else {
            debug!("Refresh skipped, check already running");
            return RefreshOutcome::AlreadyRunning;
        };
        self.run_check().await
    }

    fn next_request_id(&self) -> u64 {
        self.latest_request.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, request_id: u64) -> bool {
        self.latest_request.load(Ordering::SeqCst) == request_id
    }

    /// Publish `next` if `request_id` is still the latest request
    fn apply(&self, request_id: u64, next: ReadinessSnapshot) -> bool {
        self.state.send_if_modified(|current| {
            if self.is_current(request_id) {
                *current = next;
                true
            } else {
                false
            }
        })
    }

    fn finish(&self, request_id: u64, snapshot: ReadinessSnapshot) -> RefreshOutcome {
        if self.apply(request_id, snapshot.clone()) {
            RefreshOutcome::Completed(snapshot)
        } else {
            debug!(request_id, "Discarding stale readiness result");
            RefreshOutcome::Superseded
        }
    }

    #[tracing::instrument(skip(self))]
    async fn run_check(&self) -> RefreshOutcome {
        let request_id = self.next_request_id();

        let aws = self
            .credentials
            .read()
            .await
            .as_ref()
            .and_then(|c| c.aws.clone())
            .filter(|aws| !aws.is_empty());

        let Some(aws) = aws else {
            self.apply(request_id, ReadinessSnapshot::credentials_required(request_id));
            return RefreshOutcome::CredentialsRequired;
        };

        let previous = self.snapshot();
        self.apply(
            request_id,
            ReadinessSnapshot {
                phase: ReadinessPhase::Checking,
                request_id,
                ..previous
            },
        );

        let provider = match self.factory.connect(&aws).await {
            Ok(provider) => provider,
            Err(e) => {
                warn!(error = %e, "Failed to create cloud provider client");
                if self.is_current(request_id) {
                    self.bus.report(AppError::new(
                        ErrorKind::Configuration,
                        format!("Failed to create AWS client: {e}"),
                        "Failed to connect to backend services",
                    ));
                }
                return self.finish(
                    request_id,
                    ReadinessSnapshot {
                        phase: ReadinessPhase::Error,
                        backend_ready: false,
                        report: None,
                        issues: vec![format!("Failed to connect to AWS: {e}")],
                        last_checked: Some(Utc::now()),
                        request_id,
                    },
                );
            }
        };

        let inspector = InfrastructureInspector::new(provider, self.catalog.clone());
        let backend_ready = inspector.check_credentials().await;

        let report = match inspector.try_infrastructure_report().await {
            Ok(report) => report,
            Err(e) => {
                if self.is_current(request_id) {
                    self.bus.report(AppError::new(
                        ErrorKind::Infrastructure,
                        format!("Failed to check infrastructure status: {e}"),
                        "Unable to verify AWS infrastructure readiness",
                    ));
                }
                InfrastructureReport::from_error(&e, &self.catalog)
            }
        };

        let phase = if report.is_ready() {
            ReadinessPhase::Ready
        } else {
            ReadinessPhase::NotReady
        };
        info!(
            request_id,
            %phase,
            backend_ready,
            missing = report.missing_components().len(),
            "Readiness check finished"
        );

        self.finish(
            request_id,
            ReadinessSnapshot {
                phase,
                backend_ready,
                issues: report.issues().to_vec(),
                last_checked: Some(report.last_checked()),
                report: Some(report),
                request_id,
            },
        )
    }
}
