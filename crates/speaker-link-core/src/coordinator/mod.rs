//! Command coordinator.
//!
//! Owns the directory store, the selection tracker and the connectivity
//! indicator for one session. Every mutating command reports its outcome and
//! schedules a delayed directory refresh so local state converges on what the
//! backend actually did.

pub mod controls;
pub mod report;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::directory::DirectoryStore;
use crate::error::{CommandError, ValidationError};
use crate::model::{Connectivity, Device, GroupSelector, GroupSummary};
use crate::protocol::response::{parse_added_speaker, parse_speaker_list, parse_text_outcome};
use crate::protocol::{validate_address, ApiReply, ApiRequest};
use crate::selection::SelectionTracker;
use crate::transport::Transport;

pub use controls::{Control, ControlState};
pub use report::{CommandKind, CommandReport, SessionEvent, SessionView};

use controls::ControlPanel;

/// Default wait before re-fetching the directory after a command
pub const DEFAULT_RECONCILE_DELAY: Duration = Duration::from_secs(1);

const EVENT_CAPACITY: usize = 64;

#[derive(Debug)]
struct SessionState {
    directory: DirectoryStore,
    selection: SelectionTracker,
    connectivity: Connectivity,
}

/// Issues backend commands and reconciles local state.
///
/// Clones share the same session.
#[derive(Clone)]
pub struct Coordinator {
    transport: Arc<dyn Transport>,
    state: Arc<RwLock<SessionState>>,
    controls: Arc<ControlPanel>,
    events: broadcast::Sender<SessionEvent>,
    reconcile_delay: Duration,
}

impl Coordinator {
    pub fn new(transport: Arc<dyn Transport>, reconcile_delay: Duration) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            transport,
            state: Arc::new(RwLock::new(SessionState {
                directory: DirectoryStore::new(),
                selection: SelectionTracker::new(),
                connectivity: Connectivity::Unknown,
            })),
            controls: Arc::new(ControlPanel::default()),
            events,
            reconcile_delay,
        }
    }

    pub fn reconcile_delay(&self) -> Duration {
        self.reconcile_delay
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    // ==================== Views ====================

    pub async fn devices(&self) -> Vec<Device> {
        self.state.read().await.directory.all()
    }

    pub async fn groups(&self) -> Vec<GroupSummary> {
        self.state.read().await.directory.groups()
    }

    pub async fn selection(&self) -> Vec<String> {
        self.state.read().await.selection.snapshot()
    }

    pub async fn connectivity(&self) -> Connectivity {
        self.state.read().await.connectivity.clone()
    }

    pub async fn view(&self) -> SessionView {
        let state = self.state.read().await;
        SessionView {
            devices: state.directory.all(),
            groups: state.directory.groups(),
            selection: state.selection.snapshot(),
            connectivity: state.connectivity.clone(),
            refreshed_at: state.directory.refreshed_at(),
        }
    }

    pub fn control_state(&self, control: Control) -> ControlState {
        self.controls.state(control)
    }

    // ==================== Selection ====================

    /// Flip selection of `name`; returns whether it is now selected.
    pub async fn toggle(&self, name: &str) -> bool {
        let selected = self.state.write().await.selection.toggle(name);
        debug!(name, selected, "selection toggled");
        selected
    }

    pub async fn clear_selection(&self) {
        self.state.write().await.selection.clear();
    }

    // ==================== Directory ====================

    /// Fetch the full directory and replace local state with it.
    ///
    /// On failure the previous snapshot and selection are kept.
    pub async fn refresh_directory(&self) -> Result<usize, CommandError> {
        let fetched = match self.transport.send(ApiRequest::list_speakers()).await {
            Ok(reply) => parse_speaker_list(&reply),
            Err(e) => Err(e.into()),
        };

        match fetched {
            Ok(devices) => {
                let count = {
                    let mut state = self.state.write().await;
                    state.directory.replace(devices);
                    let names = state.directory.names();
                    state.selection.prune(&names);
                    state.directory.len()
                };
                info!(count, "directory replaced");
                self.set_connectivity(Connectivity::Healthy).await;
                self.emit(SessionEvent::DirectoryReplaced { count });
                Ok(count)
            }
            Err(e) => {
                warn!(error = %e, "directory refresh failed, keeping last known devices");
                self.set_connectivity(Connectivity::Unhealthy(e.message()))
                    .await;
                Err(e)
            }
        }
    }

    /// Run `refresh_directory` after the reconciliation delay.
    ///
    /// Overlapping refreshes are not cancelled; the last one to apply wins.
    pub fn schedule_refresh(&self) -> JoinHandle<()> {
        let coordinator = self.clone();
        let delay = self.reconcile_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            debug!("running reconciliation refresh");
            // Failures are already logged and reflected in connectivity.
            let _ = coordinator.refresh_directory().await;
        })
    }

    /// Liveness probe. Any HTTP response, 404 included, counts as reachable.
    pub async fn probe_status(&self) -> CommandReport {
        let outcome = self
            .call(ApiRequest::status())
            .await
            .map(|reply| format!("Connected (HTTP {})", reply.status));
        if outcome.is_ok() {
            self.set_connectivity(Connectivity::Healthy).await;
        }
        self.finish(CommandKind::ProbeStatus, outcome, None)
    }

    // ==================== Commands ====================

    /// Ask the backend to add a speaker at `address`.
    pub async fn add_device(&self, address: &str, display_name: Option<&str>) -> CommandReport {
        let ip = match validate_address(address) {
            Ok(ip) => ip,
            Err(e) => return self.finish(CommandKind::AddDevice, Err(e.into()), None),
        };

        info!(%ip, name = display_name.unwrap_or(""), "adding speaker");
        let outcome = self
            .call(ApiRequest::add_speaker(ip, display_name))
            .await
            .and_then(|reply| parse_added_speaker(&reply))
            .map(|device| format!("Added speaker: {} ({})", device.name, device.ip));

        let reconcile = self.schedule_refresh();
        self.finish(CommandKind::AddDevice, outcome, Some(reconcile))
    }

    /// Group `selected` speakers. The selection is left as it is afterwards.
    pub async fn create_group(&self, group_name: &str, selected: &[String]) -> CommandReport {
        if selected.len() < 2 {
            let err = ValidationError::InsufficientSelection {
                selected: selected.len(),
            };
            return self.finish(CommandKind::CreateGroup, Err(err.into()), None);
        }

        let Some(guard) = self.controls.try_acquire(Control::CreateGroup) else {
            let err = ValidationError::ControlBusy("Group creation".to_string());
            return self.finish(CommandKind::CreateGroup, Err(err.into()), None);
        };

        info!(group = group_name, speakers = ?selected, "creating group");
        let outcome = self
            .call(ApiRequest::group(selected))
            .await
            .and_then(|reply| parse_text_outcome(&reply));
        drop(guard);

        let reconcile = self.schedule_refresh();
        self.finish(CommandKind::CreateGroup, outcome, Some(reconcile))
    }

    /// Group whatever is currently selected.
    pub async fn create_group_from_selection(&self, group_name: &str) -> CommandReport {
        let selected = self.selection().await;
        self.create_group(group_name, &selected).await
    }

    /// Dissolve one group or all of them.
    pub async fn dissolve_group(&self, selector: Option<GroupSelector>) -> CommandReport {
        let selector = match selector {
            Some(GroupSelector::Named(name)) if name.trim().is_empty() => None,
            other => other,
        };
        let Some(selector) = selector else {
            let err = ValidationError::MissingGroupSelector;
            return self.finish(CommandKind::DissolveGroup, Err(err.into()), None);
        };

        let Some(guard) = self.controls.try_acquire(Control::Ungroup) else {
            let err = ValidationError::ControlBusy("Ungroup".to_string());
            return self.finish(CommandKind::DissolveGroup, Err(err.into()), None);
        };

        info!(selector = ?selector, "dissolving group");
        let outcome = self
            .call(ApiRequest::ungroup(&selector))
            .await
            .and_then(|reply| parse_text_outcome(&reply));
        drop(guard);

        let reconcile = self.schedule_refresh();
        self.finish(CommandKind::DissolveGroup, outcome, Some(reconcile))
    }

    // ==================== Internals ====================

    /// Send a command request; transport failures flip connectivity.
    async fn call(&self, request: ApiRequest) -> Result<ApiReply, CommandError> {
        match self.transport.send(request).await {
            Ok(reply) => Ok(reply),
            Err(e) => {
                let err = CommandError::from(e);
                self.set_connectivity(Connectivity::Unhealthy(err.message()))
                    .await;
                Err(err)
            }
        }
    }

    fn finish(
        &self,
        command: CommandKind,
        outcome: Result<String, CommandError>,
        reconcile: Option<JoinHandle<()>>,
    ) -> CommandReport {
        match &outcome {
            Ok(msg) => info!(command = command.as_str(), response = %msg, "command succeeded"),
            Err(e) => warn!(
                command = command.as_str(),
                kind = e.kind().as_str(),
                error = %e,
                "command failed"
            ),
        }
        self.emit(SessionEvent::CommandFinished {
            command,
            outcome: outcome.clone(),
        });
        CommandReport {
            command,
            outcome,
            reconcile,
        }
    }

    async fn set_connectivity(&self, next: Connectivity) {
        let changed = {
            let mut state = self.state.write().await;
            if state.connectivity == next {
                false
            } else {
                state.connectivity = next.clone();
                true
            }
        };
        if changed {
            self.emit(SessionEvent::ConnectivityChanged(next));
        }
    }

    fn emit(&self, event: SessionEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}
