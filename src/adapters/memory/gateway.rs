//! In-memory gateway
//!
//! Implements every port over plain collections, with the same
//! preconditions the remote management API enforces. Every mutating call
//! is journaled, whether it succeeds or not.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use crate::core::models::{
    ApiKeySpec, ApplicationSpec, BackendSpec, FrontendSpec, FrontendStatus, LifecycleState,
    ManagedRecord, OrganizationSpec, Quota, RemoteState, UserSpec,
};
use crate::core::ports::{AssociationStore, FrontendClient, QuotaStore, RecordStore};

use super::snapshot::{ApplicationRecord, FrontendRecord, GatewaySnapshot};

/// A mutating call received by the gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Operation {
    /// What was asked, e.g. `publish` or `add api`
    pub action: String,
    /// The resource it was asked on
    pub target: String,
    /// Whether the gateway accepted it
    pub succeeded: bool,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.action, self.target)?;
        if !self.succeeded {
            write!(f, " (failed)")?;
        }
        Ok(())
    }
}

#[derive(Debug)]
struct StoredFrontend {
    spec: FrontendSpec,
    state: RemoteState,
    deprecated: bool,
}

impl StoredFrontend {
    fn status(&self, id: &str) -> FrontendStatus {
        FrontendStatus {
            id: id.to_string(),
            name: self.spec.name.clone(),
            state: self.state.clone(),
            deprecated: self.deprecated,
        }
    }
}

#[derive(Debug, Default)]
struct State {
    organizations: BTreeMap<String, OrganizationSpec>,
    users: BTreeMap<String, UserSpec>,
    backends: BTreeMap<String, BackendSpec>,
    applications: BTreeMap<String, ApplicationRecord>,
    frontends: BTreeMap<String, StoredFrontend>,
    journal: Vec<Operation>,
    /// Every id ever held, deleted ones included
    issued: BTreeSet<String>,
    next_id: u32,
}

impl State {
    fn allocate(&mut self, prefix: &str) -> String {
        loop {
            self.next_id += 1;
            let id = format!("{prefix}-{}", self.next_id);
            if self.issued.insert(id.clone()) {
                return id;
            }
        }
    }

    fn application(&mut self, id: &str) -> anyhow::Result<&mut ApplicationRecord> {
        self.applications
            .get_mut(id)
            .ok_or_else(|| anyhow::anyhow!("application not found: {id}"))
    }

    fn frontend(&mut self, id: &str) -> anyhow::Result<&mut StoredFrontend> {
        self.frontends
            .get_mut(id)
            .ok_or_else(|| anyhow::anyhow!("frontend not found: {id}"))
    }
}

/// Gateway backed by in-memory collections
#[derive(Debug, Default)]
pub struct MemoryGateway {
    state: Mutex<State>,
    failures: BTreeSet<String>,
}

impl MemoryGateway {
    /// An empty gateway
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A gateway holding the contents of a snapshot
    pub fn from_snapshot(snapshot: GatewaySnapshot) -> anyhow::Result<Self> {
        let mut state = State::default();
        let issued = &mut state.issued;
        seed(&mut state.organizations, issued, "organization", snapshot.organizations)?;
        seed(&mut state.users, issued, "user", snapshot.users)?;
        seed(&mut state.backends, issued, "backend", snapshot.backends)?;
        for record in snapshot.applications {
            if state.applications.contains_key(&record.id) {
                anyhow::bail!("duplicate application id: {}", record.id);
            }
            state.issued.insert(record.id.clone());
            if let Some(quota) = &record.quota {
                state.issued.insert(quota.id.clone());
            }
            state.applications.insert(record.id.clone(), record);
        }
        for record in snapshot.frontends {
            let status = record.status()?;
            if state.frontends.contains_key(&status.id) {
                anyhow::bail!("duplicate frontend id: {}", status.id);
            }
            state.issued.insert(status.id.clone());
            let FrontendRecord { spec, .. } = record;
            state.frontends.insert(
                status.id,
                StoredFrontend {
                    spec,
                    state: status.state,
                    deprecated: status.deprecated,
                },
            );
        }
        Ok(Self {
            state: Mutex::new(state),
            failures: snapshot.fail.into_iter().collect(),
        })
    }

    /// Make a call fail
    ///
    /// `rule` is either an action (`"publish"`), which fails it for every
    /// target, or `"<action> <target>"`.
    #[must_use]
    pub fn failing(mut self, rule: impl Into<String>) -> Self {
        self.failures.insert(rule.into());
        self
    }

    /// Every mutating call received so far, in order
    #[must_use]
    pub fn journal(&self) -> Vec<Operation> {
        self.lock().journal.clone()
    }

    /// Current record of an application
    #[must_use]
    pub fn application(&self, id: &str) -> Option<ApplicationRecord> {
        self.lock().applications.get(id).cloned()
    }

    /// Record store for organizations
    #[must_use]
    pub const fn organizations(&self) -> MemoryRecords<'_, OrganizationSpec> {
        MemoryRecords::new(self, "organization", "org", organizations)
    }

    /// Record store for users
    #[must_use]
    pub const fn users(&self) -> MemoryRecords<'_, UserSpec> {
        MemoryRecords::new(self, "user", "user", users)
    }

    /// Record store for backend APIs
    #[must_use]
    pub const fn backends(&self) -> MemoryRecords<'_, BackendSpec> {
        MemoryRecords::new(self, "backend", "backend", backends)
    }

    /// Record store for applications
    #[must_use]
    pub const fn applications(&self) -> MemoryApplications<'_> {
        MemoryApplications(self)
    }

    /// Association store for the APIs of applications
    #[must_use]
    pub const fn apis(&self) -> MemoryApis<'_> {
        MemoryApis(self)
    }

    /// Association store for the API keys of applications
    #[must_use]
    pub const fn api_keys(&self) -> MemoryApiKeys<'_> {
        MemoryApiKeys(self)
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_failure(&self, action: &str, target: &str) -> anyhow::Result<()> {
        if self.failures.contains(action) || self.failures.contains(&format!("{action} {target}")) {
            anyhow::bail!("injected failure: {action} {target}");
        }
        Ok(())
    }

    /// Run a read-only call
    fn query<T>(
        &self,
        action: &str,
        target: &str,
        f: impl FnOnce(&mut State) -> anyhow::Result<T>,
    ) -> anyhow::Result<T> {
        self.check_failure(action, target)?;
        f(&mut *self.lock())
    }

    /// Run a mutating call and journal it
    fn mutate<T>(
        &self,
        action: &str,
        target: &str,
        f: impl FnOnce(&mut State) -> anyhow::Result<T>,
    ) -> anyhow::Result<T> {
        let mut state = self.lock();
        let result = self.check_failure(action, target).and_then(|()| f(&mut *state));
        state.journal.push(Operation {
            action: action.to_string(),
            target: target.to_string(),
            succeeded: result.is_ok(),
        });
        result
    }
}

impl FrontendClient for MemoryGateway {
    fn get(&self, id: &str) -> anyhow::Result<FrontendStatus> {
        self.query("get frontend", id, |s| Ok(s.frontend(id)?.status(id)))
    }

    fn read(&self, id: &str) -> anyhow::Result<FrontendSpec> {
        self.query("read frontend", id, |s| {
            let stored = s.frontend(id)?;
            let mut spec = stored.spec.clone();
            spec.id = Some(id.to_string());
            spec.state = LifecycleState::from_remote(&stored.state, stored.deprecated)
                .unwrap_or_default();
            Ok(spec)
        })
    }

    fn find_by_name(&self, name: &str) -> anyhow::Result<Option<String>> {
        self.query("find frontend", name, |s| {
            Ok(s.frontends
                .iter()
                .find(|(_, f)| f.spec.name == name)
                .map(|(id, _)| id.clone()))
        })
    }

    fn create(&self, spec: &FrontendSpec) -> anyhow::Result<FrontendStatus> {
        self.mutate("create frontend", &spec.name, |s| {
            let id = s.allocate("fe");
            let (state, deprecated) = spec.state.to_remote();
            let mut spec = spec.clone();
            spec.id = Some(id.clone());
            let stored = StoredFrontend {
                spec,
                state,
                deprecated,
            };
            let status = stored.status(&id);
            s.frontends.insert(id, stored);
            Ok(status)
        })
    }

    fn update(&self, id: &str, spec: &FrontendSpec) -> anyhow::Result<FrontendStatus> {
        self.mutate("update frontend", id, |s| {
            let stored = s.frontend(id)?;
            if stored.state == RemoteState::Published {
                let locked: Vec<String> = stored
                    .spec
                    .changed_fields(spec)
                    .into_iter()
                    .filter(|f| !f.is_live_editable())
                    .map(|f| f.key().to_string())
                    .collect();
                if !locked.is_empty() {
                    anyhow::bail!(
                        "frontend {id} is published: cannot change {}",
                        locked.join(", ")
                    );
                }
            }
            let lifecycle = stored.spec.state;
            stored.spec = spec.clone();
            stored.spec.id = Some(id.to_string());
            stored.spec.state = lifecycle;
            Ok(stored.status(id))
        })
    }

    fn delete(&self, id: &str) -> anyhow::Result<()> {
        self.mutate("delete frontend", id, |s| {
            if s.frontend(id)?.state != RemoteState::Unpublished {
                anyhow::bail!("frontend {id} must be unpublished before deletion");
            }
            s.frontends.remove(id);
            Ok(())
        })
    }

    fn publish(&self, id: &str) -> anyhow::Result<FrontendStatus> {
        self.mutate("publish", id, |s| {
            let stored = s.frontend(id)?;
            if stored.state != RemoteState::Unpublished {
                anyhow::bail!("frontend {id} is {}: cannot publish", stored.state);
            }
            stored.state = RemoteState::Published;
            stored.deprecated = false;
            Ok(stored.status(id))
        })
    }

    fn unpublish(&self, id: &str) -> anyhow::Result<FrontendStatus> {
        self.mutate("unpublish", id, |s| {
            let stored = s.frontend(id)?;
            if stored.state != RemoteState::Published || stored.deprecated {
                anyhow::bail!("frontend {id} is not a plain published frontend");
            }
            stored.state = RemoteState::Unpublished;
            Ok(stored.status(id))
        })
    }

    fn deprecate(&self, id: &str) -> anyhow::Result<FrontendStatus> {
        self.mutate("deprecate", id, |s| {
            let stored = s.frontend(id)?;
            if stored.state != RemoteState::Published || stored.deprecated {
                anyhow::bail!("frontend {id} is not a plain published frontend");
            }
            stored.deprecated = true;
            Ok(stored.status(id))
        })
    }

    fn undeprecate(&self, id: &str) -> anyhow::Result<FrontendStatus> {
        self.mutate("undeprecate", id, |s| {
            let stored = s.frontend(id)?;
            if !stored.deprecated {
                anyhow::bail!("frontend {id} is not deprecated");
            }
            stored.deprecated = false;
            Ok(stored.status(id))
        })
    }
}

/// Application records of a [`MemoryGateway`]
///
/// Reads only report the record's own fields: associations and quota are
/// left empty.
#[derive(Debug, Clone, Copy)]
pub struct MemoryApplications<'a>(&'a MemoryGateway);

impl RecordStore for MemoryApplications<'_> {
    type Record = ApplicationSpec;

    fn kind(&self) -> &'static str {
        "application"
    }

    fn find_by_name(&self, name: &str) -> anyhow::Result<Option<String>> {
        self.0.query("find application", name, |s| {
            Ok(s.applications.values().find(|a| a.name == name).map(|a| a.id.clone()))
        })
    }

    fn read(&self, id: &str) -> anyhow::Result<ApplicationSpec> {
        self.0.query("read application", id, |s| {
            let record = s.application(id)?;
            let mut spec = ApplicationSpec::named(record.name.clone());
            spec.id = Some(record.id.clone());
            spec.description.clone_from(&record.description);
            spec.org_id.clone_from(&record.org_id);
            spec.phone.clone_from(&record.phone);
            spec.email.clone_from(&record.email);
            spec.enabled = record.enabled;
            Ok(spec)
        })
    }

    fn create(&self, spec: &ApplicationSpec) -> anyhow::Result<String> {
        self.0.mutate("create application", &spec.name, |s| {
            let id = s.allocate("app");
            s.applications.insert(
                id.clone(),
                ApplicationRecord {
                    id: id.clone(),
                    name: spec.name.clone(),
                    description: spec.description.clone(),
                    org_id: spec.org_id.clone(),
                    phone: spec.phone.clone(),
                    email: spec.email.clone(),
                    enabled: spec.enabled,
                    apis: Vec::new(),
                    api_keys: Vec::new(),
                    quota: None,
                },
            );
            Ok(id)
        })
    }

    fn update(&self, id: &str, spec: &ApplicationSpec) -> anyhow::Result<()> {
        self.0.mutate("update application", id, |s| {
            let record = s.application(id)?;
            record.name.clone_from(&spec.name);
            record.description.clone_from(&spec.description);
            record.org_id.clone_from(&spec.org_id);
            record.phone.clone_from(&spec.phone);
            record.email.clone_from(&spec.email);
            record.enabled = spec.enabled;
            Ok(())
        })
    }

    fn delete(&self, id: &str) -> anyhow::Result<()> {
        self.0.mutate("delete application", id, |s| {
            s.applications
                .remove(id)
                .map(|_| ())
                .ok_or_else(|| anyhow::anyhow!("application not found: {id}"))
        })
    }
}

impl QuotaStore for MemoryGateway {
    fn application_quota(&self, application_id: &str) -> anyhow::Result<Option<Quota>> {
        self.query("get quota", application_id, |s| {
            Ok(s.application(application_id)?.quota.clone())
        })
    }

    fn add_application_quota(&self, application_id: &str, quota: &Quota) -> anyhow::Result<()> {
        self.mutate("add quota", application_id, |s| {
            let id = s.allocate("quota");
            let record = s.application(application_id)?;
            if record.quota.as_ref().is_some_and(Quota::is_custom) {
                anyhow::bail!("application {application_id} already has a quota");
            }
            let mut quota = quota.clone();
            quota.id = id;
            record.quota = Some(quota);
            Ok(())
        })
    }

    fn update_application_quota(
        &self,
        application_id: &str,
        quota: &Quota,
    ) -> anyhow::Result<()> {
        self.mutate("update quota", application_id, |s| {
            let record = s.application(application_id)?;
            let Some(existing) = record.quota.as_mut().filter(|q| q.is_custom()) else {
                anyhow::bail!("application {application_id} has no quota");
            };
            let id = std::mem::take(&mut existing.id);
            *existing = quota.clone();
            existing.id = id;
            Ok(())
        })
    }

    fn delete_application_quota(&self, application_id: &str) -> anyhow::Result<()> {
        self.mutate("delete quota", application_id, |s| {
            let record = s.application(application_id)?;
            if !record.quota.as_ref().is_some_and(Quota::is_custom) {
                anyhow::bail!("application {application_id} has no quota");
            }
            record.quota = None;
            Ok(())
        })
    }
}

/// API associations of a [`MemoryGateway`]
#[derive(Debug, Clone, Copy)]
pub struct MemoryApis<'a>(&'a MemoryGateway);

impl AssociationStore for MemoryApis<'_> {
    type Child = String;

    fn kind(&self) -> &'static str {
        "api"
    }

    fn list(&self, parent_id: &str) -> anyhow::Result<Vec<String>> {
        self.0.query("list api", parent_id, |s| Ok(s.application(parent_id)?.apis.clone()))
    }

    fn add(&self, parent_id: &str, child: &String) -> anyhow::Result<()> {
        self.0.mutate("add api", &format!("{parent_id}/{child}"), |s| {
            let record = s.application(parent_id)?;
            if record.apis.contains(child) {
                anyhow::bail!("api {child} is already associated with {parent_id}");
            }
            record.apis.push(child.clone());
            Ok(())
        })
    }

    fn remove(&self, parent_id: &str, child_id: &str) -> anyhow::Result<()> {
        self.0.mutate("remove api", &format!("{parent_id}/{child_id}"), |s| {
            let record = s.application(parent_id)?;
            let before = record.apis.len();
            record.apis.retain(|a| a != child_id);
            if record.apis.len() == before {
                anyhow::bail!("api {child_id} is not associated with {parent_id}");
            }
            Ok(())
        })
    }
}

/// API keys of a [`MemoryGateway`]
#[derive(Debug, Clone, Copy)]
pub struct MemoryApiKeys<'a>(&'a MemoryGateway);

impl AssociationStore for MemoryApiKeys<'_> {
    type Child = ApiKeySpec;

    fn kind(&self) -> &'static str {
        "api key"
    }

    fn list(&self, parent_id: &str) -> anyhow::Result<Vec<String>> {
        self.0.query("list api key", parent_id, |s| {
            Ok(s.application(parent_id)?.api_keys.iter().map(|k| k.id.clone()).collect())
        })
    }

    fn add(&self, parent_id: &str, child: &ApiKeySpec) -> anyhow::Result<()> {
        self.0.mutate("add api key", &format!("{parent_id}/{}", child.id), |s| {
            let record = s.application(parent_id)?;
            if record.api_keys.iter().any(|k| k.id == child.id) {
                anyhow::bail!("api key {} already exists on {parent_id}", child.id);
            }
            record.api_keys.push(child.clone());
            Ok(())
        })
    }

    fn remove(&self, parent_id: &str, child_id: &str) -> anyhow::Result<()> {
        self.0.mutate("remove api key", &format!("{parent_id}/{child_id}"), |s| {
            let record = s.application(parent_id)?;
            let before = record.api_keys.len();
            record.api_keys.retain(|k| k.id != child_id);
            if record.api_keys.len() == before {
                anyhow::bail!("api key {child_id} does not exist on {parent_id}");
            }
            Ok(())
        })
    }
}

type Table<R> = fn(&mut State) -> &mut BTreeMap<String, R>;

const fn organizations(state: &mut State) -> &mut BTreeMap<String, OrganizationSpec> {
    &mut state.organizations
}

const fn users(state: &mut State) -> &mut BTreeMap<String, UserSpec> {
    &mut state.users
}

const fn backends(state: &mut State) -> &mut BTreeMap<String, BackendSpec> {
    &mut state.backends
}

fn seed<R: ManagedRecord>(
    table: &mut BTreeMap<String, R>,
    issued: &mut BTreeSet<String>,
    kind: &str,
    records: Vec<R>,
) -> anyhow::Result<()> {
    for record in records {
        let Some(id) = record.id().map(str::to_string) else {
            anyhow::bail!("{kind} {} has no id", record.name());
        };
        if table.contains_key(&id) {
            anyhow::bail!("duplicate {kind} id: {id}");
        }
        issued.insert(id.clone());
        table.insert(id, record);
    }
    Ok(())
}

/// Organization, user or backend records of a [`MemoryGateway`]
pub struct MemoryRecords<'a, R> {
    gateway: &'a MemoryGateway,
    kind: &'static str,
    prefix: &'static str,
    table: Table<R>,
}

impl<'a, R> MemoryRecords<'a, R> {
    const fn new(
        gateway: &'a MemoryGateway,
        kind: &'static str,
        prefix: &'static str,
        table: Table<R>,
    ) -> Self {
        Self {
            gateway,
            kind,
            prefix,
            table,
        }
    }
}

impl<R> std::fmt::Debug for MemoryRecords<'_, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryRecords").field("kind", &self.kind).finish_non_exhaustive()
    }
}

impl<R: ManagedRecord> RecordStore for MemoryRecords<'_, R> {
    type Record = R;

    fn kind(&self) -> &'static str {
        self.kind
    }

    fn find_by_name(&self, name: &str) -> anyhow::Result<Option<String>> {
        self.gateway.query(&format!("find {}", self.kind), name, |s| {
            Ok((self.table)(s)
                .iter()
                .find(|(_, r)| r.name() == name)
                .map(|(id, _)| id.clone()))
        })
    }

    fn read(&self, id: &str) -> anyhow::Result<R> {
        self.gateway.query(&format!("read {}", self.kind), id, |s| {
            (self.table)(s)
                .get(id)
                .map(ManagedRecord::without_secrets)
                .ok_or_else(|| anyhow::anyhow!("{} not found: {id}", self.kind))
        })
    }

    fn create(&self, record: &R) -> anyhow::Result<String> {
        self.gateway.mutate(&format!("create {}", self.kind), record.name(), |s| {
            let id = s.allocate(self.prefix);
            let table = (self.table)(s);
            if table.values().any(|r| r.name() == record.name()) {
                anyhow::bail!("{} {} already exists", self.kind, record.name());
            }
            let mut record = record.clone();
            record.set_id(Some(id.clone()));
            table.insert(id.clone(), record);
            Ok(id)
        })
    }

    fn update(&self, id: &str, record: &R) -> anyhow::Result<()> {
        self.gateway.mutate(&format!("update {}", self.kind), id, |s| {
            let Some(stored) = (self.table)(s).get_mut(id) else {
                anyhow::bail!("{} not found: {id}", self.kind);
            };
            *stored = record.clone();
            stored.set_id(Some(id.to_string()));
            Ok(())
        })
    }

    fn delete(&self, id: &str) -> anyhow::Result<()> {
        self.gateway.mutate(&format!("delete {}", self.kind), id, |s| {
            (self.table)(s)
                .remove(id)
                .map(|_| ())
                .ok_or_else(|| anyhow::anyhow!("{} not found: {id}", self.kind))
        })
    }
}
