// File: src/sessions.rs
// Purpose: Server-side signup sessions, one per rendered signup form

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use lianel::{Field, FormState, Navigator, ProfileApi, SubmissionController, SubmissionState, SubmitOutcome};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};
use uuid::Uuid;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Navigation target waiting for the browser to pick it up
#[derive(Debug, Default)]
pub struct PendingNavigation {
    target: Mutex<Option<String>>,
}

impl PendingNavigation {
    pub fn take(&self) -> Option<String> {
        lock(&self.target).take()
    }
}

impl Navigator for PendingNavigation {
    fn navigate(&self, path: &str) {
        *lock(&self.target) = Some(path.to_string());
    }
}

/// Everything one mounted signup form owns
pub struct SignupSession {
    pub id: Uuid,
    form: Mutex<FormState>,
    controller: SubmissionController,
    navigation: Arc<PendingNavigation>,
    last_active: Mutex<Instant>,
}

impl SignupSession {
    fn new(api: Arc<dyn ProfileApi>) -> Self {
        let navigation = Arc::new(PendingNavigation::default());
        Self {
            id: Uuid::new_v4(),
            form: Mutex::new(FormState::new()),
            controller: SubmissionController::new(api, navigation.clone()),
            navigation,
            last_active: Mutex::new(Instant::now()),
        }
    }

    pub fn form(&self) -> FormState {
        lock(&self.form).clone()
    }

    fn touch(&self) {
        *lock(&self.last_active) = Instant::now();
    }

    /// Applies one field edit and returns the form as it now stands
    pub fn update(&self, field: Field, value: impl Into<String>) -> FormState {
        self.touch();
        let mut form = lock(&self.form);
        form.set(field, value);
        form.clone()
    }

    pub fn state(&self) -> SubmissionState {
        self.controller.state()
    }

    pub async fn submit(&self) -> SubmitOutcome {
        self.touch();
        let form = self.form();
        self.controller.submit(&form).await
    }

    pub fn take_navigation(&self) -> Option<String> {
        self.navigation.take()
    }

    fn discard(&self) {
        self.controller.discard();
    }

    /// Idle for at least `ttl` since the last edit or submit
    fn expired(&self, ttl: Duration) -> bool {
        lock(&self.last_active).elapsed() >= ttl
    }
}

/// Live signup sessions keyed by id
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Arc<SignupSession>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Creates a session for a freshly rendered form, dropping expired ones first
    pub async fn mount(&self, api: Arc<dyn ProfileApi>) -> Arc<SignupSession> {
        self.sweep().await;
        let session = Arc::new(SignupSession::new(api));
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.id, session.clone());
        info!(session = %session.id, live = sessions.len(), "signup form mounted");
        session
    }

    pub async fn get(&self, id: Uuid) -> Option<Arc<SignupSession>> {
        self.sessions.read().await.get(&id).cloned()
    }

    /// Removes a session; anything it still has in flight is ignored on completion
    pub async fn remove(&self, id: Uuid) -> bool {
        match self.sessions.write().await.remove(&id) {
            Some(session) => {
                session.discard();
                debug!(session = %id, "signup form discarded");
                true
            }
            None => false,
        }
    }

    /// Sweeps on a fixed period so abandoned forms go even when nobody mounts
    pub fn spawn_sweeper(self: &Arc<Self>, period: Duration) -> JoinHandle<()> {
        let store = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticks = tokio::time::interval(period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                store.sweep().await;
            }
        })
    }

    /// Discards every session idle for longer than the TTL. Returns how many went.
    pub async fn sweep(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let expired: Vec<Uuid> = sessions
            .values()
            .filter(|session| session.expired(self.ttl))
            .map(|session| session.id)
            .collect();
        for id in &expired {
            if let Some(session) = sessions.remove(id) {
                session.discard();
            }
        }
        if !expired.is_empty() {
            info!(count = expired.len(), "expired signup forms discarded");
        }
        expired.len()
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
