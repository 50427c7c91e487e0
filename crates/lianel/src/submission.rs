// File: src/submission.rs
// Purpose: Create-profile request lifecycle for one signup form

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::api::ProfileApi;
use crate::form::FormState;
use crate::navigation::{Navigator, LISTING_PATH};

/// Pause between a successful signup and the move to the listing
pub const NAVIGATION_DELAY: Duration = Duration::from_millis(800);

pub const SUCCESS_MESSAGE: &str = "Profile created!";

/// Shown when the service could not be reached at all
pub const SUBMIT_FAILED_MESSAGE: &str = "Failed to sign up.";

/// Where a form's single submission slot stands
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Busy,
    Succeeded(String),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionEvent {
    Submit,
    Succeeded(String),
    Failed(String),
}

impl SubmissionState {
    /// Next state for `event`, or `None` when the event does not apply.
    ///
    /// Submit is accepted from Idle and Failed only: Busy already owns the
    /// slot and Succeeded is on its way to the listing.
    pub fn transition(&self, event: SubmissionEvent) -> Option<SubmissionState> {
        match (self, event) {
            (SubmissionState::Idle | SubmissionState::Failed(_), SubmissionEvent::Submit) => {
                Some(SubmissionState::Busy)
            }
            (SubmissionState::Busy, SubmissionEvent::Succeeded(message)) => {
                Some(SubmissionState::Succeeded(message))
            }
            (SubmissionState::Busy, SubmissionEvent::Failed(message)) => {
                Some(SubmissionState::Failed(message))
            }
            _ => None,
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, SubmissionState::Busy)
    }

    pub fn accepts_submit(&self) -> bool {
        self.transition(SubmissionEvent::Submit).is_some()
    }

    pub fn success_message(&self) -> Option<&str> {
        match self {
            SubmissionState::Succeeded(message) => Some(message),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            SubmissionState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// What a call to `submit` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Form invalid, a request already in flight, already succeeded, or discarded
    Ignored,
    Succeeded,
    Failed,
    /// The controller was discarded while the request was in flight
    Discarded,
}

struct Slot {
    state: SubmissionState,
    mounted: bool,
    navigation: Option<JoinHandle<()>>,
}

fn lock_slot(slot: &Mutex<Slot>) -> MutexGuard<'_, Slot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Held across the request. Dropped while still armed (the submit future
/// was cancelled mid-request), it releases Busy as a generic failure.
struct InFlight<'a> {
    slot: &'a Mutex<Slot>,
    armed: bool,
}

impl InFlight<'_> {
    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut slot = lock_slot(self.slot);
        if SubmissionController::apply(&mut slot, SubmissionEvent::Failed(SUBMIT_FAILED_MESSAGE.to_string())) {
            warn!("submit cancelled before the service answered");
        }
    }
}

/// Drives one form's create-profile submission.
///
/// The state lock is never held across the request, so `state()` stays
/// readable while a submission is in flight.
pub struct SubmissionController {
    api: Arc<dyn ProfileApi>,
    navigator: Arc<dyn Navigator>,
    slot: Mutex<Slot>,
}

impl SubmissionController {
    pub fn new(api: Arc<dyn ProfileApi>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            api,
            navigator,
            slot: Mutex::new(Slot {
                state: SubmissionState::Idle,
                mounted: true,
                navigation: None,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        lock_slot(&self.slot)
    }

    pub fn state(&self) -> SubmissionState {
        self.lock().state.clone()
    }

    pub fn is_mounted(&self) -> bool {
        self.lock().mounted
    }

    /// Applies `event` if the controller is still mounted and the
    /// transition exists. Returns whether the state changed.
    fn apply(slot: &mut Slot, event: SubmissionEvent) -> bool {
        if !slot.mounted {
            return false;
        }
        match slot.state.transition(event) {
            Some(next) => {
                slot.state = next;
                true
            }
            None => false,
        }
    }

    /// Submits `form` to the profile service.
    ///
    /// A no-op unless the form can be submitted and the slot accepts a
    /// submit. On success the navigator is sent to the listing after
    /// `NAVIGATION_DELAY`.
    pub async fn submit(&self, form: &FormState) -> SubmitOutcome {
        if !form.can_submit() {
            debug!("submit ignored: form is not valid");
            return SubmitOutcome::Ignored;
        }
        if !Self::apply(&mut self.lock(), SubmissionEvent::Submit) {
            debug!("submit ignored: slot is {:?}", self.state());
            return SubmitOutcome::Ignored;
        }

        let mut in_flight = InFlight { slot: &self.slot, armed: true };
        let request = form.to_request();
        let result = self.api.create_profile(&request).await;
        in_flight.disarm();

        let mut slot = self.lock();
        if !slot.mounted {
            info!(username = %request.username, "form discarded before the signup completed; ignoring result");
            return SubmitOutcome::Discarded;
        }

        match result {
            Ok(_) => {
                Self::apply(&mut slot, SubmissionEvent::Succeeded(SUCCESS_MESSAGE.to_string()));
                slot.navigation = Some(self.schedule_navigation());
                info!(username = %request.username, "profile created");
                SubmitOutcome::Succeeded
            }
            Err(e) => {
                let message = e.user_message(SUBMIT_FAILED_MESSAGE);
                warn!(username = %request.username, error = %e, "signup failed");
                Self::apply(&mut slot, SubmissionEvent::Failed(message));
                SubmitOutcome::Failed
            }
        }
    }

    fn schedule_navigation(&self) -> JoinHandle<()> {
        let navigator = Arc::clone(&self.navigator);
        tokio::spawn(async move {
            tokio::time::sleep(NAVIGATION_DELAY).await;
            navigator.navigate(LISTING_PATH);
        })
    }

    /// Tears the controller down: late completions are ignored and a
    /// pending navigation is cancelled.
    pub fn discard(&self) {
        let mut slot = self.lock();
        slot.mounted = false;
        if let Some(navigation) = slot.navigation.take() {
            navigation.abort();
        }
    }
}

impl Drop for SubmissionController {
    fn drop(&mut self) {
        self.discard();
    }
}
