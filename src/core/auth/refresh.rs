//! Single-flight coordination of token refreshes
//!
//! At most one refresh call is outstanding at a time. What happens to the
//! other requests that hit a 401 meanwhile depends on [`RefreshPolicy`].

use futures::channel::oneshot;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use crate::core::auth::TokenPair;
use crate::core::error::SessionError;

/// Result handed to requests waiting on an in-flight refresh
pub type RefreshResult = Result<TokenPair, SessionError>;

/// Behaviour for a 401 that arrives while a refresh is already running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshPolicy {
    /// Fail immediately with `RefreshInProgress`
    #[default]
    FailFast,
    /// Wait for the in-flight refresh and replay with its tokens
    Coalesce,
}

impl FromStr for RefreshPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail-fast" | "fail_fast" | "failfast" => Ok(RefreshPolicy::FailFast),
            "coalesce" | "wait" => Ok(RefreshPolicy::Coalesce),
            other => Err(format!("unknown refresh policy: {}", other)),
        }
    }
}

#[derive(Default)]
struct CoordinatorState {
    in_flight: bool,
    waiters: Vec<oneshot::Sender<RefreshResult>>,
}

/// Outcome of asking to start a refresh
pub enum RefreshTicket {
    /// This caller performs the refresh and must report through the guard
    Leader(RefreshGuard),
    /// Another refresh is running; its result arrives on the receiver
    Waiter(oneshot::Receiver<RefreshResult>),
    /// Another refresh is running and the policy does not wait
    Busy,
}

/// Owner of the in-flight slot
#[derive(Default)]
pub struct RefreshCoordinator {
    policy: RefreshPolicy,
    state: Mutex<CoordinatorState>,
}

impl RefreshCoordinator {
    pub fn new(policy: RefreshPolicy) -> Self {
        Self {
            policy,
            state: Mutex::new(CoordinatorState::default()),
        }
    }

    pub fn policy(&self) -> RefreshPolicy {
        self.policy
    }

    pub fn is_in_flight(&self) -> bool {
        self.lock().in_flight
    }

    /// Claim the in-flight slot, or join/reject according to the policy
    pub fn begin(self: &Arc<Self>) -> RefreshTicket {
        let mut state = self.lock();
        if !state.in_flight {
            state.in_flight = true;
            return RefreshTicket::Leader(RefreshGuard {
                coordinator: Arc::clone(self),
                released: false,
            });
        }

        match self.policy {
            RefreshPolicy::FailFast => RefreshTicket::Busy,
            RefreshPolicy::Coalesce => {
                let (tx, rx) = oneshot::channel();
                state.waiters.push(tx);
                RefreshTicket::Waiter(rx)
            }
        }
    }

    /// Claim the slot only if it is free
    pub fn try_begin(self: &Arc<Self>) -> Option<RefreshGuard> {
        let mut state = self.lock();
        if state.in_flight {
            return None;
        }
        state.in_flight = true;
        Some(RefreshGuard {
            coordinator: Arc::clone(self),
            released: false,
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CoordinatorState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn release(&self, result: Option<&RefreshResult>) {
        let waiters = {
            let mut state = self.lock();
            state.in_flight = false;
            std::mem::take(&mut state.waiters)
        };

        // Dropped senders surface as a cancelled receiver on the waiter side
        if let Some(result) = result {
            for waiter in waiters {
                let _ = waiter.send(result.clone());
            }
        }
    }
}

/// Held by the caller performing the refresh; frees the slot on drop
pub struct RefreshGuard {
    coordinator: Arc<RefreshCoordinator>,
    released: bool,
}

impl RefreshGuard {
    /// Publish the refresh result to waiters and free the slot
    pub fn finish(mut self, result: &RefreshResult) {
        self.released = true;
        self.coordinator.release(Some(result));
    }
}

impl Drop for RefreshGuard {
    fn drop(&mut self) {
        if !self.released {
            self.coordinator.release(None);
        }
    }
}
