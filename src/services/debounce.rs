// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use parking_lot::Mutex;
use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::sleep;

/// Trailing-edge debounce timer.
///
/// Every `schedule` call cancels the previously armed timer and arms a new
/// one, so only the last action scheduled within a quiet period runs. Once
/// the quiet period elapses the action is spawned as its own task: cancelling
/// or re-arming afterwards never interrupts an action that already started.
///
/// Must be used from within a Tokio runtime.
pub struct Debouncer {
    quiet_period: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            pending: Mutex::new(None),
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Arm the timer for `action`, replacing whatever was armed before
    pub fn schedule<F>(&self, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let quiet_period = self.quiet_period;
        let timer = tokio::spawn(async move {
            sleep(quiet_period).await;
            tokio::spawn(action);
        });

        if let Some(previous) = self.pending.lock().replace(timer) {
            previous.abort();
        }
    }

    /// Disarm the timer. Returns true if an action was still waiting to fire.
    pub fn cancel(&self) -> bool {
        match self.pending.lock().take() {
            Some(timer) => {
                let was_waiting = !timer.is_finished();
                timer.abort();
                was_waiting
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .as_ref()
            .is_some_and(|timer| !timer.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Some(timer) = self.pending.get_mut().take() {
            timer.abort();
        }
    }
}
