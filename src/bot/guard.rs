//! Per-user in-flight request tracking.

use dashmap::DashSet;

/// Set of user ids with a request currently being served.
///
/// `begin` hands out an RAII permit; dropping the permit clears the user, so
/// release happens on every exit path of a handler.
#[derive(Default)]
pub struct InFlight {
    active: DashSet<u64>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `user` as busy. `None` when a request is already running.
    pub fn begin(&self, user: u64) -> Option<InFlightPermit<'_>> {
        if self.active.insert(user) {
            Some(InFlightPermit { owner: self, user })
        } else {
            None
        }
    }

    pub fn is_busy(&self, user: u64) -> bool {
        self.active.contains(&user)
    }
}

pub struct InFlightPermit<'a> {
    owner: &'a InFlight,
    user: u64,
}

impl Drop for InFlightPermit<'_> {
    fn drop(&mut self) {
        self.owner.active.remove(&self.user);
    }
}
