use chrono::{DateTime, Utc};

use crate::model::{
    api::{election::Election, user::User},
    common::election::Phase,
};

/// The voter dashboard: elections grouped by phase, in server order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dashboard {
    pub upcoming: Vec<Election>,
    pub active: Vec<Election>,
    pub completed: Vec<Election>,
}

impl Dashboard {
    /// Group `elections` by their phase at `now`.
    /// Non-public elections are only listed for admins.
    pub fn new(elections: Vec<Election>, viewer: &User, now: DateTime<Utc>) -> Self {
        let mut dashboard = Self::default();
        for election in elections {
            if !election.is_public && !viewer.is_admin() {
                continue;
            }
            match election.phase(now) {
                Phase::Upcoming => dashboard.upcoming.push(election),
                Phase::Active => dashboard.active.push(election),
                Phase::Completed => dashboard.completed.push(election),
            }
        }
        dashboard
    }

    /// The elections in a given phase.
    pub fn in_phase(&self, phase: Phase) -> &[Election] {
        match phase {
            Phase::Upcoming => &self.upcoming,
            Phase::Active => &self.active,
            Phase::Completed => &self.completed,
        }
    }

    pub fn len(&self) -> usize {
        self.upcoming.len() + self.active.len() + self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
