//! Process-local session registry, scoped by authenticated user id.
//!
//! Each user sees only their own sessions; the registry itself lives behind
//! the shared-state lock, so insert/delete are mutually exclusive.

use std::collections::HashMap;

use uuid::Uuid;

use crate::interview::session::{InterviewSession, SessionSetup};

#[derive(Default)]
struct UserSessions {
    sessions: HashMap<Uuid, InterviewSession>,
    active: Option<Uuid>,
}

/// Maps user id → that user's interview sessions plus the active pointer.
#[derive(Default)]
pub struct SessionRegistry {
    users: HashMap<Uuid, UserSessions>,
}

impl SessionRegistry {
    /// Creates a session in the setup stage, registers it, and marks it
    /// active for the user. Returns a snapshot. No failure mode.
    pub fn create(&mut self, user_id: Uuid, setup: SessionSetup) -> InterviewSession {
        let session = InterviewSession::new(setup);
        let snapshot = session.clone();
        let entry = self.users.entry(user_id).or_default();
        entry.active = Some(session.id);
        entry.sessions.insert(session.id, session);
        snapshot
    }

    /// Removes a session; clears the active pointer if it pointed at `id`.
    /// Unknown ids are a silent no-op.
    pub fn delete(&mut self, user_id: Uuid, id: Uuid) {
        if let Some(entry) = self.users.get_mut(&user_id) {
            entry.sessions.remove(&id);
            if entry.active == Some(id) {
                entry.active = None;
            }
        }
    }

    /// The user's active session, or `None` when nothing is active.
    /// A dangling active pointer counts as "no active session".
    pub fn get_active(&self, user_id: Uuid) -> Option<&InterviewSession> {
        let entry = self.users.get(&user_id)?;
        entry.sessions.get(&entry.active?)
    }

    pub fn get(&self, user_id: Uuid, id: Uuid) -> Option<&InterviewSession> {
        self.users.get(&user_id)?.sessions.get(&id)
    }

    pub fn get_mut(&mut self, user_id: Uuid, id: Uuid) -> Option<&mut InterviewSession> {
        self.users.get_mut(&user_id)?.sessions.get_mut(&id)
    }

    /// Snapshots of all of the user's sessions.
    pub fn list(&self, user_id: Uuid) -> Vec<InterviewSession> {
        match self.users.get(&user_id) {
            Some(entry) => entry.sessions.values().cloned().collect(),
            None => Vec::new(),
        }
    }
}
