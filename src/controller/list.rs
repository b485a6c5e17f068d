//! State behind the users screen: the collection, load flags and search term.

use tracing::{debug, info, warn};

use super::Collaborators;
use crate::error::ApiResult;
use crate::model::{User, UserId};
use crate::search::filter_users;
use crate::sinks::{Confirm, Route};

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this user?";

/// Issued when a load starts; carries its sequence number.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    seq: u64,
}

/// What happened to a finished load.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LoadResolution {
    Applied,
    /// A newer load has already been applied; the result was dropped.
    Stale,
    Failed,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RemoveOutcome {
    Cancelled,
    Removed,
    Failed,
}

pub struct ListController {
    collab: Collaborators,
    users: Vec<User>,
    loading: bool,
    refreshing: bool,
    search_term: String,
    issued_seq: u64,
    applied_seq: u64,
}

impl ListController {
    pub fn new(collab: Collaborators) -> Self {
        Self {
            collab,
            users: Vec::new(),
            loading: false,
            refreshing: false,
            search_term: String::new(),
            issued_seq: 0,
            applied_seq: 0,
        }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn refreshing(&self) -> bool {
        self.refreshing
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn find(&self, id: &UserId) -> Option<&User> {
        self.users.iter().find(|u| &u.id == id)
    }

    /// Users matching the current search term, recomputed on every call.
    pub fn filtered(&self) -> impl Iterator<Item = &User> {
        filter_users(&self.users, &self.search_term)
    }

    /// Start tracking a load. Results are applied only if they are newer than
    /// the last applied one. `fetch`/`refresh` hold `&mut self` for the whole
    /// call, so overlapping loads only happen for callers that drive the
    /// transport themselves with `begin_load`/`finish_load`.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.issued_seq += 1;
        LoadTicket {
            seq: self.issued_seq,
        }
    }

    /// Apply or discard a finished load. Flags clear once the newest issued
    /// load has resolved, whatever its outcome.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: ApiResult<Vec<User>>) -> LoadResolution {
        if ticket.seq == self.issued_seq {
            self.loading = false;
            self.refreshing = false;
        }
        if ticket.seq <= self.applied_seq {
            debug!(seq = ticket.seq, applied = self.applied_seq, "dropping stale load");
            return LoadResolution::Stale;
        }
        match result {
            Ok(users) => {
                debug!(seq = ticket.seq, count = users.len(), "users loaded");
                self.applied_seq = ticket.seq;
                self.users = users;
                LoadResolution::Applied
            }
            Err(e) => {
                warn!(seq = ticket.seq, error = %e, "loading users failed");
                self.collab.notifier.notify_error("Failed to fetch users");
                LoadResolution::Failed
            }
        }
    }

    pub async fn fetch(&mut self) -> LoadResolution {
        self.loading = true;
        let ticket = self.begin_load();
        let result = self.collab.api.list_users().await;
        self.finish_load(ticket, result)
    }

    /// Like [`fetch`](Self::fetch) but tracked under `refreshing`, and reports
    /// success when the call itself succeeds.
    pub async fn refresh(&mut self) -> LoadResolution {
        self.refreshing = true;
        let ticket = self.begin_load();
        let result = self.collab.api.list_users().await;
        let resolution = self.finish_load(ticket, result);
        if resolution != LoadResolution::Failed {
            self.collab.notifier.notify_success("Users refreshed!");
        }
        resolution
    }

    /// Delete after confirmation; on success drop the entry locally by id.
    pub async fn remove(&mut self, id: &UserId, gate: &dyn Confirm) -> RemoveOutcome {
        if !gate.confirm(DELETE_PROMPT) {
            debug!(%id, "delete cancelled");
            return RemoveOutcome::Cancelled;
        }
        match self.collab.api.delete_user(id).await {
            Ok(()) => {
                info!(%id, "user deleted");
                self.users.retain(|u| &u.id != id);
                self.collab.notifier.notify_success("User deleted successfully!");
                RemoveOutcome::Removed
            }
            Err(e) => {
                warn!(%id, error = %e, "delete failed");
                self.collab.notifier.notify_error("Failed to delete user");
                RemoveOutcome::Failed
            }
        }
    }

    pub fn open_create(&self) {
        self.collab.navigator.go_to(Route::AddUser);
    }

    pub fn open_editor(&self, id: &UserId) {
        self.collab.navigator.go_to(Route::EditUser(id.clone()));
    }
}
