//! Collaborators the controllers report to: notifications, navigation and the
//! confirmation gate. Controllers receive them explicitly; nothing here is global.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::model::UserId;

/// Screens the application can show.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Users,
    AddUser,
    EditUser(UserId),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Users => "/users".to_string(),
            Route::AddUser => "/add-user".to_string(),
            Route::EditUser(id) => format!("/edit-user/{id}"),
        }
    }
}

/// Fire-and-forget user feedback.
pub trait Notifier: Send + Sync {
    fn notify_success(&self, message: &str);
    fn notify_error(&self, message: &str);
}

/// Screen transitions requested by controllers. Never blocks the caller.
pub trait Navigator: Send + Sync {
    fn go_to(&self, route: Route);
}

/// Yes/no gate in front of destructive calls.
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    pub raised_at: Instant,
}

/// How long a notification stays in the status bar.
pub const TOAST_TTL: Duration = Duration::from_secs(4);

/// Bounded queue of notifications shown in the status bar. Entries expire
/// after `ttl` and the event loop drops them on the next key press.
#[derive(Debug)]
pub struct ToastQueue {
    capacity: usize,
    ttl: Duration,
    items: Mutex<VecDeque<Toast>>,
}

impl ToastQueue {
    pub fn new(capacity: usize) -> Self {
        Self::with_ttl(capacity, TOAST_TTL)
    }

    pub fn with_ttl(capacity: usize, ttl: Duration) -> Self {
        Self {
            capacity: capacity.max(1),
            ttl,
            items: Mutex::new(VecDeque::new()),
        }
    }

    fn push(&self, kind: ToastKind, message: &str) {
        let mut items = self.items.lock().unwrap_or_else(|e| e.into_inner());
        if items.len() == self.capacity {
            items.pop_front();
        }
        items.push_back(Toast {
            kind,
            message: message.to_string(),
            raised_at: Instant::now(),
        });
    }

    /// Newest notification that has not expired yet.
    pub fn latest(&self) -> Option<Toast> {
        self.items
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .back()
            .filter(|t| t.raised_at.elapsed() < self.ttl)
            .cloned()
    }

    pub fn snapshot(&self) -> Vec<Toast> {
        self.items
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        self.items.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(5)
    }
}

impl Notifier for ToastQueue {
    fn notify_success(&self, message: &str) {
        tracing::info!(message, "notify success");
        self.push(ToastKind::Success, message);
    }

    fn notify_error(&self, message: &str) {
        tracing::warn!(message, "notify error");
        self.push(ToastKind::Error, message);
    }
}

/// Last requested route, taken by the event loop after each action.
#[derive(Debug, Default)]
pub struct RouteRequests {
    pending: Mutex<Option<Route>>,
}

impl RouteRequests {
    pub fn take(&self) -> Option<Route> {
        self.pending.lock().unwrap_or_else(|e| e.into_inner()).take()
    }
}

impl Navigator for RouteRequests {
    fn go_to(&self, route: Route) {
        tracing::debug!(path = %route.path(), "navigation requested");
        *self.pending.lock().unwrap_or_else(|e| e.into_inner()) = Some(route);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_queue_drops_oldest_when_full() {
        let q = ToastQueue::new(2);
        q.notify_success("one");
        q.notify_error("two");
        q.notify_success("three");
        let all = q.snapshot();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].message, "two");
        assert_eq!(q.latest().map(|t| t.kind), Some(ToastKind::Success));
    }

    #[test]
    fn expired_toasts_are_not_shown() {
        let q = ToastQueue::with_ttl(3, Duration::ZERO);
        q.notify_error("Failed to fetch users");
        assert_eq!(q.latest(), None);
        assert_eq!(q.snapshot().len(), 1);

        let q = ToastQueue::default();
        q.notify_success("Users refreshed!");
        assert_eq!(q.latest().map(|t| t.message), Some("Users refreshed!".to_string()));
        q.clear();
        assert_eq!(q.latest(), None);
    }

    #[test]
    fn route_requests_keep_only_the_last() {
        let nav = RouteRequests::default();
        nav.go_to(Route::AddUser);
        nav.go_to(Route::EditUser(UserId::new("9")));
        assert_eq!(nav.take(), Some(Route::EditUser(UserId::new("9"))));
        assert_eq!(nav.take(), None);
    }

    #[test]
    fn closures_act_as_confirmation_gates() {
        let yes = |_: &str| true;
        assert!(yes.confirm("Delete?"));
        assert_eq!(Route::EditUser(UserId::new("4")).path(), "/edit-user/4");
    }
}
