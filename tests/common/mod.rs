//! Shared fakes for controller and app tests.
#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use userdir_manager::controller::Collaborators;
use userdir_manager::sinks::{Navigator, Notifier, Route};
use userdir_manager::{ApiError, ApiResult, User, UserApi, UserId, UserPayload};

pub fn user(id: &str, name: &str, email: &str, age: u32, profession: &str) -> User {
    User {
        id: UserId::new(id),
        name: name.to_string(),
        email: email.to_string(),
        age,
        profession: profession.to_string(),
        created_at: None,
        updated_at: None,
    }
}

pub fn sample_users() -> Vec<User> {
    vec![
        user("1", "Ann", "ann@x.io", 30, "Dev"),
        user("2", "Bob", "bob@y.io", 41, "Chef"),
    ]
}

/// In-memory directory. Queued failures are returned by the next call of
/// any operation instead of touching the store.
#[derive(Default)]
pub struct FakeApi {
    pub store: Mutex<Vec<User>>,
    pub failures: Mutex<VecDeque<ApiError>>,
    pub calls: Mutex<Vec<String>>,
    pub next_id: Mutex<u32>,
}

impl FakeApi {
    pub fn with_users(users: Vec<User>) -> Arc<Self> {
        Arc::new(Self {
            store: Mutex::new(users),
            next_id: Mutex::new(100),
            ..Default::default()
        })
    }

    pub fn fail_next(&self, err: ApiError) {
        self.failures.lock().unwrap().push_back(err);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> ApiResult<()> {
        self.calls.lock().unwrap().push(call);
        match self.failures.lock().unwrap().pop_front() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn from_payload(id: UserId, p: &UserPayload) -> User {
    User {
        id,
        name: p.name.clone(),
        email: p.email.clone(),
        age: p.age,
        profession: p.profession.clone(),
        created_at: None,
        updated_at: None,
    }
}

#[async_trait]
impl UserApi for FakeApi {
    async fn list_users(&self) -> ApiResult<Vec<User>> {
        self.record("list".to_string())?;
        Ok(self.store.lock().unwrap().clone())
    }

    async fn get_user(&self, id: &UserId) -> ApiResult<User> {
        self.record(format!("get {id}"))?;
        self.store
            .lock()
            .unwrap()
            .iter()
            .find(|u| &u.id == id)
            .cloned()
            .ok_or(ApiError::NotFound { message: None })
    }

    async fn create_user(&self, payload: &UserPayload) -> ApiResult<User> {
        self.record("create".to_string())?;
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        let created = from_payload(UserId::new(next.to_string()), payload);
        self.store.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update_user(&self, id: &UserId, payload: &UserPayload) -> ApiResult<User> {
        self.record(format!("update {id}"))?;
        let mut store = self.store.lock().unwrap();
        let slot = store
            .iter_mut()
            .find(|u| &u.id == id)
            .ok_or(ApiError::NotFound { message: None })?;
        *slot = from_payload(id.clone(), payload);
        Ok(slot.clone())
    }

    async fn delete_user(&self, id: &UserId) -> ApiResult<()> {
        self.record(format!("delete {id}"))?;
        self.store.lock().unwrap().retain(|u| &u.id != id);
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Note {
    Success(String),
    Error(String),
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub notes: Mutex<Vec<Note>>,
}

impl RecordingNotifier {
    pub fn notes(&self) -> Vec<Note> {
        self.notes.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify_success(&self, message: &str) {
        self.notes.lock().unwrap().push(Note::Success(message.to_string()));
    }

    fn notify_error(&self, message: &str) {
        self.notes.lock().unwrap().push(Note::Error(message.to_string()));
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    pub routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn go_to(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }
}

pub struct Harness {
    pub api: Arc<FakeApi>,
    pub notifier: Arc<RecordingNotifier>,
    pub navigator: Arc<RecordingNavigator>,
}

impl Harness {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            api: FakeApi::with_users(users),
            notifier: Arc::new(RecordingNotifier::default()),
            navigator: Arc::new(RecordingNavigator::default()),
        }
    }

    pub fn collab(&self) -> Collaborators {
        Collaborators::new(self.api.clone(), self.notifier.clone(), self.navigator.clone())
    }
}
