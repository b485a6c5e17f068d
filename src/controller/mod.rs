//! Stateful coordinators between the screens and the user data client.

pub mod form;
pub mod list;

pub use form::{FormController, FormMode, SubmitOutcome, attribute_message, attribute_server_errors};
pub use list::{ListController, LoadResolution, LoadTicket, RemoveOutcome};

use std::sync::Arc;

use crate::api::UserApi;
use crate::sinks::{Navigator, Notifier};

/// Dependencies injected into every controller.
#[derive(Clone)]
pub struct Collaborators {
    pub api: Arc<dyn UserApi>,
    pub notifier: Arc<dyn Notifier>,
    pub navigator: Arc<dyn Navigator>,
}

impl Collaborators {
    pub fn new(api: Arc<dyn UserApi>, notifier: Arc<dyn Notifier>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            api,
            notifier,
            navigator,
        }
    }
}
