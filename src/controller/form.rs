//! State behind the add/edit screen: one draft, its errors and the submit cycle.

use tracing::{debug, info, warn};

use super::Collaborators;
use crate::error::{ApiError, ServerFieldError};
use crate::model::{Draft, Field, FieldErrors, User, UserId};
use crate::sinks::Route;
use crate::validation::validate;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(UserId),
}

impl FormMode {
    fn success_message(&self) -> &'static str {
        match self {
            FormMode::Create => "User created successfully!",
            FormMode::Edit(_) => "User updated successfully!",
        }
    }

    fn failure_message(&self) -> &'static str {
        match self {
            FormMode::Create => "Failed to create user",
            FormMode::Edit(_) => "Failed to update user",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SubmitOutcome {
    /// Local validation failed; nothing was sent.
    Invalid,
    Saved(User),
    /// The server refused or the request failed.
    Rejected,
}

/// Keywords searched in free-text server messages, in priority order.
const FIELD_KEYWORDS: [(&str, Field); 4] = [
    ("Email", Field::Email),
    ("Name", Field::Name),
    ("Age", Field::Age),
    ("Profession", Field::Profession),
];

/// Attribute a free-text server message to a field; first keyword wins.
pub fn attribute_message(message: &str) -> Option<Field> {
    FIELD_KEYWORDS
        .iter()
        .find(|(keyword, _)| message.contains(keyword))
        .map(|(_, field)| *field)
}

/// Map server validation entries onto form fields. Structured entries with a
/// known field name are taken as-is; everything else goes through
/// [`attribute_message`]. Unattributable messages are skipped.
pub fn attribute_server_errors(errors: &[ServerFieldError]) -> FieldErrors {
    let mut mapped = FieldErrors::new();
    for entry in errors {
        let field = match entry {
            ServerFieldError::Structured { field, message } => {
                field.parse::<Field>().ok().or_else(|| attribute_message(message))
            }
            ServerFieldError::Text(message) => attribute_message(message),
        };
        match field {
            Some(field) => mapped.insert(field, entry.message()),
            None => debug!(message = entry.message(), "server error not tied to a field"),
        }
    }
    mapped
}

pub struct FormController {
    collab: Collaborators,
    draft: Draft,
    field_errors: FieldErrors,
    submitting: bool,
}

impl FormController {
    /// Empty draft for the add screen.
    pub fn new(collab: Collaborators) -> Self {
        Self::with_draft(collab, Draft::default())
    }

    /// Draft seeded from an existing record for the edit screen.
    pub fn for_user(collab: Collaborators, user: &User) -> Self {
        Self::with_draft(collab, Draft::from_user(user))
    }

    pub fn with_draft(collab: Collaborators, draft: Draft) -> Self {
        Self {
            collab,
            draft,
            field_errors: FieldErrors::new(),
            submitting: false,
        }
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    pub fn submitting(&self) -> bool {
        self.submitting
    }

    /// Replace a field's value and drop its error without re-validating.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        *self.draft.get_mut(field) = value.into();
        self.field_errors.remove(field);
    }

    /// Validate, then create or update. `submitting` is cleared on every outcome.
    pub async fn submit(&mut self, mode: &FormMode) -> SubmitOutcome {
        self.field_errors = validate(&self.draft);
        let payload = match self.draft.to_payload() {
            Some(payload) if self.field_errors.is_empty() => payload,
            _ => {
                debug!(errors = self.field_errors.len(), "draft rejected locally");
                self.collab.notifier.notify_error("Please fix the errors in the form");
                return SubmitOutcome::Invalid;
            }
        };

        self.submitting = true;
        let result = match mode {
            FormMode::Create => self.collab.api.create_user(&payload).await,
            FormMode::Edit(id) => self.collab.api.update_user(id, &payload).await,
        };
        self.submitting = false;

        match result {
            Ok(user) => {
                info!(id = %user.id, "user saved");
                self.collab.notifier.notify_success(mode.success_message());
                self.collab.navigator.go_to(Route::Users);
                SubmitOutcome::Saved(user)
            }
            Err(ApiError::Validation { message, errors }) => {
                let mapped = attribute_server_errors(&errors);
                warn!(count = errors.len(), attributed = mapped.len(), "server rejected draft");
                if mapped.is_empty() {
                    let text = message.as_deref().unwrap_or(mode.failure_message());
                    self.collab.notifier.notify_error(text);
                } else {
                    self.field_errors.merge(mapped);
                }
                SubmitOutcome::Rejected
            }
            Err(e) => {
                warn!(error = %e, "submit failed");
                let text = e.user_message().unwrap_or(mode.failure_message());
                self.collab.notifier.notify_error(text);
                SubmitOutcome::Rejected
            }
        }
    }

    /// Abandon the draft and go back to the list.
    pub fn cancel(self) {
        self.collab.navigator.go_to(Route::Users);
    }
}
