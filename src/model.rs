//! Records exchanged with the remote directory and the editable form draft.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Opaque identifier assigned by the remote store.
///
/// The store may send ids as JSON strings (document ids) or numbers; both are
/// kept as text so identity comparison stays exact.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(i64),
        }
        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => Self(s),
            Raw::Number(n) => Self(n.to_string()),
        })
    }
}

/// A person record as returned by the remote store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawUser")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub age: u32,
    pub profession: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Wire shape of [`User`]. Document stores may send `_id`, `id` or both
/// (virtual ids); `_id` wins when both are present.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawUser {
    #[serde(rename = "_id", default)]
    doc_id: Option<UserId>,
    #[serde(default)]
    id: Option<UserId>,
    name: String,
    email: String,
    age: u32,
    profession: String,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
}

impl TryFrom<RawUser> for User {
    type Error = String;

    fn try_from(raw: RawUser) -> Result<Self, Self::Error> {
        let id = raw
            .doc_id
            .or(raw.id)
            .ok_or_else(|| "user record has neither `_id` nor `id`".to_string())?;
        Ok(Self {
            id,
            name: raw.name,
            email: raw.email,
            age: raw.age,
            profession: raw.profession,
            created_at: raw.created_at,
            updated_at: raw.updated_at,
        })
    }
}

impl User {
    /// Upper-cased first letter of the name, shown as the avatar.
    pub fn initial(&self) -> Option<char> {
        self.name.chars().next().and_then(|c| c.to_uppercase().next())
    }
}

/// Editable fields of a user, in form order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Name,
    Email,
    Age,
    Profession,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Age, Field::Profession];

    /// Key used in drafts, payloads and structured server errors.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Age => "age",
            Field::Profession => "profession",
        }
    }

    /// Form label.
    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Full Name",
            Field::Email => "Email Address",
            Field::Age => "Age",
            Field::Profession => "Profession",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Field::Name),
            "email" => Ok(Field::Email),
            "age" => Ok(Field::Age),
            "profession" => Ok(Field::Profession),
            other => Err(format!("unknown field '{other}'")),
        }
    }
}

/// In-progress edit of a user's fields. `age` stays raw text until submit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Draft {
    pub name: String,
    pub email: String,
    pub age: String,
    pub profession: String,
}

impl Draft {
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            age: user.age.to_string(),
            profession: user.profession.clone(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Age => &self.age,
            Field::Profession => &self.profession,
        }
    }

    pub fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Age => &mut self.age,
            Field::Profession => &mut self.profession,
        }
    }

    /// Body for create/update, or `None` when `age` is not an integer.
    pub fn to_payload(&self) -> Option<UserPayload> {
        Some(UserPayload {
            name: self.name.clone(),
            email: self.email.clone(),
            age: parse_age(&self.age)?,
            profession: self.profession.clone(),
        })
    }
}

/// Coerce the raw age text to an integer.
pub fn parse_age(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok()
}

/// Wire body of `POST /users` and `PUT /users/:id`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPayload {
    pub name: String,
    pub email: String,
    pub age: u32,
    pub profession: String,
}

/// Field name to message. Only failing fields are present.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn remove(&mut self, field: Field) -> Option<String> {
        self.0.remove(&field)
    }

    /// Entries of `other` replace existing ones for the same field.
    pub fn merge(&mut self, other: FieldErrors) {
        self.0.extend(other.0);
    }
}
