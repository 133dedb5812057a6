use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identifier of a remote user.
///
/// The remote serves ids either as JSON numbers or as numeric strings,
/// both decode to the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(u64),
            Text(String),
        }

        match RawId::deserialize(deserializer)? {
            RawId::Number(id) => Ok(UserId(id)),
            RawId::Text(text) => text
                .trim()
                .parse::<u64>()
                .map(UserId)
                .map_err(|_| serde::de::Error::custom(format!("invalid user id '{}'", text))),
        }
    }
}

/// A user record as delivered by the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    #[serde(default)]
    pub email: String,
    /// Avatar image URL. Not rendered in the terminal, kept for completeness.
    #[serde(default)]
    pub avatar: String,
}

impl User {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id: UserId(id),
            name: name.into(),
            email: String::new(),
            avatar: String::new(),
        }
    }
}
