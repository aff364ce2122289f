//! Value objects of the domain layer.
//!
//! Identifiers arriving from the network are plain strings; they are wrapped
//! here once, at the boundary, so that the rest of the server never has to
//! re-validate them.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::error::ValueObjectError;

/// Upper bound for identifiers and display names supplied by clients.
pub const MAX_IDENTIFIER_LENGTH: usize = 128;

/// Length of a human-shareable room join code.
pub const ROOM_CODE_LENGTH: usize = 6;

const ROOM_CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Defines a non-empty, length-bounded string newtype.
macro_rules! string_value_object {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            pub fn new(value: String) -> Result<Self, ValueObjectError> {
                if value.trim().is_empty() {
                    return Err(ValueObjectError::Empty($field));
                }
                if value.chars().count() > MAX_IDENTIFIER_LENGTH {
                    return Err(ValueObjectError::TooLong {
                        field: $field,
                        max: MAX_IDENTIFIER_LENGTH,
                    });
                }
                Ok(Self(value))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValueObjectError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_value_object!(
    /// Transport-assigned identifier of one live connection.
    ConnectionId,
    "connection_id"
);

string_value_object!(
    /// Durable identifier of a user account.
    UserId,
    "user_id"
);

string_value_object!(
    /// Display name of a user.
    Username,
    "username"
);

string_value_object!(
    /// Durable identifier of a room.
    RoomId,
    "room_id"
);

string_value_object!(
    /// Human-readable room name chosen by its creator.
    RoomName,
    "room_name"
);

string_value_object!(
    /// Server-assigned identifier of a chat message.
    MessageId,
    "message_id"
);

impl ConnectionId {
    /// Generate a fresh random connection identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl UserId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl RoomId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl MessageId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

/// Six character join code made of `A-Z` and `0-9`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoomCode(String);

impl RoomCode {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let normalized = value.trim().to_ascii_uppercase();
        if normalized.is_empty() {
            return Err(ValueObjectError::Empty("room_code"));
        }
        let well_formed = normalized.len() == ROOM_CODE_LENGTH
            && normalized.bytes().all(|b| ROOM_CODE_ALPHABET.contains(&b));
        if !well_formed {
            return Err(ValueObjectError::Invalid {
                field: "room_code",
                reason: format!("expected {ROOM_CODE_LENGTH} characters of A-Z or 0-9"),
            });
        }
        Ok(Self(normalized))
    }

    /// Draw a random code from `rng`.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let code = (0..ROOM_CODE_LENGTH)
            .map(|_| {
                let index = rng.gen_range(0..ROOM_CODE_ALPHABET.len());
                char::from(ROOM_CODE_ALPHABET[index])
            })
            .collect();
        Self(code)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RoomCode {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RoomCode> for String {
    fn from(value: RoomCode) -> Self {
        value.0
    }
}

/// E-mail address used as the login name of an account.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValueObjectError::Empty("email"));
        }
        match trimmed.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
                Ok(Self(trimmed.to_string()))
            }
            _ => Err(ValueObjectError::Invalid {
                field: "email",
                reason: "expected an address of the form name@domain".to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Unix timestamp in UTC milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// Milliseconds elapsed from `earlier` to `self`, saturating at zero.
    pub fn millis_since(&self, earlier: Timestamp) -> u64 {
        u64::try_from(self.0.saturating_sub(earlier.0)).unwrap_or(0)
    }
}
