//! User and session models.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const AVATAR_BASE_URL: &str = "https://ui-avatars.com/api/";

/// A registered account.
///
/// The password is stored as given: there is no hashing or salting. Local
/// accounts here only separate display identities and are not a security
/// boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub created_at: String,
    pub avatar_url: String,
}

impl User {
    pub fn new(name: &str, email: &str, password: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            avatar_url: avatar_url(name),
        }
    }
}

/// The signed-in user, without the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: String,
    pub avatar_url: String,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            created_at: user.created_at.clone(),
            avatar_url: user.avatar_url.clone(),
        }
    }
}

/// All accounts, keyed by email. At most one user per email.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserDirectory {
    users: BTreeMap<String, User>,
}

impl UserDirectory {
    pub fn get(&self, email: &str) -> Option<&User> {
        self.users.get(email)
    }

    pub fn contains(&self, email: &str) -> bool {
        self.users.contains_key(email)
    }

    /// Inserts a user unless the email is taken. Returns whether it was added.
    pub fn insert(&mut self, user: User) -> bool {
        if self.users.contains_key(&user.email) {
            return false;
        }
        self.users.insert(user.email.clone(), user);
        true
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }
}

impl FromIterator<User> for UserDirectory {
    fn from_iter<I: IntoIterator<Item = User>>(iter: I) -> Self {
        let mut directory = Self::default();
        for user in iter {
            directory.insert(user);
        }
        directory
    }
}

/// Generated initials avatar for a display name.
pub fn avatar_url(name: &str) -> String {
    let encoded: String = name
        .trim()
        .chars()
        .map(|c| match c {
            ' ' => "+".to_string(),
            c if c.is_ascii_alphanumeric() || "-_.~".contains(c) => c.to_string(),
            c => {
                let mut buf = [0u8; 4];
                c.encode_utf8(&mut buf)
                    .bytes()
                    .map(|b| format!("%{:02X}", b))
                    .collect()
            }
        })
        .collect();
    format!("{}?name={}&background=random", AVATAR_BASE_URL, encoded)
}
