//! User directory DTOs and migrations
//!
//! ## Version History
//! - **1.0.0**: Users keyed by email, plaintext password

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use version_migrate::{FromDomain, IntoDomain, Versioned};

use tape_core::auth::{User, UserDirectory};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserV1_0_0 {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub created_at: String,
    #[serde(default)]
    pub avatar_url: String,
}

impl From<&User> for UserV1_0_0 {
    fn from(user: &User) -> Self {
        UserV1_0_0 {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            password: user.password.clone(),
            created_at: user.created_at.clone(),
            avatar_url: user.avatar_url.clone(),
        }
    }
}

impl From<UserV1_0_0> for User {
    fn from(dto: UserV1_0_0) -> Self {
        let avatar_url = if dto.avatar_url.is_empty() {
            tape_core::auth::avatar_url(&dto.name)
        } else {
            dto.avatar_url
        };
        User {
            id: dto.id,
            name: dto.name,
            email: dto.email,
            password: dto.password,
            created_at: dto.created_at,
            avatar_url,
        }
    }
}

/// User directory DTO V1.0.0
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
pub struct UserDirectoryV1_0_0 {
    /// Email to user record.
    #[serde(default)]
    pub users: BTreeMap<String, UserV1_0_0>,
}

impl IntoDomain<UserDirectory> for UserDirectoryV1_0_0 {
    fn into_domain(self) -> UserDirectory {
        self.users.into_values().map(User::from).collect()
    }
}

impl FromDomain<UserDirectory> for UserDirectoryV1_0_0 {
    fn from_domain(directory: UserDirectory) -> Self {
        UserDirectoryV1_0_0 {
            users: directory
                .users()
                .map(|user| (user.email.clone(), user.into()))
                .collect(),
        }
    }
}

/// Creates a Migrator for the user directory.
pub fn create_user_directory_migrator() -> version_migrate::Migrator {
    version_migrate::migrator!("user_directory" => [
        UserDirectoryV1_0_0,
        UserDirectory
    ], save = true)
    .expect("Failed to create user_directory migrator")
}
