//! User Entity
//!
//! A row of the `users` table. The id is assigned by the database, so a user
//! that has not been inserted yet is a `NewUser`.

use kernel::id::UserId;

use crate::domain::value_object::{Email, UserName, UserPassword};

#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: UserName,
    pub email: Email,
    pub password: UserPassword,
}

/// Validated sign-up data, ready for `INSERT INTO users`
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: UserName,
    pub email: Email,
    pub password: UserPassword,
}

impl NewUser {
    pub fn new(name: UserName, email: Email, password: UserPassword) -> Self {
        Self {
            name,
            email,
            password,
        }
    }

    /// Attach the id returned by the insert
    pub fn with_id(self, id: UserId) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            password: self.password,
        }
    }
}
