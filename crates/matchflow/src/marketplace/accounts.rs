//! In-memory account directory for the demo login screen.
//!
//! Users live only as long as the directory value does. This is not an authentication layer:
//! credentials are compared verbatim and nothing is persisted.

use serde::Serialize;
use tracing::info;

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
struct StoredAccount {
    name: String,
    email: String,
    password: String,
}

/// Public view of a registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserAccount {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountError {
    #[error("Please fill all fields")]
    MissingFields,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
    #[error("Email already registered")]
    EmailTaken,
    #[error("Please enter email and password")]
    MissingCredentials,
    #[error("No users found. Please Sign Up first.")]
    NoUsers,
    #[error("Invalid email or password")]
    InvalidCredentials,
}

#[derive(Debug, Default)]
pub struct AccountDirectory {
    accounts: Vec<StoredAccount>,
    current: Option<usize>,
}

impl AccountDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Register a user. Name and email are trimmed and the email is lowercased.
    pub fn sign_up(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<UserAccount, AccountError> {
        let name = name.trim();
        let email = email.trim().to_lowercase();

        if name.is_empty()
            || email.is_empty()
            || password.is_empty()
            || confirm_password.is_empty()
        {
            return Err(AccountError::MissingFields);
        }
        if password != confirm_password {
            return Err(AccountError::PasswordMismatch);
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AccountError::PasswordTooShort);
        }
        if self.accounts.iter().any(|account| account.email == email) {
            return Err(AccountError::EmailTaken);
        }

        let account = StoredAccount {
            name: name.to_string(),
            email,
            password: password.to_string(),
        };
        let view = UserAccount {
            name: account.name.clone(),
            email: account.email.clone(),
        };
        self.accounts.push(account);
        info!(email = %view.email, "account registered");
        Ok(view)
    }

    pub fn log_in(&mut self, email: &str, password: &str) -> Result<UserAccount, AccountError> {
        let email = email.trim().to_lowercase();
        if email.is_empty() || password.is_empty() {
            return Err(AccountError::MissingCredentials);
        }

        let position = self
            .accounts
            .iter()
            .position(|account| account.email == email && account.password == password);

        match position {
            Some(index) => {
                self.current = Some(index);
                info!(%email, "account logged in");
                Ok(self.view(index))
            }
            None if self.accounts.is_empty() => Err(AccountError::NoUsers),
            None => Err(AccountError::InvalidCredentials),
        }
    }

    pub fn log_out(&mut self) {
        self.current = None;
    }

    pub fn current_user(&self) -> Option<UserAccount> {
        self.current.map(|index| self.view(index))
    }

    fn view(&self, index: usize) -> UserAccount {
        let account = &self.accounts[index];
        UserAccount {
            name: account.name.clone(),
            email: account.email.clone(),
        }
    }
}
