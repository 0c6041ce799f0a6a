use std::fmt;

use chrono::DateTime;
use chrono::Utc;

/// Sentinel identifier for a user that has not been persisted yet.
///
/// The registry assigns the real identifier at creation time; it is
/// immutable afterwards.
pub const UNASSIGNED_ID: i64 = -1;

/// Account role reference set.
///
/// Fixed enumeration with stable numeric codes; roles are never created at
/// runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Worker,
    Office,
    Company,
    Admin,
}

impl Role {
    /// Stable numeric code used for storage.
    ///
    /// # Returns
    /// Role code (0-3)
    pub fn code(self) -> i16 {
        match self {
            Role::Worker => 0,
            Role::Office => 1,
            Role::Company => 2,
            Role::Admin => 3,
        }
    }

    /// Resolve a role from its stored numeric code.
    ///
    /// # Arguments
    /// * `code` - Stored role code
    ///
    /// # Returns
    /// The role, or None for an unknown code
    pub fn from_code(code: i16) -> Option<Self> {
        match code {
            0 => Some(Role::Worker),
            1 => Some(Role::Office),
            2 => Some(Role::Company),
            3 => Some(Role::Admin),
            _ => None,
        }
    }

    /// Display name of the role.
    pub fn name(self) -> &'static str {
        match self {
            Role::Worker => "Worker",
            Role::Office => "Office",
            Role::Company => "Company",
            Role::Admin => "Admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Opaque login identifier produced by the credential codec.
///
/// The registry only ever sees logins in this form; plaintext never crosses
/// its boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EncodedLogin(String);

impl EncodedLogin {
    /// Wrap an already-encoded login identifier.
    pub fn new(encoded: String) -> Self {
        Self(encoded)
    }

    /// Get the encoded identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EncodedLogin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Opaque credential token binding a login and password together.
///
/// Compared by equality during verification; the plaintext password is not
/// recoverable from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialToken(String);

impl CredentialToken {
    /// Wrap an already-encoded credential token.
    pub fn new(encoded: String) -> Self {
        Self(encoded)
    }

    /// Get the encoded token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// User identity record.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub login: EncodedLogin,
    pub credential: CredentialToken,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Build a user that has not been persisted yet.
    ///
    /// # Arguments
    /// * `login` - Encoded login identifier
    /// * `credential` - Encoded credential token
    /// * `role` - Role the account is scoped to
    ///
    /// # Returns
    /// User carrying the unassigned-identifier sentinel
    pub fn unsaved(login: EncodedLogin, credential: CredentialToken, role: Role) -> Self {
        Self {
            id: UNASSIGNED_ID,
            login,
            credential,
            role,
            created_at: Utc::now(),
        }
    }
}

/// Worker membership row: associates a user with the office it works in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Worker {
    pub user_id: i64,
    pub office_id: i64,
}

/// Office entity; belongs to exactly one company.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Office {
    pub id: i64,
    pub company_id: i64,
}

/// Top-level organizational entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Company {
    pub id: i64,
}

/// Role-scoped membership written alongside a user row.
///
/// Company and Admin registrations write no link row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleLink {
    Worker { office_id: i64 },
    Office { office_id: i64 },
}

/// Command to register a new account.
#[derive(Debug, Clone)]
pub struct RegisterCommand {
    pub login: String,
    pub password: String,
    pub role: Option<Role>,
    pub office_id: Option<i64>,
    pub company_id: Option<i64>,
}

impl RegisterCommand {
    /// Registration without a role or organizational attachment.
    ///
    /// # Arguments
    /// * `login` - Plaintext login
    /// * `password` - Plaintext password
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password: password.into(),
            role: None,
            office_id: None,
            company_id: None,
        }
    }

    /// Scope the registration to a role.
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// Attach an office reference.
    pub fn with_office_id(mut self, office_id: i64) -> Self {
        self.office_id = Some(office_id);
        self
    }

    /// Attach a company reference.
    pub fn with_company_id(mut self, company_id: i64) -> Self {
        self.company_id = Some(company_id);
        self
    }
}
