//! Per-resource access rules.
//!
//! The table is built once from configuration and handed to handlers as application
//! data; every request evaluates it against the caller without touching shared state.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::types::error::AppError;
use crate::utils::webutils::Caller;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Resource {
    Users,
    Doctors,
    Availabilities,
    Appointments,
    Reviews,
}

impl Resource {
    pub const ALL: [Resource; 5] = [
        Resource::Users,
        Resource::Doctors,
        Resource::Availabilities,
        Resource::Appointments,
        Resource::Reviews,
    ];

    /// URL prefix the resource is mounted under.
    pub fn prefix(self) -> &'static str {
        match self {
            Resource::Users => "users",
            Resource::Doctors => "doctors",
            Resource::Availabilities => "availabilities",
            Resource::Appointments => "appointments",
            Resource::Reviews => "reviews",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    List,
    Retrieve,
    Create,
    Update,
    PartialUpdate,
    Destroy,
}

impl Operation {
    pub fn is_read(self) -> bool {
        matches!(self, Operation::List | Operation::Retrieve)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessRule {
    /// Anyone, authenticated or not.
    Open,
    /// Anyone may read; writes need an authenticated caller.
    ReadOpen,
    /// Every operation needs an authenticated caller.
    Gated,
}

impl AccessRule {
    pub fn permits(self, operation: Operation, authenticated: bool) -> bool {
        match self {
            AccessRule::Open => true,
            AccessRule::ReadOpen => authenticated || operation.is_read(),
            AccessRule::Gated => authenticated,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown value `{0}`")]
pub struct UnknownValue(String);

impl FromStr for AccessRule {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(AccessRule::Open),
            "read_open" => Ok(AccessRule::ReadOpen),
            "gated" => Ok(AccessRule::Gated),
            other => Err(UnknownValue(other.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PolicyProfile {
    /// Doctors and availabilities open, users and reviews read-open, appointments gated.
    #[default]
    Permissive,
    /// Users, availabilities and appointments gated; doctors and reviews read-open.
    Strict,
}

impl FromStr for PolicyProfile {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "permissive" => Ok(PolicyProfile::Permissive),
            "strict" => Ok(PolicyProfile::Strict),
            other => Err(UnknownValue(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PolicyTable {
    rules: HashMap<Resource, AccessRule>,
}

impl PolicyTable {
    pub fn for_profile(profile: PolicyProfile) -> Self {
        use AccessRule::*;
        use Resource::*;

        let rules = match profile {
            PolicyProfile::Permissive => [
                (Users, ReadOpen),
                (Doctors, Open),
                (Availabilities, Open),
                (Appointments, Gated),
                (Reviews, ReadOpen),
            ],
            PolicyProfile::Strict => [
                (Users, Gated),
                (Doctors, ReadOpen),
                (Availabilities, Gated),
                (Appointments, Gated),
                (Reviews, ReadOpen),
            ],
        };
        Self { rules: rules.into_iter().collect() }
    }

    pub fn with_rule(mut self, resource: Resource, rule: AccessRule) -> Self {
        self.rules.insert(resource, rule);
        self
    }

    /// Resources missing from the table are gated.
    pub fn rule(&self, resource: Resource) -> AccessRule {
        self.rules.get(&resource).copied().unwrap_or(AccessRule::Gated)
    }

    pub fn authorize(&self, resource: Resource, operation: Operation, caller: &Caller) -> Result<(), AppError> {
        if self.rule(resource).permits(operation, caller.is_authenticated()) {
            return Ok(());
        }
        tracing::debug!(resource = resource.prefix(), ?operation, "anonymous caller rejected");
        Err(AppError::Unauthorized(AppError::NOT_AUTHENTICATED))
    }
}

impl Default for PolicyTable {
    fn default() -> Self {
        Self::for_profile(PolicyProfile::default())
    }
}

impl fmt::Display for PolicyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, resource) in Resource::ALL.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={:?}", resource.prefix(), self.rule(*resource))?;
        }
        Ok(())
    }
}
