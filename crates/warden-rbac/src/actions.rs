//! # Actions
//!
//! Defines the CRUD actions a statement can grant or deny.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::resources::Method;

/// Actions that can be performed on resources.
///
/// - **Create**: Create new resource instances
/// - **Read**: View/access resource data
/// - **Update**: Modify existing resource data
/// - **Delete**: Remove resource instances
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    /// Create new resource.
    Create,

    /// Read/view resource.
    Read,

    /// Update existing resource.
    Update,

    /// Delete resource.
    Delete,
}

impl Action {
    /// Get the string representation of the action.
    ///
    /// # Returns
    ///
    /// A static uppercase string, used in statement identities.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "CREATE",
            Action::Read => "READ",
            Action::Update => "UPDATE",
            Action::Delete => "DELETE",
        }
    }

    /// Check whether this action matches another.
    ///
    /// Actions match only when they are identical; no action implies another.
    ///
    /// # Example
    ///
    /// ```
    /// use warden_rbac::actions::Action;
    ///
    /// assert!(Action::Read.matches(&Action::Read));
    /// assert!(!Action::Update.matches(&Action::Read));
    /// ```
    pub fn matches(&self, other: &Action) -> bool {
        self == other
    }

    /// Derive the action a request with the given method performs.
    ///
    /// - `POST` creates
    /// - `PUT` and `PATCH` update
    /// - `DELETE` deletes
    /// - everything else reads
    ///
    /// This is finer than the older POST-creates, everything-else-reads
    /// mapping. Stored roles written under that mapping (for example
    /// `DELETE:/x` granted as `READ`) will not match requests built here.
    pub fn for_method(method: Method) -> Self {
        match method {
            Method::Post => Action::Create,
            Method::Put | Method::Patch => Action::Update,
            Method::Delete => Action::Delete,
            Method::Get | Method::Head | Method::Options => Action::Read,
        }
    }

    /// Get all actions.
    pub fn all() -> Vec<Self> {
        vec![Action::Create, Action::Read, Action::Update, Action::Delete]
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
