//! # Resources
//!
//! Defines the resources statements are written against.
//!
//! Two shapes exist:
//! - **Endpoint**: a bare `(method, path)` pair, e.g. `GET:/example`
//! - **Environment endpoint**: an endpoint scoped to a deployment
//!   environment, e.g. `PROD:GET:/example`
//!
//! Matching is exact. A resource only ever matches a resource of the same
//! shape whose fields are all equal; paths are compared byte for byte with
//! no prefix, wildcard or case folding.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RbacError;

/// Deployment environment a resource is scoped to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Env {
    /// Development environment.
    Dev,
    /// Production environment.
    Prod,
}

impl Env {
    /// Get the string representation of the environment.
    pub fn as_str(&self) -> &'static str {
        match self {
            Env::Dev => "DEV",
            Env::Prod => "PROD",
        }
    }
}

impl fmt::Display for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HTTP method of an endpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    /// `GET`
    Get,
    /// `HEAD`
    Head,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
    /// `OPTIONS`
    Options,
}

impl Method {
    /// Get the string representation of the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Options => "OPTIONS",
        }
    }

    /// Parse a method from its transport form.
    ///
    /// Methods are case-sensitive, as on the wire.
    ///
    /// # Example
    ///
    /// ```
    /// use warden_rbac::resources::Method;
    ///
    /// assert_eq!(Method::parse("GET"), Some(Method::Get));
    /// assert_eq!(Method::parse("get"), None);
    /// assert_eq!(Method::parse("BREW"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "GET" => Some(Method::Get),
            "HEAD" => Some(Method::Head),
            "POST" => Some(Method::Post),
            "PUT" => Some(Method::Put),
            "PATCH" => Some(Method::Patch),
            "DELETE" => Some(Method::Delete),
            "OPTIONS" => Some(Method::Options),
            _ => None,
        }
    }
}

impl FromStr for Method {
    type Err = RbacError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::parse(s).ok_or_else(|| RbacError::UnknownMethod(s.to_string()))
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bare endpoint: method plus path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct EndpointResource {
    /// HTTP method.
    pub method: Method,
    /// Request path, compared exactly.
    pub path: String,
}

impl EndpointResource {
    /// Create a new endpoint resource.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
        }
    }
}

impl fmt::Display for EndpointResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.method, self.path)
    }
}

/// A resource a statement applies to.
///
/// # Example
///
/// ```
/// use warden_rbac::resources::{Env, Method, Resource};
///
/// let scoped = Resource::env_endpoint(Env::Prod, Method::Get, "/example");
/// assert_eq!(scoped.to_string(), "PROD:GET:/example");
///
/// // Different shapes never match, even with the same method and path.
/// let bare = Resource::endpoint(Method::Get, "/example");
/// assert!(!scoped.matches(&bare));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Resource {
    /// Endpoint with no environment scope.
    Endpoint(EndpointResource),

    /// Endpoint scoped to an environment.
    EnvEndpoint {
        /// Environment the endpoint lives in.
        env: Env,
        /// The scoped endpoint.
        endpoint: EndpointResource,
    },
}

impl Resource {
    /// Create a bare endpoint resource.
    pub fn endpoint(method: Method, path: impl Into<String>) -> Self {
        Resource::Endpoint(EndpointResource::new(method, path))
    }

    /// Create an environment-scoped endpoint resource.
    pub fn env_endpoint(env: Env, method: Method, path: impl Into<String>) -> Self {
        Resource::EnvEndpoint {
            env,
            endpoint: EndpointResource::new(method, path),
        }
    }

    /// Check whether this resource matches another.
    ///
    /// Returns `true` only if both are the same shape and every field is
    /// equal. Shape mismatches return `false`.
    pub fn matches(&self, other: &Resource) -> bool {
        match (self, other) {
            (Resource::Endpoint(a), Resource::Endpoint(b)) => a == b,
            (
                Resource::EnvEndpoint { env: env_a, endpoint: a },
                Resource::EnvEndpoint { env: env_b, endpoint: b },
            ) => env_a == env_b && a == b,
            _ => false,
        }
    }

    /// The endpoint this resource refers to, regardless of scope.
    pub fn endpoint_ref(&self) -> &EndpointResource {
        match self {
            Resource::Endpoint(endpoint) => endpoint,
            Resource::EnvEndpoint { endpoint, .. } => endpoint,
        }
    }

    /// The environment scope, if any.
    pub fn env(&self) -> Option<Env> {
        match self {
            Resource::Endpoint(_) => None,
            Resource::EnvEndpoint { env, .. } => Some(*env),
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Endpoint(endpoint) => write!(f, "{}", endpoint),
            Resource::EnvEndpoint { env, endpoint } => write!(f, "{}:{}", env, endpoint),
        }
    }
}
