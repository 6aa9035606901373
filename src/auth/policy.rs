//! Route admission rules.
//!
//! A static, ordered table of path-prefix rules consulted once per request,
//! after the token gate has (or has not) attached a principal. Pure data and
//! a pure matcher: the table never changes after startup and the decision
//! depends only on the path and the attached role.

use crate::models::UserRole;

/// What a route prefix requires of the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Admitted regardless of authentication state.
    Public,
    /// Admitted only with this exact role.
    Role(UserRole),
    /// Admitted with any attached principal.
    Authenticated,
}

/// One row of the admission table.
#[derive(Debug)]
pub struct AccessRule {
    pub prefix: &'static str,
    pub requirement: Requirement,
}

/// The admission table, most specific prefix first; the first matching row
/// wins. Paths matching no row fall through to [`DEFAULT_REQUIREMENT`].
pub const ACCESS_RULES: &[AccessRule] = &[
    AccessRule {
        prefix: "/api/auth",
        requirement: Requirement::Public,
    },
    AccessRule {
        prefix: "/api/admin",
        requirement: Requirement::Role(UserRole::Admin),
    },
    AccessRule {
        prefix: "/api/employee",
        requirement: Requirement::Role(UserRole::Employee),
    },
];

/// Any route not named in the table still requires an authenticated caller.
pub const DEFAULT_REQUIREMENT: Requirement = Requirement::Authenticated;

/// Outcome of consulting the admission table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    Deny(DenyReason),
}

/// The two deny outcomes are deliberately distinguishable: 401 tells the
/// caller to authenticate, 403 tells an authenticated caller its role does
/// not reach this route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    Unauthenticated,
    Forbidden,
}

/// Decides whether a request may proceed to routing.
pub fn admit(path: &str, role: Option<UserRole>) -> AccessDecision {
    let requirement = ACCESS_RULES
        .iter()
        .find(|rule| path.starts_with(rule.prefix))
        .map(|rule| rule.requirement)
        .unwrap_or(DEFAULT_REQUIREMENT);

    match requirement {
        Requirement::Public => AccessDecision::Allow,
        Requirement::Role(required) => match role {
            Some(actual) if actual == required => AccessDecision::Allow,
            Some(_) => AccessDecision::Deny(DenyReason::Forbidden),
            None => AccessDecision::Deny(DenyReason::Unauthenticated),
        },
        Requirement::Authenticated => match role {
            Some(_) => AccessDecision::Allow,
            None => AccessDecision::Deny(DenyReason::Unauthenticated),
        },
    }
}
