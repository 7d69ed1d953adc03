//! Per-route access requirements and the table that holds them.

use std::collections::{BTreeSet, HashMap, HashSet};

use storefront_entity::account::AccountRole;

/// Access requirement declared for a route at registration time.
///
/// `public` routes skip both gates. A non-public route with an empty `roles`
/// set admits any authenticated identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteRequirement {
    /// Reachable without a token.
    pub public: bool,
    /// Roles admitted; empty means any role.
    pub roles: BTreeSet<AccountRole>,
}

impl RouteRequirement {
    /// A route anyone may call.
    pub fn public() -> Self {
        Self {
            public: true,
            roles: BTreeSet::new(),
        }
    }

    /// A route any authenticated identity may call.
    pub fn authenticated() -> Self {
        Self::default()
    }

    /// A route restricted to the given roles.
    pub fn with_roles(roles: impl IntoIterator<Item = AccountRole>) -> Self {
        Self {
            public: false,
            roles: roles.into_iter().collect(),
        }
    }

    /// Whether `role` satisfies this requirement.
    pub fn admits(&self, role: AccountRole) -> bool {
        self.roles.is_empty() || self.roles.contains(&role)
    }
}

/// Route registration table keyed by HTTP method and path template.
///
/// `HEAD` resolves to the `GET` declaration of the same path. Routes that
/// were never declared resolve to [`RouteRequirement::authenticated`].
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    entries: HashMap<(String, String), RouteRequirement>,
    paths: HashSet<String>,
}

impl RouteTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares the requirement for `method` + `path`, replacing any earlier one.
    pub fn declare(&mut self, method: &str, path: &str, requirement: RouteRequirement) {
        self.paths.insert(path.to_string());
        self.entries.insert(
            (method.to_ascii_uppercase(), path.to_string()),
            requirement,
        );
    }

    /// Returns the declared requirement for `method` + `path`, if any.
    pub fn lookup(&self, method: &str, path: &str) -> Option<&RouteRequirement> {
        let mut method = method.to_ascii_uppercase();
        if method == "HEAD" {
            method = "GET".to_string();
        }
        self.entries.get(&(method, path.to_string()))
    }

    /// Looks up the requirement for `method` + `path`, defaulting to
    /// authenticated when nothing was declared.
    pub fn requirement(&self, method: &str, path: &str) -> RouteRequirement {
        self.lookup(method, path).cloned().unwrap_or_default()
    }

    /// Whether any method was declared for `path`.
    pub fn has_path(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    /// Number of declared routes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no routes are declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
