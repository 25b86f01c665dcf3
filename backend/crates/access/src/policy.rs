//! Access Policy Engine
//!
//! Pure decision function over (principal, required role/branch/department).
//! Identical inputs always yield identical decisions; no I/O, no hidden
//! state. The scope-bypass hierarchy is data, not branching logic, so tests
//! can enumerate it exhaustively.

use kernel::id::{BranchId, DepartmentId};

use crate::principal::Principal;
use crate::role::Role;

/// A scoped dimension of the organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Branch,
    Department,
}

impl Scope {
    pub const fn code(&self) -> &'static str {
        match self {
            Scope::Branch => "branch",
            Scope::Department => "department",
        }
    }
}

/// Ordered scope rules: `(scope, roles exempt from that scope)`.
///
/// Branch is checked before department. This ordering and the bypass sets
/// are the authorization contract the rest of the platform depends on.
const SCOPE_RULES: &[(Scope, &[Role])] = &[
    (Scope::Branch, &[Role::Ceo, Role::Executive]),
    (
        Scope::Department,
        &[Role::Ceo, Role::Executive, Role::Manager],
    ),
];

/// What a route or operation requires of the caller.
#[derive(Debug, Clone, Default)]
pub struct AccessRequirement {
    pub roles: Option<Vec<Role>>,
    pub branch: Option<BranchId>,
    pub department: Option<DepartmentId>,
}

impl AccessRequirement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_roles(mut self, roles: impl Into<Vec<Role>>) -> Self {
        self.roles = Some(roles.into());
        self
    }

    pub fn with_branch(mut self, branch: BranchId) -> Self {
        self.branch = Some(branch);
        self
    }

    pub fn with_department(mut self, department: DepartmentId) -> Self {
        self.department = Some(department);
        self
    }

    /// Requirement for credential-reset administration.
    pub fn admin() -> Self {
        Self::new().with_roles([Role::Admin])
    }
}

/// Outcome of a policy evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    DenyUnauthenticated,
    DenyRole,
    DenyBranch,
    DenyDepartment,
}

impl Decision {
    #[inline]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    /// Human-readable reason, safe to return to the caller.
    pub const fn reason(&self) -> &'static str {
        match self {
            Decision::Allow => "Access granted",
            Decision::DenyUnauthenticated => "Authentication required",
            Decision::DenyRole => "Role is not permitted to perform this action",
            Decision::DenyBranch => "Resource belongs to a different branch",
            Decision::DenyDepartment => "Resource belongs to a different department",
        }
    }

    const fn deny_for(scope: Scope) -> Self {
        match scope {
            Scope::Branch => Decision::DenyBranch,
            Scope::Department => Decision::DenyDepartment,
        }
    }
}

/// Evaluate a requirement against an optional principal.
///
/// Checks run in order and the first failure wins:
/// 1. unauthenticated  2. role membership  3. branch scope  4. department
/// scope. Scope checks consult [`SCOPE_RULES`] for the exempt roles.
pub fn evaluate(principal: Option<&Principal>, requirement: &AccessRequirement) -> Decision {
    let Some(principal) = principal else {
        return Decision::DenyUnauthenticated;
    };

    if let Some(roles) = &requirement.roles {
        if !roles.contains(&principal.role) {
            return Decision::DenyRole;
        }
    }

    for (scope, bypass_roles) in SCOPE_RULES {
        let mismatch = match scope {
            Scope::Branch => requirement.branch.is_some_and(|b| b != principal.branch),
            Scope::Department => requirement
                .department
                .is_some_and(|d| d != principal.department),
        };

        if mismatch && !bypass_roles.contains(&principal.role) {
            return Decision::deny_for(*scope);
        }
    }

    Decision::Allow
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::id::Id;

    fn principal(role: Role) -> Principal {
        Principal::new(Id::new(), role, Id::new(), Id::new())
    }

    #[test]
    fn test_no_principal_denies_unauthenticated() {
        let requirement = AccessRequirement::new();
        assert_eq!(
            evaluate(None, &requirement),
            Decision::DenyUnauthenticated
        );
    }

    #[test]
    fn test_empty_requirement_allows_any_principal() {
        let requirement = AccessRequirement::new();
        for role in Role::ALL {
            assert_eq!(
                evaluate(Some(&principal(role)), &requirement),
                Decision::Allow
            );
        }
    }

    #[test]
    fn test_role_requirement() {
        let requirement = AccessRequirement::admin();

        assert_eq!(
            evaluate(Some(&principal(Role::Admin)), &requirement),
            Decision::Allow
        );
        for role in [Role::Employee, Role::Manager, Role::Ceo] {
            assert_eq!(
                evaluate(Some(&principal(role)), &requirement),
                Decision::DenyRole
            );
        }
    }

    #[test]
    fn test_branch_scope_exhaustive() {
        // Different branch than the principal's.
        let requirement = AccessRequirement::new().with_branch(Id::new());

        for role in Role::ALL {
            let expected = match role {
                Role::Ceo | Role::Executive => Decision::Allow,
                _ => Decision::DenyBranch,
            };
            assert_eq!(
                evaluate(Some(&principal(role)), &requirement),
                expected,
                "role {role}"
            );
        }
    }

    #[test]
    fn test_department_scope_exhaustive() {
        let requirement = AccessRequirement::new().with_department(Id::new());

        for role in Role::ALL {
            let expected = match role {
                Role::Ceo | Role::Executive | Role::Manager => Decision::Allow,
                _ => Decision::DenyDepartment,
            };
            assert_eq!(
                evaluate(Some(&principal(role)), &requirement),
                expected,
                "role {role}"
            );
        }
    }

    #[test]
    fn test_matching_scope_allows_scoped_roles() {
        let p = principal(Role::Employee);
        let requirement = AccessRequirement::new()
            .with_branch(p.branch)
            .with_department(p.department);

        assert_eq!(evaluate(Some(&p), &requirement), Decision::Allow);
    }

    #[test]
    fn test_branch_checked_before_department() {
        // Both scopes mismatch; the branch denial must win for scoped roles.
        let requirement = AccessRequirement::new()
            .with_branch(Id::new())
            .with_department(Id::new());

        assert_eq!(
            evaluate(Some(&principal(Role::Employee)), &requirement),
            Decision::DenyBranch
        );
        // Manager passes department by bypass but still fails branch.
        assert_eq!(
            evaluate(Some(&principal(Role::Manager)), &requirement),
            Decision::DenyBranch
        );
    }

    #[test]
    fn test_role_check_precedes_scope_checks() {
        let requirement = AccessRequirement::new()
            .with_roles([Role::Admin])
            .with_branch(Id::new());

        assert_eq!(
            evaluate(Some(&principal(Role::Employee)), &requirement),
            Decision::DenyRole
        );
    }

    #[test]
    fn test_evaluate_is_pure() {
        let p = principal(Role::DepartmentHead);
        let requirement = AccessRequirement::new().with_department(Id::new());

        let first = evaluate(Some(&p), &requirement);
        let second = evaluate(Some(&p), &requirement);
        assert_eq!(first, second);
    }

    #[test]
    fn test_decision_reasons() {
        assert!(Decision::Allow.is_allowed());
        assert!(!Decision::DenyRole.is_allowed());
        assert!(!Decision::DenyBranch.reason().is_empty());
        assert!(!Decision::DenyDepartment.reason().is_empty());
    }

    #[test]
    fn test_manage_users_roles_are_bypass_or_role_gated() {
        // Capability consistency: every role that can manage users either
        // bypasses branch scoping or is the explicitly role-gated admin.
        let requirement = AccessRequirement::new().with_branch(Id::new());
        for role in Role::ALL {
            if role.can_manage_users() && role != Role::Admin {
                assert_eq!(
                    evaluate(Some(&principal(role)), &requirement),
                    Decision::Allow,
                    "role {role}"
                );
            }
        }
    }
}
