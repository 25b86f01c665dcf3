use serde::{Deserialize, Serialize};
use std::fmt;

/// Organizational role of a principal.
///
/// Ordering is part of the authorization contract: ceo/executive bypass both
/// branch and department scoping, manager additionally bypasses department
/// scoping only, department_head and employee are scoped to their own unit.
/// Admin is the platform operator role and is gated by explicit role
/// requirements, not by scope bypasses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(i16)]
pub enum Role {
    #[default]
    Employee = 0,
    DepartmentHead = 1,
    Manager = 2,
    Executive = 3,
    Ceo = 4,
    Admin = 5,
}

impl Role {
    /// Every role, in declaration order. Used for exhaustive policy tables.
    pub const ALL: [Role; 6] = [
        Role::Employee,
        Role::DepartmentHead,
        Role::Manager,
        Role::Executive,
        Role::Ceo,
        Role::Admin,
    ];

    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        use Role::*;
        match self {
            Employee => "employee",
            DepartmentHead => "department_head",
            Manager => "manager",
            Executive => "executive",
            Ceo => "ceo",
            Admin => "admin",
        }
    }

    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        use Role::*;
        match id {
            0 => Some(Employee),
            1 => Some(DepartmentHead),
            2 => Some(Manager),
            3 => Some(Executive),
            4 => Some(Ceo),
            5 => Some(Admin),
            _ => None,
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        use Role::*;
        match code {
            "employee" => Some(Employee),
            "department_head" => Some(DepartmentHead),
            "manager" => Some(Manager),
            "executive" => Some(Executive),
            "ceo" => Some(Ceo),
            "admin" => Some(Admin),
            _ => None,
        }
    }

    // ========================================================================
    // Capability queries - deterministic projections of role alone.
    // Kept consistent with the scope-bypass table in `policy`.
    // ========================================================================

    /// Can administer user accounts and credentials.
    #[inline]
    pub const fn can_manage_users(&self) -> bool {
        use Role::*;
        matches!(self, Admin | Ceo | Executive)
    }

    /// Can review work submitted inside their scope.
    #[inline]
    pub const fn can_review_submissions(&self) -> bool {
        use Role::*;
        matches!(self, DepartmentHead | Manager | Executive | Ceo)
    }

    /// Can submit work for review.
    #[inline]
    pub const fn can_submit_work(&self) -> bool {
        use Role::*;
        matches!(self, Employee | DepartmentHead)
    }

    /// Can process or reject credential-reset requests.
    #[inline]
    pub const fn can_process_resets(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_id() {
        assert_eq!(Role::from_id(0), Some(Role::Employee));
        assert_eq!(Role::from_id(1), Some(Role::DepartmentHead));
        assert_eq!(Role::from_id(2), Some(Role::Manager));
        assert_eq!(Role::from_id(3), Some(Role::Executive));
        assert_eq!(Role::from_id(4), Some(Role::Ceo));
        assert_eq!(Role::from_id(5), Some(Role::Admin));
        assert_eq!(Role::from_id(99), None);
    }

    #[test]
    fn test_role_from_code() {
        for role in Role::ALL {
            assert_eq!(Role::from_code(role.code()), Some(role));
        }
        assert_eq!(Role::from_code("intern"), None);
    }

    #[test]
    fn test_role_display() {
        assert_eq!(Role::Employee.to_string(), "employee");
        assert_eq!(Role::DepartmentHead.to_string(), "department_head");
        assert_eq!(Role::Ceo.to_string(), "ceo");
    }

    #[test]
    fn test_capability_projections() {
        assert!(Role::Admin.can_manage_users());
        assert!(Role::Ceo.can_manage_users());
        assert!(Role::Executive.can_manage_users());
        assert!(!Role::Manager.can_manage_users());
        assert!(!Role::Employee.can_manage_users());

        assert!(Role::DepartmentHead.can_review_submissions());
        assert!(Role::Manager.can_review_submissions());
        assert!(!Role::Employee.can_review_submissions());
        assert!(!Role::Admin.can_review_submissions());

        assert!(Role::Employee.can_submit_work());
        assert!(Role::DepartmentHead.can_submit_work());
        assert!(!Role::Ceo.can_submit_work());

        assert!(Role::Admin.can_process_resets());
        assert!(!Role::Ceo.can_process_resets());
    }
}
