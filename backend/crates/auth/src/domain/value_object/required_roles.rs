//! Static per-endpoint role requirement

use std::fmt;

use super::user_role::UserRole;

/// Set of roles allowed to reach an endpoint.
///
/// Fixed at router construction; never derived from the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredRoles {
    user: bool,
    admin: bool,
}

impl RequiredRoles {
    pub fn new(roles: impl IntoIterator<Item = UserRole>) -> Self {
        let mut set = Self {
            user: false,
            admin: false,
        };
        for role in roles {
            match role {
                UserRole::User => set.user = true,
                UserRole::Admin => set.admin = true,
            }
        }
        set
    }

    /// Administrative endpoints
    pub fn admin() -> Self {
        Self::new([UserRole::Admin])
    }

    pub fn contains(&self, role: UserRole) -> bool {
        match role {
            UserRole::User => self.user,
            UserRole::Admin => self.admin,
        }
    }
}

impl fmt::Display for RequiredRoles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = UserRole::ALL
            .iter()
            .filter(|role| self.contains(**role))
            .map(UserRole::code)
            .collect();
        write!(f, "{{{}}}", names.join(","))
    }
}
