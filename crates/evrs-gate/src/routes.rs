use evrs_auth::Role;

/// Frontend pages belonging to one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RolePages {
    pub role: Role,
    /// Bare section root, which has no page of its own. Citizens have none.
    pub base: Option<&'static str>,
    pub login: &'static str,
    pub dashboard: &'static str,
    pub protected_prefix: &'static str,
}

/// Admin, moh, hcp, hospital, citizen. Protected prefixes are tested in this order.
pub const ROLE_PAGES: [RolePages; 5] = [
    RolePages {
        role: Role::Admin,
        base: Some("/admin"),
        login: "/admin/login",
        dashboard: "/admin/dashboard",
        protected_prefix: "/admin",
    },
    RolePages {
        role: Role::Moh,
        base: Some("/moh"),
        login: "/moh/login",
        dashboard: "/moh/dashboard",
        protected_prefix: "/moh",
    },
    RolePages {
        role: Role::Hcp,
        base: Some("/healthcare-provider"),
        login: "/healthcare-provider/login",
        dashboard: "/healthcare-provider/dashboard",
        protected_prefix: "/healthcare-provider",
    },
    RolePages {
        role: Role::Hospital,
        base: Some("/hospital"),
        login: "/hospital/login",
        dashboard: "/hospital/dashboard",
        protected_prefix: "/hospital",
    },
    RolePages {
        role: Role::Citizen,
        base: None,
        login: "/login",
        dashboard: "/dashboard",
        protected_prefix: "/dashboard",
    },
];
