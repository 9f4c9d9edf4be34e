//! Closed catalog of permission and role identifiers
//!
//! Each business module gets its own enum so a typo in an identifier is a
//! compile error. The evaluator still works on plain strings: every variant
//! converts to the exact identifier the auth backend issues.

use serde::{Deserialize, Serialize};

use crate::error::AccessError;

macro_rules! identifier_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident => $id:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $id)] $variant),+
        }

        impl $name {
            /// Every identifier in this group
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire identifier for this variant
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $id),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = AccessError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($id => Ok($name::$variant),)+
                    other => Err(AccessError::UnknownIdentifier {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }
    };
}

identifier_enum! {
    /// User administration
    UserPermission, "permission" {
        Read => "users.read",
        Create => "users.create",
        Update => "users.update",
        Delete => "users.delete",
    }
}

identifier_enum! {
    /// Role administration
    RolePermission, "permission" {
        Read => "roles.read",
        Manage => "roles.manage",
        Assign => "roles.assign",
    }
}

identifier_enum! {
    /// HR: employees, payroll, attendance
    EmployeePermission, "permission" {
        Read => "employees.read",
        Create => "employees.create",
        Update => "employees.update",
        Delete => "employees.delete",
        ReadPayroll => "payroll.read",
        ProcessPayroll => "payroll.process",
        ReadAttendance => "attendance.read",
        ManageAttendance => "attendance.manage",
    }
}

identifier_enum! {
    /// Sales orders, invoices and customers
    SalesPermission, "permission" {
        Read => "sales.read",
        Create => "sales.create",
        Update => "sales.update",
        CreateInvoice => "invoices.create",
        ReadCustomers => "customers.read",
        ManageCustomers => "customers.manage",
    }
}

identifier_enum! {
    /// Point of sale terminal
    PosPermission, "permission" {
        Access => "pos.access",
        Refund => "pos.refund",
        Discount => "pos.discount",
        CloseRegister => "pos.close_register",
    }
}

identifier_enum! {
    /// Campaigns and leads
    MarketingPermission, "permission" {
        ReadCampaigns => "campaigns.read",
        CreateCampaigns => "campaigns.create",
        ManageCampaigns => "campaigns.manage",
        ReadLeads => "leads.read",
    }
}

identifier_enum! {
    /// Dashboards and exports
    ReportPermission, "permission" {
        View => "reports.view",
        Export => "reports.export",
    }
}

identifier_enum! {
    /// Coarse-grained roles
    RoleId, "role" {
        SuperAdmin => "super_admin",
        Admin => "admin",
        Manager => "manager",
        Hr => "hr",
        Sales => "sales",
        Marketing => "marketing",
        Cashier => "cashier",
        Employee => "employee",
    }
}

/// Every permission identifier across all modules
pub fn all_permissions() -> Vec<&'static str> {
    let mut ids = Vec::new();
    ids.extend(UserPermission::ALL.iter().map(|p| p.as_str()));
    ids.extend(RolePermission::ALL.iter().map(|p| p.as_str()));
    ids.extend(EmployeePermission::ALL.iter().map(|p| p.as_str()));
    ids.extend(SalesPermission::ALL.iter().map(|p| p.as_str()));
    ids.extend(PosPermission::ALL.iter().map(|p| p.as_str()));
    ids.extend(MarketingPermission::ALL.iter().map(|p| p.as_str()));
    ids.extend(ReportPermission::ALL.iter().map(|p| p.as_str()));
    ids
}

/// Whether `id` names a permission in the catalog
pub fn is_known_permission(id: &str) -> bool {
    all_permissions().contains(&id)
}
