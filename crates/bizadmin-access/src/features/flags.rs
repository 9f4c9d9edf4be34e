//! Static feature → permissions map

use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalog::{
    EmployeePermission, MarketingPermission, PosPermission, ReportPermission, RolePermission,
    SalesPermission, UserPermission,
};

const BUILTIN_FEATURES: &[(&str, &[&str])] = &[
    ("dashboard.analytics", &[ReportPermission::View.as_str()]),
    (
        "users.management",
        &[
            UserPermission::Read.as_str(),
            UserPermission::Create.as_str(),
            UserPermission::Update.as_str(),
        ],
    ),
    ("users.bulk_delete", &[UserPermission::Delete.as_str()]),
    (
        "roles.management",
        &[RolePermission::Read.as_str(), RolePermission::Manage.as_str()],
    ),
    ("roles.assignment", &[RolePermission::Assign.as_str()]),
    ("hr.employees", &[EmployeePermission::Read.as_str()]),
    (
        "hr.payroll",
        &[
            EmployeePermission::ReadPayroll.as_str(),
            EmployeePermission::ProcessPayroll.as_str(),
        ],
    ),
    (
        "hr.attendance",
        &[
            EmployeePermission::ReadAttendance.as_str(),
            EmployeePermission::ManageAttendance.as_str(),
        ],
    ),
    ("sales.orders", &[SalesPermission::Read.as_str()]),
    ("sales.invoicing", &[SalesPermission::CreateInvoice.as_str()]),
    (
        "sales.customers",
        &[
            SalesPermission::ReadCustomers.as_str(),
            SalesPermission::ManageCustomers.as_str(),
        ],
    ),
    ("pos.terminal", &[PosPermission::Access.as_str()]),
    (
        "pos.refunds",
        &[PosPermission::Refund.as_str(), PosPermission::Discount.as_str()],
    ),
    ("pos.register_close", &[PosPermission::CloseRegister.as_str()]),
    (
        "marketing.campaigns",
        &[
            MarketingPermission::ReadCampaigns.as_str(),
            MarketingPermission::CreateCampaigns.as_str(),
        ],
    ),
    ("marketing.leads", &[MarketingPermission::ReadLeads.as_str()]),
    ("reports.export", &[ReportPermission::Export.as_str()]),
];

/// Immutable mapping from feature name to required permissions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureFlagMap {
    entries: BTreeMap<String, Vec<String>>,
}

impl FeatureFlagMap {
    /// The application's built-in feature table
    pub fn builtin() -> Self {
        Self::from_entries(
            BUILTIN_FEATURES
                .iter()
                .map(|(name, perms)| (*name, perms.iter().copied())),
        )
    }

    /// Build a map from `(name, permissions)` pairs; later names win
    pub fn from_entries<I, N, P>(entries: I) -> Self
    where
        I: IntoIterator<Item = (N, P)>,
        N: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(name, perms)| (name.into(), perms.into_iter().map(Into::into).collect()))
                .collect(),
        }
    }

    /// Required permissions, or `None` for an unknown feature
    pub fn requirements(&self, name: &str) -> Option<&[String]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Every known feature name, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for FeatureFlagMap {
    fn default() -> Self {
        Self::builtin()
    }
}
