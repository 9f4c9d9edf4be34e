//! Service registration for bizadmin-access

use std::sync::Arc;

use bizadmin_common::di::{ServiceEntry, ServiceFactory};

use crate::{AccessConfig, FeatureFlagMap, RoleAliases};

inventory::submit! {
    ServiceFactory::new("access", create_access_services)
}

fn create_access_services() -> Vec<ServiceEntry> {
    vec![
        ServiceEntry::new::<FeatureFlagMap>(Arc::new(FeatureFlagMap::builtin())),
        ServiceEntry::new::<AccessConfig>(Arc::new(AccessConfig::default())),
        ServiceEntry::new::<RoleAliases>(Arc::new(RoleAliases::builtin())),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use bizadmin_common::di::{list_discovered_factories, resolve};

    #[test]
    fn test_access_factory_registered() {
        let factories = list_discovered_factories();
        assert!(factories.contains(&"access"), "Factory should be registered");
    }

    #[test]
    fn test_factory_provides_builtins() {
        let services = create_access_services();
        assert_eq!(services.len(), 3);
        let features = resolve::<FeatureFlagMap>(&services).unwrap();
        assert_eq!(*features, FeatureFlagMap::builtin());
        let aliases = resolve::<RoleAliases>(&services).unwrap();
        assert!(aliases.satisfiers("admin").any(|r| r == "super_admin"));
    }
}
