//! Feature flags resolved from a static permission map

pub mod flags;
pub mod resolver;

pub use flags::FeatureFlagMap;
pub use resolver::{
    is_feature_enabled, use_all_features, use_feature, use_features, FeatureOptions,
    FeatureResolver, FeatureStatus,
};
