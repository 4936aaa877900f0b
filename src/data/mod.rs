//! Static lookup tables: browser releases and per-feature prefix requirements

pub mod browsers;
pub mod features;

pub use browsers::{BrowserData, Release, BROWSERS};
pub use features::{FeatureData, FeatureKind, Need, FEATURES};
