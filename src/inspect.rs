//! Human and machine readable summary of what a plan prefixes

use crate::browsers::{BrowserDatabase, SelectedBrowsers, Version};
use crate::data::FeatureKind;
use crate::prefixes::FeaturePlan;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrowserSupport {
    pub name: String,
    pub title: String,
    /// Newest first
    pub versions: Vec<Version>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureSupport {
    pub name: String,
    /// Prefixes without their dashes, e.g. `webkit`
    pub prefixes: Vec<String>,
    pub transition: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SupportReport {
    pub browsers: Vec<BrowserSupport>,
    pub properties: Vec<FeatureSupport>,
    pub values: Vec<FeatureSupport>,
    pub at_rules: Vec<FeatureSupport>,
}

impl SupportReport {
    pub fn new(selected: &SelectedBrowsers, database: &BrowserDatabase, features: &[FeaturePlan]) -> Self {
        let mut report = SupportReport::default();

        for browser in database.iter() {
            let versions = selected.versions_of(browser.name);
            if !versions.is_empty() {
                report.browsers.push(BrowserSupport {
                    name: browser.name.to_string(),
                    title: browser.title.to_string(),
                    versions,
                });
            }
        }

        for feature in features.iter().filter(|feature| !feature.add.is_empty()) {
            let support = FeatureSupport {
                name: feature.entry.name.to_string(),
                prefixes: feature
                    .add
                    .iter()
                    .map(|prefix| prefix.trim_matches('-').to_string())
                    .collect(),
                transition: feature.entry.transition,
            };
            match feature.entry.kind {
                FeatureKind::Property => report.properties.push(support),
                FeatureKind::Value => report.values.push(support),
                FeatureKind::AtRule => report.at_rules.push(support),
            }
        }

        report
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty() && self.values.is_empty() && self.at_rules.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for SupportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Browsers:")?;
        if self.browsers.is_empty() {
            writeln!(f, "  none")?;
        }
        for browser in &self.browsers {
            let versions: Vec<String> = browser.versions.iter().map(Version::to_string).collect();
            writeln!(f, "  {}: {}", browser.title, versions.join(", "))?;
        }

        if self.is_empty() {
            return writeln!(f, "\nNo prefixes needed.");
        }

        let sections = [
            ("Properties", &self.properties),
            ("Values", &self.values),
            ("At-rules", &self.at_rules),
        ];
        for (title, features) in sections {
            if features.is_empty() {
                continue;
            }
            writeln!(f, "\n{}:", title)?;
            for feature in features {
                let marker = if feature.transition { " *" } else { "" };
                writeln!(f, "  {}: {}{}", feature.name, feature.prefixes.join(", "), marker)?;
            }
        }

        if self.properties.iter().any(|feature| feature.transition) {
            writeln!(f, "\n* also prefixed inside transition values")?;
        }
        Ok(())
    }
}
