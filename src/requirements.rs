//! Turns browser requirement strings into a set of concrete browser versions

use crate::browsers::{BrowserDatabase, SelectedBrowser, SelectedBrowsers};
use crate::data::BrowserData;
use crate::error::{PrefixerError, Result};
use regex::Regex;

/// Used when the caller gives no requirements at all
pub const DEFAULT_REQUIREMENTS: &[&str] = &["last 2 versions"];

pub struct RequirementResolver {
    database: BrowserDatabase,
    none_regex: Regex,
    last_versions_regex: Regex,
    last_browser_versions_regex: Regex,
    popularity_regex: Regex,
    newer_than_regex: Regex,
    direct_regex: Regex,
}

impl Default for RequirementResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl RequirementResolver {
    pub fn new() -> Self {
        Self::with_database(BrowserDatabase::default())
    }

    pub fn with_database(database: BrowserDatabase) -> Self {
        Self {
            database,
            none_regex: Regex::new(r"(?i)^none$").unwrap(),
            last_versions_regex: Regex::new(r"(?i)^last\s+(\d+)\s+versions?$").unwrap(),
            last_browser_versions_regex: Regex::new(r"(?i)^last\s+(\d+)\s+([a-z_]+)\s+versions?$")
                .unwrap(),
            popularity_regex: Regex::new(r"^>\s*(\d+(?:\.\d+)?)%$").unwrap(),
            newer_than_regex: Regex::new(r"(?i)^([a-z_]+)\s+(>=?)\s*(\d+(?:\.\d+)?)$").unwrap(),
            direct_regex: Regex::new(r"(?i)^([a-z_]+)\s+(\d+(?:\.\d+)?)$").unwrap(),
        }
    }

    pub fn database(&self) -> BrowserDatabase {
        self.database
    }

    /// Resolve every requirement and merge the results
    pub fn resolve<S: AsRef<str>>(&self, requirements: &[S]) -> Result<SelectedBrowsers> {
        if requirements.is_empty() {
            return self.resolve(DEFAULT_REQUIREMENTS);
        }

        let mut selected = SelectedBrowsers::new();
        for requirement in requirements {
            let browsers = self.resolve_one(requirement.as_ref())?;
            log::debug!(
                "Requirement '{}' selected {} browser versions",
                requirement.as_ref().trim(),
                browsers.len()
            );
            selected.extend(browsers);
        }

        Ok(selected)
    }

    fn resolve_one(&self, requirement: &str) -> Result<Vec<SelectedBrowser>> {
        let requirement = requirement.trim();

        if self.none_regex.is_match(requirement) {
            return Ok(Vec::new());
        }

        if let Some(caps) = self.last_versions_regex.captures(requirement) {
            let count = parse_count(requirement, &caps[1])?;
            return Ok(self.last_versions(count));
        }

        if let Some(caps) = self.last_browser_versions_regex.captures(requirement) {
            let count = parse_count(requirement, &caps[1])?;
            let browser = self.browser(&caps[2])?;
            return Ok(newest_versions(browser, count));
        }

        if let Some(caps) = self.popularity_regex.captures(requirement) {
            let threshold = parse_number(requirement, &caps[1])?;
            return Ok(self.popular_versions(threshold));
        }

        if let Some(caps) = self.newer_than_regex.captures(requirement) {
            let browser = self.browser(&caps[1])?;
            let inclusive = &caps[2] == ">=";
            let version = parse_number(requirement, &caps[3])?;
            return Ok(browser
                .versions()
                .filter(|known| {
                    if inclusive {
                        known.as_f64() >= version
                    } else {
                        known.as_f64() > version
                    }
                })
                .map(|known| SelectedBrowser::new(browser.name, known))
                .collect());
        }

        if let Some(caps) = self.direct_regex.captures(requirement) {
            let browser = self.browser(&caps[1])?;
            let requested = parse_number(requirement, &caps[2])?;
            let version = browser.nearest_version(requested).ok_or_else(|| {
                PrefixerError::internal(format!("browser '{}' has no versions", browser.name))
            })?;
            if version.as_f64() != requested {
                log::debug!(
                    "Requested {} {} is not a known version, using {}",
                    browser.name,
                    requested,
                    version
                );
            }
            return Ok(vec![SelectedBrowser::new(browser.name, version)]);
        }

        Err(PrefixerError::resolution(
            requirement,
            "expected 'last N versions', '> N%' or '<browser> <version>'",
        ))
    }

    fn browser(&self, name: &str) -> Result<&'static BrowserData> {
        self.database
            .get(name)
            .ok_or_else(|| PrefixerError::unknown_browser(name))
    }

    fn major_browsers(&self) -> impl Iterator<Item = &'static BrowserData> {
        self.database.iter().filter(|browser| !browser.minor)
    }

    fn last_versions(&self, count: usize) -> Vec<SelectedBrowser> {
        self.major_browsers()
            .flat_map(|browser| newest_versions(browser, count))
            .collect()
    }

    fn popular_versions(&self, threshold: f64) -> Vec<SelectedBrowser> {
        self.major_browsers()
            .flat_map(|browser| {
                browser
                    .released
                    .iter()
                    .filter(move |release| release.share > threshold)
                    .map(move |release| SelectedBrowser::new(browser.name, release.version))
            })
            .collect()
    }
}

fn newest_versions(browser: &'static BrowserData, count: usize) -> Vec<SelectedBrowser> {
    browser
        .versions()
        .take(count)
        .map(|version| SelectedBrowser::new(browser.name, version))
        .collect()
}

fn parse_count(requirement: &str, text: &str) -> Result<usize> {
    text.parse()
        .map_err(|_| PrefixerError::resolution(requirement, format!("'{}' is not a valid count", text)))
}

fn parse_number(requirement: &str, text: &str) -> Result<f64> {
    text.parse()
        .map_err(|_| PrefixerError::resolution(requirement, format!("'{}' is not a valid number", text)))
}

/// Resolve requirements against the built-in browser database
pub fn resolve_requirements<S: AsRef<str>>(requirements: &[S]) -> Result<SelectedBrowsers> {
    RequirementResolver::new().resolve(requirements)
}
