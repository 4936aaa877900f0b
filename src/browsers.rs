//! Browser database and selected browser sets

use crate::data::{BrowserData, BROWSERS};
use serde::{Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;

/// Browser version. The minor part is a single decimal digit, so `10.5`
/// is `Version { major: 10, minor: 5 }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Version {
    major: u16,
    minor: u16,
}

impl Version {
    pub const fn new(major: u16, minor: u16) -> Self {
        Self { major, minor }
    }

    pub fn major(self) -> u16 {
        self.major
    }

    pub fn minor(self) -> u16 {
        self.minor
    }

    pub fn as_f64(self) -> f64 {
        self.major as f64 + self.minor as f64 / 10.0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.minor == 0 {
            write!(f, "{}", self.major)
        } else {
            write!(f, "{}.{}", self.major, self.minor)
        }
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl BrowserData {
    /// Every known version, newest first. Future versions come before released ones.
    pub fn versions(&self) -> impl Iterator<Item = Version> + '_ {
        self.future
            .iter()
            .copied()
            .chain(self.released.iter().map(|release| release.version))
    }

    pub fn newest(&self) -> Option<Version> {
        self.versions().next()
    }

    pub fn oldest(&self) -> Option<Version> {
        self.released.last().map(|release| release.version)
    }

    pub fn is_known(&self, version: Version) -> bool {
        self.versions().any(|known| known == version)
    }

    /// Usage share of a released version; unreleased versions have none
    pub fn share(&self, version: Version) -> f64 {
        self.released
            .iter()
            .find(|release| release.version == version)
            .map(|release| release.share)
            .unwrap_or(0.0)
    }

    /// Vendor prefix this browser uses at the given version
    pub fn prefix_at(&self, version: Version) -> &'static str {
        self.prefix_changes
            .iter()
            .rev()
            .find(|(since, _)| version >= *since)
            .map(|(_, prefix)| *prefix)
            .unwrap_or(self.prefix)
    }

    /// The known version nearest to `requested` after clamping it into the
    /// known range. Ties go to the older version.
    pub fn nearest_version(&self, requested: f64) -> Option<Version> {
        let mut best: Option<(Version, f64)> = None;
        for version in self.versions() {
            let distance = (version.as_f64() - requested).abs();
            match best {
                Some((_, best_distance)) if distance > best_distance => {}
                _ => best = Some((version, distance)),
            }
        }
        best.map(|(version, _)| version)
    }
}

/// Read-only view over the static browser table
#[derive(Debug, Clone, Copy)]
pub struct BrowserDatabase {
    browsers: &'static [BrowserData],
}

impl Default for BrowserDatabase {
    fn default() -> Self {
        Self::new(BROWSERS)
    }
}

impl BrowserDatabase {
    pub fn new(browsers: &'static [BrowserData]) -> Self {
        Self { browsers }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static BrowserData> {
        self.browsers.iter()
    }

    /// Look a browser up by name or alias, ignoring case
    pub fn get(&self, name: &str) -> Option<&'static BrowserData> {
        let name = name.to_ascii_lowercase();
        self.browsers
            .iter()
            .find(|browser| browser.name == name || browser.aliases.iter().any(|alias| *alias == name))
    }

    pub fn prefix_for(&self, browser: &SelectedBrowser) -> Option<&'static str> {
        self.get(browser.name)
            .map(|data| data.prefix_at(browser.version))
    }

    /// Position of a browser in the table, used to keep reports in a stable order
    pub fn position(&self, name: &str) -> usize {
        self.browsers
            .iter()
            .position(|browser| browser.name == name)
            .unwrap_or(usize::MAX)
    }
}

/// A concrete browser version a transformation has to support
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SelectedBrowser {
    pub name: &'static str,
    pub version: Version,
}

impl SelectedBrowser {
    pub fn new(name: &'static str, version: Version) -> Self {
        Self { name, version }
    }
}

impl fmt::Display for SelectedBrowser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.version)
    }
}

/// Deduplicated set of selected browsers. Only membership matters; the
/// sorted order is used for the canonical cache key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SelectedBrowsers {
    browsers: BTreeSet<SelectedBrowser>,
}

impl SelectedBrowsers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, browser: SelectedBrowser) -> bool {
        self.browsers.insert(browser)
    }

    pub fn contains(&self, browser: &SelectedBrowser) -> bool {
        self.browsers.contains(browser)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SelectedBrowser> {
        self.browsers.iter()
    }

    pub fn len(&self) -> usize {
        self.browsers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.browsers.is_empty()
    }

    /// Canonical sorted form, e.g. `"chrome 25,ff 24"`
    pub fn cache_key(&self) -> String {
        self.browsers
            .iter()
            .map(|browser| browser.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Versions of one browser in the set, newest first
    pub fn versions_of(&self, name: &str) -> Vec<Version> {
        self.browsers
            .iter()
            .rev()
            .filter(|browser| browser.name == name)
            .map(|browser| browser.version)
            .collect()
    }
}

impl FromIterator<SelectedBrowser> for SelectedBrowsers {
    fn from_iter<I: IntoIterator<Item = SelectedBrowser>>(iter: I) -> Self {
        Self {
            browsers: iter.into_iter().collect(),
        }
    }
}

impl Extend<SelectedBrowser> for SelectedBrowsers {
    fn extend<I: IntoIterator<Item = SelectedBrowser>>(&mut self, iter: I) {
        self.browsers.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_display_and_order() {
        assert_eq!(Version::new(12, 1).to_string(), "12.1");
        assert_eq!(Version::new(25, 0).to_string(), "25");
        assert!(Version::new(10, 5) < Version::new(10, 6));
        assert!(Version::new(9, 5) < Version::new(10, 0));
        assert_eq!(Version::new(3, 6).as_f64(), 3.6);
    }

    #[test]
    fn test_lookup_by_alias() {
        let db = BrowserDatabase::default();
        assert_eq!(db.get("Firefox").map(|b| b.name), Some("ff"));
        assert_eq!(db.get("explorer").map(|b| b.name), Some("ie"));
        assert!(db.get("netscape").is_none());
    }

    #[test]
    fn test_versions_put_future_first() {
        let db = BrowserDatabase::default();
        let chrome = db.get("chrome").unwrap();
        let versions: Vec<_> = chrome.versions().take(3).collect();
        assert_eq!(versions, vec![Version::new(33, 0), Version::new(32, 0), Version::new(31, 0)]);
        assert_eq!(chrome.oldest(), Some(Version::new(4, 0)));
    }

    #[test]
    fn test_opera_prefix_changes_to_webkit() {
        let db = BrowserDatabase::default();
        let opera = db.get("opera").unwrap();
        assert_eq!(opera.prefix_at(Version::new(12, 1)), "-o-");
        assert_eq!(opera.prefix_at(Version::new(15, 0)), "-webkit-");
        assert_eq!(
            db.prefix_for(&SelectedBrowser::new("opera", Version::new(17, 0))),
            Some("-webkit-")
        );
    }

    #[test]
    fn test_nearest_version_clamps() {
        let db = BrowserDatabase::default();
        let ie = db.get("ie").unwrap();
        assert_eq!(ie.nearest_version(42.0), Some(Version::new(11, 0)));
        assert_eq!(ie.nearest_version(1.0), Some(Version::new(5, 5)));
        assert_eq!(ie.nearest_version(8.0), Some(Version::new(8, 0)));
    }

    #[test]
    fn test_cache_key_is_sorted() {
        let mut set = SelectedBrowsers::new();
        set.insert(SelectedBrowser::new("ie", Version::new(10, 0)));
        set.insert(SelectedBrowser::new("chrome", Version::new(25, 0)));
        set.insert(SelectedBrowser::new("chrome", Version::new(25, 0)));
        assert_eq!(set.len(), 2);
        assert_eq!(set.cache_key(), "chrome 25,ie 10");
    }
}
