//! Prefix resolution: which vendor prefixes each feature needs for a
//! selected browser set, and which ones have become dead weight

use crate::browsers::{BrowserDatabase, SelectedBrowser, SelectedBrowsers};
use crate::data::{FeatureData, FeatureKind, FEATURES};
use crate::inspect::SupportReport;
use crate::strategies::{standard_property, Strategy};
use crate::value_matcher::ValueMatcher;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError};

/// A feature with its support data expanded into concrete browser versions
#[derive(Debug, Clone)]
pub struct FeatureEntry {
    pub name: &'static str,
    pub kind: FeatureKind,
    /// Every browser version that needs a prefix for this feature
    pub browsers: Vec<SelectedBrowser>,
    pub props: &'static [&'static str],
    pub transition: bool,
    pub strategy: Strategy,
    /// Bare names looked for in values
    pub values: Vec<String>,
    /// Matches `values` inside declaration values. Only value features and
    /// transition-able properties have one.
    pub matcher: Option<ValueMatcher>,
}

impl FeatureEntry {
    pub fn from_data(data: &'static FeatureData, database: &BrowserDatabase) -> Self {
        let mut browsers = Vec::new();
        for need in data.support {
            let browser = match database.get(need.browser) {
                Some(browser) => browser,
                None => {
                    log::warn!("Feature '{}' refers to unknown browser '{}'", data.name, need.browser);
                    continue;
                }
            };
            browsers.extend(
                browser
                    .versions()
                    .filter(|version| *version >= need.first && need.last.map_or(true, |last| *version <= last))
                    .map(|version| SelectedBrowser::new(browser.name, version)),
            );
        }
        browsers.sort();
        browsers.dedup();

        let values: Vec<String> = if data.values.is_empty() {
            vec![data.name.to_string()]
        } else {
            data.values.iter().map(|value| value.to_string()).collect()
        };
        let matcher = match data.kind {
            FeatureKind::Value => Some(ValueMatcher::new(&values)),
            FeatureKind::Property if data.transition => Some(ValueMatcher::single(data.name)),
            _ => None,
        };

        Self {
            name: data.name,
            kind: data.kind,
            browsers,
            props: data.props,
            transition: data.transition,
            strategy: Strategy::for_feature(data.name),
            values,
            matcher,
        }
    }

    /// Whether this value feature may appear in `property`
    pub fn applies_to(&self, property: &str) -> bool {
        self.props.iter().any(|prop| *prop == "*" || *prop == property)
    }

    /// Every prefix used by any browser version in the feature's data
    fn full_prefixes(&self, database: &BrowserDatabase) -> Vec<&'static str> {
        sorted_prefixes(self.browsers.iter().filter_map(|browser| database.prefix_for(browser)))
    }
}

/// Add and remove sets of one feature
#[derive(Debug, Clone)]
pub struct FeaturePlan {
    pub entry: FeatureEntry,
    /// Longest prefix first
    pub add: Vec<&'static str>,
    pub remove: Vec<&'static str>,
    /// Matches the prefixed value forms of every removable prefix, for
    /// features that have a value matcher
    pub remove_matcher: Option<ValueMatcher>,
}

impl FeaturePlan {
    fn new(entry: FeatureEntry, selected: &SelectedBrowsers, database: &BrowserDatabase) -> Self {
        let add = sorted_prefixes(
            entry
                .browsers
                .iter()
                .filter(|browser| selected.contains(browser))
                .filter_map(|browser| database.prefix_for(browser)),
        );
        let full = entry.full_prefixes(database);

        let remove: Vec<&'static str> = if add.len() < full.len() {
            full.into_iter().filter(|prefix| !add.contains(prefix)).collect()
        } else {
            Vec::new()
        };

        let remove_matcher = if entry.matcher.is_some() && !remove.is_empty() {
            let names: Vec<String> = remove
                .iter()
                .flat_map(|prefix| entry.strategy.prefixed_value_names(prefix, &entry.values))
                .collect();
            Some(ValueMatcher::new(&names))
        } else {
            None
        };

        Self {
            entry,
            add,
            remove,
            remove_matcher,
        }
    }
}

/// Everything the processor needs for one selected browser set. Immutable
/// once built, so one plan can serve any number of stylesheets and threads.
#[derive(Debug, Clone)]
pub struct PrefixPlan {
    selected: SelectedBrowsers,
    features: Vec<FeaturePlan>,
    index: HashMap<&'static str, usize>,
    prefixes: Vec<&'static str>,
    removed_properties: HashSet<String>,
    removed_at_rules: HashSet<String>,
    report: SupportReport,
}

impl PrefixPlan {
    pub fn build(selected: &SelectedBrowsers) -> Self {
        Self::build_with(selected, &BrowserDatabase::default(), FEATURES)
    }

    pub fn build_with(
        selected: &SelectedBrowsers,
        database: &BrowserDatabase,
        features: &'static [FeatureData],
    ) -> Self {
        let features: Vec<FeaturePlan> = features
            .iter()
            .map(|data| FeaturePlan::new(FeatureEntry::from_data(data, database), selected, database))
            .collect();

        let index = features
            .iter()
            .enumerate()
            .map(|(position, feature)| (feature.entry.name, position))
            .collect();

        let prefixes = sorted_prefixes(selected.iter().filter_map(|browser| database.prefix_for(browser)));

        // A name another feature still adds is never removed
        let added = prefixed_property_names(&features, false);
        let removed_properties = prefixed_property_names(&features, true)
            .into_iter()
            .filter(|name| !added.contains(name))
            .collect();

        let removed_at_rules = features
            .iter()
            .filter(|feature| feature.entry.kind == FeatureKind::AtRule)
            .flat_map(|feature| {
                let bare = feature.entry.name.trim_start_matches('@');
                feature
                    .remove
                    .iter()
                    .map(move |prefix| format!("@{}{}", prefix, bare))
            })
            .collect();

        let report = SupportReport::new(selected, database, &features);

        log::debug!(
            "Built prefix plan for [{}]: {} features need prefixes",
            selected.cache_key(),
            features.iter().filter(|feature| !feature.add.is_empty()).count()
        );

        Self {
            selected: selected.clone(),
            features,
            index,
            prefixes,
            removed_properties,
            removed_at_rules,
            report,
        }
    }

    pub fn selected(&self) -> &SelectedBrowsers {
        &self.selected
    }

    pub fn cache_key(&self) -> String {
        self.selected.cache_key()
    }

    pub fn features(&self) -> &[FeaturePlan] {
        &self.features
    }

    pub fn feature(&self, name: &str) -> Option<&FeaturePlan> {
        self.index.get(name).map(|position| &self.features[*position])
    }

    /// Prefixes to add for a feature; unknown features need none
    pub fn add(&self, name: &str) -> &[&'static str] {
        self.feature(name).map(|feature| feature.add.as_slice()).unwrap_or(&[])
    }

    pub fn remove(&self, name: &str) -> &[&'static str] {
        self.feature(name).map(|feature| feature.remove.as_slice()).unwrap_or(&[])
    }

    /// Every prefix used by a selected browser, longest first
    pub fn prefixes(&self) -> &[&'static str] {
        &self.prefixes
    }

    /// Prefixes of the selected browsers other than `prefix`
    pub fn others(&self, prefix: &str) -> Vec<&'static str> {
        self.prefixes
            .iter()
            .copied()
            .filter(|other| *other != prefix)
            .collect()
    }

    pub fn value_features(&self) -> impl Iterator<Item = &FeaturePlan> {
        self.features
            .iter()
            .filter(|feature| feature.entry.kind == FeatureKind::Value)
    }

    /// Property features that are also prefixed inside `transition` values
    pub fn transition_features(&self) -> impl Iterator<Item = &FeaturePlan> {
        self.features
            .iter()
            .filter(|feature| feature.entry.kind == FeatureKind::Property && feature.entry.transition)
    }

    pub fn is_removed_property(&self, property: &str) -> bool {
        self.removed_properties.contains(property)
    }

    /// `at_rule` is written like `@-moz-keyframes`
    pub fn is_removed_at_rule(&self, at_rule: &str) -> bool {
        self.removed_at_rules.contains(at_rule)
    }

    pub fn report(&self) -> &SupportReport {
        &self.report
    }
}

/// Property names written by the add (or remove) prefixes of every property feature
fn prefixed_property_names(features: &[FeaturePlan], removing: bool) -> HashSet<String> {
    features
        .iter()
        .filter(|feature| feature.entry.kind == FeatureKind::Property)
        .flat_map(|feature| {
            let prefixes = if removing { &feature.remove } else { &feature.add };
            prefixes
                .iter()
                .flat_map(|prefix| feature.entry.strategy.prefixed_names(prefix, feature.entry.name))
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Vendor prefix of a name, `-webkit-` for `-webkit-box-flex`
pub fn vendor_prefix(name: &str) -> Option<&str> {
    if !name.starts_with('-') {
        return None;
    }
    match name[1..].find('-') {
        Some(end) if end > 0 => Some(&name[..end + 2]),
        _ => None,
    }
}

/// Standard property a possibly prefixed property belongs to:
/// `-moz-border-radius-topleft` is `border-top-left-radius`,
/// `-webkit-box-orient` is `flex-direction`
pub fn unprefixed(property: &str) -> String {
    match vendor_prefix(property) {
        Some(prefix) => {
            let stripped = &property[prefix.len()..];
            standard_property(stripped).unwrap_or(stripped).to_string()
        }
        None => property.to_string(),
    }
}

fn sorted_prefixes<I>(prefixes: I) -> Vec<&'static str>
where
    I: IntoIterator<Item = &'static str>,
{
    let mut prefixes: Vec<&'static str> = prefixes.into_iter().collect::<BTreeSet<_>>().into_iter().collect();
    prefixes.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    prefixes
}

/// Plans memoized by the canonical form of their browser set
#[derive(Debug, Default)]
pub struct PlanCache {
    plans: Mutex<HashMap<String, Arc<PrefixPlan>>>,
}

impl PlanCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached plan for `selected`, building it on first use. The lock is
    /// held while building so each plan is only ever built once.
    pub fn get_or_build(&self, selected: &SelectedBrowsers) -> Arc<PrefixPlan> {
        let mut plans = self.plans.lock().unwrap_or_else(PoisonError::into_inner);
        plans
            .entry(selected.cache_key())
            .or_insert_with(|| Arc::new(PrefixPlan::build(selected)))
            .clone()
    }

    pub fn len(&self) -> usize {
        self.plans.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.plans.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirements::resolve_requirements;

    fn plan(requirements: &[&str]) -> PrefixPlan {
        PrefixPlan::build(&resolve_requirements(requirements).unwrap())
    }

    #[test]
    fn test_add_and_remove_sets() {
        let plan = plan(&["chrome 25", "ff 24"]);
        assert_eq!(plan.add("transition"), &["-webkit-"]);
        assert!(plan.remove("transition").contains(&"-moz-"));
        assert!(plan.remove("transition").contains(&"-o-"));
        assert!(!plan.remove("transition").contains(&"-webkit-"));
    }

    #[test]
    fn test_add_is_longest_first() {
        let plan = plan(&["chrome 25", "ff 10", "ie 9", "opera 12"]);
        assert_eq!(plan.add("transform"), &["-webkit-", "-moz-", "-ms-", "-o-"]);
        assert_eq!(plan.prefixes(), &["-webkit-", "-moz-", "-ms-", "-o-"]);
        assert_eq!(plan.others("-moz-"), vec!["-webkit-", "-ms-", "-o-"]);
    }

    #[test]
    fn test_nothing_removed_when_everything_is_needed() {
        let all: Vec<String> = BrowserDatabase::default()
            .iter()
            .flat_map(|browser| browser.versions().map(move |version| format!("{} {}", browser.name, version)))
            .collect();
        let plan = PrefixPlan::build(&resolve_requirements(&all).unwrap());
        assert!(plan.remove("transition").is_empty());
        assert!(!plan.is_removed_property("-webkit-transition"));
    }

    #[test]
    fn test_empty_selection_removes_everything() {
        let plan = plan(&["none"]);
        assert!(plan.add("border-radius").is_empty());
        assert!(plan.is_removed_property("-webkit-border-radius"));
        assert!(plan.is_removed_property("-moz-border-radius-topleft"));
        assert!(plan.is_removed_property("-webkit-box-ordinal-group"));
        assert!(plan.is_removed_property("-ms-filter"));
        assert!(plan.is_removed_at_rule("@-webkit-keyframes"));
        assert!(plan.others("-webkit-").is_empty());
    }

    #[test]
    fn test_remove_matchers_use_prefixed_forms() {
        let plan = plan(&["none"]);
        let display = plan.feature("display-flex").unwrap();
        let matcher = display.remove_matcher.as_ref().unwrap();
        assert!(matcher.matches("-webkit-box"));
        assert!(matcher.matches("-ms-flexbox"));
        assert!(!matcher.matches("flex"));
    }

    #[test]
    fn test_opera_prefix_depends_on_version() {
        let presto = plan(&["opera 12"]);
        assert_eq!(presto.add("transform"), &["-o-"]);
        let blink = plan(&["opera 16"]);
        assert_eq!(blink.add("transform"), &["-webkit-"]);
    }

    #[test]
    fn test_unknown_feature_needs_nothing() {
        let plan = plan(&["chrome 25"]);
        assert!(plan.add("color").is_empty());
        assert!(plan.remove("color").is_empty());
    }

    #[test]
    fn test_unprefixed() {
        assert_eq!(unprefixed("-webkit-transition"), "transition");
        assert_eq!(unprefixed("-moz-border-radius-topleft"), "border-top-left-radius");
        assert_eq!(unprefixed("-webkit-box-orient"), "flex-direction");
        assert_eq!(unprefixed("-ms-flex-pack"), "justify-content");
        assert_eq!(unprefixed("color"), "color");
        assert_eq!(unprefixed("--custom"), "--custom");
    }

    #[test]
    fn test_vendor_prefix() {
        assert_eq!(vendor_prefix("-webkit-box"), Some("-webkit-"));
        assert_eq!(vendor_prefix("-o-transition"), Some("-o-"));
        assert_eq!(vendor_prefix("transition"), None);
        assert_eq!(vendor_prefix("--var"), None);
    }

    #[test]
    fn test_plan_cache_builds_once() {
        let cache = PlanCache::new();
        let selected = resolve_requirements(&["chrome 25"]).unwrap();
        let first = cache.get_or_build(&selected);
        let second = cache.get_or_build(&resolve_requirements(&["chrome 25", "chrome 25"]).unwrap());
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_plan_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PrefixPlan>();
        assert_send_sync::<PlanCache>();
    }
}
