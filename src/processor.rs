//! Add and remove passes over an editable tree

use crate::data::FeatureKind;
use crate::prefixes::{unprefixed, vendor_prefix, FeaturePlan, PrefixPlan};
use crate::tree::{DeclarationRef, Tree};
use serde::Serialize;

/// What one processor run changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProcessStats {
    pub declarations_added: usize,
    pub declarations_removed: usize,
    pub keyframes_added: usize,
    pub keyframes_removed: usize,
}

impl ProcessStats {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn merge(&mut self, other: &ProcessStats) {
        self.declarations_added += other.declarations_added;
        self.declarations_removed += other.declarations_removed;
        self.keyframes_added += other.keyframes_added;
        self.keyframes_removed += other.keyframes_removed;
    }
}

pub struct Processor<'p> {
    plan: &'p PrefixPlan,
    stats: ProcessStats,
}

impl<'p> Processor<'p> {
    pub fn new(plan: &'p PrefixPlan) -> Self {
        Self {
            plan,
            stats: ProcessStats::default(),
        }
    }

    /// Run the add pass, then the remove pass
    pub fn process(mut self, tree: &mut Tree) -> ProcessStats {
        self.add(tree);
        self.remove(tree);
        log::debug!("Processor finished: {:?}", self.stats);
        self.stats
    }

    pub fn add(&mut self, tree: &mut Tree) {
        self.add_keyframes(tree);
        self.add_property_prefixes(tree);
        self.add_value_prefixes(tree);
    }

    pub fn remove(&mut self, tree: &mut Tree) {
        let plan = self.plan;
        let stats = &mut self.stats;

        tree.for_each_keyframes_block(|tree, block| {
            if let Some(prefix) = &block.vendor_prefix {
                if plan.is_removed_at_rule(&format!("@{}keyframes", prefix)) {
                    tree.remove_keyframes_block(block.id);
                    stats.keyframes_removed += 1;
                }
            }
        });

        tree.for_each_declaration(|tree, declaration| {
            let (property, value) = match tree.declaration(declaration.id) {
                Some((property, value)) => (property.to_string(), value.to_string()),
                None => return,
            };

            let unwanted = plan.is_removed_property(&property) || {
                let features = applicable_features(plan, &unprefixed(&property));
                features
                    .iter()
                    .filter_map(|feature| feature.remove_matcher.as_ref())
                    .any(|matcher| matcher.matches(&value))
            };

            if unwanted {
                log::trace!("Removing {}: {}", property, value);
                tree.remove_declaration(declaration.id);
                stats.declarations_removed += 1;
            }
        });
    }

    /// Clone every unprefixed `@keyframes` block once per needed prefix
    fn add_keyframes(&mut self, tree: &mut Tree) {
        let plan = self.plan;
        let prefixes = plan.add("@keyframes");
        if prefixes.is_empty() {
            return;
        }
        let stats = &mut self.stats;

        tree.for_each_keyframes_block(|tree, block| {
            if block.vendor_prefix.is_some() {
                return;
            }
            for prefix in prefixes {
                if tree.clone_keyframes_with_prefix(block.id, prefix).is_some() {
                    stats.keyframes_added += 1;
                }
            }
        });
    }

    fn add_property_prefixes(&mut self, tree: &mut Tree) {
        let plan = self.plan;
        let stats = &mut self.stats;

        tree.for_each_declaration(|tree, declaration| {
            let (property, value) = match tree.declaration(declaration.id) {
                Some((property, value)) => (property.to_string(), value.to_string()),
                None => return,
            };
            let feature = match plan.feature(&property) {
                Some(feature) if feature.entry.kind == FeatureKind::Property => feature,
                _ => return,
            };

            for prefix in &feature.add {
                if !fits_vendor(declaration, prefix) {
                    continue;
                }
                // The author already wrote a form for another accepted vendor
                if plan.others(prefix).iter().any(|other| value.contains(*other)) {
                    continue;
                }

                for (prefixed, prefixed_value) in feature.entry.strategy.apply_prefix(prefix, &property, &value) {
                    if tree.rule_contains_property(declaration.parent, &prefixed) {
                        continue;
                    }
                    if tree
                        .insert_declaration_before(declaration.id, &prefixed, &prefixed_value)
                        .is_some()
                    {
                        stats.declarations_added += 1;
                    }
                }
            }
        });
    }

    fn add_value_prefixes(&mut self, tree: &mut Tree) {
        let plan = self.plan;
        let stats = &mut self.stats;

        tree.for_each_declaration(|tree, declaration| {
            let (property, value) = match tree.declaration(declaration.id) {
                Some((property, value)) => (property.to_string(), value.to_string()),
                None => return,
            };

            let features: Vec<&FeaturePlan> = applicable_features(plan, &unprefixed(&property))
                .into_iter()
                .filter(|feature| {
                    feature
                        .entry
                        .matcher
                        .as_ref()
                        .map_or(false, |matcher| matcher.matches(&value))
                })
                .collect();
            if features.is_empty() {
                return;
            }

            let own_prefix = vendor_prefix(&property);

            for prefix in plan.prefixes() {
                if !fits_vendor(declaration, prefix) || own_prefix.map_or(false, |own| own != *prefix) {
                    continue;
                }
                // Already rewritten for this vendor or claimed by another one
                if value.contains(*prefix) || plan.others(prefix).iter().any(|other| value.contains(*other)) {
                    continue;
                }

                let mut candidates = vec![value.clone()];
                for feature in features.iter().filter(|feature| feature.add.contains(prefix)) {
                    let matcher = match &feature.entry.matcher {
                        Some(matcher) => matcher,
                        None => continue,
                    };
                    candidates = candidates
                        .into_iter()
                        .flat_map(|candidate| {
                            if matcher.matches(&candidate) {
                                feature.entry.strategy.apply_value_prefix(matcher, prefix, &candidate)
                            } else {
                                vec![candidate]
                            }
                        })
                        .collect();
                }
                candidates.retain(|candidate| *candidate != value);

                if own_prefix == Some(*prefix) {
                    // A prefixed declaration takes its own prefixed value; any
                    // extra candidate goes in front of it
                    if let Some(last) = candidates.pop() {
                        for candidate in &candidates {
                            if tree.insert_declaration_before(declaration.id, &property, candidate).is_some() {
                                stats.declarations_added += 1;
                            }
                        }
                        tree.set_declaration_value(declaration.id, &last);
                    }
                } else {
                    for candidate in &candidates {
                        if tree.insert_declaration_before(declaration.id, &property, candidate).is_some() {
                            stats.declarations_added += 1;
                        }
                    }
                }
            }
        });
    }
}

/// A declaration inside `@-moz-keyframes` only ever takes `-moz-`
fn fits_vendor(declaration: &DeclarationRef, prefix: &str) -> bool {
    declaration
        .vendor
        .as_deref()
        .map_or(true, |vendor| vendor == prefix)
}

/// Value features allowed in `property`, plus transition-able properties
/// when `property` is a transition list
fn applicable_features<'p>(plan: &'p PrefixPlan, property: &str) -> Vec<&'p FeaturePlan> {
    let mut features: Vec<&FeaturePlan> = plan
        .value_features()
        .filter(|feature| feature.entry.applies_to(property))
        .collect();
    if property == "transition" || property == "transition-property" {
        features.extend(plan.transition_features());
    }
    features
}
