//! Minimal-permission aggregation across profiles.
//!
//! Every boolean grant of an identity is AND-ed over the profiles that
//! mention it, and tab visibility is reconciled toward the most restrictive
//! value seen. A profile that does not mention an identity contributes
//! nothing for it: absence is not treated as a deny.

use std::collections::{BTreeMap, HashMap};

use perm_types::{
    AttributeValue, PermissionCategory, PermissionCollection, PermissionItem, TabVisibility,
    VISIBILITY_ATTRIBUTE,
};
use serde::Serialize;
use tracing::{debug, trace};

use crate::error::{ReconcileError, ReconcileResult};

#[derive(Clone, Debug, PartialEq, Eq)]
enum Floor {
    Flags(Vec<(&'static str, bool)>),
    Visibility(TabVisibility),
}

/// Running floor for one identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AggregatedPermission {
    pub identity: String,
    floor: Floor,
}

impl AggregatedPermission {
    fn seed(
        category: PermissionCategory,
        identity: &str,
        item: &PermissionItem,
    ) -> ReconcileResult<Self> {
        let floor = if category.has_visibility() {
            Floor::Visibility(required_visibility(category, item)?)
        } else {
            Floor::Flags(
                category
                    .grant_attributes()
                    .iter()
                    .map(|grant| (grant.name, true))
                    .collect(),
            )
        };
        Ok(Self {
            identity: identity.to_string(),
            floor,
        })
    }

    fn absorb(
        &mut self,
        category: PermissionCategory,
        item: &PermissionItem,
    ) -> ReconcileResult<()> {
        match &mut self.floor {
            Floor::Visibility(current) => {
                let seen = required_visibility(category, item)?;
                *current = current.clone().restrict(seen);
            }
            Floor::Flags(flags) => {
                let observed = flags
                    .iter()
                    .map(|(name, _)| required_flag(category, item, *name))
                    .collect::<ReconcileResult<Vec<bool>>>()?;
                for ((_, accumulated), seen) in flags.iter_mut().zip(observed) {
                    *accumulated = *accumulated && seen;
                }
            }
        }
        Ok(())
    }

    /// Accumulated value of a boolean grant.
    pub fn flag(&self, name: &str) -> Option<bool> {
        match &self.floor {
            Floor::Flags(flags) => flags
                .iter()
                .find(|(flag, _)| *flag == name)
                .map(|(_, value)| *value),
            Floor::Visibility(_) => None,
        }
    }

    /// Accumulated tab visibility.
    pub fn visibility(&self) -> Option<&TabVisibility> {
        match &self.floor {
            Floor::Visibility(value) => Some(value),
            Floor::Flags(_) => None,
        }
    }

    /// Whether the floor still grants anything.
    pub fn is_granted(&self, category: PermissionCategory) -> bool {
        match &self.floor {
            Floor::Visibility(value) => !value.is_hidden(),
            Floor::Flags(_) => category
                .positive_attribute()
                .and_then(|positive| self.flag(positive))
                .unwrap_or(true),
        }
    }

    /// Output item in permission-set vocabulary.
    fn into_item(self, category: PermissionCategory) -> PermissionItem {
        let attributes: Vec<(String, AttributeValue)> = match self.floor {
            Floor::Visibility(value) => vec![(
                VISIBILITY_ATTRIBUTE.to_string(),
                AttributeValue::Visibility(value.to_permission_set()),
            )],
            Floor::Flags(flags) => flags
                .into_iter()
                .filter(|(name, _)| {
                    category
                        .grant_attributes()
                        .iter()
                        .any(|grant| grant.name == *name && !grant.profile_only)
                })
                .map(|(name, value)| (name.to_string(), AttributeValue::Flag(value)))
                .collect(),
        };
        PermissionItem::assemble(category, self.identity, attributes)
    }
}

fn required_flag(
    category: PermissionCategory,
    item: &PermissionItem,
    attribute: &'static str,
) -> ReconcileResult<bool> {
    item.flag(attribute)
        .ok_or_else(|| ReconcileError::MissingAttribute {
            category,
            identity: item.identity.clone(),
            attribute,
        })
}

fn required_visibility(
    category: PermissionCategory,
    item: &PermissionItem,
) -> ReconcileResult<TabVisibility> {
    item.visibility()
        .cloned()
        .ok_or_else(|| ReconcileError::MissingAttribute {
            category,
            identity: item.identity.clone(),
            attribute: VISIBILITY_ATTRIBUTE,
        })
}

/// Floors of one category in first-sighting order.
#[derive(Clone, Debug, Default)]
struct CategoryFloor {
    entries: Vec<AggregatedPermission>,
    index: HashMap<String, usize>,
}

impl CategoryFloor {
    fn absorb(
        &mut self,
        category: PermissionCategory,
        item: &PermissionItem,
    ) -> ReconcileResult<()> {
        let position = match self.index.get(&item.identity) {
            Some(&position) => position,
            None => {
                let seeded = AggregatedPermission::seed(category, &item.identity, item)?;
                self.entries.push(seeded);
                self.index.insert(item.identity.clone(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        self.entries[position].absorb(category, item)
    }
}

/// Accumulates the common floor of a sequence of profiles.
///
/// ```
/// use perm_reconcile::MinimalPermissions;
/// use perm_types::PermissionCollection;
///
/// let mut floor = MinimalPermissions::new();
/// floor.absorb(&PermissionCollection::new()).unwrap();
/// assert_eq!(floor.profiles(), 1);
/// assert!(floor.finish().is_empty());
/// ```
#[derive(Clone, Debug, Default)]
pub struct MinimalPermissions {
    categories: BTreeMap<PermissionCategory, CategoryFloor>,
    profiles: usize,
}

impl MinimalPermissions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one profile into the floor.
    ///
    /// A category missing from the profile is an empty contribution.
    pub fn absorb(&mut self, profile: &PermissionCollection) -> ReconcileResult<()> {
        for category in PermissionCategory::PROFILE {
            let items = profile.items_or_empty(category);
            if items.is_empty() {
                continue;
            }
            let floor = self.categories.entry(category).or_default();
            for item in items {
                floor.absorb(category, item)?;
            }
            trace!(%category, items = items.len(), "absorbed");
        }
        self.profiles += 1;
        Ok(())
    }

    pub fn profiles(&self) -> usize {
        self.profiles
    }

    /// Current floor of one identity.
    pub fn get(
        &self,
        category: PermissionCategory,
        identity: &str,
    ) -> Option<&AggregatedPermission> {
        let floor = self.categories.get(&category)?;
        floor.index.get(identity).map(|&position| &floor.entries[position])
    }

    /// Keep the floors that still grant something, in canonical category order.
    pub fn finish(self) -> PermissionCollection {
        let mut minimal = PermissionCollection::new();
        for (category, floor) in self.categories {
            let seen = floor.entries.len();
            let retained: Vec<PermissionItem> = floor
                .entries
                .into_iter()
                .filter(|entry| entry.is_granted(category))
                .map(|entry| entry.into_item(category))
                .collect();
            debug!(%category, seen, retained = retained.len(), "minimal permissions");
            minimal.insert(category, retained);
        }
        minimal
    }
}

/// Common floor of `profiles`, processed in the given order.
pub fn minimal_permissions<'a, I>(profiles: I) -> ReconcileResult<PermissionCollection>
where
    I: IntoIterator<Item = &'a PermissionCollection>,
{
    let mut floor = MinimalPermissions::new();
    for profile in profiles {
        floor.absorb(profile)?;
    }
    Ok(floor.finish())
}

/// Item counts of a merged permission set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MergeSummary {
    pub profiles: usize,
    pub categories: BTreeMap<PermissionCategory, usize>,
}

impl MergeSummary {
    pub fn of(profiles: usize, merged: &PermissionCollection) -> Self {
        Self {
            profiles,
            categories: merged
                .categories()
                .map(|category| (category, merged.len(category)))
                .collect(),
        }
    }

    pub fn count(&self, category: PermissionCategory) -> usize {
        self.categories.get(&category).copied().unwrap_or(0)
    }

    pub fn accessible_fields(&self) -> usize {
        self.count(PermissionCategory::FieldPermission)
    }

    pub fn accessible_objects(&self) -> usize {
        self.count(PermissionCategory::ObjectPermission)
    }
}
