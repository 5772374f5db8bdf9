use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::category::PermissionCategory;
use crate::item::PermissionItem;

/// Category -> ordered items.
///
/// A category that never appeared in a document is absent, which is not the
/// same as present with no items. Identity values are expected to be unique
/// per category but duplicates are kept as read.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionCollection {
    categories: BTreeMap<PermissionCategory, Vec<PermissionItem>>,
}

impl PermissionCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Items of `category`, or `None` if the category is absent.
    pub fn items(&self, category: PermissionCategory) -> Option<&[PermissionItem]> {
        self.categories.get(&category).map(Vec::as_slice)
    }

    /// Items of `category`, treating an absent category as empty.
    pub fn items_or_empty(&self, category: PermissionCategory) -> &[PermissionItem] {
        self.items(category).unwrap_or(&[])
    }

    pub fn contains(&self, category: PermissionCategory) -> bool {
        self.categories.contains_key(&category)
    }

    /// Append an item, creating the category if needed.
    pub fn push(&mut self, category: PermissionCategory, item: PermissionItem) {
        self.categories.entry(category).or_default().push(item);
    }

    /// Replace the items of a category, marking it present.
    pub fn insert(&mut self, category: PermissionCategory, items: Vec<PermissionItem>) {
        self.categories.insert(category, items);
    }

    /// Present categories in canonical order.
    pub fn categories(&self) -> impl Iterator<Item = PermissionCategory> + '_ {
        self.categories.keys().copied()
    }

    pub fn len(&self, category: PermissionCategory) -> usize {
        self.items_or_empty(category).len()
    }

    pub fn total_items(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_items() == 0
    }
}

impl FromIterator<(PermissionCategory, PermissionItem)> for PermissionCollection {
    fn from_iter<T: IntoIterator<Item = (PermissionCategory, PermissionItem)>>(iter: T) -> Self {
        let mut collection = Self::new();
        for (category, item) in iter {
            collection.push(category, item);
        }
        collection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_differs_from_empty() {
        let mut collection = PermissionCollection::new();
        assert!(collection.items(PermissionCategory::FlowAccess).is_none());
        assert!(collection
            .items_or_empty(PermissionCategory::FlowAccess)
            .is_empty());

        collection.insert(PermissionCategory::FlowAccess, Vec::new());
        assert_eq!(collection.items(PermissionCategory::FlowAccess), Some(&[][..]));
        assert!(collection.contains(PermissionCategory::FlowAccess));
        assert!(collection.is_empty());
    }

    #[test]
    fn categories_iterate_in_canonical_order() {
        let collection: PermissionCollection = [
            (
                PermissionCategory::UserPermission,
                PermissionItem::license("x"),
            ),
            (
                PermissionCategory::ApplicationVisibility,
                PermissionItem::license("y"),
            ),
            (PermissionCategory::License, PermissionItem::license("z")),
        ]
        .into_iter()
        .collect();

        let order: Vec<_> = collection.categories().collect();
        assert_eq!(
            order,
            [
                PermissionCategory::ApplicationVisibility,
                PermissionCategory::License,
                PermissionCategory::UserPermission,
            ]
        );
        assert_eq!(collection.total_items(), 3);
    }

    #[test]
    fn duplicates_are_kept() {
        let mut collection = PermissionCollection::new();
        collection.push(PermissionCategory::License, PermissionItem::license("A"));
        collection.push(PermissionCategory::License, PermissionItem::license("A"));
        assert_eq!(collection.len(PermissionCategory::License), 2);
    }

    #[test]
    fn serializes_with_category_names() {
        let mut collection = PermissionCollection::new();
        collection.push(PermissionCategory::License, PermissionItem::license("A"));
        let json = serde_json::to_string(&collection).unwrap();
        assert!(json.contains("\"license\""));
    }
}
