//! Extension diff: which target items grant more than the source.

use perm_types::{
    PermissionCategory, PermissionCollection, PermissionItem, TabVisibility, VisibilityLevel,
    VISIBILITY_ATTRIBUTE,
};
use tracing::{debug, trace};

/// Verdict for one target item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Extension {
    /// No comparable source item exists
    New,
    /// The source item exists but `attribute` grants more on the target
    Broadened { attribute: &'static str },
    /// License entries are kept whenever the source has any license
    License,
    /// Adds nothing beyond the source
    Redundant,
}

impl Extension {
    pub fn is_extended(self) -> bool {
        !matches!(self, Extension::Redundant)
    }
}

/// First source item matching `target`.
///
/// Licenses match the first source license regardless of value; every other
/// category matches on identity, first match in source order wins.
pub fn find_match<'a>(
    category: PermissionCategory,
    source: &'a [PermissionItem],
    target: &PermissionItem,
) -> Option<&'a PermissionItem> {
    if category.is_wildcard() {
        return source.first();
    }
    source.iter().find(|item| item.identity == target.identity)
}

/// Classify one target item against the source items of its category.
///
/// An item with no comparable source item is always new, whatever it carries.
pub fn classify(
    category: PermissionCategory,
    source: &[PermissionItem],
    target: &PermissionItem,
) -> Extension {
    let Some(matched) = find_match(category, source, target) else {
        return Extension::New;
    };
    if category.is_wildcard() {
        return Extension::License;
    }

    for grant in category.grant_attributes() {
        if target.flag(grant.name) == Some(true) && matched.flag(grant.name) == Some(false) {
            return Extension::Broadened {
                attribute: grant.name,
            };
        }
    }

    if category.has_visibility() {
        if let Some(wanted) = target.visibility() {
            if widens_visibility(wanted, matched.visibility()) {
                return Extension::Broadened {
                    attribute: VISIBILITY_ATTRIBUTE,
                };
            }
        }
    }

    Extension::Redundant
}

/// Tab widening rules.
///
/// `Visible` widens anything that is not already visible; `Available` widens
/// only an absent or `None` source. An `Available` target over a `Hidden`
/// source is not a widening under these rules.
fn widens_visibility(target: &TabVisibility, source: Option<&TabVisibility>) -> bool {
    match target.level() {
        Some(VisibilityLevel::Visible) => {
            source.and_then(TabVisibility::level) != Some(VisibilityLevel::Visible)
        }
        Some(VisibilityLevel::Available) => {
            matches!(source, None | Some(TabVisibility::NoAccess))
        }
        Some(VisibilityLevel::Hidden) | None => false,
    }
}

/// Target items, per category, that are new or broadened relative to source.
///
/// Categories absent from the target are absent from the result; the result
/// follows the order of `categories`.
pub fn extended_permissions(
    source: &PermissionCollection,
    target: &PermissionCollection,
    categories: &[PermissionCategory],
) -> PermissionCollection {
    let mut extended = PermissionCollection::new();

    for &category in categories {
        let Some(targets) = target.items(category) else {
            continue;
        };
        let sources = source.items_or_empty(category);

        let kept: Vec<PermissionItem> = targets
            .iter()
            .filter(|item| {
                let verdict = classify(category, sources, item);
                trace!(%category, identity = %item.identity, ?verdict, "classified");
                verdict.is_extended()
            })
            .cloned()
            .collect();

        debug!(
            %category,
            kept = kept.len(),
            dropped = targets.len() - kept.len(),
            "extension diff"
        );
        extended.insert(category, kept);
    }

    extended
}

#[cfg(test)]
mod tests {
    use super::*;
    use perm_types::AttributeValue;

    fn item(
        category: PermissionCategory,
        identity: &str,
        flags: &[(&str, bool)],
    ) -> PermissionItem {
        PermissionItem::assemble(
            category,
            identity,
            flags
                .iter()
                .map(|(name, value)| (name.to_string(), AttributeValue::Flag(*value))),
        )
    }

    fn tab(identity: &str, visibility: Option<TabVisibility>) -> PermissionItem {
        PermissionItem::assemble(
            PermissionCategory::TabSetting,
            identity,
            visibility
                .map(|v| (VISIBILITY_ATTRIBUTE.to_string(), AttributeValue::Visibility(v))),
        )
    }

    #[test]
    fn first_identity_match_wins() {
        let source = vec![
            item(PermissionCategory::ClassAccess, "Ctrl", &[("enabled", false)]),
            item(PermissionCategory::ClassAccess, "Ctrl", &[("enabled", true)]),
        ];
        let target = item(PermissionCategory::ClassAccess, "Ctrl", &[("enabled", true)]);
        let matched = find_match(PermissionCategory::ClassAccess, &source, &target).unwrap();
        assert_eq!(matched.flag("enabled"), Some(false));
        assert_eq!(
            classify(PermissionCategory::ClassAccess, &source, &target),
            Extension::Broadened {
                attribute: "enabled"
            }
        );
    }

    #[test]
    fn unmatched_item_is_new() {
        let source = vec![item(PermissionCategory::FlowAccess, "A", &[("enabled", true)])];
        let target = item(PermissionCategory::FlowAccess, "B", &[("enabled", false)]);
        assert_eq!(
            classify(PermissionCategory::FlowAccess, &source, &target),
            Extension::New
        );
    }

    #[test]
    fn matched_item_without_grants_is_dropped() {
        let source = vec![item(PermissionCategory::PageAccess, "Home", &[("enabled", false)])];
        let target = item(PermissionCategory::PageAccess, "Home", &[]);
        assert_eq!(
            classify(PermissionCategory::PageAccess, &source, &target),
            Extension::Redundant
        );
    }

    #[test]
    fn unmatched_item_without_grants_is_new() {
        let source = vec![item(PermissionCategory::ClassAccess, "OldCtrl", &[("enabled", true)])];
        let target = item(PermissionCategory::ClassAccess, "NewCtrl", &[]);
        assert_eq!(
            classify(PermissionCategory::ClassAccess, &source, &target),
            Extension::New
        );

        let mut target_set = PermissionCollection::new();
        target_set.push(PermissionCategory::ClassAccess, target);
        let extended = extended_permissions(
            &PermissionCollection::new(),
            &target_set,
            &PermissionCategory::ALL,
        );
        assert_eq!(extended.len(PermissionCategory::ClassAccess), 1);
    }

    #[test]
    fn equal_or_narrower_grants_are_redundant() {
        let source = vec![item(
            PermissionCategory::FieldPermission,
            "Account.Name",
            &[("editable", true), ("readable", true)],
        )];
        let target = item(
            PermissionCategory::FieldPermission,
            "Account.Name",
            &[("editable", false), ("readable", true)],
        );
        assert_eq!(
            classify(PermissionCategory::FieldPermission, &source, &target),
            Extension::Redundant
        );
    }

    #[test]
    fn missing_source_attribute_does_not_broaden() {
        let source = vec![item(
            PermissionCategory::ObjectPermission,
            "Account",
            &[("allowRead", true)],
        )];
        let target = item(
            PermissionCategory::ObjectPermission,
            "Account",
            &[("allowEdit", true), ("allowRead", true)],
        );
        assert_eq!(
            classify(PermissionCategory::ObjectPermission, &source, &target),
            Extension::Redundant
        );
    }

    #[test]
    fn license_is_kept_against_any_source_license() {
        let source = vec![PermissionItem::license("Salesforce")];
        let target = PermissionItem::license("Salesforce Platform");
        assert_eq!(
            classify(PermissionCategory::License, &source, &target),
            Extension::License
        );
        assert_eq!(
            classify(PermissionCategory::License, &[], &target),
            Extension::New
        );
    }

    #[test]
    fn tab_visibility_widening_rules() {
        let cases = [
            (TabVisibility::Visible, Some(TabVisibility::Available), true),
            (TabVisibility::Visible, Some(TabVisibility::Visible), false),
            (TabVisibility::Visible, None, true),
            (TabVisibility::Available, Some(TabVisibility::NoAccess), true),
            (TabVisibility::Available, None, true),
            (TabVisibility::Available, Some(TabVisibility::Hidden), false),
            (TabVisibility::Available, Some(TabVisibility::Visible), false),
            (TabVisibility::NoAccess, None, false),
            (TabVisibility::Visible, Some(TabVisibility::Other("Custom".into())), true),
            (TabVisibility::Other("Custom".into()), None, false),
        ];
        for (target, source, expected) in cases {
            let sources = vec![tab("standard-Account", source.clone())];
            let verdict = classify(
                PermissionCategory::TabSetting,
                &sources,
                &tab("standard-Account", Some(target.clone())),
            );
            assert_eq!(
                verdict.is_extended(),
                expected,
                "target {target} over source {source:?}"
            );
        }
    }

    #[test]
    fn absent_target_category_is_skipped() {
        let mut source = PermissionCollection::new();
        source.push(
            PermissionCategory::UserPermission,
            item(PermissionCategory::UserPermission, "ApiEnabled", &[("enabled", true)]),
        );
        let target = PermissionCollection::new();

        let extended = extended_permissions(&source, &target, &PermissionCategory::ALL);
        assert!(extended.items(PermissionCategory::UserPermission).is_none());
    }

    #[test]
    fn keeps_only_extended_items_in_order() {
        let mut source = PermissionCollection::new();
        source.push(
            PermissionCategory::UserPermission,
            item(PermissionCategory::UserPermission, "ApiEnabled", &[("enabled", true)]),
        );
        source.push(
            PermissionCategory::UserPermission,
            item(PermissionCategory::UserPermission, "ViewSetup", &[("enabled", false)]),
        );

        let mut target = PermissionCollection::new();
        for (name, enabled) in [("RunReports", false), ("ApiEnabled", true), ("ViewSetup", true)] {
            target.push(
                PermissionCategory::UserPermission,
                item(PermissionCategory::UserPermission, name, &[("enabled", enabled)]),
            );
        }

        let extended = extended_permissions(&source, &target, &PermissionCategory::ALL);
        let names: Vec<&str> = extended
            .items_or_empty(PermissionCategory::UserPermission)
            .iter()
            .map(|i| i.identity.as_str())
            .collect();
        assert_eq!(names, ["RunReports", "ViewSetup"]);
    }
}
