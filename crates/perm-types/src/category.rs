use serde::{Deserialize, Serialize};
use std::fmt;

/// Fallback identity key for categories without a dedicated one.
pub const DEFAULT_IDENTITY_KEY: &str = "name";

/// Attribute carrying the tri-state tab visibility.
pub const VISIBILITY_ATTRIBUTE: &str = "visibility";

/// The two document shapes that carry permissions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentKind {
    PermissionSet,
    Profile,
}

impl DocumentKind {
    /// Name of the single root element of this document kind.
    pub fn root_element(self) -> &'static str {
        match self {
            DocumentKind::PermissionSet => "PermissionSet",
            DocumentKind::Profile => "Profile",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.root_element())
    }
}

/// A boolean grant attribute tracked for a category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GrantAttribute {
    /// Element name of the attribute
    pub name: &'static str,
    /// Only meaningful on profiles; never emitted into a merged permission set
    pub profile_only: bool,
}

const fn grant(name: &'static str) -> GrantAttribute {
    GrantAttribute {
        name,
        profile_only: false,
    }
}

const fn profile_grant(name: &'static str) -> GrantAttribute {
    GrantAttribute {
        name,
        profile_only: true,
    }
}

const APPLICATION_GRANTS: &[GrantAttribute] = &[profile_grant("default"), grant("visible")];
const ENABLED_GRANTS: &[GrantAttribute] = &[grant("enabled")];
const FIELD_GRANTS: &[GrantAttribute] = &[grant("editable"), grant("readable")];
const OBJECT_GRANTS: &[GrantAttribute] = &[
    grant("allowCreate"),
    grant("allowDelete"),
    grant("allowEdit"),
    grant("allowRead"),
    grant("modifyAllRecords"),
    grant("viewAllRecords"),
];
const RECORD_TYPE_GRANTS: &[GrantAttribute] = &[profile_grant("default"), grant("visible")];

/// The fixed set of permission categories.
///
/// Declaration order is the canonical output order; `Ord` follows it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PermissionCategory {
    ApplicationVisibility,
    ClassAccess,
    FieldPermission,
    FlowAccess,
    ObjectPermission,
    PageAccess,
    RecordTypeVisibility,
    License,
    TabSetting,
    UserPermission,
}

impl PermissionCategory {
    /// Every category, in canonical order.
    pub const ALL: [PermissionCategory; 10] = [
        PermissionCategory::ApplicationVisibility,
        PermissionCategory::ClassAccess,
        PermissionCategory::FieldPermission,
        PermissionCategory::FlowAccess,
        PermissionCategory::ObjectPermission,
        PermissionCategory::PageAccess,
        PermissionCategory::RecordTypeVisibility,
        PermissionCategory::License,
        PermissionCategory::TabSetting,
        PermissionCategory::UserPermission,
    ];

    /// Categories carried by profiles. Licenses only occur in permission sets.
    pub const PROFILE: [PermissionCategory; 9] = [
        PermissionCategory::ApplicationVisibility,
        PermissionCategory::ClassAccess,
        PermissionCategory::FieldPermission,
        PermissionCategory::FlowAccess,
        PermissionCategory::ObjectPermission,
        PermissionCategory::PageAccess,
        PermissionCategory::RecordTypeVisibility,
        PermissionCategory::TabSetting,
        PermissionCategory::UserPermission,
    ];

    /// Child element name of this category inside a document of `kind`.
    ///
    /// Tabs are the only category whose element differs between permission
    /// sets (`tabSettings`) and profiles (`tabVisibilities`).
    pub fn element_name(self, kind: DocumentKind) -> &'static str {
        match self {
            PermissionCategory::ApplicationVisibility => "applicationVisibilities",
            PermissionCategory::ClassAccess => "classAccesses",
            PermissionCategory::FieldPermission => "fieldPermissions",
            PermissionCategory::FlowAccess => "flowAccesses",
            PermissionCategory::ObjectPermission => "objectPermissions",
            PermissionCategory::PageAccess => "pageAccesses",
            PermissionCategory::RecordTypeVisibility => "recordTypeVisibilities",
            PermissionCategory::License => "license",
            PermissionCategory::TabSetting => match kind {
                DocumentKind::PermissionSet => "tabSettings",
                DocumentKind::Profile => "tabVisibilities",
            },
            PermissionCategory::UserPermission => "userPermissions",
        }
    }

    /// Resolve a child element name back to its category.
    pub fn from_element(kind: DocumentKind, name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.element_name(kind) == name)
    }

    /// Attribute naming an item within this category.
    ///
    /// Licenses have no identity key: the entry is a bare value and any
    /// source license matches any target license.
    pub fn identity_key(self) -> Option<&'static str> {
        match self {
            PermissionCategory::ApplicationVisibility => Some("application"),
            PermissionCategory::ClassAccess => Some("apexClass"),
            PermissionCategory::FieldPermission => Some("field"),
            PermissionCategory::FlowAccess => Some("flow"),
            PermissionCategory::ObjectPermission => Some("object"),
            PermissionCategory::PageAccess => Some("apexPage"),
            PermissionCategory::RecordTypeVisibility => Some("recordType"),
            PermissionCategory::License => None,
            PermissionCategory::TabSetting => Some("tab"),
            PermissionCategory::UserPermission => Some("name"),
        }
    }

    /// Identity key with the `name` fallback applied.
    pub fn identity_attribute(self) -> &'static str {
        self.identity_key().unwrap_or(DEFAULT_IDENTITY_KEY)
    }

    /// True for categories matched without looking at identity.
    pub fn is_wildcard(self) -> bool {
        self.identity_key().is_none()
    }

    /// Boolean grant attributes tracked for this category.
    pub fn grant_attributes(self) -> &'static [GrantAttribute] {
        match self {
            PermissionCategory::ApplicationVisibility => APPLICATION_GRANTS,
            PermissionCategory::ClassAccess
            | PermissionCategory::FlowAccess
            | PermissionCategory::PageAccess
            | PermissionCategory::UserPermission => ENABLED_GRANTS,
            PermissionCategory::FieldPermission => FIELD_GRANTS,
            PermissionCategory::ObjectPermission => OBJECT_GRANTS,
            PermissionCategory::RecordTypeVisibility => RECORD_TYPE_GRANTS,
            PermissionCategory::License | PermissionCategory::TabSetting => &[],
        }
    }

    /// The flag that decides whether an item is granted at all.
    ///
    /// `None` for tabs (decided by visibility) and licenses (always granted).
    pub fn positive_attribute(self) -> Option<&'static str> {
        match self {
            PermissionCategory::ApplicationVisibility
            | PermissionCategory::RecordTypeVisibility => Some("visible"),
            PermissionCategory::ClassAccess
            | PermissionCategory::FlowAccess
            | PermissionCategory::PageAccess
            | PermissionCategory::UserPermission => Some("enabled"),
            PermissionCategory::FieldPermission => Some("readable"),
            PermissionCategory::ObjectPermission => Some("allowRead"),
            PermissionCategory::License | PermissionCategory::TabSetting => None,
        }
    }

    /// Whether items carry the tri-state `visibility` attribute.
    pub fn has_visibility(self) -> bool {
        matches!(self, PermissionCategory::TabSetting)
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            PermissionCategory::ApplicationVisibility => "application visibility",
            PermissionCategory::ClassAccess => "class access",
            PermissionCategory::FieldPermission => "field permission",
            PermissionCategory::FlowAccess => "flow access",
            PermissionCategory::ObjectPermission => "object permission",
            PermissionCategory::PageAccess => "page access",
            PermissionCategory::RecordTypeVisibility => "record type visibility",
            PermissionCategory::License => "license",
            PermissionCategory::TabSetting => "tab setting",
            PermissionCategory::UserPermission => "user permission",
        }
    }
}

impl fmt::Display for PermissionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
