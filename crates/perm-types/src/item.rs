use serde::{Deserialize, Serialize};
use std::fmt;

use crate::category::{PermissionCategory, VISIBILITY_ATTRIBUTE};
use crate::error::TypesError;
use crate::visibility::TabVisibility;

/// The value of one attribute of a permission item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeValue {
    Flag(bool),
    Visibility(TabVisibility),
    /// Identity values and anything that is neither a flag nor a visibility
    Text(String),
}

impl AttributeValue {
    /// Interpret raw document text for attribute `name` of `category`.
    pub fn parse(category: PermissionCategory, name: &str, raw: &str) -> Self {
        if category.identity_key() == Some(name) {
            return AttributeValue::Text(raw.to_string());
        }
        if category.has_visibility() && name == VISIBILITY_ATTRIBUTE {
            return AttributeValue::Visibility(TabVisibility::from(raw));
        }
        match raw {
            "true" => AttributeValue::Flag(true),
            "false" => AttributeValue::Flag(false),
            other => AttributeValue::Text(other.to_string()),
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            AttributeValue::Flag(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_visibility(&self) -> Option<&TabVisibility> {
        match self {
            AttributeValue::Visibility(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Flag(value) => write!(f, "{value}"),
            AttributeValue::Visibility(value) => write!(f, "{value}"),
            AttributeValue::Text(value) => f.write_str(value),
        }
    }
}

/// One entry within a permission category.
///
/// `attributes` keeps document order and includes the identity attribute;
/// `identity` caches its value. License entries are a bare value: the value
/// is the identity and there are no attributes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionItem {
    pub identity: String,
    pub attributes: Vec<(String, AttributeValue)>,
}

impl PermissionItem {
    /// Build an item from attributes read off a document.
    pub fn from_attributes(
        category: PermissionCategory,
        attributes: Vec<(String, AttributeValue)>,
    ) -> Result<Self, TypesError> {
        let key = category.identity_attribute();
        let identity = attributes
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.to_string())
            .ok_or(TypesError::MissingIdentity { category, key })?;
        Ok(Self {
            identity,
            attributes,
        })
    }

    /// A license entry.
    pub fn license(value: impl Into<String>) -> Self {
        Self {
            identity: value.into(),
            attributes: Vec::new(),
        }
    }

    /// Assemble a fresh output item. Attributes, identity included, are
    /// emitted in alphabetical order as metadata documents expect.
    pub fn assemble<I>(category: PermissionCategory, identity: impl Into<String>, grants: I) -> Self
    where
        I: IntoIterator<Item = (String, AttributeValue)>,
    {
        let identity = identity.into();
        let mut attributes: Vec<(String, AttributeValue)> = grants.into_iter().collect();
        if let Some(key) = category.identity_key() {
            attributes.push((key.to_string(), AttributeValue::Text(identity.clone())));
        }
        attributes.sort_by(|(a, _), (b, _)| a.cmp(b));
        Self {
            identity,
            attributes,
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Boolean value of `name`; `None` when absent or not a flag.
    pub fn flag(&self, name: &str) -> Option<bool> {
        self.attribute(name).and_then(AttributeValue::as_flag)
    }

    pub fn visibility(&self) -> Option<&TabVisibility> {
        self.attribute(VISIBILITY_ATTRIBUTE)
            .and_then(AttributeValue::as_visibility)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, readable: bool, editable: bool) -> PermissionItem {
        PermissionItem::from_attributes(
            PermissionCategory::FieldPermission,
            vec![
                ("editable".into(), AttributeValue::Flag(editable)),
                ("field".into(), AttributeValue::Text(name.into())),
                ("readable".into(), AttributeValue::Flag(readable)),
            ],
        )
        .unwrap()
    }

    #[test]
    fn identity_is_read_from_key_attribute() {
        let item = field("Account.Name", true, false);
        assert_eq!(item.identity, "Account.Name");
        assert_eq!(item.flag("readable"), Some(true));
        assert_eq!(item.flag("editable"), Some(false));
        assert_eq!(item.flag("field"), None);
    }

    #[test]
    fn missing_identity_is_rejected() {
        let err = PermissionItem::from_attributes(
            PermissionCategory::ObjectPermission,
            vec![("allowRead".into(), AttributeValue::Flag(true))],
        )
        .unwrap_err();
        assert_eq!(
            err,
            TypesError::MissingIdentity {
                category: PermissionCategory::ObjectPermission,
                key: "object",
            }
        );
    }

    #[test]
    fn parse_keeps_identity_as_text() {
        let value = AttributeValue::parse(PermissionCategory::UserPermission, "name", "true");
        assert_eq!(value, AttributeValue::Text("true".into()));

        let value = AttributeValue::parse(PermissionCategory::UserPermission, "enabled", "true");
        assert_eq!(value, AttributeValue::Flag(true));
    }

    #[test]
    fn parse_reads_tab_visibility() {
        let value =
            AttributeValue::parse(PermissionCategory::TabSetting, "visibility", "DefaultOff");
        assert_eq!(value, AttributeValue::Visibility(TabVisibility::DefaultOff));

        let value = AttributeValue::parse(PermissionCategory::TabSetting, "visibility", "Maybe");
        assert_eq!(
            value.as_visibility(),
            Some(&TabVisibility::Other("Maybe".into()))
        );
        assert_eq!(value.to_string(), "Maybe");
    }

    #[test]
    fn parse_keeps_other_text() {
        let value = AttributeValue::parse(PermissionCategory::FieldPermission, "label", "Name");
        assert_eq!(value, AttributeValue::Text("Name".into()));
        assert_eq!(value.as_flag(), None);
    }

    #[test]
    fn assemble_sorts_attributes_with_identity() {
        let item = PermissionItem::assemble(
            PermissionCategory::FieldPermission,
            "Account.Name",
            [
                ("readable".to_string(), AttributeValue::Flag(true)),
                ("editable".to_string(), AttributeValue::Flag(false)),
            ],
        );
        let names: Vec<&str> = item.attributes.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["editable", "field", "readable"]);
        assert_eq!(item.identity, "Account.Name");
    }

    #[test]
    fn license_has_no_attributes() {
        let item = PermissionItem::license("Salesforce");
        assert_eq!(item.identity, "Salesforce");
        assert!(item.attributes.is_empty());
    }

    #[test]
    fn value_display_matches_document_text() {
        assert_eq!(AttributeValue::Flag(false).to_string(), "false");
        assert_eq!(
            AttributeValue::Visibility(TabVisibility::NoAccess).to_string(),
            "None"
        );
    }
}
