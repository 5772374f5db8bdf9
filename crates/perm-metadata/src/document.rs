use perm_types::{
    AttributeValue, DocumentKind, PermissionCategory, PermissionCollection, PermissionItem,
};

use crate::element::Element;
use crate::error::{MetadataError, MetadataResult};
use crate::xml::{parse_xml, render_xml};

/// Namespace declared on generated permission sets.
pub const METADATA_NAMESPACE: &str = "http://soap.sforce.com/2006/04/metadata";

/// One slot of a document's child layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Section {
    /// All items of a category, emitted where the category first appeared
    Category(PermissionCategory),
    /// A child element that carries no permissions, kept verbatim
    Opaque(Element),
}

/// A permission set or profile document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetadataDocument {
    pub kind: DocumentKind,
    /// Attributes of the root element, `xmlns` included
    pub root_attributes: Vec<(String, String)>,
    pub permissions: PermissionCollection,
    layout: Vec<Section>,
}

impl MetadataDocument {
    /// Parse document text of the given kind.
    pub fn parse(kind: DocumentKind, xml: &str) -> MetadataResult<Self> {
        let root = parse_xml(xml)?;
        Self::from_element(kind, &root)
    }

    pub fn from_element(kind: DocumentKind, root: &Element) -> MetadataResult<Self> {
        if root.name != kind.root_element() {
            return Err(MetadataError::UnexpectedRoot {
                expected: kind,
                found: root.name.clone(),
            });
        }

        let mut permissions = PermissionCollection::new();
        let mut layout = Vec::new();
        for child in &root.children {
            match PermissionCategory::from_element(kind, &child.name) {
                Some(category) => {
                    if !permissions.contains(category) {
                        layout.push(Section::Category(category));
                    }
                    permissions.push(category, item_from_element(category, child)?);
                }
                None => layout.push(Section::Opaque(child.clone())),
            }
        }

        Ok(Self {
            kind,
            root_attributes: root.attributes.clone(),
            permissions,
            layout,
        })
    }

    /// A fresh permission set holding `categories` of `permissions`, in that order.
    pub fn permission_set(
        permissions: PermissionCollection,
        categories: &[PermissionCategory],
    ) -> Self {
        let layout = categories
            .iter()
            .copied()
            .filter(|category| permissions.contains(*category))
            .map(Section::Category)
            .collect();
        Self {
            kind: DocumentKind::PermissionSet,
            root_attributes: vec![("xmlns".to_string(), METADATA_NAMESPACE.to_string())],
            permissions,
            layout,
        }
    }

    pub fn namespace(&self) -> Option<&str> {
        self.root_attributes
            .iter()
            .find(|(key, _)| key == "xmlns")
            .map(|(_, value)| value.as_str())
    }

    pub fn layout(&self) -> &[Section] {
        &self.layout
    }

    /// Swap in new permissions, keeping everything else of the document.
    pub fn replace_permissions(&mut self, permissions: PermissionCollection) {
        self.permissions = permissions;
    }

    pub fn to_element(&self) -> Element {
        let mut root = Element::new(self.kind.root_element());
        root.attributes = self.root_attributes.clone();

        let mut emitted = Vec::new();
        for section in &self.layout {
            match section {
                Section::Category(category) => {
                    self.push_items(&mut root, *category);
                    emitted.push(*category);
                }
                Section::Opaque(element) => root.children.push(element.clone()),
            }
        }
        let remaining: Vec<PermissionCategory> = self
            .permissions
            .categories()
            .filter(|category| !emitted.contains(category))
            .collect();
        for category in remaining {
            self.push_items(&mut root, category);
        }
        root
    }

    fn push_items(&self, root: &mut Element, category: PermissionCategory) {
        for item in self.permissions.items_or_empty(category) {
            root.children.push(item_to_element(self.kind, category, item));
        }
    }

    /// Serialize without an XML prolog.
    pub fn render(&self) -> MetadataResult<String> {
        render_xml(&self.to_element())
    }
}

fn item_from_element(
    category: PermissionCategory,
    element: &Element,
) -> MetadataResult<PermissionItem> {
    if category.is_wildcard() {
        return Ok(PermissionItem::license(element.text()));
    }

    let mut attributes = Vec::with_capacity(element.children.len());
    for child in &element.children {
        if !child.is_leaf() {
            return Err(MetadataError::Malformed(format!(
                "{category} attribute <{}> has nested elements",
                child.name
            )));
        }
        let value = AttributeValue::parse(category, &child.name, child.text());
        attributes.push((child.name.clone(), value));
    }
    Ok(PermissionItem::from_attributes(category, attributes)?)
}

fn item_to_element(
    kind: DocumentKind,
    category: PermissionCategory,
    item: &PermissionItem,
) -> Element {
    let name = category.element_name(kind);
    if category.is_wildcard() {
        return Element::leaf(name, item.identity.as_str());
    }
    let mut element = Element::new(name);
    for (attribute, value) in &item.attributes {
        element
            .children
            .push(Element::leaf(attribute.as_str(), value.to_string()));
    }
    element
}
