//! Property model backing a property grid.

use std::collections::BTreeMap;

use super::value::{AttributeValue, PropertyType, PropertyValue};
use crate::error::{EditorError, EditorResult};

/// Identifier of a property inside one [`PropertyManager`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PropertyId(u32);

impl std::fmt::Display for PropertyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "property {}", self.0)
    }
}

/// A named, typed value plus its editor attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    id: PropertyId,
    name: String,
    value: PropertyValue,
    attributes: BTreeMap<String, AttributeValue>,
}

impl Property {
    pub fn id(&self) -> PropertyId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &PropertyValue {
        &self.value
    }

    /// The type is fixed by the value the property was created with.
    pub fn property_type(&self) -> PropertyType {
        self.value.property_type()
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }
}

/// Owns the properties shown in one grid.
#[derive(Debug, Default)]
pub struct PropertyManager {
    properties: BTreeMap<PropertyId, Property>,
    next_id: u32,
}

impl PropertyManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_property(&mut self, name: impl Into<String>, value: PropertyValue) -> PropertyId {
        let id = PropertyId(self.next_id);
        self.next_id += 1;
        let name = name.into();
        tracing::trace!("Adding {} '{}' of type {}", id, name, value.property_type());
        self.properties.insert(
            id,
            Property {
                id,
                name,
                value,
                attributes: BTreeMap::new(),
            },
        );
        id
    }

    pub fn remove_property(&mut self, id: PropertyId) -> Option<Property> {
        self.properties.remove(&id)
    }

    pub fn property(&self, id: PropertyId) -> EditorResult<&Property> {
        self.properties
            .get(&id)
            .ok_or(EditorError::UnknownProperty { id })
    }

    /// Looks a property up by display name.
    pub fn find(&self, name: &str) -> Option<&Property> {
        self.properties.values().find(|p| p.name == name)
    }

    pub fn value(&self, id: PropertyId) -> EditorResult<&PropertyValue> {
        self.property(id).map(Property::value)
    }

    pub fn property_type(&self, id: PropertyId) -> EditorResult<PropertyType> {
        self.property(id).map(Property::property_type)
    }

    /// Assigns a value of the property's own type.
    ///
    /// Returns whether the stored value changed.
    pub fn set_value(&mut self, id: PropertyId, value: PropertyValue) -> EditorResult<bool> {
        let property = self.property_mut(id)?;
        let expected = property.property_type();
        let actual = value.property_type();
        if expected != actual {
            return Err(EditorError::TypeMismatch { expected, actual });
        }
        if property.value == value {
            return Ok(false);
        }
        tracing::trace!("{} '{}' = {}", id, property.name, value);
        property.value = value;
        Ok(true)
    }

    pub fn attribute(&self, id: PropertyId, name: &str) -> EditorResult<Option<&AttributeValue>> {
        self.property(id).map(|p| p.attribute(name))
    }

    /// Returns whether the attribute changed.
    pub fn set_attribute(
        &mut self,
        id: PropertyId,
        name: impl Into<String>,
        value: AttributeValue,
    ) -> EditorResult<bool> {
        let property = self.property_mut(id)?;
        let name = name.into();
        if property.attributes.get(&name) == Some(&value) {
            return Ok(false);
        }
        property.attributes.insert(name, value);
        Ok(true)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Properties in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Property> {
        self.properties.values()
    }

    fn property_mut(&mut self, id: PropertyId) -> EditorResult<&mut Property> {
        self.properties
            .get_mut(&id)
            .ok_or(EditorError::UnknownProperty { id })
    }
}
