//! Field descriptors.

use core::{fmt, ops::Deref};

use serde::{ser::SerializeStruct, Serialize};

use crate::{info::FieldInfo, Error, Kind, Reflect, Result, Tags, Value};

/// One declared field of an introspected instance.
///
/// The value is a snapshot taken when the [`Reflection`](super::Reflection) was constructed, and
/// only for exported fields. It is not refreshed by later sets.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    info: &'static FieldInfo,
    index: usize,
    value: Option<Value>,
}

impl FieldDescriptor {
    pub(super) fn new(info: &'static FieldInfo, index: usize, value: Option<Value>) -> Self {
        Self { info, index, value }
    }

    /// The name of the field.
    pub fn name(&self) -> &'static str {
        self.info.name()
    }

    /// The declared type of the field, as written.
    pub fn type_name(&self) -> &'static str {
        self.info.type_name()
    }

    /// The kind of the declared type.
    pub fn kind(&self) -> Kind {
        self.info.kind()
    }

    /// The snapshot of the field value, `None` for unexported fields.
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Whether the field is visible outside its record.
    pub fn is_exported(&self) -> bool {
        self.info.is_exported()
    }

    /// Whether the field is an embedded member.
    pub fn is_embedded(&self) -> bool {
        self.info.is_embedded()
    }

    /// All tags of the field.
    pub fn tags(&self) -> &'static Tags {
        self.info.tags()
    }

    /// The tag value for `key`, or an empty string if there is no such tag.
    pub fn tag(&self, key: &str) -> &'static str {
        self.info.tags().get(key)
    }

    /// The tag value for `key`, if present.
    pub fn lookup_tag(&self, key: &str) -> Option<&'static str> {
        self.info.tags().lookup(key)
    }

    /// Doc comments of the field declaration.
    pub fn docs(&self) -> &'static [&'static str] {
        self.info.docs()
    }

    /// The declaration index of the field.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl Serialize for FieldDescriptor {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut s = serializer.serialize_struct("Field", 7)?;
        s.serialize_field("name", self.name())?;
        s.serialize_field("type", self.type_name())?;
        s.serialize_field("kind", &self.kind())?;
        s.serialize_field("exported", &self.is_exported())?;
        s.serialize_field("embedded", &self.is_embedded())?;
        s.serialize_field("tags", self.tags())?;
        s.serialize_field("value", &self.value)?;
        s.end()
    }
}

/// A field descriptor paired with the storage of the field.
///
/// The storage is only available when the instance was introspected through an exclusive
/// borrow. Writes go to the instance itself.
pub struct FieldMut<'r> {
    descriptor: &'r FieldDescriptor,
    slot: Option<&'r mut dyn Reflect>,
}

impl<'r> FieldMut<'r> {
    pub(super) fn new(descriptor: &'r FieldDescriptor, slot: Option<&'r mut dyn Reflect>) -> Self {
        Self { descriptor, slot }
    }

    /// Whether the field can be assigned: its storage is addressable and it is exported.
    pub fn can_set(&self) -> bool {
        self.slot.is_some() && self.descriptor.is_exported()
    }

    /// The current value of the field, `None` for unexported fields.
    pub fn get(&self) -> Option<&dyn Reflect> {
        if !self.descriptor.is_exported() {
            return None;
        }

        self.slot.as_deref()
    }

    /// Assign `value` to the field.
    ///
    /// The value must be of the declared type of the field; no conversion is attempted. On
    /// failure the field is left untouched.
    pub fn set<T: Reflect>(&mut self, value: T) -> Result<()> {
        self.set_value(Value::new(value))
    }

    /// Assign an already type-erased `value` to the field.
    pub fn set_value(&mut self, value: Value) -> Result<()> {
        let name = self.descriptor.name();
        let slot = match self.slot.as_deref_mut() {
            Some(slot) if self.descriptor.is_exported() => slot,
            _ => {
                debug!("Field `{name}` is not settable");
                return Err(Error::NotSettable(name.to_string()));
            }
        };

        let expected = (*slot).type_name();
        let found = value.type_name();
        slot.assign(value).map_err(|_| {
            debug!("Rejected value of type `{found}` for field `{name}` of type `{expected}`");
            Error::TypeMismatch {
                field: name.to_string(),
                expected,
                found,
            }
        })?;
        trace!("Assigned field `{name}`");

        Ok(())
    }

    /// Like [`FieldMut::set`] but panics on failure.
    #[track_caller]
    pub fn must_set<T: Reflect>(&mut self, value: T) {
        if let Err(e) = self.set(value) {
            panic!("{e}");
        }
    }

    /// The descriptor of the field.
    pub fn descriptor(&self) -> &'r FieldDescriptor {
        self.descriptor
    }
}

impl Deref for FieldMut<'_> {
    type Target = FieldDescriptor;

    fn deref(&self) -> &Self::Target {
        self.descriptor
    }
}

impl fmt::Debug for FieldMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("FieldMut");
        s.field("descriptor", self.descriptor);
        if let Some(current) = self.get() {
            s.field("current", &current);
        }
        s.finish()
    }
}
