//! Introspection of record instances.
//!
//! [`Reflection`] is the entry point: constructed from a borrow of an instance, it enumerates the
//! fields and methods of the instance once and then answers name-indexed queries against them.
//!
//! The kind of borrow determines what can be done through the reflection:
//!
//! - A shared borrow (`&T`) gives the value form: fields can be read but not set, and only the
//!   `&self` methods are callable.
//! - An exclusive borrow (`&mut T`) gives the pointer form: exported fields can be set, and both
//!   the `&self` and the `&mut self` methods are callable. Writes go to the instance itself.
//!
//! The reflection does no synchronization of its own. To introspect an instance shared between
//! threads, introspect the guard of whatever lock protects it.

use core::fmt;

use indexmap::IndexMap;
use serde::{ser::SerializeStruct, Serialize};

use crate::{info::Receiver, Error, Record, RecordInfo, Reflect, Result, Value};

mod field;
pub use field::{FieldDescriptor, FieldMut};

mod method;
use method::Bound;
pub use method::{BoundMethod, MethodDescriptor};


/// An instance to introspect, as borrowed by the caller.
#[derive(Debug)]
pub enum Instance<'a> {
    /// The value form: read-only access.
    Value(&'a dyn Reflect),
    /// The pointer form: fields can be set and `&mut self` methods called.
    Pointer(&'a mut dyn Reflect),
}

impl<'a, T: Reflect> From<&'a T> for Instance<'a> {
    fn from(value: &'a T) -> Self {
        Instance::Value(value)
    }
}

impl<'a, T: Reflect> From<&'a mut T> for Instance<'a> {
    fn from(value: &'a mut T) -> Self {
        Instance::Pointer(value)
    }
}

impl<'a> From<&'a dyn Reflect> for Instance<'a> {
    fn from(value: &'a dyn Reflect) -> Self {
        Instance::Value(value)
    }
}

impl<'a> From<&'a mut dyn Reflect> for Instance<'a> {
    fn from(value: &'a mut dyn Reflect) -> Self {
        Instance::Pointer(value)
    }
}

/// The borrowed record being introspected.
enum Target<'a> {
    Shared(&'a dyn Record),
    Exclusive(&'a mut dyn Record),
}

impl Target<'_> {
    fn record(&self) -> &dyn Record {
        match self {
            Target::Shared(record) => *record,
            Target::Exclusive(record) => &**record,
        }
    }
}

/// A queryable, type-erased view of one record instance.
///
/// # Examples
///
/// ```rust
/// use zreflect::{Reflect, Reflection};
///
/// #[derive(Clone, Reflect)]
/// struct Server {
///     #[zreflect(tag(json = "host"))]
///     pub hostname: String,
///     pub port: u16,
///     secret: String,
/// }
///
/// let mut server = Server {
///     hostname: "localhost".into(),
///     port: 8080,
///     secret: "hunter2".into(),
/// };
///
/// let mut reflection = Reflection::new(&mut server).unwrap();
/// assert_eq!(reflection.name(), "Server");
/// assert_eq!(reflection.field_names().collect::<Vec<_>>(), ["hostname", "port", "secret"]);
/// assert_eq!(reflection.get_tag("hostname", "json").unwrap(), "host");
///
/// // Snapshots are taken of exported fields only.
/// assert!(reflection.get("secret").unwrap().is_none());
///
/// reflection.set("port", 9090u16).unwrap();
/// assert!(reflection.set("port", 9090u32).is_err());
/// assert!(reflection.set("secret", String::new()).is_err());
/// drop(reflection);
/// assert_eq!(server.port, 9090);
/// ```
pub struct Reflection<'a> {
    target: Target<'a>,
    qualified_type: String,
    info: &'static RecordInfo,
    namespace: String,
    qualified_name: String,
    fields: IndexMap<&'static str, FieldDescriptor>,
    methods: IndexMap<&'static str, MethodDescriptor>,
}

impl<'a> Reflection<'a> {
    /// Introspect `instance`.
    ///
    /// The instance must be a record or a pointer-like value (a `Box` or a [`Value`]) holding a
    /// record. Anything else is rejected with [`Error::InvalidKind`].
    pub fn new(instance: impl Into<Instance<'a>>) -> Result<Self> {
        let (target, qualified_type) = match instance.into() {
            Instance::Value(value) => {
                let qualified_type = instance_type_name(value).to_string();
                (Target::Shared(resolve(value)?), qualified_type)
            }
            Instance::Pointer(value) => {
                let qualified_type = format!("&mut {}", instance_type_name(&*value));
                (Target::Exclusive(resolve_mut(value)?), qualified_type)
            }
        };

        let record = target.record();
        let info = record.record_info();
        let exclusive = matches!(target, Target::Exclusive(_));
        let fields = load_fields(record);
        let methods = load_methods(record, exclusive);
        debug!(
            "Introspected `{qualified_type}`: {} field(s), {} method(s)",
            fields.len(),
            methods.len()
        );

        Ok(Self {
            target,
            qualified_type,
            info,
            namespace: info.namespace(),
            qualified_name: info.qualified_name(),
            fields,
            methods,
        })
    }

    /// Like [`Reflection::new`] but panics on failure.
    #[track_caller]
    pub fn must_new(instance: impl Into<Instance<'a>>) -> Self {
        Self::new(instance).unwrap_or_else(|e| panic!("{e}"))
    }

    /// The full type name of the instance.
    ///
    /// Prefixed with `&mut ` for the pointer form.
    pub fn qualified_type(&self) -> &str {
        &self.qualified_type
    }

    /// The bare name of the record type.
    pub fn name(&self) -> &'static str {
        self.info.name()
    }

    /// The path of the module declaring the record type.
    pub fn module_path(&self) -> &'static str {
        self.info.module_path()
    }

    /// The module path without its first segment, joined with `.`.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The namespace and the name joined with `.`.
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    /// Whether the introspection is in the pointer form.
    pub fn is_exclusive(&self) -> bool {
        matches!(self.target, Target::Exclusive(_))
    }

    /// Whether the record declares a field named `name`.
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Whether a method named `name` is callable on the instance.
    pub fn has_method(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    /// The snapshot of the field `name`, taken at construction.
    ///
    /// Unexported fields have no snapshot.
    pub fn get(&self, name: &str) -> Result<Option<&Value>> {
        self.field(name)
            .map(FieldDescriptor::value)
            .ok_or_else(|| Error::FieldNotFound(name.to_string()))
    }

    /// Like [`Reflection::get`] but panics on failure.
    #[track_caller]
    pub fn must_get(&self, name: &str) -> Option<&Value> {
        self.get(name).unwrap_or_else(|e| panic!("{e}"))
    }

    /// The current value of the field `name`.
    ///
    /// Unlike [`Reflection::get`], this reads the instance and so sees every set made since
    /// construction. Unexported fields read as `None`.
    pub fn read(&self, name: &str) -> Result<Option<&dyn Reflect>> {
        let field = self
            .field(name)
            .ok_or_else(|| Error::FieldNotFound(name.to_string()))?;
        if !field.is_exported() {
            return Ok(None);
        }

        Ok(self.target.record().field(field.index()))
    }

    /// Assign `value` to the field `name` of the instance.
    ///
    /// Fails if the field does not exist, is not settable or `value` is not of its declared type.
    /// The snapshot returned by [`Reflection::get`] is not updated.
    pub fn set<T: Reflect>(&mut self, name: &str, value: T) -> Result<()> {
        self.field_mut(name)
            .ok_or_else(|| Error::FieldNotFound(name.to_string()))?
            .set(value)
    }

    /// Like [`Reflection::set`] but panics on failure.
    #[track_caller]
    pub fn must_set<T: Reflect>(&mut self, name: &str, value: T) {
        if let Err(e) = self.set(name, value) {
            panic!("{e}");
        }
    }

    /// The value of the tag `key` on the field `name`.
    ///
    /// Tag values are returned verbatim, so a present `"-"` is returned as is.
    pub fn get_tag(&self, name: &str, key: &str) -> Result<&'static str> {
        self.lookup_tag(name, key)?.ok_or_else(|| Error::TagNotFound {
            field: name.to_string(),
            tag: key.to_string(),
        })
    }

    /// Like [`Reflection::get_tag`] but panics on failure.
    #[track_caller]
    pub fn must_get_tag(&self, name: &str, key: &str) -> &'static str {
        self.get_tag(name, key).unwrap_or_else(|e| panic!("{e}"))
    }

    /// The value of the tag `key` on the field `name`, if present.
    pub fn lookup_tag(&self, name: &str, key: &str) -> Result<Option<&'static str>> {
        self.field(name)
            .map(|field| field.lookup_tag(key))
            .ok_or_else(|| Error::FieldNotFound(name.to_string()))
    }

    /// Call the method `name` with `args`, matched by position.
    pub fn call(&mut self, name: &str, args: Vec<Value>) -> Result<Vec<Value>> {
        self.method_mut(name)
            .ok_or_else(|| Error::MethodNotFound(name.to_string()))?
            .call(args)
    }

    /// Like [`Reflection::call`] but panics on failure.
    #[track_caller]
    pub fn must_call(&mut self, name: &str, args: Vec<Value>) -> Vec<Value> {
        self.call(name, args).unwrap_or_else(|e| panic!("{e}"))
    }

    /// The descriptor of the field `name`.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.get(name)
    }

    /// The field `name` paired with its storage in the instance.
    pub fn field_mut(&mut self, name: &str) -> Option<FieldMut<'_>> {
        let descriptor = self.fields.get(name)?;
        let slot = match &mut self.target {
            Target::Shared(_) => None,
            Target::Exclusive(record) => record.field_mut(descriptor.index()),
        };

        Some(FieldMut::new(descriptor, slot))
    }

    /// The descriptor of the method `name`.
    pub fn method(&self, name: &str) -> Option<&MethodDescriptor> {
        self.methods.get(name)
    }

    /// The method `name` bound to the instance.
    pub fn method_mut(&mut self, name: &str) -> Option<BoundMethod<'_>> {
        let descriptor = self.methods.get(name)?;
        let record = match &mut self.target {
            Target::Shared(record) => Bound::Shared(*record),
            Target::Exclusive(record) => Bound::Exclusive(&mut **record),
        };

        Some(BoundMethod::new(descriptor, record))
    }

    /// All fields, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.values()
    }

    /// All field names, in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.keys().copied()
    }

    /// All callable methods, in registration order.
    pub fn methods(&self) -> impl Iterator<Item = &MethodDescriptor> {
        self.methods.values()
    }

    /// All callable method names, in registration order.
    pub fn method_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.methods.keys().copied()
    }

    /// Render the descriptor as JSON.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self).map_err(Into::into)
    }
}

impl Serialize for Reflection<'_> {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let field_names: Vec<_> = self.field_names().collect();
        let method_names: Vec<_> = self.method_names().collect();

        let mut s = serializer.serialize_struct("Reflection", 8)?;
        s.serialize_field("type", &self.qualified_type)?;
        s.serialize_field("name", self.name())?;
        s.serialize_field("namespace", &self.namespace)?;
        s.serialize_field("qualifiedName", &self.qualified_name)?;
        s.serialize_field("fieldNames", &field_names)?;
        s.serialize_field("methodNames", &method_names)?;
        s.serialize_field("fields", &self.fields)?;
        s.serialize_field("methods", &self.methods)?;
        s.end()
    }
}

impl fmt::Display for Reflection<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string_pretty(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

impl fmt::Debug for Reflection<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reflection")
            .field("qualified_type", &self.qualified_type)
            .field("qualified_name", &self.qualified_name)
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

/// The type name of an instance, looking through a [`Value`] to the type it holds.
fn instance_type_name(value: &dyn Reflect) -> &'static str {
    match value.as_any().downcast_ref::<Value>() {
        Some(held) => held.type_name(),
        None => value.type_name(),
    }
}

/// The record behind a shared borrow.
fn resolve(value: &dyn Reflect) -> Result<&dyn Record> {
    if let Some(record) = value.as_record() {
        return Ok(record);
    }

    value
        .pointee()
        .and_then(|pointee| pointee.as_record())
        .ok_or(Error::InvalidKind(value.kind()))
}

/// The record behind an exclusive borrow.
fn resolve_mut(value: &mut dyn Reflect) -> Result<&mut dyn Record> {
    let kind = value.kind();
    if value.as_record().is_some() {
        return value.as_record_mut().ok_or(Error::InvalidKind(kind));
    }

    value
        .pointee_mut()
        .and_then(|pointee| pointee.as_record_mut())
        .ok_or(Error::InvalidKind(kind))
}

/// Build the field descriptors, snapshotting the exported fields.
fn load_fields(record: &dyn Record) -> IndexMap<&'static str, FieldDescriptor> {
    let info = record.record_info();
    let mut fields = IndexMap::with_capacity(info.fields().len());
    for (index, field) in info.fields().iter().enumerate() {
        let value = if field.is_exported() {
            let value = record.field(index).map(Reflect::clone_value);
            if value.is_none() {
                warn!("Record `{}` has no storage for field `{}`", info.name(), field.name());
            }
            value
        } else {
            None
        };
        trace!("Registered field `{}` of type `{}`", field.name(), field.type_name());

        fields.insert(field.name(), FieldDescriptor::new(field, index, value));
    }

    fields
}

/// Build the method descriptors.
///
/// The `&self` methods of all tables are registered first. For the pointer form the `&mut self`
/// methods follow and replace `&self` methods of the same name.
fn load_methods(record: &dyn Record, exclusive: bool) -> IndexMap<&'static str, MethodDescriptor> {
    let tables = record.methods();
    let mut methods = IndexMap::with_capacity(tables.iter().map(|table| table.len()).sum());
    let receivers: &[Receiver] = if exclusive {
        &[Receiver::Shared, Receiver::Exclusive]
    } else {
        &[Receiver::Shared]
    };
    for receiver in receivers {
        let table = tables.iter().flat_map(|table| table.iter());
        for method in table.filter(|method| method.receiver() == *receiver) {
            trace!("Registered method `{}` ({receiver})", method.name());
            methods.insert(method.name(), MethodDescriptor::new(method));
        }
    }

    methods
}
