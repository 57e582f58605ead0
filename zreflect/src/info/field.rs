//! Field definitions.

use crate::Kind;

use super::Tags;

/// The static description of a declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldInfo {
    /// The name of the field.
    name: &'static str,
    /// The declared type, as written.
    ty: &'static str,
    /// The kind of the declared type.
    kind: Kind,
    /// Whether the field is visible outside its record.
    exported: bool,
    /// Whether the field is an embedded member.
    embedded: bool,
    /// Annotations attached to the field declaration.
    tags: Tags,
    /// Doc comments of the field declaration.
    docs: &'static [&'static str],
}

impl FieldInfo {
    /// Creates a new unexported field with no tags.
    pub const fn new(name: &'static str, ty: &'static str, kind: Kind) -> Self {
        Self {
            name,
            ty,
            kind,
            exported: false,
            embedded: false,
            tags: Tags::new(&[]),
            docs: &[],
        }
    }

    /// Marks the field as exported.
    pub const fn exported(mut self) -> Self {
        self.exported = true;
        self
    }

    /// Marks the field as an embedded member.
    pub const fn embedded(mut self) -> Self {
        self.embedded = true;
        self
    }

    /// Attaches `tags` to the field.
    pub const fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }

    /// Attaches doc comments to the field.
    pub const fn with_docs(mut self, docs: &'static [&'static str]) -> Self {
        self.docs = docs;
        self
    }

    /// The name of the field.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The declared type, as written.
    pub const fn type_name(&self) -> &'static str {
        self.ty
    }

    /// The kind of the declared type.
    pub const fn kind(&self) -> Kind {
        self.kind
    }

    /// Whether the field is visible outside its record.
    pub const fn is_exported(&self) -> bool {
        self.exported
    }

    /// Whether the field is an embedded member.
    pub const fn is_embedded(&self) -> bool {
        self.embedded
    }

    /// Annotations attached to the field declaration.
    pub const fn tags(&self) -> &Tags {
        &self.tags
    }

    /// Doc comments of the field declaration.
    pub const fn docs(&self) -> &'static [&'static str] {
        self.docs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static FIELD: FieldInfo = FieldInfo::new("alias", "Option<String>", Kind::Option)
        .exported()
        .with_tags(Tags::new(&[("json", "alias,omitempty")]))
        .with_docs(&[" Alternative name."]);

    #[test]
    fn field_creation() {
        assert_eq!(FIELD.name(), "alias");
        assert_eq!(FIELD.type_name(), "Option<String>");
        assert_eq!(FIELD.kind(), Kind::Option);
        assert!(FIELD.is_exported());
        assert!(!FIELD.is_embedded());
        assert_eq!(FIELD.tags().get("json"), "alias,omitempty");
        assert_eq!(FIELD.docs(), &[" Alternative name."]);
    }

    #[test]
    fn unexported_by_default() {
        let field = FieldInfo::new("secret", "String", Kind::String).embedded();
        assert!(!field.is_exported());
        assert!(field.is_embedded());
        assert!(field.tags().is_empty());
    }
}
