//! Record type definitions.

use super::FieldInfo;

/// The static description of a record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordInfo {
    /// The bare name of the type.
    name: &'static str,
    /// The path of the module declaring the type.
    module_path: &'static str,
    /// The declared fields, in declaration order.
    fields: &'static [FieldInfo],
}

impl RecordInfo {
    /// Creates a new record description.
    pub const fn new(
        name: &'static str,
        module_path: &'static str,
        fields: &'static [FieldInfo],
    ) -> Self {
        Self {
            name,
            module_path,
            fields,
        }
    }

    /// The bare name of the type.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The path of the module declaring the type.
    pub const fn module_path(&self) -> &'static str {
        self.module_path
    }

    /// The declared fields, in declaration order.
    pub const fn fields(&self) -> &'static [FieldInfo] {
        self.fields
    }

    /// The namespace of the type: the module path without its first segment, joined with `.`.
    ///
    /// Both `::` and `/` separate segments, so `host/org/project/package` and
    /// `my_crate::models::user` give `org.project.package` and `models.user`.
    pub fn namespace(&self) -> String {
        let mut segments = self
            .module_path
            .split("::")
            .flat_map(|segment| segment.split('/'));
        segments.next();

        segments.collect::<Vec<_>>().join(".")
    }

    /// The namespace and the name joined with `.`.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.namespace(), self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespace_from_slash_path() {
        let info = RecordInfo::new("MyTestStruct", "host/org/project/package", &[]);
        assert_eq!(info.namespace(), "org.project.package");
        assert_eq!(info.qualified_name(), "org.project.package.MyTestStruct");
    }

    #[test]
    fn namespace_from_module_path() {
        let info = RecordInfo::new("User", "my_crate::models::user", &[]);
        assert_eq!(info.namespace(), "models.user");
        assert_eq!(info.qualified_name(), "models.user.User");
    }

    #[test]
    fn namespace_of_crate_root() {
        let info = RecordInfo::new("Config", "my_crate", &[]);
        assert_eq!(info.namespace(), "");
        assert_eq!(info.qualified_name(), ".Config");
    }
}
