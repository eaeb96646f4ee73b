//! Request-wide type registry used in single-package mode.
//!
//! Templates rendered for one file often need to know about messages and enums
//! declared in another file of the same compilation. The registry indexes every
//! file of the request once, through a [`prost_reflect::DescriptorPool`], and
//! answers lookups by fully-qualified name. It is built per run and handed to
//! encoders by shared reference.

use crate::error::{Error, Result};
use prost_reflect::{DescriptorPool, FieldDescriptor, Kind};
use prost_types::{FileDescriptorProto, FileDescriptorSet};
use serde::Serialize;

/// Index over every message and enum of a request.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    pool: DescriptorPool,
}

/// What a registry lookup resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Message,
    Enum,
}

/// A message or enum as seen from anywhere in the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedType {
    pub kind: TypeKind,
    /// Short name (`Outer.Inner` keeps only `Inner`)
    pub name: String,
    /// Fully-qualified name without the leading dot
    pub full_name: String,
    pub package: String,
    /// Name of the `.proto` file declaring the type
    pub file: String,
    /// Message fields, empty for enums
    pub fields: Vec<ResolvedField>,
    /// Enum values, empty for messages
    pub values: Vec<ResolvedValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedField {
    pub name: String,
    pub number: u32,
    /// Scalar type name, or `message` / `enum`
    #[serde(rename = "type")]
    pub ty: &'static str,
    /// Referenced message or enum, for non-scalar fields
    pub type_name: Option<String>,
    pub repeated: bool,
    pub map: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedValue {
    pub name: String,
    pub number: i32,
}

impl TypeRegistry {
    /// Index every file of the request.
    ///
    /// Fails when the files do not form a consistent descriptor set, e.g. a
    /// type is defined twice or a reference cannot be resolved.
    pub fn load(files: &[FileDescriptorProto]) -> Result<Self> {
        let set = FileDescriptorSet {
            file: files.to_vec(),
        };
        let pool = DescriptorPool::from_file_descriptor_set(set).map_err(Error::RegistryLoad)?;
        tracing::debug!(
            files = pool.files().count(),
            messages = pool.all_messages().count(),
            enums = pool.all_enums().count(),
            "type registry loaded"
        );
        Ok(Self { pool })
    }

    /// Ensure `name` was indexed.
    pub fn lookup_file(&self, name: &str) -> Result<()> {
        match self.pool.get_file_by_name(name) {
            Some(_) => Ok(()),
            None => Err(Error::FileNotIndexed(name.to_string())),
        }
    }

    /// Resolve a fully-qualified type name, with or without the leading dot.
    pub fn resolve(&self, type_name: &str) -> Option<ResolvedType> {
        let full_name = type_name.strip_prefix('.').unwrap_or(type_name);

        if let Some(message) = self.pool.get_message_by_name(full_name) {
            return Some(ResolvedType {
                kind: TypeKind::Message,
                name: message.name().to_string(),
                full_name: message.full_name().to_string(),
                package: message.package_name().to_string(),
                file: message.parent_file().name().to_string(),
                fields: message.fields().map(|f| resolve_field(&f)).collect(),
                values: Vec::new(),
            });
        }

        let enum_ = self.pool.get_enum_by_name(full_name)?;
        Some(ResolvedType {
            kind: TypeKind::Enum,
            name: enum_.name().to_string(),
            full_name: enum_.full_name().to_string(),
            package: enum_.package_name().to_string(),
            file: enum_.parent_file().name().to_string(),
            fields: Vec::new(),
            values: enum_
                .values()
                .map(|v| ResolvedValue {
                    name: v.name().to_string(),
                    number: v.number(),
                })
                .collect(),
        })
    }
}

fn resolve_field(field: &FieldDescriptor) -> ResolvedField {
    let (ty, type_name) = match field.kind() {
        Kind::Message(m) => ("message", Some(m.full_name().to_string())),
        Kind::Enum(e) => ("enum", Some(e.full_name().to_string())),
        Kind::Double => ("double", None),
        Kind::Float => ("float", None),
        Kind::Int32 => ("int32", None),
        Kind::Int64 => ("int64", None),
        Kind::Uint32 => ("uint32", None),
        Kind::Uint64 => ("uint64", None),
        Kind::Sint32 => ("sint32", None),
        Kind::Sint64 => ("sint64", None),
        Kind::Fixed32 => ("fixed32", None),
        Kind::Fixed64 => ("fixed64", None),
        Kind::Sfixed32 => ("sfixed32", None),
        Kind::Sfixed64 => ("sfixed64", None),
        Kind::Bool => ("bool", None),
        Kind::String => ("string", None),
        Kind::Bytes => ("bytes", None),
    };

    ResolvedField {
        name: field.name().to_string(),
        number: field.number(),
        ty,
        type_name,
        repeated: field.is_list(),
        map: field.is_map(),
    }
}
