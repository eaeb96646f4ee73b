//! Schema units and the serializable views templates see.
//!
//! `prost_types` descriptors are faithful to the wire format but awkward to
//! template against (optional everything, enum values as `i32`, dot-prefixed
//! type names). The views below flatten them into plain data. When a
//! [`TypeRegistry`] is available, every type reference also carries the
//! resolved message or enum.

use crate::registry::{ResolvedType, TypeRegistry};
use prost_types::field_descriptor_proto::{Label, Type};
use prost_types::{
    DescriptorProto, EnumDescriptorProto, FieldDescriptorProto, FileDescriptorProto,
    MethodDescriptorProto, ServiceDescriptorProto,
};
use serde::Serialize;
use std::fmt;

/// The unit of work handed to one encoder invocation.
#[derive(Debug, Clone, Copy)]
pub enum SchemaUnit<'a> {
    /// A whole `.proto` file
    File(&'a FileDescriptorProto),
    /// One service, with the file declaring it
    Service {
        file: &'a FileDescriptorProto,
        service: &'a ServiceDescriptorProto,
    },
}

impl SchemaUnit<'_> {
    pub fn file(&self) -> &FileDescriptorProto {
        match self {
            SchemaUnit::File(file) | SchemaUnit::Service { file, .. } => file,
        }
    }
}

impl fmt::Display for SchemaUnit<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaUnit::File(file) => write!(f, "file {:?}", file.name()),
            SchemaUnit::Service { file, service } => {
                write!(f, "service {:?} in file {:?}", service.name(), file.name())
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FileView {
    pub name: String,
    pub package: String,
    pub syntax: String,
    pub dependencies: Vec<String>,
    pub options: FileOptionsView,
    pub messages: Vec<MessageView>,
    pub enums: Vec<EnumView>,
    pub services: Vec<ServiceView>,
}

/// The language-specific file options templates commonly need.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FileOptionsView {
    pub go_package: Option<String>,
    pub java_package: Option<String>,
    pub java_multiple_files: bool,
    pub csharp_namespace: Option<String>,
    pub objc_class_prefix: Option<String>,
    pub php_namespace: Option<String>,
    pub ruby_package: Option<String>,
    pub swift_prefix: Option<String>,
    pub deprecated: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageView {
    pub name: String,
    pub full_name: String,
    pub fields: Vec<FieldView>,
    pub messages: Vec<MessageView>,
    pub enums: Vec<EnumView>,
    pub oneofs: Vec<String>,
    pub map_entry: bool,
    pub deprecated: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldView {
    pub name: String,
    pub json_name: String,
    pub number: i32,
    pub label: &'static str,
    #[serde(rename = "type")]
    pub ty: &'static str,
    /// Referenced message or enum, without the leading dot
    pub type_name: Option<String>,
    pub oneof: Option<String>,
    pub proto3_optional: bool,
    pub resolved: Option<ResolvedType>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnumView {
    pub name: String,
    pub full_name: String,
    pub values: Vec<EnumValueView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnumValueView {
    pub name: String,
    pub number: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceView {
    pub name: String,
    pub full_name: String,
    pub methods: Vec<MethodView>,
    pub deprecated: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct MethodView {
    pub name: String,
    pub input_type: String,
    pub output_type: String,
    pub client_streaming: bool,
    pub server_streaming: bool,
    pub input: Option<ResolvedType>,
    pub output: Option<ResolvedType>,
}

impl FileView {
    /// The whole file: messages, enums and services.
    pub fn new(file: &FileDescriptorProto, registry: Option<&TypeRegistry>) -> Self {
        let package = file.package();
        Self {
            messages: file
                .message_type
                .iter()
                .map(|m| MessageView::new(m, package, registry))
                .collect(),
            enums: file.enum_type.iter().map(|e| EnumView::new(e, package)).collect(),
            services: file
                .service
                .iter()
                .map(|s| ServiceView::new(s, package, registry))
                .collect(),
            ..Self::header(file)
        }
    }

    /// Package and import context only.
    pub fn header(file: &FileDescriptorProto) -> Self {
        Self {
            name: file.name().to_string(),
            package: file.package().to_string(),
            syntax: match file.syntax() {
                "" => "proto2".to_string(),
                syntax => syntax.to_string(),
            },
            dependencies: file.dependency.clone(),
            options: file
                .options
                .as_ref()
                .map(|o| FileOptionsView {
                    go_package: o.go_package.clone(),
                    java_package: o.java_package.clone(),
                    java_multiple_files: o.java_multiple_files(),
                    csharp_namespace: o.csharp_namespace.clone(),
                    objc_class_prefix: o.objc_class_prefix.clone(),
                    php_namespace: o.php_namespace.clone(),
                    ruby_package: o.ruby_package.clone(),
                    swift_prefix: o.swift_prefix.clone(),
                    deprecated: o.deprecated(),
                })
                .unwrap_or_default(),
            messages: Vec::new(),
            enums: Vec::new(),
            services: Vec::new(),
        }
    }
}

impl MessageView {
    fn new(message: &DescriptorProto, scope: &str, registry: Option<&TypeRegistry>) -> Self {
        let full_name = qualify(scope, message.name());
        let oneofs: Vec<String> = message
            .oneof_decl
            .iter()
            .map(|o| o.name().to_string())
            .collect();
        let options = message.options.as_ref();

        Self {
            name: message.name().to_string(),
            fields: message
                .field
                .iter()
                .map(|f| FieldView::new(f, &oneofs, registry))
                .collect(),
            messages: message
                .nested_type
                .iter()
                .map(|m| MessageView::new(m, &full_name, registry))
                .collect(),
            enums: message
                .enum_type
                .iter()
                .map(|e| EnumView::new(e, &full_name))
                .collect(),
            map_entry: options.is_some_and(|o| o.map_entry()),
            deprecated: options.is_some_and(|o| o.deprecated()),
            oneofs,
            full_name,
        }
    }
}

impl FieldView {
    fn new(field: &FieldDescriptorProto, oneofs: &[String], registry: Option<&TypeRegistry>) -> Self {
        let type_name = field
            .type_name
            .as_deref()
            .map(|t| t.trim_start_matches('.').to_string());

        Self {
            name: field.name().to_string(),
            json_name: field.json_name().to_string(),
            number: field.number(),
            label: label_name(field.label()),
            ty: type_name_of(field.r#type()),
            oneof: field
                .oneof_index
                .and_then(|i| usize::try_from(i).ok())
                .and_then(|i| oneofs.get(i).cloned()),
            proto3_optional: field.proto3_optional(),
            resolved: registry
                .zip(type_name.as_deref())
                .and_then(|(r, t)| r.resolve(t)),
            type_name,
        }
    }
}

impl EnumView {
    fn new(enum_: &EnumDescriptorProto, scope: &str) -> Self {
        Self {
            name: enum_.name().to_string(),
            full_name: qualify(scope, enum_.name()),
            values: enum_
                .value
                .iter()
                .map(|v| EnumValueView {
                    name: v.name().to_string(),
                    number: v.number(),
                })
                .collect(),
        }
    }
}

impl ServiceView {
    pub fn new(
        service: &ServiceDescriptorProto,
        package: &str,
        registry: Option<&TypeRegistry>,
    ) -> Self {
        Self {
            name: service.name().to_string(),
            full_name: qualify(package, service.name()),
            methods: service
                .method
                .iter()
                .map(|m| MethodView::new(m, registry))
                .collect(),
            deprecated: service.options.as_ref().is_some_and(|o| o.deprecated()),
        }
    }
}

impl MethodView {
    fn new(method: &MethodDescriptorProto, registry: Option<&TypeRegistry>) -> Self {
        let input_type = method.input_type().trim_start_matches('.').to_string();
        let output_type = method.output_type().trim_start_matches('.').to_string();
        Self {
            name: method.name().to_string(),
            client_streaming: method.client_streaming(),
            server_streaming: method.server_streaming(),
            input: registry.and_then(|r| r.resolve(&input_type)),
            output: registry.and_then(|r| r.resolve(&output_type)),
            input_type,
            output_type,
        }
    }
}

fn qualify(scope: &str, name: &str) -> String {
    if scope.is_empty() {
        name.to_string()
    } else {
        format!("{scope}.{name}")
    }
}

fn label_name(label: Label) -> &'static str {
    match label {
        Label::Optional => "optional",
        Label::Required => "required",
        Label::Repeated => "repeated",
    }
}

fn type_name_of(ty: Type) -> &'static str {
    match ty {
        Type::Double => "double",
        Type::Float => "float",
        Type::Int64 => "int64",
        Type::Uint64 => "uint64",
        Type::Int32 => "int32",
        Type::Fixed64 => "fixed64",
        Type::Fixed32 => "fixed32",
        Type::Bool => "bool",
        Type::String => "string",
        Type::Group => "group",
        Type::Message => "message",
        Type::Bytes => "bytes",
        Type::Uint32 => "uint32",
        Type::Enum => "enum",
        Type::Sfixed32 => "sfixed32",
        Type::Sfixed64 => "sfixed64",
        Type::Sint32 => "sint32",
        Type::Sint64 => "sint64",
    }
}
