#![allow(dead_code)]

use prost_types::compiler::CodeGeneratorRequest;
use prost_types::field_descriptor_proto::{Label, Type};
use prost_types::{
    DescriptorProto, FieldDescriptorProto, FileDescriptorProto, MethodDescriptorProto,
    ServiceDescriptorProto,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub fn file(name: &str, package: &str) -> FileDescriptorProto {
    FileDescriptorProto {
        name: Some(name.to_string()),
        package: Some(package.to_string()),
        syntax: Some("proto3".to_string()),
        ..Default::default()
    }
}

pub fn message(name: &str, fields: &[(&str, &str)]) -> DescriptorProto {
    DescriptorProto {
        name: Some(name.to_string()),
        field: fields
            .iter()
            .zip(1..)
            .map(|((field, type_name), number)| {
                let (ty, type_name) = match *type_name {
                    "" => (Type::String, None),
                    t => (Type::Message, Some(t.to_string())),
                };
                FieldDescriptorProto {
                    name: Some(field.to_string()),
                    number: Some(number),
                    label: Some(Label::Optional as i32),
                    r#type: Some(ty as i32),
                    type_name,
                    json_name: Some(field.to_string()),
                    ..Default::default()
                }
            })
            .collect(),
        ..Default::default()
    }
}

pub fn service(name: &str, methods: &[(&str, &str, &str)]) -> ServiceDescriptorProto {
    ServiceDescriptorProto {
        name: Some(name.to_string()),
        method: methods
            .iter()
            .map(|(m, input, output)| MethodDescriptorProto {
                name: Some(m.to_string()),
                input_type: Some(input.to_string()),
                output_type: Some(output.to_string()),
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    }
}

pub fn request(
    files: Vec<FileDescriptorProto>,
    to_generate: &[&str],
    parameter: &str,
) -> CodeGeneratorRequest {
    CodeGeneratorRequest {
        file_to_generate: to_generate.iter().map(|s| s.to_string()).collect(),
        parameter: Some(parameter.to_string()),
        proto_file: files,
        ..Default::default()
    }
}

/// Write `(relative path, contents)` pairs into a fresh directory.
pub fn template_dir(templates: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    for (name, contents) in templates {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("template subdir");
        }
        fs::write(&path, contents).expect("write template");
    }
    dir
}

/// Parameter string pointing at `dir`, followed by `extra`.
pub fn params(dir: &Path, extra: &str) -> String {
    let mut p = format!("template_dir={}", dir.display());
    if !extra.is_empty() {
        p.push(',');
        p.push_str(extra);
    }
    p
}
