//! Descriptor builders for tests, shared with the integration tests under `tests/`.

use prost_types::field_descriptor_proto::{Label, Type};
use prost_types::{
    DescriptorProto, EnumDescriptorProto, EnumValueDescriptorProto,
    FieldDescriptorProto, MessageOptions,
};

use crate::descriptor::{FileDescriptorProto, FileOptions};

/// A proto3 file in `package`, exported from `npm_package` (omitted when empty).
pub fn file(name: &str, package: &str, npm_package: &str) -> FileDescriptorProto {
    FileDescriptorProto {
        name: Some(name.to_owned()),
        package: Some(package.to_owned()),
        options: (!npm_package.is_empty()).then(|| FileOptions {
            npm_package: Some(npm_package.to_owned()),
            import_path: None,
        }),
        syntax: Some("proto3".to_owned()),
        ..Default::default()
    }
}

/// Sets the `tsjson.import_path` option of `file`.
pub fn with_import_path(mut file: FileDescriptorProto, import_path: &str) -> FileDescriptorProto {
    file.options.get_or_insert_with(Default::default).import_path = Some(import_path.to_owned());
    file
}

pub fn message(name: &str, fields: Vec<FieldDescriptorProto>) -> DescriptorProto {
    DescriptorProto {
        name: Some(name.to_owned()),
        field: fields,
        ..Default::default()
    }
}

/// A singular scalar field, with the JSON name protoc would assign.
pub fn field(name: &str, number: i32, ty: Type) -> FieldDescriptorProto {
    FieldDescriptorProto {
        name: Some(name.to_owned()),
        number: Some(number),
        label: Some(Label::Optional as i32),
        r#type: Some(ty as i32),
        json_name: Some(json_name(name)),
        ..Default::default()
    }
}

/// A singular message or enum field referring to `type_name`.
pub fn typed_field(name: &str, number: i32, ty: Type, type_name: &str) -> FieldDescriptorProto {
    FieldDescriptorProto {
        type_name: Some(type_name.to_owned()),
        ..field(name, number, ty)
    }
}

pub fn repeated(mut field: FieldDescriptorProto) -> FieldDescriptorProto {
    field.set_label(Label::Repeated);
    field
}

/// The synthetic `<Name>Entry` message protoc declares for a `map` field.
pub fn map_entry(name: &str, key: Type, value: FieldDescriptorProto) -> DescriptorProto {
    DescriptorProto {
        name: Some(name.to_owned()),
        field: vec![
            field("key", 1, key),
            FieldDescriptorProto {
                name: Some("value".to_owned()),
                number: Some(2),
                json_name: Some("value".to_owned()),
                ..value
            },
        ],
        options: Some(MessageOptions {
            map_entry: Some(true),
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// A `map` field whose entry message is `entry_type_name`.
pub fn map_field(name: &str, number: i32, entry_type_name: &str) -> FieldDescriptorProto {
    repeated(typed_field(name, number, Type::Message, entry_type_name))
}

pub fn enumeration(name: &str, values: &[(&str, i32)]) -> EnumDescriptorProto {
    EnumDescriptorProto {
        name: Some(name.to_owned()),
        value: values
            .iter()
            .map(|(name, number)| EnumValueDescriptorProto {
                name: Some((*name).to_owned()),
                number: Some(*number),
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    }
}

/// `lowerCamelCase` as protoc derives it: underscores dropped, the following letter uppercased.
fn json_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper = false;
    for c in name.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
