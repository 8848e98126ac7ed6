use log::debug;
use prost_types::compiler::code_generator_response::File;
use prost_types::field_descriptor_proto::{Label, Type};
use prost_types::{DescriptorProto, FieldDescriptorProto};

use crate::context::Context;
use crate::descriptor::FileDescriptorProto;
use crate::descriptor_index::{is_map_entry, MapEntry};
use crate::error::{Error, Result};
use crate::ident::flatten;
use crate::resolver::Resolver;

mod enums;
mod header;
mod marshal;
mod messages;
mod native_type;

/// Fields of this type have no JSON representation worth generating and are left out entirely.
const NULL_VALUE: &str = ".google.protobuf.NullValue";

pub struct CodeGenerator<'a> {
    context: &'a Context<'a>,
    file: &'a FileDescriptorProto,
    resolver: Resolver<'a>,
    type_path: Vec<&'a str>,
    buf: String,
}

impl<'a> CodeGenerator<'a> {
    /// Generates the TypeScript module for `file`.
    pub fn generate(context: &'a Context<'a>, file: &'a FileDescriptorProto) -> Result<File> {
        if file.syntax() != "proto3" {
            return Err(Error::UnsupportedSyntax {
                file: file.name().to_owned(),
                syntax: match file.syntax() {
                    "" => "proto2".to_owned(),
                    syntax => syntax.to_owned(),
                },
            });
        }

        let mut code_gen = CodeGenerator {
            context,
            file,
            resolver: Resolver::new(context.index(), file),
            type_path: Vec::new(),
            buf: String::new(),
        };

        debug!("file: {:?}, package: {:?}", file.name(), file.package());

        for message in &file.message_type {
            code_gen.collect_imports(message)?;
        }
        code_gen.push_enums(&file.enum_type);
        code_gen.push_nested_enums(&file.message_type);
        code_gen.push_messages(&file.message_type)?;
        if !file.service.is_empty() {
            debug!("  skipping {} service(s)", file.service.len());
        }

        let config = context.config();
        let mut content = header::code_gen_marker(config, file.name());
        code_gen
            .resolver
            .imports()
            .render(&config.well_known_import, &mut content);
        content.push_str(&code_gen.buf);

        Ok(File {
            name: Some(context.output_file_name(file)),
            content: Some(content),
            ..Default::default()
        })
    }

    /// Resolves every field type of `message` up front, so the import table is complete before
    /// anything is emitted. Nested messages are visited before the fields of their parent.
    fn collect_imports(&mut self, message: &'a DescriptorProto) -> Result<()> {
        for nested in message.nested_type.iter().filter(|nested| !is_map_entry(nested)) {
            self.collect_imports(nested)?;
        }
        for field in message.field.iter().filter(|field| !is_null_value(field)) {
            self.native_type(field)?;
        }
        Ok(())
    }

    /// The flattened name of `name` nested inside the current `type_path`.
    fn flat_name(&self, name: &str) -> String {
        flatten(self.type_path.iter().copied().chain([name]))
    }

    /// The map entry `field` holds, if it is a `map` field.
    fn map_entry(&self, field: &FieldDescriptorProto) -> Option<&'a MapEntry> {
        if field.r#type() != Type::Message || field.label() != Label::Repeated {
            return None;
        }
        let context: &'a Context<'a> = self.context;
        context.map_entry(field.type_name())
    }

    fn unsupported_field(&self, field: &FieldDescriptorProto) -> Error {
        Error::UnsupportedFieldType {
            file: self.file.name().to_owned(),
            field: field.name().to_owned(),
            kind: format!("{:?}", field.r#type()),
        }
    }
}

fn is_null_value(field: &FieldDescriptorProto) -> bool {
    field.r#type() == Type::Enum && field.type_name() == NULL_VALUE
}
