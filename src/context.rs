use crate::descriptor::FileDescriptorProto;
use crate::descriptor_index::{DescriptorIndex, MapEntry};
use crate::module::Module;
use crate::Config;

/// The context providing all the request-wide information needed to generate code.
///
/// A `Context` is built once per request and is reused, read-only, by the `CodeGenerator`
/// instances created to generate code for each requested file.
pub struct Context<'a> {
    config: &'a Config,
    index: DescriptorIndex,
}

impl<'a> Context<'a> {
    pub fn new(config: &'a Config, index: DescriptorIndex) -> Self {
        Self { config, index }
    }

    pub fn config(&self) -> &Config {
        self.config
    }

    pub fn index(&self) -> &DescriptorIndex {
        &self.index
    }

    /// The map entry with the fully-qualified name `type_name`, if it is one.
    pub fn map_entry(&self, type_name: &str) -> Option<&MapEntry> {
        self.index.map_entry(type_name)
    }

    /// The name of the TypeScript file generated for `file`.
    pub fn output_file_name(&self, file: &FileDescriptorProto) -> String {
        let module = match self.index.export_details(file.name()) {
            Some(details) => Module::from_import_path(&details.import_path),
            None => Module::from_proto_file_name(file.name()),
        };
        module.to_file_name()
    }
}
