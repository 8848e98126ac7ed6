use std::collections::{HashMap, HashSet};

use log::{debug, warn};
use prost_types::{DescriptorProto, FieldDescriptorProto};

use crate::descriptor::FileDescriptorProto;
use crate::error::{Error, Result};
use crate::fully_qualified_name::FullyQualifiedName;
use crate::ident::{flatten, is_google_package};
use crate::module::Module;

/// Where the declarations of one `.proto` file can be imported from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportDetails {
    pub npm_package: String,
    /// The module path inside `npm_package`; the `tsjson.import_path` option, or the file's
    /// own path without its `.proto` extension.
    pub import_path: String,
    /// The protobuf package of the file, which names its import alias.
    pub proto_package: String,
}

impl ExportDetails {
    fn from_file(file: &FileDescriptorProto) -> Result<Self> {
        let file_name = file.name();
        let npm_package = file.npm_package();
        if npm_package.is_empty() {
            return Err(Error::MissingNpmPackage {
                file: file_name.to_owned(),
            });
        }
        let package = file.package();
        if package.is_empty() {
            return Err(Error::EmptyPackage {
                file: file_name.to_owned(),
            });
        }
        if package == "index" {
            return Err(Error::ReservedPackage {
                file: file_name.to_owned(),
            });
        }

        let module = match file.import_path() {
            "" => Module::from_proto_file_name(file_name),
            import_path => Module::from_import_path(import_path),
        };

        Ok(ExportDetails {
            npm_package: npm_package.to_owned(),
            import_path: module.to_string(),
            proto_package: package.to_owned(),
        })
    }

    /// The module specifier a file in another npm package imports these declarations from.
    pub fn package_import_path(&self) -> String {
        format!("{}/{}", self.npm_package, self.import_path)
    }
}

/// The key and value fields of a synthetic map entry message.
#[derive(Clone, Debug, PartialEq)]
pub struct MapEntry {
    pub key: FieldDescriptorProto,
    pub value: FieldDescriptorProto,
}

impl MapEntry {
    fn from_descriptor(entry: &DescriptorProto) -> Option<Self> {
        let find = |name: &str| entry.field.iter().find(|f| f.name() == name).cloned();
        Some(MapEntry {
            key: find("key")?,
            value: find("value")?,
        })
    }
}

/// Returns `true` if `message` is the synthetic entry type of a `map` field.
pub fn is_map_entry(message: &DescriptorProto) -> bool {
    message
        .options
        .as_ref()
        .map_or(false, |options| options.map_entry())
}

/// `DescriptorIndex` records, for the whole linked file set of a request, which file and package
/// declares every type and where each file's declarations are imported from.
///
/// Built once per request, before any file is generated, and read-only afterwards.
#[derive(Debug, Default)]
pub struct DescriptorIndex {
    export_map: HashMap<String, ExportDetails>,
    type_map: HashMap<String, HashMap<String, ExportDetails>>,
    file_type_map: HashMap<String, HashSet<String>>,
    map_entries: HashMap<String, MapEntry>,
}

impl DescriptorIndex {
    pub fn build(files: &[FileDescriptorProto]) -> Result<DescriptorIndex> {
        let mut index = DescriptorIndex::default();
        let mut owners: HashMap<(String, String), String> = HashMap::new();

        for file in files {
            let package = file.package();
            for msg in &file.message_type {
                let msg_name = FullyQualifiedName::new(package, &[] as &[&str], msg.name());
                index.add_map_entries(&msg_name, msg);
            }

            if is_google_package(package) {
                debug!("not indexing well-known file {}", file.name());
                continue;
            }

            let details = ExportDetails::from_file(file)?;
            debug!(
                "indexing {} as {}",
                file.name(),
                details.package_import_path()
            );

            let types = index.type_map.entry(package.to_owned()).or_default();
            let file_types = index
                .file_type_map
                .entry(file.name().to_owned())
                .or_default();
            for name in declared_names(file) {
                let owner = (package.to_owned(), name.clone());
                if let Some(first) = owners.insert(owner, file.name().to_owned()) {
                    return Err(Error::DuplicateType {
                        package: package.to_owned(),
                        name,
                        first,
                        second: file.name().to_owned(),
                    });
                }
                types.insert(name.clone(), details.clone());
                file_types.insert(name);
            }

            index.export_map.insert(file.name().to_owned(), details);
        }

        Ok(index)
    }

    fn add_map_entries(&mut self, msg_name: &FullyQualifiedName, msg: &DescriptorProto) {
        for nested in &msg.nested_type {
            let nested_name = msg_name.join(nested.name());
            if !is_map_entry(nested) {
                self.add_map_entries(&nested_name, nested);
                continue;
            }
            match MapEntry::from_descriptor(nested) {
                Some(entry) => {
                    self.map_entries
                        .insert(nested_name.as_ref().to_owned(), entry);
                }
                None => warn!(
                    "map entry {} lacks a key or value field",
                    nested_name.as_ref()
                ),
            }
        }
    }

    /// The export details of the file named `file_name`, absent for `google.*` files.
    pub fn export_details(&self, file_name: &str) -> Option<&ExportDetails> {
        self.export_map.get(file_name)
    }

    /// The export details of the file declaring the flattened type `name` in `package`.
    pub fn lookup(&self, package: &str, name: &str) -> Option<&ExportDetails> {
        self.type_map.get(package)?.get(name)
    }

    /// Returns `true` if some indexed file belongs to `package`, even one declaring no types.
    pub fn has_package(&self, package: &str) -> bool {
        self.type_map.contains_key(package)
    }

    /// Returns `true` if `file_name` itself declares the flattened type `name`.
    pub fn declares(&self, file_name: &str, name: &str) -> bool {
        self.file_type_map
            .get(file_name)
            .map_or(false, |names| names.contains(name))
    }

    /// The map entry with the fully-qualified name `type_name`, if it is one.
    pub fn map_entry(&self, type_name: &str) -> Option<&MapEntry> {
        self.map_entries.get(type_name)
    }
}

/// The flattened names of every enum and non-map-entry message `file` declares, top-level
/// declarations first, then nested ones depth-first.
fn declared_names(file: &FileDescriptorProto) -> Vec<String> {
    let mut names: Vec<String> = file
        .enum_type
        .iter()
        .map(|e| e.name().to_owned())
        .collect();
    let mut type_path = Vec::new();
    for msg in &file.message_type {
        add_message(&mut names, &mut type_path, msg);
    }
    names
}

fn add_message<'a>(
    names: &mut Vec<String>,
    type_path: &mut Vec<&'a str>,
    msg: &'a DescriptorProto,
) {
    type_path.push(msg.name());
    names.push(flatten(type_path.iter()));
    for nested_enum in &msg.enum_type {
        names.push(flatten(type_path.iter().copied().chain([nested_enum.name()])));
    }
    for nested in msg.nested_type.iter().filter(|m| !is_map_entry(m)) {
        add_message(names, type_path, nested);
    }
    type_path.pop();
}
