use itertools::Itertools;
use log::debug;

use crate::descriptor::FileDescriptorProto;
use crate::descriptor_index::DescriptorIndex;
use crate::error::{Error, Result};
use crate::fully_qualified_name::FullyQualifiedName;
use crate::ident::{flatten_dotted, import_alias, WELL_KNOWN_PACKAGE};

#[derive(Clone, Debug, PartialEq, Eq)]
struct ImportedSymbol {
    name: String,
    alias: String,
}

/// The imports of one generated file, in order of first use.
#[derive(Debug, Default)]
pub struct ImportTable {
    well_known: bool,
    paths: Vec<(String, Vec<ImportedSymbol>)>,
}

impl ImportTable {
    /// Records `name` from `path` under `alias`. If `alias` already stands for another symbol,
    /// nothing is recorded and the path of that symbol is returned.
    fn insert(&mut self, path: String, name: String, alias: String) -> Result<(), String> {
        let taken = self.paths.iter().find(|(p, symbols)| {
            symbols
                .iter()
                .any(|symbol| symbol.alias == alias && (*p != path || symbol.name != name))
        });
        if let Some((other, _)) = taken {
            return Err(other.clone());
        }

        let idx = match self.paths.iter().position(|(p, _)| *p == path) {
            Some(idx) => idx,
            None => {
                self.paths.push((path, Vec::new()));
                self.paths.len() - 1
            }
        };
        let symbols = &mut self.paths[idx].1;
        if !symbols.iter().any(|symbol| symbol.alias == alias) {
            symbols.push(ImportedSymbol { name, alias });
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        !self.well_known && self.paths.is_empty()
    }

    /// Writes the import statements, followed by a blank line if there were any.
    pub fn render(&self, well_known_import: &str, buf: &mut String) {
        if self.well_known {
            buf.push_str(&format!(
                "import * as google from \"{}\";\n",
                well_known_import
            ));
        }
        for (path, symbols) in &self.paths {
            buf.push_str(&format!(
                "import {{ {} }} from \"{}\";\n",
                symbols
                    .iter()
                    .map(|symbol| format!("{} as {}", symbol.name, symbol.alias))
                    .join(", "),
                path
            ));
        }
        if !self.is_empty() {
            buf.push('\n');
        }
    }
}

/// Resolves the type names referenced by one file, collecting the imports they need.
pub struct Resolver<'a> {
    index: &'a DescriptorIndex,
    file_name: &'a str,
    package: &'a str,
    imports: ImportTable,
}

impl<'a> Resolver<'a> {
    pub fn new(index: &'a DescriptorIndex, file: &'a FileDescriptorProto) -> Self {
        Resolver {
            index,
            file_name: file.name(),
            package: file.package(),
            imports: ImportTable::default(),
        }
    }

    pub fn imports(&self) -> &ImportTable {
        &self.imports
    }

    /// Resolves `type_name`, the fully-qualified type of the field `field`, to the name the file
    /// refers to it by: the flattened name for its own declarations, the import alias for those
    /// of other files, or the `google` namespace path for well-known types.
    pub fn resolve(&mut self, field: &str, type_name: &str) -> Result<String> {
        let fq_name = FullyQualifiedName::from_type_name(type_name);
        let name = fq_name.without_leading_dot();
        let (package, leaf) =
            self.owning_package(name)
                .ok_or_else(|| Error::UnresolvedPackage {
                    file: self.file_name.to_owned(),
                    field: field.to_owned(),
                    type_name: type_name.to_owned(),
                })?;

        if package == WELL_KNOWN_PACKAGE {
            self.imports.well_known = true;
            return Ok(name.to_owned());
        }

        let local_name = flatten_dotted(leaf);
        let own_package = package == self.package;
        if own_package && self.index.declares(self.file_name, &local_name) {
            return Ok(local_name);
        }

        let details =
            self.index
                .lookup(package, &local_name)
                .ok_or_else(|| Error::UnresolvedType {
                    file: self.file_name.to_owned(),
                    field: field.to_owned(),
                    type_name: type_name.to_owned(),
                    package: package.to_owned(),
                })?;
        let path = if own_package {
            details.import_path.clone()
        } else {
            details.package_import_path()
        };
        let alias = import_alias(&details.proto_package, &local_name);
        debug!("    import: {} as {} from {}", local_name, alias, path);
        self.imports
            .insert(path.clone(), local_name, alias.clone())
            .map_err(|first| Error::AliasClash {
                file: self.file_name.to_owned(),
                alias: alias.clone(),
                first,
                second: path,
            })?;
        Ok(alias)
    }

    /// Splits `name` into the longest known package owning it and the dotted path below it.
    fn owning_package<'n>(&self, name: &'n str) -> Option<(&'n str, &'n str)> {
        name.rmatch_indices('.')
            .map(|(idx, _)| (&name[..idx], &name[idx + 1..]))
            .find(|(package, _)| *package == WELL_KNOWN_PACKAGE || self.index.has_package(package))
    }
}
