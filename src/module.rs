use std::fmt;

/// A TypeScript module path, relative to the root of the generated output.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Module {
    components: Vec<String>,
}

impl Module {
    /// Construct a module path from the slash-delimited name of a `.proto` file.
    ///
    /// The last component loses everything from its `.proto` extension on:
    /// `foo/bar/baz.proto` becomes `foo/bar/baz`.
    pub fn from_proto_file_name(name: &str) -> Self {
        let mut components: Vec<String> = name.split('/').map(str::to_owned).collect();
        if let Some(last) = components.last_mut() {
            let stem = last.split(".proto").next().unwrap_or_default().to_owned();
            *last = stem;
        }
        Self { components }
    }

    /// Construct a module path from a `tsjson.import_path` option.
    pub fn from_import_path(path: &str) -> Self {
        Self {
            components: path
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect(),
        }
    }

    /// An iterator over the parts of the path.
    pub fn parts(&self) -> impl Iterator<Item = &str> {
        self.components.iter().map(|s| s.as_str())
    }

    /// Format the module path into a filename for generated TypeScript code.
    pub fn to_file_name(&self) -> String {
        let mut root = self.to_string();
        root.push_str(".ts");
        root
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut parts = self.parts();
        if let Some(first) = parts.next() {
            f.write_str(first)?;
        }
        for part in parts {
            f.write_str("/")?;
            f.write_str(part)?;
        }
        Ok(())
    }
}
