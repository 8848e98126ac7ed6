use itertools::Itertools;

// Invariant: should always begin with a '.' (dot)
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct FullyQualifiedName(String);

impl FullyQualifiedName {
    pub fn new(package: &str, type_path: &[impl AsRef<str>], name: &str) -> Self {
        let parts = package
            .trim_matches('.')
            .split('.')
            .chain(type_path.iter().map(|p| p.as_ref().trim_matches('.')))
            .chain(std::iter::once(name))
            .filter(|part| !part.is_empty());
        Self(format!(".{}", parts.format(".")))
    }

    pub fn from_type_name(type_name: &str) -> Self {
        Self::new("", &[type_name], "")
    }

    pub fn without_leading_dot(&self) -> &str {
        &self.0[1..]
    }

    pub fn join(&self, path: &str) -> Self {
        Self(format!("{}.{}", self.0, path))
    }
}

impl AsRef<str> for FullyQualifiedName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
