//! Utility functions for working with TypeScript identifiers.

use itertools::Itertools;

/// Joins the levels of a nested declaration in its flattened TypeScript name.
pub const NESTING_SEPARATOR: &str = "__";

/// The package whose types come from the well-known namespace import.
pub const WELL_KNOWN_PACKAGE: &str = "google.protobuf";

/// Flattens a nesting path (`["Outer", "Inner"]`) into a single TypeScript identifier
/// (`Outer__Inner`).
pub fn flatten<I>(path: I) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    path.into_iter()
        .map(|part| part.as_ref().to_owned())
        .join(NESTING_SEPARATOR)
}

/// Flattens a dotted leaf path (`Outer.Inner`) relative to its package.
pub fn flatten_dotted(leaf: &str) -> String {
    flatten(leaf.split('.'))
}

/// Stands in for the dots of a package inside an import alias. Protobuf names never contain it,
/// so `foo.bar` and `foo_bar` stay apart.
pub const PACKAGE_SEPARATOR: &str = "$";

/// The alias a type from another file is imported under: `<package>__<local>`, with the dots of
/// the package replaced by `$` so the result stays a single identifier.
pub fn import_alias(package: &str, local: &str) -> String {
    format!(
        "{}{}{}",
        package.replace('.', PACKAGE_SEPARATOR),
        NESTING_SEPARATOR,
        local
    )
}

/// Whether `package` belongs to the `google` namespace, whose files carry no `tsjson` options.
pub fn is_google_package(package: &str) -> bool {
    package == "google" || package.starts_with("google.")
}

/// Property access by string key, used for JSON objects whose keys need not be identifiers.
pub fn member(expr: &str, key: &str) -> String {
    format!("{}[\"{}\"]", expr, key)
}
