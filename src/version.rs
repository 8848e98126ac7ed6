use prost_types::compiler::Version;

/// The version of this generator, as printed in the header of every generated file.
pub fn generator_version() -> String {
    format!("v{}", env!("CARGO_PKG_VERSION"))
}

/// Formats the protobuf compiler version reported in the request.
pub fn format_compiler_version(version: Option<&Version>) -> String {
    let Some(version) = version else {
        return "(unknown)".to_owned();
    };
    let mut formatted = format!(
        "v{}.{}.{}",
        version.major(),
        version.minor(),
        version.patch()
    );
    let suffix = version.suffix();
    if !suffix.is_empty() {
        formatted.push('-');
        formatted.push_str(suffix);
    }
    formatted
}
