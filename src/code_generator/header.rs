use crate::version::{format_compiler_version, generator_version};
use crate::Config;

/// The comment opening every generated file.
pub(super) fn code_gen_marker(config: &Config, source: &str) -> String {
    format!(
        "/**\n \
         * Code generated by protoc-gen-tsjson. DO NOT EDIT.\n \
         * versions:\n \
         * \tprotoc-gen-tsjson {}\n \
         * \tprotoc            {}\n \
         * source: {}\n \
         */\n\n",
        generator_version(),
        format_compiler_version(config.compiler_version.as_ref()),
        source
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use prost_types::compiler::Version;

    #[test]
    fn test_code_gen_marker() {
        let mut config = Config::new();
        config.compiler_version(Version {
            major: Some(4),
            minor: Some(24),
            patch: Some(3),
            suffix: Some(String::new()),
        });
        assert_eq!(
            code_gen_marker(&config, "acme/widget.proto"),
            format!(
                "/**
 * Code generated by protoc-gen-tsjson. DO NOT EDIT.
 * versions:
 * \tprotoc-gen-tsjson v{}
 * \tprotoc            v4.24.3
 * source: acme/widget.proto
 */

",
                env!("CARGO_PKG_VERSION")
            )
        );
    }

    #[test]
    fn test_unknown_compiler_version() {
        assert!(code_gen_marker(&Config::new(), "a.proto").contains(" * \tprotoc            (unknown)\n"));
    }
}
