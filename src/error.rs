use thiserror::Error;

/// Errors that abort generation of the whole request.
#[derive(Debug, Error)]
pub enum Error {
    #[error("all imported files must specify the option (tsjson.npm_package), file {file} did not")]
    MissingNpmPackage { file: String },

    #[error("packages are mandatory with protoc-gen-tsjson, {file} did not have a package")]
    EmptyPackage { file: String },

    #[error("for JS/TS language reasons, \"index\" is an invalid package name (in {file})")]
    ReservedPackage { file: String },

    #[error("type {name} is declared twice in package {package}, by {first} and {second}")]
    DuplicateType {
        package: String,
        name: String,
        first: String,
        second: String,
    },

    #[error("proto3 is the only syntax supported by protoc-gen-tsjson, found {syntax} in {file}")]
    UnsupportedSyntax { file: String, syntax: String },

    #[error("field {field} in {file}: no known package declares type {type_name}")]
    UnresolvedPackage {
        file: String,
        field: String,
        type_name: String,
    },

    #[error("field {field} in {file}: package {package} has no type matching {type_name}")]
    UnresolvedType {
        file: String,
        field: String,
        type_name: String,
        package: String,
    },

    #[error("{file} would import two different types as {alias}, from {first} and {second}")]
    AliasClash {
        file: String,
        alias: String,
        first: String,
        second: String,
    },

    #[error("field {field} in {file}: unsupported field type {kind}")]
    UnsupportedFieldType {
        file: String,
        field: String,
        kind: String,
    },

    #[error("failed to decode CodeGeneratorRequest: {0}")]
    Decode(#[from] prost::DecodeError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
