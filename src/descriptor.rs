//! Translation of the parts of
//! [plugin.proto](https://github.com/protocolbuffers/protobuf/blob/main/src/google/protobuf/compiler/plugin.proto)
//! and
//! [descriptor.proto](https://github.com/protocolbuffers/protobuf/blob/main/src/google/protobuf/descriptor.proto)
//! which carry the `tsjson` file options.
//!
//! `prost` skips unknown fields while decoding, so extensions of `FileOptions` only survive when
//! the message holding them declares them as regular fields. Only the request, the file
//! descriptor and its options are redeclared here; everything below the file level is the
//! `prost_types` definition.

use prost_types::compiler::Version;
use prost_types::{DescriptorProto, EnumDescriptorProto, ServiceDescriptorProto, SourceCodeInfo};

/// Field number of the `tsjson.npm_package` extension of `google.protobuf.FileOptions`.
pub const NPM_PACKAGE_FIELD: u32 = 210320;
/// Field number of the `tsjson.import_path` extension of `google.protobuf.FileOptions`.
pub const IMPORT_PATH_FIELD: u32 = 210321;

/// An encoded CodeGeneratorRequest is written to the plugin's stdin.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CodeGeneratorRequest {
    /// The .proto files that were explicitly listed on the command-line. The code generator
    /// should generate code only for these files.
    #[prost(string, repeated, tag = "1")]
    pub file_to_generate: Vec<String>,
    /// The generator parameter passed on the command-line.
    #[prost(string, optional, tag = "2")]
    pub parameter: Option<String>,
    /// FileDescriptorProtos for all files in file_to_generate and everything they import,
    /// in topological order.
    #[prost(message, repeated, tag = "15")]
    pub proto_file: Vec<FileDescriptorProto>,
    /// The version number of protocol compiler.
    #[prost(message, optional, tag = "3")]
    pub compiler_version: Option<Version>,
}

/// Describes a complete .proto file.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FileDescriptorProto {
    /// file name, relative to root of source tree
    #[prost(string, optional, tag = "1")]
    pub name: Option<String>,
    /// e.g. "foo", "foo.bar", etc.
    #[prost(string, optional, tag = "2")]
    pub package: Option<String>,
    /// Names of files imported by this file.
    #[prost(string, repeated, tag = "3")]
    pub dependency: Vec<String>,
    /// All top-level definitions in this file.
    #[prost(message, repeated, tag = "4")]
    pub message_type: Vec<DescriptorProto>,
    #[prost(message, repeated, tag = "5")]
    pub enum_type: Vec<EnumDescriptorProto>,
    #[prost(message, repeated, tag = "6")]
    pub service: Vec<ServiceDescriptorProto>,
    #[prost(message, optional, tag = "8")]
    pub options: Option<FileOptions>,
    #[prost(message, optional, tag = "9")]
    pub source_code_info: Option<SourceCodeInfo>,
    /// The syntax of the proto file.
    #[prost(string, optional, tag = "12")]
    pub syntax: Option<String>,
}

/// The subset of `google.protobuf.FileOptions` read by this plugin.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FileOptions {
    /// The npm package other packages import this file's types from.
    #[prost(string, optional, tag = "210320")]
    pub npm_package: Option<String>,
    /// Path of the generated module inside `npm_package`, without extension.
    #[prost(string, optional, tag = "210321")]
    pub import_path: Option<String>,
}

impl FileDescriptorProto {
    /// The `tsjson.npm_package` option, or an empty string.
    pub fn npm_package(&self) -> &str {
        self.options.as_ref().map_or("", FileOptions::npm_package)
    }

    /// The `tsjson.import_path` option, or an empty string.
    pub fn import_path(&self) -> &str {
        self.options.as_ref().map_or("", FileOptions::import_path)
    }
}
