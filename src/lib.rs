#![doc(html_root_url = "https://docs.rs/protoc-gen-tsjson/0.1.0")]

//! `protoc-gen-tsjson` generates TypeScript classes from proto3 definitions, each able to
//! marshal itself to and from canonical [proto3 JSON][1].
//!
//! For every requested `.proto` file the generator emits one TypeScript module holding:
//!
//!  * an `enum` per Protobuf enum, merged with a namespace of `ToProtoJSON` / `Parse` helpers;
//!  * a `class` per Protobuf message, with an optional property per field named after the
//!    field's JSON name, an `async ToProtoJSON()` method and a `static async Parse(data)`
//!    constructor.
//!
//! Nested declarations are flattened with `__` (`Outer.Inner` becomes `Outer__Inner`). Types
//! from other files are imported from the npm package named by the `tsjson.npm_package` file
//! option, which every non-`google` file reachable from a request must set:
//!
//! ```protobuf
//! syntax = "proto3";
//! package acme.things;
//!
//! import "tsjson/tsjson.proto";
//!
//! option (tsjson.npm_package) = "@acme/protos";
//! option (tsjson.import_path) = "things/widget";
//! ```
//!
//! The generator is normally run as a `protoc` plugin through the `protoc-gen-tsjson` binary:
//!
//! ```bash
//! protoc --tsjson_out=src/ acme/things/widget.proto
//! ```
//!
//! [1]: https://protobuf.dev/programming-guides/proto3/#json

mod code_generator;
mod collections;
mod context;
pub mod descriptor;
mod descriptor_index;
mod error;
mod fully_qualified_name;
mod ident;
mod module;
mod resolver;
#[doc(hidden)]
pub mod test_utils;
mod version;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use log::{debug, error};
use prost_types::compiler::code_generator_response::{Feature, File};
use prost_types::compiler::{CodeGeneratorResponse, Version};

pub use crate::error::{Error, Result};

use crate::code_generator::CodeGenerator;
use crate::context::Context;
use crate::descriptor::CodeGeneratorRequest;
use crate::descriptor_index::DescriptorIndex;

/// The module the well-known types are imported from unless configured otherwise.
pub const DEFAULT_WELL_KNOWN_IMPORT: &str = "@llkennedy/protoc-gen-tsjson/google";

/// Configuration options for TypeScript code generation.
#[derive(Clone, Debug)]
pub struct Config {
    compiler_version: Option<Version>,
    well_known_import: String,
}

impl Config {
    /// Creates a new code generator configuration with default options.
    pub fn new() -> Self {
        Config::default()
    }

    /// Sets the protobuf compiler version printed in the header of every generated file.
    ///
    /// [`Config::run_plugin`] sets it from the request.
    pub fn compiler_version(&mut self, version: Version) -> &mut Self {
        self.compiler_version = Some(version);
        self
    }

    /// Sets the module specifier the `google` namespace of well-known types is imported from.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let mut config = protoc_gen_tsjson::Config::new();
    /// config.well_known_import("@acme/wkt");
    /// // Generated files using well-known types now start with
    /// // import * as google from "@acme/wkt";
    /// ```
    pub fn well_known_import(&mut self, specifier: impl Into<String>) -> &mut Self {
        self.well_known_import = specifier.into();
        self
    }

    /// Generates a TypeScript module for every file of `file_to_generate`, in request order.
    ///
    /// Requested names with no matching descriptor in `proto_file` are skipped. The first error
    /// aborts the whole request.
    pub fn generate(&self, request: &CodeGeneratorRequest) -> Result<Vec<File>> {
        let index = DescriptorIndex::build(&request.proto_file)?;
        let context = Context::new(self, index);

        let mut files = Vec::with_capacity(request.file_to_generate.len());
        for name in &request.file_to_generate {
            match request.proto_file.iter().find(|file| file.name() == name) {
                Some(file) => files.push(CodeGenerator::generate(&context, file)?),
                None => debug!("requested file {} is not in the request, skipping", name),
            }
        }
        Ok(files)
    }

    /// Processes a `CodeGeneratorRequest` and returns the response for `protoc`.
    ///
    /// The response holds either the generated files or an error, never both. A panic during
    /// generation is caught and reported as an error too.
    pub fn run_plugin(&mut self, request: CodeGeneratorRequest) -> CodeGeneratorResponse {
        if let Some(parameter) = request.parameter.as_deref().filter(|p| !p.is_empty()) {
            debug!("ignoring plugin parameter {:?}", parameter);
        }
        self.compiler_version = request.compiler_version.clone();

        let config: &Config = self;
        into_response(|| config.generate(&request))
    }
}

/// Runs `generate` and turns its outcome, panics included, into a response.
fn into_response(generate: impl FnOnce() -> Result<Vec<File>>) -> CodeGeneratorResponse {
    match panic::catch_unwind(AssertUnwindSafe(generate)) {
        Ok(Ok(file)) => CodeGeneratorResponse {
            file,
            supported_features: Some(Feature::None as u64),
            ..Default::default()
        },
        Ok(Err(err)) => error_response(format!("failed to generate files: {}", err)),
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            error!("caught panic: {}", message);
            error_response(format!("caught panic in protoc-gen-tsjson: {}", message))
        }
    }
}

impl Default for Config {
    fn default() -> Config {
        Config {
            compiler_version: None,
            well_known_import: DEFAULT_WELL_KNOWN_IMPORT.to_owned(),
        }
    }
}

/// A response reporting `message` as the failure of the whole request.
pub fn error_response(message: impl Into<String>) -> CodeGeneratorResponse {
    CodeGeneratorResponse {
        error: Some(message.into()),
        supported_features: Some(Feature::None as u64),
        ..Default::default()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_owned()
    }
}
