//! Error types for the template generator

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the generator
///
/// Every variant is fatal for the run. Configuration problems are not errors;
/// they surface as [`crate::config::ConfigWarning`] values instead.
#[derive(Error, Debug)]
pub enum Error {
    /// IO errors while reading the request or writing the response
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The request on stdin is not a valid `CodeGeneratorRequest`
    #[error("parsing input proto: {0}")]
    Decode(#[from] prost::DecodeError),

    /// The response could not be serialized
    #[error("failed to marshal output proto: {0}")]
    Encode(#[from] prost::EncodeError),

    /// protoc asked for nothing
    #[error("no files to generate")]
    NoFilesToGenerate,

    /// A file listed in `file_to_generate` has no descriptor in the request
    #[error("file {0:?} is listed for generation but missing from the descriptor set")]
    MissingFile(String),

    /// The type registry could not index the descriptor set
    #[error("registry: failed to load the request: {0}")]
    RegistryLoad(#[source] prost_reflect::DescriptorError),

    /// A file to generate is not known to the type registry
    #[error("registry: failed to lookup file {0:?}")]
    FileNotIndexed(String),

    /// The template directory could not be walked
    #[error("cannot get templates from {}: {source}", dir.display())]
    TemplateDir {
        dir: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// A template file could not be read
    #[error("cannot read template {}: {source}", path.display())]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A template (body or output name) failed to compile
    #[error("template {template:?} is invalid: {source}")]
    TemplateParse {
        template: String,
        #[source]
        source: Box<handlebars::TemplateError>,
    },

    /// A template failed while rendering a schema unit
    #[error("failed to render template {template:?} for {unit}: {source}")]
    Render {
        template: String,
        unit: String,
        #[source]
        source: Box<handlebars::RenderError>,
    },
}
