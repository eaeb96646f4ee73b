//! # protoc-gen-template
//!
//! A `protoc` plugin that renders protobuf descriptors through user-supplied
//! [Handlebars](https://handlebarsjs.com/) templates.
//!
//! ## Features
//!
//! - **Template packs**: every `*.tmpl` file below `template_dir` is a template;
//!   its path (minus `.tmpl`) is itself a template for the output file name
//! - **Two granularities**: render once per service (default) or once per file (`all=true`)
//! - **Single-package mode**: index every type of the request so templates can
//!   follow references into other files
//! - **Deterministic output**: fragments targeting the same file are
//!   concatenated in file, service and template order
//!
//! ## Main Components
//!
//! - [`Configuration`]: options parsed from the protoc parameter string.
//! - [`Generator`]: the generation driver.
//! - [`TemplatePack`]: discovered and compiled templates.
//! - [`Encoder`]: renders a pack for one [`SchemaUnit`], via [`FileEncoder`] or [`ServiceEncoder`].
//! - [`TypeRegistry`]: cross-file type lookups.
//! - [`OutputSet`]: merged output, turned into the protoc response.
//!
//! ## Example
//!
//! ```text
//! protoc --plugin=protoc-gen-template \
//!        --template_out=template_dir=./templates,all=true:./gen \
//!        api/v1/*.proto
//! ```
//!
//! ```rust,no_run
//! use protoc_gen_template::{generate, plugin, Configuration};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let request = plugin::read_request(std::io::stdin().lock())?;
//! let (config, _warnings) = Configuration::parse(request.parameter());
//! let response = generate(&request, &config)?;
//! plugin::write_response(std::io::stdout().lock(), &response)?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod context;
pub mod descriptor;
pub mod encoder;
pub mod error;
pub mod generator;
pub mod logging;
pub mod output;
pub mod plugin;
pub mod registry;
pub mod template;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{ConfigWarning, Configuration};
pub use context::TemplateContext;
pub use descriptor::SchemaUnit;
pub use encoder::{Encoder, FileEncoder, ServiceEncoder};
pub use error::{Error, Result};
pub use generator::Generator;
pub use output::{OutputFragment, OutputSet};
pub use registry::{ResolvedType, TypeKind, TypeRegistry};
pub use template::{Template, TemplatePack};

use prost_types::compiler::{CodeGeneratorRequest, CodeGeneratorResponse};

/// Run a full generation pass and build the protoc response.
pub fn generate(request: &CodeGeneratorRequest, config: &Configuration) -> Result<CodeGeneratorResponse> {
    let generator = Generator::new(config.clone());
    let output = generator.generate(request)?;
    Ok(output.into_response(&config.destination_dir))
}
