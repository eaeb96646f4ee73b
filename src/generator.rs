//! Generation driver: walks the request and feeds every encoder into one
//! [`OutputSet`].
//!
//! Traversal is sequential and ordered (files as listed in the request, then
//! services within a file, then templates within the pack) because same-name
//! fragments are concatenated in production order.

use crate::config::Configuration;
use crate::encoder::{Encoder, FileEncoder, ServiceEncoder};
use crate::error::{Error, Result};
use crate::output::OutputSet;
use crate::registry::TypeRegistry;
use crate::template::TemplatePack;
use prost_types::compiler::CodeGeneratorRequest;
use prost_types::FileDescriptorProto;
use std::collections::HashSet;

/// Runs one generation pass with a fixed configuration.
#[derive(Debug, Clone)]
pub struct Generator {
    config: Configuration,
}

impl Generator {
    pub fn new(config: Configuration) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Render the request with the templates found in the configured directory.
    pub fn generate(&self, request: &CodeGeneratorRequest) -> Result<OutputSet> {
        let targets = targets(request)?;
        let registry = self.load_registry(request)?;
        let pack = TemplatePack::load(&self.config.template_dir)?;
        self.run(request, &targets, registry.as_ref(), &pack)
    }

    /// Render the request with an already loaded template pack.
    pub fn generate_with(&self, request: &CodeGeneratorRequest, pack: &TemplatePack) -> Result<OutputSet> {
        let targets = targets(request)?;
        let registry = self.load_registry(request)?;
        self.run(request, &targets, registry.as_ref(), pack)
    }

    fn load_registry(&self, request: &CodeGeneratorRequest) -> Result<Option<TypeRegistry>> {
        if !self.config.single_package_mode {
            return Ok(None);
        }
        TypeRegistry::load(&request.proto_file).map(Some)
    }

    fn run(
        &self,
        request: &CodeGeneratorRequest,
        targets: &HashSet<&str>,
        registry: Option<&TypeRegistry>,
        pack: &TemplatePack,
    ) -> Result<OutputSet> {
        tracing::debug!(
            files = targets.len(),
            templates = pack.len(),
            all = self.config.all,
            single_package_mode = self.config.single_package_mode,
            "generating"
        );

        let mut output = OutputSet::new();
        for file in request
            .proto_file
            .iter()
            .filter(|f| targets.contains(f.name()))
        {
            if let Some(registry) = registry {
                registry.lookup_file(file.name())?;
            }
            self.encode_file(file, registry, pack, &mut output)?;
        }

        tracing::info!(files = output.len(), "generation complete");
        Ok(output)
    }

    fn encode_file(
        &self,
        file: &FileDescriptorProto,
        registry: Option<&TypeRegistry>,
        pack: &TemplatePack,
        output: &mut OutputSet,
    ) -> Result<()> {
        if self.config.all {
            let encoder = FileEncoder::new(file, registry, &self.config);
            output.extend(encoder.files(pack)?);
            return Ok(());
        }

        for service in &file.service {
            let encoder = ServiceEncoder::new(file, service, registry, &self.config);
            output.extend(encoder.files(pack)?);
        }
        Ok(())
    }
}

/// Names of the files protoc asked for, checked against the descriptor set.
fn targets(request: &CodeGeneratorRequest) -> Result<HashSet<&str>> {
    if request.file_to_generate.is_empty() {
        return Err(Error::NoFilesToGenerate);
    }

    let known: HashSet<&str> = request.proto_file.iter().map(|f| f.name()).collect();
    request
        .file_to_generate
        .iter()
        .map(|name| {
            if known.contains(name.as_str()) {
                Ok(name.as_str())
            } else {
                Err(Error::MissingFile(name.clone()))
            }
        })
        .collect()
}
