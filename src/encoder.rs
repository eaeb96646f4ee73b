//! Encoders render the template pack against one schema unit.
//!
//! [`FileEncoder`] exposes a whole file to every template; [`ServiceEncoder`]
//! exposes one service plus the header of its file. Both share the rendering
//! loop in [`Encoder::files`] and only differ in how the context is built.

use crate::config::Configuration;
use crate::context::TemplateContext;
use crate::descriptor::{FileView, SchemaUnit, ServiceView};
use crate::error::Result;
use crate::output::OutputFragment;
use crate::registry::TypeRegistry;
use crate::template::{Template, TemplatePack};
use prost_types::{FileDescriptorProto, ServiceDescriptorProto};

pub trait Encoder {
    /// The unit being encoded, for diagnostics.
    fn unit(&self) -> SchemaUnit<'_>;

    /// Context for one template.
    fn context<'s>(&'s self, template: &'s Template) -> TemplateContext<'s>;

    /// Render every template of the pack, in pack order.
    ///
    /// Any render failure aborts the whole call; no partial output is returned.
    fn files(&self, pack: &TemplatePack) -> Result<Vec<OutputFragment>> {
        let unit = self.unit();
        let mut fragments = Vec::with_capacity(pack.len());
        for template in pack.templates() {
            if let Some(fragment) = pack.render(template, self.context(template), &unit)? {
                tracing::debug!(
                    template = template.name(),
                    output = %fragment.name,
                    bytes = fragment.content.len(),
                    %unit,
                    "rendered fragment"
                );
                fragments.push(fragment);
            }
        }
        Ok(fragments)
    }
}

/// Renders templates once per file.
pub struct FileEncoder<'a> {
    file: &'a FileDescriptorProto,
    view: FileView,
    options: &'a Configuration,
}

impl<'a> FileEncoder<'a> {
    pub fn new(
        file: &'a FileDescriptorProto,
        registry: Option<&TypeRegistry>,
        options: &'a Configuration,
    ) -> Self {
        Self {
            file,
            view: FileView::new(file, registry),
            options,
        }
    }
}

impl Encoder for FileEncoder<'_> {
    fn unit(&self) -> SchemaUnit<'_> {
        SchemaUnit::File(self.file)
    }

    fn context<'s>(&'s self, template: &'s Template) -> TemplateContext<'s> {
        TemplateContext::new(&self.view, None, &self.view.enums, template.name(), self.options)
    }
}

/// Renders templates once per service.
pub struct ServiceEncoder<'a> {
    file: &'a FileDescriptorProto,
    service: &'a ServiceDescriptorProto,
    header: FileView,
    view: ServiceView,
    options: &'a Configuration,
}

impl<'a> ServiceEncoder<'a> {
    pub fn new(
        file: &'a FileDescriptorProto,
        service: &'a ServiceDescriptorProto,
        registry: Option<&TypeRegistry>,
        options: &'a Configuration,
    ) -> Self {
        Self {
            file,
            service,
            header: FileView::header(file),
            view: ServiceView::new(service, file.package(), registry),
            options,
        }
    }
}

impl Encoder for ServiceEncoder<'_> {
    fn unit(&self) -> SchemaUnit<'_> {
        SchemaUnit::Service {
            file: self.file,
            service: self.service,
        }
    }

    fn context<'s>(&'s self, template: &'s Template) -> TemplateContext<'s> {
        TemplateContext::new(&self.header, Some(&self.view), &[], template.name(), self.options)
    }
}
