//! The data handed to a template render call.

use crate::config::Configuration;
use crate::descriptor::{EnumView, FileView, ServiceView};
use serde::Serialize;

/// Everything a template can reference.
///
/// Every key is always present (absent values serialize as `null` or `[]`),
/// so strict-mode rendering only fails on genuinely unknown paths.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateContext<'a> {
    /// The whole file, or only its header for service units
    pub file: &'a FileView,
    /// The service being rendered, for service units
    pub service: Option<&'a ServiceView>,
    /// File-level enums, empty for service units
    pub enums: &'a [EnumView],
    /// Template path relative to the template directory
    pub raw_filename: &'a str,
    /// Rendered output name; empty while the name itself is rendered
    pub filename: String,
    pub options: &'a Configuration,
}

impl<'a> TemplateContext<'a> {
    pub fn new(
        file: &'a FileView,
        service: Option<&'a ServiceView>,
        enums: &'a [EnumView],
        raw_filename: &'a str,
        options: &'a Configuration,
    ) -> Self {
        Self {
            file,
            service,
            enums,
            raw_filename,
            filename: String::new(),
            options,
        }
    }

    /// The same context, once the output name is known.
    pub fn with_filename(self, filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            ..self
        }
    }
}
