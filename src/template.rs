//! Template pack discovery, compilation and rendering.
//!
//! A template pack is every `*.tmpl` file below the template directory, in
//! file-name order. Each one yields two Handlebars templates:
//!
//! - the body, compiled from the file contents;
//! - the output name, compiled from the template path minus `.tmpl`, after
//!   percent-decoding (`%7B%7Bservice.name%7D%7D.go.tmpl` renders the same
//!   name as `{{service.name}}.go.tmpl`).
//!
//! Rendering is strict: referencing a field that does not exist is an error,
//! not an empty string. HTML escaping is disabled since the output is source
//! code.
//!
//! ## Helpers
//!
//! - `camel_case`, `pascal_case`, `snake_case`, `kebab_case`, `shouty_snake_case`
//! - `trim_prefix s prefix`
//! - `base_name` - last segment of a dotted name (`acme.shop.Item` → `Item`)
//! - `json` - compact JSON of any value

use crate::context::TemplateContext;
use crate::descriptor::SchemaUnit;
use crate::error::{Error, Result};
use crate::output::OutputFragment;
use handlebars::{handlebars_helper, no_escape, Handlebars};
use heck::{ToKebabCase, ToLowerCamelCase, ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase};
use percent_encoding::percent_decode_str;
use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Suffix marking a file as a template.
pub const TEMPLATE_EXTENSION: &str = "tmpl";

handlebars_helper!(camel_case: |s: str| s.to_lower_camel_case());
handlebars_helper!(pascal_case: |s: str| s.to_upper_camel_case());
handlebars_helper!(snake_case: |s: str| s.to_snake_case());
handlebars_helper!(kebab_case: |s: str| s.to_kebab_case());
handlebars_helper!(shouty_snake_case: |s: str| s.to_shouty_snake_case());
handlebars_helper!(trim_prefix: |s: str, prefix: str| s.strip_prefix(prefix).unwrap_or(s).to_string());
handlebars_helper!(base_name: |s: str| s.rsplit('.').next().unwrap_or(s).to_string());
handlebars_helper!(json: |v: Json| v.to_string());

/// One discovered template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    name: String,
    output_key: String,
}

impl Template {
    /// Path relative to the template directory, `/` separated.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Compiled templates, in declaration (file-name) order.
pub struct TemplatePack {
    handlebars: Handlebars<'static>,
    templates: Vec<Template>,
}

impl TemplatePack {
    /// Discover and compile every template below `dir`.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut pack = Self::empty();

        for entry in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
            let entry = entry.map_err(|source| Error::TemplateDir {
                dir: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            if !entry.file_type().is_file() || path.extension() != Some(OsStr::new(TEMPLATE_EXTENSION)) {
                continue;
            }

            let source = fs::read_to_string(path).map_err(|source| Error::TemplateRead {
                path: path.to_path_buf(),
                source,
            })?;
            pack.add(&relative_name(dir, path), &source)?;
        }

        tracing::debug!(dir = %dir.display(), templates = pack.len(), "template pack loaded");
        Ok(pack)
    }

    /// Compile a template from memory and append it to the pack.
    pub fn add(&mut self, name: &str, source: &str) -> Result<()> {
        let parse_error = |source| Error::TemplateParse {
            template: name.to_string(),
            source: Box::new(source),
        };
        let output_key = format!("{name}#output");

        self.handlebars
            .register_template_string(name, source)
            .map_err(parse_error)?;
        self.handlebars
            .register_template_string(&output_key, output_name_source(name))
            .map_err(parse_error)?;

        tracing::debug!(template = name, "new template");
        self.templates.push(Template {
            name: name.to_string(),
            output_key,
        });
        Ok(())
    }

    /// A pack with helpers registered and no templates.
    pub fn empty() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(no_escape);
        handlebars.register_helper("camel_case", Box::new(camel_case));
        handlebars.register_helper("pascal_case", Box::new(pascal_case));
        handlebars.register_helper("snake_case", Box::new(snake_case));
        handlebars.register_helper("kebab_case", Box::new(kebab_case));
        handlebars.register_helper("shouty_snake_case", Box::new(shouty_snake_case));
        handlebars.register_helper("trim_prefix", Box::new(trim_prefix));
        handlebars.register_helper("base_name", Box::new(base_name));
        handlebars.register_helper("json", Box::new(json));

        Self {
            handlebars,
            templates: Vec::new(),
        }
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Render one template for one unit.
    ///
    /// Returns `None` when the rendered output name is empty or the body is
    /// blank; such a template simply does not apply to this unit.
    pub fn render(
        &self,
        template: &Template,
        context: TemplateContext<'_>,
        unit: &SchemaUnit<'_>,
    ) -> Result<Option<OutputFragment>> {
        let render_error = |source| Error::Render {
            template: template.name.clone(),
            unit: unit.to_string(),
            source: Box::new(source),
        };

        let name = self
            .handlebars
            .render(&template.output_key, &context)
            .map_err(render_error)?;
        let name = name.trim();
        if name.is_empty() {
            tracing::debug!(template = %template.name, %unit, "empty output name, skipping");
            return Ok(None);
        }

        let context = context.with_filename(name);
        let content = self
            .handlebars
            .render(&template.name, &context)
            .map_err(render_error)?;
        if content.trim().is_empty() {
            tracing::debug!(template = %template.name, %unit, "no output");
            return Ok(None);
        }

        Ok(Some(OutputFragment::new(name, content)))
    }
}

impl std::fmt::Debug for TemplatePack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplatePack")
            .field("templates", &self.templates)
            .finish()
    }
}

fn relative_name(dir: &Path, path: &Path) -> String {
    path.strip_prefix(dir)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn output_name_source(name: &str) -> String {
    let stem = name
        .strip_suffix(TEMPLATE_EXTENSION)
        .and_then(|s| s.strip_suffix('.'))
        .unwrap_or(name);
    match percent_decode_str(stem).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        Err(err) => {
            tracing::warn!(template = name, error = %err, "failed to unescape file name");
            stem.to_string()
        }
    }
}
