//! Generated output and the merge rule for fragments sharing a file name.

use indexmap::IndexMap;
use prost_types::compiler::{code_generator_response, CodeGeneratorResponse};

/// One piece of rendered text destined for one output path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFragment {
    /// File name relative to the destination directory
    pub name: String,
    pub content: String,
}

impl OutputFragment {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Ordered set of generated files, unique by name.
///
/// Entries keep the position at which their name was first seen. Fragments for
/// an existing name are appended to its content verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputSet {
    files: IndexMap<String, String>,
}

impl OutputSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a fragment into the set and return it.
    pub fn merge(mut self, fragment: OutputFragment) -> Self {
        self.push(fragment);
        self
    }

    /// Merge a fragment in place.
    ///
    /// Names are keyed without leading `./`, so `./a.txt` and `a.txt` land in
    /// the same entry.
    pub fn push(&mut self, fragment: OutputFragment) {
        let name = normalize_name(&fragment.name);
        match self.files.get_mut(name) {
            Some(content) => content.push_str(&fragment.content),
            None => {
                self.files.insert(name.to_string(), fragment.content);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Content merged so far for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.files.get(name).map(String::as_str)
    }

    /// File names in emission order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    /// `(name, content)` pairs in emission order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Build the protoc response, prefixing every name with `destination_dir`.
    pub fn into_response(self, destination_dir: &str) -> CodeGeneratorResponse {
        let file = self
            .files
            .into_iter()
            .map(|(name, content)| code_generator_response::File {
                name: Some(destination_path(destination_dir, &name)),
                insertion_point: None,
                content: Some(content),
                generated_code_info: None,
            })
            .collect();

        CodeGeneratorResponse {
            file,
            supported_features: Some(code_generator_response::Feature::Proto3Optional as u64),
            ..Default::default()
        }
    }
}

impl Extend<OutputFragment> for OutputSet {
    fn extend<I: IntoIterator<Item = OutputFragment>>(&mut self, iter: I) {
        for fragment in iter {
            self.push(fragment);
        }
    }
}

impl FromIterator<OutputFragment> for OutputSet {
    fn from_iter<I: IntoIterator<Item = OutputFragment>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

fn normalize_name(name: &str) -> &str {
    name.trim_start_matches("./")
}

/// Join `name` under `dir` the way protoc expects: `/` separated, relative.
pub fn destination_path(dir: &str, name: &str) -> String {
    let dir = dir.trim_end_matches('/');
    if dir.is_empty() || dir == "." {
        return name.to_string();
    }
    let dir = dir.strip_prefix("./").unwrap_or(dir);
    format!("{dir}/{name}")
}
