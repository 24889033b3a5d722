use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::batch::format::FormatList;
use crate::foundation::error::{PadframeError, PadframeResult};
use crate::model::{FormatSpec, StyleOptions};
use crate::render::RenderOpts;

/// One output format as written in a config file. `id` is assigned when omitted.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormatDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub label: String,
}

impl From<&FormatSpec> for FormatDef {
    fn from(spec: &FormatSpec) -> Self {
        Self {
            id: Some(spec.id.clone()),
            width: spec.width,
            height: spec.height,
            label: spec.label.clone(),
        }
    }
}

/// Top-level keys accepted in a config file, including the flattened [`RenderOpts`] fields.
pub const CONFIG_KEYS: &[&str] = &["formats", "style", "padding_ratio", "jpeg_quality", "shadow"];

/// Batch configuration loaded from JSON. Every field is optional; unknown keys are rejected.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    pub formats: Vec<FormatDef>,
    pub style: StyleOptions,
    #[serde(flatten)]
    pub render: RenderOpts,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            formats: FormatList::defaults().iter().map(FormatDef::from).collect(),
            style: StyleOptions::default(),
            render: RenderOpts::default(),
        }
    }
}

impl Config {
    pub fn from_reader<R: std::io::Read>(r: R) -> PadframeResult<Self> {
        let value: serde_json::Value = serde_json::from_reader(r)
            .map_err(|e| PadframeError::serde(format!("parse config JSON: {e}")))?;
        Self::from_value(value)
    }

    pub fn from_json_str(s: &str) -> PadframeResult<Self> {
        let value: serde_json::Value = serde_json::from_str(s)
            .map_err(|e| PadframeError::serde(format!("parse config JSON: {e}")))?;
        Self::from_value(value)
    }

    fn from_value(value: serde_json::Value) -> PadframeResult<Self> {
        // Flattened fields disable serde's own unknown-field check at the top level.
        if let Some(obj) = value.as_object()
            && let Some(key) = obj.keys().find(|k| !CONFIG_KEYS.contains(&k.as_str()))
        {
            return Err(PadframeError::serde(format!(
                "parse config JSON: unknown field `{key}`, expected one of {}",
                CONFIG_KEYS.join(", ")
            )));
        }
        serde_json::from_value(value)
            .map_err(|e| PadframeError::serde(format!("parse config JSON: {e}")))
    }

    /// Parse a config file from disk.
    pub fn from_path(path: impl AsRef<Path>) -> PadframeResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            PadframeError::validation(format!("open config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn validate(&self) -> PadframeResult<()> {
        self.render.validate()?;
        self.format_list().map(|_| ())
    }

    /// Build the run's format list, numbering formats that have no explicit id.
    pub fn format_list(&self) -> PadframeResult<FormatList> {
        let taken: HashSet<&str> = self
            .formats
            .iter()
            .filter_map(|f| f.id.as_deref())
            .collect();
        let mut next = 1u64;
        let specs = self
            .formats
            .iter()
            .map(|def| {
                let id = match &def.id {
                    Some(id) => id.clone(),
                    None => loop {
                        let candidate = next.to_string();
                        next += 1;
                        if !taken.contains(candidate.as_str()) {
                            break candidate;
                        }
                    },
                };
                FormatSpec::new(id, def.width, def.height, def.label.clone())
            })
            .collect();
        FormatList::new(specs)
    }

    pub fn to_json_pretty(&self) -> PadframeResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| PadframeError::serde(format!("serialize config JSON: {e}")))
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
