use std::collections::HashSet;

use crate::foundation::error::{PadframeError, PadframeResult};
use crate::model::FormatSpec;

/// Built-in formats: `(id, width, height, label)`.
pub const DEFAULT_FORMATS: &[(&str, u32, u32, &str)] = &[
    ("1", 1000, 1000, "Square (1:1)"),
    ("2", 1080, 1320, "Portrait (Instagram/Ozon)"),
    ("3", 1080, 607, "Landscape (Horizontal)"),
];

/// Size and label used by [`FormatList::add_default`].
pub const NEW_FORMAT: (u32, u32, &str) = (1080, 1920, "New Format");

/// Single-field edit applied by [`FormatList::update`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormatField {
    Width(u32),
    Height(u32),
    Label(String),
}

/// Ordered, never-empty list of output formats with unique ids.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormatList {
    formats: Vec<FormatSpec>,
    next_id: u64,
}

impl FormatList {
    /// Build a validated list: at least one entry, unique ids, positive dimensions.
    pub fn new(formats: Vec<FormatSpec>) -> PadframeResult<Self> {
        if formats.is_empty() {
            return Err(PadframeError::validation(
                "at least one output format is required",
            ));
        }
        let mut seen = HashSet::with_capacity(formats.len());
        for f in &formats {
            f.validate()?;
            if !seen.insert(f.id.as_str()) {
                return Err(PadframeError::validation(format!(
                    "duplicate format id '{}'",
                    f.id
                )));
            }
        }
        let next_id = formats.len() as u64 + 1;
        Ok(Self { formats, next_id })
    }

    pub fn defaults() -> Self {
        let formats = DEFAULT_FORMATS
            .iter()
            .map(|&(id, w, h, label)| FormatSpec::new(id, w, h, label))
            .collect::<Vec<_>>();
        let next_id = formats.len() as u64 + 1;
        Self { formats, next_id }
    }

    pub fn as_slice(&self) -> &[FormatSpec] {
        &self.formats
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FormatSpec> {
        self.formats.iter()
    }

    pub fn len(&self) -> usize {
        self.formats.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&FormatSpec> {
        self.formats.iter().find(|f| f.id == id)
    }

    /// Append a format under a freshly generated id.
    pub fn add(
        &mut self,
        width: u32,
        height: u32,
        label: impl Into<String>,
    ) -> PadframeResult<&FormatSpec> {
        let spec = FormatSpec::new(self.fresh_id(), width, height, label);
        spec.validate()?;
        self.formats.push(spec);
        Ok(&self.formats[self.formats.len() - 1])
    }

    /// Append a [`NEW_FORMAT`] entry.
    pub fn add_default(&mut self) -> &FormatSpec {
        let (w, h, label) = NEW_FORMAT;
        let spec = FormatSpec::new(self.fresh_id(), w, h, label);
        self.formats.push(spec);
        &self.formats[self.formats.len() - 1]
    }

    /// Edit one field of an existing format in place.
    pub fn update(&mut self, id: &str, field: FormatField) -> PadframeResult<()> {
        let spec = self
            .formats
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| PadframeError::validation(format!("unknown format id '{id}'")))?;
        match field {
            FormatField::Width(0) | FormatField::Height(0) => {
                return Err(PadframeError::validation(format!(
                    "format '{id}' width/height must be > 0"
                )));
            }
            FormatField::Width(w) => spec.width = w,
            FormatField::Height(h) => spec.height = h,
            FormatField::Label(label) => spec.label = label,
        }
        Ok(())
    }

    /// Remove a format. The last remaining format cannot be removed.
    pub fn remove(&mut self, id: &str) -> PadframeResult<FormatSpec> {
        let idx = self
            .formats
            .iter()
            .position(|f| f.id == id)
            .ok_or_else(|| PadframeError::validation(format!("unknown format id '{id}'")))?;
        if self.formats.len() == 1 {
            return Err(PadframeError::validation(
                "cannot remove the last output format",
            ));
        }
        Ok(self.formats.remove(idx))
    }

    fn fresh_id(&mut self) -> String {
        loop {
            let id = self.next_id.to_string();
            self.next_id += 1;
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}

impl Default for FormatList {
    fn default() -> Self {
        Self::defaults()
    }
}

impl<'a> IntoIterator for &'a FormatList {
    type Item = &'a FormatSpec;
    type IntoIter = std::slice::Iter<'a, FormatSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/batch/format.rs"]
mod tests;
