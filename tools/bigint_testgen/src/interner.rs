use std::collections::HashMap;

/// Deduplicates expected results by their canonical hex text.
///
/// Indices are dense, assigned in first-seen order, and never change for the
/// lifetime of the interner.
#[derive(Debug, Default, Clone)]
pub struct ResultInterner {
    index: HashMap<String, usize>,
    values: Vec<String>,
}

impl ResultInterner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, value: &str) -> usize {
        if let Some(&existing) = self.index.get(value) {
            return existing;
        }
        let assigned = self.values.len();
        self.values.push(value.to_string());
        self.index.insert(value.to_string(), assigned);
        assigned
    }

    #[cfg(test)]
    pub(crate) fn get(&self, value: &str) -> Option<usize> {
        self.index.get(value).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn into_values(self) -> Vec<String> {
        self.values
    }
}
