use crate::fields::{FieldSpec, FieldValue};

/// One output row, holding one value per requested field in request order
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRow {
    values: Vec<FieldValue>,
}

impl OutputRow {
    #[must_use]
    pub const fn new(values: Vec<FieldValue>) -> Self {
        Self { values }
    }

    #[must_use]
    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&FieldValue> {
        self.values.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A schema together with the rows that follow it; the unit handed to report writers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub schema: Vec<FieldSpec>,
    pub rows: Vec<OutputRow>,
}

impl Table {
    #[must_use]
    pub const fn new(schema: Vec<FieldSpec>, rows: Vec<OutputRow>) -> Self {
        Self { schema, rows }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
