// tensor.rs — The named tensor checkpointed for the viewer.

use zerocopy::IntoBytes;

/// Row-major f32 matrix tagged with the name the viewer looks up in the
/// checkpoint. Row i holds the vector for line i of the metadata file.
pub struct NamedTensor {
    name: String,
    data: Vec<f32>,
    rows: usize,
    dims: usize,
}

impl NamedTensor {
    /// Flatten table rows into one row-major buffer.
    ///
    /// Invariant (enforced by `EmbeddingTable::load`): all rows have equal
    /// length.
    pub fn from_rows(name: &str, rows: &[Vec<f32>]) -> Self {
        let dims = rows.first().map(|r| r.len()).unwrap_or(0);
        let mut data = Vec::with_capacity(rows.len() * dims);
        for row in rows {
            data.extend_from_slice(row);
        }
        Self {
            name: name.to_string(),
            data,
            rows: rows.len(),
            dims,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `[rows, dims]`
    pub fn shape(&self) -> [usize; 2] {
        [self.rows, self.dims]
    }

    pub fn values(&self) -> &[f32] {
        &self.data
    }

    /// Raw bytes of the row-major values, ready for serialization.
    pub fn as_bytes(&self) -> &[u8] {
        self.data.as_bytes()
    }
}
