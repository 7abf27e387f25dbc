/// Vertex layout of a [`Mesh`]'s interleaved data.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum VertexLayout {
    /// 3 position floats followed by 3 color floats per vertex.
    PositionColor,
    /// 3 position floats followed by 2 texture-coordinate floats per vertex.
    PositionUv,
}

impl VertexLayout {
    /// Floats per vertex.
    #[inline]
    pub const fn stride(self) -> usize {
        match self {
            VertexLayout::PositionColor => 6,
            VertexLayout::PositionUv => 5,
        }
    }
}

/// CPU-side mesh descriptor produced by the geometry builders.
///
/// Immutable after construction. The GPU layer uploads `vertex_data` (and
/// `index_data` when present) once and refers to the mesh by handle
/// afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub label: &'static str,
    pub layout: VertexLayout,
    pub vertex_data: Vec<f32>,
    pub index_data: Option<Vec<u16>>,
    pub vertex_count: usize,
}

impl Mesh {
    /// Builds a mesh, deriving `vertex_count` from the data length.
    ///
    /// Invariant: `vertex_data.len()` must be an exact multiple of the
    /// layout stride; the builders guarantee this by construction and
    /// [`validate`](Self::validate) re-checks it before upload.
    pub fn new(
        label: &'static str,
        layout: VertexLayout,
        vertex_data: Vec<f32>,
        index_data: Option<Vec<u16>>,
    ) -> Self {
        let vertex_count = vertex_data.len() / layout.stride();
        Self {
            label,
            layout,
            vertex_data,
            index_data,
            vertex_count,
        }
    }

    /// Number of elements a draw call consumes: indices when indexed,
    /// vertices otherwise.
    #[inline]
    pub fn draw_count(&self) -> usize {
        match &self.index_data {
            Some(idx) => idx.len(),
            None => self.vertex_count,
        }
    }

    /// Checks the structural invariants prior to GPU upload.
    ///
    /// Returns a description of the violation, or `None` when the mesh is
    /// well formed: data length divides evenly by the stride, the recorded
    /// vertex count matches, and every index refers to an existing vertex.
    pub fn validate(&self) -> Option<String> {
        let stride = self.layout.stride();
        if self.vertex_data.len() % stride != 0 {
            return Some(format!(
                "vertex data length {} is not a multiple of stride {stride}",
                self.vertex_data.len()
            ));
        }
        if self.vertex_count * stride != self.vertex_data.len() {
            return Some(format!(
                "vertex count {} does not match data length {}",
                self.vertex_count,
                self.vertex_data.len()
            ));
        }
        if let Some(indices) = &self.index_data {
            if let Some(&bad) = indices.iter().find(|&&i| (i as usize) >= self.vertex_count) {
                return Some(format!(
                    "index {bad} out of range for {} vertices",
                    self.vertex_count
                ));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_count_derived_from_stride() {
        let m = Mesh::new("m", VertexLayout::PositionColor, vec![0.0; 12], None);
        assert_eq!(m.vertex_count, 2);
        assert!(m.validate().is_none());
    }

    #[test]
    fn draw_count_prefers_indices() {
        let m = Mesh::new(
            "m",
            VertexLayout::PositionUv,
            vec![0.0; 10],
            Some(vec![0, 1, 0]),
        );
        assert_eq!(m.vertex_count, 2);
        assert_eq!(m.draw_count(), 3);
    }

    #[test]
    fn validate_rejects_ragged_data() {
        let mut m = Mesh::new("m", VertexLayout::PositionColor, vec![0.0; 12], None);
        m.vertex_data.push(1.0);
        assert!(m.validate().is_some());
    }

    #[test]
    fn validate_rejects_out_of_range_index() {
        let m = Mesh::new(
            "m",
            VertexLayout::PositionUv,
            vec![0.0; 10],
            Some(vec![0, 2]),
        );
        assert!(m.validate().is_some());
    }
}
