use crate::math::{Mat4, Vec3};

/// Host-side per-slot instance data for one instanced mesh.
///
/// Slots are addressed by item index. The renderer uploads the matrix
/// block when `matrix_version` has moved past what it last saw, and the
/// color block likewise.
#[derive(Debug, Clone)]
pub struct InstanceBuffer {
    capacity: usize,
    /// 16 floats per slot, column-major
    matrices: Vec<f32>,
    /// 3 floats per slot
    colors: Vec<f32>,
    matrix_version: u64,
    color_version: u64,
}

impl InstanceBuffer {
    pub fn new(capacity: usize) -> Self {
        let mut matrices = Vec::with_capacity(capacity * 16);
        for _ in 0..capacity {
            matrices.extend_from_slice(Mat4::identity().as_slice());
        }

        Self {
            capacity,
            matrices,
            colors: vec![1.0; capacity * 3],
            matrix_version: 0,
            color_version: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn set_matrix_at(&mut self, index: usize, matrix: &Mat4) {
        if index < self.capacity {
            self.matrices[index * 16..index * 16 + 16].copy_from_slice(matrix.as_slice());
        }
    }

    pub fn matrix_at(&self, index: usize) -> Option<Mat4> {
        if index >= self.capacity {
            return None;
        }
        let mut data = [0.0f32; 16];
        data.copy_from_slice(&self.matrices[index * 16..index * 16 + 16]);
        Some(Mat4 { data })
    }

    pub fn set_color_at(&mut self, index: usize, color: Vec3) {
        if index < self.capacity {
            self.colors[index * 3..index * 3 + 3].copy_from_slice(&color.to_array());
        }
    }

    pub fn color_at(&self, index: usize) -> Option<Vec3> {
        if index >= self.capacity {
            return None;
        }
        let c = &self.colors[index * 3..index * 3 + 3];
        Some(Vec3::new(c[0], c[1], c[2]))
    }

    /// Flag the matrix block for upload after a batch of writes
    pub fn mark_matrices_dirty(&mut self) {
        self.matrix_version += 1;
    }

    pub fn mark_colors_dirty(&mut self) {
        self.color_version += 1;
    }

    pub fn matrix_version(&self) -> u64 {
        self.matrix_version
    }

    pub fn color_version(&self) -> u64 {
        self.color_version
    }

    pub fn matrix_data(&self) -> &[f32] {
        &self.matrices
    }

    pub fn color_data(&self) -> &[f32] {
        &self.colors
    }
}
