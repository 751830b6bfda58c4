/// Component type of one vertex attribute. All lesson data is `f32`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AttributeKind {
    Float32x2,
    Float32x3,
    Float32x4,
}

impl AttributeKind {
    #[inline]
    pub fn components(self) -> usize {
        match self {
            AttributeKind::Float32x2 => 2,
            AttributeKind::Float32x3 => 3,
            AttributeKind::Float32x4 => 4,
        }
    }

    #[inline]
    fn format(self) -> wgpu::VertexFormat {
        match self {
            AttributeKind::Float32x2 => wgpu::VertexFormat::Float32x2,
            AttributeKind::Float32x3 => wgpu::VertexFormat::Float32x3,
            AttributeKind::Float32x4 => wgpu::VertexFormat::Float32x4,
        }
    }
}

/// Interleaved vertex layout.
///
/// Attributes are packed in declaration order and bound to shader locations
/// `0..n` in that same order.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexLayout {
    kinds: Vec<AttributeKind>,
    attributes: Vec<wgpu::VertexAttribute>,
    stride: u64,
}

impl VertexLayout {
    pub fn new(kinds: &[AttributeKind]) -> Self {
        let mut offset = 0u64;
        let attributes = kinds
            .iter()
            .enumerate()
            .map(|(location, kind)| {
                let attr = wgpu::VertexAttribute {
                    format: kind.format(),
                    offset,
                    shader_location: location as u32,
                };
                offset += kind.format().size();
                attr
            })
            .collect();

        Self {
            kinds: kinds.to_vec(),
            attributes,
            stride: offset,
        }
    }

    /// 2D position only.
    pub fn position2() -> Self {
        Self::new(&[AttributeKind::Float32x2])
    }

    /// 2D position + UV.
    pub fn position2_uv() -> Self {
        Self::new(&[AttributeKind::Float32x2, AttributeKind::Float32x2])
    }

    /// 3D position + UV.
    pub fn position3_uv() -> Self {
        Self::new(&[AttributeKind::Float32x3, AttributeKind::Float32x2])
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Bytes per vertex.
    #[inline]
    pub fn stride(&self) -> u64 {
        self.stride
    }

    /// `f32` values per vertex.
    pub fn floats_per_vertex(&self) -> usize {
        self.kinds.iter().map(|k| k.components()).sum()
    }

    pub fn attributes(&self) -> &[wgpu::VertexAttribute] {
        &self.attributes
    }

    pub fn buffer_layout(&self) -> wgpu::VertexBufferLayout<'_> {
        wgpu::VertexBufferLayout {
            array_stride: self.stride,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &self.attributes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_uv_offsets() {
        let layout = VertexLayout::position2_uv();
        assert_eq!(layout.stride(), 16);
        assert_eq!(layout.floats_per_vertex(), 4);

        let offsets: Vec<u64> = layout.attributes().iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 8]);

        let locations: Vec<u32> = layout.attributes().iter().map(|a| a.shader_location).collect();
        assert_eq!(locations, vec![0, 1]);
    }

    #[test]
    fn cube_layout_stride() {
        let layout = VertexLayout::position3_uv();
        assert_eq!(layout.stride(), 20);
        assert_eq!(layout.floats_per_vertex(), 5);
        assert_eq!(layout.attributes()[1].offset, 12);
    }

    #[test]
    fn mixed_layout() {
        let layout = VertexLayout::new(&[
            AttributeKind::Float32x3,
            AttributeKind::Float32x4,
            AttributeKind::Float32x2,
        ]);
        assert_eq!(layout.stride(), 36);
        assert_eq!(layout.attributes()[2].offset, 28);
        assert_eq!(layout.buffer_layout().array_stride, 36);
    }

    #[test]
    fn empty_layout() {
        let layout = VertexLayout::new(&[]);
        assert!(layout.is_empty());
        assert_eq!(layout.stride(), 0);
    }
}
