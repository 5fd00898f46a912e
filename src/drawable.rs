use crate::vertex::ColorVertex;

/// How a drawable's vertices are connected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineTopology {
    /// Every pair of vertices is a separate segment.
    #[default]
    List,
    /// Each vertex continues the line from the previous one.
    Strip,
}

impl LineTopology {
    pub(crate) fn to_wgpu(self) -> wgpu::PrimitiveTopology {
        match self {
            LineTopology::List => wgpu::PrimitiveTopology::LineList,
            LineTopology::Strip => wgpu::PrimitiveTopology::LineStrip,
        }
    }
}

/// Line geometry that can be rendered by [`LinePass`](crate::LinePass).
///
/// Implementors build their vertices in model space; the pass applies the
/// MVP matrix given with each [`LineDraw`](crate::LineDraw).
pub trait Drawable {
    /// The vertices to upload for this frame.
    fn vertices(&self) -> Vec<ColorVertex>;

    /// How [`Drawable::vertices`] are connected.
    fn topology(&self) -> LineTopology {
        LineTopology::List
    }
}
