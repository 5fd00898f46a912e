//! Owned GPU buffers.
//!
//! [`Buffer`] wraps a single `wgpu::Buffer` that can be refilled
//! ([`Buffer::write`]) or partially updated ([`Buffer::write_sub`]).
//! [`BufferArray`] groups vertex buffers with an optional index buffer and
//! issues the draw calls for them.
//!
//! ```ignore
//! let mut mesh = BufferArray::from_buffers(vec![
//!     Buffer::with_data(&gpu, BufferKind::Vertex, &vertices, "Mesh Vertices"),
//! ]);
//! mesh.buffer_elements(&gpu, &indices);
//!
//! render_pass.set_pipeline(&pipeline);
//! mesh.bind(&mut render_pass);
//! mesh.draw_elements(&mut render_pass, indices.len() as u32)?;
//! ```

use std::borrow::Cow;
use std::ops::Range;

use wgpu::util::DeviceExt;

use crate::error::BufferError;
use crate::gpu::GpuContext;

/// What a [`Buffer`] is bound as.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BufferKind {
    #[default]
    Vertex,
    /// `u32` indices.
    Index,
    Uniform,
}

impl BufferKind {
    pub(crate) fn usages(self) -> wgpu::BufferUsages {
        let usage = match self {
            BufferKind::Vertex => wgpu::BufferUsages::VERTEX,
            BufferKind::Index => wgpu::BufferUsages::INDEX,
            BufferKind::Uniform => wgpu::BufferUsages::UNIFORM,
        };
        usage | wgpu::BufferUsages::COPY_DST
    }
}

/// A GPU buffer, released when dropped.
///
/// The buffer tracks how many bytes were last written with
/// [`Buffer::write`]; [`Buffer::slice`] and [`Buffer::write_sub`] work within
/// that range. The allocation itself may be larger and only grows.
#[derive(Debug)]
pub struct Buffer {
    buffer: wgpu::Buffer,
    kind: BufferKind,
    len: u64,
    label: String,
}

impl Buffer {
    /// Allocates an empty buffer with room for `capacity` bytes.
    pub fn new(gpu: &GpuContext, kind: BufferKind, capacity: u64, label: &str) -> Self {
        let buffer = create_buffer(&gpu.device, kind, align_up(capacity.max(1)), label);
        Self {
            buffer,
            kind,
            len: 0,
            label: label.to_owned(),
        }
    }

    /// Creates a buffer holding `data`.
    pub fn with_data<T: bytemuck::Pod>(
        gpu: &GpuContext,
        kind: BufferKind,
        data: &[T],
        label: &str,
    ) -> Self {
        let bytes = padded(bytemuck::cast_slice(data));
        // zero-sized buffers cannot be bound later
        let contents: &[u8] = if bytes.is_empty() { &[0; 4] } else { &bytes };
        let buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents,
                usage: kind.usages(),
            });

        Self {
            buffer,
            kind,
            len: std::mem::size_of_val(data) as u64,
            label: label.to_owned(),
        }
    }

    pub fn kind(&self) -> BufferKind {
        self.kind
    }

    /// Bytes of data last written with [`Buffer::write`].
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Size of the GPU allocation in bytes.
    pub fn capacity(&self) -> u64 {
        self.buffer.size()
    }

    pub fn raw(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// The written part of the buffer, for `set_vertex_buffer` and friends.
    ///
    /// # Panics
    ///
    /// wgpu rejects empty slices, so the buffer must not be empty.
    pub fn slice(&self) -> wgpu::BufferSlice<'_> {
        self.buffer.slice(..self.len)
    }

    /// Replaces the contents with `data`.
    ///
    /// The allocation is replaced by a larger one when `data` does not fit;
    /// any bind group that references this buffer must then be rebuilt.
    /// Returns `true` in that case.
    pub fn write<T: bytemuck::Pod>(&mut self, gpu: &GpuContext, data: &[T]) -> bool {
        let bytes = padded(bytemuck::cast_slice(data));
        let needed = bytes.len() as u64;

        let grown = needed > self.capacity();
        if grown {
            let capacity = grow_capacity(self.capacity(), needed);
            log::debug!(
                "growing buffer '{}' from {} to {} bytes",
                self.label,
                self.capacity(),
                capacity
            );
            self.buffer = create_buffer(&gpu.device, self.kind, capacity, &self.label);
        }

        if !bytes.is_empty() {
            gpu.queue.write_buffer(&self.buffer, 0, &bytes);
        }
        self.len = std::mem::size_of_val(data) as u64;
        grown
    }

    /// Overwrites part of the data, starting `offset` bytes in.
    ///
    /// The write must stay inside the data set by the last [`Buffer::write`]
    /// and both `offset` and the byte length of `data` must be multiples of 4.
    pub fn write_sub<T: bytemuck::Pod>(
        &self,
        gpu: &GpuContext,
        offset: u64,
        data: &[T],
    ) -> Result<(), BufferError> {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        check_sub_write(offset, bytes.len() as u64, self.len)?;
        if !bytes.is_empty() {
            gpu.queue.write_buffer(&self.buffer, offset, bytes);
        }
        Ok(())
    }
}

/// Vertex buffers drawn together, with an optional index buffer.
///
/// Buffer `i` is bound to vertex buffer slot `i`.
#[derive(Debug, Default)]
pub struct BufferArray {
    buffers: Vec<Buffer>,
    elements: Option<Buffer>,
}

impl BufferArray {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_buffers(buffers: Vec<Buffer>) -> Self {
        Self {
            buffers,
            elements: None,
        }
    }

    /// Number of vertex buffers, not counting the index buffer.
    pub fn count(&self) -> usize {
        self.buffers.len()
    }

    pub fn buffers(&self) -> &[Buffer] {
        &self.buffers
    }

    pub fn buffers_mut(&mut self) -> &mut [Buffer] {
        &mut self.buffers
    }

    pub fn push(&mut self, buffer: Buffer) -> usize {
        self.buffers.push(buffer);
        self.buffers.len() - 1
    }

    /// Replaces the data of vertex buffer `index`.
    pub fn buffer_data<T: bytemuck::Pod>(
        &mut self,
        gpu: &GpuContext,
        index: usize,
        data: &[T],
    ) -> Result<(), BufferError> {
        let count = self.buffers.len();
        let buffer = self
            .buffers
            .get_mut(index)
            .ok_or(BufferError::NoSuchBuffer { index, count })?;
        buffer.write(gpu, data);
        Ok(())
    }

    /// Updates part of vertex buffer `index`. See [`Buffer::write_sub`].
    pub fn buffer_sub_data<T: bytemuck::Pod>(
        &self,
        gpu: &GpuContext,
        index: usize,
        offset: u64,
        data: &[T],
    ) -> Result<(), BufferError> {
        let buffer = self.buffers.get(index).ok_or(BufferError::NoSuchBuffer {
            index,
            count: self.buffers.len(),
        })?;
        buffer.write_sub(gpu, offset, data)
    }

    /// Uploads the index data, creating the index buffer on first use.
    pub fn buffer_elements(&mut self, gpu: &GpuContext, indices: &[u32]) {
        match &mut self.elements {
            Some(elements) => {
                elements.write(gpu, indices);
            }
            None => {
                self.elements = Some(Buffer::with_data(
                    gpu,
                    BufferKind::Index,
                    indices,
                    "Element Buffer",
                ));
            }
        }
    }

    /// Number of indices in the index buffer.
    pub fn element_count(&self) -> u32 {
        self.elements.as_ref().map_or(0, |e| element_count(e.len()))
    }

    /// Binds every non-empty vertex buffer to its slot and the index buffer
    /// if there is one. Set the pipeline first.
    pub fn bind(&self, render_pass: &mut wgpu::RenderPass) {
        for (slot, buffer) in self.buffers.iter().enumerate() {
            if !buffer.is_empty() {
                render_pass.set_vertex_buffer(slot as u32, buffer.slice());
            }
        }
        if let Some(elements) = self.elements.as_ref().filter(|e| !e.is_empty()) {
            render_pass.set_index_buffer(elements.slice(), wgpu::IndexFormat::Uint32);
        }
    }

    /// Draws `vertices` without indices.
    pub fn draw_arrays(&self, render_pass: &mut wgpu::RenderPass, vertices: Range<u32>) {
        if !vertices.is_empty() {
            render_pass.draw(vertices, 0..1);
        }
    }

    /// Draws the first `count` indices.
    pub fn draw_elements(
        &self,
        render_pass: &mut wgpu::RenderPass,
        count: u32,
    ) -> Result<(), BufferError> {
        let available = self.element_count();
        if available == 0 {
            return Err(BufferError::NoElements);
        }
        let count = count.min(available);
        render_pass.draw_indexed(0..count, 0, 0..1);
        Ok(())
    }
}

fn create_buffer(device: &wgpu::Device, kind: BufferKind, size: u64, label: &str) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size,
        usage: kind.usages(),
        mapped_at_creation: false,
    })
}

fn align_up(size: u64) -> u64 {
    size.div_ceil(wgpu::COPY_BUFFER_ALIGNMENT) * wgpu::COPY_BUFFER_ALIGNMENT
}

/// Queue writes must be a multiple of 4 bytes long.
fn padded(bytes: &[u8]) -> Cow<'_, [u8]> {
    let aligned = align_up(bytes.len() as u64) as usize;
    if aligned == bytes.len() {
        Cow::Borrowed(bytes)
    } else {
        let mut owned = bytes.to_vec();
        owned.resize(aligned, 0);
        Cow::Owned(owned)
    }
}

fn grow_capacity(current: u64, needed: u64) -> u64 {
    align_up(needed.max(current.saturating_mul(2)))
}

fn check_sub_write(offset: u64, len: u64, size: u64) -> Result<(), BufferError> {
    if offset % wgpu::COPY_BUFFER_ALIGNMENT != 0 || len % wgpu::COPY_BUFFER_ALIGNMENT != 0 {
        return Err(BufferError::Unaligned { offset, len });
    }
    match offset.checked_add(len) {
        Some(end) if end <= size => Ok(()),
        _ => Err(BufferError::OutOfRange { offset, len, size }),
    }
}

fn element_count(bytes: u64) -> u32 {
    (bytes / std::mem::size_of::<u32>() as u64) as u32
}
