use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while setting up the GPU.
#[derive(Debug, Error)]
pub enum GpuError {
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable GPU adapter: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to create device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported formats for this adapter")]
    UnsupportedSurface,
}

/// Errors that can occur when creating a texture.
#[derive(Debug, Error)]
pub enum TextureError {
    #[error("failed to decode image: {0}")]
    Image(#[from] image::ImageError),
    #[error("texture dimensions must be non-zero, got {width}x{height}")]
    EmptyTexture { width: u32, height: u32 },
    #[error("RGBA data is {actual} bytes, a {width}x{height} texture needs {expected}")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// Errors from writing to a [`Buffer`](crate::Buffer) or
/// [`BufferArray`](crate::BufferArray).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BufferError {
    #[error("write of {len} bytes at offset {offset} overruns {size} bytes of buffer data")]
    OutOfRange { offset: u64, len: u64, size: u64 },
    #[error("buffer writes need a 4-byte aligned offset and length, got offset {offset} length {len}")]
    Unaligned { offset: u64, len: u64 },
    #[error("no buffer at index {index}, the array holds {count}")]
    NoSuchBuffer { index: usize, count: usize },
    #[error("no index data has been uploaded")]
    NoElements,
}

/// Errors that can occur when loading or compiling a [`Shader`](crate::Shader).
#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("failed to read shader {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("shader '{label}' failed to compile:\n{message}")]
    Compile { label: String, message: String },
}
