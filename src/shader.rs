//! WGSL shader modules.
//!
//! The passes in this crate compile their bundled shaders with
//! [`Shader::builtin`]. User shaders go through [`Shader::from_wgsl`] or
//! [`Shader::from_file`], which report compile errors as a [`ShaderError`]
//! instead of a validation panic.

use std::path::Path;

use crate::error::ShaderError;
use crate::gpu::GpuContext;

/// A compiled WGSL module, released when dropped.
#[derive(Debug)]
pub struct Shader {
    module: wgpu::ShaderModule,
    label: String,
}

impl Shader {
    /// Compiles `source`, returning the compiler's message if it is invalid.
    pub fn from_wgsl(gpu: &GpuContext, source: &str, label: &str) -> Result<Self, ShaderError> {
        gpu.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let module = create_module(&gpu.device, source, label);
        if let Some(error) = pollster::block_on(gpu.device.pop_error_scope()) {
            log::warn!("shader '{}' failed to compile", label);
            return Err(ShaderError::Compile {
                label: label.to_owned(),
                message: error.to_string(),
            });
        }

        log::debug!("compiled shader '{}'", label);
        Ok(Self {
            module,
            label: label.to_owned(),
        })
    }

    /// Reads and compiles a WGSL file. The path is used as the label.
    pub fn from_file(gpu: &GpuContext, path: impl AsRef<Path>) -> Result<Self, ShaderError> {
        let path = path.as_ref();
        let source = read_source(path)?;
        Self::from_wgsl(gpu, &source, &path.display().to_string())
    }

    /// Compiles a shader that ships with the crate and is known to be valid.
    pub(crate) fn builtin(device: &wgpu::Device, source: &str, label: &str) -> Self {
        Self {
            module: create_module(device, source, label),
            label: label.to_owned(),
        }
    }

    pub fn module(&self) -> &wgpu::ShaderModule {
        &self.module
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

fn create_module(device: &wgpu::Device, source: &str, label: &str) -> wgpu::ShaderModule {
    device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    })
}

/// Reads shader source text from `path`.
pub fn read_source(path: impl AsRef<Path>) -> Result<String, ShaderError> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|source| ShaderError::Io {
        path: path.to_path_buf(),
        source,
    })
}
