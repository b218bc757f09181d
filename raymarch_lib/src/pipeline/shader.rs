use std::{fmt, io, path::Path};

/// Failure to produce a usable shader program.
///
/// Both variants are fatal for the session: at startup nothing can
/// render, and on hot-reload continuing with an inconsistent program
/// is not an option.
#[derive(Debug)]
pub enum ShaderError {
    /// Shader source could not be read from disk.
    Read(io::Error),
    /// Module or pipeline failed wgpu validation (the link-failure
    /// equivalent); carries the backend diagnostic.
    Validation(String),
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::Read(e) => write!(f, "cannot read shader source: {e}"),
            ShaderError::Validation(msg) => write!(f, "shader validation failed: {msg}"),
        }
    }
}

impl std::error::Error for ShaderError {}

pub fn read_shader_source(path: &Path) -> Result<String, ShaderError> {
    std::fs::read_to_string(path).map_err(ShaderError::Read)
}

/// Compile a shader module under a validation error scope.
///
/// wgpu reports broken WGSL through the error scope rather than a
/// `Result`, so the scope is popped before the module may be used.
pub fn compile_module(
    device: &wgpu::Device,
    label: &str,
    source: &str,
) -> Result<wgpu::ShaderModule, ShaderError> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });
    match pollster::block_on(device.pop_error_scope()) {
        None => Ok(module),
        Some(err) => Err(ShaderError::Validation(err.to_string())),
    }
}
