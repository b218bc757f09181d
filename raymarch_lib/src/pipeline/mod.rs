//! Frame orchestration for the ray-march pass.
//!
//! One pipeline, one uniform buffer. Per frame: clear color and depth,
//! apply the camera viewport, push all uniforms, and draw the bounding
//! proxy with alpha blending if (and only if) a volume is resident.

mod shader;
mod uniforms;

pub use shader::ShaderError;
pub use uniforms::Uniforms;

use std::path::{Path, PathBuf};

use nalgebra::Point3;

use crate::{
    camera::OrbitCamera,
    proxy::{self, BoundingProxy},
    transfer::TransferFunction,
    volumetric::VolumeTexture,
};

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Clear color behind the volume (white, like the proxy-less frame).
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 1.0,
    g: 1.0,
    b: 1.0,
    a: 1.0,
};

/// Source-alpha over one-minus-source-alpha, on color and alpha alike.
const PROXY_BLEND: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    },
};

pub struct RenderPipeline {
    pipeline: wgpu::RenderPipeline,
    layout: wgpu::PipelineLayout,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    volume_layout: wgpu::BindGroupLayout,
    surface_format: wgpu::TextureFormat,
    shader_path: PathBuf,
}

impl RenderPipeline {
    /// Build the pipeline from the shader source at `shader_path`.
    ///
    /// Failure here is fatal for the caller; there is no usable
    /// half-built state.
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        shader_path: &Path,
    ) -> Result<RenderPipeline, ShaderError> {
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("raycast uniforms"),
            size: std::mem::size_of::<Uniforms>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("raycast uniform layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("raycast uniforms"),
            layout: &uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        // `volume` sampler contract: 3D texture at a fixed unit
        let volume_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("volume layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D3,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("raycast pipeline layout"),
            bind_group_layouts: &[&uniform_layout, &volume_layout],
            push_constant_ranges: &[],
        });

        let source = shader::read_shader_source(shader_path)?;
        let pipeline = build_pipeline(device, &layout, surface_format, &source)?;

        Ok(RenderPipeline {
            pipeline,
            layout,
            uniform_buffer,
            uniform_bind_group,
            volume_layout,
            surface_format,
            shader_path: shader_path.to_path_buf(),
        })
    }

    /// Hot-reload the shader program.
    ///
    /// Build-then-swap: the new pipeline is read, compiled and
    /// validated completely before the old one is dropped, so a failed
    /// reload never leaves the session without a usable program.
    pub fn reload(&mut self, device: &wgpu::Device) -> Result<(), ShaderError> {
        let source = shader::read_shader_source(&self.shader_path)?;
        let fresh = build_pipeline(device, &self.layout, self.surface_format, &source)?;
        self.pipeline = fresh;
        log::info!("shader program reloaded from {}", self.shader_path.display());
        Ok(())
    }

    /// Bind a freshly uploaded volume to the pipeline's texture slot.
    ///
    /// Called once per volume load; the bind group lives as long as
    /// the texture it references.
    pub fn bind_volume(&self, device: &wgpu::Device, volume: &VolumeTexture) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("volume bind group"),
            layout: &self.volume_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(volume.view()),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(volume.sampler()),
                },
            ],
        })
    }

    /// Render one frame.
    ///
    /// All uniforms are written before the command buffer is
    /// submitted; queue writes are ordered ahead of the draw. Without
    /// a volume only the clear happens.
    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        color: &wgpu::TextureView,
        depth: &wgpu::TextureView,
        camera: &OrbitCamera,
        transfer: &TransferFunction,
        light_pos: Point3<f32>,
        proxy: &BoundingProxy,
        volume: Option<&wgpu::BindGroup>,
    ) {
        let uniforms = Uniforms::new(
            &camera.projection_matrix(),
            &camera.view_matrix(),
            &camera.model_matrix(),
            light_pos,
            transfer.thresholds(),
        );
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("frame encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("raycast pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: color,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: depth,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            let vp = camera.viewport();
            pass.set_viewport(vp.x, vp.y, vp.width, vp.height, 0.0, 1.0);

            // nothing meaningful to ray-march without a volume
            if let Some(volume_bind_group) = volume {
                pass.set_pipeline(&self.pipeline);
                pass.set_bind_group(0, &self.uniform_bind_group, &[]);
                pass.set_bind_group(1, volume_bind_group, &[]);
                pass.set_vertex_buffer(0, proxy.vertex_buffer().slice(..));
                pass.draw(0..proxy::VERTEX_COUNT, 0..1);
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }
}

fn build_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    surface_format: wgpu::TextureFormat,
    source: &str,
) -> Result<wgpu::RenderPipeline, ShaderError> {
    let module = shader::compile_module(device, "raycast shader", source)?;

    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("raycast pipeline"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: &module,
            entry_point: "vs_main",
            compilation_options: Default::default(),
            buffers: &[BoundingProxy::vertex_layout()],
        },
        fragment: Some(wgpu::FragmentState {
            module: &module,
            entry_point: "fs_main",
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: Some(PROXY_BLEND),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: Some(wgpu::Face::Back),
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: Default::default(),
            bias: Default::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    });
    match pollster::block_on(device.pop_error_scope()) {
        None => Ok(pipeline),
        Some(err) => Err(ShaderError::Validation(err.to_string())),
    }
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn blending_is_source_alpha_on_both_components() {
        assert_eq!(PROXY_BLEND.color.src_factor, wgpu::BlendFactor::SrcAlpha);
        assert_eq!(
            PROXY_BLEND.color.dst_factor,
            wgpu::BlendFactor::OneMinusSrcAlpha
        );
        assert_eq!(PROXY_BLEND.alpha, PROXY_BLEND.color);
    }
}
