//! Unit cube proxy geometry for the ray-march pass.
//!
//! Fragments of the cube faces are the ray entry points; the fragment
//! stage marches the volume texture behind them. The mesh is immutable
//! and created once at startup.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ProxyVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

pub const VERTEX_COUNT: u32 = 36;

// `vertex` at location 0, `normal` at location 1
const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

/// Cube spanning `[-0.5, 0.5]` on each axis, counter-clockwise winding
/// seen from outside, outward normals.
pub fn unit_cube_vertices() -> Vec<ProxyVertex> {
    // (normal, u axis, v axis) per face, with u x v = normal
    const FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]),
        ([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
    ];

    let mut vertices = Vec::with_capacity(VERTEX_COUNT as usize);
    for (normal, u, v) in FACES {
        let corner = |su: f32, sv: f32| -> ProxyVertex {
            let position = [
                0.5 * normal[0] + su * 0.5 * u[0] + sv * 0.5 * v[0],
                0.5 * normal[1] + su * 0.5 * u[1] + sv * 0.5 * v[1],
                0.5 * normal[2] + su * 0.5 * u[2] + sv * 0.5 * v[2],
            ];
            ProxyVertex { position, normal }
        };

        let c00 = corner(-1.0, -1.0);
        let c10 = corner(1.0, -1.0);
        let c11 = corner(1.0, 1.0);
        let c01 = corner(-1.0, 1.0);

        vertices.extend_from_slice(&[c00, c10, c11, c00, c11, c01]);
    }
    vertices
}

pub struct BoundingProxy {
    vertex_buffer: wgpu::Buffer,
}

impl BoundingProxy {
    pub fn new(device: &wgpu::Device) -> BoundingProxy {
        let vertices = unit_cube_vertices();
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("proxy cube vertices"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        BoundingProxy { vertex_buffer }
    }

    pub fn vertex_buffer(&self) -> &wgpu::Buffer {
        &self.vertex_buffer
    }

    pub fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ProxyVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}
