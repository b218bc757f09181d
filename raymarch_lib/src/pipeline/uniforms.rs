use bytemuck::{Pod, Zeroable};
use nalgebra::{Matrix4, Point3};

/// Uniform block mirrored bit-exact by `struct Uniforms` in the
/// ray-march shader: three transform matrices, the light position and
/// the six transfer-function thresholds.
///
/// WGSL std140-style layout: `light_pos` lands on a 16 byte boundary
/// right after the matrices, the thresholds follow scalar-packed and
/// the tail pad rounds the struct to a multiple of 16.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Uniforms {
    pub projection: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub light_pos: [f32; 3],
    pub min_t_r: f32,
    pub max_t_r: f32,
    pub min_t_g: f32,
    pub max_t_g: f32,
    pub min_t_b: f32,
    pub max_t_b: f32,
    _pad: [f32; 3],
}

fn columns(m: &Matrix4<f32>) -> [[f32; 4]; 4] {
    let mut out = [[0.0; 4]; 4];
    for (c, col) in out.iter_mut().enumerate() {
        for (r, v) in col.iter_mut().enumerate() {
            *v = m[(r, c)];
        }
    }
    out
}

impl Uniforms {
    pub fn new(
        projection: &Matrix4<f32>,
        view: &Matrix4<f32>,
        model: &Matrix4<f32>,
        light_pos: Point3<f32>,
        thresholds: [f32; 6],
    ) -> Uniforms {
        Uniforms {
            projection: columns(projection),
            view: columns(view),
            model: columns(model),
            light_pos: light_pos.coords.into(),
            min_t_r: thresholds[0],
            max_t_r: thresholds[1],
            min_t_g: thresholds[2],
            max_t_g: thresholds[3],
            min_t_b: thresholds[4],
            max_t_b: thresholds[5],
            _pad: [0.0; 3],
        }
    }
}
