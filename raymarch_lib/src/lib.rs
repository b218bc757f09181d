pub mod camera;
pub mod common;
pub mod pipeline;
pub mod proxy;
pub mod transfer;
pub mod volumetric;

pub use camera::OrbitCamera;
pub use pipeline::RenderPipeline;
pub use proxy::BoundingProxy;
pub use transfer::TransferFunction;
