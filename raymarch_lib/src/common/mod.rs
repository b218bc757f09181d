mod bound_box;
mod viewport;

pub use bound_box::BoundBox;
pub use viewport::Viewport;
