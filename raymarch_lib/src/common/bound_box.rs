use nalgebra::{Point3, Vector3};

/// Axis aligned bounding box of a volume, in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundBox {
    pub lower: Point3<f32>,
    pub upper: Point3<f32>,
}

impl BoundBox {
    pub fn new(lower: Point3<f32>, upper: Point3<f32>) -> BoundBox {
        BoundBox { lower, upper }
    }

    pub fn from_position_dims(position: Point3<f32>, dimensions: Vector3<f32>) -> BoundBox {
        BoundBox {
            lower: position,
            upper: position + dimensions,
        }
    }

    pub fn dims(&self) -> Vector3<f32> {
        self.upper - self.lower
    }

    pub fn center(&self) -> Point3<f32> {
        nalgebra::center(&self.lower, &self.upper)
    }

    /// Length of the longest side
    pub fn longest_side(&self) -> f32 {
        let d = self.dims();
        f32::max(d.x, f32::max(d.y, d.z))
    }

    pub fn is_in(&self, pos: &Point3<f32>) -> bool {
        self.upper.x > pos.x
            && self.upper.y > pos.y
            && self.upper.z > pos.z
            && pos.x > self.lower.x
            && pos.y > self.lower.y
            && pos.z > self.lower.z
    }
}

#[cfg(test)]
mod test {

    use nalgebra::{point, vector};

    use super::*;

    #[test]
    fn dims_and_center() {
        let bbox = BoundBox::from_position_dims(point![1.0, 1.0, 1.0], vector![2.0, 4.0, 6.0]);

        assert_eq!(bbox.dims(), vector![2.0, 4.0, 6.0]);
        assert_eq!(bbox.center(), point![2.0, 3.0, 4.0]);
        assert_eq!(bbox.longest_side(), 6.0);
    }

    #[test]
    fn is_in() {
        let bbox = BoundBox::new(point![0.0, 0.0, 0.0], point![1.0, 1.0, 1.0]);

        assert!(bbox.is_in(&point![0.5, 0.5, 0.5]));
        assert!(!bbox.is_in(&point![1.5, 0.5, 0.5]));
        assert!(!bbox.is_in(&point![0.5, -0.1, 0.5]));
    }
}
