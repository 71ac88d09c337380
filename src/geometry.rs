//! Ground-plane math shared by the transform tasks.
//!
//! All of the geometry here works on the horizontal (x, z) plane; the
//! vertical axis never participates in centroids, offsets, or rotation.

/// A point or offset on the horizontal ground plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ground {
    pub x: f64,
    pub z: f64,
}

impl Ground {
    pub fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    /// Offset that carries `self` onto `target`.
    pub fn offset_to(self, target: Ground) -> Ground {
        Ground {
            x: target.x - self.x,
            z: target.z - self.z,
        }
    }

    pub fn shifted_by(self, offset: Ground) -> Ground {
        Ground {
            x: self.x + offset.x,
            z: self.z + offset.z,
        }
    }

    pub fn scaled(self, factor: f64) -> Ground {
        Ground {
            x: self.x * factor,
            z: self.z * factor,
        }
    }

    /// Rotate around the origin by `angle_degrees` (counter-clockwise).
    pub fn rotated_degrees(self, angle_degrees: f64) -> Ground {
        let radians = angle_degrees.to_radians();
        let (sin, cos) = radians.sin_cos();
        Ground {
            x: self.x * cos - self.z * sin,
            z: self.x * sin + self.z * cos,
        }
    }
}

/// Arithmetic mean of the given points; `None` when the set is empty.
pub fn centroid(points: &[Ground]) -> Option<Ground> {
    if points.is_empty() {
        return None;
    }
    let count = points.len() as f64;
    let sum_x: f64 = points.iter().map(|p| p.x).sum();
    let sum_z: f64 = points.iter().map(|p| p.z).sum();
    Some(Ground {
        x: sum_x / count,
        z: sum_z / count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_centroid_is_mean_of_each_axis() {
        let points = [
            Ground::new(0.0, 0.0),
            Ground::new(10.0, 0.0),
            Ground::new(5.0, 10.0),
        ];
        let center = centroid(&points).unwrap();
        assert_close(center.x, 5.0);
        assert_close(center.z, 10.0 / 3.0);
    }

    #[test]
    fn test_centroid_of_empty_set_is_none() {
        assert!(centroid(&[]).is_none());
    }

    #[test]
    fn test_offset_to_carries_point_onto_target() {
        let current = Ground::new(5.0, 10.0 / 3.0);
        let target = Ground::new(1250.0, -15.0);
        let offset = current.offset_to(target);
        let moved = current.shifted_by(offset);
        assert_close(moved.x, target.x);
        assert_close(moved.z, target.z);
    }

    #[test]
    fn test_quarter_turn_rotation() {
        let point = Ground::new(1.0, 0.0);
        let turned = point.rotated_degrees(90.0);
        assert_close(turned.x, 0.0);
        assert_close(turned.z, 1.0);
    }

    #[test]
    fn test_rotation_preserves_length() {
        let point = Ground::new(3.0, 4.0);
        let turned = point.rotated_degrees(-37.5);
        let length = (turned.x * turned.x + turned.z * turned.z).sqrt();
        assert_close(length, 5.0);
    }

    #[test]
    fn test_scaled_multiplies_both_axes() {
        let point = Ground::new(2.0, -3.0).scaled(1.5);
        assert_close(point.x, 3.0);
        assert_close(point.z, -4.5);
    }
}
