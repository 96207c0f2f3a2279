//! Rays, bounding boxes and the ray/triangle test used for surface picking.

use glam::Vec3;

/// Determinant threshold below which a ray counts as parallel to a triangle.
const PARALLEL_EPSILON: f32 = 1e-9;

/// Barycentric slack so rays through shared edges never slip between triangles.
const EDGE_EPSILON: f32 = 1e-6;

/// A half-line `origin + t * direction`, `t >= 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit-length direction.
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray; `direction` is normalized.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Nearest intersection of a ray with a surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Distance along the ray.
    pub distance: f32,
    /// World-space hit point.
    pub point: Vec3,
    /// Geometric normal of the hit triangle, facing the side it was built for.
    pub normal: Vec3,
    /// Index of the hit triangle within its patch.
    pub triangle: u32,
}

/// An axis-aligned bounding box in f32 space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// An inverted box that any `grow` call replaces.
    pub const EMPTY: Aabb = Aabb {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box containing all `points`.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        points.into_iter().fold(Self::EMPTY, |mut aabb, p| {
            aabb.grow(p);
            aabb
        })
    }

    pub fn grow(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Slab test. Returns the entry distance if the ray meets the box within `max_distance`.
    ///
    /// An axis the ray does not move along is checked against the origin directly,
    /// so rays lying in a face plane still count as touching the box.
    pub fn ray_entry(&self, ray: &Ray, max_distance: f32) -> Option<f32> {
        let mut t_near = 0.0_f32;
        let mut t_far = max_distance;
        for axis in 0..3 {
            let origin = ray.origin[axis];
            let direction = ray.direction[axis];
            let (min, max) = (self.min[axis], self.max[axis]);
            if direction == 0.0 {
                if origin < min || origin > max {
                    return None;
                }
                continue;
            }
            let inv = direction.recip();
            let (t0, t1) = ((min - origin) * inv, (max - origin) * inv);
            t_near = t_near.max(t0.min(t1));
            t_far = t_far.min(t0.max(t1));
            if t_near > t_far {
                return None;
            }
        }
        Some(t_near)
    }
}

/// Möller–Trumbore intersection. Returns the distance along the ray.
///
/// Both faces are hit; callers pick the nearest hit.
pub fn ray_triangle_intersect(ray: &Ray, a: Vec3, b: Vec3, c: Vec3) -> Option<f32> {
    let edge1 = b - a;
    let edge2 = c - a;
    let pvec = ray.direction.cross(edge2);
    let det = edge1.dot(pvec);
    if det.abs() < PARALLEL_EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;

    let tvec = ray.origin - a;
    let u = tvec.dot(pvec) * inv_det;
    if !(-EDGE_EPSILON..=1.0 + EDGE_EPSILON).contains(&u) {
        return None;
    }

    let qvec = tvec.cross(edge1);
    let v = ray.direction.dot(qvec) * inv_det;
    if v < -EDGE_EPSILON || u + v > 1.0 + EDGE_EPSILON {
        return None;
    }

    let t = edge2.dot(qvec) * inv_det;
    (t >= 0.0).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> (Vec3, Vec3, Vec3) {
        (
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        )
    }

    #[test]
    fn test_ray_hits_triangle() {
        let (a, b, c) = unit_triangle();
        let ray = Ray::new(Vec3::new(0.25, 0.25, 5.0), Vec3::NEG_Z);
        let t = ray_triangle_intersect(&ray, a, b, c).unwrap();
        assert!((t - 5.0).abs() < 1e-6, "expected t=5, got {t}");
    }

    #[test]
    fn test_ray_hits_back_face() {
        let (a, b, c) = unit_triangle();
        let ray = Ray::new(Vec3::new(0.25, 0.25, -2.0), Vec3::Z);
        assert!(ray_triangle_intersect(&ray, a, b, c).is_some());
    }

    #[test]
    fn test_ray_misses_outside_triangle() {
        let (a, b, c) = unit_triangle();
        let ray = Ray::new(Vec3::new(0.8, 0.8, 5.0), Vec3::NEG_Z);
        assert!(ray_triangle_intersect(&ray, a, b, c).is_none());
    }

    #[test]
    fn test_ray_pointing_away_misses() {
        let (a, b, c) = unit_triangle();
        let ray = Ray::new(Vec3::new(0.25, 0.25, 5.0), Vec3::Z);
        assert!(ray_triangle_intersect(&ray, a, b, c).is_none());
    }

    #[test]
    fn test_parallel_ray_misses() {
        let (a, b, c) = unit_triangle();
        let ray = Ray::new(Vec3::new(-1.0, 0.25, 0.0), Vec3::X);
        assert!(ray_triangle_intersect(&ray, a, b, c).is_none());
    }

    #[test]
    fn test_ray_through_shared_edge_hits() {
        let (a, b, c) = unit_triangle();
        let ray = Ray::new(Vec3::new(0.5, 0.5, 1.0), Vec3::NEG_Z);
        assert!(ray_triangle_intersect(&ray, a, b, c).is_some());
    }

    #[test]
    fn test_aabb_from_points() {
        let aabb = Aabb::from_points([Vec3::new(1.0, -2.0, 3.0), Vec3::new(-1.0, 4.0, 0.0)]);
        assert_eq!(aabb.min, Vec3::new(-1.0, -2.0, 0.0));
        assert_eq!(aabb.max, Vec3::new(1.0, 4.0, 3.0));
    }

    #[test]
    fn test_slab_hit_and_miss() {
        let aabb = Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0));
        let hit = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z);
        let t = aabb.ray_entry(&hit, 100.0).unwrap();
        assert!((t - 9.0).abs() < 1e-6);

        let miss = Ray::new(Vec3::new(5.0, 0.0, 10.0), Vec3::NEG_Z);
        assert!(aabb.ray_entry(&miss, 100.0).is_none());

        assert!(aabb.ray_entry(&hit, 5.0).is_none(), "box lies beyond max distance");
    }

    #[test]
    fn test_slab_origin_inside_box() {
        let aabb = Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0));
        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(aabb.ray_entry(&ray, 10.0), Some(0.0));
    }

    #[test]
    fn test_slab_ray_in_face_plane_hits() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        for x in [0.0, 1.0] {
            let ray = Ray::new(Vec3::new(x, 0.5, 5.0), Vec3::NEG_Z);
            assert_eq!(aabb.ray_entry(&ray, 100.0), Some(4.0), "x = {x}");
        }

        let outside = Ray::new(Vec3::new(1.0 + 1e-4, 0.5, 5.0), Vec3::NEG_Z);
        assert!(aabb.ray_entry(&outside, 100.0).is_none());
    }
}
