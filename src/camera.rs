use glam::{Mat4, Vec3, Vec4};

/// Fixed viewpoint of the demo; matches the framing the asset was staged
/// for (narrow lens, looking in from the front-right)
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new() -> Self {
        Self {
            position: Vec3::new(13.0, 3.0, 6.0),
            target: Vec3::ZERO,
            fov_y_degrees: 32.0,
            near: 0.1,
            far: 100.0,
        }
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_degrees.to_radians(), aspect, self.near, self.far)
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection(aspect) * self.view()
    }

    /// World-space picking ray through a cursor position, in physical
    /// pixels with the origin at the top-left of the surface
    pub fn picking_ray(&self, cursor: (f32, f32), size: (u32, u32)) -> (Vec3, Vec3) {
        let (width, height) = (size.0.max(1) as f32, size.1.max(1) as f32);
        let ndc_x = cursor.0 / width * 2.0 - 1.0;
        let ndc_y = 1.0 - cursor.1 / height * 2.0;

        let aspect = width / height;
        let inverse = self.view_projection(aspect).inverse();

        let near = inverse * Vec4::new(ndc_x, ndc_y, 0.0, 1.0);
        let far = inverse * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        let near = near.truncate() / near.w;
        let far = far.truncate() / far.w;

        (self.position, (far - near).normalize())
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_ray_points_at_target() {
        let camera = Camera::new();
        let (origin, dir) = camera.picking_ray((400.0, 300.0), (800, 600));
        assert_eq!(origin, camera.position);

        let to_target = (camera.target - camera.position).normalize();
        assert!(dir.dot(to_target) > 0.999);
    }

    #[test]
    fn corner_rays_diverge_from_center() {
        let camera = Camera::new();
        let (_, center) = camera.picking_ray((400.0, 300.0), (800, 600));
        let (_, corner) = camera.picking_ray((0.0, 0.0), (800, 600));
        assert!(center.dot(corner) < 0.9999);
        // A 32 degree lens keeps corner rays well within a hemisphere
        assert!(center.dot(corner) > 0.8);
    }

    #[test]
    fn picking_ray_survives_degenerate_size() {
        let camera = Camera::new();
        let (_, dir) = camera.picking_ray((0.0, 0.0), (0, 0));
        assert!(dir.is_finite());
    }
}
