use bevy_ecs::prelude::*;
use cgmath::{Point3, Vector3};

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);
pub const IDENTITY_MATRIX_4: [[f32; 4]; 4] = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

#[derive(Resource)]
pub struct CameraComponent {
    pub camera: Camera,
    pub camera_uniform: CameraUniform,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub aspect: f32,
    pub fovy: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    // view moves the world into camera space, proj adds perspective.
    // cgmath builds OpenGL clip space (z in -1..1), wgpu and WebGPU want 0..1
    pub fn build_view_projection_matrix(
        &self,
    ) -> (
        cgmath::Matrix4<f32>,
        cgmath::Matrix4<f32>,
        cgmath::Matrix4<f32>,
    ) {
        let view = cgmath::Matrix4::look_at_rh(self.eye, self.target, self.up);
        let proj = OPENGL_TO_WGPU_MATRIX
            * cgmath::perspective(cgmath::Deg(self.fovy), self.aspect, self.znear, self.zfar);
        (proj * view, view, proj)
    }
}

/// Camera matrices laid out for a host uniform buffer, column-major.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj_matrix: [[f32; 4]; 4],
    pub view_matrix: [[f32; 4]; 4],
    pub proj_matrix: [[f32; 4]; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    pub fn new() -> Self {
        Self {
            view_proj_matrix: IDENTITY_MATRIX_4,
            view_matrix: IDENTITY_MATRIX_4,
            proj_matrix: IDENTITY_MATRIX_4,
        }
    }

    pub fn update_view_proj(&mut self, camera: &Camera) {
        let (view_proj_matrix, view_matrix, proj_matrix) = camera.build_view_projection_matrix();
        self.view_proj_matrix = view_proj_matrix.into();
        self.view_matrix = view_matrix.into();
        self.proj_matrix = proj_matrix.into();
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use cgmath::{EuclideanSpace, Vector4};

    use super::*;

    fn globe_camera() -> Camera {
        Camera {
            eye: Point3::new(0.0, 0.0, 2.5),
            target: Point3::origin(),
            up: Vector3::unit_y(),
            aspect: 16.0 / 9.0,
            fovy: 45.0,
            znear: 0.1,
            zfar: 1000.0,
        }
    }

    #[test]
    fn target_projects_to_screen_center() {
        let (view_proj, _, _) = globe_camera().build_view_projection_matrix();
        let clip = view_proj * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert_abs_diff_eq!(clip.x / clip.w, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(clip.y / clip.w, 0.0, epsilon = 1e-6);
        let depth = clip.z / clip.w;
        assert!((0.0..=1.0).contains(&depth), "depth {depth} outside wgpu range");
    }

    #[test]
    fn uniform_is_gpu_sized() {
        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&globe_camera());
        assert_eq!(bytemuck::bytes_of(&uniform).len(), 3 * 16 * 4);
        assert_ne!(uniform.view_matrix, IDENTITY_MATRIX_4);
    }
}
