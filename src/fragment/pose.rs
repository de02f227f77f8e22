//! Per-frame fragment poses handed to the renderer.

use glam::{EulerRot, Mat4, Quat, Vec3};

use super::FragmentId;

/// Displayed transform of one fragment for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FragmentPose {
    /// Fragment this pose belongs to.
    pub fragment_id: FragmentId,
    /// Position relative to the shape origin.
    pub position: Vec3,
    /// XYZ Euler angles in radians.
    pub rotation: Vec3,
    /// Per-axis scale.
    pub scale: Vec3,
}

impl FragmentPose {
    /// Orientation as a quaternion.
    #[must_use]
    pub fn quat(&self) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        )
    }

    /// Model matrix (scale, then rotate, then translate).
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.scale,
            self.quat(),
            self.position,
        )
    }

    /// Pack into the GPU instance layout.
    #[must_use]
    pub fn to_instance(&self) -> PoseInstance {
        PoseInstance {
            model: self.matrix().to_cols_array_2d(),
            fragment_id: self.fragment_id.0,
            _pad: [0; 3],
        }
    }
}

/// Instance data for one fragment, laid out for direct upload into a
/// vertex or storage buffer (80 bytes, 16-byte aligned rows).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PoseInstance {
    /// Column-major model matrix.
    pub model: [[f32; 4]; 4],
    /// Fragment id, for picking.
    pub fragment_id: u32,
    /// Pads the struct to a multiple of 16 bytes.
    pub _pad: [u32; 3],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_layout_is_80_bytes() {
        assert_eq!(size_of::<PoseInstance>(), 80);
        let pose = FragmentPose {
            fragment_id: FragmentId(3),
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: Vec3::ZERO,
            scale: Vec3::splat(0.5),
        };
        let instances = [pose.to_instance()];
        let bytes: &[u8] = bytemuck::cast_slice(&instances);
        assert_eq!(bytes.len(), 80);
        assert_eq!(&bytes[64..68], &3u32.to_ne_bytes());
    }

    #[test]
    fn matrix_applies_scale_rotation_translation() {
        let pose = FragmentPose {
            fragment_id: FragmentId(0),
            position: Vec3::new(0.0, 0.0, 5.0),
            rotation: Vec3::new(0.0, 0.0, std::f32::consts::FRAC_PI_2),
            scale: Vec3::splat(2.0),
        };
        let p = pose.matrix().transform_point3(Vec3::X);
        assert!((p - Vec3::new(0.0, 2.0, 5.0)).length() < 1e-5);

        let inst = pose.to_instance();
        assert_eq!(inst.model[3], [0.0, 0.0, 5.0, 1.0]);
    }
}
