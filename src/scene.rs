use anyhow::{Context, Result};
use glam::{EulerRot, Mat4, Vec3};
use image::RgbaImage;
use std::f32::consts::PI;
use std::path::Path;

use crate::loaders::{load_phone_asset, LoadedModel};
use crate::math::intersect_aabb;
use crate::pose::PhonePose;
use crate::texture::decode_data_url;

/// Material slot whose color map is swapped when a texture is dropped
pub const DISPLAY_MATERIAL: &str = "Display";

/// Configured resting position of the phone group
pub const MODEL_OFFSET: Vec3 = Vec3::new(0.0, -1.0, 0.0);

/// The asset was authored Z-up and oversized; this inner transform brings
/// it into scene scale and orientation
const INNER_ROTATION: [f32; 3] = [-PI, 0.0, -PI];
const INNER_SCALE: f32 = 0.04;

/// The phone scene model: a fixed mesh hierarchy plus the two externally
/// driven inputs, `open` and the texture payload.
///
/// Holds no pose authority of its own: `open` is passed in each frame and
/// the model only derives the smoothed pose and the display bitmap from
/// its inputs.
pub struct PhoneModel {
    model: LoadedModel,
    display_material: usize,
    pose: PhonePose,
    texture_key: String,
    display_map: Option<RgbaImage>,
    display_generation: u64,
}

impl PhoneModel {
    /// Load the fixed phone asset from disk. A missing asset or a missing
    /// Display slot is fatal; the asset is an external collaborator and is
    /// not hardened against here.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let model = load_phone_asset(path)?;
        Self::new(model)
    }

    pub fn new(model: LoadedModel) -> Result<Self> {
        let display_material = model
            .materials
            .iter()
            .position(|m| m.name == DISPLAY_MATERIAL)
            .context("phone asset has no Display material slot")?;

        Ok(Self {
            model,
            display_material,
            pose: PhonePose::default(),
            texture_key: String::new(),
            display_map: None,
            display_generation: 0,
        })
    }

    /// React to the texture payload. Only a *change* triggers a decode;
    /// a decode failure is logged and the prior map stays bound.
    pub fn set_texture(&mut self, texture: &str) {
        if texture == self.texture_key {
            return;
        }
        self.texture_key = texture.to_owned();

        if texture.is_empty() {
            return;
        }

        match decode_data_url(texture) {
            Ok(bitmap) => {
                println!(
                    "display texture decoded: {}x{}",
                    bitmap.width(),
                    bitmap.height()
                );
                self.display_map = Some(bitmap);
                self.display_generation += 1;
            }
            Err(e) => {
                eprintln!("display texture decode failed: {:#}", e);
            }
        }
    }

    /// Per-frame pose step; `t` is elapsed time since startup
    pub fn update(&mut self, t: f32, open: bool) {
        self.pose.update(t, open, MODEL_OFFSET);
    }

    /// Full world transform of the hierarchy for this frame
    pub fn transform(&self) -> Mat4 {
        let inner = Mat4::from_euler(
            EulerRot::XYZ,
            INNER_ROTATION[0],
            INNER_ROTATION[1],
            INNER_ROTATION[2],
        ) * Mat4::from_scale(Vec3::splat(INNER_SCALE));

        self.pose.transform(MODEL_OFFSET) * inner
    }

    /// The whole hierarchy is a single hit-target: a world-space ray is
    /// pulled into asset space and slab-tested against the model bounds.
    pub fn hit_test(&self, ray_origin: Vec3, ray_dir: Vec3) -> bool {
        let inverse = self.transform().inverse();
        let local_origin = inverse.transform_point3(ray_origin);
        let local_dir = inverse.transform_vector3(ray_dir);

        let bounds = &self.model.bounds;
        intersect_aabb(local_origin, local_dir, bounds.min, bounds.max) >= 0.0
    }

    pub fn geometry(&self) -> &LoadedModel {
        &self.model
    }

    pub fn pose(&self) -> &PhonePose {
        &self.pose
    }

    pub fn display_material(&self) -> usize {
        self.display_material
    }

    /// The currently bound display bitmap, if any drop has decoded
    pub fn display_map(&self) -> Option<&RgbaImage> {
        self.display_map.as_ref()
    }

    /// Bumped on every successful decode; the renderer re-uploads when it
    /// sees a generation it has not uploaded yet
    pub fn display_generation(&self) -> u64 {
        self.display_generation
    }
}
