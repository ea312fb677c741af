mod aabb;
mod color;
mod ray;

pub use aabb::AABB;
pub use color::{lerp_rgb, parse_hex};
pub use ray::intersect_aabb;
