pub mod gltf;

pub use gltf::{load_phone_asset, LoadedModel, MaterialDesc, Primitive};
