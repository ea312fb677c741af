pub mod camera;
pub mod intake;
pub mod loaders;
pub mod math;
pub mod pose;
pub mod renderer;
pub mod scene;
pub mod shell;
pub mod spring;
pub mod texture;
