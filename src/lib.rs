// Library exports for testing
pub use entities::{
    DepthCharge, Diver, Explosion, Fish, Harpoon, MAX_FISH, StatusLine, TankState,
};

pub mod app;
pub mod assets;
pub mod audio;
pub mod entities;
pub mod input;
pub mod renderer;
