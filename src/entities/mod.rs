mod depth_charge;
mod diver;
mod explosion;
mod fish;
mod harpoon;
mod status_line;
mod tank_state;

// Re-export all public types
pub use depth_charge::DepthCharge;
pub use diver::Diver;
pub use explosion::Explosion;
pub use fish::{Fish, MAX_FISH};
pub use harpoon::Harpoon;
pub use status_line::StatusLine;
pub use tank_state::TankState;
