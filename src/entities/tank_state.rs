#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TankState {
    Running,
    Paused,
}
