pub mod player;
pub mod team;
