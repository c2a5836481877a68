pub mod fines;
pub mod health;
pub mod rooms;
