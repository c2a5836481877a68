pub mod fines;
pub mod settlement;
