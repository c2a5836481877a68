pub mod attendance;
pub mod fine;
pub mod notification;
pub mod room;
pub mod rule;
pub mod settlement;
pub mod vacation;
