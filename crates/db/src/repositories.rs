pub mod attendance;
pub mod fine;
pub mod notification;
pub mod participant;
pub mod room;
pub mod rule;
pub mod vacation;
