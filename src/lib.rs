pub mod input;
pub mod kitchen;
pub mod time;
pub mod widgets;
