pub mod html;
pub mod ids;
pub mod time;
