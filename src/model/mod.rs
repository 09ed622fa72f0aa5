pub mod config;
pub mod macro_item;
pub mod session;
pub mod template;

pub use config::*;
pub use macro_item::*;
pub use session::*;
pub use template::*;
