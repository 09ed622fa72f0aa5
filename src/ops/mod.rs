pub mod library_ops;
pub mod link_eval;
pub mod menu;
pub mod session_ops;
pub mod template_ops;
pub mod transfer;
