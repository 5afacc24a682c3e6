pub mod details_handlers;
pub mod export_handlers;
pub mod preview_handlers;
pub mod system_handlers;
pub mod template_handlers;

pub use details_handlers::*;
pub use export_handlers::*;
pub use preview_handlers::*;
pub use system_handlers::*;
pub use template_handlers::*;
