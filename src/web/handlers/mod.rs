pub mod application_handlers;
pub mod helpers;
pub mod profile_handlers;
pub mod system_handlers;
pub mod upload_handlers;

pub use application_handlers::*;
pub use profile_handlers::*;
pub use system_handlers::*;
pub use upload_handlers::*;
