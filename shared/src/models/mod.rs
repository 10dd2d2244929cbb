pub mod notification;
pub mod personality;
pub mod session;

pub use notification::*;
pub use personality::*;
pub use session::*;
