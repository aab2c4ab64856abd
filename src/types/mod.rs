mod status;
mod user;

pub use status::Status;
pub use user::User;
