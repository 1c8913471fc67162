mod admin;
mod jwt;
mod session;
mod validate;

pub use self::admin::require_admin;
pub use self::jwt::auth_middleware;
pub use self::session::{SessionTtl, session_middleware};
pub use self::validate::SimpleValidatedJson;
