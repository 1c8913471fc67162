mod jwt;
mod session;

pub use self::jwt::{DynJwtService, JwtServiceTrait};
pub use self::session::{DynSessionStore, SessionStoreTrait};
