mod session;

pub use self::session::{Session, SessionStore};
