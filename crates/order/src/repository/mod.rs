mod cart;
mod order;
mod user;

pub use self::cart::CartRepository;
pub use self::order::{OrderCommandRepository, OrderQueryRepository};
pub use self::user::UserQueryRepository;
