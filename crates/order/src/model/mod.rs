mod cart_item;
mod order;
mod order_item;
mod payment_intent;
mod product;
mod user;

pub use self::cart_item::{CartItem, CartLine};
pub use self::order::{Order, OrderWithUser};
pub use self::order_item::OrderItem;
pub use self::payment_intent::PaymentIntent;
pub use self::product::Product;
pub use self::user::User;
