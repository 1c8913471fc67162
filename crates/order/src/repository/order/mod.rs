mod command;
mod query;

pub use self::command::OrderCommandRepository;
pub use self::query::OrderQueryRepository;

pub(crate) const ORDER_COLUMNS: &str = "id, user_id, status, total_amount, payment_mode, \
     payment_id, address, created_at, updated_at";
