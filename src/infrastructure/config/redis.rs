pub const PAYMENT_QUEUE_KEY: &str = "payment_queue";
pub const TXN_KEY_PREFIX: &str = "txn:";
pub const BALANCE_KEY_PREFIX: &str = "balance:";
