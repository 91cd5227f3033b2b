pub mod postgres_account_store;
