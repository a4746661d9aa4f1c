pub mod database;
pub mod fmcsa;

pub use database::{InsertReceipt, LoadStore, StoreError};
pub use fmcsa::FmcsaClient;
