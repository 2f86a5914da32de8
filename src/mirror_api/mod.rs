mod client;
mod transactions;

pub use client::MirrorClient;
pub use transactions::{MirrorSource, MirrorTransaction, MirrorTransfer};
