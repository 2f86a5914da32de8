use crate::mirror_api::MirrorTransaction;

/// Net tinybar movement of `tracked_account` within one transaction. Zero
/// when the account has no entries; zero movement is never actionable.
pub fn net_movement(tx: &MirrorTransaction, tracked_account: &str) -> i64 {
    tx.transfers
        .iter()
        .filter(|transfer| transfer.account == tracked_account)
        .map(|transfer| transfer.amount)
        .sum()
}

/// Every other account participating in the transaction, with its signed
/// amount, in wire order.
pub fn counterparties<'a>(
    tx: &'a MirrorTransaction,
    tracked_account: &str,
) -> Vec<(&'a str, i64)> {
    tx.transfers
        .iter()
        .filter(|transfer| transfer.account != tracked_account)
        .map(|transfer| (transfer.account.as_str(), transfer.amount))
        .collect()
}
