use clap::{Parser, Subcommand};

/// Reconcile Hedera HBAR transfers into QuickBooks Online.
#[derive(Parser, Debug)]
pub struct Args {
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Pull the latest mirror node transactions and create missing QuickBooks records
    Sync,

    /// List QuickBooks accounts
    ListAccounts,

    /// List QuickBooks deposits
    ListDeposits,

    /// List QuickBooks transfers
    ListTransfers,
}

pub fn parse() -> Args {
    Args::parse()
}
