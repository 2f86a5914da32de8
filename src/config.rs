use anyhow::{bail, Context as _, Result};
use std::env;

/// Which Hedera network the mirror node queries run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorNetwork {
    Mainnet,
    Testnet,
}

impl MirrorNetwork {
    pub fn base_url(self) -> &'static str {
        match self {
            MirrorNetwork::Mainnet => "https://mainnet-public.mirrornode.hedera.com",
            MirrorNetwork::Testnet => "https://testnet.mirrornode.hedera.com",
        }
    }
}

fn parse_network(value: &str) -> Result<MirrorNetwork> {
    match value.to_ascii_lowercase().as_str() {
        "mainnet" => Ok(MirrorNetwork::Mainnet),
        "testnet" => Ok(MirrorNetwork::Testnet),
        other => bail!("Unknown Hedera network {other:?}, expected mainnet or testnet"),
    }
}

/// The target account is always part of the tracked set, whether or not the
/// operator listed it.
fn parse_tracked_accounts(raw: &str, target_account: &str) -> Vec<String> {
    let mut accounts: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|account| !account.is_empty())
        .map(String::from)
        .collect();
    if !accounts.iter().any(|account| account == target_account) {
        accounts.push(target_account.to_string());
    }
    accounts
}

#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// The Hedera account whose activity gets reconciled.
    pub target_account: String,
    /// All Hedera accounts considered ours, for counterparty classification.
    pub tracked_accounts: Vec<String>,
    pub network: MirrorNetwork,
    /// How many transactions one batch pulls from the mirror node.
    pub page_limit: u32,
}

impl SyncConfig {
    pub fn from_env() -> Result<Self> {
        let target_account =
            env::var("HEDERA_ACCOUNT_ID").context("HEDERA_ACCOUNT_ID must be set")?;
        let tracked_accounts = parse_tracked_accounts(
            &env::var("HEDERA_TRACKED_ACCOUNTS").unwrap_or_default(),
            &target_account,
        );
        let network = match env::var("HEDERA_NETWORK") {
            Ok(value) => parse_network(&value)?,
            Err(_) => MirrorNetwork::Testnet,
        };
        let page_limit = match env::var("HEDERA_PAGE_LIMIT") {
            Ok(value) => value
                .parse()
                .context("HEDERA_PAGE_LIMIT must be a number")?,
            Err(_) => 25,
        };
        Ok(Self {
            target_account,
            tracked_accounts,
            network,
            page_limit,
        })
    }
}

pub const DEFAULT_QBO_BASE_URL: &str = "https://sandbox-quickbooks.api.intuit.com";

#[derive(Debug, Clone)]
pub struct QboConfig {
    pub base_url: String,
    /// The company we intend to write into.
    pub realm_id: String,
    /// Access token, prompted for interactively when unset. Acquiring one
    /// (the OAuth dance) happens outside this tool.
    pub access_token: Option<String>,
    /// The company the token was issued for, when known. Defaults to
    /// `realm_id`; a mismatch is rejected before any backend call.
    pub token_realm_id: Option<String>,
}

impl QboConfig {
    pub fn from_env() -> Result<Self> {
        let realm_id = env::var("QBO_REALM_ID").context("QBO_REALM_ID must be set")?;
        Ok(Self {
            base_url: env::var("QBO_BASE_URL").unwrap_or_else(|_| DEFAULT_QBO_BASE_URL.to_string()),
            realm_id,
            access_token: env::var("QBO_ACCESS_TOKEN").ok(),
            token_realm_id: env::var("QBO_TOKEN_REALM_ID").ok(),
        })
    }
}
