use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::json;

use super::{classify, identity};
use crate::mirror_api::MirrorTransaction;
use crate::qbo_api::{ChartOfAccounts, LedgerAccountRef};

/// Tinybar (1e-8 HBAR) to an HBAR amount at QuickBooks' two-decimal
/// precision.
pub fn tinybar_to_hbar(tinybar: i64) -> Decimal {
    Decimal::new(tinybar, 8).round_dp(2)
}

/// The accounting record a transaction should turn into. Inbound movement
/// becomes a deposit from the clearing account; outbound movement becomes a
/// transfer to either another tracked wallet or the external outflow account.
#[derive(Debug, Clone, PartialEq)]
pub enum AccountingEffect {
    Deposit {
        into_account: LedgerAccountRef,
        from_account: LedgerAccountRef,
        amount: Decimal,
        date: NaiveDate,
    },
    Transfer {
        from_account: LedgerAccountRef,
        to_account: LedgerAccountRef,
        amount: Decimal,
        date: NaiveDate,
    },
}

impl AccountingEffect {
    /// Classifies one transaction with a known net movement. Returns `None`
    /// for zero movement or when the tracked account has no wallet in the
    /// chart (the latter cannot happen after a successful bootstrap).
    pub fn from_net(
        tx: &MirrorTransaction,
        tracked_account: &str,
        net: i64,
        chart: &ChartOfAccounts,
    ) -> Option<AccountingEffect> {
        if net == 0 {
            return None;
        }
        let wallet = chart.wallet(tracked_account)?.clone();
        let date = identity::derive_date(&tx.consensus_timestamp);
        let amount = tinybar_to_hbar(net.abs());

        if net > 0 {
            return Some(AccountingEffect::Deposit {
                into_account: wallet,
                from_account: chart.clearing.clone(),
                amount,
                date,
            });
        }

        // Outbound: the largest tracked counterparty receiving funds is the
        // destination; ties break on wire order. Untracked destinations all
        // collapse into the external outflow account.
        let mut destination: Option<(&str, i64)> = None;
        for (account, counterparty_amount) in classify::counterparties(tx, tracked_account) {
            if counterparty_amount <= 0 || chart.wallet(account).is_none() {
                continue;
            }
            let better = match destination {
                Some((_, best)) => counterparty_amount > best,
                None => true,
            };
            if better {
                destination = Some((account, counterparty_amount));
            }
        }
        let to_account = destination
            .and_then(|(account, _)| chart.wallet(account))
            .cloned()
            .unwrap_or_else(|| chart.outflow.clone());

        Some(AccountingEffect::Transfer {
            from_account: wallet,
            to_account,
            amount,
            date,
        })
    }

    /// QuickBooks entity name; also what the duplicate query runs against.
    pub fn entity(&self) -> &'static str {
        match self {
            AccountingEffect::Deposit { .. } => "Deposit",
            AccountingEffect::Transfer { .. } => "Transfer",
        }
    }

    pub fn date(&self) -> NaiveDate {
        match self {
            AccountingEffect::Deposit { date, .. } => *date,
            AccountingEffect::Transfer { date, .. } => *date,
        }
    }

    pub fn amount(&self) -> Decimal {
        match self {
            AccountingEffect::Deposit { amount, .. } => *amount,
            AccountingEffect::Transfer { amount, .. } => *amount,
        }
    }

    /// The create payload, with the idempotency key in `PrivateNote`. The
    /// note must round-trip byte-for-byte; it is the only persisted evidence
    /// that this transaction was already booked.
    pub fn payload(&self, key: &str) -> serde_json::Value {
        match self {
            AccountingEffect::Deposit {
                into_account,
                from_account,
                amount,
                date,
            } => json!({
                "TxnDate": date.to_string(),
                "PrivateNote": key,
                "DepositToAccountRef": account_ref(into_account),
                "Line": [{
                    "DetailType": "DepositLineDetail",
                    "Amount": amount,
                    "DepositLineDetail": {
                        "AccountRef": account_ref(from_account),
                    },
                }],
            }),
            AccountingEffect::Transfer {
                from_account,
                to_account,
                amount,
                date,
            } => json!({
                "TxnDate": date.to_string(),
                "PrivateNote": key,
                "Amount": amount,
                "FromAccountRef": account_ref(from_account),
                "ToAccountRef": account_ref(to_account),
            }),
        }
    }
}

fn account_ref(account: &LedgerAccountRef) -> serde_json::Value {
    json!({"value": account.value, "name": account.name})
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::mirror_api::MirrorTransfer;
    use rstest::rstest;
    use std::collections::HashMap;

    fn account(value: &str, name: &str) -> LedgerAccountRef {
        LedgerAccountRef {
            value: value.to_string(),
            name: name.to_string(),
        }
    }

    fn chart(tracked: &[&str]) -> ChartOfAccounts {
        let wallets: HashMap<String, LedgerAccountRef> = tracked
            .iter()
            .enumerate()
            .map(|(i, hedera_account)| {
                (
                    hedera_account.to_string(),
                    account(
                        &format!("{}", 10 + i),
                        &format!("Hedera Wallet {hedera_account}"),
                    ),
                )
            })
            .collect();
        ChartOfAccounts::for_test(
            wallets,
            account("1", "Hedera Clearing"),
            account("2", "Hedera External Outflow"),
        )
    }

    fn tx(transfers: Vec<(&str, i64)>) -> MirrorTransaction {
        MirrorTransaction {
            transaction_id: "0.0.1-1-1".to_string(),
            consensus_timestamp: "1700000000.0".to_string(),
            transfers: transfers
                .into_iter()
                .map(|(account, amount)| MirrorTransfer {
                    account: account.to_string(),
                    amount,
                })
                .collect(),
        }
    }

    #[rstest]
    #[case(500000000, "5.00")]
    #[case(123456789, "1.23")]
    #[case(-300000000, "-3.00")]
    #[case(1, "0.00")]
    #[case(0, "0.00")]
    fn tinybar_conversion(#[case] tinybar: i64, #[case] expected: &str) {
        assert_eq!(tinybar_to_hbar(tinybar).to_string(), expected);
    }

    #[test]
    fn positive_net_is_a_deposit_from_clearing() {
        let chart = chart(&["0.0.100"]);
        let tx = tx(vec![("0.0.100", 500000000), ("0.0.98", -500000000)]);
        let effect = AccountingEffect::from_net(&tx, "0.0.100", 500000000, &chart).unwrap();
        match effect {
            AccountingEffect::Deposit {
                into_account,
                from_account,
                amount,
                date,
            } => {
                assert_eq!(into_account.name, "Hedera Wallet 0.0.100");
                assert_eq!(from_account.name, "Hedera Clearing");
                assert_eq!(amount, Decimal::new(500, 2));
                assert_eq!(date, NaiveDate::from_ymd_opt(2023, 11, 14).unwrap());
            }
            other => panic!("expected Deposit, got {other:?}"),
        }
    }

    #[test]
    fn negative_net_to_tracked_counterparty_is_an_internal_transfer() {
        let chart = chart(&["0.0.100", "0.0.200"]);
        let tx = tx(vec![("0.0.100", -300000000), ("0.0.200", 300000000)]);
        let effect = AccountingEffect::from_net(&tx, "0.0.100", -300000000, &chart).unwrap();
        match effect {
            AccountingEffect::Transfer {
                from_account,
                to_account,
                amount,
                ..
            } => {
                assert_eq!(from_account.name, "Hedera Wallet 0.0.100");
                assert_eq!(to_account.name, "Hedera Wallet 0.0.200");
                assert_eq!(amount, Decimal::new(300, 2));
            }
            other => panic!("expected Transfer, got {other:?}"),
        }
    }

    #[test]
    fn negative_net_to_untracked_counterparty_goes_to_outflow() {
        let chart = chart(&["0.0.100"]);
        let tx = tx(vec![("0.0.100", -300000000), ("0.0.999", 300000000)]);
        let effect = AccountingEffect::from_net(&tx, "0.0.100", -300000000, &chart).unwrap();
        match effect {
            AccountingEffect::Transfer { to_account, .. } => {
                assert_eq!(to_account.name, "Hedera External Outflow");
            }
            other => panic!("expected Transfer, got {other:?}"),
        }
    }

    #[test]
    fn largest_tracked_counterparty_wins() {
        let chart = chart(&["0.0.100", "0.0.200", "0.0.300"]);
        let tx = tx(vec![
            ("0.0.100", -300000000),
            ("0.0.200", 100000000),
            ("0.0.300", 200000000),
        ]);
        let effect = AccountingEffect::from_net(&tx, "0.0.100", -300000000, &chart).unwrap();
        match effect {
            AccountingEffect::Transfer { to_account, .. } => {
                assert_eq!(to_account.name, "Hedera Wallet 0.0.300");
            }
            other => panic!("expected Transfer, got {other:?}"),
        }
    }

    #[test]
    fn zero_net_is_not_actionable() {
        let chart = chart(&["0.0.100"]);
        let tx = tx(vec![("0.0.100", 100), ("0.0.100", -100)]);
        assert_eq!(AccountingEffect::from_net(&tx, "0.0.100", 0, &chart), None);
    }

    #[test]
    fn deposit_payload_shape() {
        let chart = chart(&["0.0.100"]);
        let tx = tx(vec![("0.0.100", 500000000)]);
        let effect = AccountingEffect::from_net(&tx, "0.0.100", 500000000, &chart).unwrap();
        let payload = effect.payload("hedera:0.0.1-1-1:1700000000.0");

        assert_eq!(payload["TxnDate"], "2023-11-14");
        assert_eq!(payload["PrivateNote"], "hedera:0.0.1-1-1:1700000000.0");
        assert_eq!(payload["DepositToAccountRef"]["value"], "10");
        assert_eq!(payload["Line"][0]["DetailType"], "DepositLineDetail");
        assert_eq!(payload["Line"][0]["Amount"].as_f64(), Some(5.0));
        assert_eq!(
            payload["Line"][0]["DepositLineDetail"]["AccountRef"]["value"],
            "1"
        );
    }

    #[test]
    fn transfer_payload_shape() {
        let chart = chart(&["0.0.100"]);
        let tx = tx(vec![("0.0.100", -300000000), ("0.0.999", 300000000)]);
        let effect = AccountingEffect::from_net(&tx, "0.0.100", -300000000, &chart).unwrap();
        let payload = effect.payload("hedera:0.0.1-1-1:1700000000.0");

        assert_eq!(payload["TxnDate"], "2023-11-14");
        assert_eq!(payload["PrivateNote"], "hedera:0.0.1-1-1:1700000000.0");
        assert_eq!(payload["Amount"].as_f64(), Some(3.0));
        assert_eq!(payload["FromAccountRef"]["value"], "10");
        assert_eq!(payload["ToAccountRef"]["value"], "2");
    }
}
