use std::time::Duration;

use anyhow::{Context as _, Result};
use console::{style, StyledObject};
use indicatif::ProgressBar;
use rust_decimal::Decimal;

use crate::args::{Args, Command};
use crate::config::{QboConfig, SyncConfig};
use crate::mirror_api::MirrorClient;
use crate::qbo_api::{list_accounts, list_records, QboClient, SessionContext};
use crate::sync::{run_reconciliation, BatchReport, OutcomeStatus, TransactionOutcome};
use crate::terminal::{self, BulletPointPrinter};

const LIST_LIMIT: usize = 50;

pub async fn main(args: Args) -> Result<()> {
    let cli = Cli::new()?;
    match args.command {
        Command::Sync => cli.main_sync().await,
        Command::ListAccounts => cli.main_list_accounts().await,
        Command::ListDeposits => cli.main_list_records("Deposit").await,
        Command::ListTransfers => cli.main_list_records("Transfer").await,
    }
}

pub struct Cli {
    sync_config: SyncConfig,
    mirror: MirrorClient,
    qbo: QboClient,
}

impl Cli {
    fn new() -> Result<Self> {
        let sync_config = SyncConfig::from_env()?;
        let qbo_config = QboConfig::from_env()?;

        let access_token = match qbo_config.access_token.clone() {
            Some(token) => token,
            None => terminal::password("QuickBooks access token")
                .context("Failed to read access token")?,
        };
        let token_realm = qbo_config
            .token_realm_id
            .clone()
            .unwrap_or_else(|| qbo_config.realm_id.clone());
        let session = SessionContext::new(access_token, token_realm);
        // Never talk to the wrong company.
        session.ensure_realm(&qbo_config.realm_id)?;

        let mirror = MirrorClient::new(sync_config.network);
        let qbo = QboClient::new(session, qbo_config.base_url);
        Ok(Self {
            sync_config,
            mirror,
            qbo,
        })
    }

    async fn main_sync(&self) -> Result<()> {
        let spinner = ProgressBar::new_spinner();
        spinner.set_message(format!(
            "Reconciling {}...",
            self.sync_config.target_account
        ));
        spinner.enable_steady_tick(Duration::from_millis(100));

        let result = run_reconciliation(&self.mirror, &self.qbo, &self.sync_config).await;
        spinner.finish_and_clear();
        let report = result.context("Reconciliation batch failed")?;

        print_report(&self.sync_config.target_account, &report);
        Ok(())
    }

    async fn main_list_accounts(&self) -> Result<()> {
        let accounts = list_accounts(&self.qbo, LIST_LIMIT).await?;
        println!("{}", style_header("Accounts:"));
        if accounts.is_empty() {
            println!("(none)");
            return Ok(());
        }
        let printer = BulletPointPrinter::new();
        for account in accounts {
            printer.print_item(format!(
                "{} {} [{}]",
                style(account.id).dim(),
                style(account.name).magenta(),
                account.account_type,
            ));
        }
        Ok(())
    }

    async fn main_list_records(&self, entity: &str) -> Result<()> {
        let records = list_records(&self.qbo, entity, LIST_LIMIT).await?;
        println!("{}", style_header(&format!("{entity}s:")));
        if records.is_empty() {
            println!("(none)");
            return Ok(());
        }
        let printer = BulletPointPrinter::new();
        for record in records {
            let amount = record
                .amount
                .map(|amount| amount.to_string())
                .unwrap_or_else(|| "?".to_string());
            printer.print_item(format!(
                "{} {} {}",
                style(record.txn_date).cyan(),
                style(amount).bold(),
                style(record.private_note.unwrap_or_default()).dim(),
            ));
        }
        Ok(())
    }
}

fn print_report(target_account: &str, report: &BatchReport) {
    println!(
        "{}",
        style_header(&format!("Reconciliation report for {target_account}:"))
    );
    if report.outcomes.is_empty() {
        println!("(no actionable transactions)");
    } else {
        let printer = BulletPointPrinter::new();
        for outcome in &report.outcomes {
            print_outcome(&printer, outcome);
        }
    }
    println!();
    println!(
        "{} created, {} already in QuickBooks, {} repeated in batch, {} failed",
        report.created(),
        report.duplicates_remote(),
        report.duplicates_local(),
        report.failed(),
    );
}

fn print_outcome(printer: &BulletPointPrinter, outcome: &TransactionOutcome) {
    printer.print_item(format!(
        "{} {} {} {}",
        style_status(&outcome.status),
        style(&outcome.transaction_id).cyan(),
        style_amount(outcome.amount),
        style(outcome.entity).italic(),
    ));
    if let OutcomeStatus::Failed { message, fault } = &outcome.status {
        let printer = printer.indent();
        printer.print_item(style(message).red());
        if !fault.is_null() {
            printer.print_item(style(fault.to_string()).dim());
        }
    }
}

fn style_header(header: &str) -> StyledObject<&str> {
    style(header).bold().underlined()
}

fn style_status(status: &OutcomeStatus) -> StyledObject<&'static str> {
    match status {
        OutcomeStatus::Created => style("created").green().bold(),
        OutcomeStatus::DuplicateRemote => style("skipped").yellow(),
        OutcomeStatus::DuplicateLocal => style("repeat ").yellow().dim(),
        OutcomeStatus::Failed { .. } => style("failed ").red().bold(),
    }
}

fn style_amount(amount: Decimal) -> StyledObject<String> {
    let result = style(format!("{amount} HBAR")).bold();
    if amount < Decimal::ZERO {
        result.red()
    } else {
        result.green()
    }
}
