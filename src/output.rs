//! Colored console output for the `safe-deploy` binary.
//!
//! Color scheme: blue+bold headers, cyan values, green success,
//! yellow warnings, dimmed secondary text.

use alloy_primitives::utils::format_units;
use alloy_primitives::{hex, Address, U256};
use colored::Colorize;
use serde::Serialize;

use crate::config::NetworkConfig;
use crate::create2::AddressCheck;
use crate::types::{DeployedProxyPlan, TransactionParameters};

/// Bytes of call data shown before eliding.
const DATA_PREVIEW_BYTES: usize = 36;

// ── Helpers ────────────────────────────────────────────────────────

/// Format a wei amount as gwei, trimming trailing zeros.
///
/// - `1_000_000_000` → `"1 gwei"`
/// - `1_500_000_000` → `"1.5 gwei"`
pub fn format_gwei(wei: u128) -> String {
    let formatted = format_units(U256::from(wei), "gwei")
        .unwrap_or_else(|_| wei.to_string());
    let trimmed = match formatted.split_once('.') {
        Some((whole, frac)) if frac.trim_end_matches('0').is_empty() => whole.to_string(),
        Some((whole, frac)) => format!("{whole}.{}", frac.trim_end_matches('0')),
        None => formatted,
    };
    format!("{trimmed} gwei")
}

/// Hex preview of call data: the selector and first arguments, then the total size.
pub fn preview_data(data: &[u8]) -> String {
    let shown = data.len().min(DATA_PREVIEW_BYTES);
    let hex = hex::encode_prefixed(&data[..shown]);
    if data.len() > shown {
        format!("{hex}… ({} bytes)", data.len())
    } else {
        hex
    }
}

// ── Banner & Identity ──────────────────────────────────────────────

/// Print the startup banner with the target network.
pub fn print_banner(network: &NetworkConfig, rpc_url: &str) {
    let contracts = &network.contracts;
    println!();
    println!("{}", "=== Safe Deployment Planner ===".blue().bold());
    println!("  Network:          {}", network.name.cyan());
    println!("  RPC endpoint:     {}", rpc_url.cyan());
    println!(
        "  Master copy:      {}",
        contracts.master_copy.to_string().cyan()
    );
    println!(
        "  Proxy factory:    {}",
        contracts.proxy_factory.to_string().cyan()
    );
    println!(
        "  Fallback handler: {}",
        contracts.fallback_handler.to_string().cyan()
    );
    if network.is_unnamed() {
        print_unnamed_network_warning();
    }
}

/// Warn that errors and logs will not say which network was targeted.
pub fn print_unnamed_network_warning() {
    println!(
        "  {} No network name configured. Pass --network-name or a named --contracts file.",
        "WARNING:".yellow().bold()
    );
}

/// Print the owners and threshold of the Safe to deploy.
pub fn print_owners(owners: &[Address], threshold: u64) {
    println!();
    println!(
        "  Owners ({}), threshold {}:",
        owners.len().to_string().cyan(),
        threshold.to_string().cyan()
    );
    for (i, owner) in owners.iter().enumerate() {
        println!(
            "    {}. {}",
            (i + 1).to_string().dimmed(),
            owner.to_string().cyan()
        );
    }
}

// ── Plan ───────────────────────────────────────────────────────────

/// Print the CREATE2 salt nonce. Needed to redeploy at the same address on another chain.
pub fn print_salt_nonce(salt_nonce: U256) {
    println!();
    println!("  Salt nonce: {}", salt_nonce.to_string().cyan());
}

/// Print the planned, unsigned deployment transaction.
pub fn print_plan(plan: &DeployedProxyPlan) {
    let tx = &plan.transaction;
    println!();
    println!("{}", "Deployment transaction (unsigned):".blue().bold());
    println!("  {} {}", "From:     ".dimmed(), tx.from.to_string().cyan());
    println!("  {} {}", "To:       ".dimmed(), tx.to.to_string().cyan());
    println!("  {} {}", "Nonce:    ".dimmed(), tx.nonce.to_string().cyan());
    println!("  {} {}", "Gas limit:".dimmed(), tx.gas.to_string().cyan());
    match tx.gas_price {
        Some(price) => println!("  {} {}", "Gas price:".dimmed(), format_gwei(price).cyan()),
        None => println!("  {} {}", "Gas price:".dimmed(), "set by signer".dimmed()),
    }
    println!("  {} {}", "Data:     ".dimmed(), preview_data(&tx.data).dimmed());
    println!();
    println!(
        "  {} Safe will be deployed at {}",
        "OK".green().bold(),
        plan.predicted_address.to_string().cyan().bold()
    );
}

/// Print the result of the offline address cross-check.
pub fn print_address_check(check: &AddressCheck) {
    if check.matches() {
        println!(
            "  {} Predicted address matches local CREATE2 computation",
            "OK".green().bold()
        );
    } else {
        println!(
            "  {} Factory predicted {} but local CREATE2 computation gives {}",
            "WARNING:".yellow().bold(),
            check.predicted.to_string().cyan(),
            check.computed.to_string().cyan()
        );
    }
}

// ── JSON ───────────────────────────────────────────────────────────

/// Machine-readable plan printed with `--json`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentReport<'a> {
    pub network: &'a str,
    pub salt_nonce: U256,
    pub predicted_address: Address,
    pub transaction: &'a TransactionParameters,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub computed_address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_matches: Option<bool>,
}

impl<'a> DeploymentReport<'a> {
    pub fn new(
        network: &'a NetworkConfig,
        salt_nonce: U256,
        plan: &'a DeployedProxyPlan,
        check: Option<&AddressCheck>,
    ) -> Self {
        Self {
            network: &network.name,
            salt_nonce,
            predicted_address: plan.predicted_address,
            transaction: &plan.transaction,
            computed_address: check.map(|c| c.computed),
            address_matches: check.map(AddressCheck::matches),
        }
    }
}

/// Print the plan as pretty JSON on stdout.
pub fn print_json_report(report: &DeploymentReport<'_>) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}
