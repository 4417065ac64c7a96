use safe_deployment_planner::chain::JsonRpcChainClient;
use safe_deployment_planner::cli::Cli;
use safe_deployment_planner::output::{self, DeploymentReport};
use safe_deployment_planner::planner::SafeDeploymentPlanner;

use clap::Parser;
use eyre::WrapErr;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Plan a Safe deployment against a live node and print the unsigned transaction.
///
/// Not `#[tokio::main]`: the JSON-RPC client drives its own runtime.
fn main() -> eyre::Result<()> {
    // Logs go to stderr so --json output stays parseable
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let network = cli
        .network_config()
        .wrap_err("failed to load network configuration")?;
    let request = cli.request();

    let timeout = Duration::from_secs(cli.rpc_timeout);
    let client = JsonRpcChainClient::new(&cli.rpc_url, timeout)
        .wrap_err_with(|| format!("failed to create RPC client for {}", cli.rpc_url))?;

    if !cli.json {
        output::print_banner(&network, client.url());
        output::print_owners(&request.owners, request.threshold);
    }

    let planner = SafeDeploymentPlanner::new(client, network);
    let deployment = planner
        .prepare_deployment(&request)
        .wrap_err("Safe deployment preconditions not met")?;
    let plan = planner
        .build(&deployment, &request.overrides)
        .wrap_err("failed to build deployment transaction")?;
    let check = if cli.verify_address {
        let check = planner
            .verify_address(&deployment, &plan)
            .wrap_err("address cross-check failed")?;
        Some(check)
    } else {
        None
    };

    if cli.json {
        let report = DeploymentReport::new(
            planner.network(),
            deployment.salt_nonce,
            &plan,
            check.as_ref(),
        );
        output::print_json_report(&report)?;
    } else {
        output::print_salt_nonce(deployment.salt_nonce);
        output::print_plan(&plan);
        if let Some(check) = check {
            output::print_address_check(&check);
        }
    }

    Ok(())
}
