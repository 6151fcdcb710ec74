//! `ordkey run`

use super::common::ConfigOverrides;
use anyhow::Result;
use clap::Args;
use ordkey_core::ProtocolConfig;
use ordkey_effects::DynProtocolHandler;
use ordkey_protocol::{run_protocol, Channel, GenerationParams, Participant, ProtocolOutcome};
use tokio::runtime::{self, Runtime};

/// Arguments for `ordkey run`
#[derive(Args, Debug, Default, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub overrides: ConfigOverrides,

    /// Print every channel entry before the result
    #[arg(long)]
    pub dump: bool,

    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,
}

/// Build the runtime a round runs on
///
/// Simulated rounds need a current-thread runtime with a paused clock, so
/// that tokio advances virtual time whenever both participants are asleep.
pub fn runtime(simulated: bool) -> std::io::Result<Runtime> {
    if simulated {
        runtime::Builder::new_current_thread()
            .enable_time()
            .start_paused(true)
            .build()
    } else {
        runtime::Builder::new_multi_thread().enable_all().build()
    }
}

/// Run one round as configured and print the result
pub async fn run(config: &ProtocolConfig, args: &RunArgs) -> Result<()> {
    let effects = DynProtocolHandler::select(config.seed, config.simulated);
    let channel = Channel::new(config.channel.clone());
    let params = GenerationParams {
        min_sleep_ms: config.min_sleep_ms,
        max_sleep_ms: config.max_sleep_ms,
    };
    let mut first = Participant::with_params(config.first.as_str(), params);
    let mut second = Participant::with_params(config.second.as_str(), params);

    tracing::info!(
        first = %config.first,
        second = %config.second,
        duration_ms = config.duration_ms,
        "starting protocol round"
    );
    let outcome = run_protocol(
        &effects,
        &mut first,
        &mut second,
        &channel,
        config.duration(),
    )
    .await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print!("{}", render_report(config, &channel, &outcome, args.dump));
    }
    Ok(())
}

/// Human-readable report: optional dump, channel summary, comparison line
fn render_report(
    config: &ProtocolConfig,
    channel: &Channel,
    outcome: &ProtocolOutcome,
    dump: bool,
) -> String {
    let mut report = String::new();
    if dump {
        report.push_str(&channel.to_string());
    }
    report.push_str(&channel.summary());
    report.push('\n');
    report.push_str(&format!(
        "{} and {} have the same secret : {}\n",
        config.first, config.second, outcome.secrets_match
    ));
    report
}
