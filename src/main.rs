use std::process::ExitCode;

use clap::Parser;
use sitemap_promoter::{Outcome, RunOptions, config::Config, run};

mod args;
use args::Args;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    // Credentials are checked before any network call
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            ::log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let options = RunOptions {
        mode: args.selection_mode(),
        dry_run: args.dry_run,
    };

    match run(&config, options).await {
        Ok(Outcome::Published(post)) => {
            ::log::info!("Published {} (cid {})", post.uri, post.cid);
            ExitCode::SUCCESS
        }
        Ok(Outcome::DryRun { facet, .. }) => {
            ::log::info!(
                "Dry run complete, link facet bytes {}..{} -> {}",
                facet.byte_start,
                facet.byte_end,
                facet.target_url
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            ::log::error!("Run aborted: {}", e);
            ExitCode::FAILURE
        }
    }
}
