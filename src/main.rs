mod cli;

use clap::Parser;
use log::{error, info};

use gh_release_path::{WorkflowEnv, run, workflow};

fn main() {
    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            use std::io::Write;
            writeln!(
                buf,
                "[{} {} {}:{}] {}",
                buf.timestamp_millis(),
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(e) = real_main() {
        error!("{e:#}");
        workflow::set_failed(&format!("{e:#}"));
        std::process::exit(1);
    }
}

fn real_main() -> anyhow::Result<()> {
    let inputs = cli::Args::parse().into_inputs();
    let workflow = WorkflowEnv::from_env();

    // Single sequential job; a current-thread runtime is enough
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let path = rt.block_on(run(inputs, &workflow))?;
    info!("{} is on PATH", path.display());
    Ok(())
}
