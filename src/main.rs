use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use curl_option_history::cli::{normalize, Cli};
use curl_option_history::{pipeline, util};

fn init_tracing(verbose: bool) {
  let default = if verbose { "debug" } else { "info" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
  let _ = fmt().with_env_filter(filter).with_writer(std::io::stderr).with_target(false).try_init();
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  if cli.gen_man {
    let page = util::render_man_page::<Cli>()?;
    print!("{}", page);
    return Ok(());
  }

  let cfg = normalize(cli)?;
  init_tracing(cfg.verbose);
  pipeline::run(&cfg)
}
