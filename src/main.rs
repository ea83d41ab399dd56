use clap::Parser;
use font_select::cli::{self, Cli};
use font_select_fonts::{InMemoryHost, SystemFontHost};
use tokio::runtime::Runtime;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = cli::load_config(cli.config.as_deref())?;
    // CLI --log-level takes precedence, then RUST_LOG, then config.
    font_select::debug::init_log_bridge(cli.log_level, config.log_level);

    log::info!("Starting font-select {}", font_select::VERSION);

    let fixture = cli.fixture.as_deref().map(cli::load_fixture).transpose()?;

    let runtime = Runtime::new()?;
    let mut stdout = std::io::stdout().lock();
    let result = runtime.block_on(async {
        match fixture {
            Some(records) => {
                let host = InMemoryHost::new(records);
                cli::execute(&cli.command, &host, &config, &mut stdout).await
            }
            None => {
                cli::execute(&cli.command, &SystemFontHost::new(), &config, &mut stdout).await
            }
        }
    });

    if let Err(ref e) = result {
        eprintln!("font-select: error: {e:#}");
        std::process::exit(cli::exit_code(e));
    }
    result
}
