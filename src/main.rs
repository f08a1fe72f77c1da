use clap::Parser;
use miette::Result;
use stockroom::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior so piping into `head` exits quietly
    // instead of panicking on a broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;
    stockroom::cli::init_logging(&global);

    match cli.command {
        Commands::Init(args) => stockroom::cli::commands::init::run(args, &global),
        Commands::Item(cmd) => stockroom::cli::commands::item::run(cmd, &global),
        Commands::Sup(cmd) => stockroom::cli::commands::sup::run(cmd, &global),
        Commands::Dashboard(args) => stockroom::cli::commands::dashboard::run(args, &global),
        Commands::Completions(args) => stockroom::cli::commands::completions::run(args),
    }
}
