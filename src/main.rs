use anyhow::Result;
use argh::FromArgs;
use nanoshell::{MenuOutcome, Shell, Transcript, command, registry, run_selection_menu};

/// Tiny raw-mode shell with history recall and tab completion.
#[derive(FromArgs)]
struct Args {
    /// echo undecodable key sequences in hex
    #[argh(switch)]
    debug: bool,

    /// transcript file path
    #[argh(option, default = "String::from(\".log.log\")")]
    log: String,

    /// run a selection menu over comma-separated options and print the choice
    #[argh(option)]
    menu: Option<String>,
}

fn main() -> Result<()> {
    let args: Args = argh::from_env();

    if let Some(spec) = args.menu {
        let options: Vec<String> = spec.split(',').map(str::to_string).collect();
        if let MenuOutcome::Committed(choice) = run_selection_menu(options)? {
            println!("{choice}");
        }
        return Ok(());
    }

    let mut shell = Shell::new(
        registry::base().build(),
        command::builtin_handlers(),
        Transcript::new(args.log),
    )
    .with_debug(args.debug);
    shell.run()
}
