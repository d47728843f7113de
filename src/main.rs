mod commands;
mod data;
mod image;
mod options;
mod preview;

use std::{panic, process};

use backtrace::Backtrace;
use structopt::StructOpt;

use crate::options::{Options, Subcommand};

fn run(options: Options) -> anyhow::Result<()> {
    match options.command {
        Subcommand::Pack(pack_options) => commands::pack(options.global, pack_options)?,
        Subcommand::Check(check_options) => commands::check(options.global, check_options)?,
        Subcommand::Preview(preview_options) => {
            commands::preview(options.global, preview_options)?
        }
    }

    Ok(())
}

fn main() {
    panic::set_hook(Box::new(|panic_info| {
        // PanicInfo's payload is usually a &'static str or String.
        // See: https://doc.rust-lang.org/beta/std/panic/struct.PanicInfo.html#method.payload
        let message = match panic_info.payload().downcast_ref::<&str>() {
            Some(message) => message.to_string(),
            None => match panic_info.payload().downcast_ref::<String>() {
                Some(message) => message.clone(),
                None => "<no message>".to_string(),
            },
        };

        eprintln!("Chartpack crashed! This is a bug in chartpack.");
        eprintln!();
        eprintln!("Details: {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!("in file {} on line {}", location.file(), location.line());
        }

        let backtrace = Backtrace::new();
        eprintln!();
        eprintln!("Backtrace:");
        eprintln!("{:?}", backtrace);

        process::exit(1);
    }));

    let options = Options::from_args();

    let log_env = env_logger::Env::default().default_filter_or(options.log_filter());
    env_logger::Builder::from_env(log_env).init();

    if let Err(err) = run(options) {
        eprintln!("Error: {:?}", err);
        process::exit(1);
    }
}
