use std::io;

use clap::error::ErrorKind;
use clap::{Command, CommandFactory, Parser};
use clap_complete::{generate, Generator};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};
use xmluuid::cli::commands::execute_command;
use xmluuid::cli::{output, Cli, CliError};

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help/--version keep clap's exit 0; bad arguments map to USAGE
            if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                e.exit();
            }
            let err = CliError::InvalidArgs(e.kind().to_string());
            let _ = e.print();
            std::process::exit(err.exit_code());
        }
    };

    if let Some(generator) = cli.generator {
        let mut cmd = Cli::command();
        eprintln!("Generating completion file for {generator:?}...");
        print_completions(generator, &mut cmd);
        return;
    }
    if cli.info {
        if let Some(a) = Cli::command().get_author() {
            output::info(&format!("AUTHOR: {}", a));
        }
        if let Some(v) = Cli::command().get_version() {
            output::info(&format!("VERSION: {}", v));
        }
        return;
    }

    setup_logging(cli.debug);

    if let Err(e) = execute_command(&cli) {
        output::error(&e);
        std::process::exit(e.exit_code());
    }
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        3 => LevelFilter::TRACE,
        _ => {
            eprintln!("Don't be crazy, max is -d -d -d");
            LevelFilter::TRACE
        }
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use xmluuid::util::testing;

    #[ctor::ctor]
    fn init() {
        testing::init_test_setup();
    }

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn given_more_than_one_file_when_parsing_then_maps_to_usage_exit_code() {
        let e = Cli::try_parse_from(["xmluuid", "a.xml", "b.xml"]).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::UnknownArgument);

        let err = CliError::InvalidArgs(e.kind().to_string());
        assert_eq!(err.exit_code(), xmluuid::exitcode::USAGE);
    }

    #[test]
    fn given_help_flag_when_parsing_then_clap_handles_it_as_display_help() {
        let e = Cli::try_parse_from(["xmluuid", "--help"]).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::DisplayHelp);
    }
}
