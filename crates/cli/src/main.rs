mod args;
mod echo;
mod logging;

use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::path::Path;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use readable_core::{ExitCode, ReadableError, SmoothieEngine};

use args::Args;

pub(crate) const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let code = if err.use_stderr() { ExitCode::Usage } else { ExitCode::Ok };
            let _ = err.print();
            return exit(code);
        }
    };

    if let Some(shell) = args.completion {
        clap_complete::generate(shell, &mut Args::command(), "readable", &mut io::stdout());
        return exit(ExitCode::Ok);
    }

    logging::init(args.verbose);

    match run(&args).await {
        Ok(()) => exit(ExitCode::Ok),
        Err(err) => {
            echo::print_error(&format!("{err:#}"));
            let code = err.downcast_ref::<ReadableError>().map_or(ExitCode::Software, ReadableError::exit_code);
            exit(code)
        }
    }
}

fn exit(code: ExitCode) -> std::process::ExitCode {
    std::process::ExitCode::from(u8::from(code))
}

async fn run(args: &Args) -> anyhow::Result<()> {
    if args.verbose > 0 {
        echo::print_banner();
    }

    let quiet = args.quiet;
    let mut warn = |warning: readable_core::Warning| {
        if !quiet {
            echo::print_warning(&warning.to_string());
        }
    };

    let (config, warnings) = args.to_config(|name| std::env::var(name).ok())?;
    warnings.into_iter().for_each(&mut warn);

    let engine = SmoothieEngine::new(config.engine.clone());
    let output = readable_core::run(&config, io::stdin().is_terminal(), &engine, &mut warn).await?;

    match &args.output {
        Some(path) => {
            tracing::debug!(path = %path.display(), bytes = output.len(), "writing output file");
            write_file(path, &output).with_context(|| format!("Failed to write {}", path.display()))?;
            if args.verbose > 0 {
                echo::print_success(&format!(
                    "Wrote {} to {}",
                    echo::format_size(output.len()),
                    path.display()
                ));
            }
        }
        None => {
            tracing::debug!(bytes = output.len(), "writing output to stdout");
            let mut stdout = io::stdout().lock();
            stdout.write_all(output.as_bytes()).map_err(ReadableError::Io)?;
            stdout.flush().map_err(ReadableError::Io)?;
        }
    }

    Ok(())
}

/// Creates the output file only once there is something to put in it.
fn write_file(path: &Path, output: &str) -> Result<(), ReadableError> {
    let mut file = File::create(path).map_err(|source| match source.kind() {
        io::ErrorKind::PermissionDenied => ReadableError::PermissionDenied(path.to_path_buf()),
        _ => ReadableError::CantCreate { path: path.to_path_buf(), source },
    })?;
    file.write_all(output.as_bytes())?;
    file.flush()?;
    Ok(())
}
