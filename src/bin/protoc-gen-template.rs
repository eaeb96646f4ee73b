//! protoc plugin that renders the request through a directory of Handlebars
//! templates. Reads a `CodeGeneratorRequest` from stdin and writes a
//! `CodeGeneratorResponse` to stdout.

use protoc_gen_template::{generate, logging, plugin, Configuration};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("protoc-gen-template: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> protoc_gen_template::Result<()> {
    let request = plugin::read_request(std::io::stdin().lock())?;

    let (config, warnings) = Configuration::parse(request.parameter());
    logging::init(config.debug);
    for warning in &warnings {
        tracing::warn!("{warning}");
    }

    let response = match generate(&request, &config) {
        Ok(response) => {
            tracing::debug!(files = response.file.len(), "writing response");
            response
        }
        Err(err) => {
            tracing::error!("{err}");
            plugin::error_response(&err)
        }
    };

    plugin::write_response(std::io::stdout().lock(), &response)
}
