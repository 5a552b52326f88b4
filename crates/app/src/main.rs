use std::process::ExitCode;

use engine::{CalculationInput, CalculationResult, Engine};
use settings::{Request, Settings};

mod error;
mod output;
mod settings;

fn main() -> ExitCode {
    let settings = match settings::load() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("warikan: {err}");
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "warikan={level},engine={level},share={level}",
            level = settings.level
        ))
        .with_writer(std::io::stderr)
        .init();

    match run(&settings) {
        Ok(rendered) => {
            println!("{rendered}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!("calculation failed: {err}");
            eprintln!("warikan: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(settings: &Settings) -> error::Result<String> {
    let engine = Engine::new();
    let result = calculate(&engine, &settings.request)?;
    tracing::info!(
        pattern = %result.kind(),
        people = result.number_of_people,
        "calculation done"
    );
    output::render(&result, settings.format, &settings.note, engine.clock())
}

fn calculate(engine: &Engine, request: &Request) -> error::Result<CalculationResult> {
    let input = match request {
        Request::Calculate {
            total,
            people,
            pattern,
            parameter,
        } => CalculationInput::parse(total, people, pattern, parameter.as_deref())?,
        Request::Decode(token) => share::decode(token)?,
    };
    Ok(engine.calculate(&input)?)
}
