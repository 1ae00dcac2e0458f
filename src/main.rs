use std::process::ExitCode;

use rowpipe::cli::handle_error;
use rowpipe::{Pipeline, Shape};

fn main() -> ExitCode {
    let pipeline = Pipeline::new();

    match rowpipe::run(&pipeline, Shape::Dictionary, "Convert records between CSV and JSON") {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            handle_error(&error);
            ExitCode::from(error.exit_code().clamp(1, 255) as u8)
        }
    }
}
