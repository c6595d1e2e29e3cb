mod cli;

use kml_orgs::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
