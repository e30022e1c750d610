use clap::Parser;
use ttmatrix::app::{AppError, TtMatrixApp};

fn main() -> Result<(), AppError> {
    env_logger::init();
    let args = TtMatrixApp::parse();
    args.run()
}
