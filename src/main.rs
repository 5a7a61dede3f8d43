use std::process::exit;

mod models;
mod steps;
mod utils;

use anyhow::Result;
use clap::Parser;
use log::{error, info};

use models::args::{MainArgs, ToolKind};
use models::request::SigningRequest;
use steps::sign::{ImgtoolSigner, Signer};

fn main() {
    let args: MainArgs = MainArgs::parse();
    utils::logging::init_logger("info");

    if let Err(err) = run(&args) {
        error!("{:#}", err);
        exit(1);
    }
}

fn run(args: &MainArgs) -> Result<()> {
    if !(args.gen_bin() || args.gen_hex()) {
        // Not an error, there is just nothing to do
        info!("Both .bin and .hex generation are disabled, nothing to do");
        return Ok(());
    }

    let request = SigningRequest::resolve(args)?;

    let signer: &dyn Signer = match request.tool {
        ToolKind::Imgtool => &ImgtoolSigner,
    };

    signer.sign(&request)
}

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn test_no_outputs_requested_is_a_noop() {
        // Succeeds before touching the (bogus) build dir or the tool choice
        let args = MainArgs::try_parse_from([
            "zsign",
            "--no-bin",
            "--no-hex",
            "-d",
            "extra/test_files/nonexistent",
        ])
        .unwrap();

        run(&args).unwrap();
    }
}
