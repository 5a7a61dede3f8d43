use std::path::PathBuf;

use anyhow::{bail, Result};
use log::warn;

use crate::models::args::{MainArgs, ToolKind};
use crate::utils::errors::SignError;
use crate::utils::misc;

/// Everything one signing run needs, resolved and validated up front.
/// Never mutated after construction.
#[derive(Debug)]
pub struct SigningRequest {
    pub build_dir: PathBuf,
    pub force: bool,
    pub tool: ToolKind,
    pub tool_path: PathBuf,
    pub tool_args: Vec<String>,
    pub gen_bin: bool,
    pub sbin: String,
    pub gen_hex: bool,
    pub shex: String,
}

/// Precondition check that -f/--force downgrades to a warning.
fn check_force(force: bool, cond: bool, msg: String) -> Result<()> {
    if cond {
        Ok(())
    } else if force {
        warn!("{} (ignored due to --force)", msg);
        Ok(())
    } else {
        Err(SignError::Precondition(msg).into())
    }
}

impl SigningRequest {
    pub fn resolve(args: &MainArgs) -> Result<Self> {
        let Some(tool) = args.tool else {
            bail!("no --tool given (imgtool is the only supported tool)");
        };

        let build_dir = match &args.build_dir {
            Some(dir) => dir.clone(),
            None => misc::find_build_dir().ok_or(SignError::Discovery)?,
        };

        check_force(
            args.force,
            build_dir.is_dir(),
            format!("no such build directory {}", build_dir.display()),
        )?;
        check_force(
            args.force,
            misc::is_zephyr_build(&build_dir),
            format!(
                "build directory {} doesn't look like a Zephyr build directory",
                build_dir.display()
            ),
        )?;

        Ok(Self {
            build_dir,
            force: args.force,
            tool,
            tool_path: args.tool_path.clone(),
            tool_args: args.tool_args.clone(),
            gen_bin: args.gen_bin(),
            sbin: args.sbin.clone(),
            gen_hex: args.gen_hex(),
            shex: args.shex.clone(),
        })
    }
}
