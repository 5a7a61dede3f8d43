use std::ffi::OsString;
use std::io::Write;
use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};
use log::{debug, error, info};

use crate::models::buildconf::BuildConfiguration;
use crate::models::request::SigningRequest;
use crate::utils::cmake::{BuildOutputs, CMakeCache};
use crate::utils::errors::SignError;
use crate::utils::misc::quote_sh_list;

/// A tool that can sign build artifacts. One implementation per entry in
/// `ToolKind`.
pub trait Signer {
    fn sign(&self, request: &SigningRequest) -> Result<()>;
}

/// MCUboot's imgtool.
pub struct ImgtoolSigner;

impl Signer for ImgtoolSigner {
    fn sign(&self, request: &SigningRequest) -> Result<()> {
        let cache = CMakeCache::from_build_dir(&request.build_dir)?;
        let outputs = BuildOutputs::from_cache(&cache);
        let bcfg = BuildConfiguration::from_build_dir(&request.build_dir)?;

        // Sign the .bin, then the .hex; a tool failure aborts right away.
        if request.gen_bin {
            if let Some(bin_file) = &outputs.bin_file {
                info!("Signing {} as {}", bin_file.display(), request.sbin);
                let cmd = sign_cmd(request, &bcfg, bin_file, &request.sbin)?;
                debug!("{}", quote_sh_list(&cmd));
                run_tool(&cmd)?;
            }
        }

        if request.gen_hex {
            if let Some(hex_file) = &outputs.hex_file {
                info!("Signing {} as {}", hex_file.display(), request.shex);
                let cmd = sign_cmd(request, &bcfg, hex_file, &request.shex)?;
                debug!("{}", quote_sh_list(&cmd));
                run_tool(&cmd)?;
            }
        }

        Ok(())
    }
}

/// Assemble one imgtool invocation. The alignment, header size, and slot
/// size come from the build's generated configuration; there are no
/// fallbacks for them.
fn sign_cmd(
    request: &SigningRequest,
    bcfg: &BuildConfiguration,
    infile: &Path,
    outfile: &str,
) -> Result<Vec<OsString>> {
    let align = bcfg.get_int("DT_FLASH_WRITE_BLOCK_SIZE")?;
    let vtoff = bcfg.get_int("CONFIG_TEXT_SECTION_OFFSET")?;
    let slot_size = bcfg.get_int("DT_FLASH_AREA_IMAGE_0_SIZE")?;

    let mut cmd: Vec<OsString> = vec![
        request.tool_path.clone().into_os_string(),
        "sign".into(),
        "--align".into(),
        align.to_string().into(),
        "--header-size".into(),
        vtoff.to_string().into(),
        "--slot-size".into(),
        slot_size.to_string().into(),
        // Default version so bare invocations work; a --version among the
        // passthrough args comes later and wins by imgtool's own rules.
        "--version".into(),
        "0.0.0+0".into(),
        infile.to_owned().into_os_string(),
        outfile.into(),
    ];

    cmd.extend(request.tool_args.iter().map(OsString::from));

    Ok(cmd)
}

fn run_tool(cmd: &[OsString]) -> Result<()> {
    let tool = cmd[0].to_string_lossy().into_owned();

    let output = Command::new(&cmd[0])
        .args(&cmd[1..])
        .output()
        .with_context(|| format!("Failed running {}", tool))?;

    if !output.status.success() {
        error!("{} returned non-success status: {}", tool, output.status);
        std::io::stdout().write_all(&output.stdout)?;
        std::io::stderr().write_all(&output.stderr)?;

        return Err(SignError::Tool {
            tool,
            status: output.status,
        }
        .into());
    }

    Ok(())
}
