use std::path::PathBuf;

use clap::{Parser, ValueEnum};

const ABOUT: &str = "Sign a Zephyr binary for bootloader chain-loading";

const LONG_ABOUT: &str = "\
Automates some of the drudgery of creating signed Zephyr binaries for
chain-loading by a bootloader.

In the simplest usage, run this from your build directory:

   zsign -t imgtool -- --key YOUR_SIGNING_KEY.pem

This creates zephyr.signed.bin and zephyr.signed.hex files which are ready
for use by your bootloader. The image header size, alignment, and slot size
are read from the build directory; a default version of 0.0.0+0 is used
unless overridden after the '--'. Everything after the '--' is passed to
the signing tool verbatim.";

/// Image signing tool name. Currently only MCUboot's imgtool is supported;
/// new tools get a variant here and a `Signer` implementation.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToolKind {
    Imgtool,
}

#[derive(Parser, Debug)]
#[clap(version, about = ABOUT, long_about = LONG_ABOUT)]
pub struct MainArgs {
    /// Build directory to sign (default: discovered)
    #[clap(short = 'd', long, value_parser, value_name = "build dir")]
    pub build_dir: Option<PathBuf>,
    /// Ignore build directory sanity checks
    #[clap(short, long, value_parser, default_value_t = false)]
    pub force: bool,

    // Tool control options
    /// Image signing tool name (required to actually sign)
    #[clap(short, long, value_enum)]
    pub tool: Option<ToolKind>,
    /// Path to the tool itself, if needed
    #[clap(short = 'p', long, value_parser, default_value = "imgtool", value_name = "tool path")]
    pub tool_path: PathBuf,
    /// Extra option(s) passed to the signing tool, after a "--"
    #[clap(last = true, value_parser, value_name = "tool_opt")]
    pub tool_args: Vec<String>,

    // Binary (.bin) file options
    /// Produce a signed .bin file (default: yes, if supported)
    #[clap(long = "bin", overrides_with = "no_bin")]
    bin: bool,
    /// Don't produce a signed .bin file
    #[clap(long = "no-bin")]
    no_bin: bool,
    /// Signed .bin file name
    #[clap(
        short = 'B',
        long = "sbin",
        value_parser,
        value_name = "BIN",
        default_value = "zephyr.signed.bin"
    )]
    pub sbin: String,

    // Intel HEX (.hex) file options
    /// Produce a signed .hex file (default: yes, if supported)
    #[clap(long = "hex", overrides_with = "no_hex")]
    hex: bool,
    /// Don't produce a signed .hex file
    #[clap(long = "no-hex")]
    no_hex: bool,
    /// Signed .hex file name
    #[clap(
        short = 'H',
        long = "shex",
        value_parser,
        value_name = "HEX",
        default_value = "zephyr.signed.hex"
    )]
    pub shex: String,
}

impl MainArgs {
    // The --bin/--no-bin pairs override each other (last one wins), so
    // reading the negative side alone gives "on unless switched off".
    pub fn gen_bin(&self) -> bool {
        !self.no_bin
    }

    pub fn gen_hex(&self) -> bool {
        !self.no_hex
    }
}

#[cfg(test)]
mod args_tests {
    use super::*;

    fn parse(argv: &[&str]) -> MainArgs {
        MainArgs::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["zsign"]);

        assert!(args.gen_bin());
        assert!(args.gen_hex());
        assert!(args.tool.is_none());
        assert_eq!(args.tool_path, PathBuf::from("imgtool"));
        assert_eq!(args.sbin, "zephyr.signed.bin");
        assert_eq!(args.shex, "zephyr.signed.hex");
        assert!(args.tool_args.is_empty());
        assert!(!args.force);
    }

    #[test]
    fn test_toggle_pairs() {
        assert!(!parse(&["zsign", "--no-bin"]).gen_bin());
        assert!(!parse(&["zsign", "--no-hex"]).gen_hex());
        // Last one wins
        assert!(parse(&["zsign", "--no-bin", "--bin"]).gen_bin());
        assert!(!parse(&["zsign", "--bin", "--no-bin"]).gen_bin());
    }

    #[test]
    fn test_tool_enum() {
        let args = parse(&["zsign", "-t", "imgtool"]);
        assert_eq!(args.tool, Some(ToolKind::Imgtool));

        assert!(MainArgs::try_parse_from(["zsign", "-t", "cosign"]).is_err());
    }

    #[test]
    fn test_tool_args_need_separator() {
        let args = parse(&["zsign", "-t", "imgtool", "--", "--key", "k.pem"]);
        assert_eq!(args.tool_args, vec!["--key", "k.pem"]);

        // Unknown flags before the "--" are rejected, not passed through
        assert!(MainArgs::try_parse_from(["zsign", "-t", "imgtool", "--key", "k.pem"]).is_err());
    }
}
