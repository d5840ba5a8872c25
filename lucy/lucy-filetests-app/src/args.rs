use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use lucy_filetests::{CompilerCommand, HarnessConfig};

/// Run lucy IR filetests in a directory
#[derive(Debug, Parser)]
#[command(name = "lucy-filetests", version, about)]
pub struct Args {
    /// Directory containing the test cases
    pub dir: PathBuf,

    /// Compiler executable
    #[arg(long, env = "LUCY_COMPILER", default_value = "lucy")]
    pub compiler: OsString,

    /// Extra argument passed to the compiler before the standard flags (repeatable)
    #[arg(long = "compiler-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub compiler_args: Vec<OsString>,

    /// Flag selecting the code generation backend
    #[arg(long, value_name = "FLAG", default_value = "--generator", allow_hyphen_values = true)]
    pub backend_flag: String,

    /// Extension of test case files
    #[arg(long, value_name = "EXT", default_value = "lc")]
    pub extension: String,

    /// Extension of the IR file the compiler writes
    #[arg(long, value_name = "EXT", default_value = "ll")]
    pub output_extension: String,

    /// Comment prefix marking expected IR lines
    #[arg(long, default_value = "#")]
    pub marker: String,

    /// Only run cases whose file name matches this glob
    #[arg(long, value_name = "GLOB")]
    pub filter: Option<String>,

    /// Seconds to wait for each compiler invocation (0 waits forever)
    #[arg(long, value_name = "SECONDS", default_value_t = 60)]
    pub timeout: u64,

    /// Disable colored output (also disabled by a non-empty NO_COLOR)
    #[arg(long)]
    pub no_color: bool,
}

impl Args {
    pub fn to_config(&self) -> Result<HarnessConfig> {
        let compiler = CompilerCommand {
            program: self.compiler.clone(),
            prefix_args: self.compiler_args.clone(),
            backend_flag: self.backend_flag.clone(),
        };
        let timeout = (self.timeout > 0).then(|| Duration::from_secs(self.timeout));

        let mut config = HarnessConfig::default()
            .with_compiler(compiler)
            .with_case_extension(self.extension.trim_start_matches('.'))
            .with_output_extension(self.output_extension.trim_start_matches('.'))
            .with_comment_marker(self.marker.clone())
            .with_timeout(timeout);
        if let Some(filter) = &self.filter {
            config = config.with_filter(filter)?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Whether to color the report, given the value of `NO_COLOR`.
    ///
    /// Any non-empty `NO_COLOR` disables color, whatever it says.
    pub fn color_enabled(&self, no_color_env: Option<&OsStr>) -> bool {
        !self.no_color && no_color_env.is_none_or(OsStr::is_empty)
    }
}
