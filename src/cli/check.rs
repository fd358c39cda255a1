//! The lint run behind the `fint` command

use tracing::{debug, info};

use super::exit_codes;
use super::output::{HtmlReport, JsonOutput, ReportRenderer, TerminalOutput};
use super::{Cli, OutputFormat};
use crate::error::Result;
use crate::scanner;

/// Run the check described by `cli` and return the process exit code
pub fn execute(cli: &Cli) -> Result<i32> {
    let config = cli.run_config();
    config.validate()?;
    debug!(?config, "Run configuration");

    // Resolved up front so a report collision fails before any file is fixed
    let report = match &config.html {
        Some(dir) => Some(HtmlReport::prepare(
            dir,
            &config.config_root,
            &config.template,
            config.force,
        )?),
        None => None,
    };

    let results = scanner::execute(&config)?;

    if !config.quiet {
        let renderer: Box<dyn ReportRenderer> = match cli.format {
            OutputFormat::Terminal => Box::new(TerminalOutput::from_env()),
            OutputFormat::Json => Box::new(JsonOutput::new()),
        };
        let output = renderer.render_report(&results)?;
        if !output.is_empty() {
            print!("{}", output);
            if cli.format == OutputFormat::Json {
                println!();
            }
        }
    }

    if let Some(report) = report {
        report.write(&results, &config.src_root)?;
    }

    info!(
        files = results.checked_file_count(),
        violations = results.total_count(),
        "Check finished"
    );

    Ok(if results.is_clean() {
        exit_codes::SUCCESS
    } else {
        exit_codes::VIOLATIONS
    })
}
