use super::{Context, ExportArgs, FormatArg, print_empty_hint};
use anyhow::Result;
use colored::Colorize;
use inbound_infrastructure::{ExportFormat, ExportOutcome, ExportService};

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Xlsx => ExportFormat::Workbook,
            FormatArg::Clipboard => ExportFormat::Clipboard,
        }
    }
}

pub async fn run(context: &Context, args: ExportArgs) -> Result<()> {
    let state = context.usecase().load_session().await;
    if state.leads.is_empty() {
        print_empty_hint();
        return Ok(());
    }

    let service = ExportService::new(context.config.export_dir.clone());
    let outcome = service.export(
        &state.leads,
        &state.query.region,
        args.format.into(),
        args.output.as_deref(),
    )?;

    match outcome {
        ExportOutcome::Written { path, rows } => {
            println!(
                "{} Exported {} rows to {}",
                "✓".green(),
                rows.to_string().bold(),
                path.display()
            );
        }
        // Plain text on stdout so it can be piped into a clipboard tool.
        ExportOutcome::Clipboard(text) => println!("{text}"),
    }
    Ok(())
}
