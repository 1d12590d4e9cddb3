use super::{Context, print_empty_hint, table};
use anyhow::Result;
use colored::Colorize;
use inbound_core::projection::ranked;

pub async fn run(context: &Context, details: bool) -> Result<()> {
    let state = context.usecase().load_session().await;
    if let Some(error) = &state.error {
        eprintln!("{} {}", "Warning:".yellow().bold(), error);
    }
    if state.leads.is_empty() {
        print_empty_hint();
        return Ok(());
    }

    let query = &state.query;
    println!(
        "{} {}  {} {}  {} {}",
        "Client:".dimmed(),
        query.client().unwrap_or("-"),
        "Region:".dimmed(),
        query.region,
        "Department:".dimmed(),
        query.department
    );
    print!("{}", table::render_ranked(&state.leads));

    if details {
        for (row, (_, lead)) in ranked(&state.leads).into_iter().enumerate() {
            println!();
            print!("{}", table::render_details(row + 1, lead));
        }
    }
    Ok(())
}
