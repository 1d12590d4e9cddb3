use super::{Context, GenerateArgs, finish, table, with_status};
use anyhow::Result;
use colored::Colorize;

pub async fn run(context: &Context, args: GenerateArgs) -> Result<()> {
    let usecase = context.usecase();
    let state = usecase.load_session().await;
    let query = args.apply(state.query.clone());

    let state = finish(with_status(&usecase, usecase.generate(&state, query)).await)?;

    if state.leads.is_empty() {
        println!("{}", "The search finished but returned no leads.".yellow());
        return Ok(());
    }
    println!(
        "{} {} leads found",
        "✓".green(),
        state.leads.len().to_string().bold()
    );
    print!("{}", table::render_ranked(&state.leads));
    Ok(())
}
