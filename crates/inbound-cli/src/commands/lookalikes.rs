use super::{Context, finish, print_empty_hint, table, with_status};
use anyhow::{Result, bail};
use colored::Colorize;
use inbound_core::projection::ranked;

/// `row` is the 1-based position in the ranked table.
pub async fn run(context: &Context, row: usize) -> Result<()> {
    let usecase = context.usecase();
    let state = usecase.load_session().await;
    if state.leads.is_empty() {
        print_empty_hint();
        return Ok(());
    }

    let Some(seed_index) = stored_index(&state.leads, row) else {
        bail!(
            "There is no lead at row {} (rows 1-{} are available)",
            row,
            state.leads.len()
        );
    };
    let seed = state.leads[seed_index].company_name.clone();
    let before = state.leads.len();

    let state = finish(with_status(&usecase, usecase.find_lookalikes(&state, seed_index)).await)?;

    println!(
        "{} {} companies similar to {} added",
        "✓".green(),
        (state.leads.len() - before).to_string().bold(),
        seed.bold()
    );
    print!("{}", table::render_ranked(&state.leads));
    Ok(())
}

/// Maps a ranked-table row number to the lead's stored position.
fn stored_index(leads: &[inbound_core::Lead], row: usize) -> Option<usize> {
    let position = row.checked_sub(1)?;
    ranked(leads).get(position).map(|(index, _)| *index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use inbound_core::Lead;

    fn lead(name: &str, score: i64) -> Lead {
        serde_json::from_value(serde_json::json!({"companyName": name, "leadScore": score})).unwrap()
    }

    #[test]
    fn rows_follow_ranking() {
        let leads = vec![lead("Low", 40), lead("High", 90), lead("Mid", 60)];
        assert_eq!(stored_index(&leads, 1), Some(1));
        assert_eq!(stored_index(&leads, 2), Some(2));
        assert_eq!(stored_index(&leads, 3), Some(0));
        assert_eq!(stored_index(&leads, 0), None);
        assert_eq!(stored_index(&leads, 4), None);
    }
}
