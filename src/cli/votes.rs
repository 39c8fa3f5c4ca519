use super::ui::{self, StyleType};
use crate::core::delegate::{self, Delegate};
use crate::core::vote::{self, AccountVote};
use crate::core::{Amount, NodeApi};
use anyhow::{Context, Result};
use comfy_table::Cell;
use std::collections::HashMap;

/// Renders an account's votes, naming delegates found in `delegates`.
pub fn render(address: &str, votes: &[AccountVote], delegates: &[Delegate], unit: &str) -> String {
    let names: HashMap<&str, &str> = delegates
        .iter()
        .map(|d| (d.address.as_str(), d.name.as_str()))
        .collect();

    let mut output = format!(
        "Votes of {}\n\n",
        ui::style_text(&ui::address_abbr(address), StyleType::Title)
    );

    if votes.is_empty() {
        output.push_str(&ui::style_text("No votes cast", StyleType::Subtle));
        return output;
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Delegate"),
        ui::header_cell("Address"),
        ui::header_cell("Votes"),
    ]);
    for v in votes {
        let name = names.get(v.delegate.as_str()).copied().unwrap_or("N/A");
        table.add_row(vec![
            Cell::new(name),
            Cell::new(ui::address_abbr(&v.delegate)),
            ui::amount_cell(ui::format_amount(&v.votes, unit)),
        ]);
    }
    output.push_str(&table.to_string());

    let total: Amount = votes.iter().map(|v| v.votes).sum();
    output.push_str(&format!(
        "\n\n{}: {}",
        ui::style_text("Total Votes", StyleType::TotalLabel),
        ui::style_text(&ui::format_amount(&total, unit), StyleType::TotalValue)
    ));
    output
}

pub async fn run(api: &dyn NodeApi, address: &str, unit: &str) -> Result<()> {
    let pb = ui::new_progress_bar(2, true);
    pb.set_message("Fetching votes...");
    let result = futures::try_join!(vote::fetch_votes(api, address), delegate::fetch_delegates(api));
    pb.finish_and_clear();

    let (votes, delegates) =
        result.with_context(|| format!("Failed to load votes for {address}"))?;
    println!("{}", render(address, &votes, &delegates, unit));
    Ok(())
}
