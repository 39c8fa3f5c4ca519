use super::ui::{self, StyleType};
use crate::core::delegate::{self, Delegate};
use crate::core::NodeApi;
use anyhow::Result;
use comfy_table::{Cell, Color};

pub fn render(delegates: &[Delegate], unit: &str) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("#"),
        ui::header_cell("Name"),
        ui::header_cell("Address"),
        ui::header_cell("Votes"),
        ui::header_cell("Blocks"),
        ui::header_cell("Hit / Missed"),
        ui::header_cell("Rate (%)"),
        ui::header_cell("Validator"),
    ]);

    for (rank, d) in delegates.iter().enumerate() {
        let validator = if d.validator {
            Cell::new("yes").fg(Color::Green)
        } else {
            Cell::new("no").fg(Color::DarkGrey)
        };
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(&d.name),
            Cell::new(ui::address_abbr(&d.address)),
            ui::amount_cell(ui::format_amount(&d.votes, unit)),
            ui::amount_cell(d.blocks_forged.to_string()),
            ui::amount_cell(format!("{} / {}", d.turns_hit, d.turns_missed)),
            ui::amount_cell(format!("{:.2}", d.rate)),
            validator,
        ]);
    }

    format!(
        "{}\n{}",
        ui::style_text("Delegates", StyleType::Title),
        table
    )
}

pub async fn run(api: &dyn NodeApi, unit: &str) -> Result<()> {
    let pb = ui::new_progress_bar(1, true);
    pb.set_message("Fetching delegates...");
    let delegates = delegate::fetch_delegates(api).await;
    pb.finish_and_clear();

    println!("{}", render(&delegates?, unit));
    Ok(())
}
