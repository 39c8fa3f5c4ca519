use super::ui::{self, StyleType};
use crate::core::aggregate::{self, Icon, Sign};
use crate::core::{HomeController, HomeState, NodeApi};
use anyhow::Result;
use comfy_table::{Cell, Color, Table};
use std::sync::Arc;
use tracing::info;

fn icon_glyph(icon: Icon) -> &'static str {
    match icon {
        Icon::Vote => "☑",
        Icon::Unvote => "☐",
        Icon::Cycle => "↻",
        Icon::Outbound => "↑",
        Icon::Inbound => "↓",
        Icon::Unknown => "?",
    }
}

fn overview_table(state: &HomeState, coinbase: Option<&str>, unit: &str) -> Table {
    let mut table = ui::new_styled_table();
    let block_number = state
        .block
        .as_ref()
        .map(|b| ui::group_thousands(b.number))
        .unwrap_or_default();
    let block_time = state
        .block
        .as_ref()
        .map(|b| ui::local_date_time(&b.timestamp))
        .unwrap_or_default();

    let rows = [
        ("Block #:", block_number),
        ("Block time:", block_time),
        ("Coinbase:", ui::address_abbr(coinbase.unwrap_or(""))),
        (
            "Available:",
            ui::format_amount(&aggregate::sum_available(&state.accounts), unit),
        ),
        (
            "Locked:",
            ui::format_amount(&aggregate::sum_locked(&state.accounts), unit),
        ),
        (
            "Total Balance:",
            ui::format_amount(&aggregate::sum_total(&state.accounts), unit),
        ),
    ];
    for (label, value) in rows {
        table.add_row(vec![ui::label_cell(label), Cell::new(value)]);
    }
    table
}

fn transactions_table(state: &HomeState, unit: &str) -> Table {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell(""),
        ui::header_cell("Time"),
        ui::header_cell("Transfer"),
        ui::header_cell("Value"),
    ]);

    for tx in &state.transactions {
        let (sign, icon) = aggregate::classify_transaction(state, tx);
        let value = ui::amount_cell(format!("{sign}{}", ui::format_amount(&tx.value, unit)));
        let value = match sign {
            Sign::Minus => value.fg(Color::Red),
            Sign::Plus => value.fg(Color::Green),
            Sign::None => value,
        };
        table.add_row(vec![
            Cell::new(icon_glyph(icon)),
            Cell::new(ui::local_date_time(&tx.timestamp)),
            Cell::new(ui::transfer(&tx.from, &tx.to)),
            value,
        ]);
    }
    table
}

/// Renders the home panel. Reads nothing but the snapshot, the coinbase
/// address and the display unit.
pub fn render(state: &HomeState, coinbase: Option<&str>, unit: &str) -> String {
    let mut output = String::new();

    if !state.error_message.is_empty() {
        output.push_str(&ui::style_text(&state.error_message, StyleType::Error));
        output.push_str("\n\n");
    }

    output.push_str(&format!(
        "{}\n",
        ui::style_text("Overview", StyleType::Title)
    ));
    output.push_str(&overview_table(state, coinbase, unit).to_string());

    output.push_str(&format!(
        "\n\n{}\n",
        ui::style_text("Transactions", StyleType::Title)
    ));
    if state.transactions.is_empty() {
        output.push_str(&ui::style_text("No recent transactions", StyleType::Subtle));
    } else {
        output.push_str(&transactions_table(state, unit).to_string());
    }

    output
}

pub async fn run(api: Arc<dyn NodeApi>, addresses: &[String], unit: &str) -> Result<()> {
    info!(count = addresses.len(), "Loading home panel");

    let mut controller = HomeController::new(api);
    controller.fetch(addresses);

    let pb = ui::new_progress_bar(controller.pending() as u64, true);
    pb.set_message("Fetching from node...");
    while controller.next().await.is_some() {
        pb.inc(1);
    }
    pb.finish_and_clear();

    println!(
        "{}",
        render(
            controller.state(),
            addresses.first().map(String::as_str),
            unit
        )
    );
    Ok(())
}
