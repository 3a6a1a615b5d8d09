// ABOUTME: CLI command printing grouped slot availability for a date

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use tracing::warn;

use crate::cli::{FlowArg, OutputFormat, SlotsArgs};
use crate::config::AppConfig;
use crate::models::slot::{SlotCatalog, CAR_CATALOG, FREIGHT_CATALOG};
use crate::scheduling::booking::is_date_selectable;
use crate::scheduling::{availability, BrokerTimezone, SchedulingClient};

pub async fn execute(args: SlotsArgs, format: OutputFormat) -> Result<()> {
    let date = NaiveDate::parse_from_str(&args.date, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{}', expected YYYY-MM-DD", args.date))?;

    let today = Local::now().date_naive();
    if !is_date_selectable(date, today) {
        bail!(
            "{date} is not offered: consultations run Sunday-Thursday, today through 30 days out"
        );
    }

    let catalog: &SlotCatalog = match args.flow {
        FlowArg::Freight => &FREIGHT_CATALOG,
        FlowArg::Car => &CAR_CATALOG,
    };

    let config = AppConfig::load()?;
    let broker = BrokerTimezone::from_hours(config.broker_utc_offset_hours).unwrap_or_else(|| {
        warn!(
            "broker_utc_offset_hours {} out of range, using default",
            config.broker_utc_offset_hours
        );
        BrokerTimezone::default()
    });
    let client = SchedulingClient::new(&config)?;

    let booked = client.fetch_booked(date).await?;
    let slots = availability::compute_slots(catalog, &booked, date, broker, &Local)?;
    let groups = availability::group_slots(catalog, slots);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&groups)?);
        }
        OutputFormat::Text => {
            println!("Availability for {} ({} flow):", date, catalog.name);
            for group in &groups {
                println!();
                println!("  {}", group.title);
                if group.slots.is_empty() {
                    println!("    (no slots)");
                }
                for slot in &group.slots {
                    let marker = if slot.available { " " } else { "x" };
                    println!(
                        "   {marker} {:<9} ({} broker time){}",
                        slot.viewer_label,
                        slot.broker_label,
                        if slot.available { "" } else { "  booked" }
                    );
                }
            }
        }
    }

    Ok(())
}
