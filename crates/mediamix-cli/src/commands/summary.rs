//! `mediamix summary` command - Print headline KPIs and the channel table.

use colored::Colorize;
use mediamix::analytics::{channel_contribution, kpi_summary, top_n};
use mediamix::config::MediaMixConfig;
use mediamix::filter::filter;

use crate::error::CliResult;

use super::{load_dataset, FilterArgs};

/// Execute the `summary` command.
pub fn execute(config: &MediaMixConfig, args: &FilterArgs) -> CliResult<()> {
    let dataset = load_dataset(config)?;
    let records = filter(&dataset.records, &args.selection()?)?;

    let Some(kpi) = kpi_summary(&records) else {
        println!("{} No records match the selection", "Warning:".yellow());
        return Ok(());
    };

    println!("{}:", "Portfolio".bright_white().underline());
    println!("  {} Spend:       {}", "•".dimmed(), format!("{:.2}", kpi.spend).bright_yellow());
    println!("  {} Net revenue: {}", "•".dimmed(), format!("{:.2}", kpi.net_revenue).bright_yellow());
    println!("  {} ROI:         {}", "•".dimmed(), format!("{:.2}", kpi.roi).bright_green());
    println!("  {} CPM:         {:.2}", "•".dimmed(), kpi.cpm);
    println!("  {} Frequency:   {:.2}", "•".dimmed(), kpi.frequency);
    println!("  {} Active days: {}", "•".dimmed(), kpi.active_days);
    println!();

    println!("{}:", "Channels".bright_white().underline());
    for row in top_n(channel_contribution(&records), config.analytics.top_n) {
        let roi = format!("{:>6.2}", row.roi);
        let roi = if row.roi >= kpi.roi {
            roi.bright_green()
        } else {
            roi.yellow()
        };
        println!(
            "  {:<16} {:>14.2} {:>6.1}%  ROI {}",
            row.channel.name(),
            row.spend,
            row.spend_share_pct,
            roi
        );
    }

    Ok(())
}
