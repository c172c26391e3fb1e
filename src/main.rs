use anyhow::Context;
use chrono::{Local, NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use trackfy::application::{DashboardService, DashboardView};
use trackfy::config::Config;
use trackfy::domain::period::{CustomRange, PeriodFilter};
use trackfy::domain::reporting::{Currency, format_percent};
use trackfy::infrastructure::export::write_sales_csv;
use tracing::info;
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(author, version, about = "Simulated sales analytics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the dashboard figures for one period
    Report {
        /// today, yesterday, last-7-days, this-month, last-month, this-year, all-time, custom
        #[arg(short, long, default_value = "this-month")]
        period: PeriodFilter,

        /// Custom range start (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Custom range end (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Display currency, overrides TRACKFY_CURRENCY
        #[arg(long)]
        currency: Option<Currency>,

        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
    /// Write the sales of one period as CSV
    Export {
        #[arg(short, long, default_value = "this-month")]
        period: PeriodFilter,

        #[arg(long)]
        from: Option<String>,

        #[arg(long)]
        to: Option<String>,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Fill the day cache for the trailing window
    Warm {
        /// Window size in days, overrides TRACKFY_WINDOW_DAYS
        #[arg(short, long)]
        days: Option<u32>,
    },
    /// List the days currently cached
    Days,
    /// Drop one cached day so it is regenerated on the next run
    Evict {
        /// Day to evict (YYYY-MM-DD)
        date: String,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(io::stderr);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(stderr_layer)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;
    let builder = config.create_builder(config.create_store()?);
    let now = Utc::now();

    match cli.command {
        Commands::Report {
            period,
            from,
            to,
            currency,
            format,
        } => {
            let service = DashboardService::load(
                &builder,
                config.simulation.window_days,
                now,
                Local,
                config.targets(),
            );
            let view = service.query(period, &CustomRange::new(from, to), now, &mut rand::rng());

            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&view)?);
                }
                OutputFormat::Table => {
                    let currency = currency.unwrap_or(config.display.currency);
                    print_report(&view, currency, &config)?;
                }
            }
        }
        Commands::Export {
            period,
            from,
            to,
            output,
        } => {
            let service = DashboardService::load(
                &builder,
                config.simulation.window_days,
                now,
                Local,
                config.targets(),
            );
            let view = service.query(period, &CustomRange::new(from, to), now, &mut rand::rng());

            let rows = match &output {
                Some(path) => {
                    let file = File::create(path)
                        .with_context(|| format!("Failed to create {:?}", path))?;
                    write_sales_csv(&view.sales, BufWriter::new(file))?
                }
                None => write_sales_csv(&view.sales, io::stdout().lock())?,
            };
            info!("Exported {} sales for {}", rows, view.period.label());
        }
        Commands::Warm { days } => {
            let window = days.unwrap_or(config.simulation.window_days);
            let (master, stats) = builder.build_with_stats(window, now, &Local);
            println!(
                "{} days: {} cached, {} generated, {} write failures, {} sales",
                stats.days,
                stats.cache_hits,
                stats.generated,
                stats.write_failures,
                master.len()
            );
        }
        Commands::Days => {
            let days = builder.cache().cached_days()?;
            for day in &days {
                println!("{}", day);
            }
            info!("{} days cached", days.len());
        }
        Commands::Evict { date } => {
            let day = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
                .with_context(|| format!("Invalid date: {}", date))?;
            builder.cache().evict(day)?;
            info!("Evicted {}", day);
        }
    }

    Ok(())
}

fn print_report(view: &DashboardView, currency: Currency, config: &Config) -> anyhow::Result<()> {
    let rate = config.display.eur_rate;
    let money = |amount| currency.format(currency.convert(amount, rate));
    let kpis = &view.kpis;

    let mut out = io::stdout().lock();
    writeln!(
        out,
        "{} ({} .. {})",
        view.period.label(),
        view.range.start.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
        view.range.end.with_timezone(&Local).format("%Y-%m-%d %H:%M")
    )?;
    writeln!(out)?;
    writeln!(out, "{:<22}{:>20}", "Gross revenue", money(kpis.gross_revenue))?;
    writeln!(out, "{:<22}{:>20}", "Net revenue", money(kpis.net_revenue))?;
    writeln!(out, "{:<22}{:>20}", "Fees", money(kpis.fees))?;
    writeln!(out, "{:<22}{:>20}", "Taxes", money(kpis.taxes))?;
    writeln!(out, "{:<22}{:>20}", "Ad spend", money(kpis.ad_spend))?;
    writeln!(out, "{:<22}{:>20}", "Profit", money(kpis.profit))?;
    writeln!(out, "{:<22}{:>20}", "Margin", format_percent(kpis.margin))?;
    writeln!(out, "{:<22}{:>20}", "Paid sales", kpis.count)?;
    writeln!(out, "{:<22}{:>20}", "ARPU", money(kpis.arpu))?;
    writeln!(out, "{:<22}{:>20}", "Pending (est.)", money(kpis.pending_sales))?;
    writeln!(
        out,
        "{:<22}{:>20}  {}",
        "Refunds",
        money(kpis.refunds),
        format_percent(kpis.refund_percentage)
    )?;
    writeln!(
        out,
        "{:<22}{:>20}  {}",
        "Chargebacks",
        money(kpis.chargebacks),
        format_percent(kpis.chargeback_percentage)
    )?;

    if !view.payment_breakdown.methods.is_empty() {
        writeln!(out)?;
        writeln!(out, "Payment methods")?;
        for share in &view.payment_breakdown.methods {
            writeln!(
                out,
                "  {:<20}{:>6}{:>20}",
                share.method.label(),
                share.count,
                money(share.amount)
            )?;
        }
    }

    if let Some(run_rate) = &view.run_rate {
        writeln!(out)?;
        writeln!(
            out,
            "Run rate: {}/day, projected {} of {} ({}){}",
            money(run_rate.daily),
            money(run_rate.projected),
            money(run_rate.target),
            format_percent(run_rate.progress_pct),
            if run_rate.on_track() { ", on track" } else { "" }
        )?;
    }

    if !view.revenue_series.points.is_empty() {
        writeln!(out)?;
        writeln!(out, "Revenue")?;
        for point in &view.revenue_series.points {
            writeln!(out, "  {:<20}{:>20}", point.label, money(point.value))?;
        }
    }

    Ok(())
}
