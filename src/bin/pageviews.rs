use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use wikimedia_pageviews::{
    Access, Agent, ArticleRanking, ClientConfig, PageviewsClient, PeakViews, storage,
};

#[derive(Parser, Debug)]
#[command(
    name = "pageviews",
    version,
    about = "Query Wikimedia pageview statistics: top articles, article totals and peak days"
)]
struct Cli {
    /// User-Agent with contact info, e.g. "my-tool/1.0 (me@example.org)".
    #[arg(long, env = "PAGEVIEWS_USER_AGENT")]
    user_agent: String,
    /// Wikimedia project domain.
    #[arg(long, default_value = "en.wikipedia.org")]
    project: String,
    /// Access filter: all-access, desktop, mobile-app or mobile-web.
    #[arg(long, default_value = "all-access")]
    access: Access,
    /// Agent filter: user, automated, spider or all-agents.
    #[arg(long, default_value = "user")]
    agent: Agent,
    /// API host.
    #[arg(long, default_value = "wikimedia.org")]
    host: String,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Most viewed articles on one day.
    TopDay {
        year: i32,
        month: u32,
        day: u32,
        #[command(flatten)]
        out: OutArgs,
    },
    /// Most viewed articles over seven days starting at YYYYMMDD.
    TopWeek {
        start: String,
        #[arg(long)]
        limit: Option<usize>,
        #[command(flatten)]
        out: OutArgs,
    },
    /// Most viewed articles over a month.
    TopMonth {
        year: i32,
        month: u32,
        #[arg(long)]
        limit: Option<usize>,
        #[command(flatten)]
        out: OutArgs,
    },
    /// Total views of an article over seven days starting at YYYYMMDD.
    ArticleWeek { article: String, start: String },
    /// Total views of an article for a month (first and last day, YYYYMMDD).
    ArticleMonth {
        article: String,
        start: String,
        end: String,
    },
    /// Busiest day of an article in the seven days starting at YYYYMMDD.
    PeakWeek { article: String, start: String },
    /// Busiest day of an article in a month.
    PeakMonth {
        article: String,
        year: i32,
        month: u32,
    },
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct OutArgs {
    /// Save results to file (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let cfg = ClientConfig::new(cli.user_agent)?
        .api_host(cli.host)
        .project(cli.project)
        .access(cli.access)
        .agent(cli.agent);
    let client = PageviewsClient::new(cfg)?;

    match cli.cmd {
        Command::TopDay {
            year,
            month,
            day,
            out,
        } => emit_rankings(&client.top_articles_for_day(year, month, day)?, &out),
        Command::TopWeek { start, limit, out } => {
            emit_rankings(&client.top_articles_for_week(&start, limit)?, &out)
        }
        Command::TopMonth {
            year,
            month,
            limit,
            out,
        } => emit_rankings(&client.top_articles_for_month(year, month, limit)?, &out),
        Command::ArticleWeek { article, start } => {
            println!("{}", client.article_views_for_week(&article, &start)?);
            Ok(())
        }
        Command::ArticleMonth {
            article,
            start,
            end,
        } => {
            println!("{}", client.article_views_for_month(&article, &start, &end)?);
            Ok(())
        }
        Command::PeakWeek { article, start } => {
            print_peak(client.peak_day_in_week(&article, &start)?);
            Ok(())
        }
        Command::PeakMonth {
            article,
            year,
            month,
        } => {
            print_peak(client.peak_day_in_month(&article, year, month)?);
            Ok(())
        }
    }
}

fn print_peak(p: PeakViews) {
    println!("{}\t{}", p.date, p.views);
}

fn emit_rankings(rows: &[ArticleRanking], args: &OutArgs) -> Result<()> {
    let Some(path) = args.out.as_ref() else {
        for r in rows {
            println!("{:>4}  {:>10}  {}", r.rank, r.views, r.article);
        }
        return Ok(());
    };
    let fmt = match args.format {
        Some(OutFormat::Csv) => "csv",
        Some(OutFormat::Json) => "json",
        None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
    }
    .to_ascii_lowercase();
    match fmt.as_str() {
        "csv" => storage::save_csv(rows, path)?,
        "json" => storage::save_json(rows, path)?,
        other => anyhow::bail!("unsupported format: {}", other),
    }
    eprintln!("Saved {} rows to {}", rows.len(), path.display());
    Ok(())
}
