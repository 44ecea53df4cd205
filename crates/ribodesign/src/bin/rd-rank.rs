use std::io::Write;
use log::info;
use colored::*;
use env_logger::Builder;
use clap::Parser;
use clap::ArgAction;
use anyhow::Result;

use rd_ranking::rank_designs;

use ribodesign::input_parsers::read_designs_input;
use ribodesign::ranking_parsers::RankingArguments;

#[derive(Debug, Parser)]
#[command(name = "rd-rank")]
#[command(version, about = "Rank scored ribozyme designs by Pareto fronts")]
pub struct Cli {
    /// Scored designs (JSON list), or "-" for stdin
    #[arg(value_name = "INPUT", default_value = "-")]
    input: String,

    /// Verbosity (-v = info, -vv = debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[command(flatten, next_help_heading = "Ranking parameters")]
    ranking: RankingArguments,
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format(|buf, record| {
            writeln!(buf, "{}", record.args())
        })
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    cli.ranking.validate()?;

    let mut designs = read_designs_input(&cli.input)?;
    let tolerances = cli.ranking.tolerances();
    info!("Ranking {} designs ({:?}) with {:?}", designs.len(), cli.ranking.strategy(), tolerances);

    let last = rank_designs(&mut designs, &tolerances, cli.ranking.starting_rank, cli.ranking.strategy())?;
    designs.sort_by_key(|d| d.rank);
    info!("{}", format!("Ranks {}..={} assigned.", cli.ranking.starting_rank, last).green());

    println!("{}", serde_json::to_string_pretty(&designs)?);
    Ok(())
}
