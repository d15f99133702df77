//! Command Line Interface for the Rangeseeker earnings estimator.
use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use dotenv::dotenv;
use prettytable::{Table, row};
use primitive_types::U256;
use rangeseeker_domain::entities::pool::{
    DEFAULT_TOKEN0_DECIMALS, DEFAULT_TOKEN1_DECIMALS, PoolSnapshot,
};
use rangeseeker_domain::entities::token::Token;
use rangeseeker_domain::enums::Preset;
use rangeseeker_domain::fees::FeeTier;
use rangeseeker_domain::math::price_tick::{
    human_price_to_tick, price_from_sqrt_price_x96, tick_to_human_price,
};
use rangeseeker_domain::metrics::volatility::estimate_volatility;
use rangeseeker_domain::strategy::{StrategyDefinition, preset_definition, preset_text};
use rangeseeker_domain::value_objects::earnings_estimate::{CaseResult, EarningsEstimate};
use rangeseeker_domain::value_objects::price_point::PricePoint;
use rangeseeker_domain::value_objects::range_width::RangeWidth;
use rangeseeker_estimation::config::RebalanceCostModel;
use rangeseeker_estimation::position_check::{DEFAULT_EDGE_FRACTION, check_position};
use rangeseeker_estimation::prelude::*;
use rangeseeker_optimization::{
    MaximizeBestCaseApy, MaximizeMidpointWeeklyUsd, MaximizeWorstCaseApy, ObjectiveFunction,
    RangeSweep,
};
use std::env;
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "rangeseeker")]
#[command(about = "Earnings estimator for Uniswap V3 liquidity agents", long_about = None)]
struct Cli {
    /// Calibration JSON (falls back to RANGESEEKER_CALIBRATION)
    #[arg(long, global = true)]
    calibration: Option<PathBuf>,

    /// Position size in USD the projection is quoted for
    #[arg(long, global = true)]
    investment: Option<f64>,

    /// Gas cost per rebalance in USD
    #[arg(long, global = true)]
    gas_usd: Option<f64>,

    #[command(subcommand)]
    command: Commands,
}

/// Pool market data shared by the estimating commands.
#[derive(Args)]
struct MarketArgs {
    /// Current WETH price in USDC
    #[arg(long, required_unless_present = "sqrt_price_x96")]
    price: Option<f64>,

    /// Pool sqrtPriceX96, used instead of --price
    #[arg(long, conflicts_with = "price")]
    sqrt_price_x96: Option<String>,

    /// 24h volatility as a fraction (0.05 = 5%)
    #[arg(long, default_value_t = 0.0)]
    volatility_24h: f64,

    /// 7d volatility as a fraction (0.10 = 10%)
    #[arg(long)]
    volatility_7d: f64,

    /// Fee growth per unit of raw liquidity over the last week
    #[arg(long)]
    fee_growth_7d: f64,

    /// Pool fee as a fraction of volume (overrides --fee-tier)
    #[arg(long)]
    fee_rate: Option<f64>,

    /// Pool fee tier in pips
    #[arg(long, default_value_t = FeeTier::LOW.pips)]
    fee_tier: u32,

    #[arg(long, default_value_t = DEFAULT_TOKEN0_DECIMALS)]
    token0_decimals: u8,

    #[arg(long, default_value_t = DEFAULT_TOKEN1_DECIMALS)]
    token1_decimals: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum ObjectiveArg {
    Worst,
    Best,
    Midpoint,
}

#[derive(Subcommand)]
enum Commands {
    /// Project best/worst case returns for one range width
    Estimate {
        #[command(flatten)]
        market: MarketArgs,

        /// Range half-width in percent (4 = ±4%)
        #[arg(long)]
        range_percent: f64,
    },
    /// Rank several range widths
    Compare {
        #[command(flatten)]
        market: MarketArgs,

        /// Comma separated widths in percent
        #[arg(long, value_delimiter = ',', default_values_t = vec![2.0, 4.0, 8.0])]
        ranges: Vec<f64>,

        #[arg(long, value_enum, default_value = "worst")]
        objective: ObjectiveArg,
    },
    /// Inspect a strategy definition and estimate it at current market
    Strategy {
        /// Strategy definition JSON
        #[arg(short, long)]
        file: PathBuf,

        #[command(flatten)]
        market: MarketArgs,
    },
    /// Print a starter strategy for the current market
    Preset {
        #[arg(short, long, default_value = "balanced")]
        preset: Preset,

        #[arg(long)]
        price: f64,

        /// 24h volatility as a fraction
        #[arg(long)]
        volatility_24h: f64,

        /// Print the structured rules as JSON
        #[arg(long)]
        json: bool,
    },
    /// Classify a position against the current pool tick
    Check {
        /// Current pool tick
        #[arg(long, allow_hyphen_values = true, required_unless_present = "price")]
        tick: Option<i32>,

        /// Current price, converted to a tick
        #[arg(long, conflicts_with = "tick")]
        price: Option<f64>,

        #[arg(long, allow_hyphen_values = true)]
        tick_lower: i32,

        #[arg(long, allow_hyphen_values = true)]
        tick_upper: i32,

        /// Share of the range treated as the edge zone
        #[arg(long, default_value_t = DEFAULT_EDGE_FRACTION)]
        edge: f64,
    },
    /// Replay a price history through a rebalancing range
    Replay {
        /// JSON array of {"timestamp", "price"} points
        #[arg(long)]
        history: PathBuf,

        #[arg(long)]
        range_percent: f64,

        /// Extra drift beyond the range before recentring (0.1 = 10%)
        #[arg(long, default_value_t = 0.1)]
        buffer: f64,
    },
}

impl MarketArgs {
    fn snapshot(&self) -> Result<PoolSnapshot> {
        let price = match (&self.price, &self.sqrt_price_x96) {
            (Some(price), _) => *price,
            (None, Some(raw)) => {
                let sqrt_price = U256::from_dec_str(raw)
                    .map_err(|e| anyhow!("invalid sqrtPriceX96 {raw}: {e:?}"))?;
                price_from_sqrt_price_x96(sqrt_price, self.token0_decimals, self.token1_decimals)
            }
            (None, None) => bail!("either --price or --sqrt-price-x96 is required"),
        };
        let fee_rate = self
            .fee_rate
            .unwrap_or_else(|| FeeTier::new(self.fee_tier).fee_rate());

        Ok(PoolSnapshot::new(
            price,
            self.volatility_24h,
            self.volatility_7d,
            self.fee_growth_7d,
            fee_rate,
        )
        .with_decimals(self.token0_decimals, self.token1_decimals))
    }
}

fn load_config(cli: &Cli) -> Result<EstimatorConfig> {
    let path = cli
        .calibration
        .clone()
        .or_else(|| env::var("RANGESEEKER_CALIBRATION").ok().map(PathBuf::from));

    let mut config = match path {
        Some(path) => {
            info!(path = %path.display(), "Loading calibration");
            EstimatorConfig::from_path(&path)?
        }
        None => EstimatorConfig::default(),
    };
    if let Some(investment) = cli.investment {
        config = config.with_investment(investment);
    }
    if let Some(gas) = cli.gas_usd {
        let rebalance = RebalanceCostModel {
            gas_per_rebalance_usd: gas,
            ..config.rebalance
        };
        config = config.with_rebalance(rebalance);
    }
    Ok(config)
}

fn print_case(label: &str, case: &CaseResult) {
    println!(
        "{label:<11} ${:>9.2}/week  {:>7.2}%/week  {:>9.2}% APY",
        case.weekly_usd, case.weekly_percent, case.apy_percent
    );
}

fn print_estimate(estimate: &EarningsEstimate) {
    print_case("Best case:", &estimate.best_case);
    print_case("Worst case:", &estimate.worst_case);
}

fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Estimate {
            market,
            range_percent,
        } => {
            let estimator = EarningsEstimator::new(load_config(&cli)?)?;
            let snapshot = market.snapshot()?;
            let range = RangeWidth::from_percent(*range_percent)?;

            println!(
                "📈 {}/{} at ${:.2}, range {range}",
                Token::weth().symbol,
                Token::usdc().symbol,
                snapshot.current_price
            );
            let Some(breakdown) = estimator.explain(&snapshot, range) else {
                println!("❌ Estimate unavailable: fee data missing.");
                return Ok(());
            };

            println!("════════════════════════════════════");
            println!("Liquidity:        {:.6e}", breakdown.liquidity.raw_liquidity);
            println!("Max weekly fees:  ${:.2}", breakdown.max_weekly_earnings_usd);
            println!("Volatility ratio: {:.2}", breakdown.volatility_ratio);
            println!(
                "Time in range:    {:.0}% / {:.0}%",
                breakdown.time_in_range.best_case * 100.0,
                breakdown.time_in_range.worst_case * 100.0
            );
            println!(
                "Rebalance gas:    ${:.2} / ${:.2} per week",
                breakdown.rebalance_costs.best_case_weekly_usd,
                breakdown.rebalance_costs.worst_case_weekly_usd
            );
            println!("════════════════════════════════════");
            print_estimate(&breakdown.estimate);
        }
        Commands::Compare {
            market,
            ranges,
            objective,
        } => {
            let estimator = EarningsEstimator::new(load_config(&cli)?)?;
            let snapshot = market.snapshot()?;
            let sweep = RangeSweep::from_percents(ranges)?;
            let objective: Box<dyn ObjectiveFunction> = match objective {
                ObjectiveArg::Worst => Box::new(MaximizeWorstCaseApy),
                ObjectiveArg::Best => Box::new(MaximizeBestCaseApy),
                ObjectiveArg::Midpoint => Box::new(MaximizeMidpointWeeklyUsd),
            };

            let ranked = sweep.rank(&estimator, &snapshot, objective.as_ref());
            if ranked.is_empty() {
                println!("❌ Estimate unavailable: fee data missing.");
                return Ok(());
            }

            println!("🔍 Ranked by {}", objective.name());
            let mut table = Table::new();
            table.add_row(row![
                "Rank",
                "Range",
                "Best $/week",
                "Best APY %",
                "Worst $/week",
                "Worst APY %"
            ]);
            for (i, candidate) in ranked.iter().enumerate() {
                let estimate = &candidate.estimate;
                table.add_row(row![
                    i + 1,
                    candidate.range,
                    format!("{:.2}", estimate.best_case.weekly_usd),
                    format!("{:.2}", estimate.best_case.apy_percent),
                    format!("{:.2}", estimate.worst_case.weekly_usd),
                    format!("{:.2}", estimate.worst_case.apy_percent)
                ]);
            }
            table.printstd();
        }
        Commands::Strategy { file, market } => {
            let raw = fs::read_to_string(file)
                .with_context(|| format!("reading strategy {}", file.display()))?;
            let definition = StrategyDefinition::from_json(&raw)?;
            let estimator = EarningsEstimator::new(load_config(&cli)?)?;
            let snapshot = market.snapshot()?;

            println!("📋 {}", definition.summary_text());
            let feeds: Vec<String> = definition
                .feed_requirements
                .iter()
                .map(ToString::to_string)
                .collect();
            println!("Feeds: {}", feeds.join(", "));
            if let Some(rule) = definition.range_rule() {
                println!(
                    "Rebalance when price drifts {:.2}% from centre",
                    rule.rebalance_threshold_percent()
                );
            }

            let evaluator = RuleEvaluator::new(definition)?;
            let observation = MarketObservation::new(snapshot.current_price, snapshot.volatility_24h);
            match evaluator.decide(&observation)? {
                AgentAction::ExitToStable { target_asset } => {
                    println!("🚨 Exit to {target_asset}");
                }
                AgentAction::PauseRebalancing { .. } => println!("⏸️  Rebalancing paused"),
                AgentAction::Maintain { range, band } => println!(
                    "✅ Maintain {range}: ${:.2} - ${:.2}",
                    band.lower_price.value, band.upper_price.value
                ),
                AgentAction::Hold => println!("No range rule, holding"),
            }

            match estimator.estimate_strategy(&snapshot, evaluator.definition())? {
                Some(breakdown) => {
                    println!("\n📊 Projection at {}", breakdown.range);
                    print_estimate(&breakdown.estimate);
                }
                None => println!("❌ Estimate unavailable."),
            }
        }
        Commands::Preset {
            preset,
            price,
            volatility_24h,
            json,
        } => {
            if *json {
                let definition = preset_definition(*preset, *price, *volatility_24h);
                println!("{}", serde_json::to_string_pretty(&definition)?);
            } else {
                println!("{preset}: {}", preset_text(*preset, *price, *volatility_24h));
            }
        }
        Commands::Check {
            tick,
            price,
            tick_lower,
            tick_upper,
            edge,
        } => {
            let current_tick = match (tick, price) {
                (Some(tick), _) => *tick,
                (None, Some(price)) => {
                    human_price_to_tick(*price, DEFAULT_TOKEN0_DECIMALS, DEFAULT_TOKEN1_DECIMALS)?
                }
                (None, None) => bail!("either --tick or --price is required"),
            };
            let health = check_position(current_tick, *tick_lower, *tick_upper, *edge)?;

            println!(
                "Tick {current_tick} in [{tick_lower}, {tick_upper}] (${:.2} - ${:.2})",
                tick_to_human_price(*tick_lower, DEFAULT_TOKEN0_DECIMALS, DEFAULT_TOKEN1_DECIMALS),
                tick_to_human_price(*tick_upper, DEFAULT_TOKEN0_DECIMALS, DEFAULT_TOKEN1_DECIMALS)
            );
            println!("Health: {health:?}");
            if health.needs_rebalance() {
                println!("⚠️  Rebalance recommended");
            }
        }
        Commands::Replay {
            history,
            range_percent,
            buffer,
        } => {
            let raw = fs::read_to_string(history)
                .with_context(|| format!("reading price history {}", history.display()))?;
            let points: Vec<PricePoint> = serde_json::from_str(&raw)?;
            let config = load_config(&cli)?;
            let range = RangeWidth::from_percent(*range_percent)?;

            let volatility = estimate_volatility(&points);
            let mut tracker =
                RangeTracker::new(range, *buffer, config.rebalance.gas_per_rebalance_usd);
            let summary = tracker.replay(&points);

            println!("🚀 Replayed {} observations at {range}", summary.observations);
            println!("════════════════════════════════════");
            println!("Realized vol:    {:.4}%", volatility.realized * 100.0);
            println!("Annualized vol:  {:.2}%", volatility.annualized * 100.0);
            println!("Time in range:   {:.1}%", summary.time_in_range * 100.0);
            println!("Rebalances:      {}", summary.rebalance_count);
            println!("Gas spent:       ${:.2}", summary.total_gas_usd);
            println!("════════════════════════════════════");
        }
    }

    Ok(())
}
