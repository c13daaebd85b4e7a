use biodivine_algo_bn_dynamics::attractor::AttractorTable;
use biodivine_algo_bn_dynamics::dynamics::{AsyncSchedule, UpdateScheme};
use biodivine_algo_bn_dynamics::error::DynamicsError;
use biodivine_algo_bn_dynamics::model::Network;
use biodivine_algo_bn_dynamics::search::{
    SearchConfig, exponential_configs, find_attractors_bruteforce, find_attractors_parallel,
};
use biodivine_algo_bn_dynamics::statistics::{aggregate_nodes_in_configs, constants};
use biodivine_lib_param_bn::BooleanNetwork;
use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;

#[derive(Parser)]
#[command(name = "biodivine_bruteforce")]
#[command(about = "Find attractors of a Boolean network by explicit simulation")]
struct Args {
    /// Path to a Boolean network file (.aeon, .bnet, etc.)
    #[arg(value_name = "FILE")]
    file: String,

    /// Pinned s-units, e.g. `--pin=a-1,b-0`
    #[arg(long, value_delimiter = ',', require_equals = true)]
    pin: Vec<String>,

    /// Free variables (default: every variable that is not pinned)
    #[arg(long, value_delimiter = ',', require_equals = true)]
    free: Vec<String>,

    /// Maximal number of macro-steps per seed
    #[arg(long, default_value_t = 10, require_equals = true)]
    time_limit: usize,

    /// Update scheme
    #[arg(long, default_value = "synchronous", require_equals = true)]
    update: Update,

    /// Sample a new asynchronous order in every macro-step
    #[arg(long)]
    regenerate: bool,

    /// Sample asynchronous orders with replacement
    #[arg(long)]
    replacement: bool,

    /// Keep simulating after a macro-step without change
    #[arg(long)]
    no_break_early: bool,

    /// Classify every run by its final snapshot
    #[arg(long)]
    return_last: bool,

    /// Seed of the random generators
    #[arg(long, default_value_t = 0, require_equals = true)]
    seed: u64,

    /// Simulate seeds in parallel
    #[arg(long)]
    parallel: bool,

    /// Inline constant variables before analysis (changes the variable set)
    #[arg(long)]
    inline_constants: bool,

    /// Logging verbosity (use -v for info, or -v=LEVEL for a specific level)
    #[arg(long, short = 'v', value_name = "LEVEL", num_args = 0..=1, default_missing_value = "info", require_equals = true)]
    verbose: Option<Option<LogLevel>>,
}

#[derive(Clone, clap::ValueEnum)]
enum Update {
    Synchronous,
    Asynchronous,
    Stochastic,
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
}

impl From<LogLevel> for LevelFilter {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
        }
    }
}

impl Args {
    fn scheme(&self) -> UpdateScheme {
        let schedule = AsyncSchedule::new()
            .regenerate(self.regenerate)
            .replacement(self.replacement);
        match self.update {
            Update::Synchronous => UpdateScheme::Synchronous,
            Update::Asynchronous => UpdateScheme::Asynchronous(schedule),
            Update::Stochastic => UpdateScheme::StochasticAsynchronous(schedule.regenerate(true)),
        }
    }
}

fn search(args: &Args, network: Network) -> Result<(SearchConfig, AttractorTable), DynamicsError> {
    let config = SearchConfig::from(network)
        .with_pinned_names(args.pin.iter().map(|it| it.as_str()))?
        .with_time_limit(args.time_limit)
        .with_scheme(args.scheme())
        .with_break_early(!args.no_break_early)
        .with_return_last(args.return_last)
        .with_rng_seed(args.seed);

    let free = args
        .free
        .iter()
        .map(|it| config.network.resolve(it))
        .collect::<Result<Vec<_>, _>>()?;
    let free = (!free.is_empty()).then_some(free.as_slice());

    let table = if args.parallel {
        let seeds = exponential_configs(&config.units, &config.pinned, free)?;
        find_attractors_parallel(&config, seeds)?
    } else {
        find_attractors_bruteforce(&config, free)?
    };
    Ok((config, table))
}

fn main() {
    let args = Args::parse();

    let log_level = match args.verbose {
        None => LevelFilter::Off,
        Some(None) => LevelFilter::Info,
        Some(Some(ref level)) => level.clone().into(),
    };
    Builder::from_default_env().filter_level(log_level).init();

    let bn = BooleanNetwork::try_from_file(&args.file).unwrap_or_else(|e| {
        eprintln!("Failed to load BN file {}: {}", args.file, e);
        std::process::exit(1);
    });
    println!("Loaded BN with {} variables.", bn.num_vars());

    let bn = if args.inline_constants {
        let bn = bn.inline_constants(true, true);
        println!(
            "After constant propagation, BN has {} variables.",
            bn.num_vars()
        );
        bn
    } else {
        bn
    };

    let network = Network::try_from(&bn).unwrap_or_else(|e| {
        eprintln!("Failed to tabulate update functions: {}", e);
        std::process::exit(1);
    });

    let (config, table) = search(&args, network).unwrap_or_else(|e| {
        eprintln!("Search failed: {}", e);
        std::process::exit(1);
    });

    for line in table.format(&config.units) {
        println!("{}", line);
    }
    println!(
        "Found {} attractors from {} seeds (max. convergence time: {:?}).",
        table.len(),
        table.total_count(),
        table.max_convergence_time()
    );
    if table.unconverged() > 0 {
        println!(
            "{} runs did not converge within {} steps.",
            table.unconverged(),
            config.time_limit
        );
    }
    for failure in table.failures() {
        eprintln!("Seed failed: {}", failure.error);
    }

    match aggregate_nodes_in_configs(&table, &config.units) {
        Ok(probabilities) => {
            for (node, probability) in &probabilities {
                let name = config.units.variable_name(*node);
                println!("P({} = 1) = {:.4}", name, probability);
            }
            let frozen = constants(&probabilities)
                .into_iter()
                .map(|it| config.units.name(it))
                .collect::<Vec<_>>();
            println!("Constants: {{{}}}", frozen.join(", "));
        }
        Err(e) => eprintln!("Cannot aggregate marginals: {}", e),
    }
}
