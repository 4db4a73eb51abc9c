/// Tailwalk - Demo Program Runner
use std::env;
use std::path::Path;
use std::process;

use smallvec::smallvec;
use tracing_subscriber::filter::LevelFilter;

use tailwalk::backend::grounded::BuiltinRegistry;
use tailwalk::backend::programs::{self, PROGRAMS};
use tailwalk::backend::{Args, Config, Runtime, Value};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_usage() {
    eprintln!("Tailwalk v{}", VERSION);
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    tailwalk [OPTIONS] <PROGRAM> [N] [M]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("    -h, --help            Print this help message");
    eprintln!("    -v, --version         Print version information");
    eprintln!("    -c, --config <FILE>   Load runtime configuration from FILE");
    eprintln!("    --no-tail             Build programs without tail annotation");
    eprintln!();
    eprintln!("PROGRAMS:");
    eprintln!("    {}", PROGRAMS.join(", "));
    eprintln!();
    eprintln!("EXAMPLES:");
    eprintln!("    tailwalk even 100000");
    eprintln!("    tailwalk --no-tail countdown 500");
    eprintln!("    tailwalk add 2 3");
}

fn print_version() {
    println!("Tailwalk {}", VERSION);
}

struct Options {
    program: String,
    inputs: Vec<i64>,
    config: Option<String>,
    no_tail: bool,
}

fn parse_args() -> Result<Options, String> {
    let args: Vec<String> = env::args().collect();

    let mut program = None;
    let mut inputs = Vec::new();
    let mut config = None;
    let mut no_tail = false;
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_usage();
                process::exit(0);
            }
            "-v" | "--version" => {
                print_version();
                process::exit(0);
            }
            "-c" | "--config" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing config file after --config".to_string());
                }
                config = Some(args[i].clone());
            }
            "--no-tail" => {
                no_tail = true;
            }
            arg if arg.starts_with('-') && arg.parse::<i64>().is_err() => {
                return Err(format!("Unknown option: {}", arg));
            }
            arg if program.is_none() => {
                program = Some(arg.to_string());
            }
            arg => {
                let n = arg
                    .parse::<i64>()
                    .map_err(|_| format!("Expected an integer argument, got '{}'", arg))?;
                inputs.push(n);
            }
        }
        i += 1;
    }

    let program = program.ok_or_else(|| "No program specified".to_string())?;
    Ok(Options {
        program,
        inputs,
        config,
        no_tail,
    })
}

fn load_config(options: &Options) -> Result<Config, String> {
    let mut config = match &options.config {
        Some(path) => Config::load(Path::new(path)).map_err(|e| e.to_string())?,
        None => Config::default(),
    };
    if options.no_tail {
        config.tail_calls = false;
    }
    Ok(config)
}

fn init_tracing(config: &Config) -> Result<(), String> {
    let level: LevelFilter = config
        .log_level
        .parse()
        .map_err(|_| format!("Invalid log level: {}", config.log_level))?;
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn run(options: Options) -> Result<Value, String> {
    let config = load_config(&options)?;
    init_tracing(&config)?;

    let registry = BuiltinRegistry::with_standard_ops();
    let target = programs::build(&options.program, &registry, config.tail_calls)
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("Unknown program: {}", options.program))?;

    let mut args: Args = options.inputs.iter().copied().map(Value::Int).collect();
    if args.is_empty() && target.arity() == 1 {
        args = smallvec![Value::Int(10)];
    }

    let runtime = Runtime::new(config);
    runtime.run(&target, args).map_err(|e| e.to_string())
}

fn main() {
    let options = match parse_args() {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            print_usage();
            process::exit(1);
        }
    };

    match run(options) {
        Ok(value) => println!("{}", value),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
