mod commands;
mod measure;
mod place;
mod sample;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use commands::*;

use garland::algorithms::sampler::SamplingConfig;
use garland::geom::DEFAULT_LENGTH_TOLERANCE;
use garland::path::parser::parse_curves_with_tolerance;
use garland::path::Curve;

use std::fs::File;
use std::io::{self, stdout, Read};
use std::process;

fn main() {
    let matches = Command::new("Garland command-line interface")
        .version("0.1")
        .about("Places elements along curves")
        .subcommand_required(true)
        .arg(
            Arg::new("VERBOSE")
                .short('v')
                .long("verbose")
                .help("Logs more details (repeat for more)")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(
            input_args(Command::new("measure").about("Measures the length of the curves")).arg(
                Arg::new("AT")
                    .long("at")
                    .help("Prints the position and tangent at this distance")
                    .value_name("DISTANCE")
                    .value_parser(value_parser!(f64)),
            ),
        )
        .subcommand(
            sampling_args(input_args(
                Command::new("sample").about("Prints the placements along the curves"),
            ))
            .arg(
                Arg::new("COUNT")
                    .short('c')
                    .long("count")
                    .help("Prints the number of placements")
                    .action(ArgAction::SetTrue),
            ),
        )
        .subcommand(sampling_args(input_args(
            Command::new("place").about("Places copies of an element along the curves in an in-memory document"),
        )))
        .get_matches();

    init_logger(matches.get_count("VERBOSE"));

    if let Err(error) = run(&matches) {
        eprintln!("error: {}", error);
        process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<(), CliError> {
    match matches.subcommand() {
        Some(("measure", sub)) => measure::measure(MeasureCmd {
            curves: read_curves(sub)?,
            output: get_output(sub)?,
            at: sub.get_one::<f64>("AT").copied(),
        }),
        Some(("sample", sub)) => sample::sample(SampleCmd {
            curves: read_curves(sub)?,
            output: get_output(sub)?,
            sampling: get_sampling(sub),
            count: sub.get_flag("COUNT"),
        }),
        Some(("place", sub)) => place::place(PlaceCmd {
            curves: read_curves(sub)?,
            output: get_output(sub)?,
            sampling: get_sampling(sub),
        }),
        _ => Ok(()),
    }
}

fn input_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("PATH")
            .value_name("PATH")
            .help("An SVG path")
            .required(false),
    )
    .arg(
        Arg::new("INPUT")
            .help("Sets the input file to use")
            .short('i')
            .long("input")
            .value_name("FILE")
            .required(false),
    )
    .arg(
        Arg::new("OUTPUT")
            .help("Sets the output file to use")
            .value_name("FILE")
            .short('o')
            .long("output")
            .required(false),
    )
    .arg(
        Arg::new("TOLERANCE")
            .short('t')
            .long("tolerance")
            .help("Sets the relative tolerance of arc length measurements (1e-4 by default)")
            .value_name("TOLERANCE")
            .value_parser(value_parser!(f64)),
    )
}

fn sampling_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("SPACING")
            .short('s')
            .long("spacing")
            .help("Sets the gap between two copies (10 by default)")
            .value_name("SPACING")
            .value_parser(value_parser!(f64)),
    )
    .arg(
        Arg::new("WIDTH")
            .short('w')
            .long("width")
            .help("Sets the width of the element (0 by default)")
            .value_name("WIDTH")
            .value_parser(value_parser!(f64)),
    )
    .arg(
        Arg::new("ANGLE")
            .short('a')
            .long("angle")
            .help("Adds an angle in degrees to the rotation of each copy")
            .value_name("DEGREES")
            .value_parser(value_parser!(f64))
            .allow_negative_numbers(true),
    )
}

fn init_logger(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn read_curves(matches: &ArgMatches) -> Result<Vec<Curve>, CliError> {
    let mut input_buffer = matches
        .get_one::<String>("PATH")
        .cloned()
        .unwrap_or_default();

    if let Some(input_file) = matches.get_one::<String>("INPUT") {
        let mut file = File::open(input_file).map_err(|source| CliError::Input {
            path: input_file.into(),
            source,
        })?;
        file.read_to_string(&mut input_buffer)?;
    }

    if input_buffer.trim().is_empty() {
        return Err(CliError::NoInput);
    }

    let tolerance = matches
        .get_one::<f64>("TOLERANCE")
        .copied()
        .unwrap_or(DEFAULT_LENGTH_TOLERANCE);

    Ok(parse_curves_with_tolerance(&input_buffer, tolerance)?)
}

fn get_output(matches: &ArgMatches) -> Result<Box<dyn io::Write>, CliError> {
    if let Some(output_file) = matches.get_one::<String>("OUTPUT") {
        return Ok(Box::new(File::create(output_file)?));
    }

    Ok(Box::new(stdout()))
}

fn get_sampling(matches: &ArgMatches) -> SamplingConfig {
    let mut sampling = SamplingConfig::DEFAULT;
    if let Some(spacing) = matches.get_one::<f64>("SPACING") {
        sampling = sampling.with_spacing(*spacing);
    }
    if let Some(width) = matches.get_one::<f64>("WIDTH") {
        sampling = sampling.with_element_width(*width);
    }
    if let Some(angle) = matches.get_one::<f64>("ANGLE") {
        sampling = sampling.with_angle_offset(*angle);
    }

    sampling
}
