use regex_to_dfa::converter::{convert_batch, render, Response};
use regex_to_dfa::error_handling::Result;
use regex_to_dfa::parser::{BatchConfig, OutputFormat};

use clap::{Arg, ArgAction, Command};
use log::info;

fn main() {
    env_logger::init();
    match run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

// Returns whether every conversion succeeded.
fn run() -> Result<bool> {
    let matches = Command::new("regex-to-dfa")
        .version(regex_to_dfa::version())
        .about("Converts a regular expression into its NFA, DFA and minimized DFA")
        .arg(
            Arg::new("regex")
                .help("Expression over alphanumerics, `(`, `)`, `|` and `*`")
                .value_name("REGEX")
                .required_unless_present("batch")
                .conflicts_with("batch"),
        )
        .arg(
            Arg::new("batch")
                .long("batch")
                .short('b')
                .help("Path to a YAML file mapping names to expressions")
                .value_name("BATCH_FILE"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format")
                .value_parser(["json", "yaml"])
                .value_name("FORMAT"),
        )
        .arg(
            Arg::new("pretty")
                .long("pretty")
                .short('p')
                .help("Pretty-print JSON output")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let format_arg = match matches.get_one::<String>("format") {
        Some(name) => Some(OutputFormat::from_name(name)?),
        None => None,
    };
    let pretty_arg = matches.get_flag("pretty");

    if let Some(batch_path) = matches.get_one::<String>("batch") {
        let config = BatchConfig::parse_from_file(batch_path)?;
        info!(
            "Loaded {} expressions from {}",
            config.get_expressions().len(),
            batch_path
        );
        let format = format_arg.unwrap_or(config.get_output_format());
        let pretty = pretty_arg || config.is_pretty();
        let responses = convert_batch(&config);
        println!("{}", render(&responses, format, pretty)?);
        return Ok(responses.values().all(|r| r.is_success()));
    }

    let regex: &String = match matches.get_one("regex") {
        Some(regex) => regex,
        None => return Ok(false),
    };
    let response = Response::handle(regex);
    println!(
        "{}",
        render(&response, format_arg.unwrap_or_default(), pretty_arg)?
    );
    Ok(response.is_success())
}
