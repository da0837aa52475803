use std::{env, fs, process};

use loxrs::error::Diagnostic;
use loxrs::parser::Parser;
use loxrs::resolver::Resolver;
use loxrs::scanner::Scanner;
use loxrs::{exitcode, interpreter::Interpreter, Lox};

/// `loxrs` is invoked one of three ways:
///
/// - with no arguments, it starts an interactive prompt;
/// - with one argument, it runs that file as a Lox program;
/// - with two arguments where the first is `scan`, `parse`, or `run`, it runs only that much of
///   the pipeline over the second argument and prints the intermediate result, which is useful
///   for debugging the interpreter itself rather than the program being interpreted.
fn main() {
    let args: Vec<String> = env::args().collect();

    match args.len() {
        1 => Lox::new().run_prompt(),
        2 => Lox::new().run_file(args[1].clone()),
        3 => run_debug_command(&args[1], &args[2]),
        _ => {
            eprintln!("Usage: loxrs [script]");
            eprintln!("       loxrs {{scan|parse|run}} <script>");
            process::exit(exitcode::USAGE);
        },
    }
}

fn run_debug_command(command: &str, path: &str) {
    let source = fs::read_to_string(path).unwrap_or_else(|error| {
        eprintln!("Could not open file '{path}': {error}");
        process::exit(exitcode::NOINPUT);
    });

    match command {
        "scan" => scan(&source),
        "parse" => parse(&source),
        "run" => Lox::new().run_file(path.to_string()),
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!("Usage: loxrs {{scan|parse|run}} <script>");
            process::exit(exitcode::USAGE);
        },
    }
}

/// Scans the file and prints every token found, one per line, without parsing or running it.
fn scan(source: &str) {
    let (tokens, errors) = Scanner::new(source).scan_tokens();

    for token in &tokens {
        println!("{token}");
    }

    if !errors.is_empty() {
        errors.iter().for_each(|error| eprintln!("{}", error.render()));
        process::exit(exitcode::DATAERR);
    }
}

/// Scans, parses, and resolves the file and prints the resulting statements without running them.
fn parse(source: &str) {
    let (tokens, scan_errors) = Scanner::new(source).scan_tokens();
    if !scan_errors.is_empty() {
        scan_errors.iter().for_each(|error| eprintln!("{}", error.render()));
        process::exit(exitcode::DATAERR);
    }

    let (statements, parse_errors) = Parser::new(tokens).parse();
    if !parse_errors.is_empty() {
        parse_errors.iter().for_each(|error| eprintln!("{}", error.render()));
        process::exit(exitcode::DATAERR);
    }

    let mut interpreter = Interpreter::new();
    let resolve_errors = Resolver::new(&mut interpreter).resolve(&statements);
    if !resolve_errors.is_empty() {
        resolve_errors.iter().for_each(|error| eprintln!("{}", error.render()));
        process::exit(exitcode::DATAERR);
    }

    for statement in &statements {
        println!("{statement:#?}");
    }
}
