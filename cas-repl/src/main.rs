mod error;

use cas_algebra::{d, simplify, Expr};
use cas_error::Error;
use cas_parser::parser::{ast, Parser};
use error::{report_to_stderr, InvalidCommand};
use rustyline::{error::ReadlineError, DefaultEditor};
use std::{fs::File, io::{self, BufReader, IsTerminal, Read}};
use tracing::{debug, info, Level};

/// What to do with a line of input.
enum Command {
    /// Simplify the expression.
    Simplify(Expr),

    /// Differentiate the expression with respect to the variable, then simplify.
    Diff(Expr, String),

    /// Approximate the value of the expression.
    Approx(Expr),
}

/// Recognizes the `diff(expr, x)` and `approx(expr)` commands at the top level of the input.
/// Anything else is an expression to simplify.
fn parse_command(input: &str) -> Result<Command, Error> {
    let ast = Parser::new(input).try_parse_full::<ast::Expr>()?;

    let ast::Expr::Call(call) = ast else {
        return Ok(Command::Simplify(Expr::try_from(ast)?));
    };

    let name = call.name.name.clone();
    match name.as_str() {
        "diff" => {
            let usage = "diff(<expression>, <variable>)";
            let invalid = || Error::new(call.outer_span().to_vec(), InvalidCommand { name: "diff", usage });
            let [expr, var]: [ast::Expr; 2] = call.args.clone().try_into().map_err(|_| invalid())?;
            let ast::Expr::Literal(ast::Literal::Symbol(var)) = var else {
                return Err(invalid());
            };
            Ok(Command::Diff(Expr::try_from(expr)?, var.name))
        },
        "approx" => {
            let usage = "approx(<expression>)";
            let invalid = || Error::new(call.outer_span().to_vec(), InvalidCommand { name: "approx", usage });
            let [expr]: [ast::Expr; 1] = call.args.clone().try_into().map_err(|_| invalid())?;
            Ok(Command::Approx(Expr::try_from(expr)?))
        },
        _ => Ok(Command::Simplify(Expr::try_from(ast::Expr::Call(call))?)),
    }
}

/// Runs a single line of input, printing the result or the error.
fn execute(input: &str) {
    let command = match parse_command(input) {
        Ok(command) => command,
        Err(err) => return report_to_stderr(&err, input),
    };

    match command {
        Command::Simplify(expr) => {
            debug!(%expr, "simplifying");
            println!("{}", simplify(&expr));
        },
        Command::Diff(expr, var) => {
            debug!(%expr, %var, "differentiating");
            println!("{}", d(&expr, &var));
        },
        Command::Approx(expr) => {
            debug!(%expr, "approximating");
            println!("{}", expr.approx());
        },
    }
}

/// Runs every non-empty line of the input.
fn execute_all(input: &str) {
    input.lines()
        .filter(|line| !line.trim().is_empty())
        .for_each(execute);
}

fn main() {
    // `RUST_LOG` holds a single level name, such as `debug`
    let level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|level| level.parse::<Level>().ok())
        .unwrap_or(Level::WARN);
    // logging is optional; the REPL runs without a subscriber if one is already installed
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .try_init()
        .ok();

    let mut args = std::env::args();
    args.next();

    if let Some(filename) = args.next() {
        // run source file
        let mut input = String::new();
        let read = File::open(&filename)
            .and_then(|file| BufReader::new(file).read_to_string(&mut input));
        if let Err(err) = read {
            eprintln!("could not read `{}`: {}", filename, err);
            std::process::exit(1);
        }

        execute_all(&input);
    } else if !io::stdin().is_terminal() {
        // read source from stdin
        let mut input = String::new();
        if let Err(err) = io::stdin().read_to_string(&mut input) {
            eprintln!("could not read stdin: {}", err);
            std::process::exit(1);
        }

        execute_all(&input);
    } else {
        // run the repl / interactive mode
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(err) => {
                eprintln!("could not start the line editor: {}", err);
                std::process::exit(1);
            },
        };
        info!("starting interactive mode");

        fn process_line(rl: &mut DefaultEditor) -> Result<(), ReadlineError> {
            let input = rl.readline("> ")?;
            if input.trim().is_empty() {
                return Ok(());
            }

            rl.add_history_entry(&input)?;

            execute(&input);
            Ok(())
        }

        loop {
            if let Err(err) = process_line(&mut rl) {
                match err {
                    ReadlineError::Eof | ReadlineError::Interrupted => (),
                    _ => eprintln!("{}", err),
                }
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn diff_command() {
        let Ok(Command::Diff(expr, var)) = parse_command("diff(x^2, x)") else {
            panic!("expected a diff command");
        };
        assert_eq!(var, "x");
        assert_eq!(d(&expr, &var).to_string(), "2 * x");
    }

    #[test]
    fn approx_command() {
        let Ok(Command::Approx(expr)) = parse_command("approx(1/4)") else {
            panic!("expected an approx command");
        };
        assert_eq!(expr.approx(), 0.25);
    }

    #[test]
    fn invalid_diff() {
        let Err(err) = parse_command("diff(x^2, 2)") else {
            panic!("expected an error");
        };
        assert_eq!(err.spans, vec![0..5, 11..12]);
    }

    #[test]
    fn other_calls_simplify() {
        let Ok(Command::Simplify(expr)) = parse_command("exp(0)") else {
            panic!("expected an expression");
        };
        assert_eq!(simplify(&expr), Expr::int(1));
    }
}
