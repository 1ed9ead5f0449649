//! Terminal chess with move and attack highlighting.
//!
//! Usage: cargo run --release -- [--plain] [--enforce-turns] [--script commands.txt]
//!
//! Commands are read line by line from stdin, or from the script file when one is given.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use log::warn;

use chess_rules::command::{Command, HELP};
use chess_rules::config::GameConfig;
use chess_rules::error::ChessResult;
use chess_rules::game::{Game, Selection};
use chess_rules::render::{draw_to_terminal, RenderStyle};
use chess_rules::types::Rule;

#[derive(Parser, Debug)]
#[command(name = "chess_rules")]
#[command(about = "Play chess in the terminal with legal move highlighting")]
struct Args {
    /// Read commands from this file instead of stdin
    #[arg(long)]
    script: Option<PathBuf>,

    /// Draw highlights with brackets instead of terminal colors
    #[arg(long)]
    plain: bool,

    /// Only let the side to move select its pieces
    #[arg(long)]
    enforce_turns: bool,

    /// Captured points that end the game
    #[arg(long, default_value_t = 900)]
    win_threshold: u32,

    /// Log debug output to stderr
    #[arg(short, long)]
    debug: bool,
}

fn init_logging(debug: bool) {
    let log_level = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .format(|buf, record| writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args()))
    .target(env_logger::Target::Stderr)
    .init();
}

fn print_welcome() {
    println!("\nWelcome to Chess!\n");
    println!("{HELP}\n");
}

fn capitalized(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Run one command. Returns whether the board should be redrawn.
fn execute(game: &mut Game, command: Command) -> ChessResult<bool> {
    match command {
        Command::Select(pos) => match game.select(pos)? {
            Selection::Nothing => {
                println!("There is no piece at that position.");
                Ok(true)
            }
            Selection::Piece { moves, attacks } => {
                if moves.is_empty() && attacks.is_empty() {
                    println!("That piece has no legal moves.");
                }
                Ok(true)
            }
        },
        Command::Move(pos) => {
            let m = game.move_selected(pos)?;
            println!("{}", m.to_human());
            let opponent = m.color.other_color();
            if let Ok(true) = game.in_check(opponent) {
                println!("{} is in check.", capitalized(opponent.to_human()));
            }
            Ok(true)
        }
        Command::Adjust(adjustment) => {
            game.adjust(adjustment)?;
            Ok(true)
        }
        Command::Castle => game.request(Rule::Castling).map(|_| true),
        Command::Show => Ok(true),
        Command::History => {
            println!("{}", game.transcript());
            Ok(false)
        }
        Command::Help => {
            println!("{HELP}");
            Ok(false)
        }
        Command::Exit => Ok(false),
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    init_logging(args.debug);

    let config = GameConfig {
        enforce_turns: args.enforce_turns,
        win_threshold: args.win_threshold,
        style: if args.plain {
            RenderStyle::Plain
        } else {
            RenderStyle::Ansi
        },
    };

    let input: Box<dyn BufRead> = match &args.script {
        Some(path) => Box::new(BufReader::new(
            File::open(path)
                .wrap_err_with(|| format!("{} could not be located", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let mut game = Game::new(config);
    print_welcome();
    draw_to_terminal(game.board(), config.style);

    for line in input.lines() {
        let line = line.wrap_err("failed to read command")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let command = match Command::parse(line) {
            Ok(Command::Exit) => break,
            Ok(command) => command,
            Err(e) => {
                warn!("could not parse `{line}`: {e}");
                println!("{e}. Type \"help\" for the list of commands.");
                continue;
            }
        };

        match execute(&mut game, command) {
            Ok(true) => draw_to_terminal(game.board(), config.style),
            Ok(false) => {}
            Err(e) => println!("{}.", capitalized(&e.to_string())),
        }

        if game.is_over() {
            break;
        }
    }

    match game.winner().or(game.leader()) {
        Some(color) => println!("{} wins!", capitalized(color.to_human())),
        None => println!("Exiting..."),
    }
    Ok(())
}
