#[macro_use]
extern crate log;

use std::convert::TryFrom;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Instant;

use ansi_term::{Colour, Style};
use clap::{App, Arg, ArgMatches};

use sokoban_backend::{
    print_collections_table, Collection, Command, Config, Direction, Event, Game, Position,
    SokobanError,
};

const HELP: &str = "\
u r d l    move (several at once, e.g. \"uurd\")
m X Y      walk to the cell in column X and row Y
z / y      undo / redo
x          restart the level
n / p      next / previous level
g N        go to level N
s          show the solution stored in the level file
play SEQ   play a sequence of moves
c          cancel autoplay
q          quit";

/// What the user typed.
enum Input {
    Commands(Vec<Command>),
    Help,
    Quit,
    Unknown(String),
}

fn parse_input(line: &str) -> Input {
    let line = line.trim();
    let mut words = line.split_whitespace();
    let first = match words.next() {
        Some(word) => word,
        None => return Input::Commands(vec![]),
    };

    let single = |cmd| Input::Commands(vec![cmd]);
    match first {
        "q" | "quit" => Input::Quit,
        "h" | "help" | "?" => Input::Help,
        "z" => single(Command::Undo),
        "y" => single(Command::Redo),
        "x" => single(Command::Restart),
        "n" => single(Command::NextLevel),
        "p" => single(Command::PreviousLevel),
        "s" => single(Command::ShowSolution),
        "c" => single(Command::CancelAutoplay),
        "play" => single(Command::Play(line[4..].trim().to_string())),
        "g" => match words.next().and_then(|n| n.parse::<usize>().ok()) {
            Some(n) if n > 0 => single(Command::GotoLevel(n - 1)),
            _ => Input::Unknown(line.into()),
        },
        "m" => {
            let coords: Vec<usize> = words.filter_map(|w| w.parse().ok()).collect();
            match coords.as_slice() {
                [x, y] => single(Command::MoveTo(Position::new(*x, *y))),
                _ => Input::Unknown(line.into()),
            }
        }
        _ => {
            let moves: Result<Vec<Command>, char> = line
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(|c| Direction::try_from(c).map(Command::Move))
                .collect();
            match moves {
                Ok(cmds) => Input::Commands(cmds),
                Err(_) => Input::Unknown(line.into()),
            }
        }
    }
}

fn render(game: &Game, colour: bool) -> String {
    let level = game.current_level();
    let mut result = format!(
        "Level {}/{}{}\n",
        game.rank(),
        game.collection().number_of_levels(),
        level.title().map(|t| format!(": {}", t)).unwrap_or_default()
    );

    let board = level.to_string();
    if colour {
        for c in board.chars() {
            let style = match c {
                '#' => Colour::Blue.normal(),
                '$' => Colour::Yellow.bold(),
                '*' => Colour::Green.bold(),
                '.' => Colour::Red.normal(),
                '@' | '+' => Colour::Cyan.bold(),
                _ => Style::default(),
            };
            result.push_str(&style.paint(c.to_string()).to_string());
        }
    } else {
        result.push_str(&board);
    }

    result.push_str(&format!(
        "\nmoves: {}  pushes: {}  {}",
        game.number_of_moves(),
        game.number_of_pushes(),
        game.lurd()
    ));
    result
}

/// Print whatever happened since the last call.
fn report(events: &Receiver<Event>, as_json: bool) -> Result<(), SokobanError> {
    for event in events.try_iter() {
        if as_json {
            println!("{}", serde_json::to_string(&event)?);
            continue;
        }
        match event {
            Event::LevelSolved {
                number_of_moves,
                more_levels,
                ..
            } => {
                println!("Solved in {} moves!", number_of_moves);
                if more_levels {
                    println!("Type \"n\" for the next level.");
                }
            }
            Event::EndOfCollection => println!("This is the last level."),
            Event::NothingToUndo => println!("Nothing to undo."),
            Event::NothingToRedo => println!("Nothing to redo."),
            Event::InvalidLevelIndex { index, count } => {
                println!("There is no level {}, only {} levels.", index + 1, count)
            }
            Event::UnparseableSequence { sequence } => println!("Cannot parse {:?}.", sequence),
            Event::NoPathFound { to, .. } => println!("Cannot reach {}.", to),
            Event::NoSolutionAvailable => println!("This level has no recorded solution."),
            _ => {}
        }
    }
    Ok(())
}

fn load_config(matches: &ArgMatches) -> Result<Config, SokobanError> {
    let mut config = match matches.value_of("config") {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if let Some(level) = matches.value_of("level") {
        config.start_level = level
            .parse()
            .ok()
            .filter(|&n| n > 0)
            .ok_or_else(|| SokobanError::Config(format!("invalid level number {}", level)))?;
    }
    if let Some(interval) = matches.value_of("interval") {
        config.autoplay_interval_ms = interval
            .parse()
            .map_err(|_| SokobanError::Config(format!("invalid interval {}", interval)))?;
    }
    if matches.is_present("no-colour") {
        config.colour = false;
    }
    Ok(config)
}

fn run(matches: &ArgMatches) -> Result<(), SokobanError> {
    if let Some(dir) = matches.value_of("list") {
        return print_collections_table(Path::new(dir));
    }

    let config = load_config(matches)?;
    let path = Path::new(matches.value_of("FILE").unwrap_or_default());
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("levels");
    let collection = Collection::parse(name, &fs::read_to_string(path)?);
    let colour = config.colour;
    let as_json = matches.is_present("events");

    let mut game = Game::new(collection, config)?;
    let (sender, events) = channel();
    game.subscribe(sender);

    // Read stdin on a separate thread so autoplay can be cancelled while it is running.
    let (line_sender, lines) = channel();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if line_sender.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    error!("Failed to read from stdin: {}", e);
                    break;
                }
            }
        }
    });

    report(&events, as_json)?;
    println!("{}", render(&game, colour));
    loop {
        if !game.is_autoplaying() {
            print!("> ");
            io::stdout().flush()?;
        }

        let line = match game.next_tick() {
            None => match lines.recv() {
                Ok(line) => Some(line),
                Err(_) => break,
            },
            Some(due) => {
                let timeout = due.saturating_duration_since(Instant::now());
                match lines.recv_timeout(timeout) {
                    Ok(line) => Some(line),
                    Err(RecvTimeoutError::Timeout) => None,
                    Err(RecvTimeoutError::Disconnected) => {
                        game.execute(&Command::CancelAutoplay);
                        None
                    }
                }
            }
        };

        if let Some(line) = line {
            match parse_input(&line) {
                Input::Quit => break,
                Input::Help => println!("{}", HELP),
                Input::Unknown(s) => println!("Unknown command {:?}, type \"h\" for help.", s),
                Input::Commands(cmds) => {
                    for cmd in &cmds {
                        game.execute(cmd);
                    }
                }
            }
        } else {
            game.tick(Instant::now());
        }

        report(&events, as_json)?;
        println!("\n{}", render(&game, colour));
    }

    Ok(())
}

fn main() {
    colog::init();

    let matches = App::new("sokoban")
        .author("Colin Benner <colin@yzhs.de>")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Play Sokoban levels in the terminal")
        .arg(
            Arg::new("FILE")
                .help("A file containing levels in the XSB format")
                .required_unless_present("list")
                .index(1),
        )
        .arg(
            Arg::new("list")
                .long("list")
                .value_name("DIR")
                .takes_value(true)
                .help("List the level collections found in a directory"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .takes_value(true)
                .help("Read settings from a JSON file"),
        )
        .arg(
            Arg::new("level")
                .short('l')
                .long("level")
                .value_name("N")
                .takes_value(true)
                .help("Start with the N-th level"),
        )
        .arg(
            Arg::new("interval")
                .long("interval")
                .value_name("MS")
                .takes_value(true)
                .help("Milliseconds between two moves during autoplay"),
        )
        .arg(
            Arg::new("events")
                .long("events")
                .help("Print events as JSON"),
        )
        .arg(
            Arg::new("no-colour")
                .long("no-colour")
                .help("Do not use colours"),
        )
        .get_matches();

    if let Err(e) = run(&matches) {
        error!("{}", e);
        std::process::exit(1);
    }
}
