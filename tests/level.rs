use std::convert::TryFrom;
use std::sync::mpsc::{channel, Receiver};
use std::time::{Duration, Instant};

use sokoban_backend::*;

const ORIGINAL_LEVEL_1: &str = r#"
Title: Original 1
    #####
    #   #
    #$  #
  ###  $##
  #  $ $ #
### # ## #   ######
#   # ## #####  ..#
# $  $          ..#
##### ### #@##  ..#
    #     #########
    #######
"#;

const SOLUTION: &str = "ullluuuLUllDlldddrRRRRRRRRRRRRurD\
                        llllllllllllllulldRRRRRRRRRRRRRRR\
                        lllllllluuululldDDuulldddrRRRRRRRRRRRdrUluR\
                        lldlllllluuulLulDDDuulldddrRRRRRRRRRRRurD\
                        lllllllluuulluuulDDDDDuulldddrRRRRRRRRRRR\
                        llllllluuulluuurDDllddddrrruuuLLulDDDuulldddrRRRRRRRRRRdrUluR";

fn setup_game(content: &str) -> (Game, Receiver<Event>) {
    let collection = Collection::parse("test", content);
    let mut game = Game::new(collection, Config::default()).unwrap();
    let (sender, receiver) = channel();
    game.subscribe(sender);
    (game, receiver)
}

fn contains_error(receiver: &Receiver<Event>) -> bool {
    receiver.try_iter().any(|event| event.is_error())
}

fn execute_moves(game: &mut Game, receiver: &Receiver<Event>, moves: &str) {
    for (i, c) in moves.chars().enumerate() {
        let dir = Direction::try_from(c).unwrap();
        game.execute(&Command::Move(dir));
        assert!(
            !contains_error(receiver),
            "Move #{} failed:\n{}\n",
            i,
            game.current_level()
        );
    }
}

#[test]
fn test_simple_moves() {
    let lvl = Level::parse(ORIGINAL_LEVEL_1).unwrap();
    assert_eq!(lvl.rows(), 11);
    assert_eq!(lvl.columns(), 19);
    assert_eq!(lvl.title(), Some("Original 1"));
    assert_eq!(lvl.worker_position(), Some(Position::new(11, 8)));
    assert_eq!(lvl.crate_positions().len(), 6);

    let (mut game, receiver) = setup_game(ORIGINAL_LEVEL_1);
    execute_moves(&mut game, &receiver, SOLUTION);

    assert_eq!(game.phase(), Phase::Solved, "\n{}\n", game.current_level());
    assert!(game.current_level().is_solved());
    // Pushes are recorded exactly where the solution has upper case letters.
    assert_eq!(game.lurd(), SOLUTION);
    assert_eq!(game.number_of_moves(), SOLUTION.len());
    assert_eq!(
        game.number_of_pushes(),
        SOLUTION.chars().filter(char::is_ascii_uppercase).count()
    );
}

#[test]
fn test_path_finding() {
    let (mut game, receiver) = setup_game(ORIGINAL_LEVEL_1);
    execute_moves(
        &mut game,
        &receiver,
        "ullluuuLUllDlldddrRRRRRRRRRRRRurD\
         llllllllllllllulldRRRRRRRRRRRRRRR",
    );

    let pos = Position::new(5, 4);
    let path = game
        .current_level()
        .shortest_path(game.worker_position(), pos)
        .unwrap();
    game.execute(&Command::MoveTo(pos));
    assert!(!contains_error(&receiver));
    assert_eq!(game.worker_position(), pos);
    let moves = game.moves();
    let walked: Vec<Move> = path.iter().map(|&dir| Move::new(dir, false)).collect();
    assert_eq!(&moves[moves.len() - path.len()..], walked.as_slice());
    assert_eq!(directions_to_string(&path), "LLLLLLLLUUULULLD");

    execute_moves(&mut game, &receiver, "DDuulldddr");
}

#[test]
fn undo_everything() {
    let (mut game, receiver) = setup_game(ORIGINAL_LEVEL_1);
    let initial = game.current_level().clone();
    execute_moves(&mut game, &receiver, &SOLUTION[..80]);

    for _ in 0..80 {
        game.execute(&Command::Undo);
    }
    assert_eq!(game.current_level(), &initial);
    assert_eq!(game.worker_position(), Position::new(11, 8));
    assert_eq!(game.phase(), Phase::Loaded);

    // Redo everything and finish the level.
    for _ in 0..80 {
        game.execute(&Command::Redo);
    }
    assert!(!contains_error(&receiver));
    execute_moves(&mut game, &receiver, &SOLUTION[80..]);
    assert_eq!(game.phase(), Phase::Solved);
}

#[test]
fn autoplay_solution() {
    let content = ORIGINAL_LEVEL_1.replace("Title: Original 1", &format!("Solution: {}", SOLUTION));
    let (mut game, receiver) = setup_game(&content);

    game.execute(&Command::ShowSolution);
    let mut now = Instant::now();
    while game.tick(now) {
        now += Duration::from_millis(150);
    }

    let events: Vec<Event> = receiver.try_iter().collect();
    assert!(events.contains(&Event::LevelSolved {
        moves: SOLUTION.to_ascii_uppercase(),
        number_of_moves: SOLUTION.len(),
        more_levels: false,
        autoplayed: true,
    }));
    assert_eq!(game.lurd(), SOLUTION);
}

#[test]
fn collection_with_several_levels() {
    let content = "; Two levels with Windows line endings\r\n\
                   \r\n\
                   Title: First\r\n\
                   Author: Someone\r\n\
                   #####\r\n\
                   #@$.#\r\n\
                   #####\r\n\
                   \r\n\
                   This line is ignored\r\n\
                   #######\r\n\
                   #@ $ .#\r\n\
                   #######\r\n";
    let (mut game, receiver) = setup_game(content);
    assert_eq!(game.collection().number_of_levels(), 2);
    assert_eq!(game.current_level().author(), Some("Someone"));

    game.execute(&Command::Move(Direction::Right));
    assert_eq!(game.phase(), Phase::Solved);
    game.execute(&Command::NextLevel);
    assert_eq!(game.current_level().title(), None);

    // Walk to x = 2, then push twice.
    game.execute(&Command::Play("2-1r2".into()));
    let mut now = Instant::now();
    while game.tick(now) {
        now += Duration::from_secs(1);
    }
    assert_eq!(game.phase(), Phase::Solved);

    let events: Vec<Event> = receiver.try_iter().collect();
    assert!(events.contains(&Event::LevelLoaded {
        index: 1,
        columns: 7,
        rows: 3,
        title: None,
        author: None,
    }));
    assert!(events.contains(&Event::LevelSolved {
        moves: "RRR".into(),
        number_of_moves: 3,
        more_levels: false,
        autoplayed: true,
    }));
}
