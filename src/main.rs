use animal_game::*;
use log::info;
use std::io::{self, BufRead, Write};

const USAGE: &str = "Commands: <from> <to> (e.g. c1 c2), board, status, quit";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("Animal Game");
    println!("===========\n");
    println!("{}", USAGE);

    let mut game = Game::new();
    println!("\n{}", game.render());
    prompt(&game)?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        let words: Vec<&str> = line.split_whitespace().collect();

        match words.as_slice() {
            [] => {}
            ["quit"] | ["exit"] => break,
            ["board"] => println!("{}", game.render()),
            ["status"] => println!("{} (move {})", game.status(), game.move_count()),
            [from, to] => match game.try_move(from, to) {
                Ok(outcome) => {
                    if let Some(captured) = outcome.captured {
                        println!("{} takes {}", outcome.piece, captured);
                    }
                    println!("\n{}", game.render());
                    if let Some(winner) = outcome.status.winner() {
                        info!("game finished after {} moves", game.move_count());
                        println!("{} wins! ({})", winner, outcome.status);
                    }
                }
                Err(e) => println!("Rejected: {}", game.describe_error(&e)),
            },
            _ => println!("{}", USAGE),
        }

        prompt(&game)?;
    }

    Ok(())
}

fn prompt(game: &Game) -> io::Result<()> {
    if game.status().is_over() {
        print!("[{}] > ", game.status());
    } else {
        print!("[{} to move] > ", game.turn());
    }
    io::stdout().flush()
}
