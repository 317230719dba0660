use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use lingocard_lib::review::{Grade, ReviewState, Side};

use crate::app::App;
use crate::render::terminal::{self, Color};

enum Input {
    Flip,
    Grade(Grade),
    Again,
    Quit,
    Unknown,
}

fn read_input(lines: &mut impl Iterator<Item = io::Result<String>>) -> Result<Input> {
    print!("> ");
    io::stdout().flush()?;

    let Some(line) = lines.next() else {
        return Ok(Input::Quit);
    };
    let input = match line?.trim().to_lowercase().as_str() {
        "" => Input::Flip,
        "a" => Input::Grade(Grade::Again),
        "m" => Input::Grade(Grade::Mastered),
        "r" => Input::Again,
        "q" => Input::Quit,
        _ => Input::Unknown,
    };
    Ok(input)
}

pub fn run(app: &mut App, deck_name: &str, seed: Option<u64>, use_color: bool) -> Result<()> {
    let deck = app.find_deck(deck_name)?;
    app.state
        .start_review(&deck.id, seed.map(StdRng::seed_from_u64))
        .context("Failed to start review")?;

    println!("{}", terminal::paint(&format!("Reviewing {}", deck.name), Color::BOLD, use_color));

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let Some(session) = app.state.review() else {
            break;
        };
        let state = session.state();
        let progress = session.progress();
        let card = session.current_card().cloned();

        match (state, card) {
            (ReviewState::Empty, _) => {
                println!("This deck has no cards yet.");
                break;
            }
            (ReviewState::Complete, _) => {
                println!(
                    "\n{} {}/{}",
                    terminal::paint("Review complete!", Color::GREEN, use_color),
                    progress.current,
                    progress.total
                );
                println!("{}", terminal::paint("[r] review again  [q] quit", Color::DIM, use_color));
                match read_input(&mut lines)? {
                    Input::Again => app.state.review_again()?,
                    _ => break,
                }
            }
            (ReviewState::Active { side }, Some(card)) => {
                println!(
                    "\n{}",
                    terminal::paint(
                        &format!("Card {}/{}", progress.current + 1, progress.total),
                        Color::GRAY,
                        use_color
                    )
                );

                let hint = match side {
                    Side::Front => {
                        println!("{}", terminal::render_heading(&card, use_color));
                        "[Enter] flip  [q] quit"
                    }
                    Side::Back => {
                        println!("{}", terminal::render_card_back(&card, use_color));
                        "[a] again  [m] mastered  [Enter] flip  [q] quit"
                    }
                };
                println!("{}", terminal::paint(hint, Color::DIM, use_color));

                match read_input(&mut lines)? {
                    Input::Flip => {
                        app.state.flip_review()?;
                    }
                    Input::Grade(grade) if side == Side::Back => {
                        let outcome = app.state.grade_review(grade)?;
                        println!(
                            "{} {}",
                            card.term,
                            terminal::paint(&outcome.status.to_string(), terminal::status_color(outcome.status), use_color)
                        );
                    }
                    Input::Grade(_) => println!("Flip the card before grading it."),
                    Input::Quit => break,
                    Input::Again | Input::Unknown => {}
                }
            }
            (ReviewState::Active { .. }, None) => break,
        }
    }

    app.state.end_review();
    Ok(())
}
