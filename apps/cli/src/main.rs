#![deny(warnings)]

//! Terminal front end for Patrimoine.
//!
//! All rules live in `game-engine`; this binary renders engine output,
//! serializes player input into engine calls, and owns the score store.

use anyhow::{Context, Result};
use game_core::{AnswerKey, Choice, GameConfig, Gauges};
use game_engine::{CardView, ChoiceOutcome, GameEngine, Phase, QuizOutcome, QuizReport, QuizView};
use persistence::{default_score_path, load_cards, load_questions, ScoreStore};
use rand_chacha::ChaCha8Rng;
use std::io::{self, Write};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

type Engine = GameEngine<ChaCha8Rng>;

struct Args {
    cards: String,
    quiz: String,
    scores: String,
    seed: u64,
}

fn parse_args() -> Args {
    let mut args = Args {
        cards: "cards.json".to_string(),
        quiz: "quiz.json".to_string(),
        scores: default_score_path().to_string(),
        // Wall-clock nanos unless the player pins a seed for a replayable run.
        seed: SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42),
    };
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--cards" => {
                if let Some(v) = it.next() {
                    args.cards = v;
                }
            }
            "--quiz" => {
                if let Some(v) = it.next() {
                    args.quiz = v;
                }
            }
            "--scores" => {
                if let Some(v) = it.next() {
                    args.scores = v;
                }
            }
            "--seed" => {
                if let Some(v) = it.next().and_then(|s| s.parse().ok()) {
                    args.seed = v;
                }
            }
            _ => {}
        }
    }
    args
}

fn main() -> Result<()> {
    // Gameplay shares stdout with the logs, so default to warnings only.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = parse_args();
    info!(git_sha = env!("GIT_SHA"), seed = args.seed, "starting patrimoine");

    let cards = load_cards(&args.cards)
        .with_context(|| format!("cannot load scenario cards from {}", args.cards))?;
    let questions = load_questions(&args.quiz)
        .with_context(|| format!("cannot load quiz questions from {}", args.quiz))?;
    let config = GameConfig {
        quiz_length: 10,
        rng_seed: args.seed,
    };
    let mut engine =
        GameEngine::from_seed(cards, questions, config).context("content catalogs are invalid")?;
    let store = ScoreStore::new(&args.scores);

    println!("Patrimoine - a personal finance game");
    loop {
        println!();
        println!("Commands: play | scores | quit");
        let Some(line) = prompt("> ") else { break };
        match line.trim().to_lowercase().as_str() {
            "play" => play(&mut engine, &store)?,
            "scores" => print_scores(&store),
            "quit" | "exit" => break,
            "" => {}
            other => println!("Unknown command: {}", other),
        }
    }
    Ok(())
}

/// One full run, from the first card to defeat or a menu return.
fn play(engine: &mut Engine, store: &ScoreStore) -> Result<()> {
    let view = engine.start_run()?;
    print_card(&view);
    loop {
        let Some(line) = prompt("> ") else {
            engine.return_to_menu();
            return Ok(());
        };
        let cmd = line.trim().to_lowercase();
        if cmd == "menu" || cmd == "quit" {
            engine.return_to_menu();
            return Ok(());
        }
        match engine.phase() {
            Phase::AwaitingChoice => {
                if let Ok(choice) = cmd.parse::<Choice>() {
                    match engine.apply_choice(choice)? {
                        ChoiceOutcome::Continue { gauges } => {
                            print_gauges(&gauges);
                            println!("Type next (or press enter) to draw the next card.");
                        }
                        ChoiceOutcome::QuizStarted {
                            gauges,
                            first_question,
                        } => {
                            print_gauges(&gauges);
                            println!();
                            println!("Oh no! One of your gauges has dropped to zero.");
                            println!("Pass the quiz to pick the run back up where you left it.");
                            print_quiz_question(&first_question);
                        }
                        ChoiceOutcome::Defeat { gauges, score } => {
                            print_gauges(&gauges);
                            println!("A gauge has dropped to zero again. The run is over.");
                            finish_run(engine, store, score);
                            engine.return_to_menu();
                            return Ok(());
                        }
                    }
                } else {
                    match cmd.as_str() {
                        "hint" | "i" => {
                            if let Some(card) = engine.current_card() {
                                println!("Advisor hint: {}", card.hint);
                            }
                        }
                        "log" => print_log(engine),
                        "" => {}
                        _ => println!("Commands: a | b | hint | log | menu"),
                    }
                }
            }
            Phase::CardResolved => match cmd.as_str() {
                "next" | "" => {
                    let view = engine.advance_to_next_card()?;
                    print_card(&view);
                }
                "log" => print_log(engine),
                _ => println!("Commands: next | log | menu"),
            },
            Phase::Quiz => match cmd.parse::<AnswerKey>() {
                Ok(answer) => match engine.submit_quiz_answer(answer)? {
                    QuizOutcome::NextQuestion(question) => print_quiz_question(&question),
                    QuizOutcome::Passed { resumed } => {
                        println!("Well done, every answer was correct! Back to the game.");
                        print_card(&resumed);
                    }
                    QuizOutcome::Failed { report, score } => {
                        print_corrections(&report);
                        println!("The quiz was not passed. The run is over.");
                        finish_run(engine, store, score);
                        engine.return_to_menu();
                        return Ok(());
                    }
                },
                // Blank or unparseable input never reaches the engine.
                Err(()) => println!("Please answer A, B, C or D."),
            },
            Phase::Menu | Phase::Ended => {
                engine.return_to_menu();
                return Ok(());
            }
        }
    }
}

/// Announce the final score and offer to persist it.
fn finish_run(engine: &Engine, store: &ScoreStore, score: u32) {
    println!("Final score: {} decision(s).", score);
    if score == 0 {
        return;
    }
    let Some(line) = prompt("Save your score? Enter a name (leave empty to skip): ") else {
        return;
    };
    let name = line.trim();
    if name.is_empty() {
        return;
    }
    if let Some(record) = engine.score_record(name) {
        match store.append(&record) {
            Ok(()) => println!("Score saved."),
            // The run's outcome stands even when the save fails.
            Err(e) => warn!(error = %e, "failed to persist score"),
        }
    }
}

fn prompt(msg: &str) -> Option<String> {
    print!("{}", msg);
    let _ = io::stdout().flush();
    let mut line = String::new();
    match io::stdin().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line),
    }
}

fn print_gauges(gauges: &Gauges) {
    println!(
        "Budget: {} | Happiness: {} | Savings: {}",
        gauges.budget, gauges.happiness, gauges.savings
    );
}

fn print_card(view: &CardView) {
    println!();
    print_gauges(&view.gauges);
    println!();
    println!("{}", view.question);
    println!("  (a) {}", view.option_a);
    println!("  (b) {}", view.option_b);
}

fn print_quiz_question(view: &QuizView) {
    println!();
    println!("Question {}/{}", view.number, view.total);
    println!("{}", view.question);
    for (key, text) in &view.options {
        println!("  {}: {}", key, text);
    }
}

fn print_corrections(report: &QuizReport) {
    println!();
    println!("Corrections:");
    for mistake in &report.mistakes {
        println!("Question {}: {}", mistake.index + 1, mistake.question);
        println!(
            "  Your answer: {} | Correct answer: {}",
            mistake.given, mistake.correct
        );
        println!("  {}", mistake.explanation);
    }
}

fn print_log(engine: &Engine) {
    if engine.decisions().is_empty() {
        println!("No decisions yet.");
        return;
    }
    for (i, decision) in engine.decisions().iter().enumerate() {
        println!("{}. {} -> {}", i + 1, decision.situation, decision.choice);
    }
}

fn print_scores(store: &ScoreStore) {
    match store.list() {
        Ok(records) if records.is_empty() => println!("No scores recorded yet."),
        Ok(records) => {
            println!("Best runs:");
            for (i, r) in records.iter().enumerate() {
                println!("{:>3}. {:<20} {:>5}  {}", i + 1, r.name, r.score, r.timestamp);
            }
        }
        Err(e) => {
            warn!(error = %e, "failed to read score log");
            println!("The score log is unavailable.");
        }
    }
}
