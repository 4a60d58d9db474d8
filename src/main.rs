//! CLI entry point for kaidan
//!
//! Play a dialogue set in the terminal, validate authored files, or list
//! the sets available under a directory.

use kaidan::repository::{DialogueRepository, FileSystemDialogueRepository};
use std::path::PathBuf;
use std::process;

#[tokio::main]
async fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "play" => {
            if args.len() < 3 {
                eprintln!("Error: Missing dialogue file path");
                eprintln!();
                print_usage();
                process::exit(1);
            }
            run_play(PathBuf::from(&args[2])).await;
        }
        "validate" => {
            if args.len() < 3 {
                eprintln!("Error: Missing dialogue file path");
                eprintln!();
                print_usage();
                process::exit(1);
            }
            run_validate(PathBuf::from(&args[2])).await;
        }
        "list" => {
            if args.len() < 3 {
                eprintln!("Error: Missing directory path");
                eprintln!();
                print_usage();
                process::exit(1);
            }
            run_list(PathBuf::from(&args[2])).await;
        }
        "--help" | "-h" => {
            print_usage();
        }
        other => {
            eprintln!("Error: Unknown command '{other}'");
            eprintln!();
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    println!("kaidan - branching dialogue engine");
    println!();
    println!("USAGE:");
    println!("    kaidan <COMMAND>");
    println!();
    println!("COMMANDS:");
    println!("    play <set.json>        Play a dialogue set in the terminal");
    println!("    validate <set.json>    Check a dialogue set's authoring invariants");
    println!("    list <dir>             List the dialogue sets under a directory");
    println!("    --help, -h             Show this help message");
    println!();
    println!("EXAMPLES:");
    println!("    kaidan play dialogue/stranger.json");
    println!("    kaidan validate dialogue/stranger.json");
    println!("    kaidan list dialogue/");
}

async fn load_set(path: &PathBuf) -> kaidan::DialogueSet {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) => {
            eprintln!("Error: Failed to read file '{}'", path.display());
            eprintln!("Reason: {err}");
            process::exit(1);
        }
    };

    match kaidan::storage::load(&bytes) {
        Ok(set) => set,
        Err(err) => {
            eprintln!("Error: '{}' is not a valid dialogue set", path.display());
            eprintln!("Reason: {err}");
            process::exit(1);
        }
    }
}

async fn run_play(path: PathBuf) {
    let set = load_set(&path).await;
    if let Err(err) = kaidan::cli::play::run_play(set) {
        eprintln!("Error: Player failed");
        eprintln!("Reason: {err}");
        process::exit(1);
    }
}

async fn run_validate(path: PathBuf) {
    let set = load_set(&path).await;
    let nodes: usize = set.trees.iter().map(|t| t.nodes.len()).sum();
    println!(
        "OK: '{}': {} tree(s), {} node(s), {} gate rule(s)",
        set.npc,
        set.trees.len(),
        nodes,
        set.gate.rules.len()
    );
}

async fn run_list(dir: PathBuf) {
    let repository = FileSystemDialogueRepository::new(dir);
    match repository.list().await {
        Ok(names) if names.is_empty() => println!("No dialogue sets found."),
        Ok(names) => {
            for name in names {
                println!("{name}");
            }
        }
        Err(err) => {
            eprintln!("Error: {err}");
            process::exit(1);
        }
    }
}
