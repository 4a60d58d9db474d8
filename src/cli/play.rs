//! Interactive console host
//!
//! One concrete presentation adapter: lines and choices print to stdout via
//! a notification subscriber, and stdin input is translated into player
//! events. The console has no typing animation, so every displayed line is
//! immediately confirmed as fully shown.

use crate::errors::SessionError;
use crate::session::DialogueManager;
use crate::types::event::PlayerEvent;
use crate::types::notify::Notification;
use crate::types::tree::DialogueSet;
use crate::host::NotificationSink;
use std::io::{self, Write};

/// Prints session notifications as they arrive.
struct ConsolePrinter;

impl NotificationSink for ConsolePrinter {
    fn notify(&self, notification: &Notification) {
        match notification {
            Notification::SessionStarted { npc, tree } => {
                println!("--- {npc} ({tree}) ---");
                println!();
            }
            Notification::LineDisplayed { text } => {
                println!("{text}");
                println!();
            }
            Notification::ChoicesAvailable { options } => {
                for (i, option) in options.iter().enumerate() {
                    println!("{}. {}", i + 1, option);
                }
            }
            Notification::SessionEnded => {
                println!();
                println!("== conversation over ==");
            }
        }
    }
}

/// Run one conversation in the terminal.
pub fn run_play(set: DialogueSet) -> anyhow::Result<()> {
    let mut manager = DialogueManager::new(set)?;
    manager.subscribe(Box::new(ConsolePrinter));

    println!("=== kaidan dialogue player ===");
    println!();
    println!("Controls:");
    println!("  Enter: continue");
    println!("  1-9:   select a choice");
    println!("  x:     walk away");
    println!();

    manager.begin()?;
    manager.handle(PlayerEvent::TextFullyShown)?;

    while manager.is_active() {
        let input = get_input("> ")?;

        let event = match input.as_str() {
            "x" | "q" => PlayerEvent::Cancel,
            "" => PlayerEvent::Continue,
            other => match other.parse::<usize>() {
                Ok(n) if n >= 1 => PlayerEvent::SelectOption(n - 1),
                _ => {
                    println!("Enter a choice number, press Enter, or 'x' to leave.");
                    continue;
                }
            },
        };

        match manager.handle(event) {
            Ok(()) => {}
            Err(SessionError::InvalidChoiceIndex { available, .. }) => {
                println!("Pick between 1 and {available}.");
                continue;
            }
            Err(err) => return Err(err.into()),
        }

        // No typing effect on the console; confirm the new line at once so
        // its choices come up.
        if manager.is_active()
            && !manager.view().map(|v| v.awaiting_choice).unwrap_or(false)
        {
            manager.handle(PlayerEvent::TextFullyShown)?;
        }
    }

    Ok(())
}

fn get_input(prompt: &str) -> io::Result<String> {
    if !prompt.is_empty() {
        print!("{prompt} ");
        io::stdout().flush()?;
    }

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}
