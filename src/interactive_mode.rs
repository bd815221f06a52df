// interactive_mode.rs
use crate::responder::{InboundMessage, Responder};

use log::{error, info};
use std::io::{self, BufRead, Write};

/// Console stand-in for a chat connector: every stdin line is a message from
/// `session_id`. `:reload` re-reads the match config, `exit` quits.
pub fn run_interactive_mode(responder: Responder, session_id: String) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();

    loop {
        print!("\n[{}] > ", session_id);
        stdout.flush()?;

        let Some(line) = lines.next() else {
            info!("Console input closed");
            break;
        };
        let line = line?;
        let text = line.trim_end_matches(['\r', '\n']);

        if text.trim().eq_ignore_ascii_case("exit") {
            info!("User requested exit");
            break;
        }
        if text.trim() == ":reload" {
            let config = responder.config().reload();
            println!("config: {}", serde_json::to_string(&config).unwrap_or_default());
            continue;
        }

        let message = InboundMessage { text: text.to_string(), session_id: session_id.clone() };
        match responder.respond(&message) {
            Some(emission) => println!("{} -> {}", emission.matched_key, emission.path.display()),
            None => println!("(no card)"),
        }
    }

    Ok(())
}

pub fn spawn(responder: Responder, session_id: String) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        if let Err(e) = run_interactive_mode(responder, session_id) {
            error!("Error in interactive mode: {}", e);
        }
    })
}
