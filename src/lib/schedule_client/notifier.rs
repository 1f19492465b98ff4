use std::io::{self, BufRead, Write};

use log::warn;

/// A trait, necessary for every entity that shows a failure and waits until the user
/// acknowledges it.
pub trait Notifier {
    fn alert(&mut self, message: &str);
}

/// Prints to stderr and blocks until Enter is pressed.
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn alert(&mut self, message: &str) {
        eprintln!("⚠ {}", message);
        eprint!("Нажмите Enter, чтобы продолжить…");
        if let Err(err) = io::stderr().flush() {
            warn!("Cannot flush stderr: {}", err);
        }
        let mut ack = String::new();
        match io::stdin().lock().read_line(&mut ack) {
            Ok(0) => warn!("Stdin closed, alert not acknowledged"),
            Ok(_) => {}
            Err(err) => warn!("Cannot read acknowledgement: {}", err),
        }
    }
}
