//! Line-mode prompt with a ticking clock and a background worker writing
//! through it.
//!
//! Type anything and press enter; `exit` quits.

use promptline::PromptBuilder;
use std::thread;
use std::time::{Duration, Instant};

fn main() {
    let started = Instant::now();

    let engine = PromptBuilder::new()
        .populate_prompt(move || format!("[{:>3}s] > ", started.elapsed().as_secs()))
        .line_handler(|prompt, line| {
            prompt.write_line(format!("you typed: {line}"))?;
            Ok(())
        })
        .quit_line("exit")
        .refresh_interval(Duration::from_millis(250))
        .build();

    let reporter = engine.handle();
    thread::spawn(move || {
        for pct in (0..=100).step_by(20) {
            thread::sleep(Duration::from_millis(900));
            let _ = reporter.write_line(format!("download: {pct}%"));
        }
    });

    engine.run().expect("prompt session failed");
    println!("bye");
}
