use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

static JSON_MODE: AtomicBool = AtomicBool::new(false);

pub fn init(json: bool) {
    JSON_MODE.store(json, Ordering::Relaxed);
}

pub fn is_json() -> bool {
    JSON_MODE.load(Ordering::Relaxed)
}

pub fn print<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    println!("{s}");
    Ok(())
}

/// A short labelled line for human output; suppressed in JSON mode.
pub fn human_line(label: &str, value: &str) {
    if is_json() {
        return;
    }
    let mut out = StandardStream::stdout(ColorChoice::Auto);
    let mut spec = ColorSpec::new();
    spec.set_fg(Some(Color::Cyan)).set_bold(true);
    let _ = out.set_color(&spec);
    let _ = write!(out, "{label:>12} ");
    let _ = out.reset();
    let _ = writeln!(out, "{value}");
}
