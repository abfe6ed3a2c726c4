#![forbid(unsafe_code)]

//! Terminal demo for the Decryptext animations.
//!
//! Shows a block of headline lines behind the scramble reveal, plus a
//! typewriter status line. The reveal waits for a keypress, standing in
//! for content scrolling into view.

use std::env;
use std::io::{self, Write};
use std::process;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{
    Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
};
use crossterm::{cursor, execute, queue};
use dtx_core::{LineSnapshot, RevealConfig, Sequence, TextLine, TypewriterConfig};
use dtx_engine::{RevealEngine, RevealEvent, TypewriterEngine};

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
Decryptext demo — scramble reveal and typewriter in the terminal

USAGE:
    dtx-demo [OPTIONS]

OPTIONS:
    --tick=MS        Milliseconds per reveal tick (default: 50)
    --loops=N        Stop after N full passes (default: loop forever)
    --help, -h       Show this help message
    --version, -V    Show version

KEYBINDINGS:
    Enter / Space   Trigger the reveal
    q / Ctrl+C      Quit

Set RUST_LOG (e.g. RUST_LOG=dtx_engine=debug) to see worker logs on
stderr after the demo exits.
";

struct Opts {
    tick: Duration,
    loops: Option<u32>,
}

fn parse_opts() -> Opts {
    let mut opts = Opts {
        tick: Duration::from_millis(50),
        loops: None,
    };

    for arg in env::args().skip(1) {
        if let Some(value) = arg.strip_prefix("--tick=") {
            match value.parse::<u64>() {
                Ok(ms) if ms > 0 => opts.tick = Duration::from_millis(ms),
                _ => die(&format!("invalid --tick value: {value}")),
            }
        } else if let Some(value) = arg.strip_prefix("--loops=") {
            match value.parse::<u32>() {
                Ok(n) => opts.loops = Some(n),
                Err(_) => die(&format!("invalid --loops value: {value}")),
            }
        } else {
            match arg.as_str() {
                "--help" | "-h" => {
                    print!("{HELP_TEXT}");
                    process::exit(0);
                }
                "--version" | "-V" => {
                    println!("dtx-demo {VERSION}");
                    process::exit(0);
                }
                other => die(&format!("unknown option: {other}")),
            }
        }
    }

    opts
}

fn die(msg: &str) -> ! {
    eprintln!("dtx-demo: {msg}\n\n{HELP_TEXT}");
    process::exit(2);
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let opts = parse_opts();
    if let Err(e) = run(&opts) {
        // Raw mode is already torn down by the time run() returns.
        eprintln!("dtx-demo: {e}");
        process::exit(1);
    }
}

fn run(opts: &Opts) -> io::Result<()> {
    let sequence = Sequence::from(vec![
        TextLine::new("DECRYPTEXT").tag("title"),
        TextLine::new("Scramble-reveal text animation").tag("subtitle"),
        TextLine::new("press q to quit").tag("hint"),
    ]);
    let mut config = RevealConfig::default().tick_interval(opts.tick);
    if let Some(loops) = opts.loops {
        config = config.max_loops(loops);
    }
    let reveal = RevealEngine::spawn(sequence, config)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;

    let typewriter = TypewriterEngine::spawn(
        ["building things", "breaking things", "fixing things"],
        TypewriterConfig::default(),
    );

    enable_raw_mode()?;
    let mut out = io::stdout();
    execute!(out, EnterAlternateScreen, cursor::Hide)?;

    let result = event_loop(&mut out, &reveal, &typewriter);

    execute!(out, cursor::Show, LeaveAlternateScreen)?;
    disable_raw_mode()?;

    reveal.stop();
    typewriter.stop();
    result
}

fn event_loop(
    out: &mut io::Stdout,
    reveal: &RevealEngine,
    typewriter: &TypewriterEngine,
) -> io::Result<()> {
    let mut lines: Vec<LineSnapshot> = Vec::new();
    let mut status = String::new();
    let mut triggered = false;

    draw(out, &lines, &status, triggered)?;

    loop {
        let mut dirty = false;

        for event in reveal.drain_events() {
            match event {
                RevealEvent::Started => {}
                RevealEvent::Frame {
                    lines: frame_lines, ..
                } => lines = frame_lines,
                RevealEvent::Finished { loops_completed } => {
                    tracing::info!(loops_completed, "reveal finished");
                }
            }
            dirty = true;
        }
        for event in typewriter.drain_events() {
            status = event.display;
            dirty = true;
        }

        if dirty {
            draw(out, &lines, &status, triggered)?;
        }

        if event::poll(Duration::from_millis(10))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(());
                    }
                    KeyCode::Enter | KeyCode::Char(' ') => {
                        reveal.reveal();
                        triggered = true;
                        draw(out, &lines, &status, triggered)?;
                    }
                    _ => {}
                }
            }
        }
    }
}

fn draw(
    out: &mut io::Stdout,
    lines: &[LineSnapshot],
    status: &str,
    triggered: bool,
) -> io::Result<()> {
    queue!(out, Clear(ClearType::All), cursor::MoveTo(2, 1))?;

    if lines.is_empty() {
        let prompt = if triggered {
            "..."
        } else {
            "press Enter to reveal"
        };
        queue!(out, Print(prompt))?;
    } else {
        for (row, line) in lines.iter().enumerate() {
            queue!(out, cursor::MoveTo(2, 1 + row as u16), Print(&line.display))?;
        }
    }

    queue!(
        out,
        cursor::MoveTo(2, 2 + lines.len() as u16),
        Print(format!("> {status}"))
    )?;
    out.flush()
}
