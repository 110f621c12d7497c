use anyhow::{Context, Result};
use argh::FromArgs;
use parking_commands::Interpreter;
use parking_commands::lot::{Car, LotConfig, Messages};

#[derive(FromArgs)]
/// Fixed-capacity parking lot command interpreter.
///
/// Reads commands from standard input, one per line: `park <number> <color>`,
/// `leave <spotNumber>`, `exit`.
struct Args {
    /// number of spots in the lot.
    #[argh(option, default = "20")]
    capacity: usize,

    /// pre-occupied spot as NUMBER,COLOR; may be given multiple times.
    #[argh(option)]
    seed: Vec<String>,

    /// message printed when no free spot is left.
    #[argh(option)]
    full_message: Option<String>,

    /// read and execute a single command instead of looping.
    #[argh(switch)]
    once: bool,
}

fn main() -> Result<()> {
    let args: Args = argh::from_env();

    let mut messages = Messages::default();
    if let Some(text) = args.full_message {
        messages.lot_full = text;
    }

    let mut seed = Vec::new();
    for entry in &args.seed {
        let (number, color) = entry
            .split_once(',')
            .with_context(|| format!("--seed expects NUMBER,COLOR, got: {}", entry))?;
        seed.push(Car::new(number, color));
    }

    let mut interpreter = Interpreter::new(LotConfig {
        capacity: args.capacity,
        seed,
        messages,
    })?;

    if args.once {
        interpreter.run_once()
    } else {
        interpreter.repl()
    }
}
