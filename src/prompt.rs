use std::io::{self, BufRead, Write};

/// Blocking yes/no question.
#[cfg_attr(test, mockall::automock)]
pub trait Prompter {
    /// Ask `prompt` and return the answer; an empty answer yields `default`.
    fn ask(&self, prompt: &str, default: bool) -> bool;
}

/// Prompter reading answers from standard input.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn ask(&self, prompt: &str, default: bool) -> bool {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut output = io::stdout();
        ask_with(&mut input, &mut output, prompt, default)
    }
}

/// Ask until a recognizable answer arrives. End of input counts as `default`.
pub fn ask_with<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str, default: bool) -> bool {
    loop {
        let _ = write!(output, "{}", prompt);
        let _ = output.flush();

        let mut line = String::new();
        match input.read_line(&mut line) {
            Ok(0) | Err(_) => return default,
            Ok(_) => {}
        }

        match parse_answer(&line) {
            Some(answer) => return answer,
            None if line.trim().is_empty() => return default,
            None => continue,
        }
    }
}

fn parse_answer(line: &str) -> Option<bool> {
    match line.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}
