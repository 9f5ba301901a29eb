// src/prompt.rs

//! Interactive yes/no prompts.
//!
//! ```no_run
//! if !xjfx::prompt::get_yes("Continue?")? {
//!     std::process::exit(0);
//! }
//! # Ok::<(), std::io::Error>(())
//! ```

use std::io::{self, BufRead, Write};

/// Ask `prompt` on stdout and check the answer read from stdin against
/// `accept`.
///
/// With `lower` set, the comparison ignores case; otherwise it is exact.
pub fn get_answer(prompt: &str, accept: &[&str], lower: bool) -> io::Result<bool> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    get_answer_from(&mut stdin.lock(), &mut stdout.lock(), prompt, accept, lower)
}

/// `"{prompt} [Y|n]"`, where `yes`, `y` and an empty answer mean yes.
pub fn get_yes(prompt: &str) -> io::Result<bool> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    get_yes_from(&mut stdin.lock(), &mut stdout.lock(), prompt)
}

/// [`get_answer`] over an arbitrary reader/writer pair.
///
/// Only the line terminator is stripped from the answer. End of input counts
/// as an empty answer.
pub fn get_answer_from<R, W>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    accept: &[&str],
    lower: bool,
) -> io::Result<bool>
where
    R: BufRead,
    W: Write,
{
    write!(output, "{prompt} ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let answer = line.trim_end_matches(['\n', '\r']);

    let matched = accept.iter().any(|a| {
        if lower {
            a.to_lowercase() == answer.to_lowercase()
        } else {
            *a == answer
        }
    });
    Ok(matched)
}

/// [`get_yes`] over an arbitrary reader/writer pair.
pub fn get_yes_from<R, W>(input: &mut R, output: &mut W, prompt: &str) -> io::Result<bool>
where
    R: BufRead,
    W: Write,
{
    get_answer_from(input, output, &format!("{prompt} [Y|n]"), &["yes", "y", ""], true)
}
