use rustyline::{error::ReadlineError, Editor};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error<E> {
    #[error(transparent)]
    Readline(ReadlineError),
    #[error("Eval failed: {0:?}")]
    EvalError(E),
}

pub trait Repl {
    type Error: std::fmt::Debug;
    const HISTORY: Option<&'static str> = None;
    fn evaluate(&mut self, input: String) -> Result<(), Self::Error>;
}

/// Line-oriented prompt loop. Every `\` on a line is remapped to `λ`
/// before the line is recorded or evaluated. Two empty lines in a row end
/// the session quietly, Ctrl-C/Ctrl-D ends it with a goodbye.
pub fn start_repl<R: Repl>(mut repl: R) -> Result<(), Error<R::Error>> {
    let mut editor = Editor::<()>::new();
    if let Some(history) = R::HISTORY {
        editor.load_history(history).ok();
    }
    let mut last_was_empty = false;
    loop {
        match editor.readline("λ> ") {
            Ok(line) if line.is_empty() => {
                if last_was_empty {
                    break Ok(());
                }
                last_was_empty = true;
            }
            Ok(line) => {
                last_was_empty = false;
                let input = line.replace('\\', "λ");
                editor.add_history_entry(input.as_str());
                repl.evaluate(input).map_err(Error::EvalError)?;
                if let Some(history) = R::HISTORY {
                    editor.save_history(history).map_err(Error::Readline)?;
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                println!("Bye!");
                break Ok(());
            }
            Err(e) => break Err(Error::Readline(e)),
        }
    }
}
