//! Interactive loop: read a line, dispatch the intent, render the result.
//!
//! Each intent runs its whole request chain before the next line is read.

use std::io::{self, BufRead, Write};

use todo_core::{SyncController, Transport};
use tracing::debug;

use crate::view::{render, Intent, HELP};

enum Flow {
    Continue { rerender: bool },
    Quit,
}

pub fn run<T, R, W>(controller: &mut SyncController<T>, input: R, mut out: W) -> io::Result<()>
where
    T: Transport,
    R: BufRead,
    W: Write,
{
    write!(out, "{}", render(controller.username(), controller.tasks()))?;
    prompt(&mut out)?;

    for line in input.lines() {
        let line = line?;
        let intent = match Intent::parse(&line, controller.has_user()) {
            Ok(Some(intent)) => intent,
            Ok(None) => {
                prompt(&mut out)?;
                continue;
            }
            Err(e) => {
                writeln!(out, "{e}")?;
                prompt(&mut out)?;
                continue;
            }
        };
        debug!(?intent, "dispatching");

        match dispatch(controller, intent, &mut out)? {
            Flow::Quit => return Ok(()),
            Flow::Continue { rerender } => {
                if rerender {
                    write!(out, "{}", render(controller.username(), controller.tasks()))?;
                }
                prompt(&mut out)?;
            }
        }
    }
    Ok(())
}

fn prompt<W: Write>(out: &mut W) -> io::Result<()> {
    write!(out, "> ")?;
    out.flush()
}

fn dispatch<T, W>(controller: &mut SyncController<T>, intent: Intent, out: &mut W) -> io::Result<Flow>
where
    T: Transport,
    W: Write,
{
    let ok = match intent {
        Intent::Quit => return Ok(Flow::Quit),
        Intent::Help => {
            writeln!(out, "{HELP}")?;
            return Ok(Flow::Continue { rerender: false });
        }
        Intent::Show => true,
        Intent::SubmitUsername(name) => controller.select_or_create_user(&name),
        Intent::AddTask(label) => {
            if !controller.has_user() {
                writeln!(out, "select a user first")?;
                return Ok(Flow::Continue { rerender: false });
            }
            controller.add_task(&label)
        }
        Intent::ToggleTask(n) | Intent::DeleteTask(n) if n > controller.tasks().len() => {
            writeln!(out, "no task #{n}")?;
            return Ok(Flow::Continue { rerender: false });
        }
        Intent::ToggleTask(n) => {
            let id = controller.tasks()[n - 1].id;
            controller.toggle_task(id)
        }
        Intent::DeleteTask(n) => {
            let id = controller.tasks()[n - 1].id;
            controller.delete_task(id)
        }
        Intent::DeleteAll | Intent::Refresh if !controller.has_user() => {
            writeln!(out, "select a user first")?;
            return Ok(Flow::Continue { rerender: false });
        }
        Intent::DeleteAll => controller.delete_all_tasks(),
        Intent::Refresh => controller.refresh(),
    };

    if !ok {
        writeln!(out, "! the service did not accept that, showing the latest known state")?;
    }
    Ok(Flow::Continue { rerender: true })
}
