//! Executes one parsed command against the engine and re-renders.

use std::{fs::File, io::Write};

use engine::{
    Confirm, Deletion, Engine, EngineError, Filter, Submitted, Transaction, TransactionDraft,
};

use crate::{
    cli::{AddArgs, Command, DeleteArgs, EditArgs, ExportArgs},
    error::{AppError, Result},
    output::TextRenderer,
};

pub fn execute<W, C>(engine: &mut Engine, command: Command, out: &mut W, confirm: &mut C) -> Result<()>
where
    W: Write,
    C: Confirm + ?Sized,
{
    match command {
        Command::Add(args) => add(engine, args, out),
        Command::Edit(args) => edit(engine, args, out),
        Command::Delete(args) => delete(engine, args, out, confirm),
        Command::List(args) => {
            engine.render(args.filter, &mut TextRenderer::new(&mut *out))?;
            Ok(())
        }
        Command::Totals => {
            engine.render(Filter::All, &mut TextRenderer::summary(&mut *out))?;
            Ok(())
        }
        Command::Export(args) => export(engine, args, out),
    }
}

fn add<W: Write>(engine: &mut Engine, args: AddArgs, out: &mut W) -> Result<()> {
    let tx = engine.add(&args.description, args.amount, args.kind)?;
    writeln!(out, "Added #{}", tx.id)?;
    rerender(engine, out)
}

fn edit<W: Write>(engine: &mut Engine, args: EditArgs, out: &mut W) -> Result<()> {
    let current = match engine.begin_edit(args.id) {
        Ok(draft) => draft,
        Err(EngineError::KeyNotFound(_)) => return Err(AppError::NotFound(args.id)),
        Err(err) => return Err(err.into()),
    };
    let draft = TransactionDraft {
        description: args.description.unwrap_or(current.description),
        amount: args.amount.unwrap_or(current.amount),
        kind: args.kind.unwrap_or(current.kind),
    };

    let outcome = engine.submit(draft);
    if outcome.is_err() {
        engine.cancel_edit();
    }
    match outcome? {
        Submitted::Updated(tx) => writeln!(out, "Updated #{}", tx.id)?,
        Submitted::Added(tx) => writeln!(out, "Added #{}", tx.id)?,
        Submitted::Stale(id) => return Err(AppError::NotFound(id)),
    }
    rerender(engine, out)
}

fn delete<W, C>(engine: &mut Engine, args: DeleteArgs, out: &mut W, confirm: &mut C) -> Result<()>
where
    W: Write,
    C: Confirm + ?Sized,
{
    let deletion = if args.yes {
        engine.delete(args.id, &mut |_: &Transaction| true)?
    } else {
        engine.delete(args.id, confirm)?
    };
    match deletion {
        Deletion::Deleted(tx) => writeln!(out, "Deleted #{}", tx.id)?,
        Deletion::Declined => {
            writeln!(out, "Nothing deleted")?;
            return Ok(());
        }
        Deletion::NotFound => return Err(AppError::NotFound(args.id)),
    }
    rerender(engine, out)
}

fn export<W: Write>(engine: &Engine, args: ExportArgs, out: &mut W) -> Result<()> {
    let rows = match &args.output {
        Some(path) => {
            let rows = engine.export_csv(args.filter, File::create(path)?)?;
            writeln!(out, "Exported {rows} transactions to {}", path.display())?;
            rows
        }
        None => engine.export_csv(args.filter, &mut *out)?,
    };
    tracing::info!(rows, "export finished");
    Ok(())
}

fn rerender<W: Write>(engine: &Engine, out: &mut W) -> Result<()> {
    writeln!(out)?;
    engine.render(Filter::All, &mut TextRenderer::new(&mut *out))?;
    Ok(())
}
