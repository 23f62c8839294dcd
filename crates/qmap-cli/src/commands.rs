use std::io::Write;

use anyhow::{Context, Result};
use qmap_ingest::{export_json, list_sheets, write_export};
use qmap_map::SuggestionEngine;
use qmap_model::LOGICAL_FIELDS;
use qmap_validate::ValidationReport;
use tracing::info_span;

use qmap_cli::pipeline::{apply_mappings, apply_script, load_script, load_session};
use qmap_cli::types::ApplyResult;

use crate::cli::{ApplyArgs, ExportArgs, InspectArgs, MappedArgs, SuggestArgs};
use crate::summary::{print_store, print_suggestions};

pub fn run_inspect(args: &InspectArgs) -> Result<()> {
    let input = &args.input.input;
    if args.list_sheets {
        let sheets =
            list_sheets(input).with_context(|| format!("list sheets of {}", input.display()))?;
        for (index, name) in sheets.iter().enumerate() {
            println!("{index}: {name}");
        }
        return Ok(());
    }
    let session = load_session(input, &args.input.ingest_options())?;
    print_store(session.store(), session.mappings(), args.limit);
    Ok(())
}

pub fn run_validate(args: &MappedArgs) -> Result<ValidationReport> {
    let _span = info_span!("validate", input = %args.input.input.display()).entered();
    let mut session = load_session(&args.input.input, &args.input.ingest_options())?;
    apply_mappings(&mut session, &args.mappings)?;
    Ok(session.proceed())
}

pub fn run_apply(args: &ApplyArgs) -> Result<ApplyResult> {
    let input = &args.mapped.input;
    let _span = info_span!("apply", input = %input.input.display()).entered();
    let commands = load_script(&args.script)?;
    let mut session = load_session(&input.input, &input.ingest_options())?;
    apply_mappings(&mut session, &args.mapped.mappings)?;

    let steps = apply_script(&mut session, &commands);
    let report = session.proceed();
    let output = match &args.output {
        Some(path) if args.force || !report.has_errors() => {
            write_export(path, session.store())
                .with_context(|| format!("write {}", path.display()))?;
            Some(path.clone())
        }
        _ => None,
    };
    Ok(ApplyResult {
        steps,
        rows: session.store().len(),
        report,
        output,
    })
}

pub fn run_export(args: &ExportArgs) -> Result<()> {
    let input = &args.mapped.input;
    let mut session = load_session(&input.input, &input.ingest_options())?;
    apply_mappings(&mut session, &args.mapped.mappings)?;
    match &args.output {
        Some(path) => write_export(path, session.store())
            .with_context(|| format!("write {}", path.display()))?,
        None => {
            let json = export_json(session.store()).context("serialize rows")?;
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").context("write to stdout")?;
        }
    }
    Ok(())
}

pub fn run_suggest(args: &SuggestArgs) -> Result<()> {
    let session = load_session(&args.input.input, &args.input.ingest_options())?;
    let engine = SuggestionEngine::new(args.min_confidence);
    let result = engine.suggest(&LOGICAL_FIELDS, session.store().schema());
    print_suggestions(&result);
    Ok(())
}
