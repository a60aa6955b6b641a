use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::{CsvReadOptions, DataFrame, SerReader};
use tracing::{info, info_span};

use tlf_count::count_subjects;
use tlf_report::{Ard, SummaryBuilder, pivot, write_ard_csv, write_ard_json};

use crate::cli::{ArdFormatArg, CountArgs, SubjectsArgs};
use crate::types::{CountResult, SubjectsResult};

/// Reads a CSV with every column as text.
///
/// Ids such as `01` must not be parsed as numbers, so no schema is inferred.
pub fn read_csv(path: &Path) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("Failed to create CSV reader: {}", path.display()))?
        .finish()
        .with_context(|| format!("Failed to read CSV: {}", path.display()))?;
    info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "read CSV"
    );
    Ok(df)
}

pub fn run_subjects(args: &SubjectsArgs) -> Result<SubjectsResult> {
    let population = &args.population;
    let span = info_span!("subjects", population = %population.population.display());
    let _guard = span.enter();

    let df = read_csv(&population.population)?;
    let counts = count_subjects(&df, &population.id, &population.group, &population.options())
        .context("count subjects")?;
    info!(groups = counts.len(), "counted subjects");
    Ok(SubjectsResult {
        group_col: population.group.clone(),
        counts,
    })
}

pub fn run_count(args: &CountArgs) -> Result<CountResult> {
    let population = &args.population;
    let span = info_span!(
        "count",
        population = %population.population.display(),
        observation = %args.observation.display()
    );
    let _guard = span.enter();

    let pop = read_csv(&population.population)?;
    let obs = read_csv(&args.observation)?;

    let mut builder = SummaryBuilder::new(&pop, &population.id, &population.group, args.options())
        .context("normalize population")?
        .population_row(&args.population_label);
    if let Some(label) = &args.any_label {
        builder = builder
            .any_row(label, &obs)
            .context("count subjects with any event")?;
    }
    let ard = builder
        .hierarchy(&obs, &args.category)
        .with_context(|| format!("count {}", args.category.join(" / ")))?
        .build();
    let table = pivot(&ard, &args.index_header).context("build summary table")?;
    info!(
        records = ard.len(),
        rows = table.height(),
        "built summary table"
    );

    if let Some(path) = &args.ard_out {
        write_ard(&ard, path, args.ard_format)?;
    }
    Ok(CountResult {
        table,
        ard,
        ard_path: args.ard_out.clone(),
    })
}

fn write_ard(ard: &Ard, path: &Path, format: ArdFormatArg) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let writer = BufWriter::new(file);
    match format {
        ArdFormatArg::Csv => write_ard_csv(ard, writer),
        ArdFormatArg::Json => write_ard_json(ard, writer),
    }
    .with_context(|| format!("Failed to write ARD: {}", path.display()))?;
    info!(path = %path.display(), records = ard.len(), "wrote ARD");
    Ok(())
}
