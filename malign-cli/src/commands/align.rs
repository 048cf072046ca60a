//! Align command implementation - align two marker files

use anyhow::Result;
use malign_core::{align, Alignment, AlignmentInfo, Coordinates, SparseMatrix};
use serde::Serialize;
use std::path::Path;

use super::{tsv_fields, TSV_HEADER};
use crate::config::Config;
use crate::error::CliError;
use crate::input::read_markers;
use crate::OutputFormat;

#[derive(Serialize)]
struct AlignOutput<'a> {
    info: &'a AlignmentInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    ordinals: Option<Vec<Coordinates>>,
}

pub fn execute(config: &Config, seq0: &Path, seq1: &Path, debug_dir: Option<&Path>) -> Result<()> {
    log::info!("Aligning {} and {}", seq0.display(), seq1.display());

    let markers0 = read_markers(seq0)?;
    let markers1 = read_markers(seq1)?;

    let mut work_area = SparseMatrix::new();
    let (alignment, info) = align(&markers0, &markers1, &config.align, &mut work_area, debug_dir)
        .map_err(|e| CliError::alignment(format!("{} / {}", seq0.display(), seq1.display()), e))?;

    log::info!(
        "Aligned {} of {} and {} markers, score {}",
        info.match_count,
        info.nx,
        info.ny,
        info.score
    );
    if let Some(dir) = debug_dir {
        log::info!("Debug output in {}", dir.display());
    }

    print!("{}", format_output(config, &alignment, &info)?);
    Ok(())
}

fn format_output(config: &Config, alignment: &Alignment, info: &AlignmentInfo) -> Result<String> {
    let ordinals = config.output.ordinals.then(|| alignment.ordinals().collect::<Vec<_>>());

    let text = match config.output.format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&AlignOutput { info, ordinals })?;
            json.push('\n');
            json
        }
        OutputFormat::Tsv => {
            let mut text = format!("{}\n{}\n", TSV_HEADER, tsv_fields(info));
            if let Some(ordinals) = ordinals {
                text.push_str("\nx\ty\n");
                for (x, y) in ordinals {
                    text.push_str(&format!("{}\t{}\n", x, y));
                }
            }
            text
        }
    };
    Ok(text)
}
