//! Batch command implementation - align many pairs of marker files

use anyhow::{Context, Result};
use malign_core::{align_batch, AlignResult, Alignment, AlignmentInfo, KmerId, SequencePair};
use std::path::{Path, PathBuf};

use super::{tsv_fields, TSV_HEADER};
use crate::config::Config;
use crate::input::{read_markers, read_pairs};

pub fn execute(config: &Config, pairs_path: &Path) -> Result<()> {
    let pairs = read_pairs(pairs_path)?;
    log::info!("Loaded {} pairs from {}", pairs.len(), pairs_path.display());

    let mut sequences: Vec<(Vec<KmerId>, Vec<KmerId>)> = Vec::with_capacity(pairs.len());
    for (path0, path1) in &pairs {
        let markers0 = read_markers(path0).with_context(|| format!("Failed to load {}", path0.display()))?;
        let markers1 = read_markers(path1).with_context(|| format!("Failed to load {}", path1.display()))?;
        sequences.push((markers0, markers1));
    }
    let inputs: Vec<SequencePair> = sequences
        .iter()
        .map(|(markers0, markers1)| (markers0.as_slice(), markers1.as_slice()))
        .collect();

    let results = align_batch(&inputs, &config.align);
    let failures = results.iter().filter(|result| result.is_err()).count();

    print!("{}", format_results(&pairs, &results));
    log::info!("Aligned {} pairs, {} failed", results.len() - failures, failures);
    Ok(())
}

fn format_results(pairs: &[(PathBuf, PathBuf)], results: &[AlignResult<(Alignment, AlignmentInfo)>]) -> String {
    let mut text = format!("seq0\tseq1\tstatus\t{}\n", TSV_HEADER);
    for ((path0, path1), result) in pairs.iter().zip(results) {
        let fields = match result {
            Ok((_, info)) => format!("ok\t{}", tsv_fields(info)),
            Err(e) => format!("error: {}", e),
        };
        text.push_str(&format!("{}\t{}\t{}\n", path0.display(), path1.display(), fields));
    }
    text
}
