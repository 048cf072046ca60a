//! Command implementations for malign CLI

pub mod align;
pub mod batch;

use malign_core::AlignmentInfo;

/// Column names of the tab-separated alignment summary.
pub const TSV_HEADER: &str =
    "nx\tny\tmatches\tmismatches\tgaps0\tgaps1\tscore\tfirst_x\tfirst_y\tlast_x\tlast_y\tentries\tcells\tband";

/// One tab-separated line with the fields of `TSV_HEADER`.
pub fn tsv_fields(info: &AlignmentInfo) -> String {
    let ordinal = |value: Option<u32>| value.map_or_else(|| "-".to_string(), |v| v.to_string());
    format!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
        info.nx,
        info.ny,
        info.match_count,
        info.mismatch_count,
        info.gap_count_0,
        info.gap_count_1,
        info.score,
        ordinal(info.first_ordinals.map(|(x, _)| x)),
        ordinal(info.first_ordinals.map(|(_, y)| y)),
        ordinal(info.last_ordinals.map(|(x, _)| x)),
        ordinal(info.last_ordinals.map(|(_, y)| y)),
        info.matrix_entry_count,
        info.cell_count,
        info.band_size,
    )
}
