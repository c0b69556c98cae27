//! Tab-separated results files
//!
//! A results file opens with comment lines, then one tab-separated line
//! per surviving record:
//!
//! ```text
//! # worms count:\t5
//! # posX\tposY\twidth\theight\ttrueLength\tclipId
//! 102\t88\t60\t200\t900\t7
//! ```
//!
//! The count in the header equals the sum of every record's override
//! contribution, an invariant any consumer summing the file relies on.

use crate::error::DetectResult;
use crate::record::{CountOverride, WormRecord};
use std::io::Write;

/// Format one record as its report line.
pub fn format_record_line(record: &WormRecord) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}\t{}",
        record.position_x,
        record.position_y,
        record.width,
        record.height,
        record.true_length,
        record.clip_id
    )
}

/// Write a results file.
///
/// `Deleted` records are omitted from the body and contribute 0 to the
/// header count; `OverriddenCount(n)` records keep one body line but
/// contribute `n`.
pub fn write_report<W: Write>(
    records: &[(WormRecord, CountOverride)],
    writer: &mut W,
) -> DetectResult<()> {
    let total: u32 = records.iter().map(|(_, o)| o.count()).sum();

    writeln!(writer, "# worms count:\t{}", total)?;
    writeln!(writer, "# posX\tposY\twidth\theight\ttrueLength\tclipId")?;
    for (record, over) in records {
        if over.keeps_line() {
            writeln!(writer, "{}", format_record_line(record))?;
        }
    }
    Ok(())
}

/// [`write_report`] into a string.
pub fn report_to_string(records: &[(WormRecord, CountOverride)]) -> DetectResult<String> {
    let mut out = Vec::new();
    write_report(records, &mut out)?;
    // the writer only ever receives UTF-8 text
    Ok(String::from_utf8_lossy(&out).into_owned())
}
