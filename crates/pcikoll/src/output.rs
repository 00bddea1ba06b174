//! Rendering of results to stdout

use pcikoll::cli::Format;
use pcikoll_core::OutputRow;
use pcikoll_core::PciDatabase;
use pcikoll_core::ids::IdPair;
use std::borrow::Cow;
use std::io::Write;

/// Separator between table columns
const COLUMN_GAP: &str = "  ";

/// Result of the `lookup` command
#[derive(Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub(crate) struct LookupReport<'db> {
    pub(crate) vendor: Option<&'db str>,
    pub(crate) model: Option<Cow<'db, str>>,
    pub(crate) subsystem_vendor: Option<&'db str>,
    pub(crate) subsystem: Option<&'db str>,
    /// Model and subsystem combined
    pub(crate) description: Option<Cow<'db, str>>,
    /// Set if anything that was asked for wasn't found
    #[cfg_attr(feature = "json", serde(skip))]
    pub(crate) missing: bool,
}

impl LookupReport<'_> {
    pub(crate) fn is_complete(&self) -> bool {
        !self.missing
    }
}

/// Resolve whatever of vendor, model and subsystem was asked for
pub(crate) fn lookup<'db>(
    db: &'db PciDatabase,
    vendor: &str,
    model: Option<&str>,
    subsystem: Option<&IdPair>,
) -> LookupReport<'db> {
    let mut report = LookupReport {
        vendor: report_miss(db.vendor_name(vendor)),
        ..Default::default()
    };
    report.missing |= report.vendor.is_none();

    let Some(model) = model else {
        return report;
    };
    report.model = report_miss(db.model_description(vendor, model, None));
    report.missing |= report.model.is_none();

    if let Some(sub) = subsystem {
        report.subsystem_vendor = db.vendor_name(&sub.vendor).ok();
        report.subsystem = report_miss(db.subsystem_info(vendor, model, &sub.vendor, &sub.device));
        report.missing |= report.subsystem.is_none();
        report.description = db
            .model_description(vendor, model, Some(&sub.subsystem_key()))
            .ok();
    }
    report
}

fn report_miss<T>(result: Result<T, pcikoll_core::Error>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::error!("{err}");
            None
        }
    }
}

pub(crate) fn write_rows(
    out: &mut impl Write,
    format: Format,
    rows: &[OutputRow],
) -> eyre::Result<()> {
    match format {
        Format::Human => write_table(out, rows)?,
        #[cfg(feature = "json")]
        Format::Json => {
            serde_json::to_writer_pretty(&mut *out, rows)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Plain aligned table, one device per line
fn write_table(out: &mut impl Write, rows: &[OutputRow]) -> std::io::Result<()> {
    let mut widths = OutputRow::FIELDS.map(|name| name.chars().count());
    for row in rows {
        for (width, (_, value)) in widths.iter_mut().zip(row.fields()) {
            *width = (*width).max(value.chars().count());
        }
    }

    write_line(out, &widths, OutputRow::FIELDS)?;
    for row in rows {
        write_line(out, &widths, row.fields().map(|(_, value)| value))?;
    }
    Ok(())
}

fn write_line<const N: usize>(
    out: &mut impl Write,
    widths: &[usize; N],
    cells: [&str; N],
) -> std::io::Result<()> {
    let mut line = String::new();
    for (idx, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if idx > 0 {
            line.push_str(COLUMN_GAP);
        }
        line.push_str(cell);
        let padding = width.saturating_sub(cell.chars().count());
        line.extend(std::iter::repeat_n(' ', padding));
    }
    writeln!(out, "{}", line.trim_end())
}

pub(crate) fn write_lookup(
    out: &mut impl Write,
    format: Format,
    report: &LookupReport<'_>,
) -> eyre::Result<()> {
    match format {
        Format::Human => {
            let lines = [
                ("vendor", report.vendor),
                ("model", report.model.as_deref()),
                ("subsystem vendor", report.subsystem_vendor),
                ("subsystem", report.subsystem),
                ("description", report.description.as_deref()),
            ];
            for (label, value) in lines {
                if let Some(value) = value {
                    writeln!(out, "{label}: {value}")?;
                }
            }
        }
        #[cfg(feature = "json")]
        Format::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
