//! Row extraction driver

use rowfeed_core::Workbook;
use rowfeed_xlsx::XlsxReader;

use crate::buffer::OutputBuffer;
use crate::config::SourceConfig;
use crate::error::{SourceError, SourceResult};
use crate::report::{ErrorReporter, Severity};
use crate::resolve::resolve_cell_value;

/// Outcome of a successful extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractSummary {
    /// Name of the worksheet that was read
    pub sheet_name: String,
    /// Whether the requested sheet was not found and the first sheet was used
    pub used_fallback: bool,
    /// Number of records added to the buffer
    pub rows_emitted: usize,
}

/// Pipeline source that feeds worksheet rows into an [`OutputBuffer`]
#[derive(Debug, Clone)]
pub struct ExcelSource {
    config: SourceConfig,
}

impl ExcelSource {
    /// Create a source from its configuration
    pub fn new(config: SourceConfig) -> Self {
        Self { config }
    }

    /// The source's configuration
    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    /// Run one extraction.
    ///
    /// Any failure is reported once through `reporter` with [`Severity::Error`]
    /// and then returned. Rows added before a failure stay in the buffer.
    pub fn extract<B, R>(&self, buffer: &mut B, reporter: &mut R) -> SourceResult<ExtractSummary>
    where
        B: OutputBuffer + ?Sized,
        R: ErrorReporter + ?Sized,
    {
        match self.run(buffer) {
            Ok(summary) => {
                if summary.used_fallback && !self.config.excel_sheet_name.is_empty() {
                    reporter.report(
                        Severity::Warning,
                        &self.config.source_label,
                        &format!(
                            "Sheet '{}' not found, using first sheet '{}'",
                            self.config.excel_sheet_name, summary.sheet_name
                        ),
                    );
                }
                log::info!(
                    "Extracted {} rows from sheet '{}'",
                    summary.rows_emitted,
                    summary.sheet_name
                );
                Ok(summary)
            }
            Err(err) => {
                reporter.report(Severity::Error, &self.config.source_label, &err.diagnostic());
                Err(err)
            }
        }
    }

    fn run<B: OutputBuffer + ?Sized>(&self, buffer: &mut B) -> SourceResult<ExtractSummary> {
        let path = self.config.validate()?;

        for column in &self.config.columns {
            if !buffer.has_field(&column.field) {
                return Err(SourceError::configuration(format!(
                    "Output buffer has no field '{}' for column {}",
                    column.field, column.letter
                )));
            }
        }

        log::debug!("Opening workbook {}", path.display());
        let mut document = XlsxReader::open_file(path)?;
        log::debug!(
            "Opened workbook with {} sheet(s), {} shared string(s)",
            document.workbook().sheet_count(),
            document.workbook().shared_strings().map_or(0, |t| t.len())
        );

        // Only the selected worksheet's rows are parsed
        let (index, used_fallback) = self.select_sheet(document.workbook())?;
        document.load_sheet_data(index)?;

        self.extract_sheet(document.workbook(), index, used_fallback, buffer)
    }

    /// Feed the rows of an already-loaded workbook into `buffer`.
    ///
    /// The first row of the selected worksheet is a header and is skipped.
    pub fn extract_workbook<B: OutputBuffer + ?Sized>(
        &self,
        workbook: &Workbook,
        buffer: &mut B,
    ) -> SourceResult<ExtractSummary> {
        let (index, used_fallback) = self.select_sheet(workbook)?;
        self.extract_sheet(workbook, index, used_fallback, buffer)
    }

    fn extract_sheet<B: OutputBuffer + ?Sized>(
        &self,
        workbook: &Workbook,
        index: usize,
        used_fallback: bool,
        buffer: &mut B,
    ) -> SourceResult<ExtractSummary> {
        let sheet = workbook
            .sheet(index)
            .ok_or_else(|| SourceError::structural("Could not find worksheet data."))?;
        let data = sheet
            .data()
            .ok_or_else(|| SourceError::structural("Could not find worksheet data."))?;

        let mut rows_emitted = 0;
        for row in data.rows().iter().skip(1) {
            buffer.add_row();
            for column in &self.config.columns {
                let cell = row.cell_starting_with(&column.letter);
                let value = resolve_cell_value(workbook, cell).unwrap_or_default();
                buffer.set_field(&column.field, value.to_string());
            }
            rows_emitted += 1;
        }

        log::debug!(
            "Sheet '{}': {} row(s), {} emitted",
            sheet.name(),
            data.row_count(),
            rows_emitted
        );

        Ok(ExtractSummary {
            sheet_name: sheet.name().to_string(),
            used_fallback,
            rows_emitted,
        })
    }

    /// Index of the sheet to read: exact name match, else the first worksheet.
    /// The flag is set when the first worksheet was used as a fallback.
    fn select_sheet(&self, workbook: &Workbook) -> SourceResult<(usize, bool)> {
        let name = &self.config.excel_sheet_name;
        if let Some(index) = workbook.sheet_index(name) {
            return Ok((index, false));
        }

        if workbook.is_empty() {
            return Err(SourceError::structural(format!(
                "Sheet '{}' not found and no sheets exist in the workbook.",
                name
            )));
        }
        Ok((0, true))
    }
}
