//! Bulk import of exam results from CSV or spreadsheet files.
//!
//! Every data row is handled on its own: a bad row is reported and skipped,
//! it never aborts the batch. Only a file that cannot be decoded at all fails
//! the whole import, and in that case nothing is written.

use std::collections::HashSet;
use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use serde::Serialize;
use thiserror::Error;

use crate::entities::result;
use crate::entities::sea_orm_active_enums::{ResultStatus, UploadStatus};
use crate::repositories::{NewResult, ResultRepository, StudentRepository, is_unique_violation};
use crate::utils::upload::UploadedFile;

pub const COLUMN_ROLL_NUMBER: &str = "roll_number";
pub const COLUMN_MARKS_OBTAINED: &str = "marks_obtained";
pub const COLUMN_GRADE: &str = "grade";
pub const COLUMN_STATUS: &str = "status";
pub const COLUMN_REMARKS: &str = "remarks";

/// Failures that make the whole file unusable.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("unsupported file type '{0}', expected .csv, .xlsx or .xls")]
    UnsupportedFormat(String),
    #[error("failed to read CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to read spreadsheet: {0}")]
    Spreadsheet(#[from] calamine::Error),
    #[error("spreadsheet has no worksheets")]
    NoWorksheet,
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
}

/// Why a single row was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowError {
    #[error("{0}")]
    Unreadable(String),
    #[error("roll_number is required")]
    MissingRollNumber,
    #[error("marks_obtained is required")]
    MissingMarks,
    #[error("could not convert marks_obtained '{0}' to a number")]
    InvalidMarks(String),
    #[error("marks_obtained must not be negative, got {0}")]
    NegativeMarks(f64),
    #[error("{0}")]
    InvalidStatus(String),
    #[error("Student with roll number {0} not found")]
    StudentNotFound(String),
    #[error("Result already exists for {0}")]
    DuplicateResult(String),
}

/// Positions of the recognised columns in the header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    roll_number: usize,
    marks_obtained: usize,
    grade: Option<usize>,
    status: Option<usize>,
    remarks: Option<usize>,
}

impl ColumnMap {
    pub fn from_header<S: AsRef<str>>(header: &[S]) -> Result<Self, ImportError> {
        let find = |name: &str| {
            header.iter().position(|h| {
                h.as_ref()
                    .trim_start_matches('\u{feff}')
                    .trim()
                    .eq_ignore_ascii_case(name)
            })
        };

        Ok(Self {
            roll_number: find(COLUMN_ROLL_NUMBER)
                .ok_or(ImportError::MissingColumn(COLUMN_ROLL_NUMBER))?,
            marks_obtained: find(COLUMN_MARKS_OBTAINED)
                .ok_or(ImportError::MissingColumn(COLUMN_MARKS_OBTAINED))?,
            grade: find(COLUMN_GRADE),
            status: find(COLUMN_STATUS),
            remarks: find(COLUMN_REMARKS),
        })
    }
}

/// A data row as read from the file. `position` is 1-based and excludes the header.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub position: usize,
    pub cells: Result<Vec<String>, String>,
}

impl RawRow {
    fn is_blank(&self) -> bool {
        match &self.cells {
            Ok(cells) => cells.iter().all(|c| c.trim().is_empty()),
            Err(_) => false,
        }
    }
}

/// The decoded content of an uploaded result file.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSheet {
    pub columns: ColumnMap,
    pub rows: Vec<RawRow>,
}

impl ResultSheet {
    /// Picks the decoder from the file extension.
    pub fn from_upload(file: &UploadedFile) -> Result<Self, ImportError> {
        match file.extension().as_deref() {
            Some("csv") => Self::from_csv(&file.data),
            Some("xlsx" | "xlsm" | "xlsb" | "xls" | "ods") => Self::from_spreadsheet(&file.data),
            other => Err(ImportError::UnsupportedFormat(
                other.unwrap_or_default().to_string(),
            )),
        }
    }

    pub fn from_csv(data: &[u8]) -> Result<Self, ImportError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(data);

        let header: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let columns = ColumnMap::from_header(&header)?;

        let mut rows = Vec::new();
        for (idx, record) in reader.records().enumerate() {
            // Blank lines are skipped by the reader, so prefer the line number when known
            let fallback = rows
                .last()
                .map(|r: &RawRow| r.position + 1)
                .unwrap_or(idx + 1);
            let row = match record {
                Ok(record) => RawRow {
                    position: record
                        .position()
                        .map(|p| (p.line() as usize).saturating_sub(1))
                        .filter(|p| *p > 0)
                        .unwrap_or(fallback),
                    cells: Ok(record.iter().map(str::to_string).collect()),
                },
                Err(e) => RawRow {
                    position: e
                        .position()
                        .map(|p| (p.line() as usize).saturating_sub(1))
                        .filter(|p| *p > 0)
                        .unwrap_or(fallback),
                    cells: Err(format!("unreadable row: {}", e)),
                },
            };
            rows.push(row);
        }

        Ok(Self { columns, rows }.without_blank_rows())
    }

    /// Reads the first worksheet of an Excel or OpenDocument workbook.
    pub fn from_spreadsheet(data: &[u8]) -> Result<Self, ImportError> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(data.to_vec()))?;

        let first_sheet = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or(ImportError::NoWorksheet)?;
        let range = workbook.worksheet_range(&first_sheet)?;

        let mut sheet_rows = range.rows();
        let header: Vec<String> = sheet_rows
            .next()
            .map(|row| row.iter().map(cell_text).collect())
            .unwrap_or_default();
        let columns = ColumnMap::from_header(&header)?;

        let rows = sheet_rows
            .enumerate()
            .map(|(idx, row)| RawRow {
                position: idx + 1,
                cells: Ok(row.iter().map(cell_text).collect()),
            })
            .collect();

        Ok(Self { columns, rows }.without_blank_rows())
    }

    fn without_blank_rows(mut self) -> Self {
        self.rows.retain(|row| !row.is_blank());
        self
    }
}

/// Renders a spreadsheet cell as text. Whole numbers lose their fractional
/// part so numeric roll numbers read back unchanged.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Int(i) => i.to_string(),
        other => other.to_string().trim().to_string(),
    }
}

/// A row that passed validation and is ready to be matched against the database.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRow {
    pub position: usize,
    pub roll_number: String,
    pub marks_obtained: f64,
    pub grade: Option<String>,
    pub status: ResultStatus,
    pub remarks: Option<String>,
}

pub fn parse_row(columns: &ColumnMap, row: &RawRow) -> Result<ParsedRow, RowError> {
    let cells = row.cells.as_ref().map_err(|e| RowError::Unreadable(e.clone()))?;

    let cell = |idx: Option<usize>| {
        idx.and_then(|i| cells.get(i))
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    };

    let roll_number = cell(Some(columns.roll_number)).ok_or(RowError::MissingRollNumber)?;

    let marks_text = cell(Some(columns.marks_obtained)).ok_or(RowError::MissingMarks)?;
    let marks_obtained: f64 = marks_text
        .parse()
        .map_err(|_| RowError::InvalidMarks(marks_text.to_string()))?;
    if !marks_obtained.is_finite() {
        return Err(RowError::InvalidMarks(marks_text.to_string()));
    }
    if marks_obtained < 0.0 {
        return Err(RowError::NegativeMarks(marks_obtained));
    }

    let status = match cell(columns.status) {
        Some(status) => status.parse().map_err(RowError::InvalidStatus)?,
        None => ResultStatus::Pass,
    };

    Ok(ParsedRow {
        position: row.position,
        roll_number: roll_number.to_string(),
        marks_obtained,
        grade: cell(columns.grade).map(str::to_string),
        status,
        remarks: cell(columns.remarks).map(str::to_string),
    })
}

#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Imported { position: usize, roll_number: String },
    Rejected { position: usize, error: RowError },
}

impl RowOutcome {
    fn position(&self) -> usize {
        match self {
            RowOutcome::Imported { position, .. } | RowOutcome::Rejected { position, .. } => {
                *position
            }
        }
    }
}

/// Aggregate outcome of one import, as shown to the administrator.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportReport {
    pub success_count: usize,
    pub failure_count: usize,
    pub errors: Vec<String>,
    #[serde(skip)]
    pub file_error: bool,
}

impl ImportReport {
    pub fn from_outcomes(mut outcomes: Vec<RowOutcome>) -> Self {
        outcomes.sort_by_key(RowOutcome::position);

        let mut report = Self::default();
        for outcome in outcomes {
            match outcome {
                RowOutcome::Imported { .. } => report.success_count += 1,
                RowOutcome::Rejected { position, error } => {
                    report.failure_count += 1;
                    report.errors.push(format!("Row {}: {}", position, error));
                }
            }
        }
        report
    }

    pub fn file_failure(err: &ImportError) -> Self {
        Self {
            success_count: 0,
            failure_count: 1,
            errors: vec![format!("File processing error: {}", err)],
            file_error: true,
        }
    }

    pub fn total_records(&self) -> usize {
        self.success_count + self.failure_count
    }

    pub fn upload_status(&self) -> UploadStatus {
        if self.file_error {
            UploadStatus::Failed
        } else if self.failure_count == 0 {
            UploadStatus::Completed
        } else {
            UploadStatus::CompletedWithErrors
        }
    }

    pub fn error_log(&self) -> Option<String> {
        if self.errors.is_empty() {
            None
        } else {
            Some(self.errors.join("\n"))
        }
    }
}

struct StagedResult {
    position: usize,
    roll_number: String,
    model: result::ActiveModel,
}

pub struct ResultImporter<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ResultImporter<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Imports every row of `file` into `exam_id`, recording `uploaded_by` as the author.
    ///
    /// Row problems are reported inside the returned [`ImportReport`]. An `Err`
    /// means the database itself failed and nothing was committed.
    pub async fn import(
        &self,
        exam_id: i32,
        uploaded_by: i32,
        file: &UploadedFile,
    ) -> anyhow::Result<ImportReport> {
        let sheet = match ResultSheet::from_upload(file) {
            Ok(sheet) => sheet,
            Err(e) => {
                tracing::warn!(file_name = %file.file_name, "Rejected result file: {}", e);
                return Ok(ImportReport::file_failure(&e));
            }
        };

        let txn = self.db.begin().await?;
        let outcomes = import_rows(&txn, exam_id, uploaded_by, &sheet).await?;
        txn.commit().await?;

        let report = ImportReport::from_outcomes(outcomes);
        tracing::info!(
            exam_id,
            file_name = %file.file_name,
            successful = report.success_count,
            failed = report.failure_count,
            "Result import finished"
        );
        Ok(report)
    }
}

async fn import_rows(
    txn: &DatabaseTransaction,
    exam_id: i32,
    uploaded_by: i32,
    sheet: &ResultSheet,
) -> anyhow::Result<Vec<RowOutcome>> {
    let student_repo = StudentRepository::new(txn);
    let result_repo = ResultRepository::new(txn);

    let mut outcomes = Vec::with_capacity(sheet.rows.len());
    let mut staged = Vec::new();
    let mut staged_students = HashSet::new();

    for raw in &sheet.rows {
        let row = match parse_row(&sheet.columns, raw) {
            Ok(row) => row,
            Err(error) => {
                outcomes.push(RowOutcome::Rejected {
                    position: raw.position,
                    error,
                });
                continue;
            }
        };

        let Some(student) = student_repo.find_by_roll_number(&row.roll_number).await? else {
            outcomes.push(RowOutcome::Rejected {
                position: row.position,
                error: RowError::StudentNotFound(row.roll_number),
            });
            continue;
        };

        let already_recorded = staged_students.contains(&student.student_id)
            || result_repo
                .find_by_student_and_exam(student.student_id, exam_id)
                .await?
                .is_some();
        if already_recorded {
            outcomes.push(RowOutcome::Rejected {
                position: row.position,
                error: RowError::DuplicateResult(row.roll_number),
            });
            continue;
        }

        staged_students.insert(student.student_id);
        let model = NewResult {
            student_id: student.student_id,
            exam_id,
            marks_obtained: row.marks_obtained,
            grade: row.grade,
            status: row.status,
            remarks: row.remarks,
            uploaded_by,
        }
        .into_active_model();

        staged.push(StagedResult {
            position: row.position,
            roll_number: row.roll_number,
            model,
        });
    }

    outcomes.extend(persist_staged(txn, staged).await?);
    Ok(outcomes)
}

/// Writes staged rows in one statement. If another import inserted one of the
/// same (student, exam) pairs in the meantime, falls back to row-by-row inserts
/// so only the conflicting rows are rejected.
async fn persist_staged(
    txn: &DatabaseTransaction,
    staged: Vec<StagedResult>,
) -> anyhow::Result<Vec<RowOutcome>> {
    if staged.is_empty() {
        return Ok(Vec::new());
    }

    let savepoint = txn.begin().await?;
    let models = staged.iter().map(|s| s.model.clone()).collect();
    match ResultRepository::new(&savepoint).insert_many(models).await {
        Ok(()) => {
            savepoint.commit().await?;
            return Ok(staged
                .into_iter()
                .map(|s| RowOutcome::Imported {
                    position: s.position,
                    roll_number: s.roll_number,
                })
                .collect());
        }
        Err(e) if is_unique_violation(&e) => {
            savepoint.rollback().await?;
            tracing::warn!("Bulk result insert hit an existing result, retrying row by row");
        }
        Err(e) => return Err(e),
    }

    let mut outcomes = Vec::with_capacity(staged.len());
    for s in staged {
        let savepoint = txn.begin().await?;
        match ResultRepository::new(&savepoint)
            .insert_many(vec![s.model])
            .await
        {
            Ok(()) => {
                savepoint.commit().await?;
                outcomes.push(RowOutcome::Imported {
                    position: s.position,
                    roll_number: s.roll_number,
                });
            }
            Err(e) if is_unique_violation(&e) => {
                savepoint.rollback().await?;
                outcomes.push(RowOutcome::Rejected {
                    position: s.position,
                    error: RowError::DuplicateResult(s.roll_number),
                });
            }
            Err(e) => return Err(e),
        }
    }
    Ok(outcomes)
}
