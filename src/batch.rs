use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

use crate::config::Company;
use crate::error::{PayslipError, Result};
use crate::pdf::LogoSource;
use crate::sheet::Record;
use crate::slip::{slip_file_name, slip_path, SlipRenderer};

/// Size of the render pool
pub const DEFAULT_WORKERS: usize = 4;

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub workers: usize,
    /// Upper bound on fetching a remote logo
    pub logo_timeout: Duration,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            logo_timeout: Duration::from_secs(10),
        }
    }
}

/// Render one slip per record and return their paths in record order.
///
/// The output directory is created once before any worker starts. The logo
/// is loaded once and shared; if it cannot be loaded every slip is rendered
/// without it. Any render failure fails the batch after all workers finish.
pub fn generate_slips(
    records: &[Record],
    company: &Company,
    logo: Option<&LogoSource>,
    output_dir: &Path,
    options: &BatchOptions,
) -> Result<Vec<PathBuf>> {
    if options.workers == 0 {
        return Err(PayslipError::InvalidWorkerCount);
    }
    check_unique_names(records, output_dir)?;

    std::fs::create_dir_all(output_dir)?;

    let logo = logo.and_then(|source| match source.load(options.logo_timeout) {
        Ok(logo) => Some(logo),
        Err(e) => {
            warn!(error = %e, "rendering slips without a logo");
            None
        }
    });
    if let Some(logo) = &logo {
        info!(logo = logo.reference(), "loaded logo");
    }
    let renderer = SlipRenderer::new(company.clone(), logo);

    let started = Instant::now();
    let results = render_all(records, options.workers, |record| {
        renderer.render(record, output_dir)
    });

    for (record, result) in records.iter().zip(results) {
        match result {
            Some(Ok(_)) => {}
            Some(Err(e)) => return Err(e),
            None => return Err(PayslipError::WorkerPanicked(record.row)),
        }
    }

    info!(
        slips = records.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "batch complete"
    );

    // Recomputed from the records so the order never depends on completion
    Ok(records
        .iter()
        .map(|record| slip_path(output_dir, record))
        .collect())
}

/// Fan records out over a fixed pool of scoped threads.
///
/// Workers claim row indices from a shared counter; results are slotted
/// back by index. A render that panics is reported against its own row.
fn render_all<F>(records: &[Record], workers: usize, render: F) -> Vec<Option<Result<PathBuf>>>
where
    F: Fn(&Record) -> Result<PathBuf> + Sync,
{
    let mut slots: Vec<Option<Result<PathBuf>>> = records.iter().map(|_| None).collect();
    if records.is_empty() {
        return slots;
    }

    let next = AtomicUsize::new(0);
    let pool_size = workers.min(records.len());
    info!(records = records.len(), workers = pool_size, "rendering slips");

    thread::scope(|scope| {
        let handles: Vec<_> = (0..pool_size)
            .map(|_| {
                let next = &next;
                let render = &render;
                scope.spawn(move || {
                    let mut done = Vec::new();
                    loop {
                        let idx = next.fetch_add(1, Ordering::Relaxed);
                        let Some(record) = records.get(idx) else {
                            break;
                        };
                        let result = panic::catch_unwind(AssertUnwindSafe(|| render(record)))
                            .unwrap_or_else(|_| {
                                error!(row = record.row, "slip render panicked");
                                Err(PayslipError::WorkerPanicked(record.row))
                            });
                        done.push((idx, result));
                    }
                    done
                })
            })
            .collect();

        for handle in handles {
            if let Ok(done) = handle.join() {
                for (idx, result) in done {
                    slots[idx] = Some(result);
                }
            }
        }
    });

    slots
}

/// Two records with the same file name would race on one output file.
fn check_unique_names(records: &[Record], output_dir: &Path) -> Result<()> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    for record in records {
        if let Some(first_row) = seen.insert(slip_file_name(record), record.row) {
            return Err(PayslipError::DuplicateSlip {
                path: slip_path(output_dir, record),
                first_row,
                second_row: record.row,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::{CellValue, Field};

    fn record(row: usize, code: &str) -> Record {
        Record::new(row)
            .with(Field::MonthYear, CellValue::Text("Dec 2024".into()))
            .with(Field::EmployeeCode, CellValue::Text(code.into()))
            .with(Field::Name, CellValue::Text("Test".into()))
    }

    #[test]
    fn test_duplicate_names_rejected_before_rendering() {
        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("slips");
        let records = vec![record(2, "E1"), record(3, "E2"), record(4, "E1")];

        let err = generate_slips(&records, &Company::default(), None, &out, &BatchOptions::default())
            .unwrap_err();
        match err {
            PayslipError::DuplicateSlip {
                first_row,
                second_row,
                ..
            } => {
                assert_eq!(first_row, 2);
                assert_eq!(second_row, 4);
            }
            other => panic!("expected DuplicateSlip, got {other:?}"),
        }
        assert!(!out.exists());
    }

    #[test]
    fn test_panicking_render_names_its_own_row() {
        let records: Vec<Record> = (0..12).map(|i| record(i + 2, &format!("E{i}"))).collect();

        let results = render_all(&records, 4, |record| {
            if record.row == 9 {
                panic!("boom");
            }
            Ok(PathBuf::from(format!("{}.pdf", record.row)))
        });

        assert_eq!(results.len(), 12);
        for (record, result) in records.iter().zip(&results) {
            match result {
                Some(Ok(path)) => {
                    assert_ne!(record.row, 9);
                    assert_eq!(path, &PathBuf::from(format!("{}.pdf", record.row)));
                }
                Some(Err(PayslipError::WorkerPanicked(row))) => assert_eq!(*row, 9),
                other => panic!("row {}: unexpected {other:?}", record.row),
            }
        }
        assert!(matches!(
            results[7],
            Some(Err(PayslipError::WorkerPanicked(9)))
        ));
    }

    #[test]
    fn test_zero_workers_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let options = BatchOptions {
            workers: 0,
            ..Default::default()
        };
        let err = generate_slips(&[], &Company::default(), None, dir.path(), &options).unwrap_err();
        assert!(matches!(err, PayslipError::InvalidWorkerCount));
    }

    #[test]
    fn test_empty_batch_still_creates_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("nested").join("slips");
        let paths = generate_slips(&[], &Company::default(), None, &out, &BatchOptions::default())
            .unwrap();
        assert!(paths.is_empty());
        assert!(out.is_dir());
    }
}
