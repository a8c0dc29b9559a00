//! Benchmark output: summary lines and `elapsed_ms,operation_count` samples.
//!
//! The destination is opened before the benchmark starts, so an unwritable
//! output file aborts the run up front instead of after it.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use crate::harness::{Harness, HarnessError, RunSummary, SampleRecord};
use crate::table::KeyValueTable;

/// First line of a sample file.
pub const CSV_HEADER: &str = "ms,nb_string";

/// Where samples are sent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Destination {
    /// Plain lines on stdout, no header.
    #[default]
    Stdout,
    /// A delimited file with a header row. Created or truncated.
    File(PathBuf),
}

impl Destination {
    /// Open the destination for writing.
    ///
    /// A file is created (or truncated) here, so failures surface before any
    /// samples exist.
    pub fn open(&self) -> Result<SampleSink, ReportError> {
        match self {
            Destination::Stdout => Ok(SampleSink::Stdout),
            Destination::File(path) => {
                let file = File::create(path).map_err(|source| ReportError::Open {
                    path: path.clone(),
                    source,
                })?;
                Ok(SampleSink::File {
                    path: path.clone(),
                    out: BufWriter::new(file),
                })
            }
        }
    }
}

/// An opened [`Destination`].
#[derive(Debug)]
pub enum SampleSink {
    /// Samples follow the summary on the console writer, after a `Benchmark`
    /// banner.
    Stdout,
    File {
        path: PathBuf,
        out: BufWriter<File>,
    },
}

impl SampleSink {
    /// Write `records` to the sink. `console` receives them for
    /// [`SampleSink::Stdout`].
    pub fn write<W: Write>(self, records: &[SampleRecord], console: &mut W) -> io::Result<()> {
        match self {
            SampleSink::Stdout => {
                writeln!(console, "Benchmark")?;
                write_samples(console, records, false)?;
                console.flush()
            }
            SampleSink::File { path, mut out } => {
                write_samples(&mut out, records, true)?;
                out.flush()?;
                log::info!("wrote {} samples to {}", records.len(), path.display());
                Ok(())
            }
        }
    }
}

/// Error type for reporting a run.
#[derive(Debug)]
pub enum ReportError {
    /// The output file could not be created.
    Open { path: PathBuf, source: io::Error },
    /// The benchmark itself refused to run.
    Harness(HarnessError),
    /// Writing the summary or the samples failed.
    Write(io::Error),
}

impl From<HarnessError> for ReportError {
    fn from(e: HarnessError) -> Self {
        ReportError::Harness(e)
    }
}

impl From<io::Error> for ReportError {
    fn from(e: io::Error) -> Self {
        ReportError::Write(e)
    }
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportError::Open { path, .. } => {
                write!(f, "failed to create output file {}", path.display())
            }
            ReportError::Harness(e) => write!(f, "benchmark failed: {e}"),
            ReportError::Write(_) => write!(f, "failed to write benchmark output"),
        }
    }
}

impl std::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReportError::Open { source, .. } => Some(source),
            ReportError::Harness(e) => Some(e),
            ReportError::Write(e) => Some(e),
        }
    }
}

pub fn write_summary<W: Write>(w: &mut W, summary: &RunSummary) -> io::Result<()> {
    writeln!(w, "Total Time: {}", summary.total_ms)?;
    writeln!(w, "Size: {}", summary.size)
}

pub fn write_samples<W: Write>(
    w: &mut W,
    records: &[SampleRecord],
    header: bool,
) -> io::Result<()> {
    if header {
        writeln!(w, "{CSV_HEADER}")?;
    }
    for r in records {
        writeln!(w, "{},{}", r.elapsed_ms, r.operation_count)?;
    }
    Ok(())
}

/// Send `records` to `destination`.
///
/// Errors opening or writing the file are returned as is.
pub fn report(records: &[SampleRecord], destination: &Destination) -> Result<(), ReportError> {
    match destination.open()? {
        SampleSink::Stdout => {
            let mut out = io::stdout().lock();
            write_samples(&mut out, records, false)?;
            out.flush()?;
        }
        file => file.write(records, &mut io::sink())?,
    }
    Ok(())
}

/// Open `destination`, run the harness, then print the summary to `console`
/// and emit the samples.
///
/// If the destination cannot be opened the harness is left untouched in its
/// `Idle` state.
pub fn run_and_report<T, W>(
    harness: &mut Harness<T>,
    destination: &Destination,
    console: &mut W,
) -> Result<RunSummary, ReportError>
where
    T: KeyValueTable,
    W: Write,
{
    let sink = destination.open()?;
    let summary = harness.run()?;
    write_summary(console, &summary)?;
    sink.write(&summary.samples, console)?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::{HarnessState, RunParams};
    use crate::keygen::KeyGenerator;
    use std::collections::BTreeMap;

    fn records() -> Vec<SampleRecord> {
        vec![
            SampleRecord {
                elapsed_ms: 3,
                operation_count: 10,
            },
            SampleRecord {
                elapsed_ms: 7,
                operation_count: 20,
            },
        ]
    }

    fn harness(total_ops: u64, sample_stride: u64) -> Harness<BTreeMap<String, i32>> {
        let params = RunParams {
            total_ops,
            sample_stride,
            key_len: 14,
        };
        Harness::new(params, BTreeMap::new(), KeyGenerator::seeded(8))
    }

    #[test]
    fn test_samples_without_header() {
        let mut buf = Vec::new();
        write_samples(&mut buf, &records(), false).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "3,10\n7,20\n");
    }

    #[test]
    fn test_samples_with_header() {
        let mut buf = Vec::new();
        write_samples(&mut buf, &records(), true).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "ms,nb_string\n3,10\n7,20\n");
    }

    #[test]
    fn test_summary_lines() {
        let summary = RunSummary {
            total_ms: 1234,
            size: 99,
            samples: records(),
        };
        let mut buf = Vec::new();
        write_summary(&mut buf, &summary).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "Total Time: 1234\nSize: 99\n");
    }

    #[test]
    fn test_stdout_sink_prints_banner_then_samples() {
        let mut buf = Vec::new();
        SampleSink::Stdout.write(&records(), &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "Benchmark\n3,10\n7,20\n");
    }

    #[test]
    fn test_run_and_report_console_layout() {
        let mut h = harness(20, 10);
        let mut buf = Vec::new();
        let summary = run_and_report(&mut h, &Destination::Stdout, &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], format!("Total Time: {}", summary.total_ms));
        assert_eq!(lines[1], "Size: 20");
        assert_eq!(lines[2], "Benchmark");
        assert_eq!(lines.len(), 5);
        assert!(lines[4].ends_with(",20"));
    }

    #[test]
    fn test_unopenable_file_leaves_harness_idle() {
        let dir = tempfile::tempdir().unwrap();
        let dest = Destination::File(dir.path().join("no").join("such").join("out.csv"));
        let mut h = harness(1_000, 100);
        let mut buf = Vec::new();

        let err = run_and_report(&mut h, &dest, &mut buf).unwrap_err();
        assert!(matches!(err, ReportError::Open { .. }), "{err}");
        assert_eq!(h.state(), HarnessState::Idle);
        assert_eq!(h.table().len(), 0);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_write_error_propagates() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "disk full"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }
        let err = write_samples(&mut Broken, &records(), true).unwrap_err();
        assert_eq!(err.to_string(), "disk full");

        let mut h = harness(10, 5);
        let err = run_and_report(&mut h, &Destination::Stdout, &mut Broken).unwrap_err();
        assert!(matches!(err, ReportError::Write(_)));
    }
}
