use std::path::Path;

use crate::{
    error::ReportError,
    junit::reader::read_junit_file,
    testrun::{
        builder::{BuiltTestRun, ReportBuilder},
        context::ReporterContext,
    },
};

pub mod cli;
pub mod error;
pub mod feature;
pub mod junit;
pub mod testrun;

/// Read an XUnit XML report and build one TM4J testrun per suite.
///
/// Fails on the first suite containing a result marker TM4J has no status
/// for. Test case key mismatches are reported as warnings on each run.
pub fn report_testruns(
    xunit_path: impl AsRef<Path>,
    context: ReporterContext,
) -> Result<Vec<BuiltTestRun>, ReportError> {
    let suites = read_junit_file(xunit_path)?;
    ReportBuilder::new(context).build_all(&suites)
}
