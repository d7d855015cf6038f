use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::{debug, warn};

use crate::error::ReportError;

use super::junit_model::{Case, ResultMarker, Suite};

const TAG_REPORT: &[u8] = b"testsuites";
const TAG_TEST_SUITE: &[u8] = b"testsuite";
const TAG_TEST_CASE: &[u8] = b"testcase";
const TAG_ERROR: &[u8] = b"error";
const TAG_FAILURE: &[u8] = b"failure";
const TAG_SKIPPED: &[u8] = b"skipped";

/// Children of `<testcase>` that carry output or metadata, not a result.
const IGNORED_CASE_CHILDREN: [&[u8]; 4] =
    [b"system-out", b"system-err", b"properties", b"property"];

// ============================================================================
// Public entry points
// ============================================================================

/// Read an XUnit XML file into its suites.
pub fn read_junit_file(path: impl AsRef<Path>) -> Result<Vec<Suite>, ReportError> {
    let path = path.as_ref();
    let xml = std::fs::read_to_string(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = xml.len(), "read XUnit file");
    read_junit_str(&xml)
}

/// Parse an XUnit XML document.
///
/// The root is either `<testsuites>` holding any number of suites, or a
/// single bare `<testsuite>`. A suite nested in another suite becomes its
/// own entry; each case belongs to the innermost suite enclosing it.
pub fn read_junit_str(xml: &str) -> Result<Vec<Suite>, ReportError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut parser = JunitReader::default();
    loop {
        let event = reader.read_event().map_err(|source| ReportError::Xml {
            context: format!("at byte {}", reader.buffer_position()),
            source,
        })?;
        match event {
            Event::Eof => break,
            Event::Start(e) => parser.open(&e)?,
            Event::Empty(e) => {
                parser.open(&e)?;
                parser.close(e.name().as_ref());
            }
            Event::End(e) => parser.close(e.name().as_ref()),
            _ => (),
        }
    }

    if !parser.saw_root {
        return Err(ReportError::NoSuites);
    }
    Ok(parser.suites)
}

// ============================================================================
// Event-driven state
// ============================================================================

#[derive(Debug, Default)]
struct JunitReader {
    /// Suites in the order they were opened
    suites: Vec<Suite>,
    /// Indexes into `suites` of the currently open, possibly nested, suites
    open_suites: Vec<usize>,
    current_case: Option<Case>,
    /// Depth of elements opened inside the current `<testcase>`
    case_depth: usize,
    saw_root: bool,
}

impl JunitReader {
    fn open(&mut self, e: &BytesStart) -> Result<(), ReportError> {
        let tag = e.name();
        let tag = tag.as_ref();

        if let Some(case) = self.current_case.as_mut() {
            self.case_depth += 1;
            // Only direct children of <testcase> can be result markers.
            if self.case_depth == 1 {
                set_case_result(case, tag, e)?;
            }
            return Ok(());
        }

        match tag {
            TAG_REPORT => self.saw_root = true,
            TAG_TEST_SUITE => {
                self.saw_root = true;
                let suite = open_suite(e)?;
                if let Some(&parent) = self.open_suites.last() {
                    let parent = &self.suites[parent].name;
                    debug!(suite = %suite.name, parent = %parent, "nested suite");
                }
                self.open_suites.push(self.suites.len());
                self.suites.push(suite);
            }
            TAG_TEST_CASE => {
                if self.open_suites.is_empty() {
                    warn!("<testcase> outside of any <testsuite>, ignored");
                    return Ok(());
                }
                let name = required_attr(e, "testcase", "name")?;
                self.current_case = Some(Case::passed(name));
                self.case_depth = 0;
            }
            _ => (),
        }
        Ok(())
    }

    fn close(&mut self, tag: &[u8]) {
        if self.current_case.is_some() {
            if self.case_depth > 0 {
                self.case_depth -= 1;
                return;
            }
            if tag == TAG_TEST_CASE {
                if let (Some(&index), Some(case)) =
                    (self.open_suites.last(), self.current_case.take())
                {
                    self.suites[index].cases.push(case);
                }
            }
            return;
        }

        if tag == TAG_TEST_SUITE {
            if let Some(index) = self.open_suites.pop() {
                let suite = &self.suites[index];
                debug!(suite = %suite.name, cases = suite.cases.len(), "parsed suite");
            }
        }
    }
}

fn open_suite(e: &BytesStart) -> Result<Suite, ReportError> {
    let name = required_attr(e, "testsuite", "name")?;
    let mut suite = Suite::new(name);

    if let Some(time) = optional_attr(e, "testsuite", "time")? {
        suite.time = time
            .trim()
            .parse::<f64>()
            .map_err(|_| ReportError::InvalidAttribute {
                element: "testsuite".into(),
                attribute: "time".into(),
                value: time.clone(),
            })?;
    }
    if let Some(timestamp) = optional_attr(e, "testsuite", "timestamp")? {
        suite.timestamp = timestamp;
    }
    Ok(suite)
}

fn set_case_result(case: &mut Case, tag: &[u8], e: &BytesStart) -> Result<(), ReportError> {
    if IGNORED_CASE_CHILDREN.iter().any(|child| *child == tag) {
        return Ok(());
    }
    if case.result.is_some() {
        warn!(case = %case.name, "test case has more than one result element, keeping the first");
        return Ok(());
    }

    let element = String::from_utf8_lossy(tag).into_owned();
    let message = optional_attr(e, &element, "message")?;
    let marker = match tag {
        TAG_ERROR => ResultMarker::Error { message },
        TAG_FAILURE => ResultMarker::Failure { message },
        TAG_SKIPPED => ResultMarker::Skipped { message },
        _ => ResultMarker::other(element),
    };
    case.result = Some(marker);
    Ok(())
}

// ============================================================================
// Attribute helpers
// ============================================================================

fn optional_attr(
    e: &BytesStart,
    element: &str,
    attribute: &str,
) -> Result<Option<String>, ReportError> {
    let xml_err = |source| ReportError::Xml {
        context: format!("<{}> attribute '{}'", element, attribute),
        source,
    };
    match e.try_get_attribute(attribute).map_err(xml_err)? {
        Some(attr) => {
            let value = attr.unescape_value().map_err(xml_err)?;
            Ok(Some(value.into_owned()))
        }
        None => Ok(None),
    }
}

fn required_attr(e: &BytesStart, element: &str, attribute: &str) -> Result<String, ReportError> {
    optional_attr(e, element, attribute)?.ok_or_else(|| ReportError::MissingAttribute {
        element: element.into(),
        attribute: attribute.into(),
    })
}
