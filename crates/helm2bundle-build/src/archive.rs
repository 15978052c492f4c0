use std::cell::Cell;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use flate2::read::MultiGzDecoder;
use glob::{MatchOptions, Pattern};
use helm2bundle_core::ChartMetadata;
use tar::Archive;

/// File name of the chart metadata member.
pub const CHART_FILE: &str = "Chart.yaml";
/// File name of the default values member.
pub const VALUES_FILE: &str = "values.yaml";

/// `*` must not cross a `/`, so `*/Chart.yaml` only matches one directory level.
const MEMBER_MATCH: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

static CHART_PATTERN: LazyLock<Pattern> = LazyLock::new(|| member_pattern(CHART_FILE));
static VALUES_PATTERN: LazyLock<Pattern> = LazyLock::new(|| member_pattern(VALUES_FILE));

fn member_pattern(file_name: &str) -> Pattern {
    Pattern::new(&format!("*/{file_name}")).expect("member pattern must be a valid glob")
}

/// Which of the two required members an archive path refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Chart,
    Values,
}

/// Classify an archive member path against `*/Chart.yaml` and `*/values.yaml`.
///
/// Only a member sitting directly under a single top-level directory matches;
/// `mychart/charts/sub/Chart.yaml` and a bare `Chart.yaml` are ignored.
pub fn classify_member(path: &str) -> Option<MemberKind> {
    if CHART_PATTERN.matches_with(path, MEMBER_MATCH) {
        Some(MemberKind::Chart)
    } else if VALUES_PATTERN.matches_with(path, MEMBER_MATCH) {
        Some(MemberKind::Values)
    } else {
        None
    }
}

/// Data pulled out of a chart archive, ready for the descriptor and Dockerfile.
///
/// A result always has a non-empty chart name and non-empty values text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    name: String,
    description: String,
    icon: String,
    archive_file_name: String,
    values: String,
}

impl ExtractionResult {
    /// Returns `None` when the chart has no name or the values text is empty.
    pub fn new(
        chart: ChartMetadata,
        archive_file_name: impl Into<String>,
        values: String,
    ) -> Option<Self> {
        if !chart.has_name() || values.is_empty() {
            return None;
        }
        Some(Self {
            name: chart.name,
            description: chart.description,
            icon: chart.icon,
            archive_file_name: archive_file_name.into(),
            values,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }

    /// The archive path as given by the caller, not derived from its contents.
    pub fn archive_file_name(&self) -> &str {
        &self.archive_file_name
    }

    /// The complete, unmodified text of `values.yaml`.
    pub fn values(&self) -> &str {
        &self.values
    }
}

/// Open the gzipped chart archive at `path` and extract its chart metadata
/// and values.
pub fn extract_chart(path: impl AsRef<Path>) -> Result<ExtractionResult, ExtractError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| ExtractError::Open {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::debug!(path = %path.display(), "scanning chart archive");

    extract_from_reader(file, path.display().to_string())
}

/// Scan a gzipped tar stream for `*/Chart.yaml` and `*/values.yaml`.
///
/// Members are visited in archive order, one at a time. The scan stops as soon
/// as a chart with a non-empty name and non-empty values text have both been
/// captured, so nothing after that point is read from `reader`. A metadata
/// member without a name does not count as found and scanning continues.
///
/// The tar stream may span several concatenated gzip members.
pub fn extract_from_reader<R: Read>(
    reader: R,
    archive_file_name: impl Into<String>,
) -> Result<ExtractionResult, ExtractError> {
    let layers = Layers::default();
    let source = Tracked::new(reader, &layers.source_failed);
    let gzip = Tracked::new(MultiGzDecoder::new(source), &layers.gzip_failed);
    let mut archive = Archive::new(gzip);
    let mut scan = ChartScan::default();

    let entries = archive.entries().map_err(|e| layers.classify(e))?;
    for entry in entries {
        let mut entry = entry.map_err(|e| layers.classify(e))?;
        let member = entry
            .path()
            .map_err(|e| layers.classify(e))?
            .to_string_lossy()
            .into_owned();
        tracing::trace!(member = %member, "archive member");

        let Some(kind) = classify_member(&member) else {
            continue;
        };
        let content = read_member(&mut entry).map_err(|e| layers.classify(e))?;

        match kind {
            MemberKind::Chart => {
                let chart = ChartMetadata::from_yaml(&content).map_err(|e| {
                    ExtractError::MetadataParse {
                        member: member.clone(),
                        source: e,
                    }
                })?;
                tracing::debug!(member = %member, chart = %chart.name, "captured chart metadata");
                scan.chart = Some(chart);
            }
            MemberKind::Values => {
                let values = String::from_utf8(content).map_err(|e| {
                    ExtractError::ValuesEncoding {
                        member: member.clone(),
                        source: e,
                    }
                })?;
                tracing::debug!(member = %member, bytes = values.len(), "captured values");
                scan.values = values;
            }
        }

        if scan.is_complete() {
            tracing::debug!("chart metadata and values found, stopping scan");
            break;
        }
    }

    scan.finish(archive_file_name.into())
}

fn read_member<R: Read>(entry: &mut R) -> io::Result<Vec<u8>> {
    let mut content = Vec::new();
    entry.read_to_end(&mut content)?;
    Ok(content)
}

/// What the scan has captured so far.
#[derive(Default)]
struct ChartScan {
    chart: Option<ChartMetadata>,
    values: String,
}

impl ChartScan {
    fn has_chart(&self) -> bool {
        self.chart.as_ref().is_some_and(ChartMetadata::has_name)
    }

    fn is_complete(&self) -> bool {
        self.has_chart() && !self.values.is_empty()
    }

    fn finish(self, archive_file_name: String) -> Result<ExtractionResult, ExtractError> {
        let missing = match (self.has_chart(), !self.values.is_empty()) {
            (true, true) => None,
            (true, false) => Some(MissingMember::Values),
            (false, true) => Some(MissingMember::Chart),
            (false, false) => Some(MissingMember::Both),
        };
        if let Some(missing) = missing {
            return Err(ExtractError::MissingMember(missing));
        }

        match self.chart {
            Some(chart) => ExtractionResult::new(chart, archive_file_name, self.values)
                .ok_or(ExtractError::MissingMember(MissingMember::Both)),
            None => Err(ExtractError::MissingMember(MissingMember::Chart)),
        }
    }
}

/// Failure flags for the two stream layers below the tar reader.
///
/// The tar reader surfaces every failure as a plain `io::Error`; the flags
/// record which layer actually produced it.
#[derive(Default)]
struct Layers {
    source_failed: Cell<bool>,
    gzip_failed: Cell<bool>,
}

impl Layers {
    fn classify(&self, err: io::Error) -> ExtractError {
        if self.source_failed.get() {
            ExtractError::Read { source: err }
        } else if self.gzip_failed.get() {
            ExtractError::Decompress { source: err }
        } else {
            ExtractError::Format { source: err }
        }
    }
}

/// Reader adapter that raises a flag when the wrapped reader fails.
struct Tracked<'a, R> {
    inner: R,
    failed: &'a Cell<bool>,
}

impl<'a, R> Tracked<'a, R> {
    fn new(inner: R, failed: &'a Cell<bool>) -> Self {
        Self { inner, failed }
    }
}

impl<R: Read> Read for Tracked<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf).inspect_err(|_| self.failed.set(true))
    }
}

/// Which required member(s) an archive turned out not to contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingMember {
    /// No `Chart.yaml` with a non-empty name.
    Chart,
    /// No non-empty `values.yaml`.
    Values,
    Both,
}

impl std::fmt::Display for MissingMember {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Chart => write!(f, "{CHART_FILE} not found in archive"),
            Self::Values => write!(f, "{VALUES_FILE} not found in archive"),
            Self::Both => write!(f, "could not find both {CHART_FILE} and {VALUES_FILE}"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("failed to open chart archive {path}")]
    Open { path: PathBuf, source: io::Error },
    #[error("failed to read chart archive")]
    Read { source: io::Error },
    #[error("chart archive is not valid gzip data")]
    Decompress { source: io::Error },
    #[error("chart archive is not a valid tar archive")]
    Format { source: io::Error },
    #[error("failed to parse {member}")]
    MetadataParse {
        member: String,
        source: helm2bundle_core::Error,
    },
    #[error("{member} is not valid UTF-8")]
    ValuesEncoding {
        member: String,
        source: std::string::FromUtf8Error,
    },
    #[error("{0}")]
    MissingMember(MissingMember),
}
