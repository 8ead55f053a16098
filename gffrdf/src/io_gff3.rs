/*! Reader for the GFF3 format and its GVF sibling.

GFF3 is a feature-oriented, tab-separated format. Each feature line has nine columns: sequence
identifier, source, type, start, end, score, strand, phase, and attributes. Lines starting with
`##` are pragmas that carry file-level metadata, other lines starting with `#` are comments. A
`##FASTA` directive ends the tabular part of the input.

The format is documented by the Sequence Ontology project
[here](https://github.com/The-Sequence-Ontology/Specifications/blob/master/gff3.md).

Reading happens in sessions. A session may stop after a fixed number of features (a batch) and
be resumed later on, continuing from the first unread line of the input.
*/
use std::cmp::max;
use std::fs;
use std::io::{self, BufRead, BufReader};
use std::num::{ParseFloatError, ParseIntError};
use std::path::Path;

use regex::Regex;

use {Attributes, FBuilder, Feature, FeatureSet, FeatureType, Format, NamedRegion, PragmaUpdate,
     Strand};
use consts::{COMMENT_PREFIX, FASTA_PREFIX, GFF_VERSION_STR, GVF_VERSION_STR, NUM_COLUMNS,
             PRAGMA_PREFIX, SEQUENCE_REGION_STR, UNK_STR};
use ontology::{self, OBO_NS};


quick_error! {
    /// Errors that occur when a single line can not be interpreted.
    #[derive(Debug)]
    pub enum RecordError {
        /// Occurs when a feature line does not have exactly nine columns.
        ColumnCount(found: usize) {
            description("feature line does not have 9 tab-separated columns")
            display("expected {} tab-separated columns, found {}", NUM_COLUMNS, found)
        }
        /// Occurs when the start or end column is not a valid u64 value.
        InvalidCoord(err: ParseIntError, value: String) {
            description("coordinate is not a valid integer")
            display("invalid coordinate '{}': {}", value, err)
            cause(err)
        }
        /// Occurs when the score column is neither `.` nor a floating point value.
        InvalidScore(err: ParseFloatError, value: String) {
            description("score is not a valid floating point value")
            display("invalid score '{}': {}", value, err)
            cause(err)
        }
        /// Occurs when an attribute does not have a `=` separating its tag and values.
        InvalidAttribute(segment: String) {
            description("attribute has no tag-value separator")
            display("attribute '{}' has no '=' separator", segment)
        }
        /// Occurs when the value of a pragma with a dedicated interpretation is malformed.
        InvalidPragma(name: String, value: String) {
            description("pragma has an invalid value")
            display("pragma '{}' has an invalid value '{}'", name, value)
        }
    }
}

quick_error! {
    /// Errors that occur when reading GFF3 input.
    #[derive(Debug)]
    pub enum Gff3Error {
        /// Occurs when a line can not be parsed. The line number is 1-based.
        MalformedRecord(line_no: usize, err: RecordError) {
            description("malformed record")
            display("malformed record at line {}: {}", line_no, err)
            cause(err)
        }
        /// Occurs when a session that has already finished is resumed.
        SessionComplete {
            description("session has already finished reading its input")
        }
        /// Generic wrapper for errors of the underlying input.
        Io(err: io::Error) {
            description("error reading input")
            display("error reading input: {}", err)
            from()
            cause(err)
        }
    }
}

/// Classification of a single input line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineResult {
    Feature(Feature),
    Pragma(PragmaUpdate),
    /// Comment or blank line.
    Skip,
    /// A `##FASTA` directive; no feature lines follow.
    Fasta,
}

/// Parser for single GFF3 lines.
///
/// Holds the compiled patterns, so it is meant to be created once and reused for all lines of
/// an input.
#[derive(Debug, Clone)]
pub struct LineParser {
    accession_regex: Regex,
    version_regex: Regex,
}

impl LineParser {

    pub fn new() -> ::Result<Self> {
        Ok(LineParser {
            accession_regex: Regex::new(r"^SO:\d+$")?,
            version_regex: Regex::new(r"^[+-]?\d+(\.\d+)?")?,
        })
    }

    /// Classifies and parses a line.
    ///
    /// Trailing line terminators are ignored.
    pub fn parse_line(&self, raw_line: &str) -> Result<LineResult, RecordError> {
        let line = raw_line.trim_end_matches(|c: char| c == '\n' || c == '\r');

        if line.trim().is_empty() {
            return Ok(LineResult::Skip);
        }
        if !line.starts_with(PRAGMA_PREFIX) {
            if line.starts_with(COMMENT_PREFIX) {
                return Ok(LineResult::Skip);
            }
            return self.parse_feature(line).map(LineResult::Feature);
        }
        if line.starts_with(FASTA_PREFIX) {
            return Ok(LineResult::Fasta);
        }
        self.parse_pragma(&line[PRAGMA_PREFIX.len()..]).map(LineResult::Pragma)
    }

    fn parse_feature(&self, line: &str) -> Result<Feature, RecordError> {
        let columns = line.split('\t').collect::<Vec<&str>>();
        if columns.len() != NUM_COLUMNS {
            return Err(RecordError::ColumnCount(columns.len()));
        }

        let source = if columns[1] == UNK_STR { "" } else { columns[1] };

        Ok(FBuilder::new(columns[0], parse_coord(columns[3])?, parse_coord(columns[4])?)
            .source(source)
            .feature_type(self.parse_type(columns[2]))
            .score(parse_score(columns[5])?)
            .strand(Strand::from_column(columns[6]))
            .phase(parse_phase(columns[7]))
            .attributes(parse_attributes(columns[8])?)
            .build())
    }

    /// Resolves the type column into an accession IRI, a SOFA term, or a plain name.
    fn parse_type(&self, value: &str) -> FeatureType {
        if self.accession_regex.is_match(value) {
            return FeatureType::Accession(format!("{}{}", OBO_NS, value.replacen(":", "_", 1)));
        }
        match ontology::sofa_term(&value.replace(' ', "_")) {
            Some(iri) => FeatureType::Term(iri),
            None => FeatureType::Name(value.to_owned()),
        }
    }

    fn parse_pragma(&self, body: &str) -> Result<PragmaUpdate, RecordError> {
        let mut parts = body.splitn(2, char::is_whitespace);
        let name = parts.next().unwrap_or("").to_owned();
        let value = parts.next().unwrap_or("").trim();

        let invalid = || RecordError::InvalidPragma(name.clone(), value.to_owned());

        match name.as_str() {
            GFF_VERSION_STR | GVF_VERSION_STR => {
                let version = self.version_regex.find(value)
                    .and_then(|m| m.as_str().parse::<f64>().ok())
                    .ok_or_else(&invalid)?;
                Ok(PragmaUpdate::Version(name.clone(), version))
            },
            SEQUENCE_REGION_STR => {
                // Missing or non-numeric coordinates fall back to zero.
                let mut tokens = value.split_whitespace();
                match tokens.next() {
                    Some(seq_id) => {
                        let start = parse_region_coord(tokens.next());
                        let end = parse_region_coord(tokens.next());
                        Ok(PragmaUpdate::Region(NamedRegion::new(seq_id, start, end)))
                    },
                    None => Ok(PragmaUpdate::Raw(name.clone(), value.to_owned())),
                }
            },
            _ => Ok(PragmaUpdate::Raw(name.clone(), value.to_owned())),
        }
    }
}

#[inline]
fn parse_coord(value: &str) -> Result<u64, RecordError> {
    value.parse::<u64>()
        .map_err(|e| RecordError::InvalidCoord(e, value.to_owned()))
}

#[inline]
fn parse_region_coord(token: Option<&str>) -> u64 {
    token.and_then(|t| t.parse::<u64>().ok()).unwrap_or(0)
}

#[inline]
fn parse_score(value: &str) -> Result<Option<f64>, RecordError> {
    if value == UNK_STR {
        return Ok(None);
    }
    value.parse::<f64>()
        .map(Some)
        .map_err(|e| RecordError::InvalidScore(e, value.to_owned()))
}

#[inline]
fn parse_phase(value: &str) -> Option<u8> {
    match value {
        "0" => Some(0),
        "1" => Some(1),
        "2" => Some(2),
        _ => None,
    }
}

/// Parses the attribute column into tags and their values.
///
/// A tag occurring more than once keeps the position of its first occurrence and the values of
/// its last one.
fn parse_attributes(value: &str) -> Result<Attributes, RecordError> {
    let mut attributes = Attributes::new();
    if value == UNK_STR {
        return Ok(attributes);
    }
    for segment in value.split(';').filter(|s| !s.trim().is_empty()) {
        let mut kv = segment.splitn(2, '=');
        let tag = kv.next().unwrap_or("").trim();
        let values = kv.next()
            .ok_or_else(|| RecordError::InvalidAttribute(segment.to_owned()))?
            .split(',')
            .map(|v| v.trim().to_owned())
            .collect::<Vec<String>>();
        if let Some(existing) = attributes.get_mut(tag) {
            *existing = values;
            continue;
        }
        let _ = attributes.insert(tag.to_owned(), values);
    }
    Ok(attributes)
}

/// GFF3 reader.
///
/// The reader only holds configuration. Reading itself happens in a [`Session`] created by
/// one of the `deserialize` methods.
#[derive(Debug, Clone)]
pub struct Reader {
    format: Format,
    batch_size: Option<usize>,
    set_uri: Option<String>,
}

impl Reader {

    /// Creates a reader whose feature sets are bound to the given format.
    pub fn new(format: Format) -> Reader {
        Reader {
            format: format,
            batch_size: None,
            set_uri: None,
        }
    }

    /// Sets the number of features read before a session is postponed.
    ///
    /// `None` reads the whole input at once. A size of zero is treated as one.
    pub fn batch_size(&mut self, batch_size: Option<usize>) -> &mut Self {
        self.batch_size = batch_size.map(|n| max(n, 1));
        self
    }

    /// Sets the IRI of created feature sets, replacing the format default.
    pub fn set_uri<T>(&mut self, uri: T) -> &mut Self
        where T: Into<String>
    {
        self.set_uri = Some(uri.into());
        self
    }

    /// Starts a session on the given input and reads its first batch.
    pub fn deserialize<R: BufRead>(&self, input: R) -> ::Result<Session<R>> {
        let uri = self.set_uri.as_ref()
            .map(|v| v.as_str())
            .unwrap_or_else(|| self.format.default_set_uri());
        debug!("starting {:?} session for set {}, batch size {:?}",
               self.format, uri, self.batch_size);

        let mut session = Session {
            lines: input.lines(),
            parser: LineParser::new()?,
            batch_size: self.batch_size,
            line_no: 0,
            state: SessionState::Postponed,
            feature_set: FeatureSet::new(self.format, uri),
        };
        session.read_batch()?;
        Ok(session)
    }

    /// Starts a session on in-memory text.
    pub fn deserialize_str<'a>(&self, text: &'a str) -> ::Result<Session<&'a [u8]>> {
        self.deserialize(text.as_bytes())
    }

    /// Starts a session on the file at the given path.
    pub fn deserialize_file<P>(&self, path: P) -> ::Result<Session<BufReader<fs::File>>>
        where P: AsRef<Path>
    {
        let file = fs::File::open(path).map_err(Gff3Error::from)?;
        self.deserialize(BufReader::new(file))
    }
}

/// State of a session after a batch was read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// The batch limit was reached; more input may follow.
    Postponed,
    /// All input was consumed.
    Complete,
}

/// A reading session over one input.
///
/// The session owns the input, which is released when the session is dropped or turned into
/// its feature set.
pub struct Session<R> {
    lines: io::Lines<R>,
    parser: LineParser,
    batch_size: Option<usize>,
    line_no: usize,
    state: SessionState,
    feature_set: FeatureSet,
}

impl<R: BufRead> Session<R> {

    /// Returns whether the last batch stopped at the batch limit.
    pub fn postponed(&self) -> bool {
        self.state == SessionState::Postponed
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Returns the feature set with the features of the last batch.
    pub fn feature_set(&self) -> &FeatureSet {
        &self.feature_set
    }

    /// Ends the session, returning the feature set of the last batch.
    pub fn into_feature_set(self) -> FeatureSet {
        self.feature_set
    }

    /// Reads the next batch.
    ///
    /// Features of the previous batch are discarded while pragmas are retained. Resuming a
    /// session that has already consumed all of its input is an error.
    pub fn resume(&mut self) -> ::Result<&FeatureSet> {
        if self.state == SessionState::Complete {
            return Err(::Error::from(Gff3Error::SessionComplete));
        }
        let _ = self.feature_set.prune();
        self.read_batch()?;
        Ok(&self.feature_set)
    }

    fn read_batch(&mut self) -> ::Result<()> {
        let result = self.fill_batch();
        if result.is_err() {
            self.state = SessionState::Complete;
        }
        result.map_err(::Error::from)
    }

    fn fill_batch(&mut self) -> Result<(), Gff3Error> {
        let mut feature_no = 0;

        while let Some(line) = self.lines.next() {
            let line = line?;
            self.line_no += 1;
            let line_no = self.line_no;

            let parsed = self.parser.parse_line(&line)
                .map_err(|e| Gff3Error::MalformedRecord(line_no, e))?;
            match parsed {
                LineResult::Skip => {},
                LineResult::Fasta => {
                    debug!("reached FASTA section at line {}", line_no);
                    self.finish();
                    return Ok(());
                },
                LineResult::Pragma(update) => {
                    debug!("merging pragma at line {}: {:?}", line_no, update);
                    self.feature_set.apply_pragma(update);
                },
                LineResult::Feature(feature) => {
                    self.feature_set.add(feature);
                    feature_no += 1;
                    if self.batch_size.map_or(false, |limit| feature_no >= limit) {
                        debug!("postponing after {} features, at line {}", feature_no, line_no);
                        self.state = SessionState::Postponed;
                        return Ok(());
                    }
                },
            }
        }

        self.finish();
        Ok(())
    }

    fn finish(&mut self) {
        info!("finished reading {} lines into set {}", self.line_no, self.feature_set.uri());
        self.state = SessionState::Complete;
    }
}
