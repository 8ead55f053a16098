use std::mem;

use linked_hash_map::LinkedHashMap;

use consts::{GFF3_SET_URI, GVF_SET_URI, ID_STR, PARENT_STR, SEQUENCE_REGION_STR};
use ontology::{self, Vocabulary};


/// Attribute tags mapped to their values, in input order.
pub type Attributes = LinkedHashMap<String, Vec<String>>;

/// Strandedness of a feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strand {
    Positive,
    Negative,
    NotStranded,
    Unknown,
}

impl Strand {

    /// Interprets the strand column of a feature line.
    ///
    /// Unrecognized values, including the `.` placeholder, are treated as not stranded.
    pub fn from_column(value: &str) -> Strand {
        match value {
            "?" => Strand::Unknown,
            "+" => Strand::Positive,
            "-" => Strand::Negative,
            _ => Strand::NotStranded,
        }
    }

    /// Returns the name used when the strand is part of an identifier.
    pub fn name(&self) -> &'static str {
        match *self {
            Strand::Positive => "positive",
            Strand::Negative => "negative",
            Strand::NotStranded => "not_stranded",
            Strand::Unknown => "unknown",
        }
    }
}

/// Type column of a feature.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureType {
    /// Free-text type that is not part of any known ontology.
    Name(String),
    /// IRI of a SOFA term that was resolved by its label.
    Term(&'static str),
    /// Dereferenced IRI of an `SO:` accession.
    Accession(String),
}

impl FeatureType {

    pub fn as_str(&self) -> &str {
        match *self {
            FeatureType::Name(ref name) => name.as_str(),
            FeatureType::Term(iri) => iri,
            FeatureType::Accession(ref iri) => iri.as_str(),
        }
    }

    /// Returns whether the type refers to an ontology resource.
    pub fn is_iri(&self) -> bool {
        match *self {
            FeatureType::Name(_) => false,
            FeatureType::Term(_) | FeatureType::Accession(_) => true,
        }
    }
}

/// A single annotation record.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    seq_id: String,
    source: String,
    feature_type: FeatureType,
    start: u64,
    end: u64,
    score: Option<f64>,
    strand: Strand,
    phase: Option<u8>,
    attributes: Attributes,
}

impl Feature {

    pub fn seq_id(&self) -> &str {
        self.seq_id.as_str()
    }

    pub fn source(&self) -> &str {
        self.source.as_str()
    }

    pub fn feature_type(&self) -> &FeatureType {
        &self.feature_type
    }

    /// Returns the 1-based, inclusive start coordinate.
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Returns the 1-based, inclusive end coordinate.
    pub fn end(&self) -> u64 {
        self.end
    }

    pub fn score(&self) -> Option<f64> {
        self.score
    }

    pub fn strand(&self) -> Strand {
        self.strand
    }

    pub fn phase(&self) -> Option<u8> {
        self.phase
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Returns the first value of the `ID` attribute.
    pub fn id(&self) -> Option<&str> {
        self.attributes.get(ID_STR)
            .and_then(|values| values.first())
            .map(|v| v.as_str())
    }

    /// Returns the values of the `Parent` attribute.
    pub fn parents(&self) -> &[String] {
        self.attributes.get(PARENT_STR)
            .map(|values| values.as_slice())
            .unwrap_or(&[])
    }
}

/// Builder for features.
pub struct FBuilder {
    seq_id: String,
    source: String,
    feature_type: FeatureType,
    start: u64,
    end: u64,
    score: Option<f64>,
    strand: Strand,
    phase: Option<u8>,
    attributes: Attributes,
}

impl FBuilder {

    pub fn new<T>(seq_id: T, start: u64, end: u64) -> Self
        where T: Into<String>
    {
        FBuilder {
            seq_id: seq_id.into(),
            source: String::new(),
            feature_type: FeatureType::Name(String::new()),
            start: start,
            end: end,
            score: None,
            strand: Strand::NotStranded,
            phase: None,
            attributes: Attributes::new(),
        }
    }

    pub fn source<T>(mut self, source: T) -> Self
        where T: Into<String>
    {
        self.source = source.into();
        self
    }

    pub fn feature_type(mut self, feature_type: FeatureType) -> Self {
        self.feature_type = feature_type;
        self
    }

    pub fn score(mut self, score: Option<f64>) -> Self {
        self.score = score;
        self
    }

    pub fn strand(mut self, strand: Strand) -> Self {
        self.strand = strand;
        self
    }

    /// Sets the phase; values outside of 0, 1, and 2 are stored as absent.
    pub fn phase(mut self, phase: Option<u8>) -> Self {
        self.phase = phase.and_then(|p| if p <= 2 { Some(p) } else { None });
        self
    }

    /// Adds a value to an attribute tag.
    pub fn attribute<K, V>(mut self, tag: K, value: V) -> Self
        where K: Into<String>, V: Into<String>
    {
        self.attributes.entry(tag.into())
            .or_insert_with(Vec::new)
            .push(value.into());
        self
    }

    pub fn attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn build(self) -> Feature {
        Feature {
            seq_id: self.seq_id,
            source: self.source,
            feature_type: self.feature_type,
            start: self.start,
            end: self.end,
            score: self.score,
            strand: self.strand,
            phase: self.phase,
            attributes: self.attributes,
        }
    }
}

/// Bounds of a sequence, as declared by a `sequence-region` pragma.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedRegion {
    seq_id: String,
    start: u64,
    end: u64,
}

impl NamedRegion {

    pub fn new<T>(seq_id: T, start: u64, end: u64) -> Self
        where T: Into<String>
    {
        NamedRegion { seq_id: seq_id.into(), start: start, end: end }
    }

    pub fn seq_id(&self) -> &str {
        self.seq_id.as_str()
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }
}

/// Stored value of a pragma.
#[derive(Debug, Clone, PartialEq)]
pub enum Pragma {
    Version(f64),
    Regions(LinkedHashMap<String, NamedRegion>),
    Raw(String),
}

/// Parsed pragma line, describing how it is merged into a feature set.
#[derive(Debug, Clone, PartialEq)]
pub enum PragmaUpdate {
    /// Replaces the version stored under the pragma name.
    Version(String, f64),
    /// Adds or replaces a region in the `sequence-region` mapping.
    Region(NamedRegion),
    /// Replaces the raw value stored under the pragma name.
    Raw(String, String),
}

/// Input format, which determines the ontology a feature set is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Gff3,
    Gvf,
}

impl Format {

    pub fn vocabulary(&self) -> &'static Vocabulary {
        match *self {
            Format::Gff3 => &ontology::GFF3O,
            Format::Gvf => &ontology::GVF1O,
        }
    }

    pub fn default_set_uri(&self) -> &'static str {
        match *self {
            Format::Gff3 => GFF3_SET_URI,
            Format::Gvf => GVF_SET_URI,
        }
    }
}

/// Features and pragmas of one input.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSet {
    uri: String,
    format: Format,
    features: Vec<Feature>,
    pragmas: LinkedHashMap<String, Pragma>,
}

impl FeatureSet {

    pub fn new<T>(format: Format, uri: T) -> Self
        where T: Into<String>
    {
        FeatureSet {
            uri: uri.into(),
            format: format,
            features: Vec::new(),
            pragmas: LinkedHashMap::new(),
        }
    }

    /// Returns the IRI of the set, under which feature IRIs are created.
    pub fn uri(&self) -> &str {
        self.uri.as_str()
    }

    pub fn format(&self) -> Format {
        self.format
    }

    /// Returns the features in input order.
    pub fn features(&self) -> &[Feature] {
        self.features.as_slice()
    }

    pub fn add(&mut self, feature: Feature) {
        self.features.push(feature);
    }

    /// Returns all pragmas in the order they were first seen.
    pub fn pragmas(&self) -> &LinkedHashMap<String, Pragma> {
        &self.pragmas
    }

    pub fn pragma(&self, name: &str) -> Option<&Pragma> {
        self.pragmas.get(name)
    }

    /// Returns the regions declared by `sequence-region` pragmas.
    pub fn regions(&self) -> Option<&LinkedHashMap<String, NamedRegion>> {
        match self.pragmas.get(SEQUENCE_REGION_STR) {
            Some(&Pragma::Regions(ref regions)) => Some(regions),
            _ => None,
        }
    }

    /// Merges a parsed pragma into the set.
    pub fn apply_pragma(&mut self, update: PragmaUpdate) {
        match update {
            PragmaUpdate::Version(name, version) => {
                let _ = self.pragmas.insert(name, Pragma::Version(version));
            },
            PragmaUpdate::Raw(name, value) => {
                let _ = self.pragmas.insert(name, Pragma::Raw(value));
            },
            PragmaUpdate::Region(region) => {
                if let Some(&mut Pragma::Regions(ref mut regions)) =
                    self.pragmas.get_mut(SEQUENCE_REGION_STR)
                {
                    let _ = regions.insert(region.seq_id.clone(), region);
                    return;
                }
                let mut regions = LinkedHashMap::new();
                let _ = regions.insert(region.seq_id.clone(), region);
                let _ = self.pragmas.insert(SEQUENCE_REGION_STR.to_owned(),
                                            Pragma::Regions(regions));
            },
        }
    }

    /// Removes all features while retaining the pragmas.
    pub fn prune(&mut self) -> Vec<Feature> {
        mem::replace(&mut self.features, Vec::new())
    }
}
