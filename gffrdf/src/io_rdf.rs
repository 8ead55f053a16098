/*! Writer for RDF in the N-Triples format.

A feature set is written as one set resource that contains one resource per feature. Each
feature resource carries its column values, links to its parents, and one attribute resource per
attribute value. The ontology terms are taken from the vocabulary bound to the feature set's
format.

All resource IRIs are derived from the set IRI and the feature identity, so writing the same
feature set twice yields identical output.
*/
use std::borrow::Cow;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use itertools::Itertools;

use {Feature, FeatureSet, Pragma, Strand, Term};
use consts::{ID_STR, PARENT_STR};
use ontology::{rdf, PropertyKind, Vocabulary};
use ntriples::IriRef;


quick_error! {
    /// Errors that occur when writing triples.
    #[derive(Debug)]
    pub enum RdfError {
        /// Occurs when the vocabulary bound to a feature set lacks a required term.
        MissingTerm(vocabulary: &'static str, label: &'static str) {
            description("vocabulary does not define a required term")
            display("vocabulary {} does not define the term '{}'", vocabulary, label)
        }
        /// Generic wrapper for errors of the underlying sink.
        Io(err: io::Error) {
            description("error writing output")
            display("error writing output: {}", err)
            from()
            cause(err)
        }
    }
}

/// Ontology terms used when writing one feature set.
struct Terms {
    set: &'static str,
    feature: &'static str,
    attribute: &'static str,
    contains: &'static str,
    seqid: &'static str,
    source: &'static str,
    feature_type: &'static str,
    start: &'static str,
    end: &'static str,
    score: &'static str,
    strand: &'static str,
    phase: &'static str,
    attributes: &'static str,
    tag: &'static str,
    parent: &'static str,
    not_stranded: &'static str,
    unknown_strand: &'static str,
    positive: &'static str,
    negative: &'static str,
}

impl Terms {

    fn resolve(vocab: &'static Vocabulary) -> Result<Terms, RdfError> {
        let term = |label: &'static str| {
            vocab.term(label).ok_or(RdfError::MissingTerm(vocab.name(), label))
        };
        let datatype_root = vocab.feature_property(PropertyKind::Datatype);
        let object_root = vocab.feature_property(PropertyKind::Object);
        let with_parent = |label: &'static str, root: &str| {
            vocab.with_parent(label, root).ok_or(RdfError::MissingTerm(vocab.name(), label))
        };

        Ok(Terms {
            set: term("Set")?,
            feature: term("Feature")?,
            attribute: term("Attribute")?,
            contains: term("contains")?,
            seqid: with_parent("seqid", datatype_root)?,
            source: term("source")?,
            feature_type: term("type")?,
            start: with_parent("start", datatype_root)?,
            end: with_parent("end", datatype_root)?,
            score: term("score")?,
            strand: with_parent("strand", object_root)?,
            phase: term("phase")?,
            attributes: term("attributes")?,
            tag: term("tag")?,
            parent: term("parent")?,
            not_stranded: term("NotStranded")?,
            unknown_strand: term("UnknownStrand")?,
            positive: term("Positive")?,
            negative: term("Negative")?,
        })
    }

    #[inline]
    fn strand_class(&self, strand: Strand) -> &'static str {
        match strand {
            Strand::NotStranded => self.not_stranded,
            Strand::Unknown => self.unknown_strand,
            Strand::Positive => self.positive,
            Strand::Negative => self.negative,
        }
    }
}

/// N-Triples writer.
pub struct Writer<W: Write> {
    inner: W,
}

impl<W: Write> Writer<W> {

    /// Creates an N-Triples writer from another writer.
    pub fn from_writer(in_writer: W) -> Writer<W> {
        Writer { inner: in_writer }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.inner
    }

    /// Writes all triples of the given feature set and flushes the underlying writer.
    ///
    /// The underlying writer is not closed. If an error occurs, triples written before it
    /// remain in the output.
    pub fn serialize(&mut self, feature_set: &FeatureSet) -> ::Result<()> {
        self.write_feature_set(feature_set)
            .and_then(|_| self.inner.flush().map_err(RdfError::from))
            .map_err(::Error::from)
    }

    fn write_feature_set(&mut self, feature_set: &FeatureSet) -> Result<(), RdfError> {
        let vocab = feature_set.format().vocabulary();
        let terms = Terms::resolve(vocab)?;
        let set = Term::iri(feature_set.uri());

        self.statement(&set, rdf::TYPE, &Term::iri(terms.set))?;

        for (name, pragma) in feature_set.pragmas().iter() {
            if let Pragma::Version(version) = *pragma {
                if let Some(predicate) = vocab.version_property(name) {
                    self.statement(&set, predicate, &Term::float(version))?;
                }
            }
        }

        for feature in feature_set.features() {
            self.write_feature(&terms, feature_set.uri(), &set, feature)?;
        }
        debug!("wrote {} features of set {} using {}",
               feature_set.features().len(), feature_set.uri(), vocab.name());
        Ok(())
    }

    fn write_feature(
        &mut self,
        terms: &Terms,
        set_uri: &str,
        set: &Term,
        feature: &Feature,
    ) -> Result<(), RdfError> {
        let feature_iri = feature_iri(set_uri, feature);
        trace!("writing feature {}", feature_iri);
        let subject = Term::iri(feature_iri.as_str());

        self.statement(set, terms.contains, &subject)?;
        self.statement(&subject, rdf::TYPE, &Term::iri(terms.feature))?;
        self.statement(&subject, terms.seqid, &Term::string(feature.seq_id()))?;
        self.statement(&subject, terms.source, &Term::string(feature.source()))?;

        let type_obj = if feature.feature_type().is_iri() {
            Term::iri(feature.feature_type().as_str())
        } else {
            Term::string(feature.feature_type().as_str())
        };
        self.statement(&subject, terms.feature_type, &type_obj)?;
        self.statement(&subject, terms.start, &Term::integer(feature.start()))?;
        self.statement(&subject, terms.end, &Term::integer(feature.end()))?;
        if let Some(score) = feature.score() {
            self.statement(&subject, terms.score, &Term::double(score))?;
        }
        self.statement(&subject, terms.strand,
                       &Term::iri(terms.strand_class(feature.strand())))?;
        if let Some(phase) = feature.phase() {
            self.statement(&subject, terms.phase, &Term::integer(u64::from(phase)))?;
        }

        for (tag, values) in feature.attributes().iter() {
            match tag.as_str() {
                ID_STR => {},
                PARENT_STR => {
                    for parent_id in values {
                        let parent = Term::iri(format!("{}/feature/{}", set_uri, parent_id));
                        self.statement(&subject, terms.parent, &parent)?;
                    }
                },
                _ => {
                    for (idx, value) in values.iter().enumerate() {
                        let attribute = if values.len() == 1 {
                            Term::iri(format!("{}/attribute/{}", feature_iri, tag))
                        } else {
                            Term::iri(format!("{}/attribute/{}-{}", feature_iri, tag, idx + 1))
                        };
                        self.statement(&subject, terms.attributes, &attribute)?;
                        self.statement(&attribute, rdf::TYPE, &Term::iri(terms.attribute))?;
                        self.statement(&attribute, terms.tag, &Term::string(tag.as_str()))?;
                        self.statement(&attribute, rdf::VALUE, &Term::string(value.as_str()))?;
                    }
                },
            }
        }
        Ok(())
    }

    #[inline]
    fn statement(&mut self, subject: &Term, predicate: &str, object: &Term) -> Result<(), RdfError> {
        writeln!(self.inner, "{} {} {} .", subject, IriRef(predicate), object)
            .map_err(RdfError::from)
    }
}

impl Writer<BufWriter<fs::File>> {

    /// Creates an N-Triples writer that writes to the given path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let f = fs::File::create(path)?;
        Ok(Writer::from_writer(BufWriter::new(f)))
    }
}

impl Writer<Vec<u8>> {

    /// Creates an N-Triples writer that writes to an in-memory buffer.
    ///
    /// The initial capacity of the buffer is 64 KiB.
    pub fn from_memory() -> Writer<Vec<u8>> {
        Writer::from_writer(Vec::with_capacity(1024 * 64))
    }

    /// Returns the values of the in-memory buffer as a string.
    pub fn as_string(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.inner)
    }
}

/// Returns the IRI of a feature.
///
/// The IRI is created from the first `ID` value if present. Otherwise it is created from the
/// seqid, source, type, start, end, strand, and phase of the feature, in which case two
/// features that only differ in other columns share an IRI.
pub fn feature_iri(set_uri: &str, feature: &Feature) -> String {
    match feature.id() {
        Some(id) => format!("{}/feature/{}", set_uri, id),
        None => {
            let phase = feature.phase().map(|p| p.to_string()).unwrap_or_default();
            let fields = [
                feature.seq_id().to_owned(),
                feature.source().to_owned(),
                strip_scheme(feature.feature_type().as_str()).to_owned(),
                feature.start().to_string(),
                feature.end().to_string(),
                feature.strand().name().to_owned(),
                phase,
            ];
            format!("{}/feature/{}", set_uri, fields.iter().join(","))
        },
    }
}

/// Removes a leading `scheme://` from the value.
#[inline]
fn strip_scheme(value: &str) -> &str {
    match value.find("://") {
        Some(idx) if idx > 0 && !value[..idx].contains(':') => &value[idx + 3..],
        _ => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use {FBuilder, FeatureType};

    #[test]
    fn feature_iri_from_id() {
        let fx = FBuilder::new("chr1", 1, 2).attribute("ID", "gene1").build();
        assert_eq!(feature_iri("urn:s", &fx), "urn:s/feature/gene1");
    }

    #[test]
    fn feature_iri_structural() {
        let fx = FBuilder::new("chr1", 10, 20)
            .source("src")
            .feature_type(FeatureType::Term("http://purl.obolibrary.org/obo/SO_0000147"))
            .strand(Strand::Negative)
            .phase(Some(1))
            .attribute("Note", "x")
            .build();
        assert_eq!(feature_iri("urn:s", &fx),
                   "urn:s/feature/chr1,src,purl.obolibrary.org/obo/SO_0000147,10,20,negative,1");

        let no_phase = FBuilder::new("chr1", 10, 20)
            .feature_type(FeatureType::Name("thing".to_owned()))
            .build();
        assert_eq!(feature_iri("urn:s", &no_phase),
                   "urn:s/feature/chr1,,thing,10,20,not_stranded,");
    }

    #[test]
    fn strip_scheme_only_leading() {
        assert_eq!(strip_scheme("http://a/b"), "a/b");
        assert_eq!(strip_scheme("gene"), "gene");
        assert_eq!(strip_scheme("urn:x://y"), "urn:x://y");
    }
}
