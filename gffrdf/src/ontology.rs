/*! Ontology term tables.

Two vocabularies describe the structure of a feature set: GFF3O for GFF3 input and GVF1O for GVF
input. Both share the same class and property layout and only differ in their namespace and the
properties used for version pragmas. Feature types are resolved against a subset of the Sequence
Ontology Feature Annotation (SOFA) terms.

Feature properties are split into two partitions: datatype properties (whose objects are
literals) and object properties (whose objects are resources). Some labels, such as `seqid`,
exist in both partitions and must be resolved with [`Vocabulary::with_parent`].
*/

/// Namespace of OBO ontology terms, used for dereferencing `SO:` accessions.
pub const OBO_NS: &'static str = "http://purl.obolibrary.org/obo/";

/// Terms of the RDF vocabulary.
pub mod rdf {
    pub const TYPE: &'static str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    pub const VALUE: &'static str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#value";
}

/// XML schema datatypes used for typed literals.
pub mod xsd {
    pub const INTEGER: &'static str = "http://www.w3.org/2001/XMLSchema#integer";
    pub const DOUBLE: &'static str = "http://www.w3.org/2001/XMLSchema#double";
    pub const FLOAT: &'static str = "http://www.w3.org/2001/XMLSchema#float";
}

/// Partition a feature property belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    Datatype,
    Object,
}

/// A property of a vocabulary.
#[derive(Debug)]
pub struct Property {
    pub label: &'static str,
    pub iri: &'static str,
    /// IRI of the partition root this property is attached under, if any.
    pub parent: Option<&'static str>,
}

/// Term table of one feature ontology.
#[derive(Debug)]
pub struct Vocabulary {
    name: &'static str,
    classes: &'static [(&'static str, &'static str)],
    datatype_root: &'static str,
    object_root: &'static str,
    properties: &'static [Property],
    versions: &'static [(&'static str, &'static str)],
}

impl Vocabulary {

    /// Returns the short name of the vocabulary.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Looks up a class or property by its label.
    ///
    /// For labels present in both property partitions, the first definition is returned.
    pub fn term(&self, label: &str) -> Option<&'static str> {
        self.classes.iter()
            .find(|&&(l, _)| l == label)
            .map(|&(_, iri)| iri)
            .or_else(|| self.properties.iter()
                     .find(|prop| prop.label == label)
                     .map(|prop| prop.iri))
    }

    /// Returns the IRIs of the feature property partition roots.
    pub fn feature_properties(&self) -> [&'static str; 2] {
        [self.datatype_root, self.object_root]
    }

    /// Returns the partition root of the given kind.
    pub fn feature_property(&self, kind: PropertyKind) -> &'static str {
        match kind {
            PropertyKind::Datatype => self.datatype_root,
            PropertyKind::Object => self.object_root,
        }
    }

    /// Returns whether the IRI is a datatype property or the datatype partition root.
    pub fn is_datatype_property(&self, iri: &str) -> bool {
        self.kind_of(iri) == Some(PropertyKind::Datatype)
    }

    /// Returns whether the IRI is an object property or the object partition root.
    pub fn is_object_property(&self, iri: &str) -> bool {
        self.kind_of(iri) == Some(PropertyKind::Object)
    }

    /// Resolves a property label within the partition rooted at `parent`.
    pub fn with_parent(&self, label: &str, parent: &str) -> Option<&'static str> {
        self.properties.iter()
            .find(|prop| prop.label == label && prop.parent == Some(parent))
            .map(|prop| prop.iri)
    }

    /// Returns the property used for the value of the given version pragma.
    pub fn version_property(&self, pragma_name: &str) -> Option<&'static str> {
        self.versions.iter()
            .find(|&&(name, _)| name == pragma_name)
            .and_then(|&(_, label)| self.term(label))
    }

    fn kind_of(&self, iri: &str) -> Option<PropertyKind> {
        if iri == self.datatype_root {
            return Some(PropertyKind::Datatype);
        }
        if iri == self.object_root {
            return Some(PropertyKind::Object);
        }
        self.properties.iter()
            .find(|prop| prop.iri == iri)
            .and_then(|prop| prop.parent)
            .and_then(|parent| self.kind_of(parent))
    }
}

macro_rules! feature_vocabulary {
    ($vocab:ident, $name:expr, $ns:literal,
     [$(($version_pragma:expr, $version_label:literal)),*]) => (

        pub static $vocab: Vocabulary = Vocabulary {
            name: $name,
            classes: &[
                ("Set", concat!($ns, "Set")),
                ("Feature", concat!($ns, "Feature")),
                ("Attribute", concat!($ns, "Attribute")),
                ("NotStranded", concat!($ns, "NotStranded")),
                ("UnknownStrand", concat!($ns, "UnknownStrand")),
                ("Positive", concat!($ns, "Positive")),
                ("Negative", concat!($ns, "Negative")),
            ],
            datatype_root: concat!($ns, "FeatureDatatypeProperty"),
            object_root: concat!($ns, "FeatureObjectProperty"),
            properties: &[
                Property { label: "contains", iri: concat!($ns, "contains"), parent: None },
                Property { label: "seqid", iri: concat!($ns, "seqid"),
                           parent: Some(concat!($ns, "FeatureDatatypeProperty")) },
                Property { label: "seqid", iri: concat!($ns, "seqid_landmark"),
                           parent: Some(concat!($ns, "FeatureObjectProperty")) },
                Property { label: "source", iri: concat!($ns, "source"),
                           parent: Some(concat!($ns, "FeatureDatatypeProperty")) },
                Property { label: "type", iri: concat!($ns, "type"),
                           parent: Some(concat!($ns, "FeatureDatatypeProperty")) },
                Property { label: "start", iri: concat!($ns, "start"),
                           parent: Some(concat!($ns, "FeatureDatatypeProperty")) },
                Property { label: "end", iri: concat!($ns, "end"),
                           parent: Some(concat!($ns, "FeatureDatatypeProperty")) },
                Property { label: "score", iri: concat!($ns, "score"),
                           parent: Some(concat!($ns, "FeatureDatatypeProperty")) },
                Property { label: "strand", iri: concat!($ns, "strand"),
                           parent: Some(concat!($ns, "FeatureObjectProperty")) },
                Property { label: "phase", iri: concat!($ns, "phase"),
                           parent: Some(concat!($ns, "FeatureDatatypeProperty")) },
                Property { label: "attributes", iri: concat!($ns, "attributes"),
                           parent: Some(concat!($ns, "FeatureObjectProperty")) },
                Property { label: "parent", iri: concat!($ns, "parent"),
                           parent: Some(concat!($ns, "FeatureObjectProperty")) },
                Property { label: "tag", iri: concat!($ns, "tag"), parent: None },
                $(Property { label: $version_label, iri: concat!($ns, $version_label),
                             parent: None },)*
            ],
            versions: &[$(($version_pragma, $version_label)),*],
        };
    );
}

feature_vocabulary!(GFF3O, "GFF3O", "http://www.biointerchange.org/gff3o#",
                    [("gff-version", "version")]);

feature_vocabulary!(GVF1O, "GVF1O", "http://www.biointerchange.org/gvf1o#",
                    [("gff-version", "gff_version"), ("gvf-version", "gvf_version")]);

macro_rules! so {
    ($acc:literal) => (concat!("http://purl.obolibrary.org/obo/SO_", $acc));
}

/// SOFA term labels and their IRIs.
static SOFA_TERMS: &'static [(&'static str, &'static str)] = &[
    ("region", so!("0000001")),
    ("match_part", so!("0000039")),
    ("polypeptide", so!("0000104")),
    ("exon", so!("0000147")),
    ("supercontig", so!("0000148")),
    ("contig", so!("0000149")),
    ("deletion", so!("0000159")),
    ("enhancer", so!("0000165")),
    ("promoter", so!("0000167")),
    ("operon", so!("0000178")),
    ("primary_transcript", so!("0000185")),
    ("intron", so!("0000188")),
    ("UTR", so!("0000203")),
    ("five_prime_UTR", so!("0000204")),
    ("three_prime_UTR", so!("0000205")),
    ("mRNA", so!("0000234")),
    ("TF_binding_site", so!("0000235")),
    ("rRNA", so!("0000252")),
    ("tRNA", so!("0000253")),
    ("snRNA", so!("0000274")),
    ("snoRNA", so!("0000275")),
    ("miRNA", so!("0000276")),
    ("origin_of_replication", so!("0000296")),
    ("TSS", so!("0000315")),
    ("CDS", so!("0000316")),
    ("start_codon", so!("0000318")),
    ("stop_codon", so!("0000319")),
    ("pseudogene", so!("0000336")),
    ("chromosome", so!("0000340")),
    ("match", so!("0000343")),
    ("protein_match", so!("0000349")),
    ("binding_site", so!("0000409")),
    ("polyA_site", so!("0000553")),
    ("intergenic_region", so!("0000605")),
    ("repeat_region", so!("0000657")),
    ("insertion", so!("0000667")),
    ("EST_match", so!("0000668")),
    ("transcript", so!("0000673")),
    ("cDNA_match", so!("0000689")),
    ("gene", so!("0000704")),
    ("gap", so!("0000730")),
    ("copy_number_variation", so!("0001019")),
    ("sequence_alteration", so!("0001059")),
    ("sequence_variant", so!("0001060")),
    ("biological_region", so!("0001411")),
    ("SNV", so!("0001483")),
    ("lnc_RNA", so!("0001877")),
    ("substitution", so!("1000002")),
];

/// Resolves a SOFA term label into its IRI.
///
/// Labels use underscores in place of spaces, e.g. `five_prime_UTR`.
pub fn sofa_term(label: &str) -> Option<&'static str> {
    SOFA_TERMS.iter()
        .find(|&&(l, _)| l == label)
        .map(|&(_, iri)| iri)
}
