#![deny(
        trivial_casts, trivial_numeric_casts,
        unsafe_code,
        unstable_features,
        unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unused_results)]

extern crate itertools;
extern crate linked_hash_map;
#[macro_use]
extern crate log;
#[macro_use]
extern crate quick_error;
extern crate regex;

use regex::Error as RegexError;

pub mod ontology;

mod model;
pub use model::{Attributes, Feature, FBuilder, FeatureSet, FeatureType, Format,
                NamedRegion, Pragma, PragmaUpdate, Strand};

mod ntriples;
pub use ntriples::Term;

mod io_gff3;
pub use io_gff3::{Reader as Gff3Reader, Session, SessionState,
                  LineParser, LineResult,
                  Gff3Error, RecordError};

mod io_rdf;
pub use io_rdf::{Writer as RdfWriter, RdfError, feature_iri};


quick_error! {
    #[derive(Debug)]
    pub enum Error {
        Gff3(err: Gff3Error) {
            description("error while reading feature input")
            display("{}", err)
            from()
            cause(err)
        }
        Rdf(err: RdfError) {
            description("error while writing triples")
            display("{}", err)
            from()
            cause(err)
        }
        Regex(err: RegexError) {
            description("invalid regular expression")
            display("{}", err)
            from()
            cause(err)
        }
    }
}

pub type Result<T> = ::std::result::Result<T, Error>;

// Crate-wide constants
mod consts {
    // Value for unknown columns.
    pub(crate) const UNK_STR: &'static str = ".";

    // Number of tab-separated columns in a feature line.
    pub(crate) const NUM_COLUMNS: usize = 9;

    // Line prefixes.
    pub(crate) const COMMENT_PREFIX: &'static str = "#";
    pub(crate) const PRAGMA_PREFIX: &'static str = "##";
    pub(crate) const FASTA_PREFIX: &'static str = "##FASTA";

    // Pragmas with a dedicated interpretation.
    pub(crate) const GFF_VERSION_STR: &'static str = "gff-version";
    pub(crate) const GVF_VERSION_STR: &'static str = "gvf-version";
    pub(crate) const SEQUENCE_REGION_STR: &'static str = "sequence-region";

    // Attribute tags with a dedicated interpretation.
    pub(crate) const ID_STR: &'static str = "ID";
    pub(crate) const PARENT_STR: &'static str = "Parent";

    // Default IRIs of feature sets.
    pub(crate) const GFF3_SET_URI: &'static str = "urn:gffrdf:gff3:set";
    pub(crate) const GVF_SET_URI: &'static str = "urn:gffrdf:gvf:set";
}
