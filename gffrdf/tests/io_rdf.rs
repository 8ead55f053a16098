extern crate gffrdf;

use std::env;
use std::fs;
use std::process;

use gffrdf::{FBuilder, FeatureSet, Format, Gff3Reader, RdfWriter, Strand};


static EDEN_GFF3: &'static str = include_str!("data/eden.gff3");
static FIVE_GENES_GFF3: &'static str = include_str!("data/five_genes.gff3");
static VARIANTS_GVF: &'static str = include_str!("data/variants.gvf");

const GFF3O: &'static str = "http://www.biointerchange.org/gff3o#";
const RDF_TYPE: &'static str = "<http://www.w3.org/1999/02/22-rdf-syntax-ns#type>";


fn read_all(text: &str, format: Format) -> FeatureSet {
    Gff3Reader::new(format).deserialize_str(text)
        .expect("a session")
        .into_feature_set()
}

fn write(fs: &FeatureSet) -> String {
    let mut writer = RdfWriter::from_memory();
    writer.serialize(fs).expect("serialized triples");
    writer.as_string().into_owned()
}

fn gff3o(term: &str) -> String {
    format!("<{}{}>", GFF3O, term)
}

/// Returns the lines whose subject and predicate match.
fn objects<'a>(output: &'a str, subject: &str, predicate: &str) -> Vec<&'a str> {
    let prefix = format!("{} {} ", subject, predicate);
    output.lines()
        .filter(|line| line.starts_with(prefix.as_str()))
        .map(|line| line[prefix.len()..].trim_end_matches(" ."))
        .collect()
}

#[test]
fn rdf_writer_scenario() {
    let fs = read_all("chr1\t.\tgene\t100\t200\t.\t+\t.\tID=gene1\n", Format::Gff3);
    let output = write(&fs);
    let set = "<urn:gffrdf:gff3:set>";
    let feature = "<urn:gffrdf:gff3:set/feature/gene1>";

    let expected = vec![
        format!("{} {} {} .", set, RDF_TYPE, gff3o("Set")),
        format!("{} {} {} .", set, gff3o("contains"), feature),
        format!("{} {} {} .", feature, RDF_TYPE, gff3o("Feature")),
        format!("{} {} \"chr1\" .", feature, gff3o("seqid")),
        format!("{} {} \"\" .", feature, gff3o("source")),
        format!("{} {} <http://purl.obolibrary.org/obo/SO_0000704> .", feature, gff3o("type")),
        format!("{} {} \"100\"^^<http://www.w3.org/2001/XMLSchema#integer> .",
                feature, gff3o("start")),
        format!("{} {} \"200\"^^<http://www.w3.org/2001/XMLSchema#integer> .",
                feature, gff3o("end")),
        format!("{} {} {} .", feature, gff3o("strand"), gff3o("Positive")),
    ];
    assert_eq!(output.lines().collect::<Vec<&str>>(), expected);
}

#[test]
fn rdf_writer_one_triple_per_field() {
    let fs = read_all(EDEN_GFF3, Format::Gff3);
    let output = write(&fs);
    let strands = [gff3o("Positive"), gff3o("Negative"), gff3o("NotStranded"),
                   gff3o("UnknownStrand")];

    for fx in fs.features() {
        let subject = format!("<{}>", gffrdf::feature_iri(fs.uri(), fx));
        assert_eq!(objects(&output, &subject, RDF_TYPE), vec![gff3o("Feature").as_str()]);
        for field in ["seqid", "source", "type", "start", "end"].iter() {
            assert_eq!(objects(&output, &subject, &gff3o(field)).len(), 1, "{}", field);
        }
        let strand = objects(&output, &subject, &gff3o("strand"));
        assert_eq!(strand.len(), 1);
        assert!(strands.iter().any(|s| s == strand[0]));
        let score = objects(&output, &subject, &gff3o("score"));
        assert_eq!(score.len(), if fx.score().is_some() { 1 } else { 0 });
    }
}

#[test]
fn rdf_writer_parents_and_attributes() {
    let fx = FBuilder::new("chr1", 1, 10)
        .attribute("ID", "f1")
        .attribute("Parent", "p1")
        .attribute("Parent", "p2")
        .attribute("Note", "hello")
        .build();
    let mut fs = FeatureSet::new(Format::Gff3, "urn:s");
    fs.add(fx);
    let output = write(&fs);
    let subject = "<urn:s/feature/f1>";

    assert_eq!(objects(&output, subject, &gff3o("parent")),
               vec!["<urn:s/feature/p1>", "<urn:s/feature/p2>"]);
    assert_eq!(objects(&output, subject, &gff3o("attributes")),
               vec!["<urn:s/feature/f1/attribute/Note>"]);

    let attribute = "<urn:s/feature/f1/attribute/Note>";
    assert_eq!(objects(&output, attribute, RDF_TYPE), vec![gff3o("Attribute").as_str()]);
    assert_eq!(objects(&output, attribute, &gff3o("tag")), vec!["\"Note\""]);
    assert_eq!(objects(&output, attribute, "<http://www.w3.org/1999/02/22-rdf-syntax-ns#value>"),
               vec!["\"hello\""]);
    assert!(!output.contains("/attribute/ID"));
    assert!(!output.contains("/attribute/Parent"));
}

#[test]
fn rdf_writer_numbered_attribute_values() {
    let fs = read_all(EDEN_GFF3, Format::Gff3);
    let output = write(&fs);
    let subject = "<urn:gffrdf:gff3:set/feature/cds00001>";
    assert_eq!(objects(&output, subject, &gff3o("attributes")),
               vec!["<urn:gffrdf:gff3:set/feature/cds00001/attribute/Note-1>",
                    "<urn:gffrdf:gff3:set/feature/cds00001/attribute/Note-2>"]);
    assert_eq!(objects(&output, "<urn:gffrdf:gff3:set/feature/cds00001/attribute/Note-2>",
                       "<http://www.w3.org/1999/02/22-rdf-syntax-ns#value>"),
               vec!["\"second\""]);
    assert_eq!(objects(&output, subject, &gff3o("phase")),
               vec!["\"0\"^^<http://www.w3.org/2001/XMLSchema#integer>"]);
    assert_eq!(objects(&output, subject, &gff3o("score")),
               vec!["\"0.8\"^^<http://www.w3.org/2001/XMLSchema#double>"]);
}

#[test]
fn rdf_writer_structural_identity() {
    let fs = read_all(EDEN_GFF3, Format::Gff3);
    let output = write(&fs);
    let exon = "<urn:gffrdf:gff3:set/feature/ctg123,,purl.obolibrary.org/obo/SO_0000147,\
                1300,1500,positive,>";
    assert_eq!(objects(&output, exon, &gff3o("parent")).len(), 2);
}

#[test]
fn rdf_writer_structural_identity_collision() {
    let mut fs = FeatureSet::new(Format::Gff3, "urn:s");
    for note in ["a", "b"].iter() {
        fs.add(FBuilder::new("chr1", 1, 10).strand(Strand::Negative).attribute("Note", *note).build());
    }
    let output = write(&fs);
    let subject = "<urn:s/feature/chr1,,,1,10,negative,>";
    assert_eq!(objects(&output, "<urn:s>", &gff3o("contains")), vec![subject, subject]);
}

#[test]
fn rdf_writer_version_pragma() {
    let fs = read_all(EDEN_GFF3, Format::Gff3);
    let output = write(&fs);
    assert_eq!(objects(&output, "<urn:gffrdf:gff3:set>", &gff3o("version")),
               vec!["\"3.0\"^^<http://www.w3.org/2001/XMLSchema#float>"]);
    assert!(!output.contains("sequence-region"));
}

#[test]
fn rdf_writer_gvf_vocabulary() {
    let fs = read_all(VARIANTS_GVF, Format::Gvf);
    let output = write(&fs);
    let set = "<urn:gffrdf:gvf:set>";
    let gvf1o = |term: &str| format!("<http://www.biointerchange.org/gvf1o#{}>", term);

    assert_eq!(objects(&output, set, RDF_TYPE), vec![gvf1o("Set").as_str()]);
    assert_eq!(objects(&output, set, &gvf1o("gff_version")),
               vec!["\"3.0\"^^<http://www.w3.org/2001/XMLSchema#float>"]);
    assert_eq!(objects(&output, set, &gvf1o("gvf_version")),
               vec!["\"1.07\"^^<http://www.w3.org/2001/XMLSchema#float>"]);
    assert_eq!(objects(&output, "<urn:gffrdf:gvf:set/feature/ID_2>", &gvf1o("type")),
               vec!["<http://purl.obolibrary.org/obo/SO_0000159>"]);
    assert!(!output.contains(GFF3O));
}

#[test]
fn rdf_writer_idempotent() {
    let fs = read_all(EDEN_GFF3, Format::Gff3);
    let mut writer = RdfWriter::from_memory();
    writer.serialize(&fs).expect("first pass");
    let first = writer.as_string().into_owned();
    writer.serialize(&fs).expect("second pass");
    let both = writer.as_string().into_owned();
    assert_eq!(both, format!("{}{}", first, first));
    assert_eq!(write(&fs), first);
}

#[test]
fn rdf_writer_batches() {
    let mut reader = Gff3Reader::new(Format::Gff3);
    let _ = reader.batch_size(Some(2));
    let mut session = reader.deserialize_str(EDEN_GFF3).expect("a session");
    let mut writer = RdfWriter::from_memory();
    writer.serialize(session.feature_set()).expect("first batch");
    while session.postponed() {
        let fs = session.resume().expect("a batch");
        writer.serialize(fs).expect("a batch written");
    }
    let output = writer.as_string().into_owned();
    assert_eq!(objects(&output, "<urn:gffrdf:gff3:set>", &gff3o("contains")).len(), 5);
    assert_eq!(objects(&output, "<urn:gffrdf:gff3:set>", RDF_TYPE).len(), 3);
}

#[test]
fn rdf_writer_strand_classes() {
    let fs = read_all(FIVE_GENES_GFF3, Format::Gff3);
    let output = write(&fs);
    let expected = [("g1", "Positive"), ("g2", "Negative"), ("g3", "UnknownStrand"),
                    ("g4", "NotStranded"), ("g5", "Positive")];
    for &(id, class) in expected.iter() {
        let subject = format!("<urn:gffrdf:gff3:set/feature/{}>", id);
        assert_eq!(objects(&output, &subject, &gff3o("strand")), vec![gff3o(class).as_str()],
                   "strand of {}", id);
    }
}

#[test]
fn rdf_writer_into_inner() {
    let fs = read_all(FIVE_GENES_GFF3, Format::Gff3);
    let mut writer = RdfWriter::from_writer(Vec::new());
    writer.serialize(&fs).expect("serialized triples");
    let bytes = writer.into_inner();
    assert_eq!(String::from_utf8(bytes).expect("utf-8 output"), write(&fs));
}

#[test]
fn rdf_writer_from_file() {
    let feature_set = read_all(FIVE_GENES_GFF3, Format::Gff3);
    let path = env::temp_dir().join(format!("gffrdf-from-file-{}.nt", process::id()));
    {
        let mut writer = RdfWriter::from_file(&path).expect("a file writer");
        writer.serialize(&feature_set).expect("serialized triples");
    }
    let written = fs::read_to_string(&path).expect("written file");
    fs::remove_file(&path).expect("removed file");
    assert_eq!(written, write(&feature_set));
}
