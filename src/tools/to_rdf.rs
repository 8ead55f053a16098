use clap::{App, Arg, ArgMatches, SubCommand};

use gffrdf::{Gff3Reader, RdfWriter};

use tools::TEMPLATE_SUBCMD;
use utils::{resolve_format, resolve_reader, resolve_writer};

pub const NAME: &'static str = "to-rdf";


pub fn build_cli<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name(NAME)
        .about("Converts from the GFF3 or GVF format to N-Triples")
        .template(TEMPLATE_SUBCMD)
        .arg(Arg::with_name("input")
                .value_name("input")
                .help("Path to input annotation file or '-' for stdin")
                .takes_value(true)
                .required(true))
        .arg(Arg::with_name("output")
                .value_name("output")
                .help("Path to output N-Triples file or '-' for stdout")
                .takes_value(true)
                .required(true))
        .arg(Arg::with_name("format")
                .long("format")
                .value_name("format")
                .help("Input format; guessed from the input extension if not set")
                .possible_values(&["gff3", "gvf"])
                .takes_value(true))
        .arg(Arg::with_name("batch-size")
                .long("batch-size")
                .value_name("n")
                .help("Number of features held in memory before writing them out")
                .takes_value(true))
        .arg(Arg::with_name("set-uri")
                .long("set-uri")
                .value_name("uri")
                .help("URI of the feature set resource")
                .takes_value(true))
}

pub fn run(args: &ArgMatches) -> ::Result<()> {
    let input = args.value_of("input").ok_or(::Error::MissingArg("input"))?;
    let output = args.value_of("output").ok_or(::Error::MissingArg("output"))?;
    let format = resolve_format(args.value_of("format"), input)?;

    let mut reader = Gff3Reader::new(format);
    if args.is_present("batch-size") {
        let _ = reader.batch_size(Some(value_t!(args, "batch-size", usize)?));
    }
    if let Some(uri) = args.value_of("set-uri") {
        let _ = reader.set_uri(uri);
    }

    info!("converting {} as {:?} into {}", input, format, output);
    let mut session = reader.deserialize(resolve_reader(input)?)?;
    let mut writer = RdfWriter::from_writer(resolve_writer(output)?);

    writer.serialize(session.feature_set())?;
    let mut num_batches = 1;
    while session.postponed() {
        writer.serialize(session.resume()?)?;
        num_batches += 1;
    }
    debug!("wrote {} batches", num_batches);
    Ok(())
}
