use std::fs;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use gffrdf::Format;


const STREAM_ARG: &'static str = "-";

// Input extensions of formats that are not line-based feature annotations.
const UNSUPPORTED_EXTS: [&'static str; 2] = ["json", "xml"];


pub fn resolve_reader(raw_arg: &str) -> ::Result<Box<dyn BufRead>> {
    match raw_arg {
        STREAM_ARG => Ok(Box::new(BufReader::new(io::stdin()))),
        path => fs::File::open(path)
            .map_err(::Error::from)
            .map(|file| Box::new(BufReader::new(file)) as Box<dyn BufRead>)
    }
}

pub fn resolve_writer(raw_arg: &str) -> ::Result<Box<dyn Write>> {
    match raw_arg {
        STREAM_ARG => Ok(Box::new(io::stdout())),
        path => fs::File::create(path)
            .map_err(::Error::from)
            .map(|file| Box::new(BufWriter::new(file)) as Box<dyn Write>)
    }
}

/// Determines the input format from an explicit format name or the input path.
///
/// Without a name, `.gvf` inputs are read as GVF and everything else as GFF3.
pub fn resolve_format(format_arg: Option<&str>, raw_arg: &str) -> ::Result<Format> {
    let ext = Path::new(raw_arg).extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    if let Some(ref ext) = ext {
        if UNSUPPORTED_EXTS.contains(&ext.as_str()) {
            return Err(::Error::UnsupportedInput(raw_arg.to_owned()));
        }
    }

    match (format_arg, ext.as_ref().map(|ext| ext.as_str())) {
        (Some("gvf"), _) | (None, Some("gvf")) => Ok(Format::Gvf),
        _ => Ok(Format::Gff3),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_format_sniffs_extension() {
        assert_eq!(resolve_format(None, "calls.gvf").ok(), Some(Format::Gvf));
        assert_eq!(resolve_format(None, "calls.GVF").ok(), Some(Format::Gvf));
        assert_eq!(resolve_format(None, "genes.gff3").ok(), Some(Format::Gff3));
        assert_eq!(resolve_format(None, "-").ok(), Some(Format::Gff3));
    }

    #[test]
    fn resolve_format_explicit_name_wins() {
        assert_eq!(resolve_format(Some("gff3"), "calls.gvf").ok(), Some(Format::Gff3));
        assert_eq!(resolve_format(Some("gvf"), "-").ok(), Some(Format::Gvf));
    }

    #[test]
    fn resolve_format_rejects_structured_inputs() {
        assert!(matches!(resolve_format(None, "genes.json"),
                         Err(::Error::UnsupportedInput(_))));
        assert!(matches!(resolve_format(Some("gff3"), "genes.XML"),
                         Err(::Error::UnsupportedInput(_))));
    }
}
