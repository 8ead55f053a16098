use clap::{App, AppSettings, ArgMatches};
use tools;

const TEMPLATE: &'static str = "
{bin} {version}
{about}


USAGE:
    {usage}

SUBCOMMANDS:
{subcommands}

OPTIONS:
{unified}";

const ABOUT: &'static str = "
gffrdftools converts GFF3 and GVF feature annotations into RDF, written as
N-Triples. Set RUST_LOG=debug to follow batch progress on stderr.";


/// Constructs a new `clap::App` for argument parsing.
pub fn build_cli() -> App<'static, 'static> {
    App::new("gffrdftools")
        .version(crate_version!())
        .author(crate_authors!())
        .about(ABOUT)
        .template(TEMPLATE)
        .max_term_width(80)
        .settings(&[AppSettings::GlobalVersion,
                    AppSettings::SubcommandRequiredElseHelp,
                    AppSettings::DisableHelpSubcommand,
                    AppSettings::VersionlessSubcommands])
        .subcommand(tools::to_rdf::build_cli())
}

/// Runs the appropriate tool given the subcommand argument matches.
pub fn run(matches: &ArgMatches) -> ::Result<()> {
    match matches.subcommand() {
        (tools::to_rdf::NAME, Some(m)) => tools::to_rdf::run(m),
        // Subcommands are required by the app settings.
        _ => Err(::Error::UnknownSubcommand),
    }
}
