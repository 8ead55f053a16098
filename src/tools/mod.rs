//! Functions invoked by the subcommands.

pub mod to_rdf;

const TEMPLATE_SUBCMD: &'static str = "
USAGE:
    {usage}

ARGS:
{positionals}

OPTIONS:
{unified}";
