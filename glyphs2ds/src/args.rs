//! Command line arguments

use std::path::PathBuf;

use clap::Parser;
use glyphs2designspace::Flags;
use serde::{Deserialize, Serialize};

/// Which axes would a designspace made from this Glyphs font have?
#[derive(Serialize, Deserialize, Parser, Debug, Clone, PartialEq)]
pub struct Args {
    /// A Glyphs font, as JSON
    #[arg(short, long)]
    pub source: PathBuf,

    /// Where to write the axes, as YAML. Stdout if omitted.
    #[arg(short, long)]
    #[clap(default_value = None)]
    pub output: Option<PathBuf>,

    /// Let inactive instances shape the axis mappings, for minimal diffs on a round trip.
    #[arg(long)]
    #[clap(default_value = "false")]
    pub minimize_glyphs_diffs: bool,
}

impl Args {
    pub fn new(source: impl Into<PathBuf>) -> Args {
        Args {
            source: source.into(),
            output: None,
            minimize_glyphs_diffs: false,
        }
    }

    /// Collect various relevant flags into a [`Flags`] object.
    pub fn flags(&self) -> Flags {
        let mut flags = Flags::default();

        flags.set(Flags::MINIMIZE_GLYPHS_DIFFS, self.minimize_glyphs_diffs);

        flags
    }
}
