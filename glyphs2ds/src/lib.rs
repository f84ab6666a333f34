//! Loads a Glyphs font and reports the designspace axes it implies.

mod args;
mod error;

pub use args::Args;
pub use error::Error;

use std::{
    fs,
    io::{self, Write},
};

use designspace_ir::DesignSpaceDocument;
use glyphs2designspace::to_designspace_axes;
use glyphs_model::Font;
use log::info;

/// The designspace axes of the font at `args.source`.
pub fn designspace_axes(args: &Args) -> Result<DesignSpaceDocument, Error> {
    if !args.source.is_file() {
        return Err(Error::FileExpected(args.source.clone()));
    }
    let font = Font::load(&args.source)?;
    info!(
        "Loaded '{}', {} masters and {} instances",
        font.family_name,
        font.masters.len(),
        font.instances.len()
    );

    let mut designspace = DesignSpaceDocument::new();
    to_designspace_axes(&font, &mut designspace, args.flags())?;
    Ok(designspace)
}

pub fn run(args: &Args) -> Result<(), Error> {
    let designspace = designspace_axes(args)?;
    let yml = serde_yaml::to_string(&designspace)?;
    match &args.output {
        Some(path) => fs::write(path, yml).map_err(|source| Error::FileIo {
            path: path.clone(),
            source,
        })?,
        None => io::stdout()
            .write_all(yml.as_bytes())
            .map_err(Error::StdioWriteFail)?,
    }
    Ok(())
}
