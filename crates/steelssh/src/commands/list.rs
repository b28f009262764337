//! `steelssh list`: print the directory once, without prompting.

use steelssh_core::Controller;

use crate::cli::ListArgs;
use crate::error::CliError;
use crate::output;

pub async fn handle(controller: &Controller, args: &ListArgs) -> Result<(), CliError> {
    let directory = super::fetch_directory(controller).await?;
    let out = output::render_directory(args.output, &directory)?;
    output::print_output(&out);
    Ok(())
}
