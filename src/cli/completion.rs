//! Shell completion script generation
//!
//! Produces the clap-generated completion script for this binary, followed
//! by a hook that completes the catalog's program by calling back into
//! `catalog-complete complete`.

use clap::CommandFactory;
use clap_complete::{Shell, generate};

use crate::cli::CliArgs;
use crate::error::{CompleteError, Result};

const BIN_NAME: &str = "catalog-complete";

/// Generate shell completion script
///
/// # Arguments
/// * `shell_name` - Shell type (bash, zsh, fish)
/// * `program` - Program whose command line the hook completes
///
/// # Returns
/// * `Result<String>` - The complete script
pub fn generate_completion(shell_name: &str, program: &str) -> Result<String> {
    let shell = parse_shell(shell_name)?;
    let base = base_script(shell);
    let hook = match shell {
        Shell::Bash => bash_hook(program),
        Shell::Zsh => zsh_hook(program),
        Shell::Fish => fish_hook(program),
        _ => return Err(unsupported(shell_name)),
    };
    Ok(format!("{base}\n{hook}"))
}

/// Parse shell name string to Shell enum
fn parse_shell(shell_name: &str) -> Result<Shell> {
    match shell_name.to_lowercase().as_str() {
        "bash" => Ok(Shell::Bash),
        "zsh" => Ok(Shell::Zsh),
        "fish" => Ok(Shell::Fish),
        _ => Err(unsupported(shell_name)),
    }
}

fn unsupported(shell_name: &str) -> CompleteError {
    CompleteError::Generic(format!(
        "Unsupported shell: {}. Supported shells: bash, zsh, fish",
        shell_name
    ))
}

/// Clap-generated script for this binary's own arguments
fn base_script(shell: Shell) -> String {
    let mut cmd = CliArgs::command();
    let mut buffer = Vec::new();
    generate(shell, &mut cmd, BIN_NAME, &mut buffer);
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Shell-safe function name fragment for a program
fn function_suffix(program: &str) -> String {
    program
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

fn bash_hook(program: &str) -> String {
    let suffix = function_suffix(program);
    format!(
        r#"# Catalog completion for {program}
_catalog_complete_{suffix}() {{
    local IFS=$'\n'
    COMPREPLY=($({BIN_NAME} complete --cursor "$COMP_POINT" -- "$COMP_LINE" 2>/dev/null))
}}

complete -o default -F _catalog_complete_{suffix} {program}
"#
    )
}

fn zsh_hook(program: &str) -> String {
    let suffix = function_suffix(program);
    format!(
        r#"# Catalog completion for {program}
_catalog_complete_{suffix}() {{
    local -a candidates
    candidates=("${{(@f)$({BIN_NAME} complete --cursor "$CURSOR" -- "$BUFFER" 2>/dev/null)}}")
    compadd -a candidates
}}

compdef _catalog_complete_{suffix} {program}
"#
    )
}

fn fish_hook(program: &str) -> String {
    format!(
        r#"# Catalog completion for {program}
complete -c {program} -f -a "({BIN_NAME} complete --cursor (commandline -C) -- (commandline) 2>/dev/null)"
"#
    )
}
